//! Append-only SQL text and parameter sink.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Literal;
use crate::error::{SqlError, SqlResult};

/// One bound parameter, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindParam {
    /// Placeholder name for named placeholders or caller-named parameters.
    pub name: Option<String>,
    /// `None` for a named parameter the caller binds later.
    pub value: Option<Literal>,
}

/// Rendered SQL plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlText {
    pub sql: String,
    pub params: Vec<BindParam>,
}

impl SqlText {
    /// Parameter values in placeholder order.
    pub fn values(&self) -> Vec<Option<&Literal>> {
        self.params.iter().map(|p| p.value.as_ref()).collect()
    }
}

impl fmt::Display for SqlText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

const INDENT: &str = "  ";

/// Accumulates SQL text for a single render call.
///
/// Not shared between renders; create one per call.
#[derive(Debug, Default)]
pub struct SqlWriter {
    buf: String,
    params: Vec<BindParam>,
    /// Named placeholders written so far, with the value each one binds.
    named: HashMap<String, Option<Literal>>,
    /// Caller-supplied names that generated names must avoid.
    reserved: HashSet<String>,
    pretty: bool,
    depth: usize,
}

impl SqlWriter {
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::default()
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn write(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    pub fn write_char(&mut self, c: char) -> &mut Self {
        self.buf.push(c);
        self
    }

    /// Start a major clause (FROM, WHERE, ...): a line break in pretty
    /// mode, a single space otherwise.
    pub fn clause(&mut self, keyword: &str) -> &mut Self {
        self.separator().write(keyword)
    }

    /// The break between two clauses.
    pub fn separator(&mut self) -> &mut Self {
        if self.pretty {
            self.newline();
        } else {
            self.buf.push(' ');
        }
        self
    }

    fn newline(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    /// `(` body `)` on one line.
    pub fn parenthesized<F>(&mut self, body: F) -> SqlResult<()>
    where
        F: FnOnce(&mut Self) -> SqlResult<()>,
    {
        self.buf.push('(');
        body(self)?;
        self.buf.push(')');
        Ok(())
    }

    /// A parenthesised subquery; indented on its own lines when pretty.
    pub fn nested<F>(&mut self, body: F) -> SqlResult<()>
    where
        F: FnOnce(&mut Self) -> SqlResult<()>,
    {
        self.buf.push('(');
        if self.pretty {
            self.depth += 1;
            self.newline();
            let result = body(self);
            self.depth -= 1;
            result?;
            self.newline();
        } else {
            body(self)?;
        }
        self.buf.push(')');
        Ok(())
    }

    pub fn comma_separated<T, F>(&mut self, items: &[T], mut each: F) -> SqlResult<()>
    where
        F: FnMut(&mut Self, &T) -> SqlResult<()>,
    {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            each(self, item)?;
        }
        Ok(())
    }

    /// Record a bound parameter; returns its 1-based position.
    pub fn push_param(&mut self, param: BindParam) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn reserve_names(&mut self, names: impl IntoIterator<Item = String>) {
        self.reserved.extend(names);
    }

    /// `p{index}`, or the first `p{n}` after it that is neither reserved
    /// nor already written.
    pub fn generated_name(&self, index: usize) -> String {
        (index..)
            .map(|n| format!("p{}", n))
            .find(|name| !self.reserved.contains(name) && !self.named.contains_key(name))
            .unwrap_or_default()
    }

    /// Record a named placeholder. A name may repeat, but only with the
    /// value it was first bound to.
    pub fn bind_named(&mut self, name: &str, value: Option<&Literal>) -> SqlResult<()> {
        match self.named.get(name) {
            Some(bound) if bound.as_ref() != value => Err(SqlError::invalid(format!(
                "parameter :{} is bound to two different values",
                name
            ))),
            Some(_) => Ok(()),
            None => {
                self.named.insert(name.to_string(), value.cloned());
                Ok(())
            }
        }
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Parenthesise everything written since `start`, a previous [`len`](Self::len).
    pub fn wrap_from(&mut self, start: usize) {
        self.buf.insert(start, '(');
        self.buf.push(')');
    }

    pub fn finish(self) -> SqlText {
        SqlText {
            sql: self.buf,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_clauses() {
        let mut w = SqlWriter::new(false);
        w.write("SELECT a").clause("FROM").write(" t");
        assert_eq!(w.finish().sql, "SELECT a FROM t");
    }

    #[test]
    fn test_pretty_nesting() {
        let mut w = SqlWriter::new(true);
        w.write("SELECT a").clause("FROM").write(" ");
        w.nested(|w| {
            w.write("SELECT b").clause("FROM").write(" t");
            Ok(())
        })
        .unwrap();
        assert_eq!(
            w.finish().sql,
            "SELECT a\nFROM (\n  SELECT b\n  FROM t\n)"
        );
    }

    #[test]
    fn test_wrap_from() {
        let mut w = SqlWriter::new(false);
        w.write("-");
        let start = w.len();
        w.write("-5");
        w.wrap_from(start);
        assert_eq!(w.finish().sql, "-(-5)");
    }

    #[test]
    fn test_generated_names_skip_reserved() {
        let mut w = SqlWriter::new(false);
        w.reserve_names(["p1".to_string()]);
        assert_eq!(w.generated_name(1), "p2");
        w.bind_named("p2", Some(&Literal::Integer(1))).unwrap();
        assert_eq!(w.generated_name(2), "p3");
    }

    #[test]
    fn test_named_value_conflict_rejected() {
        let mut w = SqlWriter::new(false);
        w.bind_named("id", Some(&Literal::Integer(1))).unwrap();
        assert!(w.bind_named("id", Some(&Literal::Integer(1))).is_ok());
        assert!(w.bind_named("id", Some(&Literal::Integer(2))).is_err());
    }

    #[test]
    fn test_params_are_numbered() {
        let mut w = SqlWriter::new(false);
        let first = w.push_param(BindParam {
            name: None,
            value: Some(Literal::Integer(1)),
        });
        let second = w.push_param(BindParam {
            name: Some("id".into()),
            value: None,
        });
        assert_eq!((first, second), (1, 2));
        assert_eq!(w.finish().values(), vec![Some(&Literal::Integer(1)), None]);
    }
}
