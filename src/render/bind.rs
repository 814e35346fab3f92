//! Pre-render normalisation for Bind mode.
//!
//! Literals (other than NULL) become ordinal parameters carrying their
//! value, and anonymous parameters are numbered, both in traversal order.
//! A positional parameter left without a value afterwards is an error.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::ast::{Expr, Literal, Param, ParamKind, TypeName};
use crate::error::{SqlError, SqlResult};
use crate::visit::{Accept, Rewrite, Transformer, Visitor, rewrite_expr};

#[derive(Debug, Default)]
struct BindNormalizer {
    next: u32,
}

impl BindNormalizer {
    fn bound(&mut self, value: Option<Literal>) -> Param {
        self.next += 1;
        Param::at(self.next, value)
    }
}

impl Transformer for BindNormalizer {
    fn transform_expr<'a>(&mut self, node: &'a Expr) -> Cow<'a, Expr> {
        match node {
            Expr::Literal(literal) if !literal.is_null() => {
                let param = self.bound(Some(literal.clone()));
                tracing::trace!("bind: literal {:?} -> ${}", literal, self.next);
                Cow::Owned(Expr::Param(param))
            }
            Expr::Param(param) if *param.kind() == ParamKind::Anonymous => {
                Cow::Owned(Expr::Param(self.bound(param.value().cloned())))
            }
            _ => rewrite_expr(self, node),
        }
    }

    // VARCHAR(10) stays literal
    fn transform_type_name<'a>(&mut self, node: &'a TypeName) -> Cow<'a, TypeName> {
        Cow::Borrowed(node)
    }
}

struct UnresolvedCheck;

impl Visitor for UnresolvedCheck {
    type Output = SqlResult<()>;

    fn default_result(&mut self) -> SqlResult<()> {
        Ok(())
    }

    fn aggregate_result(&mut self, aggregate: SqlResult<()>, next: SqlResult<()>) -> SqlResult<()> {
        aggregate.and(next)
    }

    fn visit_param(&mut self, node: &Param) -> SqlResult<()> {
        match (node.kind(), node.value()) {
            (_, Some(_)) | (ParamKind::Named(_), None) => Ok(()),
            (ParamKind::Ordinal(n), None) => Err(SqlError::UnresolvedParameter(format!(
                "parameter ${} has no value to bind",
                n
            ))),
            (ParamKind::Anonymous, None) => Err(SqlError::UnresolvedParameter(
                "anonymous parameter has no value to bind".to_string(),
            )),
        }
    }
}

#[derive(Default)]
struct CallerNames(HashSet<String>);

impl Visitor for CallerNames {
    type Output = ();

    fn default_result(&mut self) {}

    fn visit_param(&mut self, node: &Param) {
        if let Some(name) = node.name() {
            self.0.insert(name.to_string());
        }
    }
}

/// Names the caller gave to parameters anywhere in `node`.
pub fn caller_names<N: Accept>(node: &N) -> HashSet<String> {
    let mut names = CallerNames::default();
    node.accept(&mut names);
    names.0
}

/// Normalise `node` for Bind mode; borrowed when it holds no literal or
/// anonymous parameter.
pub fn prepare<N: Rewrite + Accept>(node: &N) -> SqlResult<Cow<'_, N>> {
    let prepared = node.rewrite(&mut BindNormalizer::default());
    prepared.as_ref().accept(&mut UnresolvedCheck)?;
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{col, lit, param};
    use crate::ast::{ExprExt, Predicate, PredicateExt};

    #[test]
    fn test_literals_become_numbered_params() {
        let p = col("a").between(lit("A"), lit("Z"));
        let prepared = prepare(&p).unwrap();
        let Predicate::Between(between) = prepared.as_ref() else {
            panic!("expected BETWEEN");
        };
        assert_eq!(between.low.as_param().and_then(Param::index), Some(1));
        assert_eq!(between.high.as_param().and_then(Param::index), Some(2));
    }

    #[test]
    fn test_null_and_columns_untouched() {
        let p = col("a").eq(Expr::Literal(Literal::Null));
        let prepared = prepare(&p).unwrap();
        assert!(matches!(prepared, Cow::Borrowed(_)));
    }

    #[test]
    fn test_ordinal_without_value_fails() {
        let p = col("a").eq(Expr::Param(Param::ordinal(3).unwrap()));
        let err = prepare(&p).unwrap_err();
        assert!(matches!(err, SqlError::UnresolvedParameter(_)));
    }

    #[test]
    fn test_caller_names_collected() {
        let p = col("a")
            .eq(Param::named("id").unwrap())
            .and(col("b").eq(lit(1)));
        let names = caller_names(&p);
        assert_eq!(names.len(), 1);
        assert!(names.contains("id"));
    }

    #[test]
    fn test_valued_anonymous_param_is_numbered() {
        let p = col("a").eq(param(7));
        let prepared = prepare(&p).unwrap();
        let Predicate::Comparison(cmp) = prepared.as_ref() else {
            panic!("expected comparison");
        };
        let bound = cmp.rhs.as_param().unwrap();
        assert_eq!(bound.index(), Some(1));
        assert_eq!(bound.value(), Some(&Literal::Integer(7)));
    }
}
