use serde::{Deserialize, Serialize};

use crate::error::{SqlError, SqlResult};

/// How an identifier was quoted where it was recorded.
///
/// Renderers normalise this to the target dialect's own quote characters;
/// any style other than `None` forces quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuoteStyle {
    #[default]
    None,
    /// "name"
    DoubleQuote,
    /// `name`
    Backtick,
    /// [name]
    Brackets,
}

/// A single SQL identifier (table, column, alias, window name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier")]
pub struct Identifier {
    value: String,
    quote_style: QuoteStyle,
}

#[derive(Deserialize)]
struct RawIdentifier {
    value: String,
    #[serde(default)]
    quote_style: QuoteStyle,
}

impl TryFrom<RawIdentifier> for Identifier {
    type Error = SqlError;

    fn try_from(raw: RawIdentifier) -> SqlResult<Self> {
        Self::with_style(raw.value, raw.quote_style)
    }
}

impl Identifier {
    /// Create an unquoted identifier. Blank text is rejected.
    pub fn new(value: impl Into<String>) -> SqlResult<Self> {
        Self::with_style(value, QuoteStyle::None)
    }

    /// Create an identifier that must always be quoted.
    pub fn quoted(value: impl Into<String>) -> SqlResult<Self> {
        Self::with_style(value, QuoteStyle::DoubleQuote)
    }

    pub fn with_style(value: impl Into<String>, quote_style: QuoteStyle) -> SqlResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SqlError::invalid("identifier must not be blank"));
        }
        Ok(Self { value, quote_style })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A dotted name such as `schema.table` or `pg_catalog.lower`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Identifier>", into = "Vec<Identifier>")]
pub struct QualifiedName {
    parts: Vec<Identifier>,
}

impl TryFrom<Vec<Identifier>> for QualifiedName {
    type Error = SqlError;

    fn try_from(parts: Vec<Identifier>) -> SqlResult<Self> {
        Self::new(parts)
    }
}

impl From<QualifiedName> for Vec<Identifier> {
    fn from(name: QualifiedName) -> Self {
        name.parts
    }
}

impl From<Identifier> for QualifiedName {
    fn from(ident: Identifier) -> Self {
        Self { parts: vec![ident] }
    }
}

impl QualifiedName {
    /// Create a qualified name. At least one part is required.
    pub fn new(parts: Vec<Identifier>) -> SqlResult<Self> {
        if parts.is_empty() {
            return Err(SqlError::invalid("qualified name requires at least one part"));
        }
        Ok(Self { parts })
    }

    /// Split a dotted string (`"public.users"`) into unquoted parts.
    pub fn parse_dotted(dotted: &str) -> SqlResult<Self> {
        let parts = dotted
            .split('.')
            .map(Identifier::new)
            .collect::<SqlResult<Vec<_>>>()?;
        Self::new(parts)
    }

    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    /// The unqualified trailing part.
    pub fn last(&self) -> &Identifier {
        // parts is never empty
        &self.parts[self.parts.len() - 1]
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_identifier_rejected() {
        assert!(Identifier::new("").is_err());
        assert!(Identifier::new("   ").is_err());
        assert!(Identifier::new("users").is_ok());
    }

    #[test]
    fn test_empty_qualified_name_rejected() {
        assert!(QualifiedName::new(vec![]).is_err());
    }

    #[test]
    fn test_parse_dotted() {
        let name = QualifiedName::parse_dotted("public.users").unwrap();
        assert_eq!(name.parts().len(), 2);
        assert_eq!(name.last().value(), "users");
        assert_eq!(name.to_string(), "public.users");
        assert!(QualifiedName::parse_dotted("public.").is_err());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Identifier::new("a").unwrap(), Identifier::new("a").unwrap());
        assert_ne!(Identifier::new("a").unwrap(), Identifier::quoted("a").unwrap());
    }
}
