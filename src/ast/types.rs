use serde::{Deserialize, Serialize};

use crate::ast::{Expr, QualifiedName};
use crate::error::{SqlError, SqlResult};

/// Time zone decoration of TIME/TIMESTAMP types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeZoneSpec {
    #[default]
    None,
    WithTimeZone,
    WithoutTimeZone,
}

/// The base of a type name: a built-in keyword (`DOUBLE PRECISION`) or a
/// (possibly schema-qualified) user type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeBase {
    Keyword(String),
    Named(QualifiedName),
}

/// A type reference as used by CAST.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTypeName")]
pub struct TypeName {
    base: TypeBase,
    modifiers: Vec<Expr>,
    array_dims: u32,
    time_zone: TimeZoneSpec,
}

#[derive(Deserialize)]
struct RawTypeName {
    base: TypeBase,
    #[serde(default)]
    modifiers: Vec<Expr>,
    #[serde(default)]
    array_dims: u32,
    #[serde(default)]
    time_zone: TimeZoneSpec,
}

impl TryFrom<RawTypeName> for TypeName {
    type Error = SqlError;

    fn try_from(raw: RawTypeName) -> SqlResult<Self> {
        let name = match raw.base {
            TypeBase::Keyword(keyword) => Self::keyword(keyword)?,
            TypeBase::Named(name) => Self::named(name),
        };
        Ok(name
            .with_modifiers(raw.modifiers)
            .with_array_dims(raw.array_dims)
            .with_time_zone(raw.time_zone))
    }
}

impl TypeName {
    /// Built-in type keyword. Only letters, digits, spaces and `_` are allowed.
    pub fn keyword(keyword: impl Into<String>) -> SqlResult<Self> {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            return Err(SqlError::invalid("type keyword must not be blank"));
        }
        if !keyword
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_')
        {
            return Err(SqlError::invalid(format!("invalid type keyword: '{}'", keyword)));
        }
        Ok(Self::from_base(TypeBase::Keyword(keyword)))
    }

    pub fn named(name: QualifiedName) -> Self {
        Self::from_base(TypeBase::Named(name))
    }

    fn from_base(base: TypeBase) -> Self {
        Self {
            base,
            modifiers: vec![],
            array_dims: 0,
            time_zone: TimeZoneSpec::None,
        }
    }

    /// Type modifiers, e.g. `NUMERIC(10, 2)`.
    pub fn with_modifiers(mut self, modifiers: Vec<Expr>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_array_dims(mut self, dims: u32) -> Self {
        self.array_dims = dims;
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZoneSpec) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn base(&self) -> &TypeBase {
        &self.base
    }

    pub fn modifiers(&self) -> &[Expr] {
        &self.modifiers
    }

    pub fn array_dims(&self) -> u32 {
        self.array_dims
    }

    pub fn time_zone(&self) -> TimeZoneSpec {
        self.time_zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_validation() {
        assert!(TypeName::keyword("DOUBLE PRECISION").is_ok());
        assert!(TypeName::keyword("").is_err());
        assert!(TypeName::keyword("INT); DROP").is_err());
    }
}
