//! Short-hand constructors for building trees in code.
//!
//! - `col`, `qcol`, `lit`, `param`, `named_param`, `func`, `table` - leaf and
//!   call factories
//! - `ext` - fluent `ExprExt` / `PredicateExt` traits
//! - `select` - `SelectBuilder`
//!
//! The plain factories panic on names that cannot form a valid identifier;
//! the `try_` variants return the error instead.
//!
//! # Example
//! ```
//! use sqlshape::prelude::*;
//!
//! let query = SelectQuery::builder()
//!     .item(col("id"))
//!     .from(table("users"))
//!     .filter(col("age").gte(lit(18)))
//!     .build();
//! assert_eq!(query.to_sql().unwrap(), "SELECT id FROM users WHERE age >= 18");
//! ```

pub mod ext;
pub mod select;

pub use ext::{ExprExt, PredicateExt};
pub use select::SelectBuilder;

use crate::ast::{
    ColumnRef, Expr, FunctionCall, Identifier, Literal, NamedTable, Param, QualifiedName,
};
use crate::error::SqlResult;

fn ident(name: &str) -> Identifier {
    match Identifier::new(name) {
        Ok(ident) => ident,
        Err(e) => panic!("{}", e),
    }
}

fn dotted(name: &str) -> QualifiedName {
    match QualifiedName::parse_dotted(name) {
        Ok(name) => name,
        Err(e) => panic!("{}", e),
    }
}

/// Unqualified column reference.
///
/// # Panics
/// If `name` is blank.
pub fn col(name: &str) -> Expr {
    Expr::Column(ColumnRef::new(ident(name)))
}

/// Column reference qualified by a table name or alias: `qualifier.name`.
///
/// # Panics
/// If either part is blank.
pub fn qcol(qualifier: &str, name: &str) -> Expr {
    Expr::Column(ColumnRef::qualified(ident(qualifier), ident(name)))
}

pub fn try_col(name: &str) -> SqlResult<Expr> {
    Ok(Expr::Column(ColumnRef::new(Identifier::new(name)?)))
}

pub fn lit(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

/// SQL NULL
pub fn null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// Anonymous parameter carrying its bind value.
pub fn param(value: impl Into<Literal>) -> Expr {
    Expr::Param(Param::anonymous().with_value(value))
}

/// Named parameter without a value; the caller binds it by name.
///
/// # Panics
/// If `name` is not a valid parameter name.
pub fn named_param(name: &str) -> Expr {
    match Param::named(name) {
        Ok(param) => Expr::Param(param),
        Err(e) => panic!("{}", e),
    }
}

/// Function call; a dotted name is schema-qualified.
///
/// # Panics
/// If any part of `name` is blank.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function(FunctionCall::new(dotted(name), args))
}

/// count(*)
pub fn count_star() -> Expr {
    Expr::Function(FunctionCall::star(dotted("count")))
}

/// Named table; `"schema.table"` sets the schema.
///
/// # Panics
/// If `name` is blank or has more than two dotted parts.
pub fn table(name: &str) -> NamedTable {
    match try_table(name) {
        Ok(table) => table,
        Err(e) => panic!("{}", e),
    }
}

pub fn try_table(name: &str) -> SqlResult<NamedTable> {
    let parsed = QualifiedName::parse_dotted(name)?;
    match parsed.parts() {
        [name] => Ok(NamedTable::new(name.clone())),
        [schema, name] => Ok(NamedTable::new(name.clone()).in_schema(schema.clone())),
        _ => Err(crate::error::SqlError::invalid(format!(
            "table name has too many parts: '{}'",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_with_schema() {
        let t = table("public.users");
        assert_eq!(t.schema.as_ref().map(|s| s.value()), Some("public"));
        assert_eq!(t.name.value(), "users");
        assert!(try_table("a.b.c").is_err());
    }

    #[test]
    fn test_try_col_rejects_blank() {
        assert!(try_col(" ").is_err());
    }

    #[test]
    #[should_panic]
    fn test_col_panics_on_blank() {
        col("");
    }
}
