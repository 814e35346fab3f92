//! Renderer test modules.
//!
//! - `core`: inline rendering of expressions, conditions and queries
//! - `dialects`: feature gating, pagination, quoting, renderer overrides
//! - `params`: Bind mode and placeholder syntaxes

mod core;
mod dialects;
mod params;

use crate::ast::Identifier;

fn ident(name: &str) -> Identifier {
    Identifier::new(name).unwrap()
}
