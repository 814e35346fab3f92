//! # sqlshape
//!
//! > **Stop concatenating strings. Shape your queries.**
//!
//! sqlshape models SQL queries as an immutable typed tree, lets you inspect
//! and rewrite that tree without per-node boilerplate, and renders it for a
//! target dialect with either inline literals or bound parameters.
//!
//! ## Quick Example
//!
//! ```
//! use sqlshape::prelude::*;
//!
//! let query = SelectQuery::builder()
//!     .items([col("id"), col("email")])
//!     .from(table("users"))
//!     .filter(col("active").eq(lit(true)))
//!     .order_by(OrderItem::desc(col("created_at")))
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(
//!     query.to_sql().unwrap(),
//!     "SELECT id, email FROM users WHERE active = TRUE ORDER BY created_at DESC \
//!      OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
//! );
//!
//! let bound = query
//!     .to_sql_with(&AnsiDialect::default(), RenderOptions::bind(PlaceholderPreference::Ordinal))
//!     .unwrap();
//! assert_eq!(bound.sql.matches("$1").count(), 1);
//! assert_eq!(bound.values(), vec![Some(&Literal::Boolean(true))]);
//! ```
//!
//! ## Layout
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`ast`]    | Node types and builders                             |
//! | [`visit`]  | `Visitor` (read-only) and `Transformer` (rewriting) |
//! | [`render`] | Dialects, feature gating, parameterization          |
//! | [`error`]  | `SqlError`                                          |

pub mod ast;
pub mod error;
pub mod render;
pub mod visit;

pub mod prelude {
    pub use crate::ast::builders::{
        col, count_star, func, lit, named_param, null, param, qcol, table, try_col, try_table,
    };
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::render::{
        AnsiDialect, DialectCapabilities, PaginationStyle, ParameterizationMode,
        PlaceholderPreference, RenderOptions, SqlDialect, SqlFeature, SqlText, ToSql,
    };
    pub use crate::visit::{Accept, Rewrite, Transformer, Visitor};
}
