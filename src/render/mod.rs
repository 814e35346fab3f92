//! Dialect-aware SQL rendering.
//!
//! A render call walks the tree through the dialect's
//! [`RenderersRepository`], checking every construct that needs a
//! [`SqlFeature`] against the dialect's capabilities. In
//! [`ParameterizationMode::Bind`] the tree is first normalised by
//! [`bind::prepare`] so values travel beside the SQL text.

pub mod ansi;
pub mod bind;
mod context;
mod dialect;
mod features;
mod registry;
mod writer;

#[cfg(test)]
mod tests;

pub use context::{ParameterizationMode, PlaceholderPreference, RenderContext, RenderOptions};
pub use dialect::{
    AnsiDialect, BooleanStyle, IdentifierQuoter, NullSorting, PaginationStyle, RESERVED_WORDS,
    SqlDialect, quote_string,
};
pub use features::{DialectCapabilities, SqlFeature};
pub use registry::{RegisteredNode, Render, Renderer, RenderersRepository};
pub use writer::{BindParam, SqlText, SqlWriter};

use crate::error::SqlResult;
use crate::visit::{Accept, Rewrite};

/// Render `node` for `dialect`.
pub fn render<N>(node: &N, dialect: &dyn SqlDialect, options: RenderOptions) -> SqlResult<SqlText>
where
    N: Render + Rewrite + Accept,
{
    tracing::debug!(
        "Rendering for dialect '{}' (mode={:?}, placeholder={:?})",
        dialect.name(),
        options.mode,
        options.placeholder
    );
    let ctx = RenderContext::new(dialect, options);
    let mut w = SqlWriter::new(options.pretty);
    if ctx.is_bind() {
        let prepared = bind::prepare(node)?;
        w.reserve_names(bind::caller_names(&*prepared));
        ctx.render(prepared.as_ref(), &mut w)?;
    } else {
        ctx.render(node, &mut w)?;
    }
    Ok(w.finish())
}

/// Render any node to SQL.
pub trait ToSql {
    /// Inline SQL for the ANSI reference dialect.
    fn to_sql(&self) -> SqlResult<String>;

    fn to_sql_with(&self, dialect: &dyn SqlDialect, options: RenderOptions) -> SqlResult<SqlText>;
}

impl<N: Render + Rewrite + Accept> ToSql for N {
    fn to_sql(&self) -> SqlResult<String> {
        render(self, &AnsiDialect::default(), RenderOptions::inline()).map(|text| text.sql)
    }

    fn to_sql_with(&self, dialect: &dyn SqlDialect, options: RenderOptions) -> SqlResult<SqlText> {
        render(self, dialect, options)
    }
}
