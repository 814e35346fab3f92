//! Render options and the per-call render context.

use serde::{Deserialize, Serialize};

use crate::ast::{Identifier, QualifiedName};
use crate::error::SqlResult;
use crate::render::{Render, RenderersRepository, SqlDialect, SqlFeature, SqlWriter};

/// How literal values reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterizationMode {
    /// Values are written into the SQL text.
    #[default]
    Inline,
    /// Values become placeholders plus a parameter list.
    Bind,
}

/// Placeholder syntax used in Bind mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderPreference {
    /// ?
    #[default]
    Positional,
    /// $1, $2, ...
    Ordinal,
    /// :p1, :p2, ... or the caller's own names
    Named,
}

/// Options for a render call.
///
/// Loadable from TOML:
/// ```toml
/// mode = "bind"
/// placeholder = "ordinal"
/// pretty = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub mode: ParameterizationMode,
    pub placeholder: PlaceholderPreference,
    pub pretty: bool,
}

impl RenderOptions {
    pub fn inline() -> Self {
        Self::default()
    }

    pub fn bind(placeholder: PlaceholderPreference) -> Self {
        Self {
            mode: ParameterizationMode::Bind,
            placeholder,
            pretty: false,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn from_toml_str(source: &str) -> SqlResult<Self> {
        Ok(toml::from_str(source)?)
    }
}

/// Everything a renderer needs besides the node and the writer.
#[derive(Clone, Copy)]
pub struct RenderContext<'d> {
    dialect: &'d dyn SqlDialect,
    options: RenderOptions,
}

impl<'d> RenderContext<'d> {
    pub fn new(dialect: &'d dyn SqlDialect, options: RenderOptions) -> Self {
        Self { dialect, options }
    }

    pub fn dialect(&self) -> &'d dyn SqlDialect {
        self.dialect
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn renderers(&self) -> &'d RenderersRepository {
        self.dialect.renderers()
    }

    pub fn is_bind(&self) -> bool {
        self.options.mode == ParameterizationMode::Bind
    }

    /// Render a child node through the dialect's renderer table.
    pub fn render<N: Render + ?Sized>(&self, node: &N, w: &mut SqlWriter) -> SqlResult<()> {
        node.render(self, w)
    }

    pub fn require(&self, feature: SqlFeature, construct: &'static str) -> SqlResult<()> {
        self.dialect.require(feature, construct)
    }

    pub fn write_ident(&self, ident: &Identifier, w: &mut SqlWriter) {
        w.write(&self.dialect.quoter().quote_if_needed(ident));
    }

    pub fn write_qualified(&self, name: &QualifiedName, w: &mut SqlWriter) {
        w.write(&self.dialect.quoter().qualify(name.parts()));
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("dialect", &self.dialect.name())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_toml() {
        let options = RenderOptions::from_toml_str(
            r#"
            mode = "bind"
            placeholder = "named"
            "#,
        )
        .unwrap();
        assert_eq!(options.mode, ParameterizationMode::Bind);
        assert_eq!(options.placeholder, PlaceholderPreference::Named);
        assert!(!options.pretty);
    }

    #[test]
    fn test_options_defaults() {
        let options = RenderOptions::from_toml_str("").unwrap();
        assert_eq!(options, RenderOptions::inline());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = RenderOptions::from_toml_str("mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, crate::error::SqlError::Config(_)));
    }
}
