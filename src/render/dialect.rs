//! Dialect policy: quoting, literal formatting, operator symbols, NULL
//! ordering, pagination, capabilities and the renderer table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ast::{
    ArithmeticOp, ComparisonOp, Direction, Identifier, Literal, Nulls, QuoteStyle,
};
use crate::error::{SqlError, SqlResult};
use crate::render::{DialectCapabilities, RenderersRepository, SqlFeature};

/// Words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "any", "array", "as", "asc", "between", "both", "by", "case", "cast",
    "check", "collate", "column", "constraint", "create", "cross", "current_date",
    "current_time", "current_timestamp", "current_user", "default", "delete", "desc",
    "distinct", "drop", "else", "end", "except", "exists", "false", "fetch", "for", "foreign",
    "from", "full", "group", "having", "in", "index", "inner", "insert", "intersect", "into",
    "is", "join", "key", "lateral", "leading", "left", "like", "limit", "natural", "not",
    "null", "offset", "on", "only", "or", "order", "outer", "over", "partition", "primary",
    "references", "right", "select", "some", "table", "then", "to", "trailing", "true",
    "union", "unique", "update", "user", "using", "values", "when", "where", "window", "with",
];

/// Quotes identifiers with the dialect's own delimiters.
///
/// The quote style recorded on an [`Identifier`] only decides *whether* to
/// quote; the delimiters always come from the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierQuoter {
    open: char,
    close: char,
}

impl Default for IdentifierQuoter {
    fn default() -> Self {
        Self::new('"', '"')
    }
}

impl IdentifierQuoter {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Always quote, doubling any embedded closing delimiter.
    pub fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push(self.open);
        for c in value.chars() {
            if c == self.close {
                out.push(c);
            }
            out.push(c);
        }
        out.push(self.close);
        out
    }

    pub fn quote_if_needed(&self, ident: &Identifier) -> String {
        if ident.quote_style() != QuoteStyle::None || needs_quoting(ident.value()) {
            self.quote(ident.value())
        } else {
            ident.value().to_string()
        }
    }

    /// Join parts with `.`, quoting each as needed.
    pub fn qualify(&self, parts: &[Identifier]) -> String {
        parts
            .iter()
            .map(|part| self.quote_if_needed(part))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn needs_quoting(value: &str) -> bool {
    let lower = value.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
        || value.chars().any(|c| !c.is_ascii_alphanumeric() && c != '_')
        || value.starts_with(|c: char| c.is_ascii_digit())
}

/// How booleans are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BooleanStyle {
    /// TRUE / FALSE
    #[default]
    Keywords,
    /// 1 / 0
    Numeric,
}

/// Row-window syntax. A dialect has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaginationStyle {
    /// LIMIT n OFFSET m
    LimitOffset,
    /// OFFSET m ROWS FETCH NEXT n ROWS ONLY
    #[default]
    OffsetFetch,
    /// SELECT TOP n ...; no offset
    Top,
}

/// NULL placement policy for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullSorting {
    explicit: bool,
    asc_default: Nulls,
    desc_default: Nulls,
}

impl Default for NullSorting {
    fn default() -> Self {
        Self::explicit(Nulls::Last, Nulls::First)
    }
}

impl NullSorting {
    /// `NULLS FIRST/LAST` is accepted.
    pub fn explicit(asc_default: Nulls, desc_default: Nulls) -> Self {
        Self {
            explicit: true,
            asc_default,
            desc_default,
        }
    }

    /// No `NULLS` keyword; only the defaults are available.
    pub fn implicit(asc_default: Nulls, desc_default: Nulls) -> Self {
        Self {
            explicit: false,
            asc_default,
            desc_default,
        }
    }

    pub fn supports_explicit(&self) -> bool {
        self.explicit
    }

    pub fn keyword(&self, nulls: Nulls) -> &'static str {
        match nulls {
            Nulls::First => "NULLS FIRST",
            Nulls::Last => "NULLS LAST",
        }
    }

    /// Placement the database uses when none is written.
    pub fn default_for(&self, direction: Direction) -> Nulls {
        match direction {
            Direction::Asc => self.asc_default,
            Direction::Desc => self.desc_default,
        }
    }
}

/// A target SQL variant.
///
/// Only the accessors are required; formatting and gating have defaults
/// built on them.
pub trait SqlDialect: Send + Sync {
    fn name(&self) -> &str;

    fn quoter(&self) -> &IdentifierQuoter;

    fn boolean_style(&self) -> BooleanStyle;

    fn null_sorting(&self) -> &NullSorting;

    fn pagination(&self) -> PaginationStyle;

    fn capabilities(&self) -> &DialectCapabilities;

    fn renderers(&self) -> &RenderersRepository;

    fn supports(&self, feature: SqlFeature) -> bool {
        self.capabilities().supports(feature)
    }

    /// Fail with an error naming `feature` unless the dialect supports it.
    fn require(&self, feature: SqlFeature, construct: &'static str) -> SqlResult<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            Err(SqlError::unsupported(feature, construct, self.name()))
        }
    }

    fn comparison_symbol(&self, op: ComparisonOp) -> &'static str {
        match op {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
        }
    }

    fn arithmetic_symbol(&self, op: ArithmeticOp) -> &'static str {
        match op {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Mod => "%",
            ArithmeticOp::Pow => "^",
        }
    }

    fn format_boolean(&self, value: bool) -> &'static str {
        match (self.boolean_style(), value) {
            (BooleanStyle::Keywords, true) => "TRUE",
            (BooleanStyle::Keywords, false) => "FALSE",
            (BooleanStyle::Numeric, true) => "1",
            (BooleanStyle::Numeric, false) => "0",
        }
    }

    /// Spell a literal as SQL text.
    fn format_literal(&self, literal: &Literal) -> SqlResult<String> {
        Ok(match literal {
            Literal::Null => "NULL".to_string(),
            Literal::Boolean(b) => self.format_boolean(*b).to_string(),
            Literal::Integer(n) => n.to_string(),
            Literal::Decimal(d) => d.to_string(),
            Literal::String(s) => quote_string(s),
            Literal::Date(d) => format!("DATE '{}'", d.format("%Y-%m-%d")),
            Literal::Time(t) => format!("TIME '{}'", t.format("%H:%M:%S%.f")),
            Literal::Timestamp(ts) => format!("TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Literal::Interval(text) => format!("INTERVAL {}", quote_string(text)),
            Literal::BitString(bits) => {
                self.require(SqlFeature::BitStringLiteral, "bit string literal")?;
                format!("B'{}'", bits.as_str())
            }
            Literal::HexString(hex) => {
                self.require(SqlFeature::HexStringLiteral, "hex string literal")?;
                format!("X'{}'", hex.as_str())
            }
            Literal::EscapeString(text) => {
                self.require(SqlFeature::EscapeStringLiteral, "escape string literal")?;
                format!("E{}", quote_string(text))
            }
            Literal::DollarString(s) => {
                self.require(SqlFeature::DollarStringLiteral, "dollar-quoted string")?;
                format!("{}{}{}", s.delimiter(), s.body(), s.delimiter())
            }
        })
    }
}

/// 'text' with embedded quotes doubled.
pub fn quote_string(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// The reference dialect, configurable in code.
#[derive(Debug, Clone)]
pub struct AnsiDialect {
    name: String,
    quoter: IdentifierQuoter,
    boolean_style: BooleanStyle,
    null_sorting: NullSorting,
    pagination: PaginationStyle,
    capabilities: DialectCapabilities,
    renderers: Arc<RenderersRepository>,
}

impl Default for AnsiDialect {
    fn default() -> Self {
        Self {
            name: "ANSI".to_string(),
            quoter: IdentifierQuoter::default(),
            boolean_style: BooleanStyle::Keywords,
            null_sorting: NullSorting::default(),
            pagination: PaginationStyle::OffsetFetch,
            capabilities: DialectCapabilities::ansi(),
            renderers: Arc::new(RenderersRepository::ansi()),
        }
    }
}

impl AnsiDialect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: DialectCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    pub fn with_quote(mut self, open: char, close: char) -> Self {
        self.quoter = IdentifierQuoter::new(open, close);
        self
    }

    pub fn with_null_sorting(mut self, null_sorting: NullSorting) -> Self {
        self.null_sorting = null_sorting;
        self
    }

    pub fn with_renderers(mut self, renderers: RenderersRepository) -> Self {
        self.renderers = Arc::new(renderers);
        self
    }
}

impl SqlDialect for AnsiDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn quoter(&self) -> &IdentifierQuoter {
        &self.quoter
    }

    fn boolean_style(&self) -> BooleanStyle {
        self.boolean_style
    }

    fn null_sorting(&self) -> &NullSorting {
        &self.null_sorting
    }

    fn pagination(&self) -> PaginationStyle {
        self.pagination
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn renderers(&self) -> &RenderersRepository {
        &self.renderers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DollarString;

    #[test]
    fn test_quote_if_needed() {
        let q = IdentifierQuoter::default();
        assert_eq!(q.quote_if_needed(&Identifier::new("users").unwrap()), "users");
        assert_eq!(q.quote_if_needed(&Identifier::new("order").unwrap()), "\"order\"");
        assert_eq!(q.quote_if_needed(&Identifier::new("my col").unwrap()), "\"my col\"");
        assert_eq!(q.quote_if_needed(&Identifier::new("1st").unwrap()), "\"1st\"");
        assert_eq!(q.quote("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_style_is_normalised() {
        let ident = Identifier::with_style("name", QuoteStyle::Backtick).unwrap();
        assert_eq!(IdentifierQuoter::default().quote_if_needed(&ident), "\"name\"");
        assert_eq!(IdentifierQuoter::new('[', ']').quote_if_needed(&ident), "[name]");
    }

    #[test]
    fn test_format_literals() {
        let d = AnsiDialect::default();
        assert_eq!(d.format_literal(&Literal::from("it's")).unwrap(), "'it''s'");
        assert_eq!(d.format_literal(&Literal::Boolean(true)).unwrap(), "TRUE");
        assert_eq!(d.format_literal(&Literal::Null).unwrap(), "NULL");
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(d.format_literal(&Literal::Date(date)).unwrap(), "DATE '2024-01-31'");
        assert_eq!(
            d.format_literal(&Literal::bit_string("101").unwrap()).unwrap(),
            "B'101'"
        );
    }

    #[test]
    fn test_numeric_booleans() {
        let d = AnsiDialect::default().with_boolean_style(BooleanStyle::Numeric);
        assert_eq!(d.format_literal(&Literal::Boolean(false)).unwrap(), "0");
    }

    #[test]
    fn test_dollar_string_is_gated() {
        let lit = Literal::DollarString(DollarString::new(Some("x"), "body").unwrap());
        let err = AnsiDialect::default().format_literal(&lit).unwrap_err();
        assert!(err.to_string().contains("DOLLAR_STRING_LITERAL"));

        let pg_like = AnsiDialect::default()
            .with_capabilities(DialectCapabilities::ansi().with(SqlFeature::DollarStringLiteral));
        assert_eq!(pg_like.format_literal(&lit).unwrap(), "$x$body$x$");
    }

    #[test]
    fn test_null_defaults() {
        let sorting = NullSorting::default();
        assert_eq!(sorting.default_for(Direction::Asc), Nulls::Last);
        assert_eq!(sorting.default_for(Direction::Desc), Nulls::First);
    }
}
