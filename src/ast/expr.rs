use serde::{Deserialize, Serialize};

use crate::ast::{
    Identifier, Literal, OrderBy, OverSpec, Predicate, QualifiedName, Query, TypeName,
};
use crate::error::{SqlError, SqlResult};

/// A scalar expression.
///
/// Predicates are expressions too (`Expr::Predicate`), and any expression
/// can be used as a predicate through [`crate::ast::UnaryPredicate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    Param(Param),
    Function(FunctionCall),
    Case(CaseExpr),
    Arithmetic(Arithmetic),
    Negate(Negate),
    CustomBinary(CustomBinary),
    CustomUnary(CustomUnary),
    Cast(Cast),
    Array(ArrayLiteral),
    Row(Row),
    RowList(RowList),
    Subquery(SubqueryExpr),
    Collate(Collate),
    AtTimeZone(AtTimeZone),
    Predicate(Box<Predicate>),
}

/// Column reference, optionally qualified by a table name or alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub qualifier: Option<Identifier>,
    pub name: Identifier,
}

impl ColumnRef {
    pub fn new(name: Identifier) -> Self {
        Self {
            qualifier: None,
            name,
        }
    }

    pub fn qualified(qualifier: Identifier, name: Identifier) -> Self {
        Self {
            qualifier: Some(qualifier),
            name,
        }
    }
}

/// Placeholder syntax a parameter was written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// ?
    Anonymous,
    /// :name
    Named(String),
    /// $n
    Ordinal(u32),
}

/// Query parameter, optionally carrying the value to bind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawParam")]
pub struct Param {
    kind: ParamKind,
    value: Option<Literal>,
}

#[derive(Deserialize)]
struct RawParam {
    kind: ParamKind,
    #[serde(default)]
    value: Option<Literal>,
}

impl TryFrom<RawParam> for Param {
    type Error = SqlError;

    fn try_from(raw: RawParam) -> SqlResult<Self> {
        let param = match raw.kind {
            ParamKind::Anonymous => Self::anonymous(),
            ParamKind::Named(name) => Self::named(name)?,
            ParamKind::Ordinal(index) => Self::ordinal(index)?,
        };
        Ok(Self {
            value: raw.value,
            ..param
        })
    }
}

impl Param {
    pub fn anonymous() -> Self {
        Self {
            kind: ParamKind::Anonymous,
            value: None,
        }
    }

    /// Named parameter (`:name`). Names follow identifier rules.
    pub fn named(name: impl Into<String>) -> SqlResult<Self> {
        let name = name.into();
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(SqlError::invalid(format!("invalid parameter name: '{}'", name)));
        }
        Ok(Self {
            kind: ParamKind::Named(name),
            value: None,
        })
    }

    /// Ordinal parameter (`$n`), 1-based.
    pub fn ordinal(index: u32) -> SqlResult<Self> {
        if index == 0 {
            return Err(SqlError::invalid("parameter ordinals start at 1"));
        }
        Ok(Self {
            kind: ParamKind::Ordinal(index),
            value: None,
        })
    }

    /// Attach the value to bind for this parameter.
    pub fn with_value(mut self, value: impl Into<Literal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// `$index` carrying `value`; `index` is at least 1.
    pub(crate) fn at(index: u32, value: Option<Literal>) -> Self {
        Self {
            kind: ParamKind::Ordinal(index.max(1)),
            value,
        }
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn value(&self) -> Option<&Literal> {
        self.value.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ParamKind::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match self.kind {
            ParamKind::Ordinal(n) => Some(n),
            _ => None,
        }
    }
}

/// Arguments of a function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionArgs {
    /// count(*)
    Star,
    List(Vec<Expr>),
}

/// Function call with the optional aggregate/window decorations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub args: FunctionArgs,
    pub distinct: bool,
    /// WITHIN GROUP (ORDER BY ...)
    pub within_group: Option<OrderBy>,
    /// FILTER (WHERE ...)
    pub filter: Option<Box<Predicate>>,
    pub over: Option<OverSpec>,
}

impl FunctionCall {
    pub fn new(name: QualifiedName, args: Vec<Expr>) -> Self {
        Self {
            name,
            args: FunctionArgs::List(args),
            distinct: false,
            within_group: None,
            filter: None,
            over: None,
        }
    }

    pub fn star(name: QualifiedName) -> Self {
        Self {
            args: FunctionArgs::Star,
            ..Self::new(name, vec![])
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn within_group(mut self, order_by: OrderBy) -> Self {
        self.within_group = Some(order_by);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    pub fn over(mut self, over: OverSpec) -> Self {
        self.over = Some(over);
        self
    }
}

/// One `WHEN ... THEN ...` arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhenThen {
    pub when: Expr,
    pub then: Expr,
}

/// CASE expression, searched (`CASE WHEN p THEN ...`) or simple
/// (`CASE x WHEN 1 THEN ...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCaseExpr")]
pub struct CaseExpr {
    operand: Option<Box<Expr>>,
    whens: Vec<WhenThen>,
    else_result: Option<Box<Expr>>,
}

#[derive(Deserialize)]
struct RawCaseExpr {
    #[serde(default)]
    operand: Option<Box<Expr>>,
    whens: Vec<WhenThen>,
    #[serde(default)]
    else_result: Option<Box<Expr>>,
}

impl TryFrom<RawCaseExpr> for CaseExpr {
    type Error = SqlError;

    fn try_from(raw: RawCaseExpr) -> SqlResult<Self> {
        Self::build(
            raw.operand.map(|operand| *operand),
            raw.whens,
            raw.else_result.map(|result| *result),
        )
    }
}

impl CaseExpr {
    pub fn searched(whens: Vec<WhenThen>, else_result: Option<Expr>) -> SqlResult<Self> {
        Self::build(None, whens, else_result)
    }

    pub fn simple(operand: Expr, whens: Vec<WhenThen>, else_result: Option<Expr>) -> SqlResult<Self> {
        Self::build(Some(operand), whens, else_result)
    }

    fn build(operand: Option<Expr>, whens: Vec<WhenThen>, else_result: Option<Expr>) -> SqlResult<Self> {
        if whens.is_empty() {
            return Err(SqlError::invalid("CASE requires at least one WHEN arm"));
        }
        Ok(Self {
            operand: operand.map(Box::new),
            whens,
            else_result: else_result.map(Box::new),
        })
    }

    pub fn operand(&self) -> Option<&Expr> {
        self.operand.as_deref()
    }

    pub fn whens(&self) -> &[WhenThen] {
        &self.whens
    }

    pub fn else_result(&self) -> Option<&Expr> {
        self.else_result.as_deref()
    }

    /// Rebuild with rewritten parts; arm count is preserved by callers.
    pub(crate) fn from_parts(
        operand: Option<Expr>,
        whens: Vec<WhenThen>,
        else_result: Option<Expr>,
    ) -> Self {
        Self {
            operand: operand.map(Box::new),
            whens,
            else_result: else_result.map(Box::new),
        }
    }
}

/// Arithmetic operators, rendered through the single [`Arithmetic`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// %
    Mod,
    /// ^
    Pow,
}

impl ArithmeticOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            ArithmeticOp::Add | ArithmeticOp::Sub => 1,
            ArithmeticOp::Mul | ArithmeticOp::Div | ArithmeticOp::Mod => 2,
            ArithmeticOp::Pow => 3,
        }
    }

    /// `a op (b op c) == (a op b) op c`
    pub fn is_associative(self) -> bool {
        matches!(self, ArithmeticOp::Add | ArithmeticOp::Mul)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arithmetic {
    pub op: ArithmeticOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

impl Arithmetic {
    pub fn new(op: ArithmeticOp, lhs: Expr, rhs: Expr) -> Self {
        Self {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Unary minus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Negate {
    pub operand: Box<Expr>,
}

/// A user-defined operator, either a bare symbol (`@>`) or the
/// schema-qualified `OPERATOR(schema.symbol)` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCustomOperator")]
pub struct CustomOperator {
    schema: Option<QualifiedName>,
    symbol: String,
}

#[derive(Deserialize)]
struct RawCustomOperator {
    #[serde(default)]
    schema: Option<QualifiedName>,
    symbol: String,
}

impl TryFrom<RawCustomOperator> for CustomOperator {
    type Error = SqlError;

    fn try_from(raw: RawCustomOperator) -> SqlResult<Self> {
        Self::build(raw.schema, raw.symbol)
    }
}

const OPERATOR_CHARS: &str = "+-*/<>=~!@#%^&|`?";

impl CustomOperator {
    pub fn new(symbol: impl Into<String>) -> SqlResult<Self> {
        Self::build(None, symbol.into())
    }

    pub fn qualified(schema: QualifiedName, symbol: impl Into<String>) -> SqlResult<Self> {
        Self::build(Some(schema), symbol.into())
    }

    fn build(schema: Option<QualifiedName>, symbol: String) -> SqlResult<Self> {
        if symbol.trim().is_empty() {
            return Err(SqlError::invalid("operator symbol must not be blank"));
        }
        if !symbol.chars().all(|c| OPERATOR_CHARS.contains(c)) {
            return Err(SqlError::invalid(format!("invalid operator symbol: '{}'", symbol)));
        }
        Ok(Self { schema, symbol })
    }

    pub fn schema(&self) -> Option<&QualifiedName> {
        self.schema.as_ref()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomBinary {
    pub operator: CustomOperator,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomUnary {
    pub operator: CustomOperator,
    pub operand: Box<Expr>,
}

/// CAST(expr AS type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cast {
    pub expr: Box<Expr>,
    pub type_name: TypeName,
}

/// ARRAY[a, b, c]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub items: Vec<Expr>,
}

/// Row constructor `(a, b, c)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    pub items: Vec<Expr>,
}

impl Row {
    pub fn new(items: Vec<Expr>) -> Self {
        Self { items }
    }
}

/// `(a, b), (c, d)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRowList")]
pub struct RowList {
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawRowList {
    rows: Vec<Row>,
}

impl TryFrom<RawRowList> for RowList {
    type Error = SqlError;

    fn try_from(raw: RawRowList) -> SqlResult<Self> {
        Self::new(raw.rows)
    }
}

impl RowList {
    pub fn new(rows: Vec<Row>) -> SqlResult<Self> {
        if rows.is_empty() {
            return Err(SqlError::invalid("row list requires at least one row"));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Scalar subquery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubqueryExpr {
    pub query: Box<Query>,
}

/// expr COLLATE name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collate {
    pub expr: Box<Expr>,
    pub collation: QualifiedName,
}

/// expr AT TIME ZONE zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtTimeZone {
    pub expr: Box<Expr>,
    pub zone: Box<Expr>,
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<ColumnRef> for Expr {
    fn from(col: ColumnRef) -> Self {
        Expr::Column(col)
    }
}

impl From<Param> for Expr {
    fn from(param: Param) -> Self {
        Expr::Param(param)
    }
}

impl From<FunctionCall> for Expr {
    fn from(call: FunctionCall) -> Self {
        Expr::Function(call)
    }
}

impl From<CaseExpr> for Expr {
    fn from(case: CaseExpr) -> Self {
        Expr::Case(case)
    }
}

impl From<Arithmetic> for Expr {
    fn from(arith: Arithmetic) -> Self {
        Expr::Arithmetic(arith)
    }
}

impl From<Row> for Expr {
    fn from(row: Row) -> Self {
        Expr::Row(row)
    }
}

impl From<Predicate> for Expr {
    fn from(predicate: Predicate) -> Self {
        Expr::Predicate(Box::new(predicate))
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::Subquery(SubqueryExpr {
            query: Box::new(query),
        })
    }
}

macro_rules! literal_exprs {
    ($($ty:ty),* $(,)?) => {
        $(impl From<$ty> for Expr {
            fn from(value: $ty) -> Self {
                Expr::Literal(Literal::from(value))
            }
        })*
    };
}

literal_exprs!(
    bool,
    i32,
    i64,
    u32,
    &str,
    String,
    rust_decimal::Decimal,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_validation() {
        assert!(Param::named("user_id").is_ok());
        assert!(Param::named("1abc").is_err());
        assert!(Param::named("").is_err());
        assert!(Param::ordinal(0).is_err());
        assert_eq!(Param::ordinal(2).unwrap().index(), Some(2));
    }

    #[test]
    fn test_blank_operator_rejected() {
        assert!(CustomOperator::new("").is_err());
        assert!(CustomOperator::new("  ").is_err());
        assert!(CustomOperator::new("@>").is_ok());
        assert!(CustomOperator::new("; DROP").is_err());
    }

    #[test]
    fn test_case_requires_arm() {
        assert!(CaseExpr::searched(vec![], None).is_err());
    }

    #[test]
    fn test_precedence_levels() {
        assert!(ArithmeticOp::Mul.precedence() > ArithmeticOp::Add.precedence());
        assert!(ArithmeticOp::Pow.precedence() > ArithmeticOp::Div.precedence());
        assert!(!ArithmeticOp::Sub.is_associative());
    }
}
