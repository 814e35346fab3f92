//! The immutable query tree.
//!
//! One sum type per supertype (`Expr`, `Predicate`, `Query`, `TableRef`,
//! `Join`, `ValueSet`, ...) with a struct payload per concrete node. Nodes
//! own their children, compare structurally and validate their invariants
//! when constructed.

pub mod builders;
pub mod expr;
pub mod ident;
pub mod joins;
pub mod literal;
pub mod locking;
pub mod matching;
pub mod predicate;
pub mod query;
pub mod table;
pub mod types;
pub mod values;
pub mod window;

pub use self::builders::{ExprExt, PredicateExt, SelectBuilder};
pub use self::expr::{
    Arithmetic, ArithmeticOp, ArrayLiteral, AtTimeZone, CaseExpr, Cast, Collate, ColumnRef,
    CustomBinary, CustomOperator, CustomUnary, Expr, FunctionArgs, FunctionCall, Negate, Param,
    ParamKind, Row, RowList, SubqueryExpr, WhenThen,
};
pub use self::ident::{Identifier, QualifiedName, QuoteStyle};
pub use self::joins::{CrossJoin, Join, JoinKind, NaturalJoin, OnJoin, UsingJoin};
pub use self::literal::{BitString, DollarString, HexString, Literal};
pub use self::locking::{LockMode, LockingClause};
pub use self::predicate::{
    Between, Comparison, ComparisonOp, Exists, InPredicate, IsDistinctFrom, IsNull, Like,
    Logical, LogicalOp, Not, Predicate, QuantifiedComparison, Quantifier, UnaryPredicate,
};
pub use self::query::{
    AliasedExpr, CompositeQuery, CteDef, Direction, DistinctSpec, GroupBy, LimitOffset,
    Materialization, Nulls, OrderBy, OrderItem, Query, SelectItem, SelectQuery, SetOperator,
    WithQuery,
};
pub use self::table::{
    FunctionTable, Inheritance, LateralTable, NamedTable, SubqueryTable, TableAlias, TableRef,
    ValuesTable,
};
pub use self::types::{TimeZoneSpec, TypeBase, TypeName};
pub use self::values::ValueSet;
pub use self::window::{
    BoundSpec, FrameExclusion, FrameSpec, FrameUnit, OverSpec, PartitionBy, WindowDef,
    WindowSpec,
};
