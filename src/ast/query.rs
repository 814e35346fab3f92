use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Identifier, Join, LockingClause, Predicate, QualifiedName, TableRef, WindowDef};
use crate::error::{SqlError, SqlResult};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// NULLS FIRST / NULLS LAST placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nulls {
    First,
    Last,
}

/// One ORDER BY key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: Option<Direction>,
    pub nulls: Option<Nulls>,
}

impl OrderItem {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            direction: Some(Direction::Asc),
            ..Self::new(expr)
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            direction: Some(Direction::Desc),
            ..Self::new(expr)
        }
    }

    pub fn nulls(mut self, nulls: Nulls) -> Self {
        self.nulls = Some(nulls);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    pub items: Vec<OrderItem>,
}

impl OrderBy {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Self { items }
    }
}

/// expr [AS alias]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasedExpr {
    pub expr: Expr,
    pub alias: Option<Identifier>,
}

/// An entry of the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectItem {
    Expr(AliasedExpr),
    /// *
    Star,
    /// t.*
    QualifiedStar(QualifiedName),
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        SelectItem::Expr(AliasedExpr { expr, alias: None })
    }
}

impl From<AliasedExpr> for SelectItem {
    fn from(aliased: AliasedExpr) -> Self {
        SelectItem::Expr(aliased)
    }
}

/// DISTINCT or DISTINCT ON (exprs)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistinctSpec {
    Distinct,
    On(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupBy {
    pub items: Vec<Expr>,
}

/// Requested row window. How it is spelled depends on the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct LimitOffset {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl LimitOffset {
    pub fn limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// A single SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SelectQuery {
    pub distinct: Option<DistinctSpec>,
    pub items: Vec<SelectItem>,
    pub from: Option<TableRef>,
    pub joins: Vec<Join>,
    pub where_clause: Option<Predicate>,
    pub group_by: Option<GroupBy>,
    pub having: Option<Predicate>,
    pub windows: Vec<WindowDef>,
    pub order_by: Option<OrderBy>,
    pub limit_offset: Option<LimitOffset>,
    pub locking: Option<LockingClause>,
}

/// Set operators joining the terms of a composite query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::IntersectAll => "INTERSECT ALL",
            SetOperator::Except => "EXCEPT",
            SetOperator::ExceptAll => "EXCEPT ALL",
        }
    }
}

/// term op term op term ... [ORDER BY ...] [LIMIT ...]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCompositeQuery")]
pub struct CompositeQuery {
    terms: Vec<Query>,
    ops: Vec<SetOperator>,
    order_by: Option<OrderBy>,
    limit_offset: Option<LimitOffset>,
}

#[derive(Deserialize)]
struct RawCompositeQuery {
    terms: Vec<Query>,
    ops: Vec<SetOperator>,
    order_by: Option<OrderBy>,
    limit_offset: Option<LimitOffset>,
}

impl TryFrom<RawCompositeQuery> for CompositeQuery {
    type Error = SqlError;

    fn try_from(raw: RawCompositeQuery) -> SqlResult<Self> {
        let mut query = Self::new(raw.terms, raw.ops)?;
        query.order_by = raw.order_by;
        query.limit_offset = raw.limit_offset;
        Ok(query)
    }
}

impl CompositeQuery {
    /// `ops[i]` joins `terms[i]` and `terms[i + 1]`.
    pub fn new(terms: Vec<Query>, ops: Vec<SetOperator>) -> SqlResult<Self> {
        if terms.len() < 2 {
            return Err(SqlError::invalid("composite query requires at least two terms"));
        }
        if ops.len() != terms.len() - 1 {
            return Err(SqlError::invalid(format!(
                "composite query with {} terms needs {} operators, got {}",
                terms.len(),
                terms.len() - 1,
                ops.len()
            )));
        }
        Ok(Self {
            terms,
            ops,
            order_by: None,
            limit_offset: None,
        })
    }

    /// Join two queries with a single operator.
    pub fn pair(lhs: Query, op: SetOperator, rhs: Query) -> Self {
        Self {
            terms: vec![lhs, rhs],
            ops: vec![op],
            order_by: None,
            limit_offset: None,
        }
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_limit_offset(mut self, limit_offset: LimitOffset) -> Self {
        self.limit_offset = Some(limit_offset);
        self
    }

    pub fn terms(&self) -> &[Query] {
        &self.terms
    }

    pub fn ops(&self) -> &[SetOperator] {
        &self.ops
    }

    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn limit_offset(&self) -> Option<&LimitOffset> {
        self.limit_offset.as_ref()
    }

    /// Rebuild with rewritten parts; the term count is unchanged.
    pub(crate) fn from_parts(
        &self,
        terms: Vec<Query>,
        order_by: Option<OrderBy>,
        limit_offset: Option<LimitOffset>,
    ) -> Self {
        Self {
            terms,
            ops: self.ops.clone(),
            order_by,
            limit_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Materialization {
    #[default]
    Default,
    Materialized,
    NotMaterialized,
}

/// name [(columns)] AS [[NOT] MATERIALIZED] (body)
///
/// A definition without a body can be built but not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CteDef {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub body: Option<Box<Query>>,
    pub materialization: Materialization,
}

impl CteDef {
    pub fn new(name: Identifier, body: Query) -> Self {
        Self {
            name,
            columns: vec![],
            body: Some(Box::new(body)),
            materialization: Materialization::Default,
        }
    }

    pub fn with_columns(mut self, columns: Vec<Identifier>) -> Self {
        self.columns = columns;
        self
    }

    pub fn materialized(mut self, materialization: Materialization) -> Self {
        self.materialization = materialization;
        self
    }
}

/// WITH [RECURSIVE] cte, ... body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWithQuery")]
pub struct WithQuery {
    ctes: Vec<CteDef>,
    body: Box<Query>,
    recursive: bool,
}

#[derive(Deserialize)]
struct RawWithQuery {
    ctes: Vec<CteDef>,
    body: Box<Query>,
    #[serde(default)]
    recursive: bool,
}

impl TryFrom<RawWithQuery> for WithQuery {
    type Error = SqlError;

    fn try_from(raw: RawWithQuery) -> SqlResult<Self> {
        Self::new(raw.ctes, *raw.body, raw.recursive)
    }
}

impl WithQuery {
    pub fn new(ctes: Vec<CteDef>, body: Query, recursive: bool) -> SqlResult<Self> {
        if ctes.is_empty() {
            return Err(SqlError::invalid("WITH requires at least one CTE"));
        }
        Ok(Self {
            ctes,
            body: Box::new(body),
            recursive,
        })
    }

    pub fn ctes(&self) -> &[CteDef] {
        &self.ctes
    }

    pub fn body(&self) -> &Query {
        &self.body
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub(crate) fn from_parts(&self, ctes: Vec<CteDef>, body: Query) -> Self {
        Self {
            ctes,
            body: Box::new(body),
            recursive: self.recursive,
        }
    }
}

/// A complete query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Query {
    Select(SelectQuery),
    Composite(CompositeQuery),
    With(WithQuery),
}

impl Query {
    pub fn union(self, other: Query) -> Query {
        self.compose(SetOperator::Union, other)
    }

    pub fn union_all(self, other: Query) -> Query {
        self.compose(SetOperator::UnionAll, other)
    }

    pub fn intersect(self, other: Query) -> Query {
        self.compose(SetOperator::Intersect, other)
    }

    pub fn except(self, other: Query) -> Query {
        self.compose(SetOperator::Except, other)
    }

    /// Extend a composite without ORDER BY/LIMIT instead of nesting it.
    pub fn compose(self, op: SetOperator, other: Query) -> Query {
        match self {
            Query::Composite(mut c) if c.order_by.is_none() && c.limit_offset.is_none() => {
                c.terms.push(other);
                c.ops.push(op);
                Query::Composite(c)
            }
            lhs => Query::Composite(CompositeQuery::pair(lhs, op, other)),
        }
    }
}

impl From<SelectQuery> for Query {
    fn from(select: SelectQuery) -> Self {
        Query::Select(select)
    }
}

impl From<CompositeQuery> for Query {
    fn from(composite: CompositeQuery) -> Self {
        Query::Composite(composite)
    }
}

impl From<WithQuery> for Query {
    fn from(with: WithQuery) -> Self {
        Query::With(with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select() -> Query {
        Query::Select(SelectQuery {
            items: vec![SelectItem::Star],
            ..Default::default()
        })
    }

    #[test]
    fn test_composite_shape_validated() {
        assert!(CompositeQuery::new(vec![select()], vec![]).is_err());
        assert!(CompositeQuery::new(vec![select(), select()], vec![]).is_err());
        assert!(CompositeQuery::new(vec![select(), select()], vec![SetOperator::Union]).is_ok());
    }

    #[test]
    fn test_compose_flattens() {
        let q = select().union(select()).union_all(select());
        match q {
            Query::Composite(c) => {
                assert_eq!(c.terms().len(), 3);
                assert_eq!(c.ops(), &[SetOperator::Union, SetOperator::UnionAll]);
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_with_requires_cte() {
        assert!(WithQuery::new(vec![], select(), false).is_err());
    }
}
