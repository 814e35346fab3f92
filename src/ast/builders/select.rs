//! Accumulating builder for SELECT statements.

use crate::ast::{
    DistinctSpec, Expr, GroupBy, Join, LimitOffset, LockingClause, OrderBy, OrderItem, Predicate,
    SelectItem, SelectQuery, TableRef, WindowDef,
};

/// Mutable working state for a [`SelectQuery`].
///
/// `build` takes `&self`: each call yields an independent snapshot and the
/// builder stays usable for further changes.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    query: SelectQuery,
}

impl SelectQuery {
    pub fn builder() -> SelectBuilder {
        SelectBuilder::default()
    }
}

impl SelectBuilder {
    pub fn distinct(&mut self) -> &mut Self {
        self.query.distinct = Some(DistinctSpec::Distinct);
        self
    }

    pub fn distinct_on(&mut self, exprs: Vec<Expr>) -> &mut Self {
        self.query.distinct = Some(DistinctSpec::On(exprs));
        self
    }

    pub fn item(&mut self, item: impl Into<SelectItem>) -> &mut Self {
        self.query.items.push(item.into());
        self
    }

    pub fn items<I: Into<SelectItem>>(&mut self, items: impl IntoIterator<Item = I>) -> &mut Self {
        self.query.items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn star(&mut self) -> &mut Self {
        self.query.items.push(SelectItem::Star);
        self
    }

    pub fn from(&mut self, table: impl Into<TableRef>) -> &mut Self {
        self.query.from = Some(table.into());
        self
    }

    pub fn join(&mut self, join: Join) -> &mut Self {
        self.query.joins.push(join);
        self
    }

    /// Add a WHERE condition; repeated calls are combined with AND.
    pub fn filter(&mut self, predicate: Predicate) -> &mut Self {
        self.query.where_clause = Some(and_with(self.query.where_clause.take(), predicate));
        self
    }

    pub fn group_by(&mut self, exprs: Vec<Expr>) -> &mut Self {
        self.query.group_by = Some(GroupBy { items: exprs });
        self
    }

    /// Add a HAVING condition; repeated calls are combined with AND.
    pub fn having(&mut self, predicate: Predicate) -> &mut Self {
        self.query.having = Some(and_with(self.query.having.take(), predicate));
        self
    }

    pub fn window(&mut self, window: WindowDef) -> &mut Self {
        self.query.windows.push(window);
        self
    }

    /// Append a sort key.
    pub fn order_by(&mut self, item: OrderItem) -> &mut Self {
        self.query
            .order_by
            .get_or_insert_with(|| OrderBy::new(vec![]))
            .items
            .push(item);
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.query
            .limit_offset
            .get_or_insert_with(LimitOffset::default)
            .limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.query
            .limit_offset
            .get_or_insert_with(LimitOffset::default)
            .offset = Some(offset);
        self
    }

    pub fn lock(&mut self, locking: LockingClause) -> &mut Self {
        self.query.locking = Some(locking);
        self
    }

    /// Snapshot the current state. An empty select list becomes `*`.
    pub fn build(&self) -> SelectQuery {
        let mut query = self.query.clone();
        if query.items.is_empty() {
            query.items.push(SelectItem::Star);
        }
        query
    }
}

fn and_with(existing: Option<Predicate>, next: Predicate) -> Predicate {
    match existing {
        Some(prev) => Predicate::logical(crate::ast::LogicalOp::And, prev, next),
        None => next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{col, lit, table, ExprExt};

    #[test]
    fn test_build_is_independent_snapshot() {
        let mut builder = SelectQuery::builder();
        builder.item(col("id")).from(table("users"));
        let first = builder.build();
        builder.limit(10);
        let second = builder.build();

        assert!(first.limit_offset.is_none());
        assert_eq!(second.limit_offset, Some(LimitOffset::limit(10)));
        assert_eq!(first.items, second.items);
    }

    #[test]
    fn test_filters_are_anded() {
        let q = SelectQuery::builder()
            .filter(col("a").eq(lit(1)))
            .filter(col("b").eq(lit(2)))
            .build();
        assert!(q.where_clause.as_ref().is_some_and(|p| p.is_logical()));
        assert_eq!(q.items, vec![SelectItem::Star]);
    }
}
