//! Read-only traversal.
//!
//! Every `visit_*` method defaults to its `walk_*` function, which visits
//! the node's children left to right in written order and folds their
//! results with [`Visitor::aggregate_result`]. Override a method to observe
//! a node and call the matching `walk_*` function to keep descending.

use crate::ast::*;

pub trait Visitor {
    type Output;

    /// Result for a node with no children.
    fn default_result(&mut self) -> Self::Output;

    /// Combine the result so far with the next child's result.
    fn aggregate_result(&mut self, _aggregate: Self::Output, next: Self::Output) -> Self::Output {
        next
    }

    // expressions

    fn visit_expr(&mut self, node: &Expr) -> Self::Output {
        walk_expr(self, node)
    }
    fn visit_literal(&mut self, _node: &Literal) -> Self::Output {
        self.default_result()
    }
    fn visit_column(&mut self, _node: &ColumnRef) -> Self::Output {
        self.default_result()
    }
    fn visit_param(&mut self, _node: &Param) -> Self::Output {
        self.default_result()
    }
    fn visit_function(&mut self, node: &FunctionCall) -> Self::Output {
        walk_function(self, node)
    }
    fn visit_case(&mut self, node: &CaseExpr) -> Self::Output {
        walk_case(self, node)
    }
    fn visit_arithmetic(&mut self, node: &Arithmetic) -> Self::Output {
        walk_arithmetic(self, node)
    }
    fn visit_negate(&mut self, node: &Negate) -> Self::Output {
        walk_negate(self, node)
    }
    fn visit_custom_binary(&mut self, node: &CustomBinary) -> Self::Output {
        walk_custom_binary(self, node)
    }
    fn visit_custom_unary(&mut self, node: &CustomUnary) -> Self::Output {
        walk_custom_unary(self, node)
    }
    fn visit_cast(&mut self, node: &Cast) -> Self::Output {
        walk_cast(self, node)
    }
    fn visit_type_name(&mut self, node: &TypeName) -> Self::Output {
        walk_type_name(self, node)
    }
    fn visit_array(&mut self, node: &ArrayLiteral) -> Self::Output {
        walk_array(self, node)
    }
    fn visit_row(&mut self, node: &Row) -> Self::Output {
        walk_row(self, node)
    }
    fn visit_row_list(&mut self, node: &RowList) -> Self::Output {
        walk_row_list(self, node)
    }
    fn visit_subquery(&mut self, node: &SubqueryExpr) -> Self::Output {
        walk_subquery(self, node)
    }
    fn visit_collate(&mut self, node: &Collate) -> Self::Output {
        walk_collate(self, node)
    }
    fn visit_at_time_zone(&mut self, node: &AtTimeZone) -> Self::Output {
        walk_at_time_zone(self, node)
    }

    // predicates

    fn visit_predicate(&mut self, node: &Predicate) -> Self::Output {
        walk_predicate(self, node)
    }
    fn visit_comparison(&mut self, node: &Comparison) -> Self::Output {
        walk_comparison(self, node)
    }
    fn visit_between(&mut self, node: &Between) -> Self::Output {
        walk_between(self, node)
    }
    fn visit_like(&mut self, node: &Like) -> Self::Output {
        walk_like(self, node)
    }
    fn visit_is_null(&mut self, node: &IsNull) -> Self::Output {
        walk_is_null(self, node)
    }
    fn visit_is_distinct_from(&mut self, node: &IsDistinctFrom) -> Self::Output {
        walk_is_distinct_from(self, node)
    }
    fn visit_in(&mut self, node: &InPredicate) -> Self::Output {
        walk_in(self, node)
    }
    fn visit_exists(&mut self, node: &Exists) -> Self::Output {
        walk_exists(self, node)
    }
    fn visit_quantified(&mut self, node: &QuantifiedComparison) -> Self::Output {
        walk_quantified(self, node)
    }
    fn visit_unary(&mut self, node: &UnaryPredicate) -> Self::Output {
        walk_unary(self, node)
    }
    fn visit_not(&mut self, node: &Not) -> Self::Output {
        walk_not(self, node)
    }
    fn visit_logical(&mut self, node: &Logical) -> Self::Output {
        walk_logical(self, node)
    }
    fn visit_value_set(&mut self, node: &ValueSet) -> Self::Output {
        walk_value_set(self, node)
    }

    // tables and joins

    fn visit_table_ref(&mut self, node: &TableRef) -> Self::Output {
        walk_table_ref(self, node)
    }
    fn visit_named_table(&mut self, _node: &NamedTable) -> Self::Output {
        self.default_result()
    }
    fn visit_subquery_table(&mut self, node: &SubqueryTable) -> Self::Output {
        walk_subquery_table(self, node)
    }
    fn visit_values_table(&mut self, node: &ValuesTable) -> Self::Output {
        walk_values_table(self, node)
    }
    fn visit_function_table(&mut self, node: &FunctionTable) -> Self::Output {
        walk_function_table(self, node)
    }
    fn visit_lateral_table(&mut self, node: &LateralTable) -> Self::Output {
        walk_lateral_table(self, node)
    }
    fn visit_join(&mut self, node: &Join) -> Self::Output {
        walk_join(self, node)
    }
    fn visit_cross_join(&mut self, node: &CrossJoin) -> Self::Output {
        walk_cross_join(self, node)
    }
    fn visit_natural_join(&mut self, node: &NaturalJoin) -> Self::Output {
        walk_natural_join(self, node)
    }
    fn visit_using_join(&mut self, node: &UsingJoin) -> Self::Output {
        walk_using_join(self, node)
    }
    fn visit_on_join(&mut self, node: &OnJoin) -> Self::Output {
        walk_on_join(self, node)
    }

    // queries

    fn visit_query(&mut self, node: &Query) -> Self::Output {
        walk_query(self, node)
    }
    fn visit_select(&mut self, node: &SelectQuery) -> Self::Output {
        walk_select(self, node)
    }
    fn visit_composite(&mut self, node: &CompositeQuery) -> Self::Output {
        walk_composite(self, node)
    }
    fn visit_with(&mut self, node: &WithQuery) -> Self::Output {
        walk_with(self, node)
    }
    fn visit_cte(&mut self, node: &CteDef) -> Self::Output {
        walk_cte(self, node)
    }
    fn visit_select_item(&mut self, node: &SelectItem) -> Self::Output {
        walk_select_item(self, node)
    }
    fn visit_distinct(&mut self, node: &DistinctSpec) -> Self::Output {
        walk_distinct(self, node)
    }
    fn visit_group_by(&mut self, node: &GroupBy) -> Self::Output {
        walk_group_by(self, node)
    }
    fn visit_order_by(&mut self, node: &OrderBy) -> Self::Output {
        walk_order_by(self, node)
    }
    fn visit_order_item(&mut self, node: &OrderItem) -> Self::Output {
        walk_order_item(self, node)
    }
    fn visit_limit_offset(&mut self, _node: &LimitOffset) -> Self::Output {
        self.default_result()
    }
    fn visit_locking(&mut self, _node: &LockingClause) -> Self::Output {
        self.default_result()
    }

    // windows

    fn visit_window_def(&mut self, node: &WindowDef) -> Self::Output {
        walk_window_def(self, node)
    }
    fn visit_window_spec(&mut self, node: &WindowSpec) -> Self::Output {
        walk_window_spec(self, node)
    }
    fn visit_over(&mut self, node: &OverSpec) -> Self::Output {
        walk_over(self, node)
    }
    fn visit_partition_by(&mut self, node: &PartitionBy) -> Self::Output {
        walk_partition_by(self, node)
    }
    fn visit_frame(&mut self, node: &FrameSpec) -> Self::Output {
        walk_frame(self, node)
    }
    fn visit_bound(&mut self, node: &BoundSpec) -> Self::Output {
        walk_bound(self, node)
    }
}

/// Folds child results into one value.
struct Walk<'v, V: Visitor + ?Sized> {
    visitor: &'v mut V,
    result: V::Output,
}

impl<'v, V: Visitor + ?Sized> Walk<'v, V> {
    fn new(visitor: &'v mut V) -> Self {
        let result = visitor.default_result();
        Self { visitor, result }
    }

    fn push(&mut self, next: V::Output) -> &mut Self {
        let seed = self.visitor.default_result();
        let aggregate = std::mem::replace(&mut self.result, seed);
        self.result = self.visitor.aggregate_result(aggregate, next);
        self
    }

    fn expr(&mut self, node: &Expr) -> &mut Self {
        let next = self.visitor.visit_expr(node);
        self.push(next)
    }

    fn exprs(&mut self, nodes: &[Expr]) -> &mut Self {
        for node in nodes {
            self.expr(node);
        }
        self
    }

    fn opt_expr(&mut self, node: Option<&Expr>) -> &mut Self {
        if let Some(node) = node {
            self.expr(node);
        }
        self
    }

    fn predicate(&mut self, node: &Predicate) -> &mut Self {
        let next = self.visitor.visit_predicate(node);
        self.push(next)
    }

    fn opt_predicate(&mut self, node: Option<&Predicate>) -> &mut Self {
        if let Some(node) = node {
            self.predicate(node);
        }
        self
    }

    fn query(&mut self, node: &Query) -> &mut Self {
        let next = self.visitor.visit_query(node);
        self.push(next)
    }

    fn table(&mut self, node: &TableRef) -> &mut Self {
        let next = self.visitor.visit_table_ref(node);
        self.push(next)
    }

    fn order_by(&mut self, node: Option<&OrderBy>) -> &mut Self {
        if let Some(node) = node {
            let next = self.visitor.visit_order_by(node);
            self.push(next);
        }
        self
    }

    fn limit_offset(&mut self, node: Option<&LimitOffset>) -> &mut Self {
        if let Some(node) = node {
            let next = self.visitor.visit_limit_offset(node);
            self.push(next);
        }
        self
    }

    fn with(&mut self, f: impl FnOnce(&mut V) -> V::Output) -> &mut Self {
        let next = f(self.visitor);
        self.push(next)
    }

    fn finish(self) -> V::Output {
        self.result
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, node: &Expr) -> V::Output {
    match node {
        Expr::Literal(n) => v.visit_literal(n),
        Expr::Column(n) => v.visit_column(n),
        Expr::Param(n) => v.visit_param(n),
        Expr::Function(n) => v.visit_function(n),
        Expr::Case(n) => v.visit_case(n),
        Expr::Arithmetic(n) => v.visit_arithmetic(n),
        Expr::Negate(n) => v.visit_negate(n),
        Expr::CustomBinary(n) => v.visit_custom_binary(n),
        Expr::CustomUnary(n) => v.visit_custom_unary(n),
        Expr::Cast(n) => v.visit_cast(n),
        Expr::Array(n) => v.visit_array(n),
        Expr::Row(n) => v.visit_row(n),
        Expr::RowList(n) => v.visit_row_list(n),
        Expr::Subquery(n) => v.visit_subquery(n),
        Expr::Collate(n) => v.visit_collate(n),
        Expr::AtTimeZone(n) => v.visit_at_time_zone(n),
        Expr::Predicate(n) => v.visit_predicate(n),
    }
}

pub fn walk_function<V: Visitor + ?Sized>(v: &mut V, node: &FunctionCall) -> V::Output {
    let mut walk = Walk::new(v);
    if let FunctionArgs::List(args) = &node.args {
        walk.exprs(args);
    }
    walk.order_by(node.within_group.as_ref())
        .opt_predicate(node.filter.as_deref());
    if let Some(over) = &node.over {
        walk.with(|v| v.visit_over(over));
    }
    walk.finish()
}

pub fn walk_case<V: Visitor + ?Sized>(v: &mut V, node: &CaseExpr) -> V::Output {
    let mut walk = Walk::new(v);
    walk.opt_expr(node.operand());
    for arm in node.whens() {
        walk.expr(&arm.when).expr(&arm.then);
    }
    walk.opt_expr(node.else_result());
    walk.finish()
}

pub fn walk_arithmetic<V: Visitor + ?Sized>(v: &mut V, node: &Arithmetic) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.lhs).expr(&node.rhs);
    walk.finish()
}

pub fn walk_negate<V: Visitor + ?Sized>(v: &mut V, node: &Negate) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.operand);
    walk.finish()
}

pub fn walk_custom_binary<V: Visitor + ?Sized>(v: &mut V, node: &CustomBinary) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.lhs).expr(&node.rhs);
    walk.finish()
}

pub fn walk_custom_unary<V: Visitor + ?Sized>(v: &mut V, node: &CustomUnary) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.operand);
    walk.finish()
}

pub fn walk_cast<V: Visitor + ?Sized>(v: &mut V, node: &Cast) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr)
        .with(|v| v.visit_type_name(&node.type_name));
    walk.finish()
}

pub fn walk_type_name<V: Visitor + ?Sized>(v: &mut V, node: &TypeName) -> V::Output {
    let mut walk = Walk::new(v);
    walk.exprs(node.modifiers());
    walk.finish()
}

pub fn walk_array<V: Visitor + ?Sized>(v: &mut V, node: &ArrayLiteral) -> V::Output {
    let mut walk = Walk::new(v);
    walk.exprs(&node.items);
    walk.finish()
}

pub fn walk_row<V: Visitor + ?Sized>(v: &mut V, node: &Row) -> V::Output {
    let mut walk = Walk::new(v);
    walk.exprs(&node.items);
    walk.finish()
}

pub fn walk_row_list<V: Visitor + ?Sized>(v: &mut V, node: &RowList) -> V::Output {
    let mut walk = Walk::new(v);
    for row in node.rows() {
        walk.with(|v| v.visit_row(row));
    }
    walk.finish()
}

pub fn walk_subquery<V: Visitor + ?Sized>(v: &mut V, node: &SubqueryExpr) -> V::Output {
    let mut walk = Walk::new(v);
    walk.query(&node.query);
    walk.finish()
}

pub fn walk_collate<V: Visitor + ?Sized>(v: &mut V, node: &Collate) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr);
    walk.finish()
}

pub fn walk_at_time_zone<V: Visitor + ?Sized>(v: &mut V, node: &AtTimeZone) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr).expr(&node.zone);
    walk.finish()
}

pub fn walk_predicate<V: Visitor + ?Sized>(v: &mut V, node: &Predicate) -> V::Output {
    match node {
        Predicate::Comparison(n) => v.visit_comparison(n),
        Predicate::Between(n) => v.visit_between(n),
        Predicate::Like(n) => v.visit_like(n),
        Predicate::IsNull(n) => v.visit_is_null(n),
        Predicate::IsDistinctFrom(n) => v.visit_is_distinct_from(n),
        Predicate::In(n) => v.visit_in(n),
        Predicate::Exists(n) => v.visit_exists(n),
        Predicate::Quantified(n) => v.visit_quantified(n),
        Predicate::Unary(n) => v.visit_unary(n),
        Predicate::Not(n) => v.visit_not(n),
        Predicate::Logical(n) => v.visit_logical(n),
    }
}

pub fn walk_comparison<V: Visitor + ?Sized>(v: &mut V, node: &Comparison) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.lhs).expr(&node.rhs);
    walk.finish()
}

pub fn walk_between<V: Visitor + ?Sized>(v: &mut V, node: &Between) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr).expr(&node.low).expr(&node.high);
    walk.finish()
}

pub fn walk_like<V: Visitor + ?Sized>(v: &mut V, node: &Like) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr)
        .expr(&node.pattern)
        .opt_expr(node.escape.as_deref());
    walk.finish()
}

pub fn walk_is_null<V: Visitor + ?Sized>(v: &mut V, node: &IsNull) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr);
    walk.finish()
}

pub fn walk_is_distinct_from<V: Visitor + ?Sized>(v: &mut V, node: &IsDistinctFrom) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.lhs).expr(&node.rhs);
    walk.finish()
}

pub fn walk_in<V: Visitor + ?Sized>(v: &mut V, node: &InPredicate) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr)
        .with(|v| v.visit_value_set(&node.values));
    walk.finish()
}

pub fn walk_exists<V: Visitor + ?Sized>(v: &mut V, node: &Exists) -> V::Output {
    let mut walk = Walk::new(v);
    walk.query(&node.query);
    walk.finish()
}

pub fn walk_quantified<V: Visitor + ?Sized>(v: &mut V, node: &QuantifiedComparison) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.lhs).query(&node.query);
    walk.finish()
}

pub fn walk_unary<V: Visitor + ?Sized>(v: &mut V, node: &UnaryPredicate) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr);
    walk.finish()
}

pub fn walk_not<V: Visitor + ?Sized>(v: &mut V, node: &Not) -> V::Output {
    let mut walk = Walk::new(v);
    walk.predicate(&node.inner);
    walk.finish()
}

pub fn walk_logical<V: Visitor + ?Sized>(v: &mut V, node: &Logical) -> V::Output {
    let mut walk = Walk::new(v);
    walk.predicate(&node.lhs).predicate(&node.rhs);
    walk.finish()
}

pub fn walk_value_set<V: Visitor + ?Sized>(v: &mut V, node: &ValueSet) -> V::Output {
    match node {
        ValueSet::Subquery(q) => v.visit_query(q),
        ValueSet::Row(row) => v.visit_row(row),
        ValueSet::RowList(rows) => v.visit_row_list(rows),
    }
}

pub fn walk_table_ref<V: Visitor + ?Sized>(v: &mut V, node: &TableRef) -> V::Output {
    match node {
        TableRef::Named(n) => v.visit_named_table(n),
        TableRef::Subquery(n) => v.visit_subquery_table(n),
        TableRef::Values(n) => v.visit_values_table(n),
        TableRef::Function(n) => v.visit_function_table(n),
        TableRef::Lateral(n) => v.visit_lateral_table(n),
    }
}

pub fn walk_subquery_table<V: Visitor + ?Sized>(v: &mut V, node: &SubqueryTable) -> V::Output {
    let mut walk = Walk::new(v);
    walk.query(&node.query);
    walk.finish()
}

pub fn walk_values_table<V: Visitor + ?Sized>(v: &mut V, node: &ValuesTable) -> V::Output {
    let mut walk = Walk::new(v);
    walk.with(|v| v.visit_row_list(&node.rows));
    walk.finish()
}

pub fn walk_function_table<V: Visitor + ?Sized>(v: &mut V, node: &FunctionTable) -> V::Output {
    let mut walk = Walk::new(v);
    walk.with(|v| v.visit_function(&node.function));
    walk.finish()
}

pub fn walk_lateral_table<V: Visitor + ?Sized>(v: &mut V, node: &LateralTable) -> V::Output {
    let mut walk = Walk::new(v);
    walk.table(&node.inner);
    walk.finish()
}

pub fn walk_join<V: Visitor + ?Sized>(v: &mut V, node: &Join) -> V::Output {
    match node {
        Join::Cross(n) => v.visit_cross_join(n),
        Join::Natural(n) => v.visit_natural_join(n),
        Join::Using(n) => v.visit_using_join(n),
        Join::On(n) => v.visit_on_join(n),
    }
}

pub fn walk_cross_join<V: Visitor + ?Sized>(v: &mut V, node: &CrossJoin) -> V::Output {
    let mut walk = Walk::new(v);
    walk.table(&node.table);
    walk.finish()
}

pub fn walk_natural_join<V: Visitor + ?Sized>(v: &mut V, node: &NaturalJoin) -> V::Output {
    let mut walk = Walk::new(v);
    walk.table(&node.table);
    walk.finish()
}

pub fn walk_using_join<V: Visitor + ?Sized>(v: &mut V, node: &UsingJoin) -> V::Output {
    let mut walk = Walk::new(v);
    walk.table(node.table());
    walk.finish()
}

pub fn walk_on_join<V: Visitor + ?Sized>(v: &mut V, node: &OnJoin) -> V::Output {
    let mut walk = Walk::new(v);
    walk.table(&node.table).predicate(&node.on);
    walk.finish()
}

pub fn walk_query<V: Visitor + ?Sized>(v: &mut V, node: &Query) -> V::Output {
    match node {
        Query::Select(n) => v.visit_select(n),
        Query::Composite(n) => v.visit_composite(n),
        Query::With(n) => v.visit_with(n),
    }
}

/// distinct, items, from, joins, where, group by, having, windows,
/// order by, limit/offset, locking.
pub fn walk_select<V: Visitor + ?Sized>(v: &mut V, node: &SelectQuery) -> V::Output {
    let mut walk = Walk::new(v);
    if let Some(distinct) = &node.distinct {
        walk.with(|v| v.visit_distinct(distinct));
    }
    for item in &node.items {
        walk.with(|v| v.visit_select_item(item));
    }
    if let Some(from) = &node.from {
        walk.table(from);
    }
    for join in &node.joins {
        walk.with(|v| v.visit_join(join));
    }
    walk.opt_predicate(node.where_clause.as_ref());
    if let Some(group_by) = &node.group_by {
        walk.with(|v| v.visit_group_by(group_by));
    }
    walk.opt_predicate(node.having.as_ref());
    for window in &node.windows {
        walk.with(|v| v.visit_window_def(window));
    }
    walk.order_by(node.order_by.as_ref())
        .limit_offset(node.limit_offset.as_ref());
    if let Some(locking) = &node.locking {
        walk.with(|v| v.visit_locking(locking));
    }
    walk.finish()
}

pub fn walk_composite<V: Visitor + ?Sized>(v: &mut V, node: &CompositeQuery) -> V::Output {
    let mut walk = Walk::new(v);
    for term in node.terms() {
        walk.query(term);
    }
    walk.order_by(node.order_by())
        .limit_offset(node.limit_offset());
    walk.finish()
}

pub fn walk_with<V: Visitor + ?Sized>(v: &mut V, node: &WithQuery) -> V::Output {
    let mut walk = Walk::new(v);
    for cte in node.ctes() {
        walk.with(|v| v.visit_cte(cte));
    }
    walk.query(node.body());
    walk.finish()
}

pub fn walk_cte<V: Visitor + ?Sized>(v: &mut V, node: &CteDef) -> V::Output {
    let mut walk = Walk::new(v);
    if let Some(body) = &node.body {
        walk.query(body);
    }
    walk.finish()
}

pub fn walk_select_item<V: Visitor + ?Sized>(v: &mut V, node: &SelectItem) -> V::Output {
    match node {
        SelectItem::Expr(aliased) => v.visit_expr(&aliased.expr),
        SelectItem::Star | SelectItem::QualifiedStar(_) => v.default_result(),
    }
}

pub fn walk_distinct<V: Visitor + ?Sized>(v: &mut V, node: &DistinctSpec) -> V::Output {
    let mut walk = Walk::new(v);
    if let DistinctSpec::On(exprs) = node {
        walk.exprs(exprs);
    }
    walk.finish()
}

pub fn walk_group_by<V: Visitor + ?Sized>(v: &mut V, node: &GroupBy) -> V::Output {
    let mut walk = Walk::new(v);
    walk.exprs(&node.items);
    walk.finish()
}

pub fn walk_order_by<V: Visitor + ?Sized>(v: &mut V, node: &OrderBy) -> V::Output {
    let mut walk = Walk::new(v);
    for item in &node.items {
        walk.with(|v| v.visit_order_item(item));
    }
    walk.finish()
}

pub fn walk_order_item<V: Visitor + ?Sized>(v: &mut V, node: &OrderItem) -> V::Output {
    let mut walk = Walk::new(v);
    walk.expr(&node.expr);
    walk.finish()
}

pub fn walk_window_def<V: Visitor + ?Sized>(v: &mut V, node: &WindowDef) -> V::Output {
    let mut walk = Walk::new(v);
    walk.with(|v| v.visit_window_spec(&node.spec));
    walk.finish()
}

pub fn walk_window_spec<V: Visitor + ?Sized>(v: &mut V, node: &WindowSpec) -> V::Output {
    let mut walk = Walk::new(v);
    if let Some(partition_by) = &node.partition_by {
        walk.with(|v| v.visit_partition_by(partition_by));
    }
    walk.order_by(node.order_by.as_ref());
    if let Some(frame) = &node.frame {
        walk.with(|v| v.visit_frame(frame));
    }
    walk.finish()
}

pub fn walk_over<V: Visitor + ?Sized>(v: &mut V, node: &OverSpec) -> V::Output {
    match node {
        OverSpec::Ref(_) => v.default_result(),
        OverSpec::Def(spec) => v.visit_window_spec(spec),
    }
}

pub fn walk_partition_by<V: Visitor + ?Sized>(v: &mut V, node: &PartitionBy) -> V::Output {
    let mut walk = Walk::new(v);
    walk.exprs(&node.exprs);
    walk.finish()
}

pub fn walk_frame<V: Visitor + ?Sized>(v: &mut V, node: &FrameSpec) -> V::Output {
    let mut walk = Walk::new(v);
    match node {
        FrameSpec::Single { bound, .. } => {
            walk.with(|v| v.visit_bound(bound));
        }
        FrameSpec::Between { start, end, .. } => {
            walk.with(|v| v.visit_bound(start))
                .with(|v| v.visit_bound(end));
        }
    }
    walk.finish()
}

pub fn walk_bound<V: Visitor + ?Sized>(v: &mut V, node: &BoundSpec) -> V::Output {
    let mut walk = Walk::new(v);
    walk.opt_expr(node.offset());
    walk.finish()
}
