//! Copy-on-write rewriting.
//!
//! `transform_*` methods return [`Cow::Borrowed`] pointing at the input when
//! nothing changed and [`Cow::Owned`] with a rebuilt node otherwise. The
//! default `rewrite_*` functions rebuild a node only if at least one child
//! came back as a different value; unchanged siblings are cloned into the
//! new node and every non-child attribute is carried over as-is.
//!
//! Per-type methods keep the node's type. To replace a node with a
//! different variant (a literal with a parameter, say) override the
//! supertype method such as [`Transformer::transform_expr`].

use std::borrow::Cow;

use crate::ast::*;

pub trait Transformer {
    // expressions

    fn transform_expr<'a>(&mut self, node: &'a Expr) -> Cow<'a, Expr> {
        rewrite_expr(self, node)
    }
    fn transform_literal<'a>(&mut self, node: &'a Literal) -> Cow<'a, Literal> {
        Cow::Borrowed(node)
    }
    fn transform_column<'a>(&mut self, node: &'a ColumnRef) -> Cow<'a, ColumnRef> {
        Cow::Borrowed(node)
    }
    fn transform_param<'a>(&mut self, node: &'a Param) -> Cow<'a, Param> {
        Cow::Borrowed(node)
    }
    fn transform_function<'a>(&mut self, node: &'a FunctionCall) -> Cow<'a, FunctionCall> {
        rewrite_function(self, node)
    }
    fn transform_case<'a>(&mut self, node: &'a CaseExpr) -> Cow<'a, CaseExpr> {
        rewrite_case(self, node)
    }
    fn transform_arithmetic<'a>(&mut self, node: &'a Arithmetic) -> Cow<'a, Arithmetic> {
        rewrite_arithmetic(self, node)
    }
    fn transform_negate<'a>(&mut self, node: &'a Negate) -> Cow<'a, Negate> {
        rewrite_negate(self, node)
    }
    fn transform_custom_binary<'a>(&mut self, node: &'a CustomBinary) -> Cow<'a, CustomBinary> {
        rewrite_custom_binary(self, node)
    }
    fn transform_custom_unary<'a>(&mut self, node: &'a CustomUnary) -> Cow<'a, CustomUnary> {
        rewrite_custom_unary(self, node)
    }
    fn transform_cast<'a>(&mut self, node: &'a Cast) -> Cow<'a, Cast> {
        rewrite_cast(self, node)
    }
    fn transform_type_name<'a>(&mut self, node: &'a TypeName) -> Cow<'a, TypeName> {
        rewrite_type_name(self, node)
    }
    fn transform_array<'a>(&mut self, node: &'a ArrayLiteral) -> Cow<'a, ArrayLiteral> {
        rewrite_array(self, node)
    }
    fn transform_row<'a>(&mut self, node: &'a Row) -> Cow<'a, Row> {
        rewrite_row(self, node)
    }
    fn transform_row_list<'a>(&mut self, node: &'a RowList) -> Cow<'a, RowList> {
        rewrite_row_list(self, node)
    }
    fn transform_subquery<'a>(&mut self, node: &'a SubqueryExpr) -> Cow<'a, SubqueryExpr> {
        rewrite_subquery(self, node)
    }
    fn transform_collate<'a>(&mut self, node: &'a Collate) -> Cow<'a, Collate> {
        rewrite_collate(self, node)
    }
    fn transform_at_time_zone<'a>(&mut self, node: &'a AtTimeZone) -> Cow<'a, AtTimeZone> {
        rewrite_at_time_zone(self, node)
    }

    // predicates

    fn transform_predicate<'a>(&mut self, node: &'a Predicate) -> Cow<'a, Predicate> {
        rewrite_predicate(self, node)
    }
    fn transform_comparison<'a>(&mut self, node: &'a Comparison) -> Cow<'a, Comparison> {
        rewrite_comparison(self, node)
    }
    fn transform_between<'a>(&mut self, node: &'a Between) -> Cow<'a, Between> {
        rewrite_between(self, node)
    }
    fn transform_like<'a>(&mut self, node: &'a Like) -> Cow<'a, Like> {
        rewrite_like(self, node)
    }
    fn transform_is_null<'a>(&mut self, node: &'a IsNull) -> Cow<'a, IsNull> {
        rewrite_is_null(self, node)
    }
    fn transform_is_distinct_from<'a>(&mut self, node: &'a IsDistinctFrom) -> Cow<'a, IsDistinctFrom> {
        rewrite_is_distinct_from(self, node)
    }
    fn transform_in<'a>(&mut self, node: &'a InPredicate) -> Cow<'a, InPredicate> {
        rewrite_in(self, node)
    }
    fn transform_exists<'a>(&mut self, node: &'a Exists) -> Cow<'a, Exists> {
        rewrite_exists(self, node)
    }
    fn transform_quantified<'a>(
        &mut self,
        node: &'a QuantifiedComparison,
    ) -> Cow<'a, QuantifiedComparison> {
        rewrite_quantified(self, node)
    }
    fn transform_unary<'a>(&mut self, node: &'a UnaryPredicate) -> Cow<'a, UnaryPredicate> {
        rewrite_unary(self, node)
    }
    fn transform_not<'a>(&mut self, node: &'a Not) -> Cow<'a, Not> {
        rewrite_not(self, node)
    }
    fn transform_logical<'a>(&mut self, node: &'a Logical) -> Cow<'a, Logical> {
        rewrite_logical(self, node)
    }
    fn transform_value_set<'a>(&mut self, node: &'a ValueSet) -> Cow<'a, ValueSet> {
        rewrite_value_set(self, node)
    }

    // tables and joins

    fn transform_table_ref<'a>(&mut self, node: &'a TableRef) -> Cow<'a, TableRef> {
        rewrite_table_ref(self, node)
    }
    fn transform_named_table<'a>(&mut self, node: &'a NamedTable) -> Cow<'a, NamedTable> {
        Cow::Borrowed(node)
    }
    fn transform_subquery_table<'a>(&mut self, node: &'a SubqueryTable) -> Cow<'a, SubqueryTable> {
        rewrite_subquery_table(self, node)
    }
    fn transform_values_table<'a>(&mut self, node: &'a ValuesTable) -> Cow<'a, ValuesTable> {
        rewrite_values_table(self, node)
    }
    fn transform_function_table<'a>(&mut self, node: &'a FunctionTable) -> Cow<'a, FunctionTable> {
        rewrite_function_table(self, node)
    }
    fn transform_lateral_table<'a>(&mut self, node: &'a LateralTable) -> Cow<'a, LateralTable> {
        rewrite_lateral_table(self, node)
    }
    fn transform_join<'a>(&mut self, node: &'a Join) -> Cow<'a, Join> {
        rewrite_join(self, node)
    }
    fn transform_cross_join<'a>(&mut self, node: &'a CrossJoin) -> Cow<'a, CrossJoin> {
        rewrite_cross_join(self, node)
    }
    fn transform_natural_join<'a>(&mut self, node: &'a NaturalJoin) -> Cow<'a, NaturalJoin> {
        rewrite_natural_join(self, node)
    }
    fn transform_using_join<'a>(&mut self, node: &'a UsingJoin) -> Cow<'a, UsingJoin> {
        rewrite_using_join(self, node)
    }
    fn transform_on_join<'a>(&mut self, node: &'a OnJoin) -> Cow<'a, OnJoin> {
        rewrite_on_join(self, node)
    }

    // queries

    fn transform_query<'a>(&mut self, node: &'a Query) -> Cow<'a, Query> {
        rewrite_query(self, node)
    }
    fn transform_select<'a>(&mut self, node: &'a SelectQuery) -> Cow<'a, SelectQuery> {
        rewrite_select(self, node)
    }
    fn transform_composite<'a>(&mut self, node: &'a CompositeQuery) -> Cow<'a, CompositeQuery> {
        rewrite_composite(self, node)
    }
    fn transform_with<'a>(&mut self, node: &'a WithQuery) -> Cow<'a, WithQuery> {
        rewrite_with(self, node)
    }
    fn transform_cte<'a>(&mut self, node: &'a CteDef) -> Cow<'a, CteDef> {
        rewrite_cte(self, node)
    }
    fn transform_select_item<'a>(&mut self, node: &'a SelectItem) -> Cow<'a, SelectItem> {
        rewrite_select_item(self, node)
    }
    fn transform_distinct<'a>(&mut self, node: &'a DistinctSpec) -> Cow<'a, DistinctSpec> {
        rewrite_distinct(self, node)
    }
    fn transform_group_by<'a>(&mut self, node: &'a GroupBy) -> Cow<'a, GroupBy> {
        rewrite_group_by(self, node)
    }
    fn transform_order_by<'a>(&mut self, node: &'a OrderBy) -> Cow<'a, OrderBy> {
        rewrite_order_by(self, node)
    }
    fn transform_order_item<'a>(&mut self, node: &'a OrderItem) -> Cow<'a, OrderItem> {
        rewrite_order_item(self, node)
    }
    fn transform_limit_offset<'a>(&mut self, node: &'a LimitOffset) -> Cow<'a, LimitOffset> {
        Cow::Borrowed(node)
    }
    fn transform_locking<'a>(&mut self, node: &'a LockingClause) -> Cow<'a, LockingClause> {
        Cow::Borrowed(node)
    }

    // windows

    fn transform_window_def<'a>(&mut self, node: &'a WindowDef) -> Cow<'a, WindowDef> {
        rewrite_window_def(self, node)
    }
    fn transform_window_spec<'a>(&mut self, node: &'a WindowSpec) -> Cow<'a, WindowSpec> {
        rewrite_window_spec(self, node)
    }
    fn transform_over<'a>(&mut self, node: &'a OverSpec) -> Cow<'a, OverSpec> {
        rewrite_over(self, node)
    }
    fn transform_partition_by<'a>(&mut self, node: &'a PartitionBy) -> Cow<'a, PartitionBy> {
        rewrite_partition_by(self, node)
    }
    fn transform_frame<'a>(&mut self, node: &'a FrameSpec) -> Cow<'a, FrameSpec> {
        rewrite_frame(self, node)
    }
    fn transform_bound<'a>(&mut self, node: &'a BoundSpec) -> Cow<'a, BoundSpec> {
        rewrite_bound(self, node)
    }
}

/// Rewrites nothing; every node comes back borrowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl Transformer for IdentityTransformer {}

// helpers

/// Normalise a child result: borrowed means "the very same node".
fn child<'a, T: Clone>(orig: &'a T, new: Cow<'a, T>) -> Cow<'a, T> {
    match new {
        Cow::Borrowed(b) if std::ptr::eq(b, orig) => Cow::Borrowed(orig),
        other => Cow::Owned(other.into_owned()),
    }
}

fn kept<T: ToOwned + ?Sized>(cow: &Cow<'_, T>) -> bool {
    matches!(cow, Cow::Borrowed(_))
}

macro_rules! all_kept {
    ($($cow:expr),+ $(,)?) => {
        true $(&& kept(&$cow))+
    };
}

/// Replace the whole node with its wrapped child, keeping identity.
fn lift<'a, T: Clone, U: Clone>(outer: &'a U, inner: Cow<'a, T>, wrap: impl FnOnce(T) -> U) -> Cow<'a, U> {
    match inner {
        Cow::Borrowed(_) => Cow::Borrowed(outer),
        Cow::Owned(inner) => Cow::Owned(wrap(inner)),
    }
}

fn slice<'a, T: Clone>(items: &'a [T], mut f: impl FnMut(&'a T) -> Cow<'a, T>) -> Cow<'a, [T]> {
    let mut rebuilt: Option<Vec<T>> = None;
    for (i, item) in items.iter().enumerate() {
        let new = child(item, f(item));
        if let Some(out) = rebuilt.as_mut() {
            out.push(new.into_owned());
        } else if !kept(&new) {
            let mut out = Vec::with_capacity(items.len());
            out.extend_from_slice(&items[..i]);
            out.push(new.into_owned());
            rebuilt = Some(out);
        }
    }
    match rebuilt {
        Some(out) => Cow::Owned(out),
        None => Cow::Borrowed(items),
    }
}

fn option<'a, T: Clone>(opt: &'a Option<T>, f: impl FnOnce(&'a T) -> Cow<'a, T>) -> Cow<'a, Option<T>> {
    match opt {
        Some(inner) => match child(inner, f(inner)) {
            Cow::Borrowed(_) => Cow::Borrowed(opt),
            Cow::Owned(new) => Cow::Owned(Some(new)),
        },
        None => Cow::Borrowed(opt),
    }
}

fn boxed_option<'a, T: Clone>(
    opt: &'a Option<Box<T>>,
    f: impl FnOnce(&'a T) -> Cow<'a, T>,
) -> Cow<'a, Option<Box<T>>> {
    match opt {
        Some(inner) => match child(inner.as_ref(), f(inner.as_ref())) {
            Cow::Borrowed(_) => Cow::Borrowed(opt),
            Cow::Owned(new) => Cow::Owned(Some(Box::new(new))),
        },
        None => Cow::Borrowed(opt),
    }
}

fn expr<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Expr) -> Cow<'a, Expr> {
    child(node, t.transform_expr(node))
}

fn exprs<'a, T: Transformer + ?Sized>(t: &mut T, nodes: &'a [Expr]) -> Cow<'a, [Expr]> {
    slice(nodes, |e| t.transform_expr(e))
}

fn predicate<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Predicate) -> Cow<'a, Predicate> {
    child(node, t.transform_predicate(node))
}

fn query<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Query) -> Cow<'a, Query> {
    child(node, t.transform_query(node))
}

fn table<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a TableRef) -> Cow<'a, TableRef> {
    child(node, t.transform_table_ref(node))
}

fn order_by<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Option<OrderBy>) -> Cow<'a, Option<OrderBy>> {
    option(node, |o| t.transform_order_by(o))
}

fn boxed<T: Clone>(cow: Cow<'_, T>) -> Box<T> {
    Box::new(cow.into_owned())
}

// expressions

pub fn rewrite_expr<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Expr) -> Cow<'a, Expr> {
    match node {
        Expr::Literal(n) => lift(node, child(n, t.transform_literal(n)), Expr::Literal),
        Expr::Column(n) => lift(node, child(n, t.transform_column(n)), Expr::Column),
        Expr::Param(n) => lift(node, child(n, t.transform_param(n)), Expr::Param),
        Expr::Function(n) => lift(node, child(n, t.transform_function(n)), Expr::Function),
        Expr::Case(n) => lift(node, child(n, t.transform_case(n)), Expr::Case),
        Expr::Arithmetic(n) => lift(node, child(n, t.transform_arithmetic(n)), Expr::Arithmetic),
        Expr::Negate(n) => lift(node, child(n, t.transform_negate(n)), Expr::Negate),
        Expr::CustomBinary(n) => {
            lift(node, child(n, t.transform_custom_binary(n)), Expr::CustomBinary)
        }
        Expr::CustomUnary(n) => lift(node, child(n, t.transform_custom_unary(n)), Expr::CustomUnary),
        Expr::Cast(n) => lift(node, child(n, t.transform_cast(n)), Expr::Cast),
        Expr::Array(n) => lift(node, child(n, t.transform_array(n)), Expr::Array),
        Expr::Row(n) => lift(node, child(n, t.transform_row(n)), Expr::Row),
        Expr::RowList(n) => lift(node, child(n, t.transform_row_list(n)), Expr::RowList),
        Expr::Subquery(n) => lift(node, child(n, t.transform_subquery(n)), Expr::Subquery),
        Expr::Collate(n) => lift(node, child(n, t.transform_collate(n)), Expr::Collate),
        Expr::AtTimeZone(n) => lift(node, child(n, t.transform_at_time_zone(n)), Expr::AtTimeZone),
        Expr::Predicate(p) => lift(node, predicate(t, p), |p| Expr::Predicate(Box::new(p))),
    }
}

pub fn rewrite_function<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a FunctionCall,
) -> Cow<'a, FunctionCall> {
    let args = match &node.args {
        FunctionArgs::Star => None,
        FunctionArgs::List(args) => match exprs(t, args) {
            Cow::Borrowed(_) => None,
            Cow::Owned(args) => Some(FunctionArgs::List(args)),
        },
    };
    let within_group = order_by(t, &node.within_group);
    let filter = boxed_option(&node.filter, |p| t.transform_predicate(p));
    let over = option(&node.over, |o| t.transform_over(o));
    if args.is_none() && all_kept!(within_group, filter, over) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(FunctionCall {
        name: node.name.clone(),
        args: args.unwrap_or_else(|| node.args.clone()),
        distinct: node.distinct,
        within_group: within_group.into_owned(),
        filter: filter.into_owned(),
        over: over.into_owned(),
    })
}

pub fn rewrite_case<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a CaseExpr) -> Cow<'a, CaseExpr> {
    let operand = node.operand().map(|e| expr(t, e));
    let whens = slice(node.whens(), |arm| {
        let when = expr(t, &arm.when);
        let then = expr(t, &arm.then);
        if all_kept!(when, then) {
            Cow::Borrowed(arm)
        } else {
            Cow::Owned(WhenThen {
                when: when.into_owned(),
                then: then.into_owned(),
            })
        }
    });
    let else_result = node.else_result().map(|e| expr(t, e));
    if operand.as_ref().is_none_or(kept) && kept(&whens) && else_result.as_ref().is_none_or(kept) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(CaseExpr::from_parts(
        operand.map(Cow::into_owned),
        whens.into_owned(),
        else_result.map(Cow::into_owned),
    ))
}

pub fn rewrite_arithmetic<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a Arithmetic,
) -> Cow<'a, Arithmetic> {
    let lhs = expr(t, &node.lhs);
    let rhs = expr(t, &node.rhs);
    if all_kept!(lhs, rhs) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Arithmetic {
        op: node.op,
        lhs: boxed(lhs),
        rhs: boxed(rhs),
    })
}

pub fn rewrite_negate<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Negate) -> Cow<'a, Negate> {
    let operand = expr(t, &node.operand);
    if kept(&operand) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Negate {
        operand: boxed(operand),
    })
}

pub fn rewrite_custom_binary<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a CustomBinary,
) -> Cow<'a, CustomBinary> {
    let lhs = expr(t, &node.lhs);
    let rhs = expr(t, &node.rhs);
    if all_kept!(lhs, rhs) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(CustomBinary {
        operator: node.operator.clone(),
        lhs: boxed(lhs),
        rhs: boxed(rhs),
    })
}

pub fn rewrite_custom_unary<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a CustomUnary,
) -> Cow<'a, CustomUnary> {
    let operand = expr(t, &node.operand);
    if kept(&operand) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(CustomUnary {
        operator: node.operator.clone(),
        operand: boxed(operand),
    })
}

pub fn rewrite_cast<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Cast) -> Cow<'a, Cast> {
    let inner = expr(t, &node.expr);
    let type_name = child(&node.type_name, t.transform_type_name(&node.type_name));
    if all_kept!(inner, type_name) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Cast {
        expr: boxed(inner),
        type_name: type_name.into_owned(),
    })
}

pub fn rewrite_type_name<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a TypeName,
) -> Cow<'a, TypeName> {
    match exprs(t, node.modifiers()) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(modifiers) => Cow::Owned(node.clone().with_modifiers(modifiers)),
    }
}

pub fn rewrite_array<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a ArrayLiteral,
) -> Cow<'a, ArrayLiteral> {
    match exprs(t, &node.items) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(items) => Cow::Owned(ArrayLiteral { items }),
    }
}

pub fn rewrite_row<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Row) -> Cow<'a, Row> {
    match exprs(t, &node.items) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(items) => Cow::Owned(Row { items }),
    }
}

pub fn rewrite_row_list<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a RowList) -> Cow<'a, RowList> {
    match slice(node.rows(), |r| t.transform_row(r)) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(rows) => Cow::Owned(RowList::from_rows(rows)),
    }
}

pub fn rewrite_subquery<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a SubqueryExpr,
) -> Cow<'a, SubqueryExpr> {
    let inner = query(t, &node.query);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(SubqueryExpr { query: boxed(inner) })
}

pub fn rewrite_collate<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Collate) -> Cow<'a, Collate> {
    let inner = expr(t, &node.expr);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Collate {
        expr: boxed(inner),
        collation: node.collation.clone(),
    })
}

pub fn rewrite_at_time_zone<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a AtTimeZone,
) -> Cow<'a, AtTimeZone> {
    let inner = expr(t, &node.expr);
    let zone = expr(t, &node.zone);
    if all_kept!(inner, zone) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(AtTimeZone {
        expr: boxed(inner),
        zone: boxed(zone),
    })
}

// predicates

pub fn rewrite_predicate<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a Predicate,
) -> Cow<'a, Predicate> {
    match node {
        Predicate::Comparison(n) => lift(node, child(n, t.transform_comparison(n)), Predicate::Comparison),
        Predicate::Between(n) => lift(node, child(n, t.transform_between(n)), Predicate::Between),
        Predicate::Like(n) => lift(node, child(n, t.transform_like(n)), Predicate::Like),
        Predicate::IsNull(n) => lift(node, child(n, t.transform_is_null(n)), Predicate::IsNull),
        Predicate::IsDistinctFrom(n) => lift(
            node,
            child(n, t.transform_is_distinct_from(n)),
            Predicate::IsDistinctFrom,
        ),
        Predicate::In(n) => lift(node, child(n, t.transform_in(n)), Predicate::In),
        Predicate::Exists(n) => lift(node, child(n, t.transform_exists(n)), Predicate::Exists),
        Predicate::Quantified(n) => lift(node, child(n, t.transform_quantified(n)), Predicate::Quantified),
        Predicate::Unary(n) => lift(node, child(n, t.transform_unary(n)), Predicate::Unary),
        Predicate::Not(n) => lift(node, child(n, t.transform_not(n)), Predicate::Not),
        Predicate::Logical(n) => lift(node, child(n, t.transform_logical(n)), Predicate::Logical),
    }
}

pub fn rewrite_comparison<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a Comparison,
) -> Cow<'a, Comparison> {
    let lhs = expr(t, &node.lhs);
    let rhs = expr(t, &node.rhs);
    if all_kept!(lhs, rhs) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Comparison {
        lhs: boxed(lhs),
        op: node.op,
        rhs: boxed(rhs),
    })
}

pub fn rewrite_between<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Between) -> Cow<'a, Between> {
    let inner = expr(t, &node.expr);
    let low = expr(t, &node.low);
    let high = expr(t, &node.high);
    if all_kept!(inner, low, high) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Between {
        expr: boxed(inner),
        low: boxed(low),
        high: boxed(high),
        symmetric: node.symmetric,
    })
}

pub fn rewrite_like<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Like) -> Cow<'a, Like> {
    let inner = expr(t, &node.expr);
    let pattern = expr(t, &node.pattern);
    let escape = boxed_option(&node.escape, |e| t.transform_expr(e));
    if all_kept!(inner, pattern, escape) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Like {
        expr: boxed(inner),
        pattern: boxed(pattern),
        escape: escape.into_owned(),
        negated: node.negated,
    })
}

pub fn rewrite_is_null<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a IsNull) -> Cow<'a, IsNull> {
    let inner = expr(t, &node.expr);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(IsNull {
        expr: boxed(inner),
        negated: node.negated,
    })
}

pub fn rewrite_is_distinct_from<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a IsDistinctFrom,
) -> Cow<'a, IsDistinctFrom> {
    let lhs = expr(t, &node.lhs);
    let rhs = expr(t, &node.rhs);
    if all_kept!(lhs, rhs) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(IsDistinctFrom {
        lhs: boxed(lhs),
        rhs: boxed(rhs),
        negated: node.negated,
    })
}

pub fn rewrite_in<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a InPredicate) -> Cow<'a, InPredicate> {
    let inner = expr(t, &node.expr);
    let values = child(&node.values, t.transform_value_set(&node.values));
    if all_kept!(inner, values) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(InPredicate {
        expr: boxed(inner),
        values: values.into_owned(),
        negated: node.negated,
    })
}

pub fn rewrite_exists<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Exists) -> Cow<'a, Exists> {
    let inner = query(t, &node.query);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Exists {
        query: boxed(inner),
        negated: node.negated,
    })
}

pub fn rewrite_quantified<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a QuantifiedComparison,
) -> Cow<'a, QuantifiedComparison> {
    let lhs = expr(t, &node.lhs);
    let inner = query(t, &node.query);
    if all_kept!(lhs, inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(QuantifiedComparison {
        lhs: boxed(lhs),
        op: node.op,
        quantifier: node.quantifier,
        query: boxed(inner),
    })
}

pub fn rewrite_unary<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a UnaryPredicate,
) -> Cow<'a, UnaryPredicate> {
    let inner = expr(t, &node.expr);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(UnaryPredicate { expr: boxed(inner) })
}

pub fn rewrite_not<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Not) -> Cow<'a, Not> {
    let inner = predicate(t, &node.inner);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Not { inner: boxed(inner) })
}

pub fn rewrite_logical<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Logical) -> Cow<'a, Logical> {
    let lhs = predicate(t, &node.lhs);
    let rhs = predicate(t, &node.rhs);
    if all_kept!(lhs, rhs) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Logical {
        op: node.op,
        lhs: boxed(lhs),
        rhs: boxed(rhs),
    })
}

pub fn rewrite_value_set<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a ValueSet,
) -> Cow<'a, ValueSet> {
    match node {
        ValueSet::Subquery(q) => lift(node, query(t, q), |q| ValueSet::Subquery(Box::new(q))),
        ValueSet::Row(row) => lift(node, child(row, t.transform_row(row)), ValueSet::Row),
        ValueSet::RowList(rows) => lift(node, child(rows, t.transform_row_list(rows)), ValueSet::RowList),
    }
}

// tables and joins

pub fn rewrite_table_ref<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a TableRef,
) -> Cow<'a, TableRef> {
    match node {
        TableRef::Named(n) => lift(node, child(n, t.transform_named_table(n)), TableRef::Named),
        TableRef::Subquery(n) => lift(node, child(n, t.transform_subquery_table(n)), TableRef::Subquery),
        TableRef::Values(n) => lift(node, child(n, t.transform_values_table(n)), TableRef::Values),
        TableRef::Function(n) => lift(node, child(n, t.transform_function_table(n)), TableRef::Function),
        TableRef::Lateral(n) => lift(node, child(n, t.transform_lateral_table(n)), TableRef::Lateral),
    }
}

pub fn rewrite_subquery_table<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a SubqueryTable,
) -> Cow<'a, SubqueryTable> {
    let inner = query(t, &node.query);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(SubqueryTable {
        query: boxed(inner),
        alias: node.alias.clone(),
    })
}

pub fn rewrite_values_table<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a ValuesTable,
) -> Cow<'a, ValuesTable> {
    let rows = child(&node.rows, t.transform_row_list(&node.rows));
    if kept(&rows) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(ValuesTable {
        rows: rows.into_owned(),
        alias: node.alias.clone(),
    })
}

pub fn rewrite_function_table<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a FunctionTable,
) -> Cow<'a, FunctionTable> {
    let function = child(&node.function, t.transform_function(&node.function));
    if kept(&function) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(FunctionTable {
        function: function.into_owned(),
        alias: node.alias.clone(),
    })
}

pub fn rewrite_lateral_table<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a LateralTable,
) -> Cow<'a, LateralTable> {
    let inner = table(t, &node.inner);
    if kept(&inner) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(LateralTable { inner: boxed(inner) })
}

pub fn rewrite_join<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Join) -> Cow<'a, Join> {
    match node {
        Join::Cross(n) => lift(node, child(n, t.transform_cross_join(n)), Join::Cross),
        Join::Natural(n) => lift(node, child(n, t.transform_natural_join(n)), Join::Natural),
        Join::Using(n) => lift(node, child(n, t.transform_using_join(n)), Join::Using),
        Join::On(n) => lift(node, child(n, t.transform_on_join(n)), Join::On),
    }
}

pub fn rewrite_cross_join<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a CrossJoin) -> Cow<'a, CrossJoin> {
    match table(t, &node.table) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(table) => Cow::Owned(CrossJoin { table }),
    }
}

pub fn rewrite_natural_join<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a NaturalJoin,
) -> Cow<'a, NaturalJoin> {
    match table(t, &node.table) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(table) => Cow::Owned(NaturalJoin { table }),
    }
}

pub fn rewrite_using_join<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a UsingJoin) -> Cow<'a, UsingJoin> {
    match table(t, node.table()) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(table) => Cow::Owned(node.with_table(table)),
    }
}

pub fn rewrite_on_join<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a OnJoin) -> Cow<'a, OnJoin> {
    let target = table(t, &node.table);
    let on = predicate(t, &node.on);
    if all_kept!(target, on) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(OnJoin {
        kind: node.kind,
        table: target.into_owned(),
        on: on.into_owned(),
    })
}

// queries

pub fn rewrite_query<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a Query) -> Cow<'a, Query> {
    match node {
        Query::Select(n) => lift(node, child(n, t.transform_select(n)), Query::Select),
        Query::Composite(n) => lift(node, child(n, t.transform_composite(n)), Query::Composite),
        Query::With(n) => lift(node, child(n, t.transform_with(n)), Query::With),
    }
}

pub fn rewrite_select<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a SelectQuery,
) -> Cow<'a, SelectQuery> {
    let distinct = option(&node.distinct, |d| t.transform_distinct(d));
    let items = slice(&node.items, |i| t.transform_select_item(i));
    let from = option(&node.from, |f| t.transform_table_ref(f));
    let joins = slice(&node.joins, |j| t.transform_join(j));
    let where_clause = option(&node.where_clause, |p| t.transform_predicate(p));
    let group_by = option(&node.group_by, |g| t.transform_group_by(g));
    let having = option(&node.having, |p| t.transform_predicate(p));
    let windows = slice(&node.windows, |w| t.transform_window_def(w));
    let order = order_by(t, &node.order_by);
    let limit_offset = option(&node.limit_offset, |l| t.transform_limit_offset(l));
    let locking = option(&node.locking, |l| t.transform_locking(l));
    if all_kept!(
        distinct,
        items,
        from,
        joins,
        where_clause,
        group_by,
        having,
        windows,
        order,
        limit_offset,
        locking,
    ) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(SelectQuery {
        distinct: distinct.into_owned(),
        items: items.into_owned(),
        from: from.into_owned(),
        joins: joins.into_owned(),
        where_clause: where_clause.into_owned(),
        group_by: group_by.into_owned(),
        having: having.into_owned(),
        windows: windows.into_owned(),
        order_by: order.into_owned(),
        limit_offset: limit_offset.into_owned(),
        locking: locking.into_owned(),
    })
}

pub fn rewrite_composite<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a CompositeQuery,
) -> Cow<'a, CompositeQuery> {
    let terms = slice(node.terms(), |q| t.transform_query(q));
    let order = node.order_by().map(|o| child(o, t.transform_order_by(o)));
    let limit_offset = node
        .limit_offset()
        .map(|l| child(l, t.transform_limit_offset(l)));
    if kept(&terms) && order.as_ref().is_none_or(kept) && limit_offset.as_ref().is_none_or(kept) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(node.from_parts(
        terms.into_owned(),
        order.map(Cow::into_owned),
        limit_offset.map(Cow::into_owned),
    ))
}

pub fn rewrite_with<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a WithQuery) -> Cow<'a, WithQuery> {
    let ctes = slice(node.ctes(), |c| t.transform_cte(c));
    let body = query(t, node.body());
    if all_kept!(ctes, body) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(node.from_parts(ctes.into_owned(), body.into_owned()))
}

pub fn rewrite_cte<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a CteDef) -> Cow<'a, CteDef> {
    let body = boxed_option(&node.body, |q| t.transform_query(q));
    if kept(&body) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(CteDef {
        name: node.name.clone(),
        columns: node.columns.clone(),
        body: body.into_owned(),
        materialization: node.materialization,
    })
}

pub fn rewrite_select_item<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a SelectItem,
) -> Cow<'a, SelectItem> {
    match node {
        SelectItem::Expr(aliased) => lift(node, expr(t, &aliased.expr), |expr| {
            SelectItem::Expr(AliasedExpr {
                expr,
                alias: aliased.alias.clone(),
            })
        }),
        SelectItem::Star | SelectItem::QualifiedStar(_) => Cow::Borrowed(node),
    }
}

pub fn rewrite_distinct<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a DistinctSpec,
) -> Cow<'a, DistinctSpec> {
    match node {
        DistinctSpec::Distinct => Cow::Borrowed(node),
        DistinctSpec::On(on) => match exprs(t, on) {
            Cow::Borrowed(_) => Cow::Borrowed(node),
            Cow::Owned(on) => Cow::Owned(DistinctSpec::On(on)),
        },
    }
}

pub fn rewrite_group_by<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a GroupBy) -> Cow<'a, GroupBy> {
    match exprs(t, &node.items) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(items) => Cow::Owned(GroupBy { items }),
    }
}

pub fn rewrite_order_by<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a OrderBy) -> Cow<'a, OrderBy> {
    match slice(&node.items, |i| t.transform_order_item(i)) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(items) => Cow::Owned(OrderBy { items }),
    }
}

pub fn rewrite_order_item<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a OrderItem) -> Cow<'a, OrderItem> {
    match expr(t, &node.expr) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(expr) => Cow::Owned(OrderItem {
            expr,
            direction: node.direction,
            nulls: node.nulls,
        }),
    }
}

// windows

pub fn rewrite_window_def<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a WindowDef) -> Cow<'a, WindowDef> {
    match child(&node.spec, t.transform_window_spec(&node.spec)) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(spec) => Cow::Owned(WindowDef {
            name: node.name.clone(),
            spec,
        }),
    }
}

pub fn rewrite_window_spec<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a WindowSpec,
) -> Cow<'a, WindowSpec> {
    let partition_by = option(&node.partition_by, |p| t.transform_partition_by(p));
    let order = order_by(t, &node.order_by);
    let frame = option(&node.frame, |f| t.transform_frame(f));
    if all_kept!(partition_by, order, frame) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(WindowSpec {
        partition_by: partition_by.into_owned(),
        order_by: order.into_owned(),
        frame: frame.into_owned(),
        exclude: node.exclude,
    })
}

pub fn rewrite_over<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a OverSpec) -> Cow<'a, OverSpec> {
    match node {
        OverSpec::Ref(_) => Cow::Borrowed(node),
        OverSpec::Def(spec) => lift(node, child(spec, t.transform_window_spec(spec)), OverSpec::Def),
    }
}

pub fn rewrite_partition_by<'a, T: Transformer + ?Sized>(
    t: &mut T,
    node: &'a PartitionBy,
) -> Cow<'a, PartitionBy> {
    match exprs(t, &node.exprs) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(exprs) => Cow::Owned(PartitionBy { exprs }),
    }
}

pub fn rewrite_frame<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a FrameSpec) -> Cow<'a, FrameSpec> {
    match node {
        FrameSpec::Single { unit, bound } => {
            lift(node, child(bound, t.transform_bound(bound)), |bound| FrameSpec::Single {
                unit: *unit,
                bound,
            })
        }
        FrameSpec::Between { unit, start, end } => {
            let new_start = child(start, t.transform_bound(start));
            let new_end = child(end, t.transform_bound(end));
            if all_kept!(new_start, new_end) {
                return Cow::Borrowed(node);
            }
            Cow::Owned(FrameSpec::Between {
                unit: *unit,
                start: new_start.into_owned(),
                end: new_end.into_owned(),
            })
        }
    }
}

pub fn rewrite_bound<'a, T: Transformer + ?Sized>(t: &mut T, node: &'a BoundSpec) -> Cow<'a, BoundSpec> {
    match node {
        BoundSpec::Preceding(e) => lift(node, expr(t, e), |e| BoundSpec::Preceding(Box::new(e))),
        BoundSpec::Following(e) => lift(node, expr(t, e), |e| BoundSpec::Following(Box::new(e))),
        _ => Cow::Borrowed(node),
    }
}
