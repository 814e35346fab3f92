//! Traversal engine.
//!
//! [`Visitor`] walks a tree read-only and folds a result; [`Transformer`]
//! rewrites it copy-on-write. [`Accept`] and [`Rewrite`] are the entry
//! points on every node type:
//!
//! ```
//! use std::borrow::Cow;
//! use sqlshape::prelude::*;
//! use sqlshape::visit::{IdentityTransformer, Rewrite};
//!
//! let expr = col("a").add(col("b"));
//! let same = expr.rewrite(&mut IdentityTransformer);
//! assert!(matches!(same, Cow::Borrowed(e) if std::ptr::eq(e, &expr)));
//! ```

mod transformer;
mod visitor;

pub use transformer::*;
pub use visitor::*;

use std::borrow::Cow;

use crate::ast::*;

/// Double-dispatch entry point for visitors.
pub trait Accept {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output;
}

/// Entry point for transformers. `Cow::Borrowed` means "unchanged".
pub trait Rewrite: Clone {
    fn rewrite<'a, T: Transformer + ?Sized>(&'a self, transformer: &mut T) -> Cow<'a, Self>;
}

/// Any AST node.
pub trait Node: Accept + Rewrite + std::fmt::Debug + PartialEq {}

macro_rules! nodes {
    ($($ty:ty => $visit:ident, $transform:ident;)*) => {
        $(
            impl Accept for $ty {
                fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
                    visitor.$visit(self)
                }
            }

            impl Rewrite for $ty {
                fn rewrite<'a, T: Transformer + ?Sized>(&'a self, transformer: &mut T) -> Cow<'a, Self> {
                    transformer.$transform(self)
                }
            }

            impl Node for $ty {}
        )*
    };
}

nodes! {
    Expr => visit_expr, transform_expr;
    Literal => visit_literal, transform_literal;
    ColumnRef => visit_column, transform_column;
    Param => visit_param, transform_param;
    FunctionCall => visit_function, transform_function;
    CaseExpr => visit_case, transform_case;
    Arithmetic => visit_arithmetic, transform_arithmetic;
    Negate => visit_negate, transform_negate;
    CustomBinary => visit_custom_binary, transform_custom_binary;
    CustomUnary => visit_custom_unary, transform_custom_unary;
    Cast => visit_cast, transform_cast;
    TypeName => visit_type_name, transform_type_name;
    ArrayLiteral => visit_array, transform_array;
    Row => visit_row, transform_row;
    RowList => visit_row_list, transform_row_list;
    SubqueryExpr => visit_subquery, transform_subquery;
    Collate => visit_collate, transform_collate;
    AtTimeZone => visit_at_time_zone, transform_at_time_zone;
    Predicate => visit_predicate, transform_predicate;
    Comparison => visit_comparison, transform_comparison;
    Between => visit_between, transform_between;
    Like => visit_like, transform_like;
    IsNull => visit_is_null, transform_is_null;
    IsDistinctFrom => visit_is_distinct_from, transform_is_distinct_from;
    InPredicate => visit_in, transform_in;
    Exists => visit_exists, transform_exists;
    QuantifiedComparison => visit_quantified, transform_quantified;
    UnaryPredicate => visit_unary, transform_unary;
    Not => visit_not, transform_not;
    Logical => visit_logical, transform_logical;
    ValueSet => visit_value_set, transform_value_set;
    TableRef => visit_table_ref, transform_table_ref;
    NamedTable => visit_named_table, transform_named_table;
    SubqueryTable => visit_subquery_table, transform_subquery_table;
    ValuesTable => visit_values_table, transform_values_table;
    FunctionTable => visit_function_table, transform_function_table;
    LateralTable => visit_lateral_table, transform_lateral_table;
    Join => visit_join, transform_join;
    CrossJoin => visit_cross_join, transform_cross_join;
    NaturalJoin => visit_natural_join, transform_natural_join;
    UsingJoin => visit_using_join, transform_using_join;
    OnJoin => visit_on_join, transform_on_join;
    Query => visit_query, transform_query;
    SelectQuery => visit_select, transform_select;
    CompositeQuery => visit_composite, transform_composite;
    WithQuery => visit_with, transform_with;
    CteDef => visit_cte, transform_cte;
    SelectItem => visit_select_item, transform_select_item;
    DistinctSpec => visit_distinct, transform_distinct;
    GroupBy => visit_group_by, transform_group_by;
    OrderBy => visit_order_by, transform_order_by;
    OrderItem => visit_order_item, transform_order_item;
    LimitOffset => visit_limit_offset, transform_limit_offset;
    LockingClause => visit_locking, transform_locking;
    WindowDef => visit_window_def, transform_window_def;
    WindowSpec => visit_window_spec, transform_window_spec;
    OverSpec => visit_over, transform_over;
    PartitionBy => visit_partition_by, transform_partition_by;
    FrameSpec => visit_frame, transform_frame;
    BoundSpec => visit_bound, transform_bound;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{col, func, lit, qcol, table, ExprExt, PredicateExt};

    /// Counts column references.
    struct ColumnCounter;

    impl Visitor for ColumnCounter {
        type Output = usize;

        fn default_result(&mut self) -> usize {
            0
        }

        fn aggregate_result(&mut self, aggregate: usize, next: usize) -> usize {
            aggregate + next
        }

        fn visit_column(&mut self, _node: &ColumnRef) -> usize {
            1
        }
    }

    /// Renames every column called `old` to `new`.
    struct Rename;

    impl Transformer for Rename {
        fn transform_column<'a>(&mut self, node: &'a ColumnRef) -> Cow<'a, ColumnRef> {
            if node.name.value() == "old" {
                Cow::Owned(ColumnRef {
                    qualifier: node.qualifier.clone(),
                    name: Identifier::new("new").unwrap(),
                })
            } else {
                Cow::Borrowed(node)
            }
        }
    }

    #[test]
    fn test_aggregating_visitor() {
        let p = col("a").eq(col("b")).and(qcol("t", "c").is_null());
        assert_eq!(p.accept(&mut ColumnCounter), 3);
    }

    #[test]
    fn test_visitor_descends_into_subqueries() {
        let inner = SelectQuery::builder()
            .item(col("x"))
            .from(table("t"))
            .filter(col("y").gt(lit(1)))
            .build();
        let outer = SelectQuery::builder()
            .item(func("coalesce", vec![col("a"), Expr::from(Query::from(inner))]))
            .build();
        assert_eq!(outer.accept(&mut ColumnCounter), 3);
    }

    #[test]
    fn test_identity_returns_same_reference() {
        let q = SelectQuery::builder()
            .item(col("a").add(lit(1)))
            .from(table("t"))
            .filter(col("a").between(lit(1), lit(5)))
            .build();
        match q.rewrite(&mut IdentityTransformer) {
            Cow::Borrowed(r) => assert!(std::ptr::eq(r, &q)),
            Cow::Owned(_) => panic!("identity rewrite allocated"),
        }
    }

    #[test]
    fn test_rewrite_copies_only_changed_path() {
        let p = col("old").eq(lit(1)).and(col("keep").eq(lit(2)));
        let rewritten = p.rewrite(&mut Rename).into_owned();
        assert_eq!(rewritten, col("new").eq(lit(1)).and(col("keep").eq(lit(2))));
    }

    #[test]
    fn test_unchanged_rewrite_in_sibling_keeps_attributes() {
        let call = FunctionCall::new(QualifiedName::parse_dotted("sum").unwrap(), vec![col("old")])
            .distinct();
        let rewritten = call.rewrite(&mut Rename).into_owned();
        assert!(rewritten.distinct);
        assert_eq!(rewritten.args, FunctionArgs::List(vec![col("new")]));
    }
}
