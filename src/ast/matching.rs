//! Typed variant accessors for the AST sum types.
//!
//! `match` is the primary way to fold over a node; these helpers cover the
//! common "is it an X, and if so give me the X" case without a full match.

use crate::ast::*;

macro_rules! variant_accessors {
    ($enum:ident { $($variant:ident => $is:ident, $as:ident: $ty:ty;)* }) => {
        impl $enum {
            $(
                pub fn $is(&self) -> bool {
                    matches!(self, $enum::$variant(..))
                }

                pub fn $as(&self) -> Option<&$ty> {
                    match self {
                        $enum::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )*
        }
    };
}

variant_accessors!(Expr {
    Literal => is_literal, as_literal: Literal;
    Column => is_column, as_column: ColumnRef;
    Param => is_param, as_param: Param;
    Function => is_function, as_function: FunctionCall;
    Case => is_case, as_case: CaseExpr;
    Arithmetic => is_arithmetic, as_arithmetic: Arithmetic;
    Negate => is_negate, as_negate: Negate;
    CustomBinary => is_custom_binary, as_custom_binary: CustomBinary;
    CustomUnary => is_custom_unary, as_custom_unary: CustomUnary;
    Cast => is_cast, as_cast: Cast;
    Array => is_array, as_array: ArrayLiteral;
    Row => is_row, as_row: Row;
    RowList => is_row_list, as_row_list: RowList;
    Subquery => is_subquery, as_subquery: SubqueryExpr;
    Collate => is_collate, as_collate: Collate;
    AtTimeZone => is_at_time_zone, as_at_time_zone: AtTimeZone;
});

impl Expr {
    pub fn is_predicate(&self) -> bool {
        matches!(self, Expr::Predicate(_))
    }

    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Expr::Predicate(p) => Some(p.as_ref()),
            _ => None,
        }
    }
}

variant_accessors!(Predicate {
    Comparison => is_comparison, as_comparison: Comparison;
    Between => is_between, as_between: Between;
    Like => is_like, as_like: Like;
    IsNull => is_is_null, as_is_null: IsNull;
    IsDistinctFrom => is_distinct_from, as_distinct_from: IsDistinctFrom;
    In => is_in, as_in: InPredicate;
    Exists => is_exists, as_exists: Exists;
    Quantified => is_quantified, as_quantified: QuantifiedComparison;
    Unary => is_unary, as_unary: UnaryPredicate;
    Not => is_not, as_not: Not;
    Logical => is_logical, as_logical: Logical;
});

variant_accessors!(Query {
    Select => is_select, as_select: SelectQuery;
    Composite => is_composite, as_composite: CompositeQuery;
    With => is_with, as_with: WithQuery;
});

variant_accessors!(TableRef {
    Named => is_named, as_named: NamedTable;
    Subquery => is_subquery, as_subquery: SubqueryTable;
    Values => is_values, as_values: ValuesTable;
    Function => is_function, as_function: FunctionTable;
    Lateral => is_lateral, as_lateral: LateralTable;
});

variant_accessors!(Join {
    Cross => is_cross, as_cross: CrossJoin;
    Natural => is_natural, as_natural: NaturalJoin;
    Using => is_using, as_using: UsingJoin;
    On => is_on, as_on: OnJoin;
});

variant_accessors!(SelectItem {
    Expr => is_expr, as_expr: AliasedExpr;
    QualifiedStar => is_qualified_star, as_qualified_star: QualifiedName;
});

impl SelectItem {
    pub fn is_star(&self) -> bool {
        matches!(self, SelectItem::Star)
    }
}

impl ValueSet {
    pub fn as_subquery(&self) -> Option<&Query> {
        match self {
            ValueSet::Subquery(q) => Some(q.as_ref()),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&Row> {
        match self {
            ValueSet::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_row_list(&self) -> Option<&RowList> {
        match self {
            ValueSet::RowList(rows) => Some(rows),
            _ => None,
        }
    }
}

variant_accessors!(OverSpec {
    Ref => is_ref, as_ref_name: Identifier;
    Def => is_def, as_def: WindowSpec;
});

impl BoundSpec {
    /// Offset expression of `n PRECEDING` / `n FOLLOWING`.
    pub fn offset(&self) -> Option<&Expr> {
        match self {
            BoundSpec::Preceding(e) | BoundSpec::Following(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(
            self,
            BoundSpec::UnboundedPreceding | BoundSpec::UnboundedFollowing
        )
    }
}

impl FrameSpec {
    pub fn is_between(&self) -> bool {
        matches!(self, FrameSpec::Between { .. })
    }

    /// Start and end bounds; a single-bound frame ends at CURRENT ROW.
    pub fn bounds(&self) -> (&BoundSpec, Option<&BoundSpec>) {
        match self {
            FrameSpec::Single { bound, .. } => (bound, None),
            FrameSpec::Between { start, end, .. } => (start, Some(end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_accessors() {
        let e = Expr::Literal(Literal::Integer(1));
        assert!(e.is_literal());
        assert_eq!(e.as_literal(), Some(&Literal::Integer(1)));
        assert!(e.as_column().is_none());
    }

    #[test]
    fn test_predicate_accessor_unboxes() {
        let p = Predicate::from_expr(Expr::Literal(Literal::Boolean(true)));
        let e = Expr::from(p.clone());
        assert_eq!(e.as_predicate(), Some(&p));
        assert!(p.is_unary());
    }

    #[test]
    fn test_frame_bounds() {
        let frame = FrameSpec::Single {
            unit: FrameUnit::Rows,
            bound: BoundSpec::UnboundedPreceding,
        };
        assert!(!frame.is_between());
        assert!(frame.bounds().0.is_unbounded());
    }
}
