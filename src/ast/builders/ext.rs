//! Extension traits for Expr and Predicate.

use crate::ast::{
    AliasedExpr, Arithmetic, ArithmeticOp, AtTimeZone, Between, Cast, Collate, ComparisonOp,
    Expr, Identifier, InPredicate, IsNull, Like, LogicalOp, Negate, Not, Predicate,
    QualifiedName, Query, Row, SelectItem, TypeName, ValueSet,
};

/// Fluent operators on expressions.
///
/// Comparisons return [`Predicate`]s, arithmetic returns [`Expr`]s.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn add(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Add, self.into_expr(), rhs.into())
    }

    fn sub(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Sub, self.into_expr(), rhs.into())
    }

    fn mul(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Mul, self.into_expr(), rhs.into())
    }

    fn div(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Div, self.into_expr(), rhs.into())
    }

    fn modulo(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Mod, self.into_expr(), rhs.into())
    }

    fn pow(self, rhs: impl Into<Expr>) -> Expr {
        arith(ArithmeticOp::Pow, self.into_expr(), rhs.into())
    }

    fn neg(self) -> Expr {
        Expr::Negate(Negate {
            operand: Box::new(self.into_expr()),
        })
    }

    fn eq(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Eq, rhs.into())
    }

    fn ne(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Ne, rhs.into())
    }

    fn lt(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Lt, rhs.into())
    }

    fn lte(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Lte, rhs.into())
    }

    fn gt(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Gt, rhs.into())
    }

    fn gte(self, rhs: impl Into<Expr>) -> Predicate {
        Predicate::compare(self.into_expr(), ComparisonOp::Gte, rhs.into())
    }

    fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Predicate {
        Predicate::Between(Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            symmetric: false,
        })
    }

    fn like(self, pattern: impl Into<Expr>) -> Predicate {
        Predicate::Like(Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            escape: None,
            negated: false,
        })
    }

    fn is_null(self) -> Predicate {
        Predicate::IsNull(IsNull {
            expr: Box::new(self.into_expr()),
            negated: false,
        })
    }

    fn is_not_null(self) -> Predicate {
        Predicate::IsNull(IsNull {
            expr: Box::new(self.into_expr()),
            negated: true,
        })
    }

    fn in_values<E: Into<Expr>>(self, values: impl IntoIterator<Item = E>) -> Predicate {
        let row = Row::new(values.into_iter().map(Into::into).collect());
        Predicate::In(InPredicate {
            expr: Box::new(self.into_expr()),
            values: ValueSet::Row(row),
            negated: false,
        })
    }

    fn in_subquery(self, query: impl Into<Query>) -> Predicate {
        Predicate::In(InPredicate {
            expr: Box::new(self.into_expr()),
            values: ValueSet::Subquery(Box::new(query.into())),
            negated: false,
        })
    }

    fn cast(self, type_name: TypeName) -> Expr {
        Expr::Cast(Cast {
            expr: Box::new(self.into_expr()),
            type_name,
        })
    }

    fn collate(self, collation: QualifiedName) -> Expr {
        Expr::Collate(Collate {
            expr: Box::new(self.into_expr()),
            collation,
        })
    }

    fn at_time_zone(self, zone: impl Into<Expr>) -> Expr {
        Expr::AtTimeZone(AtTimeZone {
            expr: Box::new(self.into_expr()),
            zone: Box::new(zone.into()),
        })
    }

    /// `expr AS alias` as a select-list entry.
    fn alias(self, alias: Identifier) -> SelectItem {
        SelectItem::Expr(AliasedExpr {
            expr: self.into_expr(),
            alias: Some(alias),
        })
    }
}

fn arith(op: ArithmeticOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Arithmetic(Arithmetic::new(op, lhs, rhs))
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl ExprExt for Predicate {
    fn into_expr(self) -> Expr {
        Expr::Predicate(Box::new(self))
    }
}

/// Boolean connectives on predicates.
pub trait PredicateExt: Sized {
    fn and(self, rhs: Predicate) -> Predicate;
    fn or(self, rhs: Predicate) -> Predicate;
    fn not(self) -> Predicate;
}

impl PredicateExt for Predicate {
    fn and(self, rhs: Predicate) -> Predicate {
        Predicate::logical(LogicalOp::And, self, rhs)
    }

    fn or(self, rhs: Predicate) -> Predicate {
        Predicate::logical(LogicalOp::Or, self, rhs)
    }

    fn not(self) -> Predicate {
        Predicate::Not(Not {
            inner: Box::new(self),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{col, lit};

    #[test]
    fn test_eq_builds_comparison() {
        let p = col("a").eq(lit(1));
        match p {
            Predicate::Comparison(c) => assert_eq!(c.op, ComparisonOp::Eq),
            other => panic!("expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_in_values_builds_row() {
        let p = col("a").in_values([1, 2, 3]);
        let values = p.as_in().map(|i| &i.values);
        assert_eq!(values.and_then(|v| v.as_row()).map(|r| r.items.len()), Some(3));
    }
}
