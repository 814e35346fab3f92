use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Query, ValueSet};

/// A boolean-valued condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Comparison(Comparison),
    Between(Between),
    Like(Like),
    IsNull(IsNull),
    IsDistinctFrom(IsDistinctFrom),
    In(InPredicate),
    Exists(Exists),
    Quantified(QuantifiedComparison),
    /// A bare boolean expression used as a condition.
    Unary(UnaryPredicate),
    Not(Not),
    Logical(Logical),
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// =
    Eq,
    /// <>
    Ne,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub lhs: Box<Expr>,
    pub op: ComparisonOp,
    pub rhs: Box<Expr>,
}

/// expr BETWEEN [SYMMETRIC] low AND high
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Between {
    pub expr: Box<Expr>,
    pub low: Box<Expr>,
    pub high: Box<Expr>,
    pub symmetric: bool,
}

/// expr [NOT] LIKE pattern [ESCAPE escape]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,
    pub escape: Option<Box<Expr>>,
    pub negated: bool,
}

/// expr IS [NOT] NULL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsNull {
    pub expr: Box<Expr>,
    pub negated: bool,
}

/// lhs IS [NOT] DISTINCT FROM rhs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsDistinctFrom {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub negated: bool,
}

/// expr [NOT] IN (values | subquery)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InPredicate {
    pub expr: Box<Expr>,
    pub values: ValueSet,
    pub negated: bool,
}

/// [NOT] EXISTS (subquery)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exists {
    pub query: Box<Query>,
    pub negated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Any,
    All,
}

/// lhs op ANY|ALL (subquery)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantifiedComparison {
    pub lhs: Box<Expr>,
    pub op: ComparisonOp,
    pub quantifier: Quantifier,
    pub query: Box<Query>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnaryPredicate {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Not {
    pub inner: Box<Predicate>,
}

/// Logical connective between conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// lhs AND|OR rhs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Logical {
    pub op: LogicalOp,
    pub lhs: Box<Predicate>,
    pub rhs: Box<Predicate>,
}

impl Predicate {
    pub fn compare(lhs: Expr, op: ComparisonOp, rhs: Expr) -> Self {
        Predicate::Comparison(Comparison {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    pub fn exists(query: Query) -> Self {
        Predicate::Exists(Exists {
            query: Box::new(query),
            negated: false,
        })
    }

    pub fn not_exists(query: Query) -> Self {
        Predicate::Exists(Exists {
            query: Box::new(query),
            negated: true,
        })
    }

    pub fn quantified(lhs: Expr, op: ComparisonOp, quantifier: Quantifier, query: Query) -> Self {
        Predicate::Quantified(QuantifiedComparison {
            lhs: Box::new(lhs),
            op,
            quantifier,
            query: Box::new(query),
        })
    }

    /// Wrap any expression as a condition. A wrapped predicate is unwrapped
    /// instead of nesting.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Predicate(p) => *p,
            other => Predicate::Unary(UnaryPredicate {
                expr: Box::new(other),
            }),
        }
    }

    pub fn logical(op: LogicalOp, lhs: Predicate, rhs: Predicate) -> Self {
        Predicate::Logical(Logical {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Fold conditions with AND; `None` for an empty list.
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        predicates
            .into_iter()
            .reduce(|acc, next| Predicate::logical(LogicalOp::And, acc, next))
    }

    /// Fold conditions with OR; `None` for an empty list.
    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        predicates
            .into_iter()
            .reduce(|acc, next| Predicate::logical(LogicalOp::Or, acc, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    #[test]
    fn test_from_expr_unwraps_predicate() {
        let p = Predicate::compare(
            Expr::Literal(Literal::Integer(1)),
            ComparisonOp::Eq,
            Expr::Literal(Literal::Integer(1)),
        );
        assert_eq!(Predicate::from_expr(Expr::from(p.clone())), p);
    }

    #[test]
    fn test_all_folds_left() {
        let t = || Predicate::from_expr(Expr::Literal(Literal::Boolean(true)));
        let folded = Predicate::all(vec![t(), t(), t()]).unwrap();
        match folded {
            Predicate::Logical(l) => {
                assert_eq!(l.op, LogicalOp::And);
                assert!(matches!(*l.lhs, Predicate::Logical(_)));
            }
            other => panic!("expected AND, got {:?}", other),
        }
        assert!(Predicate::all(vec![]).is_none());
    }
}
