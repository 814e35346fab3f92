use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Identifier, OrderBy};

/// PARTITION BY a, b
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionBy {
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameUnit {
    Rows,
    Range,
    Groups,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundSpec {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

/// ROWS|RANGE|GROUPS bound, or ... BETWEEN start AND end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameSpec {
    Single { unit: FrameUnit, bound: BoundSpec },
    Between {
        unit: FrameUnit,
        start: BoundSpec,
        end: BoundSpec,
    },
}

impl FrameSpec {
    pub fn unit(&self) -> FrameUnit {
        match self {
            FrameSpec::Single { unit, .. } | FrameSpec::Between { unit, .. } => *unit,
        }
    }
}

/// EXCLUDE clause of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameExclusion {
    CurrentRow,
    Group,
    Ties,
    NoOthers,
}

/// Inline window definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct WindowSpec {
    pub partition_by: Option<PartitionBy>,
    pub order_by: Option<OrderBy>,
    pub frame: Option<FrameSpec>,
    pub exclude: Option<FrameExclusion>,
}

/// OVER target: a named window or an inline definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverSpec {
    Ref(Identifier),
    Def(WindowSpec),
}

/// WINDOW name AS (spec)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowDef {
    pub name: Identifier,
    pub spec: WindowSpec,
}
