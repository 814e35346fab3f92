use serde::{Deserialize, Serialize};

use crate::ast::{Identifier, Predicate, TableRef};
use crate::error::{SqlError, SqlResult};

/// Join type for qualified joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

/// A join attached to the FROM item of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Join {
    Cross(CrossJoin),
    Natural(NaturalJoin),
    Using(UsingJoin),
    On(OnJoin),
}

/// CROSS JOIN t
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossJoin {
    pub table: TableRef,
}

/// NATURAL JOIN t
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NaturalJoin {
    pub table: TableRef,
}

/// kind JOIN t USING (a, b)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUsingJoin")]
pub struct UsingJoin {
    kind: JoinKind,
    table: TableRef,
    columns: Vec<Identifier>,
}

#[derive(Deserialize)]
struct RawUsingJoin {
    kind: JoinKind,
    table: TableRef,
    columns: Vec<Identifier>,
}

impl TryFrom<RawUsingJoin> for UsingJoin {
    type Error = SqlError;

    fn try_from(raw: RawUsingJoin) -> SqlResult<Self> {
        Self::new(raw.kind, raw.table, raw.columns)
    }
}

impl UsingJoin {
    pub fn new(kind: JoinKind, table: TableRef, columns: Vec<Identifier>) -> SqlResult<Self> {
        if columns.is_empty() {
            return Err(SqlError::invalid("USING requires at least one column"));
        }
        Ok(Self {
            kind,
            table,
            columns,
        })
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    pub(crate) fn with_table(&self, table: TableRef) -> Self {
        Self {
            kind: self.kind,
            table,
            columns: self.columns.clone(),
        }
    }
}

/// kind JOIN t ON predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnJoin {
    pub kind: JoinKind,
    pub table: TableRef,
    pub on: Predicate,
}

impl Join {
    pub fn cross(table: impl Into<TableRef>) -> Self {
        Join::Cross(CrossJoin {
            table: table.into(),
        })
    }

    pub fn natural(table: impl Into<TableRef>) -> Self {
        Join::Natural(NaturalJoin {
            table: table.into(),
        })
    }

    pub fn on(kind: JoinKind, table: impl Into<TableRef>, on: Predicate) -> Self {
        Join::On(OnJoin {
            kind,
            table: table.into(),
            on,
        })
    }

    pub fn using(kind: JoinKind, table: impl Into<TableRef>, columns: Vec<Identifier>) -> SqlResult<Self> {
        UsingJoin::new(kind, table.into(), columns).map(Join::Using)
    }

    /// The joined table, whatever the join form.
    pub fn table(&self) -> &TableRef {
        match self {
            Join::Cross(j) => &j.table,
            Join::Natural(j) => &j.table,
            Join::Using(j) => &j.table,
            Join::On(j) => &j.table,
        }
    }
}
