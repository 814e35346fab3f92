use serde::{Deserialize, Serialize};

use crate::ast::{Query, Row, RowList};

/// Right-hand side of `IN` and quantified comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueSet {
    Subquery(Box<Query>),
    /// x IN (1, 2, 3)
    Row(Row),
    /// (a, b) IN ((1, 2), (3, 4))
    RowList(RowList),
}

impl From<Query> for ValueSet {
    fn from(query: Query) -> Self {
        ValueSet::Subquery(Box::new(query))
    }
}

impl From<Row> for ValueSet {
    fn from(row: Row) -> Self {
        ValueSet::Row(row)
    }
}

impl From<RowList> for ValueSet {
    fn from(rows: RowList) -> Self {
        ValueSet::RowList(rows)
    }
}
