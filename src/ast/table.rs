use serde::{Deserialize, Serialize};

use crate::ast::{FunctionCall, Identifier, Query, RowList};

/// `AS alias (col1, col2)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableAlias {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
}

impl TableAlias {
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            columns: vec![],
        }
    }

    pub fn with_columns(mut self, columns: Vec<Identifier>) -> Self {
        self.columns = columns;
        self
    }
}

/// Inheritance modifier of a named table.
///
/// `ONLY t` and `t *` cannot be combined, so they share one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Inheritance {
    #[default]
    Default,
    /// ONLY t
    Only,
    /// t *
    WithDescendants,
}

/// Anything that can appear in FROM or as a join target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRef {
    Named(NamedTable),
    Subquery(SubqueryTable),
    Values(ValuesTable),
    Function(FunctionTable),
    Lateral(LateralTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedTable {
    pub schema: Option<Identifier>,
    pub name: Identifier,
    pub alias: Option<TableAlias>,
    pub inheritance: Inheritance,
}

impl NamedTable {
    pub fn new(name: Identifier) -> Self {
        Self {
            schema: None,
            name,
            alias: None,
            inheritance: Inheritance::Default,
        }
    }

    pub fn in_schema(mut self, schema: Identifier) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn alias(mut self, alias: TableAlias) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn only(mut self) -> Self {
        self.inheritance = Inheritance::Only;
        self
    }

    pub fn with_descendants(mut self) -> Self {
        self.inheritance = Inheritance::WithDescendants;
        self
    }
}

/// (SELECT ...) AS alias
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubqueryTable {
    pub query: Box<Query>,
    pub alias: Option<TableAlias>,
}

/// (VALUES (1, 'a'), (2, 'b')) AS alias (id, name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValuesTable {
    pub rows: RowList,
    pub alias: Option<TableAlias>,
}

/// generate_series(1, 10) AS g (n)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionTable {
    pub function: FunctionCall,
    pub alias: Option<TableAlias>,
}

/// LATERAL wrapper around any other table reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LateralTable {
    pub inner: Box<TableRef>,
}

impl TableRef {
    pub fn subquery(query: Query, alias: Option<TableAlias>) -> Self {
        TableRef::Subquery(SubqueryTable {
            query: Box::new(query),
            alias,
        })
    }

    pub fn values(rows: RowList, alias: Option<TableAlias>) -> Self {
        TableRef::Values(ValuesTable { rows, alias })
    }

    pub fn function(function: FunctionCall, alias: Option<TableAlias>) -> Self {
        TableRef::Function(FunctionTable { function, alias })
    }

    pub fn lateral(self) -> Self {
        TableRef::Lateral(LateralTable {
            inner: Box::new(self),
        })
    }
}

impl From<NamedTable> for TableRef {
    fn from(table: NamedTable) -> Self {
        TableRef::Named(table)
    }
}
