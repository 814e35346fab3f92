use serde::{Deserialize, Serialize};

use crate::ast::QualifiedName;
use crate::error::{SqlError, SqlResult};

/// Row lock strength for `FOR ...` clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockMode {
    Update,
    Share,
    NoKeyUpdate,
    KeyShare,
}

/// FOR UPDATE [OF t, ...] [NOWAIT | SKIP LOCKED]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLockingClause")]
pub struct LockingClause {
    mode: LockMode,
    of_tables: Vec<QualifiedName>,
    nowait: bool,
    skip_locked: bool,
}

#[derive(Deserialize)]
struct RawLockingClause {
    mode: LockMode,
    #[serde(default)]
    of_tables: Vec<QualifiedName>,
    #[serde(default)]
    nowait: bool,
    #[serde(default)]
    skip_locked: bool,
}

impl TryFrom<RawLockingClause> for LockingClause {
    type Error = SqlError;

    fn try_from(raw: RawLockingClause) -> SqlResult<Self> {
        Self::new(raw.mode, raw.of_tables, raw.nowait, raw.skip_locked)
    }
}

impl LockingClause {
    /// `nowait` and `skip_locked` are mutually exclusive.
    pub fn new(
        mode: LockMode,
        of_tables: Vec<QualifiedName>,
        nowait: bool,
        skip_locked: bool,
    ) -> SqlResult<Self> {
        if nowait && skip_locked {
            return Err(SqlError::invalid(
                "NOWAIT and SKIP LOCKED are mutually exclusive",
            ));
        }
        Ok(Self {
            mode,
            of_tables,
            nowait,
            skip_locked,
        })
    }

    pub fn for_update() -> Self {
        Self {
            mode: LockMode::Update,
            of_tables: vec![],
            nowait: false,
            skip_locked: false,
        }
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn of_tables(&self) -> &[QualifiedName] {
        &self.of_tables
    }

    pub fn nowait(&self) -> bool {
        self.nowait
    }

    pub fn skip_locked(&self) -> bool {
        self.skip_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nowait_and_skip_locked_are_exclusive() {
        let err = LockingClause::new(LockMode::Update, vec![], true, true).unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
        assert!(LockingClause::new(LockMode::Share, vec![], true, false).is_ok());
        assert!(LockingClause::new(LockMode::Share, vec![], false, true).is_ok());
    }

    #[test]
    fn test_defaults_to_no_tables() {
        let lock = LockingClause::for_update();
        assert!(lock.of_tables().is_empty());
        assert_eq!(lock.mode(), LockMode::Update);
    }
}
