//! Optional SQL constructs and per-dialect capability sets.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named optional construct a dialect may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlFeature {
    CustomOperator,
    DistinctOn,
    Lateral,
    LockShare,
    LockNoKeyUpdate,
    LockKeyShare,
    LockNowait,
    LockSkipLocked,
    AtTimeZone,
    ArrayLiteral,
    Exponentiation,
    DollarStringLiteral,
    EscapeStringLiteral,
    BitStringLiteral,
    HexStringLiteral,
    ArrayTypeName,
    TimeZoneTypeName,
    TableInheritance,
    FilterClause,
    WithinGroup,
    MaterializedCte,
    GroupsFrame,
    FrameExclusion,
    SymmetricBetween,
    IsDistinctFrom,
}

impl SqlFeature {
    pub const ALL: &'static [SqlFeature] = &[
        SqlFeature::CustomOperator,
        SqlFeature::DistinctOn,
        SqlFeature::Lateral,
        SqlFeature::LockShare,
        SqlFeature::LockNoKeyUpdate,
        SqlFeature::LockKeyShare,
        SqlFeature::LockNowait,
        SqlFeature::LockSkipLocked,
        SqlFeature::AtTimeZone,
        SqlFeature::ArrayLiteral,
        SqlFeature::Exponentiation,
        SqlFeature::DollarStringLiteral,
        SqlFeature::EscapeStringLiteral,
        SqlFeature::BitStringLiteral,
        SqlFeature::HexStringLiteral,
        SqlFeature::ArrayTypeName,
        SqlFeature::TimeZoneTypeName,
        SqlFeature::TableInheritance,
        SqlFeature::FilterClause,
        SqlFeature::WithinGroup,
        SqlFeature::MaterializedCte,
        SqlFeature::GroupsFrame,
        SqlFeature::FrameExclusion,
        SqlFeature::SymmetricBetween,
        SqlFeature::IsDistinctFrom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SqlFeature::CustomOperator => "CUSTOM_OPERATOR",
            SqlFeature::DistinctOn => "DISTINCT_ON",
            SqlFeature::Lateral => "LATERAL",
            SqlFeature::LockShare => "LOCK_SHARE",
            SqlFeature::LockNoKeyUpdate => "LOCK_NO_KEY_UPDATE",
            SqlFeature::LockKeyShare => "LOCK_KEY_SHARE",
            SqlFeature::LockNowait => "LOCK_NOWAIT",
            SqlFeature::LockSkipLocked => "LOCK_SKIP_LOCKED",
            SqlFeature::AtTimeZone => "AT_TIME_ZONE",
            SqlFeature::ArrayLiteral => "ARRAY_LITERAL",
            SqlFeature::Exponentiation => "EXPONENTIATION",
            SqlFeature::DollarStringLiteral => "DOLLAR_STRING_LITERAL",
            SqlFeature::EscapeStringLiteral => "ESCAPE_STRING_LITERAL",
            SqlFeature::BitStringLiteral => "BIT_STRING_LITERAL",
            SqlFeature::HexStringLiteral => "HEX_STRING_LITERAL",
            SqlFeature::ArrayTypeName => "ARRAY_TYPE_NAME",
            SqlFeature::TimeZoneTypeName => "TIME_ZONE_TYPE_NAME",
            SqlFeature::TableInheritance => "TABLE_INHERITANCE",
            SqlFeature::FilterClause => "FILTER_CLAUSE",
            SqlFeature::WithinGroup => "WITHIN_GROUP",
            SqlFeature::MaterializedCte => "MATERIALIZED_CTE",
            SqlFeature::GroupsFrame => "GROUPS_FRAME",
            SqlFeature::FrameExclusion => "FRAME_EXCLUSION",
            SqlFeature::SymmetricBetween => "SYMMETRIC_BETWEEN",
            SqlFeature::IsDistinctFrom => "IS_DISTINCT_FROM",
        }
    }
}

impl fmt::Display for SqlFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of optional constructs a dialect accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialectCapabilities {
    features: HashSet<SqlFeature>,
}

impl DialectCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            features: SqlFeature::ALL.iter().copied().collect(),
        }
    }

    /// What the reference ANSI dialect accepts.
    pub fn ansi() -> Self {
        Self::none()
            .with(SqlFeature::Lateral)
            .with(SqlFeature::AtTimeZone)
            .with(SqlFeature::ArrayLiteral)
            .with(SqlFeature::BitStringLiteral)
            .with(SqlFeature::HexStringLiteral)
            .with(SqlFeature::ArrayTypeName)
            .with(SqlFeature::TimeZoneTypeName)
            .with(SqlFeature::FilterClause)
            .with(SqlFeature::WithinGroup)
            .with(SqlFeature::GroupsFrame)
            .with(SqlFeature::FrameExclusion)
            .with(SqlFeature::SymmetricBetween)
            .with(SqlFeature::IsDistinctFrom)
    }

    pub fn with(mut self, feature: SqlFeature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn without(mut self, feature: SqlFeature) -> Self {
        self.features.remove(&feature);
        self
    }

    pub fn supports(&self, feature: SqlFeature) -> bool {
        self.features.contains(&feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_capabilities() {
        let caps = DialectCapabilities::ansi();
        assert!(caps.supports(SqlFeature::Lateral));
        assert!(!caps.supports(SqlFeature::DistinctOn));
        assert!(!caps.supports(SqlFeature::LockSkipLocked));
        assert!(!caps.supports(SqlFeature::CustomOperator));
    }

    #[test]
    fn test_with_and_without() {
        let caps = DialectCapabilities::none().with(SqlFeature::DistinctOn);
        assert!(caps.supports(SqlFeature::DistinctOn));
        assert!(!caps.without(SqlFeature::DistinctOn).supports(SqlFeature::DistinctOn));
        assert_eq!(SqlFeature::ALL.len(), 25);
    }
}
