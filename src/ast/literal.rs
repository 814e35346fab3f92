use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SqlError, SqlResult};

/// A typed literal value.
///
/// Literals double as bind values: in Bind mode they are lifted out of the
/// tree into [`crate::render::BindParam`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Exact numeric
    Decimal(Decimal),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// INTERVAL '1 day'
    Interval(String),
    /// B'0101'
    BitString(BitString),
    /// X'CAFE'
    HexString(HexString),
    /// E'line\nbreak'
    EscapeString(String),
    /// $tag$body$tag$
    DollarString(DollarString),
}

impl Literal {
    pub fn interval(text: impl Into<String>) -> SqlResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SqlError::invalid("interval literal must not be blank"));
        }
        Ok(Self::Interval(text))
    }

    pub fn bit_string(bits: impl Into<String>) -> SqlResult<Self> {
        BitString::new(bits).map(Self::BitString)
    }

    pub fn hex_string(hex: impl Into<String>) -> SqlResult<Self> {
        HexString::new(hex).map(Self::HexString)
    }

    pub fn escape_string(text: impl Into<String>) -> Self {
        Self::EscapeString(text.into())
    }

    pub fn dollar_string(tag: Option<&str>, body: impl Into<String>) -> SqlResult<Self> {
        DollarString::new(tag, body).map(Self::DollarString)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Bit string payload, restricted to `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitString(String);

impl BitString {
    pub fn new(bits: impl Into<String>) -> SqlResult<Self> {
        let bits = bits.into();
        if !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(SqlError::invalid(format!(
                "bit string may only contain 0 and 1: '{}'",
                bits
            )));
        }
        Ok(Self(bits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BitString {
    type Error = SqlError;

    fn try_from(bits: String) -> SqlResult<Self> {
        Self::new(bits)
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.0
    }
}

/// Hex string payload, restricted to hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexString(String);

impl HexString {
    pub fn new(hex: impl Into<String>) -> SqlResult<Self> {
        let hex = hex.into();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SqlError::invalid(format!(
                "hex string may only contain hexadecimal digits: '{}'",
                hex
            )));
        }
        Ok(Self(hex))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexString {
    type Error = SqlError;

    fn try_from(hex: String) -> SqlResult<Self> {
        Self::new(hex)
    }
}

impl From<HexString> for String {
    fn from(hex: HexString) -> Self {
        hex.0
    }
}

/// Dollar-quoted string. The body may not contain its own delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDollarString")]
pub struct DollarString {
    tag: Option<String>,
    body: String,
}

#[derive(Deserialize)]
struct RawDollarString {
    tag: Option<String>,
    body: String,
}

impl TryFrom<RawDollarString> for DollarString {
    type Error = SqlError;

    fn try_from(raw: RawDollarString) -> SqlResult<Self> {
        Self::new(raw.tag.as_deref(), raw.body)
    }
}

impl DollarString {
    pub fn new(tag: Option<&str>, body: impl Into<String>) -> SqlResult<Self> {
        let body = body.into();
        if let Some(tag) = tag
            && (tag.is_empty()
                || tag.starts_with(|c: char| c.is_ascii_digit())
                || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(SqlError::invalid(format!("invalid dollar quote tag: '{}'", tag)));
        }
        let string = Self {
            tag: tag.map(str::to_string),
            body,
        };
        if string.body.contains(&string.delimiter()) {
            return Err(SqlError::invalid(
                "dollar string body contains its own delimiter",
            ));
        }
        Ok(string)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// `$tag$` (or `$$` when untagged).
    pub fn delimiter(&self) -> String {
        format!("${}$", self.tag.as_deref().unwrap_or(""))
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Integer(n as i64)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(n)
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Literal::Integer(n as i64)
    }
}

impl From<Decimal> for Literal {
    fn from(n: Decimal) -> Self {
        Literal::Decimal(n)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<NaiveDate> for Literal {
    fn from(d: NaiveDate) -> Self {
        Literal::Date(d)
    }
}

impl From<NaiveTime> for Literal {
    fn from(t: NaiveTime) -> Self {
        Literal::Time(t)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(ts: NaiveDateTime) -> Self {
        Literal::Timestamp(ts)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Literal::Null,
        }
    }
}

impl TryFrom<f64> for Literal {
    type Error = SqlError;

    fn try_from(n: f64) -> SqlResult<Self> {
        Decimal::try_from(n)
            .map(Literal::Decimal)
            .map_err(|e| SqlError::invalid(format!("cannot convert {} to a decimal: {}", n, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_and_hex_validation() {
        assert!(Literal::bit_string("0101").is_ok());
        assert!(Literal::bit_string("012").is_err());
        assert!(Literal::hex_string("CAFE01").is_ok());
        assert!(Literal::hex_string("XYZ").is_err());
    }

    #[test]
    fn test_dollar_string_delimiter() {
        let s = DollarString::new(Some("fn"), "select 1").unwrap();
        assert_eq!(s.delimiter(), "$fn$");
        assert!(DollarString::new(None, "a $$ b").is_err());
        assert!(DollarString::new(Some("1x"), "body").is_err());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Literal::from(5), Literal::Integer(5));
        assert_eq!(Literal::from("x"), Literal::String("x".into()));
        assert_eq!(Literal::from(None::<i64>), Literal::Null);
        assert!(Literal::try_from(1.5f64).is_ok());
    }
}
