//! SQL values and their literal forms.
//!
//! A [`SqlValue`] is what a constant expression or a field setter carries.
//! On the parameterized path it becomes the value of a bound parameter; on
//! the inline path it is rendered as an escaped literal.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dialect::Dialect;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The static type of an expression or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    Char,
    String,
    DateTime,
    Guid,
    TimeSpan,
    Enum,
    Binary,
}

/// A signed duration with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TimeSpan {
    millis: i64,
}

impl TimeSpan {
    /// Creates a time span from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Creates a time span from hours, minutes and seconds.
    #[must_use]
    pub const fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self::from_millis(((hours * 60 + minutes) * 60 + seconds) * 1000)
    }

    /// Returns the total number of milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.millis
    }
}

impl From<TimeDelta> for TimeSpan {
    fn from(delta: TimeDelta) -> Self {
        Self::from_millis(delta.num_milliseconds())
    }
}

impl fmt::Display for TimeSpan {
    /// Formats as `[-][d.]hh:mm:ss[.fff]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let total = self.millis.unsigned_abs();
        let millis = total % 1000;
        let seconds = total / 1000 % 60;
        let minutes = total / 60_000 % 60;
        let hours = total / 3_600_000 % 24;
        let days = total / 86_400_000;
        f.write_str(sign)?;
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if millis > 0 {
            write!(f, ".{millis:03}")?;
        }
        Ok(())
    }
}

/// A numeric value accepted by numeric and increment setters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<Numeric> for SqlValue {
    fn from(value: Numeric) -> Self {
        match value {
            Numeric::Int(n) => Self::Int(n),
            Numeric::UInt(n) => Self::UInt(n),
            Numeric::Float(n) => Self::Float(n),
        }
    }
}

macro_rules! numeric_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

numeric_from!(Int: i8, i16, i32, i64);
numeric_from!(UInt: u8, u16, u32, u64);
numeric_from!(Float: f32, f64);

/// A SQL value that can be used as a constant or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Single character.
    Char(char),
    /// Text value.
    Text(String),
    /// Date and time without zone.
    DateTime(NaiveDateTime),
    /// GUID value.
    Guid(Uuid),
    /// Duration value.
    TimeSpan(TimeSpan),
    /// Enum member, stored through its underlying integer.
    Enum {
        /// Name of the enum type, kept for diagnostics.
        type_name: String,
        /// Underlying integer value.
        value: i64,
    },
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Creates an enum member value.
    #[must_use]
    pub fn enumeration(type_name: impl Into<String>, value: i64) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            value,
        }
    }

    /// Returns true for NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the static type of the value; NULL has none.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueType::Boolean),
            Self::Int(_) | Self::UInt(_) => Some(ValueType::Integer),
            Self::Float(_) => Some(ValueType::Float),
            Self::Char(_) => Some(ValueType::Char),
            Self::Text(_) => Some(ValueType::String),
            Self::DateTime(_) => Some(ValueType::DateTime),
            Self::Guid(_) => Some(ValueType::Guid),
            Self::TimeSpan(_) => Some(ValueType::TimeSpan),
            Self::Enum { .. } => Some(ValueType::Enum),
            Self::Blob(_) => Some(ValueType::Binary),
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: Prefer the parameterized rendering path for anything that
    /// reaches a database.
    #[must_use]
    pub fn to_sql_inline(&self, dialect: Dialect) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Self::Int(n) => n.to_string(),
            Self::UInt(n) => n.to_string(),
            Self::Float(f) => float_literal(*f),
            Self::Char(c) => dialect.string_literal(&c.to_string()),
            Self::Text(s) => dialect.string_literal(s),
            Self::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
            Self::Guid(g) => format!("'{:X}'", g.simple()),
            Self::TimeSpan(t) => format!("'{t}'"),
            Self::Enum { value, .. } => value.to_string(),
            Self::Blob(b) => dialect.blob_literal(b),
        }
    }

    /// Returns the value bound for this constant on the parameterized path.
    #[must_use]
    pub fn to_parameter_value(&self, dialect: Dialect) -> Self {
        match self {
            Self::Bool(b) => dialect.bool_parameter(*b),
            Self::Enum { value, .. } => Self::Int(*value),
            other => other.clone(),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Self::Guid(g) => write!(f, "{g}"),
            Self::TimeSpan(t) => write!(f, "{t}"),
            Self::Enum { type_name, value } => write!(f, "{type_name}({value})"),
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Non-finite floats have no numeric literal; they render as the quoted
/// names the databases parse back into floats.
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        String::from("'NaN'")
    } else if f.is_infinite() {
        String::from(if f.is_sign_positive() { "'Infinity'" } else { "'-Infinity'" })
    } else {
        f.to_string()
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! to_sql_value_via {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(self.into())
                }
            }
        )*
    };
}

to_sql_value_via!(Int: i8, i16, i32, i64, u8, u16, u32);
to_sql_value_via!(UInt: u64);
to_sql_value_via!(Float: f32, f64);

impl ToSqlValue for char {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Char(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for NaiveDate {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.and_time(chrono::NaiveTime::MIN))
    }
}

impl ToSqlValue for Uuid {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Guid(self)
    }
}

impl ToSqlValue for TimeSpan {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::TimeSpan(self)
    }
}

impl ToSqlValue for Numeric {
    fn to_sql_value(self) -> SqlValue {
        self.into()
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(value: &SqlValue) -> String {
        value.to_sql_inline(Dialect::PostgreSql)
    }

    #[test]
    fn test_inline_null_and_bool() {
        assert_eq!(inline(&SqlValue::Null), "NULL");
        assert_eq!(inline(&SqlValue::Bool(true)), "1");
        assert_eq!(inline(&SqlValue::Bool(false)), "0");
    }

    #[test]
    fn test_inline_text_escaping() {
        assert_eq!(inline(&SqlValue::Text(String::from("it's"))), "'it''s'");
        assert_eq!(inline(&SqlValue::Char('\'')), "''''");
    }

    #[test]
    fn test_sql_injection_prevention() {
        let value = SqlValue::Text(String::from("'; DROP TABLE users; --"));
        assert_eq!(inline(&value), "'''; DROP TABLE users; --'");
    }

    #[test]
    fn test_mysql_backslash_cannot_close_literal() {
        let value = SqlValue::Text(String::from("\\'; DROP TABLE users; --"));
        assert_eq!(
            value.to_sql_inline(Dialect::MySql),
            "'\\\\''; DROP TABLE users; --'"
        );
        assert_eq!(inline(&value), "'\\''; DROP TABLE users; --'");
    }

    #[test]
    fn test_inline_non_finite_floats() {
        assert_eq!(inline(&SqlValue::Float(2.5)), "2.5");
        assert_eq!(inline(&SqlValue::Float(f64::NAN)), "'NaN'");
        assert_eq!(inline(&SqlValue::Float(f64::INFINITY)), "'Infinity'");
        assert_eq!(inline(&SqlValue::Float(f64::NEG_INFINITY)), "'-Infinity'");
    }

    #[test]
    fn test_inline_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 1))
            .unwrap();
        assert_eq!(inline(&dt.to_sql_value()), "'2024-03-09 07:05:01'");
    }

    #[test]
    fn test_inline_guid_upper_without_dashes() {
        let guid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            inline(&SqlValue::Guid(guid)),
            "'67E5504410B1426F9247BB680E5FE0C8'"
        );
    }

    #[test]
    fn test_inline_enum_uses_underlying_value() {
        assert_eq!(inline(&SqlValue::enumeration("Status", 3)), "3");
    }

    #[test]
    fn test_inline_blob_per_dialect() {
        let blob = SqlValue::Blob(vec![0x48, 0x49]);
        assert_eq!(blob.to_sql_inline(Dialect::SqlServer), "0x4849");
        assert_eq!(blob.to_sql_inline(Dialect::Sqlite), "X'4849'");
    }

    #[test]
    fn test_time_span_display() {
        assert_eq!(TimeSpan::from_hms(1, 2, 3).to_string(), "01:02:03");
        assert_eq!(TimeSpan::from_hms(49, 0, 0).to_string(), "2.01:00:00");
        assert_eq!(TimeSpan::from_millis(-1500).to_string(), "-00:00:01.500");
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(SqlValue::Bool(false).as_bool(), Some(false));
        assert_eq!(SqlValue::Int(1).as_bool(), None);
    }

    #[test]
    fn test_parameter_values() {
        assert_eq!(
            SqlValue::Bool(true).to_parameter_value(Dialect::SqlServer),
            SqlValue::Int(1)
        );
        assert_eq!(
            SqlValue::Bool(true).to_parameter_value(Dialect::MySql),
            SqlValue::Bool(true)
        );
        assert_eq!(
            SqlValue::enumeration("Status", 2).to_parameter_value(Dialect::Oracle),
            SqlValue::Int(2)
        );
    }

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(7_u64.to_sql_value(), SqlValue::UInt(7));
        assert_eq!('x'.to_sql_value(), SqlValue::Char('x'));
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Numeric::from(2.5_f32).to_sql_value(), SqlValue::Float(2.5));
    }
}
