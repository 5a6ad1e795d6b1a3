//! Column assignments used by INSERT and UPDATE.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expression::Expression;
use super::field::Field;
use crate::error::Result;
use crate::value::{Numeric, SqlValue, TimeSpan};

/// The value a setter writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetterValue {
    Bool(bool),
    Char(char),
    /// Written as NULL outside the configured datetime range.
    DateTime(NaiveDateTime),
    Guid(Uuid),
    Numeric(Numeric),
    String(String),
    TimeSpan(TimeSpan),
    /// Adds an amount to the current column value.
    Increment(Numeric),
    Null,
    /// Any expression, rendered as-is.
    Expression(Expression),
}

impl SetterValue {
    /// Returns the constant written by a value setter.
    ///
    /// `None` for setters whose right-hand side is not a plain constant.
    #[must_use]
    pub fn as_constant(&self) -> Option<SqlValue> {
        let value = match self {
            Self::Bool(b) => SqlValue::Bool(*b),
            Self::Char(c) => SqlValue::Char(*c),
            Self::DateTime(dt) => SqlValue::DateTime(*dt),
            Self::Guid(g) => SqlValue::Guid(*g),
            Self::Numeric(n) => SqlValue::from(*n),
            Self::String(s) => SqlValue::Text(s.clone()),
            Self::TimeSpan(t) => SqlValue::TimeSpan(*t),
            Self::Null => SqlValue::Null,
            Self::Increment(_) | Self::Expression(_) => return None,
        };
        Some(value)
    }
}

/// Assigns a value to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSetter {
    column: Field,
    /// Assigned value.
    pub value: SetterValue,
}

impl FieldSetter {
    /// Creates a setter for a column.
    ///
    /// The column name follows the rules of [`Field::new`].
    pub fn new(column: impl Into<String>, value: SetterValue) -> Result<Self> {
        Ok(Self {
            column: Field::new(column)?,
            value,
        })
    }

    /// Creates a boolean setter.
    pub fn bool(column: impl Into<String>, value: bool) -> Result<Self> {
        Self::new(column, SetterValue::Bool(value))
    }

    /// Creates a character setter.
    pub fn char(column: impl Into<String>, value: char) -> Result<Self> {
        Self::new(column, SetterValue::Char(value))
    }

    /// Creates a datetime setter.
    pub fn datetime(column: impl Into<String>, value: NaiveDateTime) -> Result<Self> {
        Self::new(column, SetterValue::DateTime(value))
    }

    /// Creates a GUID setter.
    pub fn guid(column: impl Into<String>, value: Uuid) -> Result<Self> {
        Self::new(column, SetterValue::Guid(value))
    }

    /// Creates a numeric setter.
    pub fn numeric(column: impl Into<String>, value: impl Into<Numeric>) -> Result<Self> {
        Self::new(column, SetterValue::Numeric(value.into()))
    }

    /// Creates a string setter.
    pub fn string(column: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new(column, SetterValue::String(value.into()))
    }

    /// Creates a time span setter.
    pub fn time_span(column: impl Into<String>, value: TimeSpan) -> Result<Self> {
        Self::new(column, SetterValue::TimeSpan(value))
    }

    /// Creates an increment setter (`col = col + amount`).
    pub fn increment(column: impl Into<String>, amount: impl Into<Numeric>) -> Result<Self> {
        Self::new(column, SetterValue::Increment(amount.into()))
    }

    /// Creates a NULL setter.
    pub fn null(column: impl Into<String>) -> Result<Self> {
        Self::new(column, SetterValue::Null)
    }

    /// Creates a setter writing an arbitrary expression.
    pub fn expression(column: impl Into<String>, value: Expression) -> Result<Self> {
        Self::new(column, SetterValue::Expression(value))
    }

    /// Returns the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        self.column.name()
    }
}
