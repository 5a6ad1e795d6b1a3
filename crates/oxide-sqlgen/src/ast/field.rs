//! Column references.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlError};

/// A reference to a column of a monomer source.
///
/// `source` holds the symbol (alias, or table name when unaliased) of the
/// source the column belongs to. Unqualified fields render as bare column
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FieldRepr", into = "FieldRepr")]
pub struct Field {
    name: String,
    source: Option<String>,
}

impl Field {
    /// Creates an unqualified field.
    ///
    /// Returns [`SqlError::InvalidField`] when the name is empty or contains
    /// `*`; use a wildcard expression to select every column.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('*') {
            return Err(SqlError::InvalidField(name));
        }
        Ok(Self { name, source: None })
    }

    /// Creates a field qualified with a source symbol.
    pub fn qualified(source: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(Self::new(name)?.with_source(Some(source.into())))
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol of the owning source.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the field moved onto another source.
    #[must_use]
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub(crate) fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct FieldRepr {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl TryFrom<FieldRepr> for Field {
    type Error = SqlError;

    fn try_from(repr: FieldRepr) -> Result<Self> {
        Ok(Self::new(repr.name)?.with_source(repr.source))
    }
}

impl From<Field> for FieldRepr {
    fn from(field: Field) -> Self {
        Self {
            name: field.name,
            source: field.source,
        }
    }
}
