//! INSERT, UPDATE and DELETE statements.

use serde::{Deserialize, Serialize};

use super::criteria::Criteria;
use super::setter::FieldSetter;
use super::source::{MonomerSource, SimpleSource, Source};
use crate::error::{Result, SqlError};

/// Kind of change statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Insert,
    Update,
    Delete,
}

/// A data-modifying statement.
///
/// The changed table is the leftmost monomer of `source`; joining further
/// sources restricts the changed rows (UPDATE and DELETE only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSql {
    /// Kind of change.
    pub change_type: ChangeType,
    /// Changed table, possibly joined with other sources.
    pub source: Source,
    /// WHERE clause (optional, ignored by INSERT).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    setters: Vec<FieldSetter>,
}

impl ChangeSql {
    /// Creates a change statement.
    #[must_use]
    pub const fn new(change_type: ChangeType, source: Source) -> Self {
        Self {
            change_type,
            source,
            criteria: None,
            setters: Vec::new(),
        }
    }

    /// Creates an INSERT into a table.
    #[must_use]
    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(ChangeType::Insert, Source::table(table))
    }

    /// Creates an UPDATE of a source.
    #[must_use]
    pub const fn update(source: Source) -> Self {
        Self::new(ChangeType::Update, source)
    }

    /// Creates a DELETE from a source.
    #[must_use]
    pub const fn delete(source: Source) -> Self {
        Self::new(ChangeType::Delete, source)
    }

    /// Adds a WHERE condition, AND-ed with any existing one.
    #[must_use]
    pub fn filter(mut self, criteria: impl Into<Criteria>) -> Self {
        let criteria = criteria.into();
        self.criteria = Some(match self.criteria.take() {
            Some(existing) => existing.and(criteria),
            None => criteria,
        });
        self
    }

    /// Adds a setter.
    ///
    /// A setter for a column that already has one replaces it, keeping the
    /// original position.
    #[must_use]
    pub fn set(mut self, setter: FieldSetter) -> Self {
        self.push_setter(setter);
        self
    }

    /// Adds a setter in place; see [`set`](Self::set).
    pub fn push_setter(&mut self, setter: FieldSetter) {
        match self
            .setters
            .iter_mut()
            .find(|existing| existing.column() == setter.column())
        {
            Some(existing) => *existing = setter,
            None => self.setters.push(setter),
        }
    }

    /// Returns the setters, in column order.
    #[must_use]
    pub fn setters(&self) -> &[FieldSetter] {
        &self.setters
    }

    /// Returns the changed table.
    ///
    /// Fails with [`SqlError::MalformedComposition`] when the leftmost
    /// source is not a table.
    pub fn target(&self) -> Result<&SimpleSource> {
        match self.source.leftmost_monomer() {
            MonomerSource::Simple(simple) => Ok(simple),
            MonomerSource::Select(_) | MonomerSource::Set(_) => Err(SqlError::malformed(
                "change target must be a table",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::col;
    use crate::ast::query::QuerySql;

    #[test]
    fn test_last_write_wins_in_place() {
        let change = ChangeSql::insert("Users")
            .set(FieldSetter::string("Name", "a").unwrap())
            .set(FieldSetter::numeric("Age", 1).unwrap())
            .set(FieldSetter::string("Name", "b").unwrap());
        let columns: Vec<&str> = change.setters().iter().map(FieldSetter::column).collect();
        assert_eq!(columns, ["Name", "Age"]);
        assert_eq!(
            change.setters()[0],
            FieldSetter::string("Name", "b").unwrap()
        );
    }

    #[test]
    fn test_target_must_be_table() {
        let change = ChangeSql::delete(Source::select(
            QuerySql::from_table("Users").column(col("Id").unwrap()),
            "s",
        ));
        assert!(matches!(
            change.target(),
            Err(SqlError::MalformedComposition(_))
        ));
        assert_eq!(ChangeSql::insert("Users").target().unwrap().table, "Users");
    }
}
