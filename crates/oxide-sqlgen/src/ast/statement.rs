//! The statement kinds behind one interface.

use serde::{Deserialize, Serialize};

use super::change::{ChangeSql, ChangeType};
use super::criteria::Criteria;
use super::query::QuerySql;
use super::set::QuerySet;
use super::source::Source;

/// Kind of SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Select,
    Set,
    Insert,
    Update,
    Delete,
}

/// Common view over every statement.
pub trait SqlBase {
    /// Returns the kind of statement.
    fn sql_type(&self) -> SqlType;

    /// Returns the FROM source, if the statement has one.
    fn source(&self) -> Option<&Source>;

    /// Returns the WHERE clause, if any.
    fn criteria(&self) -> Option<&Criteria>;
}

impl SqlBase for QuerySql {
    fn sql_type(&self) -> SqlType {
        SqlType::Select
    }

    fn source(&self) -> Option<&Source> {
        Some(&self.source)
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }
}

impl SqlBase for QuerySet {
    fn sql_type(&self) -> SqlType {
        SqlType::Set
    }

    fn source(&self) -> Option<&Source> {
        None
    }

    fn criteria(&self) -> Option<&Criteria> {
        None
    }
}

impl SqlBase for ChangeSql {
    fn sql_type(&self) -> SqlType {
        match self.change_type {
            ChangeType::Insert => SqlType::Insert,
            ChangeType::Update => SqlType::Update,
            ChangeType::Delete => SqlType::Delete,
        }
    }

    fn source(&self) -> Option<&Source> {
        Some(&self.source)
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }
}

/// Any statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// SELECT.
    Query(QuerySql),
    /// UNION / INTERSECT / EXCEPT.
    Set(QuerySet),
    /// INSERT / UPDATE / DELETE.
    Change(ChangeSql),
}

impl Statement {
    fn base(&self) -> &dyn SqlBase {
        match self {
            Self::Query(query) => query,
            Self::Set(set) => set,
            Self::Change(change) => change,
        }
    }
}

impl SqlBase for Statement {
    fn sql_type(&self) -> SqlType {
        self.base().sql_type()
    }

    fn source(&self) -> Option<&Source> {
        self.base().source()
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.base().criteria()
    }
}

impl From<QuerySql> for Statement {
    fn from(query: QuerySql) -> Self {
        Self::Query(query)
    }
}

impl From<QuerySet> for Statement {
    fn from(set: QuerySet) -> Self {
        Self::Set(set)
    }
}

impl From<ChangeSql> for Statement {
    fn from(change: ChangeSql) -> Self {
        Self::Change(change)
    }
}
