//! Set operations between queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::order::Order;
use super::query::QuerySql;

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the standard SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// One side of a set operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetOperand {
    /// A query.
    Query(Box<QuerySql>),
    /// A nested set operation.
    Set(Box<QuerySet>),
}

impl From<QuerySql> for SetOperand {
    fn from(query: QuerySql) -> Self {
        Self::Query(Box::new(query))
    }
}

impl From<QuerySet> for SetOperand {
    fn from(set: QuerySet) -> Self {
        Self::Set(Box::new(set))
    }
}

/// Two operands combined with a set operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySet {
    /// Set operator.
    pub operator: SetOperator,
    /// Left operand.
    pub left: SetOperand,
    /// Right operand.
    pub right: SetOperand,
    /// ORDER BY over the combined rows; expressions name output columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
}

impl QuerySet {
    /// Creates a set operation.
    #[must_use]
    pub fn new(
        operator: SetOperator,
        left: impl Into<SetOperand>,
        right: impl Into<SetOperand>,
    ) -> Self {
        Self {
            operator,
            left: left.into(),
            right: right.into(),
            orders: Vec::new(),
        }
    }

    /// Creates a UNION.
    #[must_use]
    pub fn union(left: impl Into<SetOperand>, right: impl Into<SetOperand>) -> Self {
        Self::new(SetOperator::Union, left, right)
    }

    /// Creates a UNION ALL.
    #[must_use]
    pub fn union_all(left: impl Into<SetOperand>, right: impl Into<SetOperand>) -> Self {
        Self::new(SetOperator::UnionAll, left, right)
    }

    /// Appends an ordering of the combined rows.
    #[must_use]
    pub fn order_by(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
}

impl fmt::Display for SetOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "select from {}", query.source),
            Self::Set(set) => write!(f, "({set})"),
        }
    }
}

impl fmt::Display for QuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_str(), self.right)
    }
}
