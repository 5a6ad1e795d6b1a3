//! SELECT statements.

use serde::{Deserialize, Serialize};

use super::criteria::Criteria;
use super::expression::{Expression, SqlFunction};
use super::order::Order;
use super::source::{MonomerSource, Source};
use super::visitor::{walk_query, AliasPrefixer};
use crate::error::Result;

/// One projected expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionItem {
    /// Projected expression.
    pub expression: Expression,
    /// Output column alias (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl SelectionItem {
    /// Creates an unaliased item.
    #[must_use]
    pub const fn new(expression: Expression) -> Self {
        Self {
            expression,
            alias: None,
        }
    }

    /// Creates an aliased item.
    #[must_use]
    pub fn aliased(expression: Expression, alias: impl Into<String>) -> Self {
        Self {
            expression,
            alias: Some(alias.into()),
        }
    }
}

/// Aggregate functions a query can collapse to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl AggregateFunction {
    const fn sql_function(self) -> SqlFunction {
        match self {
            Self::Count => SqlFunction::Count,
            Self::Sum => SqlFunction::Sum,
            Self::Avg => SqlFunction::Avg,
            Self::Max => SqlFunction::Max,
            Self::Min => SqlFunction::Min,
        }
    }
}

/// A single-row aggregate replacing the projection of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// The aggregate function.
    pub function: AggregateFunction,
    /// Aggregated expression; `None` aggregates every row (`COUNT(*)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Expression>,
}

impl Aggregation {
    /// Creates `COUNT(*)`.
    #[must_use]
    pub const fn count() -> Self {
        Self {
            function: AggregateFunction::Count,
            argument: None,
        }
    }

    /// Creates an aggregate over an expression.
    #[must_use]
    pub const fn of(function: AggregateFunction, argument: Expression) -> Self {
        Self {
            function,
            argument: Some(argument),
        }
    }

    /// Returns the aggregate as a function call expression.
    #[must_use]
    pub fn to_expression(&self) -> Expression {
        let argument = self.argument.clone().unwrap_or_else(Expression::wildcard);
        Expression::function(self.function.sql_function(), vec![argument])
    }
}

/// A SELECT statement.
///
/// An empty `selection` selects every column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySql {
    /// FROM source.
    pub source: Source,
    /// WHERE clause (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    /// Projection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectionItem>,
    /// Whether DISTINCT is specified.
    #[serde(default)]
    pub distinct: bool,
    /// ORDER BY clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
    /// Number of rows to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Maximum number of rows to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,
    /// Aggregate replacing the projection (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    /// GROUP BY clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<Expression>,
    /// HAVING clause (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Criteria>,
}

impl QuerySql {
    /// Creates a query selecting every column of a source.
    #[must_use]
    pub const fn new(source: Source) -> Self {
        Self {
            source,
            criteria: None,
            selection: Vec::new(),
            distinct: false,
            orders: Vec::new(),
            skip: None,
            take: None,
            aggregation: None,
            group_by: Vec::new(),
            having: None,
        }
    }

    /// Creates a query selecting every column of a table.
    #[must_use]
    pub fn from_table(table: impl Into<String>) -> Self {
        Self::new(Source::table(table))
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

    /// Replaces the projection.
    #[must_use]
    pub fn select(mut self, items: Vec<SelectionItem>) -> Self {
        self.selection = items;
        self
    }

    /// Projects one more expression.
    #[must_use]
    pub fn column(mut self, expression: Expression) -> Self {
        self.selection.push(SelectionItem::new(expression));
        self
    }

    /// Projects one more expression under an alias.
    #[must_use]
    pub fn column_as(mut self, expression: Expression, alias: impl Into<String>) -> Self {
        self.selection.push(SelectionItem::aliased(expression, alias));
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Appends an ordering.
    #[must_use]
    pub fn order_by(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of rows to return.
    #[must_use]
    pub const fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Collapses the query to a single aggregate row.
    #[must_use]
    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Appends a GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expression: Expression) -> Self {
        self.group_by.push(expression);
        self
    }

    /// Adds a HAVING condition, AND-ed with any existing one.
    #[must_use]
    pub fn having(mut self, criteria: impl Into<Criteria>) -> Self {
        let criteria = criteria.into();
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(criteria),
            None => criteria,
        });
        self
    }

    /// Copies the natural row order of the source onto this query.
    ///
    /// See [`Source::bubble_order`].
    pub fn bubble_source_order(&mut self) -> Result<()> {
        self.source.bubble_order(&mut self.orders)
    }

    /// Prefixes every alias of the statement and relocates its fields.
    ///
    /// Used before embedding the statement in another one whose aliases could
    /// collide. Nested sub-selects keep their own aliases.
    pub fn prefix_aliases(&mut self, prefix: &str) {
        walk_query(&mut AliasPrefixer::new(prefix), self);
    }

    /// Returns whether the query only wraps a set operation, adding no clause
    /// of its own.
    #[must_use]
    pub fn is_pure_set_wrapper(&self) -> bool {
        matches!(self.source, Source::Monomer(MonomerSource::Set(_)))
            && self.selection.is_empty()
            && self.criteria.is_none()
            && self.group_by.is_empty()
            && self.having.is_none()
            && self.orders.is_empty()
            && self.skip.is_none()
            && self.take.is_none()
            && self.aggregation.is_none()
            && !self.distinct
    }

    /// Returns whether rows are skipped or limited.
    #[must_use]
    pub const fn is_paged(&self) -> bool {
        self.skip.is_some() || self.take.is_some()
    }
}
