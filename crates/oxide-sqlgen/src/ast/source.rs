//! Row sources: tables, joins, sub-selects and set-operation results.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::criteria::Criteria;
use super::expression::Expression;
use super::field::Field;
use super::order::Order;
use super::query::{QuerySql, SelectionItem};
use super::set::QuerySet;
use super::visitor::relocate;
use crate::error::{Result, SqlError};

/// Symbol of a sub-select or set source that has no alias.
pub const DEFAULT_SUBQUERY_ALIAS: &str = "sub_t";

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// A table or view, with its natural row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSource {
    /// Table or view name.
    pub table: String,
    /// Alias (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Order in which the table stores its rows. Fields are unqualified.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storing_order: Vec<Order>,
}

impl SimpleSource {
    /// Creates an unaliased table source.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            storing_order: Vec::new(),
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the storing order.
    #[must_use]
    pub fn storing_order(mut self, orders: Vec<Order>) -> Self {
        self.storing_order = orders;
        self
    }
}

/// A sub-select used as a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectSource {
    /// The wrapped query.
    pub query: Box<QuerySql>,
    /// Alias (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A set operation used as a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSource {
    /// The wrapped set operation.
    pub set: Box<QuerySet>,
    /// Alias (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A source that can carry an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonomerSource {
    /// A table or view.
    Simple(SimpleSource),
    /// A sub-select.
    Select(SelectSource),
    /// A set operation.
    Set(SetSource),
}

/// Two sources joined on a criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedSource {
    /// Join type.
    pub join_type: JoinType,
    /// Left side.
    pub left: Box<Source>,
    /// Right side.
    pub right: Box<Source>,
    /// Join condition.
    pub criteria: Criteria,
}

/// A row source usable in FROM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// A single aliasable source.
    Monomer(MonomerSource),
    /// A join.
    Joined(JoinedSource),
}

impl MonomerSource {
    /// Returns the symbol fields use to reference this source: the alias,
    /// or the table name of an unaliased table.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Simple(simple) => simple.alias.as_deref().unwrap_or(&simple.table),
            Self::Select(SelectSource { alias, .. }) | Self::Set(SetSource { alias, .. }) => {
                alias.as_deref().unwrap_or(DEFAULT_SUBQUERY_ALIAS)
            }
        }
    }

    /// Returns the alias, if one is set.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Simple(SimpleSource { alias, .. })
            | Self::Select(SelectSource { alias, .. })
            | Self::Set(SetSource { alias, .. }) => alias.as_deref(),
        }
    }

    fn alias_mut(&mut self) -> &mut Option<String> {
        match self {
            Self::Simple(SimpleSource { alias, .. })
            | Self::Select(SelectSource { alias, .. })
            | Self::Set(SetSource { alias, .. }) => alias,
        }
    }

    /// Clears the alias.
    pub fn reset_alias(&mut self) {
        *self.alias_mut() = None;
    }

    /// Prefixes the symbol, turning it into an explicit alias.
    pub fn prefix_alias(&mut self, prefix: &str) {
        let prefixed = format!("{prefix}{}", self.symbol());
        *self.alias_mut() = Some(prefixed);
    }

    /// Returns whether [`bubble_order`](Self::bubble_order) can succeed.
    #[must_use]
    pub fn can_bubble_order(&self) -> bool {
        match self {
            Self::Simple(simple) => !simple.storing_order.is_empty(),
            Self::Select(select) => {
                !select.query.orders.is_empty() || select.query.source.can_bubble_order()
            }
            Self::Set(set) => !set.set.orders.is_empty(),
        }
    }

    /// Appends the natural row order of this source to `orders`.
    ///
    /// Fails with [`SqlError::OrderAlreadyDefined`] when `orders` is not
    /// empty, and with [`SqlError::OrderBubblingUnsupported`] when the source
    /// guarantees no order.
    pub fn bubble_order(&mut self, orders: &mut Vec<Order>) -> Result<()> {
        if !orders.is_empty() {
            return Err(SqlError::OrderAlreadyDefined);
        }
        if !self.can_bubble_order() {
            return Err(SqlError::OrderBubblingUnsupported {
                offender: self.to_string(),
            });
        }
        let symbol = String::from(self.symbol());
        let description = self.to_string();
        match self {
            Self::Simple(simple) => {
                for order in &simple.storing_order {
                    let mut order = order.clone();
                    relocate(&mut order.expression, &symbol);
                    orders.push(order);
                }
            }
            Self::Select(select) => bubble_select(&mut select.query, &symbol, orders)?,
            Self::Set(set) => {
                let mut exposed = Vec::with_capacity(set.set.orders.len());
                for order in &set.set.orders {
                    let field = order.expression.as_field().ok_or_else(|| {
                        SqlError::OrderBubblingUnsupported {
                            offender: description.clone(),
                        }
                    })?;
                    let outer = Field::qualified(symbol.clone(), field.name())?;
                    exposed.push(Order::new(Expression::field(outer), order.direction));
                }
                set.set.orders.clear();
                orders.extend(exposed);
            }
        }
        trace!(source = %symbol, orders = orders.len(), "bubbled source order");
        Ok(())
    }
}

/// Re-exposes the ordering of a sub-select through its projection.
fn bubble_select(query: &mut QuerySql, symbol: &str, orders: &mut Vec<Order>) -> Result<()> {
    if query.orders.is_empty() {
        query.bubble_source_order()?;
    }
    let inner = if query.skip.is_none() && query.take.is_none() {
        std::mem::take(&mut query.orders)
    } else {
        query.orders.clone()
    };
    for (index, order) in inner.into_iter().enumerate() {
        let column = expose(query, order.expression, index);
        let outer = Field::qualified(symbol, column)?;
        orders.push(Order::new(Expression::field(outer), order.direction));
    }
    Ok(())
}

/// Returns the output column name under which `expression` is projected,
/// adding a projection item when needed.
fn expose(query: &mut QuerySql, expression: Expression, index: usize) -> String {
    if query.selection.is_empty() {
        if let Some(field) = expression.as_field() {
            return String::from(field.name());
        }
        query.selection.push(SelectionItem::new(Expression::wildcard()));
    }
    let generated = format!("order_{index}");
    if let Some(item) = query
        .selection
        .iter_mut()
        .find(|item| item.expression == expression)
    {
        if let Some(alias) = &item.alias {
            return alias.clone();
        }
        if let Some(field) = item.expression.as_field() {
            return String::from(field.name());
        }
        item.alias = Some(generated.clone());
        return generated;
    }
    query
        .selection
        .push(SelectionItem::aliased(expression, generated.clone()));
    generated
}

impl Source {
    /// Creates an unaliased table source.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Monomer(MonomerSource::Simple(SimpleSource::new(name)))
    }

    /// Creates an aliased table source.
    #[must_use]
    pub fn table_as(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Monomer(MonomerSource::Simple(SimpleSource::new(name).alias(alias)))
    }

    /// Wraps a query as a sub-select source.
    #[must_use]
    pub fn select(query: QuerySql, alias: impl Into<String>) -> Self {
        Self::Monomer(MonomerSource::Select(SelectSource {
            query: Box::new(query),
            alias: Some(alias.into()),
        }))
    }

    /// Wraps a set operation as a source.
    #[must_use]
    pub fn set(set: QuerySet, alias: impl Into<String>) -> Self {
        Self::Monomer(MonomerSource::Set(SetSource {
            set: Box::new(set),
            alias: Some(alias.into()),
        }))
    }

    /// Joins another source onto this one.
    #[must_use]
    pub fn join(self, join_type: JoinType, right: Self, on: impl Into<Criteria>) -> Self {
        Self::Joined(JoinedSource {
            join_type,
            left: Box::new(self),
            right: Box::new(right),
            criteria: on.into(),
        })
    }

    /// Inner-joins another source onto this one.
    #[must_use]
    pub fn inner_join(self, right: Self, on: impl Into<Criteria>) -> Self {
        self.join(JoinType::Inner, right, on)
    }

    /// Left-joins another source onto this one.
    #[must_use]
    pub fn left_join(self, right: Self, on: impl Into<Criteria>) -> Self {
        self.join(JoinType::Left, right, on)
    }

    /// Returns true for a join.
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        matches!(self, Self::Joined(_))
    }

    /// Returns the monomer source when this is not a join.
    #[must_use]
    pub const fn as_monomer(&self) -> Option<&MonomerSource> {
        match self {
            Self::Monomer(monomer) => Some(monomer),
            Self::Joined(_) => None,
        }
    }

    /// Returns the leftmost monomer of the source tree.
    #[must_use]
    pub fn leftmost_monomer(&self) -> &MonomerSource {
        match self {
            Self::Monomer(monomer) => monomer,
            Self::Joined(joined) => joined.left.leftmost_monomer(),
        }
    }

    /// Returns every monomer of the source tree, left to right.
    pub fn monomers_mut(&mut self) -> Vec<&mut MonomerSource> {
        match self {
            Self::Monomer(monomer) => vec![monomer],
            Self::Joined(joined) => {
                let mut monomers = joined.left.monomers_mut();
                monomers.extend(joined.right.monomers_mut());
                monomers
            }
        }
    }

    /// Returns whether [`bubble_order`](Self::bubble_order) can succeed.
    #[must_use]
    pub fn can_bubble_order(&self) -> bool {
        match self {
            Self::Monomer(monomer) => monomer.can_bubble_order(),
            Self::Joined(_) => false,
        }
    }

    /// Appends the natural row order of this source to `orders`.
    ///
    /// Joins never guarantee an order.
    pub fn bubble_order(&mut self, orders: &mut Vec<Order>) -> Result<()> {
        match self {
            Self::Monomer(monomer) => monomer.bubble_order(orders),
            Self::Joined(_) => Err(SqlError::OrderBubblingUnsupported {
                offender: self.to_string(),
            }),
        }
    }
}

impl From<MonomerSource> for Source {
    fn from(monomer: MonomerSource) -> Self {
        Self::Monomer(monomer)
    }
}

impl From<SimpleSource> for Source {
    fn from(simple: SimpleSource) -> Self {
        Self::Monomer(MonomerSource::Simple(simple))
    }
}

impl fmt::Display for MonomerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(simple) => match &simple.alias {
                Some(alias) => write!(f, "{} {alias}", simple.table),
                None => f.write_str(&simple.table),
            },
            Self::Select(select) => write!(f, "(select from {}) {}", select.query.source, self.symbol()),
            Self::Set(set) => write!(f, "({}) {}", set.set, self.symbol()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monomer(monomer) => write!(f, "{monomer}"),
            Self::Joined(joined) => write!(
                f,
                "{} {} {}",
                joined.left,
                joined.join_type.as_str(),
                joined.right
            ),
        }
    }
}
