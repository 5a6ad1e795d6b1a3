//! Ordering specifications.

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::field::Field;
use crate::error::Result;

/// Order direction for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order (ASC)
    #[default]
    Asc,
    /// Descending order (DESC)
    Desc,
}

impl OrderDirection {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ordering specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Expression to order by.
    pub expression: Expression,
    /// Order direction.
    #[serde(default)]
    pub direction: OrderDirection,
}

impl Order {
    /// Creates an ordering.
    #[must_use]
    pub const fn new(expression: Expression, direction: OrderDirection) -> Self {
        Self {
            expression,
            direction,
        }
    }

    /// Creates a new ascending order specification.
    #[must_use]
    pub const fn asc(expression: Expression) -> Self {
        Self::new(expression, OrderDirection::Asc)
    }

    /// Creates a new descending order specification.
    #[must_use]
    pub const fn desc(expression: Expression) -> Self {
        Self::new(expression, OrderDirection::Desc)
    }

    /// Parses a Django-style order specification on a column.
    ///
    /// Prefix with `-` for descending order, and qualify with `source.` when
    /// needed. Example: `"-u.CreatedAt"`.
    pub fn parse(text: &str) -> Result<Self> {
        let (direction, column) = match text.strip_prefix('-') {
            Some(column) => (OrderDirection::Desc, column),
            None => (OrderDirection::Asc, text),
        };
        let field = match column.split_once('.') {
            Some((source, name)) => Field::qualified(source, name)?,
            None => Field::new(column)?,
        };
        Ok(Self::new(Expression::field(field), direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ascending() {
        let order = Order::parse("Name").unwrap();
        assert_eq!(order.direction, OrderDirection::Asc);
        assert_eq!(order.expression, Expression::field(Field::new("Name").unwrap()));
    }

    #[test]
    fn test_parse_descending_qualified() {
        let order = Order::parse("-u.CreatedAt").unwrap();
        assert_eq!(order.direction, OrderDirection::Desc);
        assert_eq!(
            order.expression,
            Expression::field(Field::qualified("u", "CreatedAt").unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_star() {
        assert!(Order::parse("-*").is_err());
    }
}
