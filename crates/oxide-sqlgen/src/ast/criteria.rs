//! Boolean conditions used in WHERE, HAVING and join clauses.

use serde::{Deserialize, Serialize};

use super::expression::{Expression, InOp};
use super::query::QuerySql;
use crate::error::{Result, SqlError};

/// Logical operator of a complex criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOperator {
    And,
    Or,
    Not,
}

impl LogicOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

/// Children combined with a logical operator.
///
/// A `Not` criteria has exactly one child; `And` and `Or` have at least two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComplexRepr", into = "ComplexRepr")]
pub struct ComplexCriteria {
    operator: LogicOperator,
    children: Vec<Criteria>,
}

impl ComplexCriteria {
    /// Combines up to two operands.
    ///
    /// Two absent operands are rejected; an absent second operand is legal
    /// only under `Not`, which in turn rejects a second operand.
    pub fn new(
        operator: LogicOperator,
        left: Option<Criteria>,
        right: Option<Criteria>,
    ) -> Result<Self> {
        let children = match (left, right) {
            (None, None) => {
                return Err(SqlError::malformed(format!(
                    "{} criteria built from two absent operands",
                    operator.as_str()
                )))
            }
            (Some(only), None) | (None, Some(only)) => vec![only],
            (Some(left), Some(right)) => vec![left, right],
        };
        Self::from_children(operator, children)
    }

    /// Combines a list of children.
    pub fn from_children(operator: LogicOperator, children: Vec<Criteria>) -> Result<Self> {
        match operator {
            LogicOperator::Not if children.len() != 1 => Err(SqlError::malformed(format!(
                "NOT criteria takes exactly one child, got {}",
                children.len()
            ))),
            LogicOperator::And | LogicOperator::Or if children.len() < 2 => {
                Err(SqlError::malformed(format!(
                    "{} criteria takes at least two children, got {}",
                    operator.as_str(),
                    children.len()
                )))
            }
            _ => Ok(Self { operator, children }),
        }
    }

    /// Returns the logical operator.
    #[must_use]
    pub const fn operator(&self) -> LogicOperator {
        self.operator
    }

    /// Returns the children.
    #[must_use]
    pub fn children(&self) -> &[Criteria] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Criteria] {
        &mut self.children
    }
}

#[derive(Serialize, Deserialize)]
struct ComplexRepr {
    operator: LogicOperator,
    children: Vec<Criteria>,
}

impl TryFrom<ComplexRepr> for ComplexCriteria {
    type Error = SqlError;

    fn try_from(repr: ComplexRepr) -> Result<Self> {
        Self::from_children(repr.operator, repr.children)
    }
}

impl From<ComplexCriteria> for ComplexRepr {
    fn from(complex: ComplexCriteria) -> Self {
        Self {
            operator: complex.operator,
            children: complex.children,
        }
    }
}

/// Tests an expression against the rows of a subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InSelectCriteria {
    /// Tested expression.
    pub left: Expression,
    /// Value domain; projects exactly the compared column.
    pub query: Box<QuerySql>,
    /// IN or NOT IN.
    pub op: InOp,
}

impl InSelectCriteria {
    /// Creates an IN-select criteria.
    ///
    /// The subquery must name its projection explicitly.
    pub fn new(left: Expression, query: QuerySql, op: InOp) -> Result<Self> {
        if query.selection.is_empty() {
            return Err(SqlError::malformed(
                "IN-select subquery must project a column",
            ));
        }
        Ok(Self {
            left,
            query: Box::new(query),
            op,
        })
    }
}

/// A boolean condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Criteria {
    /// A boolean expression.
    Expression(Expression),
    /// Children combined with AND, OR or NOT.
    Complex(ComplexCriteria),
    /// IN / NOT IN over a subquery.
    InSelect(InSelectCriteria),
}

impl Criteria {
    /// Creates an IN (subquery) criteria.
    pub fn in_select(left: Expression, query: QuerySql) -> Result<Self> {
        Ok(Self::InSelect(InSelectCriteria::new(left, query, InOp::In)?))
    }

    /// Creates a NOT IN (subquery) criteria.
    pub fn not_in_select(left: Expression, query: QuerySql) -> Result<Self> {
        Ok(Self::InSelect(InSelectCriteria::new(
            left,
            query,
            InOp::NotIn,
        )?))
    }

    fn combine(self, operator: LogicOperator, other: Self) -> Self {
        let mut children = Vec::new();
        for criteria in [self, other] {
            match criteria {
                Self::Complex(complex) if complex.operator == operator => {
                    children.extend(complex.children);
                }
                other => children.push(other),
            }
        }
        Self::Complex(ComplexCriteria { operator, children })
    }

    /// Returns `self AND other`.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        self.combine(LogicOperator::And, other.into())
    }

    /// Returns `self OR other`.
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        self.combine(LogicOperator::Or, other.into())
    }

    /// Returns the negation.
    ///
    /// IN tests (over a list or a subquery) are negated by flipping their
    /// operator in place; every other criteria is wrapped in NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        let flipped = match &mut self {
            Self::Expression(expr) => expr.flip_in(),
            Self::InSelect(in_select) => {
                in_select.op = in_select.op.negated();
                true
            }
            Self::Complex(_) => false,
        };
        if flipped {
            return self;
        }
        Self::Complex(ComplexCriteria {
            operator: LogicOperator::Not,
            children: vec![self],
        })
    }
}

impl From<Expression> for Criteria {
    fn from(expr: Expression) -> Self {
        Self::Expression(expr)
    }
}

impl From<ComplexCriteria> for Criteria {
    fn from(complex: ComplexCriteria) -> Self {
        Self::Complex(complex)
    }
}

impl From<InSelectCriteria> for Criteria {
    fn from(in_select: InSelectCriteria) -> Self {
        Self::InSelect(in_select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::col;

    fn a() -> Criteria {
        col("A").unwrap().eq(1).into()
    }

    fn b() -> Criteria {
        col("B").unwrap().eq(2).into()
    }

    #[test]
    fn test_two_absent_operands_are_rejected() {
        for op in [LogicOperator::And, LogicOperator::Or, LogicOperator::Not] {
            assert!(matches!(
                ComplexCriteria::new(op, None, None),
                Err(SqlError::MalformedComposition(_))
            ));
        }
    }

    #[test]
    fn test_not_takes_one_child() {
        assert!(ComplexCriteria::new(LogicOperator::Not, Some(a()), None).is_ok());
        assert!(ComplexCriteria::new(LogicOperator::Not, Some(a()), Some(b())).is_err());
        assert!(ComplexCriteria::from_children(LogicOperator::Not, vec![]).is_err());
    }

    #[test]
    fn test_and_requires_both_operands() {
        assert!(ComplexCriteria::new(LogicOperator::And, Some(a()), None).is_err());
        let complex = ComplexCriteria::new(LogicOperator::And, Some(a()), Some(b())).unwrap();
        assert_eq!(complex.children().len(), 2);
    }

    #[test]
    fn test_same_operator_chains_flatten() {
        let chained = a().and(b()).and(a());
        let Criteria::Complex(complex) = chained else {
            panic!("expected a complex criteria");
        };
        assert_eq!(complex.operator(), LogicOperator::And);
        assert_eq!(complex.children().len(), 3);

        let mixed = a().and(b()).or(a());
        let Criteria::Complex(complex) = mixed else {
            panic!("expected a complex criteria");
        };
        assert_eq!(complex.operator(), LogicOperator::Or);
        assert_eq!(complex.children().len(), 2);
    }

    #[test]
    fn test_not_flips_in_expression() {
        let criteria = Criteria::from(col("Id").unwrap().in_list(vec![1, 2])).not();
        assert_eq!(
            criteria,
            Criteria::from(col("Id").unwrap().not_in_list(vec![1, 2]))
        );
        assert_eq!(
            criteria.not(),
            Criteria::from(col("Id").unwrap().in_list(vec![1, 2]))
        );
    }

    #[test]
    fn test_not_wraps_other_criteria() {
        let Criteria::Complex(complex) = a().not() else {
            panic!("expected a complex criteria");
        };
        assert_eq!(complex.operator(), LogicOperator::Not);
        assert_eq!(complex.children(), &[a()]);
    }

    #[test]
    fn test_in_select_requires_projection() {
        let query = QuerySql::from_table("Orders");
        assert!(Criteria::in_select(col("Id").unwrap(), query.clone()).is_err());
        let query = query.column(col("UserId").unwrap());
        let criteria = Criteria::in_select(col("Id").unwrap(), query).unwrap();
        let Criteria::InSelect(flipped) = criteria.not() else {
            panic!("expected an IN-select criteria");
        };
        assert_eq!(flipped.op, InOp::NotIn);
    }

    #[test]
    fn test_deserialize_rejects_malformed_not() {
        let json = r#"{"Complex":{"operator":"Not","children":[]}}"#;
        assert!(serde_json::from_str::<Criteria>(json).is_err());
    }
}
