//! Expression AST types.

use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::error::{Result, SqlError};
use crate::value::{SqlValue, ToSqlValue, ValueType};

/// Operator tag of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Constant,
    Field,
    Wildcard,
    Function,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical
    AndAlso,
    OrElse,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,

    // Unary
    Not,
    Negate,
    BitNot,

    // Predicates
    Like,
    In,
    NotIn,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl ArithmeticOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Add => NodeType::Add,
            Self::Subtract => NodeType::Subtract,
            Self::Multiply => NodeType::Multiply,
            Self::Divide => NodeType::Divide,
            Self::Modulo => NodeType::Modulo,
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Equal => NodeType::Equal,
            Self::NotEqual => NodeType::NotEqual,
            Self::LessThan => NodeType::LessThan,
            Self::LessThanOrEqual => NodeType::LessThanOrEqual,
            Self::GreaterThan => NodeType::GreaterThan,
            Self::GreaterThanOrEqual => NodeType::GreaterThanOrEqual,
        }
    }
}

/// Boolean operators between two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::And => NodeType::AndAlso,
            Self::Or => NodeType::OrElse,
        }
    }
}

/// Bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::And => NodeType::BitAnd,
            Self::Or => NodeType::BitOr,
            Self::Xor => NodeType::BitXor,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical NOT
    Not,
    /// Negation (-)
    Negate,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Not => NodeType::Not,
            Self::Negate => NodeType::Negate,
            Self::BitNot => NodeType::BitNot,
        }
    }
}

/// Membership test operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InOp {
    In,
    NotIn,
}

impl InOp {
    /// Returns the opposite operator.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// Returns the node type of the operator.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::In => NodeType::In,
            Self::NotIn => NodeType::NotIn,
        }
    }
}

/// Where `%` markers surround a LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LikeMode {
    /// The pattern is used as-is.
    #[default]
    Exact,
    /// `pattern%`
    StartsWith,
    /// `%pattern`
    EndsWith,
    /// `%pattern%`
    Contains,
}

impl LikeMode {
    const fn from_markers(leading: bool, trailing: bool) -> Self {
        match (leading, trailing) {
            (false, false) => Self::Exact,
            (false, true) => Self::StartsWith,
            (true, false) => Self::EndsWith,
            (true, true) => Self::Contains,
        }
    }

    /// Returns whether a `%` precedes the pattern.
    #[must_use]
    pub const fn leading(self) -> bool {
        matches!(self, Self::EndsWith | Self::Contains)
    }

    /// Returns whether a `%` follows the pattern.
    #[must_use]
    pub const fn trailing(self) -> bool {
        matches!(self, Self::StartsWith | Self::Contains)
    }
}

/// Functions with dialect-specific spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlFunction {
    Count,
    Sum,
    Avg,
    Max,
    Min,
    Upper,
    Lower,
    Length,
    Trim,
    Abs,
    Round,
    Coalesce,
    Substring,
    Now,
}

impl SqlFunction {
    /// Returns whether the function aggregates rows.
    #[must_use]
    pub const fn is_aggregate(self) -> bool {
        matches!(
            self,
            Self::Count | Self::Sum | Self::Avg | Self::Max | Self::Min
        )
    }
}

/// An SQL expression.
///
/// Nodes are immutable values: the builder methods consume `self` and return
/// a new node. Equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A constant value.
    Constant(SqlValue),

    /// A column reference.
    Field {
        /// The referenced column.
        field: Field,
        /// Declared column type, when known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_type: Option<ValueType>,
    },

    /// An arithmetic expression.
    Arithmetic {
        /// Operator.
        op: ArithmeticOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// A comparison.
    Comparison {
        /// Operator.
        op: ComparisonOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// AND / OR between two boolean expressions.
    BinaryLogic {
        /// Operator.
        op: LogicOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// A bitwise expression.
    BinaryBit {
        /// Operator.
        op: BitOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expression>,
    },

    /// LIKE pattern match.
    Like {
        /// Matched expression.
        left: Box<Expression>,
        /// Pattern, without the markers described by `mode`.
        pattern: Box<Expression>,
        /// Markers added around the pattern.
        #[serde(default)]
        mode: LikeMode,
    },

    /// IN / NOT IN over a list of values.
    In {
        /// Operator.
        op: InOp,
        /// Tested expression.
        left: Box<Expression>,
        /// Value domain.
        values: Vec<SqlValue>,
    },

    /// A function call.
    Function {
        /// The function.
        function: SqlFunction,
        /// The arguments.
        args: Vec<Expression>,
        /// Whether DISTINCT was specified.
        #[serde(default)]
        distinct: bool,
    },

    /// Wildcard (*), optionally qualified with a source symbol.
    Wildcard {
        /// Source qualifier (optional).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
}

/// Creates an unqualified column reference expression.
pub fn col(name: &str) -> Result<Expression> {
    Ok(Expression::field(Field::new(name)?))
}

/// Creates a qualified column reference expression.
pub fn qualified_col(source: &str, name: &str) -> Result<Expression> {
    Ok(Expression::field(Field::qualified(source, name)?))
}

impl Expression {
    /// Creates a constant expression.
    #[must_use]
    pub fn constant<T: ToSqlValue>(value: T) -> Self {
        Self::Constant(value.to_sql_value())
    }

    /// Creates a NULL constant.
    #[must_use]
    pub const fn null() -> Self {
        Self::Constant(SqlValue::Null)
    }

    /// Creates a column reference.
    #[must_use]
    pub const fn field(field: Field) -> Self {
        Self::Field {
            field,
            value_type: None,
        }
    }

    /// Creates a column reference with a declared type.
    #[must_use]
    pub const fn typed_field(field: Field, value_type: ValueType) -> Self {
        Self::Field {
            field,
            value_type: Some(value_type),
        }
    }

    /// Creates an unqualified wildcard.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::Wildcard { source: None }
    }

    /// Creates a wildcard qualified with a source symbol.
    #[must_use]
    pub fn wildcard_of(source: impl Into<String>) -> Self {
        Self::Wildcard {
            source: Some(source.into()),
        }
    }

    /// Creates a function call.
    #[must_use]
    pub const fn function(function: SqlFunction, args: Vec<Self>) -> Self {
        Self::Function {
            function,
            args,
            distinct: false,
        }
    }

    /// Creates `COUNT(*)`.
    #[must_use]
    pub fn count_all() -> Self {
        Self::function(SqlFunction::Count, vec![Self::wildcard()])
    }

    /// Creates `COUNT(DISTINCT expr)`.
    #[must_use]
    pub fn count_distinct(expr: Self) -> Self {
        Self::Function {
            function: SqlFunction::Count,
            args: vec![expr],
            distinct: true,
        }
    }

    /// Creates a binary expression from a node type.
    ///
    /// Returns [`SqlError::UnknownOperator`] when `node_type` is not a binary
    /// operator.
    pub fn binary(node_type: NodeType, left: Self, right: Self) -> Result<Self> {
        let (left, right) = (Box::new(left), Box::new(right));
        let arithmetic = |op| Self::Arithmetic {
            op,
            left: left.clone(),
            right: right.clone(),
        };
        let comparison = |op| Self::Comparison {
            op,
            left: left.clone(),
            right: right.clone(),
        };
        let logic = |op| Self::BinaryLogic {
            op,
            left: left.clone(),
            right: right.clone(),
        };
        let bit = |op| Self::BinaryBit {
            op,
            left: left.clone(),
            right: right.clone(),
        };
        let expr = match node_type {
            NodeType::Add => arithmetic(ArithmeticOp::Add),
            NodeType::Subtract => arithmetic(ArithmeticOp::Subtract),
            NodeType::Multiply => arithmetic(ArithmeticOp::Multiply),
            NodeType::Divide => arithmetic(ArithmeticOp::Divide),
            NodeType::Modulo => arithmetic(ArithmeticOp::Modulo),
            NodeType::Equal => comparison(ComparisonOp::Equal),
            NodeType::NotEqual => comparison(ComparisonOp::NotEqual),
            NodeType::LessThan => comparison(ComparisonOp::LessThan),
            NodeType::LessThanOrEqual => comparison(ComparisonOp::LessThanOrEqual),
            NodeType::GreaterThan => comparison(ComparisonOp::GreaterThan),
            NodeType::GreaterThanOrEqual => comparison(ComparisonOp::GreaterThanOrEqual),
            NodeType::AndAlso => logic(LogicOp::And),
            NodeType::OrElse => logic(LogicOp::Or),
            NodeType::BitAnd => bit(BitOp::And),
            NodeType::BitOr => bit(BitOp::Or),
            NodeType::BitXor => bit(BitOp::Xor),
            NodeType::Like => Self::Like {
                left: left.clone(),
                pattern: right.clone(),
                mode: LikeMode::Exact,
            },
            NodeType::Constant
            | NodeType::Field
            | NodeType::Wildcard
            | NodeType::Function
            | NodeType::Not
            | NodeType::Negate
            | NodeType::BitNot
            | NodeType::In
            | NodeType::NotIn => return Err(SqlError::UnknownOperator(node_type)),
        };
        Ok(expr)
    }

    /// Creates a unary expression from a node type.
    ///
    /// Returns [`SqlError::UnknownOperator`] when `node_type` is not a unary
    /// operator.
    pub fn unary(node_type: NodeType, operand: Self) -> Result<Self> {
        let op = match node_type {
            NodeType::Not => return Ok(operand.not()),
            NodeType::Negate => UnaryOp::Negate,
            NodeType::BitNot => UnaryOp::BitNot,
            other => return Err(SqlError::UnknownOperator(other)),
        };
        Ok(Self::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Returns the operator tag of the node.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Constant(_) => NodeType::Constant,
            Self::Field { .. } => NodeType::Field,
            Self::Arithmetic { op, .. } => op.node_type(),
            Self::Comparison { op, .. } => op.node_type(),
            Self::BinaryLogic { op, .. } => op.node_type(),
            Self::BinaryBit { op, .. } => op.node_type(),
            Self::Unary { op, .. } => op.node_type(),
            Self::Like { .. } => NodeType::Like,
            Self::In { op, .. } => op.node_type(),
            Self::Function { .. } => NodeType::Function,
            Self::Wildcard { .. } => NodeType::Wildcard,
        }
    }

    /// Returns the static type of the expression, when it can be inferred.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Constant(value) => value.value_type(),
            Self::Field { value_type, .. } => *value_type,
            Self::Arithmetic { left, right, .. } | Self::BinaryBit { left, right, .. } => {
                left.value_type().or_else(|| right.value_type())
            }
            Self::Comparison { .. } | Self::BinaryLogic { .. } | Self::Like { .. } | Self::In { .. } => {
                Some(ValueType::Boolean)
            }
            Self::Unary { op, operand } => match op {
                UnaryOp::Not => Some(ValueType::Boolean),
                UnaryOp::Negate | UnaryOp::BitNot => operand.value_type(),
            },
            Self::Function { function, args, .. } => match function {
                SqlFunction::Count | SqlFunction::Length => Some(ValueType::Integer),
                SqlFunction::Avg => Some(ValueType::Float),
                SqlFunction::Upper
                | SqlFunction::Lower
                | SqlFunction::Trim
                | SqlFunction::Substring => Some(ValueType::String),
                SqlFunction::Now => Some(ValueType::DateTime),
                SqlFunction::Sum
                | SqlFunction::Max
                | SqlFunction::Min
                | SqlFunction::Abs
                | SqlFunction::Round
                | SqlFunction::Coalesce => args.iter().find_map(Self::value_type),
            },
            Self::Wildcard { .. } => None,
        }
    }

    /// Returns the field of a column reference.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Returns the value of a constant.
    #[must_use]
    pub const fn as_constant(&self) -> Option<&SqlValue> {
        match self {
            Self::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Returns whether the node renders as an operator between operands and
    /// needs parentheses when nested.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::Arithmetic { .. }
                | Self::Comparison { .. }
                | Self::BinaryLogic { .. }
                | Self::BinaryBit { .. }
                | Self::Like { .. }
                | Self::In { .. }
        )
    }

    /// Flips an IN test in place. Returns false for any other node.
    ///
    /// Flipping twice restores the original operator.
    pub fn flip_in(&mut self) -> bool {
        match self {
            Self::In { op, .. } => {
                *op = op.negated();
                true
            }
            _ => false,
        }
    }

    fn comparison(self, op: ComparisonOp, right: Self) -> Self {
        Self::Comparison {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    fn arithmetic(self, op: ArithmeticOp, right: Self) -> Self {
        Self::Arithmetic {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    fn bit(self, op: BitOp, right: Self) -> Self {
        Self::BinaryBit {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::Equal, right.into())
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::NotEqual, right.into())
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::LessThan, right.into())
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::LessThanOrEqual, right.into())
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::GreaterThan, right.into())
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, right: impl Into<Self>) -> Self {
        self.comparison(ComparisonOp::GreaterThanOrEqual, right.into())
    }

    /// Creates an IS NULL test (`= NULL` renders as `IS NULL`).
    #[must_use]
    pub fn is_null(self) -> Self {
        self.eq(Self::null())
    }

    /// Creates an IS NOT NULL test.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        self.not_eq(Self::null())
    }

    /// Creates an addition.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, right: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Add, right.into())
    }

    /// Creates a subtraction.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, right: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Subtract, right.into())
    }

    /// Creates a multiplication.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, right: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Multiply, right.into())
    }

    /// Creates a division.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, right: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Divide, right.into())
    }

    /// Creates a modulo.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn rem(self, right: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Modulo, right.into())
    }

    /// Creates a bitwise AND.
    #[must_use]
    pub fn bit_and(self, right: impl Into<Self>) -> Self {
        self.bit(BitOp::And, right.into())
    }

    /// Creates a bitwise OR.
    #[must_use]
    pub fn bit_or(self, right: impl Into<Self>) -> Self {
        self.bit(BitOp::Or, right.into())
    }

    /// Creates a bitwise XOR.
    #[must_use]
    pub fn bit_xor(self, right: impl Into<Self>) -> Self {
        self.bit(BitOp::Xor, right.into())
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        Self::BinaryLogic {
            op: LogicOp::And,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        Self::BinaryLogic {
            op: LogicOp::Or,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Negates the expression.
    ///
    /// An IN test is negated by flipping its operator rather than wrapping it
    /// in `NOT (..)`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        if self.flip_in() {
            return self;
        }
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// Creates an arithmetic negation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        Self::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(self),
        }
    }

    /// Creates a bitwise complement.
    #[must_use]
    pub fn bit_not(self) -> Self {
        Self::Unary {
            op: UnaryOp::BitNot,
            operand: Box::new(self),
        }
    }

    /// Creates a LIKE expression.
    ///
    /// A constant text pattern has its leading and trailing `%` markers
    /// detected and stripped; the renderer re-adds them with the dialect's
    /// concatenation syntax.
    #[must_use]
    pub fn like(self, pattern: impl Into<Self>) -> Self {
        let pattern = pattern.into();
        match pattern {
            Self::Constant(SqlValue::Text(text)) => {
                let leading = text.starts_with('%');
                let stripped = text.strip_prefix('%').unwrap_or(&text);
                let trailing = !stripped.is_empty() && stripped.ends_with('%');
                let stripped = stripped.strip_suffix('%').filter(|_| trailing).unwrap_or(stripped);
                self.like_with(
                    Self::Constant(SqlValue::Text(String::from(stripped))),
                    LikeMode::from_markers(leading, trailing),
                )
            }
            other => self.like_with(other, LikeMode::Exact),
        }
    }

    /// Creates a LIKE expression with explicit markers.
    #[must_use]
    pub fn like_with(self, pattern: impl Into<Self>, mode: LikeMode) -> Self {
        Self::Like {
            left: Box::new(self),
            pattern: Box::new(pattern.into()),
            mode,
        }
    }

    /// Creates a starts-with match (`LIKE value%`).
    #[must_use]
    pub fn starts_with(self, value: impl Into<Self>) -> Self {
        self.like_with(value, LikeMode::StartsWith)
    }

    /// Creates an ends-with match (`LIKE %value`).
    #[must_use]
    pub fn ends_with(self, value: impl Into<Self>) -> Self {
        self.like_with(value, LikeMode::EndsWith)
    }

    /// Creates a contains match (`LIKE %value%`).
    #[must_use]
    pub fn contains(self, value: impl Into<Self>) -> Self {
        self.like_with(value, LikeMode::Contains)
    }

    /// Creates an IN expression.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Self {
        Self::In {
            op: InOp::In,
            left: Box::new(self),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        }
    }

    /// Creates a NOT IN expression.
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(self, values: Vec<T>) -> Self {
        Self::In {
            op: InOp::NotIn,
            left: Box::new(self),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        }
    }
}

impl From<Field> for Expression {
    fn from(field: Field) -> Self {
        Self::field(field)
    }
}

impl From<SqlValue> for Expression {
    fn from(value: SqlValue) -> Self {
        Self::Constant(value)
    }
}

macro_rules! expression_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Self::constant(value)
                }
            }
        )*
    };
}

expression_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    char,
    String,
    &str,
    chrono::NaiveDateTime,
    uuid::Uuid,
    crate::value::TimeSpan
);
