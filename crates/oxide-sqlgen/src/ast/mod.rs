//! Statement tree types.
//!
//! Nodes are plain owned values built with the constructors and builder
//! methods of each type. The only in-place mutations are the IN operator
//! flip ([`Expression::flip_in`]) and alias management
//! ([`MonomerSource::reset_alias`], [`MonomerSource::prefix_alias`]).

mod change;
mod criteria;
mod expression;
mod field;
mod order;
mod query;
mod set;
mod setter;
mod source;
mod statement;
pub mod visitor;

pub use change::{ChangeSql, ChangeType};
pub use criteria::{ComplexCriteria, Criteria, InSelectCriteria, LogicOperator};
pub use expression::{
    col, qualified_col, ArithmeticOp, BitOp, ComparisonOp, Expression, InOp, LikeMode, LogicOp,
    NodeType, SqlFunction, UnaryOp,
};
pub use field::Field;
pub use order::{Order, OrderDirection};
pub use query::{AggregateFunction, Aggregation, QuerySql, SelectionItem};
pub use set::{QuerySet, SetOperand, SetOperator};
pub use setter::{FieldSetter, SetterValue};
pub use source::{
    JoinType, JoinedSource, MonomerSource, SelectSource, SetSource, SimpleSource, Source,
    DEFAULT_SUBQUERY_ALIAS,
};
pub use statement::{SqlBase, SqlType, Statement};
pub use visitor::{AliasPrefixer, AliasRelocator, ExpressionVisitor};
