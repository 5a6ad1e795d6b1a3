//! Error types for SQL generation.

use thiserror::Error;

use crate::ast::NodeType;
use crate::dialect::Dialect;

/// Errors raised while building or rendering a statement tree.
///
/// All of these are usage errors: they are reported synchronously to the
/// caller that assembled the tree and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// The dialect cannot express the requested construct.
    #[error("{feature} is not supported by {dialect}")]
    UnsupportedFeature {
        /// The target dialect.
        dialect: Dialect,
        /// Short description of the rejected construct.
        feature: &'static str,
    },

    /// A node type was used where an operator of another kind was expected.
    #[error("unknown operator: {0:?}")]
    UnknownOperator(NodeType),

    /// The source cannot guarantee a row order to bubble outward.
    #[error("order bubbling is not supported by source {offender}")]
    OrderBubblingUnsupported {
        /// Description of the offending source.
        offender: String,
    },

    /// Order bubbling was attempted onto a query that already has an ordering.
    #[error("target query already defines an ordering")]
    OrderAlreadyDefined,

    /// A criteria or statement was composed from invalid parts.
    #[error("malformed composition: {0}")]
    MalformedComposition(String),

    /// Invalid field name.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Invalid render configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SqlError {
    pub(crate) const fn unsupported(dialect: Dialect, feature: &'static str) -> Self {
        Self::UnsupportedFeature { dialect, feature }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedComposition(message.into())
    }
}

/// Result type alias for SQL generation.
pub type Result<T> = std::result::Result<T, SqlError>;
