//! # oxide-sqlgen
//!
//! SQL generation for ORM statement trees.
//!
//! A statement is assembled from owned nodes ([`QuerySql`], [`QuerySet`],
//! [`ChangeSql`]) and rendered for one of the supported [`Dialect`]s. The
//! renderer knows each dialect's quoting, placeholders, pagination and the
//! constructs it cannot express.
//!
//! ## Parameterized rendering
//!
//! On the production path every constant becomes a bound [`Parameter`]:
//!
//! ```rust
//! use oxide_sqlgen::{col, DefaultParameterCreator, Dialect, QuerySql, SqlValue, ToSql};
//!
//! let user_input = "'; DROP TABLE Users; --";
//! let query = QuerySql::from_table("Users")
//!     .filter(col("Name").unwrap().eq(user_input))
//!     .take(5);
//! let (sql, params) = query
//!     .to_sql_with_params(Dialect::PostgreSql, &mut DefaultParameterCreator)
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT * FROM \"Users\" WHERE \"Name\" = @p0 LIMIT 5");
//! assert_eq!(params[0].value, SqlValue::Text(user_input.to_string()));
//! ```
//!
//! ## Inline rendering
//!
//! [`ToSql::to_sql`] writes escaped literals instead. It is meant for logs
//! and diagnostics:
//!
//! ```rust
//! use oxide_sqlgen::{Dialect, QuerySql, ToSql};
//!
//! let query = QuerySql::from_table("Users").skip(10).take(5);
//! assert_eq!(query.to_sql(Dialect::MySql).unwrap(), "SELECT * FROM `Users` LIMIT 10,5");
//! ```

pub mod ast;
pub mod config;
pub mod dialect;
pub mod error;
pub mod param;
pub mod render;
pub mod value;

pub use ast::{
    col, qualified_col, Aggregation, ChangeSql, Criteria, Expression, Field, FieldSetter, Order,
    QuerySet, QuerySql, Source, Statement,
};
pub use config::RenderConfig;
pub use dialect::Dialect;
pub use error::{Result, SqlError};
pub use param::{DefaultParameterCreator, Parameter, ParameterCreator};
pub use render::{RenderContext, ToSql};
pub use value::{Numeric, SqlValue, TimeSpan, ToSqlValue, ValueType};
