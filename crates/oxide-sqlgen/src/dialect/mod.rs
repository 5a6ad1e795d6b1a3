//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. Every
//! dialect-specific decision the renderer makes (quoting, placeholders,
//! string concatenation, pagination, unsupported constructs) is answered by
//! a method on [`Dialect`], so adding a dialect forces every rule to be
//! revisited.

mod pagination;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SqlError;
use crate::value::SqlValue;

pub use pagination::Pagination;

/// The database products the renderer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Microsoft SQL Server.
    SqlServer,
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    PostgreSql,
    /// Oracle.
    Oracle,
    /// SQLite.
    Sqlite,
    /// OLE DB providers.
    Oledb,
    /// Any other ANSI-ish database.
    Other,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::SqlServer,
        Self::MySql,
        Self::PostgreSql,
        Self::Oracle,
        Self::Sqlite,
        Self::Oledb,
        Self::Other,
    ];

    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Oracle => "oracle",
            Self::Sqlite => "sqlite",
            Self::Oledb => "oledb",
            Self::Other => "other",
        }
    }

    /// Returns the opening and closing identifier quote characters.
    #[must_use]
    pub const fn identifier_quotes(self) -> (char, char) {
        match self {
            Self::SqlServer => ('[', ']'),
            Self::PostgreSql => ('"', '"'),
            Self::MySql | Self::Oracle | Self::Sqlite | Self::Oledb | Self::Other => ('`', '`'),
        }
    }

    /// Quotes an identifier used in expressions and sources.
    #[must_use]
    pub fn quote_identifier(self, name: &str) -> String {
        let (open, close) = self.identifier_quotes();
        format!("{open}{name}{close}")
    }

    /// Quotes an identifier in the header or SET list of an INSERT, UPDATE or
    /// DELETE statement.
    ///
    /// Oracle change statements use bare identifiers.
    #[must_use]
    pub fn quote_change_identifier(self, name: &str) -> String {
        match self {
            Self::Oracle => String::from(name),
            _ => self.quote_identifier(name),
        }
    }

    /// Returns the character that prefixes a named parameter.
    #[must_use]
    pub const fn parameter_marker(self) -> char {
        match self {
            Self::SqlServer | Self::PostgreSql | Self::Oledb | Self::Other => '@',
            Self::Oracle => ':',
            Self::MySql => '?',
            Self::Sqlite => '$',
        }
    }

    /// Builds the placeholder name of the `index`-th parameter of a render call.
    #[must_use]
    pub fn parameter_name(self, prefix: &str, index: usize) -> String {
        format!("{}{prefix}{index}", self.parameter_marker())
    }

    /// Concatenates already rendered string operands.
    #[must_use]
    pub fn concat(self, parts: &[String]) -> String {
        match self {
            Self::SqlServer | Self::Oledb => parts.join(" + "),
            Self::MySql | Self::PostgreSql => format!("concat({})", parts.join(", ")),
            // Oracle's concat takes exactly two arguments.
            Self::Oracle => match parts.split_last() {
                None => String::from("''"),
                Some((last, rest)) => rest
                    .iter()
                    .rev()
                    .fold(last.clone(), |acc, part| format!("concat({part}, {acc})")),
            },
            Self::Sqlite | Self::Other => parts.join(" || "),
        }
    }

    /// Returns how row limiting is expressed.
    #[must_use]
    pub const fn pagination(self) -> Pagination {
        match self {
            Self::SqlServer => Pagination::RowNumber,
            Self::Oracle => Pagination::RowNum,
            Self::MySql => Pagination::LimitComma {
                unbounded: "18446744073709551615",
            },
            Self::Sqlite => Pagination::LimitComma { unbounded: "-1" },
            Self::PostgreSql | Self::Oledb | Self::Other => Pagination::LimitOffset,
        }
    }

    /// Returns the value bound for a boolean parameter.
    ///
    /// SQL Server needs an unambiguous `1`/`0`; the others accept booleans.
    #[must_use]
    pub const fn bool_parameter(self, value: bool) -> SqlValue {
        match self {
            Self::SqlServer => SqlValue::Int(if value { 1 } else { 0 }),
            _ => SqlValue::Bool(value),
        }
    }

    /// Renders a quoted string literal.
    ///
    /// Quotes are doubled on every dialect. MySQL also reads `\` as an
    /// escape character, so backslashes are doubled there too.
    #[must_use]
    pub fn string_literal(self, text: &str) -> String {
        let escaped = match self {
            Self::MySql => text.replace('\\', "\\\\").replace('\'', "''"),
            _ => text.replace('\'', "''"),
        };
        format!("'{escaped}'")
    }

    /// Renders a binary literal.
    #[must_use]
    pub fn blob_literal(self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
        match self {
            Self::SqlServer => format!("0x{hex}"),
            _ => format!("X'{hex}'"),
        }
    }

    /// Returns whether a joined source may be the target of an UPDATE.
    #[must_use]
    pub const fn supports_joined_update(self) -> bool {
        !matches!(self, Self::Sqlite)
    }

    /// Returns whether a joined source may be the target of a DELETE.
    #[must_use]
    pub const fn supports_joined_delete(self) -> bool {
        !matches!(self, Self::Sqlite | Self::PostgreSql)
    }

    /// Returns whether INTERSECT and EXCEPT are available.
    #[must_use]
    pub const fn supports_intersect_except(self) -> bool {
        !matches!(self, Self::MySql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "mysql" => Ok(Self::MySql),
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            "oracle" => Ok(Self::Oracle),
            "sqlite" => Ok(Self::Sqlite),
            "oledb" => Ok(Self::Oledb),
            "other" => Ok(Self::Other),
            _ => Err(SqlError::Config(format!("unknown dialect: {s}"))),
        }
    }
}
