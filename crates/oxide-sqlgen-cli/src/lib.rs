//! Loading and rendering of stored statements for the `oxide-sqlgen`
//! command.
//!
//! Statements and configurations are JSON documents in the serde form of
//! [`Statement`] and [`RenderConfig`].

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use oxide_sqlgen::{DefaultParameterCreator, Dialect, Parameter, RenderConfig, Statement, ToSql};

/// How constants reach the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Escaped literals in the text.
    Inline,
    /// Placeholders plus a parameter list.
    Parameterized,
}

/// The result of rendering one statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    /// Target dialect.
    pub dialect: Dialect,
    /// SQL text.
    pub sql: String,
    /// Bound parameters, in placeholder order.
    pub parameters: Vec<Parameter>,
}

impl Rendered {
    /// Formats the SQL followed by one `name = value` line per parameter.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.sql);
        for param in &self.parameters {
            out.push_str(&format!("{} = {}\n", param.name, param.value));
        }
        out
    }

    /// Formats as a JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rendered statement")
    }
}

/// Loads and validates a configuration file, or returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: RenderConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!(path = %path.display(), prefix = %config.parameter_prefix, "Loaded config");
    Ok(config)
}

/// Parses a statement document.
pub fn parse_statement(json: &str) -> Result<Statement> {
    serde_json::from_str(json).context("Invalid statement document")
}

/// Reads a statement from a file, or from stdin when no path is given.
pub fn read_statement(path: Option<&Path>) -> Result<Statement> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read statement {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read statement from stdin")?;
            buffer
        }
    };
    parse_statement(&content)
}

/// Renders a statement.
pub fn render(
    statement: &Statement,
    dialect: Dialect,
    config: &RenderConfig,
    mode: Mode,
) -> Result<Rendered> {
    let (sql, parameters) = match mode {
        Mode::Inline => (statement.to_sql_with_config(dialect, config)?, Vec::new()),
        Mode::Parameterized => statement.to_sql_with_params_and_config(
            dialect,
            &mut DefaultParameterCreator,
            config,
        )?,
    };
    Ok(Rendered {
        dialect,
        sql,
        parameters,
    })
}
