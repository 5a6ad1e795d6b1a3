//! Render configuration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlError};

/// Settings shared by every node of one render call.
///
/// The defaults reproduce the behavior expected by the mapping pipeline;
/// a configuration is usually loaded once (see the CLI's `--config`) and
/// reused for every statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base name of generated parameters, placed between the dialect marker
    /// and the counter (`@p0`).
    pub parameter_prefix: String,
    /// Earliest datetime a datetime setter writes.
    pub datetime_min: NaiveDateTime,
    /// Latest datetime a datetime setter writes.
    pub datetime_max: NaiveDateTime,
}

impl RenderConfig {
    /// Checks the configuration for values the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.parameter_prefix.is_empty()
            || !self
                .parameter_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SqlError::Config(format!(
                "parameter prefix must be a non-empty identifier, got {:?}",
                self.parameter_prefix
            )));
        }
        if self.datetime_min > self.datetime_max {
            return Err(SqlError::Config(format!(
                "datetime range is inverted: {} > {}",
                self.datetime_min, self.datetime_max
            )));
        }
        Ok(())
    }

    /// Returns true when a datetime setter may write `value`.
    #[must_use]
    pub fn datetime_in_range(&self, value: &NaiveDateTime) -> bool {
        (self.datetime_min..=self.datetime_max).contains(value)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parameter_prefix: String::from("p"),
            datetime_min: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(1753, 1, 1).unwrap_or(NaiveDate::MIN),
                NaiveTime::MIN,
            ),
            datetime_max: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX),
                NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
            ),
        }
    }
}
