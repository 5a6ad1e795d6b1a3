//! Field setter rendering.

use tracing::debug;

use super::{RenderContext, ToSql};
use crate::ast::{FieldSetter, SetterValue};
use crate::config::RenderConfig;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::param::{Parameter, ParameterCreator};
use crate::value::SqlValue;

impl ToSql for FieldSetter {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let column = ctx.change_ident(self.column());
        let value = match &self.value {
            SetterValue::Increment(amount) => {
                format!("{column} + {}", ctx.value(&SqlValue::from(*amount)))
            }
            _ => self.value_sql(ctx)?,
        };
        Ok(format!("{column} = {value}"))
    }
}

impl FieldSetter {
    /// Renders the column and the value separately, for INSERT lists.
    pub fn column_and_value(&self, dialect: Dialect) -> Result<(String, String)> {
        let config = RenderConfig::default();
        let mut ctx = RenderContext::inline(dialect, &config);
        self.column_and_value_in(&mut ctx)
    }

    /// Parameterized variant of [`column_and_value`](Self::column_and_value).
    pub fn column_and_value_with_params(
        &self,
        dialect: Dialect,
        creator: &mut dyn ParameterCreator,
    ) -> Result<((String, String), Vec<Parameter>)> {
        let config = RenderConfig::default();
        let mut ctx = RenderContext::parameterized(dialect, &config, creator);
        let pair = self.column_and_value_in(&mut ctx)?;
        Ok((pair, ctx.into_params()))
    }

    pub(crate) fn column_and_value_in(&self, ctx: &mut RenderContext<'_>) -> Result<(String, String)> {
        let column = ctx.change_ident(self.column());
        let value = match &self.value {
            SetterValue::Increment(amount) => ctx.value(&SqlValue::from(*amount)),
            _ => self.value_sql(ctx)?,
        };
        Ok((column, value))
    }

    /// Renders the written value of a non-increment setter.
    fn value_sql(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match &self.value {
            SetterValue::DateTime(value) if !ctx.config().datetime_in_range(value) => {
                debug!(
                    column = self.column(),
                    value = %value,
                    "Datetime outside the supported range, writing NULL"
                );
                Ok(ctx.value(&SqlValue::Null))
            }
            SetterValue::Expression(expr) => expr.render(ctx),
            value => Ok(ctx.value(&value.as_constant().unwrap_or(SqlValue::Null))),
        }
    }
}
