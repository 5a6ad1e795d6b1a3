//! Set operation rendering.

use super::{render_list, RenderContext, ToSql};
use crate::ast::{QuerySet, SetOperand, SetOperator};
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// Alias of an operand wrapped in a derived table.
const SET_ALIAS: &str = "set_t";

fn keyword(operator: SetOperator, dialect: Dialect) -> Result<&'static str> {
    match operator {
        SetOperator::Intersect | SetOperator::Except if !dialect.supports_intersect_except() => {
            Err(SqlError::unsupported(dialect, operator.as_str()))
        }
        SetOperator::Except if dialect == Dialect::Oracle => Ok("MINUS"),
        operator => Ok(operator.as_str()),
    }
}

/// Ordered or paged queries and nested sets cannot stand directly beside a
/// set operator, so they become derived tables.
fn operand(operand: &SetOperand, ctx: &mut RenderContext<'_>) -> Result<String> {
    match operand {
        SetOperand::Query(query) if query.orders.is_empty() && !query.is_paged() => {
            query.render(ctx)
        }
        SetOperand::Query(query) => {
            let inner = ctx.nested(|ctx| query.render(ctx))?;
            Ok(format!("SELECT * FROM ({inner}) {SET_ALIAS}"))
        }
        SetOperand::Set(set) => {
            let inner = ctx.nested(|ctx| set.render(ctx))?;
            Ok(format!("SELECT * FROM ({inner}) {SET_ALIAS}"))
        }
    }
}

impl ToSql for QuerySet {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let keyword = keyword(self.operator, ctx.dialect())?;
        let left = operand(&self.left, ctx)?;
        let right = operand(&self.right, ctx)?;
        let mut sql = format!("{left} {keyword} {right}");
        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&render_list(&self.orders, ctx)?);
        }
        Ok(sql)
    }
}
