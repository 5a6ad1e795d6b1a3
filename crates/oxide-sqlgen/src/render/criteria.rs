//! Criteria rendering.

use super::{RenderContext, ToSql};
use crate::ast::{ComplexCriteria, Criteria, InSelectCriteria, LogicOperator};
use crate::error::Result;

impl ToSql for Criteria {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Expression(expr) => expr.render(ctx),
            Self::Complex(complex) => complex.render(ctx),
            Self::InSelect(in_select) => in_select.render(ctx),
        }
    }
}

impl ToSql for ComplexCriteria {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let children = self
            .children()
            .iter()
            .map(|child| -> Result<String> { Ok(format!("({})", child.render(ctx)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(match self.operator() {
            LogicOperator::Not => format!("NOT {}", children.join("")),
            operator => children.join(&format!(" {} ", operator.as_str())),
        })
    }
}

impl ToSql for InSelectCriteria {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let left = self.left.render(ctx)?;
        let query = ctx.nested(|ctx| self.query.render(ctx))?;
        Ok(format!("{left} {} ({query})", self.op.as_str()))
    }
}
