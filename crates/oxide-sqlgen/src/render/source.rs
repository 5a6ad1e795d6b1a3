//! Source rendering.

use super::{RenderContext, ToSql};
use crate::ast::{JoinedSource, MonomerSource, SimpleSource, Source};
use crate::error::Result;

impl ToSql for Source {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Monomer(monomer) => monomer.render(ctx),
            Self::Joined(joined) => joined.render(ctx),
        }
    }
}

impl ToSql for SimpleSource {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let table = ctx.ident(&self.table);
        Ok(match &self.alias {
            Some(alias) => format!("{table} {}", ctx.ident(alias)),
            None => table,
        })
    }
}

impl ToSql for MonomerSource {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let inner = match self {
            Self::Simple(simple) => return simple.render(ctx),
            Self::Select(select) => ctx.nested(|ctx| select.query.render(ctx))?,
            Self::Set(set) => ctx.nested(|ctx| set.set.render(ctx))?,
        };
        Ok(format!("({inner}) {}", ctx.ident(self.symbol())))
    }
}

impl ToSql for JoinedSource {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let left = self.left.render(ctx)?;
        let right = self.right.render(ctx)?;
        let right = if self.right.is_joined() {
            format!("({right})")
        } else {
            right
        };
        let criteria = self.criteria.render(ctx)?;
        Ok(format!(
            "{left} {} {right} ON {criteria}",
            self.join_type.as_str()
        ))
    }
}
