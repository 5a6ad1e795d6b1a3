//! INSERT, UPDATE and DELETE rendering.

use super::{render_list, RenderContext, ToSql};
use crate::ast::{ChangeSql, ChangeType, MonomerSource, Source};
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

impl ToSql for ChangeSql {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self.change_type {
            ChangeType::Insert => render_insert(self, ctx),
            ChangeType::Update => render_update(self, ctx),
            ChangeType::Delete => render_delete(self, ctx),
        }
    }
}

/// Names the changed table: table and alias of a plain source, the whole
/// source otherwise.
fn header(change: &ChangeSql, ctx: &mut RenderContext<'_>) -> Result<String> {
    match &change.source {
        Source::Monomer(MonomerSource::Simple(simple)) => {
            let table = ctx.change_ident(&simple.table);
            Ok(match &simple.alias {
                Some(alias) => format!("{table} {}", ctx.change_ident(alias)),
                None => table,
            })
        }
        source => source.render(ctx),
    }
}

fn where_clause(change: &ChangeSql, ctx: &mut RenderContext<'_>) -> Result<String> {
    match &change.criteria {
        Some(criteria) => Ok(format!(" WHERE {}", criteria.render(ctx)?)),
        None => Ok(String::new()),
    }
}

fn render_insert(change: &ChangeSql, ctx: &mut RenderContext<'_>) -> Result<String> {
    let table = ctx.change_ident(&change.target()?.table);
    if change.setters().is_empty() {
        return Ok(match ctx.dialect() {
            Dialect::MySql => format!("INSERT INTO {table} () VALUES ()"),
            _ => format!("INSERT INTO {table} DEFAULT VALUES"),
        });
    }
    let mut columns = Vec::with_capacity(change.setters().len());
    let mut values = Vec::with_capacity(change.setters().len());
    for setter in change.setters() {
        let (column, value) = setter.column_and_value_in(ctx)?;
        columns.push(column);
        values.push(value);
    }
    Ok(format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        values.join(", ")
    ))
}

fn render_update(change: &ChangeSql, ctx: &mut RenderContext<'_>) -> Result<String> {
    change.target()?;
    if change.setters().is_empty() {
        return Err(SqlError::malformed("update without setters"));
    }
    let dialect = ctx.dialect();
    if change.source.is_joined() && !dialect.supports_joined_update() {
        return Err(SqlError::unsupported(dialect, "UPDATE of a joined source"));
    }
    if dialect == Dialect::SqlServer {
        let symbol = ctx.change_ident(change.source.leftmost_monomer().symbol());
        let assignments = render_list(change.setters(), ctx)?;
        let source = change.source.render(ctx)?;
        let filter = where_clause(change, ctx)?;
        return Ok(format!("UPDATE {symbol} SET {assignments} FROM {source}{filter}"));
    }
    let header = header(change, ctx)?;
    let assignments = render_list(change.setters(), ctx)?;
    let filter = where_clause(change, ctx)?;
    Ok(format!("UPDATE {header} SET {assignments}{filter}"))
}

fn render_delete(change: &ChangeSql, ctx: &mut RenderContext<'_>) -> Result<String> {
    change.target()?;
    let dialect = ctx.dialect();
    let joined = change.source.is_joined();
    if joined && !dialect.supports_joined_delete() {
        return Err(SqlError::unsupported(dialect, "DELETE of a joined source"));
    }
    let target = change.source.leftmost_monomer();
    let named = match dialect {
        Dialect::SqlServer => joined || target.alias().is_some(),
        Dialect::MySql | Dialect::Oledb | Dialect::Other => joined,
        Dialect::PostgreSql | Dialect::Oracle | Dialect::Sqlite => false,
    };
    let head = if named {
        let symbol = ctx.change_ident(target.symbol());
        format!("DELETE {symbol} FROM {}", change.source.render(ctx)?)
    } else {
        format!("DELETE FROM {}", header(change, ctx)?)
    };
    Ok(format!("{head}{}", where_clause(change, ctx)?))
}
