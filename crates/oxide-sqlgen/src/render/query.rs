//! SELECT rendering and pagination.

use tracing::trace;

use super::{render_list, RenderContext, ToSql};
use crate::ast::visitor::relocate;
use crate::ast::{
    Aggregation, Criteria, Expression, Field, MonomerSource, Order, QuerySql, SelectionItem,
};
use crate::dialect::Pagination;
use crate::error::Result;

/// Alias of the paged query an aggregate runs over.
const AGGREGATE_ALIAS: &str = "agg_t";
/// Alias of the paged query wrapped by pagination.
const PAGING_ALIAS: &str = "paging_t";
/// Alias of the DISTINCT rows numbered by a `ROW_NUMBER()` wrapper.
const DISTINCT_ALIAS: &str = "distinct_t";

impl ToSql for Order {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.expression.render(ctx)?,
            self.direction.as_str()
        ))
    }
}

impl ToSql for SelectionItem {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let expr = self.expression.render(ctx)?;
        Ok(match &self.alias {
            Some(alias) => format!("{expr} AS {}", ctx.ident(alias)),
            None => expr,
        })
    }
}

impl ToSql for QuerySql {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        if self.is_pure_set_wrapper() {
            if let Some(MonomerSource::Set(set)) = self.source.as_monomer() {
                return set.set.render(ctx);
            }
        }
        match &self.aggregation {
            Some(aggregation) => render_aggregate(self, aggregation, ctx),
            None => render_select(self, ctx),
        }
    }
}

fn select_head(query: &QuerySql, top: Option<u64>) -> String {
    let mut head = String::from("SELECT ");
    if query.distinct {
        head.push_str("DISTINCT ");
    }
    if let Some(top) = top {
        head.push_str(&format!("TOP {top} "));
    }
    head
}

fn projection(query: &QuerySql, ctx: &mut RenderContext<'_>) -> Result<String> {
    if query.selection.is_empty() {
        return Ok(String::from("*"));
    }
    render_list(&query.selection, ctx)
}

fn where_clause(
    criteria: Option<&Criteria>,
    extra: Option<&str>,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    Ok(match (criteria, extra) {
        (Some(criteria), Some(extra)) => format!(" WHERE ({}) AND {extra}", criteria.render(ctx)?),
        (Some(criteria), None) => format!(" WHERE {}", criteria.render(ctx)?),
        (None, Some(extra)) => format!(" WHERE {extra}"),
        (None, None) => String::new(),
    })
}

/// Renders FROM through HAVING.
fn body(query: &QuerySql, extra_filter: Option<&str>, ctx: &mut RenderContext<'_>) -> Result<String> {
    let mut sql = format!(" FROM {}", query.source.render(ctx)?);
    sql.push_str(&where_clause(query.criteria.as_ref(), extra_filter, ctx)?);
    if !query.group_by.is_empty() {
        sql.push_str(&format!(" GROUP BY {}", render_list(&query.group_by, ctx)?));
    }
    if let Some(having) = &query.having {
        sql.push_str(&format!(" HAVING {}", having.render(ctx)?));
    }
    Ok(sql)
}

fn order_clause(orders: &[Order], ctx: &mut RenderContext<'_>) -> Result<String> {
    if orders.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(" ORDER BY {}", render_list(orders, ctx)?))
}

/// Renders the query without any row limiting.
fn unpaged(
    query: &QuerySql,
    top: Option<u64>,
    extra_filter: Option<&str>,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let head = select_head(query, top);
    let projection = projection(query, ctx)?;
    let body = body(query, extra_filter, ctx)?;
    let orders = order_clause(&query.orders, ctx)?;
    Ok(format!("{head}{projection}{body}{orders}"))
}

fn render_select(query: &QuerySql, ctx: &mut RenderContext<'_>) -> Result<String> {
    match ctx.dialect().pagination() {
        Pagination::RowNumber => render_row_number(query, ctx),
        Pagination::RowNum => render_rownum(query, ctx),
        strategy => {
            let sql = unpaged(query, None, None, ctx)?;
            let limit = strategy
                .trailing_clause(query.skip, query.take)
                .unwrap_or_default();
            Ok(format!("{sql}{limit}"))
        }
    }
}

/// Returns a copy of the query ordered by the natural order of its source,
/// or `None` when the source guarantees no order.
fn with_source_order(query: &QuerySql) -> Option<QuerySql> {
    let mut copy = query.clone();
    match copy.bubble_source_order() {
        Ok(()) => Some(copy),
        Err(err) => {
            trace!(error = %err, "paging without a source order");
            None
        }
    }
}

/// Name of a paging wrapper's row-number column. Nested wrappers get a
/// depth suffix so that an outer `SELECT *` never sees the column twice.
fn row_number_column(base: &str, ctx: &RenderContext<'_>) -> String {
    match ctx.depth() {
        0 => String::from(base),
        depth => format!("{base}_{depth}"),
    }
}

/// Rewrites an order of a DISTINCT query onto the derived table holding its
/// rows, through the projected column when there is one.
fn onto_distinct(query: &QuerySql, order: &Order) -> Order {
    let column = query
        .selection
        .iter()
        .find(|item| item.expression == order.expression)
        .and_then(|item| {
            item.alias
                .clone()
                .or_else(|| item.expression.as_field().map(|field| String::from(field.name())))
        })
        .and_then(|column| Field::qualified(DISTINCT_ALIAS, column).ok());
    let expression = column.map_or_else(
        || {
            let mut expression = order.expression.clone();
            relocate(&mut expression, DISTINCT_ALIAS);
            expression
        },
        Expression::field,
    );
    Order::new(expression, order.direction)
}

fn over_clause(orders: &[Order], ctx: &mut RenderContext<'_>) -> Result<String> {
    if orders.is_empty() {
        return Ok(String::from("(SELECT NULL)"));
    }
    render_list(orders, ctx)
}

/// `TOP n`, or a `ROW_NUMBER()` wrapper when rows are skipped.
///
/// DISTINCT is applied in a derived table below the row numbering. The
/// closing `ORDER BY` is only valid in a derived table next to `TOP`.
fn render_row_number(query: &QuerySql, ctx: &mut RenderContext<'_>) -> Result<String> {
    let Some(skip) = query.skip else {
        return unpaged(query, query.take, None, ctx);
    };
    let ordered = if query.orders.is_empty() {
        with_source_order(query)
    } else {
        None
    };
    let query = ordered.as_ref().unwrap_or(query);

    let rownum = row_number_column("rownum", ctx);
    let top = query.take.map(|take| format!("TOP {take} ")).unwrap_or_default();
    let numbered = if query.distinct {
        let orders: Vec<Order> = query
            .orders
            .iter()
            .map(|order| onto_distinct(query, order))
            .collect();
        let over = over_clause(&orders, ctx)?;
        let rows = ctx.nested(|ctx| {
            let head = select_head(query, None);
            let projection = projection(query, ctx)?;
            let body = body(query, None, ctx)?;
            Ok(format!("{head}{projection}{body}"))
        })?;
        format!(
            "SELECT *, ROW_NUMBER() OVER (ORDER BY {over}) AS {rownum} FROM ({rows}) {DISTINCT_ALIAS}"
        )
    } else {
        let head = select_head(query, None);
        let projection = projection(query, ctx)?;
        let over = over_clause(&query.orders, ctx)?;
        let body = body(query, None, ctx)?;
        format!("{head}{projection}, ROW_NUMBER() OVER (ORDER BY {over}) AS {rownum}{body}")
    };
    let order = if ctx.is_nested() && query.take.is_none() {
        String::new()
    } else {
        format!(" ORDER BY {rownum}")
    };
    Ok(format!(
        "SELECT {top}* FROM ({numbered}) {PAGING_ALIAS} WHERE {rownum} > {skip}{order}"
    ))
}

/// `ROWNUM` wrappers.
///
/// With only `take` set, the inline rendering filters the query itself while
/// the parameterized rendering wraps it, so that the cap applies after
/// ordering.
fn render_rownum(query: &QuerySql, ctx: &mut RenderContext<'_>) -> Result<String> {
    match (query.skip, query.take) {
        (None, None) => unpaged(query, None, None, ctx),
        (Some(skip), take) => {
            let rownum = row_number_column("paging_rownumber", ctx);
            let base = unpaged(query, None, None, ctx)?;
            let cap = take
                .map(|take| format!(" WHERE ROWNUM <= {}", skip.saturating_add(take)))
                .unwrap_or_default();
            Ok(format!(
                "SELECT * FROM (SELECT {PAGING_ALIAS}.*, ROWNUM {rownum} FROM ({base}) \
                 {PAGING_ALIAS}{cap}) WHERE {rownum} > {skip}"
            ))
        }
        (None, Some(take)) if ctx.is_parameterized() => {
            let base = unpaged(query, None, None, ctx)?;
            Ok(format!("SELECT * FROM ({base}) WHERE ROWNUM <= {take}"))
        }
        (None, Some(take)) => {
            let cap = format!("ROWNUM <= {take}");
            unpaged(query, None, Some(&cap), ctx)
        }
    }
}

/// Single-row aggregate. Projection, grouping and ordering do not apply
/// unless the rows are made distinct or paged first.
fn render_aggregate(
    query: &QuerySql,
    aggregation: &Aggregation,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let mut aggregate = aggregation.to_expression();
    if !query.distinct && !query.is_paged() {
        let aggregate = aggregate.render(ctx)?;
        let source = query.source.render(ctx)?;
        let filter = where_clause(query.criteria.as_ref(), None, ctx)?;
        return Ok(format!("SELECT {aggregate} FROM {source}{filter}"));
    }
    relocate(&mut aggregate, AGGREGATE_ALIAS);
    let aggregate = aggregate.render(ctx)?;
    let mut rows = query.clone();
    rows.aggregation = None;
    let rows = ctx.nested(|ctx| render_select(&rows, ctx))?;
    Ok(format!("SELECT {aggregate} FROM ({rows}) {AGGREGATE_ALIAS}"))
}
