//! Expression rendering.

use super::{RenderContext, ToSql};
use crate::ast::{
    ArithmeticOp, BitOp, ComparisonOp, Expression, Field, InOp, LikeMode, SqlFunction, UnaryOp,
};
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};
use crate::value::SqlValue;

impl ToSql for Field {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        Ok(match self.source() {
            Some(source) => format!("{}.{}", ctx.ident(source), ctx.ident(self.name())),
            None => ctx.ident(self.name()),
        })
    }
}

impl ToSql for Expression {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Constant(value) => Ok(ctx.value(value)),
            Self::Field { field, .. } => field.render(ctx),
            Self::Wildcard { source } => Ok(match source {
                Some(source) => format!("{}.*", ctx.ident(source)),
                None => String::from("*"),
            }),
            Self::Arithmetic { op, left, right } => render_arithmetic(*op, left, right, ctx),
            Self::Comparison { op, left, right } => render_comparison(*op, left, right, ctx),
            Self::BinaryLogic { op, left, right } => {
                let left = operand(left, ctx)?;
                let right = operand(right, ctx)?;
                Ok(format!("{left} {} {right}", op.as_str()))
            }
            Self::BinaryBit { op, left, right } => render_bit(*op, left, right, ctx),
            Self::Unary { op, operand: inner } => Ok(match op {
                UnaryOp::Not => format!("NOT ({})", inner.render(ctx)?),
                UnaryOp::Negate => format!("-({})", inner.render(ctx)?),
                UnaryOp::BitNot => format!("~{}", operand(inner, ctx)?),
            }),
            Self::Like {
                left,
                pattern,
                mode,
            } => render_like(left, pattern, *mode, ctx),
            Self::In { op, left, values } => render_in(*op, left, values, ctx),
            Self::Function {
                function,
                args,
                distinct,
            } => render_function(*function, args, *distinct, ctx),
        }
    }
}

/// Renders a nested operand, parenthesized when it is itself an operator.
fn operand(expr: &Expression, ctx: &mut RenderContext<'_>) -> Result<String> {
    let sql = expr.render(ctx)?;
    if expr.is_compound() {
        Ok(format!("({sql})"))
    } else {
        Ok(sql)
    }
}

fn render_arithmetic(
    op: ArithmeticOp,
    left: &Expression,
    right: &Expression,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    if op == ArithmeticOp::Modulo && ctx.dialect() == Dialect::Oracle {
        let left = left.render(ctx)?;
        let right = right.render(ctx)?;
        return Ok(format!("MOD({left}, {right})"));
    }
    let left = operand(left, ctx)?;
    let right = operand(right, ctx)?;
    Ok(format!("{left} {} {right}", op.as_str()))
}

const fn is_null_constant(expr: &Expression) -> bool {
    matches!(expr, Expression::Constant(SqlValue::Null))
}

/// Returns the non-constant side of a comparison against a boolean constant.
fn boolean_comparison<'e>(
    left: &'e Expression,
    right: &'e Expression,
) -> Option<(&'e Expression, bool)> {
    let constant = |expr: &Expression| match expr {
        Expression::Constant(value) => value.as_bool(),
        _ => None,
    };
    constant(right)
        .map(|value| (left, value))
        .or_else(|| constant(left).map(|value| (right, value)))
}

fn render_comparison(
    op: ComparisonOp,
    left: &Expression,
    right: &Expression,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    if matches!(op, ComparisonOp::Equal | ComparisonOp::NotEqual) {
        let null_test = if op == ComparisonOp::Equal {
            "IS NULL"
        } else {
            "IS NOT NULL"
        };
        if is_null_constant(right) {
            return Ok(format!("{} {null_test}", operand(left, ctx)?));
        }
        if is_null_constant(left) {
            return Ok(format!("{} {null_test}", operand(right, ctx)?));
        }
        // SQL Server has no boolean literal in predicates.
        if ctx.dialect() == Dialect::SqlServer {
            if let Some((subject, value)) = boolean_comparison(left, right) {
                let sql = operand(subject, ctx)?;
                let holds = (op == ComparisonOp::Equal) == value;
                return Ok(if holds { sql } else { format!("NOT {sql}") });
            }
        }
    }
    let left = operand(left, ctx)?;
    let right = operand(right, ctx)?;
    Ok(format!("{left} {} {right}", op.as_str()))
}

fn render_bit(
    op: BitOp,
    left: &Expression,
    right: &Expression,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let dialect = ctx.dialect();
    let symbol = match (op, dialect) {
        (BitOp::And, Dialect::Oracle) => {
            let left = left.render(ctx)?;
            let right = right.render(ctx)?;
            return Ok(format!("BITAND({left}, {right})"));
        }
        (BitOp::Or, Dialect::Oracle) => {
            return Err(SqlError::unsupported(dialect, "bitwise OR"));
        }
        (BitOp::Xor, Dialect::Oracle | Dialect::Sqlite) => {
            return Err(SqlError::unsupported(dialect, "bitwise XOR"));
        }
        (BitOp::Xor, Dialect::PostgreSql) => "#",
        (BitOp::Xor, _) => "^",
        (BitOp::And, _) => "&",
        (BitOp::Or, _) => "|",
    };
    let left = operand(left, ctx)?;
    let right = operand(right, ctx)?;
    Ok(format!("{left} {symbol} {right}"))
}

fn render_like(
    left: &Expression,
    pattern: &Expression,
    mode: LikeMode,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let subject = operand(left, ctx)?;
    let dialect = ctx.dialect();
    let pattern = match pattern {
        // SQLite takes the markers inside the single pattern operand.
        Expression::Constant(SqlValue::Text(text)) if dialect == Dialect::Sqlite => {
            let lead = if mode.leading() { "%" } else { "" };
            let trail = if mode.trailing() { "%" } else { "" };
            ctx.value(&SqlValue::Text(format!("{lead}{text}{trail}")))
        }
        other => {
            let sql = operand(other, ctx)?;
            if mode == LikeMode::Exact {
                sql
            } else {
                let mut parts = Vec::with_capacity(3);
                if mode.leading() {
                    parts.push(String::from("'%'"));
                }
                parts.push(sql);
                if mode.trailing() {
                    parts.push(String::from("'%'"));
                }
                dialect.concat(&parts)
            }
        }
    };
    Ok(format!("{subject} LIKE {pattern}"))
}

fn render_in(
    op: InOp,
    left: &Expression,
    values: &[SqlValue],
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    if values.is_empty() {
        return Ok(String::from(match op {
            InOp::In => "1<>1",
            InOp::NotIn => "1=1",
        }));
    }
    let subject = operand(left, ctx)?;
    let list: Vec<String> = values.iter().map(|value| ctx.value(value)).collect();
    Ok(format!("{subject} {} ({})", op.as_str(), list.join(", ")))
}

const fn function_name(function: SqlFunction, dialect: Dialect) -> &'static str {
    match function {
        SqlFunction::Count => "COUNT",
        SqlFunction::Sum => "SUM",
        SqlFunction::Avg => "AVG",
        SqlFunction::Max => "MAX",
        SqlFunction::Min => "MIN",
        SqlFunction::Upper => "UPPER",
        SqlFunction::Lower => "LOWER",
        SqlFunction::Length => match dialect {
            Dialect::SqlServer => "LEN",
            _ => "LENGTH",
        },
        SqlFunction::Trim => "TRIM",
        SqlFunction::Abs => "ABS",
        SqlFunction::Round => "ROUND",
        SqlFunction::Coalesce => "COALESCE",
        SqlFunction::Substring => match dialect {
            Dialect::Oracle | Dialect::Sqlite => "SUBSTR",
            _ => "SUBSTRING",
        },
        SqlFunction::Now => match dialect {
            Dialect::SqlServer => "GETDATE()",
            Dialect::MySql | Dialect::PostgreSql => "NOW()",
            Dialect::Oracle => "SYSDATE",
            Dialect::Sqlite => "datetime('now')",
            Dialect::Oledb | Dialect::Other => "CURRENT_TIMESTAMP",
        },
    }
}

fn render_function(
    function: SqlFunction,
    args: &[Expression],
    distinct: bool,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let dialect = ctx.dialect();
    if function == SqlFunction::Now {
        return Ok(String::from(function_name(function, dialect)));
    }
    let args = args
        .iter()
        .map(|arg| arg.render(ctx))
        .collect::<Result<Vec<_>>>()?
        .join(", ");
    let distinct = if distinct { "DISTINCT " } else { "" };
    if function == SqlFunction::Trim && dialect == Dialect::SqlServer {
        return Ok(format!("LTRIM(RTRIM({distinct}{args}))"));
    }
    Ok(format!("{}({distinct}{args})", function_name(function, dialect)))
}
