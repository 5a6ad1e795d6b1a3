//! SQL rendering.
//!
//! Every statement tree node implements [`ToSql`]. A render call walks the
//! tree once, in textual order, so that the parameters collected on the
//! parameterized path line up with the placeholders of the produced text.

mod change;
mod criteria;
mod expression;
mod query;
mod set;
mod setter;
mod source;

use tracing::debug;

use crate::ast::Statement;
use crate::config::RenderConfig;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::param::{Parameter, ParameterCreator};
use crate::value::SqlValue;

/// Collects bound parameters during one render call.
struct Binder<'a> {
    creator: &'a mut dyn ParameterCreator,
    params: Vec<Parameter>,
}

/// State shared by the nodes of one render call.
pub struct RenderContext<'a> {
    dialect: Dialect,
    config: &'a RenderConfig,
    binder: Option<Binder<'a>>,
    depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Creates a context rendering constants inline.
    #[must_use]
    pub const fn inline(dialect: Dialect, config: &'a RenderConfig) -> Self {
        Self {
            dialect,
            config,
            binder: None,
            depth: 0,
        }
    }

    /// Creates a context binding constants as parameters.
    pub fn parameterized(
        dialect: Dialect,
        config: &'a RenderConfig,
        creator: &'a mut dyn ParameterCreator,
    ) -> Self {
        Self {
            dialect,
            config,
            binder: Some(Binder {
                creator,
                params: Vec::new(),
            }),
            depth: 0,
        }
    }

    /// Returns the target dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Returns whether constants are bound as parameters.
    #[must_use]
    pub const fn is_parameterized(&self) -> bool {
        self.binder.is_some()
    }

    /// Returns how many derived tables or subqueries enclose the node being
    /// rendered. Zero for the top-level statement.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns whether the node being rendered is inside a derived table or
    /// subquery.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.depth > 0
    }

    /// Renders a subquery one nesting level down.
    pub fn nested<T>(&mut self, render: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        let result = render(self);
        self.depth -= 1;
        result
    }

    /// Renders a value: a literal on the inline path, a placeholder on the
    /// parameterized path. NULL is never bound.
    pub fn value(&mut self, value: &SqlValue) -> String {
        if value.is_null() {
            return value.to_sql_inline(self.dialect);
        }
        let dialect = self.dialect;
        match &mut self.binder {
            None => value.to_sql_inline(dialect),
            Some(binder) => {
                let name = dialect.parameter_name(&self.config.parameter_prefix, binder.params.len());
                let mut param = binder.creator.create();
                param.name.clone_from(&name);
                param.value = value.to_parameter_value(dialect);
                binder.params.push(param);
                name
            }
        }
    }

    /// Quotes an identifier used in expressions and sources.
    #[must_use]
    pub fn ident(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }

    /// Quotes an identifier of a change statement header or setter column.
    #[must_use]
    pub fn change_ident(&self, name: &str) -> String {
        self.dialect.quote_change_identifier(name)
    }

    fn into_params(self) -> Vec<Parameter> {
        self.binder.map(|binder| binder.params).unwrap_or_default()
    }
}

/// Converts a node to SQL.
pub trait ToSql {
    /// Renders the node within an ongoing render call.
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String>;

    /// Renders with inline literals, for logging and diagnostics.
    fn to_sql(&self, dialect: Dialect) -> Result<String> {
        self.to_sql_with_config(dialect, &RenderConfig::default())
    }

    /// Renders with inline literals under a configuration.
    fn to_sql_with_config(&self, dialect: Dialect, config: &RenderConfig) -> Result<String> {
        let mut ctx = RenderContext::inline(dialect, config);
        let sql = self.render(&mut ctx)?;
        debug!(
            node = std::any::type_name::<Self>(),
            %dialect,
            sql = %sql,
            "Rendered SQL"
        );
        Ok(sql)
    }

    /// Renders with bound parameters, the production path.
    fn to_sql_with_params(
        &self,
        dialect: Dialect,
        creator: &mut dyn ParameterCreator,
    ) -> Result<(String, Vec<Parameter>)> {
        self.to_sql_with_params_and_config(dialect, creator, &RenderConfig::default())
    }

    /// Renders with bound parameters under a configuration.
    fn to_sql_with_params_and_config(
        &self,
        dialect: Dialect,
        creator: &mut dyn ParameterCreator,
        config: &RenderConfig,
    ) -> Result<(String, Vec<Parameter>)> {
        let mut ctx = RenderContext::parameterized(dialect, config, creator);
        let sql = self.render(&mut ctx)?;
        let params = ctx.into_params();
        debug!(
            node = std::any::type_name::<Self>(),
            %dialect,
            parameters = params.len(),
            sql = %sql,
            "Rendered parameterized SQL"
        );
        Ok((sql, params))
    }
}

/// Renders nodes in order, comma separated.
fn render_list<T: ToSql>(items: &[T], ctx: &mut RenderContext<'_>) -> Result<String> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(item.render(ctx)?);
    }
    Ok(rendered.join(", "))
}

impl ToSql for Statement {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Query(query) => query.render(ctx),
            Self::Set(set) => set.render(ctx),
            Self::Change(change) => change.render(ctx),
        }
    }
}
