//! In-place rewriting traversal over expressions, criteria and sources.
//!
//! The traversal descends into joined sources and join criteria but stops at
//! sub-select and set sources, and at the subquery of an IN-select criteria.
//! Nested statements own their own scope and are visited separately.

use super::criteria::Criteria;
use super::expression::Expression;
use super::field::Field;
use super::order::Order;
use super::query::QuerySql;
use super::source::Source;

/// Visits the nodes of a statement tree, rewriting them in place.
///
/// Every hook defaults to the matching `walk_*` function, so implementors
/// only override the nodes they care about.
pub trait ExpressionVisitor {
    /// Visits an expression.
    fn visit_expression(&mut self, expr: &mut Expression) {
        walk_expression(self, expr);
    }

    /// Visits a column reference.
    fn visit_field(&mut self, _field: &mut Field) {}

    /// Visits the qualifier of a wildcard.
    fn visit_wildcard(&mut self, _source: &mut Option<String>) {}

    /// Visits a criteria.
    fn visit_criteria(&mut self, criteria: &mut Criteria) {
        walk_criteria(self, criteria);
    }

    /// Visits a source.
    fn visit_source(&mut self, source: &mut Source) {
        walk_source(self, source);
    }

    /// Visits an ordering.
    fn visit_order(&mut self, order: &mut Order) {
        self.visit_expression(&mut order.expression);
    }
}

/// Visits the children of an expression.
pub fn walk_expression<V: ExpressionVisitor + ?Sized>(visitor: &mut V, expr: &mut Expression) {
    match expr {
        Expression::Constant(_) => {}
        Expression::Field { field, .. } => visitor.visit_field(field),
        Expression::Wildcard { source } => visitor.visit_wildcard(source),
        Expression::Arithmetic { left, right, .. }
        | Expression::Comparison { left, right, .. }
        | Expression::BinaryLogic { left, right, .. }
        | Expression::BinaryBit { left, right, .. }
        | Expression::Like {
            left,
            pattern: right,
            ..
        } => {
            visitor.visit_expression(left);
            visitor.visit_expression(right);
        }
        Expression::Unary { operand, .. } => visitor.visit_expression(operand),
        Expression::In { left, .. } => visitor.visit_expression(left),
        Expression::Function { args, .. } => {
            for arg in args {
                visitor.visit_expression(arg);
            }
        }
    }
}

/// Visits the children of a criteria.
///
/// The subquery of an IN-select criteria is not entered.
pub fn walk_criteria<V: ExpressionVisitor + ?Sized>(visitor: &mut V, criteria: &mut Criteria) {
    match criteria {
        Criteria::Expression(expr) => visitor.visit_expression(expr),
        Criteria::Complex(complex) => {
            for child in complex.children_mut() {
                visitor.visit_criteria(child);
            }
        }
        Criteria::InSelect(in_select) => visitor.visit_expression(&mut in_select.left),
    }
}

/// Visits the children of a source.
///
/// Joins are entered (both sides, then the join criteria); monomer sources
/// are leaves.
pub fn walk_source<V: ExpressionVisitor + ?Sized>(visitor: &mut V, source: &mut Source) {
    match source {
        Source::Monomer(_) => {}
        Source::Joined(joined) => {
            visitor.visit_source(&mut joined.left);
            visitor.visit_source(&mut joined.right);
            visitor.visit_criteria(&mut joined.criteria);
        }
    }
}

/// Visits every clause of a query, in rendering order.
pub fn walk_query<V: ExpressionVisitor + ?Sized>(visitor: &mut V, query: &mut QuerySql) {
    for item in &mut query.selection {
        visitor.visit_expression(&mut item.expression);
    }
    if let Some(aggregation) = &mut query.aggregation {
        if let Some(argument) = &mut aggregation.argument {
            visitor.visit_expression(argument);
        }
    }
    visitor.visit_source(&mut query.source);
    if let Some(criteria) = &mut query.criteria {
        visitor.visit_criteria(criteria);
    }
    for expr in &mut query.group_by {
        visitor.visit_expression(expr);
    }
    if let Some(having) = &mut query.having {
        visitor.visit_criteria(having);
    }
    for order in &mut query.orders {
        visitor.visit_order(order);
    }
}

/// Moves every reachable field onto one source symbol.
#[derive(Debug, Clone)]
pub struct AliasRelocator {
    target: Option<String>,
}

impl AliasRelocator {
    /// Creates a relocator; `None` strips the qualifier.
    #[must_use]
    pub const fn new(target: Option<String>) -> Self {
        Self { target }
    }
}

impl ExpressionVisitor for AliasRelocator {
    fn visit_field(&mut self, field: &mut Field) {
        field.set_source(self.target.clone());
    }
}

/// Prefixes the qualifier of every reachable field and wildcard.
///
/// Unqualified fields are left alone.
#[derive(Debug, Clone)]
pub struct AliasPrefixer {
    prefix: String,
}

impl AliasPrefixer {
    /// Creates a prefixer.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ExpressionVisitor for AliasPrefixer {
    fn visit_field(&mut self, field: &mut Field) {
        if let Some(source) = field.source() {
            let prefixed = format!("{}{source}", self.prefix);
            field.set_source(Some(prefixed));
        }
    }

    fn visit_wildcard(&mut self, source: &mut Option<String>) {
        if let Some(symbol) = source {
            *symbol = format!("{}{symbol}", self.prefix);
        }
    }

    fn visit_source(&mut self, source: &mut Source) {
        walk_source(self, source);
        if let Source::Monomer(monomer) = source {
            monomer.prefix_alias(&self.prefix);
        }
    }
}

/// Relocates the fields of an expression onto `target`.
pub(crate) fn relocate(expr: &mut Expression, target: &str) {
    AliasRelocator::new(Some(String::from(target))).visit_expression(expr);
}
