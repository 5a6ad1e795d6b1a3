#![allow(dead_code)]

use oxide_sqlgen::{
    DefaultParameterCreator, Dialect, Expression, Parameter, RenderConfig, ToSql,
};

/// Unqualified column; panics on an invalid name.
pub fn c(name: &str) -> Expression {
    oxide_sqlgen::col(name).unwrap_or_else(|e| panic!("Invalid column {name}: {e}"))
}

/// Qualified column; panics on an invalid name.
pub fn qc(source: &str, name: &str) -> Expression {
    oxide_sqlgen::qualified_col(source, name)
        .unwrap_or_else(|e| panic!("Invalid column {source}.{name}: {e}"))
}

pub fn inline<T: ToSql + ?Sized>(node: &T, dialect: Dialect) -> String {
    node.to_sql(dialect)
        .unwrap_or_else(|e| panic!("Failed to render for {dialect}: {e}"))
}

pub fn bound<T: ToSql + ?Sized>(node: &T, dialect: Dialect) -> (String, Vec<Parameter>) {
    node.to_sql_with_params(dialect, &mut DefaultParameterCreator)
        .unwrap_or_else(|e| panic!("Failed to render parameterized for {dialect}: {e}"))
}

/// Counts placeholders of the default configuration in rendered text.
pub fn placeholder_count(sql: &str, dialect: Dialect) -> usize {
    let prefix = RenderConfig::default().parameter_prefix;
    let needle = format!("{}{prefix}", dialect.parameter_marker());
    sql.matches(needle.as_str()).count()
}

/// Checks that every parameter appears in the text, in order, exactly once.
pub fn assert_parameters_match(sql: &str, params: &[Parameter], dialect: Dialect) {
    assert_eq!(
        placeholder_count(sql, dialect),
        params.len(),
        "Placeholder count mismatch for {dialect}:\n  {sql}"
    );
    let mut from = 0;
    for param in params {
        let at = sql[from..]
            .find(param.name.as_str())
            .unwrap_or_else(|| panic!("{} missing or out of order in {sql}", param.name));
        from += at + param.name.len();
    }
}
