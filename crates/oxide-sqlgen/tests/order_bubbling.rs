//! Tests for moving a source's natural row order onto the enclosing query,
//! and for alias management.

mod common;
use common::*;

use oxide_sqlgen::ast::{MonomerSource, SimpleSource};
use oxide_sqlgen::{Dialect, Order, QuerySet, QuerySql, Source, SqlError};

fn stored_users() -> Source {
    SimpleSource::new("Users")
        .alias("u")
        .storing_order(vec![Order::asc(c("Id")), Order::desc(c("Created"))])
        .into()
}

#[test]
fn simple_source_relocates_storing_order() {
    let mut query = QuerySql::new(stored_users());
    query.bubble_source_order().unwrap();
    assert_eq!(
        inline(&query, Dialect::PostgreSql),
        "SELECT * FROM \"Users\" \"u\" ORDER BY \"u\".\"Id\" ASC, \"u\".\"Created\" DESC"
    );
}

#[test]
fn existing_order_is_kept() {
    let mut query = QuerySql::new(stored_users()).order_by(Order::asc(c("Name")));
    assert_eq!(query.bubble_source_order(), Err(SqlError::OrderAlreadyDefined));
    assert_eq!(query.orders, vec![Order::asc(c("Name"))]);
}

#[test]
fn unordered_sources_refuse() {
    let mut query = QuerySql::from_table("Users");
    assert!(matches!(
        query.bubble_source_order(),
        Err(SqlError::OrderBubblingUnsupported { .. })
    ));

    let mut joined = QuerySql::new(stored_users().inner_join(
        Source::table_as("Orders", "o"),
        qc("o", "UserId").eq(qc("u", "Id")),
    ));
    assert!(!joined.source.can_bubble_order());
    let err = joined.bubble_source_order().unwrap_err();
    assert!(err.to_string().contains("INNER JOIN"), "{err}");
}

#[test]
fn select_source_exposes_generated_alias() {
    let inner = QuerySql::from_table("Users")
        .column(c("Name"))
        .order_by(Order::desc(c("Age").add(1)));
    let mut query = QuerySql::new(Source::select(inner, "s"));
    query.bubble_source_order().unwrap();
    assert_eq!(
        inline(&query, Dialect::MySql),
        "SELECT * FROM (SELECT `Name`, `Age` + 1 AS `order_0` FROM `Users`) `s` \
         ORDER BY `s`.`order_0` DESC"
    );
}

#[test]
fn select_source_reuses_projection_alias() {
    let inner = QuerySql::from_table("Users")
        .column_as(c("Name"), "n")
        .order_by(Order::asc(c("Name")))
        .take(10);
    let mut query = QuerySql::new(Source::select(inner, "s"));
    query.bubble_source_order().unwrap();
    // The inner ORDER BY stays because the inner take depends on it.
    assert_eq!(
        inline(&query, Dialect::PostgreSql),
        "SELECT * FROM (SELECT \"Name\" AS \"n\" FROM \"Users\" ORDER BY \"Name\" ASC LIMIT 10) \"s\" \
         ORDER BY \"s\".\"n\" ASC"
    );
}

#[test]
fn nested_select_bubbles_recursively() {
    let inner = QuerySql::new(stored_users());
    let mut query = QuerySql::new(Source::select(inner, "s"));
    query.bubble_source_order().unwrap();
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT * FROM (SELECT * FROM [Users] [u]) [s] ORDER BY [s].[Id] ASC, [s].[Created] DESC"
    );
}

#[test]
fn set_source_needs_explicit_orders() {
    let unordered = QuerySet::union(
        QuerySql::from_table("Users").column(c("Id")),
        QuerySql::from_table("Admins").column(c("Id")),
    );
    let mut query = QuerySql::new(Source::set(unordered.clone(), "ids"));
    assert!(matches!(
        query.bubble_source_order(),
        Err(SqlError::OrderBubblingUnsupported { .. })
    ));

    let ordered = unordered.order_by(Order::desc(c("Id")));
    let mut query = QuerySql::new(Source::set(ordered, "ids"));
    query.bubble_source_order().unwrap();
    assert_eq!(
        inline(&query, Dialect::MySql),
        "SELECT * FROM (SELECT `Id` FROM `Users` UNION SELECT `Id` FROM `Admins`) `ids` \
         ORDER BY `ids`.`Id` DESC"
    );
}

#[test]
fn prefixing_aliases_relocates_fields() {
    let mut query = QuerySql::new(Source::table_as("Users", "u").left_join(
        Source::table("Orders"),
        qc("Orders", "UserId").eq(qc("u", "Id")),
    ))
    .column(qc("u", "Name"))
    .filter(qc("u", "Age").gt(18));
    query.prefix_aliases("x_");
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT [x_u].[Name] FROM [Users] [x_u] LEFT JOIN [Orders] [x_Orders] \
         ON [x_Orders].[UserId] = [x_u].[Id] WHERE [x_u].[Age] > 18"
    );
}

#[test]
fn alias_reset_and_symbols() {
    let mut source = Source::table_as("Users", "u");
    for monomer in source.monomers_mut() {
        assert_eq!(monomer.symbol(), "u");
        monomer.reset_alias();
        assert_eq!(monomer.symbol(), "Users");
    }
    assert_eq!(inline(&source, Dialect::MySql), "`Users`");

    let sub = Source::select(QuerySql::from_table("Users"), "s");
    let Source::Monomer(mut monomer) = sub else {
        panic!("Expected a monomer source");
    };
    assert!(matches!(monomer, MonomerSource::Select(_)));
    monomer.reset_alias();
    assert_eq!(monomer.symbol(), "sub_t");
}
