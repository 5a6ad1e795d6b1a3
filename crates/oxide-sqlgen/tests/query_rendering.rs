//! Tests for SELECT statements, pagination and set operations.

mod common;
use common::*;

use oxide_sqlgen::ast::{AggregateFunction, SetOperator, SimpleSource, SqlFunction};
use oxide_sqlgen::{Aggregation, Dialect, Expression, Order, QuerySet, QuerySql, Source, SqlError, ToSql};

fn users() -> QuerySql {
    QuerySql::from_table("Users")
}

fn users_with_orders() -> Source {
    Source::table_as("Users", "u").inner_join(
        Source::table_as("Orders", "o"),
        qc("o", "UserId").eq(qc("u", "Id")),
    )
}

// ===================================================================
// Pagination
// ===================================================================

#[test]
fn skip_take_per_dialect() {
    let query = users().skip(10).take(5);
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT TOP 5 * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) AS rownum \
         FROM [Users]) paging_t WHERE rownum > 10 ORDER BY rownum"
    );
    assert_eq!(
        inline(&query, Dialect::PostgreSql),
        "SELECT * FROM \"Users\" LIMIT 5 OFFSET 10"
    );
    assert_eq!(inline(&query, Dialect::MySql), "SELECT * FROM `Users` LIMIT 10,5");
    assert_eq!(inline(&query, Dialect::Oledb), "SELECT * FROM `Users` LIMIT 5 OFFSET 10");
}

#[test]
fn take_only_per_dialect() {
    let query = users().take(5);
    assert_eq!(inline(&query, Dialect::SqlServer), "SELECT TOP 5 * FROM [Users]");
    assert_eq!(inline(&query, Dialect::MySql), "SELECT * FROM `Users` LIMIT 5");
    assert_eq!(inline(&query, Dialect::Oracle), "SELECT * FROM `Users` WHERE ROWNUM <= 5");
    assert_eq!(
        bound(&query, Dialect::Oracle).0,
        "SELECT * FROM (SELECT * FROM `Users`) WHERE ROWNUM <= 5"
    );
}

#[test]
fn skip_only_uses_unbounded_row_count() {
    let query = users().skip(7);
    assert_eq!(
        inline(&query, Dialect::MySql),
        "SELECT * FROM `Users` LIMIT 7,18446744073709551615"
    );
    assert_eq!(inline(&query, Dialect::Sqlite), "SELECT * FROM `Users` LIMIT 7,-1");
    assert_eq!(inline(&query, Dialect::PostgreSql), "SELECT * FROM \"Users\" OFFSET 7");
    assert_eq!(
        inline(&query, Dialect::Oracle),
        "SELECT * FROM (SELECT paging_t.*, ROWNUM paging_rownumber FROM (SELECT * FROM `Users`) \
         paging_t) WHERE paging_rownumber > 7"
    );
}

#[test]
fn row_number_uses_explicit_order() {
    let query = users()
        .filter(c("Age").gt(18))
        .order_by(Order::asc(c("Name")))
        .skip(20)
        .take(10);
    let (sql, params) = bound(&query, Dialect::SqlServer);
    assert_eq!(
        sql,
        "SELECT TOP 10 * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [Name] ASC) AS rownum \
         FROM [Users] WHERE [Age] > @p0) paging_t WHERE rownum > 20 ORDER BY rownum"
    );
    assert_eq!(params.len(), 1);
}

#[test]
fn row_number_bubbles_order_from_subquery() {
    let inner = users().order_by(Order::desc(c("Created")));
    let query = QuerySql::new(Source::select(inner, "s")).skip(5);
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [s].[Created] DESC) AS rownum \
         FROM (SELECT * FROM [Users]) [s]) paging_t WHERE rownum > 5 ORDER BY rownum"
    );
}

#[test]
fn storing_order_drives_paging() {
    let source = SimpleSource::new("Users")
        .alias("u")
        .storing_order(vec![Order::asc(c("Id"))]);
    let query = QuerySql::new(source.into()).skip(100).take(50);
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT TOP 50 * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [u].[Id] ASC) AS rownum \
         FROM [Users] [u]) paging_t WHERE rownum > 100 ORDER BY rownum"
    );
}

#[test]
fn distinct_rows_are_numbered_after_deduplication() {
    let query = users().column(c("Country")).distinct().skip(10).take(5);
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT TOP 5 * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) AS rownum \
         FROM (SELECT DISTINCT [Country] FROM [Users]) distinct_t) paging_t \
         WHERE rownum > 10 ORDER BY rownum"
    );
    assert_eq!(
        inline(&query, Dialect::MySql),
        "SELECT DISTINCT `Country` FROM `Users` LIMIT 10,5"
    );
}

#[test]
fn distinct_paging_orders_through_projection() {
    let query = users()
        .column(c("Country"))
        .distinct()
        .filter(c("Age").gt(18))
        .order_by(Order::desc(c("Country")))
        .skip(10);
    let (sql, params) = bound(&query, Dialect::SqlServer);
    assert_eq!(
        sql,
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [distinct_t].[Country] DESC) AS rownum \
         FROM (SELECT DISTINCT [Country] FROM [Users] WHERE [Age] > @p0) distinct_t) paging_t \
         WHERE rownum > 10 ORDER BY rownum"
    );
    assert_parameters_match(&sql, &params, Dialect::SqlServer);
}

// ===================================================================
// Paged subqueries
// ===================================================================

#[test]
fn aggregate_over_skipped_rows_has_no_inner_order() {
    let query = users().skip(10).aggregate(Aggregation::count());
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT COUNT(*) FROM (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) \
         AS rownum_1 FROM [Users]) paging_t WHERE rownum_1 > 10) agg_t"
    );
}

#[test]
fn skipped_select_source_has_no_inner_order() {
    let query = QuerySql::new(Source::select(users().skip(10), "s"));
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT * FROM (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) \
         AS rownum_1 FROM [Users]) paging_t WHERE rownum_1 > 10) [s]"
    );
}

#[test]
fn skipped_set_operand_has_no_inner_order() {
    let set = QuerySet::union(users().skip(10), QuerySql::from_table("Admins"));
    assert_eq!(
        inline(&set, Dialect::SqlServer),
        "SELECT * FROM (SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) \
         AS rownum_1 FROM [Users]) paging_t WHERE rownum_1 > 10) set_t UNION SELECT * FROM [Admins]"
    );
}

#[test]
fn paged_select_source_keeps_order_next_to_top() {
    let query = QuerySql::new(Source::select(users().skip(10).take(5), "s")).skip(2);
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) AS rownum \
         FROM (SELECT TOP 5 * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) \
         AS rownum_1 FROM [Users]) paging_t WHERE rownum_1 > 10 ORDER BY rownum_1) [s]) paging_t \
         WHERE rownum > 2 ORDER BY rownum"
    );
}

#[test]
fn nested_rownum_columns_are_distinct_on_oracle() {
    let query = QuerySql::new(Source::select(users().skip(10), "s")).skip(2);
    assert_eq!(
        inline(&query, Dialect::Oracle),
        "SELECT * FROM (SELECT paging_t.*, ROWNUM paging_rownumber FROM (SELECT * FROM \
         (SELECT * FROM (SELECT paging_t.*, ROWNUM paging_rownumber_1 FROM (SELECT * FROM `Users`) \
         paging_t) WHERE paging_rownumber_1 > 10) `s`) paging_t) WHERE paging_rownumber > 2"
    );
}

// ===================================================================
// Projection, joins, grouping
// ===================================================================

#[test]
fn grouped_join() {
    let query = QuerySql::new(users_with_orders())
        .column(qc("u", "Name"))
        .column_as(Expression::function(SqlFunction::Sum, vec![qc("o", "Total")]), "total")
        .group_by(qc("u", "Name"))
        .having(Expression::function(SqlFunction::Sum, vec![qc("o", "Total")]).gt(100))
        .order_by(Order::desc(qc("u", "Name")));
    assert_eq!(
        inline(&query, Dialect::PostgreSql),
        "SELECT \"u\".\"Name\", SUM(\"o\".\"Total\") AS \"total\" FROM \"Users\" \"u\" \
         INNER JOIN \"Orders\" \"o\" ON \"o\".\"UserId\" = \"u\".\"Id\" \
         GROUP BY \"u\".\"Name\" HAVING SUM(\"o\".\"Total\") > 100 ORDER BY \"u\".\"Name\" DESC"
    );
}

#[test]
fn distinct_projection() {
    let query = users().distinct().column(c("Country"));
    assert_eq!(inline(&query, Dialect::MySql), "SELECT DISTINCT `Country` FROM `Users`");
}

#[test]
fn wildcard_of_source() {
    let query = QuerySql::new(users_with_orders()).column(Expression::wildcard_of("u"));
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT [u].* FROM [Users] [u] INNER JOIN [Orders] [o] ON [o].[UserId] = [u].[Id]"
    );
}

#[test]
fn dialect_functions() {
    let query = users()
        .column(Expression::function(SqlFunction::Length, vec![c("Name")]))
        .column(Expression::function(SqlFunction::Trim, vec![c("Name")]))
        .column(Expression::function(SqlFunction::Now, vec![]));
    assert_eq!(
        inline(&query, Dialect::SqlServer),
        "SELECT LEN([Name]), LTRIM(RTRIM([Name])), GETDATE() FROM [Users]"
    );
    assert_eq!(
        inline(&query, Dialect::Sqlite),
        "SELECT LENGTH(`Name`), TRIM(`Name`), datetime('now') FROM `Users`"
    );
}

// ===================================================================
// Aggregates
// ===================================================================

#[test]
fn count_ignores_order_and_projection() {
    let query = users()
        .column(c("Name"))
        .filter(c("Active").eq(true))
        .order_by(Order::asc(c("Name")))
        .aggregate(Aggregation::count());
    assert_eq!(inline(&query, Dialect::SqlServer), "SELECT COUNT(*) FROM [Users] WHERE [Active]");
}

#[test]
fn aggregate_over_distinct_rows() {
    let query = users()
        .distinct()
        .column(c("Age"))
        .aggregate(Aggregation::of(AggregateFunction::Avg, c("Age")));
    assert_eq!(
        inline(&query, Dialect::MySql),
        "SELECT AVG(`agg_t`.`Age`) FROM (SELECT DISTINCT `Age` FROM `Users`) agg_t"
    );
}

#[test]
fn count_of_paged_rows() {
    let query = users().skip(10).take(5).aggregate(Aggregation::count());
    assert_eq!(
        inline(&query, Dialect::PostgreSql),
        "SELECT COUNT(*) FROM (SELECT * FROM \"Users\" LIMIT 5 OFFSET 10) agg_t"
    );
}

// ===================================================================
// Set operations
// ===================================================================

#[test]
fn union_all_of_ordered_operands() {
    let left = users().column(c("Id")).order_by(Order::asc(c("Id"))).take(1);
    let right = QuerySql::from_table("Admins").column(c("Id"));
    let set = QuerySet::union_all(left, right);
    assert_eq!(
        inline(&set, Dialect::SqlServer),
        "SELECT * FROM (SELECT TOP 1 [Id] FROM [Users] ORDER BY [Id] ASC) set_t \
         UNION ALL SELECT [Id] FROM [Admins]"
    );
}

#[test]
fn set_operators_per_dialect() {
    let except = QuerySet::new(SetOperator::Except, users().column(c("Id")), users().column(c("Id")));
    assert!(inline(&except, Dialect::PostgreSql).contains(" EXCEPT "));
    assert!(inline(&except, Dialect::Oracle).contains(" MINUS "));
    assert!(matches!(
        except.to_sql(Dialect::MySql),
        Err(SqlError::UnsupportedFeature { dialect: Dialect::MySql, .. })
    ));
}

#[test]
fn query_over_set_source() {
    let set = QuerySet::union(users().column(c("Id")), QuerySql::from_table("Admins").column(c("Id")));
    let plain = QuerySql::new(Source::set(set.clone(), "ids"));
    assert_eq!(inline(&plain, Dialect::MySql), inline(&set, Dialect::MySql));

    let filtered = QuerySql::new(Source::set(set, "ids")).filter(qc("ids", "Id").gt(3));
    assert_eq!(
        inline(&filtered, Dialect::MySql),
        "SELECT * FROM (SELECT `Id` FROM `Users` UNION SELECT `Id` FROM `Admins`) `ids` \
         WHERE `ids`.`Id` > 3"
    );
}

#[test]
fn rendering_is_deterministic() {
    let query = QuerySql::new(users_with_orders())
        .filter(qc("u", "Name").contains("ann"))
        .order_by(Order::asc(qc("u", "Id")))
        .skip(3)
        .take(4);
    for dialect in Dialect::ALL {
        assert_eq!(bound(&query, dialect), bound(&query, dialect));
        assert_eq!(inline(&query, dialect), inline(&query, dialect));
    }
}
