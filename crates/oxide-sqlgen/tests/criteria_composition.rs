//! Tests for expressions and criteria: combinators, laws and dialect rules.

mod common;
use common::*;

use oxide_sqlgen::ast::{ComplexCriteria, LogicOperator, NodeType};
use oxide_sqlgen::{Criteria, Dialect, Expression, QuerySql, SqlError, ToSql};

fn a() -> Criteria {
    c("A").eq(1).into()
}

fn b() -> Criteria {
    c("B").eq(2).into()
}

// ===================================================================
// Laws
// ===================================================================

#[test]
fn not_in_flips_operator() {
    for dialect in Dialect::ALL {
        let flipped = c("Id").in_list(vec![1, 2]).not();
        let direct = c("Id").not_in_list(vec![1, 2]);
        assert_eq!(inline(&flipped, dialect), inline(&direct, dialect));
        assert_eq!(bound(&flipped, dialect), bound(&direct, dialect));
    }
    assert_eq!(
        inline(&c("Id").in_list(vec![1, 2]).not(), Dialect::SqlServer),
        "[Id] NOT IN (1, 2)"
    );
}

#[test]
fn double_not_restores_in() {
    let criteria = Criteria::from(c("Id").in_list(vec![3])).not().not();
    assert_eq!(criteria, Criteria::from(c("Id").in_list(vec![3])));
}

#[test]
fn not_in_select_flips() {
    let query = QuerySql::from_table("Bans").column(c("UserId"));
    let criteria = Criteria::in_select(c("Id"), query).unwrap().not();
    assert_eq!(
        inline(&criteria, Dialect::MySql),
        "`Id` NOT IN (SELECT `UserId` FROM `Bans`)"
    );
}

#[test]
fn empty_in_lists() {
    let none: Vec<i64> = Vec::new();
    for dialect in Dialect::ALL {
        assert_eq!(inline(&c("Id").in_list(none.clone()), dialect), "1<>1");
        assert_eq!(inline(&c("Id").not_in_list(none.clone()), dialect), "1=1");
    }
}

#[test]
fn null_comparisons_never_bind() {
    for dialect in Dialect::ALL {
        let (sql, params) = bound(&c("Deleted").eq(Expression::null()), dialect);
        assert!(sql.ends_with(" IS NULL"), "{dialect}: {sql}");
        assert!(params.is_empty());
        let (sql, params) = bound(&c("Deleted").not_eq(Expression::null()), dialect);
        assert!(sql.ends_with(" IS NOT NULL"), "{dialect}: {sql}");
        assert!(params.is_empty());
    }
}

#[test]
fn boolean_comparison_on_sql_server() {
    assert_eq!(inline(&c("Active").eq(true), Dialect::SqlServer), "[Active]");
    assert_eq!(inline(&c("Active").eq(false), Dialect::SqlServer), "NOT [Active]");
    assert_eq!(inline(&c("Active").eq(true), Dialect::MySql), "`Active` = 1");
}

// ===================================================================
// Combinators
// ===================================================================

#[test]
fn chains_are_flattened() {
    let criteria = a().and(b()).and(a());
    match &criteria {
        Criteria::Complex(complex) => {
            assert_eq!(complex.operator(), LogicOperator::And);
            assert_eq!(complex.children().len(), 3);
        }
        other => panic!("Expected complex criteria, got {other:?}"),
    }
    assert_eq!(
        inline(&criteria, Dialect::PostgreSql),
        "(\"A\" = 1) AND (\"B\" = 2) AND (\"A\" = 1)"
    );
}

#[test]
fn mixed_operators_nest() {
    let criteria = a().or(b()).and(a().not());
    assert_eq!(
        inline(&criteria, Dialect::SqlServer),
        "(([A] = 1) OR ([B] = 2)) AND (NOT ([A] = 1))"
    );
}

#[test]
fn malformed_compositions() {
    assert!(matches!(
        ComplexCriteria::new(LogicOperator::And, None, None),
        Err(SqlError::MalformedComposition(_))
    ));
    assert!(matches!(
        ComplexCriteria::from_children(LogicOperator::Not, vec![a(), b()]),
        Err(SqlError::MalformedComposition(_))
    ));
    assert!(matches!(
        ComplexCriteria::from_children(LogicOperator::Or, vec![a()]),
        Err(SqlError::MalformedComposition(_))
    ));
    assert!(matches!(
        Criteria::in_select(c("Id"), QuerySql::from_table("Bans")),
        Err(SqlError::MalformedComposition(_))
    ));
}

#[test]
fn generic_factories() {
    let sum = Expression::binary(NodeType::Add, c("A"), Expression::constant(1)).unwrap();
    assert_eq!(inline(&sum, Dialect::MySql), "`A` + 1");
    let negated = Expression::unary(NodeType::Negate, c("A")).unwrap();
    assert_eq!(inline(&negated, Dialect::MySql), "-(`A`)");
    assert_eq!(
        Expression::unary(NodeType::Add, c("A")),
        Err(SqlError::UnknownOperator(NodeType::Add))
    );
    assert_eq!(
        Expression::binary(NodeType::Not, c("A"), c("B")),
        Err(SqlError::UnknownOperator(NodeType::Not))
    );
}

#[test]
fn wildcard_field_names_are_rejected() {
    assert!(matches!(
        oxide_sqlgen::col("*"),
        Err(SqlError::InvalidField(_))
    ));
}

// ===================================================================
// Dialect rules
// ===================================================================

#[test]
fn modulo_and_bits() {
    let modulo = c("A").rem(3);
    assert_eq!(inline(&modulo, Dialect::Oracle), "MOD(`A`, 3)");
    assert_eq!(inline(&modulo, Dialect::PostgreSql), "\"A\" % 3");

    let xor = c("A").bit_xor(c("B"));
    assert_eq!(inline(&xor, Dialect::PostgreSql), "\"A\" # \"B\"");
    assert_eq!(inline(&xor, Dialect::MySql), "`A` ^ `B`");
    for dialect in [Dialect::Oracle, Dialect::Sqlite] {
        assert!(matches!(
            xor.to_sql(dialect),
            Err(SqlError::UnsupportedFeature { .. })
        ));
    }
    assert_eq!(inline(&c("A").bit_and(4), Dialect::Oracle), "BITAND(`A`, 4)");
}

#[test]
fn like_concatenation() {
    let expr = c("Name").like("%ann%");
    assert_eq!(inline(&expr, Dialect::SqlServer), "[Name] LIKE '%' + 'ann' + '%'");
    assert_eq!(inline(&expr, Dialect::MySql), "`Name` LIKE concat('%', 'ann', '%')");
    assert_eq!(
        inline(&expr, Dialect::Oracle),
        "`Name` LIKE concat('%', concat('ann', '%'))"
    );
    assert_eq!(inline(&expr, Dialect::Sqlite), "`Name` LIKE '%ann%'");
    assert_eq!(inline(&expr, Dialect::Other), "`Name` LIKE '%' || 'ann' || '%'");
    assert_eq!(inline(&c("Name").like("ann"), Dialect::MySql), "`Name` LIKE 'ann'");
}

#[test]
fn like_against_column_on_sqlite() {
    let expr = c("Name").ends_with(c("Suffix"));
    assert_eq!(inline(&expr, Dialect::Sqlite), "`Name` LIKE '%' || `Suffix`");
}
