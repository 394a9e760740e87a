//! Identifier quoting across clauses: known columns only, whole tokens only,
//! literals and quoted text untouched.

mod common;
use common::*;

use dmsql_core::quote::{quote_fields, rewrite_identifiers};
use dmsql_core::{Condition, Field, OrderItem, QueryContext, Raw, SqlValue};

#[test]
fn quote_fields_never_touches_longer_identifiers() {
    let fields = ["id", "user_id", "name"];
    let sql = quote_fields("user_id = id and username = name and id2 = 1", &fields, '"');
    assert_eq!(
        sql,
        r#""user_id" = "id" and username = "name" and id2 = 1"#
    );
}

#[test]
fn quote_fields_result_independent_of_field_order() {
    let sql = "select id, user_id, name from t where user_id > id";
    let forward = quote_fields(sql, &["id", "user_id", "name"], '"');
    let backward = quote_fields(sql, &["name", "user_id", "id"], '"');
    assert_eq!(forward, backward);
}

#[test]
fn quote_fields_is_idempotent() {
    let once = quote_fields("sum(score) > score", &["score"], '"');
    let twice = quote_fields(&once, &["score"], '"');
    assert_eq!(once, r#"sum("score") > "score""#);
    assert_eq!(once, twice);
}

#[test]
fn rewrite_identifiers_skips_literals() {
    let mut seen = Vec::new();
    let sql = rewrite_identifiers("a = 'b c' and \"d\" = e", '"', |ident, _| {
        seen.push(String::from(ident));
        None
    });
    assert_eq!(sql, "a = 'b c' and \"d\" = e");
    assert_eq!(seen, vec!["a", "and", "e"]);
}

#[test]
fn select_list_quotes_known_columns() {
    let builder = shop_builder();
    let mut query = QueryContext::new("users")
        .field("id")
        .field("name AS label")
        .field(Raw::new("max(score) as best"))
        .field(Field::Aliased {
            expr: String::from("count(user_id)"),
            alias: String::from("n"),
        });
    let sql = builder.build_fields(&mut query).unwrap();
    assert_eq!(
        sql,
        r#""id","name" AS "label",max("score") AS "best",count("user_id") AS "n""#
    );
}

#[test]
fn where_clause_requalifies_alias() {
    let builder = shop_builder();
    let mut query = QueryContext::new("users").alias("users", "u");
    let sql = builder
        .build_where(&mut query, &Condition::from("u.score > 10 and u.name = 'u.x'"))
        .unwrap();
    assert_eq!(sql, r#"WHERE "u".score > 10 and "u".name = 'u.x'"#);
}

#[test]
fn raw_condition_keeps_bind_order() {
    let builder = shop_builder();
    let mut query = QueryContext::new("users");
    builder
        .build_where(
            &mut query,
            &Condition::Raw(Raw::new("score > ? and name = ?").bind(1).bind("x")),
        )
        .unwrap();
    builder
        .build_order(&mut query, &[OrderItem::Raw(Raw::new("field(id, ?)").bind(7))])
        .unwrap();
    assert_eq!(
        query.bind,
        vec![
            SqlValue::Int(1),
            SqlValue::Text(String::from("x")),
            SqlValue::Int(7)
        ]
    );
}
