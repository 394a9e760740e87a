//! Clause translation through the Dm dialect.

mod common;
use common::*;

use dmsql_core::{
    Condition, DataValue, Error, Field, JoinTarget, OrderItem, QueryContext, Raw, SqlValue,
    Union, UnionBranch,
};
use dmsql_driver::builder;
use indexmap::IndexMap;

fn data(entries: Vec<(&str, DataValue)>) -> IndexMap<String, DataValue> {
    entries
        .into_iter()
        .map(|(key, value)| (String::from(key), value))
        .collect()
}

#[test]
fn order_by_field_and_random() {
    let builder = shop();
    let mut query = QueryContext::new("users");
    let sql = builder
        .build_order(&mut query, &["id desc".into(), "[rand]".into()])
        .unwrap();
    assert_eq!(sql, r#"ORDER BY "id" DESC,RAND()"#);
    assert_eq!(
        builder
            .build_order(&mut query, &[OrderItem::Random])
            .unwrap(),
        "ORDER BY RAND()"
    );
}

#[test]
fn increment_and_decrement() {
    let builder = shop();
    let mut query = QueryContext::new("users");
    let inc = builder
        .build_data(&mut query, &data(vec![("score", DataValue::step("INC", 5.0).unwrap())]))
        .unwrap();
    assert_eq!(inc[r#""score""#], r#""score" + 5"#);
    let dec = builder
        .build_data(&mut query, &data(vec![("score", DataValue::step("DEC", 5.0).unwrap())]))
        .unwrap();
    assert_eq!(dec[r#""score""#], r#""score" - 5"#);
    assert!(query.bind.is_empty());
}

#[test]
fn strict_mode_rejects_unknown_column() {
    let builder = shop();
    let mut query = QueryContext::new("users");
    let err = builder
        .build_data(&mut query, &data(vec![("unknown_col", DataValue::value(1))]))
        .unwrap_err();
    assert_eq!(err, Error::FieldNotFound(String::from("unknown_col")));
}

#[test]
fn lenient_mode_drops_unknown_column() {
    let mut config = config();
    config.fields_strict = false;
    let builder = builder(&config, MockConnection::shop());
    let mut query = QueryContext::new("users");
    let result = builder
        .build_data(
            &mut query,
            &data(vec![
                ("unknown_col", DataValue::value(1)),
                ("name", DataValue::value("ann")),
            ]),
        )
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[r#""name""#], "?");
    assert_eq!(query.bind, vec![SqlValue::Text(String::from("ann"))]);
}

#[test]
fn inline_values_when_auto_bind_off() {
    let mut config = config();
    config.auto_bind = false;
    let builder = builder(&config, MockConnection::shop());
    let mut query = QueryContext::new("users");
    let result = builder
        .build_data(&mut query, &data(vec![("name", DataValue::value("o'neil"))]))
        .unwrap();
    assert_eq!(result[r#""name""#], "'o''neil'");
    assert!(query.bind.is_empty());
}

#[test]
fn replace_and_duplicate_always_fail() {
    let builder = shop();
    assert!(matches!(builder.replace(), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(
        builder.duplicate(&["name", "score"]),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        builder.duplicate::<&str>(&[]),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn json_paths_in_fields() {
    let builder = shop();
    let mut query = QueryContext::new("users")
        .field("data->name")
        .field(Raw::new("data->>name AS label"));
    assert_eq!(
        builder.build_fields(&mut query).unwrap(),
        r#"JSON_EXTRACT("data", 'name'),JSON_UNQUOTE(JSON_EXTRACT("data", 'name')) AS "label""#
    );
}

#[test]
fn group_concat_becomes_wm_concat() {
    let builder = shop();
    let mut query = QueryContext::new("users").field(Field::Raw(Raw::new(
        "GROUP_CONCAT(tags) AS all_tags",
    )));
    assert_eq!(
        builder.build_fields(&mut query).unwrap(),
        r#"wm_concat("tags") AS "all_tags""#
    );
}

#[test]
fn from_clause_qualifies_real_tables_only() {
    let mut config = config();
    config.database = String::from("SHOP");
    let builder = builder(&config, MockConnection::shop());
    let mut query = QueryContext::new("users").alias("users", "u");
    let sql = builder
        .build_table(&mut query, &["users".into(), "recent".into()])
        .unwrap();
    assert_eq!(sql, r#""SHOP"."users" "u","recent""#);
}

#[test]
fn join_then_where() {
    let builder = shop();
    let mut query = QueryContext::new("users").alias("users", "u");
    let join = builder
        .build_join(
            &mut query,
            &JoinTarget::from("orders o"),
            "u.id=o.user_id",
            "LEFT",
            &[],
        )
        .unwrap();
    assert_eq!(join, r#"LEFT JOIN "orders" "o" ON "u".id="o".user_id"#);
    let filter = builder
        .build_where(&mut query, &Condition::from("o.amount > ?"))
        .unwrap();
    assert_eq!(filter, r#"WHERE "o".amount > ?"#);
}

#[test]
fn union_all_branches() {
    let builder = shop();
    let mut query = QueryContext::new("users");
    let union = Union {
        all: true,
        branches: vec![UnionBranch::Sql(String::from("SELECT name FROM orders"))],
    };
    assert_eq!(
        builder.build_union(&mut query, &union).unwrap(),
        r#"UNION ALL ( SELECT "name" FROM "orders" )"#
    );
}

#[test]
fn quote_identifier_list_leaves_quoted_fragments() {
    let builder = shop();
    let known = ["id", "user_id"];
    assert_eq!(
        builder.quote_identifier_list("user_id = id", &known),
        r#""user_id" = "id""#
    );
    let quoted = r#""user_id" = id"#;
    assert_eq!(builder.quote_identifier_list(quoted, &known), quoted);
}
