//! Bind mode: placeholders, parameter order and resolution failures.

use pretty_assertions::assert_eq;

use crate::prelude::*;
use crate::render::BindParam;

fn bind(node: &impl ToSql, placeholder: PlaceholderPreference) -> SqlResult<SqlText> {
    node.to_sql_with(&AnsiDialect::default(), RenderOptions::bind(placeholder))
}

fn text(value: &str) -> Literal {
    Literal::String(value.to_string())
}

#[test]
fn test_positional_between() {
    let p = col("a").between("A", "Z");
    let out = bind(&p, PlaceholderPreference::Positional).unwrap();
    assert_eq!(out.sql, "a BETWEEN ? AND ?");
    assert_eq!(out.values(), vec![Some(&text("A")), Some(&text("Z"))]);
}

#[test]
fn test_params_follow_traversal_order() {
    let inner = SelectQuery::builder()
        .item(col("y"))
        .from(table("u"))
        .filter(col("z").eq(2))
        .build();
    let query = SelectQuery::builder()
        .item(col("a").add(0))
        .from(table("t"))
        .filter(col("x").eq(1).and(col("y").in_subquery(inner)))
        .having(col("w").lt(3))
        .group_by(vec![col("a")])
        .build();
    let out = bind(&query, PlaceholderPreference::Ordinal).unwrap();
    assert_eq!(
        out.sql,
        "SELECT a + $1 FROM t WHERE x = $2 AND y IN (SELECT y FROM u WHERE z = $3) \
         GROUP BY a HAVING w < $4"
    );
    assert_eq!(
        out.values(),
        vec![
            Some(&Literal::Integer(0)),
            Some(&Literal::Integer(1)),
            Some(&Literal::Integer(2)),
            Some(&Literal::Integer(3)),
        ]
    );
}

#[test]
fn test_named_placeholders() {
    let p = col("a").eq(1).and(col("b").eq(2));
    let out = bind(&p, PlaceholderPreference::Named).unwrap();
    assert_eq!(out.sql, "a = :p1 AND b = :p2");
    let names: Vec<_> = out.params.iter().map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec![Some("p1"), Some("p2")]);
}

#[test]
fn test_caller_named_params() {
    let uid = Expr::Param(Param::named("uid").unwrap().with_value(5));
    let out = bind(&col("id").eq(uid), PlaceholderPreference::Named).unwrap();
    assert_eq!(out.sql, "id = :uid");
    assert_eq!(
        out.params,
        vec![BindParam {
            name: Some("uid".to_string()),
            value: Some(Literal::Integer(5)),
        }]
    );

    let late = bind(&col("id").eq(named_param("user_id")), PlaceholderPreference::Positional).unwrap();
    assert_eq!(late.sql, "id = :user_id");
    assert_eq!(
        late.params,
        vec![BindParam {
            name: Some("user_id".to_string()),
            value: None,
        }]
    );
}

#[test]
fn test_generated_names_avoid_caller_names() {
    let taken = Expr::Param(Param::named("p1").unwrap().with_value(9));
    let p = col("a").eq(1).and(col("b").eq(taken));
    let out = bind(&p, PlaceholderPreference::Named).unwrap();
    assert_eq!(out.sql, "a = :p2 AND b = :p1");
    assert_eq!(
        out.params,
        vec![
            BindParam {
                name: Some("p2".to_string()),
                value: Some(Literal::Integer(1)),
            },
            BindParam {
                name: Some("p1".to_string()),
                value: Some(Literal::Integer(9)),
            },
        ]
    );
}

#[test]
fn test_caller_name_with_two_values_rejected() {
    let first = Expr::Param(Param::named("id").unwrap().with_value(1));
    let second = Expr::Param(Param::named("id").unwrap().with_value(2));
    let p = col("a").eq(first).or(col("b").eq(second));
    let err = bind(&p, PlaceholderPreference::Named).unwrap_err();
    assert!(matches!(err, SqlError::InvalidArgument(_)));
    assert!(err.to_string().contains(":id"));
}

#[test]
fn test_unresolved_ordinal_fails() {
    let p = col("a").eq(Expr::Param(Param::ordinal(1).unwrap()));
    let err = bind(&p, PlaceholderPreference::Ordinal).unwrap_err();
    assert!(matches!(err, SqlError::UnresolvedParameter(_)));

    let anonymous = col("a").eq(Expr::Param(Param::anonymous()));
    let err = bind(&anonymous, PlaceholderPreference::Positional).unwrap_err();
    assert!(matches!(err, SqlError::UnresolvedParameter(_)));
}

#[test]
fn test_null_stays_inline() {
    let out = bind(&col("a").eq(null()), PlaceholderPreference::Positional).unwrap();
    assert_eq!(out.sql, "a = NULL");
    assert!(out.params.is_empty());
}

#[test]
fn test_type_modifiers_not_bound() {
    let varchar = TypeName::keyword("VARCHAR").unwrap().with_modifiers(vec![lit(10)]);
    let out = bind(&lit("x").cast(varchar), PlaceholderPreference::Positional).unwrap();
    assert_eq!(out.sql, "CAST(? AS VARCHAR(10))");
    assert_eq!(out.values(), vec![Some(&text("x"))]);
}

#[test]
fn test_inline_params() {
    assert_eq!(param(5).to_sql().unwrap(), "5");
    assert_eq!(named_param("user_id").to_sql().unwrap(), ":user_id");
    assert_eq!(Expr::Param(Param::anonymous()).to_sql().unwrap(), "?");
    assert_eq!(Expr::Param(Param::ordinal(2).unwrap()).to_sql().unwrap(), "$2");
}

#[test]
fn test_bind_leaves_input_untouched() {
    let p = col("a").eq(1);
    let before = p.clone();
    bind(&p, PlaceholderPreference::Positional).unwrap();
    assert_eq!(p, before);
}

#[test]
fn test_options_from_toml_drive_rendering() {
    let options = RenderOptions::from_toml_str(
        r#"
        mode = "bind"
        placeholder = "ordinal"
        "#,
    )
    .unwrap();
    let out = col("a")
        .eq("x")
        .to_sql_with(&AnsiDialect::default(), options)
        .unwrap();
    assert_eq!(out.sql, "a = $1");
}
