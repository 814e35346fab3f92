//! Inline rendering against the ANSI reference dialect.

use pretty_assertions::assert_eq;

use super::ident;
use crate::prelude::*;

#[test]
fn test_arithmetic() {
    assert_eq!(col("a").add(col("b")).to_sql().unwrap(), "a + b");
    assert_eq!(
        col("a").add(col("b")).mul(col("c")).to_sql().unwrap(),
        "(a + b) * c"
    );
    assert_eq!(
        col("a").mul(col("b").add(col("c"))).to_sql().unwrap(),
        "a * (b + c)"
    );
    assert_eq!(
        col("a").add(col("b").mul(col("c"))).to_sql().unwrap(),
        "a + b * c"
    );
}

#[test]
fn test_equal_precedence_on_the_right() {
    assert_eq!(
        col("a").sub(col("b").sub(col("c"))).to_sql().unwrap(),
        "a - (b - c)"
    );
    assert_eq!(
        col("a").add(col("b").add(col("c"))).to_sql().unwrap(),
        "a + b + c"
    );
    assert_eq!(
        col("a").add(col("b").sub(col("c"))).to_sql().unwrap(),
        "a + (b - c)"
    );
}

#[test]
fn test_negate() {
    assert_eq!(col("a").neg().to_sql().unwrap(), "-a");
    assert_eq!(col("a").add(col("b")).neg().to_sql().unwrap(), "-(a + b)");
    assert_eq!(lit(-5).neg().to_sql().unwrap(), "-(-5)");
    assert_eq!(param(-5).neg().to_sql().unwrap(), "-(-5)");
    assert_eq!(param(5).neg().to_sql().unwrap(), "-5");
    assert_eq!(col("a").neg().neg().to_sql().unwrap(), "-(-a)");
}

#[test]
fn test_between() {
    assert_eq!(
        col("a").between(lit(5), lit(15)).to_sql().unwrap(),
        "a BETWEEN 5 AND 15"
    );
}

#[test]
fn test_logical_grouping() {
    let p = col("a")
        .eq(1)
        .or(col("b").eq(2))
        .and(col("c").is_null());
    assert_eq!(p.to_sql().unwrap(), "(a = 1 OR b = 2) AND c IS NULL");

    let p = col("a").eq(1).and(col("b").eq(2)).or(col("c").is_not_null());
    assert_eq!(p.to_sql().unwrap(), "a = 1 AND b = 2 OR c IS NOT NULL");
}

#[test]
fn test_not_wraps_connectives() {
    let p = col("a").eq(1).and(col("b").eq(2)).not();
    assert_eq!(p.to_sql().unwrap(), "NOT (a = 1 AND b = 2)");
    assert_eq!(col("a").like(lit("x%")).not().to_sql().unwrap(), "NOT a LIKE 'x%'");
}

#[test]
fn test_in_list() {
    let p = col("status").in_values(["new", "open"]);
    assert_eq!(p.to_sql().unwrap(), "status IN ('new', 'open')");
}

#[test]
fn test_literals() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    assert_eq!(lit(date).to_sql().unwrap(), "DATE '2024-01-31'");
    assert_eq!(lit("it's").to_sql().unwrap(), "'it''s'");
    assert_eq!(lit(true).to_sql().unwrap(), "TRUE");
    assert_eq!(null().to_sql().unwrap(), "NULL");
}

#[test]
fn test_case_and_cast() {
    let case = CaseExpr::searched(
        vec![WhenThen {
            when: col("a").gt(0).into(),
            then: lit("pos"),
        }],
        Some(lit("neg")),
    )
    .unwrap();
    assert_eq!(
        Expr::Case(case).to_sql().unwrap(),
        "CASE WHEN a > 0 THEN 'pos' ELSE 'neg' END"
    );

    let varchar = TypeName::keyword("VARCHAR").unwrap().with_modifiers(vec![lit(10)]);
    assert_eq!(col("a").cast(varchar).to_sql().unwrap(), "CAST(a AS VARCHAR(10))");
}

#[test]
fn test_identifier_quoting() {
    assert_eq!(col("order").to_sql().unwrap(), "\"order\"");
    let quoted = Expr::Column(ColumnRef::new(Identifier::quoted("Name").unwrap()));
    assert_eq!(quoted.to_sql().unwrap(), "\"Name\"");
    let backtick = Identifier::with_style("id", QuoteStyle::Backtick).unwrap();
    assert_eq!(Expr::Column(ColumnRef::new(backtick)).to_sql().unwrap(), "\"id\"");
}

#[test]
fn test_select_with_join_and_grouping() {
    let users = table("users").alias(TableAlias::new(ident("u")));
    let orders = table("orders").alias(TableAlias::new(ident("o")));
    let query = SelectQuery::builder()
        .item(qcol("u", "id"))
        .item(count_star().alias(ident("n")))
        .from(users)
        .join(Join::on(
            JoinKind::Left,
            orders,
            qcol("o", "user_id").eq(qcol("u", "id")),
        ))
        .group_by(vec![qcol("u", "id")])
        .having(count_star().gt(1))
        .build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT u.id, count(*) AS n FROM users AS u LEFT JOIN orders AS o ON o.user_id = u.id \
         GROUP BY u.id HAVING count(*) > 1"
    );
}

#[test]
fn test_using_join() {
    let query = SelectQuery::builder()
        .star()
        .from(table("a"))
        .join(Join::using(JoinKind::Inner, table("b"), vec![ident("id"), ident("kind")]).unwrap())
        .build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM a INNER JOIN b USING (id, kind)"
    );
}

#[test]
fn test_empty_select_list_is_filled_by_builder() {
    let query = SelectQuery::builder().from(table("t")).build();
    assert_eq!(query.to_sql().unwrap(), "SELECT * FROM t");
}

#[test]
fn test_empty_select_list_rejected() {
    let query = SelectQuery::default();
    assert!(matches!(query.to_sql(), Err(SqlError::InvalidArgument(_))));
}

#[test]
fn test_subqueries() {
    let inner = SelectQuery::builder()
        .item(lit(1))
        .from(table("orders"))
        .filter(qcol("orders", "user_id").eq(qcol("u", "id")))
        .build();
    let p = Predicate::exists(inner.into());
    assert_eq!(
        p.to_sql().unwrap(),
        "EXISTS (SELECT 1 FROM orders WHERE orders.user_id = u.id)"
    );

    let ids = SelectQuery::builder().item(col("id")).from(table("admins")).build();
    assert_eq!(
        col("id").in_subquery(ids).to_sql().unwrap(),
        "id IN (SELECT id FROM admins)"
    );
}

#[test]
fn test_set_operations() {
    let a = SelectQuery::builder().item(col("x")).from(table("t1")).build();
    let b = SelectQuery::builder().item(col("x")).from(table("t2")).build();
    let union = Query::from(a.clone()).union_all(b.clone().into());
    assert_eq!(
        union.to_sql().unwrap(),
        "SELECT x FROM t1 UNION ALL SELECT x FROM t2"
    );

    let mut limited = SelectQuery::builder();
    limited.item(col("x")).from(table("t2")).order_by(OrderItem::asc(col("x"))).limit(1);
    let mixed = Query::from(a).except(limited.build().into());
    assert_eq!(
        mixed.to_sql().unwrap(),
        "SELECT x FROM t1 EXCEPT (SELECT x FROM t2 ORDER BY x ASC OFFSET 0 ROWS FETCH NEXT 1 ROWS ONLY)"
    );
}

#[test]
fn test_with_query() {
    let recent = SelectQuery::builder().item(col("id")).from(table("orders")).build();
    let body = SelectQuery::builder().star().from(table("recent")).build();
    let with = WithQuery::new(vec![CteDef::new(ident("recent"), recent.into())], body.into(), false)
        .unwrap();
    assert_eq!(
        Query::from(with).to_sql().unwrap(),
        "WITH recent AS (SELECT id FROM orders) SELECT * FROM recent"
    );
}

#[test]
fn test_values_table() {
    let rows = RowList::new(vec![
        Row::new(vec![lit(1), lit("a")]),
        Row::new(vec![lit(2), lit("b")]),
    ])
    .unwrap();
    let alias = TableAlias::new(ident("v")).with_columns(vec![ident("id"), ident("label")]);
    let query = SelectQuery::builder()
        .star()
        .from(TableRef::values(rows, Some(alias)))
        .build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM (VALUES (1, 'a'), (2, 'b')) AS v (id, label)"
    );
}

#[test]
fn test_window_function() {
    let spec = WindowSpec {
        partition_by: Some(PartitionBy {
            exprs: vec![col("dept")],
        }),
        order_by: Some(OrderBy::new(vec![OrderItem::desc(col("salary"))])),
        frame: Some(FrameSpec::Between {
            unit: FrameUnit::Rows,
            start: BoundSpec::UnboundedPreceding,
            end: BoundSpec::CurrentRow,
        }),
        exclude: None,
    };
    let call = FunctionCall::new(QualifiedName::parse_dotted("row_number").unwrap(), vec![])
        .over(OverSpec::Def(spec));
    assert_eq!(
        Expr::Function(call).to_sql().unwrap(),
        "row_number() OVER (PARTITION BY dept ORDER BY salary DESC \
         ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
    );
}

#[test]
fn test_named_window() {
    let rank = FunctionCall::new(QualifiedName::parse_dotted("rank").unwrap(), vec![])
        .over(OverSpec::Ref(ident("w")));
    let query = SelectQuery::builder()
        .item(Expr::Function(rank))
        .from(table("emp"))
        .window(WindowDef {
            name: ident("w"),
            spec: WindowSpec {
                order_by: Some(OrderBy::new(vec![OrderItem::new(col("salary"))])),
                ..WindowSpec::default()
            },
        })
        .build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT rank() OVER w FROM emp WINDOW w AS (ORDER BY salary)"
    );
}

#[test]
fn test_pretty_output() {
    let inner = SelectQuery::builder().item(col("b")).from(table("t")).build();
    let query = SelectQuery::builder()
        .item(col("a"))
        .from(TableRef::subquery(inner.into(), Some(TableAlias::new(ident("s")))))
        .filter(col("a").gt(1))
        .build();
    let text = query
        .to_sql_with(&AnsiDialect::default(), RenderOptions::inline().pretty())
        .unwrap();
    assert_eq!(
        text.sql,
        "SELECT a\nFROM (\n  SELECT b\n  FROM t\n) AS s\nWHERE a > 1"
    );
}
