//! Capability gating, pagination styles and per-dialect spelling.

use pretty_assertions::assert_eq;

use super::ident;
use crate::prelude::*;
use crate::render::{
    BooleanStyle, NullSorting, RenderContext, RenderersRepository, SqlWriter, ansi, quote_string,
};

fn render_on(node: &impl ToSql, dialect: &AnsiDialect) -> SqlResult<String> {
    node.to_sql_with(dialect, RenderOptions::inline()).map(|text| text.sql)
}

fn everything() -> AnsiDialect {
    AnsiDialect::new()
        .with_name("Everything")
        .with_capabilities(DialectCapabilities::all())
}

fn locked(clause: LockingClause) -> SelectQuery {
    SelectQuery::builder().star().from(table("jobs")).lock(clause).build()
}

fn ansi_without(feature: SqlFeature) -> AnsiDialect {
    AnsiDialect::new().with_capabilities(DialectCapabilities::ansi().without(feature))
}

fn unsupported(result: SqlResult<String>) -> SqlFeature {
    match result {
        Err(SqlError::UnsupportedFeature { feature, .. }) => feature,
        other => panic!("expected an unsupported feature error, got {:?}", other),
    }
}

#[test]
fn test_distinct_on_gated() {
    let query = SelectQuery::builder()
        .distinct_on(vec![col("a")])
        .star()
        .from(table("t"))
        .build();
    let ansi = AnsiDialect::default();
    assert_eq!(unsupported(render_on(&query, &ansi)), SqlFeature::DistinctOn);

    let err = query.to_sql().unwrap_err();
    assert!(err.to_string().contains("DISTINCT_ON"));
    assert!(err.to_string().contains("ANSI"));

    let pg_like = AnsiDialect::new().with_capabilities(DialectCapabilities::ansi().with(SqlFeature::DistinctOn));
    assert_eq!(
        render_on(&query, &pg_like).unwrap(),
        "SELECT DISTINCT ON (a) * FROM t"
    );
}

#[test]
fn test_plain_distinct_always_allowed() {
    let query = SelectQuery::builder().distinct().item(col("a")).from(table("t")).build();
    assert_eq!(query.to_sql().unwrap(), "SELECT DISTINCT a FROM t");
}

#[test]
fn test_lock_modes_gated() {
    let ansi = AnsiDialect::default();
    assert_eq!(
        render_on(&locked(LockingClause::for_update()), &ansi).unwrap(),
        "SELECT * FROM jobs FOR UPDATE"
    );

    let cases = [
        (LockMode::Share, SqlFeature::LockShare, "FOR SHARE"),
        (LockMode::NoKeyUpdate, SqlFeature::LockNoKeyUpdate, "FOR NO KEY UPDATE"),
        (LockMode::KeyShare, SqlFeature::LockKeyShare, "FOR KEY SHARE"),
    ];
    for (mode, feature, keyword) in cases {
        let query = locked(LockingClause::new(mode, vec![], false, false).unwrap());
        assert_eq!(unsupported(render_on(&query, &ansi)), feature);
        assert_eq!(
            render_on(&query, &everything()).unwrap(),
            format!("SELECT * FROM jobs {}", keyword)
        );
    }
}

#[test]
fn test_lock_wait_policies_gated() {
    let ansi = AnsiDialect::default();
    let nowait = locked(LockingClause::new(LockMode::Update, vec![], true, false).unwrap());
    assert_eq!(unsupported(render_on(&nowait, &ansi)), SqlFeature::LockNowait);

    let of = vec![QualifiedName::parse_dotted("jobs").unwrap()];
    let skip = locked(LockingClause::new(LockMode::Update, of, false, true).unwrap());
    assert_eq!(unsupported(render_on(&skip, &ansi)), SqlFeature::LockSkipLocked);
    assert_eq!(
        render_on(&skip, &everything()).unwrap(),
        "SELECT * FROM jobs FOR UPDATE OF jobs SKIP LOCKED"
    );
}

#[test]
fn test_nowait_and_skip_locked_exclusive() {
    let err = LockingClause::new(LockMode::Update, vec![], true, true).unwrap_err();
    assert!(matches!(err, SqlError::InvalidArgument(_)));
}

#[test]
fn test_top_pagination() {
    let top = AnsiDialect::new().with_name("Tops").with_pagination(PaginationStyle::Top);
    let mut builder = SelectQuery::builder();
    builder.star().from(table("t")).limit(5);
    assert_eq!(render_on(&builder.build(), &top).unwrap(), "SELECT TOP 5 * FROM t");

    builder.offset(10);
    match render_on(&builder.build(), &top) {
        Err(SqlError::UnsupportedOperation(message)) => assert!(message.contains("offset")),
        other => panic!("expected an unsupported operation, got {:?}", other),
    }
}

#[test]
fn test_top_rejects_limited_set_operation() {
    let top = AnsiDialect::new().with_pagination(PaginationStyle::Top);
    let a = SelectQuery::builder().item(col("x")).from(table("t1")).build();
    let b = SelectQuery::builder().item(col("x")).from(table("t2")).build();
    let composite = CompositeQuery::pair(a.into(), SetOperator::Union, b.into())
        .with_limit_offset(LimitOffset::limit(3));
    let result = render_on(&Query::from(composite), &top);
    assert!(matches!(result, Err(SqlError::UnsupportedOperation(_))));
}

#[test]
fn test_offset_fetch_without_limit_has_no_fetch() {
    let query = SelectQuery::builder().star().from(table("t")).offset(10).build();
    assert_eq!(query.to_sql().unwrap(), "SELECT * FROM t OFFSET 10 ROWS");
}

#[test]
fn test_limit_offset_pagination() {
    let dialect = AnsiDialect::new().with_pagination(PaginationStyle::LimitOffset);
    let query = SelectQuery::builder()
        .star()
        .from(table("t"))
        .order_by(OrderItem::new(col("id")))
        .limit(10)
        .offset(20)
        .build();
    assert_eq!(
        render_on(&query, &dialect).unwrap(),
        "SELECT * FROM t ORDER BY id LIMIT 10 OFFSET 20"
    );
}

#[test]
fn test_nulls_ordering() {
    let first = OrderItem::asc(col("a")).nulls(Nulls::First);
    let query = SelectQuery::builder().star().from(table("t")).order_by(first).build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM t ORDER BY a ASC NULLS FIRST"
    );

    let implicit = AnsiDialect::new().with_null_sorting(NullSorting::implicit(Nulls::Last, Nulls::First));
    assert_eq!(
        render_on(&query, &implicit).unwrap(),
        "SELECT * FROM t ORDER BY CASE WHEN a IS NULL THEN 0 ELSE 1 END, a ASC"
    );

    let already_default = SelectQuery::builder()
        .star()
        .from(table("t"))
        .order_by(OrderItem::desc(col("a")).nulls(Nulls::First))
        .build();
    assert_eq!(
        render_on(&already_default, &implicit).unwrap(),
        "SELECT * FROM t ORDER BY a DESC"
    );
}

#[test]
fn test_dialect_quoting_and_booleans() {
    let dialect = AnsiDialect::new()
        .with_quote('[', ']')
        .with_boolean_style(BooleanStyle::Numeric);
    let query = SelectQuery::builder()
        .item(col("order"))
        .from(table("t"))
        .filter(col("active").eq(true))
        .build();
    assert_eq!(
        render_on(&query, &dialect).unwrap(),
        "SELECT [order] FROM t WHERE active = 1"
    );
}

#[test]
fn test_gated_literals_and_operators() {
    let ansi = AnsiDialect::default();
    let dollar = lit(Literal::dollar_string(Some("fn"), "body").unwrap());
    assert_eq!(unsupported(render_on(&dollar, &ansi)), SqlFeature::DollarStringLiteral);
    assert_eq!(render_on(&dollar, &everything()).unwrap(), "$fn$body$fn$");

    let pow = col("a").pow(2);
    assert_eq!(unsupported(render_on(&pow, &ansi)), SqlFeature::Exponentiation);
    assert_eq!(render_on(&pow, &everything()).unwrap(), "a ^ 2");

    let op = CustomOperator::new("@>").unwrap();
    let contains = Expr::CustomBinary(CustomBinary {
        operator: op,
        lhs: Box::new(col("tags")),
        rhs: Box::new(col("wanted")),
    });
    assert_eq!(unsupported(render_on(&contains, &ansi)), SqlFeature::CustomOperator);
    assert_eq!(render_on(&contains, &everything()).unwrap(), "tags @> wanted");
}

#[test]
fn test_table_inheritance_gated() {
    let query = SelectQuery::builder().star().from(table("parent").only()).build();
    assert_eq!(
        unsupported(render_on(&query, &AnsiDialect::default())),
        SqlFeature::TableInheritance
    );
    assert_eq!(
        render_on(&query, &everything()).unwrap(),
        "SELECT * FROM ONLY parent"
    );
}

#[test]
fn test_lateral_subquery() {
    let inner = SelectQuery::builder()
        .item(col("total"))
        .from(table("orders"))
        .filter(qcol("orders", "user_id").eq(qcol("u", "id")))
        .build();
    let lateral = TableRef::subquery(inner.into(), Some(TableAlias::new(ident("o")))).lateral();
    let query = SelectQuery::builder()
        .star()
        .from(table("users").alias(TableAlias::new(ident("u"))))
        .join(Join::cross(lateral))
        .build();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM users AS u CROSS JOIN LATERAL (SELECT total FROM orders \
         WHERE orders.user_id = u.id) AS o"
    );
}

fn shouting_strings(node: &Literal, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node {
        Literal::String(s) => {
            w.write(&quote_string(&s.to_uppercase()));
            Ok(())
        }
        other => ansi::exprs::render_literal(other, ctx, w),
    }
}

#[test]
fn test_registry_override() {
    let renderers = RenderersRepository::ansi().register::<Literal>(shouting_strings);
    let dialect = AnsiDialect::new().with_name("Shouty").with_renderers(renderers);
    let p = col("name").eq("bob").and(col("age").gt(3));
    assert_eq!(render_on(&p, &dialect).unwrap(), "name = 'BOB' AND age > 3");
    assert_eq!(p.to_sql().unwrap(), "name = 'bob' AND age > 3");
}

#[test]
fn test_at_time_zone_gated() {
    let e = col("created_at").at_time_zone("UTC");
    assert_eq!(
        e.to_sql().unwrap(),
        "created_at AT TIME ZONE 'UTC'"
    );
    assert_eq!(
        unsupported(render_on(&e, &ansi_without(SqlFeature::AtTimeZone))),
        SqlFeature::AtTimeZone
    );
}

#[test]
fn test_array_literal_gated() {
    let e = Expr::Array(ArrayLiteral {
        items: vec![lit(1), lit(2)],
    });
    assert_eq!(e.to_sql().unwrap(), "ARRAY[1, 2]");
    assert_eq!(
        unsupported(render_on(&e, &ansi_without(SqlFeature::ArrayLiteral))),
        SqlFeature::ArrayLiteral
    );
}

#[test]
fn test_lateral_gated() {
    let inner = SelectQuery::builder().item(col("total")).from(table("orders")).build();
    let lateral = TableRef::subquery(inner.into(), Some(TableAlias::new(ident("o")))).lateral();
    let query = SelectQuery::builder()
        .star()
        .from(table("users"))
        .join(Join::cross(lateral))
        .build();
    assert_eq!(
        unsupported(render_on(&query, &ansi_without(SqlFeature::Lateral))),
        SqlFeature::Lateral
    );
}

#[test]
fn test_escape_string_gated() {
    let e = lit(Literal::escape_string("it's"));
    assert_eq!(
        unsupported(render_on(&e, &AnsiDialect::default())),
        SqlFeature::EscapeStringLiteral
    );
    assert_eq!(render_on(&e, &everything()).unwrap(), "E'it''s'");
}

#[test]
fn test_time_zone_type_gated() {
    let ts = TypeName::keyword("TIMESTAMP")
        .unwrap()
        .with_time_zone(TimeZoneSpec::WithTimeZone);
    let e = col("t").cast(ts);
    assert_eq!(e.to_sql().unwrap(), "CAST(t AS TIMESTAMP WITH TIME ZONE)");
    assert_eq!(
        unsupported(render_on(&e, &ansi_without(SqlFeature::TimeZoneTypeName))),
        SqlFeature::TimeZoneTypeName
    );
}

#[test]
fn test_array_type_gated() {
    let e = col("t").cast(TypeName::keyword("INTEGER").unwrap().with_array_dims(2));
    assert_eq!(e.to_sql().unwrap(), "CAST(t AS INTEGER[][])");
    assert_eq!(
        unsupported(render_on(&e, &ansi_without(SqlFeature::ArrayTypeName))),
        SqlFeature::ArrayTypeName
    );
}
