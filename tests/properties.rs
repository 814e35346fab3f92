use std::borrow::Cow;

use pretty_assertions::assert_eq;
use sqlshape::prelude::*;
use sqlshape::render::BindParam;
use sqlshape::visit::{IdentityTransformer, walk_function, walk_row};

/// Records nodes in the order they are entered.
#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
}

impl Visitor for Recorder {
    type Output = ();

    fn default_result(&mut self) {}

    fn visit_row(&mut self, node: &Row) {
        self.seen.push("row".to_string());
        walk_row(self, node)
    }

    fn visit_function(&mut self, node: &FunctionCall) {
        self.seen.push(format!("function {}", node.name));
        walk_function(self, node)
    }

    fn visit_column(&mut self, node: &ColumnRef) {
        match &node.qualifier {
            Some(q) => self.seen.push(format!("column {}.{}", q, node.name)),
            None => self.seen.push(format!("column {}", node.name)),
        }
    }
}

#[test]
fn test_traversal_is_preorder_left_to_right() {
    let row = Row::new(vec![func("lower", vec![qcol("u", "id")]), col("name")]);
    let mut recorder = Recorder::default();
    row.accept(&mut recorder);
    assert_eq!(
        recorder.seen,
        vec!["row", "function lower", "column u.id", "column name"]
    );
}

#[test]
fn test_identity_rewrite_keeps_reference() {
    let query: Query = SelectQuery::builder()
        .item(func("lower", vec![col("email")]))
        .from(table("users"))
        .filter(col("age").between(18, 65).and(col("name").like("A%")))
        .order_by(OrderItem::desc(col("age")))
        .limit(10)
        .build()
        .into();
    match query.rewrite(&mut IdentityTransformer) {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &query)),
        Cow::Owned(_) => panic!("identity rewrite copied the tree"),
    }
}

/// Replaces literal 0 with literal 1.
struct BumpZero;

impl Transformer for BumpZero {
    fn transform_literal<'a>(&mut self, node: &'a Literal) -> Cow<'a, Literal> {
        match node {
            Literal::Integer(0) => Cow::Owned(Literal::Integer(1)),
            _ => Cow::Borrowed(node),
        }
    }
}

#[test]
fn test_rewrite_rebuilds_only_when_changed() {
    let untouched = col("a").gt(5);
    assert!(matches!(untouched.rewrite(&mut BumpZero), Cow::Borrowed(_)));

    let changed = col("a").gt(0).or(col("b").lt(5));
    let rewritten = changed.rewrite(&mut BumpZero);
    assert!(matches!(rewritten, Cow::Owned(_)));
    assert_eq!(
        rewritten.into_owned(),
        col("a").gt(1).or(col("b").lt(5))
    );
}

#[test]
fn test_inline_rendering() {
    assert_eq!(col("a").add(col("b")).to_sql().unwrap(), "a + b");
    assert_eq!(col("a").between(5, 15).to_sql().unwrap(), "a BETWEEN 5 AND 15");
}

#[test]
fn test_bind_positional() {
    let out = col("a")
        .between("A", "Z")
        .to_sql_with(
            &AnsiDialect::default(),
            RenderOptions::bind(PlaceholderPreference::Positional),
        )
        .unwrap();
    assert_eq!(out.sql, "a BETWEEN ? AND ?");
    assert_eq!(
        out.params,
        vec![
            BindParam {
                name: None,
                value: Some(Literal::String("A".into())),
            },
            BindParam {
                name: None,
                value: Some(Literal::String("Z".into())),
            },
        ]
    );
}

#[test]
fn test_bind_order_ignores_nesting_depth() {
    let deep = col("a").eq(1).and(col("b").eq(2).or(col("c").eq(3).and(col("d").eq(4))));
    let shallow_first = col("e").eq(5).and(deep);
    let out = shallow_first
        .to_sql_with(
            &AnsiDialect::default(),
            RenderOptions::bind(PlaceholderPreference::Positional),
        )
        .unwrap();
    let values: Vec<_> = out.values().into_iter().flatten().cloned().collect();
    assert_eq!(
        values,
        vec![5, 1, 2, 3, 4].into_iter().map(Literal::Integer).collect::<Vec<_>>()
    );
}

#[test]
fn test_ansi_gates_postgres_only_constructs() {
    let distinct_on = SelectQuery::builder()
        .distinct_on(vec![col("a")])
        .from(table("t"))
        .build();
    let err = distinct_on.to_sql().unwrap_err();
    assert!(err.to_string().contains("DISTINCT_ON"), "{}", err);

    let share = SelectQuery::builder()
        .from(table("t"))
        .lock(LockingClause::new(LockMode::Share, vec![], false, false).unwrap())
        .build();
    assert!(share.to_sql().unwrap_err().to_string().contains("LOCK_SHARE"));

    let skip = SelectQuery::builder()
        .from(table("t"))
        .lock(LockingClause::new(LockMode::Update, vec![], false, true).unwrap())
        .build();
    assert!(skip.to_sql().unwrap_err().to_string().contains("LOCK_SKIP_LOCKED"));
}

#[test]
fn test_pagination_edges() {
    let top = AnsiDialect::new().with_pagination(PaginationStyle::Top);
    let paged = SelectQuery::builder().from(table("t")).limit(10).offset(5).build();
    let err = paged.to_sql_with(&top, RenderOptions::inline()).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedOperation(_)));
    assert!(err.to_string().contains("offset"));

    let offset_only = SelectQuery::builder().from(table("t")).offset(5).build();
    let sql = offset_only.to_sql().unwrap();
    assert_eq!(sql, "SELECT * FROM t OFFSET 5 ROWS");
    assert!(!sql.contains("FETCH"));
}

#[test]
fn test_locking_flags_exclusive() {
    assert!(matches!(
        LockingClause::new(LockMode::Update, vec![], true, true),
        Err(SqlError::InvalidArgument(_))
    ));
}

/// Caps every LIMIT at one row.
struct CapLimit;

impl Transformer for CapLimit {
    fn transform_limit_offset<'a>(&mut self, node: &'a LimitOffset) -> Cow<'a, LimitOffset> {
        match node.limit {
            Some(limit) if limit > 1 => Cow::Owned(LimitOffset {
                limit: Some(1),
                ..*node
            }),
            _ => Cow::Borrowed(node),
        }
    }
}

fn names_from(source: &str, min_age: i64) -> Query {
    SelectQuery::builder()
        .item(col("name"))
        .from(table(source))
        .filter(col("age").gt(min_age))
        .build()
        .into()
}

#[test]
fn test_composite_rewrite() {
    let query: Query = CompositeQuery::pair(names_from("a", 5), SetOperator::Union, names_from("b", 0))
        .with_limit_offset(LimitOffset::limit(100).with_offset(20))
        .into();

    match query.rewrite(&mut IdentityTransformer) {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &query)),
        Cow::Owned(_) => panic!("identity rewrite copied the composite"),
    }

    let capped = query.rewrite(&mut CapLimit).into_owned();
    let capped = capped.as_composite().unwrap();
    assert_eq!(capped.limit_offset(), Some(&LimitOffset::limit(1).with_offset(20)));
    assert_eq!(capped.terms(), query.as_composite().unwrap().terms());
    let again = Query::from(capped.clone());
    assert!(matches!(again.rewrite(&mut CapLimit), Cow::Borrowed(_)));

    let bumped = query.rewrite(&mut BumpZero).into_owned();
    let bumped = bumped.as_composite().unwrap();
    assert_eq!(bumped.terms()[0], names_from("a", 5));
    assert_eq!(bumped.terms()[1], names_from("b", 1));
    assert_eq!(bumped.ops(), &[SetOperator::Union]);
    assert_eq!(bumped.limit_offset(), Some(&LimitOffset::limit(100).with_offset(20)));
}

#[test]
fn test_with_query_rewrite() {
    let cte = CteDef::new(Identifier::new("adults").unwrap(), names_from("people", 0));
    let body: Query = SelectQuery::builder()
        .star()
        .from(table("adults"))
        .limit(50)
        .build()
        .into();
    let query: Query = WithQuery::new(vec![cte.clone()], body, false).unwrap().into();

    match query.rewrite(&mut IdentityTransformer) {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &query)),
        Cow::Owned(_) => panic!("identity rewrite copied the WITH query"),
    }

    let capped = query.rewrite(&mut CapLimit).into_owned();
    let with = capped.as_with().unwrap();
    assert_eq!(with.ctes(), &[cte]);
    assert_eq!(
        with.body().as_select().unwrap().limit_offset,
        Some(LimitOffset::limit(1))
    );

    let bumped = query.rewrite(&mut BumpZero).into_owned();
    let with = bumped.as_with().unwrap();
    assert_eq!(with.ctes()[0].body.as_deref(), Some(&names_from("people", 1)));
    assert_eq!(
        with.body().as_select().unwrap().limit_offset,
        Some(LimitOffset::limit(50))
    );
}

#[test]
fn test_negated_negative_param_is_not_a_comment() {
    let query = SelectQuery::builder()
        .item(param(-5).neg())
        .item(col("b"))
        .from(table("t"))
        .build();
    assert_eq!(query.to_sql().unwrap(), "SELECT -(-5), b FROM t");
}
