use crate::ast::*;
use crate::error::{SqlError, SqlResult};
use crate::render::ansi::{expr_list, ident_list};
use crate::render::{PaginationStyle, RenderContext, SqlFeature, SqlWriter};

fn offset_with_top(ctx: &RenderContext<'_>) -> SqlError {
    SqlError::UnsupportedOperation(format!(
        "dialect '{}' paginates with TOP and cannot express an offset",
        ctx.dialect().name()
    ))
}

/// Trailing LIMIT/OFFSET or OFFSET/FETCH. TOP is written in the head.
fn write_pagination(
    limit_offset: Option<&LimitOffset>,
    ordered: bool,
    ctx: &RenderContext<'_>,
    w: &mut SqlWriter,
) -> SqlResult<()> {
    let Some(lo) = limit_offset.filter(|lo| !lo.is_empty()) else {
        return Ok(());
    };
    match ctx.dialect().pagination() {
        PaginationStyle::LimitOffset => {
            if let Some(limit) = lo.limit {
                w.clause(&format!("LIMIT {}", limit));
            }
            if let Some(offset) = lo.offset {
                w.clause(&format!("OFFSET {}", offset));
            }
        }
        PaginationStyle::OffsetFetch => {
            if !ordered {
                tracing::warn!(
                    "OFFSET/FETCH without ORDER BY on dialect '{}': row order is unspecified",
                    ctx.dialect().name()
                );
            }
            w.clause(&format!("OFFSET {} ROWS", lo.offset.unwrap_or(0)));
            if let Some(limit) = lo.limit {
                w.clause(&format!("FETCH NEXT {} ROWS ONLY", limit));
            }
        }
        PaginationStyle::Top => {}
    }
    Ok(())
}

pub fn render_select(node: &SelectQuery, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("SELECT");
    if let Some(distinct) = &node.distinct {
        w.write(" ");
        ctx.render(distinct, w)?;
    }
    if ctx.dialect().pagination() == PaginationStyle::Top
        && let Some(lo) = &node.limit_offset
    {
        if lo.offset.is_some() {
            return Err(offset_with_top(ctx));
        }
        if let Some(limit) = lo.limit {
            w.write(&format!(" TOP {}", limit));
        }
    }
    if node.items.is_empty() {
        return Err(SqlError::invalid("SELECT requires at least one item"));
    }
    w.write(" ");
    w.comma_separated(&node.items, |w, item| ctx.render(item, w))?;

    if let Some(from) = &node.from {
        w.clause("FROM ");
        ctx.render(from, w)?;
    }
    for join in &node.joins {
        w.separator();
        ctx.render(join, w)?;
    }
    if let Some(filter) = &node.where_clause {
        w.clause("WHERE ");
        ctx.render(filter, w)?;
    }
    if let Some(group_by) = &node.group_by {
        w.separator();
        ctx.render(group_by, w)?;
    }
    if let Some(having) = &node.having {
        w.clause("HAVING ");
        ctx.render(having, w)?;
    }
    if !node.windows.is_empty() {
        w.clause("WINDOW ");
        w.comma_separated(&node.windows, |w, def| ctx.render(def, w))?;
    }
    if let Some(order_by) = &node.order_by {
        w.separator();
        ctx.render(order_by, w)?;
    }
    write_pagination(node.limit_offset.as_ref(), node.order_by.is_some(), ctx, w)?;
    if let Some(locking) = &node.locking {
        w.separator();
        ctx.render(locking, w)?;
    }
    Ok(())
}

/// A term can stand bare only when it is a plain SELECT.
fn needs_parens(term: &Query) -> bool {
    match term {
        Query::Select(select) => {
            select.order_by.is_some()
                || select.limit_offset.is_some_and(|lo| !lo.is_empty())
                || select.locking.is_some()
        }
        Query::Composite(_) | Query::With(_) => true,
    }
}

fn write_term(term: &Query, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if needs_parens(term) {
        w.nested(|w| ctx.render(term, w))
    } else {
        ctx.render(term, w)
    }
}

pub fn render_composite(node: &CompositeQuery, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if ctx.dialect().pagination() == PaginationStyle::Top
        && let Some(lo) = node.limit_offset()
    {
        if lo.offset.is_some() {
            return Err(offset_with_top(ctx));
        }
        if lo.limit.is_some() {
            return Err(SqlError::UnsupportedOperation(format!(
                "dialect '{}' cannot limit a set operation with TOP",
                ctx.dialect().name()
            )));
        }
    }
    let Some((first, rest)) = node.terms().split_first() else {
        return Err(SqlError::invalid("set operation has no terms"));
    };
    write_term(first, ctx, w)?;
    for (op, term) in node.ops().iter().zip(rest) {
        w.clause(op.keyword());
        w.write(" ");
        write_term(term, ctx, w)?;
    }
    if let Some(order_by) = node.order_by() {
        w.separator();
        ctx.render(order_by, w)?;
    }
    write_pagination(node.limit_offset(), node.order_by().is_some(), ctx, w)
}

pub fn render_with(node: &WithQuery, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(if node.recursive() { "WITH RECURSIVE " } else { "WITH " });
    w.comma_separated(node.ctes(), |w, cte| ctx.render(cte, w))?;
    w.separator();
    ctx.render(node.body(), w)
}

pub fn render_cte(node: &CteDef, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    let Some(body) = &node.body else {
        return Err(SqlError::invalid(format!(
            "common table expression '{}' has no body",
            node.name
        )));
    };
    ctx.write_ident(&node.name, w);
    if !node.columns.is_empty() {
        w.parenthesized(|w| ident_list(ctx, w, &node.columns))?;
    }
    w.write(" AS ");
    match node.materialization {
        Materialization::Default => {}
        Materialization::Materialized => {
            ctx.require(SqlFeature::MaterializedCte, "MATERIALIZED")?;
            w.write("MATERIALIZED ");
        }
        Materialization::NotMaterialized => {
            ctx.require(SqlFeature::MaterializedCte, "NOT MATERIALIZED")?;
            w.write("NOT MATERIALIZED ");
        }
    }
    w.nested(|w| ctx.render(body.as_ref(), w))
}

pub fn render_select_item(node: &SelectItem, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node {
        SelectItem::Expr(aliased) => {
            ctx.render(&aliased.expr, w)?;
            if let Some(alias) = &aliased.alias {
                w.write(" AS ");
                ctx.write_ident(alias, w);
            }
        }
        SelectItem::Star => {
            w.write("*");
        }
        SelectItem::QualifiedStar(name) => {
            ctx.write_qualified(name, w);
            w.write(".*");
        }
    }
    Ok(())
}

pub fn render_distinct(node: &DistinctSpec, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node {
        DistinctSpec::Distinct => {
            w.write("DISTINCT");
            Ok(())
        }
        DistinctSpec::On(exprs) => {
            ctx.require(SqlFeature::DistinctOn, "DISTINCT ON")?;
            w.write("DISTINCT ON ");
            w.parenthesized(|w| expr_list(ctx, w, exprs))
        }
    }
}

pub fn render_group_by(node: &GroupBy, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("GROUP BY ");
    expr_list(ctx, w, &node.items)
}

pub fn render_order_by(node: &OrderBy, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("ORDER BY ");
    w.comma_separated(&node.items, |w, item| ctx.render(item, w))
}

/// Without `NULLS FIRST/LAST` support, a requested placement that differs
/// from the dialect's default is emulated with a leading sort key.
pub fn render_order_item(node: &OrderItem, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    let sorting = ctx.dialect().null_sorting();
    let emulated = node.nulls.filter(|nulls| {
        !sorting.supports_explicit()
            && *nulls != sorting.default_for(node.direction.unwrap_or(Direction::Asc))
    });
    if let Some(nulls) = emulated {
        let (null_key, other_key) = match nulls {
            Nulls::First => (0, 1),
            Nulls::Last => (1, 0),
        };
        w.write("CASE WHEN ");
        ctx.render(&node.expr, w)?;
        w.write(&format!(" IS NULL THEN {} ELSE {} END, ", null_key, other_key));
    }
    ctx.render(&node.expr, w)?;
    match node.direction {
        Some(Direction::Asc) => {
            w.write(" ASC");
        }
        Some(Direction::Desc) => {
            w.write(" DESC");
        }
        None => {}
    }
    if let Some(nulls) = node.nulls
        && sorting.supports_explicit()
    {
        w.write(" ");
        w.write(sorting.keyword(nulls));
    }
    Ok(())
}

pub fn render_locking(node: &LockingClause, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node.mode() {
        LockMode::Update => {
            w.write("FOR UPDATE");
        }
        LockMode::Share => {
            ctx.require(SqlFeature::LockShare, "FOR SHARE")?;
            w.write("FOR SHARE");
        }
        LockMode::NoKeyUpdate => {
            ctx.require(SqlFeature::LockNoKeyUpdate, "FOR NO KEY UPDATE")?;
            w.write("FOR NO KEY UPDATE");
        }
        LockMode::KeyShare => {
            ctx.require(SqlFeature::LockKeyShare, "FOR KEY SHARE")?;
            w.write("FOR KEY SHARE");
        }
    }
    if !node.of_tables().is_empty() {
        w.write(" OF ");
        w.comma_separated(node.of_tables(), |w, name| {
            ctx.write_qualified(name, w);
            Ok(())
        })?;
    }
    if node.nowait() {
        ctx.require(SqlFeature::LockNowait, "NOWAIT")?;
        w.write(" NOWAIT");
    }
    if node.skip_locked() {
        ctx.require(SqlFeature::LockSkipLocked, "SKIP LOCKED")?;
        w.write(" SKIP LOCKED");
    }
    Ok(())
}
