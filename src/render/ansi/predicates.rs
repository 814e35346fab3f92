use crate::ast::*;
use crate::error::SqlResult;
use crate::render::ansi::operand;
use crate::render::{RenderContext, SqlFeature, SqlWriter};

/// Operands of a condition: loose-binding expressions get parentheses.
fn side(expr: &Expr, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    operand(expr, ctx, w, |p| p == 0)
}

pub fn render_comparison(node: &Comparison, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    side(&node.lhs, ctx, w)?;
    w.write(" ");
    w.write(ctx.dialect().comparison_symbol(node.op));
    w.write(" ");
    side(&node.rhs, ctx, w)
}

pub fn render_between(node: &Between, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    side(&node.expr, ctx, w)?;
    w.write(" BETWEEN ");
    if node.symmetric {
        ctx.require(SqlFeature::SymmetricBetween, "BETWEEN SYMMETRIC")?;
        w.write("SYMMETRIC ");
    }
    side(&node.low, ctx, w)?;
    w.write(" AND ");
    side(&node.high, ctx, w)
}

pub fn render_like(node: &Like, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    side(&node.expr, ctx, w)?;
    w.write(if node.negated { " NOT LIKE " } else { " LIKE " });
    side(&node.pattern, ctx, w)?;
    if let Some(escape) = &node.escape {
        w.write(" ESCAPE ");
        side(escape, ctx, w)?;
    }
    Ok(())
}

pub fn render_is_null(node: &IsNull, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    side(&node.expr, ctx, w)?;
    w.write(if node.negated { " IS NOT NULL" } else { " IS NULL" });
    Ok(())
}

pub fn render_is_distinct_from(
    node: &IsDistinctFrom,
    ctx: &RenderContext<'_>,
    w: &mut SqlWriter,
) -> SqlResult<()> {
    ctx.require(SqlFeature::IsDistinctFrom, "IS DISTINCT FROM")?;
    side(&node.lhs, ctx, w)?;
    w.write(if node.negated {
        " IS NOT DISTINCT FROM "
    } else {
        " IS DISTINCT FROM "
    });
    side(&node.rhs, ctx, w)
}

pub fn render_in(node: &InPredicate, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    side(&node.expr, ctx, w)?;
    w.write(if node.negated { " NOT IN " } else { " IN " });
    ctx.render(&node.values, w)
}

pub fn render_exists(node: &Exists, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(if node.negated { "NOT EXISTS " } else { "EXISTS " });
    w.nested(|w| ctx.render(node.query.as_ref(), w))
}

pub fn render_quantified(
    node: &QuantifiedComparison,
    ctx: &RenderContext<'_>,
    w: &mut SqlWriter,
) -> SqlResult<()> {
    side(&node.lhs, ctx, w)?;
    w.write(" ");
    w.write(ctx.dialect().comparison_symbol(node.op));
    w.write(match node.quantifier {
        Quantifier::Any => " ANY ",
        Quantifier::All => " ALL ",
    });
    w.nested(|w| ctx.render(node.query.as_ref(), w))
}

pub fn render_unary(node: &UnaryPredicate, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.render(node.expr.as_ref(), w)
}

pub fn render_not(node: &Not, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("NOT ");
    match node.inner.as_ref() {
        inner @ Predicate::Logical(_) => w.parenthesized(|w| ctx.render(inner, w)),
        inner => ctx.render(inner, w),
    }
}

/// AND binds tighter than OR, so only an OR under an AND needs parentheses.
pub fn render_logical(node: &Logical, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    let keyword = match node.op {
        LogicalOp::And => " AND ",
        LogicalOp::Or => " OR ",
    };
    logical_side(node.op, &node.lhs, ctx, w)?;
    w.write(keyword);
    logical_side(node.op, &node.rhs, ctx, w)
}

fn logical_side(
    parent: LogicalOp,
    child: &Predicate,
    ctx: &RenderContext<'_>,
    w: &mut SqlWriter,
) -> SqlResult<()> {
    match child {
        Predicate::Logical(inner) if parent == LogicalOp::And && inner.op == LogicalOp::Or => {
            w.parenthesized(|w| ctx.render(child, w))
        }
        _ => ctx.render(child, w),
    }
}
