//! Reference (ANSI) renderers, one free function per node type.
//!
//! Each function has the [`Renderer`](crate::render::Renderer) signature so
//! a dialect can reuse it directly or wrap it.

pub mod exprs;
pub mod predicates;
pub mod queries;
pub mod tables;
pub mod windows;

use crate::ast::{Expr, Identifier, TableAlias};
use crate::error::SqlResult;
use crate::render::{RenderContext, SqlWriter};

/// Binding strength of an operator expression; `None` for atoms.
pub(crate) fn binding(expr: &Expr) -> Option<u8> {
    match expr {
        Expr::Arithmetic(a) => Some(a.op.precedence()),
        Expr::Negate(_) => Some(4),
        Expr::CustomBinary(_) | Expr::CustomUnary(_) | Expr::Predicate(_) => Some(0),
        _ => None,
    }
}

/// Render `expr`, in parentheses when `wrap` says so for its binding.
pub(crate) fn operand(
    expr: &Expr,
    ctx: &RenderContext<'_>,
    w: &mut SqlWriter,
    wrap: impl FnOnce(u8) -> bool,
) -> SqlResult<()> {
    match binding(expr) {
        Some(strength) if wrap(strength) => w.parenthesized(|w| ctx.render(expr, w)),
        _ => ctx.render(expr, w),
    }
}

pub(crate) fn ident_list(ctx: &RenderContext<'_>, w: &mut SqlWriter, list: &[Identifier]) -> SqlResult<()> {
    w.comma_separated(list, |w, ident| {
        ctx.write_ident(ident, w);
        Ok(())
    })
}

pub(crate) fn expr_list(ctx: &RenderContext<'_>, w: &mut SqlWriter, list: &[Expr]) -> SqlResult<()> {
    w.comma_separated(list, |w, expr| ctx.render(expr, w))
}

/// ` AS alias (c1, c2)`
pub(crate) fn alias(ctx: &RenderContext<'_>, w: &mut SqlWriter, alias: Option<&TableAlias>) -> SqlResult<()> {
    let Some(alias) = alias else {
        return Ok(());
    };
    w.write(" AS ");
    ctx.write_ident(&alias.name, w);
    if !alias.columns.is_empty() {
        w.write(" ");
        w.parenthesized(|w| ident_list(ctx, w, &alias.columns))?;
    }
    Ok(())
}
