use crate::ast::*;
use crate::error::SqlResult;
use crate::render::ansi::expr_list;
use crate::render::{RenderContext, SqlFeature, SqlWriter};

pub fn render_window_def(node: &WindowDef, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.write_ident(&node.name, w);
    w.write(" AS ");
    w.parenthesized(|w| ctx.render(&node.spec, w))
}

/// Clauses of a window body separated by single spaces; empty for `()`.
pub fn render_window_spec(node: &WindowSpec, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    let mut first = true;
    let mut gap = |w: &mut SqlWriter| {
        if !first {
            w.write(" ");
        }
        first = false;
    };
    if let Some(partition_by) = &node.partition_by {
        gap(w);
        ctx.render(partition_by, w)?;
    }
    if let Some(order_by) = &node.order_by {
        gap(w);
        ctx.render(order_by, w)?;
    }
    if let Some(frame) = &node.frame {
        gap(w);
        ctx.render(frame, w)?;
    }
    if let Some(exclude) = node.exclude {
        ctx.require(SqlFeature::FrameExclusion, "EXCLUDE")?;
        gap(w);
        w.write(match exclude {
            FrameExclusion::CurrentRow => "EXCLUDE CURRENT ROW",
            FrameExclusion::Group => "EXCLUDE GROUP",
            FrameExclusion::Ties => "EXCLUDE TIES",
            FrameExclusion::NoOthers => "EXCLUDE NO OTHERS",
        });
    }
    Ok(())
}

pub fn render_over(node: &OverSpec, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node {
        OverSpec::Ref(name) => {
            ctx.write_ident(name, w);
            Ok(())
        }
        OverSpec::Def(spec) => w.parenthesized(|w| ctx.render(spec, w)),
    }
}

pub fn render_partition_by(node: &PartitionBy, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("PARTITION BY ");
    expr_list(ctx, w, &node.exprs)
}

pub fn render_frame(node: &FrameSpec, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(match node.unit() {
        FrameUnit::Rows => "ROWS ",
        FrameUnit::Range => "RANGE ",
        FrameUnit::Groups => {
            ctx.require(SqlFeature::GroupsFrame, "GROUPS frame")?;
            "GROUPS "
        }
    });
    match node {
        FrameSpec::Single { bound, .. } => ctx.render(bound, w),
        FrameSpec::Between { start, end, .. } => {
            w.write("BETWEEN ");
            ctx.render(start, w)?;
            w.write(" AND ");
            ctx.render(end, w)
        }
    }
}

pub fn render_bound(node: &BoundSpec, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node {
        BoundSpec::UnboundedPreceding => {
            w.write("UNBOUNDED PRECEDING");
        }
        BoundSpec::Preceding(offset) => {
            ctx.render(offset.as_ref(), w)?;
            w.write(" PRECEDING");
        }
        BoundSpec::CurrentRow => {
            w.write("CURRENT ROW");
        }
        BoundSpec::Following(offset) => {
            ctx.render(offset.as_ref(), w)?;
            w.write(" FOLLOWING");
        }
        BoundSpec::UnboundedFollowing => {
            w.write("UNBOUNDED FOLLOWING");
        }
    }
    Ok(())
}
