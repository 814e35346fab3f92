use crate::ast::*;
use crate::error::SqlResult;
use crate::render::ansi::{alias, ident_list};
use crate::render::{RenderContext, SqlFeature, SqlWriter};

pub fn render_named_table(node: &NamedTable, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if node.inheritance == Inheritance::Only {
        ctx.require(SqlFeature::TableInheritance, "ONLY")?;
        w.write("ONLY ");
    }
    if let Some(schema) = &node.schema {
        ctx.write_ident(schema, w);
        w.write(".");
    }
    ctx.write_ident(&node.name, w);
    if node.inheritance == Inheritance::WithDescendants {
        ctx.require(SqlFeature::TableInheritance, "table *")?;
        w.write(" *");
    }
    alias(ctx, w, node.alias.as_ref())
}

pub fn render_subquery_table(node: &SubqueryTable, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.nested(|w| ctx.render(node.query.as_ref(), w))?;
    alias(ctx, w, node.alias.as_ref())
}

pub fn render_values_table(node: &ValuesTable, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.parenthesized(|w| {
        w.write("VALUES ");
        ctx.render(&node.rows, w)
    })?;
    alias(ctx, w, node.alias.as_ref())
}

pub fn render_function_table(node: &FunctionTable, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.render(&node.function, w)?;
    alias(ctx, w, node.alias.as_ref())
}

pub fn render_lateral_table(node: &LateralTable, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.require(SqlFeature::Lateral, "LATERAL")?;
    w.write("LATERAL ");
    ctx.render(node.inner.as_ref(), w)
}

fn join_keyword(kind: JoinKind) -> &'static str {
    match kind {
        JoinKind::Inner => "INNER JOIN ",
        JoinKind::Left => "LEFT JOIN ",
        JoinKind::Right => "RIGHT JOIN ",
        JoinKind::Full => "FULL JOIN ",
    }
}

pub fn render_cross_join(node: &CrossJoin, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("CROSS JOIN ");
    ctx.render(&node.table, w)
}

pub fn render_natural_join(node: &NaturalJoin, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("NATURAL JOIN ");
    ctx.render(&node.table, w)
}

pub fn render_using_join(node: &UsingJoin, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(join_keyword(node.kind()));
    ctx.render(node.table(), w)?;
    w.write(" USING ");
    w.parenthesized(|w| ident_list(ctx, w, node.columns()))
}

pub fn render_on_join(node: &OnJoin, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(join_keyword(node.kind));
    ctx.render(&node.table, w)?;
    w.write(" ON ");
    ctx.render(&node.on, w)
}
