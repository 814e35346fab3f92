use crate::ast::*;
use crate::error::{SqlError, SqlResult};
use crate::render::ansi::{binding, expr_list, operand};
use crate::render::{BindParam, PlaceholderPreference, RenderContext, SqlFeature, SqlWriter};

pub fn render_literal(node: &Literal, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write(&ctx.dialect().format_literal(node)?);
    Ok(())
}

pub fn render_column(node: &ColumnRef, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if let Some(qualifier) = &node.qualifier {
        ctx.write_ident(qualifier, w);
        w.write(".");
    }
    ctx.write_ident(&node.name, w);
    Ok(())
}

/// Inline mode writes the carried value, or the parameter's own syntax if
/// it has none. Bind mode records the value and writes a placeholder.
pub fn render_param(node: &Param, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if !ctx.is_bind() {
        if let Some(value) = node.value() {
            return ctx.render(value, w);
        }
        let syntax = match node.kind() {
            ParamKind::Anonymous => "?".to_string(),
            ParamKind::Ordinal(n) => format!("${}", n),
            ParamKind::Named(name) => format!(":{}", name),
        };
        w.write(&syntax);
        return Ok(());
    }

    let Some(value) = node.value() else {
        return match node.kind() {
            ParamKind::Named(name) => {
                w.bind_named(name, None)?;
                w.push_param(BindParam {
                    name: Some(name.clone()),
                    value: None,
                });
                w.write(&format!(":{}", name));
                Ok(())
            }
            ParamKind::Ordinal(n) => Err(SqlError::UnresolvedParameter(format!(
                "parameter ${} has no value",
                n
            ))),
            ParamKind::Anonymous => Err(SqlError::UnresolvedParameter(
                "anonymous parameter has no value".to_string(),
            )),
        };
    };

    let index = w.param_count() + 1;
    let caller_name = node.name().map(str::to_string);
    let (placeholder, name) = match ctx.options().placeholder {
        PlaceholderPreference::Positional => ("?".to_string(), caller_name),
        PlaceholderPreference::Ordinal => (format!("${}", index), caller_name),
        PlaceholderPreference::Named => {
            let name = caller_name.unwrap_or_else(|| w.generated_name(index));
            w.bind_named(&name, Some(value))?;
            (format!(":{}", name), Some(name))
        }
    };
    w.push_param(BindParam {
        name,
        value: Some(value.clone()),
    });
    w.write(&placeholder);
    Ok(())
}

pub fn render_function(node: &FunctionCall, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.write_qualified(&node.name, w);
    w.parenthesized(|w| {
        if node.distinct {
            w.write("DISTINCT ");
        }
        match &node.args {
            FunctionArgs::Star => {
                w.write("*");
                Ok(())
            }
            FunctionArgs::List(args) => expr_list(ctx, w, args),
        }
    })?;
    if let Some(order_by) = &node.within_group {
        ctx.require(SqlFeature::WithinGroup, "WITHIN GROUP")?;
        w.write(" WITHIN GROUP ");
        w.parenthesized(|w| ctx.render(order_by, w))?;
    }
    if let Some(filter) = &node.filter {
        ctx.require(SqlFeature::FilterClause, "FILTER")?;
        w.write(" FILTER ");
        w.parenthesized(|w| {
            w.write("WHERE ");
            ctx.render(filter.as_ref(), w)
        })?;
    }
    if let Some(over) = &node.over {
        w.write(" OVER ");
        ctx.render(over, w)?;
    }
    Ok(())
}

pub fn render_case(node: &CaseExpr, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("CASE");
    if let Some(operand) = node.operand() {
        w.write(" ");
        ctx.render(operand, w)?;
    }
    for arm in node.whens() {
        w.write(" WHEN ");
        ctx.render(&arm.when, w)?;
        w.write(" THEN ");
        ctx.render(&arm.then, w)?;
    }
    if let Some(else_result) = node.else_result() {
        w.write(" ELSE ");
        ctx.render(else_result, w)?;
    }
    w.write(" END");
    Ok(())
}

/// Operands are parenthesised by precedence: a looser operand always, an
/// equal one on the right unless it repeats the same associative operator,
/// and an equal one on the left of `^`.
pub fn render_arithmetic(node: &Arithmetic, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    if node.op == ArithmeticOp::Pow {
        ctx.require(SqlFeature::Exponentiation, "^ operator")?;
    }
    let level = node.op.precedence();
    operand(&node.lhs, ctx, w, |p| p < level || (p == level && node.op == ArithmeticOp::Pow))?;
    w.write(" ");
    w.write(ctx.dialect().arithmetic_symbol(node.op));
    w.write(" ");
    let same_associative = matches!(&*node.rhs, Expr::Arithmetic(rhs) if rhs.op == node.op)
        && node.op.is_associative();
    operand(&node.rhs, ctx, w, |p| p < level || (p == level && !same_associative))
}

/// An operand whose text starts with `-` is wrapped, so `--` never opens
/// a line comment.
pub fn render_negate(node: &Negate, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("-");
    if binding(&node.operand).is_some() {
        return w.parenthesized(|w| ctx.render(node.operand.as_ref(), w));
    }
    let start = w.len();
    ctx.render(node.operand.as_ref(), w)?;
    if w.as_str()[start..].starts_with('-') {
        w.wrap_from(start);
    }
    Ok(())
}

fn write_operator(op: &CustomOperator, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.require(SqlFeature::CustomOperator, "custom operator")?;
    match op.schema() {
        Some(schema) => {
            w.write("OPERATOR(");
            ctx.write_qualified(schema, w);
            w.write(".");
            w.write(op.symbol());
            w.write(")");
        }
        None => {
            w.write(op.symbol());
        }
    }
    Ok(())
}

/// Operator expressions under a custom operator are always parenthesised.
pub fn render_custom_binary(node: &CustomBinary, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    operand(&node.lhs, ctx, w, |_| true)?;
    w.write(" ");
    write_operator(&node.operator, ctx, w)?;
    w.write(" ");
    operand(&node.rhs, ctx, w, |_| true)
}

pub fn render_custom_unary(node: &CustomUnary, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    write_operator(&node.operator, ctx, w)?;
    w.write(" ");
    operand(&node.operand, ctx, w, |_| true)
}

pub fn render_cast(node: &Cast, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.write("CAST(");
    ctx.render(node.expr.as_ref(), w)?;
    w.write(" AS ");
    ctx.render(&node.type_name, w)?;
    w.write(")");
    Ok(())
}

pub fn render_type_name(node: &TypeName, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    match node.base() {
        TypeBase::Keyword(keyword) => {
            w.write(keyword);
        }
        TypeBase::Named(name) => ctx.write_qualified(name, w),
    }
    if !node.modifiers().is_empty() {
        w.parenthesized(|w| expr_list(ctx, w, node.modifiers()))?;
    }
    match node.time_zone() {
        TimeZoneSpec::None => {}
        TimeZoneSpec::WithTimeZone => {
            ctx.require(SqlFeature::TimeZoneTypeName, "WITH TIME ZONE")?;
            w.write(" WITH TIME ZONE");
        }
        TimeZoneSpec::WithoutTimeZone => {
            ctx.require(SqlFeature::TimeZoneTypeName, "WITHOUT TIME ZONE")?;
            w.write(" WITHOUT TIME ZONE");
        }
    }
    if node.array_dims() > 0 {
        ctx.require(SqlFeature::ArrayTypeName, "array type")?;
        for _ in 0..node.array_dims() {
            w.write("[]");
        }
    }
    Ok(())
}

pub fn render_array(node: &ArrayLiteral, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.require(SqlFeature::ArrayLiteral, "ARRAY[...]")?;
    w.write("ARRAY[");
    expr_list(ctx, w, &node.items)?;
    w.write("]");
    Ok(())
}

pub fn render_row(node: &Row, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.parenthesized(|w| expr_list(ctx, w, &node.items))
}

pub fn render_row_list(node: &RowList, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.comma_separated(node.rows(), |w, row| ctx.render(row, w))
}

pub fn render_subquery(node: &SubqueryExpr, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    w.nested(|w| ctx.render(node.query.as_ref(), w))
}

pub fn render_collate(node: &Collate, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    operand(&node.expr, ctx, w, |_| true)?;
    w.write(" COLLATE ");
    ctx.write_qualified(&node.collation, w);
    Ok(())
}

pub fn render_at_time_zone(node: &AtTimeZone, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
    ctx.require(SqlFeature::AtTimeZone, "AT TIME ZONE")?;
    operand(&node.expr, ctx, w, |_| true)?;
    w.write(" AT TIME ZONE ");
    operand(&node.zone, ctx, w, |_| true)
}
