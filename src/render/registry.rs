//! Per-node renderer table.
//!
//! Every concrete node type has exactly one [`Renderer`] slot in a
//! [`RenderersRepository`]. Dialects start from the ANSI table and swap
//! individual entries with [`RenderersRepository::register`]. Supertype
//! enums (`Expr`, `Predicate`, ...) have no slot; they dispatch to the
//! variant's renderer.

use std::fmt;

use crate::ast::*;
use crate::error::SqlResult;
use crate::render::ansi;
use crate::render::{RenderContext, SqlWriter};

/// Writes one node type.
pub trait Renderer<T: ?Sized>: Send + Sync {
    fn render(&self, node: &T, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()>;
}

impl<T: ?Sized, F> Renderer<T> for F
where
    F: Fn(&T, &RenderContext<'_>, &mut SqlWriter) -> SqlResult<()> + Send + Sync,
{
    fn render(&self, node: &T, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        self(node, ctx, w)
    }
}

/// Anything that can be written through a render context.
pub trait Render {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()>;
}

/// A node type with its own slot in the renderer table.
pub trait RegisteredNode: Sized + 'static {
    fn renderer(repo: &RenderersRepository) -> &dyn Renderer<Self>;
    fn renderer_mut(repo: &mut RenderersRepository) -> &mut Box<dyn Renderer<Self>>;
}

macro_rules! renderers {
    ($($field:ident: $ty:ty => $default:path;)*) => {
        /// Renderer table keyed by node type.
        pub struct RenderersRepository {
            $($field: Box<dyn Renderer<$ty>>,)*
        }

        impl RenderersRepository {
            /// The reference renderers.
            pub fn ansi() -> Self {
                Self {
                    $($field: Box::new($default),)*
                }
            }
        }

        $(
            impl RegisteredNode for $ty {
                fn renderer(repo: &RenderersRepository) -> &dyn Renderer<Self> {
                    repo.$field.as_ref()
                }

                fn renderer_mut(repo: &mut RenderersRepository) -> &mut Box<dyn Renderer<Self>> {
                    &mut repo.$field
                }
            }

            impl Render for $ty {
                fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
                    ctx.renderers().get::<$ty>().render(self, ctx, w)
                }
            }
        )*
    };
}

renderers! {
    literal: Literal => ansi::exprs::render_literal;
    column: ColumnRef => ansi::exprs::render_column;
    param: Param => ansi::exprs::render_param;
    function: FunctionCall => ansi::exprs::render_function;
    case: CaseExpr => ansi::exprs::render_case;
    arithmetic: Arithmetic => ansi::exprs::render_arithmetic;
    negate: Negate => ansi::exprs::render_negate;
    custom_binary: CustomBinary => ansi::exprs::render_custom_binary;
    custom_unary: CustomUnary => ansi::exprs::render_custom_unary;
    cast: Cast => ansi::exprs::render_cast;
    type_name: TypeName => ansi::exprs::render_type_name;
    array: ArrayLiteral => ansi::exprs::render_array;
    row: Row => ansi::exprs::render_row;
    row_list: RowList => ansi::exprs::render_row_list;
    subquery: SubqueryExpr => ansi::exprs::render_subquery;
    collate: Collate => ansi::exprs::render_collate;
    at_time_zone: AtTimeZone => ansi::exprs::render_at_time_zone;
    comparison: Comparison => ansi::predicates::render_comparison;
    between: Between => ansi::predicates::render_between;
    like: Like => ansi::predicates::render_like;
    is_null: IsNull => ansi::predicates::render_is_null;
    is_distinct_from: IsDistinctFrom => ansi::predicates::render_is_distinct_from;
    in_predicate: InPredicate => ansi::predicates::render_in;
    exists: Exists => ansi::predicates::render_exists;
    quantified: QuantifiedComparison => ansi::predicates::render_quantified;
    unary: UnaryPredicate => ansi::predicates::render_unary;
    not: Not => ansi::predicates::render_not;
    logical: Logical => ansi::predicates::render_logical;
    named_table: NamedTable => ansi::tables::render_named_table;
    subquery_table: SubqueryTable => ansi::tables::render_subquery_table;
    values_table: ValuesTable => ansi::tables::render_values_table;
    function_table: FunctionTable => ansi::tables::render_function_table;
    lateral_table: LateralTable => ansi::tables::render_lateral_table;
    cross_join: CrossJoin => ansi::tables::render_cross_join;
    natural_join: NaturalJoin => ansi::tables::render_natural_join;
    using_join: UsingJoin => ansi::tables::render_using_join;
    on_join: OnJoin => ansi::tables::render_on_join;
    select: SelectQuery => ansi::queries::render_select;
    composite: CompositeQuery => ansi::queries::render_composite;
    with: WithQuery => ansi::queries::render_with;
    cte: CteDef => ansi::queries::render_cte;
    select_item: SelectItem => ansi::queries::render_select_item;
    distinct: DistinctSpec => ansi::queries::render_distinct;
    group_by: GroupBy => ansi::queries::render_group_by;
    order_by: OrderBy => ansi::queries::render_order_by;
    order_item: OrderItem => ansi::queries::render_order_item;
    locking: LockingClause => ansi::queries::render_locking;
    window_def: WindowDef => ansi::windows::render_window_def;
    window_spec: WindowSpec => ansi::windows::render_window_spec;
    over: OverSpec => ansi::windows::render_over;
    partition_by: PartitionBy => ansi::windows::render_partition_by;
    frame: FrameSpec => ansi::windows::render_frame;
    bound: BoundSpec => ansi::windows::render_bound;
}

impl RenderersRepository {
    pub fn get<T: RegisteredNode>(&self) -> &dyn Renderer<T> {
        T::renderer(self)
    }

    /// Replace the renderer for `T`.
    pub fn register<T: RegisteredNode>(mut self, renderer: impl Renderer<T> + 'static) -> Self {
        *T::renderer_mut(&mut self) = Box::new(renderer);
        self
    }
}

impl Default for RenderersRepository {
    fn default() -> Self {
        Self::ansi()
    }
}

impl fmt::Debug for RenderersRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderersRepository").finish_non_exhaustive()
    }
}

impl Render for Expr {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Expr::Literal(n) => n.render(ctx, w),
            Expr::Column(n) => n.render(ctx, w),
            Expr::Param(n) => n.render(ctx, w),
            Expr::Function(n) => n.render(ctx, w),
            Expr::Case(n) => n.render(ctx, w),
            Expr::Arithmetic(n) => n.render(ctx, w),
            Expr::Negate(n) => n.render(ctx, w),
            Expr::CustomBinary(n) => n.render(ctx, w),
            Expr::CustomUnary(n) => n.render(ctx, w),
            Expr::Cast(n) => n.render(ctx, w),
            Expr::Array(n) => n.render(ctx, w),
            Expr::Row(n) => n.render(ctx, w),
            Expr::RowList(n) => n.render(ctx, w),
            Expr::Subquery(n) => n.render(ctx, w),
            Expr::Collate(n) => n.render(ctx, w),
            Expr::AtTimeZone(n) => n.render(ctx, w),
            Expr::Predicate(n) => n.render(ctx, w),
        }
    }
}

impl Render for Predicate {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Predicate::Comparison(n) => n.render(ctx, w),
            Predicate::Between(n) => n.render(ctx, w),
            Predicate::Like(n) => n.render(ctx, w),
            Predicate::IsNull(n) => n.render(ctx, w),
            Predicate::IsDistinctFrom(n) => n.render(ctx, w),
            Predicate::In(n) => n.render(ctx, w),
            Predicate::Exists(n) => n.render(ctx, w),
            Predicate::Quantified(n) => n.render(ctx, w),
            Predicate::Unary(n) => n.render(ctx, w),
            Predicate::Not(n) => n.render(ctx, w),
            Predicate::Logical(n) => n.render(ctx, w),
        }
    }
}

impl Render for ValueSet {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            ValueSet::Subquery(q) => w.nested(|w| q.render(ctx, w)),
            ValueSet::Row(row) => row.render(ctx, w),
            ValueSet::RowList(rows) => w.parenthesized(|w| rows.render(ctx, w)),
        }
    }
}

impl Render for TableRef {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            TableRef::Named(n) => n.render(ctx, w),
            TableRef::Subquery(n) => n.render(ctx, w),
            TableRef::Values(n) => n.render(ctx, w),
            TableRef::Function(n) => n.render(ctx, w),
            TableRef::Lateral(n) => n.render(ctx, w),
        }
    }
}

impl Render for Join {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Join::Cross(n) => n.render(ctx, w),
            Join::Natural(n) => n.render(ctx, w),
            Join::Using(n) => n.render(ctx, w),
            Join::On(n) => n.render(ctx, w),
        }
    }
}

impl Render for Query {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Query::Select(n) => n.render(ctx, w),
            Query::Composite(n) => n.render(ctx, w),
            Query::With(n) => n.render(ctx, w),
        }
    }
}
