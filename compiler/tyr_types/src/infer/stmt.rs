//! Statement inference.

use tyr_ir::{ExprContext, ExprId, ExprKind, Stmt, StmtKind};

use super::expr::{infer_expr, infer_type};
use super::InferEngine;
use crate::{Binding, Environment, Idx, InferError};

/// Visit one statement of a function body.
pub(super) fn infer_stmt(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    stmt: &Stmt,
) -> Result<(), InferError> {
    match &stmt.kind {
        StmtKind::Return(value) => {
            let ty = match value {
                Some(expr) => infer_type(engine, env, *expr)?,
                None => Idx::NONE,
            };
            engine.unify_at(env.return_slot(), ty, stmt.span)?;
            env.mark_returned();
            Ok(())
        }

        StmtKind::Assign { targets, value } => {
            // Computed once, shared by every target
            let value = infer_expr(engine, env, *value)?;
            let arena = engine.module().arena();
            for &target in arena.get_expr_list(*targets) {
                assign_target(engine, env, target, value)?;
            }
            Ok(())
        }

        StmtKind::Expr(expr) => {
            infer_expr(engine, env, *expr)?;
            Ok(())
        }
    }
}

/// Constrain one assignment target by the assigned value.
///
/// Tuple and list targets are inferred in store context, so their element
/// names get fresh variables that unification then fills in.
fn assign_target(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    target: ExprId,
    value: Binding,
) -> Result<(), InferError> {
    let expr = engine.module().arena().get_expr(target);

    match value {
        Binding::Type(ty) => {
            let target_ty = infer_type(engine, env, target)?;
            engine.unify_at(target_ty, ty, expr.span)
        }
        Binding::Generator(_) | Binding::Inliner(_) => match expr.kind {
            // `f = len_like` aliases the handle
            ExprKind::Name {
                id,
                ctx: ExprContext::Store,
            } => {
                env.bind(id, value);
                Ok(())
            }
            _ => Err(InferError::CallableAsValue { span: expr.span }),
        },
    }
}
