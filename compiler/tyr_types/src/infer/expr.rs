//! Expression inference.
//!
//! Expressions produce a [`Binding`] rather than a bare type: a name or
//! attribute may stand for a callable handle, which only a call (or an
//! alias assignment) can consume.

use tyr_ir::{Constant, ExprContext, ExprId, ExprKind, ExprRange, Name, Span, StringInterner};

use super::InferEngine;
use crate::stack::ensure_sufficient_stack;
use crate::{
    builtins, Binding, Environment, Idx, InferError, Inliner, Specialize, Tag, UnifyContext,
};

/// Infer what an expression stands for.
#[tracing::instrument(level = "trace", skip(engine, env))]
pub(crate) fn infer_expr(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    expr_id: ExprId,
) -> Result<Binding, InferError> {
    ensure_sufficient_stack(|| infer_expr_inner(engine, env, expr_id))
}

/// Infer the type of an expression that must be a value.
pub(crate) fn infer_type(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    expr_id: ExprId,
) -> Result<Idx, InferError> {
    match infer_expr(engine, env, expr_id)? {
        Binding::Type(ty) => Ok(ty),
        Binding::Generator(_) | Binding::Inliner(_) => Err(InferError::CallableAsValue {
            span: engine.module().arena().get_expr(expr_id).span,
        }),
    }
}

fn infer_expr_inner(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    expr_id: ExprId,
) -> Result<Binding, InferError> {
    let expr = engine.module().arena().get_expr(expr_id);
    let span = expr.span;

    match &expr.kind {
        ExprKind::Constant(value) => Ok(Binding::Type(constant_type(*value))),

        ExprKind::Name {
            id,
            ctx: ExprContext::Load,
        } => infer_name_load(engine, env, *id, span),
        ExprKind::Name {
            id,
            ctx: ExprContext::Store,
        } => Ok(Binding::Type(infer_name_store(engine, env, *id))),

        ExprKind::List { elts, .. } => {
            let elem = infer_elements(engine, env, *elts, UnifyContext::ListElement)?;
            Ok(Binding::Type(engine.pool_mut().list(elem)))
        }
        ExprKind::Set { elts } => {
            let elem = infer_elements(engine, env, *elts, UnifyContext::SetElement)?;
            Ok(Binding::Type(engine.pool_mut().set(elem)))
        }
        ExprKind::Tuple { elts, .. } => {
            let arena = engine.module().arena();
            let elems = arena
                .get_expr_list(*elts)
                .iter()
                .map(|&elt| infer_type(engine, env, elt))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Binding::Type(engine.pool_mut().tuple(&elems)))
        }

        ExprKind::Attribute { value, attr } => infer_attribute(engine, env, *value, *attr, span),

        ExprKind::Call { func, args } => infer_call(engine, env, *func, *args, span),
    }
}

/// The type of a literal.
fn constant_type(value: Constant) -> Idx {
    match value {
        Constant::Int(_) => Idx::INT,
        Constant::Float(_) => Idx::FLOAT,
        Constant::Complex { .. } => Idx::COMPLEX,
        Constant::Bool(_) => Idx::BOOL,
        Constant::Str(_) => Idx::STR,
        Constant::Bytes(_) => Idx::BYTES,
        Constant::None => Idx::NONE,
    }
}

/// Locals first, then global functions.
fn infer_name_load(
    engine: &mut InferEngine<'_>,
    env: &Environment,
    name: Name,
    span: Span,
) -> Result<Binding, InferError> {
    if let Some(binding) = env.lookup(name) {
        return Ok(*binding);
    }
    if let Some(func) = engine.globals().get(name) {
        return Ok(Binding::Inliner(Inliner::new(func)));
    }
    Err(InferError::UnboundName {
        name: engine.interner().lookup(name).to_string(),
        span,
    })
}

/// The type a store writes into: the existing value binding, or a fresh
/// variable bound on first write.
fn infer_name_store(engine: &mut InferEngine<'_>, env: &mut Environment, name: Name) -> Idx {
    if let Some(ty) = env.lookup(name).and_then(Binding::as_type) {
        return ty;
    }
    let ty = engine.fresh_named_var(name);
    env.bind(name, Binding::Type(ty));
    ty
}

/// Unify every element of a display with the first; an empty display has
/// an unconstrained element type.
fn infer_elements(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    elts: ExprRange,
    context: UnifyContext,
) -> Result<Idx, InferError> {
    let arena = engine.module().arena();
    let Some((&first, rest)) = arena.get_expr_list(elts).split_first() else {
        return Ok(engine.fresh_var());
    };

    let first_ty = infer_type(engine, env, first)?;
    for &elt in rest {
        let ty = infer_type(engine, env, elt)?;
        engine.unify_in(first_ty, ty, context, arena.get_expr(elt).span)?;
    }
    Ok(first_ty)
}

fn infer_attribute(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    value: ExprId,
    attr: Name,
    span: Span,
) -> Result<Binding, InferError> {
    let receiver = infer_type(engine, env, value)?;
    let receiver = engine.resolve(receiver);

    let pool = engine.pool();
    let on_builtins =
        pool.tag(receiver) == Tag::Module && pool.module_name(receiver) == Name::BUILTINS;
    if on_builtins {
        if let Some(binding) = builtins::lookup(attr, engine.pool_mut()) {
            return Ok(binding);
        }
    }

    Err(unsupported_attribute(engine.interner(), attr, span))
}

fn unsupported_attribute(interner: &StringInterner, attr: Name, span: Span) -> InferError {
    InferError::UnsupportedAttribute {
        attr: interner.lookup(attr).to_string(),
        span,
    }
}

/// Specialize the callee to the argument types and unify it with
/// `(args) -> ret`.
///
/// A callable passed as an argument (`map(f, xs)`) gets a placeholder
/// variable first. Once the call has fixed the placeholder to a function
/// type, the callable is specialized to that function's parameters.
fn infer_call(
    engine: &mut InferEngine<'_>,
    env: &mut Environment,
    func: ExprId,
    args: ExprRange,
    span: Span,
) -> Result<Binding, InferError> {
    let callee = infer_expr(engine, env, func)?;

    let arena = engine.module().arena();
    let mut arg_types = Vec::with_capacity(args.len());
    let mut deferred = Vec::new();
    for &arg in arena.get_expr_list(args) {
        match infer_expr(engine, env, arg)? {
            Binding::Type(ty) => arg_types.push(ty),
            callable => {
                let placeholder = engine.fresh_var();
                arg_types.push(placeholder);
                deferred.push((placeholder, callable, arena.get_expr(arg).span));
            }
        }
    }

    let ret = engine.fresh_var();
    let specialized = callee.specialize(engine, &arg_types, span)?;
    let call = engine.pool_mut().function(&arg_types, ret);
    engine.unify_at(specialized, call, span)?;

    for (placeholder, callable, arg_span) in deferred {
        specialize_argument(engine, placeholder, callable, arg_span)?;
    }

    Ok(Binding::Type(ret))
}

/// Specialize a callable argument to the function type its parameter
/// slot was unified with.
fn specialize_argument(
    engine: &mut InferEngine<'_>,
    placeholder: Idx,
    callable: Binding,
    span: Span,
) -> Result<(), InferError> {
    let expected = engine.resolve(placeholder);
    if engine.pool().tag(expected) != Tag::Function {
        return Err(InferError::CallableAsValue { span });
    }

    let params = engine.pool().function_params(expected);
    let specialized = callable.specialize(engine, &params, span)?;
    engine.unify_at(expected, specialized, span)
}
