//! Type inference by elaboration and call-site inlining.
//!
//! `InferEngine` wraps [`UnifyEngine`] and walks function bodies, building
//! constraints as it goes. Polymorphism comes from re-elaboration: every
//! call to a user function visits its body again with the caller's argument
//! types, in a fresh [`Environment`].
//!
//! # Architecture
//!
//! - `infer_function` elaborates a definition with fresh named variables as
//!   parameters, giving its generic signature
//! - `specialize_function` elaborates it with concrete argument types
//! - A stack of functions currently being elaborated guards against
//!   unbounded recursion; re-entry yields a fresh unconstrained variable
//!
//! # Usage
//!
//! ```ignore
//! let globals = GlobalDecls::from_module(&module);
//! let mut pool = Pool::new();
//! let mut engine = InferEngine::new(&mut pool, &module, &globals, &interner);
//!
//! let sig = engine.infer_function(f)?;
//! let sig = engine.resolve_deep(sig);
//! ```

mod expr;
mod stmt;

use tyr_ir::{FunctionId, GlobalDecls, Module, Name, Span, StringInterner};

use crate::stack::ensure_sufficient_stack;
use crate::{
    ArityKind, Binding, Environment, Idx, InferError, InferOptions, Pool, UnifyContext,
    UnifyEngine, UnifyError,
};

/// The type inference engine.
pub struct InferEngine<'a> {
    /// The unification engine (owns mutable pool access).
    unify: UnifyEngine<'a>,
    module: &'a Module,
    /// Functions reachable by name from any body.
    globals: &'a GlobalDecls,
    interner: &'a StringInterner,
    options: InferOptions,
    /// Functions currently being elaborated, innermost last.
    in_progress: Vec<FunctionId>,
    /// The `builtins` namespace type.
    builtins: Idx,
}

impl<'a> InferEngine<'a> {
    /// Create an engine with default options.
    pub fn new(
        pool: &'a mut Pool,
        module: &'a Module,
        globals: &'a GlobalDecls,
        interner: &'a StringInterner,
    ) -> Self {
        Self::with_options(pool, module, globals, interner, InferOptions::default())
    }

    pub fn with_options(
        pool: &'a mut Pool,
        module: &'a Module,
        globals: &'a GlobalDecls,
        interner: &'a StringInterner,
        options: InferOptions,
    ) -> Self {
        let builtins = pool.module(Name::BUILTINS);
        Self {
            unify: UnifyEngine::new(pool),
            module,
            globals,
            interner,
            options,
            in_progress: Vec::new(),
            builtins,
        }
    }

    // ========================================
    // Accessors
    // ========================================

    #[inline]
    pub fn pool(&self) -> &Pool {
        self.unify.pool()
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.unify.pool_mut()
    }

    #[inline]
    pub fn options(&self) -> &InferOptions {
        &self.options
    }

    #[inline]
    pub(crate) fn module(&self) -> &'a Module {
        self.module
    }

    #[inline]
    pub(crate) fn globals(&self) -> &'a GlobalDecls {
        self.globals
    }

    #[inline]
    pub(crate) fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub(crate) fn fresh_var(&mut self) -> Idx {
        self.unify.fresh_var()
    }

    pub(crate) fn fresh_named_var(&mut self, name: Name) -> Idx {
        self.unify.fresh_named_var(name)
    }

    /// Resolve a type by following links.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        self.unify.resolve(idx)
    }

    /// Rebuild a type with every resolved variable substituted.
    pub fn resolve_deep(&mut self, idx: Idx) -> Idx {
        self.unify.resolve_deep(idx)
    }

    pub(crate) fn unify_at(&mut self, a: Idx, b: Idx, span: Span) -> Result<(), InferError> {
        self.unify
            .unify(a, b)
            .map_err(|err| InferError::unify(err, span))
    }

    pub(crate) fn unify_in(
        &mut self,
        a: Idx,
        b: Idx,
        context: UnifyContext,
        span: Span,
    ) -> Result<(), InferError> {
        self.unify
            .unify_with_context(a, b, context)
            .map_err(|err| InferError::unify(err, span))
    }

    // ========================================
    // Entry Points
    // ========================================

    /// Infer the generic signature of `func`.
    ///
    /// Parameters start as fresh variables carrying their source names; the
    /// body's constraints decide how much of them gets fixed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn infer_function(&mut self, func: FunctionId) -> Result<Idx, InferError> {
        let module = self.module;
        let def = module.function(func);
        let params: Vec<Idx> = def
            .params
            .iter()
            .map(|&name| self.fresh_named_var(name))
            .collect();
        self.elaborate(func, &params)
    }

    /// Elaborate `func` for a call with argument types `args`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn specialize_function(
        &mut self,
        func: FunctionId,
        args: &[Idx],
    ) -> Result<Idx, InferError> {
        let span = self.module.function(func).span;
        self.specialize_at(func, args, span)
    }

    /// Elaborate `func` for a call at `span`.
    pub(crate) fn specialize_at(
        &mut self,
        func: FunctionId,
        args: &[Idx],
        span: Span,
    ) -> Result<Idx, InferError> {
        let module = self.module;
        let def = module.function(func);
        if def.params.len() != args.len() {
            return Err(InferError::unify(
                UnifyError::ArityMismatch {
                    expected: def.params.len(),
                    found: args.len(),
                    kind: ArityKind::Function,
                },
                span,
            ));
        }

        if self.options.recursion_guard && self.in_progress.contains(&func) {
            tracing::debug!(
                function = self.interner.lookup(def.name),
                "recursive call, result left unconstrained"
            );
            return Ok(self.fresh_var());
        }

        if self.in_progress.len() >= self.options.max_inline_depth {
            return Err(InferError::InlineDepthExceeded {
                function: self.interner.lookup(def.name).to_string(),
                depth: self.options.max_inline_depth,
                span,
            });
        }

        self.elaborate(func, args)
    }

    /// Visit the body of `func` with its parameters bound to `params`.
    ///
    /// Returns `(params) -> ret`, where `ret` is `none` if the body never
    /// executes a `return`.
    fn elaborate(&mut self, func: FunctionId, params: &[Idx]) -> Result<Idx, InferError> {
        let module = self.module;
        ensure_sufficient_stack(|| {
            let def = module.function(func);
            let ret = self.fresh_named_var(Name::RETURN);
            let mut env = Environment::new(ret, self.builtins);
            for (&name, &ty) in def.params.iter().zip(params) {
                env.bind(name, Binding::Type(ty));
            }

            self.in_progress.push(func);
            let visited = def
                .body
                .iter()
                .try_for_each(|stmt| stmt::infer_stmt(self, &mut env, stmt));
            self.in_progress.pop();
            visited?;

            if self.options.dump_environment {
                tracing::debug!(
                    function = self.interner.lookup(def.name),
                    "environment:\n{}",
                    env.dump(self.pool(), self.interner)
                );
            }

            let ret_ty = if env.has_returned() {
                self.resolve(ret)
            } else {
                Idx::NONE
            };
            Ok(self.pool_mut().function(params, ret_ty))
        })
    }
}
