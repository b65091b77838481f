//! Type unification engine.
//!
//! Link-based unification with path compression, extended with overloaded
//! (disjunctive) variables.
//!
//! # Design
//!
//! - Variables are linked directly to their unified type (no substitution maps)
//! - Path compression shortens chains during resolution
//! - Two variables are made "the same type" by linking one root to the other,
//!   never by sharing mutable candidate lists
//! - Overload narrowing tries each candidate in a trial: the pool logs every
//!   variable change while a snapshot is open, and rolling back replays the
//!   log in reverse
//! - Merging two overloaded variables joins their candidates pairwise, so a
//!   chosen pair fixes the types of both sides
//! - Narrowing that leaves several candidates records the narrowing type in
//!   each survivor; pending overloads are rechecked after every top-level
//!   unification until nothing changes
//! - Flag-gated occurs check skips traversal when `HAS_VAR` is false
//!
//! # Usage
//!
//! ```ignore
//! let mut pool = Pool::new();
//! let mut engine = UnifyEngine::new(&mut pool);
//!
//! let var = engine.fresh_var();
//! engine.unify(var, Idx::INT)?;
//! assert_eq!(engine.resolve(var), Idx::INT);
//! ```

mod error;

pub use error::{ArityKind, UnifyContext, UnifyError};

use tyr_ir::Name;

use crate::{Candidate, Idx, Pool, Tag, TypeFlags, VarState};

/// The unification engine.
///
/// Holds the only mutable access to the pool for the duration of an
/// inference run, so variables cannot leak between unrelated runs.
pub struct UnifyEngine<'pool> {
    pool: &'pool mut Pool,
}

impl<'pool> UnifyEngine<'pool> {
    /// Create a new unification engine.
    pub fn new(pool: &'pool mut Pool) -> Self {
        Self { pool }
    }

    /// Get read-only access to the pool.
    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    /// Get mutable access to the pool (for type construction).
    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.pool
    }

    /// Create a fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.pool.fresh_var()
    }

    /// Create a fresh unbound type variable carrying a source name.
    pub fn fresh_named_var(&mut self, name: Name) -> Idx {
        self.pool.fresh_named_var(name)
    }

    // ========================================
    // Resolution
    // ========================================

    /// Resolve a type by following links.
    ///
    /// Intermediate links are updated to point directly to the final target.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        if self.pool.tag(idx) != Tag::Var {
            return idx;
        }

        let var_id = self.pool.var_id(idx);
        match self.pool.var_state(var_id) {
            VarState::Link { target } => {
                let target = *target;
                let resolved = self.resolve(target);

                // Path compression
                if resolved != target {
                    self.pool.set_var_state(var_id, VarState::Link { target: resolved });
                }

                resolved
            }
            VarState::Unbound { .. } | VarState::Overloaded { .. } => idx,
        }
    }

    /// Whether `idx` resolves to a variable with no constraint at all.
    pub fn is_unbound(&mut self, idx: Idx) -> bool {
        let idx = self.resolve(idx);
        self.pool.tag(idx) == Tag::Var
            && matches!(
                self.pool.var_state(self.pool.var_id(idx)),
                VarState::Unbound { .. }
            )
    }

    /// Types of the remaining candidates if `idx` resolves to an
    /// overloaded variable.
    pub fn candidates(&mut self, idx: Idx) -> Option<Vec<Idx>> {
        let idx = self.resolve(idx);
        self.overload_of(idx)
            .map(|(_, candidates)| candidates.iter().map(|c| c.ty).collect())
    }

    /// Id and candidates of a resolved overloaded variable.
    fn overload_of(&self, idx: Idx) -> Option<(u32, Vec<Candidate>)> {
        if self.pool.tag(idx) != Tag::Var {
            return None;
        }
        match self.pool.var_state(self.pool.var_id(idx)) {
            VarState::Overloaded { id, candidates } => Some((*id, candidates.clone())),
            _ => None,
        }
    }

    /// Rebuild `idx` with every resolved variable replaced by its target.
    ///
    /// Unbound and overloaded variables are kept as they are. The result
    /// is hash-consed, so two fully resolved types compare equal by `Idx`.
    pub fn resolve_deep(&mut self, idx: Idx) -> Idx {
        let idx = self.resolve(idx);
        if !self.pool.flags(idx).contains(TypeFlags::HAS_VAR) {
            return idx;
        }

        match self.pool.tag(idx) {
            Tag::List => {
                let elem = self.resolve_deep(self.pool.child(idx));
                self.pool.list(elem)
            }
            Tag::Set => {
                let elem = self.resolve_deep(self.pool.child(idx));
                self.pool.set(elem)
            }
            Tag::Tuple => {
                let chain = self.resolve_deep(self.pool.child(idx));
                self.pool.tuple_of_chain(chain)
            }
            Tag::TupleCons => {
                let head = self.resolve_deep(self.pool.cons_head(idx));
                let tail = self.resolve_deep(self.pool.cons_tail(idx));
                self.pool.cons(head, tail)
            }
            Tag::Function => {
                let params: Vec<Idx> = self
                    .pool
                    .function_params(idx)
                    .into_iter()
                    .map(|p| self.resolve_deep(p))
                    .collect();
                let ret = self.resolve_deep(self.pool.function_return(idx));
                self.pool.function(&params, ret)
            }
            _ => idx,
        }
    }

    // ========================================
    // Unification
    // ========================================

    /// Unify two types, making them equivalent.
    ///
    /// On failure, bindings made before the failing step are kept; callers
    /// treat any error as fatal to the enclosing inference.
    pub fn unify(&mut self, a: Idx, b: Idx) -> Result<(), UnifyError> {
        self.unify_with_context(a, b, UnifyContext::TopLevel)
    }

    /// Unify with explicit context for better error messages.
    ///
    /// Pending overloads are rechecked once the unification succeeds.
    pub fn unify_with_context(
        &mut self,
        a: Idx,
        b: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        self.unify_inner(a, b, context)?;
        self.settle_overloads()
    }

    /// Run a trial unification and discard its effect on variables.
    ///
    /// Types interned during the trial stay in the pool; they are inert.
    pub fn probe(&mut self, a: Idx, b: Idx) -> Result<(), UnifyError> {
        self.trial(|engine| engine.unify_inner(a, b, UnifyContext::TopLevel))
    }

    fn trial(
        &mut self,
        run: impl FnOnce(&mut Self) -> Result<(), UnifyError>,
    ) -> Result<(), UnifyError> {
        let snapshot = self.pool.snapshot_vars();
        let result = run(self);
        self.pool.rollback_vars(snapshot);
        result
    }

    fn unify_inner(&mut self, a: Idx, b: Idx, context: UnifyContext) -> Result<(), UnifyError> {
        // Fast path: identical indices (covers equal literal markers)
        if a == b {
            return Ok(());
        }

        let a = self.resolve(a);
        let b = self.resolve(b);
        if a == b {
            return Ok(());
        }

        match (self.pool.tag(a), self.pool.tag(b)) {
            (Tag::Var, Tag::Var) => self.unify_vars(a, b, context),
            (Tag::Var, _) => self.unify_var_with(a, b, context),
            (_, Tag::Var) => self.unify_var_with(b, a, context),
            _ => self.unify_structural(a, b, context),
        }
    }

    fn link(&mut self, var: Idx, target: Idx) {
        let var_id = self.pool.var_id(var);
        self.pool.set_var_state(var_id, VarState::Link { target });
    }

    /// Unify a resolved variable with a resolved non-variable type.
    fn unify_var_with(
        &mut self,
        var: Idx,
        ty: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        let var_id = self.pool.var_id(var);

        match self.pool.var_state(var_id).clone() {
            VarState::Unbound { .. } => {
                if self.occurs(var_id, ty) {
                    return Err(UnifyError::InfiniteType {
                        var_id,
                        containing_type: ty,
                    });
                }
                self.link(var, ty);
                Ok(())
            }
            VarState::Overloaded { id, candidates } => {
                self.narrow(var, id, &candidates, ty, context)
            }
            // Not reachable after resolve(), but harmless
            VarState::Link { target } => self.unify_inner(target, ty, context),
        }
    }

    // ========================================
    // Overloads
    // ========================================

    /// Unify `ty` with every member of `candidate`.
    fn unify_candidate(
        &mut self,
        ty: Idx,
        candidate: &Candidate,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        for member in candidate.members() {
            self.unify_inner(ty, member, context)?;
        }
        Ok(())
    }

    /// Whether the members of `candidate` unify with each other.
    fn candidate_holds(&mut self, candidate: &Candidate) -> bool {
        self.trial(|engine| {
            engine.unify_candidate(candidate.ty, candidate, UnifyContext::TopLevel)
        })
        .is_ok()
    }

    /// Keep the candidates of an overloaded variable that accept `ty`.
    fn narrow(
        &mut self,
        var: Idx,
        id: u32,
        candidates: &[Candidate],
        ty: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        if self.occurs(id, ty) {
            return Err(UnifyError::InfiniteType {
                var_id: id,
                containing_type: ty,
            });
        }

        let mut survivors = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if self
                .trial(|engine| engine.unify_candidate(ty, candidate, context))
                .is_ok()
            {
                let mut survivor = candidate.clone();
                survivor.join(ty);
                survivors.push(survivor);
            }
        }

        tracing::debug!(
            var_id = id,
            before = candidates.len(),
            after = survivors.len(),
            "narrowed overload"
        );

        if survivors.is_empty() {
            return Err(UnifyError::NoMatchingOverload {
                candidates: candidates.len(),
                found: ty,
            });
        }
        self.commit_survivors(var, id, survivors, context)
    }

    /// Replace the candidates of `var` with the non-empty `survivors`.
    ///
    /// A single survivor is chosen: `var` links to its type, which is then
    /// unified with the joined types.
    fn commit_survivors(
        &mut self,
        var: Idx,
        id: u32,
        mut survivors: Vec<Candidate>,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        if survivors.len() == 1 {
            let chosen = survivors.remove(0);
            self.link(var, chosen.ty);
            for joined in chosen.joined {
                self.unify_inner(chosen.ty, joined, context)?;
            }
            return Ok(());
        }

        let constrained = survivors.iter().any(|c| !c.joined.is_empty());
        self.pool.set_var_state(
            id,
            VarState::Overloaded {
                id,
                candidates: survivors,
            },
        );
        if constrained {
            self.pool.add_pending_overload(var);
        }
        Ok(())
    }

    /// Unify two distinct resolved variables.
    fn unify_vars(&mut self, a: Idx, b: Idx, context: UnifyContext) -> Result<(), UnifyError> {
        let (a_id, b_id) = (self.pool.var_id(a), self.pool.var_id(b));
        let a_state = self.pool.var_state(a_id).clone();
        let b_state = self.pool.var_state(b_id).clone();

        match (a_state, b_state) {
            (VarState::Unbound { .. }, _) => {
                if self.occurs(a_id, b) {
                    return Err(UnifyError::InfiniteType {
                        var_id: a_id,
                        containing_type: b,
                    });
                }
                self.link(a, b);
                Ok(())
            }
            (_, VarState::Unbound { .. }) => {
                if self.occurs(b_id, a) {
                    return Err(UnifyError::InfiniteType {
                        var_id: b_id,
                        containing_type: a,
                    });
                }
                self.link(b, a);
                Ok(())
            }
            (
                VarState::Overloaded {
                    candidates: left, ..
                },
                VarState::Overloaded {
                    candidates: right, ..
                },
            ) => self.merge_overloads(a, &left, b, &right, context),
            // Not reachable after resolve(), but harmless
            (VarState::Link { target }, _) => self.unify_inner(target, b, context),
            (_, VarState::Link { target }) => self.unify_inner(a, target, context),
        }
    }

    /// Merge two overloaded variables: every pair of candidates that unify
    /// becomes one candidate of the merged set.
    fn merge_overloads(
        &mut self,
        a: Idx,
        left: &[Candidate],
        b: Idx,
        right: &[Candidate],
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        let (a_id, b_id) = (self.pool.var_id(a), self.pool.var_id(b));
        if self.occurs(a_id, b) || self.occurs(b_id, a) {
            return Err(UnifyError::InfiniteType {
                var_id: a_id,
                containing_type: b,
            });
        }

        let mut merged: Vec<Candidate> = Vec::new();
        for x in left {
            for y in right {
                let pair = x.combine(y);
                if !merged.contains(&pair) && self.candidate_holds(&pair) {
                    merged.push(pair);
                }
            }
        }
        merged.sort();

        tracing::debug!(
            left = left.len(),
            right = right.len(),
            surviving_pairs = merged.len(),
            "merged overloads"
        );

        if merged.is_empty() {
            return Err(UnifyError::NoMatchingOverload {
                candidates: left.len() * right.len(),
                found: b,
            });
        }

        // b joins a's set either way
        self.link(b, a);
        self.commit_survivors(a, a_id, merged, context)
    }

    /// Recheck pending overloads against their recorded constraints until
    /// no candidate set changes.
    fn settle_overloads(&mut self) -> Result<(), UnifyError> {
        loop {
            let mut changed = false;
            for var in self.pool.pending_overloads().to_vec() {
                let var = self.resolve(var);
                let Some((id, candidates)) = self.overload_of(var) else {
                    continue;
                };

                let mut survivors = Vec::with_capacity(candidates.len());
                for candidate in &candidates {
                    if self.candidate_holds(candidate) {
                        survivors.push(candidate.clone());
                    }
                }
                if survivors.len() == candidates.len() {
                    continue;
                }

                tracing::debug!(
                    var_id = id,
                    before = candidates.len(),
                    after = survivors.len(),
                    "rechecked overload"
                );
                if survivors.is_empty() {
                    return Err(UnifyError::NoMatchingOverload {
                        candidates: candidates.len(),
                        found: var,
                    });
                }
                changed = true;
                self.commit_survivors(var, id, survivors, UnifyContext::TopLevel)?;
            }

            let mut still_open = Vec::new();
            for var in self.pool.pending_overloads().to_vec() {
                let var = self.resolve(var);
                if self.overload_of(var).is_some() && !still_open.contains(&var) {
                    still_open.push(var);
                }
            }
            self.pool.set_pending_overloads(still_open);

            if !changed {
                return Ok(());
            }
        }
    }

    // ========================================
    // Occurs Check
    // ========================================

    /// Check if variable `var_id` occurs in type `ty`.
    ///
    /// Flag-gated: types without `HAS_VAR` are skipped without traversal.
    fn occurs(&self, var_id: u32, ty: Idx) -> bool {
        if !self.pool.flags(ty).contains(TypeFlags::HAS_VAR) {
            return false;
        }

        match self.pool.tag(ty) {
            Tag::Var => {
                let other_id = self.pool.var_id(ty);
                if other_id == var_id {
                    return true;
                }
                match self.pool.var_state(other_id) {
                    VarState::Link { target } => self.occurs(var_id, *target),
                    VarState::Overloaded { candidates, .. } => candidates
                        .iter()
                        .flat_map(Candidate::members)
                        .any(|member| self.occurs(var_id, member)),
                    VarState::Unbound { .. } => false,
                }
            }
            Tag::List | Tag::Set | Tag::Tuple => self.occurs(var_id, self.pool.child(ty)),
            Tag::TupleCons => {
                self.occurs(var_id, self.pool.cons_head(ty))
                    || self.occurs(var_id, self.pool.cons_tail(ty))
            }
            Tag::Function => {
                self.pool
                    .function_params(ty)
                    .into_iter()
                    .any(|p| self.occurs(var_id, p))
                    || self.occurs(var_id, self.pool.function_return(ty))
            }
            _ => false,
        }
    }

    // ========================================
    // Structural Unification
    // ========================================

    /// Unify two resolved, non-variable types structurally.
    fn unify_structural(
        &mut self,
        a: Idx,
        b: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        let tag_a = self.pool.tag(a);
        let tag_b = self.pool.tag(b);

        if tag_a != tag_b {
            return Err(UnifyError::Mismatch {
                expected: a,
                found: b,
                context,
            });
        }

        match tag_a {
            // Same tag means equal
            Tag::Int
            | Tag::Float
            | Tag::Complex
            | Tag::Bool
            | Tag::Str
            | Tag::Bytes
            | Tag::None
            | Tag::TupleEnd => Ok(()),

            Tag::Module => {
                if self.pool.module_name(a) == self.pool.module_name(b) {
                    Ok(())
                } else {
                    Err(UnifyError::Mismatch {
                        expected: a,
                        found: b,
                        context,
                    })
                }
            }

            Tag::List => {
                let (ea, eb) = (self.pool.child(a), self.pool.child(b));
                self.unify_inner(ea, eb, UnifyContext::ListElement)
            }

            Tag::Set => {
                let (ea, eb) = (self.pool.child(a), self.pool.child(b));
                self.unify_inner(ea, eb, UnifyContext::SetElement)
            }

            Tag::Tuple => self.unify_tuples(a, b, context),

            Tag::TupleCons => {
                let (ha, hb) = (self.pool.cons_head(a), self.pool.cons_head(b));
                let (ta, tb) = (self.pool.cons_tail(a), self.pool.cons_tail(b));
                self.unify_inner(ha, hb, context)?;
                self.unify_inner(ta, tb, context)
            }

            Tag::Function => {
                let params_a = self.pool.function_params(a);
                let params_b = self.pool.function_params(b);

                if params_a.len() != params_b.len() {
                    return Err(UnifyError::ArityMismatch {
                        expected: params_a.len(),
                        found: params_b.len(),
                        kind: ArityKind::Function,
                    });
                }

                for (i, (pa, pb)) in params_a.into_iter().zip(params_b).enumerate() {
                    self.unify_inner(pa, pb, UnifyContext::param(i))?;
                }

                let (ra, rb) = (self.pool.function_return(a), self.pool.function_return(b));
                self.unify_inner(ra, rb, UnifyContext::FunctionReturn)
            }

            Tag::Var => self.unify_vars(a, b, context),
        }
    }

    /// Unify two tuples.
    ///
    /// When both chains are fully known, lengths are compared up front so a
    /// length difference reports an arity error rather than a tag mismatch
    /// deep in the chain.
    fn unify_tuples(&mut self, a: Idx, b: Idx, context: UnifyContext) -> Result<(), UnifyError> {
        if let (Some(elems_a), Some(elems_b)) = (self.pool.tuple_elems(a), self.pool.tuple_elems(b))
        {
            if elems_a.len() != elems_b.len() {
                return Err(UnifyError::ArityMismatch {
                    expected: elems_a.len(),
                    found: elems_b.len(),
                    kind: ArityKind::Tuple,
                });
            }
            for (i, (ea, eb)) in elems_a.into_iter().zip(elems_b).enumerate() {
                self.unify_inner(ea, eb, UnifyContext::tuple_elem(i))?;
            }
            return Ok(());
        }

        let (ca, cb) = (self.pool.child(a), self.pool.child(b));
        self.unify_inner(ca, cb, context)
    }
}
