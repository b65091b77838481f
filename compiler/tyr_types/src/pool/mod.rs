//! Unified type storage.
//!
//! Every type lives in the `Pool` as an [`Item`] (tag + data) with cached
//! [`TypeFlags`]. Structural types are hash-consed: building the same type
//! twice yields the same [`Idx`]. Type variables are never interned; each
//! `fresh_*` call creates a new variable with its own mutable [`VarState`].
//!
//! # Layout
//!
//! ```text
//! Pool
//! ├── items      (tag, data) per Idx
//! ├── flags      TypeFlags per Idx
//! ├── extra      variable-length payloads (functions, tuple cons cells)
//! ├── intern_map structural key → Idx
//! ├── var_states VarState per variable id
//! ├── undo_log   previous VarStates, while a snapshot is open
//! └── pending    overloaded variables with recorded constraints
//! ```

mod construct;
mod format;

use rustc_hash::FxHashMap;
use tyr_ir::Name;

use crate::{Idx, Tag, TypeFlags};

/// A single type item in the pool.
#[derive(Copy, Clone, Debug)]
pub struct Item {
    /// Type kind discriminant.
    pub tag: Tag,
    /// Tag-dependent data: child index, extra index, interned name or var id.
    pub data: u32,
}

impl Item {
    #[inline]
    pub const fn new(tag: Tag, data: u32) -> Self {
        Self { tag, data }
    }
}

/// State of a type variable.
///
/// Variables form a disjoint-set forest: `Link` is the parent pointer, and
/// the root of each set is either `Unbound` or `Overloaded`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VarState {
    /// No constraint yet.
    Unbound {
        id: u32,
        /// Source name, for diagnostics.
        name: Option<Name>,
    },
    /// Resolved: this variable is the same type as `target`.
    Link { target: Idx },
    /// The type is one of `candidates` (always two or more), to be narrowed
    /// by later unification.
    Overloaded { id: u32, candidates: Vec<Candidate> },
}

/// One alternative of an overloaded variable.
///
/// Choosing it makes the variable `ty`, and `ty` the same type as every
/// entry of `joined`. Merging two overloaded variables joins their
/// alternatives pairwise; narrowing that leaves several alternatives open
/// records the narrowing type in each of them.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Candidate {
    pub ty: Idx,
    pub joined: Vec<Idx>,
}

impl Candidate {
    pub fn new(ty: Idx) -> Self {
        Self {
            ty,
            joined: Vec::new(),
        }
    }

    /// `ty` followed by the joined types.
    pub fn members(&self) -> impl Iterator<Item = Idx> + '_ {
        std::iter::once(self.ty).chain(self.joined.iter().copied())
    }

    /// The alternative standing for both `self` and `other`.
    ///
    /// Members are kept in index order, so the result does not depend on
    /// which side came first.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        let mut members: Vec<Idx> = self.members().chain(other.members()).collect();
        members.sort_unstable();
        members.dedup();
        let ty = members.remove(0);
        Self {
            ty,
            joined: members,
        }
    }

    /// Record that choosing this alternative also fixes `ty`.
    pub fn join(&mut self, ty: Idx) {
        if self.ty != ty && !self.joined.contains(&ty) {
            self.joined.push(ty);
        }
    }
}

/// A point to return variable states to, taken by [`Pool::snapshot_vars`].
///
/// Snapshots nest: roll back the innermost one first.
#[derive(Debug)]
#[must_use]
pub struct VarSnapshot {
    undo_len: usize,
    pending_len: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct InternKey {
    tag: Tag,
    payload: Vec<u32>,
}

/// The type pool.
pub struct Pool {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    extra: Vec<u32>,
    intern_map: FxHashMap<InternKey, Idx>,
    var_states: Vec<VarState>,
    undo_log: Vec<(u32, VarState)>,
    open_snapshots: u32,
    pending: Vec<Idx>,
}

impl Pool {
    /// Create a pool with the primitive types pre-interned at their fixed indices.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            extra: Vec::with_capacity(512),
            intern_map: FxHashMap::default(),
            var_states: Vec::new(),
            undo_log: Vec::new(),
            open_snapshots: 0,
            pending: Vec::new(),
        };
        for tag in [
            Tag::Int,
            Tag::Float,
            Tag::Complex,
            Tag::Bool,
            Tag::Str,
            Tag::Bytes,
            Tag::None,
            Tag::TupleEnd,
        ] {
            pool.intern_leaf(tag, 0);
        }
        debug_assert_eq!(pool.items.len(), Idx::PRIMITIVE_COUNT as usize);
        pool
    }

    // === Interning ===

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, item: Item, flags: TypeFlags) -> Idx {
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(item);
        self.flags.push(flags);
        idx
    }

    fn lookup_or_insert(
        &mut self,
        key: InternKey,
        make: impl FnOnce(&mut Self) -> (Item, TypeFlags),
    ) -> Idx {
        if let Some(&idx) = self.intern_map.get(&key) {
            return idx;
        }
        let (item, flags) = make(self);
        let idx = self.push(item, flags);
        self.intern_map.insert(key, idx);
        idx
    }

    /// Intern a childless type. `data` is unused for primitives and holds
    /// the name for modules.
    pub(crate) fn intern_leaf(&mut self, tag: Tag, data: u32) -> Idx {
        let key = InternKey {
            tag,
            payload: vec![data],
        };
        self.lookup_or_insert(key, |_| (Item::new(tag, data), TypeFlags::from_tag(tag)))
    }

    /// Intern a simple container around `child`.
    pub(crate) fn intern_simple(&mut self, tag: Tag, child: Idx) -> Idx {
        debug_assert!(tag.is_simple_container());
        let key = InternKey {
            tag,
            payload: vec![child.raw()],
        };
        let flags = TypeFlags::from_tag(tag) | self.flags(child).propagate();
        self.lookup_or_insert(key, |_| (Item::new(tag, child.raw()), flags))
    }

    /// Intern a node whose payload lives in the extra array.
    ///
    /// `children` are the type handles inside `payload`, used for flags.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn intern_complex(&mut self, tag: Tag, payload: &[u32], children: &[Idx]) -> Idx {
        debug_assert!(tag.uses_extra());
        let key = InternKey {
            tag,
            payload: payload.to_vec(),
        };
        let flags = children
            .iter()
            .fold(TypeFlags::from_tag(tag), |acc, &c| acc | self.flags(c).propagate());
        self.lookup_or_insert(key, |pool| {
            let extra_idx = pool.extra.len() as u32;
            pool.extra.extend_from_slice(payload);
            (Item::new(tag, extra_idx), flags)
        })
    }

    /// Allocate a new variable in the given state.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push_var(&mut self, make_state: impl FnOnce(u32) -> VarState) -> Idx {
        let var_id = self.var_states.len() as u32;
        self.var_states.push(make_state(var_id));
        self.push(Item::new(Tag::Var, var_id), TypeFlags::HAS_VAR)
    }

    // === Item Access ===

    /// Number of types in the pool.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn item(&self, idx: Idx) -> Item {
        self.items[idx.index()]
    }

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.index()].tag
    }

    #[inline]
    pub fn data(&self, idx: Idx) -> u32 {
        self.items[idx.index()].data
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Child of a list, set or tuple.
    #[inline]
    pub fn child(&self, idx: Idx) -> Idx {
        debug_assert!(self.tag(idx).is_simple_container());
        Idx::from_raw(self.data(idx))
    }

    /// Head element of a tuple cons cell.
    #[inline]
    pub fn cons_head(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.tag(idx), Tag::TupleCons);
        Idx::from_raw(self.extra[self.data(idx) as usize])
    }

    /// Rest of the chain after a tuple cons cell.
    #[inline]
    pub fn cons_tail(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.tag(idx), Tag::TupleCons);
        Idx::from_raw(self.extra[self.data(idx) as usize + 1])
    }

    /// Number of parameters of a function type.
    #[inline]
    pub fn function_param_count(&self, idx: Idx) -> usize {
        debug_assert_eq!(self.tag(idx), Tag::Function);
        self.extra[self.data(idx) as usize] as usize
    }

    /// Parameter types of a function type.
    pub fn function_params(&self, idx: Idx) -> Vec<Idx> {
        let start = self.data(idx) as usize + 1;
        let count = self.function_param_count(idx);
        self.extra[start..start + count]
            .iter()
            .map(|&raw| Idx::from_raw(raw))
            .collect()
    }

    /// Return type of a function type.
    #[inline]
    pub fn function_return(&self, idx: Idx) -> Idx {
        let start = self.data(idx) as usize;
        let count = self.function_param_count(idx);
        Idx::from_raw(self.extra[start + 1 + count])
    }

    /// Name of a module type.
    #[inline]
    pub fn module_name(&self, idx: Idx) -> Name {
        debug_assert_eq!(self.tag(idx), Tag::Module);
        Name::from_raw(self.data(idx))
    }

    /// Follow variable links without mutating (no path compression).
    pub fn resolve_links(&self, mut idx: Idx) -> Idx {
        while self.tag(idx) == Tag::Var {
            match self.var_state(self.data(idx)) {
                VarState::Link { target } => idx = *target,
                _ => break,
            }
        }
        idx
    }

    /// Decode a tuple into its element types.
    ///
    /// Accepts either the `Tuple` wrapper or a bare chain. Returns `None` if
    /// the chain ends in something other than `TupleEnd` (an unresolved
    /// variable).
    pub fn tuple_elems(&self, idx: Idx) -> Option<Vec<Idx>> {
        let mut chain = self.resolve_links(idx);
        if self.tag(chain) == Tag::Tuple {
            chain = self.resolve_links(self.child(chain));
        }
        let mut elems = Vec::new();
        loop {
            match self.tag(chain) {
                Tag::TupleEnd => return Some(elems),
                Tag::TupleCons => {
                    elems.push(self.cons_head(chain));
                    chain = self.resolve_links(self.cons_tail(chain));
                }
                _ => return None,
            }
        }
    }

    // === Variables ===

    /// Variable id of a `Var` type.
    #[inline]
    pub fn var_id(&self, idx: Idx) -> u32 {
        debug_assert_eq!(self.tag(idx), Tag::Var);
        self.data(idx)
    }

    #[inline]
    pub fn var_state(&self, var_id: u32) -> &VarState {
        &self.var_states[var_id as usize]
    }

    /// Replace the state of a variable.
    ///
    /// While a snapshot is open the previous state goes to the undo log.
    pub fn set_var_state(&mut self, var_id: u32, state: VarState) {
        let previous = std::mem::replace(&mut self.var_states[var_id as usize], state);
        if self.open_snapshots > 0 {
            self.undo_log.push((var_id, previous));
        }
    }

    /// Number of variables created so far.
    pub fn var_count(&self) -> usize {
        self.var_states.len()
    }

    /// Start recording variable changes.
    ///
    /// Only the states overwritten after this point are saved, so the cost
    /// of a snapshot is proportional to what the trial touches.
    pub fn snapshot_vars(&mut self) -> VarSnapshot {
        self.open_snapshots += 1;
        VarSnapshot {
            undo_len: self.undo_log.len(),
            pending_len: self.pending.len(),
        }
    }

    /// Undo every variable change since `snapshot` was taken.
    ///
    /// Variables created after the snapshot keep their current state; they
    /// are unreachable from anything that existed before it.
    pub fn rollback_vars(&mut self, snapshot: VarSnapshot) {
        for (var_id, state) in self.undo_log.drain(snapshot.undo_len..).rev() {
            self.var_states[var_id as usize] = state;
        }
        self.pending.truncate(snapshot.pending_len);
        self.open_snapshots = self.open_snapshots.saturating_sub(1);
    }

    // === Pending overloads ===

    /// Overloaded variables whose candidates carry recorded constraints,
    /// in the order they were recorded.
    pub(crate) fn pending_overloads(&self) -> &[Idx] {
        &self.pending
    }

    pub(crate) fn add_pending_overload(&mut self, var: Idx) {
        if !self.pending.contains(&var) {
            self.pending.push(var);
        }
    }

    pub(crate) fn set_pending_overloads(&mut self, vars: Vec<Idx>) {
        self.pending = vars;
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
