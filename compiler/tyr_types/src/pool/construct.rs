//! Type construction helpers for the Pool.

use tyr_ir::Name;

use crate::{Candidate, Idx, Pool, Tag, VarState};

impl Pool {
    // === Containers ===

    /// Create a list type `[elem]`.
    pub fn list(&mut self, elem: Idx) -> Idx {
        self.intern_simple(Tag::List, elem)
    }

    /// Create a set type `{elem}`.
    pub fn set(&mut self, elem: Idx) -> Idx {
        self.intern_simple(Tag::Set, elem)
    }

    // === Tuples ===

    /// Create a tuple type from its elements.
    ///
    /// Tuples are encoded as a right-nested cons chain terminated by
    /// `TupleEnd`, wrapped in a `Tuple` node:
    ///
    /// ```text
    /// (int, str)  =>  Tuple(Cons(int, Cons(str, End)))
    /// ()          =>  Tuple(End)
    /// ```
    ///
    /// so unification handles every arity with the same two rules.
    pub fn tuple(&mut self, elems: &[Idx]) -> Idx {
        let chain = elems
            .iter()
            .rev()
            .fold(Idx::TUPLE_END, |tail, &head| self.cons(head, tail));
        self.tuple_of_chain(chain)
    }

    /// Wrap an existing cons chain (or a variable standing for one).
    pub fn tuple_of_chain(&mut self, chain: Idx) -> Idx {
        self.intern_simple(Tag::Tuple, chain)
    }

    /// One cons cell of a tuple chain.
    pub fn cons(&mut self, head: Idx, tail: Idx) -> Idx {
        self.intern_complex(Tag::TupleCons, &[head.raw(), tail.raw()], &[head, tail])
    }

    // === Functions ===

    /// Create a function type `(params...) -> ret`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn function(&mut self, params: &[Idx], ret: Idx) -> Idx {
        // Layout: [param_count, param0, param1, ..., return_type]
        let mut extra = Vec::with_capacity(params.len() + 2);
        extra.push(params.len() as u32);
        extra.extend(params.iter().map(|p| p.raw()));
        extra.push(ret.raw());

        let mut children = params.to_vec();
        children.push(ret);
        self.intern_complex(Tag::Function, &extra, &children)
    }

    /// Create a unary function type `(param) -> ret`.
    pub fn function1(&mut self, param: Idx, ret: Idx) -> Idx {
        self.function(&[param], ret)
    }

    // === Named ===

    /// A module namespace value.
    pub fn module(&mut self, name: Name) -> Idx {
        self.intern_leaf(Tag::Module, name.raw())
    }

    // === Variables ===

    /// Create a fresh unbound variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.push_var(|id| VarState::Unbound { id, name: None })
    }

    /// Create a fresh unbound variable carrying a source name.
    pub fn fresh_named_var(&mut self, name: Name) -> Idx {
        self.push_var(|id| VarState::Unbound {
            id,
            name: Some(name),
        })
    }

    /// Create a variable whose type is one of `candidates`.
    ///
    /// A single candidate is returned as-is (it is already resolved), and an
    /// empty list yields an unbound variable, so an `Overloaded` state always
    /// holds at least two candidates.
    pub fn fresh_overloaded_var(&mut self, candidates: Vec<Idx>) -> Idx {
        match candidates.len() {
            0 => self.fresh_var(),
            1 => candidates[0],
            _ => {
                let candidates = candidates.into_iter().map(Candidate::new).collect();
                self.push_var(|id| VarState::Overloaded { id, candidates })
            }
        }
    }
}
