//! Expression arena.
//!
//! Expressions are stored in one flat vector and referenced by [`ExprId`].
//! Child lists (call arguments, container elements, assignment targets) are
//! stored contiguously in a second vector and referenced by [`ExprRange`].

use crate::ast::{Expr, ExprId};

/// A contiguous run of expression ids inside the arena's list storage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ExprRange {
    start: u32,
    len: u32,
}

impl ExprRange {
    /// The empty range.
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    /// Number of expressions in the range.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Flat storage for expressions.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::from_raw(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Allocate a list of expression ids, returning its range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(ids);
        let len = self.expr_lists.len() as u32 - start;
        ExprRange { start, len }
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get the ids in a range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Number of expressions allocated.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Check if no expressions were allocated.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
