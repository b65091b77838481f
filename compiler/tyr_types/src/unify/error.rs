//! Unification error types.

use crate::{Idx, Pool};

/// Error from type unification.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum UnifyError {
    /// Type operators with different tags.
    #[error("type mismatch in {}", .context.description())]
    Mismatch {
        /// The left-hand type.
        expected: Idx,
        /// The right-hand type.
        found: Idx,
        /// Where the mismatch occurred.
        context: UnifyContext,
    },

    /// Operators with the same tag but a different number of arguments.
    #[error("arity mismatch: expected {expected} {}, found {found}", .kind.description())]
    ArityMismatch {
        expected: usize,
        found: usize,
        kind: ArityKind,
    },

    /// Binding the variable would create an infinite type, e.g. `a = [a]`.
    #[error("infinite type: variable ${var_id} occurs in its own definition")]
    InfiniteType {
        var_id: u32,
        containing_type: Idx,
    },

    /// Every candidate of an overloaded variable was rejected.
    #[error("no overload among {candidates} candidates accepts the given type")]
    NoMatchingOverload {
        /// How many candidates (or candidate pairs) were tried.
        candidates: usize,
        /// The type they were tried against.
        found: Idx,
    },
}

impl UnifyError {
    /// Render the error with the offending types spelled out.
    pub fn render(&self, pool: &Pool) -> String {
        match self {
            Self::Mismatch {
                expected,
                found,
                context,
            } => format!(
                "type mismatch in {}: `{}` vs `{}`",
                context.description(),
                pool.format_type(*expected),
                pool.format_type(*found)
            ),
            Self::InfiniteType {
                var_id,
                containing_type,
            } => format!(
                "infinite type: ${var_id} occurs in `{}`",
                pool.format_type(*containing_type)
            ),
            Self::NoMatchingOverload { candidates, found } => format!(
                "no overload among {candidates} candidates accepts `{}`",
                pool.format_type(*found)
            ),
            Self::ArityMismatch { .. } => self.to_string(),
        }
    }
}

/// What kind of construct has an arity mismatch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArityKind {
    /// Function parameter count.
    Function,
    /// Tuple element count.
    Tuple,
}

impl ArityKind {
    pub fn description(self) -> &'static str {
        match self {
            Self::Function => "function parameters",
            Self::Tuple => "tuple elements",
        }
    }
}

/// Where inside a structure unification failed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum UnifyContext {
    /// Top-level unification (no specific context).
    #[default]
    TopLevel,

    /// In a function parameter.
    FunctionParam { index: usize },

    /// In a function return type.
    FunctionReturn,

    /// In a list element type.
    ListElement,

    /// In a set element type.
    SetElement,

    /// In a tuple element.
    TupleElement { index: usize },
}

impl UnifyContext {
    /// Create a context for a function parameter.
    pub fn param(index: usize) -> Self {
        Self::FunctionParam { index }
    }

    /// Create a context for a tuple element.
    pub fn tuple_elem(index: usize) -> Self {
        Self::TupleElement { index }
    }

    /// Get a human-readable description of this context.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "types",
            Self::FunctionParam { .. } => "function parameter",
            Self::FunctionReturn => "function return type",
            Self::ListElement => "list element type",
            Self::SetElement => "set element type",
            Self::TupleElement { .. } => "tuple element",
        }
    }
}

#[cfg(test)]
mod tests;
