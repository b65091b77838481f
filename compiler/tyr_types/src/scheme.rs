//! What a name can stand for, and how callables become function types.
//!
//! A name is bound either to a type or to a *callable handle* that produces
//! a fresh function type for each call site: a builtin [`Generator`] sized
//! to the call's arity, or an [`Inliner`] that re-elaborates a user
//! function with the call's argument types.

use tyr_ir::{FunctionId, Span};

use crate::{Generator, Idx, InferEngine, InferError};

/// The meaning of a name in an [`Environment`](crate::Environment).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Binding {
    /// A value of this type.
    Type(Idx),
    /// A builtin whose scheme depends on the call arity.
    Generator(Generator),
    /// A user function, specialized by re-elaboration.
    Inliner(Inliner),
}

impl Binding {
    /// The bound type, if this is not a callable handle.
    pub fn as_type(&self) -> Option<Idx> {
        match self {
            Self::Type(ty) => Some(*ty),
            Self::Generator(_) | Self::Inliner(_) => None,
        }
    }
}

/// Produce the function type a callable takes at one call site.
pub trait Specialize {
    /// Instantiate for a call with argument types `args`.
    ///
    /// The result is unified with `(args) -> ret` by the caller, so an
    /// implementation may return anything that should constrain the call.
    fn specialize(
        &self,
        engine: &mut InferEngine<'_>,
        args: &[Idx],
        span: Span,
    ) -> Result<Idx, InferError>;
}

impl Specialize for Binding {
    fn specialize(
        &self,
        engine: &mut InferEngine<'_>,
        args: &[Idx],
        span: Span,
    ) -> Result<Idx, InferError> {
        match self {
            Self::Type(ty) => Ok(*ty),
            Self::Generator(generator) => generator.specialize(engine, args, span),
            Self::Inliner(inliner) => inliner.specialize(engine, args, span),
        }
    }
}

/// Handle to a user function in the module under inference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Inliner {
    function: FunctionId,
}

impl Inliner {
    pub fn new(function: FunctionId) -> Self {
        Self { function }
    }

    #[inline]
    pub fn function(&self) -> FunctionId {
        self.function
    }
}

impl Specialize for Inliner {
    fn specialize(
        &self,
        engine: &mut InferEngine<'_>,
        args: &[Idx],
        span: Span,
    ) -> Result<Idx, InferError> {
        engine.specialize_at(self.function, args, span)
    }
}
