//! Inference errors.
//!
//! Every error aborts the inference of the enclosing function. Spans point
//! at the node that triggered the failure.

use tyr_ir::Span;

use crate::{Pool, UnifyError};

/// Error from inferring a function.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InferError {
    /// Two types that must agree do not unify.
    #[error("{source}")]
    Unify {
        #[source]
        source: UnifyError,
        span: Span,
    },

    /// A loaded name is neither local nor a global function.
    #[error("unbound name `{name}`")]
    UnboundName { name: String, span: Span },

    /// Attribute access other than `builtins.{len,map,print,None}`.
    #[error("unsupported attribute `{attr}`")]
    UnsupportedAttribute { attr: String, span: Span },

    /// A function or builtin generator used where a value type is required.
    #[error("callable used as a value")]
    CallableAsValue { span: Span },

    /// Call-site specialization nested deeper than the configured limit.
    #[error("inlining `{function}` exceeds the maximum depth of {depth}")]
    InlineDepthExceeded {
        function: String,
        depth: usize,
        span: Span,
    },
}

impl InferError {
    /// Wrap a unification failure at `span`.
    pub fn unify(source: UnifyError, span: Span) -> Self {
        Self::Unify { source, span }
    }

    /// Location of the failing node.
    pub fn span(&self) -> Span {
        match self {
            Self::Unify { span, .. }
            | Self::UnboundName { span, .. }
            | Self::UnsupportedAttribute { span, .. }
            | Self::CallableAsValue { span }
            | Self::InlineDepthExceeded { span, .. } => *span,
        }
    }

    /// Render the error with the types it mentions spelled out.
    pub fn render(&self, pool: &Pool) -> String {
        match self {
            Self::Unify { source, .. } => source.render(pool),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
