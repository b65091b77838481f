//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once at interning time and cached, so the
//! unifier can skip occurs-check and substitution traversals of types that
//! contain no variables.

use bitflags::bitflags;

use crate::Tag;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence Flags ===

        /// Contains type variables (in any state).
        const HAS_VAR = 1 << 0;

        // === Category Flags ===

        /// Primitive or literal marker.
        const IS_PRIMITIVE = 1 << 8;
        /// List or set.
        const IS_CONTAINER = 1 << 9;
        /// Function type.
        const IS_FUNCTION = 1 << 10;
        /// Tuple or tuple chain node.
        const IS_COMPOSITE = 1 << 11;
        /// Module namespace.
        const IS_NAMED = 1 << 12;
    }
}

impl TypeFlags {
    /// Flags a parent inherits from its children.
    pub const PROPAGATE_MASK: Self = Self::HAS_VAR;

    /// Category flags implied by a tag.
    pub fn from_tag(tag: Tag) -> Self {
        match tag {
            Tag::Int
            | Tag::Float
            | Tag::Complex
            | Tag::Bool
            | Tag::Str
            | Tag::Bytes
            | Tag::None => Self::IS_PRIMITIVE,
            Tag::TupleEnd | Tag::Tuple | Tag::TupleCons => Self::IS_COMPOSITE,
            Tag::List | Tag::Set => Self::IS_CONTAINER,
            Tag::Function => Self::IS_FUNCTION,
            Tag::Module => Self::IS_NAMED,
            Tag::Var => Self::HAS_VAR,
        }
    }

    /// The part of `self` a containing type inherits.
    #[inline]
    #[must_use]
    pub fn propagate(self) -> Self {
        self & Self::PROPAGATE_MASK
    }
}

#[cfg(test)]
mod tests;
