//! Type index handle.
//!
//! `Idx` is the canonical type representation. All types are stored in a
//! [`Pool`](crate::Pool) and referenced by their 32-bit index.
//!
//! - Primitive types have fixed indices for O(1) lookup
//! - Structural types are hash-consed, so equality of variable-free types
//!   is index equality

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types ===
    // Pre-interned at pool creation, in this order.

    /// `int`, the literal marker of integers and the result of `len`.
    pub const INT: Self = Self(0);
    /// `float`
    pub const FLOAT: Self = Self(1);
    /// `complex`
    pub const COMPLEX: Self = Self(2);
    /// `bool`
    pub const BOOL: Self = Self(3);
    /// `str`
    pub const STR: Self = Self(4);
    /// `bytes`
    pub const BYTES: Self = Self(5);
    /// The none type: the value `None`, and the return type of functions
    /// that never return a value.
    pub const NONE: Self = Self(6);
    /// Terminator of a tuple's cons chain (the empty tuple's chain).
    pub const TUPLE_END: Self = Self(7);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 8;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Human-readable name for primitive types.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("int"),
            1 => Some("float"),
            2 => Some("complex"),
            3 => Some("bool"),
            4 => Some("str"),
            5 => Some("bytes"),
            6 => Some("none"),
            7 => Some("()"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{}", name.to_uppercase()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}
