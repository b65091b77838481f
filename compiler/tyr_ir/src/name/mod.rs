//! Interned string identifier.

use std::fmt;

/// Interned string identifier.
///
/// A plain index into the [`StringInterner`](crate::StringInterner) table.
/// The first few indices are reserved for the names the inference engine
/// needs to recognise without consulting the interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    /// The builtin namespace, `builtins`.
    pub const BUILTINS: Name = Name(1);
    /// `len`
    pub const LEN: Name = Name(2);
    /// `map`
    pub const MAP: Name = Name(3);
    /// `print`
    pub const PRINT: Name = Name(4);
    /// `None`
    pub const NONE: Name = Name(5);
    /// Reserved name of a function's return slot. Not a valid identifier,
    /// so it can never collide with a user binding.
    pub const RETURN: Name = Name(6);

    /// Strings behind the reserved indices, in index order.
    pub(crate) const WELL_KNOWN: [&'static str; 7] =
        ["", "builtins", "len", "map", "print", "None", "@return"];

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is one of the pre-interned names.
    #[inline]
    pub const fn is_well_known(self) -> bool {
        (self.0 as usize) < Self::WELL_KNOWN.len()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::WELL_KNOWN.get(self.index()) {
            Some(s) if !s.is_empty() => write!(f, "Name({s})"),
            _ => write!(f, "Name({})", self.0),
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
