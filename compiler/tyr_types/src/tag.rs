//! Type kind tag for tag-driven dispatch.
//!
//! Each type in the pool has a `Tag` that identifies its kind.
//! The tag determines how to interpret the associated `data` field:
//! - 0-15: Primitives and literal markers (data unused)
//! - 16-31: Simple containers (data = child Idx)
//! - 32-47: Two-child nodes (data = extra index)
//! - 48-79: Variable-length nodes (data = extra index with length)
//! - 80-95: Named leaves (data = interned name)
//! - 96-111: Type variables (data = var id)

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Primitives (0-15) ===
    Int = 0,
    Float = 1,
    Complex = 2,
    Bool = 3,
    Str = 4,
    Bytes = 5,
    /// The none type.
    None = 6,
    /// End of a tuple cons chain.
    TupleEnd = 7,

    // === Simple Containers (16-31) ===
    /// `[T]`
    List = 16,
    /// `{T}`
    Set = 17,
    /// Tuple wrapper around a cons chain.
    Tuple = 18,

    // === Two-Child Nodes (32-47) ===
    /// One link of a tuple: head element and the rest of the chain.
    TupleCons = 32,

    // === Variable-Length Nodes (48-79) ===
    /// `(params...) -> ret`
    Function = 48,

    // === Named Leaves (80-95) ===
    /// A namespace value such as `builtins`.
    Module = 80,

    // === Type Variables (96-111) ===
    /// Unification variable (unbound, linked, or overloaded).
    Var = 96,
}

impl Tag {
    /// Primitives carry no children and unify by tag alone.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 16
    }

    /// Simple containers store their child directly in `data`.
    #[inline]
    pub const fn is_simple_container(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 32
    }

    /// Tags whose `data` points into the pool's extra array.
    #[inline]
    pub const fn uses_extra(self) -> bool {
        let v = self as u8;
        v >= 32 && v < 80
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Complex => "complex",
            Tag::Bool => "bool",
            Tag::Str => "str",
            Tag::Bytes => "bytes",
            Tag::None => "none",
            Tag::TupleEnd => "tuple-end",
            Tag::List => "list",
            Tag::Set => "set",
            Tag::Tuple => "tuple",
            Tag::TupleCons => "tuple-cons",
            Tag::Function => "function",
            Tag::Module => "module",
            Tag::Var => "var",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
