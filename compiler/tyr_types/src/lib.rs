//! Tyr type inference.
//!
//! Infers a function type for each function definition of a [`Module`]
//! from the constraints its body implies, by structural unification:
//! - Types live in a hash-consing [`Pool`] and are referenced by [`Idx`]
//! - Type variables form a disjoint-set forest with path compression
//! - Overloaded builtins (`len`) are disjunctive variables narrowed by
//!   unification
//! - Calls to user functions re-elaborate the callee with the caller's
//!   argument types instead of generalizing
//!
//! # Usage
//!
//! ```ignore
//! let types = infer_module(&module, &interner, InferOptions::default());
//! println!("{}", types.dump(&interner));
//! ```
//!
//! [`Module`]: tyr_ir::Module

mod builtins;
mod check;
mod env;
mod error;
mod flags;
mod idx;
mod infer;
mod options;
mod pool;
mod scheme;
mod stack;
mod tag;
mod unify;

pub use builtins::{len_scheme, lookup as lookup_builtin, Generator};
pub use check::{infer_module, FunctionSignature, ModuleTypes};
pub use env::Environment;
pub use error::InferError;
pub use flags::TypeFlags;
pub use idx::Idx;
pub use infer::InferEngine;
pub use options::InferOptions;
pub use pool::{Candidate, Item, Pool, VarSnapshot, VarState};
pub use scheme::{Binding, Inliner, Specialize};
pub use tag::Tag;
pub use unify::{ArityKind, UnifyContext, UnifyEngine, UnifyError};

// Size assertions to prevent accidental regressions.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, Item, Tag};

    const _: () = assert!(std::mem::size_of::<Idx>() == 4);
    const _: () = assert!(std::mem::size_of::<Tag>() == 1);
    const _: () = assert!(std::mem::size_of::<Item>() == 8);
}
