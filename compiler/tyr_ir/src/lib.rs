//! Tyr IR - the host AST consumed by the type inference engine.
//!
//! This crate holds the data the engine reads but never produces:
//! - Names for interned identifiers
//! - Spans for node locations
//! - An expression arena plus statements and function definitions
//! - The global declaration table consulted for calls to sibling functions
//!
//! Parsing is not part of this workspace. Fragments are either supplied by an
//! embedding front end or assembled with [`ModuleBuilder`].
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`
//! - **Flatten Expressions**: no `Box<Expr>`, expressions live in an
//!   [`ExprArena`] and are referenced by [`ExprId`]

mod arena;
pub mod ast;
mod builder;
mod interner;
mod name;
mod span;

pub use arena::{ExprArena, ExprRange};
pub use ast::{
    Constant, Expr, ExprContext, ExprId, ExprKind, FunctionDef, FunctionId, GlobalDecls, Module,
    Stmt, StmtKind,
};
pub use builder::ModuleBuilder;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
