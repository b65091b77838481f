//! AST node kinds understood by the inference engine.
//!
//! The node set is closed: function definitions, `return`, assignment,
//! expression statements, names, constants, list/set/tuple displays,
//! attribute access and calls.

use rustc_hash::FxHashMap;

use crate::{ExprArena, ExprRange, Name, Span};

/// Index of an expression in an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a name or display is read or written.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExprContext {
    #[default]
    Load,
    Store,
}

/// A literal value.
///
/// Floats are stored as bits so the node stays `Eq + Hash`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Constant {
    Int(i64),
    Float(u64),
    Complex { re: u64, im: u64 },
    Bool(bool),
    Str(Name),
    Bytes(Name),
    None,
}

impl Constant {
    /// Build a float constant from its value.
    pub fn float(value: f64) -> Self {
        Constant::Float(value.to_bits())
    }
}

/// Expression kinds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprKind {
    /// A literal.
    Constant(Constant),
    /// A bare identifier.
    Name { id: Name, ctx: ExprContext },
    /// `[a, b, ...]`
    List { elts: ExprRange, ctx: ExprContext },
    /// `{a, b, ...}`
    Set { elts: ExprRange },
    /// `(a, b, ...)`
    Tuple { elts: ExprRange, ctx: ExprContext },
    /// `value.attr`
    Attribute { value: ExprId, attr: Name },
    /// `func(args...)`
    Call { func: ExprId, args: ExprRange },
}

/// An expression node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Statement kinds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StmtKind {
    /// `return` or `return value`
    Return(Option<ExprId>),
    /// `t1 = t2 = ... = value`
    Assign { targets: ExprRange, value: ExprId },
    /// An expression evaluated for its effect, e.g. `print(x)`.
    Expr(ExprId),
}

/// A statement node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Index of a function in a [`Module`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct FunctionId(u32);

impl FunctionId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FunctionId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A top-level function definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A parsed module: the expression arena plus its function definitions.
#[derive(Clone, Debug, Default)]
pub struct Module {
    arena: ExprArena,
    functions: Vec<FunctionDef>,
}

impl Module {
    /// Assemble a module from an arena and its functions.
    pub fn new(arena: ExprArena, functions: Vec<FunctionDef>) -> Self {
        Module { arena, functions }
    }

    /// The expression arena.
    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Get a function by id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this module.
    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDef {
        &self.functions[id.index()]
    }

    /// All functions in declaration order.
    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    /// Iterate over `(id, definition)` pairs in declaration order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter_functions(&self) -> impl Iterator<Item = (FunctionId, &FunctionDef)> + '_ {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, def)| (FunctionId::from_raw(i as u32), def))
    }
}

/// Global function declarations, keyed by name.
///
/// Consulted only when a loaded name misses the local environment.
#[derive(Clone, Debug, Default)]
pub struct GlobalDecls {
    functions: FxHashMap<Name, FunctionId>,
}

impl GlobalDecls {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every function of `module`. Later definitions shadow earlier
    /// ones with the same name.
    pub fn from_module(module: &Module) -> Self {
        let mut decls = Self::new();
        for (id, def) in module.iter_functions() {
            decls.insert(def.name, id);
        }
        decls
    }

    /// Declare a function.
    pub fn insert(&mut self, name: Name, function: FunctionId) {
        self.functions.insert(name, function);
    }

    /// Look up a function by name.
    pub fn get(&self, name: Name) -> Option<FunctionId> {
        self.functions.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
