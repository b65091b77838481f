//! Programmatic construction of AST fragments.
//!
//! The engine does not parse source text. Embedders with their own front end
//! lower into [`Module`] directly; everyone else (tests, tooling) uses
//! `ModuleBuilder`, which interns identifiers and hands out distinct spans so
//! errors can be traced back to the node that produced them.

use crate::{
    Constant, Expr, ExprArena, ExprContext, ExprId, ExprKind, FunctionDef, FunctionId, Module,
    Name, Span, Stmt, StmtKind, StringInterner,
};

/// Builder for a [`Module`].
///
/// ```ignore
/// let interner = StringInterner::new();
/// let mut b = ModuleBuilder::new(&interner);
/// let x = b.name("x");
/// let body = vec![b.ret(x)];
/// let f = b.function("f", &["x"], body);
/// let module = b.finish();
/// ```
pub struct ModuleBuilder<'i> {
    interner: &'i StringInterner,
    arena: ExprArena,
    functions: Vec<FunctionDef>,
    next_offset: u32,
}

impl<'i> ModuleBuilder<'i> {
    pub fn new(interner: &'i StringInterner) -> Self {
        Self {
            interner,
            arena: ExprArena::new(),
            functions: Vec::new(),
            next_offset: 0,
        }
    }

    /// The interner names are registered in.
    pub fn interner(&self) -> &'i StringInterner {
        self.interner
    }

    /// Intern an identifier.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn next_span(&mut self) -> Span {
        let start = self.next_offset;
        self.next_offset += 1;
        Span::new(start, start + 1)
    }

    fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.next_span();
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn stmt(&mut self, kind: StmtKind) -> Stmt {
        let span = self.next_span();
        Stmt::new(kind, span)
    }

    // === Names ===

    /// A name in load position.
    pub fn name(&mut self, id: &str) -> ExprId {
        let id = self.intern(id);
        self.expr(ExprKind::Name {
            id,
            ctx: ExprContext::Load,
        })
    }

    /// A name in store position (assignment target).
    pub fn store(&mut self, id: &str) -> ExprId {
        let id = self.intern(id);
        self.expr(ExprKind::Name {
            id,
            ctx: ExprContext::Store,
        })
    }

    // === Constants ===

    pub fn constant(&mut self, value: Constant) -> ExprId {
        self.expr(ExprKind::Constant(value))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.constant(Constant::Int(value))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.constant(Constant::float(value))
    }

    pub fn complex(&mut self, re: f64, im: f64) -> ExprId {
        self.constant(Constant::Complex {
            re: re.to_bits(),
            im: im.to_bits(),
        })
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.constant(Constant::Bool(value))
    }

    pub fn str(&mut self, value: &str) -> ExprId {
        let value = self.intern(value);
        self.constant(Constant::Str(value))
    }

    pub fn bytes(&mut self, value: &str) -> ExprId {
        let value = self.intern(value);
        self.constant(Constant::Bytes(value))
    }

    pub fn none(&mut self) -> ExprId {
        self.constant(Constant::None)
    }

    // === Displays ===

    pub fn list(&mut self, elts: &[ExprId]) -> ExprId {
        let elts = self.arena.alloc_expr_list(elts.iter().copied());
        self.expr(ExprKind::List {
            elts,
            ctx: ExprContext::Load,
        })
    }

    /// A list display used as an assignment target.
    pub fn list_target(&mut self, elts: &[ExprId]) -> ExprId {
        let elts = self.arena.alloc_expr_list(elts.iter().copied());
        self.expr(ExprKind::List {
            elts,
            ctx: ExprContext::Store,
        })
    }

    pub fn set(&mut self, elts: &[ExprId]) -> ExprId {
        let elts = self.arena.alloc_expr_list(elts.iter().copied());
        self.expr(ExprKind::Set { elts })
    }

    pub fn tuple(&mut self, elts: &[ExprId]) -> ExprId {
        let elts = self.arena.alloc_expr_list(elts.iter().copied());
        self.expr(ExprKind::Tuple {
            elts,
            ctx: ExprContext::Load,
        })
    }

    /// A tuple display used as an assignment target.
    pub fn tuple_target(&mut self, elts: &[ExprId]) -> ExprId {
        let elts = self.arena.alloc_expr_list(elts.iter().copied());
        self.expr(ExprKind::Tuple {
            elts,
            ctx: ExprContext::Store,
        })
    }

    // === Attributes and calls ===

    pub fn attr(&mut self, value: ExprId, attr: &str) -> ExprId {
        let attr = self.intern(attr);
        self.expr(ExprKind::Attribute { value, attr })
    }

    /// `builtins.<attr>`
    pub fn builtin(&mut self, attr: &str) -> ExprId {
        let module = self.name("builtins");
        self.attr(module, attr)
    }

    pub fn call(&mut self, func: ExprId, args: &[ExprId]) -> ExprId {
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Call { func, args })
    }

    /// `builtins.<attr>(args...)`
    pub fn call_builtin(&mut self, attr: &str, args: &[ExprId]) -> ExprId {
        let func = self.builtin(attr);
        self.call(func, args)
    }

    /// `<name>(args...)`
    pub fn call_named(&mut self, name: &str, args: &[ExprId]) -> ExprId {
        let func = self.name(name);
        self.call(func, args)
    }

    // === Statements ===

    /// `return value`
    pub fn ret(&mut self, value: ExprId) -> Stmt {
        self.stmt(StmtKind::Return(Some(value)))
    }

    /// Bare `return`.
    pub fn ret_none(&mut self) -> Stmt {
        self.stmt(StmtKind::Return(None))
    }

    /// `targets[0] = targets[1] = ... = value`
    pub fn assign(&mut self, targets: &[ExprId], value: ExprId) -> Stmt {
        let targets = self.arena.alloc_expr_list(targets.iter().copied());
        self.stmt(StmtKind::Assign { targets, value })
    }

    /// An expression statement.
    pub fn expr_stmt(&mut self, value: ExprId) -> Stmt {
        self.stmt(StmtKind::Expr(value))
    }

    // === Functions ===

    /// Define a top-level function.
    #[allow(clippy::cast_possible_truncation)]
    pub fn function(&mut self, name: &str, params: &[&str], body: Vec<Stmt>) -> FunctionId {
        let name = self.intern(name);
        let params = params.iter().map(|p| self.intern(p)).collect();
        let span = self.next_span();
        let id = FunctionId::from_raw(self.functions.len() as u32);
        self.functions.push(FunctionDef {
            name,
            params,
            body,
            span,
        });
        id
    }

    /// Finish building.
    pub fn finish(self) -> Module {
        Module::new(self.arena, self.functions)
    }
}
