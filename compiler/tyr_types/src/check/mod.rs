//! Module-level driver.
//!
//! Infers the generic signature of every function in a module, in
//! declaration order, sharing one [`Pool`]. A failing function records its
//! error and the driver moves on to the next one.

use std::fmt::Write as _;

use tyr_ir::{FunctionId, GlobalDecls, Module, Name, StringInterner};

use crate::{Idx, InferEngine, InferError, InferOptions, Pool};

/// The outcome of inferring one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    pub function: FunctionId,
    pub name: Name,
    /// The fully resolved function type, or why inference failed.
    pub result: Result<Idx, InferError>,
}

/// Inferred signatures of a module, with the pool they live in.
pub struct ModuleTypes {
    pool: Pool,
    signatures: Vec<FunctionSignature>,
}

impl ModuleTypes {
    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Signatures in declaration order.
    pub fn signatures(&self) -> &[FunctionSignature] {
        &self.signatures
    }

    /// The last function declared with `name`.
    pub fn signature(&self, name: Name) -> Option<&FunctionSignature> {
        self.signatures.iter().rev().find(|sig| sig.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.signatures.iter().any(|sig| sig.result.is_err())
    }

    /// Failed functions with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (&FunctionSignature, &InferError)> + '_ {
        self.signatures
            .iter()
            .filter_map(|sig| sig.result.as_ref().err().map(|err| (sig, err)))
    }

    /// One line per function: `name: type` or `name: error: message`.
    pub fn dump(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for (i, sig) in self.signatures.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let name = interner.lookup(sig.name);
            let _ = match &sig.result {
                Ok(ty) => write!(out, "{name}: {}", self.pool.format_type_named(*ty, interner)),
                Err(err) => write!(out, "{name}: error: {}", err.render(&self.pool)),
            };
        }
        out
    }
}

/// Infer every function of `module`.
#[tracing::instrument(level = "debug", skip_all, fields(count = module.functions().len()))]
pub fn infer_module(
    module: &Module,
    interner: &StringInterner,
    options: InferOptions,
) -> ModuleTypes {
    let globals = GlobalDecls::from_module(module);
    let mut pool = Pool::new();
    let mut signatures = Vec::with_capacity(module.functions().len());

    {
        let mut engine = InferEngine::with_options(&mut pool, module, &globals, interner, options);
        for (function, def) in module.iter_functions() {
            let name = interner.lookup(def.name);
            let result = engine
                .infer_function(function)
                .map(|ty| engine.resolve_deep(ty));

            match &result {
                Ok(ty) => tracing::debug!(
                    function = name,
                    ty = %engine.pool().format_type_named(*ty, interner),
                    "inferred"
                ),
                Err(err) => tracing::debug!(
                    function = name,
                    error = %err.render(engine.pool()),
                    "inference failed"
                ),
            }

            signatures.push(FunctionSignature {
                function,
                name: def.name,
                result,
            });
        }
    }

    tracing::debug!("module inference complete");
    ModuleTypes { pool, signatures }
}
