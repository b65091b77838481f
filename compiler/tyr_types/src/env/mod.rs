//! Per-activation name environment.
//!
//! One `Environment` exists for each function body being elaborated: the
//! generic visit of a definition, or one call-site specialization. It maps
//! names to [`Binding`]s and owns the `@return` slot. It is dropped when the
//! visit completes, so nothing leaks between activations.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use tyr_ir::{Name, StringInterner};

use crate::{Binding, Idx, Pool};

/// Name bindings of one function activation.
///
/// # Usage
///
/// ```ignore
/// let ret = pool.fresh_named_var(Name::RETURN);
/// let mut env = Environment::new(ret, builtins);
///
/// env.bind(x, Binding::Type(Idx::INT));
/// assert_eq!(env.lookup(x), Some(&Binding::Type(Idx::INT)));
/// ```
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: FxHashMap<Name, Binding>,
    /// Type of the values returned from this activation.
    return_slot: Idx,
    /// Set once a `return` statement has been visited.
    returned: bool,
}

impl Environment {
    /// Create an environment seeded with the `builtins` namespace.
    pub fn new(return_slot: Idx, builtins: Idx) -> Self {
        let mut bindings = FxHashMap::default();
        bindings.insert(Name::BUILTINS, Binding::Type(builtins));
        Self {
            bindings,
            return_slot,
            returned: false,
        }
    }

    /// Bind (or rebind) a name.
    pub fn bind(&mut self, name: Name, binding: Binding) {
        self.bindings.insert(name, binding);
    }

    /// Look up a local name.
    pub fn lookup(&self, name: Name) -> Option<&Binding> {
        self.bindings.get(&name)
    }

    /// Check if a name is bound locally.
    pub fn is_bound(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    #[inline]
    pub fn return_slot(&self) -> Idx {
        self.return_slot
    }

    /// Record that a `return` statement constrained the return slot.
    pub fn mark_returned(&mut self) {
        self.returned = true;
    }

    /// Whether any `return` statement was visited.
    #[inline]
    pub fn has_returned(&self) -> bool {
        self.returned
    }

    /// Number of bound names, `builtins` included.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Render the bindings one per line, sorted by name.
    pub fn dump(&self, pool: &Pool, interner: &StringInterner) -> String {
        let mut entries: Vec<(&str, &Binding)> = self
            .bindings
            .iter()
            .map(|(name, binding)| (interner.lookup(*name), binding))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (name, binding) in entries {
            let rendered = match binding {
                Binding::Type(ty) => pool.format_type_named(*ty, interner),
                Binding::Generator(generator) => format!("<generator {}>", generator.name()),
                Binding::Inliner(inliner) => format!("<function #{}>", inliner.function().index()),
            };
            let _ = writeln!(out, "{name}: {rendered}");
        }
        let _ = write!(
            out,
            "@return: {}",
            pool.format_type_named(self.return_slot, interner)
        );
        out
    }
}
