//! The builtin namespace: `builtins.len`, `builtins.map`, `builtins.print`
//! and `builtins.None`.
//!
//! Every lookup builds fresh variables, so two uses of the same builtin
//! never constrain each other.

use tyr_ir::{Name, Span};

use crate::{Binding, Idx, InferEngine, InferError, Pool, Specialize};

/// A builtin scheme family indexed by call arity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Generator {
    /// `map(f, xs1, ..., xsk)`
    Map,
    /// `print(x1, ..., xn)`
    Print,
}

impl Generator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Print => "print",
        }
    }

    /// The function type for a call with `arity` arguments.
    ///
    /// - `print(n)`: `(a1, ..., an) -> none`
    /// - `map(n)`: `((a1, ..., ak) -> r, [a1], ..., [ak]) -> [r]` with
    ///   `k = n - 1`. `map(0)` still takes the mapped function, so it
    ///   fails to unify with an empty call.
    pub fn instantiate(self, pool: &mut Pool, arity: usize) -> Idx {
        match self {
            Self::Print => {
                let params: Vec<Idx> = (0..arity).map(|_| pool.fresh_var()).collect();
                pool.function(&params, Idx::NONE)
            }
            Self::Map => {
                let k = arity.saturating_sub(1);
                let elems: Vec<Idx> = (0..k).map(|_| pool.fresh_var()).collect();
                let result = pool.fresh_var();

                let mapper = pool.function(&elems, result);
                let mut params = Vec::with_capacity(k + 1);
                params.push(mapper);
                params.extend(elems.iter().map(|&elem| pool.list(elem)));

                let ret = pool.list(result);
                pool.function(&params, ret)
            }
        }
    }
}

impl Specialize for Generator {
    fn specialize(
        &self,
        engine: &mut InferEngine<'_>,
        args: &[Idx],
        _span: Span,
    ) -> Result<Idx, InferError> {
        Ok(self.instantiate(engine.pool_mut(), args.len()))
    }
}

/// `len`: one of `([a]) -> int`, `({b}) -> int` or `(tuple) -> int`.
pub fn len_scheme(pool: &mut Pool) -> Idx {
    let a = pool.fresh_var();
    let b = pool.fresh_var();
    let c = pool.fresh_var();

    let list = pool.list(a);
    let set = pool.set(b);
    let tuple = pool.tuple_of_chain(c);

    let candidates = vec![
        pool.function1(list, Idx::INT),
        pool.function1(set, Idx::INT),
        pool.function1(tuple, Idx::INT),
    ];
    pool.fresh_overloaded_var(candidates)
}

/// Resolve `builtins.<attr>`.
pub fn lookup(attr: Name, pool: &mut Pool) -> Option<Binding> {
    match attr {
        Name::LEN => Some(Binding::Type(len_scheme(pool))),
        Name::MAP => Some(Binding::Generator(Generator::Map)),
        Name::PRINT => Some(Binding::Generator(Generator::Print)),
        Name::NONE => Some(Binding::Type(Idx::NONE)),
        _ => None,
    }
}
