//! End-to-end inference over small modules.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::{canonical_vars, generic_signature, init_tracing};
use pretty_assertions::assert_eq;
use tyr_ir::{FunctionId, GlobalDecls, ModuleBuilder, StringInterner};
use tyr_types::{
    infer_module, ArityKind, Idx, InferEngine, InferError, InferOptions, Pool, Tag, UnifyError,
};

#[test]
fn identity_specialized_with_int() {
    init_tracing();
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let x = b.name("x");
    let ret = b.ret(x);
    let f = b.function("f", &["x"], vec![ret]);
    let module = b.finish();

    let globals = GlobalDecls::from_module(&module);
    let mut pool = Pool::new();
    let mut engine = InferEngine::new(&mut pool, &module, &globals, &interner);
    let ty = engine.specialize_function(f, &[Idx::INT]).unwrap();
    let ty = engine.resolve_deep(ty);

    assert_eq!(engine.pool().format_type(ty), "(int) -> int");
}

#[test]
fn len_over_list_argument() {
    init_tracing();
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let x = b.name("x");
    let call = b.call_builtin("len", &[x]);
    let ret = b.ret(call);
    let f = b.function("f", &["x"], vec![ret]);
    let module = b.finish();

    let globals = GlobalDecls::from_module(&module);
    let mut pool = Pool::new();
    let mut engine = InferEngine::new(&mut pool, &module, &globals, &interner);
    let elem = engine.pool_mut().fresh_var();
    let list = engine.pool_mut().list(elem);
    let ty = engine.specialize_function(f, &[list]).unwrap();
    let ty = engine.resolve_deep(ty);

    let pool = engine.pool();
    let param = pool.function_params(ty)[0];
    assert_eq!(pool.tag(param), Tag::List);
    assert_eq!(pool.function_return(ty), Idx::INT);
    assert_eq!(canonical_vars(&pool.format_type(ty)), "([$v0]) -> int");
}

#[test]
fn len_over_set_and_tuple_arguments() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let s = b.str("a");
    let set = b.set(&[s]);
    let on_set = b.call_builtin("len", &[set]);
    let i = b.int(1);
    let f = b.float(2.0);
    let tuple = b.tuple(&[i, f]);
    let on_tuple = b.call_builtin("len", &[tuple]);
    let both = b.tuple(&[on_set, on_tuple]);
    let ret = b.ret(both);
    let g = b.function("g", &[], vec![ret]);
    let module = b.finish();

    assert_eq!(
        generic_signature(&module, &interner, g, InferOptions::default()).as_deref(),
        Ok("() -> (int, int)")
    );
}

#[test]
fn len_rejects_non_containers() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let i = b.int(3);
    let call = b.call_builtin("len", &[i]);
    let ret = b.ret(call);
    let f = b.function("f", &[], vec![ret]);
    let module = b.finish();

    assert!(matches!(
        generic_signature(&module, &interner, f, InferOptions::default()),
        Err(InferError::Unify {
            source: UnifyError::NoMatchingOverload { candidates: 3, .. },
            ..
        })
    ));
}

#[test]
fn undefined_name_is_reported() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let y = b.name("undefined");
    let ret = b.ret(y);
    let f = b.function("f", &[], vec![ret]);
    let module = b.finish();

    let err = generic_signature(&module, &interner, f, InferOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "unbound name `undefined`");
}

#[test]
fn two_parameter_function_called_with_one_argument() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let a = b.name("a");
    let ret = b.ret(a);
    b.function("pair", &["a", "b"], vec![ret]);
    let i = b.int(1);
    let call = b.call_named("pair", &[i]);
    let ret = b.ret(call);
    let f = b.function("f", &[], vec![ret]);
    let module = b.finish();

    let err = generic_signature(&module, &interner, f, InferOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        InferError::Unify {
            source: UnifyError::ArityMismatch {
                kind: ArityKind::Function,
                ..
            },
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "arity mismatch: expected 2 function parameters, found 1"
    );
}

#[test]
fn higher_order_user_function() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);

    // def apply(fn, v): return fn(v)
    let v = b.name("v");
    let call = b.call_named("fn", &[v]);
    let ret = b.ret(call);
    b.function("apply", &["fn", "v"], vec![ret]);

    // def to_set(v): return {v}
    let v = b.name("v");
    let set = b.set(&[v]);
    let ret = b.ret(set);
    b.function("to_set", &["v"], vec![ret]);

    // def main(): return apply(to_set, b"x")
    let to_set = b.name("to_set");
    let bytes = b.bytes("x");
    let call = b.call_named("apply", &[to_set, bytes]);
    let ret = b.ret(call);
    let main = b.function("main", &[], vec![ret]);
    let module = b.finish();

    assert_eq!(
        generic_signature(&module, &interner, main, InferOptions::default()).as_deref(),
        Ok("() -> {bytes}")
    );
}

#[test]
fn map_over_two_lists() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);

    // def pair(a, c): return (a, c)
    let a = b.name("a");
    let c = b.name("c");
    let tuple = b.tuple(&[a, c]);
    let ret = b.ret(tuple);
    b.function("pair", &["a", "c"], vec![ret]);

    // def zip(xs, ys): return map(pair, xs, ys)
    let pair = b.name("pair");
    let xs = b.name("xs");
    let ys = b.name("ys");
    let call = b.call_builtin("map", &[pair, xs, ys]);
    let ret = b.ret(call);
    let zip = b.function("zip", &["xs", "ys"], vec![ret]);
    let module = b.finish();

    let sig = generic_signature(&module, &interner, zip, InferOptions::default()).unwrap();
    assert_eq!(canonical_vars(&sig), "([$v0], [$v1]) -> [($v0, $v1)]");
}

#[test]
fn print_returns_none() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let s = b.str("hi");
    let i = b.int(1);
    let call = b.call_builtin("print", &[s, i]);
    let ret = b.ret(call);
    let f = b.function("f", &[], vec![ret]);
    let module = b.finish();

    assert_eq!(
        generic_signature(&module, &interner, f, InferOptions::default()).as_deref(),
        Ok("() -> none")
    );
}

#[test]
fn self_recursion_terminates_under_the_guard() {
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);
    let n = b.name("n");
    let call = b.call_named("loop_forever", &[n]);
    let ret = b.ret(call);
    let f = b.function("loop_forever", &["n"], vec![ret]);
    let module = b.finish();

    assert!(generic_signature(&module, &interner, f, InferOptions::default()).is_ok());

    let unguarded = InferOptions::default().with_recursion_guard(false);
    assert!(matches!(
        generic_signature(&module, &interner, f, unguarded),
        Err(InferError::InlineDepthExceeded { depth: 64, .. })
    ));
}

#[test]
fn module_driver_reports_each_function() {
    init_tracing();
    let interner = StringInterner::new();
    let mut b = ModuleBuilder::new(&interner);

    // def first(xs): return [xs]
    let xs = b.name("xs");
    let list = b.list(&[xs]);
    let ret = b.ret(list);
    b.function("first", &["xs"], vec![ret]);

    // def bad(): return builtins.open
    let open = b.builtin("open");
    let ret = b.ret(open);
    b.function("bad", &[], vec![ret]);

    // def last(): return first(1)
    let i = b.int(1);
    let call = b.call_named("first", &[i]);
    let ret = b.ret(call);
    b.function("last", &[], vec![ret]);
    let module = b.finish();

    let types = infer_module(&module, &interner, InferOptions::default());
    assert_eq!(
        types.dump(&interner),
        "first: ($xs) -> [$xs]\n\
         bad: error: unsupported attribute `open`\n\
         last: () -> [int]"
    );
    assert_eq!(types.errors().count(), 1);
    assert_eq!(
        types.signatures()[2].function,
        FunctionId::from_raw(2)
    );
}
