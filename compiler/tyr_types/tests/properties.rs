//! Property-based tests for unification.
//!
//! Random type shapes over a small set of shared variables, with
//! overloaded variables mixed in, check:
//! 1. Idempotence: once `a` and `b` unify, unifying them again changes nothing
//! 2. Reflexivity: any type unifies with itself without binding anything
//! 3. Symmetry: `unify(a, b)` and `unify(b, a)` agree on success and reach the
//!    same types up to variable naming

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::canonical_vars;
use proptest::prelude::*;
use tyr_types::{Idx, Pool, UnifyEngine};

const VAR_COUNT: usize = 4;

#[derive(Clone, Debug)]
enum Shape {
    Int,
    Str,
    Var(usize),
    List(Box<Shape>),
    Set(Box<Shape>),
    Tuple(Vec<Shape>),
    Function(Vec<Shape>, Box<Shape>),
    /// A fresh overloaded variable over these alternatives.
    Overloaded(Vec<Shape>),
}

fn plain_leaf() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Int),
        Just(Shape::Str),
        (0..VAR_COUNT).prop_map(Shape::Var),
    ]
}

/// Overload alternatives: leaves, containers of leaves and unary functions.
fn alternative_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        plain_leaf(),
        plain_leaf().prop_map(|s| Shape::List(Box::new(s))),
        plain_leaf().prop_map(|s| Shape::Set(Box::new(s))),
        (plain_leaf(), plain_leaf())
            .prop_map(|(param, ret)| Shape::Function(vec![param], Box::new(ret))),
    ]
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        3 => plain_leaf(),
        1 => prop::collection::vec(alternative_strategy(), 2..4).prop_map(Shape::Overloaded),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::List(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Set(Box::new(s))),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Shape::Tuple),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(params, ret)| Shape::Function(params, Box::new(ret))),
        ]
    })
}

fn build(pool: &mut Pool, vars: &[Idx], shape: &Shape) -> Idx {
    match shape {
        Shape::Int => Idx::INT,
        Shape::Str => Idx::STR,
        Shape::Var(i) => vars[*i],
        Shape::List(elem) => {
            let elem = build(pool, vars, elem);
            pool.list(elem)
        }
        Shape::Set(elem) => {
            let elem = build(pool, vars, elem);
            pool.set(elem)
        }
        Shape::Tuple(elems) => {
            let elems: Vec<Idx> = elems.iter().map(|e| build(pool, vars, e)).collect();
            pool.tuple(&elems)
        }
        Shape::Function(params, ret) => {
            let params: Vec<Idx> = params.iter().map(|p| build(pool, vars, p)).collect();
            let ret = build(pool, vars, ret);
            pool.function(&params, ret)
        }
        Shape::Overloaded(alternatives) => {
            let alternatives: Vec<Idx> =
                alternatives.iter().map(|a| build(pool, vars, a)).collect();
            pool.fresh_overloaded_var(alternatives)
        }
    }
}

/// A fresh pool holding the shared variables and both shapes.
fn setup(a: &Shape, b: &Shape) -> (Pool, Idx, Idx) {
    let mut pool = Pool::new();
    let vars: Vec<Idx> = (0..VAR_COUNT).map(|_| pool.fresh_var()).collect();
    let a = build(&mut pool, &vars, a);
    let b = build(&mut pool, &vars, b);
    (pool, a, b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unify_is_idempotent(a in shape_strategy(), b in shape_strategy()) {
        let (mut pool, a, b) = setup(&a, &b);
        let mut engine = UnifyEngine::new(&mut pool);

        if engine.unify(a, b).is_ok() {
            let first_a = engine.resolve_deep(a);
            let first_b = engine.resolve_deep(b);

            // An overload left with several candidates is not linked to
            // the other side
            let open = |ty| engine.pool().format_type(ty).contains("overload{");
            if !open(first_a) && !open(first_b) {
                prop_assert_eq!(first_a, first_b);
            }

            prop_assert!(engine.unify(a, b).is_ok());
            prop_assert_eq!(engine.resolve_deep(a), first_a);
            prop_assert_eq!(engine.resolve_deep(b), first_b);
        }
    }

    #[test]
    fn unify_with_self_binds_nothing(a in shape_strategy()) {
        let (mut pool, a, _) = setup(&a, &Shape::Int);
        let mut engine = UnifyEngine::new(&mut pool);

        let before = engine.resolve_deep(a);
        prop_assert!(engine.unify(a, a).is_ok());
        prop_assert_eq!(engine.resolve_deep(a), before);
    }

    #[test]
    fn unify_is_symmetric(a in shape_strategy(), b in shape_strategy()) {
        let (mut left_pool, left_a, left_b) = setup(&a, &b);
        let (mut right_pool, right_a, right_b) = setup(&a, &b);

        let mut left = UnifyEngine::new(&mut left_pool);
        let mut right = UnifyEngine::new(&mut right_pool);

        let left_ok = left.unify(left_a, left_b).is_ok();
        let right_ok = right.unify(right_b, right_a).is_ok();
        prop_assert_eq!(left_ok, right_ok);

        if left_ok {
            let left_ty = left.resolve_deep(left_a);
            let right_ty = right.resolve_deep(right_a);
            prop_assert_eq!(
                canonical_vars(&left.pool().format_type(left_ty)),
                canonical_vars(&right.pool().format_type(right_ty))
            );
        }
    }
}
