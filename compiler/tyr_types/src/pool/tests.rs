use super::*;
use pretty_assertions::assert_eq;
use tyr_ir::StringInterner;

#[test]
fn primitives_have_fixed_indices() {
    let pool = Pool::new();
    assert_eq!(pool.tag(Idx::INT), Tag::Int);
    assert_eq!(pool.tag(Idx::STR), Tag::Str);
    assert_eq!(pool.tag(Idx::NONE), Tag::None);
    assert_eq!(pool.tag(Idx::TUPLE_END), Tag::TupleEnd);
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT as usize);
}

#[test]
fn structural_types_are_hash_consed() {
    let mut pool = Pool::new();
    let a = pool.list(Idx::INT);
    let b = pool.list(Idx::INT);
    let c = pool.set(Idx::INT);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let f = pool.function(&[a], Idx::NONE);
    let g = pool.function(&[b], Idx::NONE);
    assert_eq!(f, g);
}

#[test]
fn variables_are_never_shared() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let b = pool.fresh_var();
    assert_ne!(a, b);
    assert_ne!(pool.var_id(a), pool.var_id(b));
    assert_eq!(pool.var_count(), 2);
}

#[test]
fn has_var_propagates_through_structure() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    let list = pool.list(var);
    let tuple = pool.tuple(&[Idx::INT, list]);
    let func = pool.function(&[Idx::INT], tuple);

    assert!(pool.flags(func).contains(TypeFlags::HAS_VAR));
    let concrete = pool.tuple(&[Idx::INT, Idx::STR]);
    assert!(!pool.flags(concrete).contains(TypeFlags::HAS_VAR));
}

#[test]
fn modules_intern_by_name() {
    let mut pool = Pool::new();
    let a = pool.module(Name::BUILTINS);
    let b = pool.module(Name::BUILTINS);
    assert_eq!(a, b);
    assert_eq!(pool.module_name(a), Name::BUILTINS);
}

#[test]
fn rollback_restores_var_states() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    let id = pool.var_id(var);

    let snapshot = pool.snapshot_vars();
    pool.set_var_state(id, VarState::Link { target: Idx::INT });
    assert_eq!(pool.resolve_links(var), Idx::INT);

    pool.rollback_vars(snapshot);
    assert_eq!(pool.resolve_links(var), var);
}

#[test]
fn nested_rollback_only_undoes_inner_changes() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let b = pool.fresh_var();

    let outer = pool.snapshot_vars();
    pool.set_var_state(pool.var_id(a), VarState::Link { target: Idx::INT });

    let inner = pool.snapshot_vars();
    pool.set_var_state(pool.var_id(b), VarState::Link { target: Idx::STR });
    // Overwritten twice inside the inner trial
    pool.set_var_state(pool.var_id(a), VarState::Link { target: Idx::BOOL });
    pool.rollback_vars(inner);

    assert_eq!(pool.resolve_links(a), Idx::INT);
    assert_eq!(pool.resolve_links(b), b);

    pool.rollback_vars(outer);
    assert_eq!(pool.resolve_links(a), a);
}

#[test]
fn changes_outside_a_snapshot_are_not_logged() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    pool.set_var_state(pool.var_id(var), VarState::Link { target: Idx::INT });

    let snapshot = pool.snapshot_vars();
    pool.rollback_vars(snapshot);
    assert_eq!(pool.resolve_links(var), Idx::INT);
}

#[test]
fn rollback_forgets_pending_overloads_recorded_in_the_trial() {
    let mut pool = Pool::new();
    let kept = pool.fresh_overloaded_var(vec![Idx::INT, Idx::STR]);
    let dropped = pool.fresh_overloaded_var(vec![Idx::INT, Idx::STR]);
    pool.add_pending_overload(kept);

    let snapshot = pool.snapshot_vars();
    pool.add_pending_overload(dropped);
    pool.add_pending_overload(kept);
    assert_eq!(pool.pending_overloads(), &[kept, dropped]);

    pool.rollback_vars(snapshot);
    assert_eq!(pool.pending_overloads(), &[kept]);
}

#[test]
fn combined_candidates_are_order_independent() {
    let mut pool = Pool::new();
    let ints = pool.list(Idx::INT);
    let mut left = Candidate::new(ints);
    left.join(Idx::STR);
    let right = Candidate::new(Idx::INT);

    let one = left.combine(&right);
    let other = right.combine(&left);
    assert_eq!(one, other);
    assert_eq!(one.ty, Idx::INT);
    assert_eq!(one.members().collect::<Vec<_>>(), vec![Idx::INT, Idx::STR, ints]);
}

#[test]
fn join_skips_known_members() {
    let mut candidate = Candidate::new(Idx::INT);
    candidate.join(Idx::INT);
    candidate.join(Idx::STR);
    candidate.join(Idx::STR);
    assert_eq!(candidate.joined, vec![Idx::STR]);
}

#[test]
fn tuple_elems_follow_links() {
    let mut pool = Pool::new();
    let tail = pool.fresh_var();
    let open = pool.cons(Idx::INT, tail);
    let tuple = pool.tuple_of_chain(open);
    assert_eq!(pool.tuple_elems(tuple), None);

    let rest = pool.cons(Idx::STR, Idx::TUPLE_END);
    pool.set_var_state(pool.var_id(tail), VarState::Link { target: rest });
    assert_eq!(pool.tuple_elems(tuple), Some(vec![Idx::INT, Idx::STR]));
}

#[test]
fn format_shapes() {
    let mut pool = Pool::new();
    let list = pool.list(Idx::INT);
    let set = pool.set(Idx::STR);
    let pair = pool.tuple(&[Idx::INT, Idx::STR]);
    let single = pool.tuple(&[Idx::FLOAT]);
    let unit = pool.tuple(&[]);
    let func = pool.function(&[list, set], Idx::NONE);

    assert_eq!(pool.format_type(list), "[int]");
    assert_eq!(pool.format_type(set), "{str}");
    assert_eq!(pool.format_type(pair), "(int, str)");
    assert_eq!(pool.format_type(single), "(float,)");
    assert_eq!(pool.format_type(unit), "()");
    assert_eq!(pool.format_type(func), "([int], {str}) -> none");
}

#[test]
fn format_variables() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let x = interner.intern("x");
    let named = pool.fresh_named_var(x);
    let anon = pool.fresh_var();
    let overloaded = pool.fresh_overloaded_var(vec![Idx::INT, Idx::STR]);
    let module = pool.module(Name::BUILTINS);

    assert_eq!(pool.format_type_named(named, &interner), "$x");
    assert_eq!(pool.format_type(named), "$0");
    assert_eq!(pool.format_type(anon), "$1");
    assert_eq!(pool.format_type(overloaded), "overload{int | str}");
    assert_eq!(pool.format_type_named(module, &interner), "module builtins");
}
