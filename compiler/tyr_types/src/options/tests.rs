use super::*;

#[test]
fn defaults() {
    let options = InferOptions::default();
    assert!(options.recursion_guard);
    assert_eq!(options.max_inline_depth, 64);
    assert!(!options.dump_environment);
}

#[test]
fn setters_chain() {
    let options = InferOptions::default()
        .with_recursion_guard(false)
        .with_max_inline_depth(3)
        .with_dump_environment(true);
    assert_eq!(
        options,
        InferOptions {
            recursion_guard: false,
            max_inline_depth: 3,
            dump_environment: true,
        }
    );
}
