//! Stack growth for the recursive inference visitor.
//!
//! Inlining re-enters the visitor once per nested call, so the native stack
//! depth tracks the call depth of the analyzed program. On native targets
//! the stack is grown on demand with `stacker`; WASM calls straight through.

/// Grow the stack if less than this remains (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
