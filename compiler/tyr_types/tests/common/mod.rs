//! Shared helpers for the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Once;

use tyr_ir::{FunctionId, GlobalDecls, Module, StringInterner};
use tyr_types::{InferEngine, InferError, InferOptions, Pool};

static TRACING_INIT: Once = Once::new();

/// Install a tree-shaped tracing subscriber, once per test binary.
///
/// Only initializes if `RUST_LOG` is set, e.g.
/// `RUST_LOG=tyr_types=debug cargo test`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Infer the generic signature of `func` and format it with source names.
pub fn generic_signature(
    module: &Module,
    interner: &StringInterner,
    func: FunctionId,
    options: InferOptions,
) -> Result<String, InferError> {
    init_tracing();
    let globals = GlobalDecls::from_module(module);
    let mut pool = Pool::new();
    let mut engine = InferEngine::with_options(&mut pool, module, &globals, interner, options);
    let ty = engine.infer_function(func)?;
    let ty = engine.resolve_deep(ty);
    Ok(engine.pool().format_type_named(ty, interner))
}

/// Rename `$<id>` variables by order of first appearance, so types that are
/// equal up to variable naming format identically.
pub fn canonical_vars(text: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c != '$' {
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if digits.is_empty() {
            continue;
        }
        let index = match seen.iter().position(|s| *s == digits) {
            Some(index) => index,
            None => {
                seen.push(digits);
                seen.len() - 1
            }
        };
        out.push_str(&format!("v{index}"));
    }
    out
}
