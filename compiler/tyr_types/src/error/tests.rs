use super::*;
use crate::{Idx, UnifyContext};

#[test]
fn span_of_each_variant() {
    let span = Span::new(3, 7);
    let err = InferError::UnboundName {
        name: "x".to_string(),
        span,
    };
    assert_eq!(err.span(), span);
    assert_eq!(InferError::CallableAsValue { span }.span(), span);
}

#[test]
fn display_messages() {
    let span = Span::DUMMY;
    assert_eq!(
        InferError::UnsupportedAttribute {
            attr: "open".to_string(),
            span,
        }
        .to_string(),
        "unsupported attribute `open`"
    );
    assert_eq!(
        InferError::InlineDepthExceeded {
            function: "f".to_string(),
            depth: 64,
            span,
        }
        .to_string(),
        "inlining `f` exceeds the maximum depth of 64"
    );
}

#[test]
fn render_delegates_to_unify_error() {
    let mut pool = Pool::new();
    let set = pool.set(Idx::STR);
    let err = InferError::unify(
        UnifyError::Mismatch {
            expected: set,
            found: Idx::BYTES,
            context: UnifyContext::TopLevel,
        },
        Span::DUMMY,
    );
    assert_eq!(err.render(&pool), "type mismatch in types: `{str}` vs `bytes`");
}
