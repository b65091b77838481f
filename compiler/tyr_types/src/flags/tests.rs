use super::*;

#[test]
fn only_presence_flags_propagate() {
    let flags = TypeFlags::HAS_VAR | TypeFlags::IS_FUNCTION;
    assert_eq!(flags.propagate(), TypeFlags::HAS_VAR);
}

#[test]
fn tag_categories() {
    assert_eq!(TypeFlags::from_tag(Tag::Int), TypeFlags::IS_PRIMITIVE);
    assert_eq!(TypeFlags::from_tag(Tag::Var), TypeFlags::HAS_VAR);
    assert_eq!(TypeFlags::from_tag(Tag::TupleCons), TypeFlags::IS_COMPOSITE);
}
