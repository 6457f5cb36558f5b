use pretty_assertions::assert_eq;
use serialink_core::{
    TypeParamId,
    flags::ClassFlags,
    ty::{PrimitiveKind, TypeDescriptor},
};
use serialink_test_utils::{TestClass, TestSession, ty, use_serializers};

use crate::{FILE, TestWorld};

#[rstest::rstest]
#[test_log::test]
fn primitives_ignore_input_nullability(
    #[values(
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Char
    )]
    kind: PrimitiveKind,
    #[values(false, true)] nullable: bool,
) {
    let world = TestWorld::new(TestSession::new());
    let primitive = TypeDescriptor::primitive(kind).with_nullability(nullable);
    let expected = world.runtime(&format!("{}Serializer", kind.class_id().short_name()));

    assert_eq!(world.resolve_declared(&primitive), expected);
    assert_eq!(world.resolve(&primitive), expected);
}

#[test_log::test]
fn nullable_input_strips_once() {
    let world = TestWorld::new(TestSession::new());
    let int = TypeDescriptor::primitive(PrimitiveKind::Int);

    assert_eq!(world.resolve(&int.clone().nullable()), world.resolve(&int));
}

#[test_log::test]
fn file_indices_are_memoized() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Foo"));
    session.add_serializer("app.CustomIntSerializer", ty("app.Foo"));
    session.annotate_file(FILE, use_serializers(&["app.CustomIntSerializer"]));
    let world = TestWorld::new(session);
    let resolver = world.plugin.resolver(&world.session);

    let additional = resolver.additional_serializers(FILE).unwrap();
    assert!(std::sync::Arc::ptr_eq(
        &additional,
        &resolver.additional_serializers(FILE).unwrap()
    ));
    assert!(std::sync::Arc::ptr_eq(
        &resolver.contextual_types(FILE),
        &resolver.contextual_types(FILE)
    ));
}

#[test_log::test]
fn custom_serializer_serves_nullable_and_non_null_uses() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Foo"));
    let custom = session.add_serializer("app.CustomIntSerializer", ty("app.Foo"));
    session.annotate_file(FILE, use_serializers(&["app.CustomIntSerializer"]));
    let world = TestWorld::new(session);

    assert_eq!(world.resolve(&ty("app.Foo")), Some(custom));
    assert_eq!(world.resolve(&ty("app.Foo").nullable()), Some(custom));
}

#[test_log::test]
fn custom_serializer_is_file_scoped() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Foo"));
    session.add_serializer("app.CustomIntSerializer", ty("app.Foo"));
    session.annotate_file(FILE, use_serializers(&["app.CustomIntSerializer"]));
    let world = TestWorld::new(session);

    assert_eq!(world.resolve_in(&ty("app.Foo"), serialink_core::FileId(7)), Ok(None));
}

#[test_log::test]
fn enums() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Color").flags(ClassFlags::ENUM_CLASS));
    let legacy = session.add_class(TestClass::named("app.Legacy.$serializer"));
    session.add_class(
        TestClass::named("app.Legacy")
            .flags(ClassFlags::ENUM_CLASS)
            .serializable()
            .legacy_enum_serializer()
            .companion_serializer(legacy),
    );
    let world = TestWorld::new(session);

    assert_eq!(world.resolve(&ty("app.Color")), world.runtime("EnumSerializer"));
    assert_eq!(world.resolve(&ty("app.Legacy")), Some(legacy));
}

#[test_log::test]
fn sealed_serializable_interface() {
    let mut session = TestSession::new();
    session.add_class(
        TestClass::named("app.Shape")
            .flags(ClassFlags::INTERFACE | ClassFlags::SEALED)
            .serializable(),
    );
    let world = TestWorld::new(session);

    assert_eq!(
        world.resolve(&ty("app.Shape")),
        world.runtime("PolymorphicSerializer")
    );
}

#[test_log::test]
fn bare_type_parameter_has_no_serializer() {
    let mut session = TestSession::new();
    session.add_type_param(TypeParamId(3), ty("core.String"));
    let world = TestWorld::new(session);
    let param = TypeDescriptor::type_parameter(TypeParamId(3));

    assert_eq!(world.resolve(&param), None);
    assert_eq!(world.resolve(&param.clone().nullable()), None);
    assert_eq!(world.resolve_declared(&param), None);
}

#[test_log::test]
fn generic_file_serializer_fails_resolution_in_its_file() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("core.Any"));
    session.add_type_param(TypeParamId(9), ty("core.Any"));
    session.add_serializer(
        "app.GenericSerializer",
        TypeDescriptor::type_parameter(TypeParamId(9)),
    );
    session.annotate_file(FILE, use_serializers(&["app.GenericSerializer"]));
    let world = TestWorld::new(session);

    assert!(world.resolve_in(&ty("core.Any"), FILE).is_err());
}
