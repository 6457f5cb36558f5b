use pretty_assertions::assert_eq;
use serialink_core::{flags::ClassFlags, names::annotations};
use serialink_test_utils::{
    TestClass, TestSession, contextual_classes, marker, serializable_with, ty,
    use_contextual_serialization, use_serializers,
};
use test_log::test;

use crate::{FILE, TestWorld};

#[test]
fn additional_serializer_beats_contextual_set() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Instant"));
    let instant_serializer = session.add_serializer("app.InstantSerializer", ty("app.Instant"));
    session.annotate_file(FILE, use_contextual_serialization(&["app.Instant"]));
    session.annotate_file(FILE, use_serializers(&["app.InstantSerializer"]));
    let world = TestWorld::new(session);

    assert_eq!(world.resolve(&ty("app.Instant")), Some(instant_serializer));
}

#[test]
fn later_file_registration_wins() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Instant"));
    session.add_serializer("app.IsoInstantSerializer", ty("app.Instant"));
    let epoch = session.add_serializer("app.EpochInstantSerializer", ty("app.Instant"));
    session.annotate_file(
        FILE,
        use_serializers(&["app.IsoInstantSerializer", "app.EpochInstantSerializer"]),
    );
    let world = TestWorld::new(session);

    assert_eq!(world.resolve(&ty("app.Instant")), Some(epoch));
}

#[test]
fn contextual_marker_beats_polymorphic_marker() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Shape").flags(ClassFlags::INTERFACE));
    let world = TestWorld::new(session);

    let both = ty("app.Shape")
        .with_annotation(marker(annotations::POLYMORPHIC))
        .with_annotation(marker(annotations::CONTEXTUAL));

    assert_eq!(world.resolve(&both), world.runtime("ContextSerializer"));
}

#[test]
fn type_use_marker_beats_declaration() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Color").flags(ClassFlags::ENUM_CLASS));
    let world = TestWorld::new(session);

    let polymorphic_use = ty("app.Color").with_annotation(marker(annotations::POLYMORPHIC));

    assert_eq!(
        world.resolve(&polymorphic_use),
        world.runtime("PolymorphicSerializer")
    );
    assert_eq!(
        world.resolve_declared(&polymorphic_use),
        world.runtime("EnumSerializer")
    );
}

#[test]
fn type_use_serializer_beats_everything() {
    let mut session = TestSession::new();
    let shouting = session.add_class(TestClass::named("app.ShoutingStringSerializer"));
    session.add_serializer("app.QuietStringSerializer", ty("core.String"));
    session.annotate_file(FILE, use_serializers(&["app.QuietStringSerializer"]));
    session.annotate_file(FILE, contextual_classes(&["core.String"]));
    let world = TestWorld::new(session);

    let annotated =
        ty("core.String").with_annotation(serializable_with("app.ShoutingStringSerializer"));

    assert_eq!(world.resolve(&annotated), Some(shouting));
    assert_eq!(world.resolve_declared(&annotated), Some(shouting));
}

#[test]
fn declared_serializer_beats_builtin_object_serializer() {
    let mut session = TestSession::new();
    let config_serializer = session.add_class(TestClass::named("app.ConfigSerializer"));
    session.add_class(
        TestClass::named("app.Config")
            .flags(ClassFlags::OBJECT)
            .serializable_with("app.ConfigSerializer"),
    );
    let world = TestWorld::new(session);

    assert_eq!(world.resolve(&ty("app.Config")), Some(config_serializer));
}
