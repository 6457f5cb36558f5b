use arcstr::ArcStr;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serialink_core::{FileId, names::annotations};
use serialink_resolver::{
    MalformedRegistration,
    check::{CheckError, CheckRegistry, ClassDecl, Declaration, Diagnostic, PropertyDecl},
};
use serialink_test_utils::{TestClass, TestSession, marker, ty, use_serializers};
use test_log::test;
use thin_vec::thin_vec;

use crate::{FILE, TestWorld};

fn property(name: &str, ty: serialink_core::ty::TypeDescriptor) -> PropertyDecl {
    PropertyDecl {
        name: ArcStr::from(name),
        file: FILE,
        ty,
        annotations: thin_vec![],
    }
}

impl TestWorld {
    fn check_all(&self, file: FileId, classes: &[ClassDecl]) -> Vec<Diagnostic> {
        let registry = CheckRegistry::default();
        let resolver = self.plugin.resolver(&self.session);
        let mut diagnostics = Vec::<Diagnostic>::new();

        registry.check(Declaration::File(file), resolver, &mut diagnostics);
        for class in classes {
            registry.check(Declaration::Class(class), resolver, &mut diagnostics);
        }
        diagnostics
    }
}

#[test]
fn file_with_custom_and_contextual_serializers() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Money"));
    session.add_class(TestClass::named("app.Instant"));
    session.add_serializer("app.MoneySerializer", ty("app.Money"));
    session.annotate_file(FILE, use_serializers(&["app.MoneySerializer"]));
    let order = session.add_class(TestClass::named("app.Order").serializable());
    let world = TestWorld::new(session);

    let mut placed_at = property("placedAt", ty("app.Instant"));
    placed_at.annotations.push(marker(annotations::CONTEXTUAL));
    let class = ClassDecl {
        symbol: order,
        file: FILE,
        properties: vec![
            property("id", ty("core.Long")),
            property("total", ty("app.Money").nullable()),
            property(
                "lines",
                ty("core.collections.List").with_args([ty("app.Line")]),
            ),
            placed_at,
        ],
    };

    assert_eq!(
        world.check_all(FILE, &[class]),
        vec![Diagnostic {
            error: CheckError::SerializerNotFound { ty: ty("app.Line") },
            file: FILE,
            property: Some(ArcStr::from("lines")),
        }]
    );
}

#[test]
fn malformed_file_is_reported_once_and_apart_from_missing_serializers() {
    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.NotASerializer"));
    session.annotate_file(FILE, use_serializers(&["app.NotASerializer"]));
    let order = session.add_class(TestClass::named("app.Order").serializable());
    let world = TestWorld::new(session);

    let class = ClassDecl {
        symbol: order,
        file: FILE,
        properties: vec![property("id", ty("core.Long"))],
    };

    let diagnostics = world.check_all(FILE, &[class]);

    assert_matches!(
        diagnostics.as_slice(),
        [Diagnostic {
            error: CheckError::InternalError(MalformedRegistration::NoTargetType { .. }),
            property: None,
            ..
        }]
    );
    assert!(diagnostics[0].error.to_string().starts_with("internal error: "));
}
