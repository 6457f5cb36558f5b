use std::sync::Arc;

use serialink_test_utils::{
    TestClass, TestSession, contextual_classes, init_test_tracing, ty, use_serializers,
};

use crate::{FILE, TestWorld};

#[test]
fn racing_first_population_computes_one_index() {
    init_test_tracing();

    let mut session = TestSession::new();
    session.add_class(TestClass::named("app.Foo"));
    session.add_serializer("app.FooSerializer", ty("app.Foo"));
    session.annotate_file(FILE, use_serializers(&["app.FooSerializer"]));
    session.annotate_file(FILE, contextual_classes(&["core.String"]));
    let world = TestWorld::new(session);

    let (contextual, additional): (Vec<_>, Vec<_>) = std::thread::scope(|scope| {
        let world = &world;
        let handles: Vec<_> = (0..8)
            .map(|n| {
                std::thread::Builder::new()
                    .name(format!("resolver-{n}"))
                    .spawn_scoped(scope, move || {
                        let resolver = world.plugin.resolver(&world.session);
                        (
                            resolver.contextual_types(FILE),
                            resolver.additional_serializers(FILE).unwrap(),
                        )
                    })
                    .unwrap()
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .unzip()
    });

    assert!(contextual.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert!(additional.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(additional[0].len(), 1);
}

#[test]
fn files_do_not_share_indices() {
    init_test_tracing();

    let mut session = TestSession::new();
    for file in 0..4 {
        session.annotate_file(serialink_core::FileId(file), contextual_classes(&["core.String"]));
    }
    let world = TestWorld::new(session);

    let indices: Vec<_> = std::thread::scope(|scope| {
        let world = &world;
        let handles: Vec<_> = (0..4)
            .map(|file| {
                scope.spawn(move || {
                    world
                        .plugin
                        .resolver(&world.session)
                        .contextual_types(serialink_core::FileId(file))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(!Arc::ptr_eq(&indices[0], &indices[1]));
    assert!(indices.iter().all(|index| index.contains(&ty("core.String"))));
}
