use serialink_core::{FileId, SymbolId, ty::TypeDescriptor};
use serialink_resolver::{MalformedRegistration, SerializationPlugin};
use serialink_test_utils::TestSession;

mod test_checker;
mod test_concurrency;
mod test_precedence;
mod test_scenarios;

const FILE: FileId = FileId(0);

/// A session together with the plugin state resolving against it.
struct TestWorld {
    session: TestSession,
    plugin: SerializationPlugin,
}

impl TestWorld {
    fn new(session: TestSession) -> Self {
        Self {
            session,
            plugin: SerializationPlugin::default(),
        }
    }

    fn resolve_in(
        &self,
        ty: &TypeDescriptor,
        file: FileId,
    ) -> Result<Option<SymbolId>, MalformedRegistration> {
        self.plugin
            .resolver(&self.session)
            .resolve_serializer_or_context(ty, file)
    }

    #[track_caller]
    fn resolve(&self, ty: &TypeDescriptor) -> Option<SymbolId> {
        self.resolve_in(ty, FILE).unwrap()
    }

    fn resolve_declared(&self, ty: &TypeDescriptor) -> Option<SymbolId> {
        self.plugin.resolver(&self.session).resolve_serializer(ty)
    }

    fn runtime(&self, name: &str) -> Option<SymbolId> {
        Some(self.session.runtime_serializer(name))
    }
}
