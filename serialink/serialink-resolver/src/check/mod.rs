//! Declaration checks that turn resolution results into diagnostics.
//!
//! Each [DeclKind] maps to an ordered list of [CheckRule]s in a [CheckRegistry],
//! so the order in which rules run is visible in one place.

use arcstr::ArcStr;
use fnv::{FnvHashMap, FnvHashSet};
use serialink_core::{FileId, SymbolId, annotation::Annotation, ty::TypeDescriptor};
use thin_vec::ThinVec;
use thiserror::Error;

use crate::{SerializerResolver, error::MalformedRegistration};

mod rules;


/// A class declaration with the properties that make up its serial form.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub symbol: SymbolId,
    pub file: FileId,
    pub properties: Vec<PropertyDecl>,
}

#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub name: ArcStr,
    pub file: FileId,
    pub ty: TypeDescriptor,
    pub annotations: ThinVec<Annotation>,
}

#[derive(Clone, Copy, Debug)]
pub enum Declaration<'d> {
    File(FileId),
    Class(&'d ClassDecl),
    Property(&'d PropertyDecl),
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    File,
    Class,
    Property,
}

impl Declaration<'_> {
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::File(_) => DeclKind::File,
            Self::Class(_) => DeclKind::Class,
            Self::Property(_) => DeclKind::Property,
        }
    }

    pub fn file(&self) -> FileId {
        match self {
            Self::File(file) => *file,
            Self::Class(class) => class.file,
            Self::Property(property) => property.file,
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CheckRule {
    /// Build the file's annotation indices, reporting malformed registrations.
    FileAnnotationsWellFormed,
    /// Run property rules on every property of a class with a generated serializer.
    SerializableClassProperties,
    /// Require a serializer for a property's type and each of its type arguments.
    PropertyTypeSerializable,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum CheckError {
    #[error("serializer has not been found for type `{ty}`")]
    SerializerNotFound { ty: TypeDescriptor },
    #[error("internal error: {0}")]
    InternalError(#[from] MalformedRegistration),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    pub error: CheckError,
    pub file: FileId,
    /// The property whose type was being checked
    pub property: Option<ArcStr>,
}

impl Diagnostic {
    pub fn is_internal(&self) -> bool {
        matches!(self.error, CheckError::InternalError(_))
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

pub struct CheckRegistry {
    rules: FnvHashMap<DeclKind, Vec<CheckRule>>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DeclKind::File, CheckRule::FileAnnotationsWellFormed);
        registry.register(DeclKind::Class, CheckRule::SerializableClassProperties);
        registry.register(DeclKind::Property, CheckRule::PropertyTypeSerializable);
        registry
    }
}

impl CheckRegistry {
    pub fn empty() -> Self {
        Self {
            rules: Default::default(),
        }
    }

    /// Append a rule to the rules of `kind`. Rules run in registration order.
    pub fn register(&mut self, kind: DeclKind, rule: CheckRule) {
        self.rules.entry(kind).or_default().push(rule);
    }

    pub fn rules(&self, kind: DeclKind) -> &[CheckRule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn check(
        &self,
        declaration: Declaration,
        resolver: SerializerResolver,
        sink: &mut dyn DiagnosticSink,
    ) {
        let mut ctx = CheckCtx {
            registry: self,
            resolver,
            sink,
            internal_errors_reported: Default::default(),
        };
        ctx.check(declaration);
    }
}

/// State of one [CheckRegistry::check] call.
pub(crate) struct CheckCtx<'c, 'r> {
    registry: &'c CheckRegistry,
    resolver: SerializerResolver<'r>,
    sink: &'c mut dyn DiagnosticSink,
    internal_errors_reported: FnvHashSet<FileId>,
}

impl CheckCtx<'_, '_> {
    fn check(&mut self, declaration: Declaration) {
        let registry = self.registry;
        for rule in registry.rules(declaration.kind()) {
            rule.run(declaration, self);
        }
    }

    fn report(&mut self, error: CheckError, file: FileId, property: Option<&PropertyDecl>) {
        self.sink.report(Diagnostic {
            error,
            file,
            property: property.map(|property| property.name.clone()),
        });
    }

    /// A malformed registration is reported once per file, however many types hit it.
    fn report_internal(&mut self, error: MalformedRegistration, property: Option<&PropertyDecl>) {
        let file = error.file();
        if self.internal_errors_reported.insert(file) {
            self.report(CheckError::InternalError(error), file, property);
        }
    }
}
