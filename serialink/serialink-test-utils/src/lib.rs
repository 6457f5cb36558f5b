#![forbid(unsafe_code)]

use fnv::FnvHashMap;
use serialink_core::{
    ClassId, FileId, SymbolId, TypeParamId,
    annotation::{Annotation, AnnotationArg},
    flags::ClassFlags,
    names::{self, annotations},
    service::{AnnotationIntrospection, DeclarationLookup, SymbolResolution},
    ty::{PrimitiveKind, TypeDescriptor},
};
use thin_vec::ThinVec;

pub use init_tracing::init_test_tracing;

mod init_tracing;

/// Serializer classes of the runtime's public package.
pub const RUNTIME_SERIALIZERS: &[&str] = &["ContextSerializer", "PolymorphicSerializer"];

/// Serializer classes of the runtime's internal package.
pub const INTERNAL_SERIALIZERS: &[&str] = &[
    "ReferenceArraySerializer",
    "ObjectSerializer",
    "EnumSerializer",
    "UnitSerializer",
    "BooleanSerializer",
    "ByteSerializer",
    "ShortSerializer",
    "IntSerializer",
    "LongSerializer",
    "FloatSerializer",
    "DoubleSerializer",
    "CharSerializer",
    "StringSerializer",
    "ArrayListSerializer",
    "LinkedHashSetSerializer",
    "LinkedHashMapSerializer",
    "IntArraySerializer",
];

/// A class declaration of a [TestSession].
#[derive(Clone, Debug)]
pub struct TestClass {
    class_id: ClassId,
    flags: ClassFlags,
    annotations: Vec<Annotation>,
    serializer_for: Option<TypeDescriptor>,
    companion_serializer: Option<SymbolId>,
    legacy_enum_serializer: bool,
}

impl TestClass {
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            flags: ClassFlags::empty(),
            annotations: vec![],
            serializer_for: None,
            companion_serializer: None,
            legacy_enum_serializer: false,
        }
    }

    pub fn named(fq_name: &str) -> Self {
        Self::new(ClassId::top_level(fq_name))
    }

    pub fn flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Mark with `@Serializable`.
    pub fn serializable(self) -> Self {
        self.annotated(Annotation::new(annotations::SERIALIZABLE))
    }

    /// Mark with `@Serializable(with = serializer::class)`.
    pub fn serializable_with(self, serializer: &str) -> Self {
        self.annotated(serializable_with(serializer))
    }

    /// Make this a serializer class for `target`.
    pub fn serializes(mut self, target: TypeDescriptor) -> Self {
        self.serializer_for = Some(target);
        self
    }

    pub fn companion_serializer(mut self, serializer: SymbolId) -> Self {
        self.companion_serializer = Some(serializer);
        self
    }

    pub fn legacy_enum_serializer(mut self) -> Self {
        self.legacy_enum_serializer = true;
        self
    }
}

/// An in-memory compiler session with a small standard library and serialization runtime.
#[derive(Default)]
pub struct TestSession {
    symbols: FnvHashMap<String, SymbolId>,
    classes: Vec<TestClass>,
    aliases: FnvHashMap<ClassId, TypeDescriptor>,
    type_params: FnvHashMap<TypeParamId, TypeDescriptor>,
    files: FnvHashMap<FileId, Vec<Annotation>>,
}

impl TestSession {
    pub fn new() -> Self {
        let mut session = Self::default();

        for kind in PrimitiveKind::ALL {
            session.add_class(TestClass::new(kind.class_id()));
        }
        session.add_class(TestClass::new(names::STRING));
        session.add_class(TestClass::new(names::ARRAY));
        session.add_class(TestClass::named("core.IntArray"));
        session.add_class(TestClass::new(ClassId::new("core.collections", "List")).flags(ClassFlags::INTERFACE));

        for name in RUNTIME_SERIALIZERS {
            session.add_class(TestClass::new(ClassId::new("serial", name)));
        }
        for name in INTERNAL_SERIALIZERS {
            session.add_class(TestClass::new(ClassId::new("serial.internal", name)));
        }

        session
    }

    pub fn add_class(&mut self, class: TestClass) -> SymbolId {
        let symbol = SymbolId(self.classes.len() as u32);
        self.symbols
            .insert(class.class_id.fq_name().to_string(), symbol);
        self.classes.push(class);
        symbol
    }

    /// Add a serializer class for `target`.
    pub fn add_serializer(&mut self, fq_name: &str, target: TypeDescriptor) -> SymbolId {
        self.add_class(TestClass::named(fq_name).serializes(target))
    }

    pub fn add_alias(&mut self, fq_name: &str, expansion: TypeDescriptor) {
        self.aliases.insert(ClassId::top_level(fq_name), expansion);
    }

    pub fn add_type_param(&mut self, param: TypeParamId, upper_bound: TypeDescriptor) {
        self.type_params.insert(param, upper_bound);
    }

    pub fn annotate_file(&mut self, file: FileId, annotation: Annotation) {
        self.files.entry(file).or_default().push(annotation);
    }

    /// The symbol of a declared class. Panics for unknown classes.
    #[track_caller]
    pub fn symbol(&self, fq_name: &str) -> SymbolId {
        match self.symbols.get(fq_name) {
            Some(symbol) => *symbol,
            None => panic!("no class `{fq_name}` in test session"),
        }
    }

    #[track_caller]
    pub fn runtime_serializer(&self, name: &str) -> SymbolId {
        self.symbols
            .get(&format!("serial.{name}"))
            .or_else(|| self.symbols.get(&format!("serial.internal.{name}")))
            .copied()
            .unwrap_or_else(|| panic!("no runtime serializer `{name}` in test session"))
    }

    fn class(&self, symbol: SymbolId) -> Option<&TestClass> {
        self.classes.get(symbol.0 as usize)
    }
}

impl SymbolResolution for TestSession {
    fn class_symbol(&self, class_id: &ClassId) -> Option<SymbolId> {
        self.symbols.get(class_id.fq_name()).copied()
    }

    fn expand_alias(&self, alias: &ClassId) -> Option<TypeDescriptor> {
        self.aliases.get(alias).cloned()
    }

    fn type_param_upper_bound(&self, param: TypeParamId) -> Option<TypeDescriptor> {
        self.type_params.get(&param).cloned()
    }
}

impl AnnotationIntrospection for TestSession {
    fn file_annotations(&self, file: FileId) -> Vec<Annotation> {
        self.files.get(&file).cloned().unwrap_or_default()
    }

    fn class_annotations(&self, symbol: SymbolId) -> Vec<Annotation> {
        self.class(symbol)
            .map(|class| class.annotations.clone())
            .unwrap_or_default()
    }
}

impl DeclarationLookup for TestSession {
    fn class_flags(&self, symbol: SymbolId) -> ClassFlags {
        self.class(symbol)
            .map(|class| class.flags)
            .unwrap_or_default()
    }

    fn serializer_for_type(&self, serializer: SymbolId) -> Option<TypeDescriptor> {
        self.class(serializer)?.serializer_for.clone()
    }

    fn companion_serializer(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.class(symbol)?.companion_serializer
    }

    fn uses_legacy_enum_serializer(&self, symbol: SymbolId) -> bool {
        self.class(symbol)
            .map(|class| class.legacy_enum_serializer)
            .unwrap_or(false)
    }
}

/// A non-null class type from a dotted name.
pub fn ty(fq_name: &str) -> TypeDescriptor {
    TypeDescriptor::class(ClassId::top_level(fq_name))
}

pub fn class_literal(fq_name: &str) -> AnnotationArg {
    AnnotationArg::ClassLiteral(ty(fq_name))
}

fn class_list_annotation(class_id: ClassId, fq_names: &[&str]) -> Annotation {
    Annotation::new(class_id).with_arg(AnnotationArg::Vararg(
        fq_names
            .iter()
            .map(|fq_name| class_literal(fq_name))
            .collect::<ThinVec<_>>(),
    ))
}

/// File-level `@UseSerializers(...)`
pub fn use_serializers(fq_names: &[&str]) -> Annotation {
    class_list_annotation(annotations::USE_SERIALIZERS, fq_names)
}

/// File-level `@UseContextualSerialization(...)`
pub fn use_contextual_serialization(fq_names: &[&str]) -> Annotation {
    class_list_annotation(annotations::USE_CONTEXTUAL_SERIALIZATION, fq_names)
}

/// File-level `@Contextual(...)`
pub fn contextual_classes(fq_names: &[&str]) -> Annotation {
    class_list_annotation(annotations::CONTEXTUAL, fq_names)
}

/// `@Serializable(with = serializer::class)`
pub fn serializable_with(serializer: &str) -> Annotation {
    Annotation::new(annotations::SERIALIZABLE).with_arg(class_literal(serializer))
}

/// An annotation without arguments, e.g. `@Contextual` on a type use.
pub fn marker(class_id: ClassId) -> Annotation {
    Annotation::new(class_id)
}
