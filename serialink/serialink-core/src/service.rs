//! Services the enclosing compiler provides to the serialization plugin.
//!
//! All of them answer from already-resolved global symbol state, so every call is cheap
//! relative to a source scan, synchronous and side-effect free.

use crate::{
    ClassId, FileId, SymbolId, TypeParamId, annotation::Annotation, flags::ClassFlags,
    ty::TypeDescriptor,
};

#[cfg_attr(feature = "unimock", unimock::unimock(api = SymbolResolutionMock))]
pub trait SymbolResolution {
    /// Look up a class-like declaration by its fully qualified id.
    fn class_symbol(&self, class_id: &ClassId) -> Option<SymbolId>;

    /// One level of type alias expansion.
    fn expand_alias(&self, alias: &ClassId) -> Option<TypeDescriptor>;

    /// The declared upper bound of a type parameter, if it has one.
    fn type_param_upper_bound(&self, param: TypeParamId) -> Option<TypeDescriptor>;
}

#[cfg_attr(feature = "unimock", unimock::unimock(api = AnnotationIntrospectionMock))]
pub trait AnnotationIntrospection {
    /// File-level annotations, in declaration order.
    fn file_annotations(&self, file: FileId) -> Vec<Annotation>;

    /// Annotations on a class declaration, in declaration order.
    fn class_annotations(&self, symbol: SymbolId) -> Vec<Annotation>;
}

#[cfg_attr(feature = "unimock", unimock::unimock(api = DeclarationLookupMock))]
pub trait DeclarationLookup {
    fn class_flags(&self, symbol: SymbolId) -> ClassFlags;

    /// For a serializer class, the concrete type it serializes.
    ///
    /// This is found either by the class implementing the serializer contract for a
    /// concrete type, or by a factory member yielding a serializer for one.
    fn serializer_for_type(&self, serializer: SymbolId) -> Option<TypeDescriptor>;

    /// A serializer declared on the class' companion, or generated for the class.
    fn companion_serializer(&self, symbol: SymbolId) -> Option<SymbolId>;

    /// Whether an enum class is still served by the legacy generated serializer.
    fn uses_legacy_enum_serializer(&self, symbol: SymbolId) -> bool;
}

/// Everything serializer resolution needs from the compiler session.
pub trait SerializationSession:
    SymbolResolution + AnnotationIntrospection + DeclarationLookup
{
}

impl<T> SerializationSession for T where
    T: SymbolResolution + AnnotationIntrospection + DeclarationLookup
{
}
