use std::sync::Arc;

use serialink_core::{
    ClassId, FileId, SymbolId,
    annotation::Annotation,
    flags::ClassFlags,
    names::annotations,
    service::SerializationSession,
    ty::TypeDescriptor,
};
use tracing::trace;

use crate::{
    builtins::{self, BuiltinSerializers, SerializerId},
    config::ResolverConfig,
    error::MalformedRegistration,
    expand::{class_symbol_or_upper_bound, fully_expanded_type, regular_class_symbol},
    file_index::{AdditionalSerializersResult, ContextualTypes, FileAnnotationIndex},
};

/// State the serialization plugin keeps for the lifetime of one compilation session.
#[derive(Default)]
pub struct SerializationPlugin {
    file_index: FileAnnotationIndex,
    builtins: BuiltinSerializers,
}

impl SerializationPlugin {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            file_index: FileAnnotationIndex::default(),
            builtins: BuiltinSerializers::new(config),
        }
    }

    pub fn resolver<'a>(&'a self, session: &'a dyn SerializationSession) -> SerializerResolver<'a> {
        SerializerResolver {
            session,
            file_index: &self.file_index,
            builtins: &self.builtins,
        }
    }
}

/// Finds the serializer class that applies to a type.
///
/// An absent serializer is an ordinary outcome and yields `None`.
#[derive(Clone, Copy)]
pub struct SerializerResolver<'a> {
    session: &'a dyn SerializationSession,
    file_index: &'a FileAnnotationIndex,
    builtins: &'a BuiltinSerializers,
}

impl<'a> SerializerResolver<'a> {
    pub fn contextual_types(&self, file: FileId) -> Arc<ContextualTypes> {
        self.file_index.contextual_types(self.session, file)
    }

    pub fn additional_serializers(&self, file: FileId) -> AdditionalSerializersResult {
        self.file_index.additional_serializers(self.session, file)
    }

    /// Resolve a serializer for a type used in `file`, accepting file-level registrations
    /// and the context serializer as fallbacks.
    ///
    /// The only error is a malformed file-level serializer registration.
    pub fn resolve_serializer_or_context(
        &self,
        ty: &TypeDescriptor,
        file: FileId,
    ) -> Result<Option<SymbolId>, MalformedRegistration> {
        if ty.is_type_parameter() {
            return Ok(None);
        }

        let expanded = fully_expanded_type(ty, self.session);
        if let Some(serializer) = self.serializable_with(&expanded.annotations) {
            trace!(%ty, ?serializer, "type-use serializer");
            return Ok(Some(serializer));
        }

        let Some(symbol) = class_symbol_or_upper_bound(&expanded, self.session) else {
            return Ok(None);
        };

        if let Some(serializer) = self
            .additional_serializers(file)?
            .get(symbol, expanded.nullable)
        {
            trace!(%ty, ?serializer, "additional serializer");
            return Ok(Some(serializer));
        }

        if expanded.nullable {
            // `expanded` is alias-free, so its non-null form can't become nullable again
            return self.resolve_serializer_or_context(&expanded.with_nullability(false), file);
        }

        if self.contextual_types(file).contains(&expanded) {
            trace!(%ty, "contextual in file");
            return Ok(self.builtin(builtins::CONTEXT));
        }

        if let Some(serializer) = self.special_serializer(&expanded.annotations) {
            trace!(%ty, ?serializer, "special serializer");
            return Ok(Some(serializer));
        }

        Ok(self.resolve_serializer(expanded.upper_bound_if_flexible()))
    }

    /// Resolve a serializer for a type from its declaration alone.
    pub fn resolve_serializer(&self, ty: &TypeDescriptor) -> Option<SymbolId> {
        let ty = fully_expanded_type(ty, self.session);

        if let Some(serializer) = self.overridden_serializer(&ty) {
            return Some(serializer);
        }
        if ty.is_type_parameter() {
            return None;
        }
        if ty.is_array() {
            return self.builtin(builtins::REFERENCE_ARRAY);
        }

        let symbol = regular_class_symbol(&ty, self.session);

        if let Some(symbol) = symbol {
            if self.is_generated_serializable_object(symbol) {
                return self.builtin(builtins::OBJECT);
            }
        }

        if let Some(serializer) = self
            .standard_serializer(&ty)
            .or_else(|| symbol.and_then(|symbol| self.enum_serializer(symbol)))
        {
            return Some(serializer);
        }

        let symbol = symbol?;
        let flags = self.session.class_flags(symbol);
        if flags.is_sealed_interface() && self.is_serializable(symbol) {
            return self.builtin(builtins::POLYMORPHIC);
        }

        self.session.companion_serializer(symbol)
    }

    /// The serializer a class declares for itself through `@Serializable(with = S::class)`.
    pub fn declared_serializer(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.serializable_with(&self.session.class_annotations(symbol))
    }

    fn builtin(&self, id: SerializerId) -> Option<SymbolId> {
        self.builtins.symbol(id, self.session)
    }

    fn standard_serializer(&self, ty: &TypeDescriptor) -> Option<SymbolId> {
        let id = match ty.primitive_kind() {
            Some(kind) => builtins::lookup_primitive(kind),
            None => builtins::lookup_by_qualified_name(ty.class_id()?.fq_name()),
        }?;
        self.builtin(id)
    }

    fn enum_serializer(&self, symbol: SymbolId) -> Option<SymbolId> {
        let flags = self.session.class_flags(symbol);
        if flags.contains(ClassFlags::ENUM_CLASS)
            && !self.session.uses_legacy_enum_serializer(symbol)
        {
            self.builtin(builtins::ENUM)
        } else {
            None
        }
    }

    /// `@Serializable(with = S::class)` on a type use, then on the type's class declaration.
    fn overridden_serializer(&self, ty: &TypeDescriptor) -> Option<SymbolId> {
        self.serializable_with(&ty.annotations).or_else(|| {
            self.declared_serializer(regular_class_symbol(ty, self.session)?)
        })
    }

    fn serializable_with(&self, declared: &[Annotation]) -> Option<SymbolId> {
        let serializer = declared
            .iter()
            .find(|annotation| annotation.class_id == annotations::SERIALIZABLE)?
            .first_class_literal()?;

        class_symbol_or_upper_bound(serializer, self.session)
    }

    /// Context serializer for `@Contextual`, polymorphic serializer for `@Polymorphic`.
    fn special_serializer(&self, declared: &[Annotation]) -> Option<SymbolId> {
        let has = |class_id: &ClassId| {
            declared
                .iter()
                .any(|annotation| &annotation.class_id == class_id)
        };

        if has(&annotations::CONTEXTUAL) || has(&annotations::CONTEXTUAL_ON_PROPERTY) {
            self.builtin(builtins::CONTEXT)
        } else if has(&annotations::POLYMORPHIC) {
            self.builtin(builtins::POLYMORPHIC)
        } else {
            None
        }
    }

    fn is_generated_serializable_object(&self, symbol: SymbolId) -> bool {
        if !self.session.class_flags(symbol).contains(ClassFlags::OBJECT) {
            return false;
        }

        self.is_serializable(symbol) && self.declared_serializer(symbol).is_none()
    }

    /// `@Serializable` directly, or through an annotation that is itself `@MetaSerializable`.
    pub fn is_serializable(&self, symbol: SymbolId) -> bool {
        self.session
            .class_annotations(symbol)
            .iter()
            .any(|annotation| {
                annotation.class_id == annotations::SERIALIZABLE
                    || self
                        .session
                        .class_symbol(&annotation.class_id)
                        .is_some_and(|annotation_class| {
                            self.session
                                .class_annotations(annotation_class)
                                .iter()
                                .any(|meta| meta.class_id == annotations::META_SERIALIZABLE)
                        })
            })
    }
}
