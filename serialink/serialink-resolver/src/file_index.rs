//! Per-file indices derived from file-level serialization annotations.
//!
//! Each index is computed at most once per file and session, then shared.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use serialink_core::{
    FileId, SymbolId,
    names::annotations,
    service::SerializationSession,
    ty::{TypeDescriptor, TypeKey},
    vec_map::VecMap,
};
use tracing::{debug, debug_span};

use crate::{
    error::MalformedRegistration,
    expand::{class_symbol_or_upper_bound, fully_expanded_type, regular_class_symbol},
};

/// Types that a file defers to the context serializer.
#[derive(Default, Debug)]
pub struct ContextualTypes {
    types: IndexSet<TypeKey, FnvBuildHasher>,
}

impl ContextualTypes {
    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.types.contains(&ty.key())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Serializers supplied at file level, keyed by the serialized class and its nullability.
#[derive(Default, Debug)]
pub struct AdditionalSerializers {
    bindings: IndexMap<(SymbolId, bool), SymbolId, FnvBuildHasher>,
}

impl AdditionalSerializers {
    pub fn get(&self, symbol: SymbolId, nullable: bool) -> Option<SymbolId> {
        self.bindings.get(&(symbol, nullable)).copied()
    }

    /// Bindings as `((target, nullable), serializer)`, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&(SymbolId, bool), &SymbolId)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

pub type AdditionalSerializersResult = Result<Arc<AdditionalSerializers>, MalformedRegistration>;

#[derive(Default)]
struct FileSlot {
    contextual: OnceLock<Arc<ContextualTypes>>,
    additional: OnceLock<AdditionalSerializersResult>,
}

/// Memoized annotation indices for every file of a compilation session.
///
/// The slot table lock only covers slot allocation, annotation scanning happens
/// inside the slot's own once-cells.
#[derive(Default)]
pub struct FileAnnotationIndex {
    slots: Mutex<VecMap<FileId, Arc<FileSlot>>>,
}

impl FileAnnotationIndex {
    pub fn contextual_types<S>(&self, session: &S, file: FileId) -> Arc<ContextualTypes>
    where
        S: SerializationSession + ?Sized,
    {
        self.slot(file)
            .contextual
            .get_or_init(|| Arc::new(build_contextual_types(session, file)))
            .clone()
    }

    pub fn additional_serializers<S>(&self, session: &S, file: FileId) -> AdditionalSerializersResult
    where
        S: SerializationSession + ?Sized,
    {
        self.slot(file)
            .additional
            .get_or_init(|| build_additional_serializers(session, file).map(Arc::new))
            .clone()
    }

    fn slot(&self, file: FileId) -> Arc<FileSlot> {
        // The table is only ever grown, so a poisoned lock still holds consistent data
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get_or_insert_with(file, Default::default).clone()
    }
}

fn build_contextual_types<S>(session: &S, file: FileId) -> ContextualTypes
where
    S: SerializationSession + ?Sized,
{
    let _entered = debug_span!("contextual_types", ?file).entered();

    let types: IndexSet<TypeKey, FnvBuildHasher> = session
        .file_annotations(file)
        .iter()
        .filter(|annotation| {
            annotation.class_id == annotations::CONTEXTUAL
                || annotation.class_id == annotations::USE_CONTEXTUAL_SERIALIZATION
        })
        .flat_map(|annotation| annotation.class_literals())
        .map(|ty| fully_expanded_type(ty, session).key())
        .collect();

    debug!("{} contextual types", types.len());

    ContextualTypes { types }
}

fn build_additional_serializers<S>(
    session: &S,
    file: FileId,
) -> Result<AdditionalSerializers, MalformedRegistration>
where
    S: SerializationSession + ?Sized,
{
    let _entered = debug_span!("additional_serializers", ?file).entered();

    let mut bindings = IndexMap::default();
    let occurrences = session
        .file_annotations(file)
        .into_iter()
        .filter(|annotation| annotation.class_id == annotations::USE_SERIALIZERS);

    for annotation in occurrences {
        for literal in annotation.class_literals() {
            let serializer_ty = fully_expanded_type(literal, session);
            let serializer = class_symbol_or_upper_bound(&serializer_ty, session).ok_or_else(|| {
                MalformedRegistration::UnknownSerializerClass {
                    file,
                    serializer: serializer_ty.clone(),
                }
            })?;

            let target = session
                .serializer_for_type(serializer)
                .map(|target| fully_expanded_type(&target, session))
                .ok_or_else(|| MalformedRegistration::NoTargetType {
                    file,
                    serializer: serializer_ty.clone(),
                })?;

            // a serializer for a bare type parameter has no class to bind to
            let target_symbol = regular_class_symbol(&target, session).ok_or_else(|| {
                MalformedRegistration::UnknownTargetClass {
                    file,
                    serializer: serializer_ty.clone(),
                    target: target.clone(),
                }
            })?;

            // later registrations replace earlier ones for the same key
            bindings.insert((target_symbol, target.nullable), serializer);
        }
    }

    debug!("{} additional serializers", bindings.len());

    Ok(AdditionalSerializers { bindings })
}
