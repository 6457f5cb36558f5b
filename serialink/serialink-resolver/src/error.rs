use serialink_core::{FileId, names::annotations, ty::TypeDescriptor};
use thiserror::Error;

/// A file-level serializer registration that the compiler should have rejected earlier.
///
/// This is an internal consistency failure, never a user-facing "no serializer" result.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum MalformedRegistration {
    #[error(
        "argument `{serializer}` for {annotation} in {file:?} does not implement the serializer contract or does not provide a serializer for a concrete type",
        annotation = annotations::USE_SERIALIZERS
    )]
    NoTargetType {
        file: FileId,
        serializer: TypeDescriptor,
    },
    #[error(
        "argument `{serializer}` for {annotation} in {file:?} is not a known class",
        annotation = annotations::USE_SERIALIZERS
    )]
    UnknownSerializerClass {
        file: FileId,
        serializer: TypeDescriptor,
    },
    #[error(
        "serializer `{serializer}` in {file:?} targets `{target}`, which has no class declaration"
    )]
    UnknownTargetClass {
        file: FileId,
        serializer: TypeDescriptor,
        target: TypeDescriptor,
    },
}

impl MalformedRegistration {
    pub fn file(&self) -> FileId {
        match self {
            Self::NoTargetType { file, .. }
            | Self::UnknownSerializerClass { file, .. }
            | Self::UnknownTargetClass { file, .. } => *file,
        }
    }
}
