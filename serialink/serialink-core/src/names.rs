//! Well-known class ids of the standard library and of the serialization runtime annotations.

use crate::{ClassId, ty::PrimitiveKind};

macro_rules! class_id {
    ($package:literal, $name:literal) => {
        ClassId::from_static(
            arcstr::literal!(concat!($package, ".", $name)),
            $package.len(),
        )
    };
}

pub const BOOLEAN: ClassId = class_id!("core", "Boolean");
pub const BYTE: ClassId = class_id!("core", "Byte");
pub const SHORT: ClassId = class_id!("core", "Short");
pub const INT: ClassId = class_id!("core", "Int");
pub const LONG: ClassId = class_id!("core", "Long");
pub const FLOAT: ClassId = class_id!("core", "Float");
pub const DOUBLE: ClassId = class_id!("core", "Double");
pub const CHAR: ClassId = class_id!("core", "Char");
pub const STRING: ClassId = class_id!("core", "String");

/// The generic reference array. Primitive arrays (`core.IntArray` etc.) are ordinary classes.
pub const ARRAY: ClassId = class_id!("core", "Array");

/// Annotations recognized by the serialization plugin.
pub mod annotations {
    use crate::ClassId;

    /// `@Serializable` / `@Serializable(with = S::class)`
    pub const SERIALIZABLE: ClassId = class_id!("serial", "Serializable");
    /// Marks an annotation class whose usages count as `@Serializable`.
    pub const META_SERIALIZABLE: ClassId = class_id!("serial", "MetaSerializable");
    /// Defers a type to the context serializer, on a type use or a file.
    pub const CONTEXTUAL: ClassId = class_id!("serial", "Contextual");
    /// Property-level form of [CONTEXTUAL].
    pub const CONTEXTUAL_ON_PROPERTY: ClassId = class_id!("serial", "ContextualSerialization");
    /// File-level list of types that use the context serializer throughout the file.
    pub const USE_CONTEXTUAL_SERIALIZATION: ClassId =
        class_id!("serial", "UseContextualSerialization");
    pub const POLYMORPHIC: ClassId = class_id!("serial", "Polymorphic");
    /// File-level list of serializer classes that apply throughout the file.
    pub const USE_SERIALIZERS: ClassId = class_id!("serial", "UseSerializers");
    pub const TRANSIENT: ClassId = class_id!("serial", "Transient");
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Char,
    ];

    pub fn class_id(self) -> ClassId {
        match self {
            Self::Boolean => BOOLEAN,
            Self::Byte => BYTE,
            Self::Short => SHORT,
            Self::Int => INT,
            Self::Long => LONG,
            Self::Float => FLOAT,
            Self::Double => DOUBLE,
            Self::Char => CHAR,
        }
    }

    pub fn from_class_id(class_id: &ClassId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| &kind.class_id() == class_id)
    }
}
