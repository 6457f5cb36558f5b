//! Fixed serializers shipped with the serialization runtime.

use serialink_core::{ClassId, SymbolId, service::SymbolResolution, ty::PrimitiveKind};

use crate::config::ResolverConfig;

/// Identity of a builtin serializer class, before it is resolved to a symbol.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SerializerId {
    pub name: &'static str,
    home: Home,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
enum Home {
    Runtime,
    Internal,
    /// Looked up in the internal package first, then the public one
    Either,
}

impl SerializerId {
    const fn runtime(name: &'static str) -> Self {
        Self {
            name,
            home: Home::Runtime,
        }
    }

    const fn internal(name: &'static str) -> Self {
        Self {
            name,
            home: Home::Internal,
        }
    }

    const fn either(name: &'static str) -> Self {
        Self {
            name,
            home: Home::Either,
        }
    }
}

pub const REFERENCE_ARRAY: SerializerId = SerializerId::internal("ReferenceArraySerializer");
pub const OBJECT: SerializerId = SerializerId::internal("ObjectSerializer");
pub const ENUM: SerializerId = SerializerId::internal("EnumSerializer");
pub const POLYMORPHIC: SerializerId = SerializerId::runtime("PolymorphicSerializer");
pub const CONTEXT: SerializerId = SerializerId::runtime("ContextSerializer");

pub fn lookup_primitive(kind: PrimitiveKind) -> Option<SerializerId> {
    let name = match kind {
        PrimitiveKind::Boolean => "BooleanSerializer",
        PrimitiveKind::Byte => "ByteSerializer",
        PrimitiveKind::Short => "ShortSerializer",
        PrimitiveKind::Int => "IntSerializer",
        PrimitiveKind::Long => "LongSerializer",
        PrimitiveKind::Float => "FloatSerializer",
        PrimitiveKind::Double => "DoubleSerializer",
        PrimitiveKind::Char => "CharSerializer",
    };
    Some(SerializerId::either(name))
}

pub fn lookup_by_qualified_name(fq_name: &str) -> Option<SerializerId> {
    let name = match fq_name {
        "core.Unit" => "UnitSerializer",
        "core.Nothing" => "NothingSerializer",
        "core.Boolean" => "BooleanSerializer",
        "core.Byte" => "ByteSerializer",
        "core.Short" => "ShortSerializer",
        "core.Int" => "IntSerializer",
        "core.Long" => "LongSerializer",
        "core.Float" => "FloatSerializer",
        "core.Double" => "DoubleSerializer",
        "core.Char" => "CharSerializer",
        "core.UByte" => "UByteSerializer",
        "core.UShort" => "UShortSerializer",
        "core.UInt" => "UIntSerializer",
        "core.ULong" => "ULongSerializer",
        "core.String" => "StringSerializer",
        "core.Pair" => "PairSerializer",
        "core.Triple" => "TripleSerializer",
        "core.collections.Collection"
        | "core.collections.List"
        | "core.collections.ArrayList"
        | "core.collections.MutableList" => "ArrayListSerializer",
        "core.collections.Set"
        | "core.collections.LinkedHashSet"
        | "core.collections.MutableSet" => "LinkedHashSetSerializer",
        "core.collections.HashSet" => "HashSetSerializer",
        "core.collections.Map"
        | "core.collections.LinkedHashMap"
        | "core.collections.MutableMap" => "LinkedHashMapSerializer",
        "core.collections.HashMap" => "HashMapSerializer",
        "core.collections.Map.Entry" => "MapEntrySerializer",
        "core.BooleanArray" => "BooleanArraySerializer",
        "core.ByteArray" => "ByteArraySerializer",
        "core.ShortArray" => "ShortArraySerializer",
        "core.IntArray" => "IntArraySerializer",
        "core.LongArray" => "LongArraySerializer",
        "core.FloatArray" => "FloatArraySerializer",
        "core.DoubleArray" => "DoubleArraySerializer",
        "core.CharArray" => "CharArraySerializer",
        "core.UByteArray" => "UByteArraySerializer",
        "core.UShortArray" => "UShortArraySerializer",
        "core.UIntArray" => "UIntArraySerializer",
        "core.ULongArray" => "ULongArraySerializer",
        "core.time.Duration" => "DurationSerializer",
        "core.uuid.Uuid" => "UuidSerializer",
        _ => return None,
    };
    Some(SerializerId::either(name))
}

/// Resolves [SerializerId]s to the session's symbols.
pub struct BuiltinSerializers {
    config: ResolverConfig,
}

impl BuiltinSerializers {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn class_id(&self, id: SerializerId) -> ClassId {
        match id.home {
            Home::Runtime => ClassId::new(&self.config.runtime_package, id.name),
            Home::Internal | Home::Either => ClassId::new(&self.config.internal_package, id.name),
        }
    }

    /// Find the symbol of a builtin serializer. `None` if the runtime on the classpath lacks it.
    pub fn symbol<S>(&self, id: SerializerId, session: &S) -> Option<SymbolId>
    where
        S: SymbolResolution + ?Sized,
    {
        match id.home {
            Home::Runtime | Home::Internal => session.class_symbol(&self.class_id(id)),
            Home::Either => session
                .class_symbol(&ClassId::new(&self.config.internal_package, id.name))
                .or_else(|| {
                    session.class_symbol(&ClassId::new(&self.config.runtime_package, id.name))
                }),
        }
    }
}

impl Default for BuiltinSerializers {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
