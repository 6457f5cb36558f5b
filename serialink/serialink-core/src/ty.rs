use std::fmt::{Debug, Display};

use thin_vec::ThinVec;

use crate::{ClassId, TypeParamId, annotation::Annotation, names};

/// A fully resolved type as produced by the compiler's type system.
///
/// The serialization plugin never mutates a descriptor, it only derives new ones
/// (e.g. with nullability stripped).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub nullable: bool,
    pub args: ThinVec<TypeDescriptor>,
    /// Type-use-site annotations, e.g. `List<@Contextual Date>`
    pub annotations: ThinVec<Annotation>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeKind {
    Class(ClassId),
    /// A type alias that has not been expanded yet
    Alias(ClassId),
    TypeParameter(TypeParamId),
    /// Platform type whose nullability is unknown: anything between `lower` and `upper`
    Flexible {
        lower: Box<TypeDescriptor>,
        upper: Box<TypeDescriptor>,
    },
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

/// Nominal identity of a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Nominal {
    Class(ClassId),
    TypeParameter(TypeParamId),
}

/// The part of a type that matters for per-file caches: nominal identity and nullability.
///
/// Type arguments and annotations are not part of the key.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeKey {
    pub nominal: Nominal,
    pub nullable: bool,
}

impl TypeDescriptor {
    pub fn class(class_id: ClassId) -> Self {
        Self::from_kind(TypeKind::Class(class_id))
    }

    pub fn alias(class_id: ClassId) -> Self {
        Self::from_kind(TypeKind::Alias(class_id))
    }

    pub fn type_parameter(id: TypeParamId) -> Self {
        Self::from_kind(TypeKind::TypeParameter(id))
    }

    pub fn flexible(lower: TypeDescriptor, upper: TypeDescriptor) -> Self {
        Self::from_kind(TypeKind::Flexible {
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::class(kind.class_id())
    }

    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::class(names::ARRAY).with_args([element])
    }

    fn from_kind(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
            args: ThinVec::new(),
            annotations: ThinVec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_nullability(&self, nullable: bool) -> Self {
        Self {
            nullable,
            ..self.clone()
        }
    }

    pub fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub fn is_type_parameter(&self) -> bool {
        matches!(self.kind, TypeKind::TypeParameter(_))
    }

    pub fn is_array(&self) -> bool {
        self.class_id() == Some(&names::ARRAY)
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        self.class_id().and_then(PrimitiveKind::from_class_id)
    }

    /// The class id of a plain class type. Aliases, type parameters and flexible types have none.
    pub fn class_id(&self) -> Option<&ClassId> {
        match &self.kind {
            TypeKind::Class(class_id) => Some(class_id),
            _ => None,
        }
    }

    pub fn upper_bound_if_flexible(&self) -> &TypeDescriptor {
        match &self.kind {
            TypeKind::Flexible { upper, .. } => upper.upper_bound_if_flexible(),
            _ => self,
        }
    }

    pub fn nominal(&self) -> Nominal {
        match &self.kind {
            TypeKind::Class(class_id) | TypeKind::Alias(class_id) => {
                Nominal::Class(class_id.clone())
            }
            TypeKind::TypeParameter(id) => Nominal::TypeParameter(*id),
            TypeKind::Flexible { lower, .. } => lower.nominal(),
        }
    }

    pub fn key(&self) -> TypeKey {
        TypeKey {
            nominal: self.nominal(),
            nullable: self.nullable,
        }
    }

    pub fn has_annotation(&self, class_id: &ClassId) -> bool {
        self.annotations
            .iter()
            .any(|annotation| &annotation.class_id == class_id)
    }

    pub fn find_annotation(&self, class_id: &ClassId) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| &annotation.class_id == class_id)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Class(class_id) | TypeKind::Alias(class_id) => {
                write!(f, "{}", class_id.short_name())?
            }
            TypeKind::TypeParameter(id) => write!(f, "T{}", id.0)?,
            TypeKind::Flexible { lower, .. } => write!(f, "{lower}!")?,
        }

        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }

        if self.nullable {
            f.write_str("?")?;
        }

        Ok(())
    }
}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{self}`")
    }
}
