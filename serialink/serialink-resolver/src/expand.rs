//! Type alias expansion and class symbol lookup on top of [SymbolResolution].

use fnv::FnvHashSet;
use serialink_core::{
    ClassId, SymbolId, TypeParamId,
    service::SymbolResolution,
    ty::{TypeDescriptor, TypeKind},
};

/// Expand type aliases until a non-alias type is reached.
///
/// Nullability and type-use annotations of each alias use carry over to the expansion.
/// An alias the session cannot expand is returned as-is.
pub fn fully_expanded_type<S>(ty: &TypeDescriptor, session: &S) -> TypeDescriptor
where
    S: SymbolResolution + ?Sized,
{
    let mut current = ty.clone();
    let mut visited: FnvHashSet<ClassId> = Default::default();

    while let TypeKind::Alias(alias) = &current.kind {
        if !visited.insert(alias.clone()) {
            break;
        }
        let Some(expanded) = session.expand_alias(alias) else {
            break;
        };

        let mut annotations = expanded.annotations.clone();
        annotations.extend(current.annotations.iter().cloned());

        current = TypeDescriptor {
            nullable: current.nullable || expanded.nullable,
            args: if expanded.args.is_empty() {
                current.args
            } else {
                expanded.args
            },
            kind: expanded.kind,
            annotations,
        };
    }

    current
}

/// The class declaration behind a type. Type parameters answer with their upper bound's class.
pub fn class_symbol_or_upper_bound<S>(ty: &TypeDescriptor, session: &S) -> Option<SymbolId>
where
    S: SymbolResolution + ?Sized,
{
    let mut visited_params: FnvHashSet<TypeParamId> = Default::default();
    let mut current = fully_expanded_type(ty, session);

    loop {
        match &current.kind {
            TypeKind::Class(class_id) => return session.class_symbol(class_id),
            TypeKind::Alias(_) => return None,
            TypeKind::TypeParameter(param) => {
                if !visited_params.insert(*param) {
                    return None;
                }
                let bound = session.type_param_upper_bound(*param)?;
                current = fully_expanded_type(&bound, session);
            }
            TypeKind::Flexible { lower, .. } => {
                current = fully_expanded_type(lower, session);
            }
        }
    }
}

/// The class declaration of a non-parameter type, without looking at bounds.
pub fn regular_class_symbol<S>(ty: &TypeDescriptor, session: &S) -> Option<SymbolId>
where
    S: SymbolResolution + ?Sized,
{
    if ty.upper_bound_if_flexible().is_type_parameter() || ty.is_type_parameter() {
        return None;
    }
    class_symbol_or_upper_bound(ty, session)
}
