use serialink_core::{names::annotations, ty::TypeDescriptor};
use tracing::debug;

use super::{CheckCtx, CheckError, CheckRule, ClassDecl, Declaration, PropertyDecl};

impl CheckRule {
    pub(super) fn run(self, declaration: Declaration, ctx: &mut CheckCtx) {
        match (self, declaration) {
            (Self::FileAnnotationsWellFormed, Declaration::File(file)) => {
                ctx.resolver.contextual_types(file);
                if let Err(error) = ctx.resolver.additional_serializers(file) {
                    ctx.report_internal(error, None);
                }
            }
            (Self::SerializableClassProperties, Declaration::Class(class)) => {
                check_class_properties(class, ctx);
            }
            (Self::PropertyTypeSerializable, Declaration::Property(property)) => {
                if has_explicit_serialization(property) {
                    return;
                }
                check_type(&property.ty, property, ctx);
            }
            (rule, declaration) => {
                debug!("{rule:?} does not apply to {:?}", declaration.kind());
            }
        }
    }
}

fn check_class_properties(class: &ClassDecl, ctx: &mut CheckCtx) {
    let resolver = ctx.resolver;
    if !resolver.is_serializable(class.symbol) || resolver.declared_serializer(class.symbol).is_some()
    {
        return;
    }

    for property in &class.properties {
        ctx.check(Declaration::Property(property));
    }
}

/// Transient properties are not serialized, the others pick their own serializer.
fn has_explicit_serialization(property: &PropertyDecl) -> bool {
    property.annotations.iter().any(|annotation| {
        annotation.class_id == annotations::TRANSIENT
            || annotation.class_id == annotations::CONTEXTUAL
            || annotation.class_id == annotations::CONTEXTUAL_ON_PROPERTY
            || (annotation.class_id == annotations::SERIALIZABLE
                && annotation.first_class_literal().is_some())
    })
}

fn check_type(ty: &TypeDescriptor, property: &PropertyDecl, ctx: &mut CheckCtx) {
    // serializers for type parameters are supplied by whoever instantiates the class
    if ty.is_type_parameter() {
        return;
    }

    match ctx.resolver.resolve_serializer_or_context(ty, property.file) {
        Ok(Some(_)) => {}
        Ok(None) => {
            ctx.report(
                CheckError::SerializerNotFound { ty: ty.clone() },
                property.file,
                Some(property),
            );
            return;
        }
        Err(error) => {
            ctx.report_internal(error, Some(property));
            return;
        }
    }

    for arg in &ty.args {
        check_type(arg, property, ctx);
    }
}
