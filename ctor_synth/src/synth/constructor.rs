//! Instance constructor synthesis.

use crate::ast::{Annotation, Expr, MethodDecl, MethodKind, Modifiers, Visibility};
use crate::error::HostError;
use crate::host::{MethodParts, NodeFactory};
use crate::model::{FieldDescriptor, GenerationRequest, TypeDescriptor};

use super::parameters;

/// Builds the constructor described by `request`.
///
/// Null guards for non-null fields come first, in field order, followed by
/// one assignment per field.
pub(super) fn build<F: NodeFactory + ?Sized>(
    factory: &F,
    ty: &TypeDescriptor,
    request: &GenerationRequest,
    property_metadata: &str,
) -> Result<MethodDecl, HostError> {
    let fields = request.fields();
    let params = parameters(factory, fields, |declared| declared.clone())?;

    let mut body = Vec::with_capacity(fields.len() * 2);
    for field in fields.iter().filter(|field| field.is_non_null()) {
        if let Some(guard) = factory.null_guard(field)? {
            body.push(guard);
        }
    }
    for field in fields {
        body.push(factory.assignment(&field.name, &field.name)?);
    }

    let access = request.constructor_access();
    let mut modifiers = Modifiers::with_visibility(access);
    if wants_property_metadata(ty, request, access) {
        modifiers
            .annotations
            .push(property_metadata_annotation(property_metadata, fields));
    }

    factory.method(MethodParts {
        modifiers,
        name: ty.name.clone(),
        kind: MethodKind::Constructor,
        type_params: Vec::new(),
        params,
        body,
    })
}

fn wants_property_metadata(
    ty: &TypeDescriptor,
    request: &GenerationRequest,
    access: Visibility,
) -> bool {
    !request.fields().is_empty()
        && !request.suppresses_property_metadata()
        && access != Visibility::Private
        && !ty.is_local()
}

fn property_metadata_annotation(name: &str, fields: &[FieldDescriptor]) -> Annotation {
    let names = fields.iter().map(|field| Expr::string(&field.name)).collect();
    Annotation {
        name: name.to_owned(),
        args: vec![Expr::ArrayInit(names)],
    }
}
