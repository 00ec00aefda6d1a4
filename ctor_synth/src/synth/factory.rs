//! Static factory synthesis.
//!
//! A static method cannot see its type's generic parameters, so the factory
//! declares its own copies and every parameter type is rebound to them.

use crate::ast::{
    Expr, MethodDecl, MethodKind, Modifiers, Stmt, TypeExpr, TypeParam, TypeVar, VarScope,
    WildcardBound,
};
use crate::error::HostError;
use crate::host::{MethodParts, NodeFactory};
use crate::model::{GenerationRequest, TypeDescriptor};

use super::parameters;

/// Rewrites references to `params` so they point at the method's copies.
///
/// Names that are not among `params` pass through unchanged; composite types
/// are rebuilt argument by argument.
fn rebind(ty: &TypeExpr, params: &[TypeParam]) -> TypeExpr {
    let is_mirrored = |name: &str| params.iter().any(|param| param.name == name);
    match ty {
        TypeExpr::Named(name) | TypeExpr::Var(TypeVar { name, .. }) if is_mirrored(name) => {
            TypeExpr::Var(TypeVar {
                name: name.clone(),
                scope: VarScope::Method,
            })
        }
        TypeExpr::Named(_) | TypeExpr::Var(_) | TypeExpr::Wildcard(None) => ty.clone(),
        TypeExpr::Apply { base, args } => TypeExpr::Apply {
            base: Box::new(rebind(base, params)),
            args: args.iter().map(|arg| rebind(arg, params)).collect(),
        },
        TypeExpr::Array(elem) => TypeExpr::Array(Box::new(rebind(elem, params))),
        TypeExpr::Wildcard(Some(WildcardBound::Extends(bound))) => TypeExpr::Wildcard(Some(
            WildcardBound::Extends(Box::new(rebind(bound, params))),
        )),
        TypeExpr::Wildcard(Some(WildcardBound::Super(bound))) => TypeExpr::Wildcard(Some(
            WildcardBound::Super(Box::new(rebind(bound, params))),
        )),
    }
}

/// Copies the type's generic parameters onto the method, bounds included.
fn mirror_type_params(ty: &TypeDescriptor) -> Vec<TypeParam> {
    ty.type_params
        .iter()
        .map(|param| TypeParam {
            name: param.name.clone(),
            bounds: param
                .bounds
                .iter()
                .map(|bound| rebind(bound, &ty.type_params))
                .collect(),
        })
        .collect()
}

/// Builds `static <T..> Type<T..> name(params) { return new Type<T..>(args); }`.
pub(super) fn build<F: NodeFactory + ?Sized>(
    factory: &F,
    ty: &TypeDescriptor,
    request: &GenerationRequest,
    name: &str,
) -> Result<MethodDecl, HostError> {
    let type_params = mirror_type_params(ty);
    let params = parameters(factory, request.fields(), |declared| {
        rebind(declared, &ty.type_params)
    })?;
    let instance_type = rebind(&ty.self_type(), &ty.type_params);
    let args = request
        .fields()
        .iter()
        .map(|field| Expr::ident(&field.name))
        .collect();
    let body = vec![Stmt::Return(Expr::New {
        ty: instance_type.clone(),
        args,
    })];

    let mut modifiers = Modifiers::with_visibility(request.access());
    modifiers.is_static = true;

    factory.method(MethodParts {
        modifiers,
        name: name.to_owned(),
        kind: MethodKind::Method {
            returns: instance_type,
        },
        type_params,
        params,
        body,
    })
}
