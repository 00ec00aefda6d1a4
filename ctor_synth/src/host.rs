//! Operations the synthesis pipeline requires from the host compiler.
//!
//! [`NodeFactory`] builds AST nodes; the default methods construct the
//! tagged values directly and hosts override them to validate or decorate.
//! [`Host`] adds the queries and mutations performed on the type being
//! processed.
//!
//! Each pipeline invocation touches a single type and keeps no state of its
//! own between calls. Hosts that run invocations for different types
//! concurrently must make their implementations of these traits safe for
//! that use.

use crate::ast::{Expr, MethodDecl, MethodKind, Modifiers, Param, Stmt, TypeExpr, TypeParam};
use crate::directive::DirectiveId;
use crate::error::HostError;
use crate::model::{FieldDescriptor, TypeDescriptor};

/// Whether a constructor is already declared on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberExists {
    /// No constructor is declared.
    NotExists,
    /// A hand-written constructor is declared.
    ExistsByUser,
    /// A previously generated constructor is present.
    ExistsGenerated,
}

/// The pieces of a method declaration handed to [`NodeFactory::method`].
#[derive(Debug, Clone)]
pub struct MethodParts {
    /// Modifiers and annotations.
    pub modifiers: Modifiers,
    /// Method name; the owning type's name for constructors.
    pub name: String,
    /// Constructor or method with return type.
    pub kind: MethodKind,
    /// Method-level generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Formal parameters.
    pub params: Vec<Param>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

/// AST node construction.
pub trait NodeFactory {
    /// Builds a formal parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host cannot represent `ty` as a
    /// parameter type.
    fn parameter(&self, name: &str, ty: TypeExpr, modifiers: Modifiers) -> Result<Param, HostError> {
        Ok(Param {
            modifiers,
            name: name.to_owned(),
            ty,
        })
    }

    /// Builds `this.<field> = <param>;`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the statement cannot be built.
    fn assignment(&self, field: &str, param: &str) -> Result<Stmt, HostError> {
        Ok(Stmt::Assign {
            target: Expr::this_field(field),
            value: Expr::ident(param),
        })
    }

    /// Builds the null check for `field`'s parameter, or declines with
    /// `Ok(None)` when no check applies (for example to primitive types).
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the statement cannot be built.
    fn null_guard(&self, field: &FieldDescriptor) -> Result<Option<Stmt>, HostError>;

    /// Assembles a method declaration.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the declaration cannot be built.
    fn method(&self, parts: MethodParts) -> Result<MethodDecl, HostError> {
        Ok(MethodDecl {
            modifiers: parts.modifiers,
            name: parts.name,
            kind: parts.kind,
            type_params: parts.type_params,
            params: parts.params,
            body: parts.body,
        })
    }
}

/// Queries and mutations on the type being processed.
pub trait Host: NodeFactory {
    /// Reports whether `ty` already declares a constructor.
    fn existing_constructor(&self, ty: &TypeDescriptor) -> MemberExists;

    /// Adds `method` to `ty`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`], typically [`HostError::DuplicateMember`], when
    /// the member cannot be added.
    fn inject_member(&mut self, ty: &TypeDescriptor, method: MethodDecl) -> Result<(), HostError>;

    /// Records that the directive has been handled.
    fn mark_processed(&mut self, directive: &DirectiveId);

    /// Drops an import made redundant by handling a directive.
    fn remove_unused_import(&mut self, qualified_name: &str);
}
