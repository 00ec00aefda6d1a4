//! In-memory reference host.
//!
//! [`MemoryHost`] owns a [`CompilationUnit`] and implements every host
//! operation against it. It backs the crate's tests and serves as a template
//! for adapters to real compiler trees.

use tracing::trace;

use crate::ast::{Expr, Literal, MethodDecl, MethodKind, Modifiers, Param, Stmt, TypeExpr};
use crate::config::SynthConfig;
use crate::directive::DirectiveId;
use crate::error::HostError;
use crate::extract::{RawMember, RawType};
use crate::host::{Host, MemberExists, NodeFactory};
use crate::model::{FieldDescriptor, TypeDescriptor};

/// A source file: its imports and type declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Qualified import names.
    pub imports: Vec<String>,
    /// Declared types, nested ones included.
    pub types: Vec<RawType>,
}

impl CompilationUnit {
    /// A unit holding `types` and no imports.
    #[must_use]
    pub const fn with_types(types: Vec<RawType>) -> Self {
        Self {
            imports: Vec::new(),
            types,
        }
    }

    /// Adds an import.
    #[must_use]
    pub fn import(mut self, qualified_name: impl Into<String>) -> Self {
        self.imports.push(qualified_name.into());
        self
    }
}

/// Renders `Name(T1, T2)` for duplicate detection and diagnostics.
fn signature(method: &MethodDecl) -> String {
    let types: Vec<String> = method.param_types().map(ToString::to_string).collect();
    format!("{}({})", method.name, types.join(", "))
}

/// Host over an owned compilation unit.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    unit: CompilationUnit,
    null_exception: String,
    processed: Vec<DirectiveId>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(CompilationUnit::default())
    }
}

impl MemoryHost {
    /// A host using default settings.
    #[must_use]
    pub fn new(unit: CompilationUnit) -> Self {
        Self::with_config(unit, &SynthConfig::default())
    }

    /// A host whose null guards throw the configured exception type.
    #[must_use]
    pub fn with_config(unit: CompilationUnit, config: &SynthConfig) -> Self {
        Self {
            unit,
            null_exception: config.null_exception.clone(),
            processed: Vec::new(),
        }
    }

    /// The current state of the unit.
    #[must_use]
    pub const fn unit(&self) -> &CompilationUnit {
        &self.unit
    }

    /// Looks up a type by qualified name, such as `Point` or
    /// `Order.Builder`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownType`] when no such type is declared.
    pub fn type_decl(&self, name: &str) -> Result<&RawType, HostError> {
        self.unit
            .types
            .iter()
            .find(|ty| ty.qualified_name() == name)
            .ok_or_else(|| HostError::UnknownType(name.to_owned()))
    }

    /// Members injected into the type with qualified name `name` so far, in
    /// injection order.
    #[must_use]
    pub fn generated(&self, name: &str) -> Vec<&MethodDecl> {
        self.type_decl(name)
            .map(|ty| {
                ty.methods()
                    .filter_map(|(decl, generated)| generated.then_some(decl))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Directives reported as processed, in order.
    #[must_use]
    pub fn processed(&self) -> &[DirectiveId] {
        &self.processed
    }

    fn type_decl_mut(&mut self, name: &str) -> Result<&mut RawType, HostError> {
        self.unit
            .types
            .iter_mut()
            .find(|ty| ty.qualified_name() == name)
            .ok_or_else(|| HostError::UnknownType(name.to_owned()))
    }
}

impl NodeFactory for MemoryHost {
    fn parameter(&self, name: &str, ty: TypeExpr, modifiers: Modifiers) -> Result<Param, HostError> {
        if ty.is_void() {
            return Err(HostError::InvalidParameterType {
                param: name.to_owned(),
                ty: ty.to_string(),
            });
        }
        Ok(Param {
            modifiers,
            name: name.to_owned(),
            ty,
        })
    }

    /// `if (<name> == null) throw new <exception>("<name>");`, declined for
    /// primitive types.
    fn null_guard(&self, field: &FieldDescriptor) -> Result<Option<Stmt>, HostError> {
        if field.declared_type.is_primitive() {
            trace!(field = %field.name, "no null guard for primitive field");
            return Ok(None);
        }
        let throw = Stmt::Throw(Expr::New {
            ty: TypeExpr::named(&self.null_exception),
            args: vec![Expr::string(&field.name)],
        });
        Ok(Some(Stmt::If {
            cond: Expr::Eq(
                Box::new(Expr::ident(&field.name)),
                Box::new(Expr::Lit(Literal::Null)),
            ),
            then: Box::new(throw),
        }))
    }
}

impl Host for MemoryHost {
    fn existing_constructor(&self, ty: &TypeDescriptor) -> MemberExists {
        let Ok(decl) = self.type_decl(&ty.qualified_name()) else {
            return MemberExists::NotExists;
        };
        let mut result = MemberExists::NotExists;
        for (_, generated) in decl.methods().filter(|(method, _)| method.is_constructor()) {
            if !generated {
                return MemberExists::ExistsByUser;
            }
            result = MemberExists::ExistsGenerated;
        }
        result
    }

    fn inject_member(&mut self, ty: &TypeDescriptor, method: MethodDecl) -> Result<(), HostError> {
        let owner = ty.qualified_name();
        let decl = self.type_decl_mut(&owner)?;
        let wanted = signature(&method);
        let clashes = decl.methods().any(|(existing, _)| {
            matches!(
                (&existing.kind, &method.kind),
                (MethodKind::Constructor, MethodKind::Constructor)
                    | (MethodKind::Method { .. }, MethodKind::Method { .. })
            ) && signature(existing) == wanted
        });
        if clashes {
            return Err(HostError::DuplicateMember {
                owner,
                signature: wanted,
            });
        }
        trace!(ty = %owner, member = %wanted, "member injected");
        decl.members.push(RawMember::Method {
            decl: method,
            generated: true,
        });
        Ok(())
    }

    fn mark_processed(&mut self, directive: &DirectiveId) {
        self.processed.push(directive.clone());
    }

    fn remove_unused_import(&mut self, qualified_name: &str) {
        self.unit.imports.retain(|import| import != qualified_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Visibility;
    use crate::extract::RawField;
    use anyhow::{Result, ensure};

    fn constructor(owner: &str, params: Vec<Param>, body: Vec<Stmt>) -> MethodDecl {
        MethodDecl {
            modifiers: Modifiers::with_visibility(Visibility::Public),
            name: owner.to_owned(),
            kind: MethodKind::Constructor,
            type_params: Vec::new(),
            params,
            body,
        }
    }

    fn int_param(name: &str) -> Param {
        Param {
            modifiers: Modifiers::final_with(Vec::new()),
            name: name.to_owned(),
            ty: TypeExpr::named("int"),
        }
    }

    fn descriptor(name: &str) -> TypeDescriptor {
        TypeDescriptor {
            name: name.to_owned(),
            type_params: Vec::new(),
            annotations: Vec::new(),
            enclosing: Vec::new(),
            is_static: false,
            fields: Vec::new(),
        }
    }

    #[test]
    fn reports_user_written_constructors() {
        let ty = RawType::new("Point").method(constructor("Point", Vec::new(), Vec::new()));
        let host = MemoryHost::new(CompilationUnit::with_types(vec![ty]));
        assert_eq!(
            host.existing_constructor(&descriptor("Point")),
            MemberExists::ExistsByUser
        );
    }

    #[test]
    fn distinguishes_generated_constructors() -> Result<()> {
        let mut host = MemoryHost::new(CompilationUnit::with_types(vec![RawType::new("Point")]));
        let point = descriptor("Point");
        ensure!(host.existing_constructor(&point) == MemberExists::NotExists);
        host.inject_member(&point, constructor("Point", Vec::new(), Vec::new()))?;
        ensure!(host.existing_constructor(&point) == MemberExists::ExistsGenerated);
        Ok(())
    }

    #[test]
    fn rejects_duplicate_signatures() -> Result<()> {
        let ty = RawType::new("Point")
            .method(constructor("Point", vec![int_param("a"), int_param("b")], Vec::new()));
        let mut host = MemoryHost::new(CompilationUnit::with_types(vec![ty]));
        let err = host
            .inject_member(
                &descriptor("Point"),
                constructor("Point", vec![int_param("x"), int_param("y")], Vec::new()),
            )
            .err();
        ensure!(
            matches!(&err, Some(HostError::DuplicateMember { signature, .. }) if signature == "Point(int, int)"),
            "unexpected {err:?}"
        );
        Ok(())
    }

    #[test]
    fn rejects_void_parameters() {
        let host = MemoryHost::default();
        let result = host.parameter(
            "nothing",
            TypeExpr::named("void"),
            Modifiers::final_with(Vec::new()),
        );
        assert!(matches!(result, Err(HostError::InvalidParameterType { .. })));
    }

    #[test]
    fn declines_guards_for_primitives() -> Result<()> {
        let host = MemoryHost::default();
        let extractor = crate::extract::Extractor::from(&SynthConfig::default());
        let count = extractor.describe(&RawField::new("count", TypeExpr::named("int")));
        ensure!(host.null_guard(&count)?.is_none());
        let name = extractor.describe(&RawField::new("name", TypeExpr::named("String")));
        let guard = host
            .null_guard(&name)?
            .map(|stmt| stmt.to_string())
            .unwrap_or_default();
        ensure!(
            guard == r#"if (name == null) throw new java.lang.NullPointerException("name");"#,
            "unexpected guard {guard}"
        );
        Ok(())
    }

    #[test]
    fn removes_only_the_named_import() {
        let unit = CompilationUnit::default()
            .import("lombok.AccessLevel")
            .import("java.util.List");
        let mut host = MemoryHost::new(unit);
        host.remove_unused_import("lombok.AccessLevel");
        host.remove_unused_import("lombok.AccessLevel");
        assert_eq!(host.unit().imports, ["java.util.List"]);
    }

    #[test]
    fn same_named_nested_types_are_kept_apart() -> Result<()> {
        let nested = |outer: &str| {
            RawType::new("Builder").enclosed_by(vec![
                crate::model::Enclosure::Type {
                    name: outer.to_owned(),
                },
                crate::model::Enclosure::CompilationUnit,
            ])
        };
        let unit = CompilationUnit::with_types(vec![nested("Order"), nested("Invoice")]);
        let mut host = MemoryHost::new(unit);
        let extractor = crate::extract::Extractor::from(&SynthConfig::default());
        let invoice = extractor.describe_type(&nested("Invoice"));
        host.inject_member(&invoice, constructor("Builder", Vec::new(), Vec::new()))?;
        ensure!(host.generated("Order.Builder").is_empty(), "injected into the wrong type");
        ensure!(host.generated("Invoice.Builder").len() == 1, "member missing");
        let order = extractor.describe_type(&nested("Order"));
        ensure!(host.existing_constructor(&order) == MemberExists::NotExists);
        ensure!(host.existing_constructor(&invoice) == MemberExists::ExistsGenerated);
        Ok(())
    }

    #[test]
    fn injecting_into_unknown_types_fails() {
        let mut host = MemoryHost::default();
        let result = host.inject_member(&descriptor("Ghost"), constructor("Ghost", Vec::new(), Vec::new()));
        assert!(matches!(result, Err(HostError::UnknownType(name)) if name == "Ghost"));
    }
}
