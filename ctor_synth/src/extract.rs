//! Field descriptor extraction.
//!
//! Hosts describe a type's direct members as [`RawMember`] values. The
//! extractor keeps the fields, drops synthetic `$`-prefixed ones and
//! classifies the remainder into [`FieldDescriptor`]s.

use uncased::UncasedStr;

use crate::ast::{Annotation, MethodDecl, TypeExpr, TypeParam, simple_name};
use crate::model::{Enclosure, FieldDescriptor, TypeDescriptor, Visibility, qualified_name};

/// Prefix reserved for compiler-internal members.
pub const SYNTHETIC_PREFIX: char = '$';

/// Modifier flags read from a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierFlags {
    /// `static`
    pub is_static: bool,
    /// `final`
    pub is_final: bool,
    /// Declared access.
    pub access: Visibility,
}

impl Default for ModifierFlags {
    fn default() -> Self {
        Self {
            is_static: false,
            is_final: false,
            access: Visibility::Package,
        }
    }
}

/// A field declaration as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field identifier.
    pub name: String,
    /// Declared type.
    pub ty: TypeExpr,
    /// Modifier flags.
    pub modifiers: ModifierFlags,
    /// Whether an initializer expression is present.
    pub has_initializer: bool,
    /// All annotations on the field, in source order.
    pub annotations: Vec<Annotation>,
}

impl RawField {
    /// A package-private, non-final field without annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: ModifierFlags::default(),
            has_initializer: false,
            annotations: Vec::new(),
        }
    }

    /// Marks the field `final`.
    #[must_use]
    pub const fn final_(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Marks the field `static`.
    #[must_use]
    pub const fn static_(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Marks the field as initialized inline.
    #[must_use]
    pub const fn initialized(mut self) -> Self {
        self.has_initializer = true;
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A direct member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMember {
    /// A field.
    Field(RawField),
    /// A method or constructor.
    Method {
        /// The declaration.
        decl: MethodDecl,
        /// Whether an earlier generation step produced it.
        generated: bool,
    },
    /// A member type, by name.
    Type(String),
}

/// A type declaration as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawType {
    /// Simple name.
    pub name: String,
    /// Generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Annotations on the type itself.
    pub annotations: Vec<Annotation>,
    /// Enclosing declarations, innermost first.
    pub enclosing: Vec<Enclosure>,
    /// Whether the type is declared `static`.
    pub is_static: bool,
    /// Direct members in declaration order.
    pub members: Vec<RawMember>,
}

impl RawType {
    /// A top-level type without members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            annotations: Vec::new(),
            enclosing: vec![Enclosure::CompilationUnit],
            is_static: false,
            members: Vec::new(),
        }
    }

    /// Adds a generic parameter.
    #[must_use]
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    /// Adds an annotation on the type.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds a field member.
    #[must_use]
    pub fn field(mut self, field: RawField) -> Self {
        self.members.push(RawMember::Field(field));
        self
    }

    /// Adds a hand-written method or constructor.
    #[must_use]
    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.members.push(RawMember::Method {
            decl,
            generated: false,
        });
        self
    }

    /// Replaces the enclosure chain.
    #[must_use]
    pub fn enclosed_by(mut self, enclosing: Vec<Enclosure>) -> Self {
        self.enclosing = enclosing;
        self
    }

    /// Path identifying the type within its compilation unit, such as
    /// `Order.Builder`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.name, &self.enclosing)
    }

    /// Methods and constructors, with their origin.
    #[must_use]
    pub fn methods(&self) -> impl Iterator<Item = (&MethodDecl, bool)> {
        self.members.iter().filter_map(|member| match member {
            RawMember::Method { decl, generated } => Some((decl, *generated)),
            _ => None,
        })
    }
}

/// Reads the modifier flags of a field.
#[must_use]
pub const fn read_modifiers(field: &RawField) -> ModifierFlags {
    field.modifiers
}

/// A set of accepted spellings for one conceptual annotation.
///
/// Qualified annotation names match identical qualified entries. Simple
/// annotation names match any entry with the same simple name, ignoring
/// ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPattern {
    names: Vec<String>,
}

impl AnnotationPattern {
    /// Creates a pattern from its accepted spellings.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Returns `true` if `name` is one of the accepted spellings.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if name.contains('.') {
            return self.names.iter().any(|entry| entry == name);
        }
        let wanted = UncasedStr::new(name);
        self.names
            .iter()
            .any(|entry| UncasedStr::new(simple_name(entry)) == wanted)
    }
}

/// Returns the field's annotations matching `pattern`, in source order.
#[must_use]
pub fn read_annotations(field: &RawField, pattern: &AnnotationPattern) -> Vec<Annotation> {
    field
        .annotations
        .iter()
        .filter(|annotation| pattern.matches(&annotation.name))
        .cloned()
        .collect()
}

/// Patterns used to classify field annotations.
#[derive(Debug, Clone)]
pub struct Extractor {
    non_null: AnnotationPattern,
    nullable: AnnotationPattern,
}

impl Extractor {
    /// Creates an extractor with explicit patterns.
    #[must_use]
    pub const fn new(non_null: AnnotationPattern, nullable: AnnotationPattern) -> Self {
        Self { non_null, nullable }
    }

    /// Describes a single field.
    #[must_use]
    pub fn describe(&self, field: &RawField) -> FieldDescriptor {
        let flags = read_modifiers(field);
        FieldDescriptor {
            name: field.name.clone(),
            declared_type: field.ty.clone(),
            is_static: flags.is_static,
            is_final: flags.is_final,
            has_initializer: field.has_initializer,
            non_null: read_annotations(field, &self.non_null),
            nullable: read_annotations(field, &self.nullable),
        }
    }

    /// Describes every non-synthetic field among `members`, keeping
    /// declaration order.
    #[must_use]
    pub fn fields(&self, members: &[RawMember]) -> Vec<FieldDescriptor> {
        members
            .iter()
            .filter_map(|member| match member {
                RawMember::Field(field) if !field.name.starts_with(SYNTHETIC_PREFIX) => {
                    Some(self.describe(field))
                }
                _ => None,
            })
            .collect()
    }

    /// Describes a whole type declaration.
    #[must_use]
    pub fn describe_type(&self, raw: &RawType) -> TypeDescriptor {
        TypeDescriptor {
            name: raw.name.clone(),
            type_params: raw.type_params.clone(),
            annotations: raw.annotations.clone(),
            enclosing: raw.enclosing.clone(),
            is_static: raw.is_static,
            fields: self.fields(&raw.members),
        }
    }
}

impl From<&crate::config::SynthConfig> for Extractor {
    fn from(config: &crate::config::SynthConfig) -> Self {
        Self::new(config.non_null_pattern(), config.nullable_pattern())
    }
}
