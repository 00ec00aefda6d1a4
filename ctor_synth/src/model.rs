//! Request-scoped descriptions of the type being processed and of the
//! constructor to generate.

use serde::{Deserialize, Serialize};

use crate::ast::{Annotation, TypeExpr, TypeParam};

pub use crate::ast::Visibility;

/// Access level requested by a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// `public`
    #[default]
    Public,
    /// Module access; emitted as package-private.
    Module,
    /// `protected`
    Protected,
    /// Package-private.
    Package,
    /// `private`
    Private,
    /// Generate nothing.
    None,
}

impl AccessLevel {
    /// The emit-able visibility, or `None` when generation is disabled.
    #[must_use]
    pub const fn visibility(self) -> Option<Visibility> {
        match self {
            Self::Public => Some(Visibility::Public),
            Self::Module | Self::Package => Some(Visibility::Package),
            Self::Protected => Some(Visibility::Protected),
            Self::Private => Some(Visibility::Private),
            Self::None => None,
        }
    }

    /// Parses the constant name used in annotation arguments, e.g. `PACKAGE`.
    #[must_use]
    pub fn from_constant(name: &str) -> Option<Self> {
        let level = match name {
            "PUBLIC" => Self::Public,
            "MODULE" => Self::Module,
            "PROTECTED" => Self::Protected,
            "PACKAGE" => Self::Package,
            "PRIVATE" => Self::Private,
            "NONE" => Self::None,
            _ => return None,
        };
        Some(level)
    }
}

/// Summary of one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier.
    pub name: String,
    /// Declared type, as written.
    pub declared_type: TypeExpr,
    /// `static`
    pub is_static: bool,
    /// `final`
    pub is_final: bool,
    /// Whether the declaration carries an inline initializer.
    pub has_initializer: bool,
    /// Annotations matching the non-null pattern, in source order.
    pub non_null: Vec<Annotation>,
    /// Annotations matching the nullable pattern, in source order.
    pub nullable: Vec<Annotation>,
}

impl FieldDescriptor {
    /// Returns `true` when at least one non-null annotation is present.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        !self.non_null.is_empty()
    }

    /// Non-null annotations followed by nullable ones, as copied onto
    /// parameters.
    #[must_use]
    pub fn parameter_annotations(&self) -> Vec<Annotation> {
        self.non_null
            .iter()
            .chain(&self.nullable)
            .cloned()
            .collect()
    }
}

/// One link of the chain of declarations enclosing a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enclosure {
    /// The file-level boundary; always the last link.
    CompilationUnit,
    /// An enclosing type declaration.
    Type {
        /// Name of the enclosing type.
        name: String,
    },
    /// A method or constructor body.
    Method {
        /// Name of the enclosing method.
        name: String,
    },
    /// A static or instance initializer block.
    Initializer,
    /// The body of an anonymous class.
    Anonymous,
}

/// Where a type is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosingKind {
    /// Directly inside a compilation unit.
    TopLevel,
    /// A `static` member type.
    NestedStatic,
    /// A non-static member type.
    Inner,
    /// Declared inside a method, initializer or anonymous class.
    Local,
}

/// Returns `true` when `chain` passes through anything other than type
/// declarations before reaching the compilation unit.
///
/// `chain` runs from the innermost enclosure outwards. A chain that ends
/// without a compilation-unit link is treated as local.
#[must_use]
pub fn is_local(chain: &[Enclosure]) -> bool {
    match chain.split_first() {
        Some((Enclosure::CompilationUnit, _)) => false,
        Some((Enclosure::Type { .. }, rest)) => is_local(rest),
        _ => true,
    }
}

/// Dotted path naming a type through its enclosures, outermost first:
/// `Order.Builder`, or `App.main().Point` for a type local to `main`.
///
/// Two declarations share a path only when they are the same type, so the
/// path identifies a type within a compilation unit where the simple name
/// does not.
#[must_use]
pub fn qualified_name(name: &str, chain: &[Enclosure]) -> String {
    let mut segments: Vec<String> = chain
        .iter()
        .map_while(|link| match link {
            Enclosure::CompilationUnit => None,
            Enclosure::Type { name: outer } => Some(outer.clone()),
            Enclosure::Method { name: method } => Some(format!("{method}()")),
            Enclosure::Initializer => Some("<init>".to_owned()),
            Enclosure::Anonymous => Some("<anonymous>".to_owned()),
        })
        .collect();
    segments.reverse();
    segments.push(name.to_owned());
    segments.join(".")
}

/// The type a constructor is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple name.
    pub name: String,
    /// Generic parameters with their bounds.
    pub type_params: Vec<TypeParam>,
    /// Annotations placed directly on the type.
    pub annotations: Vec<Annotation>,
    /// Enclosing declarations, innermost first.
    pub enclosing: Vec<Enclosure>,
    /// Whether the type itself is declared `static`.
    pub is_static: bool,
    /// Candidate fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Classifies the declaration site of the type.
    #[must_use]
    pub fn enclosing_kind(&self) -> EnclosingKind {
        if is_local(&self.enclosing) {
            return EnclosingKind::Local;
        }
        match self.enclosing.first() {
            Some(Enclosure::Type { .. }) if self.is_static => EnclosingKind::NestedStatic,
            Some(Enclosure::Type { .. }) => EnclosingKind::Inner,
            _ => EnclosingKind::TopLevel,
        }
    }

    /// Returns `true` when the type is declared inside a method body,
    /// initializer or anonymous class, directly or through member types.
    #[must_use]
    pub fn is_local(&self) -> bool {
        is_local(&self.enclosing)
    }

    /// Path identifying the type within its compilation unit.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.name, &self.enclosing)
    }

    /// The type as referenced from its own body: `Box<T>` or `Point`.
    #[must_use]
    pub fn self_type(&self) -> TypeExpr {
        let base = TypeExpr::named(&self.name);
        if self.type_params.is_empty() {
            return base;
        }
        let args = self
            .type_params
            .iter()
            .map(|param| TypeExpr::type_var(&param.name))
            .collect();
        TypeExpr::apply(base, args)
    }
}

/// Everything synthesis needs beyond the type itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    access: Visibility,
    static_name: Option<String>,
    fields: Vec<FieldDescriptor>,
    skip_if_exists: bool,
    suppress_property_metadata: bool,
}

impl GenerationRequest {
    /// Creates a request for `fields` with the given access.
    #[must_use]
    pub const fn new(access: Visibility, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            access,
            static_name: None,
            fields,
            skip_if_exists: false,
            suppress_property_metadata: false,
        }
    }

    /// Requests a static factory; an empty name requests none.
    #[must_use]
    pub fn with_static_name(mut self, name: impl Into<String>) -> Self {
        let static_name: String = name.into();
        self.static_name = (!static_name.is_empty()).then_some(static_name);
        self
    }

    /// Skip generation when a constructor or competing directive exists.
    #[must_use]
    pub const fn skip_if_exists(mut self, skip: bool) -> Self {
        self.skip_if_exists = skip;
        self
    }

    /// Omit the property-metadata annotation.
    #[must_use]
    pub const fn suppress_property_metadata(mut self, suppress: bool) -> Self {
        self.suppress_property_metadata = suppress;
        self
    }

    /// Visibility requested by the directive.
    #[must_use]
    pub const fn access(&self) -> Visibility {
        self.access
    }

    /// Name of the static factory, if one was requested.
    #[must_use]
    pub fn static_name(&self) -> Option<&str> {
        self.static_name.as_deref()
    }

    /// Selected fields in parameter order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Whether the existing-member guard applies.
    #[must_use]
    pub const fn skips_if_exists(&self) -> bool {
        self.skip_if_exists
    }

    /// Whether property metadata is suppressed.
    #[must_use]
    pub const fn suppresses_property_metadata(&self) -> bool {
        self.suppress_property_metadata
    }

    /// Access of the instance constructor: private when a factory exists.
    #[must_use]
    pub const fn constructor_access(&self) -> Visibility {
        if self.static_name.is_some() {
            Visibility::Private
        } else {
            self.access
        }
    }
}
