//! Closed set of AST node variants exchanged with the host compiler.
//!
//! Hosts translate their own trees into these values when describing a type
//! and translate the synthesized members back when injecting them. The
//! [`print`] submodule renders nodes in Java syntax for diagnostics and tests.

mod print;

/// Names of the Java primitive types.
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// A type expression as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A simple or dotted type name such as `int`, `String` or `java.util.List`.
    Named(String),
    /// A reference to a generic type parameter with a known binder.
    Var(TypeVar),
    /// A parameterized type such as `Map<K, V>`.
    Apply {
        /// The generic type being instantiated.
        base: Box<TypeExpr>,
        /// Type arguments in declaration order.
        args: Vec<TypeExpr>,
    },
    /// An array of the element type.
    Array(Box<TypeExpr>),
    /// A wildcard argument, optionally bounded.
    Wildcard(Option<WildcardBound>),
}

/// The declaration that introduced a type variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarScope {
    /// Declared on the enclosing type.
    Type,
    /// Declared on a generic method.
    Method,
}

/// A type variable together with the scope that binds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    /// The variable's name, e.g. `T`.
    pub name: String,
    /// Which declaration binds the variable.
    pub scope: VarScope,
}

/// The bound attached to a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    /// `? extends T`
    Extends(Box<TypeExpr>),
    /// `? super T`
    Super(Box<TypeExpr>),
}

impl TypeExpr {
    /// Builds a [`TypeExpr::Named`] from anything string-like.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Builds a parameterized type.
    #[must_use]
    pub fn apply(base: Self, args: Vec<Self>) -> Self {
        Self::Apply {
            base: Box::new(base),
            args,
        }
    }

    /// Builds a type variable bound by the enclosing type.
    #[must_use]
    pub fn type_var(name: impl Into<String>) -> Self {
        Self::Var(TypeVar {
            name: name.into(),
            scope: VarScope::Type,
        })
    }

    /// Returns `true` for the eight Java primitive types.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Named(name) if PRIMITIVES.contains(&name.as_str()))
    }

    /// Returns `true` when the expression is `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Named(name) if name == "void")
    }
}

/// A generic parameter declaration with its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    /// Parameter name.
    pub name: String,
    /// Upper bounds, in declaration order.
    pub bounds: Vec<TypeExpr>,
}

impl TypeParam {
    /// Creates an unbounded type parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Returns the parameter with an additional upper bound.
    #[must_use]
    pub fn bounded_by(mut self, bound: TypeExpr) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// An annotation instance: its name as written plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// Simple (`NonNull`) or qualified (`lombok.NonNull`) name as written.
    pub name: String,
    /// Argument expressions.
    pub args: Vec<Expr>,
}

impl Annotation {
    /// Creates a marker annotation without arguments.
    #[must_use]
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// The last segment of the annotation's name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// Returns the last dotted segment of `name`.
#[must_use]
pub(crate) fn simple_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, simple)| simple)
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// `null`
    Null,
    /// A string literal.
    Str(String),
}

/// Expressions used in synthesized bodies and annotation arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A local name or parameter reference.
    Ident(String),
    /// `this`
    This,
    /// `target.name`
    Field {
        /// Receiver expression.
        target: Box<Expr>,
        /// Field name.
        name: String,
    },
    /// A literal value.
    Lit(Literal),
    /// `lhs == rhs`
    Eq(Box<Expr>, Box<Expr>),
    /// An array initializer such as `{"x", "y"}`.
    ArrayInit(Vec<Expr>),
    /// `new T(args)`
    New {
        /// The instantiated type, including type arguments.
        ty: TypeExpr,
        /// Constructor arguments, positionally.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Builds an identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Builds a string literal expression.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Lit(Literal::Str(value.into()))
    }

    /// Builds `this.<name>`.
    #[must_use]
    pub fn this_field(name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(Self::This),
            name: name.into(),
        }
    }
}

/// Statements used in synthesized bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// `target = value;`
    Assign {
        /// Assigned location.
        target: Expr,
        /// Assigned value.
        value: Expr,
    },
    /// `if (cond) then`
    If {
        /// Condition expression.
        cond: Expr,
        /// Statement executed when the condition holds.
        then: Box<Stmt>,
    },
    /// `throw value;`
    Throw(Expr),
    /// `return value;`
    Return(Expr),
}

/// Access modifiers that can be emitted on a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// No access keyword.
    Package,
    /// `private`
    Private,
}

impl Visibility {
    /// The Java keyword for this level, or `None` for package access.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Package => None,
            Self::Private => Some("private"),
        }
    }
}

/// Modifiers and annotations attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Declared access.
    pub visibility: Visibility,
    /// `static`
    pub is_static: bool,
    /// `final`
    pub is_final: bool,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
}

impl Modifiers {
    /// Modifiers carrying only an access level.
    #[must_use]
    pub const fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility,
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
        }
    }

    /// Package-private `final` modifiers, as used on synthesized parameters.
    #[must_use]
    pub fn final_with(annotations: Vec<Annotation>) -> Self {
        Self {
            visibility: Visibility::Package,
            is_static: false,
            is_final: true,
            annotations,
        }
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter modifiers; visibility is ignored.
    pub modifiers: Modifiers,
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: TypeExpr,
}

/// Distinguishes instance initializers from named methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// An instance constructor of the owning type.
    Constructor,
    /// A named method with a return type.
    Method {
        /// Declared return type.
        returns: TypeExpr,
    },
}

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    /// Modifiers and annotations.
    pub modifiers: Modifiers,
    /// For constructors this is the owning type's simple name.
    pub name: String,
    /// Constructor or method.
    pub kind: MethodKind,
    /// Method-level generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Formal parameters in order.
    pub params: Vec<Param>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

impl MethodDecl {
    /// Returns `true` for constructors.
    #[must_use]
    pub const fn is_constructor(&self) -> bool {
        matches!(self.kind, MethodKind::Constructor)
    }

    /// Parameter types, used for signature comparison.
    #[must_use]
    pub fn param_types(&self) -> impl Iterator<Item = &TypeExpr> {
        self.params.iter().map(|param| &param.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("int", true)]
    #[case("double", true)]
    #[case("Integer", false)]
    #[case("java.lang.String", false)]
    fn primitive_detection(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(TypeExpr::named(name).is_primitive(), expected);
    }

    #[test]
    fn arrays_are_not_primitive() {
        let ty = TypeExpr::Array(Box::new(TypeExpr::named("int")));
        assert!(!ty.is_primitive());
    }

    #[rstest]
    #[case("NonNull", "NonNull")]
    #[case("lombok.NonNull", "NonNull")]
    #[case("javax.annotation.Nonnull", "Nonnull")]
    fn simple_name_takes_last_segment(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(Annotation::marker(name).simple_name(), expected);
    }
}
