//! Constructor directives: the annotations that request generation.
//!
//! A [`Directive`] pairs a [`DirectiveKind`] with its parsed options and the
//! type that carries it. [`DirectiveHandler`] turns a directive into a
//! generation request and drives the pipeline, marking the directive as
//! processed in an explicit [`ProcessedDirectives`] set owned by the caller.

mod handler;
mod options;

use std::collections::HashSet;

use crate::ast::simple_name;
use crate::error::Result;
use crate::extract::RawType;
use crate::policy::SelectionPolicy;

pub use handler::DirectiveHandler;
pub use options::DirectiveOptions;

/// The three constructor-generating annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `@NoArgsConstructor`
    NoArgs,
    /// `@RequiredArgsConstructor`
    RequiredArgs,
    /// `@AllArgsConstructor`
    AllArgs,
}

impl DirectiveKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::NoArgs, Self::RequiredArgs, Self::AllArgs];

    /// Simple name of the annotation.
    #[must_use]
    pub const fn annotation_name(self) -> &'static str {
        match self {
            Self::NoArgs => "NoArgsConstructor",
            Self::RequiredArgs => "RequiredArgsConstructor",
            Self::AllArgs => "AllArgsConstructor",
        }
    }

    /// Field selection used by this kind.
    #[must_use]
    pub const fn policy(self) -> SelectionPolicy {
        match self {
            Self::NoArgs => SelectionPolicy::None,
            Self::RequiredArgs => SelectionPolicy::RequiredArgsOnly,
            Self::AllArgs => SelectionPolicy::AllArgs,
        }
    }

    /// Recognises an annotation written as `Name` or `<package>.Name`.
    #[must_use]
    pub fn from_annotation(name: &str, package: &str) -> Option<Self> {
        let simple = simple_name(name);
        let qualifier = name.strip_suffix(simple).map(|prefix| prefix.trim_end_matches('.'));
        if !matches!(qualifier, Some("")) && qualifier != Some(package) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.annotation_name() == simple)
    }
}

/// Identifies one directive instance within a compilation run.
///
/// Nested types are told apart by their enclosures, so `Order.Builder` and
/// `Invoice.Builder` carry distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveId {
    /// Qualified name of the annotated type, as given by
    /// [`RawType::qualified_name`].
    pub owner: String,
    /// Which directive.
    pub kind: DirectiveKind,
}

/// A directive found on a type, with its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Identity of the directive.
    pub id: DirectiveId,
    /// Parsed options.
    pub options: DirectiveOptions,
}

impl Directive {
    /// A directive with default options on the type named `owner`.
    ///
    /// `owner` is the qualified name of the type; see [`Directive::on`].
    #[must_use]
    pub fn new(kind: DirectiveKind, owner: impl Into<String>) -> Self {
        Self {
            id: DirectiveId {
                owner: owner.into(),
                kind,
            },
            options: DirectiveOptions::default(),
        }
    }

    /// A directive with default options, owned by `ty`.
    #[must_use]
    pub fn on(kind: DirectiveKind, ty: &RawType) -> Self {
        Self::new(kind, ty.qualified_name())
    }

    /// A directive whose options are parsed from an argument list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Directive`] when `args` is malformed.
    pub fn parse(kind: DirectiveKind, owner: impl Into<String>, args: &str) -> Result<Self> {
        Ok(Self::new(kind, owner).with_options(DirectiveOptions::parse(args)?))
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: DirectiveOptions) -> Self {
        self.options = options;
        self
    }

    /// The directive's kind.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        self.id.kind
    }
}

/// Directives already handled in the current compilation run.
#[derive(Debug, Clone, Default)]
pub struct ProcessedDirectives {
    seen: HashSet<DirectiveId>,
}

impl ProcessedDirectives {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`; returns `false` when it was already present.
    pub fn insert(&mut self, id: &DirectiveId) -> bool {
        self.seen.insert(id.clone())
    }

    /// Returns `true` when `id` has been handled.
    #[must_use]
    pub fn contains(&self, id: &DirectiveId) -> bool {
        self.seen.contains(id)
    }

    /// Number of handled directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` when nothing has been handled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
