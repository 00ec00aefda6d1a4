//! Constructor and static factory synthesis for annotation-driven compiler
//! front ends.
//!
//! A host compiler reports a type declaration as a [`RawType`] and the
//! directives found on it. [`DirectiveHandler`] selects the fields the
//! directive asks for, builds an instance constructor (and optionally a
//! static factory) through the host's [`NodeFactory`], and injects the
//! results through [`Host`].
//!
//! ```rust
//! use ctor_synth::{
//!     CompilationUnit, Directive, DirectiveHandler, DirectiveKind, MemoryHost,
//!     ProcessedDirectives, RawField, RawType, TypeExpr,
//! };
//!
//! # fn main() -> ctor_synth::Result<()> {
//! let point = RawType::new("Point")
//!     .field(RawField::new("x", TypeExpr::named("int")).final_())
//!     .field(RawField::new("y", TypeExpr::named("int")).final_());
//! let mut host = MemoryHost::new(CompilationUnit::with_types(vec![point.clone()]));
//! let directive = Directive::parse(DirectiveKind::RequiredArgs, "Point", r#"staticName = "of""#)?;
//!
//! DirectiveHandler::default().handle(
//!     &directive,
//!     &point,
//!     &mut host,
//!     &mut ProcessedDirectives::new(),
//! )?;
//! assert_eq!(host.generated("Point").len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod config;
pub mod directive;
mod error;
pub mod extract;
pub mod guard;
pub mod host;
pub mod memory;
pub mod model;
pub mod policy;
pub mod synth;

pub use ast::{Annotation, Expr, MethodDecl, Stmt, TypeExpr, TypeParam};
pub use config::SynthConfig;
pub use directive::{
    Directive, DirectiveHandler, DirectiveId, DirectiveKind, DirectiveOptions,
    ProcessedDirectives,
};
pub use error::{HostError, Result, SynthError};
pub use extract::{AnnotationPattern, Extractor, RawField, RawMember, RawType};
pub use guard::Conflict;
pub use host::{Host, MemberExists, NodeFactory};
pub use memory::{CompilationUnit, MemoryHost};
pub use model::{
    AccessLevel, Enclosure, FieldDescriptor, GenerationRequest, TypeDescriptor, Visibility,
};
pub use policy::SelectionPolicy;
pub use synth::{Outcome, SkipReason, Synthesizer};
