//! "Generate only if absent" checks.
//!
//! The check is coarse: any declared constructor blocks generation,
//! whatever its signature.

use tracing::trace;

use crate::directive::DirectiveKind;
use crate::host::{Host, MemberExists};
use crate::model::TypeDescriptor;

/// Why a guarded generation must not go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// A constructor is already declared.
    ConstructorExists(MemberExists),
    /// The type carries its own constructor directive, which will generate.
    CompetingDirective(DirectiveKind),
}

/// Returns the first reason to abort a guarded generation, if any.
///
/// `directive_package` qualifies the generator annotation names, so both
/// `@AllArgsConstructor` and `@lombok.AllArgsConstructor` are recognised.
#[must_use]
pub fn find_conflict<H: Host + ?Sized>(
    host: &H,
    ty: &TypeDescriptor,
    directive_package: &str,
) -> Option<Conflict> {
    let existing = host.existing_constructor(ty);
    if existing != MemberExists::NotExists {
        trace!(ty = %ty.name, ?existing, "constructor already present");
        return Some(Conflict::ConstructorExists(existing));
    }
    ty.annotations.iter().find_map(|annotation| {
        DirectiveKind::from_annotation(&annotation.name, directive_package)
            .map(Conflict::CompetingDirective)
    })
}
