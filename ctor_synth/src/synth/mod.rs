//! Constructor and static factory synthesis.
//!
//! [`Synthesizer::generate`] runs the guard (when requested), builds the
//! constructor and the optional factory through the host's node factory and
//! only then injects them, so a failed build leaves the type untouched.
//! Building is a pure function of the type and the request; host errors are
//! propagated unchanged.

mod constructor;
mod factory;

use tracing::debug;

use crate::ast::{MethodDecl, Modifiers, Param, TypeExpr};
use crate::config::SynthConfig;
use crate::error::{HostError, Result};
use crate::guard::{Conflict, find_conflict};
use crate::host::{Host, NodeFactory};
use crate::model::{FieldDescriptor, GenerationRequest, TypeDescriptor};

/// Why nothing was injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The directive requested `AccessLevel.NONE`.
    AccessNone,
    /// The directive was handled earlier in this compilation run.
    AlreadyProcessed,
    /// The existing-member guard found a conflict.
    Conflict(Conflict),
}

/// Result of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A constructor was injected, plus the named factory if one was
    /// requested.
    Generated {
        /// Name of the injected static factory.
        factory: Option<String>,
    },
    /// Generation was skipped without error.
    Skipped(SkipReason),
}

/// One `final` parameter per field, annotations copied, type mapped by
/// `retype`.
fn parameters<F, R>(
    factory: &F,
    fields: &[FieldDescriptor],
    retype: R,
) -> Result<Vec<Param>, HostError>
where
    F: NodeFactory + ?Sized,
    R: Fn(&TypeExpr) -> TypeExpr,
{
    fields
        .iter()
        .map(|field| {
            factory.parameter(
                &field.name,
                retype(&field.declared_type),
                Modifiers::final_with(field.parameter_annotations()),
            )
        })
        .collect()
}

/// Builds and injects generated constructors.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    property_metadata: String,
    directive_package: String,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::from(&SynthConfig::default())
    }
}

impl From<&SynthConfig> for Synthesizer {
    fn from(config: &SynthConfig) -> Self {
        Self {
            property_metadata: config.property_metadata.clone(),
            directive_package: config.directive_package.clone(),
        }
    }
}

impl Synthesizer {
    /// Builds the instance constructor without injecting it.
    ///
    /// # Errors
    ///
    /// Propagates node construction failures from `factory`.
    pub fn constructor<F: NodeFactory + ?Sized>(
        &self,
        factory: &F,
        ty: &TypeDescriptor,
        request: &GenerationRequest,
    ) -> Result<MethodDecl> {
        Ok(constructor::build(
            factory,
            ty,
            request,
            &self.property_metadata,
        )?)
    }

    /// Builds the static factory, or `None` when the request names none.
    ///
    /// # Errors
    ///
    /// Propagates node construction failures from `factory`.
    pub fn static_factory<F: NodeFactory + ?Sized>(
        &self,
        factory: &F,
        ty: &TypeDescriptor,
        request: &GenerationRequest,
    ) -> Result<Option<MethodDecl>> {
        let Some(name) = request.static_name() else {
            return Ok(None);
        };
        Ok(Some(factory::build(factory, ty, request, name)?))
    }

    /// Generates and injects the constructor and optional factory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Host`] when building or injecting a member
    /// fails.
    pub fn generate<H: Host + ?Sized>(
        &self,
        host: &mut H,
        ty: &TypeDescriptor,
        request: &GenerationRequest,
    ) -> Result<Outcome> {
        if request.skips_if_exists() {
            if let Some(conflict) = find_conflict(&*host, ty, &self.directive_package) {
                debug!(ty = %ty.name, ?conflict, "skipping constructor generation");
                return Ok(Outcome::Skipped(SkipReason::Conflict(conflict)));
            }
        }

        let constructor = self.constructor(&*host, ty, request)?;
        let factory = self.static_factory(&*host, ty, request)?;
        debug!(
            ty = %ty.name,
            params = ?request.fields().iter().map(|field| &field.name).collect::<Vec<_>>(),
            access = ?request.constructor_access(),
            "injecting constructor"
        );
        host.inject_member(ty, constructor)?;

        let Some(method) = factory else {
            return Ok(Outcome::Generated { factory: None });
        };
        let name = method.name.clone();
        debug!(ty = %ty.name, factory = %name, "injecting static factory");
        host.inject_member(ty, method)?;
        Ok(Outcome::Generated {
            factory: Some(name),
        })
    }
}
