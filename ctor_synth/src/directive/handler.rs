//! Entry points that turn directives into generated members.

use tracing::debug;

use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use crate::extract::{Extractor, RawType};
use crate::host::Host;
use crate::model::{AccessLevel, GenerationRequest};
use crate::policy::SelectionPolicy;
use crate::synth::{Outcome, SkipReason, Synthesizer};

use super::{Directive, DirectiveKind, ProcessedDirectives};

/// Handles constructor directives against a host.
#[derive(Debug, Clone)]
pub struct DirectiveHandler {
    extractor: Extractor,
    synthesizer: Synthesizer,
    access_level_import: String,
    suppress_by_default: bool,
}

impl Default for DirectiveHandler {
    fn default() -> Self {
        Self::from(&SynthConfig::default())
    }
}

impl From<&SynthConfig> for DirectiveHandler {
    fn from(config: &SynthConfig) -> Self {
        Self {
            extractor: Extractor::from(config),
            synthesizer: Synthesizer::from(config),
            access_level_import: config.access_level_import.clone(),
            suppress_by_default: config.suppress_constructor_properties,
        }
    }
}

impl DirectiveHandler {
    /// Handles one directive found on `ty`.
    ///
    /// A directive already present in `processed` is skipped without
    /// touching the host. Otherwise it is recorded, reported to the host as
    /// processed, generated (unless its access is `NONE`) and the access-level
    /// import is released.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Directive`] when the directive belongs to a type
    /// other than `ty`, and propagates host failures from building or
    /// injecting members.
    pub fn handle<H: Host + ?Sized>(
        &self,
        directive: &Directive,
        ty: &RawType,
        host: &mut H,
        processed: &mut ProcessedDirectives,
    ) -> Result<Outcome> {
        let owner = ty.qualified_name();
        if directive.id.owner != owner {
            return Err(SynthError::directive(format!(
                "directive for `{}` cannot be applied to `{owner}`",
                directive.id.owner
            )));
        }
        if !processed.insert(&directive.id) {
            debug!(ty = %owner, kind = ?directive.kind(), "directive already processed");
            return Ok(Outcome::Skipped(SkipReason::AlreadyProcessed));
        }
        host.mark_processed(&directive.id);
        let outcome = self.run(directive, ty, host)?;
        host.remove_unused_import(&self.access_level_import);
        Ok(outcome)
    }

    fn run<H: Host + ?Sized>(
        &self,
        directive: &Directive,
        ty: &RawType,
        host: &mut H,
    ) -> Result<Outcome> {
        let options = &directive.options;
        let Some(access) = options.access.visibility() else {
            debug!(ty = %ty.name, kind = ?directive.kind(), "access NONE, nothing to generate");
            return Ok(Outcome::Skipped(SkipReason::AccessNone));
        };
        let suppress = match directive.kind() {
            DirectiveKind::NoArgs => false,
            DirectiveKind::RequiredArgs | DirectiveKind::AllArgs => options
                .suppress_constructor_properties
                .unwrap_or(self.suppress_by_default),
        };
        let descriptor = self.extractor.describe_type(ty);
        let fields = directive.kind().policy().select(&descriptor);
        let request = GenerationRequest::new(access, fields)
            .with_static_name(options.static_name.as_str())
            .suppress_property_metadata(suppress);
        self.synthesizer.generate(host, &descriptor, &request)
    }

    /// Generates a required-args constructor on behalf of another generator.
    ///
    /// With `skip_if_exists`, nothing is generated when `ty` already declares a
    /// constructor or carries its own constructor directive.
    ///
    /// # Errors
    ///
    /// Propagates host failures from building or injecting members.
    pub fn generate_required_args_constructor<H: Host + ?Sized>(
        &self,
        ty: &RawType,
        host: &mut H,
        access: AccessLevel,
        static_name: &str,
        skip_if_exists: bool,
    ) -> Result<Outcome> {
        let Some(visibility) = access.visibility() else {
            return Ok(Outcome::Skipped(SkipReason::AccessNone));
        };
        let descriptor = self.extractor.describe_type(ty);
        let fields = SelectionPolicy::RequiredArgsOnly.select(&descriptor);
        let request = GenerationRequest::new(visibility, fields)
            .with_static_name(static_name)
            .skip_if_exists(skip_if_exists);
        self.synthesizer.generate(host, &descriptor, &request)
    }
}
