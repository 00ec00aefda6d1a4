//! Scenario state shared between steps.

use ctor_synth::{MemoryHost, Outcome, ProcessedDirectives, RawType, SynthConfig};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State for one directive-handling scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct SynthContext {
    /// The type under construction by `given` steps.
    pub ty: Slot<RawType>,
    /// Settings overriding the defaults, when a step provides them.
    pub config: Slot<SynthConfig>,
    /// Host holding the type once a directive has been handled.
    pub host: Slot<MemoryHost>,
    /// Directives handled so far in the scenario.
    pub processed: Slot<ProcessedDirectives>,
    /// Outcome of the most recent directive.
    pub outcome: Slot<Outcome>,
    /// Rendered error of the most recent directive, if it failed.
    pub error: Slot<String>,
}

/// A fresh context per scenario.
#[fixture]
pub fn synth_context() -> SynthContext {
    SynthContext::default()
}
