//! Binds the feature files to the step registry.

use crate::fixtures::{SynthContext, synth_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/constructor_directives.feature",
    fixtures = [synth_context: SynthContext]
);
scenarios!(
    "tests/features/static_factories.feature",
    fixtures = [synth_context: SynthContext]
);
scenarios!(
    "tests/features/existing_members.feature",
    fixtures = [synth_context: SynthContext]
);
