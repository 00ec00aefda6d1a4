//! Step definitions registered with `rstest-bdd`.

pub mod directive_steps;
pub mod type_steps;
