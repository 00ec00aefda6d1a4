//! Test helpers shared across the ctor-synth workspace.
//!
//! [`figment`] wraps `figment::Jail` for settings tests; [`text`] normalises
//! values captured from feature files and rendered Java members.

pub mod figment;
pub mod text;
