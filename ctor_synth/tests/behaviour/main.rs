//! Behavioural tests for directive handling, driven by `rstest-bdd`.
//!
//! Fixtures live in [`fixtures`], step definitions under [`steps`], and
//! [`scenarios`] binds the `.feature` files in `tests/features`.

mod fixtures;
mod scenarios;
mod steps;
