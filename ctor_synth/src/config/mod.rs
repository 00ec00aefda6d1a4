//! Synthesis settings and their layered loading.
//!
//! Settings are gathered from built-in defaults, an optional TOML file and
//! `CTOR_SYNTH_`-prefixed environment variables, later layers overriding
//! earlier ones.

mod env;

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::extract::AnnotationPattern;

use env::ListEnv;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CTOR_SYNTH_";

const LIST_KEYS: &[&str] = &["non_null", "nullable"];

/// Settings consumed by the extractor, the synthesizers and the reference
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Accepted spellings of the non-null annotation.
    pub non_null: Vec<String>,
    /// Accepted spellings of the nullable annotation.
    pub nullable: Vec<String>,
    /// Qualified name of the property-metadata annotation.
    pub property_metadata: String,
    /// Exception type thrown by generated null guards.
    pub null_exception: String,
    /// Package holding the generator annotations.
    pub directive_package: String,
    /// Import dropped once a directive has been handled.
    pub access_level_import: String,
    /// Default for `suppressConstructorProperties` when a directive omits it.
    pub suppress_constructor_properties: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            non_null: to_strings(&[
                "NonNull",
                "NotNull",
                "lombok.NonNull",
                "javax.annotation.Nonnull",
                "javax.validation.constraints.NotNull",
                "edu.umd.cs.findbugs.annotations.NonNull",
                "org.jetbrains.annotations.NotNull",
                "android.support.annotation.NonNull",
            ]),
            nullable: to_strings(&[
                "Nullable",
                "CheckForNull",
                "javax.annotation.Nullable",
                "javax.annotation.CheckForNull",
                "edu.umd.cs.findbugs.annotations.Nullable",
                "org.jetbrains.annotations.Nullable",
                "android.support.annotation.Nullable",
            ]),
            property_metadata: "java.beans.ConstructorProperties".to_owned(),
            null_exception: "java.lang.NullPointerException".to_owned(),
            directive_package: "lombok".to_owned(),
            access_level_import: "lombok.AccessLevel".to_owned(),
            suppress_constructor_properties: false,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&item| item.to_owned()).collect()
}

impl SynthConfig {
    /// Loads settings from defaults, `path` (when given) and the environment.
    ///
    /// A missing file is treated as empty so callers can pass a conventional
    /// location unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Config`] when the file is malformed or a
    /// value has the wrong type.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = path {
            debug!(path = %file, "layering constructor synthesis settings file");
            figment = figment.merge(Toml::file(file.as_std_path()));
        }
        let config = figment
            .merge(ListEnv::prefixed(ENV_PREFIX, LIST_KEYS))
            .extract()?;
        Ok(config)
    }

    /// Pattern matching the configured non-null spellings.
    #[must_use]
    pub fn non_null_pattern(&self) -> AnnotationPattern {
        AnnotationPattern::new(self.non_null.iter().cloned())
    }

    /// Pattern matching the configured nullable spellings.
    #[must_use]
    pub fn nullable_pattern(&self) -> AnnotationPattern {
        AnnotationPattern::new(self.nullable.iter().cloned())
    }
}
