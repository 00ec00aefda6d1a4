//! Error types produced by constructor synthesis.

use thiserror::Error;

/// Failures raised by the host compiler while building or injecting nodes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    /// The host cannot represent the type as a parameter type.
    #[error("type `{ty}` cannot be used as the type of parameter `{param}`")]
    InvalidParameterType {
        /// Offending parameter.
        param: String,
        /// Rendered type expression.
        ty: String,
    },

    /// A member with the same signature already exists.
    #[error("duplicate member `{signature}` in type `{owner}`")]
    DuplicateMember {
        /// Type receiving the member.
        owner: String,
        /// Rendered signature of the clashing member.
        signature: String,
    },

    /// The target type is not known to the host.
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// Any other host-specific failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by the synthesis pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Host AST construction or injection failed.
    #[error("host rejected synthesized member: {0}")]
    Host(#[from] HostError),

    /// A directive's argument list could not be interpreted.
    #[error("invalid constructor directive: {message}")]
    Directive {
        /// Human-readable description.
        message: String,
    },

    /// Configuration could not be gathered.
    #[error("failed to load synthesis configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl SynthError {
    /// Convenience constructor for [`SynthError::Directive`].
    #[must_use]
    pub fn directive(message: impl Into<String>) -> Self {
        Self::Directive {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for SynthError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<syn::Error> for SynthError {
    fn from(err: syn::Error) -> Self {
        Self::directive(err.to_string())
    }
}

impl From<proc_macro2::LexError> for SynthError {
    fn from(err: proc_macro2::LexError) -> Self {
        Self::directive(format!("cannot tokenise arguments: {err}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = SynthError> = std::result::Result<T, E>;
