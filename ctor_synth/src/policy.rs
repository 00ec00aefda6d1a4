//! Field selection strategies.

use crate::model::{FieldDescriptor, TypeDescriptor};

/// Decides which fields become constructor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// No parameters.
    None,
    /// Fields the language cannot otherwise initialise: final or non-null
    /// fields without an initializer.
    RequiredArgsOnly,
    /// Every field assignable through a constructor.
    AllArgs,
}

impl SelectionPolicy {
    /// Returns `true` when `field` becomes a parameter under this policy.
    #[must_use]
    pub fn admits(self, field: &FieldDescriptor) -> bool {
        if field.is_static {
            return false;
        }
        match self {
            Self::None => false,
            Self::RequiredArgsOnly => {
                !field.has_initializer && (field.is_final || field.is_non_null())
            }
            Self::AllArgs => !(field.is_final && field.has_initializer),
        }
    }

    /// Selects the parameter fields of `ty`, preserving declaration order.
    #[must_use]
    pub fn select(self, ty: &TypeDescriptor) -> Vec<FieldDescriptor> {
        ty.fields
            .iter()
            .filter(|field| self.admits(field))
            .cloned()
            .collect()
    }
}
