//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("Child name is required")]
    EmptyChildName,

    #[error("Generated story is too short ({observed} {unit}, minimum {min})")]
    TooShort {
        observed: usize,
        min: usize,
        unit: &'static str,
    },

    #[error("Generated story is too long ({observed} {unit}, maximum {max})")]
    TooLong {
        observed: usize,
        max: usize,
        unit: &'static str,
    },

    #[error("Invalid length bounds: {0}")]
    InvalidBounds(String),
}
