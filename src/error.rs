//! Error types shared by all filters.

use thiserror::Error;

/// Errors raised by buffer construction and filter invocation.
///
/// Filters validate their parameters before touching any pixel data, so an
/// error never comes with a partially written output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A filter parameter lies outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Raw pixel data does not hold exactly `width * height * 4` channel values.
    #[error("buffer of {width}x{height} RGBA pixels needs {expected} values, got {actual}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        let err = FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        };
        log::warn!("{err}");
        err
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
