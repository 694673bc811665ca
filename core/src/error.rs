//! Error types for command-line parsing.
//!
//! The boolean parse entry points collapse every failure into `false`; the
//! `try_*` entry points hand back one of these so callers can report which
//! option failed and why.

use thiserror::Error;

/// Failure raised while applying a matched option.
///
/// Every variant carries the name of the option whose argument failed.
///
/// # Examples
///
/// ```
/// use cmdline_core::CommandLineError;
///
/// let err = CommandLineError::MissingValue { option: "-n".into() };
/// assert_eq!(err.to_string(), "missing value for option -n");
/// assert_eq!(err.option(), "-n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandLineError {
    /// The flag was the last token but needs a following value.
    #[error("missing value for option {option}")]
    MissingValue { option: String },

    /// The value token could not be converted to the target's type.
    #[error("invalid value {value:?} for option {option}: {reason}")]
    InvalidConversion {
        option: String,
        value: String,
        reason: String,
    },

    /// A method option's callback returned `false`.
    #[error("option {option} rejected value {value:?}")]
    CallbackRejected { option: String, value: String },

    /// The value does not fit a fixed-capacity buffer (terminator included).
    #[error("value for option {option} needs {len} bytes, buffer holds {capacity}")]
    CapacityExceeded {
        option: String,
        len: usize,
        capacity: usize,
    },
}

impl CommandLineError {
    /// Returns the name of the option that failed.
    pub fn option(&self) -> &str {
        match self {
            Self::MissingValue { option }
            | Self::InvalidConversion { option, .. }
            | Self::CallbackRejected { option, .. }
            | Self::CapacityExceeded { option, .. } => option,
        }
    }
}

/// Convenience alias for results with [`CommandLineError`].
pub type Result<T> = std::result::Result<T, CommandLineError>;
