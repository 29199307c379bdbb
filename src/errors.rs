//! The crate-wide error type
use thiserror::Error;

/// All failures surfaced by this crate. Index and size violations are caught
/// at the operation boundary; errors raised while working on a descendant
/// node are wrapped in [Error::Child] so callers can tell their own contract
/// violations apart from propagated ones.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An index lies outside the valid range for the operation's contract.
    #[error("index {index} out of range for size {size}")]
    OutOfRange { index: usize, size: usize },

    /// A size argument was zero where a strictly positive value is required.
    #[error("size must be greater than zero (got {size})")]
    BadSize { size: usize },

    /// A required field was never set. Carries the parameter name.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A parameter was set to a value violating its precondition.
    #[error("bad parameter: {0}")]
    BadParameter(String),

    /// A failure surfaced from a descendant node during make or recombine.
    #[error("failure in child node: {0}")]
    Child(#[source] Box<Error>),
}

impl Error {
    /// Wrap an error that occurred one level down in the hierarchy.
    pub(crate) fn into_child(self) -> Self {
        Error::Child(Box::new(self))
    }
}
