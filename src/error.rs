//! Error types shared by the whole crate.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// Bad orbital or sampling inputs: non-positive period, negative radius,
    /// an empty schedule, and so on.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no samples were recorded before finalizing")]
    EmptySampleSet,

    /// The analyzer was touched after it was finalized.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("root finding did not converge after {iterations} iterations in {interval}")]
    NoConvergence { iterations: usize, interval: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidParameter(msg.into())
    }
}
