use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Failures raised by grid construction and the growth loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grid size must be a positive odd integer, got {0}")]
    InvalidSize(usize),
    #[error("spread must be a positive integer, got {0}")]
    InvalidSpread(i32),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("trial count must be positive")]
    InvalidTrials,
    /// No unfilled cell touches the filled region.
    #[error("no frontier cell left to invade after filling {filled} cells")]
    ExhaustedFrontier { filled: usize },
}

impl Error {
    /// Returns `true` for errors caused by bad caller input rather than
    /// by the state of a running simulation.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Error::ExhaustedFrontier { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
