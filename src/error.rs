//! Error taxonomy shared by every component.
//!
//! All variants are recoverable conditions returned to the caller. Messages
//! name the constraint that was violated, since boundary conditions are
//! probed on purpose (drawing 6 items from a 5-item urn, say).

use thiserror::Error;

/// Failure conditions of sampling, replication and estimation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed numeric input or a non-positive count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Sampling without replacement asked for more items than exist.
    #[error("insufficient population: requested k={requested} exceeds population size {available}")]
    InsufficientPopulation {
        /// Number of items requested.
        requested: usize,
        /// Number of items in the population.
        available: usize,
    },

    /// An estimator received a zero-length sequence.
    #[error("empty input: {0} requires at least one observation")]
    EmptyInput(&'static str),

    /// Unknown parametric family, or a family whose draws the item type cannot hold.
    #[error("unsupported distribution: {0}")]
    UnsupportedDistribution(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rejects NaN observations before an estimator does partial work.
pub(crate) fn ensure_no_nan<F: num_traits::Float>(data: &[F], what: &'static str) -> Result<()> {
    if let Some(pos) = data.iter().position(|x| x.is_nan()) {
        return Err(Error::invalid(format!("{what}: observation {pos} is NaN")));
    }
    Ok(())
}
