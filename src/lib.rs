//! Reproducible Monte Carlo estimation over urns and parametric families.
//!
//! Draw samples with or without replacement from a [`Population`], repeat a
//! [`Trial`] many times with [`replicate`], summarize the outcomes with the
//! estimators in this crate and check them against closed-form
//! probabilities such as [`birthday_probability`] or [`SumOfDraws`].
//!
//! ```
//! use urna::{Agreement, Population, SamplingSpec, SumOfDraws, Urn, configure};
//!
//! // One dollar on red, a thousand times
//! let wheel: Population<i32> = Urn::from_counts(&[(1_i32, 18), (-1, 20)])?.into();
//! let spec = SamplingSpec::with_replacement(&wheel, 1_000);
//! let lost = |spins: &urna::Sample<i32>| spins.iter().sum::<i32>() < 0;
//!
//! let mut engine = configure(2024);
//! let estimate = engine.replicate(&lost, &spec, 2_000)?.proportion()?;
//! let exact = SumOfDraws::signed(1_000, 18.0 / 38.0)?.prob_below(0.0)?;
//! assert!(Agreement::new(estimate, exact, 0.03)?.is_within());
//! # Ok::<(), urna::Error>(())
//! ```

mod config;
mod display;
mod engine;
mod error;
mod exact;
mod population;
mod random;
mod reconcile;
mod replicate;
mod sample;
mod statistics;

pub use config::{Config, ConfigBuilder, ConfigError, MAX_CHUNKS, MAX_REPLICATIONS};
pub use engine::{Engine, configure, exact_birthday_probability, exact_conditional_probability};
pub use error::{Error, Result};
pub use exact::*;
pub use population::{
    Family, Population, Replacement, SamplingSpec, Urn, Variate, sample_parametric,
    sample_with_replacement, sample_without_replacement,
};
pub use random::RandomSource;
pub use reconcile::{Agreement, KolmogorovSmirnov, KsResult, ks_against, ks_distance};
pub use replicate::{
    Cycles, IntoOutcome, Outcome, Replication, Trial, TrialFailure, chunk_sizes, replicate,
    replicate_chunked,
};
pub use sample::{ReadError, Sample};
pub use statistics::*;

pub use rand;
