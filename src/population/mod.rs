//! Sampling populations: finite urns and parametric families.
//!
//! A [`Population`] is a closed set of kinds so the sampler dispatches on the
//! variant instead of guessing from the data. Urns are immutable; sampling
//! without replacement works on a session-local view of positions.

mod family;
mod sampler;

pub use family::Family;
pub use sampler::{
    Replacement, SamplingSpec, sample_parametric, sample_with_replacement,
    sample_without_replacement,
};

use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::sample::Sample;

/// Finite ordered multiset of labeled items.
#[derive(Debug, Clone, PartialEq)]
pub struct Urn<T> {
    items: Vec<T>,
}

impl<T> Urn<T> {
    /// Builds an urn from its items.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when `items` is empty.
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::invalid("an urn needs at least one item"));
        }
        Ok(Self { items })
    }

    /// Builds an urn holding `count` copies of each label, in the given order.
    ///
    /// ```
    /// use urna::Urn;
    /// let roulette = Urn::from_counts(&[("red", 18), ("black", 18), ("green", 2)]).unwrap();
    /// assert_eq!(roulette.len(), 38);
    /// ```
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when all counts are zero.
    pub fn from_counts(counts: &[(T, usize)]) -> Result<Self>
    where
        T: Clone,
    {
        let items = counts
            .iter()
            .flat_map(|(label, n)| std::iter::repeat_n(label.clone(), *n))
            .collect();
        Self::new(items)
    }

    /// Number of items, n ≥ 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in their source order.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Fraction of items satisfying `pred`.
    pub fn proportion(&self, pred: impl Fn(&T) -> bool) -> f64 {
        self.items.iter().filter(|x| pred(x)).count() as f64 / self.items.len() as f64
    }
}

/// Item types that can hold a draw from a parametric family.
///
/// Label types keep the defaults, which refuse every variate; implement it
/// with an empty body (`impl Variate for Suit {}`) to use a custom label type
/// in a [`Population`].
pub trait Variate: Sized {
    /// Converts a real-valued draw, or `None` when it cannot be represented.
    fn from_variate(_x: f64) -> Option<Self> {
        None
    }

    /// Whether every possible draw of `family` converts.
    fn represents(_family: &Family) -> bool {
        false
    }
}

impl Variate for f64 {
    fn from_variate(x: f64) -> Option<Self> {
        Some(x)
    }

    fn represents(_family: &Family) -> bool {
        true
    }
}

impl Variate for f32 {
    fn from_variate(x: f64) -> Option<Self> {
        Some(x as f32)
    }

    fn represents(_family: &Family) -> bool {
        true
    }
}

macro_rules! integral_variate {
    ($($t:ty),*) => {$(
        impl Variate for $t {
            fn from_variate(x: f64) -> Option<Self> {
                // Only exact integers from discrete families
                if x.fract() == 0.0 && x >= <$t>::MIN as f64 && x <= <$t>::MAX as f64 {
                    Some(x as $t)
                } else {
                    None
                }
            }

            fn represents(family: &Family) -> bool {
                family.is_discrete()
                    && family.support_max().is_ok_and(|max| max <= <$t>::MAX as f64)
            }
        }
    )*};
}

integral_variate!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl Variate for bool {}
impl Variate for char {}
impl Variate for String {}
impl Variate for &str {}

/// Sampling population: a finite urn or a parametric family.
#[derive(Debug, Clone, PartialEq)]
pub enum Population<T> {
    /// Categorical urn of labeled items.
    Finite(Urn<T>),
    /// Named continuous or discrete family with validated parameters.
    Parametric(Family),
}

/// Rejects a family whose draws `T` cannot hold, before anything is drawn.
pub(crate) fn ensure_represents<T: Variate>(family: &Family) -> Result<()> {
    if T::represents(family) {
        return Ok(());
    }
    let support = family.support_max().unwrap_or(f64::NAN);
    Err(Error::UnsupportedDistribution(format!(
        "{family} draws (up to {support}) cannot be represented as {}",
        std::any::type_name::<T>()
    )))
}

impl<T> Population<T> {
    /// Number of items for an urn, `None` for a family.
    pub fn size(&self) -> Option<usize> {
        match self {
            Population::Finite(urn) => Some(urn.len()),
            Population::Parametric(_) => None,
        }
    }

    /// Draws `k` items under `rule`.
    ///
    /// A parametric family is sampled i.i.d. under either rule.
    ///
    /// # Errors
    /// [`Error::InsufficientPopulation`] for `Without` and `k > n`,
    /// [`Error::InvalidArgument`] for `k == 0`,
    /// [`Error::UnsupportedDistribution`] when `T` cannot hold the family's draws.
    pub fn sample(&self, k: usize, rule: Replacement, rng: &mut RandomSource) -> Result<Sample<T>>
    where
        T: Clone + Variate,
    {
        match self {
            Population::Finite(urn) => match rule {
                Replacement::Without => sample_without_replacement(urn, k, rng),
                Replacement::With => sample_with_replacement(urn, k, rng),
            },
            Population::Parametric(family) => {
                ensure_represents::<T>(family)?;
                sample_parametric(family, k, rng)?
                    .into_iter()
                    .map(|x| {
                        T::from_variate(x).ok_or_else(|| {
                            Error::UnsupportedDistribution(format!(
                                "{family} draw {x} cannot be represented as {}",
                                std::any::type_name::<T>()
                            ))
                        })
                    })
                    .collect::<Result<Vec<T>>>()
                    .map(Sample::new)
            }
        }
    }
}

impl<T> From<Urn<T>> for Population<T> {
    fn from(urn: Urn<T>) -> Self {
        Population::Finite(urn)
    }
}

impl<T> From<Family> for Population<T> {
    fn from(family: Family) -> Self {
        Population::Parametric(family)
    }
}
