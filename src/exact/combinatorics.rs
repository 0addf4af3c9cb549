use itertools::Itertools;
use statrs::function::factorial::binomial;

use crate::error::{Error, Result};
use crate::population::Urn;

/// Enumeration refuses to visit more arrangements than this.
pub const MAX_ARRANGEMENTS: f64 = 5e7;

/// `C(n, k)`, the number of k-subsets of n items.
pub fn choose(n: u64, k: u64) -> f64 {
    binomial(n, k)
}

/// `n!/(n − k)!`, the number of ordered k-draws without replacement.
pub fn permutations(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    (n - k + 1..=n).map(|i| i as f64).product()
}

fn check_draw<T>(urn: &Urn<T>, k: usize, arrangements: f64) -> Result<()> {
    if k == 0 {
        return Err(Error::invalid("draw size k must be positive, got k=0"));
    }
    if k > urn.len() {
        return Err(Error::InsufficientPopulation { requested: k, available: urn.len() });
    }
    if arrangements > MAX_ARRANGEMENTS {
        return Err(Error::invalid(format!(
            "{arrangements} arrangements exceed the enumeration limit {MAX_ARRANGEMENTS}"
        )));
    }
    Ok(())
}

/// Exact probability that an ordered k-draw without replacement satisfies
/// `accept`, by visiting every arrangement of item positions.
///
/// # Errors
/// [`Error::InsufficientPopulation`] when `k > n`, [`Error::InvalidArgument`]
/// for `k == 0` or more than [`MAX_ARRANGEMENTS`] arrangements.
pub fn enumerate_ordered<T>(
    urn: &Urn<T>,
    k: usize,
    accept: impl Fn(&[&T]) -> bool,
) -> Result<f64> {
    let total = permutations(urn.len() as u64, k as u64);
    check_draw(urn, k, total)?;

    let items = urn.items();
    let hits = (0..items.len())
        .permutations(k)
        .filter(|positions| {
            let draw: Vec<&T> = positions.iter().map(|&p| &items[p]).collect();
            accept(&draw)
        })
        .count();
    Ok(hits as f64 / total)
}

/// Exact probability that an unordered k-subset satisfies `accept`.
///
/// # Errors
/// Same conditions as [`enumerate_ordered`], counted in subsets.
pub fn enumerate_unordered<T>(
    urn: &Urn<T>,
    k: usize,
    accept: impl Fn(&[&T]) -> bool,
) -> Result<f64> {
    let total = choose(urn.len() as u64, k as u64);
    check_draw(urn, k, total)?;

    let hits = urn
        .items()
        .iter()
        .combinations(k)
        .filter(|hand| accept(hand))
        .count();
    Ok(hits as f64 / total)
}
