use crate::error::{Error, Result};

fn ensure_categories(d: usize) -> Result<()> {
    if d == 0 {
        return Err(Error::invalid("number of categories d must be positive, got 0"));
    }
    Ok(())
}

/// Probability that `n` uniform draws from `d` categories share at least
/// one category: `1 − ∏_{i<n} (d − i)/d`.
///
/// Exactly 0 for `n ≤ 1` and exactly 1 once `n > d` (pigeonhole).
///
/// # Errors
/// [`Error::InvalidArgument`] for `d == 0`.
///
/// # Examples
/// ```
/// let p = urna::birthday_probability(23, 365)?;
/// assert!((p - 0.507).abs() < 1e-3);
/// # Ok::<(), urna::Error>(())
/// ```
pub fn birthday_probability(n: usize, d: usize) -> Result<f64> {
    ensure_categories(d)?;
    if n <= 1 {
        return Ok(0.0);
    }
    if n > d {
        return Ok(1.0);
    }
    let days = d as f64;
    let distinct: f64 = (0..n).map(|i| (d - i) as f64 / days).product();
    Ok(1.0 - distinct)
}

/// Smallest group size whose collision probability reaches `target`.
///
/// # Errors
/// [`Error::InvalidArgument`] for `d == 0` or `target ∉ (0, 1]`.
pub fn birthday_group_size(target: f64, d: usize) -> Result<usize> {
    ensure_categories(d)?;
    if !(target > 0.0 && target <= 1.0) {
        return Err(Error::invalid(format!("target probability must lie in (0, 1], got {target}")));
    }

    let days = d as f64;
    let mut distinct = 1.0;
    for n in 1..=d {
        distinct *= (d - (n - 1)) as f64 / days;
        if distinct <= 1.0 - target {
            return Ok(n);
        }
    }
    Ok(d + 1)
}
