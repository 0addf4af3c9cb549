use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::population::Urn;

/// Largest number of successive events, one bit each in a signature.
pub const MAX_EVENTS: usize = 64;

/// Items grouped by which events they satisfy.
///
/// Draws only depend on how many items of each signature remain, so the
/// recursion runs over count vectors instead of individual items.
struct Classes {
    signatures: Vec<u64>,
    counts: Vec<usize>,
}

impl Classes {
    fn new<T>(urn: &Urn<T>, events: &[&dyn Fn(&T) -> bool]) -> Self {
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut signatures = Vec::new();
        let mut counts = Vec::new();
        for item in urn.items() {
            let sig = events
                .iter()
                .enumerate()
                .filter(|(_, event)| event(item))
                .fold(0u64, |acc, (j, _)| acc | (1 << j));
            let slot = *index.entry(sig).or_insert_with(|| {
                signatures.push(sig);
                counts.push(0);
                signatures.len() - 1
            });
            counts[slot] += 1;
        }
        Self { signatures, counts }
    }
}

fn paths(
    classes: &Classes,
    counts: &mut Vec<usize>,
    step: usize,
    events: usize,
    remaining: usize,
    memo: &mut HashMap<Vec<usize>, f64>,
) -> f64 {
    if step == events {
        return 1.0;
    }
    if let Some(&p) = memo.get(counts.as_slice()) {
        return p;
    }

    let mut total = 0.0;
    for c in 0..counts.len() {
        let available = counts[c];
        if available == 0 || classes.signatures[c] & (1 << step) == 0 {
            continue;
        }
        let here = available as f64 / remaining as f64;
        counts[c] -= 1;
        total += here * paths(classes, counts, step + 1, events, remaining - 1, memo);
        counts[c] += 1;
    }
    memo.insert(counts.clone(), total);
    total
}

/// Probability that successive draws without replacement satisfy
/// `events[0]`, then `events[1]`, and so on.
///
/// Sums `Pr(E₁)·Pr(E₂ | E₁)·…` over every way of removing items, each factor
/// a fraction of what is left in the urn.
///
/// # Errors
/// [`Error::InsufficientPopulation`] when there are more events than items,
/// [`Error::InvalidArgument`] for no events or more than [`MAX_EVENTS`].
///
/// # Examples
/// ```
/// use urna::{Urn, ordered_draw_probability};
///
/// let deck = Urn::from_counts(&[("ace", 4), ("ten", 16), ("other", 32)])?;
/// let ace = |c: &&str| *c == "ace";
/// let ten = |c: &&str| *c == "ten";
/// let p = ordered_draw_probability(&deck, &[&ace, &ten])?;
/// assert!((p - 4.0 / 52.0 * 16.0 / 51.0).abs() < 1e-12);
/// # Ok::<(), urna::Error>(())
/// ```
pub fn ordered_draw_probability<T>(urn: &Urn<T>, events: &[&dyn Fn(&T) -> bool]) -> Result<f64> {
    let k = events.len();
    if k == 0 {
        return Err(Error::invalid("at least one event is required, got 0"));
    }
    if k > urn.len() {
        return Err(Error::InsufficientPopulation { requested: k, available: urn.len() });
    }
    if k > MAX_EVENTS {
        return Err(Error::invalid(format!("at most {MAX_EVENTS} events are supported, got {k}")));
    }

    let classes = Classes::new(urn, events);
    let mut counts = classes.counts.clone();
    let mut memo = HashMap::new();
    Ok(paths(&classes, &mut counts, 0, k, urn.len(), &mut memo))
}

/// [`ordered_draw_probability`] where event `j` is "draw `j` equals `labels[j]`".
///
/// # Errors
/// See [`ordered_draw_probability`].
pub fn ordered_label_probability<T: PartialEq>(urn: &Urn<T>, labels: &[T]) -> Result<f64> {
    let predicates: Vec<_> = labels.iter().map(|label| move |item: &T| item == label).collect();
    let events: Vec<&dyn Fn(&T) -> bool> =
        predicates.iter().map(|p| p as &dyn Fn(&T) -> bool).collect();
    ordered_draw_probability(urn, &events)
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must lie in [0, 1], got {p}")))
    }
}

/// Addition rule: `Pr(A ∪ B) = Pr(A) + Pr(B) − Pr(A ∩ B)`.
///
/// # Errors
/// [`Error::InvalidArgument`] when a probability is outside `[0, 1]` or
/// `Pr(A ∩ B)` exceeds `Pr(A)` or `Pr(B)`.
pub fn union_probability(pa: f64, pb: f64, pab: f64) -> Result<f64> {
    check_probability("Pr(A)", pa)?;
    check_probability("Pr(B)", pb)?;
    check_probability("Pr(A ∩ B)", pab)?;
    if pab > pa.min(pb) {
        return Err(Error::invalid(format!(
            "Pr(A ∩ B)={pab} cannot exceed min(Pr(A), Pr(B))={}",
            pa.min(pb)
        )));
    }
    let union = pa + pb - pab;
    if union > 1.0 + 1e-12 {
        return Err(Error::invalid(format!(
            "Pr(A) + Pr(B) − Pr(A ∩ B) = {union} exceeds 1; the three values are inconsistent"
        )));
    }
    Ok(union.min(1.0))
}

/// Multiplication rule: `Pr(A ∩ B) = Pr(A)·Pr(B | A)`.
///
/// # Errors
/// [`Error::InvalidArgument`] when either factor is outside `[0, 1]`.
pub fn joint_probability(pa: f64, pb_given_a: f64) -> Result<f64> {
    check_probability("Pr(A)", pa)?;
    check_probability("Pr(B | A)", pb_given_a)?;
    Ok(pa * pb_given_a)
}
