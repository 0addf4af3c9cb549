mod read;

pub use read::ReadError;

use crate::error::Result;
use crate::statistics::Statistic;

/// Ordered sequence of items drawn in one sampling call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample<T> {
    /// Observations in draw order.
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the observations in draw order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Estimate a statistic from the sample data
    ///
    /// # Errors
    /// Whatever the statistic reports for this data.
    pub fn estimate<Output>(&self, statistic: impl Statistic<Self, Output>) -> Result<Output> {
        statistic.compute(self)
    }

    /// True when some item occurs more than once.
    ///
    /// Quadratic, which is fine for the group sizes trials look at.
    pub fn has_duplicates(&self) -> bool
    where
        T: PartialEq,
    {
        self.data
            .iter()
            .enumerate()
            .any(|(i, x)| self.data[i + 1..].contains(x))
    }

    /// Number of items satisfying `pred`.
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.data.iter().filter(|x| pred(x)).count()
    }
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sample<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> From<Vec<T>> for Sample<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_detected() {
        assert!(Sample::new(vec![3, 1, 4, 1]).has_duplicates());
        assert!(!Sample::new(vec![3, 1, 4]).has_duplicates());
        assert!(!Sample::<u8>::new(vec![]).has_duplicates());
    }

    #[test]
    fn count_applies_predicate() {
        let s: Sample<i32> = [-1, 1, 1, -1, 1].into_iter().collect();
        assert_eq!(s.count(|&x| x > 0), 3);
        assert_eq!(s.len(), 5);
    }
}
