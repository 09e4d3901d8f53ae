//! Predicate-based list filtering.

use serde::{Deserialize, Serialize};

/// A payload paired with the parameters a predicate inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<D, P> {
    /// Payload returned when the entry is kept.
    pub data: D,
    /// Input to the filter predicate.
    pub params: P,
}

impl<D, P> Entry<D, P> {
    /// Pairs `data` with its predicate `params`.
    pub fn new(data: D, params: P) -> Self {
        Self { data, params }
    }
}

/// Returns the `data` of every entry whose predicate over `params` is false.
///
/// # Examples
///
/// ```
/// use verity_support::{Entry, filter_by_predicate};
///
/// let kept = filter_by_predicate([Entry::new('a', 1), Entry::new('b', 2)], |x| *x > 1);
/// assert_eq!(kept, vec!['a']);
/// ```
pub fn filter_by_predicate<D, P, I, F>(records: I, predicate: F) -> Vec<D>
where
    I: IntoIterator<Item = Entry<D, P>>,
    F: Fn(&P) -> bool,
{
    records
        .into_iter()
        .filter(|entry| !predicate(&entry.params))
        .map(|entry| entry.data)
        .collect()
}
