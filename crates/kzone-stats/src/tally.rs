use std::{
    borrow::Borrow,
    cmp::Reverse,
    collections::{BTreeMap, btree_map},
};

use serde::{Deserialize, Serialize};

/// Occurrence counts keyed by category.
///
/// Counts only grow. Keys are kept in sorted order so that iteration, and
/// therefore serialized output, does not depend on insertion order.
/// Serialized as a plain map from key to count.
///
/// # Examples
///
/// ```
/// use kzone_stats::tally::Tally;
///
/// let tally = ["FF", "SL", "FF", "CH"].into_iter().collect::<Tally<_>>();
/// assert_eq!(tally.get("FF"), 2);
/// assert_eq!(tally.total(), 4);
/// assert_eq!(tally.share("FF"), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "K: Serialize",
        deserialize = "K: Ord + Deserialize<'de>"
    )
)]
pub struct Tally<K> {
    counts: BTreeMap<K, u64>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K> Tally<K>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key` by one.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: u64) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    /// Returns the count for `key`, zero if it was never seen.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, u64> {
        self.counts.iter()
    }

    /// Fraction of the total held by `key`.
    ///
    /// Returns `None` if the tally is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn share<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let total = self.total();
        (total > 0).then(|| self.get(key) as f64 / total as f64)
    }

    /// Fraction of the total held by every key, in key order.
    #[expect(clippy::cast_precision_loss)]
    pub fn shares(&self) -> impl Iterator<Item = (&K, f64)> {
        let total = self.total() as f64;
        self.counts
            .iter()
            .map(move |(key, &count)| (key, count as f64 / total))
    }

    /// Keys ordered by descending count, ties broken by key order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&K, u64)> {
        let mut entries = self
            .counts
            .iter()
            .map(|(key, &count)| (key, count))
            .collect::<Vec<_>>();
        entries.sort_by_key(|&(key, count)| (Reverse(count), key));
        entries
    }
}

impl<K> FromIterator<K> for Tally<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

impl<K> Extend<K> for Tally<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tally<K> {
    type Item = (&'a K, &'a u64);
    type IntoIter = btree_map::Iter<'a, K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let tally = Tally::<String>::new();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.get("FF"), 0);
        assert_eq!(tally.share("FF"), None);
        assert_eq!(tally.shares().count(), 0);
    }

    #[test]
    fn test_counts_are_order_independent() {
        let a = ["SL", "FF", "FF", "CH", "FF"]
            .into_iter()
            .collect::<Tally<_>>();
        let b = ["FF", "CH", "FF", "SL", "FF"]
            .into_iter()
            .collect::<Tally<_>>();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_shares_sum_to_one() {
        let tally = ["FF", "FF", "SL", "CH"].into_iter().collect::<Tally<_>>();
        let sum = tally.shares().map(|(_, share)| share).sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(tally.share("FF"), Some(0.5));
        assert_eq!(tally.share("KC"), Some(0.0));
    }

    #[test]
    fn test_most_common() {
        let tally = ["SL", "FF", "CH", "FF", "SL", "CU"]
            .into_iter()
            .collect::<Tally<_>>();
        let ranked = tally.most_common();
        assert_eq!(
            ranked,
            vec![(&"FF", 2), (&"SL", 2), (&"CH", 1), (&"CU", 1)]
        );
    }

    #[test]
    fn test_serde_is_plain_map() {
        let tally = ["FF-5", "FF-1", "FF-1"]
            .into_iter()
            .map(str::to_owned)
            .collect::<Tally<_>>();
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"FF-1":2,"FF-5":1}"#);
        let parsed: Tally<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tally);
    }
}
