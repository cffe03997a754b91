//! Iterators over a `Dict` in backing-array order.
//!
//! Order is an artifact of the probe sequences and the current capacity, not
//! insertion order. Each live entry is produced exactly once. The iterators
//! borrow the table, so it cannot rebuild underneath them.

use crate::bucket::Bucket;
use core::iter::FusedIterator;

/// Iterator over `(key, &value)` pairs.
#[derive(Debug)]
pub struct Iter<'a, T> {
    buckets: &'a [Bucket<T>],
    position: usize,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            position: self.position,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(buckets: &'a [Bucket<T>], len: usize) -> Self {
        Self {
            buckets,
            position: 0,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (u32, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bucket) = self.buckets.get(self.position) {
            self.position += 1;
            if let Some(entry) = bucket.entry() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over `(key, &mut value)` pairs.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    it: core::slice::IterMut<'a, Bucket<T>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(buckets: &'a mut [Bucket<T>], len: usize) -> Self {
        Self {
            it: buckets.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (u32, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.it.by_ref() {
            if let Some(entry) = bucket.entry_mut() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator over values.
#[derive(Debug)]
pub struct Values<'a, T> {
    it: Iter<'a, T>,
}

impl<T> Clone for Values<'_, T> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
        }
    }
}

impl<'a, T> Values<'a, T> {
    pub(crate) fn new(it: Iter<'a, T>) -> Self {
        Self { it }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}
impl<T> FusedIterator for Values<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::Dict;
    use std::collections::BTreeMap;

    #[test]
    fn empty_table_yields_nothing() {
        let d: Dict<i32> = Dict::new();
        let mut it = d.iter();
        assert_eq!(it.len(), 0);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    /// Invariant: every live entry is produced exactly once.
    #[test]
    fn yields_each_entry_once() {
        let mut d = Dict::new();
        let mut model = BTreeMap::new();
        for k in 0..40u32 {
            let key = k.wrapping_mul(40_503);
            d.insert(key, k);
            model.insert(key, k);
        }
        let mut seen = BTreeMap::new();
        for (k, v) in &d {
            assert!(seen.insert(k, *v).is_none(), "key {k} produced twice");
        }
        assert_eq!(seen, model);
    }

    /// Invariant: order is storage order, so two fresh iterators over the
    /// same snapshot agree.
    #[test]
    fn order_is_stable_for_a_snapshot() {
        let d: Dict<u32> = (0..25u32).map(|k| (k * 11, k)).collect();
        let a: Vec<u32> = d.iter().map(|(k, _)| k).collect();
        let b: Vec<u32> = d.iter().map(|(k, _)| k).collect();
        assert_eq!(a, b);
    }

    /// Invariant: the iterator is exhausted permanently, it never wraps.
    #[test]
    fn exhaustion_is_permanent() {
        let d: Dict<u8> = [(1, 1), (2, 2)].into_iter().collect();
        let mut it = d.iter();
        assert_eq!(it.len(), 2);
        it.next();
        it.next();
        assert_eq!(it.len(), 0);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    /// Invariant: cloning needs no `T: Clone`; a clone resumes from the
    /// same position independently.
    #[test]
    fn clone_resumes_without_clone_bound() {
        struct Opaque(u32);
        let d: Dict<Opaque> = (0..6u32).map(|k| (k, Opaque(k))).collect();
        let mut it = d.iter();
        it.next();
        let rest: Vec<u32> = it.clone().map(|(_, v)| v.0).collect();
        assert_eq!(rest.len(), 5);
        assert_eq!(it.map(|(_, v)| v.0).collect::<Vec<_>>(), rest);

        let vals = d.values();
        assert_eq!(vals.clone().count(), 6);
        assert_eq!(vals.count(), 6);
    }

    #[test]
    fn iter_mut_updates_values() {
        let mut d: Dict<u32> = (0..10u32).map(|k| (k, k)).collect();
        for (k, v) in d.iter_mut() {
            *v += k;
        }
        for (_, v) in &mut d {
            *v += 1;
        }
        for k in 0..10u32 {
            assert_eq!(d.get(k), Some(&(2 * k + 1)));
        }
    }

    #[test]
    fn values_match_entries() {
        let d: Dict<u32> = (0..7u32).map(|k| (k + 100, k)).collect();
        let mut vals: Vec<u32> = d.values().copied().collect();
        vals.sort_unstable();
        assert_eq!(vals, (0..7).collect::<Vec<_>>());
        assert_eq!(d.values().len(), 7);
    }
}
