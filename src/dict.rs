//! Dict: the table, its insert/lookup paths and the rebuild.

use crate::bucket::Bucket;
use crate::error::TableError;
use crate::iter::{Iter, IterMut, Values};
use crate::mix::{Mix, SplitMix32};
use crate::probe::{locate, Probe};
use crate::reentrancy::DebugReentrancy;
use core::fmt;

/// Number of buckets of a table built by `Dict::new`.
pub const DEFAULT_CAPACITY: usize = 10;

/// Position of a key in a specific generation of a table's backing array.
///
/// A `Slot` is only meaningful for the table that produced it and only until
/// that table rebuilds. Resolving it afterwards yields `None`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Slot {
    index: usize,
    generation: u64,
}

impl Slot {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key<T, M>(&self, dict: &Dict<T, M>) -> Option<u32> {
        dict.slot_entry(*self).map(|(k, _)| k)
    }

    pub fn value<'a, T, M>(&self, dict: &'a Dict<T, M>) -> Option<&'a T> {
        dict.slot_entry(*self).map(|(_, v)| v)
    }

    pub fn value_mut<'a, T, M>(&self, dict: &'a mut Dict<T, M>) -> Option<&'a mut T> {
        dict.slot_entry_mut(*self).map(|(_, v)| v)
    }
}

/// An open-addressing map from `u32` keys to `T`.
///
/// Collisions are resolved by following the orbit of the key under the mixer
/// `M`. The table doubles whenever more than half of its buckets would be
/// occupied; there is no removal and no shrinking.
pub struct Dict<T, M = SplitMix32> {
    mixer: M,
    buckets: Box<[Bucket<T>]>,
    len: usize,
    generation: u64,
    reentrancy: DebugReentrancy,
}

impl<T> Dict<T> {
    /// Creates an empty table with `DEFAULT_CAPACITY` buckets.
    ///
    /// # Panics
    ///
    /// Panics if the initial buckets cannot be allocated.
    pub fn new() -> Self {
        Self::with_mixer(SplitMix32)
    }

    /// Creates an empty table with `capacity` buckets (at least one).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::try_with_capacity_and_mixer(capacity, SplitMix32)
    }
}

impl<T> Default for Dict<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M> Dict<T, M> {
    /// Creates an empty table with `DEFAULT_CAPACITY` buckets probing with `mixer`.
    ///
    /// # Panics
    ///
    /// Panics if the initial buckets cannot be allocated.
    pub fn with_mixer(mixer: M) -> Self {
        match Self::try_with_capacity_and_mixer(DEFAULT_CAPACITY, mixer) {
            Ok(dict) => dict,
            Err(e) => panic!("Dict::with_mixer: {e}"),
        }
    }

    pub fn try_with_capacity_and_mixer(capacity: usize, mixer: M) -> Result<Self, TableError> {
        let buckets = alloc_buckets(capacity.max(1))?;
        Ok(Self {
            mixer,
            buckets,
            len: 0,
            generation: 0,
            reentrancy: DebugReentrancy::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets in the backing array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of rebuilds this table has gone through.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.buckets, self.len)
    }

    pub fn values(&self) -> Values<'_, T> {
        Values::new(self.iter())
    }

    /// Renders capacity, occupancy and every bucket, formatting elements
    /// with `repr`.
    pub fn dump<F>(&self, repr: F) -> Dump<'_, T, M, F>
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        Dump { dict: self, repr }
    }

    #[cfg(test)]
    pub(crate) fn buckets_for_test(&self) -> &[Bucket<T>] {
        &self.buckets
    }

    fn slot_entry(&self, slot: Slot) -> Option<(u32, &T)> {
        if slot.generation != self.generation {
            return None;
        }
        self.buckets.get(slot.index)?.entry()
    }

    fn slot_entry_mut(&mut self, slot: Slot) -> Option<(u32, &mut T)> {
        if slot.generation != self.generation {
            return None;
        }
        self.buckets.get_mut(slot.index)?.entry_mut()
    }
}

impl<T, M: Mix> Dict<T, M> {
    fn probe(&self, key: u32) -> Probe {
        let _g = self.reentrancy.enter();
        locate(&self.mixer, &self.buckets, key)
    }

    pub fn find_slot(&self, key: u32) -> Option<Slot> {
        match self.probe(key) {
            Probe::Found(index) => Some(Slot {
                index,
                generation: self.generation,
            }),
            Probe::Vacant(_) => None,
        }
    }

    pub fn get(&self, key: u32) -> Option<&T> {
        match self.probe(key) {
            Probe::Found(index) => self.buckets[index].entry().map(|(_, v)| v),
            Probe::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, key: u32) -> Option<&mut T> {
        match self.probe(key) {
            Probe::Found(index) => self.buckets[index].entry_mut().map(|(_, v)| v),
            Probe::Vacant(_) => None,
        }
    }

    pub fn contains_key(&self, key: u32) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Inserts or overwrites `key`, returning the displaced value.
    ///
    /// # Panics
    ///
    /// Panics if the table needs to grow and cannot.
    pub fn insert(&mut self, key: u32, value: T) -> Option<T> {
        match self.try_insert(key, value) {
            Ok(old) => old,
            Err(e) => panic!("Dict::insert: {e}"),
        }
    }

    /// Inserts or overwrites `key`, returning the displaced value.
    ///
    /// Adding a key that would push occupancy above half the capacity first
    /// doubles the backing array. If that fails (`CapacityOverflow` or
    /// `AllocationFailed`) the table is unchanged: same capacity, length,
    /// generation and entries, and `value` is dropped.
    pub fn try_insert(&mut self, key: u32, value: T) -> Result<Option<T>, TableError> {
        let index = self.reserve_bucket(key)?;
        let bucket = &mut self.buckets[index];
        if let Bucket::Occupied { value: v, .. } = bucket {
            return Ok(Some(core::mem::replace(v, value)));
        }
        *bucket = Bucket::Occupied { key, value };
        self.len += 1;
        Ok(None)
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    ///
    /// # Panics
    ///
    /// Panics if the table needs to grow and cannot.
    pub fn get_or_insert_with<F>(&mut self, key: u32, default: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = match self.reserve_bucket(key) {
            Ok(index) => index,
            Err(e) => panic!("Dict::get_or_insert_with: {e}"),
        };
        if self.buckets[index].is_empty() {
            self.buckets[index] = Bucket::Occupied {
                key,
                value: default(),
            };
            self.len += 1;
        }
        match self.buckets[index].entry_mut() {
            Some((_, v)) => v,
            None => unreachable!("bucket filled above"),
        }
    }

    /// Index of the bucket that holds, or will hold, `key`, rebuilding first
    /// if adding `key` would cross the high-water mark.
    fn reserve_bucket(&mut self, key: u32) -> Result<usize, TableError> {
        match self.probe(key) {
            Probe::Found(index) => Ok(index),
            Probe::Vacant(index) if !over_high_water(self.len + 1, self.capacity()) => Ok(index),
            Probe::Vacant(_) => {
                self.rebuild()?;
                Ok(self.probe(key).index())
            }
        }
    }

    /// Doubles the backing array and re-places every entry along its orbit
    /// in the new capacity.
    fn rebuild(&mut self) -> Result<(), TableError> {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow)?;
        self.rebuild_into(new_capacity)
    }

    /// Re-places every entry into a fresh array of `new_capacity` buckets.
    /// The array is allocated before anything is moved, so an allocation
    /// failure leaves the table as it was.
    fn rebuild_into(&mut self, new_capacity: usize) -> Result<(), TableError> {
        let old_capacity = self.capacity();
        let fresh = alloc_buckets(new_capacity)?;

        let _g = self.reentrancy.enter();
        let mut old = core::mem::replace(&mut self.buckets, fresh);
        let expected = core::mem::replace(&mut self.len, 0);
        self.generation += 1;

        for bucket in old.iter_mut() {
            if let Some((key, value)) = bucket.take() {
                let index = match locate(&self.mixer, &self.buckets, key) {
                    Probe::Vacant(index) => index,
                    Probe::Found(_) => panic!("key {key} appeared twice during rebuild"),
                };
                self.buckets[index] = Bucket::Occupied { key, value };
                self.len += 1;
            }
        }
        drop(old);

        assert_eq!(self.len, expected, "rebuild lost entries");
        assert!(
            !over_high_water(self.len, self.capacity()),
            "rebuild left {} entries in {} buckets",
            self.len,
            self.capacity()
        );
        log::trace!(
            "rebuilt dict from {} to {} buckets with {} entries (generation {})",
            old_capacity,
            new_capacity,
            self.len,
            self.generation
        );
        Ok(())
    }
}

#[inline]
fn over_high_water(len: usize, capacity: usize) -> bool {
    len.saturating_mul(2) > capacity
}

fn alloc_buckets<T>(slots: usize) -> Result<Box<[Bucket<T>]>, TableError> {
    let mut v = Vec::new();
    v.try_reserve_exact(slots)
        .map_err(|_| TableError::AllocationFailed { slots })?;
    v.resize_with(slots, Bucket::default);
    Ok(v.into_boxed_slice())
}

impl<T, M: Mix> Extend<(u32, T)> for Dict<T, M> {
    fn extend<I: IntoIterator<Item = (u32, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, M: Mix + Default> FromIterator<(u32, T)> for Dict<T, M> {
    fn from_iter<I: IntoIterator<Item = (u32, T)>>(iter: I) -> Self {
        let mut dict = Dict::with_mixer(M::default());
        dict.extend(iter);
        dict
    }
}

impl<'a, T, M> IntoIterator for &'a Dict<T, M> {
    type Item = (u32, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, M> IntoIterator for &'a mut Dict<T, M> {
    type Item = (u32, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug, M> fmt::Debug for Dict<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Buckets<'a, T>(&'a [Bucket<T>]);
        impl<T: fmt::Debug> fmt::Debug for Buckets<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter().map(|b| b.entry())).finish()
            }
        }

        f.debug_struct("Dict")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("generation", &self.generation)
            .field("buckets", &Buckets(&self.buckets))
            .finish()
    }
}

/// `Display` adapter returned by `Dict::dump`.
pub struct Dump<'a, T, M, F> {
    dict: &'a Dict<T, M>,
    repr: F,
}

impl<T, M, F> fmt::Display for Dump<'_, T, M, F>
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "capacity: {}", self.dict.capacity())?;
        writeln!(f, "len: {}", self.dict.len())?;
        for (i, bucket) in self.dict.buckets.iter().enumerate() {
            match bucket.entry() {
                None => writeln!(f, "\tempty")?,
                Some((key, value)) => {
                    write!(f, "\t{i}: {key} -- ")?;
                    (self.repr)(value, f)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}
