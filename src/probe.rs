//! Probe engine: walks the orbit of a key under the mixer.

use crate::bucket::Bucket;
use crate::mix::Mix;

/// Maximum number of probe steps, as a multiple of the capacity.
///
/// At a load factor of at most one half, a well-distributed mixer finds an
/// empty slot within a handful of steps; running out of rounds means the
/// mixer has a short cycle or the array is corrupt.
pub(crate) const PROBE_ROUNDS: usize = 8;

/// Lower bound on the probe budget, so tiny tables (1, 2 or 4 buckets) do
/// not run out of steps on an unlucky but valid orbit.
pub(crate) const MIN_PROBE_STEPS: usize = 128;

/// Outcome of `locate`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// The bucket at this index holds the key.
    Found(usize),
    /// The key is absent; this is the first empty bucket on its orbit.
    Vacant(usize),
}

impl Probe {
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Probe::Found(i) | Probe::Vacant(i) => i,
        }
    }
}

#[inline]
fn home(state: u32, capacity: usize) -> usize {
    state as usize % capacity
}

/// Finds the bucket for `key`.
///
/// # Panics
///
/// Panics if `buckets` is empty, or if no matching or empty bucket is met
/// within `max(PROBE_ROUNDS * buckets.len(), MIN_PROBE_STEPS)` steps.
pub(crate) fn locate<T, M>(mixer: &M, buckets: &[Bucket<T>], key: u32) -> Probe
where
    M: Mix + ?Sized,
{
    let capacity = buckets.len();
    assert!(capacity > 0, "probing a table without buckets");

    let limit = capacity.saturating_mul(PROBE_ROUNDS).max(MIN_PROBE_STEPS);
    let mut state = key;
    for _ in 0..limit {
        let index = home(state, capacity);
        let bucket = &buckets[index];
        if bucket.is_empty() {
            return Probe::Vacant(index);
        }
        if bucket.holds(key) {
            return Probe::Found(index);
        }
        state = mixer.mix(state);
    }

    panic!(
        "probe sequence for key {} exhausted after {} steps over {} buckets",
        key, limit, capacity
    );
}
