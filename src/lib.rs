//! rehash-dict: a single-threaded, open-addressing map from `u32` keys to
//! arbitrary values, probing along the orbit of a mixing function.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small map for pre-hashed 32-bit keys whose collision scheme
//!   needs no tombstones and no secondary structure.
//! - Layers:
//!   - `Bucket<T>`: one slot, `Empty` or `Occupied { key, value }`. Because
//!     emptiness is a tag, every `u32` is a legal key; no value is
//!     reserved as an empty marker.
//!   - `probe::locate`: the probe engine. The probe sequence of a key is
//!     `key, mix(key), mix(mix(key)), ...` reduced modulo the capacity; it
//!     stops at the bucket holding the key or the first empty bucket.
//!   - `Dict<T, M>`: owns the backing array, tracks occupancy, upserts and
//!     looks up, and doubles itself (the rebuild) before occupancy would
//!     exceed half the capacity.
//!   - `Iter`/`IterMut`/`Values`: cursors over the backing array in storage
//!     order.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics).
//! - No deletion: removing a bucket from the middle of a probe chain would
//!   cut off every colliding key stored behind it.
//! - No shrinking; growth factor is a fixed 2x.
//! - Probe sequences depend on the capacity, so a rebuild re-places every
//!   entry from scratch.
//!
//! Invalidation
//! - References and iterators borrow the table, so the borrow checker rules
//!   out holding them across an `insert` that could rebuild.
//! - `Slot` is the escape hatch for a position that outlives a borrow: it
//!   records the table generation and resolves to `None` once a rebuild has
//!   happened.
//!
//! Failure boundaries
//! - Allocation failure (or capacity overflow) on creation or rebuild is a
//!   `TableError` from the `try_*` methods; the table is left untouched. The
//!   plain methods panic, like `Vec::push`.
//! - A probe that does not terminate within `max(8 * capacity, 128)` steps
//!   (a mixer with a short cycle, or corruption) panics.
//! - A debug-only reentrancy guard panics if a mixer re-enters its table
//!   while a probe or rebuild is in progress.

mod bucket;
pub mod dict;
mod dict_proptest;
mod error;
pub mod iter;
pub mod mix;
mod probe;
mod reentrancy;

// Public surface
pub use dict::{Dict, Dump, Slot, DEFAULT_CAPACITY};
pub use error::TableError;
pub use iter::{Iter, IterMut, Values};
pub use mix::{Lcg32, Mix, SplitMix32};
