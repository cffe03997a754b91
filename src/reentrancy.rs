//! Catches a mixer that calls back into the table it is serving.
//!
//! Two places hand control to `Mix::mix` while the table is mid-operation:
//!
//! - `Dict::probe`, the single lookup path behind `get`, `get_mut`,
//!   `contains_key`, `find_slot`, `insert`, `try_insert` and
//!   `get_or_insert_with`;
//! - `Dict::rebuild_into`, between swapping in the larger array and placing
//!   the last moved entry.
//!
//! Both hold a `Section` for their duration. Opening a second one on the same
//! table before the first closes panics in debug builds. Release builds keep
//! no counter, and `Section` is zero-sized.

use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Raw pointer marker: a `Dict` is neither `Send` nor `Sync`.
    _single_thread: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Opens a section; it closes when the returned value drops.
    ///
    /// # Panics
    ///
    /// In debug builds, if a section is already open.
    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "reentrancy detected: nested entry into Dict"
            );
            Section { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Section {
                _owner: PhantomData,
            }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.busy.set(false);
    }
}
