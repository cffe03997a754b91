//! Storage slot of the backing array.

/// A single slot. Emptiness is carried by the variant, so every `u32` is a
/// legal key.
#[derive(Clone, Debug)]
pub(crate) enum Bucket<T> {
    Empty,
    Occupied {
        key: u32,
        value: T,
    },
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Bucket::Empty
    }
}

impl<T> Bucket<T> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Bucket::Empty)
    }

    #[inline]
    pub(crate) fn holds(&self, key: u32) -> bool {
        matches!(self, Bucket::Occupied { key: k, .. } if *k == key)
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(u32, &T)> {
        match self {
            Bucket::Empty => None,
            Bucket::Occupied { key, value } => Some((*key, value)),
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(u32, &mut T)> {
        match self {
            Bucket::Empty => None,
            Bucket::Occupied { key, value } => Some((*key, value)),
        }
    }

    /// Takes the bucket's content, leaving it empty.
    #[inline]
    pub(crate) fn take(&mut self) -> Option<(u32, T)> {
        match core::mem::take(self) {
            Bucket::Empty => None,
            Bucket::Occupied { key, value } => Some((key, value)),
        }
    }
}
