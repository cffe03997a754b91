//! Failures surfaced by growing operations.

use std::fmt;

/// Reasons a table could not allocate or grow its backing array.
///
/// When either is returned the table is left exactly as it was before the
/// call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TableError {
    /// Doubling the number of buckets overflows `usize`.
    CapacityOverflow,
    /// The allocator could not provide `slots` buckets.
    AllocationFailed { slots: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::CapacityOverflow => f.write_str("bucket count overflows usize"),
            TableError::AllocationFailed { slots } => {
                write!(f, "failed to allocate {slots} buckets")
            }
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            TableError::CapacityOverflow.to_string(),
            "bucket count overflows usize"
        );
        assert_eq!(
            TableError::AllocationFailed { slots: 40 }.to_string(),
            "failed to allocate 40 buckets"
        );
    }
}
