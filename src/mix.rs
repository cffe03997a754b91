//! Mixing functions that drive the probe sequence.
//!
//! A probe sequence is the orbit of the key under repeated application of
//! `Mix::mix`, reduced modulo the table capacity. The table treats the mixer
//! as an opaque pure function; it must be deterministic and should spread
//! nearby inputs across the whole `u32` range.

/// A deterministic 32-bit rehash step.
///
/// Implementations must return the same output for the same input for the
/// lifetime of a table. A mixer with a fixed point `x == mix(x)` (or any short
/// cycle) makes probing for colliding keys fail; the table detects that and
/// panics rather than looping.
pub trait Mix {
    fn mix(&self, state: u32) -> u32;
}

/// Golden-ratio increment followed by the murmur3 32-bit finaliser.
///
/// Bijective over `u32` and free of fixed points, so every probe orbit is long.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SplitMix32;

impl Mix for SplitMix32 {
    #[inline]
    fn mix(&self, state: u32) -> u32 {
        let mut z = state.wrapping_add(0x9e37_79b9);
        z = (z ^ (z >> 16)).wrapping_mul(0x85eb_ca6b);
        z = (z ^ (z >> 13)).wrapping_mul(0xc2b2_ae35);
        z ^ (z >> 16)
    }
}

/// Linear congruential step `x * 1664525 + 1013904223 (mod 2^32)`.
///
/// Full period over `u32`. Cheaper than `SplitMix32` but its low bits are
/// weak, which shows up as longer probe chains on power-of-two capacities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Lcg32;

impl Mix for Lcg32 {
    #[inline]
    fn mix(&self, state: u32) -> u32 {
        state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
    }
}

impl<M: Mix + ?Sized> Mix for &M {
    #[inline]
    fn mix(&self, state: u32) -> u32 {
        (**self).mix(state)
    }
}
