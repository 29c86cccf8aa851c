//! Seeded dice-style random number generation.
//!
//! Every generator in the crate draws from a [`RandomSource`] handed in by
//! the caller, so a run is reproducible from its seed alone and tests can
//! substitute a scripted source.

mod dice;

pub use dice::{derive_seed, Dice};

#[cfg(test)]
pub(crate) use dice::Scripted;

/// Source of dice rolls.
///
/// Only [`roll`](RandomSource::roll) is required; the other methods are
/// expressed in terms of it.
pub trait RandomSource {
    /// Rolls `dice` dice with `sides` faces each and returns the total.
    ///
    /// Rolling zero dice, or dice with zero sides, yields 0.
    fn roll(&mut self, dice: u32, sides: u32) -> i32;

    /// Rolls a single die with `sides` faces.
    fn die(&mut self, sides: u32) -> i32 {
        self.roll(1, sides)
    }

    /// Returns a value in `0..n`, or 0 when `n` is 0.
    fn roll_zero(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let sides = u32::try_from(n).unwrap_or(u32::MAX);
        (self.roll(1, sides) - 1) as usize
    }

    /// Returns true with the given percentage probability.
    fn chance(&mut self, percent: u32) -> bool {
        percent > 0 && self.roll(1, 100) <= percent as i32
    }

    /// Returns a uniformly distributed value in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.roll(1, 1_000_000) - 1) as f64 / 1_000_000.0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, dice: u32, sides: u32) -> i32 {
        (**self).roll(dice, sides)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll(&mut self, dice: u32, sides: u32) -> i32 {
        (**self).roll(dice, sides)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}
