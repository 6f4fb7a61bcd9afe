//! Randomness port - the single source of every stochastic draw the agent makes.

/// Source of uniform draws for exploration and tie-breaking.
///
/// The agent routes every random decision through this trait, so tests can
/// substitute a scripted sequence and assert exactly which branch ran.
///
/// # Examples
///
/// ```
/// use smartcab::{adapters::StdRandom, ports::RandomSource};
///
/// let mut rng = StdRandom::seeded(7);
/// let roll = rng.roll();
/// assert!((0.0..1.0).contains(&roll));
/// assert!(rng.pick(4) < 4);
/// ```
pub trait RandomSource: Send {
    /// Uniform sample in [0, 1).
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`.
    ///
    /// Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}
