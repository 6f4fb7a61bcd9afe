//! Adapters implementing the crate's ports.
//!
//! - [`StdRandom`]: seedable production randomness
//! - [`ScriptedRandom`]: replayable draws for deterministic tests

pub mod scripted_random;
pub mod std_random;

pub use scripted_random::{Draw, ScriptedRandom};
pub use std_random::StdRandom;
