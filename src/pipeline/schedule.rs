//! Exploration-rate schedules applied by the harness between training trials.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How ε evolves over training trials.
///
/// `trial` is 1-based: the value for trial `t` is set just before it runs.
/// Every result is clamped into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ExplorationSchedule {
    /// ε stays at its initial value
    Constant,
    /// ε₀ − step·t
    Linear { step: f64 },
    /// baseᵗ
    Power { base: f64 },
    /// 1/t²
    InverseSquare,
    /// e^(−rate·t)
    Exponential { rate: f64 },
    /// cos(rate·t)
    Cosine { rate: f64 },
}

impl ExplorationSchedule {
    /// ε for training trial `trial`, starting from `initial`.
    pub fn epsilon(&self, initial: f64, trial: usize) -> f64 {
        let t = trial as f64;
        let raw = match *self {
            ExplorationSchedule::Constant => initial,
            ExplorationSchedule::Linear { step } => initial - step * t,
            ExplorationSchedule::Power { base } => base.powf(t),
            ExplorationSchedule::InverseSquare if trial == 0 => initial,
            ExplorationSchedule::InverseSquare => 1.0 / (t * t),
            ExplorationSchedule::Exponential { rate } => (-rate * t).exp(),
            ExplorationSchedule::Cosine { rate } => (rate * t).cos(),
        };
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// Check the schedule's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a non-positive step or
    /// rate, or a power base outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        let ok = match *self {
            ExplorationSchedule::Constant | ExplorationSchedule::InverseSquare => true,
            ExplorationSchedule::Linear { step } => step.is_finite() && step > 0.0,
            ExplorationSchedule::Power { base } => base > 0.0 && base < 1.0,
            ExplorationSchedule::Exponential { rate } | ExplorationSchedule::Cosine { rate } => {
                rate.is_finite() && rate > 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidConfiguration {
                message: format!("invalid exploration schedule {self:?}"),
            })
        }
    }
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        ExplorationSchedule::Linear { step: 0.05 }
    }
}
