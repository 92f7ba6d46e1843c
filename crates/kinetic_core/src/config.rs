//! Tunable parameters for the built-in simulation functions.
//!
//! Both configs deserialize with missing fields filled from their defaults,
//! so partial JSON objects (e.g. `{"stiffness": 300}`) are accepted.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Parameters of a damped spring, F = -k·x - c·v.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant k.
    pub stiffness: f64,
    /// Damping coefficient c.
    pub damping: f64,
    pub mass: f64,
    /// Largest per-component distance from the target treated as at rest.
    pub position_threshold: f64,
    /// Largest per-component speed treated as at rest.
    pub velocity_threshold: f64,
}

impl SpringConfig {
    /// Soft spring with a single small overshoot.
    pub const GENTLE: Self = Self::preset(120.0, 14.0);

    /// Underdamped spring that visibly bounces.
    pub const WOBBLY: Self = Self::preset(180.0, 12.0);

    /// Fast spring with little overshoot.
    pub const STIFF: Self = Self::preset(400.0, 30.0);

    /// Very fast, close to critically damped.
    pub const SNAPPY: Self = Self::preset(600.0, 40.0);

    const fn preset(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            position_threshold: 0.1,
            velocity_threshold: 0.1,
        }
    }

    /// Unit-mass spring with exactly critical damping for `stiffness`.
    pub fn critically_damped(stiffness: f64) -> Self {
        Self {
            damping: 2.0 * stiffness.sqrt(),
            ..Self::preset(stiffness, 0.0)
        }
    }

    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// ζ = c / c_crit. Below one oscillates, above one creeps.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            bail!("stiffness must be positive and finite (got {}).", self.stiffness);
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            bail!("damping must be non-negative and finite (got {}).", self.damping);
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            bail!("mass must be positive and finite (got {}).", self.mass);
        }
        validate_threshold("position_threshold", self.position_threshold)?;
        validate_threshold("velocity_threshold", self.velocity_threshold)?;
        Ok(())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::preset(120.0, 12.0)
    }
}

/// Parameters of velocity-proportional decay, a = -c·v.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub damping: f64,
    pub velocity_threshold: f64,
}

impl DecayConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.damping.is_finite() && self.damping > 0.0) {
            bail!("damping must be positive and finite (got {}).", self.damping);
        }
        validate_threshold("velocity_threshold", self.velocity_threshold)
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            damping: 3.0,
            velocity_threshold: 0.1,
        }
    }
}

fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        bail!("{name} must be positive and finite (got {value}).");
    }
    Ok(())
}
