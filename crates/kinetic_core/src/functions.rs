//! Built-in simulation functions.

use crate::config::{DecayConfig, SpringConfig};
use crate::traits::{
    Convergence, ConvergentFunction, SimulationFunction, Vector, VectorConvertible, VectorOf,
};
use anyhow::{Context, Result};
use std::marker::PhantomData;

/// Damped spring pulling the value toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringFunction<T: VectorConvertible> {
    target: T,
    target_vector: T::Vector,
    config: SpringConfig,
}

impl<T: VectorConvertible> SpringFunction<T> {
    /// Spring with [`SpringConfig::default`].
    pub fn new(target: T) -> Self {
        let target_vector = target.to_vector();
        Self {
            target,
            target_vector,
            config: SpringConfig::default(),
        }
    }

    pub fn with_config(target: T, config: SpringConfig) -> Result<Self> {
        config.validate().context("Invalid spring configuration.")?;
        Ok(Self {
            config,
            ..Self::new(target)
        })
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn set_target(&mut self, target: T) {
        self.target_vector = target.to_vector();
        self.target = target;
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }
}

impl<T: VectorConvertible> SimulationFunction for SpringFunction<T> {
    type Value = T;

    fn acceleration(&self, value: &VectorOf<Self>, velocity: &VectorOf<Self>) -> VectorOf<Self> {
        let spring = (*value - self.target_vector) * -self.config.stiffness;
        let damping = *velocity * -self.config.damping;
        (spring + damping) * (1.0 / self.config.mass)
    }
}

impl<T: VectorConvertible> ConvergentFunction for SpringFunction<T> {
    fn convergence(
        &self,
        value: &VectorOf<Self>,
        velocity: &VectorOf<Self>,
    ) -> Convergence<VectorOf<Self>> {
        if !velocity.is_within(self.config.velocity_threshold) {
            return Convergence::KeepRunning;
        }
        if !(*value - self.target_vector).is_within(self.config.position_threshold) {
            return Convergence::KeepRunning;
        }
        Convergence::Converged(self.target_vector)
    }
}

/// Friction-like decay; the value coasts to a stop wherever it ends up.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayFunction<T> {
    config: DecayConfig,
    _value: PhantomData<fn() -> T>,
}

impl<T: VectorConvertible> DecayFunction<T> {
    pub fn new() -> Self {
        Self {
            config: DecayConfig::default(),
            _value: PhantomData,
        }
    }

    pub fn with_config(config: DecayConfig) -> Result<Self> {
        config.validate().context("Invalid decay configuration.")?;
        Ok(Self {
            config,
            _value: PhantomData,
        })
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }
}

impl<T: VectorConvertible> Default for DecayFunction<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: VectorConvertible> SimulationFunction for DecayFunction<T> {
    type Value = T;

    fn acceleration(&self, _value: &VectorOf<Self>, velocity: &VectorOf<Self>) -> VectorOf<Self> {
        *velocity * -self.config.damping
    }
}

impl<T: VectorConvertible> ConvergentFunction for DecayFunction<T> {
    fn convergence(
        &self,
        value: &VectorOf<Self>,
        velocity: &VectorOf<Self>,
    ) -> Convergence<VectorOf<Self>> {
        if velocity.is_within(self.config.velocity_threshold) {
            Convergence::Converged(*value)
        } else {
            Convergence::KeepRunning
        }
    }
}

/// Acceleration law given by a closure `(value, velocity) -> acceleration`.
/// Has no notion of rest, so it cannot be used for convergence estimates.
pub struct CustomFunction<T, F> {
    acceleration: F,
    _value: PhantomData<fn() -> T>,
}

impl<T, F> CustomFunction<T, F>
where
    T: VectorConvertible,
    F: Fn(&T::Vector, &T::Vector) -> T::Vector,
{
    pub fn new(acceleration: F) -> Self {
        Self {
            acceleration,
            _value: PhantomData,
        }
    }
}

impl<T, F> SimulationFunction for CustomFunction<T, F>
where
    T: VectorConvertible,
    F: Fn(&T::Vector, &T::Vector) -> T::Vector,
{
    type Value = T;

    fn acceleration(&self, value: &VectorOf<Self>, velocity: &VectorOf<Self>) -> VectorOf<Self> {
        (self.acceleration)(value, velocity)
    }
}
