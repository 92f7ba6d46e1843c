use crate::solvers::{estimate_convergence, integrate, ConvergenceEstimate};
use crate::traits::{Convergence, ConvergentFunction, SimulationFunction, VectorConvertible, VectorOf};
use num_traits::Zero;

/// Live simulation state driven by an external frame clock.
///
/// Holds the function together with the current value and velocity, and
/// advances them by whatever frame duration the caller observed.
pub struct Simulation<F: SimulationFunction> {
    function: F,
    value: VectorOf<F>,
    velocity: VectorOf<F>,
    converged: bool,
}

impl<F: SimulationFunction> Simulation<F> {
    /// Starts at `value` with zero velocity.
    pub fn new(function: F, value: F::Value) -> Self {
        Self {
            function,
            value: value.to_vector(),
            velocity: <VectorOf<F> as Zero>::zero(),
            converged: false,
        }
    }

    pub fn with_velocity(mut self, velocity: F::Value) -> Self {
        self.velocity = velocity.to_vector();
        self
    }

    pub fn value(&self) -> F::Value {
        F::Value::from_vector(self.value)
    }

    pub fn velocity(&self) -> F::Value {
        F::Value::from_vector(self.velocity)
    }

    pub fn set_value(&mut self, value: F::Value) {
        self.value = value.to_vector();
        self.converged = false;
    }

    pub fn set_velocity(&mut self, velocity: F::Value) {
        self.velocity = velocity.to_vector();
        self.converged = false;
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    /// Mutable access to the function. Any change may move the rest point,
    /// so the simulation is considered running again.
    pub fn function_mut(&mut self) -> &mut F {
        self.converged = false;
        &mut self.function
    }

    pub fn set_function(&mut self, function: F) {
        self.function = function;
        self.converged = false;
    }

    /// Whether the last [`Simulation::step`] left the simulation at rest.
    pub fn has_converged(&self) -> bool {
        self.converged
    }

    /// Integrates by `dt` seconds without checking for rest.
    pub fn advance(&mut self, dt: f64) {
        (self.value, self.velocity) = integrate(&self.function, self.value, self.velocity, dt);
    }
}

impl<F: ConvergentFunction> Simulation<F> {
    /// Integrates by `dt` seconds and snaps to the rest value once the
    /// function reports convergence. Does nothing while already at rest.
    ///
    /// Returns whether the simulation is at rest.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.converged {
            return true;
        }

        self.advance(dt);

        if let Convergence::Converged(rest) = self.function.convergence(&self.value, &self.velocity) {
            log::trace!("simulation came to rest at {rest:?}");
            self.value = rest;
            self.velocity = <VectorOf<F> as Zero>::zero();
            self.converged = true;
        }

        self.converged
    }

    /// Predicts where and when the simulation settles from its current state.
    pub fn estimated_convergence(
        &self,
        maximum_duration: f64,
    ) -> Option<ConvergenceEstimate<F::Value>> {
        estimate_convergence(
            &self.function,
            &self.value(),
            &self.velocity(),
            maximum_duration,
        )
    }
}
