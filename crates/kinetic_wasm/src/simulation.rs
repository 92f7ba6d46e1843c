use crate::{parse_spring_config, to_js_error};
use anyhow::Result;
use kinetic_core::config::SpringConfig;
use kinetic_core::functions::SpringFunction;
use kinetic_core::simulation::Simulation;
use wasm_bindgen::prelude::*;

/// Live scalar spring animation, stepped once per JS frame.
#[wasm_bindgen]
pub struct WasmSimulation {
    simulation: Simulation<SpringFunction<f64>>,
}

impl WasmSimulation {
    pub(crate) fn build(value: f64, target: f64, config: SpringConfig) -> Result<Self> {
        let function = SpringFunction::with_config(target, config)?;
        Ok(Self {
            simulation: Simulation::new(function, value),
        })
    }
}

#[wasm_bindgen]
impl WasmSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(value: f64, target: f64, config: JsValue) -> Result<WasmSimulation, JsValue> {
        console_error_panic_hook::set_once();

        let config = parse_spring_config(config)?;
        Self::build(value, target, config).map_err(to_js_error)
    }

    /// Advances by the frame duration `dt` (seconds). Returns true once at rest.
    pub fn step(&mut self, dt: f64) -> bool {
        self.simulation.step(dt)
    }

    /// Advances by `dt` without snapping to rest.
    pub fn advance(&mut self, dt: f64) {
        self.simulation.advance(dt);
    }

    pub fn has_converged(&self) -> bool {
        self.simulation.has_converged()
    }

    pub fn get_value(&self) -> f64 {
        self.simulation.value()
    }

    pub fn set_value(&mut self, value: f64) {
        self.simulation.set_value(value);
    }

    pub fn get_velocity(&self) -> f64 {
        self.simulation.velocity()
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.simulation.set_velocity(velocity);
    }

    pub fn get_target(&self) -> f64 {
        *self.simulation.function().target()
    }

    /// Retargets the spring, keeping the current value and velocity.
    pub fn set_target(&mut self, target: f64) {
        self.simulation.function_mut().set_target(target);
    }

    /// Seconds until the animation settles from its current state, if it
    /// does so within `maximum_duration`.
    pub fn estimated_duration(&self, maximum_duration: f64) -> Option<f64> {
        self.simulation
            .estimated_convergence(maximum_duration)
            .map(|estimate| estimate.duration)
    }
}
