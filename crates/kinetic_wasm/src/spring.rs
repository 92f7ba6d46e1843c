use crate::{parse_spring_config, to_js_error};
use anyhow::Result;
use kinetic_core::config::SpringConfig;
use kinetic_core::functions::SpringFunction;
use kinetic_core::solvers::{estimate_convergence, ConvergenceEstimate};
use kinetic_core::traits::{SimulationFunction, VectorConvertible};
use wasm_bindgen::prelude::*;

/// Scalar spring toward a fixed target.
#[wasm_bindgen]
pub struct WasmSpring {
    function: SpringFunction<f64>,
}

impl WasmSpring {
    pub(crate) fn build(target: f64, config: SpringConfig) -> Result<Self> {
        Ok(Self {
            function: SpringFunction::with_config(target, config)?,
        })
    }

    pub(crate) fn estimate(
        &self,
        value: f64,
        velocity: f64,
        maximum_duration: f64,
    ) -> Option<ConvergenceEstimate<f64>> {
        estimate_convergence(&self.function, &value, &velocity, maximum_duration)
    }
}

#[wasm_bindgen]
impl WasmSpring {
    /// `config` is an optional object with any of `stiffness`, `damping`,
    /// `mass`, `position_threshold`, `velocity_threshold`.
    #[wasm_bindgen(constructor)]
    pub fn new(target: f64, config: JsValue) -> Result<WasmSpring, JsValue> {
        console_error_panic_hook::set_once();

        let config = parse_spring_config(config)?;
        Self::build(target, config).map_err(to_js_error)
    }

    pub fn get_target(&self) -> f64 {
        *self.function.target()
    }

    pub fn acceleration(&self, value: f64, velocity: f64) -> f64 {
        let a = self
            .function
            .acceleration(&value.to_vector(), &velocity.to_vector());
        f64::from_vector(a)
    }

    /// Returns `{ value, duration }`, or `undefined` when the spring does not
    /// settle within `maximum_duration` seconds.
    pub fn estimate_convergence(
        &self,
        value: f64,
        velocity: f64,
        maximum_duration: f64,
    ) -> Result<JsValue, JsValue> {
        let estimate = self.estimate(value, velocity, maximum_duration);
        serde_wasm_bindgen::to_value(&estimate).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::WasmSpring;
    use kinetic_core::config::SpringConfig;
    use kinetic_core::solvers::SIMULATION_FRAME_DURATION;

    #[test]
    fn build_rejects_invalid_config() {
        let config = SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        };
        let err = WasmSpring::build(1.0, config).err().expect("expected error");
        assert!(format!("{err:#}").contains("mass"));
    }

    #[test]
    fn estimate_matches_core() {
        let spring = WasmSpring::build(100.0, SpringConfig::critically_damped(100.0))
            .expect("valid config");
        let estimate = spring
            .estimate(0.0, 0.0, 5.0)
            .expect("spring should converge");
        assert_eq!(estimate.value, 100.0);
        assert!(estimate.duration < 2.0);

        let at_rest = spring.estimate(100.0, 0.0, 5.0).expect("already at rest");
        assert_eq!(at_rest.duration, SIMULATION_FRAME_DURATION);

        assert!(spring.estimate(0.0, 0.0, 0.1).is_none());
    }

    #[test]
    fn acceleration_uses_default_spring() {
        let spring = WasmSpring::build(10.0, SpringConfig::default()).expect("valid config");
        assert_eq!(spring.get_target(), 10.0);
        assert_eq!(spring.acceleration(0.0, 0.0), 1200.0);
    }
}
