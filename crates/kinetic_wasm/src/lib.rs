//! JavaScript bindings for the kinetic core library.
//!
//! The JS side owns the frame clock (e.g. `requestAnimationFrame`) and calls
//! into these wrappers once per frame with the observed frame duration.

mod simulation;
mod spring;

pub use simulation::WasmSimulation;
pub use spring::WasmSpring;

use kinetic_core::config::SpringConfig;
use wasm_bindgen::prelude::*;

/// Reads an optional JS config object; `undefined` and `null` mean defaults.
pub(crate) fn parse_spring_config(config: JsValue) -> Result<SpringConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SpringConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    log::warn!("rejected spring configuration: {err:#}");
    JsValue::from_str(&format!("{err:#}"))
}
