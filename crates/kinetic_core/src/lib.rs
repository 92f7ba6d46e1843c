//! The `kinetic_core` crate provides the numerical engine for physically animated values.
//! It is generic over the animated type: anything that maps onto a fixed-size `f64` vector
//! (scalars, points, rects, colors) can be driven by any acceleration law.
//!
//! Key components:
//! - **Traits**: `Vector`, `VectorConvertible` (value types), `SimulationFunction` and `ConvergentFunction` (force models).
//! - **Solvers**: the RK4 `integrate` step and the ahead-of-time `estimate_convergence` loop.
//! - **Functions**: built-in spring, decay, and closure-backed acceleration laws.
//! - **Simulation**: a value/velocity holder for frame-driven animation.
pub mod config;
pub mod functions;
pub mod simulation;
pub mod solvers;
pub mod traits;
pub mod values;

pub use config::{DecayConfig, SpringConfig};
pub use functions::{CustomFunction, DecayFunction, SpringFunction};
pub use simulation::Simulation;
pub use solvers::{estimate_convergence, integrate, ConvergenceEstimate, SIMULATION_FRAME_DURATION};
pub use traits::{Convergence, ConvergentFunction, SimulationFunction, Vector, VectorConvertible};
pub use values::{Color, Point, Rect, Size};
