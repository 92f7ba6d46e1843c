use nalgebra::SVector;
use num_traits::Zero;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A fixed-size vector of `f64` components.
/// Must support component-wise addition and subtraction, scaling, and a zero value.
pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + AddAssign
    + 'static
{
    /// Number of components. Fixed per implementing type.
    const DIMENSION: usize;

    /// Returns true when every component's magnitude is at most `threshold`.
    /// A NaN component never satisfies the bound.
    fn is_within(&self, threshold: f64) -> bool;
}

impl<const N: usize> Vector for SVector<f64, N> {
    const DIMENSION: usize = N;

    fn is_within(&self, threshold: f64) -> bool {
        self.iter().all(|c| c.abs() <= threshold)
    }
}

/// Types that can be converted to and from a [`Vector`].
pub trait VectorConvertible: Clone + PartialEq {
    /// The vector representation of this type.
    type Vector: Vector;

    /// Reconstructs an instance from its vector representation.
    fn from_vector(vector: Self::Vector) -> Self;

    /// The vector representation of this instance.
    fn to_vector(&self) -> Self::Vector;

    /// The instance built from the zero vector.
    fn zero_value() -> Self {
        Self::from_vector(Self::Vector::zero())
    }

    /// Interpolates component-wise between `from` and `to`.
    ///
    /// `alpha = 0` returns `from` and `alpha = 1` returns `to`. Values outside
    /// `[0, 1]` extrapolate.
    fn interpolate(from: &Self, to: &Self, alpha: f64) -> Self {
        let a = from.to_vector();
        let b = to.to_vector();
        Self::from_vector(a * (1.0 - alpha) + b * alpha)
    }
}

/// Shorthand for the vector type a simulation function operates on.
pub type VectorOf<F> = <<F as SimulationFunction>::Value as VectorConvertible>::Vector;

/// An acceleration law driving a simulated value.
pub trait SimulationFunction {
    /// The value type being simulated.
    type Value: VectorConvertible;

    /// Evaluates the acceleration for the given state.
    /// value: current value vector
    /// velocity: current velocity vector
    fn acceleration(&self, value: &VectorOf<Self>, velocity: &VectorOf<Self>) -> VectorOf<Self>;
}

/// Outcome of a convergence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence<V> {
    /// The simulation should keep running.
    KeepRunning,
    /// The simulation has come to rest at the contained value.
    Converged(V),
}

/// A simulation function that can report when it has come to rest.
pub trait ConvergentFunction: SimulationFunction {
    /// Classifies the state produced by the latest step.
    fn convergence(
        &self,
        value: &VectorOf<Self>,
        velocity: &VectorOf<Self>,
    ) -> Convergence<VectorOf<Self>>;
}
