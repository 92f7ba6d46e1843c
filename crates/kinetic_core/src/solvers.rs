use crate::traits::{Convergence, ConvergentFunction, SimulationFunction, VectorConvertible, VectorOf};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Fixed step used when estimating convergence ahead of time.
/// 0.008 s is 120 Hz, double the typical display refresh rate.
pub const SIMULATION_FRAME_DURATION: f64 = 0.008;

/// Derivative of the (value, velocity) system at one RK4 sample point.
/// `value` holds dx/dt (a velocity), `velocity` holds dv/dt (an acceleration).
#[derive(Clone, Copy)]
struct Derivative<V> {
    value: V,
    velocity: V,
}

fn evaluate<F: SimulationFunction>(
    function: &F,
    value: VectorOf<F>,
    velocity: VectorOf<F>,
    time: f64,
    derivative: Derivative<VectorOf<F>>,
) -> Derivative<VectorOf<F>> {
    let next_value = value + derivative.value * time;
    let next_velocity = velocity + derivative.velocity * time;

    Derivative {
        value: next_velocity,
        velocity: function.acceleration(&next_value, &next_velocity),
    }
}

/// Classic Runge-Kutta 4th order step of the coupled system
/// dx/dt = v, dv/dt = a(x, v).
///
/// Returns the `(value, velocity)` pair after `time` seconds. `time` is not
/// validated: zero returns the input, negative integrates backward, and
/// non-finite input propagates.
pub fn integrate<F: SimulationFunction>(
    function: &F,
    value: VectorOf<F>,
    velocity: VectorOf<F>,
    time: f64,
) -> (VectorOf<F>, VectorOf<F>) {
    let initial = Derivative {
        value: <VectorOf<F> as Zero>::zero(),
        velocity: <VectorOf<F> as Zero>::zero(),
    };

    // k1 at t, k2 and k3 at t + time/2, k4 at t + time
    let a = evaluate(function, value, velocity, 0.0, initial);
    let b = evaluate(function, value, velocity, time * 0.5, a);
    let c = evaluate(function, value, velocity, time * 0.5, b);
    let d = evaluate(function, value, velocity, time, c);

    // (k1 + 2k2 + 2k3 + k4) / 6; k1 is included so zero acceleration gives exact linear motion
    let sixth = 1.0 / 6.0;
    let dxdt = (a.value + (b.value + c.value) * 2.0 + d.value) * sixth;
    let dvdt = (a.velocity + (b.velocity + c.velocity) * 2.0 + d.velocity) * sixth;

    (value + dxdt * time, velocity + dvdt * time)
}

/// Where and when a simulation comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceEstimate<T> {
    /// The value the simulation settles at.
    pub value: T,
    /// Simulated seconds needed to get there.
    pub duration: f64,
}

/// Runs the simulation ahead of time in [`SIMULATION_FRAME_DURATION`] steps
/// until the function reports convergence.
///
/// Returns `None` when the accumulated duration exceeds `maximum_duration`.
/// The deadline is checked after the convergence verdict on every step, so a
/// verdict reached past the deadline still yields `None`.
///
/// The loop is bounded only by `maximum_duration`: with an infinite budget a
/// function that never reports convergence never returns.
pub fn estimate_convergence<F: ConvergentFunction>(
    function: &F,
    initial_value: &F::Value,
    initial_velocity: &F::Value,
    maximum_duration: f64,
) -> Option<ConvergenceEstimate<F::Value>> {
    let mut value = initial_value.to_vector();
    let mut velocity = initial_velocity.to_vector();
    let mut duration = 0.0;
    let mut steps = 0usize;
    let mut has_converged = false;

    while !has_converged {
        (value, velocity) = integrate(function, value, velocity, SIMULATION_FRAME_DURATION);
        duration += SIMULATION_FRAME_DURATION;
        steps += 1;

        match function.convergence(&value, &velocity) {
            Convergence::KeepRunning => {}
            Convergence::Converged(converged_value) => {
                value = converged_value;
                has_converged = true;
            }
        }

        if duration > maximum_duration || maximum_duration.is_nan() {
            log::debug!(
                "no convergence within {maximum_duration}s ({steps} steps, converged on last step: {has_converged})"
            );
            return None;
        }
    }

    log::trace!("converged after {duration}s ({steps} steps)");
    Some(ConvergenceEstimate {
        value: F::Value::from_vector(value),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Vector;
    use crate::values::Point;
    use nalgebra::{Vector1, Vector2};
    use std::marker::PhantomData;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Acceleration is always zero.
    struct Coast<T>(PhantomData<T>);

    impl<T: VectorConvertible> SimulationFunction for Coast<T> {
        type Value = T;

        fn acceleration(&self, _value: &VectorOf<Self>, _velocity: &VectorOf<Self>) -> VectorOf<Self> {
            <VectorOf<Self> as Zero>::zero()
        }
    }

    /// Constant acceleration along every axis.
    struct Gravity {
        g: f64,
    }

    impl SimulationFunction for Gravity {
        type Value = f64;

        fn acceleration(&self, _value: &Vector1<f64>, _velocity: &Vector1<f64>) -> Vector1<f64> {
            Vector1::new(self.g)
        }
    }

    /// Undamped harmonic oscillator, x'' = -x.
    struct Oscillator;

    impl SimulationFunction for Oscillator {
        type Value = f64;

        fn acceleration(&self, value: &Vector1<f64>, _velocity: &Vector1<f64>) -> Vector1<f64> {
            -*value
        }
    }

    /// Scalar spring toward `target` with fixed 0.01 thresholds.
    struct TestSpring {
        target: f64,
        stiffness: f64,
        damping: f64,
    }

    impl SimulationFunction for TestSpring {
        type Value = f64;

        fn acceleration(&self, value: &Vector1<f64>, velocity: &Vector1<f64>) -> Vector1<f64> {
            (value - Vector1::new(self.target)) * -self.stiffness - velocity * self.damping
        }
    }

    impl ConvergentFunction for TestSpring {
        fn convergence(
            &self,
            value: &Vector1<f64>,
            velocity: &Vector1<f64>,
        ) -> Convergence<Vector1<f64>> {
            let target = Vector1::new(self.target);
            if (value - target).is_within(0.01) && velocity.is_within(0.01) {
                Convergence::Converged(target)
            } else {
                Convergence::KeepRunning
            }
        }
    }

    /// Pushes away from `origin`; never converges.
    struct Repulsor {
        origin: f64,
        strength: f64,
    }

    impl SimulationFunction for Repulsor {
        type Value = f64;

        fn acceleration(&self, value: &Vector1<f64>, _velocity: &Vector1<f64>) -> Vector1<f64> {
            (value - Vector1::new(self.origin)) * self.strength
        }
    }

    impl ConvergentFunction for Repulsor {
        fn convergence(
            &self,
            value: &Vector1<f64>,
            velocity: &Vector1<f64>,
        ) -> Convergence<Vector1<f64>> {
            let origin = Vector1::new(self.origin);
            if (value - origin).is_within(1e-3) && velocity.is_within(1e-3) {
                Convergence::Converged(origin)
            } else {
                Convergence::KeepRunning
            }
        }
    }

    /// Reports convergence after a fixed number of checks.
    struct ConvergesAfter {
        checks: std::cell::Cell<usize>,
        limit: usize,
    }

    impl SimulationFunction for ConvergesAfter {
        type Value = f64;

        fn acceleration(&self, _value: &Vector1<f64>, _velocity: &Vector1<f64>) -> Vector1<f64> {
            Vector1::zeros()
        }
    }

    impl ConvergentFunction for ConvergesAfter {
        fn convergence(
            &self,
            _value: &Vector1<f64>,
            _velocity: &Vector1<f64>,
        ) -> Convergence<Vector1<f64>> {
            let seen = self.checks.get() + 1;
            self.checks.set(seen);
            if seen >= self.limit {
                Convergence::Converged(Vector1::new(42.0))
            } else {
                Convergence::KeepRunning
            }
        }
    }

    #[test]
    fn integrate_zero_time_returns_input() {
        let spring = TestSpring {
            target: 10.0,
            stiffness: 120.0,
            damping: 12.0,
        };
        let value = Vector1::new(3.25);
        let velocity = Vector1::new(-7.5);
        let (x, v) = integrate(&spring, value, velocity, 0.0);
        assert_eq!(x, value);
        assert_eq!(v, velocity);
    }

    #[test]
    fn integrate_without_acceleration_is_linear_motion() {
        let coast = Coast::<Point>(PhantomData);
        let value = Vector2::new(1.0, -2.0);
        let velocity = Vector2::new(4.0, 0.5);
        for &t in &[0.016, 0.25, 1.0, -0.5] {
            let (x, v) = integrate(&coast, value, velocity, t);
            assert!((x - (value + velocity * t)).is_within(1e-12));
            assert_eq!(v, velocity);
        }
    }

    #[test]
    fn integrate_is_exact_for_constant_acceleration() {
        let gravity = Gravity { g: -9.81 };
        let t = 0.5;
        let (x, v) = integrate(&gravity, Vector1::new(100.0), Vector1::new(2.0), t);
        let expected_x = 100.0 + 2.0 * t + 0.5 * -9.81 * t * t;
        let expected_v = 2.0 + -9.81 * t;
        assert!((x[0] - expected_x).abs() < 1e-12);
        assert!((v[0] - expected_v).abs() < 1e-12);
    }

    #[test]
    fn integrate_tracks_harmonic_oscillator() {
        let dt = 0.01;
        let mut x = Vector1::new(1.0);
        let mut v = Vector1::new(0.0);
        for _ in 0..100 {
            (x, v) = integrate(&Oscillator, x, v, dt);
        }
        assert!((x[0] - 1.0_f64.cos()).abs() < 1e-8);
        assert!((v[0] + 1.0_f64.sin()).abs() < 1e-8);
    }

    #[test]
    fn integrate_negative_time_runs_backward() {
        let x0 = Vector1::new(1.0);
        let v0 = Vector1::new(0.0);
        let (x1, v1) = integrate(&Oscillator, x0, v0, 0.1);
        let (x2, v2) = integrate(&Oscillator, x1, v1, -0.1);
        assert!((x2 - x0).is_within(1e-6));
        assert!((v2 - v0).is_within(1e-6));
    }

    #[test]
    fn integrate_propagates_nan() {
        let (x, v) = integrate(&Oscillator, Vector1::new(f64::NAN), Vector1::new(0.0), 0.1);
        assert!(x[0].is_nan());
        assert!(v[0].is_nan());
    }

    #[test]
    fn estimate_at_rest_takes_one_micro_step() {
        init_logger();
        let spring = TestSpring {
            target: 5.0,
            stiffness: 120.0,
            damping: 12.0,
        };
        let estimate = estimate_convergence(&spring, &5.0, &0.0, 10.0)
            .expect("resting spring should converge");
        assert_eq!(estimate.value, 5.0);
        assert_eq!(estimate.duration, SIMULATION_FRAME_DURATION);
    }

    #[test]
    fn estimate_critically_damped_spring() {
        init_logger();
        let spring = TestSpring {
            target: 100.0,
            stiffness: 100.0,
            damping: 20.0,
        };
        let estimate = estimate_convergence(&spring, &0.0, &0.0, 10.0)
            .expect("critically damped spring should converge");
        assert!((estimate.value - 100.0).abs() < 0.01);
        assert!(estimate.duration > 0.5);
        assert!(estimate.duration < 2.0);
    }

    #[test]
    fn estimate_returns_none_for_repelling_function() {
        init_logger();
        let repulsor = Repulsor {
            origin: 0.0,
            strength: 4.0,
        };
        assert!(estimate_convergence(&repulsor, &1.0, &0.0, 1.0).is_none());
    }

    #[test]
    fn estimate_returns_none_for_nan_state() {
        let spring = TestSpring {
            target: 1.0,
            stiffness: 120.0,
            damping: 12.0,
        };
        assert!(estimate_convergence(&spring, &f64::NAN, &0.0, 0.5).is_none());
    }

    #[test]
    fn estimate_checks_deadline_after_verdict() {
        // Converges on the third step (0.024 s) but the budget is two steps.
        let late = ConvergesAfter {
            checks: std::cell::Cell::new(0),
            limit: 3,
        };
        assert!(estimate_convergence(&late, &0.0, &0.0, 0.02).is_none());
        assert_eq!(late.checks.get(), 3);

        let on_time = ConvergesAfter {
            checks: std::cell::Cell::new(0),
            limit: 3,
        };
        let estimate = estimate_convergence(&on_time, &0.0, &0.0, 0.03)
            .expect("should converge within budget");
        assert_eq!(estimate.value, 42.0);
        assert!((estimate.duration - 3.0 * SIMULATION_FRAME_DURATION).abs() < 1e-12);
    }

    #[test]
    fn estimate_with_nan_budget_stops_after_one_step() {
        let repulsor = Repulsor {
            origin: 0.0,
            strength: 1.0,
        };
        assert!(estimate_convergence(&repulsor, &1.0, &0.0, f64::NAN).is_none());
    }

    #[test]
    fn estimate_with_infinite_budget_still_returns_on_convergence() {
        let spring = TestSpring {
            target: 2.0,
            stiffness: 100.0,
            damping: 20.0,
        };
        let estimate = estimate_convergence(&spring, &0.0, &0.0, f64::INFINITY)
            .expect("converging spring should return with an unbounded budget");
        assert_eq!(estimate.value, 2.0);
        assert!(estimate.duration.is_finite());
    }
}
