//! Solving Kepler's equation `M = E - e sin(E)` for the eccentric anomaly.

use log::warn;
use tau::TAU;

/// Iteration stops once successive estimates differ by no more than this.
pub const TOLERANCE: f64 = 1e-14;

/// Hard cap on refinement steps. Reaching it is reported, not fatal.
pub const MAX_ITERATIONS: u32 = 100;

/// Outcome of [`solve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Best available estimate of E (rad).
    pub eccentric_anomaly: f64,
    /// Number of refinement steps taken.
    pub iterations: u32,
    /// `false` if the iteration cap was hit before the step size fell below
    /// [`TOLERANCE`]. The estimate is still usable, just less precise.
    pub converged: bool,
}

/// Finds the eccentric anomaly for eccentricity `ecc` in `[0, 1)` and an
/// arbitrary mean anomaly `mean_anom`.
///
/// The mean anomaly is reduced with the truncating remainder `mean_anom % TAU`,
/// so a negative input stays negative (in `(-TAU, 0]`). The returned
/// eccentric anomaly is on the same branch as the reduced mean anomaly.
///
/// A third-order series gives the starting guess; each step then applies a
/// fifth-order correction.
pub fn solve(ecc: f64, mean_anom: f64) -> KeplerSolution {
    let mean_anom = mean_anom % TAU;

    let mut ec_an = starter(ecc, mean_anom);
    let mut iterations = 0;
    loop {
        let next = ec_an - correction(ecc, mean_anom, ec_an);
        let step = (next - ec_an).abs();
        ec_an = next;
        iterations += 1;

        if step <= TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: ec_an,
                iterations,
                converged: true,
            };
        }
        if iterations == MAX_ITERATIONS {
            warn!(
                "Kepler solver failed to converge after {} iterations: \
                 solve({:?}, {:?}) stopped at {:?} (last step {:e})",
                MAX_ITERATIONS, ecc, mean_anom, ec_an, step
            );
            return KeplerSolution {
                eccentric_anomaly: ec_an,
                iterations,
                converged: false,
            };
        }
    }
}

/// Evaluates the mean anomaly for a given eccentric anomaly.
pub fn kepler(ecc: f64, ecc_anom: f64) -> f64 {
    ecc_anom - ecc * ecc_anom.sin()
}

#[cfg_attr(rustfmt, rustfmt_skip)]
fn starter(ecc: f64, mean_anom: f64) -> f64 {
    let e2 = ecc * ecc;
    let e3 = ecc * e2;
    let cos_m = mean_anom.cos();
    mean_anom + (-0.5*e3 + ecc + (e2 + 1.5*cos_m*e3)*cos_m) * mean_anom.sin()
}

/// Amount to subtract from the estimate `x`.
#[cfg_attr(rustfmt, rustfmt_skip)]
fn correction(ecc: f64, mean_anom: f64, x: f64) -> f64 {
    let (sin_x, cos_x) = x.sin_cos();
    let f_prime = -1.0 + ecc*cos_x;
    let e_sin_x = ecc * sin_x;
    let residual = -x + e_sin_x + mean_anom;
    let halley = residual / (0.5*residual*e_sin_x/f_prime + f_prime);
    residual / ((0.5*sin_x - (1.0/6.0)*cos_x*halley)*ecc*halley + f_prime)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn residual(ecc: f64, mean_anom: f64, solution: &KeplerSolution) -> f64 {
        (kepler(ecc, solution.eccentric_anomaly) - mean_anom % TAU).abs()
    }

    #[test]
    fn circular_orbit_returns_mean_anomaly_exactly() {
        for &m in &[0.0, 0.3, 1.0, 3.0, 5.5, 7.0, -2.0, 40.0] {
            let solution = solve(0.0, m);
            assert!(solution.converged);
            assert_eq!(solution.eccentric_anomaly, m % TAU);
            assert_eq!(solution.iterations, 1);
        }
    }

    #[test]
    fn periapsis_and_apoapsis_are_fixed_points() {
        let ecc = 1.0 / 2f64.sqrt();
        assert_eq!(solve(ecc, 0.0).eccentric_anomaly, 0.0);
        assert_abs_diff_eq!(solve(ecc, TAU / 2.0).eccentric_anomaly, TAU / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_mean_anomaly_keeps_its_sign() {
        let solution = solve(0.5, -1.0);
        assert!(solution.eccentric_anomaly < 0.0);
        assert!(residual(0.5, -1.0, &solution) < 1e-12);

        let wrapped = solve(0.5, -1.0 - 2.0 * TAU);
        assert_abs_diff_eq!(
            wrapped.eccentric_anomaly,
            solution.eccentric_anomaly,
            epsilon = 1e-9
        );
    }

    #[test]
    fn kepler_inverts_solve() {
        let ecc = 0.3;
        let ecc_anom = 2.0;
        let solution = solve(ecc, kepler(ecc, ecc_anom));
        assert_abs_diff_eq!(solution.eccentric_anomaly, ecc_anom, epsilon = 1e-12);
    }

    #[test]
    fn starter_is_closer_than_mean_anomaly() {
        let ecc = 0.6;
        let mean_anom = 0.8;
        let exact = solve(ecc, mean_anom).eccentric_anomaly;
        assert!((starter(ecc, mean_anom) - exact).abs() < (mean_anom - exact).abs());
    }

    #[test]
    fn converges_quickly_for_moderate_eccentricity() {
        let mut rng = StdRng::seed_from_u64(0x6b65706c6572);
        for _ in 0..2000 {
            let ecc = rng.random_range(0.0..0.9);
            let mean_anom = rng.random_range(-TAU..TAU);
            let solution = solve(ecc, mean_anom);
            assert!(solution.converged);
            assert!(solution.iterations <= 10, "{:?}", solution);
            assert!(residual(ecc, mean_anom, &solution) < 1e-12);
        }
    }

    #[test]
    fn near_parabolic_orbits_stay_finite() {
        for &ecc in &[0.99, 0.999, 0.9999] {
            for &mean_anom in &[1e-8, 1e-4, 0.1, 1.0, 3.0, -1e-6] {
                let solution = solve(ecc, mean_anom);
                assert!(solution.eccentric_anomaly.is_finite());
                assert!(residual(ecc, mean_anom, &solution) < 1e-10);
            }
        }
    }

    #[test]
    fn nan_input_reports_non_convergence() {
        let solution = solve(0.5, f64::NAN);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, MAX_ITERATIONS);
        assert!(solution.eccentric_anomaly.is_nan());
    }

    proptest! {
        #[test]
        fn should_satisfy_keplers_equation(
            ecc in 0.0..=0.99f64,
            mean_anom in -10.0 * TAU / 2.0..10.0 * TAU / 2.0,
        ) {
            let solution = solve(ecc, mean_anom);
            prop_assume!(solution.converged);
            prop_assert!(abs_diff_eq!(
                kepler(ecc, solution.eccentric_anomaly),
                mean_anom % TAU,
                epsilon = 1e-12
            ));
        }
    }
}
