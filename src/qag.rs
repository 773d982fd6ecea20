//! Plain globally-adaptive bisection: repeatedly split the
//! sub-interval with the largest error estimate until the running total
//! meets the requested tolerance.

use crate::constants::{subinterval_too_small, tolerances_admissible, EPMACH};
use crate::kronrod::{qk, KronrodRule};
use crate::status::{QuadResult, Status};
use crate::workspace::{Interval, Workspace};

const ROUNDOFF_LIMIT: u32 = 6;
const SINGULAR_LIMIT: u32 = 20;

/// Adaptively integrate `f` over `[a, b]` with the given Gauss-Kronrod
/// `rule`, splitting the worst sub-interval up to `max_iter` times.
pub fn integrate<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
    rule: KronrodRule,
) -> QuadResult {
    if !tolerances_admissible(epsabs, epsrel) {
        log::warn!("qag: invalid tolerance epsabs={epsabs} epsrel={epsrel}");
        return QuadResult::failed(Status::InvalidTolerance);
    }

    let k0 = qk(&f, a, b, rule);
    let mut tol = epsabs.max(epsrel * k0.result.abs());

    if k0.abserr <= tol && k0.abserr <= k0.resasc {
        return QuadResult::new(k0.result, k0.abserr);
    }
    if max_iter <= 1 {
        return QuadResult::with_status(k0.result, k0.abserr, Status::MaxIterations);
    }
    if k0.abserr <= 50.0 * EPMACH * k0.resabs && k0.abserr > tol {
        log::debug!("qag: round-off dominated on first evaluation");
        return QuadResult::with_status(k0.result, k0.abserr, Status::Roundoff);
    }

    let mut ws = Workspace::new(a, b, k0.result, k0.abserr, max_iter);
    let mut result = k0.result;
    let mut abserr = k0.abserr;
    let mut roundoff_count = 0u32;
    let mut singular_count = 0u32;

    for iteration in 1..max_iter {
        let worst = ws.worst();
        let mid = 0.5 * (worst.a + worst.b);
        let k1 = qk(&f, worst.a, mid, rule);
        let k2 = qk(&f, mid, worst.b, rule);

        let new_result = k1.result + k2.result;
        let new_abserr = k1.abserr + k2.abserr;
        result += new_result - worst.result;
        abserr += new_abserr - worst.error;
        tol = epsabs.max(epsrel * result.abs());

        let no_improvement = (worst.result - new_result).abs() <= 1e-5 * new_result.abs().max(1e-300);
        if no_improvement && new_abserr >= 0.99 * worst.error {
            roundoff_count += 1;
        }
        if subinterval_too_small(worst.a, mid, worst.b) {
            singular_count += 1;
        }

        ws.split_worst(
            Interval::new(worst.a, mid, k1.result, k1.abserr, worst.depth + 1),
            Interval::new(mid, worst.b, k2.result, k2.abserr, worst.depth + 1),
        );

        log::trace!(
            "qag: iter={iteration} split=[{:.6},{:.6}] result={result:.12} abserr={abserr:.3e}",
            worst.a, worst.b
        );

        if roundoff_count >= ROUNDOFF_LIMIT {
            log::debug!("qag: round-off limit reached after {iteration} iterations");
            return QuadResult::with_status(result, abserr, Status::Roundoff);
        }
        if singular_count >= SINGULAR_LIMIT {
            log::debug!("qag: singular-interval limit reached after {iteration} iterations");
            return QuadResult::with_status(result, abserr, Status::Singular);
        }
        if abserr <= tol {
            return QuadResult::new(result, abserr);
        }
    }

    log::debug!("qag: exhausted {max_iter} iterations, abserr={abserr:.3e} tol={tol:.3e}");
    QuadResult::with_status(result, abserr, Status::MaxIterations)
}
