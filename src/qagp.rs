//! QAGS seeded with user-supplied singular points: the same
//! bisect-and-extrapolate engine as [`crate::qags`], but the initial
//! partition is built directly from the caller's break points instead of
//! starting from a single `[a, b]` interval. Each seeded interval starts at
//! depth 1, so the workspace's notion of "large interval" (depth below the
//! current maximum) engages immediately and extrapolation is attempted from
//! the first iteration — the point of telling the engine where the
//! singularities are.

use crate::constants::{subinterval_too_small, tolerances_admissible, EPMACH};
use crate::kronrod::{qk, KronrodRule};
use crate::qelg::Epsilon;
use crate::status::{ConfigError, QuadResult, Status};
use crate::workspace::{Interval, Workspace};

const ROUNDOFF_LIMIT: u32 = 6;
const EXTRAP_ROUNDOFF_LIMIT: u32 = 20;
const DIVERGENCE_LIMIT: u32 = 4;
const DIVERGENCE_FACTOR: f64 = 4.0;

/// Integrate `f` over `[a, b]`, given interior points where the integrand
/// is known to misbehave. `points` must be strictly between `a` and `b` and
/// strictly increasing; an empty slice degenerates to plain QAGS on `[a, b]`.
pub fn integrate_multisingular<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    points: &[f64],
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
    rule: KronrodRule,
) -> Result<QuadResult, ConfigError> {
    if !tolerances_admissible(epsabs, epsrel) {
        return Ok(QuadResult::failed(Status::InvalidTolerance));
    }
    for w in points.windows(2) {
        if w[0] >= w[1] {
            return Err(ConfigError::PointsNotSorted);
        }
    }
    if let Some(&first) = points.first() {
        if first <= a {
            return Err(ConfigError::PointsNotSorted);
        }
    }
    if let Some(&last) = points.last() {
        if last >= b {
            return Err(ConfigError::PointsNotSorted);
        }
    }

    let mut bounds = Vec::with_capacity(points.len() + 2);
    bounds.push(a);
    bounds.extend_from_slice(points);
    bounds.push(b);

    let mut ws = Workspace::empty(max_iter.max(bounds.len()));
    let mut result = 0.0;
    let mut abserr = 0.0;
    for w in bounds.windows(2) {
        let k = qk(&f, w[0], w[1], rule);
        result += k.result;
        abserr += k.abserr;
        ws.append(Interval::new(w[0], w[1], k.result, k.abserr, 1));
    }

    let mut tol = epsabs.max(epsrel * result.abs());
    if abserr <= tol {
        return Ok(QuadResult::new(result, abserr));
    }
    if max_iter <= bounds.len() - 1 {
        return Ok(QuadResult::with_status(result, abserr, Status::MaxIterations));
    }

    let mut table = Epsilon::new();
    table.append(result);
    let mut roundoff_count = 0u32;
    let mut extrap_roundoff_count = 0u32;
    let mut singular_count = 0u32;
    let mut divergence_count = 0u32;
    let mut best_result = result;
    let mut best_abserr = abserr;

    for iteration in bounds.len()..max_iter {
        let worst = ws.worst();
        let mid = 0.5 * (worst.a + worst.b);
        let k1 = qk(&f, worst.a, mid, rule);
        let k2 = qk(&f, mid, worst.b, rule);

        let new_result = k1.result + k2.result;
        let new_abserr = k1.abserr + k2.abserr;

        let no_improvement = (worst.result - new_result).abs() <= 1e-5 * new_result.abs().max(1e-300);
        if no_improvement && new_abserr >= 0.99 * worst.error {
            if ws.worst_is_large() {
                roundoff_count += 1;
            } else {
                extrap_roundoff_count += 1;
            }
        }
        if subinterval_too_small(worst.a, mid, worst.b) {
            singular_count += 1;
        }

        result += new_result - worst.result;
        abserr += new_abserr - worst.error;
        tol = epsabs.max(epsrel * result.abs());

        ws.split_worst(
            Interval::new(worst.a, mid, k1.result, k1.abserr, worst.depth + 1),
            Interval::new(mid, worst.b, k2.result, k2.abserr, worst.depth + 1),
        );

        log::trace!(
            "qagp: iter={iteration} split=[{:.6},{:.6}] result={result:.12} abserr={abserr:.3e}",
            worst.a, worst.b
        );

        if roundoff_count >= ROUNDOFF_LIMIT {
            return Ok(QuadResult::with_status(best_result, best_abserr, Status::Roundoff));
        }
        if extrap_roundoff_count >= EXTRAP_ROUNDOFF_LIMIT {
            return Ok(QuadResult::with_status(
                best_result,
                best_abserr,
                Status::ExtrapolationRoundoff,
            ));
        }
        if singular_count >= EXTRAP_ROUNDOFF_LIMIT {
            return Ok(QuadResult::with_status(best_result, best_abserr, Status::Singular));
        }

        if best_result.abs() > EPMACH && result.abs() > DIVERGENCE_FACTOR * best_result.abs() {
            divergence_count += 1;
            if divergence_count >= DIVERGENCE_LIMIT {
                return Ok(QuadResult::with_status(best_result, best_abserr, Status::Divergence));
            }
        } else {
            divergence_count = 0;
        }

        if abserr <= tol {
            return Ok(QuadResult::new(result, abserr));
        }

        table.append(result);
        if table.len() >= 3 {
            let (ext_result, ext_abserr) = table.extrapolate();
            let ext_abserr = ext_abserr.max(50.0 * EPMACH * ext_result.abs());
            if ext_abserr < best_abserr {
                best_result = ext_result;
                best_abserr = ext_abserr;
                if best_abserr <= epsabs.max(epsrel * ext_result.abs()) {
                    return Ok(QuadResult::new(best_result, best_abserr));
                }
            }
        }
        if abserr < best_abserr {
            best_result = result;
            best_abserr = abserr;
        }
    }

    if best_abserr < abserr {
        return Ok(QuadResult::with_status(best_result, best_abserr, Status::MaxIterations));
    }
    Ok(QuadResult::with_status(result, abserr, Status::MaxIterations))
}
