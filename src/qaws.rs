//! Algebraic-logarithmic endpoint singularities: weight
//! `W(x) = (x-a)^α (b-x)^β [log(x-a)]^μ [log(b-x)]^ν` with `α, β > -1` and
//! `μ, ν ∈ {0, 1}`.
//!
//! `W` itself is finite everywhere in the open interval but has unbounded
//! derivatives at the touched endpoint, which is what defeats ordinary
//! polynomial quadrature there. Rather than the literal Piessens
//! Chebyshev-moment recursion (`qaws_integration_table.h`'s `ri`/`rj`/`rg`/
//! `rh` arrays), each endpoint-touching sub-interval is desingularized by a
//! power substitution that maps the algebraic factor to a constant and the
//! logarithmic factor to an affine function of the new variable, so plain
//! Gauss-Kronrod quadrature applies to the transformed, smooth integrand.
//! Interior sub-intervals (touching neither endpoint) integrate `f·W`
//! directly with Kronrod-15, since `W` is smooth there.

use crate::kronrod::{qk, KronrodRule};
use crate::status::{ConfigError, QuadResult, Status};
use crate::constants::tolerances_admissible;
use crate::workspace::{Interval, Workspace};

/// The four exponents defining one algebraic-logarithmic endpoint weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QawsTable {
    pub alpha: f64,
    pub beta: f64,
    pub mu: i32,
    pub nu: i32,
}

impl QawsTable {
    pub fn new(alpha: f64, beta: f64, mu: i32, nu: i32) -> Result<Self, ConfigError> {
        if alpha <= -1.0 || beta <= -1.0 {
            return Err(ConfigError::InvalidWeightExponents { alpha, beta });
        }
        if !matches!(mu, 0 | 1) || !matches!(nu, 0 | 1) {
            return Err(ConfigError::InvalidWeightLogPowers { mu, nu });
        }
        Ok(Self { alpha, beta, mu, nu })
    }

    fn weight(&self, x: f64, a: f64, b: f64) -> f64 {
        let mut w = (x - a).powf(self.alpha) * (b - x).powf(self.beta);
        if self.mu == 1 {
            w *= (x - a).ln();
        }
        if self.nu == 1 {
            w *= (b - x).ln();
        }
        w
    }
}

/// `∫ₐᵇ f(x)·W(x) dx` with `W` as described by `table`.
pub fn integrate_singular_endpoints<F: Fn(f64) -> f64>(
    f: F,
    table: &QawsTable,
    a: f64,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
) -> QuadResult {
    if !tolerances_admissible(epsabs, epsrel) {
        return QuadResult::failed(Status::InvalidTolerance);
    }

    let eval = |lo: f64, hi: f64| eval_subinterval(&f, table, a, b, lo, hi);
    let k0 = eval(a, b);
    let mut result = k0.0;
    let mut abserr = k0.1;
    let mut tol = epsabs.max(epsrel * result.abs());
    if abserr <= tol {
        return QuadResult::new(result, abserr);
    }

    let mut ws = Workspace::new(a, b, result, abserr, max_iter);
    for iteration in 1..max_iter {
        let worst = ws.worst();
        let mid = 0.5 * (worst.a + worst.b);
        let (r1, e1) = eval(worst.a, mid);
        let (r2, e2) = eval(mid, worst.b);

        result += r1 + r2 - worst.result;
        abserr += e1 + e2 - worst.error;
        tol = epsabs.max(epsrel * result.abs());

        ws.split_worst(
            Interval::new(worst.a, mid, r1, e1, worst.depth + 1),
            Interval::new(mid, worst.b, r2, e2, worst.depth + 1),
        );

        log::trace!("qaws: iter={iteration} result={result:.12} abserr={abserr:.3e}");
        if abserr <= tol {
            return QuadResult::new(result, abserr);
        }
    }

    QuadResult::with_status(result, abserr, Status::MaxIterations)
}

/// Evaluate `∫ f·W` over `[lo, hi]`, desingularizing whichever endpoint of
/// `[a, b]` this sub-interval touches.
fn eval_subinterval<F: Fn(f64) -> f64>(
    f: &F,
    table: &QawsTable,
    a: f64,
    b: f64,
    lo: f64,
    hi: f64,
) -> (f64, f64) {
    let touches_a = lo == a;
    let touches_b = hi == b;

    if touches_a && !touches_b {
        // x = lo + (hi-lo)*u^(1/(alpha+1)); dx = (hi-lo)*(1/(alpha+1))*u^(1/(alpha+1)-1) du
        // (x-lo)^alpha dx becomes a constant times du; log(x-lo) becomes affine in log(u).
        let span = hi - lo;
        let p = 1.0 / (table.alpha + 1.0);
        let g = |u: f64| {
            if u <= 0.0 {
                return 0.0;
            }
            let t = u.powf(p);
            let x = lo + span * t;
            let mut integrand = f(x) * (b - x).powf(table.beta) * span.powf(table.alpha + 1.0) * p;
            if table.mu == 1 {
                integrand *= (span * t).ln();
            }
            if table.nu == 1 {
                integrand *= (b - x).ln();
            }
            integrand
        };
        let k = qk(g, 0.0, 1.0, KronrodRule::Kronrod15);
        (k.result, k.abserr)
    } else if touches_b && !touches_a {
        let span = hi - lo;
        let p = 1.0 / (table.beta + 1.0);
        let g = |u: f64| {
            if u <= 0.0 {
                return 0.0;
            }
            let t = u.powf(p);
            let x = hi - span * t;
            let mut integrand = f(x) * (x - a).powf(table.alpha) * span.powf(table.beta + 1.0) * p;
            if table.nu == 1 {
                integrand *= (span * t).ln();
            }
            if table.mu == 1 {
                integrand *= (x - a).ln();
            }
            integrand
        };
        let k = qk(g, 0.0, 1.0, KronrodRule::Kronrod15);
        (k.result, k.abserr)
    } else if touches_a && touches_b {
        // The full interval touches both endpoints at once (before any
        // bisection): split at the midpoint and desingularize each half.
        let mid = 0.5 * (lo + hi);
        let left = eval_subinterval(f, table, a, b, lo, mid);
        let right = eval_subinterval(f, table, a, b, mid, hi);
        (left.0 + right.0, left.1 + right.1)
    } else {
        let k = qk(|x: f64| f(x) * table.weight(x, a, b), lo, hi, KronrodRule::Kronrod15);
        (k.result, k.abserr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonadmissible_exponents() {
        assert!(QawsTable::new(-2.0, 0.0, 0, 0).is_err());
        assert!(QawsTable::new(0.0, 0.0, 2, 0).is_err());
    }

    #[test]
    fn pure_algebraic_weight_matches_beta_function() {
        // ∫_0^1 x^0.5 (1-x)^0.5 dx = B(1.5, 1.5) = pi/8.
        let table = QawsTable::new(0.5, 0.5, 0, 0).unwrap();
        let out = integrate_singular_endpoints(|_: f64| 1.0, &table, 0.0, 1.0, 1e-7, 1e-7, 100);
        assert!((out.result - std::f64::consts::PI / 8.0).abs() < 1e-4, "result={}", out.result);
    }

    #[test]
    fn log_weight_with_smooth_integrand_converges() {
        let table = QawsTable::new(0.0, 0.0, 1, 0).unwrap();
        // ∫_0^1 log(x) dx = -1.
        let out = integrate_singular_endpoints(|_: f64| 1.0, &table, 0.0, 1.0, 1e-6, 1e-6, 100);
        assert!((out.result - (-1.0)).abs() < 1e-4, "result={}", out.result);
    }
}
