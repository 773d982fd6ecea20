//! Semi-infinite Fourier integrals: `∫ₐ^∞ f(x)·sin(ωx) dx` or
//! `∫ₐ^∞ f(x)·cos(ωx) dx`.
//!
//! The range is split at the weight's own period `T = 2π/|ω|` into cycles
//! `[a+kT, a+(k+1)T]`, each integrated with [`crate::qawo`]. Consecutive
//! cycle contributions alternate in sign and shrink geometrically whenever
//! `f` decays or is otherwise well-behaved, so the running partial sums feed
//! the same epsilon-algorithm accelerator ([`crate::qelg`]) that QAGS uses,
//! rather than bisecting out to some arbitrary cutoff.

use crate::constants::tolerances_admissible;
use crate::kronrod::KronrodRule;
use crate::qawo::{integrate_oscillatory, CircFun, QawoTable};
use crate::qelg::Epsilon;
use crate::status::{QuadResult, Status};
use crate::transform;

/// `∫ₐ^∞ f(x)·sin(ωx) dx` or `∫ₐ^∞ f(x)·cos(ωx) dx`, accelerated over
/// successive periods of the weight. `max_cycles` bounds how many periods
/// are summed before giving up; `inner_max_iter` is the subdivision budget
/// handed to each cycle's own QAWO call.
pub fn integrate_fourier<F: Fn(f64) -> f64>(
    f: F,
    omega: f64,
    kind: CircFun,
    a: f64,
    epsabs: f64,
    max_cycles: usize,
    inner_max_iter: usize,
) -> QuadResult {
    if !tolerances_admissible(epsabs, 0.0) {
        return QuadResult::failed(Status::InvalidTolerance);
    }

    if omega == 0.0 {
        return match kind {
            // cos(0*x) = 1: an ordinary semi-infinite integral of f alone.
            CircFun::Cosine => {
                transform::integrate_lower_pinf(f, a, epsabs, 1e-10, inner_max_iter, KronrodRule::Kronrod21)
            }
            // sin(0*x) = 0 identically.
            CircFun::Sine => QuadResult::new(0.0, 0.0),
        };
    }

    let period = 2.0 * std::f64::consts::PI / omega.abs();
    let table = QawoTable::new(omega, period, kind);

    let mut eps = Epsilon::new();
    let mut partial_sum = 0.0;
    let mut best = (0.0, f64::MAX);

    for k in 0..max_cycles {
        let lo = a + k as f64 * period;
        let hi = lo + period;
        let piece = integrate_oscillatory(&f, &table, lo, hi, epsabs, 1e-8, inner_max_iter);

        partial_sum += piece.result;
        eps.append(partial_sum);
        let (extrap, extrap_err) = eps.extrapolate();
        best = (extrap, extrap_err);

        log::trace!("qawf: cycle={k} partial_sum={partial_sum:.12} extrapolated={extrap:.12}");
        if extrap_err <= epsabs.max(1e-10 * extrap.abs()) && k >= 3 {
            return QuadResult::new(extrap, extrap_err);
        }
    }

    QuadResult::with_status(best.0, best.1, Status::MaxIterations)
}
