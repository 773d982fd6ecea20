//! Machine-precision constants shared by every engine: the largest relative
//! spacing of representable `f64`s, and the smallest positive normal
//! magnitude.

/// The largest relative spacing between representable `f64` values.
pub const EPMACH: f64 = f64::EPSILON;

/// The smallest positive normal `f64` magnitude.
pub const UFLOW: f64 = f64::MIN_POSITIVE;

/// Minimum admissible relative tolerance per QUADPACK's `0.5e-28` floor.
pub const MIN_EPSREL: f64 = 0.5e-28;

/// Returns `true` when the `(epsabs, epsrel)` pair is sufficient to ever
/// terminate a bisection loop: `epsabs > 0 || epsrel >= max(50*eps, MIN_EPSREL)`.
pub fn tolerances_admissible(epsabs: f64, epsrel: f64) -> bool {
    epsabs > 0.0 || epsrel >= (50.0 * EPMACH).max(MIN_EPSREL)
}

/// The QUADPACK round-off rescaling from `rescale_error`, shared by every
/// Gauss-Kronrod evaluation and by the non-adaptive quick estimator.
///
/// `raw` is `|gauss - kronrod| * half_length`; `resabs`/`resasc` are the
/// integral of `|f|` and of `|f - mean|` over the sub-interval.
pub fn rescale_error(raw: f64, resabs: f64, resasc: f64) -> f64 {
    let mut abserr = raw.abs();
    if resasc != 0.0 && abserr != 0.0 {
        let scale = (200.0 * abserr / resasc).powf(1.5);
        abserr = if scale < 1.0 {
            resasc * scale
        } else {
            resasc
        };
    }
    if resabs > UFLOW / (50.0 * EPMACH) {
        let min_err = 50.0 * EPMACH * resabs;
        if min_err > abserr {
            abserr = min_err;
        }
    }
    abserr
}

/// `∫₋₁¹ Tₙ(x) dx`, the definite integral of a Chebyshev polynomial over its
/// natural domain: `0` for odd `n` (and `n == 1` as a special case of that),
/// `2/(1-n²)` for even `n`. Shared by every engine that integrates a
/// Chebyshev series directly instead of reconstructing and re-sampling it
/// (QAWO's moment pyramid, CQUAD's per-rule estimate).
pub fn chebyshev_moment(n: i64) -> f64 {
    if n == 1 {
        0.0
    } else {
        (1.0 + if n % 2 == 0 { 1.0 } else { -1.0 }) / (1.0 - (n * n) as f64)
    }
}

/// The round-off-dominated-interval test: whether splitting `[a1, a2]` and
/// `[a2, b2]` any further would fall below the machine-representable scale.
/// Ported from `integration_workspace.h`'s `subinterval_too_small`.
pub fn subinterval_too_small(a1: f64, a2: f64, b2: f64) -> bool {
    const S_EPS: f64 = 100.0 * f64::EPSILON;
    let s_min = 1000.0 * f64::MIN_POSITIVE;
    let tmp = (1.0 + S_EPS) * (a2.abs() + s_min);
    a1.abs() <= tmp && b2.abs() <= tmp
}
