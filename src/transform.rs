//! Infinite-range adapters: changes of variable that reduce a
//! semi-infinite or doubly-infinite integral to `∫₀¹ g(t) dt`, which is then
//! handed to [`crate::qags`].

use crate::kronrod::KronrodRule;
use crate::qags;
use crate::status::QuadResult;

/// `∫_{-∞}^{+∞} f(x) dx`, via `x = (1-t)/t` and the symmetric combination
/// `f(x) + f(-x)`, reducing the doubly-infinite range to `(0, 1]`.
pub fn integrate_minf_pinf<F: Fn(f64) -> f64>(
    f: F,
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
    rule: KronrodRule,
) -> QuadResult {
    let g = move |t: f64| {
        if t == 0.0 {
            return 0.0;
        }
        let x = (1.0 - t) / t;
        (f(x) + f(-x)) / (t * t)
    };
    qags::integrate(g, 0.0, 1.0, epsabs, epsrel, max_iter, rule)
}

/// `∫_a^{+∞} f(x) dx`, via `x = a + t/(1-t)`.
pub fn integrate_lower_pinf<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
    rule: KronrodRule,
) -> QuadResult {
    let g = move |t: f64| {
        if t == 1.0 {
            return 0.0;
        }
        let one_minus_t = 1.0 - t;
        let x = a + t / one_minus_t;
        f(x) / (one_minus_t * one_minus_t)
    };
    qags::integrate(g, 0.0, 1.0, epsabs, epsrel, max_iter, rule)
}

/// `∫_{-∞}^{b} f(x) dx`, via `x = b - (1-t)/t`.
pub fn integrate_minf_upper<F: Fn(f64) -> f64>(
    f: F,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    max_iter: usize,
    rule: KronrodRule,
) -> QuadResult {
    let g = move |t: f64| {
        if t == 0.0 {
            return 0.0;
        }
        let x = b - (1.0 - t) / t;
        f(x) / (t * t)
    };
    qags::integrate(g, 0.0, 1.0, epsabs, epsrel, max_iter, rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_over_the_real_line() {
        let out = integrate_minf_pinf(
            |x: f64| (-x * x).exp(),
            1e-9,
            1e-9,
            200,
            KronrodRule::Kronrod21,
        );
        assert!((out.result - std::f64::consts::PI.sqrt()).abs() < 1e-6, "{}", out.result);
    }

    #[test]
    fn exponential_decay_from_zero_to_infinity() {
        let out = integrate_lower_pinf(|x: f64| (-x).exp(), 0.0, 1e-9, 1e-9, 200, KronrodRule::Kronrod21);
        assert!((out.result - 1.0).abs() < 1e-6, "{}", out.result);
    }

    #[test]
    fn exponential_growth_from_minus_infinity_to_zero() {
        let out = integrate_minf_upper(|x: f64| x.exp(), 0.0, 1e-9, 1e-9, 200, KronrodRule::Kronrod21);
        assert!((out.result - 1.0).abs() < 1e-6, "{}", out.result);
    }
}
