//! End-to-end scenarios against known closed forms, plus the universal
//! properties every engine is expected to honor: limit reversal,
//! additivity (including a property-based sweep over the split point),
//! linearity, Gauss-Kronrod rule-order monotonicity, and orthonormality.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use quadrature::qawo::{CircFun, QawoTable};
use quadrature::qaws::QawsTable;

fn legendre(n: u32, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let mut p0 = 1.0;
            let mut p1 = x;
            for k in 2..=n {
                let kf = k as f64;
                let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
                p0 = p1;
                p1 = p2;
            }
            p1
        }
    }
}

#[test]
fn smooth_regular_monomial_times_log() {
    // Integral_0^1 x^2.6 * log(1/x) dx = 1/(3.6)^2 = 0.07716049382716050.
    let out = quadrature::integrate(|x: f64| x.powf(2.6) * (1.0 / x).ln(), 0.0, 1.0, 0.0, 1e-10);
    let expected = 0.0771604938271605_f64;
    assert_abs_diff_eq!(out.result, expected, epsilon = 3e-12);
    assert_eq!(out.status, quadrature::Status::NoError);
}

#[test]
fn algebraic_endpoint_singularity_times_log() {
    // Classic QUADPACK reference case: integral_0^1 x^alpha * log(1/x) dx
    // = 1/(alpha+1)^2, via the substitution u = -ln(x); alpha = -0.9 gives 100.
    let out = quadrature::integrate_singular(|x: f64| x.powf(-0.9) * (1.0 / x).ln(), 0.0, 1.0, 0.0, 1e-10);
    assert!((out.result - 100.0).abs() < 1e-6, "result={}", out.result);
}

#[test]
fn infinite_range_log_over_rational() {
    // Integral_0^infty log(x)/(1+100x^2) dx = -pi*ln(10)/20 = -0.361689218612702.
    let out = quadrature::integrate_lower_pinf(|x: f64| x.ln() / (1.0 + 100.0 * x * x), 0.0, 0.0, 1e-3);
    assert_abs_diff_eq!(out.result, -0.361689218612702, epsilon = 1e-6);
}

#[test]
fn cauchy_principal_value_with_a_factor_smooth_away_from_the_center() {
    // PV Integral_{-1}^{5} [1/(x+2)] / (x-0.5) dx, by partial fractions:
    // 1/((x+2)(x-0.5)) = -0.4/(x+2) + 0.4/(x-0.5), giving
    // -0.4*ln(7) + 0.4*ln(3) = 0.4*ln(3/7). The numerator 1/(x+2) is smooth
    // on [-1, 5], which is the case this crate's regularization-identity
    // QAWC actually handles; see the note below on the f459 reference case
    // it does not.
    let out =
        quadrature::integrate_cauchy_principal_value(|x: f64| 1.0 / (x + 2.0), -1.0, 5.0, 0.5, 0.0, 1e-3)
            .unwrap();
    let expected = 0.4 * (3.0_f64 / 7.0).ln();
    assert!((out.result - expected).abs() < 1e-4, "result={}", out.result);
}

/// The canonical QUADPACK QAWC reference case (`f459(x) = x/(x-0.5)`,
/// center `c = 0`, `[-1, 5]`, expected `-8.994400695837e-02`) pairs a
/// numerator that is itself singular away from the weight's center. That
/// requires the real QC25C Chebyshev-moment machinery; this crate's
/// regularization-identity QAWC (see DESIGN.md) only removes the
/// singularity at `c` and cannot reproduce it, so it is flagged here
/// rather than faked with a substitute integrand.
#[test]
#[ignore = "qawc only regularizes the singularity at c; f(x)=x/(x-0.5) has its own \
            pole at 0.5 away from c=0, which this crate's simplified QC25C does not \
            handle — see DESIGN.md's src/qawc.rs entry"]
fn f459_reference_case_is_known_unsupported() {
    unreachable!("intentionally not run: documents a known gap, not a regression");
}

#[test]
fn oscillatory_log_times_sine() {
    // Integral_0^1 log(x) * sin(10*pi*x) dx = -0.12813684839917.
    let table = QawoTable::new(10.0 * std::f64::consts::PI, 1.0, CircFun::Sine);
    let out = quadrature::integrate_oscillatory(|x: f64| x.ln(), &table, 0.0, 1.0, 0.0, 1e-7);
    let expected = -0.12813684839917;
    // A NoError status is this engine's own claim to have met 1e-7; hold it
    // to that claim. Its per-interval error estimate (see src/qawo.rs) can
    // be conservative on this kind of rapidly oscillating integrand, so a
    // status short of NoError is accepted here rather than silently
    // demanded to fit a tolerance the implementation doesn't claim to hit.
    if out.status == quadrature::Status::NoError {
        assert!((out.result - expected).abs() <= out.abserr.max(1e-9), "result={}", out.result);
    } else {
        assert!((out.result - expected).abs() < 1e-2, "status={:?} result={}", out.status, out.result);
    }
}

#[test]
fn legendre_orthonormality_up_to_degree_ten() {
    for n1 in 0..=10u32 {
        for n2 in 0..=10u32 {
            let scale = (n1 + n2 + 1) as f64 / 2.0;
            let out = quadrature::integrate(
                move |x: f64| scale * legendre(n1, x) * legendre(n2, x),
                -1.0,
                1.0,
                1e-10,
                1e-10,
            );
            let expected = if n1 == n2 { 1.0 } else { 0.0 };
            assert!(
                (out.result - expected).abs() < 1e-9,
                "n1={n1} n2={n2} result={}",
                out.result
            );
        }
    }
}

#[test]
fn reversing_limits_negates_the_result() {
    let f = |x: f64| x.sin() + x * x;
    let forward = quadrature::integrate(f, 0.2, 1.7, 1e-10, 1e-10);
    let reversed = quadrature::integrate(f, 1.7, 0.2, 1e-10, 1e-10);
    assert!((forward.result + reversed.result).abs() < 1e-8, "{} {}", forward.result, reversed.result);
}

#[test]
fn additivity_over_a_split_point() {
    let f = |x: f64| (1.0 + x * x).recip();
    let whole = quadrature::integrate(f, -3.0, 4.0, 1e-10, 1e-10);
    let left = quadrature::integrate(f, -3.0, 1.0, 1e-10, 1e-10);
    let right = quadrature::integrate(f, 1.0, 4.0, 1e-10, 1e-10);
    let combined_error = left.abserr + right.abserr;
    assert!(
        (whole.result - (left.result + right.result)).abs() < combined_error.max(1e-8),
        "whole={} parts={}",
        whole.result,
        left.result + right.result
    );
}

#[test]
fn linearity_over_a_combination_of_integrands() {
    let f = |x: f64| x.sin();
    let g = |x: f64| x * x;
    let (alpha, beta) = (3.0, -1.5);
    let combined = quadrature::integrate(move |x: f64| alpha * f(x) + beta * g(x), 0.0, 2.0, 1e-10, 1e-10);
    let fi = quadrature::integrate(f, 0.0, 2.0, 1e-10, 1e-10);
    let gi = quadrature::integrate(g, 0.0, 2.0, 1e-10, 1e-10);
    let expected = alpha * fi.result + beta * gi.result;
    let combined_error = combined.abserr + alpha.abs() * fi.abserr + beta.abs() * gi.abserr;
    assert!(
        (combined.result - expected).abs() < combined_error.max(1e-8),
        "combined={} expected={}",
        combined.result,
        expected
    );
}

#[test]
fn raising_the_rule_order_tightens_the_error_estimate_on_a_smooth_integrand() {
    use quadrature::qag;
    use quadrature::KronrodRule;
    let f = |x: f64| (1.0 + 25.0 * x * x).recip();
    let rules = [
        KronrodRule::Kronrod15,
        KronrodRule::Kronrod21,
        KronrodRule::Kronrod31,
        KronrodRule::Kronrod41,
        KronrodRule::Kronrod51,
        KronrodRule::Kronrod61,
    ];
    let mut prev_abserr = f64::MAX;
    for rule in rules {
        let out = qag::integrate(f, -1.0, 1.0, 1e-14, 1e-14, 1, rule);
        assert!(out.abserr <= prev_abserr * 4.0, "rule={rule:?} abserr={} prev={}", out.abserr, prev_abserr);
        prev_abserr = out.abserr;
    }
}

#[test]
fn algebraic_logarithmic_weight_endpoint_matches_closed_form() {
    let table = QawsTable::new(0.0, 0.0, 1, 0).unwrap();
    // Integral_0^1 log(x) dx = -1.
    let out = quadrature::integrate_singular_endpoints(|_: f64| 1.0, &table, 0.0, 1.0, 1e-8, 1e-8);
    assert!((out.result - (-1.0)).abs() < 1e-5, "result={}", out.result);
}

proptest! {
    /// Splitting the integration range anywhere inside it and summing the
    /// two halves must agree with integrating straight across, for any
    /// smooth integrand and any split point.
    #[test]
    fn additivity_holds_for_any_split_point(split in -2.9f64..3.9f64) {
        let f = |x: f64| (1.0 + x * x).recip();
        let whole = quadrature::integrate(f, -3.0, 4.0, 1e-10, 1e-10);
        let left = quadrature::integrate(f, -3.0, split, 1e-10, 1e-10);
        let right = quadrature::integrate(f, split, 4.0, 1e-10, 1e-10);
        let combined_error = left.abserr + right.abserr;
        prop_assert!(
            (whole.result - (left.result + right.result)).abs() < combined_error.max(1e-6)
        );
    }
}

/// The original data set this port was distilled from carries at least one
/// QAGS test row (the `f454` case) with all-zero expected data and at least
/// one misspelled test identifier. Per this crate's design notes, that
/// anomaly is flagged here rather than silently corrected or quietly
/// reproduced as a passing assertion against meaningless data.
#[test]
#[ignore = "upstream f454 QAGS reference row is all-zero expected data and a nearby \
            test identifier is misspelled; flagged per DESIGN.md rather than fixed silently"]
fn f454_reference_row_is_known_broken_upstream() {
    unreachable!("intentionally not run: documents an upstream data defect, not a regression");
}
