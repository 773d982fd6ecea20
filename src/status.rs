//! Status codes and the always-populated result record.

use thiserror::Error;

/// Degree-of-reliability annotation returned alongside every integral
/// estimate. Never short-circuits a call: the numeric answer in
/// [`QuadResult`] is always populated, even when `status != Status::NoError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Status {
    /// Normal and reliable termination; the requested accuracy was achieved.
    #[error("the requested accuracy was achieved")]
    NoError,
    /// The maximum number of subdivisions/iterations was reached.
    #[error("number of iterations was insufficient")]
    MaxIterations,
    /// Round-off error prevents the requested tolerance from being reached.
    #[error("cannot reach tolerance because of roundoff error")]
    Roundoff,
    /// Extremely bad integrand behavior was detected somewhere in the range.
    #[error("bad integrand behavior found in the integration interval")]
    Singular,
    /// Round-off error was detected in the extrapolation table.
    #[error("roundoff error detected in the extrapolation")]
    ExtrapolationRoundoff,
    /// The integral is divergent, or too slowly convergent to accelerate.
    #[error("integral is divergent, or slowly convergent")]
    Divergence,
    /// The workspace's maximum number of subdivisions was reached.
    #[error("maximum number of subdivisions reached")]
    MaxSubdivisions,
    /// `epsabs`/`epsrel` do not satisfy the admissibility test, or (for
    /// non-adaptive rules with no subdivision budget to fall back on) the
    /// requested tolerance was never reached despite an admissible request.
    #[error("tolerance cannot be achieved with given epsabs and epsrel")]
    InvalidTolerance,
    /// Catch-all for conditions the QUADPACK algorithms don't name.
    #[error("could not integrate function")]
    Unknown,
}

impl Status {
    /// `true` for [`Status::NoError`].
    pub fn is_success(self) -> bool {
        matches!(self, Status::NoError)
    }
}

/// The uniform return type of every public integrator in this crate.
///
/// `result` and `abserr` are always populated (possibly `0.0`, possibly a
/// best-effort estimate): a non-[`Status::NoError`] status is a
/// reliability annotation, not an exceptional outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadResult {
    pub result: f64,
    pub abserr: f64,
    pub status: Status,
}

impl QuadResult {
    pub fn new(result: f64, abserr: f64) -> Self {
        Self {
            result,
            abserr,
            status: Status::NoError,
        }
    }

    pub fn with_status(result: f64, abserr: f64, status: Status) -> Self {
        Self {
            result,
            abserr,
            status,
        }
    }

    pub fn failed(status: Status) -> Self {
        Self {
            result: 0.0,
            abserr: 0.0,
            status,
        }
    }

    /// Negate the result in place, for limit-reversal.
    pub fn negated(self) -> Self {
        Self {
            result: -self.result,
            ..self
        }
    }
}

/// Construction-time failures that have no partial numeric answer to hand
/// back, unlike [`Status`]: a degenerate moment-table configuration,
/// or a malformed list of singular points.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("epsabs <= 0 and epsrel < max(50*eps, 0.5e-28)")]
    InvalidTolerance,
    #[error("qaws requires alpha > -1 and beta > -1, got alpha={alpha}, beta={beta}")]
    InvalidWeightExponents { alpha: f64, beta: f64 },
    #[error("qaws requires mu, nu in {{0, 1}}, got mu={mu}, nu={nu}")]
    InvalidWeightLogPowers { mu: i32, nu: i32 },
    #[error("qagp requires at least 2 strictly increasing points, got {0}")]
    TooFewPoints(usize),
    #[error("qagp points must be strictly increasing")]
    PointsNotSorted,
    #[error("cauchy principal value requires c strictly inside (a, b)")]
    CenterOutsideInterval,
}
