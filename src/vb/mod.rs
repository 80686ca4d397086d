//! Mean-field variational Bayes for a univariate Gaussian.
//!
//! Infers the mean μ and precision β of normally distributed data under a
//! factorized approximation `q(μ, β) = q(μ)·q(β)` with `q(μ) = N(m, v)` and
//! `q(β) = Gamma(b, c)` (scale/shape parameterization). For this conjugate
//! model the coordinate updates are available in closed form, so inference is
//! a fixed-point iteration over the four scalar hyperparameters `(m, v, b, c)`
//! rather than an optimization.
//!
//! **Prior**: μ ~ N(m₀, v₀), β ~ Gamma(b₀, c₀)
//! **Likelihood**: yᵢ ~ N(μ, 1/β), i.i.d.
//! **Approximate posterior**: q(μ) = N(m, v), q(β) = Gamma(b, c)
//!
//! # Mathematical Foundation
//!
//! Each sweep refreshes q(μ) from the current expectation E[β] = b·c, then
//! refreshes q(β) from the expected squared residual under the *new* q(μ):
//!
//! - m ← (m₀ + v₀·b·c·S1) / (1 + N·v₀·b·c)
//! - v ← v₀ / (1 + N·v₀·b·c)
//! - X = S2 − 2·S1·m + N·(m² + v)
//! - b ← 1 / (1/b₀ + X/2)
//! - c ← N/2 + c₀
//!
//! where `S1 = Σyᵢ`, `S2 = Σyᵢ²`. The shape c depends only on N and c₀, so it
//! converges in a single sweep; once it is fixed the remaining map contracts
//! and the whole tuple typically reaches floating-point rest within a handful
//! of sweeps from any valid starting point.
//!
//! # Example
//!
//! ```
//! use inferir::vb::{GaussianVb, NormalGammaPrior};
//!
//! let ys = [1.2, 2.4, 1.9, 2.7, 1.8];
//! let prior = NormalGammaPrior::noninformative();
//! let vb = GaussianVb::new(&ys, prior).expect("valid observations");
//!
//! let run = vb
//!     .run_to_tolerance(prior.posterior(), 1e-9, 50)
//!     .expect("well-posed model");
//! assert!(run.converged);
//!
//! // Near-flat prior: posterior mean tracks the sample mean (2.0)
//! assert!((run.posterior.mean() - 2.0).abs() < 1e-3);
//! ```
//!
//! References: Bishop (2006) "Pattern Recognition and Machine Learning"
//! §10.1.3; MacKay (2003) "Information Theory, Inference, and Learning
//! Algorithms" ch. 33.

use crate::error::{InferirError, Result};
use crate::stats::SufficientStats;

/// Prior hyperparameters `(m₀, v₀, b₀, c₀)`.
///
/// Represents a Gaussian prior `N(m₀, v₀)` on the mean and a Gamma prior with
/// scale `b₀` and shape `c₀` on the precision (Gamma mean = `b₀·c₀`, variance
/// = `c₀·b₀²`). Set once, immutable thereafter.
///
/// # Example
///
/// ```
/// use inferir::vb::NormalGammaPrior;
///
/// let prior = NormalGammaPrior::new(0.0, 1000.0, 1000.0, 0.001).expect("valid prior");
/// assert_eq!(prior.v0(), 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalGammaPrior {
    /// Prior mean location m₀
    m0: f64,
    /// Prior mean variance v₀
    v0: f64,
    /// Prior precision scale b₀
    b0: f64,
    /// Prior precision shape c₀
    c0: f64,
}

impl NormalGammaPrior {
    /// Creates a prior from explicit hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns an error unless all values are finite and `v0 > 0`, `b0 > 0`,
    /// `c0 > 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::NormalGammaPrior;
    ///
    /// assert!(NormalGammaPrior::new(0.0, 1.0, 1.0, 1.0).is_ok());
    /// assert!(NormalGammaPrior::new(0.0, -1.0, 1.0, 1.0).is_err());
    /// ```
    pub fn new(m0: f64, v0: f64, b0: f64, c0: f64) -> Result<Self> {
        if !m0.is_finite() {
            return Err(InferirError::InvalidHyperparameter {
                param: "m0".to_string(),
                value: m0.to_string(),
                constraint: "finite".to_string(),
            });
        }
        for (name, value) in [("v0", v0), ("b0", b0), ("c0", c0)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InferirError::InvalidHyperparameter {
                    param: name.to_string(),
                    value: value.to_string(),
                    constraint: "> 0 and finite".to_string(),
                });
            }
        }
        Ok(Self { m0, v0, b0, c0 })
    }

    /// Creates a near-flat prior: `m₀ = 0`, `v₀ = 1000`, and a precision
    /// prior with mean 1 and variance 1000 (`b₀ = 1000`, `c₀ = 0.001`).
    ///
    /// Weak enough that the posterior is dominated by the data.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::NormalGammaPrior;
    ///
    /// let prior = NormalGammaPrior::noninformative();
    /// assert_eq!(prior.m0(), 0.0);
    /// assert_eq!(prior.b0() * prior.c0(), 1.0);
    /// ```
    #[must_use]
    pub fn noninformative() -> Self {
        Self {
            m0: 0.0,
            v0: 1000.0,
            b0: 1000.0,
            c0: 0.001,
        }
    }

    /// Creates a prior from the desired mean and variance of the precision.
    ///
    /// Converts the caller-intuitive `(mean, variance)` pair for the Gamma
    /// precision prior into scale/shape form: `b₀ = variance/mean`,
    /// `c₀ = mean²/variance`.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision_mean ≤ 0` or `precision_variance ≤ 0`
    /// (or either is non-finite), or if the mean-prior parameters are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::NormalGammaPrior;
    ///
    /// let prior = NormalGammaPrior::with_precision_moments(0.0, 1000.0, 1.0, 1000.0)
    ///     .expect("valid moments");
    /// assert_eq!(prior.b0(), 1000.0);
    /// assert_eq!(prior.c0(), 0.001);
    /// ```
    pub fn with_precision_moments(
        m0: f64,
        v0: f64,
        precision_mean: f64,
        precision_variance: f64,
    ) -> Result<Self> {
        for (name, value) in [
            ("precision_mean", precision_mean),
            ("precision_variance", precision_variance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InferirError::InvalidHyperparameter {
                    param: name.to_string(),
                    value: value.to_string(),
                    constraint: "> 0 and finite".to_string(),
                });
            }
        }
        Self::new(
            m0,
            v0,
            precision_variance / precision_mean,
            precision_mean * precision_mean / precision_variance,
        )
    }

    /// Prior mean location m₀.
    #[must_use]
    pub fn m0(&self) -> f64 {
        self.m0
    }

    /// Prior mean variance v₀.
    #[must_use]
    pub fn v0(&self) -> f64 {
        self.v0
    }

    /// Prior precision scale b₀.
    #[must_use]
    pub fn b0(&self) -> f64 {
        self.b0
    }

    /// Prior precision shape c₀.
    #[must_use]
    pub fn c0(&self) -> f64 {
        self.c0
    }

    /// The posterior state that equals this prior, the usual starting point
    /// for iteration.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::NormalGammaPrior;
    ///
    /// let prior = NormalGammaPrior::noninformative();
    /// let init = prior.posterior();
    /// assert_eq!(init.mean(), prior.m0());
    /// ```
    #[must_use]
    pub fn posterior(&self) -> Posterior {
        Posterior {
            m: self.m0,
            v: self.v0,
            b: self.b0,
            c: self.c0,
        }
    }
}

/// Posterior hyperparameter state `(m, v, b, c)`.
///
/// `m` is the current estimate of the posterior mean of μ and `v` its
/// variance; `b, c` parameterize the Gamma posterior over the precision β
/// (posterior mean of β = `c·b`, variance = `c·b²`). Each update produces a
/// wholly new value; nothing is mutated in place.
///
/// # Example
///
/// ```
/// use inferir::vb::Posterior;
///
/// let post = Posterior::new(1.5, 0.01, 0.5, 2.0).expect("valid state");
/// assert_eq!(post.mean(), 1.5);
/// assert_eq!(post.precision_mean(), 1.0);
/// assert_eq!(post.precision_variance(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posterior {
    m: f64,
    v: f64,
    b: f64,
    c: f64,
}

impl Posterior {
    /// Creates a posterior state from explicit hyperparameters.
    ///
    /// Any values with `v, b, c > 0` are a legal starting point; the
    /// iteration's fixed point does not depend on them.
    ///
    /// # Errors
    ///
    /// Returns an error unless all values are finite and `v > 0`, `b > 0`,
    /// `c > 0`.
    pub fn new(m: f64, v: f64, b: f64, c: f64) -> Result<Self> {
        if !m.is_finite() {
            return Err(InferirError::InvalidHyperparameter {
                param: "m".to_string(),
                value: m.to_string(),
                constraint: "finite".to_string(),
            });
        }
        for (name, value) in [("v", v), ("b", b), ("c", c)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InferirError::InvalidHyperparameter {
                    param: name.to_string(),
                    value: value.to_string(),
                    constraint: "> 0 and finite".to_string(),
                });
            }
        }
        Ok(Self { m, v, b, c })
    }

    /// Mean location m.
    #[must_use]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Mean variance v.
    #[must_use]
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Precision scale b.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Precision shape c.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Inferred mean of the data distribution, `E[μ] = m`.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.m
    }

    /// Variance of the mean estimate, `Var[μ] = v`.
    #[must_use]
    pub fn mean_variance(&self) -> f64 {
        self.v
    }

    /// Inferred precision of the data distribution, `E[β] = c·b`.
    #[must_use]
    pub fn precision_mean(&self) -> f64 {
        self.c * self.b
    }

    /// Variance of the precision estimate, `Var[β] = c·b²`.
    #[must_use]
    pub fn precision_variance(&self) -> f64 {
        self.c * self.b * self.b
    }

    /// Implied noise variance, `1/E[β]`.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::Posterior;
    ///
    /// let post = Posterior::new(0.0, 1.0, 0.5, 4.0).expect("valid state");
    /// assert_eq!(post.noise_variance(), 0.5);
    /// ```
    #[must_use]
    pub fn noise_variance(&self) -> f64 {
        1.0 / self.precision_mean()
    }

    /// Largest absolute component-wise difference to another state,
    /// `max(|Δm|, |Δv|, |Δb|, |Δc|)`.
    ///
    /// This is the quantity tolerance-mode runs test against.
    #[must_use]
    pub fn max_abs_delta(&self, other: &Self) -> f64 {
        (self.m - other.m)
            .abs()
            .max((self.v - other.v).abs())
            .max((self.b - other.b).abs())
            .max((self.c - other.c).abs())
    }
}

/// Outcome of a variational run: the final state plus the per-sweep history.
///
/// `trace[i]` is the state after sweep `i + 1`; `trace.last()` equals
/// `posterior` whenever at least one sweep ran. `converged` is `true` only
/// when a tolerance-mode run met its tolerance before the iteration cap;
/// fixed-count runs apply no tolerance test and always report `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct VbRun {
    /// Final posterior state.
    pub posterior: Posterior,
    /// Posterior state after each sweep, in order.
    pub trace: Vec<Posterior>,
    /// Number of sweeps actually performed.
    pub iterations: usize,
    /// Whether a tolerance-mode run met its tolerance.
    pub converged: bool,
}

/// Variational inference engine for one observation set and one prior.
///
/// Holds the precomputed sufficient statistics and the prior, both immutable,
/// and exposes the pure hyperparameter update plus two driver modes over it.
/// Independent engines share nothing mutable, so separate inference runs may
/// proceed in parallel freely.
///
/// # Example
///
/// ```
/// use inferir::vb::{GaussianVb, NormalGammaPrior};
///
/// let prior = NormalGammaPrior::noninformative();
/// let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");
///
/// // The original demonstration drives a fixed number of sweeps.
/// let run = vb.run(prior.posterior(), 10).expect("well-posed model");
/// assert_eq!(run.iterations, 10);
/// assert!((run.posterior.mean() - 2.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GaussianVb {
    stats: SufficientStats,
    prior: NormalGammaPrior,
}

impl GaussianVb {
    /// Creates an engine from raw observations and a prior.
    ///
    /// # Errors
    ///
    /// Returns an error if the observation sequence is empty or contains a
    /// non-finite value.
    pub fn new(observations: &[f64], prior: NormalGammaPrior) -> Result<Self> {
        Ok(Self {
            stats: SufficientStats::from_observations(observations)?,
            prior,
        })
    }

    /// Creates an engine from precomputed sufficient statistics.
    #[must_use]
    pub fn from_stats(stats: SufficientStats, prior: NormalGammaPrior) -> Self {
        Self { stats, prior }
    }

    /// The engine's sufficient statistics.
    #[must_use]
    pub fn stats(&self) -> &SufficientStats {
        &self.stats
    }

    /// The engine's prior.
    #[must_use]
    pub fn prior(&self) -> &NormalGammaPrior {
        &self.prior
    }

    /// One variational sweep: maps the current posterior state to the next.
    ///
    /// Pure over its explicit inputs; the engine's statistics and prior are
    /// read-only. The mean factor is refreshed first and the precision factor
    /// is formed from the *refreshed* mean and variance. Forming it from the
    /// stale values instead would no longer be the mean-field coordinate
    /// update, and a single sweep would not match the closed-form equations.
    ///
    /// # Errors
    ///
    /// Returns [`InferirError::NumericalInstability`] if the precision-scale
    /// denominator `1/b₀ + X/2` comes out zero or non-finite. This cannot
    /// happen for valid priors and finite data (X is a sum of squares up to
    /// rounding) but is guarded rather than silently producing infinities.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&self, current: &Posterior) -> Result<Posterior> {
        let n = self.stats.n() as f64;
        let s1 = self.stats.sum();
        let s2 = self.stats.sum_squares();
        let prior = &self.prior;

        // E[β] under the current precision factor
        let beta_mean = current.b() * current.c();

        let denom = 1.0 + n * prior.v0() * beta_mean;
        let m = (prior.m0() + prior.v0() * beta_mean * s1) / denom;
        let v = prior.v0() / denom;

        // Expected squared residual Σ E[(yᵢ − μ)²] under the refreshed q(μ)
        let x = s2 - 2.0 * s1 * m + n * (m * m + v);

        let scale_denom = 1.0 / prior.b0() + x / 2.0;
        if scale_denom == 0.0 || !scale_denom.is_finite() {
            return Err(InferirError::NumericalInstability {
                context: "precision scale denominator (1/b0 + X/2)".to_string(),
                value: scale_denom,
            });
        }

        Ok(Posterior {
            m,
            v,
            b: 1.0 / scale_denom,
            c: n / 2.0 + prior.c0(),
        })
    }

    /// Runs a fixed number of sweeps, the original demonstration's policy.
    ///
    /// `iterations = 0` is legal and returns `init` untouched with an empty
    /// trace. The returned run reports `converged = false` because no
    /// tolerance test was applied; use [`Self::run_to_tolerance`] for a
    /// convergence claim.
    ///
    /// # Errors
    ///
    /// Propagates [`InferirError::NumericalInstability`] from the failing
    /// sweep, if any.
    pub fn run(&self, init: Posterior, iterations: usize) -> Result<VbRun> {
        let mut trace = Vec::with_capacity(iterations);
        let mut current = init;
        for _ in 0..iterations {
            current = self.step(&current)?;
            trace.push(current);
        }
        Ok(VbRun {
            posterior: current,
            trace,
            iterations,
            converged: false,
        })
    }

    /// Runs sweeps until successive states differ by less than `tol` in every
    /// component, or until `max_iterations` sweeps have been performed.
    ///
    /// Exhausting the cap is not an error: the run is returned with
    /// `converged = false` and the caller decides what to do with it.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not a finite positive number, or if a
    /// sweep fails with numerical instability.
    ///
    /// # Example
    ///
    /// ```
    /// use inferir::vb::{GaussianVb, NormalGammaPrior};
    ///
    /// let prior = NormalGammaPrior::noninformative();
    /// let vb = GaussianVb::new(&[1.0, 3.0], prior).expect("valid observations");
    /// let run = vb
    ///     .run_to_tolerance(prior.posterior(), 1e-9, 50)
    ///     .expect("well-posed model");
    /// assert!(run.converged);
    /// assert!(run.iterations < 50);
    /// ```
    pub fn run_to_tolerance(
        &self,
        init: Posterior,
        tol: f64,
        max_iterations: usize,
    ) -> Result<VbRun> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(InferirError::InvalidHyperparameter {
                param: "tol".to_string(),
                value: tol.to_string(),
                constraint: "> 0 and finite".to_string(),
            });
        }

        let mut trace = Vec::new();
        let mut current = init;
        for i in 0..max_iterations {
            let next = self.step(&current)?;
            trace.push(next);
            let delta = next.max_abs_delta(&current);
            current = next;
            if delta < tol {
                return Ok(VbRun {
                    posterior: current,
                    trace,
                    iterations: i + 1,
                    converged: true,
                });
            }
        }
        Ok(VbRun {
            posterior: current,
            trace,
            iterations: max_iterations,
            converged: false,
        })
    }
}

#[cfg(test)]
#[path = "tests_vb_contract.rs"]
mod tests;
