//! Inferir: closed-form variational Bayes for univariate Gaussian models.
//!
//! Inferir infers the mean and precision of normally distributed data by
//! mean-field variational inference. For this conjugate model the coordinate
//! updates have closed forms, so the whole posterior approximation reduces to
//! a cheap fixed-point iteration over four scalar hyperparameters, with no
//! sampling and no numerical integration.
//!
//! # Quick Start
//!
//! ```
//! use inferir::prelude::*;
//!
//! // Observations from a roughly unit-variance process centered near 2
//! let ys = [1.2, 2.4, 1.9, 2.7, 1.8];
//!
//! let prior = NormalGammaPrior::noninformative();
//! let vb = GaussianVb::new(&ys, prior).expect("non-empty observations");
//!
//! // Iterate to a fixed point of the update
//! let run = vb
//!     .run_to_tolerance(prior.posterior(), 1e-9, 50)
//!     .expect("well-posed model");
//! assert!(run.converged);
//!
//! // Posterior over the mean, and over the noise precision
//! assert!((run.posterior.mean() - 2.0).abs() < 0.01);
//! assert!(run.posterior.precision_mean() > 0.0);
//! assert!(run.posterior.mean_variance() > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`vb`]: The inference core: priors, posterior state, and the
//!   fixed-point update engine
//! - [`stats`]: Sufficient statistics of the observation set
//! - [`synthetic`]: Seeded Gaussian data generation for demos and tests
//! - [`error`]: Error types
//! - [`prelude`]: Convenience re-exports

pub mod error;
pub mod prelude;
pub mod stats;
pub mod synthetic;
pub mod vb;

pub use error::{InferirError, Result};
pub use vb::{GaussianVb, NormalGammaPrior, Posterior, VbRun};
