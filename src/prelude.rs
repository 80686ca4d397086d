//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use inferir::prelude::*;
//! ```

pub use crate::error::{InferirError, Result};
pub use crate::stats::SufficientStats;
pub use crate::synthetic::GaussianSampler;
pub use crate::vb::{GaussianVb, NormalGammaPrior, Posterior, VbRun};
