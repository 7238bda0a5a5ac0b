//! Economics of the preference lattice.
//!
//! - [`Economy`]: the production-technology regime, which determines how the
//!   global price ratio responds to the preference distribution.
//! - [`update`]: the per-period feedback rule that moves every agent toward
//!   its locally implied optimum.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod price;
pub mod update;

pub use price::{Economy, ParameterError};
pub use update::{step, step_with_stats, UpdateOutcome};
