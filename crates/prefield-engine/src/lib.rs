//! Simulation driver for locally interdependent preferences.
//!
//! A [`Simulation`] owns the current preference field and price ratio and
//! advances them one period at a time:
//!
//! 1. update the field at the current price ratio,
//! 2. recompute the price ratio from the new field,
//! 3. record the average preference and the ratio, and snapshot the field
//!    if the period is a checkpoint.
//!
//! Periods are strictly sequential; nothing is shared across them except the
//! current field and ratio, both replaced (never mutated) each period.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod init;
pub mod metrics;
pub mod series;

pub use config::{ConfigError, SimulationConfig};
pub use driver::{run, DriverState, Simulation};
pub use error::{Halted, SimError, Stage};
pub use init::{uniform_field, uniform_random_field};
pub use metrics::StepMetrics;
pub use series::{PeriodRecord, SnapshotSet, TimeSeries, Trajectory};
