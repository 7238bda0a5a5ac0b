//! Per-period metrics for the simulation driver.

/// Timing and clamping data collected during a single period.
///
/// Durations are in microseconds. The driver overwrites these after each
/// successful [`step()`](crate::Simulation::step).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole period.
    pub total_us: u64,
    /// Time spent in neighbour aggregation and the field update.
    pub update_us: u64,
    /// Time spent recomputing the price ratio.
    pub price_us: u64,
    /// Cells whose raw update fell below 0 and were clamped.
    pub clamped_low: usize,
    /// Cells whose raw update rose above 1 and were clamped.
    pub clamped_high: usize,
}
