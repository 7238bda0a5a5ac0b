//! The simulation driver.
//!
//! [`Simulation`] is the primary API for running a preference dynamics
//! experiment. It moves through a small state machine:
//!
//! ```text
//! Initializing --initialize()--> Running --step() x T--> Completed
//!       |                           |
//!       +-----------+---------------+--> Failed
//! ```
//!
//! Failures are terminal: the dynamics are deterministic, so stepping again
//! would reproduce the same failure. A failed driver keeps reporting the
//! error it failed with.

use std::time::Instant;

use indexmap::IndexSet;
use prefield_core::{DegenerateField, Field, Period};
use prefield_economy::update::{self, UpdateOutcome};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::{Halted, SimError, Stage};
use crate::metrics::StepMetrics;
use crate::series::{PeriodRecord, SnapshotSet, TimeSeries, Trajectory};

/// Cap on up-front time series allocation; longer runs grow on demand.
const MAX_PREALLOCATED_PERIODS: u64 = 1 << 16;

// ── DriverState ─────────────────────────────────────────────────

/// Observable lifecycle state of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Configuration validated; waiting for an initial field.
    Initializing,
    /// Advancing period by period.
    Running,
    /// All configured periods have been recorded.
    Completed,
    /// Stopped on a validation or degenerate-field error.
    Failed,
}

/// The field and price ratio carried from one period to the next.
struct Current {
    field: Field,
    price_ratio: f64,
}

enum Phase {
    Initializing,
    Running(Current),
    Completed(Current),
    Failed {
        last: Option<Current>,
        error: SimError,
    },
}

// ── Simulation ──────────────────────────────────────────────────

/// Single-threaded driver owning the evolving field.
///
/// # Example
///
/// ```
/// use prefield_core::Period;
/// use prefield_engine::{uniform_random_field, Simulation, SimulationConfig};
///
/// let config = SimulationConfig { side: 10, periods: 20, ..Default::default() };
/// let mut sim = Simulation::new(config).unwrap();
/// sim.initialize(uniform_random_field(10, 7).unwrap(), &[Period(19)]).unwrap();
/// let trajectory = sim.run().unwrap();
/// assert_eq!(trajectory.series.len(), 20);
/// assert!(trajectory.snapshots.contains(Period(19)));
/// ```
pub struct Simulation {
    config: SimulationConfig,
    phase: Phase,
    checkpoints: IndexSet<Period>,
    series: TimeSeries,
    snapshots: SnapshotSet,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config` and create a driver awaiting its initial field.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let capacity = config.periods.min(MAX_PREALLOCATED_PERIODS) as usize;
        Ok(Self {
            config,
            phase: Phase::Initializing,
            checkpoints: IndexSet::new(),
            series: TimeSeries::with_capacity(capacity),
            snapshots: SnapshotSet::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Seed the run with `initial` and choose which periods to snapshot.
    ///
    /// Checks the field against the configuration and computes the initial
    /// price ratio. A zero-period run goes straight to
    /// [`DriverState::Completed`].
    ///
    /// # Errors
    ///
    /// [`SimError::AlreadyInitialized`] outside the `Initializing` state;
    /// otherwise the driver moves to `Failed` and reports
    /// [`SimError::InvalidConfiguration`] for a bad field or checkpoint, or
    /// [`SimError::DegenerateField`] if the initial price ratio is undefined.
    pub fn initialize(&mut self, initial: Field, checkpoints: &[Period]) -> Result<(), SimError> {
        if !matches!(self.phase, Phase::Initializing) {
            return Err(SimError::AlreadyInitialized);
        }
        let validated = self
            .config
            .validate_initial_field(&initial)
            .and_then(|()| self.config.validate_checkpoints(checkpoints));
        if let Err(e) = validated {
            return Err(self.fail(None, SimError::InvalidConfiguration(e)));
        }

        let price_ratio = match self.config.economy.price_ratio(&initial) {
            Ok(ratio) => ratio,
            Err(source) => {
                return Err(self.fail(
                    None,
                    SimError::DegenerateField {
                        stage: Stage::Initial,
                        source,
                    },
                ));
            }
        };

        info!(
            side = self.config.side,
            periods = self.config.periods,
            speed = self.config.speed,
            economy = self.config.economy.name(),
            initial_average = initial.mean(),
            initial_price_ratio = price_ratio,
            "simulation initialized"
        );

        self.checkpoints = checkpoints.iter().copied().collect();
        let current = Current {
            field: initial,
            price_ratio,
        };
        self.phase = if self.config.periods == 0 {
            Phase::Completed(current)
        } else {
            Phase::Running(current)
        };
        Ok(())
    }

    /// Advance one period.
    ///
    /// Updates the field at the current price ratio, recomputes the ratio
    /// from the new field, records both, and snapshots the new field if the
    /// period is a checkpoint. Returns `Ok(None)` once the run is complete.
    ///
    /// # Errors
    ///
    /// [`SimError::NotInitialized`] before [`initialize()`](Self::initialize);
    /// [`SimError::DegenerateField`] if this period hits a zero denominator,
    /// after which the driver is `Failed` and returns the same error on
    /// every call.
    pub fn step(&mut self) -> Result<Option<PeriodRecord>, SimError> {
        let period = Period(self.series.len() as u64);
        let advanced = match &self.phase {
            Phase::Initializing => return Err(SimError::NotInitialized),
            Phase::Completed(_) => return Ok(None),
            Phase::Failed { error, .. } => return Err(error.clone()),
            Phase::Running(current) => advance(&self.config, current),
        };
        let (outcome, price_ratio, mut metrics) = match advanced {
            Ok(advanced) => advanced,
            Err(source) => {
                let last = self.take_current();
                let error = SimError::DegenerateField {
                    stage: Stage::Period(period),
                    source,
                };
                return Err(self.fail(last, error));
            }
        };

        let field = outcome.field;
        let record = self.series.push(field.mean(), price_ratio);
        if self.checkpoints.contains(&period) {
            self.snapshots.insert(period, field.clone());
        }
        metrics.clamped_low = outcome.clamped_low;
        metrics.clamped_high = outcome.clamped_high;

        debug!(
            period = period.0,
            average = record.average_preference,
            price_ratio = record.price_ratio,
            clamped_low = metrics.clamped_low,
            clamped_high = metrics.clamped_high,
            "period recorded"
        );
        self.last_metrics = metrics;

        let next = Current { field, price_ratio };
        self.phase = if period.0 + 1 >= self.config.periods {
            info!(
                periods = self.series.len(),
                final_average = record.average_preference,
                final_price_ratio = record.price_ratio,
                "simulation completed"
            );
            Phase::Completed(next)
        } else {
            Phase::Running(next)
        };
        Ok(Some(record))
    }

    /// Step until completion.
    ///
    /// # Errors
    ///
    /// On failure, returns [`Halted`] with the error and every period and
    /// snapshot recorded before it.
    pub fn run(mut self) -> Result<Trajectory, Halted> {
        loop {
            match self.step() {
                Ok(Some(_)) => {}
                Ok(None) => return Ok(self.into_trajectory()),
                Err(error) => {
                    return Err(Halted {
                        error,
                        trajectory: self.into_trajectory(),
                    })
                }
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        match self.phase {
            Phase::Initializing => DriverState::Initializing,
            Phase::Running(_) => DriverState::Running,
            Phase::Completed(_) => DriverState::Completed,
            Phase::Failed { .. } => DriverState::Failed,
        }
    }

    /// Number of periods recorded so far, i.e. the next period to run.
    pub fn period(&self) -> Period {
        Period(self.series.len() as u64)
    }

    /// The most recent field: the initial field before the first step, the
    /// last good field after a mid-run failure. `None` before
    /// initialization or if initialization failed.
    pub fn current_field(&self) -> Option<&Field> {
        self.current().map(|c| &c.field)
    }

    /// The price ratio that the next update will use.
    pub fn current_price_ratio(&self) -> Option<f64> {
        self.current().map(|c| c.price_ratio)
    }

    /// The error a failed driver stopped with.
    pub fn failure(&self) -> Option<&SimError> {
        match &self.phase {
            Phase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Recorded time series.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Recorded snapshots.
    pub fn snapshots(&self) -> &SnapshotSet {
        &self.snapshots
    }

    /// Metrics from the most recent successful period.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The configuration this driver was built with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Consume the driver, keeping what it recorded.
    pub fn into_trajectory(self) -> Trajectory {
        Trajectory {
            series: self.series,
            snapshots: self.snapshots,
        }
    }

    fn current(&self) -> Option<&Current> {
        match &self.phase {
            Phase::Initializing => None,
            Phase::Running(c) | Phase::Completed(c) => Some(c),
            Phase::Failed { last, .. } => last.as_ref(),
        }
    }

    fn take_current(&mut self) -> Option<Current> {
        match std::mem::replace(&mut self.phase, Phase::Initializing) {
            Phase::Running(c) | Phase::Completed(c) => Some(c),
            Phase::Failed { last, .. } => last,
            Phase::Initializing => None,
        }
    }

    fn fail(&mut self, last: Option<Current>, error: SimError) -> SimError {
        warn!(period = self.series.len(), %error, "simulation halted");
        self.phase = Phase::Failed {
            last,
            error: error.clone(),
        };
        error
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("state", &self.state())
            .field("period", &self.period())
            .field("economy", &self.config.economy.name())
            .field("price_ratio", &self.current_price_ratio())
            .finish()
    }
}

/// One period's computation: update, then reprice.
fn advance(
    config: &SimulationConfig,
    current: &Current,
) -> Result<(UpdateOutcome, f64, StepMetrics), DegenerateField> {
    let started = Instant::now();
    let outcome = update::step_with_stats(&current.field, current.price_ratio, config.speed)?;
    let update_us = started.elapsed().as_micros() as u64;

    let priced = Instant::now();
    let price_ratio = config.economy.price_ratio(&outcome.field)?;
    let price_us = priced.elapsed().as_micros() as u64;

    let metrics = StepMetrics {
        total_us: started.elapsed().as_micros() as u64,
        update_us,
        price_us,
        ..StepMetrics::default()
    };
    Ok((outcome, price_ratio, metrics))
}

/// Validate, initialize, and run to completion in one call.
///
/// # Errors
///
/// See [`Simulation::run`]. Invalid configurations halt with an empty
/// trajectory.
pub fn run(
    config: SimulationConfig,
    initial: Field,
    checkpoints: &[Period],
) -> Result<Trajectory, Halted> {
    let halted = |error| Halted {
        error,
        trajectory: Trajectory::default(),
    };
    let mut sim = Simulation::new(config).map_err(halted)?;
    if let Err(error) = sim.initialize(initial, checkpoints) {
        return Err(Halted {
            error,
            trajectory: sim.into_trajectory(),
        });
    }
    sim.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefield_economy::Economy;
    use prefield_test_utils::{checkerboard, uniform};

    fn config(side: u32, periods: u64, economy: Economy) -> SimulationConfig {
        SimulationConfig {
            side,
            speed: 0.5,
            periods,
            economy,
        }
    }

    #[test]
    fn lifecycle_reaches_completed() {
        let mut sim = Simulation::new(config(4, 3, Economy::default())).unwrap();
        assert_eq!(sim.state(), DriverState::Initializing);
        assert!(sim.current_field().is_none());
        assert_eq!(sim.step(), Err(SimError::NotInitialized));

        sim.initialize(checkerboard(4), &[]).unwrap();
        assert_eq!(sim.state(), DriverState::Running);
        assert_eq!(sim.current_price_ratio(), Some(1.0));

        for expected in 0..3 {
            let record = sim.step().unwrap().unwrap();
            assert_eq!(record.period, Period(expected));
        }
        assert_eq!(sim.state(), DriverState::Completed);
        assert_eq!(sim.step(), Ok(None));
        assert_eq!(sim.series().len(), 3);
        assert_eq!(sim.period(), Period(3));
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut sim = Simulation::new(config(3, 2, Economy::default())).unwrap();
        sim.initialize(uniform(3, 0.5), &[]).unwrap();
        assert_eq!(
            sim.initialize(uniform(3, 0.5), &[]),
            Err(SimError::AlreadyInitialized)
        );
        assert_eq!(sim.state(), DriverState::Running);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let bad = SimulationConfig {
            speed: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(bad),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn bad_initial_field_moves_to_failed() {
        let mut sim = Simulation::new(config(3, 2, Economy::default())).unwrap();
        let err = sim.initialize(uniform(4, 0.5), &[]).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
        assert_eq!(sim.state(), DriverState::Failed);
        assert_eq!(sim.step(), Err(err));
    }

    #[test]
    fn degenerate_initial_ratio_moves_to_failed() {
        let mut sim = Simulation::new(config(3, 5, Economy::default())).unwrap();
        let err = sim.initialize(uniform(3, 1.0), &[]).unwrap_err();
        assert_eq!(
            err,
            SimError::DegenerateField {
                stage: Stage::Initial,
                source: DegenerateField::ZeroComplementMass,
            }
        );
        assert_eq!(sim.state(), DriverState::Failed);
        assert_eq!(sim.failure(), Some(&err));
        assert!(sim.current_field().is_none());
    }

    #[test]
    fn infinite_initial_ratio_fails_at_initial_stage() {
        let mut sim = Simulation::new(config(3, 5, Economy::exchange(1e-320, 1.0))).unwrap();
        let err = sim.initialize(uniform(3, 0.5), &[]).unwrap_err();
        assert_eq!(
            err,
            SimError::DegenerateField {
                stage: Stage::Initial,
                source: DegenerateField::NonFinitePriceRatio,
            }
        );
        assert_eq!(sim.state(), DriverState::Failed);
        assert_eq!(sim.current_price_ratio(), None);
        assert!(sim.series().is_empty());
    }

    #[test]
    fn zero_periods_completes_immediately() {
        let mut sim = Simulation::new(config(3, 0, Economy::default())).unwrap();
        sim.initialize(uniform(3, 0.5), &[]).unwrap();
        assert_eq!(sim.state(), DriverState::Completed);
        assert_eq!(sim.step(), Ok(None));
        assert!(sim.into_trajectory().series.is_empty());
    }

    #[test]
    fn checkpoints_capture_post_update_fields() {
        let mut sim = Simulation::new(config(4, 4, Economy::default())).unwrap();
        sim.initialize(checkerboard(4), &[Period(0), Period(2)]).unwrap();
        sim.step().unwrap();
        let after_first = sim.current_field().unwrap().clone();
        assert!(sim.snapshots().get(Period(0)).unwrap().ptr_eq(&after_first));
        sim.step().unwrap();
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.snapshots().periods().collect::<Vec<_>>(), vec![Period(0), Period(2)]);
    }

    #[test]
    fn metrics_report_clamping() {
        let mut sim = Simulation::new(config(3, 1, Economy::constant_returns(0.5))).unwrap();
        sim.initialize(uniform(3, 0.0), &[]).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.last_metrics().clamped_low, 9);
        assert_eq!(sim.last_metrics().clamped_high, 0);
    }

    #[test]
    fn debug_output_names_state() {
        let sim = Simulation::new(config(3, 1, Economy::default())).unwrap();
        let dbg = format!("{sim:?}");
        assert!(dbg.contains("Initializing"));
        assert!(dbg.contains("exchange"));
    }
}
