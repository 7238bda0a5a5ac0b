//! Reference profiles for benchmarking and examples.
//!
//! Each profile is one of the three headline experiments: a 50×50 lattice,
//! adjustment speed 0.5, and a random initial field from seed
//! [`REFERENCE_SEED`].
//!
//! - [`exchange_profile`]: pure exchange, `e1 = e2 = 1`, 250 periods
//! - [`constant_returns_profile`]: fixed price ratio 0.5, 22 periods
//! - [`decreasing_returns_profile`]: square-root pricing, 250 periods

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use prefield_core::{Field, FieldError, Period};
use prefield_economy::Economy;
use prefield_engine::{run, uniform_random_field, Halted, SimulationConfig, Trajectory};

/// Seed for every reference initial field.
pub const REFERENCE_SEED: u64 = 121;

/// Grid side of every reference profile.
pub const REFERENCE_SIDE: u32 = 50;

/// Everything needed to start a run.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Human-readable name.
    pub name: &'static str,
    /// Run parameters.
    pub config: SimulationConfig,
    /// Initial preference field.
    pub initial: Field,
    /// Periods whose fields are snapshotted.
    pub checkpoints: Vec<Period>,
}

impl Profile {
    fn build(
        name: &'static str,
        periods: u64,
        economy: Economy,
        checkpoints: &[u64],
        seed: u64,
    ) -> Result<Self, FieldError> {
        let config = SimulationConfig {
            side: REFERENCE_SIDE,
            speed: 0.5,
            periods,
            economy,
        };
        Ok(Self {
            name,
            initial: uniform_random_field(REFERENCE_SIDE as usize, seed)?,
            config,
            checkpoints: checkpoints.iter().copied().map(Period).collect(),
        })
    }

    /// Run this profile to completion.
    pub fn run(&self) -> Result<Trajectory, Halted> {
        run(self.config.clone(), self.initial.clone(), &self.checkpoints)
    }
}

/// Exchange economy, 250 periods, snapshots at 0, 10, 100 and 249.
pub fn exchange_profile(seed: u64) -> Result<Profile, FieldError> {
    Profile::build(
        "exchange",
        250,
        Economy::exchange(1.0, 1.0),
        &[0, 10, 100, 249],
        seed,
    )
}

/// Constant returns at price ratio 0.5, 22 periods, snapshots at 1, 5, 10
/// and 19.
pub fn constant_returns_profile(seed: u64) -> Result<Profile, FieldError> {
    Profile::build(
        "constant_returns",
        22,
        Economy::constant_returns(0.5),
        &[1, 5, 10, 19],
        seed,
    )
}

/// Decreasing returns, 250 periods, snapshots at 1, 10, 100 and 249.
pub fn decreasing_returns_profile(seed: u64) -> Result<Profile, FieldError> {
    Profile::build(
        "decreasing_returns",
        250,
        Economy::decreasing_returns(),
        &[1, 10, 100, 249],
        seed,
    )
}

/// All three reference profiles, in the order above.
pub fn all_profiles(seed: u64) -> Result<Vec<Profile>, FieldError> {
    Ok(vec![
        exchange_profile(seed)?,
        constant_returns_profile(seed)?,
        decreasing_returns_profile(seed)?,
    ])
}
