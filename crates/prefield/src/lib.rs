//! Prefield: a lattice simulation of locally interdependent preferences.
//!
//! Agents on an `N × N` grid each hold a preference intensity in `[0, 1]`.
//! Every period they move toward whatever their eight Moore neighbours find
//! attractive at the current price ratio, and the economy then reprices the
//! goods from the new aggregate field.
//!
//! This is the facade crate that re-exports the public API from all
//! prefield sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use prefield::prelude::*;
//!
//! let config = SimulationConfig {
//!     side: 20,
//!     speed: 0.5,
//!     periods: 50,
//!     economy: Economy::decreasing_returns(),
//! };
//! let initial = uniform_random_field(20, 121).unwrap();
//! let trajectory = run(config, initial, &[Period(0), Period(49)]).unwrap();
//!
//! assert_eq!(trajectory.series.len(), 50);
//! assert_eq!(trajectory.snapshots.len(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `prefield-core` | `Field`, `Period`, field errors |
//! | [`space`] | `prefield-space` | `Square8` lattice and neighbour aggregation |
//! | [`economy`] | `prefield-economy` | Price-ratio regimes and the update rule |
//! | [`engine`] | `prefield-engine` | Configuration, driver, recorded outputs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`prefield-core`).
pub use prefield_core as types;

/// The Moore-neighbourhood lattice (`prefield-space`).
///
/// [`space::aggregate`] is the neighbour-sum operator the update rule is
/// built on.
pub use prefield_space as space;

/// Economies and the preference update (`prefield-economy`).
pub use prefield_economy as economy;

/// The simulation driver (`prefield-engine`).
///
/// [`engine::Simulation`] for period-by-period control, [`engine::run`] for
/// a whole run in one call.
pub use prefield_engine as engine;

/// Common imports for typical use.
///
/// ```rust
/// use prefield::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use prefield_core::{DegenerateField, Field, Period};

    // Economy
    pub use prefield_economy::Economy;

    // Engine
    pub use prefield_engine::{
        run, uniform_field, uniform_random_field, DriverState, Halted, SimError, Simulation,
        SimulationConfig, Stage, Trajectory,
    };
}
