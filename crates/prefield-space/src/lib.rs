//! Spatial structure for prefield simulations.
//!
//! Agents sit on a square lattice and interact with their Moore neighbours
//! (the up-to-8 cells sharing an edge or a corner). The boundary absorbs:
//! cells outside the grid contribute nothing, so edge cells see 5
//! neighbours and corner cells see 3.
//!
//! [`Square8`] describes the topology; [`aggregate`] is the neighbour-sum
//! operator every period of the update is built on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod square8;

pub use error::SpaceError;
pub use square8::{aggregate, Square8};
