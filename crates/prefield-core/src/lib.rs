//! Core types for the prefield simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! preference [`Field`] value type, the [`Period`] identifier, and the error
//! kinds shared by the lattice, economy and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;

pub use error::{DegenerateField, FieldError};
pub use field::Field;
pub use id::Period;
