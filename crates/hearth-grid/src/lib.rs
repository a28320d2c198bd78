//! Grid storage and domain decomposition for the Hearth engine.
//!
//! The crate owns the three value types every other component operates on:
//!
//! - [`Field`]: a ghost-padded, row-major 2D buffer of `f64` temperatures
//!   (or diffusivities) with bounds-checked accessors in debug builds.
//! - [`WorkerTopology`] / [`SubdomainDescriptor`]: the cartesian
//!   factorization of the worker count and each worker's slice of the
//!   global grid, computed once at startup and never mutated.
//! - [`DomainState`]: a worker's double-buffered temperature fields plus
//!   its immutable diffusivity field, analytically initialized.

pub mod domain;
pub mod field;
pub mod subdomain;
pub mod topology;

pub use domain::{initial_diffusivity, initial_temperature, DomainState};
pub use field::Field;
pub use subdomain::{Neighbours, SubdomainDescriptor};
pub use topology::WorkerTopology;
