//! Hearth: a parallel explicit heat-diffusion simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Hearth sub-crates. For most users, adding `hearth` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::atomic::AtomicBool;
//! use hearth::prelude::*;
//!
//! // An 8x8 grid, 100 iterations, a snapshot every 25 iterations,
//! // decomposed across two workers.
//! let mut config = SimulationConfig::new(8, 8, 100, 25);
//! config.workers = 2;
//!
//! let dir = std::env::temp_dir().join(format!("hearth-doc-{}", std::process::id()));
//! let shutdown = AtomicBool::new(false);
//! let report = hearth::engine::run(&config, &dir, &shutdown, |_, _| {}).unwrap();
//! assert_eq!(report.iterations_run, 101);
//! assert_eq!(report.snapshots_written, 5);
//! # std::fs::remove_dir_all(&dir).ok();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`config`] | `hearth-core` | Simulation configuration and its errors |
//! | [`grid`] | `hearth-grid` | Padded fields, topology, domain decomposition |
//! | [`solver`] | `hearth-solver` | Stencil kernel, boundaries, halo exchange |
//! | [`snapshot`] | `hearth-snapshot` | Binary snapshot reading and writing |
//! | [`engine`] | `hearth-engine` | Iteration driver and multi-worker runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Simulation configuration and validation (`hearth-core`).
pub use hearth_core as config;

/// Padded field storage, worker topology, and domain decomposition
/// (`hearth-grid`).
///
/// [`grid::Field`] is the ghost-bordered storage every other crate works
/// on; [`grid::DomainState`] bundles the double-buffered temperature and
/// the diffusivity map of one worker's tile.
pub use hearth_grid as grid;

/// Binary snapshot files (`hearth-snapshot`).
///
/// Snapshots are headerless little-endian `f64` dumps of the global
/// interior, one file per due iteration.
pub use hearth_snapshot as snapshot;

/// Stencil kernel, boundary mirroring, and halo exchange (`hearth-solver`).
///
/// The [`solver::HaloExchange`] trait is the seam between single-worker
/// and decomposed runs.
pub use hearth_solver as solver;

/// Iteration driver and multi-worker runner (`hearth-engine`).
///
/// [`engine::run`] executes a whole configured simulation;
/// [`engine::WorkerDriver`] is the per-tile loop for finer-grained
/// embedding.
pub use hearth_engine as engine;

/// Common imports for typical Hearth usage.
///
/// ```rust
/// use hearth::prelude::*;
/// ```
pub mod prelude {
    pub use hearth_core::{ConfigError, SimulationConfig, DEFAULT_DT};
    pub use hearth_engine::{percent_complete, RunError, RunMetrics, RunReport};
    pub use hearth_grid::{DomainState, Field, SubdomainDescriptor, WorkerTopology};
    pub use hearth_snapshot::{read_snapshot, SnapshotWriter};
    pub use hearth_solver::{max_stable_dt, HaloExchange};
}
