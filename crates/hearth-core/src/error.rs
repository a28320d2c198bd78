//! Setup-time error taxonomy.
//!
//! Every variant here is fatal: a configuration that fails validation never
//! reaches iteration 0, and an inconsistent grid state is never resumed.

use std::error::Error;
use std::fmt;

/// Errors detected while validating a [`SimulationConfig`](crate::SimulationConfig)
/// or decomposing the domain across workers.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid dimension is zero.
    ZeroDimension {
        /// Which axis was zero ("rows" or "cols").
        axis: &'static str,
    },
    /// Snapshot frequency is zero (would divide by zero at cadence checks).
    ZeroSnapshotFrequency,
    /// Worker count is zero.
    ZeroWorkers,
    /// A global extent is not evenly divisible by the worker topology.
    NotDivisible {
        /// Which axis failed ("rows" or "cols").
        axis: &'static str,
        /// The global extent along that axis.
        extent: usize,
        /// The number of topology parts along that axis.
        parts: usize,
    },
    /// The padded buffer size `(rows+2)*(cols+2)` overflows `usize`.
    GridTooLarge {
        /// Requested interior rows.
        rows: usize,
        /// Requested interior cols.
        cols: usize,
    },
    /// The time step is not finite and positive.
    InvalidDt {
        /// The offending value.
        dt: f64,
    },
    /// The time step violates the explicit-stencil stability bound
    /// `K·dt <= 0.25` for the maximum diffusivity in the domain.
    DtTooLarge {
        /// The configured time step.
        dt: f64,
        /// The largest stable time step for this domain.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { axis } => write!(f, "grid {axis} must be positive"),
            Self::ZeroSnapshotFrequency => write!(f, "snapshot frequency must be positive"),
            Self::ZeroWorkers => write!(f, "worker count must be positive"),
            Self::NotDivisible {
                axis,
                extent,
                parts,
            } => write!(
                f,
                "global {axis} extent {extent} is not evenly divisible by {parts} topology parts"
            ),
            Self::GridTooLarge { rows, cols } => write!(
                f,
                "padded grid ({rows}+2)x({cols}+2) overflows addressable memory"
            ),
            Self::InvalidDt { dt } => write!(f, "dt must be finite and positive, got {dt}"),
            Self::DtTooLarge { dt, max } => write!(
                f,
                "dt {dt} exceeds the stable bound {max} for this diffusivity field"
            ),
        }
    }
}

impl Error for ConfigError {}
