//! Top-level run failure type.

use std::error::Error;
use std::fmt;

use hearth_core::ConfigError;
use hearth_snapshot::SnapshotError;
use hearth_solver::ExchangeError;

/// Anything that can abort a simulation run. All variants are fatal; the
/// runner tears the worker pool down on the first one.
#[derive(Debug)]
pub enum RunError {
    /// The configuration was rejected before any worker started.
    Config(ConfigError),
    /// A halo exchange between workers broke down.
    Exchange(ExchangeError),
    /// A snapshot file could not be written.
    Snapshot(SnapshotError),
    /// A worker thread panicked.
    WorkerPanicked {
        /// Rank of the worker that died.
        rank: usize,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Exchange(e) => write!(f, "halo exchange failed: {e}"),
            Self::Snapshot(e) => write!(f, "snapshot failed: {e}"),
            Self::WorkerPanicked { rank } => write!(f, "worker {rank} panicked"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Exchange(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::WorkerPanicked { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ExchangeError> for RunError {
    fn from(e: ExchangeError) -> Self {
        Self::Exchange(e)
    }
}

impl From<SnapshotError> for RunError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_covers_every_variant() {
        let config: RunError = ConfigError::ZeroWorkers.into();
        assert!(config.to_string().contains("invalid configuration"));

        let exchange: RunError = ExchangeError::NeighbourGone.into();
        assert!(exchange.to_string().contains("halo exchange"));

        let panicked = RunError::WorkerPanicked { rank: 3 };
        assert_eq!(panicked.to_string(), "worker 3 panicked");
    }

    #[test]
    fn wrapped_variants_expose_their_source() {
        let err: RunError = ExchangeError::NeighbourGone.into();
        assert!(Error::source(&err).is_some());
        assert!(Error::source(&RunError::WorkerPanicked { rank: 0 }).is_none());
    }
}
