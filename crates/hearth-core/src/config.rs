//! Global simulation configuration.
//!
//! [`SimulationConfig`] is built once (by the CLI or a test harness),
//! validated, and then cloned identically to every worker. It is never
//! mutated after validation.

use crate::error::ConfigError;

/// Default explicit-Euler time step.
pub const DEFAULT_DT: f64 = 0.1;

/// Global parameters of a heat-diffusion run.
///
/// `rows` and `cols` are the *global* interior extents (ghost cells are a
/// storage detail of each subdomain). Divisibility against the worker
/// topology is checked at decomposition time, not here, because the
/// topology's per-axis parts are derived from `workers`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Global interior row count (M).
    pub rows: usize,
    /// Global interior column count (N).
    pub cols: usize,
    /// Last iteration index. The loop bound is inclusive, so the run
    /// executes `max_iteration + 1` steps.
    pub max_iteration: u64,
    /// A snapshot is emitted whenever `iteration % snapshot_frequency == 0`.
    pub snapshot_frequency: u64,
    /// Explicit-Euler time step.
    pub dt: f64,
    /// Number of workers the domain is decomposed across.
    pub workers: usize,
}

impl SimulationConfig {
    /// Configuration with the default time step and a single worker.
    pub fn new(rows: usize, cols: usize, max_iteration: u64, snapshot_frequency: u64) -> Self {
        Self {
            rows,
            cols,
            max_iteration,
            snapshot_frequency,
            dt: DEFAULT_DT,
            workers: 1,
        }
    }

    /// Check all invariants that do not depend on the derived topology.
    ///
    /// Divisibility of `rows`/`cols` by the topology's per-axis parts is
    /// validated by the domain decomposition; the stability bound
    /// `K·dt <= 0.25` is validated by the driver once the diffusivity
    /// field exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroDimension { axis: "rows" });
        }
        if self.cols == 0 {
            return Err(ConfigError::ZeroDimension { axis: "cols" });
        }
        if self.snapshot_frequency == 0 {
            return Err(ConfigError::ZeroSnapshotFrequency);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { dt: self.dt });
        }
        Ok(())
    }

    /// Total number of interior cells in the global grid.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SimulationConfig {
        SimulationConfig::new(64, 64, 100, 10)
    }

    #[test]
    fn validate_valid_config_succeeds() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_zero_rows_fails() {
        let mut cfg = valid();
        cfg.rows = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroDimension { axis: "rows" })
        );
    }

    #[test]
    fn validate_zero_cols_fails() {
        let mut cfg = valid();
        cfg.cols = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroDimension { axis: "cols" })
        );
    }

    #[test]
    fn validate_zero_snapshot_frequency_fails() {
        let mut cfg = valid();
        cfg.snapshot_frequency = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSnapshotFrequency));
    }

    #[test]
    fn validate_zero_workers_fails() {
        let mut cfg = valid();
        cfg.workers = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn validate_nan_dt_fails() {
        let mut cfg = valid();
        cfg.dt = f64::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidDt { .. })));
    }

    #[test]
    fn validate_negative_dt_fails() {
        let mut cfg = valid();
        cfg.dt = -0.1;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidDt { .. })));
    }

    #[test]
    fn default_dt_is_a_tenth() {
        assert_eq!(valid().dt, 0.1);
    }

    #[test]
    fn cell_count_is_product() {
        let cfg = SimulationConfig::new(8, 12, 0, 1);
        assert_eq!(cfg.cell_count(), 96);
    }
}
