//! Orchestration of a full multi-worker run.
//!
//! The runner validates the configuration, decomposes the grid, wires the
//! halo links between neighbouring tiles, and spawns one scoped thread per
//! worker. The calling thread doubles as the snapshot collector: it gathers
//! one tile per worker per due snapshot, reassembles the global field, and
//! writes the numbered snapshot file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::{Duration, Instant};

use hearth_core::{ConfigError, SimulationConfig};
use hearth_grid::{DomainState, SubdomainDescriptor, WorkerTopology};
use hearth_snapshot::SnapshotWriter;
use hearth_solver::{max_stable_dt, ChannelExchange, HaloLink};

use crate::driver::WorkerDriver;
use crate::error::RunError;
use crate::metrics::RunMetrics;

/// Outcome of a completed (or cancelled) run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Wall time of the whole run.
    pub elapsed: Duration,
    /// Iterations completed; short of the requested count only when the
    /// shutdown flag was raised.
    pub iterations_run: u64,
    /// Snapshot files written.
    pub snapshots_written: u64,
    /// Phase timings merged across workers.
    pub metrics: RunMetrics,
}

/// Completion percentage of `iteration` out of `max_iteration`.
///
/// A run with `max_iteration == 0` still performs its single iteration, so
/// it reports 100 rather than dividing by zero.
pub fn percent_complete(iteration: u64, max_iteration: u64) -> f64 {
    if max_iteration == 0 {
        return 100.0;
    }
    iteration as f64 / max_iteration as f64 * 100.0
}

/// Execute `config` writing snapshots into `output_dir`.
///
/// `on_progress` fires once per snapshot written, with the iteration the
/// snapshot belongs to and the configured maximum. Raising `shutdown` stops
/// every worker between iterations; a cancelled run still returns `Ok` with
/// the iterations it managed.
pub fn run<F>(
    config: &SimulationConfig,
    output_dir: &Path,
    shutdown: &AtomicBool,
    mut on_progress: F,
) -> Result<RunReport, RunError>
where
    F: FnMut(u64, u64),
{
    config.validate()?;
    let topology = WorkerTopology::for_workers(config.workers)?;
    let tiles = SubdomainDescriptor::split_all(config.rows, config.cols, &topology)?;

    let mut states = Vec::with_capacity(tiles.len());
    for tile in &tiles {
        states.push(DomainState::new(*tile, config.cols)?);
    }

    // The stability bound depends on the stiffest cell anywhere in the grid.
    let k_max = states
        .iter()
        .map(DomainState::max_diffusivity)
        .fold(0.0f64, f64::max);
    let dt_max = max_stable_dt(k_max);
    if config.dt > dt_max {
        return Err(ConfigError::DtTooLarge {
            dt: config.dt,
            max: dt_max,
        }
        .into());
    }

    let writer = SnapshotWriter::create(output_dir)?;
    let mut exchanges: Vec<ChannelExchange> =
        (0..tiles.len()).map(|_| ChannelExchange::default()).collect();
    for tile in &tiles {
        if let Some(below) = tile.neighbours.down {
            let (upper_end, lower_end) = HaloLink::pair();
            exchanges[tile.rank].down = Some(upper_end);
            exchanges[below].up = Some(lower_end);
        }
        if let Some(beside) = tile.neighbours.right {
            let (left_end, right_end) = HaloLink::pair();
            exchanges[tile.rank].right = Some(left_end);
            exchanges[beside].left = Some(right_end);
        }
    }

    let started = Instant::now();
    let (gather_tx, gather_rx) = crossbeam_channel::unbounded();
    let mut merged = RunMetrics::default();
    let mut snapshots_written = 0u64;

    let outcome: Result<(), RunError> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(states.len());
        for (state, exchange) in states.into_iter().zip(exchanges) {
            let tx = gather_tx.clone();
            handles.push(scope.spawn(move || {
                WorkerDriver::new(state, exchange, config.dt).run(
                    config.max_iteration,
                    config.snapshot_frequency,
                    shutdown,
                    &tx,
                )
            }));
        }
        // The collector's own sender must go, otherwise the gather loop
        // never sees the channel disconnect.
        drop(gather_tx);

        let cells = config.rows * config.cols;
        let mut pending: HashMap<u64, (Vec<f64>, usize)> = HashMap::new();
        let mut io_error: Option<RunError> = None;
        for part in gather_rx.iter() {
            let tile = &tiles[part.rank];
            let entry = pending
                .entry(part.index)
                .or_insert_with(|| (vec![0.0; cells], 0));
            for local_y in 0..tile.local_rows {
                let dst = (tile.offset_y + local_y) * config.cols + tile.offset_x;
                let src = local_y * tile.local_cols;
                entry.0[dst..dst + tile.local_cols]
                    .copy_from_slice(&part.values[src..src + tile.local_cols]);
            }
            entry.1 += 1;
            if entry.1 == tiles.len() {
                if let Some((global, _)) = pending.remove(&part.index) {
                    match writer.write(part.index, &global) {
                        Ok(_) => {
                            snapshots_written += 1;
                            on_progress(
                                part.index * config.snapshot_frequency,
                                config.max_iteration,
                            );
                        }
                        Err(e) => {
                            io_error = Some(e.into());
                            break;
                        }
                    }
                }
            }
        }
        // On an early break the receiver is dropped here, failing every
        // worker's next snapshot send so the pool drains on its own.
        drop(gather_rx);

        let mut worker_error: Option<RunError> = None;
        for (rank, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(metrics)) => merged.merge(&metrics),
                Ok(Err(e)) => {
                    worker_error.get_or_insert(e);
                }
                Err(_) => {
                    worker_error.get_or_insert(RunError::WorkerPanicked { rank });
                }
            }
        }
        // A failed snapshot write tears the channels down and makes the
        // workers fail after it, so the I/O error is the root cause.
        if let Some(e) = io_error {
            return Err(e);
        }
        if let Some(e) = worker_error {
            return Err(e);
        }
        Ok(())
    });
    outcome?;

    Ok(RunReport {
        elapsed: started.elapsed(),
        iterations_run: merged.iterations_run,
        snapshots_written,
        metrics: merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn percent_handles_the_degenerate_run() {
        assert_approx_eq!(f64, percent_complete(0, 0), 100.0);
    }

    #[test]
    fn percent_scales_linearly() {
        assert_approx_eq!(f64, percent_complete(0, 8), 0.0);
        assert_approx_eq!(f64, percent_complete(2, 8), 25.0);
        assert_approx_eq!(f64, percent_complete(8, 8), 100.0);
    }
}
