//! The per-worker iteration loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam_channel::Sender;
use hearth_grid::DomainState;
use hearth_solver::{apply_boundary, step, HaloExchange};

use crate::error::RunError;
use crate::metrics::{micros_since, RunMetrics};

/// One worker's contribution to a snapshot: its interior tile, row-major.
#[derive(Debug)]
pub struct SnapshotPart {
    /// Snapshot index, `iteration / snapshot_frequency`.
    pub index: u64,
    /// Rank of the worker that produced the tile.
    pub rank: usize,
    /// The tile's interior cells.
    pub values: Vec<f64>,
}

/// Runs the iteration loop for one worker's tile.
///
/// Each iteration mirrors the boundary, exchanges halos, runs the stencil
/// into the back buffer, ships a snapshot tile when the iteration is due
/// one, and swaps the buffers. Snapshots capture the field *before* the
/// swap, so snapshot 0 of any run holds the initial condition.
#[derive(Debug)]
pub struct WorkerDriver<E> {
    state: DomainState,
    exchange: E,
    dt: f64,
}

impl<E: HaloExchange> WorkerDriver<E> {
    /// Wrap a tile's state with its halo exchanger and time step.
    pub fn new(state: DomainState, exchange: E, dt: f64) -> Self {
        Self {
            state,
            exchange,
            dt,
        }
    }

    /// Drive iterations `0..=max_iteration`, shipping due snapshot tiles
    /// through `gather`.
    ///
    /// The loop bound is inclusive, so a run of `max_iteration = 0`
    /// performs exactly one update and snapshots the initial field first.
    /// A raised `shutdown` flag stops the loop between iterations; the
    /// metrics then report how far the worker got. Neighbours notice the
    /// flag at different times, so once it is raised an exchange failure
    /// also counts as a clean stop rather than an error.
    pub fn run(
        mut self,
        max_iteration: u64,
        snapshot_frequency: u64,
        shutdown: &AtomicBool,
        gather: &Sender<SnapshotPart>,
    ) -> Result<RunMetrics, RunError> {
        let mut metrics = RunMetrics::default();
        let rank = self.state.subdomain.rank;
        for iteration in 0..=max_iteration {
            if shutdown.load(Ordering::Acquire) {
                break;
            }

            let t = Instant::now();
            apply_boundary(&mut self.state.current, &self.state.subdomain.neighbours);
            metrics.boundary_us += micros_since(t);

            let t = Instant::now();
            if let Err(e) = self.exchange.exchange(&mut self.state.current) {
                // A neighbour that stopped for shutdown drops its links
                // while this worker may still be blocked receiving. With
                // the flag raised that is a clean stop, not a failure.
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
                return Err(e.into());
            }
            metrics.exchange_us += micros_since(t);

            let t = Instant::now();
            step(
                &self.state.current,
                &self.state.diffusivity,
                &mut self.state.next,
                self.dt,
            );
            metrics.stencil_us += micros_since(t);

            if iteration % snapshot_frequency == 0 {
                let t = Instant::now();
                let part = SnapshotPart {
                    index: iteration / snapshot_frequency,
                    rank,
                    values: self.state.current.interior(),
                };
                if gather.send(part).is_err() {
                    // The collector hung up, which only happens when the
                    // run is already failing on its side. Stop quietly and
                    // let it report the cause.
                    break;
                }
                metrics.snapshot_us += micros_since(t);
            }

            self.state.swap();
            metrics.iterations_run += 1;
        }
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use hearth_grid::{initial_temperature, Field, SubdomainDescriptor, WorkerTopology};
    use hearth_solver::{ExchangeError, HaloExchange, NoopExchange};

    fn single_tile(rows: usize, cols: usize) -> DomainState {
        let t = WorkerTopology::for_workers(1).unwrap();
        let d = SubdomainDescriptor::split(rows, cols, &t, 0).unwrap();
        DomainState::new(d, cols).unwrap()
    }

    fn collect_parts(
        max_iteration: u64,
        snapshot_frequency: u64,
    ) -> (RunMetrics, Vec<SnapshotPart>) {
        let driver = WorkerDriver::new(single_tile(4, 4), NoopExchange, 0.1);
        let (tx, rx) = crossbeam_channel::unbounded();
        let shutdown = AtomicBool::new(false);
        let metrics = driver
            .run(max_iteration, snapshot_frequency, &shutdown, &tx)
            .unwrap();
        drop(tx);
        (metrics, rx.iter().collect())
    }

    #[test]
    fn zero_max_iteration_still_runs_once() {
        let (metrics, parts) = collect_parts(0, 1);
        assert_eq!(metrics.iterations_run, 1);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].index, 0);
    }

    #[test]
    fn first_snapshot_holds_the_initial_condition() {
        let (_, parts) = collect_parts(0, 1);
        let values = &parts[0].values;
        assert_eq!(values.len(), 16);
        for y in 1..=4usize {
            for x in 1..=4usize {
                assert_approx_eq!(
                    f64,
                    values[(y - 1) * 4 + (x - 1)],
                    initial_temperature(x, y)
                );
            }
        }
    }

    #[test]
    fn snapshot_indices_follow_the_frequency() {
        let (metrics, parts) = collect_parts(4, 2);
        assert_eq!(metrics.iterations_run, 5);
        let indices: Vec<u64> = parts.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn raised_shutdown_stops_before_the_first_iteration() {
        let driver = WorkerDriver::new(single_tile(4, 4), NoopExchange, 0.1);
        let (tx, rx) = crossbeam_channel::unbounded();
        let shutdown = AtomicBool::new(true);
        let metrics = driver.run(100, 1, &shutdown, &tx).unwrap();
        drop(tx);
        assert_eq!(metrics.iterations_run, 0);
        assert_eq!(rx.iter().count(), 0);
    }

    /// Neighbour that raises the shutdown flag and hangs up, the way a
    /// worker observing cancellation first looks to the ones still blocked
    /// in their receive.
    struct StoppingNeighbour<'a> {
        shutdown: &'a AtomicBool,
    }

    impl HaloExchange for StoppingNeighbour<'_> {
        fn exchange(&mut self, _field: &mut Field) -> Result<(), ExchangeError> {
            self.shutdown.store(true, Ordering::Release);
            Err(ExchangeError::NeighbourGone)
        }
    }

    #[test]
    fn exchange_failure_after_shutdown_is_a_clean_stop() {
        let shutdown = AtomicBool::new(false);
        let driver = WorkerDriver::new(
            single_tile(4, 4),
            StoppingNeighbour {
                shutdown: &shutdown,
            },
            0.1,
        );
        let (tx, _rx) = crossbeam_channel::unbounded();
        let metrics = driver.run(100, 1, &shutdown, &tx).unwrap();
        assert_eq!(metrics.iterations_run, 0);
    }

    struct BrokenExchange;

    impl HaloExchange for BrokenExchange {
        fn exchange(&mut self, _field: &mut Field) -> Result<(), ExchangeError> {
            Err(ExchangeError::NeighbourGone)
        }
    }

    #[test]
    fn exchange_failure_without_shutdown_is_fatal() {
        let driver = WorkerDriver::new(single_tile(4, 4), BrokenExchange, 0.1);
        let (tx, _rx) = crossbeam_channel::unbounded();
        let shutdown = AtomicBool::new(false);
        let err = driver.run(100, 1, &shutdown, &tx).unwrap_err();
        assert!(matches!(
            err,
            crate::RunError::Exchange(ExchangeError::NeighbourGone)
        ));
    }

    #[test]
    fn dropped_collector_ends_the_run_without_an_error() {
        let driver = WorkerDriver::new(single_tile(4, 4), NoopExchange, 0.1);
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let shutdown = AtomicBool::new(false);
        let metrics = driver.run(100, 1, &shutdown, &tx).unwrap();
        assert_eq!(metrics.iterations_run, 0);
    }
}
