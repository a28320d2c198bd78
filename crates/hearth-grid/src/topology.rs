//! Cartesian worker topology.
//!
//! A [`WorkerTopology`] is a 2D factorization of the worker count: `dims[0]`
//! parts along the row axis, `dims[1]` along the column axis. Ranks map to
//! coordinates row-major. The topology is non-periodic: a worker on the
//! global edge simply has no neighbour in that direction.

use hearth_core::ConfigError;

use crate::subdomain::Neighbours;

/// A balanced 2D factorization of the worker count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerTopology {
    dims: [usize; 2],
}

impl WorkerTopology {
    /// Factor `workers` into the divisor pair closest to a square, larger
    /// factor on the row axis (the `MPI_Dims_create` convention).
    pub fn for_workers(workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        // Largest divisor <= sqrt(workers); the pair (workers / d, d) is
        // then the most balanced factorization.
        let mut small = 1;
        let mut d = 1;
        while d * d <= workers {
            if workers % d == 0 {
                small = d;
            }
            d += 1;
        }
        Ok(Self {
            dims: [workers / small, small],
        })
    }

    /// An explicit factorization, e.g. `[2, 1]` for a split along rows.
    pub fn explicit(row_parts: usize, col_parts: usize) -> Result<Self, ConfigError> {
        if row_parts == 0 || col_parts == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(Self {
            dims: [row_parts, col_parts],
        })
    }

    /// Number of parts along the row axis.
    pub fn row_parts(&self) -> usize {
        self.dims[0]
    }

    /// Number of parts along the column axis.
    pub fn col_parts(&self) -> usize {
        self.dims[1]
    }

    /// Total worker count.
    pub fn workers(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    /// Row-major coordinate of `rank`: `(row_coord, col_coord)`.
    pub fn coords_of(&self, rank: usize) -> (usize, usize) {
        debug_assert!(rank < self.workers(), "rank {rank} out of topology");
        (rank / self.dims[1], rank % self.dims[1])
    }

    /// Rank at coordinate `(row_coord, col_coord)`.
    pub fn rank_of(&self, row_coord: usize, col_coord: usize) -> usize {
        debug_assert!(row_coord < self.dims[0] && col_coord < self.dims[1]);
        row_coord * self.dims[1] + col_coord
    }

    /// Neighbour ranks of `rank` in the four cardinal directions.
    /// `None` where the subdomain touches the global edge.
    pub fn neighbours_of(&self, rank: usize) -> Neighbours {
        let (row, col) = self.coords_of(rank);
        Neighbours {
            up: (row > 0).then(|| self.rank_of(row - 1, col)),
            down: (row + 1 < self.dims[0]).then(|| self.rank_of(row + 1, col)),
            left: (col > 0).then(|| self.rank_of(row, col - 1)),
            right: (col + 1 < self.dims[1]).then(|| self.rank_of(row, col + 1)),
        }
    }
}
