//! Subdomain descriptors for domain decomposition.
//!
//! The global `rows x cols` interior is cut into equal tiles, one per worker,
//! along the axes of a [`WorkerTopology`]. Each tile carries its extent, its
//! offset into the global grid, and the ranks of its cardinal neighbours.

use hearth_core::ConfigError;

use crate::topology::WorkerTopology;

/// Neighbour ranks of a subdomain in the four cardinal directions.
///
/// `None` means the subdomain touches the global edge on that side and the
/// boundary condition applies there instead of halo exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbours {
    /// Rank above (lower row coordinate).
    pub up: Option<usize>,
    /// Rank below (higher row coordinate).
    pub down: Option<usize>,
    /// Rank to the left (lower column coordinate).
    pub left: Option<usize>,
    /// Rank to the right (higher column coordinate).
    pub right: Option<usize>,
}

/// One worker's tile of the global grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubdomainDescriptor {
    /// Rank of the worker owning this tile.
    pub rank: usize,
    /// Interior rows of the tile.
    pub local_rows: usize,
    /// Interior columns of the tile.
    pub local_cols: usize,
    /// Column offset of the tile's first interior column in the global grid.
    pub offset_x: usize,
    /// Row offset of the tile's first interior row in the global grid.
    pub offset_y: usize,
    /// Cardinal neighbour ranks.
    pub neighbours: Neighbours,
}

impl SubdomainDescriptor {
    /// Split a `rows x cols` grid across `topology`, returning the tile for
    /// `rank`. Fails unless both axes divide evenly.
    pub fn split(
        rows: usize,
        cols: usize,
        topology: &WorkerTopology,
        rank: usize,
    ) -> Result<Self, ConfigError> {
        if rows % topology.row_parts() != 0 {
            return Err(ConfigError::NotDivisible {
                axis: "rows",
                extent: rows,
                parts: topology.row_parts(),
            });
        }
        if cols % topology.col_parts() != 0 {
            return Err(ConfigError::NotDivisible {
                axis: "cols",
                extent: cols,
                parts: topology.col_parts(),
            });
        }
        let local_rows = rows / topology.row_parts();
        let local_cols = cols / topology.col_parts();
        let (row_coord, col_coord) = topology.coords_of(rank);
        Ok(Self {
            rank,
            local_rows,
            local_cols,
            offset_x: col_coord * local_cols,
            offset_y: row_coord * local_rows,
            neighbours: topology.neighbours_of(rank),
        })
    }

    /// All tiles of the decomposition, ordered by rank.
    pub fn split_all(
        rows: usize,
        cols: usize,
        topology: &WorkerTopology,
    ) -> Result<Vec<Self>, ConfigError> {
        (0..topology.workers())
            .map(|rank| Self::split(rows, cols, topology, rank))
            .collect()
    }

    /// Interior cell count of the tile.
    pub fn cell_count(&self) -> usize {
        self.local_rows * self.local_cols
    }
}
