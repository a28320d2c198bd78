//! Ghost-padded 2D field storage.
//!
//! A [`Field`] stores a `(rows+2) × (cols+2)` row-major buffer: `rows × cols`
//! interior cells surrounded by a one-cell ghost border. Interior cells use
//! 1-based coordinates `(x, y)` with `1 <= x <= cols`, `1 <= y <= rows`;
//! index 0 and `extent + 1` address the ghost border. Ghost cells are only
//! ever written by the boundary applicator or the halo exchanger, never by
//! the stencil.

use hearth_core::ConfigError;

/// A row-major `f64` grid with a one-cell ghost border.
///
/// The backing store is a single contiguous `Vec<f64>`, which keeps the
/// layout cache-friendly and directly compatible with the row-major binary
/// snapshot format.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field {
    /// Allocate a zero-filled field with `rows × cols` interior cells.
    ///
    /// Returns `Err(ConfigError::GridTooLarge)` if the padded size
    /// overflows `usize`, and `Err(ConfigError::ZeroDimension)` for an
    /// empty interior.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::ZeroDimension { axis: "rows" });
        }
        if cols == 0 {
            return Err(ConfigError::ZeroDimension { axis: "cols" });
        }
        let padded = rows
            .checked_add(2)
            .and_then(|r| cols.checked_add(2).and_then(|c| r.checked_mul(c)))
            .ok_or(ConfigError::GridTooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; padded],
        })
    }

    /// Interior row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Interior column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Width of a padded row, `cols + 2`.
    pub fn padded_cols(&self) -> usize {
        self.cols + 2
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x <= self.cols + 1, "x {x} out of padded range");
        debug_assert!(y <= self.rows + 1, "y {y} out of padded range");
        y * (self.cols + 2) + x
    }

    /// Read the cell at padded coordinate `(x, y)`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }

    /// Write the cell at padded coordinate `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.idx(x, y);
        self.data[i] = value;
    }

    /// The interior slice of padded row `y` (`x` from 1 to `cols`).
    pub fn interior_row(&self, y: usize) -> &[f64] {
        debug_assert!((1..=self.rows).contains(&y), "row {y} is not interior");
        let start = self.idx(1, y);
        &self.data[start..start + self.cols]
    }

    /// Copy the interior of padded column `x` (`y` from 1 to `rows`).
    ///
    /// Columns are strided in the row-major store, so this packs into an
    /// owned buffer, the shape halo messages travel in anyway.
    pub fn pack_col(&self, x: usize) -> Vec<f64> {
        debug_assert!(x <= self.cols + 1, "x {x} out of padded range");
        (1..=self.rows).map(|y| self.at(x, y)).collect()
    }

    /// Copy the interior of padded row `y` into an owned buffer.
    pub fn pack_row(&self, y: usize) -> Vec<f64> {
        self.interior_row(y).to_vec()
    }

    /// Overwrite ghost row `y` (0 or `rows + 1`) from `values`
    /// (`values.len() == cols`, written at `x` 1..=cols).
    pub fn write_ghost_row(&mut self, y: usize, values: &[f64]) {
        debug_assert!(y == 0 || y == self.rows + 1, "row {y} is not a ghost row");
        debug_assert_eq!(values.len(), self.cols);
        let start = self.idx(1, y);
        self.data[start..start + self.cols].copy_from_slice(values);
    }

    /// Overwrite ghost column `x` (0 or `cols + 1`) from `values`
    /// (`values.len() == rows`, written at `y` 1..=rows).
    pub fn write_ghost_col(&mut self, x: usize, values: &[f64]) {
        debug_assert!(x == 0 || x == self.cols + 1, "col {x} is not a ghost col");
        debug_assert_eq!(values.len(), self.rows);
        for (y, v) in (1..=self.rows).zip(values) {
            self.set(x, y, *v);
        }
    }

    /// Copy the full interior, row-major, ghost cells excluded.
    ///
    /// This is the exact payload shape of a snapshot block.
    pub fn interior(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for y in 1..=self.rows {
            out.extend_from_slice(self.interior_row(y));
        }
        out
    }

    /// Maximum value over interior cells.
    pub fn interior_max(&self) -> f64 {
        (1..=self.rows)
            .flat_map(|y| self.interior_row(y))
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Minimum value over interior cells.
    pub fn interior_min(&self) -> f64 {
        (1..=self.rows)
            .flat_map(|y| self.interior_row(y))
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// The whole padded buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The whole padded buffer, mutable. Used by the parallel stencil to
    /// split the output into disjoint row chunks.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
