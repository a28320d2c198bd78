//! Per-worker domain state and analytic initial conditions.

use hearth_core::ConfigError;

use crate::field::Field;
use crate::subdomain::SubdomainDescriptor;

/// Initial temperature at global interior coordinate `(gx, gy)` (1-based).
pub fn initial_temperature(gx: usize, gy: usize) -> f64 {
    30.0 + 30.0 * (((gx + gy) as f64) / 20.0).sin()
}

/// Initial thermal diffusivity at global interior coordinate `(gx, gy)`
/// (1-based) of a grid with `cols` interior columns.
pub fn initial_diffusivity(gx: usize, gy: usize, cols: usize) -> f64 {
    let phase = (cols as f64 - gx as f64 + gy as f64) / 20.0;
    0.05 + (30.0 + 30.0 * phase.sin()) / 605.0
}

/// Double-buffered temperature state plus the static diffusivity map for one
/// worker's tile.
///
/// `current` holds the readable field for the in-flight iteration, `next` the
/// write target. [`DomainState::swap`] flips the two after each update.
#[derive(Debug)]
pub struct DomainState {
    /// Readable temperature field, ghost cells included.
    pub current: Field,
    /// Write-target temperature field, ghost cells included.
    pub next: Field,
    /// Per-cell diffusivity, fixed for the whole run.
    pub diffusivity: Field,
    /// The tile this state belongs to.
    pub subdomain: SubdomainDescriptor,
}

impl DomainState {
    /// Allocate and initialize the state for `subdomain` of a grid with
    /// `global_cols` interior columns.
    ///
    /// Both temperature buffers start from the analytic initial condition so
    /// the ghost cells of `next` are populated before the first swap.
    pub fn new(subdomain: SubdomainDescriptor, global_cols: usize) -> Result<Self, ConfigError> {
        let mut current = Field::new(subdomain.local_rows, subdomain.local_cols)?;
        let mut diffusivity = Field::new(subdomain.local_rows, subdomain.local_cols)?;
        for y in 1..=subdomain.local_rows {
            for x in 1..=subdomain.local_cols {
                let gx = x + subdomain.offset_x;
                let gy = y + subdomain.offset_y;
                current.set(x, y, initial_temperature(gx, gy));
                diffusivity.set(x, y, initial_diffusivity(gx, gy, global_cols));
            }
        }
        let next = current.clone();
        Ok(Self {
            current,
            next,
            diffusivity,
            subdomain,
        })
    }

    /// Flip the readable and write-target buffers.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Largest diffusivity in the tile's interior. Drives the stability bound
    /// `dt <= 0.25 / k_max` of the explicit scheme.
    pub fn max_diffusivity(&self) -> f64 {
        self.diffusivity.interior_max()
    }
}
