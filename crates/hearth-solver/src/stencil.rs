//! Explicit 5-point diffusion stencil.
//!
//! One step of forward Euler on the heat equation with per-cell
//! diffusivity `k`:
//!
//! ```text
//! next = c + k * dt * ((left - 2c + right) + (below - 2c + above))
//! ```
//!
//! The scheme is stable while `k * dt <= 0.25` for every cell; grids are
//! unit-spaced so the bound has no `dx` in it.

use hearth_grid::Field;

/// Largest time step the explicit scheme tolerates for a peak diffusivity
/// of `k_max`.
pub fn max_stable_dt(k_max: f64) -> f64 {
    0.25 / k_max
}

/// One serial update of the interior of `next` from `current`.
///
/// Ghost cells of `current` must already hold valid values (boundary
/// mirroring or halo exchange). Ghost cells of `next` are not written.
pub fn step_serial(current: &Field, diffusivity: &Field, next: &mut Field, dt: f64) {
    debug_assert_eq!(current.rows(), next.rows());
    debug_assert_eq!(current.cols(), next.cols());
    for y in 1..=current.rows() {
        for x in 1..=current.cols() {
            next.set(x, y, updated_cell(current, diffusivity, x, y, dt));
        }
    }
}

/// One update of the interior of `next` from `current`, row-parallel when
/// the `rayon` feature is enabled.
#[cfg(feature = "rayon")]
pub fn step(current: &Field, diffusivity: &Field, next: &mut Field, dt: f64) {
    use rayon::prelude::*;

    debug_assert_eq!(current.rows(), next.rows());
    debug_assert_eq!(current.cols(), next.cols());
    let rows = current.rows();
    let cols = current.cols();
    let width = current.padded_cols();
    // Each padded row of the output is a disjoint chunk, so rows can be
    // updated independently while the whole input stays shared.
    next.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(rows)
        .for_each(|(y, out_row)| {
            for x in 1..=cols {
                out_row[x] = updated_cell(current, diffusivity, x, y, dt);
            }
        });
}

/// One update of the interior of `next` from `current`.
#[cfg(not(feature = "rayon"))]
pub fn step(current: &Field, diffusivity: &Field, next: &mut Field, dt: f64) {
    step_serial(current, diffusivity, next, dt);
}

#[inline]
fn updated_cell(current: &Field, diffusivity: &Field, x: usize, y: usize, dt: f64) -> f64 {
    let c = current.at(x, y);
    let horizontal = current.at(x - 1, y) - 2.0 * c + current.at(x + 1, y);
    let vertical = current.at(x, y - 1) - 2.0 * c + current.at(x, y + 1);
    c + diffusivity.at(x, y) * dt * (horizontal + vertical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::apply_boundary;
    use float_cmp::assert_approx_eq;
    use hearth_grid::Neighbours;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn uniform_diffusivity(rows: usize, cols: usize, k: f64) -> Field {
        let mut f = Field::new(rows, cols).unwrap();
        for y in 1..=rows {
            for x in 1..=cols {
                f.set(x, y, k);
            }
        }
        f
    }

    fn random_field(rows: usize, cols: usize, seed: u64) -> Field {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut f = Field::new(rows, cols).unwrap();
        for y in 1..=rows {
            for x in 1..=cols {
                f.set(x, y, rng.gen_range(0.0..100.0));
            }
        }
        apply_boundary(&mut f, &Neighbours::default());
        f
    }

    #[test]
    fn constant_field_is_a_fixed_point() {
        let mut current = Field::new(4, 4).unwrap();
        for y in 1..=4 {
            for x in 1..=4 {
                current.set(x, y, 42.0);
            }
        }
        apply_boundary(&mut current, &Neighbours::default());
        let k = uniform_diffusivity(4, 4, 0.1);
        let mut next = Field::new(4, 4).unwrap();
        step_serial(&current, &k, &mut next, 0.1);
        for y in 1..=4 {
            for x in 1..=4 {
                assert_approx_eq!(f64, next.at(x, y), 42.0);
            }
        }
    }

    #[test]
    fn single_cell_update_matches_hand_computation() {
        let mut current = Field::new(1, 1).unwrap();
        current.set(1, 1, 10.0);
        current.set(0, 1, 7.0);
        current.set(2, 1, 13.0);
        current.set(1, 0, 9.0);
        current.set(1, 2, 11.0);
        let k = uniform_diffusivity(1, 1, 0.5);
        let mut next = Field::new(1, 1).unwrap();
        step_serial(&current, &k, &mut next, 0.1);
        // 10 + 0.5 * 0.1 * ((7 - 20 + 13) + (9 - 20 + 11)) = 10
        assert_approx_eq!(f64, next.at(1, 1), 10.0);

        current.set(2, 1, 15.0);
        step_serial(&current, &k, &mut next, 0.1);
        // horizontal term becomes 2, vertical stays 0
        assert_approx_eq!(f64, next.at(1, 1), 10.1);
    }

    #[test]
    fn hot_spot_diffuses_outward() {
        let mut current = Field::new(3, 3).unwrap();
        current.set(2, 2, 100.0);
        apply_boundary(&mut current, &Neighbours::default());
        let k = uniform_diffusivity(3, 3, 0.1);
        let mut next = Field::new(3, 3).unwrap();
        step_serial(&current, &k, &mut next, 0.1);
        assert!(next.at(2, 2) < 100.0);
        assert!(next.at(1, 2) > 0.0);
        assert!(next.at(3, 2) > 0.0);
        assert!(next.at(2, 1) > 0.0);
        assert!(next.at(2, 3) > 0.0);
    }

    #[test]
    fn ghost_cells_of_next_are_not_written() {
        let current = random_field(3, 3, 7);
        let k = uniform_diffusivity(3, 3, 0.1);
        let mut next = Field::new(3, 3).unwrap();
        step_serial(&current, &k, &mut next, 0.1);
        for x in 0..5 {
            assert_eq!(next.at(x, 0), 0.0);
            assert_eq!(next.at(x, 4), 0.0);
        }
        for y in 0..5 {
            assert_eq!(next.at(0, y), 0.0);
            assert_eq!(next.at(4, y), 0.0);
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_step_matches_serial() {
        let current = random_field(16, 9, 42);
        let mut k = Field::new(16, 9).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        for y in 1..=16 {
            for x in 1..=9 {
                k.set(x, y, rng.gen_range(0.01..2.0));
            }
        }
        let mut serial = Field::new(16, 9).unwrap();
        let mut parallel = Field::new(16, 9).unwrap();
        step_serial(&current, &k, &mut serial, 0.1);
        step(&current, &k, &mut parallel, 0.1);
        assert_eq!(serial.interior(), parallel.interior());
    }

    #[test]
    fn max_stable_dt_inverts_the_bound() {
        assert_approx_eq!(f64, max_stable_dt(0.25), 1.0);
        assert_approx_eq!(f64, max_stable_dt(2.5), 0.1);
    }

    proptest! {
        // A stable explicit step is a convex combination of the cell and
        // its neighbours, so it can never overshoot the field's extrema.
        #[test]
        fn stable_step_respects_the_maximum_principle(seed in any::<u64>(), k in 0.01f64..2.5) {
            let current = random_field(6, 6, seed);
            let diffusivity = uniform_diffusivity(6, 6, k);
            let dt = max_stable_dt(k);
            let mut next = Field::new(6, 6).unwrap();
            step_serial(&current, &diffusivity, &mut next, dt);
            let (lo, hi) = (current.interior_min(), current.interior_max());
            prop_assert!(next.interior_min() >= lo - 1e-9);
            prop_assert!(next.interior_max() <= hi + 1e-9);
        }
    }
}
