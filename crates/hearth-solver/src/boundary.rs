//! Neumann boundary condition via ghost-cell mirroring.

use hearth_grid::{Field, Neighbours};

/// Mirror the adjacent interior cells into the ghost border on every side of
/// `field` that has no neighbour in `neighbours`.
///
/// Copying the first interior row into ghost row 0 (and likewise for the
/// other three sides) makes the normal derivative vanish at the edge, so no
/// heat flows through the global boundary. Sides with a neighbour are left
/// alone; their ghosts belong to halo exchange. Corner ghosts are never
/// touched, the 5-point stencil does not read them.
pub fn apply_boundary(field: &mut Field, neighbours: &Neighbours) {
    let rows = field.rows();
    let cols = field.cols();
    if neighbours.up.is_none() {
        let row = field.pack_row(1);
        field.write_ghost_row(0, &row);
    }
    if neighbours.down.is_none() {
        let row = field.pack_row(rows);
        field.write_ghost_row(rows + 1, &row);
    }
    if neighbours.left.is_none() {
        let col = field.pack_col(1);
        field.write_ghost_col(0, &col);
    }
    if neighbours.right.is_none() {
        let col = field.pack_col(cols);
        field.write_ghost_col(cols + 1, &col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, cols: usize) -> Field {
        let mut f = Field::new(rows, cols).unwrap();
        for y in 1..=rows {
            for x in 1..=cols {
                f.set(x, y, (y * 10 + x) as f64);
            }
        }
        f
    }

    #[test]
    fn edge_ghosts_mirror_adjacent_interior() {
        let mut f = numbered(3, 3);
        apply_boundary(&mut f, &Neighbours::default());
        for x in 1..=3 {
            assert_eq!(f.at(x, 0), f.at(x, 1));
            assert_eq!(f.at(x, 4), f.at(x, 3));
        }
        for y in 1..=3 {
            assert_eq!(f.at(0, y), f.at(1, y));
            assert_eq!(f.at(4, y), f.at(3, y));
        }
    }

    #[test]
    fn interior_cells_are_untouched() {
        let mut f = numbered(3, 3);
        let before = f.interior();
        apply_boundary(&mut f, &Neighbours::default());
        assert_eq!(f.interior(), before);
    }

    #[test]
    fn mirroring_is_idempotent() {
        let mut f = numbered(4, 2);
        apply_boundary(&mut f, &Neighbours::default());
        let once = f.clone();
        apply_boundary(&mut f, &Neighbours::default());
        assert_eq!(f, once);
    }

    #[test]
    fn sides_with_a_neighbour_are_skipped() {
        let mut f = numbered(3, 3);
        let neighbours = Neighbours {
            down: Some(1),
            ..Neighbours::default()
        };
        apply_boundary(&mut f, &neighbours);
        // The down ghost row stays at its allocation default.
        for x in 1..=3 {
            assert_eq!(f.at(x, 4), 0.0);
        }
        // The up side still mirrors.
        for x in 1..=3 {
            assert_eq!(f.at(x, 0), f.at(x, 1));
        }
    }
}
