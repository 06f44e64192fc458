//! Physical room graph: which grid neighbours share a passage at all.

use crate::grid::Grid;
use crate::matrix::BoolMatrix;
use crate::rng::LabRng;

/// Random symmetric matrix over grid-adjacent pairs.
///
/// One fair coin per unordered neighbour pair, drawn in ascending `(i, j)`
/// order. Cells that are not grid neighbours stay false; the diagonal is set
/// to `diagonal`.
pub fn random_grid_symmetric(grid: &Grid, rng: &mut LabRng, diagonal: bool) -> BoolMatrix {
    let n = grid.room_count();
    let mut m = BoolMatrix::square(n);
    for (i, j) in grid.adjacent_pairs() {
        let open = rng.coin();
        m.set_symmetric(i, j, open);
    }
    for i in 0..n {
        m.set(i, i, diagonal);
    }
    m
}

/// Walls vs. passages. Symmetric, true diagonal, grid-masked.
pub fn build_topology(grid: &Grid, rng: &mut LabRng) -> BoolMatrix {
    let mut topology = random_grid_symmetric(grid, rng, true);
    topology.and_assign(&grid.adjacency());
    topology
}

/// A topology value is well formed when it is square, symmetric, has a true
/// diagonal and never links rooms that are not grid neighbours.
pub fn is_well_formed(grid: &Grid, topology: &BoolMatrix) -> bool {
    topology.rows() == grid.room_count()
        && topology.is_symmetric()
        && topology.diagonal_is(true)
        && topology.is_subset_of(&grid.adjacency())
}
