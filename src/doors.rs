use crate::grid::Grid;
use crate::matrix::BoolMatrix;
use crate::rng::LabRng;
use crate::topology::random_grid_symmetric;

/// Initial open/closed state of every passage, before any button press.
///
/// Same draw as the topology, then clamped to it so walls start closed.
pub fn initial_door_states(grid: &Grid, topology: &BoolMatrix, rng: &mut LabRng) -> BoolMatrix {
    let mut doors = random_grid_symmetric(grid, rng, true);
    doors.and_assign(topology);
    doors
}

/// Toggle the doors a button controls: `(doors XOR behavior) AND topology`.
///
/// The mask keeps walls closed whatever the toggle history.
pub fn apply_button_press(doors: &mut BoolMatrix, behavior: &BoolMatrix, topology: &BoolMatrix) {
    doors.xor_assign(behavior);
    doors.and_assign(topology);
}
