use crate::grid::Grid;
use crate::matrix::BoolMatrix;
use crate::rng::LabRng;
use crate::topology::random_grid_symmetric;

/// Rooms × buttons. A room may hold any number of buttons and a button may
/// sit in several rooms.
pub fn place_buttons(rooms: usize, buttons: usize, rng: &mut LabRng) -> BoolMatrix {
    let mut locations = BoolMatrix::new(rooms, buttons);
    for room in 0..rooms {
        for button in 0..buttons {
            let here = rng.coin();
            locations.set(room, button, here);
        }
    }
    locations
}

/// One toggle mask per button: symmetric, grid-masked, zero diagonal.
pub fn generate_behaviors(grid: &Grid, buttons: usize, rng: &mut LabRng) -> Vec<BoolMatrix> {
    (0..buttons)
        .map(|_| random_grid_symmetric(grid, rng, false))
        .collect()
}

/// Buttons present in `room`, ascending.
pub fn buttons_in_room(locations: &BoolMatrix, room: usize) -> impl Iterator<Item = usize> + '_ {
    (0..locations.cols()).filter(move |&b| locations.get(room, b))
}
