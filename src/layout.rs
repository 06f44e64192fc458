use serde::Serialize;

use crate::config::MAX_BUTTONS;
use crate::error::LabError;
use crate::grid::Grid;
use crate::matrix::BoolMatrix;
use crate::topology;

/// A complete generated lab. Every matrix is fixed once built; the
/// simulation copies `initial_doors` and mutates only its copy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabLayout {
    grid: Grid,
    start_room: usize,
    goal_room: usize,
    topology: BoolMatrix,
    initial_doors: BoolMatrix,
    button_locations: BoolMatrix,
    button_behaviors: Vec<BoolMatrix>,
}

impl LabLayout {
    pub(crate) fn assemble(
        grid: Grid,
        start_room: usize,
        goal_room: usize,
        topology: BoolMatrix,
        initial_doors: BoolMatrix,
        button_locations: BoolMatrix,
        button_behaviors: Vec<BoolMatrix>,
    ) -> Self {
        Self {
            grid,
            start_room,
            goal_room,
            topology,
            initial_doors,
            button_locations,
            button_behaviors,
        }
    }

    /// Build a layout from hand-written matrices, checking every invariant a
    /// generated layout satisfies. Solvability is not checked here.
    pub fn from_parts(
        start_room: usize,
        goal_room: usize,
        topology: BoolMatrix,
        initial_doors: BoolMatrix,
        button_locations: BoolMatrix,
        button_behaviors: Vec<BoolMatrix>,
    ) -> Result<Self, LabError> {
        if !topology.is_square() {
            return Err(LabError::config("topology must be square"));
        }
        let grid = Grid::for_rooms(topology.rows())?;
        let n = grid.room_count();

        if start_room >= n || goal_room >= n {
            return Err(LabError::config(format!(
                "start {start_room} / goal {goal_room} outside 0..{n}"
            )));
        }
        if start_room == goal_room {
            return Err(LabError::config("start and goal must differ"));
        }
        if !topology::is_well_formed(&grid, &topology) {
            return Err(LabError::config(
                "topology must be symmetric, self-connected and grid-masked",
            ));
        }
        if !initial_doors.same_shape(&topology)
            || !initial_doors.is_symmetric()
            || !initial_doors.is_subset_of(&topology)
        {
            return Err(LabError::config(
                "door states must be symmetric and only open where a passage exists",
            ));
        }
        if button_locations.rows() != n {
            return Err(LabError::config(format!(
                "button locations need {n} rows, got {}",
                button_locations.rows()
            )));
        }
        let buttons = button_locations.cols();
        if buttons > MAX_BUTTONS {
            return Err(LabError::config(format!(
                "at most {MAX_BUTTONS} buttons are supported, got {buttons}"
            )));
        }
        if button_behaviors.len() != buttons {
            return Err(LabError::config(format!(
                "{buttons} buttons placed but {} behaviours given",
                button_behaviors.len()
            )));
        }
        let adj = grid.adjacency();
        for (b, behavior) in button_behaviors.iter().enumerate() {
            if !behavior.same_shape(&topology)
                || !behavior.is_symmetric()
                || !behavior.diagonal_is(false)
                || !behavior.is_subset_of(&adj)
            {
                return Err(LabError::config(format!(
                    "behaviour of button {b} must be symmetric, grid-masked, zero diagonal"
                )));
            }
        }

        Ok(Self::assemble(
            grid,
            start_room,
            goal_room,
            topology,
            initial_doors,
            button_locations,
            button_behaviors,
        ))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn room_count(&self) -> usize {
        self.grid.room_count()
    }

    pub fn button_count(&self) -> usize {
        self.button_behaviors.len()
    }

    pub fn start_room(&self) -> usize {
        self.start_room
    }

    pub fn goal_room(&self) -> usize {
        self.goal_room
    }

    pub fn topology(&self) -> &BoolMatrix {
        &self.topology
    }

    pub fn initial_doors(&self) -> &BoolMatrix {
        &self.initial_doors
    }

    pub fn button_locations(&self) -> &BoolMatrix {
        &self.button_locations
    }

    pub fn button_behaviors(&self) -> &[BoolMatrix] {
        &self.button_behaviors
    }

    pub fn behavior(&self, button: usize) -> Option<&BoolMatrix> {
        self.button_behaviors.get(button)
    }

    pub fn has_button(&self, room: usize, button: usize) -> bool {
        self.button_locations.get(room, button)
    }
}
