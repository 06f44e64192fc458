use serde::Serialize;

use crate::grid::RoomCoord;
use crate::matrix::BoolMatrix;

/// What the agent sees after every reset and step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub agent_coord: RoomCoord,
    pub goal_coord: RoomCoord,
    pub door_state: BoolMatrix,
    pub button_locations: BoolMatrix,
    /// `None` until the agent has moved.
    pub last_coord: Option<RoomCoord>,
}

impl Observation {
    /// `last_coord` as signed integers, `(-1, -1)` when there is no history.
    pub fn last_coord_or_sentinel(&self) -> (i64, i64) {
        match self.last_coord {
            Some(c) => (c.row as i64, c.col as i64),
            None => (-1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_for_missing_history() {
        let mut obs = Observation {
            agent_coord: RoomCoord::new(0, 0),
            goal_coord: RoomCoord::new(1, 1),
            door_state: BoolMatrix::identity(4),
            button_locations: BoolMatrix::new(4, 0),
            last_coord: None,
        };
        assert_eq!(obs.last_coord_or_sentinel(), (-1, -1));
        obs.last_coord = Some(RoomCoord::new(0, 1));
        assert_eq!(obs.last_coord_or_sentinel(), (0, 1));
    }
}
