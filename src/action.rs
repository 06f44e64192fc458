use serde::{Deserialize, Serialize};

use crate::grid::Direction;

/// Index of the first button action in the integer encoding.
pub const BUTTON_ACTION_OFFSET: usize = 5;

/// One agent action.
///
/// External callers speak integers: `0..=3` move right/up/left/down, `4`
/// backtracks, `5 + i` presses button `i`. Decode once with
/// [`Action::from_index`] and work with the enum from there.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move(Direction),
    Backtrack,
    PressButton(usize),
}

impl Action {
    /// Total number of integer actions for a lab with `buttons` buttons.
    pub fn count(buttons: usize) -> usize {
        BUTTON_ACTION_OFFSET + buttons
    }

    /// Decodes the integer encoding. Indices past the last button decode to
    /// a press of a button that does not exist, which the environment treats
    /// as an invalid no-op.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Action::Move(Direction::Right),
            1 => Action::Move(Direction::Up),
            2 => Action::Move(Direction::Left),
            3 => Action::Move(Direction::Down),
            4 => Action::Backtrack,
            i => Action::PressButton(i - BUTTON_ACTION_OFFSET),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Action::Move(Direction::Right) => 0,
            Action::Move(Direction::Up) => 1,
            Action::Move(Direction::Left) => 2,
            Action::Move(Direction::Down) => 3,
            Action::Backtrack => 4,
            Action::PressButton(b) => BUTTON_ACTION_OFFSET + b,
        }
    }

    pub fn all(buttons: usize) -> Vec<Action> {
        (0..Self::count(buttons)).map(Self::from_index).collect()
    }
}
