use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::grid::Grid;

/// Hard cap on buttons. The solvability search is exponential in this.
pub const MAX_BUTTONS: usize = 16;

/// Estimated search states above which validation logs a cost warning.
pub const STATE_SPACE_WARN_LIMIT: u64 = 1_000_000;

/// Smallest lab with distinct start and goal rooms on a square grid.
pub const MIN_ROOMS: usize = 4;

/// Largest lab (64x64). Layout matrices are `rooms * rooms` cells each.
pub const MAX_ROOMS: usize = 4096;

/// Reward shaping. Penalties are negative numbers added as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPolicy {
    pub step_reward: f64,
    pub goal_reward: f64,
    /// Added on top of `step_reward` for blocked moves, backtracks without
    /// history and presses of absent buttons.
    pub invalid_action_penalty: f64,
    /// Replaces the step reward on the step that hits `max_steps`.
    pub truncation_penalty: f64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            step_reward: -1.0,
            goal_reward: 10.0,
            invalid_action_penalty: 0.0,
            truncation_penalty: -100.0,
        }
    }
}

/// Generator and environment settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub number_of_rooms: usize,
    /// Defaults to the room count when unset.
    pub number_of_buttons: Option<usize>,
    /// Fixed start room; drawn per lab when unset.
    pub start_room: Option<usize>,
    /// Fixed goal room; drawn per lab when unset.
    pub goal_room: Option<usize>,
    /// RNG seed; entropy when unset.
    pub seed: Option<u64>,
    pub max_attempts: u32,
    pub max_steps: u32,
    pub rewards: RewardPolicy,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            number_of_rooms: 4,
            number_of_buttons: None,
            start_room: None,
            goal_room: None,
            seed: None,
            max_attempts: 10_000,
            max_steps: 100,
            rewards: RewardPolicy::default(),
        }
    }
}

impl LabConfig {
    pub fn from_json(json: &str) -> Result<Self, LabError> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LabError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LabError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Like `load_from_path`, but an absent file yields the defaults.
    /// A file that exists and fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LabError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = Self::load_from_path(path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn button_count(&self) -> usize {
        self.number_of_buttons.unwrap_or(self.number_of_rooms)
    }

    pub fn grid(&self) -> Result<Grid, LabError> {
        Grid::for_rooms(self.number_of_rooms)
    }

    /// Upper bound on solver states: rooms × toggle masks × (last room or none).
    pub fn estimated_state_space(&self) -> u64 {
        let rooms = self.number_of_rooms as u64;
        let masks = 1u64 << self.button_count().min(MAX_BUTTONS);
        rooms.saturating_mul(masks).saturating_mul(rooms + 1)
    }

    pub fn validate(&self) -> Result<(), LabError> {
        if self.number_of_rooms > MAX_ROOMS {
            return Err(LabError::config(format!(
                "at most {MAX_ROOMS} rooms are supported, got {}",
                self.number_of_rooms
            )));
        }
        let grid = self.grid()?;
        let rooms = grid.room_count();
        if rooms < MIN_ROOMS {
            return Err(LabError::config(format!(
                "need at least {MIN_ROOMS} rooms, got {rooms}"
            )));
        }

        let buttons = self.button_count();
        if buttons > MAX_BUTTONS {
            return Err(LabError::config(format!(
                "at most {MAX_BUTTONS} buttons are supported, got {buttons}"
            )));
        }
        if self.max_attempts == 0 {
            return Err(LabError::config("max_attempts must be at least 1"));
        }
        if self.max_steps == 0 {
            return Err(LabError::config("max_steps must be at least 1"));
        }

        for (name, room) in [("start_room", self.start_room), ("goal_room", self.goal_room)] {
            if let Some(room) = room {
                if room >= rooms {
                    return Err(LabError::config(format!(
                        "{name} {room} outside 0..{rooms}"
                    )));
                }
            }
        }
        if let (Some(start), Some(goal)) = (self.start_room, self.goal_room) {
            if start == goal {
                return Err(LabError::config("start_room and goal_room must differ"));
            }
        }

        let states = self.estimated_state_space();
        if states > STATE_SPACE_WARN_LIMIT {
            tracing::warn!(
                rooms,
                buttons,
                states,
                "solvability search may visit a very large state space"
            );
        }
        Ok(())
    }
}
