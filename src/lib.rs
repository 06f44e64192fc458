//! Procedural labyrinths of rooms, doors and toggle buttons.
//!
//! [`LabGenerator`] produces layouts that are proven solvable by an
//! exhaustive search over room, button parity and backtrack history.
//! [`LabEnv`] plays those layouts one action at a time.

pub mod action;
pub mod buttons;
pub mod config;
pub mod doors;
pub mod env;
pub mod error;
pub mod generation;
pub mod grid;
pub mod layout;
pub mod matrix;
pub mod observation;
pub mod reachability;
pub mod rng;
pub mod solver;
pub mod topology;

pub use action::Action;
pub use config::{LabConfig, RewardPolicy};
pub use env::{EpisodePhase, EpisodeTelemetry, LabEnv, StepEvent, StepResult};
pub use error::LabError;
pub use generation::{GenerationStats, LabGenerator};
pub use grid::{Direction, Grid, RoomCoord};
pub use layout::LabLayout;
pub use matrix::BoolMatrix;
pub use observation::Observation;
pub use solver::Solution;
