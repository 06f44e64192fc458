//! Error types for lab generation and simulation.

use thiserror::Error;

/// Errors surfaced by the generator and the environment.
///
/// Invalid in-game actions (walking into a wall, pressing a button that is
/// not in the room) are not errors; the environment turns them into no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    /// The configuration or a hand-built layout is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No solvable layout was found within the attempt cap.
    #[error("no solvable layout found after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    /// `step` was called before `reset` or after the episode ended.
    #[error("episode is not running; call reset first")]
    EpisodeNotRunning,
}

impl LabError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        LabError::Configuration(message.into())
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Configuration(format!("invalid config json: {err}"))
    }
}
