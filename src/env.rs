use serde::Serialize;

use crate::action::Action;
use crate::config::{LabConfig, RewardPolicy};
use crate::doors::apply_button_press;
use crate::error::LabError;
use crate::generation::{GenerationStats, LabGenerator};
use crate::layout::LabLayout;
use crate::matrix::BoolMatrix;
use crate::observation::Observation;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodePhase {
    Idle,
    Running,
    Terminated,
    Truncated,
}

/// What a single step did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    Moved,
    Backtracked,
    ButtonPressed,
    ReachedGoal,
    /// Target room is inside the grid but the door is closed or walled.
    Blocked,
    OutOfBounds,
    NoHistory,
    NoButton,
}

impl StepEvent {
    pub fn is_invalid(self) -> bool {
        matches!(
            self,
            StepEvent::Blocked | StepEvent::OutOfBounds | StepEvent::NoHistory | StepEvent::NoButton
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub event: StepEvent,
}

/// Per-episode counters, cleared on reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EpisodeTelemetry {
    pub steps: u32,
    pub moves: u32,
    pub backtracks: u32,
    pub presses: u32,
    pub invalid_actions: u32,
    pub total_reward: f64,
}

/// The labyrinth environment: one agent, one live door state.
///
/// Topology, button locations and behaviours come from the current layout
/// and are only read; the door matrix is the only state a step mutates.
pub struct LabEnv {
    generator: LabGenerator,
    rewards: RewardPolicy,
    max_steps: u32,
    layout: Option<LabLayout>,
    doors: BoolMatrix,
    current_room: usize,
    last_room: Option<usize>,
    phase: EpisodePhase,
    telemetry: EpisodeTelemetry,
}

impl LabEnv {
    pub fn new(config: LabConfig) -> Result<Self, LabError> {
        let rewards = config.rewards.clone();
        let max_steps = config.max_steps;
        let generator = LabGenerator::new(config)?;
        Ok(Self {
            generator,
            rewards,
            max_steps,
            layout: None,
            doors: BoolMatrix::default(),
            current_room: 0,
            last_room: None,
            phase: EpisodePhase::Idle,
            telemetry: EpisodeTelemetry::default(),
        })
    }

    /// Generate a fresh solvable lab and put the agent on its start room.
    /// A seed reseeds the generator first, making the episode reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Observation, LabError> {
        if let Some(seed) = seed {
            self.generator.reseed(seed);
        }
        let layout = match self.generator.generate() {
            Ok(layout) => layout,
            Err(err) => {
                self.layout = None;
                self.phase = EpisodePhase::Idle;
                return Err(err);
            }
        };
        self.reset_with_layout(layout)
    }

    /// Start an episode on a given layout instead of generating one.
    pub fn reset_with_layout(&mut self, layout: LabLayout) -> Result<Observation, LabError> {
        tracing::debug!(
            start = layout.start_room(),
            goal = layout.goal_room(),
            buttons = layout.button_count(),
            "episode reset"
        );
        self.doors = layout.initial_doors().clone();
        self.current_room = layout.start_room();
        self.last_room = None;
        self.layout = Some(layout);
        self.phase = EpisodePhase::Running;
        self.telemetry = EpisodeTelemetry::default();
        self.observe()
    }

    /// Decode the external integer encoding and step.
    pub fn step_index(&mut self, index: usize) -> Result<StepResult, LabError> {
        self.step(Action::from_index(index))
    }

    pub fn step(&mut self, action: Action) -> Result<StepResult, LabError> {
        if self.phase != EpisodePhase::Running {
            return Err(LabError::EpisodeNotRunning);
        }
        let Some(layout) = self.layout.as_ref() else {
            return Err(LabError::EpisodeNotRunning);
        };

        let here = self.current_room;
        let mut event = match action {
            Action::Move(dir) => match layout.grid().step(here, dir) {
                None => StepEvent::OutOfBounds,
                Some(target) if self.doors.get(here, target) => {
                    self.last_room = Some(here);
                    self.current_room = target;
                    self.telemetry.moves += 1;
                    StepEvent::Moved
                }
                Some(_) => StepEvent::Blocked,
            },
            Action::Backtrack => match self.last_room {
                None => StepEvent::NoHistory,
                Some(target) => {
                    self.last_room = Some(here);
                    self.current_room = target;
                    self.telemetry.backtracks += 1;
                    StepEvent::Backtracked
                }
            },
            Action::PressButton(button) => match layout.behavior(button) {
                Some(behavior) if layout.has_button(here, button) => {
                    apply_button_press(&mut self.doors, behavior, layout.topology());
                    self.telemetry.presses += 1;
                    StepEvent::ButtonPressed
                }
                _ => StepEvent::NoButton,
            },
        };

        let goal = layout.goal_room();
        self.telemetry.steps += 1;

        let mut reward = self.rewards.step_reward;
        if event.is_invalid() {
            reward += self.rewards.invalid_action_penalty;
            self.telemetry.invalid_actions += 1;
        }

        let terminated = self.current_room == goal && here != goal;
        let mut truncated = false;
        if terminated {
            event = StepEvent::ReachedGoal;
            reward = self.rewards.goal_reward;
            self.phase = EpisodePhase::Terminated;
        } else if self.telemetry.steps >= self.max_steps {
            truncated = true;
            reward = self.rewards.truncation_penalty;
            self.phase = EpisodePhase::Truncated;
        }
        self.telemetry.total_reward += reward;

        if terminated || truncated {
            tracing::debug!(
                steps = self.telemetry.steps,
                total_reward = self.telemetry.total_reward,
                terminated,
                truncated,
                "episode finished"
            );
        }

        Ok(StepResult {
            observation: self.observe()?,
            reward,
            terminated,
            truncated,
            event,
        })
    }

    /// Actions that would change state from here; everything else is a no-op.
    pub fn valid_actions(&self) -> Vec<Action> {
        let Some(layout) = self.layout.as_ref() else {
            return Vec::new();
        };
        if self.phase != EpisodePhase::Running {
            return Vec::new();
        }
        let here = self.current_room;
        Action::all(layout.button_count())
            .into_iter()
            .filter(|action| match *action {
                Action::Move(dir) => layout
                    .grid()
                    .step(here, dir)
                    .is_some_and(|target| self.doors.get(here, target)),
                Action::Backtrack => self.last_room.is_some(),
                Action::PressButton(button) => layout.has_button(here, button),
            })
            .collect()
    }

    pub fn observe(&self) -> Result<Observation, LabError> {
        let layout = self.layout.as_ref().ok_or(LabError::EpisodeNotRunning)?;
        let grid = layout.grid();
        Ok(Observation {
            agent_coord: grid.coord(self.current_room),
            goal_coord: grid.coord(layout.goal_room()),
            door_state: self.doors.clone(),
            button_locations: layout.button_locations().clone(),
            last_coord: self.last_room.map(|r| grid.coord(r)),
        })
    }

    /// Size of the integer action space: from the active layout once an
    /// episode has started, from the config before that.
    pub fn action_count(&self) -> usize {
        let buttons = match self.layout.as_ref() {
            Some(layout) => layout.button_count(),
            None => self.generator.config().button_count(),
        };
        Action::count(buttons)
    }

    pub fn layout(&self) -> Option<&LabLayout> {
        self.layout.as_ref()
    }

    pub fn door_state(&self) -> &BoolMatrix {
        &self.doors
    }

    pub fn current_room(&self) -> usize {
        self.current_room
    }

    pub fn last_room(&self) -> Option<usize> {
        self.last_room
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn telemetry(&self) -> &EpisodeTelemetry {
        &self.telemetry
    }

    pub fn generation_stats(&self) -> &GenerationStats {
        self.generator.last_stats()
    }
}
