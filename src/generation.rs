use serde::Serialize;

use crate::buttons::{generate_behaviors, place_buttons};
use crate::config::LabConfig;
use crate::doors::initial_door_states;
use crate::error::LabError;
use crate::grid::Grid;
use crate::layout::LabLayout;
use crate::reachability::is_reachable_on_grid;
use crate::rng::LabRng;
use crate::solver;
use crate::topology::build_topology;

/// Bookkeeping for the most recent `generate` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenerationStats {
    pub attempts: u32,
    pub unreachable_rejects: u32,
    pub unsolvable_rejects: u32,
    /// Search states the accepted layout's proof visited.
    pub states_explored: usize,
}

/// Retries the generation pipeline until a layout is provably solvable.
pub struct LabGenerator {
    config: LabConfig,
    grid: Grid,
    rng: LabRng,
    last_stats: GenerationStats,
}

impl LabGenerator {
    pub fn new(config: LabConfig) -> Result<Self, LabError> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = match config.seed {
            Some(seed) => LabRng::new(seed),
            None => LabRng::from_entropy(),
        };
        Ok(Self {
            config,
            grid,
            rng,
            last_stats: GenerationStats::default(),
        })
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = LabRng::new(seed);
    }

    pub fn last_stats(&self) -> &GenerationStats {
        &self.last_stats
    }

    /// Produce a fresh solvable layout.
    ///
    /// Each attempt is discarded whole on failure. Fails with
    /// `GenerationFailed` once `max_attempts` attempts have been spent.
    pub fn generate(&mut self) -> Result<LabLayout, LabError> {
        let rooms = self.grid.room_count();
        let buttons = self.config.button_count();
        let (start, goal) = self.pick_endpoints();
        let mut stats = GenerationStats::default();

        for attempt in 1..=self.config.max_attempts {
            stats.attempts = attempt;

            let topology = build_topology(&self.grid, &mut self.rng);
            if !is_reachable_on_grid(&self.grid, &topology, start, goal) {
                stats.unreachable_rejects += 1;
                tracing::debug!(attempt, "topology rejected: goal unreachable");
                continue;
            }

            let doors = initial_door_states(&self.grid, &topology, &mut self.rng);
            let locations = place_buttons(rooms, buttons, &mut self.rng);
            let behaviors = generate_behaviors(&self.grid, buttons, &mut self.rng);
            let layout = LabLayout::assemble(
                self.grid, start, goal, topology, doors, locations, behaviors,
            );

            match solver::solve(&layout) {
                Some(solution) => {
                    stats.states_explored = solution.states_explored;
                    tracing::info!(
                        attempt,
                        rooms,
                        buttons,
                        start,
                        goal,
                        solution_len = solution.actions.len(),
                        "generated solvable lab"
                    );
                    self.last_stats = stats;
                    return Ok(layout);
                }
                None => {
                    stats.unsolvable_rejects += 1;
                    tracing::debug!(attempt, "layout rejected: not solvable");
                }
            }
        }

        tracing::warn!(
            attempts = stats.attempts,
            unreachable = stats.unreachable_rejects,
            unsolvable = stats.unsolvable_rejects,
            "lab generation gave up"
        );
        let attempts = stats.attempts;
        self.last_stats = stats;
        Err(LabError::GenerationFailed { attempts })
    }

    fn pick_endpoints(&mut self) -> (usize, usize) {
        let rooms = self.grid.room_count();
        match (self.config.start_room, self.config.goal_room) {
            (Some(start), Some(goal)) => (start, goal),
            (Some(start), None) => (start, self.rng.pick_other(rooms, start)),
            (None, Some(goal)) => (self.rng.pick_other(rooms, goal), goal),
            (None, None) => {
                let start = self.rng.range(0, rooms);
                (start, self.rng.pick_other(rooms, start))
            }
        }
    }
}
