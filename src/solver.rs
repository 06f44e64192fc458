//! Exhaustive solvability proof over the full play state space.
//!
//! A search state is the agent's room, the parity of every button's press
//! count (bit `b` set = button `b` pressed an odd number of times), and the
//! room the agent came from, which decides whether a backtrack is possible.
//! Door state is never stored: it is always `initial XOR toggles`, clamped to
//! the topology, so the mask alone determines it.
//!
//! The space has `rooms * 2^buttons * (rooms + 1)` states. That growth is
//! inherent to arbitrary toggle buttons; the button count is capped instead.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::action::Action;
use crate::buttons::buttons_in_room;
use crate::layout::LabLayout;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct SearchState {
    room: usize,
    mask: u32,
    last: Option<usize>,
}

/// Shortest action sequence from start to goal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub actions: Vec<Action>,
    pub states_explored: usize,
}

pub fn is_solvable(layout: &LabLayout) -> bool {
    solve(layout).is_some()
}

/// Breadth-first search; the returned actions replay in `LabEnv`.
pub fn solve(layout: &LabLayout) -> Option<Solution> {
    let start = SearchState {
        room: layout.start_room(),
        mask: 0,
        last: None,
    };
    if start.room == layout.goal_room() {
        return Some(Solution {
            actions: Vec::new(),
            states_explored: 1,
        });
    }

    let mut parents: HashMap<SearchState, (SearchState, Action)> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut explored = 0usize;

    while let Some(state) = queue.pop_front() {
        explored += 1;
        for (next, action) in successors(layout, state) {
            if next == start || parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, (state, action));
            if next.room == layout.goal_room() {
                return Some(Solution {
                    actions: unwind(&parents, start, next),
                    states_explored: explored,
                });
            }
            queue.push_back(next);
        }
    }

    tracing::trace!(explored, "search space exhausted without reaching the goal");
    None
}

fn successors(layout: &LabLayout, state: SearchState) -> Vec<(SearchState, Action)> {
    let mut out = Vec::new();

    for button in buttons_in_room(layout.button_locations(), state.room) {
        out.push((
            SearchState {
                mask: state.mask ^ (1 << button),
                ..state
            },
            Action::PressButton(button),
        ));
    }

    if let Some(last) = state.last {
        out.push((
            SearchState {
                room: last,
                mask: state.mask,
                last: Some(state.room),
            },
            Action::Backtrack,
        ));
    }

    for (dir, neighbor) in layout.grid().neighbors(state.room) {
        if door_open(layout, state.mask, state.room, neighbor) {
            out.push((
                SearchState {
                    room: neighbor,
                    mask: state.mask,
                    last: Some(state.room),
                },
                Action::Move(dir),
            ));
        }
    }

    out
}

/// Door between `a` and `b` after applying every toggle in `mask`.
fn door_open(layout: &LabLayout, mask: u32, a: usize, b: usize) -> bool {
    if !layout.topology().get(a, b) {
        return false;
    }
    let mut open = layout.initial_doors().get(a, b);
    for (bit, behavior) in layout.button_behaviors().iter().enumerate() {
        if mask & (1 << bit) != 0 {
            open ^= behavior.get(a, b);
        }
    }
    open
}

fn unwind(
    parents: &HashMap<SearchState, (SearchState, Action)>,
    start: SearchState,
    end: SearchState,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut cursor = end;
    while cursor != start {
        let Some(&(prev, action)) = parents.get(&cursor) else {
            break;
        };
        actions.push(action);
        cursor = prev;
    }
    actions.reverse();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::matrix::BoolMatrix;

    // 2x2 grid, rooms: 0 1 / 2 3
    fn square_topology() -> BoolMatrix {
        BoolMatrix::from_bits(&[
            [1, 1, 1, 0],
            [1, 1, 0, 1],
            [1, 0, 1, 1],
            [0, 1, 1, 1],
        ])
    }

    #[test]
    fn open_doors_give_direct_path() {
        let t = square_topology();
        let layout =
            LabLayout::from_parts(0, 3, t.clone(), t, BoolMatrix::new(4, 0), vec![]).unwrap();
        let solution = solve(&layout).unwrap();
        assert_eq!(solution.actions.len(), 2);
    }

    #[test]
    fn closed_doors_without_buttons_are_unsolvable() {
        let t = square_topology();
        let layout = LabLayout::from_parts(
            0,
            3,
            t,
            BoolMatrix::identity(4),
            BoolMatrix::new(4, 0),
            vec![],
        )
        .unwrap();
        assert!(!is_solvable(&layout));
    }

    #[test]
    fn button_opens_the_way() {
        // Only 0-1 and 1-3 are passages; 1-3 starts closed and button 0 in
        // room 1 toggles it.
        let t = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 0, 1],
            [0, 0, 1, 0],
            [0, 1, 0, 1],
        ]);
        let doors = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 0, 0],
            [0, 0, 1, 0],
            [0, 0, 0, 1],
        ]);
        let mut locations = BoolMatrix::new(4, 1);
        locations.set(1, 0, true);
        let mut behavior = BoolMatrix::square(4);
        behavior.set_symmetric(1, 3, true);

        let layout = LabLayout::from_parts(0, 3, t, doors, locations, vec![behavior]).unwrap();
        let solution = solve(&layout).unwrap();
        assert_eq!(
            solution.actions,
            vec![
                Action::Move(Direction::Right),
                Action::PressButton(0),
                Action::Move(Direction::Down),
            ]
        );
    }

    #[test]
    fn shortest_route_wins_over_longer_button_chains() {
        // 0-1 and 2-3 start open. Button 0 in room 1 flips 0-1, button 1 in
        // room 0 flips 0-2. 1-3 never opens.
        let t = square_topology();
        let doors = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 0, 0],
            [0, 0, 1, 1],
            [0, 0, 1, 1],
        ]);
        let mut locations = BoolMatrix::new(4, 2);
        locations.set(1, 0, true);
        locations.set(0, 1, true);
        let mut close_01 = BoolMatrix::square(4);
        close_01.set_symmetric(0, 1, true);
        let mut open_02 = BoolMatrix::square(4);
        open_02.set_symmetric(0, 2, true);
        let layout =
            LabLayout::from_parts(0, 3, t, doors, locations, vec![close_01, open_02]).unwrap();
        let solution = solve(&layout).unwrap();
        assert_eq!(
            solution.actions,
            vec![
                Action::PressButton(1),
                Action::Move(Direction::Down),
                Action::Move(Direction::Right),
            ]
        );
    }

    #[test]
    fn backtrack_is_used_when_it_is_the_only_way_back() {
        // Room 1 holds the only button; it closes 0-1 and opens 0-2.
        // After pressing, the agent can only return to 0 by backtracking.
        let t = square_topology();
        let doors = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 0, 0],
            [0, 0, 1, 1],
            [0, 0, 1, 1],
        ]);
        let mut locations = BoolMatrix::new(4, 1);
        locations.set(1, 0, true);
        let mut behavior = BoolMatrix::square(4);
        behavior.set_symmetric(0, 1, true);
        behavior.set_symmetric(0, 2, true);

        let layout = LabLayout::from_parts(0, 3, t, doors, locations, vec![behavior]).unwrap();
        let solution = solve(&layout).unwrap();
        assert_eq!(
            solution.actions,
            vec![
                Action::Move(Direction::Right),
                Action::PressButton(0),
                Action::Backtrack,
                Action::Move(Direction::Down),
                Action::Move(Direction::Right),
            ]
        );
    }
}
