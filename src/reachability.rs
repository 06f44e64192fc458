use std::collections::{HashSet, VecDeque};

use crate::grid::Grid;
use crate::matrix::BoolMatrix;

/// BFS over passages from `start`, ignoring doors and buttons.
///
/// Walks every `true` cell of the topology row, so any symmetric room graph
/// works, grid-shaped or not.
pub fn is_reachable(topology: &BoolMatrix, start: usize, goal: usize) -> bool {
    let n = topology.rows();
    search(n, start, goal, move |room| {
        (0..n).filter(move |&other| topology.get(room, other))
    })
}

/// Same answer as [`is_reachable`] for grid-masked topologies, probing only
/// the (at most four) grid neighbours of each room. This is the cheap
/// pre-filter the generator runs before any door or button is drawn.
pub fn is_reachable_on_grid(grid: &Grid, topology: &BoolMatrix, start: usize, goal: usize) -> bool {
    search(grid.room_count(), start, goal, move |room| {
        grid.neighbors(room)
            .map(|(_, neighbor)| neighbor)
            .filter(move |&neighbor| topology.get(room, neighbor))
    })
}

fn search<I>(rooms: usize, start: usize, goal: usize, passages: impl Fn(usize) -> I) -> bool
where
    I: Iterator<Item = usize>,
{
    if start >= rooms || goal >= rooms {
        return false;
    }

    let mut visited: HashSet<usize> = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return true;
        }
        for neighbor in passages(current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::LabRng;
    use crate::topology::build_topology;

    #[test]
    fn chain_is_reachable() {
        let t = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 1, 0],
            [0, 1, 1, 1],
            [0, 0, 1, 1],
        ]);
        assert!(is_reachable(&t, 0, 3));
        assert!(is_reachable(&t, 3, 0));
    }

    #[test]
    fn isolated_rooms_are_not_reachable() {
        let t = BoolMatrix::identity(4);
        assert!(!is_reachable(&t, 0, 3));
        assert!(is_reachable(&t, 2, 2));

        let grid = Grid::for_rooms(4).unwrap();
        assert!(!is_reachable_on_grid(&grid, &t, 0, 3));
    }

    #[test]
    fn out_of_range_rooms_are_unreachable() {
        let t = BoolMatrix::identity(4);
        assert!(!is_reachable(&t, 0, 9));
        assert!(!is_reachable_on_grid(&Grid::for_rooms(4).unwrap(), &t, 0, 9));
    }

    #[test]
    fn grid_walk_only_follows_neighbour_passages() {
        // 2x2 grid: 0-1, 1-3 and 2-3 open
        let grid = Grid::for_rooms(4).unwrap();
        let t = BoolMatrix::from_bits(&[
            [1, 1, 0, 0],
            [1, 1, 0, 1],
            [0, 0, 1, 1],
            [0, 1, 1, 1],
        ]);
        assert!(is_reachable_on_grid(&grid, &t, 0, 2));

        // 0 and 3 sit diagonally; a stray cell linking them is never walked.
        let mut stray = BoolMatrix::identity(4);
        stray.set_symmetric(0, 3, true);
        assert!(!is_reachable_on_grid(&grid, &stray, 0, 3));
        assert!(is_reachable(&stray, 0, 3));
    }

    #[test]
    fn grid_walk_agrees_on_generated_topologies() {
        let grid = Grid::for_rooms(25).unwrap();
        let mut rng = LabRng::new(17);
        for _ in 0..30 {
            let t = build_topology(&grid, &mut rng);
            for goal in [4, 12, 20, 24] {
                assert_eq!(
                    is_reachable_on_grid(&grid, &t, 0, goal),
                    is_reachable(&t, 0, goal)
                );
            }
        }
    }
}
