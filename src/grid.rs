use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::matrix::BoolMatrix;

/// Grid position of a room.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RoomCoord {
    pub row: usize,
    pub col: usize,
}

impl RoomCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Compass moves, in action-encoding order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// (row delta, col delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
        }
    }
}

/// Square room grid of `size * size` rooms, indexed `row * size + col`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
}

impl Grid {
    /// Fails unless `rooms` is a non-zero perfect square.
    pub fn for_rooms(rooms: usize) -> Result<Self, LabError> {
        let size = integer_sqrt(rooms);
        if rooms == 0 || size * size != rooms {
            return Err(LabError::config(format!(
                "number of rooms must be a perfect square, got {rooms}"
            )));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn room_count(&self) -> usize {
        self.size * self.size
    }

    pub fn coord(&self, index: usize) -> RoomCoord {
        RoomCoord::new(index / self.size, index % self.size)
    }

    pub fn index(&self, coord: RoomCoord) -> usize {
        coord.row * self.size + coord.col
    }

    pub fn contains(&self, coord: RoomCoord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// The room one step away in `dir`, or `None` when that leaves the grid.
    pub fn step(&self, index: usize, dir: Direction) -> Option<usize> {
        let c = self.coord(index);
        let (dr, dc) = dir.delta();
        let row = c.row.checked_add_signed(dr)?;
        let col = c.col.checked_add_signed(dc)?;
        let target = RoomCoord::new(row, col);
        self.contains(target).then(|| self.index(target))
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(index, dir).map(|n| (dir, n)))
    }

    /// Every grid-adjacent unordered pair `(i, j)` with `i < j`, ascending.
    pub fn adjacent_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.room_count() {
            let mut ahead: Vec<usize> = self
                .neighbors(i)
                .map(|(_, n)| n)
                .filter(|&n| n > i)
                .collect();
            ahead.sort_unstable();
            pairs.extend(ahead.into_iter().map(|j| (i, j)));
        }
        pairs
    }

    /// Grid neighbour mask with self loops.
    pub fn adjacency(&self) -> BoolMatrix {
        let mut adj = BoolMatrix::identity(self.room_count());
        for (i, j) in self.adjacent_pairs() {
            adj.set_symmetric(i, j, true);
        }
        adj
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s.checked_mul(s).map_or(true, |sq| sq > n) {
        s -= 1;
    }
    while (s + 1).checked_mul(s + 1).is_some_and(|sq| sq <= n) {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_square_room_counts_are_rejected() {
        for rooms in [0, 2, 3, 5, 8, 15] {
            assert!(
                matches!(Grid::for_rooms(rooms), Err(LabError::Configuration(_))),
                "rooms={rooms}"
            );
        }
        assert_eq!(Grid::for_rooms(16).unwrap().size(), 4);
    }

    #[test]
    fn huge_room_counts_do_not_overflow() {
        assert!(matches!(
            Grid::for_rooms(usize::MAX),
            Err(LabError::Configuration(_))
        ));
        assert_eq!(integer_sqrt(usize::MAX), u32::MAX as usize);
        let side = 1usize << 31;
        assert_eq!(Grid::for_rooms(side * side).map(|g| g.size()).ok(), Some(side));
    }

    #[test]
    fn coords_round_trip() {
        let grid = Grid::for_rooms(25).unwrap();
        for r in 0..5 {
            for c in 0..5 {
                let coord = RoomCoord::new(r, c);
                assert_eq!(grid.coord(grid.index(coord)), coord);
            }
        }
        for i in 0..25 {
            assert_eq!(grid.index(grid.coord(i)), i);
        }
    }

    #[test]
    fn steps_off_the_edge_are_none() {
        let grid = Grid::for_rooms(9).unwrap();
        assert_eq!(grid.step(0, Direction::Up), None);
        assert_eq!(grid.step(0, Direction::Left), None);
        assert_eq!(grid.step(0, Direction::Right), Some(1));
        assert_eq!(grid.step(0, Direction::Down), Some(3));
        assert_eq!(grid.step(8, Direction::Right), None);
        assert_eq!(grid.step(2, Direction::Right), None);
    }

    #[test]
    fn adjacency_is_symmetric_with_self_loops() {
        let grid = Grid::for_rooms(9).unwrap();
        let adj = grid.adjacency();
        assert!(adj.is_symmetric());
        assert!(adj.diagonal_is(true));
        // 3x3 grid has 12 undirected edges
        assert_eq!(grid.adjacent_pairs().len(), 12);
        assert!(adj.get(0, 1));
        assert!(!adj.get(2, 3));
        assert!(!adj.get(0, 4));
    }

    #[test]
    fn neighbours_follow_action_order() {
        let grid = Grid::for_rooms(9).unwrap();
        let around: Vec<_> = grid.neighbors(4).collect();
        assert_eq!(
            around,
            vec![
                (Direction::Right, 5),
                (Direction::Up, 1),
                (Direction::Left, 3),
                (Direction::Down, 7),
            ]
        );
        assert_eq!(grid.neighbors(0).count(), 2);
    }
}
