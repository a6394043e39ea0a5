//! Perfect maze generation

use std::collections::HashSet;

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::grid::{translate, CellType, Coordinate, MazeGrid, Vector};

/// Room in the spanning tree under construction
struct Chamber {
    at: Coordinate,
    /// Chamber to backtrack to once this one is exhausted. Starts as the
    /// chamber this one was carved from and is shortened past exhausted
    /// ancestors by [MazeGenerator::backtrack].
    back: Option<usize>,
}

/// Maze generator with its own random source.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Two-step moves between neighbouring rooms
    const DIRECTIONS: [Vector; 4] = [
        Vector::new(0, 2),
        Vector::new(0, -2),
        Vector::new(2, 0),
        Vector::new(-2, 0),
    ];
    const START: Coordinate = Coordinate::new(1, 1);

    /// Create generator, seeded for reproducible mazes or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate perfect maze (exactly one path between any two rooms)
    ///
    /// Depth-first recursive backtracking over the rooms, starting from
    /// (1, 1). The carver only ever joins a visited room to an unvisited
    /// one, so the carved cells form a spanning tree over all rooms. Grids
    /// without rooms are returned as solid obstacle.
    pub fn generate(&mut self, width: usize, height: usize) -> MazeGrid {
        let mut grid = MazeGrid::filled(width, height);
        let total = grid.room_count();
        if total == 0 {
            debug!("{}x{} grid has no rooms, nothing to carve", width, height);
            return grid;
        }
        for room in grid.room_cells() {
            grid.set(room, CellType::Empty);
        }

        let mut visited = HashSet::from([Self::START]);
        let mut tree = vec![Chamber {
            at: Self::START,
            back: None,
        }];
        let mut stack = vec![0];
        let mut backtracks = 0;

        while let Some(current) = stack.pop() {
            let here = tree[current].at;
            let candidates = Self::unvisited_neighbours(&grid, &visited, here);

            if let Some(&next) = candidates.choose(&mut self.random) {
                grid.set(Coordinate::midpoint(here, next), CellType::Empty);
                grid.set(next, CellType::Empty);
                visited.insert(next);
                tree.push(Chamber {
                    at: next,
                    back: Some(current),
                });
                stack.push(tree.len() - 1);
            } else if visited.len() < total {
                if let Some(resume) = Self::backtrack(&grid, &visited, &mut tree, current) {
                    backtracks += 1;
                    stack.push(resume);
                }
            }
        }

        debug!(
            "Carved {}x{} maze: {} rooms, {} backtracks",
            width,
            height,
            visited.len(),
            backtracks
        );
        grid
    }

    /// Rooms two steps away from `here` that have not been visited yet
    fn unvisited_neighbours(
        grid: &MazeGrid,
        visited: &HashSet<Coordinate>,
        here: Coordinate,
    ) -> Vec<Coordinate> {
        Self::DIRECTIONS
            .iter()
            .filter_map(|&direction| translate(here, direction))
            .filter(|room| grid.is_room(*room) && !visited.contains(room))
            .collect()
    }

    /// Walk up the tree from `from` to the closest chamber that still has
    /// unvisited neighbours.
    ///
    /// Every room left behind by backtracking is exhausted, so while
    /// unvisited rooms remain one of the ancestors has an unvisited
    /// neighbour. `None` only if the chain ends at the root.
    ///
    /// Exhausted chambers never regain unvisited neighbours, so every
    /// chamber walked past is linked straight to the result. Later walks
    /// skip them and the total backtracking work stays linear.
    fn backtrack(
        grid: &MazeGrid,
        visited: &HashSet<Coordinate>,
        tree: &mut [Chamber],
        from: usize,
    ) -> Option<usize> {
        let mut passed = vec![from];
        let mut cursor = tree[from].back;
        while let Some(i) = cursor {
            if !Self::unvisited_neighbours(grid, visited, tree[i].at).is_empty() {
                break;
            }
            trace!("Backtracking past {}", tree[i].at);
            passed.push(i);
            cursor = tree[i].back;
        }
        for i in passed {
            tree[i].back = cursor;
        }
        cursor
    }

    /// Pick a room cell uniformly at random, `None` if there are no rooms
    pub fn random_room_cell(&mut self, grid: &MazeGrid) -> Option<Coordinate> {
        let rooms: Vec<Coordinate> = grid.room_cells().collect();
        rooms.choose(&mut self.random).copied()
    }
}

/// Generate perfect maze with an entropy-seeded generator
pub fn generate_maze(width: usize, height: usize) -> MazeGrid {
    MazeGenerator::new(None).generate(width, height)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use proptest::prelude::*;

    use crate::grid::{translate, CellType, Coordinate, MazeGrid, Vector};
    use crate::maze_generator::{generate_maze, Chamber, MazeGenerator};

    /// Empty cells reachable from (1, 1) by unit steps
    fn reachable(grid: &MazeGrid) -> HashSet<Coordinate> {
        let start = Coordinate::new(1, 1);
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(at) = queue.pop_front() {
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let Some(next) = translate(at, Vector::new(dx, dy)) else {
                    continue;
                };
                if grid.get(next) == Some(CellType::Empty) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn assert_perfect(grid: &MazeGrid) {
        let empty: HashSet<Coordinate> = grid
            .cells()
            .filter(|(_, cell)| *cell == CellType::Empty)
            .map(|(at, _)| at)
            .collect();
        let rooms: HashSet<Coordinate> = grid.room_cells().collect();
        assert!(rooms.is_subset(&empty), "every room is carved");

        let openings = empty.difference(&rooms).count();
        assert_eq!(openings, rooms.len() - 1, "spanning tree edge count");

        for at in &empty {
            assert!(at.x % 2 == 1 || at.y % 2 == 1, "wall junction {at} carved");
        }
        assert_eq!(reachable(grid), empty, "every carved cell is connected");
    }

    #[test]
    fn generates_perfect_maze() {
        let mut gen = MazeGenerator::new(Some(0));
        let grid = gen.generate(21, 15);
        assert_eq!((grid.width(), grid.height()), (21, 15));
        assert_perfect(&grid);
    }

    #[test]
    fn generates_perfect_maze_with_even_sides() {
        let mut gen = MazeGenerator::new(Some(3));
        let grid = gen.generate(10, 8);
        assert_perfect(&grid);
        assert_eq!(grid.get(Coordinate::new(9, 7)), Some(CellType::Empty));
    }

    #[test]
    fn border_stays_solid_on_odd_sides() {
        let grid = MazeGenerator::new(Some(11)).generate(15, 9);
        for (at, cell) in grid.cells() {
            if at.x == 0 || at.y == 0 || at.x == 14 || at.y == 8 {
                assert_eq!(cell, CellType::Obstacle, "border cell {at}");
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let first = MazeGenerator::new(Some(42)).generate(31, 17);
        let second = MazeGenerator::new(Some(42)).generate(31, 17);
        assert_eq!(first, second);
    }

    #[test]
    fn single_room_grid() {
        let grid = generate_maze(3, 3);
        let empty: Vec<Coordinate> = grid
            .cells()
            .filter(|(_, cell)| *cell == CellType::Empty)
            .map(|(at, _)| at)
            .collect();
        assert_eq!(empty, vec![Coordinate::new(1, 1)]);
    }

    #[test]
    fn roomless_grid_is_solid() {
        for (w, h) in [(0, 0), (1, 1), (1, 7), (6, 1)] {
            let grid = generate_maze(w, h);
            assert_eq!((grid.width(), grid.height()), (w, h));
            assert!(grid.cells().all(|(_, cell)| cell == CellType::Obstacle));
        }
    }

    #[test]
    fn backtrack_links_exhausted_chambers_to_resume_point() {
        // Corridor of rooms (3, 1) -> (5, 1) -> (7, 1); (1, 1) still unvisited
        let grid = MazeGenerator::new(Some(0)).generate(9, 3);
        let visited = HashSet::from([
            Coordinate::new(3, 1),
            Coordinate::new(5, 1),
            Coordinate::new(7, 1),
        ]);
        let mut tree = vec![
            Chamber {
                at: Coordinate::new(3, 1),
                back: None,
            },
            Chamber {
                at: Coordinate::new(5, 1),
                back: Some(0),
            },
            Chamber {
                at: Coordinate::new(7, 1),
                back: Some(1),
            },
        ];

        let resume = MazeGenerator::backtrack(&grid, &visited, &mut tree, 2);
        assert_eq!(resume, Some(0));
        assert_eq!(tree[1].back, Some(0));
        assert_eq!(tree[2].back, Some(0));

        let everything: HashSet<Coordinate> = grid.room_cells().collect();
        assert_eq!(
            MazeGenerator::backtrack(&grid, &everything, &mut tree, 2),
            None
        );
        assert_eq!(tree[2].back, None);
    }

    #[test]
    fn large_maze_is_perfect() {
        let grid = MazeGenerator::new(Some(21)).generate(301, 201);
        assert_perfect(&grid);
    }

    #[test]
    fn random_room_cell_is_room() {
        let mut gen = MazeGenerator::new(Some(5));
        let grid = gen.generate(13, 13);
        for _ in 0..20 {
            let room = gen.random_room_cell(&grid).unwrap();
            assert!(grid.is_room(room));
        }
        assert_eq!(gen.random_room_cell(&MazeGrid::filled(1, 1)), None);
    }

    proptest! {
        #[test]
        fn any_maze_is_perfect(width in 2usize..40, height in 2usize..40, seed: u64) {
            let grid = MazeGenerator::new(Some(seed)).generate(width, height);
            assert_perfect(&grid);
        }
    }
}
