//! Carve a random perfect maze and find the shortest way through it
//!
//! Mazes are generated by depth-first recursive backtracking over the
//! odd-coordinate rooms of a grid. Paths are found with A* over any set of
//! obstacle coordinates, for example the walls of a generated maze.
//!
//! # Examples
//! ## Solving a generated maze
//! ```
//! use maze_astar::{find_path, obstacles_of, Coordinate, MazeGenerator, MovementMode};
//!
//! let maze = MazeGenerator::new(Some(7)).generate(21, 11);
//! let obstacles = obstacles_of(&maze);
//! let destination = maze.far_room_corner().unwrap();
//!
//! let result = find_path(
//!     maze.width(),
//!     maze.height(),
//!     &obstacles,
//!     Coordinate::new(1, 1),
//!     destination,
//!     MovementMode::Straight,
//! )
//! .unwrap();
//! let path = result.path().unwrap();
//! assert_eq!(path.start(), Coordinate::new(1, 1));
//! assert_eq!(path.destination(), destination);
//! ```
//!
//! ## Open grid (the shortest path is 8 steps)
//! ```
//! use maze_astar::{find_path, Coordinate, MovementMode, Obstacles};
//!
//! let result = find_path(
//!     5,
//!     5,
//!     &Obstacles::new(),
//!     Coordinate::new(0, 0),
//!     Coordinate::new(4, 4),
//!     MovementMode::Straight,
//! )
//! .unwrap();
//! assert_eq!(result.path().unwrap().cost(), 8);
//! ```
//!
//! ## Invalid endpoints
//! ```
//! use maze_astar::{find_path, Coordinate, MovementMode, Obstacles, PathError};
//!
//! let start = Coordinate::new(-1, 0);
//! let result = find_path(
//!     5,
//!     5,
//!     &Obstacles::new(),
//!     start,
//!     Coordinate::new(4, 4),
//!     MovementMode::Diagonal,
//! );
//! assert_eq!(result, Err(PathError::StartOutOfBounds(start)));
//! ```

pub mod grid;
pub mod maze_generator;
pub mod pathfinding;
pub mod render;

pub use grid::{obstacles_of, CellType, Coordinate, MazeGrid, Obstacles, Vector};
pub use maze_generator::{generate_maze, MazeGenerator};
pub use pathfinding::{find_path, MovementMode, Path, PathError, PathResult};
