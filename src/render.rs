//! Terminal rendering of mazes and paths

use itertools::Itertools;

use crate::grid::{CellType, Coordinate, MazeGrid, Obstacles};
use crate::pathfinding::{Path, PathResult};

const S_BLOCK: char = '█';
const S_EMPTY: char = ' ';

const BG_OBSTACLE: &str = "\x1B[44m";
const BG_START: &str = "\x1B[42m";
const BG_DESTINATION: &str = "\x1B[41m";
const BG_PATH: &str = "\x1B[45m";
const RESET: &str = "\x1B[0m";

/// Plain maze, blocks for obstacles
pub fn render_maze(grid: &MazeGrid) -> String {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    CellType::Empty => S_EMPTY,
                    CellType::Obstacle => S_BLOCK,
                })
                .join("")
        })
        .join("\n")
}

/// Colored grid with obstacles, path and its endpoints highlighted
///
/// Obstacles are blue, start green, destination red and the rest of the
/// path magenta. Without a path only obstacles and endpoints are drawn.
pub fn render_path(
    width: usize,
    height: usize,
    obstacles: &Obstacles,
    path: Option<&Path>,
    start: Coordinate,
    destination: Coordinate,
) -> String {
    let on_path = path.map(Path::to_set).unwrap_or_default();

    (0..height as i32)
        .map(|y| {
            (0..width as i32)
                .map(|x| {
                    let at = Coordinate::new(x, y);
                    if obstacles.contains(&at) {
                        paint(BG_OBSTACLE, S_BLOCK)
                    } else if at == start {
                        paint(BG_START, S_EMPTY)
                    } else if at == destination {
                        paint(BG_DESTINATION, S_EMPTY)
                    } else if on_path.contains(&at) {
                        paint(BG_PATH, S_EMPTY)
                    } else {
                        S_EMPTY.to_string()
                    }
                })
                .join("")
        })
        .join("\n")
}

fn paint(background: &str, c: char) -> String {
    format!("{}{}{}", background, c, RESET)
}

/// One-line report of the search outcome
pub fn describe(result: &PathResult) -> String {
    match result {
        PathResult::Found(path) => format!("Path of {} steps found.", path.cost()),
        PathResult::Unreachable => "No path between start and destination.".to_string(),
    }
}
