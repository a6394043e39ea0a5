//! A* shortest path search over an obstacle grid

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::debug;
use thiserror::Error;

use crate::grid::{in_bounds, translate, Coordinate, Obstacles, Vector};

/// Allowed unit steps between cells
///
/// Every step costs 1, diagonal or not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementMode {
    /// Four axis-aligned steps
    #[default]
    Straight,
    /// Axis-aligned and diagonal steps
    Diagonal,
}

impl MovementMode {
    const STRAIGHT: [Vector; 4] = [
        Vector::new(0, 1),
        Vector::new(0, -1),
        Vector::new(1, 0),
        Vector::new(-1, 0),
    ];
    const DIAGONAL: [Vector; 8] = [
        Vector::new(0, 1),
        Vector::new(0, -1),
        Vector::new(1, 0),
        Vector::new(-1, 0),
        Vector::new(1, 1),
        Vector::new(1, -1),
        Vector::new(-1, -1),
        Vector::new(-1, 1),
    ];

    /// Successor directions, in the order they are expanded
    pub fn directions(self) -> &'static [Vector] {
        match self {
            Self::Straight => &Self::STRAIGHT,
            Self::Diagonal => &Self::DIAGONAL,
        }
    }

    /// Estimated remaining cost from `from` to `to`
    ///
    /// Manhattan distance for straight movement, Chebyshev distance for
    /// diagonal movement. Manhattan would overestimate once a single unit
    /// step can close both axes, and A* without reopening closed nodes
    /// would then miss shortest paths.
    pub fn heuristic(self, from: Coordinate, to: Coordinate) -> u32 {
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        match self {
            Self::Straight => dx + dy,
            Self::Diagonal => dx.max(dy),
        }
    }
}

/// Invalid input to [find_path], detected before any search work
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("Destination {0} is not in map")]
    DestinationOutOfBounds(Coordinate),
    #[error("Start {0} is not in map")]
    StartOutOfBounds(Coordinate),
    #[error("Start {0} cannot be an obstacle")]
    StartOnObstacle(Coordinate),
    #[error("Destination {0} cannot be an obstacle")]
    DestinationOnObstacle(Coordinate),
}

/// Path from start to destination, both included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Never empty
    steps: Vec<Coordinate>,
}

impl Path {
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.steps
    }

    /// Number of coordinates on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a path holds at least its start
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total movement cost, one per step
    pub fn cost(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn start(&self) -> Coordinate {
        self.steps[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.steps[self.steps.len() - 1]
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.steps.contains(&at)
    }

    /// Coordinates as a set, for repeated membership tests
    pub fn to_set(&self) -> HashSet<Coordinate> {
        self.steps.iter().copied().collect()
    }
}

/// Outcome of a valid search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Path found; a single coordinate when start equals destination
    Found(Path),
    /// Destination cannot be reached from start
    Unreachable,
}

impl PathResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// Cell reached by the search
struct SearchNode {
    at: Coordinate,
    /// Cost from start
    g: u32,
    /// `g` plus heuristic to destination
    f: u32,
    /// Arena index of predecessor
    parent: Option<usize>,
    closed: bool,
}

/// Find shortest path from `start` to `destination` with A*
///
/// The open set is a binary heap keyed by `(f, arena index)`. Arena
/// indices grow in insertion order and an improved node keeps its index, so
/// ties on `f` go to the earliest inserted node. Entries made stale by an
/// improvement are skipped when popped. Closed nodes are never reopened.
///
/// ## Arguments
/// - `width`, `height`: Grid dimensions.
/// - `obstacles`: Impassable coordinates.
/// - `start`, `destination`: Path endpoints.
/// - `mode`: Allowed steps, see [MovementMode].
///
/// Returns error if either endpoint is outside the grid or on an obstacle.
/// An unreachable destination is not an error but [PathResult::Unreachable].
pub fn find_path(
    width: usize,
    height: usize,
    obstacles: &Obstacles,
    start: Coordinate,
    destination: Coordinate,
    mode: MovementMode,
) -> Result<PathResult, PathError> {
    if !in_bounds(destination, width, height) {
        return Err(PathError::DestinationOutOfBounds(destination));
    }
    if !in_bounds(start, width, height) {
        return Err(PathError::StartOutOfBounds(start));
    }
    if obstacles.contains(&start) {
        return Err(PathError::StartOnObstacle(start));
    }
    if obstacles.contains(&destination) {
        return Err(PathError::DestinationOnObstacle(destination));
    }
    if start == destination {
        return Ok(PathResult::Found(Path { steps: vec![start] }));
    }

    let mut nodes = vec![SearchNode {
        at: start,
        g: 0,
        f: mode.heuristic(start, destination),
        parent: None,
        closed: false,
    }];
    let mut index = HashMap::from([(start, 0)]);
    let mut open = BinaryHeap::from([Reverse((nodes[0].f, 0))]);
    let mut expanded = 0;

    while let Some(Reverse((f, current))) = open.pop() {
        if nodes[current].closed || nodes[current].f != f {
            continue;
        }
        if nodes[current].at == destination {
            let path = reconstruct_path(&nodes, current);
            debug!(
                "Path {} -> {} of cost {} after expanding {} nodes",
                start,
                destination,
                path.cost(),
                expanded
            );
            return Ok(PathResult::Found(path));
        }
        nodes[current].closed = true;
        expanded += 1;

        let (here, tentative_g) = (nodes[current].at, nodes[current].g + 1);
        for &direction in mode.directions() {
            let Some(successor) = translate(here, direction) else {
                continue;
            };
            if !in_bounds(successor, width, height) || obstacles.contains(&successor) {
                continue;
            }
            let h = mode.heuristic(successor, destination);

            if let Some(&seen) = index.get(&successor) {
                let node = &mut nodes[seen];
                if node.closed || tentative_g >= node.g {
                    continue;
                }
                node.parent = Some(current);
                node.g = tentative_g;
                node.f = tentative_g + h;
                open.push(Reverse((node.f, seen)));
            } else {
                let added = nodes.len();
                nodes.push(SearchNode {
                    at: successor,
                    g: tentative_g,
                    f: tentative_g + h,
                    parent: Some(current),
                    closed: false,
                });
                index.insert(successor, added);
                open.push(Reverse((tentative_g + h, added)));
            }
        }
    }

    debug!(
        "No path {} -> {} after expanding {} nodes",
        start, destination, expanded
    );
    Ok(PathResult::Unreachable)
}

/// Follow predecessor links from `last` back to the start
fn reconstruct_path(nodes: &[SearchNode], last: usize) -> Path {
    let mut steps = Vec::new();
    let mut cursor = Some(last);
    while let Some(i) = cursor {
        steps.push(nodes[i].at);
        cursor = nodes[i].parent;
    }
    steps.reverse();
    Path { steps }
}
