//! Grid vocabulary shared by maze generation and pathfinding

use std::collections::HashSet;
use std::fmt;

use anyhow::{anyhow, bail};
use itertools::Itertools;

/// Location on the grid
///
/// Signed, so that positions left of or above the grid can be expressed
/// and rejected by bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell exactly halfway between two cells
    pub fn midpoint(a: Self, b: Self) -> Self {
        Self::new((a.x + b.x).div_euclid(2), (a.y + b.y).div_euclid(2))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Displacement between two coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
}

impl Vector {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Move `from` by `by`, `None` if the result leaves the `i32` range
pub fn translate(from: Coordinate, by: Vector) -> Option<Coordinate> {
    Some(Coordinate::new(
        from.x.checked_add(by.dx)?,
        from.y.checked_add(by.dy)?,
    ))
}

/// Whether `at` lies within a `width` x `height` grid anchored at the origin
pub fn in_bounds(at: Coordinate, width: usize, height: usize) -> bool {
    usize::try_from(at.x).is_ok_and(|x| x < width)
        && usize::try_from(at.y).is_ok_and(|y| y < height)
}

/// Contents of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    Empty,
    /// Impassable, both for carving and for searching
    Obstacle,
}

/// Set of impassable coordinates handed to the pathfinder
pub type Obstacles = HashSet<Coordinate>;

/// Rectangular grid of cells with dimensions fixed at construction
///
/// Cells whose coordinates are both odd are *rooms*; every other cell is a
/// wall that the maze generator may carve open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    /// Row-major cell storage, `y * width + x`
    cells: Vec<CellType>,
}

impl MazeGrid {
    const S_OBSTACLE: char = '#';
    const S_EMPTY: char = '.';
    const S_BLOCK: char = '█';
    const S_SPACE: char = ' ';

    /// Grid of the given size with every cell set to [CellType::Obstacle]
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellType::Obstacle; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, at: Coordinate) -> bool {
        in_bounds(at, self.width, self.height)
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        if self.in_bounds(at) {
            Some(at.y as usize * self.width + at.x as usize)
        } else {
            None
        }
    }

    /// Cell at `at`, or `None` when out of bounds
    pub fn get(&self, at: Coordinate) -> Option<CellType> {
        self.index(at).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `at`, returning the previous contents
    ///
    /// Out-of-bounds writes are ignored and return `None`.
    pub fn set(&mut self, at: Coordinate, cell: CellType) -> Option<CellType> {
        let i = self.index(at)?;
        Some(std::mem::replace(&mut self.cells[i], cell))
    }

    /// Whether `at` is an in-bounds cell with both coordinates odd
    pub fn is_room(&self, at: Coordinate) -> bool {
        self.in_bounds(at) && at.x % 2 == 1 && at.y % 2 == 1
    }

    /// Number of room cells, carved or not
    pub fn room_count(&self) -> usize {
        (self.width / 2) * (self.height / 2)
    }

    /// All room cells, row by row
    pub fn room_cells(&self) -> impl Iterator<Item = Coordinate> {
        let (columns, rows) = ((self.width / 2) as i32, (self.height / 2) as i32);
        (0..rows).flat_map(move |j| {
            (0..columns).map(move |i| Coordinate::new(2 * i + 1, 2 * j + 1))
        })
    }

    /// Room cell furthest from the origin, `None` if the grid has no rooms
    pub fn far_room_corner(&self) -> Option<Coordinate> {
        if self.room_count() == 0 {
            return None;
        }
        Some(Coordinate::new(
            (self.width / 2 * 2 - 1) as i32,
            (self.height / 2 * 2 - 1) as i32,
        ))
    }

    /// Every cell with its coordinate, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellType)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coordinate::new((i % width) as i32, (i / width) as i32), *cell))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Plain text representation, `#` for obstacles and `.` for empty cells
    ///
    /// The output is accepted by [Self::parse].
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellType::Empty => Self::S_EMPTY,
                        CellType::Obstacle => Self::S_OBSTACLE,
                    })
                    .join("")
            })
            .join("\n")
    }

    /// Parse a grid from its text representation
    ///
    /// Accepts `#` or `█` for obstacles and `.` or a space for empty cells.
    /// Returns error for empty input, rows of unequal length and unknown
    /// characters.
    ///
    /// # Examples
    /// ```
    /// use maze_astar::{CellType, Coordinate, MazeGrid};
    ///
    /// let grid = MazeGrid::parse("###\n#.#\n###").unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.get(Coordinate::new(1, 1)), Some(CellType::Empty));
    /// ```
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let rows: Vec<Vec<char>> = text.lines().map(|row| row.chars().collect()).collect();
        let width = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| anyhow!("Maze text is empty"))?;
        if width == 0 {
            bail!("First maze row is empty");
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                bail!("Row {} has {} cells, expected {}", y, row.len(), width);
            }
            for (x, c) in row.iter().enumerate() {
                cells.push(match *c {
                    Self::S_OBSTACLE | Self::S_BLOCK => CellType::Obstacle,
                    Self::S_EMPTY | Self::S_SPACE => CellType::Empty,
                    val => bail!("Unexpected character `{}` at x={}, y={}", val, x, y),
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }
}

/// Every coordinate of `grid` whose cell is an obstacle
pub fn obstacles_of(grid: &MazeGrid) -> Obstacles {
    grid.cells()
        .filter(|(_, cell)| *cell == CellType::Obstacle)
        .map(|(at, _)| at)
        .collect()
}
