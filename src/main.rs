//! CLI for maze generation and solving

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use log::info;
use maze_astar::{
    find_path, obstacles_of, render, Coordinate, MazeGenerator, MazeGrid, MovementMode,
};

/// Generate a random maze and find the shortest way through it with A*
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated maze width
    #[arg(long, default_value_t = 151)]
    width: usize,

    /// Generated maze height
    #[arg(long, default_value_t = 43)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Allowed steps between cells
    #[arg(short, long, value_enum, default_value_t = Mode::Straight)]
    mode: Mode,

    /// Pick start and destination at random among the rooms
    #[arg(short, long)]
    random_endpoints: bool,

    /// Print the bare maze before the solved one
    #[arg(short, long)]
    show_maze: bool,

    /// File, where to read the maze instead of generating one. Use `-` for stdin.
    file: Option<PathBuf>,
}

/// Movement mode as accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Four axis-aligned steps
    Straight,
    /// Axis-aligned and diagonal steps
    Diagonal,
}

impl From<Mode> for MovementMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Straight => MovementMode::Straight,
            Mode::Diagonal => MovementMode::Diagonal,
        }
    }
}

/// Read maze from file or stdin
fn read_maze(file: &Path) -> anyhow::Result<MazeGrid> {
    let text = if file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()))?
    };
    MazeGrid::parse(text.trim_matches(['\n', '\r']))
}

/// Start and destination: random rooms, or the two opposite room corners
fn pick_endpoints(
    generator: &mut MazeGenerator,
    maze: &MazeGrid,
    random: bool,
) -> anyhow::Result<(Coordinate, Coordinate)> {
    let no_rooms = || anyhow!("Maze has no room cells to start from");
    if random {
        let start = generator.random_room_cell(maze).ok_or_else(no_rooms)?;
        let destination = generator.random_room_cell(maze).ok_or_else(no_rooms)?;
        Ok((start, destination))
    } else {
        let destination = maze.far_room_corner().ok_or_else(no_rooms)?;
        Ok((Coordinate::new(1, 1), destination))
    }
}

/// Generate or read maze, solve it and print the result
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let mut generator = MazeGenerator::new(args.seed);

    let timer = Instant::now();
    let maze = match &args.file {
        Some(file) => read_maze(file)?,
        None => generator.generate(args.width, args.height),
    };
    let generation = timer.elapsed();
    info!(
        "Maze of {}x{} ready in {:?}",
        maze.width(),
        maze.height(),
        generation
    );

    if args.show_maze {
        println!("{}\n", render::render_maze(&maze));
    }

    let obstacles = obstacles_of(&maze);
    let (start, destination) = pick_endpoints(&mut generator, &maze, args.random_endpoints)?;

    let timer = Instant::now();
    let result = find_path(
        maze.width(),
        maze.height(),
        &obstacles,
        start,
        destination,
        args.mode.into(),
    )?;
    let search = timer.elapsed();
    info!("A* from {} to {} took {:?}", start, destination, search);

    println!(
        "{}",
        render::render_path(
            maze.width(),
            maze.height(),
            &obstacles,
            result.path(),
            start,
            destination
        )
    );
    println!("{}", render::describe(&result));
    println!(
        "Maze generation: {} ms | A*: {} ms",
        generation.as_millis(),
        search.as_millis()
    );
    Ok(())
}
