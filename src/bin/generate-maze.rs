//! CLI for maze generation

use clap::Parser;
use log::info;
use maze_astar::maze_generator::MazeGenerator;

/// Perfect maze generator, prints the maze as `#` and `.` text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated maze width
    #[arg(long, default_value_t = 41)]
    width: usize,

    /// Generated maze height
    #[arg(long, default_value_t = 21)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let maze = gen.generate(args.width, args.height);
    info!("Generated {} rooms", maze.room_count());
    println!("{}", maze.to_text());
    Ok(())
}
