//! Generate a maze, solve it with Dijkstra and A*, and print the result.
//!
//! Run: cargo run --bin mazepath-demo -- --size 24x12 --seed 7 --astar manhattan
//!
//! Set `RUST_LOG=debug` to see search and generation logs.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use mazepath_core::{GridConfig, Point};
use mazepath_demos::{GridSize, load_config, parse_size, render};
use mazepath_maze::{MazeGen, PASSAGE_WEIGHT, reset_maze};
use mazepath_paths::{Heuristic, Pathfinder, SearchResult};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Random maze generation and shortest-path search on a grid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON grid configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// A* heuristic: manhattan, octile, chebyshev or euclidean
    #[arg(long, default_value = "manhattan")]
    astar: Heuristic,

    /// Grid size as WIDTHxHEIGHT, overriding the config file
    #[arg(long, value_parser = parse_size)]
    size: Option<GridSize>,
}

fn summary(name: &str, r: &SearchResult) -> String {
    match r.cost() {
        Some(cost) => format!(
            "{name}: cost {cost}, {} steps, {} cells visited",
            r.path.len().saturating_sub(1),
            r.visited.len()
        ),
        None => format!("{name}: {:?}, {} cells visited", r.status, r.visited.len()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => GridConfig::with_size(24, 12),
    };
    if let Some(size) = args.size {
        cfg.width = size.width;
        cfg.height = size.height;
    }
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("maze {}x{}, seed {seed}", cfg.width, cfg.height);

    let mut maze = reset_maze(&cfg)?;
    let stats = MazeGen::with_config(StdRng::seed_from_u64(seed), &cfg).generate_maze(&mut maze)?;
    info!(
        "{} connections, {} rejected draws, fallback {}",
        stats.connections, stats.rejected, stats.fallback
    );

    let graph = &maze.graph;
    let start = graph.vertex_at(Point::ZERO);
    let end = graph.vertex_at(Point::new(cfg.width - 1, cfg.height - 1));

    let mut pf = Pathfinder::new();
    let dijkstra = pf.dijkstra(graph, start, end);
    let astar = pf.astar(graph, start, end, PASSAGE_WEIGHT, args.astar);

    print!("{}", render(graph, &maze.borders, &graph.positions(&astar.path)));
    println!("seed {seed}");
    println!("{}", summary("dijkstra", &dijkstra));
    println!("{}", summary(args.astar.label(PASSAGE_WEIGHT), &astar));
    Ok(())
}
