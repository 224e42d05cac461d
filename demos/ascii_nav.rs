//! Terminal demo: build a navigation grid from an ASCII map, queue a few
//! path requests, and walk an agent along each result.
//!
//! Run: cargo run --bin ascii-nav -- --requests 3 --verbose

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use gridnav_core::Vec2;
use gridnav_demos::{AsciiMap, DEFAULT_MAP, with_map_terrain};
use gridnav_paths::{
    NavConfig, NavGrid, Path, PathFinder, PathFollower, PathRequestQueue, PathResult,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Distance an agent covers per tick at full speed.
const AGENT_SPEED: f32 = 0.25;
const MAX_TICKS: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "ascii-nav")]
#[command(about = "Grid navigation over an ASCII map", long_about = None)]
struct Args {
    /// ASCII map file (built-in map when omitted)
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// JSON navigation config; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random start/goal pairs to request, on top of the map's S -> G
    #[arg(short = 'n', long, default_value_t = 2)]
    requests: usize,

    /// Seed for the random requests
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<NavConfig> {
    let Some(path) = path else {
        return Ok(with_map_terrain(NavConfig::default()));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn random_walkable(grid: &NavGrid, rng: &mut StdRng) -> Option<Vec2> {
    let open: Vec<Vec2> = grid
        .cells()
        .iter()
        .filter(|c| c.walkable)
        .map(|c| c.world_position)
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Drive a point agent along `path` until the follower reports the finish.
fn walk(path: Path, start: Vec2) -> (Vec<Vec2>, usize) {
    let mut follower = PathFollower::new(path);
    let mut position = start;
    let mut trail = vec![start];
    for tick in 0..MAX_TICKS {
        let steering = follower.update(position);
        if steering.finished {
            return (trail, tick);
        }
        position = position + steering.velocity(position, AGENT_SPEED);
        trail.push(position);
    }
    log::warn!("agent gave up after {MAX_TICKS} ticks at {position}");
    (trail, MAX_TICKS)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "gridnav_paths=trace,ascii_nav=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let map = match &args.map {
        Some(path) => AsciiMap::from_file(path)?,
        None => AsciiMap::parse(DEFAULT_MAP)?,
    };
    let config = map.nav_config(load_config(args.config.as_deref())?);
    let grid = NavGrid::build(&config, &map, &map)?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("request seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut pairs = Vec::new();
    if let (Some(start), Some(goal)) = (map.start(), map.goal()) {
        pairs.push((start, goal));
    }
    for _ in 0..args.requests {
        if let (Some(start), Some(goal)) = (
            random_walkable(&grid, &mut rng),
            random_walkable(&grid, &mut rng),
        ) {
            pairs.push((start, goal));
        }
    }

    let results: Rc<RefCell<Vec<(Vec2, Vec2, PathResult)>>> = Rc::default();
    let mut queue = PathRequestQueue::with_finder(PathFinder::new(&grid));
    for &(start, goal) in &pairs {
        let results = Rc::clone(&results);
        queue.request(start, goal, move |result| {
            results.borrow_mut().push((start, goal, result));
        });
    }
    let served = queue.process_all(&grid)?;
    log::info!("served {served} path requests");

    for (start, goal, result) in results.borrow_mut().drain(..) {
        println!("{start} -> {goal}");
        let Some(path) = Path::from_config(result.waypoints.clone(), start, &config) else {
            println!("  no path\n");
            continue;
        };
        let (trail, ticks) = walk(path, start);
        let end = trail.last().copied().unwrap_or(start);
        println!(
            "  {} waypoints, {ticks} ticks, stopped {:.2} from goal",
            result.waypoints.len(),
            end.distance(goal)
        );
        println!("{}", map.render(&result.waypoints, &trail));
    }
    Ok(())
}
