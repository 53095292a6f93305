//! pathviz: headless shell for the grid search engine.
//!
//! Builds a board from a file and/or command-line edits, runs one search on
//! the background worker while polling the board like a frame loop would,
//! then prints the final board and the outcome.
//!
//! Run: cargo run -- -t 0,0 -t 19,19 -a astar

mod cli;

use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::Parser;
use pathviz_core::TileKind;
use pathviz_paths::{ControllerError, SearchController};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cli::Cli;

/// Polling interval of the frame loop.
const FRAME: Duration = Duration::from_millis(1000 / 60);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    let mut controller = SearchController::new(cli.size, cli.search_config())?;

    if let Some(path) = &cli.load {
        controller.load(path)?;
        log::info!("loaded board {}", path.display());
    }
    if let Some(density) = cli.random_blocks {
        let placed = scatter_blocks(&controller, density, cli.seed)?;
        log::info!("scattered {placed} blocks (seed {})", cli.seed);
    }
    for &p in &cli.blocks {
        controller.set_tile(p, TileKind::Block)?;
    }
    for &p in &cli.targets {
        controller.set_tile(p, TileKind::Target)?;
    }
    if let Some(path) = &cli.save {
        controller.save(path)?;
        log::info!("saved board to {}", path.display());
    }

    if cli.no_search {
        print!("{}", controller.snapshot());
        return Ok(());
    }

    controller.start()?;
    let mut frames = 0u64;
    while controller.is_running() {
        thread::sleep(FRAME);
        frames += 1;
        if cli.watch {
            println!("{}", controller.snapshot());
        }
    }
    log::debug!("search took {frames} frames");

    let outcome = controller.wait().cloned();
    print!("{}", controller.snapshot());
    if let Some(outcome) = outcome {
        println!("{outcome}");
    }
    Ok(())
}

/// Turn each empty tile into a block with probability `density`.
///
/// `density` is clamped to `0..=1`; NaN places nothing. Returns the number
/// of blocks placed.
fn scatter_blocks(
    controller: &SearchController,
    density: f64,
    seed: u64,
) -> Result<usize, ControllerError> {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    let mut rng = StdRng::seed_from_u64(seed);
    let empty = controller.snapshot().positions_of(TileKind::Empty);
    let mut placed = 0;
    for p in empty {
        if rng.random_bool(density) {
            controller.set_tile(p, TileKind::Block)?;
            placed += 1;
        }
    }
    Ok(placed)
}
