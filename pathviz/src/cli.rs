//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pathviz_core::Point;
use pathviz_paths::{Algorithm, Pacing, SearchConfig};

/// Board side length used when no board file is given.
pub const DEFAULT_SIZE: i32 = 20;

#[derive(Parser, Debug)]
#[command(name = "pathviz")]
#[command(
    version,
    about = "Animate BFS and A* shortest-path search on a square grid"
)]
pub struct Cli {
    /// Board side length when no board file is loaded
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: i32,

    /// Board file to start from (*.pth)
    #[arg(short, long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Place a block, as `x,y` (repeatable)
    #[arg(short, long = "block", value_name = "X,Y", value_parser = parse_point)]
    pub blocks: Vec<Point>,

    /// Place a target, as `x,y` (repeatable)
    #[arg(short, long = "target", value_name = "X,Y", value_parser = parse_point)]
    pub targets: Vec<Point>,

    /// Scatter blocks over empty tiles with this probability (0..=1)
    #[arg(long, value_name = "P", value_parser = parse_probability)]
    pub random_blocks: Option<f64>,

    /// Seed for --random-blocks
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Search algorithm: bfs or astar
    #[arg(short, long, default_value_t = Algorithm::Bfs)]
    pub algorithm: Algorithm,

    /// Allow diagonal moves (A* always moves diagonally)
    #[arg(short, long)]
    pub diagonal: bool,

    /// Pause between expansion steps, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5)]
    pub step_delay_ms: u64,

    /// Time over which a found path is revealed, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub path_budget_ms: u64,

    /// Save the board (blocks and targets) to this file before searching
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Print the board every frame while the search runs
    #[arg(short, long)]
    pub watch: bool,

    /// Only build, print and save the board
    #[arg(long)]
    pub no_search: bool,
}

impl Cli {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            algorithm: self.algorithm,
            diagonal: self.diagonal,
            pacing: Pacing {
                step_delay: Duration::from_millis(self.step_delay_ms),
                path_draw_budget: Duration::from_millis(self.path_budget_ms),
            },
        }
    }
}

/// Parse `x,y` into a point.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got \u{201c}{s}\u{201d}"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("bad x in \u{201c}{s}\u{201d}: {e}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("bad y in \u{201c}{s}\u{201d}: {e}"))?;
    Ok(Point::new(x, y))
}

/// Parse a probability in `0..=1`.
fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("bad probability \u{201c}{s}\u{201d}: {e}"))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(format!("probability must be within 0..=1, got {s}"));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 0, 12"), Ok(Point::new(0, 12)));
        assert!(parse_point("3;4").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["pathviz"]).unwrap();
        assert_eq!(cli.size, DEFAULT_SIZE);
        assert_eq!(cli.search_config().algorithm, Algorithm::Bfs);
        assert_eq!(cli.search_config().pacing, Pacing::default());
    }

    #[test]
    fn full_command_line() {
        let cli = Cli::try_parse_from([
            "pathviz", "-s", "8", "-t", "0,0", "-t", "7,7", "-b", "3,3", "-a", "astar", "-d",
            "--step-delay-ms", "0",
        ])
        .unwrap();
        assert_eq!(cli.targets, vec![Point::new(0, 0), Point::new(7, 7)]);
        assert_eq!(cli.blocks, vec![Point::new(3, 3)]);
        let config = cli.search_config();
        assert_eq!(config.algorithm, Algorithm::Astar);
        assert!(config.diagonal);
        assert_eq!(config.pacing.step_delay, Duration::ZERO);
    }

    #[test]
    fn probabilities() {
        assert_eq!(parse_probability("0.25"), Ok(0.25));
        assert_eq!(parse_probability("1"), Ok(1.0));
        assert!(parse_probability("NaN").is_err());
        assert!(parse_probability("inf").is_err());
        assert!(parse_probability("1.5").is_err());
        assert!(parse_probability("-0.1").is_err());
        assert!(Cli::try_parse_from(["pathviz", "--random-blocks", "nan"]).is_err());
    }

    #[test]
    fn unknown_algorithm_rejected() {
        assert!(Cli::try_parse_from(["pathviz", "-a", "dfs"]).is_err());
    }
}
