use anyhow::{bail, Context, Result};
use app::{App, BlackPlayer, Settings};
use chess_core::engine::config::{EngineConfig, EvaluatorKind};
use chess_core::engine::Algorithm;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Minimax,
    AlphaBeta,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Minimax => Self::Minimax,
            AlgorithmArg::AlphaBeta => Self::AlphaBeta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EvaluatorArg {
    Positional,
    Material,
}

impl From<EvaluatorArg> for EvaluatorKind {
    fn from(arg: EvaluatorArg) -> Self {
        match arg {
            EvaluatorArg::Positional => Self::Positional,
            EvaluatorArg::Material => Self::Material,
        }
    }
}

/// Engine-vs-engine chess driven by Minimax or Alpha-Beta search.
#[derive(Debug, Parser)]
#[command(name = "chess_search", version, about)]
struct Args {
    /// Search depth in plies [default: 3]
    #[arg(long)]
    depth: Option<u8>,

    /// Search variant [default: alpha-beta]
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Static evaluator [default: positional]
    #[arg(long, value_enum)]
    evaluator: Option<EvaluatorArg>,

    /// Who plays Black
    #[arg(long, value_enum, default_value_t = BlackPlayer::Engine)]
    black: BlackPlayer,

    /// Stop after this many turns
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// JSON engine config; flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll interval while a search runs, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Seed for the random Black player
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective engine config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }
    if let Some(evaluator) = args.evaluator {
        config.evaluator = evaluator.into();
    }
    if config.depth == 0 {
        bail!("search depth must be at least 1");
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        depth = config.depth,
        algorithm = %config.algorithm,
        evaluator = ?config.evaluator,
        black = ?args.black,
        seed,
        "starting game"
    );

    let settings = Settings {
        black: args.black,
        max_plies: args.max_plies,
        frame: Duration::from_millis(args.frame_ms),
        seed,
    };
    let mut app = App::new(Arc::new(config), settings);
    let outcome = app.run()?;
    println!("{}", ui::panels::outcome_line(&outcome));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "chess_search",
            "--depth",
            "2",
            "--algorithm",
            "minimax",
            "--evaluator",
            "material",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.algorithm, Algorithm::Minimax);
        assert_eq!(config.evaluator, EvaluatorKind::Material);
        assert_eq!(args.black, BlackPlayer::Engine);
        assert_eq!(args.max_plies, 200);
    }

    #[test]
    fn test_defaults_come_from_config() {
        let args = Args::parse_from(["chess_search", "--black", "pass"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(args.black, BlackPlayer::Pass);
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let args = Args::parse_from(["chess_search", "--depth", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["chess_search", "--config", "/nonexistent/engine.json"]);
        assert!(load_config(&args).is_err());
    }
}
