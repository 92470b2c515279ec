use crate::ui::{board::render_board, panels};
use anyhow::Result;
use chess_core::engine::config::EngineConfig;
use chess_core::engine::random::RandomMover;
use chess_core::engine::search::SearchEngine;
use chess_core::logic::board::Side;
use chess_core::logic::game::{GameState, GameStatus};
use chess_core::worker::{Input, Output, SearchWorker};
use clap::ValueEnum;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlackPlayer {
    /// Same engine and depth as White.
    Engine,
    /// Never moves; White plays alone.
    Pass,
    /// Uniformly random pseudo-legal moves.
    Random,
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub black: BlackPlayer,
    pub max_plies: u32,
    pub frame: Duration,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Side),
    /// Neither side had a move two turns running.
    Exhausted,
    PlyLimit(u32),
}

/// Terminal game loop. One background worker per searching side.
pub struct App {
    state: GameState,
    depth: u8,
    settings: Settings,
    white: SearchWorker,
    black: Option<SearchWorker>,
    plies: u32,
}

impl App {
    pub fn new(config: Arc<EngineConfig>, settings: Settings) -> Self {
        Self::with_state(GameState::new(), config, settings)
    }

    pub fn with_state(state: GameState, config: Arc<EngineConfig>, settings: Settings) -> Self {
        let white = SearchWorker::new(Box::new(SearchEngine::from_config(Arc::clone(&config))));
        let black = match settings.black {
            BlackPlayer::Engine => Some(SearchWorker::new(Box::new(SearchEngine::from_config(
                Arc::clone(&config),
            )))),
            BlackPlayer::Random => Some(SearchWorker::new(Box::new(RandomMover::seeded(
                settings.seed,
            )))),
            BlackPlayer::Pass => None,
        };

        Self {
            state,
            depth: config.depth,
            settings,
            white,
            black,
            plies: 0,
        }
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays until a King falls, nobody can move, or the ply limit is hit.
    pub fn run(&mut self) -> Result<Outcome> {
        println!("{}\n", render_board(&self.state.board, None));

        loop {
            if let Some(outcome) = self.outcome() {
                tracing::info!(plies = self.plies, ?outcome, "game over");
                return Ok(outcome);
            }
            self.play_turn()?;
            self.plies += 1;
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.state.status {
            GameStatus::Won(side) => Some(Outcome::Won(side)),
            GameStatus::Exhausted => Some(Outcome::Exhausted),
            GameStatus::Playing if self.plies >= self.settings.max_plies => {
                Some(Outcome::PlyLimit(self.plies))
            }
            GameStatus::Playing => None,
        }
    }

    fn play_turn(&mut self) -> Result<()> {
        let side = self.state.turn;
        let worker = match side {
            Side::White => Some(&mut self.white),
            Side::Black => self.black.as_mut(),
        };

        let Some(worker) = worker else {
            tracing::debug!(%side, "waiting");
            self.state.pass()?;
            return Ok(());
        };

        if !self.state.has_moves() {
            tracing::info!(%side, "no move available, passing");
            println!("{}\n", panels::pass_line(self.plies + 1, side));
            self.state.pass()?;
            return Ok(());
        }

        worker.submit(Input::ComputeMove(self.state.board, side, self.depth))?;
        let output = loop {
            if let Some(output) = worker.poll()? {
                break output;
            }
            thread::sleep(self.settings.frame);
        };

        match output {
            Output::MoveFound(mv, result, stats) => {
                let record = self.state.make_move(mv)?;
                tracing::info!(
                    %side,
                    %mv,
                    score = result.score,
                    nodes = stats.nodes,
                    time_ms = stats.time_ms,
                    "move played"
                );
                println!(
                    "{}\n{}\n",
                    panels::move_line(self.plies + 1, &record, &result, &stats),
                    render_board(&self.state.board, Some(mv))
                );
            }
            Output::NoMove(..) => {
                tracing::warn!(%side, "search returned no move, passing");
                println!("{}\n", panels::pass_line(self.plies + 1, side));
                self.state.pass()?;
            }
        }
        Ok(())
    }
}
