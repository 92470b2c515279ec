use crate::engine::{Move, SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Input {
    ComputeMove(Board, Side, u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    MoveFound(Move, SearchResult, SearchStats),
    /// The side to move had nothing to play.
    NoMove(SearchResult, SearchStats),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("a search is already running")]
    Busy,
    #[error("no search is running")]
    Idle,
    #[error("the search thread went away")]
    Disconnected,
    #[error("failed to spawn the search thread: {0}")]
    Spawn(#[from] std::io::Error),
}

type BoxedSearcher = Box<dyn Searcher + Send>;

/// Runs one search at a time on a background thread.
///
/// The searcher moves into the thread with the request and comes back with
/// the result, so the caller never shares it with a running search.
pub struct SearchWorker {
    searcher: Option<BoxedSearcher>,
    pending: Option<Receiver<(BoxedSearcher, Output)>>,
}

impl SearchWorker {
    #[must_use]
    pub fn new(searcher: BoxedSearcher) -> Self {
        Self {
            searcher: Some(searcher),
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a search. Refused while another one is still outstanding.
    pub fn submit(&mut self, input: Input) -> Result<(), WorkerError> {
        if self.pending.is_some() {
            return Err(WorkerError::Busy);
        }
        let mut searcher = self.searcher.take().ok_or(WorkerError::Disconnected)?;

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("search-worker".to_string())
            .spawn(move || {
                let output = handle(searcher.as_mut(), input);
                // Receiver gone means the worker was dropped; nothing to report to.
                let _ = tx.send((searcher, output));
            })?;

        log::debug!("search submitted to background thread");
        self.pending = Some(rx);
        Ok(())
    }

    /// `Ok(None)` while the search runs; the output exactly once when done.
    pub fn poll(&mut self) -> Result<Option<Output>, WorkerError> {
        let Some(rx) = &self.pending else {
            return Ok(None);
        };
        match rx.try_recv() {
            Ok((searcher, output)) => {
                self.finish(searcher);
                Ok(Some(output))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Err(WorkerError::Disconnected)
            }
        }
    }

    /// Blocks until the outstanding search completes.
    pub fn wait(&mut self) -> Result<Output, WorkerError> {
        let rx = self.pending.take().ok_or(WorkerError::Idle)?;
        let (searcher, output) = rx.recv().map_err(|_| WorkerError::Disconnected)?;
        self.finish(searcher);
        Ok(output)
    }

    fn finish(&mut self, searcher: BoxedSearcher) {
        self.searcher = Some(searcher);
        self.pending = None;
    }
}

fn handle(searcher: &mut (dyn Searcher + Send), input: Input) -> Output {
    match input {
        Input::ComputeMove(board, side, depth) => {
            let (result, stats) = searcher.search(&board, side, depth);
            match result.best_move {
                Some(mv) => Output::MoveFound(mv, result, stats),
                None => Output::NoMove(result, stats),
            }
        }
    }
}
