use crate::engine::Algorithm;
use crate::logic::board::PieceKind;
use crate::logic::eval_constants::{
    ISOLATED_PAWN_PENALTY, VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluatorKind {
    /// Centipawn material, pawn/knight tables and the isolated-pawn penalty.
    #[default]
    Positional,
    /// Unit-scale material only (Pawn=1 .. Queen=9).
    Material,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub depth: u8,
    pub algorithm: Algorithm,
    pub evaluator: EvaluatorKind,

    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    pub isolated_pawn_penalty: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            algorithm: Algorithm::AlphaBeta,
            evaluator: EvaluatorKind::Positional,

            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,
            isolated_pawn_penalty: ISOLATED_PAWN_PENALTY,
        }
    }
}

impl EngineConfig {
    /// Missing keys keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::load_from_json(&json)?;
        log::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.val_pawn,
            PieceKind::Knight => self.val_knight,
            PieceKind::Bishop => self.val_bishop,
            PieceKind::Rook => self.val_rook,
            PieceKind::Queen => self.val_queen,
            PieceKind::King => self.val_king,
        }
    }
}
