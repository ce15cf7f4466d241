//! Wire-level game vocabulary shared with the remote engine.

use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Pawn shape identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Pawn {
    /// Shape A.
    A,
    /// Shape B.
    B,
    /// Shape C.
    C,
    /// Shape D.
    D,
}

impl Pawn {
    /// Every shape, in inventory order.
    pub fn all() -> impl Iterator<Item = Pawn> {
        Pawn::iter()
    }
}

/// Side owning a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Color {
    /// The human side; its pawns are tracked in the inventory.
    Blue,
    /// The automated side.
    Red,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }
}

/// Board coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, new)]
pub struct Cell {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

/// One placed pawn. Also used as the candidate submitted for a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Pawn shape.
    pub pawn: Pawn,
    /// Owning side.
    pub color: Color,
}

impl Move {
    /// The cell this move occupies.
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// Outcome of a successful mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    /// Deltas to apply, in application order.
    pub new_moves: Vec<Move>,
    /// Whether the game ended with this turn.
    pub game_is_over: bool,
    /// Text to present when the game is over.
    #[serde(default)]
    pub win_message: Option<String>,
}

/// Candidate move with its engine score, best first in a response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    /// Candidate move.
    #[serde(rename = "move")]
    pub placement: Move,
    /// Engine score.
    pub score: f64,
}

/// Forecasted ply of a hypothetical continuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionEntry {
    /// Predicted move.
    #[serde(rename = "move")]
    pub placement: Move,
    /// Engine score.
    pub score: f64,
}
