//! Play mode selection.

use strum::Display;
use tracing::{info, instrument};

/// How the automated side is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Mode {
    /// Alternating turns; the engine plays right after the human.
    #[default]
    #[strum(to_string = "Classic mode")]
    Classic,
    /// The human plays both sides and asks for engine moves explicitly.
    #[strum(to_string = "Analysis mode")]
    Analysis,
}

impl Mode {
    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::Classic => Self::Analysis,
            Self::Analysis => Self::Classic,
        }
    }
}

/// Owns the current mode and the query panel visibility tied to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Starts in [`Mode::Classic`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the analysis and prediction panels are shown.
    pub fn panels_visible(&self) -> bool {
        self.mode == Mode::Analysis
    }

    /// Switches to the other mode and returns it.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn switch(&mut self) -> Mode {
        self.mode = self.mode.toggle();
        info!(to = %self.mode, "Mode switched");
        self.mode
    }
}
