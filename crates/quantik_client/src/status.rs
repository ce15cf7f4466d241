//! Status presenter: the single message region.

use tracing::{debug, instrument};

/// Text shown while the human move is being checked.
pub const CHECKING_MOVE: &str = "Checking your move...";
/// Text shown while the engine plays.
pub const BOT_THINKING: &str = "The bot is thinking...";
/// Text shown while an analysis is computed.
pub const ANALYSING: &str = "Analysing the position...";
/// Text shown while a prediction is computed.
pub const PREDICTING: &str = "Predicting the rest of the game...";
/// Win text used when the engine ends the game without a message.
pub const GAME_OVER: &str = "Game over.";

/// What the message region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusState {
    /// Nothing to report.
    #[default]
    Idle,
    /// A request is outstanding.
    Waiting(String),
    /// The last action failed.
    Error(String),
    /// The game is over.
    Win(String),
}

/// Holds exactly one [`StatusState`] at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPresenter {
    state: StatusState,
}

impl StatusPresenter {
    /// A presenter showing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &StatusState {
        &self.state
    }

    /// Whether a request is outstanding.
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, StatusState::Waiting(_))
    }

    /// Clears the region.
    pub fn idle(&mut self) {
        self.show(StatusState::Idle);
    }

    /// Shows a waiting message.
    pub fn waiting(&mut self, text: impl Into<String>) {
        self.show(StatusState::Waiting(text.into()));
    }

    /// Shows an error message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.show(StatusState::Error(text.into()));
    }

    /// Shows the end-of-game message.
    pub fn win(&mut self, text: impl Into<String>) {
        self.show(StatusState::Win(text.into()));
    }

    /// Clears an error; any other state is left alone.
    pub fn dismiss(&mut self) {
        if matches!(self.state, StatusState::Error(_)) {
            self.idle();
        }
    }

    #[instrument(skip(self))]
    fn show(&mut self, state: StatusState) {
        debug!(previous = ?self.state, "Status changed");
        self.state = state;
    }
}
