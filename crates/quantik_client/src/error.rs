//! Fault and configuration error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Message shown when the player clicks a cell without a pawn selected.
pub const NO_PAWN_SELECTED: &str = "Please select a pawn.";

/// Message shown when the engine could not be reached at all.
pub const UNREACHABLE: &str = "Unable to reach the game server.";

/// Message shown when a success response could not be decoded.
pub const MALFORMED_RESPONSE: &str = "Malformed response from the game server.";

/// Non-success outcome of a player action or remote operation.
///
/// Every variant carries the text presented in the status region. Faults are
/// terminal for the request that produced them and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Fault {
    /// Caught locally before any request was issued.
    #[display("{message}")]
    Validation {
        /// Display text.
        message: String,
    },
    /// The engine answered with a non-success status.
    #[display("{message}")]
    Protocol {
        /// Display text taken from the response body.
        message: String,
        /// HTTP status code of the response.
        status: u16,
    },
    /// No response was obtained.
    #[display("{message}")]
    Transport {
        /// Display text.
        message: String,
    },
}

impl Fault {
    /// The "no pawn selected" validation fault.
    pub fn no_pawn_selected() -> Self {
        Self::Validation {
            message: NO_PAWN_SELECTED.to_string(),
        }
    }

    /// A transport fault with the generic message.
    pub fn unreachable() -> Self {
        Self::Transport {
            message: UNREACHABLE.to_string(),
        }
    }

    /// Text to show to the player.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Protocol { message, .. }
            | Self::Transport { message } => message,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
