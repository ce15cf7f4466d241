//! Quantik client core - turn orchestration against a remote engine
//!
//! The engine owns the rules, win detection and search. This crate owns
//! everything on the player's side of the wire:
//!
//! - **Protocol**: typed requests to the engine, faults with display text
//! - **Orchestrator**: the turn state machine and the controls it enables
//! - **Projection**: engine deltas applied to the rendered board and inventory
//! - **Session**: executes requests and feeds completions back to the machine
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quantik_client::{Cell, ClientConfig, HttpMoveService, Pawn, Session, UserAction};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let service = Arc::new(HttpMoveService::new(&config)?);
//! let mut session = Session::new(service, *config.analysis_depth());
//!
//! session.handle(UserAction::SelectPawn(Pawn::A));
//! session.handle(UserAction::SelectCell(Cell::new(0, 0)));
//! session.settle().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod gate;
mod mode;
mod orchestrator;
mod panels;
mod projection;
mod protocol;
mod session;
mod status;
mod types;

pub use config::{ClientConfig, MAX_ANALYSIS_DEPTH, MIN_ANALYSIS_DEPTH, SERVER_URL_ENV};
pub use error::{ConfigError, Fault, MALFORMED_RESPONSE, NO_PAWN_SELECTED, UNREACHABLE};
pub use gate::InteractionGate;
pub use mode::{Mode, ModeController};
pub use orchestrator::{
    AutomatedTrigger, Completion, Orchestrator, Origin, QueryKind, Request, TurnPhase, UserAction,
};
pub use panels::QueryPanels;
pub use projection::{BoardSurface, InventoryEntry, PAWNS_PER_SHAPE, PawnInventory, apply};
pub use protocol::{
    ANALYSIS_PATH, BOT_PATH, HUMAN_MOVE_PATH, HttpMoveService, MoveService, NEW_GAME_PATH,
    PREDICTION_PATH,
};
pub use session::{Session, SessionEvent, execute};
pub use status::{
    ANALYSING, BOT_THINKING, CHECKING_MOVE, GAME_OVER, PREDICTING, StatusPresenter, StatusState,
};
pub use types::{AnalysisEntry, Cell, Color, Move, Pawn, PredictionEntry, TurnResult};
