//! Turn orchestration state machine.
//!
//! The orchestrator never performs I/O. User gestures enter through
//! [`Orchestrator::handle`], engine answers through
//! [`Orchestrator::complete`]; both may return the next [`Request`] for the
//! caller to execute. Control enablement is always derived from the explicit
//! [`TurnPhase`], never the other way round.

use crate::config::{ClientConfig, MAX_ANALYSIS_DEPTH, MIN_ANALYSIS_DEPTH};
use crate::error::Fault;
use crate::gate::InteractionGate;
use crate::mode::{Mode, ModeController};
use crate::panels::QueryPanels;
use crate::projection::{self, BoardSurface, InventoryEntry, PawnInventory};
use crate::status::{
    ANALYSING, BOT_THINKING, CHECKING_MOVE, GAME_OVER, PREDICTING, StatusPresenter,
};
use crate::types::{AnalysisEntry, Cell, Color, Move, Pawn, PredictionEntry, TurnResult};
use tracing::{debug, info, instrument, warn};

/// What started an automated-turn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatedTrigger {
    /// Chained right after a human move in classic mode.
    AutoChain,
    /// Requested with the advance control in analysis mode.
    Manual,
}

/// Which actor an in-flight request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A submitted human move.
    Human,
    /// An automated turn.
    Automated(AutomatedTrigger),
}

/// Whose turn it is, and whether a mutating request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// Board cells accept a move.
    #[default]
    AwaitingHumanMove,
    /// One mutating request is outstanding.
    RequestInFlight(Origin),
    /// Analysis mode: waiting for the player to ask for the engine's move.
    AwaitingAutomatedMove,
    /// Terminal for this game.
    GameOver,
}

/// Read-only query kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Ranked candidate moves.
    Analysis,
    /// Forecasted continuation.
    Prediction,
}

/// A remote call the orchestrator wants executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Submit the player's move.
    SubmitHumanMove(Move),
    /// Let the engine play.
    RequestAutomatedTurn,
    /// Rank candidate moves.
    RequestAnalysis {
        /// Search depth.
        depth: u32,
    },
    /// Forecast the rest of the game.
    RequestPrediction,
}

/// Answer to a previously issued [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Answer to a human move or automated turn.
    Turn(Result<TurnResult, Fault>),
    /// Answer to an analysis request.
    Analysis(Result<Vec<AnalysisEntry>, Fault>),
    /// Answer to a prediction request.
    Prediction(Result<Vec<PredictionEntry>, Fault>),
}

/// Every gesture the interface can produce. Restart lives outside the state
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Click on a board cell.
    SelectCell(Cell),
    /// Pick the first remaining inventory entry of a shape.
    SelectPawn(Pawn),
    /// Ask the engine for its move (analysis mode).
    Advance,
    /// Switch between classic and analysis mode.
    SwitchMode,
    /// Toggle the color submitted with human moves (analysis mode).
    ToggleColor,
    /// Request a ranked analysis.
    RequestAnalysis,
    /// Request a game prediction.
    RequestPrediction,
    /// Increase the analysis depth.
    IncreaseDepth,
    /// Decrease the analysis depth.
    DecreaseDepth,
    /// Clear the error message.
    Dismiss,
}

/// State machine for one game session.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    phase: TurnPhase,
    query: Option<QueryKind>,
    modes: ModeController,
    gate: InteractionGate,
    status: StatusPresenter,
    surface: BoardSurface,
    inventory: PawnInventory,
    panels: QueryPanels,
    selected: Option<usize>,
    selected_shape: Option<Pawn>,
    human_color: Color,
    analysis_depth: u32,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(*ClientConfig::default().analysis_depth())
    }
}

impl Orchestrator {
    /// Fresh session: human to move, empty board, full blue inventory.
    #[instrument]
    pub fn new(analysis_depth: u32) -> Self {
        info!("Creating orchestrator");
        let mut orchestrator = Self {
            phase: TurnPhase::AwaitingHumanMove,
            query: None,
            modes: ModeController::new(),
            gate: InteractionGate::new(),
            status: StatusPresenter::new(),
            surface: BoardSurface::new(),
            inventory: PawnInventory::full(Color::Blue),
            panels: QueryPanels::new(),
            selected: None,
            selected_shape: None,
            human_color: Color::Blue,
            analysis_depth: analysis_depth.clamp(MIN_ANALYSIS_DEPTH, MAX_ANALYSIS_DEPTH),
        };
        orchestrator.sync_gate();
        orchestrator
    }

    /// Current turn phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    /// Whether the query panels are shown.
    pub fn panels_visible(&self) -> bool {
        self.modes.panels_visible()
    }

    /// Control enablement.
    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    /// Message region.
    pub fn status(&self) -> &StatusPresenter {
        &self.status
    }

    /// Rendered board.
    pub fn surface(&self) -> &BoardSurface {
        &self.surface
    }

    /// Remaining blue pawns.
    pub fn inventory(&self) -> &PawnInventory {
        &self.inventory
    }

    /// Query results.
    pub fn panels(&self) -> &QueryPanels {
        &self.panels
    }

    /// Selected inventory entry.
    pub fn selected(&self) -> Option<InventoryEntry> {
        self.selected.and_then(|slot| self.inventory.entry(slot))
    }

    /// Shape submitted with the next human move.
    ///
    /// The inventory only tracks the blue side. When submitting for the
    /// other side the last chosen shape is used as is.
    pub fn selected_pawn(&self) -> Option<Pawn> {
        if self.human_color == self.inventory.color() {
            self.selected().map(|entry| entry.pawn)
        } else {
            self.selected_shape
        }
    }

    /// Color submitted with human moves.
    pub fn human_color(&self) -> Color {
        self.human_color
    }

    /// Depth sent with analysis requests.
    pub fn analysis_depth(&self) -> u32 {
        self.analysis_depth
    }

    /// Outstanding query, if any.
    pub fn query_in_flight(&self) -> Option<QueryKind> {
        self.query
    }

    /// Whether any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.query.is_some() || matches!(self.phase, TurnPhase::RequestInFlight(_))
    }

    /// Single dispatch point for user gestures.
    ///
    /// Gestures on disabled controls are ignored. Returns the request to
    /// execute, if the gesture produced one.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn handle(&mut self, action: UserAction) -> Option<Request> {
        match action {
            UserAction::SelectCell(cell) => self.select_cell(cell),
            UserAction::SelectPawn(pawn) => {
                self.select_pawn(pawn);
                None
            }
            UserAction::Advance => self.advance(),
            UserAction::SwitchMode => {
                self.switch_mode();
                None
            }
            UserAction::ToggleColor => {
                self.toggle_color();
                None
            }
            UserAction::RequestAnalysis => self.start_query(QueryKind::Analysis),
            UserAction::RequestPrediction => self.start_query(QueryKind::Prediction),
            UserAction::IncreaseDepth => {
                self.set_depth(self.analysis_depth.saturating_add(1));
                None
            }
            UserAction::DecreaseDepth => {
                self.set_depth(self.analysis_depth.saturating_sub(1));
                None
            }
            UserAction::Dismiss => {
                self.status.dismiss();
                None
            }
        }
    }

    /// Applies the answer to the outstanding request.
    ///
    /// Returns the automated-turn request when classic mode chains the
    /// engine's reply to a human move.
    #[instrument(skip(self, completion), fields(phase = ?self.phase))]
    pub fn complete(&mut self, completion: Completion) -> Option<Request> {
        let next = match completion {
            Completion::Turn(result) => self.complete_turn(result),
            Completion::Analysis(result) => {
                if let Some(entries) = self.finish_query(QueryKind::Analysis, result) {
                    self.panels.show_analysis(entries);
                }
                None
            }
            Completion::Prediction(result) => {
                if let Some(entries) = self.finish_query(QueryKind::Prediction, result) {
                    self.panels.show_prediction(entries);
                }
                None
            }
        };
        self.sync_gate();
        next
    }

    /// Shows a fault raised outside the state machine, such as a failed
    /// restart.
    pub fn report(&mut self, fault: &Fault) {
        warn!(fault = %fault, "Reporting fault");
        self.status.error(fault.message());
    }

    fn select_cell(&mut self, cell: Cell) -> Option<Request> {
        if !self.gate.cells_enabled() {
            debug!(?cell, "Cell click ignored, cells disabled");
            return None;
        }

        // A new attempt clears any previous error.
        self.status.idle();

        let Some(pawn) = self.selected_pawn() else {
            warn!("Move attempted without a pawn selected");
            self.status.error(Fault::no_pawn_selected().message());
            return None;
        };

        let candidate = Move::new(cell.x, cell.y, pawn, self.human_color);
        info!(?candidate, "Submitting human move");
        self.phase = TurnPhase::RequestInFlight(Origin::Human);
        self.status.waiting(CHECKING_MOVE);
        self.sync_gate();
        Some(Request::SubmitHumanMove(candidate))
    }

    fn select_pawn(&mut self, pawn: Pawn) {
        self.selected_shape = Some(pawn);
        match self.inventory.first_of(pawn) {
            Some(entry) => {
                debug!(slot = entry.slot, %pawn, "Pawn selected");
                self.selected = Some(entry.slot);
            }
            None => {
                debug!(%pawn, "No such pawn left");
                self.selected = None;
            }
        }
    }

    fn advance(&mut self) -> Option<Request> {
        if !self.gate.advance_enabled() {
            debug!("Advance ignored, control disabled");
            return None;
        }
        info!("Advancing to the engine's move");
        self.phase = TurnPhase::RequestInFlight(Origin::Automated(AutomatedTrigger::Manual));
        self.status.waiting(BOT_THINKING);
        self.sync_gate();
        Some(Request::RequestAutomatedTurn)
    }

    fn switch_mode(&mut self) {
        let mode = self.modes.switch();
        if mode == Mode::Classic {
            self.human_color = self.inventory.color();
        }
        self.sync_gate();
    }

    fn toggle_color(&mut self) {
        if self.modes.mode() != Mode::Analysis || self.phase == TurnPhase::GameOver {
            debug!("Color toggle ignored");
            return;
        }
        self.human_color = self.human_color.opponent();
        debug!(color = %self.human_color, "Submitting color changed");
    }

    fn set_depth(&mut self, depth: u32) {
        self.analysis_depth = depth.clamp(MIN_ANALYSIS_DEPTH, MAX_ANALYSIS_DEPTH);
        debug!(depth = self.analysis_depth, "Analysis depth set");
    }

    fn start_query(&mut self, kind: QueryKind) -> Option<Request> {
        let awaiting = matches!(
            self.phase,
            TurnPhase::AwaitingHumanMove | TurnPhase::AwaitingAutomatedMove
        );
        if !self.modes.panels_visible() || !awaiting || self.status.is_waiting() {
            debug!(?kind, "Query ignored");
            return None;
        }

        info!(?kind, "Starting query");
        self.query = Some(kind);
        let request = match kind {
            QueryKind::Analysis => {
                self.status.waiting(ANALYSING);
                Request::RequestAnalysis {
                    depth: self.analysis_depth,
                }
            }
            QueryKind::Prediction => {
                self.status.waiting(PREDICTING);
                Request::RequestPrediction
            }
        };
        self.sync_gate();
        Some(request)
    }

    fn complete_turn(&mut self, result: Result<TurnResult, Fault>) -> Option<Request> {
        let TurnPhase::RequestInFlight(origin) = self.phase else {
            warn!("Turn completion without a request in flight, ignoring");
            return None;
        };

        let turn = match result {
            Ok(turn) => turn,
            Err(fault) => {
                warn!(?origin, fault = %fault, "Turn request failed");
                self.status.error(fault.message());
                self.phase = match origin {
                    Origin::Human | Origin::Automated(AutomatedTrigger::AutoChain) => {
                        TurnPhase::AwaitingHumanMove
                    }
                    Origin::Automated(AutomatedTrigger::Manual) => TurnPhase::AwaitingAutomatedMove,
                };
                return None;
            }
        };

        projection::apply(&mut self.surface, &mut self.inventory, &turn.new_moves);
        if self.selected.is_some() && self.selected().is_none() {
            debug!("Selected pawn was placed, clearing selection");
            self.selected = None;
        }

        if turn.game_is_over {
            let message = turn.win_message.unwrap_or_else(|| GAME_OVER.to_string());
            info!(message = %message, "Game over");
            self.status.win(message);
            self.phase = TurnPhase::GameOver;
            return None;
        }

        match (origin, self.modes.mode()) {
            (Origin::Human, Mode::Classic) => {
                debug!("Chaining automated turn");
                self.phase =
                    TurnPhase::RequestInFlight(Origin::Automated(AutomatedTrigger::AutoChain));
                self.status.waiting(BOT_THINKING);
                Some(Request::RequestAutomatedTurn)
            }
            (Origin::Human, Mode::Analysis) => {
                self.phase = TurnPhase::AwaitingAutomatedMove;
                self.status.idle();
                None
            }
            (Origin::Automated(_), _) => {
                self.phase = TurnPhase::AwaitingHumanMove;
                self.status.idle();
                None
            }
        }
    }

    /// Closes the outstanding query; yields the entries to render on success.
    fn finish_query<T>(&mut self, kind: QueryKind, result: Result<T, Fault>) -> Option<T> {
        if self.query != Some(kind) {
            warn!(?kind, "Query completion without a matching request, ignoring");
            return None;
        }
        self.query = None;
        match result {
            Ok(entries) => {
                self.status.idle();
                Some(entries)
            }
            Err(fault) => {
                warn!(?kind, fault = %fault, "Query failed");
                self.status.error(fault.message());
                None
            }
        }
    }

    /// Derives control enablement from phase, mode and outstanding queries.
    fn sync_gate(&mut self) {
        let idle = self.query.is_none();
        self.gate
            .set_cells_enabled(idle && self.phase == TurnPhase::AwaitingHumanMove);
        self.gate.set_advance_enabled(
            idle && self.phase == TurnPhase::AwaitingAutomatedMove
                && self.modes.mode() == Mode::Analysis,
        );
    }
}
