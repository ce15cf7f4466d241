//! Tests for the session driver against a scripted engine.

use async_trait::async_trait;
use quantik_client::{
    AnalysisEntry, BOT_THINKING, Cell, Color, Fault, Mode, Move, MoveService, Pawn,
    PredictionEntry, Session, SessionEvent, StatusState, TurnPhase, TurnResult, UserAction,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Engine double answering from a queue of scripted turn results.
#[derive(Default)]
struct ScriptedEngine {
    turns: Mutex<VecDeque<Result<TurnResult, Fault>>>,
    analysis: Mutex<Option<Result<Vec<AnalysisEntry>, Fault>>>,
    new_game: Mutex<Option<Fault>>,
    calls: Mutex<Vec<String>>,
    hold_human_moves: Option<Arc<Notify>>,
}

impl ScriptedEngine {
    fn with_turns(turns: Vec<Result<TurnResult, Fault>>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn next_turn(&self) -> Result<TurnResult, Fault> {
        self.turns
            .lock()
            .expect("turns lock")
            .pop_front()
            .unwrap_or_else(|| Err(Fault::unreachable()))
    }
}

#[async_trait]
impl MoveService for ScriptedEngine {
    async fn submit_human_move(&self, candidate: Move) -> Result<TurnResult, Fault> {
        self.record(format!(
            "human {} {} {} {}",
            candidate.x, candidate.y, candidate.pawn, candidate.color
        ));
        if let Some(hold) = &self.hold_human_moves {
            hold.notified().await;
        }
        self.next_turn()
    }

    async fn request_automated_turn(&self) -> Result<TurnResult, Fault> {
        self.record("bot".to_string());
        self.next_turn()
    }

    async fn request_analysis(&self, depth: u32) -> Result<Vec<AnalysisEntry>, Fault> {
        self.record(format!("analysis {}", depth));
        self.analysis
            .lock()
            .expect("analysis lock")
            .take()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn request_prediction(&self) -> Result<Vec<PredictionEntry>, Fault> {
        self.record("prediction".to_string());
        Ok(vec![])
    }

    async fn start_new_game(&self) -> Result<(), Fault> {
        self.record("new_game".to_string());
        match self.new_game.lock().expect("new game lock").take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

fn turn(moves: &[Move], over: bool, message: Option<&str>) -> Result<TurnResult, Fault> {
    Ok(TurnResult {
        new_moves: moves.to_vec(),
        game_is_over: over,
        win_message: message.map(str::to_string),
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn test_classic_round_trip_runs_both_turns() {
    init_tracing();
    let engine = Arc::new(ScriptedEngine::with_turns(vec![
        turn(&[Move::new(0, 0, Pawn::A, Color::Blue)], false, None),
        turn(&[Move::new(3, 3, Pawn::B, Color::Red)], false, None),
    ]));
    let mut session = Session::new(engine.clone(), 3);

    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(0, 0)));
    assert_eq!(session.pending(), 1);
    session.settle().await;

    assert_eq!(engine.calls(), ["human 0 0 A BLUE", "bot"]);
    let orchestrator = session.orchestrator();
    assert_eq!(orchestrator.phase(), TurnPhase::AwaitingHumanMove);
    assert_eq!(orchestrator.surface().len(), 2);
    assert_eq!(orchestrator.inventory().entries().len(), 7);
    assert!(orchestrator.gate().cells_enabled());
}

#[tokio::test]
async fn test_validation_fault_issues_no_request() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut session = Session::new(engine.clone(), 3);

    session.handle(UserAction::SelectCell(Cell::new(0, 0)));
    assert_eq!(session.pending(), 0);
    session.settle().await;

    assert!(engine.calls().is_empty());
    assert_eq!(
        session.orchestrator().status().state(),
        &StatusState::Error("Please select a pawn.".to_string())
    );
}

#[tokio::test]
async fn test_bot_win_locks_the_board() {
    let engine = Arc::new(ScriptedEngine::with_turns(vec![
        turn(&[Move::new(0, 0, Pawn::A, Color::Blue)], false, None),
        turn(&[Move::new(0, 1, Pawn::B, Color::Red)], true, Some("Bot wins")),
    ]));
    let mut session = Session::new(engine.clone(), 3);

    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(0, 0)));
    session.settle().await;

    assert_eq!(session.orchestrator().phase(), TurnPhase::GameOver);
    assert_eq!(
        session.orchestrator().status().state(),
        &StatusState::Win("Bot wins".to_string())
    );

    session.handle(UserAction::SelectPawn(Pawn::C));
    session.handle(UserAction::SelectCell(Cell::new(2, 2)));
    assert_eq!(session.pending(), 0);
    assert_eq!(engine.calls().len(), 2);
}

#[tokio::test]
async fn test_analysis_mode_advances_on_demand() {
    let engine = Arc::new(ScriptedEngine::with_turns(vec![
        turn(&[Move::new(1, 1, Pawn::D, Color::Blue)], false, None),
        turn(&[Move::new(2, 2, Pawn::D, Color::Red)], false, None),
    ]));
    let mut session = Session::new(engine.clone(), 3);
    session.handle(UserAction::SwitchMode);
    assert_eq!(session.orchestrator().mode(), Mode::Analysis);

    session.handle(UserAction::SelectPawn(Pawn::D));
    session.handle(UserAction::SelectCell(Cell::new(1, 1)));
    session.settle().await;
    assert_eq!(engine.calls(), ["human 1 1 D BLUE"]);
    assert_eq!(
        session.orchestrator().phase(),
        TurnPhase::AwaitingAutomatedMove
    );

    session.handle(UserAction::Advance);
    assert_eq!(
        session.orchestrator().status().state(),
        &StatusState::Waiting(BOT_THINKING.to_string())
    );
    session.settle().await;
    assert_eq!(engine.calls(), ["human 1 1 D BLUE", "bot"]);
    assert_eq!(session.orchestrator().phase(), TurnPhase::AwaitingHumanMove);
}

#[tokio::test]
async fn test_analysis_query_uses_configured_depth() {
    let engine = Arc::new(ScriptedEngine::default());
    *engine.analysis.lock().expect("analysis lock") = Some(Ok(vec![AnalysisEntry {
        placement: Move::new(0, 3, Pawn::C, Color::Blue),
        score: 1.0,
    }]));
    let mut session = Session::new(engine.clone(), 5);
    session.handle(UserAction::SwitchMode);
    session.handle(UserAction::IncreaseDepth);
    session.handle(UserAction::RequestAnalysis);
    session.settle().await;

    assert_eq!(engine.calls(), ["analysis 6"]);
    let analysis = session
        .orchestrator()
        .panels()
        .analysis()
        .expect("analysis rendered");
    assert_eq!(analysis.len(), 1);
    assert_eq!(analysis[0].placement.cell(), Cell::new(0, 3));
}

#[tokio::test]
async fn test_restart_discards_in_flight_completion() {
    let hold = Arc::new(Notify::new());
    let engine = Arc::new(ScriptedEngine {
        turns: Mutex::new(
            vec![turn(&[Move::new(0, 0, Pawn::A, Color::Blue)], false, None)].into(),
        ),
        hold_human_moves: Some(hold.clone()),
        ..Default::default()
    });
    let mut session = Session::new(engine.clone(), 3);

    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(0, 0)));
    session.restart();
    assert!(session.is_restarting());

    let event = session.next_event().await.expect("new game answer");
    assert_eq!(event, SessionEvent::NewGame(Ok(())));
    session.on_event(event);
    assert_eq!(session.epoch(), 1);
    assert!(!session.is_restarting());
    assert_eq!(session.orchestrator().phase(), TurnPhase::AwaitingHumanMove);

    hold.notify_one();
    session.settle().await;

    assert!(session.orchestrator().surface().is_empty());
    assert_eq!(session.orchestrator().inventory().entries().len(), 8);
    assert_eq!(session.orchestrator().phase(), TurnPhase::AwaitingHumanMove);
    assert!(session.orchestrator().gate().cells_enabled());
}

#[tokio::test]
async fn test_gestures_during_restart_reach_no_engine() {
    let engine = Arc::new(ScriptedEngine::with_turns(vec![turn(
        &[Move::new(2, 2, Pawn::A, Color::Blue)],
        false,
        None,
    )]));
    let mut session = Session::new(engine.clone(), 3);

    session.restart();
    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(2, 2)));
    assert_eq!(session.pending(), 1);
    assert_eq!(session.orchestrator().phase(), TurnPhase::AwaitingHumanMove);

    session.settle().await;
    assert_eq!(engine.calls(), ["new_game"]);
    assert_eq!(session.epoch(), 1);
    assert!(session.orchestrator().surface().is_empty());
    assert!(session.orchestrator().selected().is_none());

    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(2, 2)));
    assert_eq!(session.pending(), 1);
}

#[tokio::test]
async fn test_failed_restart_keeps_current_game() {
    let engine = Arc::new(ScriptedEngine::with_turns(vec![
        turn(&[Move::new(0, 0, Pawn::A, Color::Blue)], false, None),
        turn(&[], false, None),
    ]));
    *engine.new_game.lock().expect("new game lock") = Some(Fault::unreachable());
    let mut session = Session::new(engine.clone(), 3);

    session.handle(UserAction::SelectPawn(Pawn::A));
    session.handle(UserAction::SelectCell(Cell::new(0, 0)));
    session.settle().await;

    session.restart();
    session.settle().await;

    assert_eq!(session.epoch(), 0);
    assert_eq!(session.orchestrator().surface().len(), 1);
    assert_eq!(
        session.orchestrator().status().state(),
        &StatusState::Error("Unable to reach the game server.".to_string())
    );
}
