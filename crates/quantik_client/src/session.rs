//! Session driver: executes orchestrator requests and feeds completions back.

use crate::error::Fault;
use crate::orchestrator::{Completion, Orchestrator, Request, UserAction};
use crate::protocol::MoveService;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages posted back to the event loop by spawned requests.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A request issued by the session with the given epoch finished.
    Completed {
        /// Epoch of the session that issued the request.
        epoch: u64,
        /// The answer.
        completion: Completion,
    },
    /// The engine answered a new-game request.
    NewGame(Result<(), Fault>),
}

/// Runs a request against the engine.
#[instrument(skip(service))]
pub async fn execute(service: &dyn MoveService, request: Request) -> Completion {
    match request {
        Request::SubmitHumanMove(candidate) => {
            Completion::Turn(service.submit_human_move(candidate).await)
        }
        Request::RequestAutomatedTurn => Completion::Turn(service.request_automated_turn().await),
        Request::RequestAnalysis { depth } => {
            Completion::Analysis(service.request_analysis(depth).await)
        }
        Request::RequestPrediction => Completion::Prediction(service.request_prediction().await),
    }
}

/// One game session bound to an engine.
///
/// The orchestrator is only touched from the thread calling into the
/// session. Requests run on spawned tasks and report through a channel that
/// the event loop drains with [`Session::next_event`] or
/// [`Session::try_next_event`] and hands to [`Session::on_event`].
pub struct Session {
    service: Arc<dyn MoveService>,
    analysis_depth: u32,
    orchestrator: Orchestrator,
    epoch: u64,
    pending: usize,
    restarting: bool,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Session {
    /// Creates a session with a fresh orchestrator.
    #[instrument(skip(service))]
    pub fn new(service: Arc<dyn MoveService>, analysis_depth: u32) -> Self {
        info!("Starting session");
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            analysis_depth,
            orchestrator: Orchestrator::new(analysis_depth),
            epoch: 0,
            pending: 0,
            restarting: false,
            events_tx,
            events_rx,
        }
    }

    /// Current game state.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Incremented on every restart.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a new-game request is outstanding.
    pub fn is_restarting(&self) -> bool {
        self.restarting
    }

    /// Number of spawned requests not yet received back.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Routes a user gesture through the orchestrator.
    ///
    /// Gestures are ignored while a new game is being requested, so nothing
    /// reaches the engine until it has answered.
    pub fn handle(&mut self, action: UserAction) {
        if self.restarting {
            debug!(?action, "Gesture ignored, restart in progress");
            return;
        }
        if let Some(request) = self.orchestrator.handle(action) {
            self.dispatch(request);
        }
    }

    /// Asks the engine for a new game; the session is rebuilt once it agrees.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn restart(&mut self) {
        if self.restarting {
            debug!("Restart already requested");
            return;
        }
        info!("Requesting new game");
        self.restarting = true;
        self.pending += 1;

        let service = Arc::clone(&self.service);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.start_new_game().await;
            if events_tx.send(SessionEvent::NewGame(result)).is_err() {
                debug!("Session dropped before new game answer");
            }
        });
    }

    /// Applies an event received from a spawned request.
    #[instrument(skip(self, event), fields(epoch = self.epoch))]
    pub fn on_event(&mut self, event: SessionEvent) {
        self.pending = self.pending.saturating_sub(1);
        match event {
            SessionEvent::Completed { epoch, completion } => {
                if epoch != self.epoch {
                    debug!(stale_epoch = epoch, "Dropping completion from a discarded game");
                    return;
                }
                if let Some(request) = self.orchestrator.complete(completion) {
                    self.dispatch(request);
                }
            }
            SessionEvent::NewGame(Ok(())) => {
                self.restarting = false;
                self.epoch += 1;
                self.orchestrator = Orchestrator::new(self.analysis_depth);
                info!(epoch = self.epoch, "New game started");
            }
            SessionEvent::NewGame(Err(fault)) => {
                self.restarting = false;
                warn!(fault = %fault, "New game request failed");
                self.orchestrator.report(&fault);
            }
        }
    }

    /// Waits for the next event.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    /// Returns an already delivered event without waiting.
    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Processes events until no spawned request is outstanding.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.next_event().await {
                Some(event) => self.on_event(event),
                None => break,
            }
        }
    }

    fn dispatch(&mut self, request: Request) {
        debug!(?request, epoch = self.epoch, "Dispatching request");
        self.pending += 1;

        let service = Arc::clone(&self.service);
        let events_tx = self.events_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let completion = execute(service.as_ref(), request).await;
            if events_tx
                .send(SessionEvent::Completed { epoch, completion })
                .is_err()
            {
                debug!("Session dropped before completion");
            }
        });
    }
}
