//! Application state: a session plus the board cursor.

use crate::input::{self, Command};
use quantik_client::{Cell, MoveService, Session, UserAction};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the terminal front end keeps between frames.
pub struct App {
    session: Session,
    cursor: Cell,
    board_size: u32,
    should_quit: bool,
}

impl App {
    /// Creates an application bound to `service`.
    pub fn new(service: Arc<dyn MoveService>, analysis_depth: u32, board_size: u32) -> Self {
        Self {
            session: Session::new(service, analysis_depth),
            cursor: Cell::new(0, 0),
            board_size,
            should_quit: false,
        }
    }

    /// The running game session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Cell under the board cursor.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Number of cells per board side.
    pub fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies every event already delivered by spawned requests.
    pub fn drain_events(&mut self) {
        while let Some(event) = self.session.try_next_event() {
            self.session.on_event(event);
        }
    }

    /// Executes a command produced by a key press.
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "Applying command");
        match command {
            Command::MoveCursor(key) => {
                self.cursor = input::move_cursor(self.cursor, key, self.board_size);
            }
            Command::ClickCell => self.session.handle(UserAction::SelectCell(self.cursor)),
            Command::Action(action) => self.session.handle(action),
            Command::Restart => {
                self.cursor = Cell::new(0, 0);
                self.session.restart();
            }
            Command::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }
}
