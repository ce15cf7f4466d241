//! Key bindings and cursor movement.

use crossterm::event::KeyCode;
use quantik_client::{Cell, Pawn, UserAction};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward a gesture to the session.
    Action(UserAction),
    /// Move the board cursor.
    MoveCursor(KeyCode),
    /// Click the cell under the cursor.
    ClickCell,
    /// Discard the game and ask the engine for a new one.
    Restart,
    /// Leave the application.
    Quit,
}

/// Maps a key to its command. Each key drives exactly one entry point.
pub fn map_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Command::MoveCursor(key),
        KeyCode::Enter | KeyCode::Char(' ') => Command::ClickCell,
        KeyCode::Esc => Command::Action(UserAction::Dismiss),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Command::Action(UserAction::SelectPawn(Pawn::A)),
            'b' => Command::Action(UserAction::SelectPawn(Pawn::B)),
            'c' => Command::Action(UserAction::SelectPawn(Pawn::C)),
            'd' => Command::Action(UserAction::SelectPawn(Pawn::D)),
            'n' => Command::Action(UserAction::Advance),
            'm' => Command::Action(UserAction::SwitchMode),
            's' => Command::Action(UserAction::ToggleColor),
            'v' => Command::Action(UserAction::RequestAnalysis),
            'p' => Command::Action(UserAction::RequestPrediction),
            '+' | '=' => Command::Action(UserAction::IncreaseDepth),
            '-' => Command::Action(UserAction::DecreaseDepth),
            'r' => Command::Restart,
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

/// Moves the cursor one cell, staying on a `size`×`size` board.
pub fn move_cursor(cursor: Cell, key: KeyCode, size: u32) -> Cell {
    let last = size.saturating_sub(1);
    match key {
        KeyCode::Left => Cell::new(cursor.x.saturating_sub(1), cursor.y),
        KeyCode::Right => Cell::new((cursor.x + 1).min(last), cursor.y),
        KeyCode::Up => Cell::new(cursor.x, cursor.y.saturating_sub(1)),
        KeyCode::Down => Cell::new(cursor.x, (cursor.y + 1).min(last)),
        _ => cursor,
    }
}
