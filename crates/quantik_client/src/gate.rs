//! Interaction gate: which move-producing controls accept input.

use tracing::{debug, instrument};

/// Enabled state of the board cells and the advance control.
///
/// The orchestrator recomputes both switches from its turn phase after every
/// transition; input is checked against them at a single dispatch point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionGate {
    cells_enabled: bool,
    advance_enabled: bool,
}

impl InteractionGate {
    /// A gate with cells enabled, as at the start of a game.
    pub fn new() -> Self {
        Self {
            cells_enabled: true,
            advance_enabled: false,
        }
    }

    /// Whether board cells accept clicks.
    pub fn cells_enabled(&self) -> bool {
        self.cells_enabled
    }

    /// Whether the advance control accepts clicks.
    pub fn advance_enabled(&self) -> bool {
        self.advance_enabled
    }

    /// Attaches or detaches click handling on every cell.
    #[instrument(skip(self))]
    pub fn set_cells_enabled(&mut self, enabled: bool) {
        if self.cells_enabled != enabled {
            debug!("Cells toggled");
        }
        self.cells_enabled = enabled;
    }

    /// Attaches or detaches click handling on the advance control.
    #[instrument(skip(self))]
    pub fn set_advance_enabled(&mut self, enabled: bool) {
        if self.advance_enabled != enabled {
            debug!("Advance control toggled");
        }
        self.advance_enabled = enabled;
    }
}
