//! Board projection: applies engine deltas to the local rendering state.
//!
//! The surface is a write-only view. Nothing here is read back to decide
//! whose turn it is; the engine stays the only source of truth.

use crate::types::{Cell, Color, Move, Pawn};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Number of pawns of each shape a side starts with.
pub const PAWNS_PER_SHAPE: usize = 2;

/// Rendered board: cell → occupying move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSurface {
    cells: BTreeMap<Cell, Move>,
}

impl BoardSurface {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The move occupying `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<&Move> {
        self.cells.get(&cell)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &Move)> {
        self.cells.iter()
    }

    /// Returns the surface with `deltas` placed in order.
    pub fn with_deltas(&self, deltas: &[Move]) -> Self {
        let mut next = self.clone();
        for delta in deltas {
            next.cells.insert(delta.cell(), *delta);
        }
        next
    }
}

/// One not-yet-placed pawn. `slot` identifies the entry for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Stable identifier of the entry.
    pub slot: usize,
    /// Pawn shape.
    pub pawn: Pawn,
}

/// Pawns still available to the tracked side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnInventory {
    color: Color,
    entries: Vec<InventoryEntry>,
}

impl PawnInventory {
    /// A full starting inventory: two of every shape, ordered by shape.
    pub fn full(color: Color) -> Self {
        let entries = Pawn::all()
            .flat_map(|pawn| std::iter::repeat_n(pawn, PAWNS_PER_SHAPE))
            .enumerate()
            .map(|(slot, pawn)| InventoryEntry { slot, pawn })
            .collect();
        Self { color, entries }
    }

    /// Side whose pawns are tracked.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Remaining entries in display order.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Whether nothing is left.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry with the given slot, if still available.
    pub fn entry(&self, slot: usize) -> Option<InventoryEntry> {
        self.entries.iter().copied().find(|e| e.slot == slot)
    }

    /// The first remaining entry of `pawn`.
    pub fn first_of(&self, pawn: Pawn) -> Option<InventoryEntry> {
        self.entries.iter().copied().find(|e| e.pawn == pawn)
    }

    /// Removes the first entry matching each delta of the tracked color.
    ///
    /// Returns the removed entries in delta order.
    pub fn deplete(&mut self, deltas: &[Move]) -> Vec<InventoryEntry> {
        let mut removed = Vec::new();
        for delta in deltas.iter().filter(|d| d.color == self.color) {
            if let Some(index) = self.entries.iter().position(|e| e.pawn == delta.pawn) {
                removed.push(self.entries.remove(index));
            }
        }
        removed
    }
}

/// Applies one engine response to the surface and inventory.
///
/// Callers apply each response exactly once; inventory depletion is not
/// idempotent. Returns the inventory entries consumed.
#[instrument(skip_all, fields(deltas = deltas.len()))]
pub fn apply(
    surface: &mut BoardSurface,
    inventory: &mut PawnInventory,
    deltas: &[Move],
) -> Vec<InventoryEntry> {
    *surface = surface.with_deltas(deltas);
    let removed = inventory.deplete(deltas);
    debug!(
        occupied = surface.len(),
        consumed = removed.len(),
        remaining = inventory.entries().len(),
        "Projected deltas"
    );
    removed
}
