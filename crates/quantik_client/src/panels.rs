//! Read-only query panels: ranked analysis and game prediction.

use crate::types::{AnalysisEntry, PredictionEntry};

/// Last rendered results of the query flows.
///
/// `None` means the panel has never been filled; an empty list is a valid
/// answer and renders as an empty ordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPanels {
    analysis: Option<Vec<AnalysisEntry>>,
    prediction: Option<Vec<PredictionEntry>>,
}

impl QueryPanels {
    /// Empty panels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked candidates, best first.
    pub fn analysis(&self) -> Option<&[AnalysisEntry]> {
        self.analysis.as_deref()
    }

    /// Forecasted continuation.
    pub fn prediction(&self) -> Option<&[PredictionEntry]> {
        self.prediction.as_deref()
    }

    /// Replaces the analysis list.
    pub fn show_analysis(&mut self, entries: Vec<AnalysisEntry>) {
        self.analysis = Some(entries);
    }

    /// Replaces the prediction list.
    pub fn show_prediction(&mut self, entries: Vec<PredictionEntry>) {
        self.prediction = Some(entries);
    }
}
