//! Per-session selection state

use std::collections::BTreeSet;

use serde::{
    Deserialize,
    Serialize,
};

use crate::models::DetectionMode;

/// One row of the selection table as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub id: String,
    pub included: bool,
}

impl CandidateRow {
    pub fn new(id: impl Into<String>, included: bool) -> Self {
        Self {
            id: id.into(),
            included,
        }
    }
}

/// Selection set and detection mode for one interactive session.
///
/// Created at session start and only changed through explicit commits; the
/// fetch/compute pipeline reads it but never writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    selection: BTreeSet<String>,
    mode: DetectionMode,
}

impl SessionState {
    pub fn new(mode: DetectionMode) -> Self {
        Self {
            selection: BTreeSet::new(),
            mode,
        }
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Replace the selection with exactly the included rows.
    ///
    /// Rows not present in the snapshot are dropped, nothing is merged with
    /// the previous selection. An empty result is legal.
    pub fn commit_selection<I>(&mut self, candidate_rows: I) -> &BTreeSet<String>
    where
        I: IntoIterator<Item = CandidateRow>,
    {
        self.selection = candidate_rows
            .into_iter()
            .filter(|row| row.included)
            .map(|row| row.id)
            .collect();
        &self.selection
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DetectionMode) {
        self.mode = mode;
    }
}
