//! Screen reader announcements for selection changes.
//!
//! The list does not talk to a platform accessibility API itself. After each
//! selection change the container builds a [`SelectionSummary`] and hands it
//! to the registered [`SelectionAnnouncer`], which forwards the text to
//! whatever accessibility bridge the application uses.

use std::fmt;

use crate::model::{SelectionKind, SelectionModel};

/// A short description of the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Number of selected items.
    pub selected: usize,
    /// Number of items in the list.
    pub total: usize,
    /// State machine state.
    pub kind: SelectionKind,
    /// Display name of the lead item, if one is selected.
    pub lead_name: Option<String>,
}

impl SelectionSummary {
    /// Summarize `model`.
    pub fn of(model: &SelectionModel) -> Self {
        let lead_name = model
            .lead_item()
            .filter(|item| model.is_item_selected(item))
            .map(|item| item.with_descriptor(|d| d.name.clone()));
        Self {
            selected: model.selected_count(),
            total: model.len(),
            kind: model.kind(),
            lead_name,
        }
    }

    /// The text a screen reader speaks.
    pub fn text(&self) -> String {
        match (self.kind, self.selected) {
            (_, 0) => "No items selected".to_string(),
            (SelectionKind::All, n) => format!("All {n} items selected"),
            (_, 1) => "1 item selected".to_string(),
            (_, n) => format!("{n} items selected"),
        }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Receives selection announcements.
pub trait SelectionAnnouncer {
    /// Announce `summary`. Called after every selection change.
    fn announce(&mut self, summary: &SelectionSummary);
}

impl<F> SelectionAnnouncer for F
where
    F: FnMut(&SelectionSummary),
{
    fn announce(&mut self, summary: &SelectionSummary) {
        self(summary)
    }
}
