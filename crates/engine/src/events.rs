//! Event types for session change notifications.
//!
//! Shells subscribe to these instead of polling: grid changes drive
//! repaints and undo/redo button enablement, selection and clipboard
//! presence drive toolbar state. The collector is used by tests to
//! verify ordering (notably that a superseded grid's clear signal
//! precedes the new selection becoming active).

use crate::selection::GridId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A grid's value changed from a completed gesture, cut, paste,
    /// undo/redo, or import.
    GridChanged(GridChangedEvent),

    /// The active selection moved, appeared, or went away.
    SelectionChanged(SelectionChangedEvent),

    /// Clipboard went from absent to present or was replaced.
    ClipboardChanged(ClipboardChangedEvent),

    YearAdded(i32),
    YearRemoved(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridChangedEvent {
    pub year: i32,
    /// True when the change produced (or moved) a history entry;
    /// shells use it to refresh undo/redo enablement.
    pub history_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChangedEvent {
    /// Grid that now owns the selection, if any.
    pub active: Option<GridId>,
    /// Grid whose selection overlay must be cleared.
    pub cleared: Option<GridId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardChangedEvent {
    pub present: bool,
}

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<SessionEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn extend(&mut self, events: Vec<SessionEvent>) {
        self.events.extend(events);
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only GridChanged events.
    pub fn grid_changed(&self) -> Vec<&GridChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::GridChanged(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Filter to only SelectionChanged events.
    pub fn selection_changed(&self) -> Vec<&SelectionChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::SelectionChanged(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Filter to only ClipboardChanged events.
    pub fn clipboard_changed(&self) -> Vec<&ClipboardChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::ClipboardChanged(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}
