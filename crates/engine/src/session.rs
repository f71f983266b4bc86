//! The editing session: every open year's grid and history, the active
//! tool, and the shared selection/clipboard context.
//!
//! All mutation is synchronous on the caller's thread. Shells drive a
//! gesture protocol (`begin_gesture` / `update_gesture` /
//! `end_gesture`) mirroring pointer-down/move/up; intermediate states
//! mutate the live grid but history records only the final state of a
//! gesture, so one drag is one undo step. Events accumulate internally
//! and are drained with [`Session::take_events`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::draw;
use crate::events::{
    ClipboardChangedEvent, GridChangedEvent, SelectionChangedEvent, SessionEvent,
};
use crate::grid::{Coord, YearGrid};
use crate::history::History;
use crate::paste::{self, PasteOffset};
use crate::selection::{Selection, SelectionContext, GridId};

/// The active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Pencil,
    Fill,
    Rectangle,
    RectangleBorder,
    Select,
    Paste,
}

struct YearEntry {
    id: GridId,
    grid: YearGrid,
    history: History,
}

/// State of one in-flight pointer gesture.
struct Gesture {
    year: i32,
    tool: Tool,
    start: Coord,
    last: Coord,
    /// Grid as it was at gesture start; rectangle previews re-apply
    /// onto this so dragging never stacks intermediate rectangles.
    base: YearGrid,
}

pub struct Session {
    years: BTreeMap<i32, YearEntry>,
    /// Next id to assign to a new grid. Monotonically increasing,
    /// never reused.
    next_grid_id: u64,
    selection: SelectionContext,
    tool: Tool,
    intensity: u8,
    paste_offset: PasteOffset,
    gesture: Option<Gesture>,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            years: BTreeMap::new(),
            next_grid_id: 1,
            selection: SelectionContext::new(),
            tool: Tool::default(),
            intensity: 1,
            paste_offset: PasteOffset::default(),
            gesture: None,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Drain the pending event queue.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Year lifecycle
    // =========================================================================

    /// Open a year, creating its grid and a one-entry history.
    /// Returns false if the year is already open or not representable.
    pub fn add_year(&mut self, year: i32) -> bool {
        match YearGrid::new(year) {
            Some(grid) => self.insert_year_grid(grid),
            None => false,
        }
    }

    /// Install a prepared grid, with a fresh history anchored at its
    /// current state. Used when restoring from disk. Returns false if
    /// the grid's year is already open.
    pub fn insert_year_grid(&mut self, grid: YearGrid) -> bool {
        let year = grid.year();
        if self.years.contains_key(&year) {
            return false;
        }
        let id = GridId(self.next_grid_id);
        self.next_grid_id += 1;
        let history = History::new(grid.clone());
        self.years.insert(year, YearEntry { id, grid, history });
        self.emit(SessionEvent::YearAdded(year));
        true
    }

    /// Close a year, dropping its grid and history. Clears the
    /// selection if that grid owned it; the clipboard is unaffected.
    pub fn remove_year(&mut self, year: i32) -> bool {
        let entry = match self.years.remove(&year) {
            Some(e) => e,
            None => return false,
        };
        if self.selection.selection().map(|s| s.grid) == Some(entry.id) {
            let cleared = self.selection.clear();
            self.emit(SessionEvent::SelectionChanged(SelectionChangedEvent {
                active: None,
                cleared,
            }));
        }
        self.emit(SessionEvent::YearRemoved(year));
        true
    }

    /// Open years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn grid(&self, year: i32) -> Option<&YearGrid> {
        self.years.get(&year).map(|e| &e.grid)
    }

    pub fn grid_id(&self, year: i32) -> Option<GridId> {
        self.years.get(&year).map(|e| e.id)
    }

    fn year_of(&self, id: GridId) -> Option<i32> {
        self.years
            .iter()
            .find(|(_, e)| e.id == id)
            .map(|(year, _)| *year)
    }

    // =========================================================================
    // Tool state
    // =========================================================================

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Any in-flight gesture commits first; leaving the
    /// select tool drops the selection, leaving the paste tool resets
    /// the paste offset. The clipboard always survives.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if self.gesture.is_some() {
            self.end_gesture(None);
        }
        let previous = self.tool;
        self.tool = tool;

        if tool != Tool::Select {
            self.clear_selection();
        }
        if previous == Tool::Paste {
            self.paste_offset.reset();
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn set_intensity(&mut self, level: u8) {
        self.intensity = level.min(4);
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Pointer down on a grid. For the paste tool this commits
    /// immediately; other tools open a gesture that ends with
    /// [`Session::end_gesture`].
    pub fn begin_gesture(&mut self, year: i32, at: Coord) -> bool {
        if self.gesture.is_some() || !self.years.contains_key(&year) {
            return false;
        }
        if self.tool == Tool::Paste {
            return self.paste(year, at);
        }

        let tool = self.tool;
        let intensity = self.intensity;
        let (id, base) = {
            let entry = &self.years[&year];
            (entry.id, entry.grid.clone())
        };

        match tool {
            Tool::Pencil => {
                let entry = self.years.get_mut(&year).expect("year checked above");
                entry.grid = draw::pencil(&entry.grid, at, intensity);
            }
            Tool::Fill => {
                let entry = self.years.get_mut(&year).expect("year checked above");
                entry.grid = draw::flood_fill(&entry.grid, at, intensity);
            }
            Tool::Rectangle | Tool::RectangleBorder => {
                let bordered = tool == Tool::RectangleBorder;
                let entry = self.years.get_mut(&year).expect("year checked above");
                entry.grid = draw::rectangle(&base, at, at, bordered, intensity);
            }
            Tool::Select => {
                let superseded = self.selection.begin(id, at);
                // The superseded grid repaints before the new
                // selection becomes visible.
                if superseded.is_some() {
                    self.emit(SessionEvent::SelectionChanged(SelectionChangedEvent {
                        active: None,
                        cleared: superseded,
                    }));
                }
                self.emit(SessionEvent::SelectionChanged(SelectionChangedEvent {
                    active: Some(id),
                    cleared: None,
                }));
            }
            Tool::Paste => unreachable!("handled above"),
        }

        self.gesture = Some(Gesture {
            year,
            tool,
            start: at,
            last: at,
            base,
        });
        true
    }

    /// Pointer moved while the button is held.
    pub fn update_gesture(&mut self, at: Coord) -> bool {
        let (year, tool, start) = match &self.gesture {
            Some(g) => (g.year, g.tool, g.start),
            None => return false,
        };
        let intensity = self.intensity;

        match tool {
            Tool::Pencil => {
                if let Some(entry) = self.years.get_mut(&year) {
                    entry.grid = draw::pencil(&entry.grid, at, intensity);
                }
            }
            Tool::Rectangle | Tool::RectangleBorder => {
                let bordered = tool == Tool::RectangleBorder;
                if let Some(entry) = self.years.get_mut(&year) {
                    let base = &self.gesture.as_ref().expect("gesture checked above").base;
                    entry.grid = draw::rectangle(base, start, at, bordered, intensity);
                }
            }
            Tool::Select => {
                if let Some(id) = self.grid_id(year) {
                    self.selection.update_end(id, at);
                }
            }
            Tool::Fill | Tool::Paste => {}
        }

        if let Some(g) = self.gesture.as_mut() {
            g.last = at;
        }
        true
    }

    /// Pointer released. A release outside the grid still completes
    /// the gesture. Paint gestures push at most one history
    /// entry, carrying the final grid state. Returns true when history
    /// changed.
    pub fn end_gesture(&mut self, at: Option<Coord>) -> bool {
        let g = match self.gesture.take() {
            Some(g) => g,
            None => return false,
        };

        match g.tool {
            Tool::Select => return false,
            Tool::Pencil => {
                if let (Some(a), Some(entry)) = (at, self.years.get_mut(&g.year)) {
                    entry.grid = draw::pencil(&entry.grid, a, self.intensity);
                }
            }
            Tool::Rectangle | Tool::RectangleBorder => {
                let bordered = g.tool == Tool::RectangleBorder;
                let end = at.unwrap_or(g.last);
                if let Some(entry) = self.years.get_mut(&g.year) {
                    entry.grid = draw::rectangle(&g.base, g.start, end, bordered, self.intensity);
                }
            }
            Tool::Fill | Tool::Paste => {}
        }

        let changed = match self.years.get_mut(&g.year) {
            Some(entry) => entry.history.push(entry.grid.clone()),
            None => false,
        };
        self.emit(SessionEvent::GridChanged(GridChangedEvent {
            year: g.year,
            history_changed: changed,
        }));
        changed
    }

    // =========================================================================
    // Selection and clipboard
    // =========================================================================

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.selection()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    pub fn has_clipboard(&self) -> bool {
        self.selection.has_clipboard()
    }

    /// Drop the selection (tool change, click outside, year removal).
    pub fn clear_selection(&mut self) {
        if let Some(owner) = self.selection.clear() {
            self.emit(SessionEvent::SelectionChanged(SelectionChangedEvent {
                active: None,
                cleared: Some(owner),
            }));
        }
    }

    /// Copy the selected rectangle into the clipboard. No-op without a
    /// selection. A fresh payload resets the paste offset.
    pub fn copy(&mut self) -> bool {
        let owner = match self.selection.selection() {
            Some(s) => s.grid,
            None => return false,
        };
        let year = match self.year_of(owner) {
            Some(y) => y,
            None => return false,
        };
        let grid = self.years[&year].grid.clone();
        if !self.selection.copy(&grid) {
            return false;
        }
        self.paste_offset.reset();
        self.emit(SessionEvent::ClipboardChanged(ClipboardChangedEvent {
            present: true,
        }));
        true
    }

    /// Copy, then blank the selected rectangle. One history commit.
    pub fn cut(&mut self) -> bool {
        let owner = match self.selection.selection() {
            Some(s) => s.grid,
            None => return false,
        };
        let year = match self.year_of(owner) {
            Some(y) => y,
            None => return false,
        };
        let grid = self.years[&year].grid.clone();
        let next = match self.selection.cut(&grid) {
            Some(g) => g,
            None => return false,
        };
        let changed = {
            let entry = self.years.get_mut(&year).expect("owner year exists");
            entry.grid = next;
            entry.history.push(entry.grid.clone())
        };
        self.paste_offset.reset();
        self.emit(SessionEvent::GridChanged(GridChangedEvent {
            year,
            history_changed: changed,
        }));
        self.emit(SessionEvent::ClipboardChanged(ClipboardChangedEvent {
            present: true,
        }));
        true
    }

    pub fn paste_offset(&self) -> PasteOffset {
        self.paste_offset
    }

    /// Arrow-key adjustment while the paste tool is armed.
    pub fn nudge_paste(&mut self, d_row: i32, d_col: i32) {
        self.paste_offset.nudge(d_row, d_col);
    }

    /// Cells a paste at `anchor` would write, for preview rendering.
    pub fn paste_preview(&self, year: i32, anchor: Coord) -> Vec<(Coord, u8)> {
        let payload = match self.selection.clipboard() {
            Some(p) => p,
            None => return Vec::new(),
        };
        match self.years.get(&year) {
            Some(entry) => paste::preview(&entry.grid, payload, anchor, self.paste_offset),
            None => Vec::new(),
        }
    }

    /// Commit the clipboard at `anchor` in one atomic write. False
    /// when there is no clipboard, no such year, or no eligible cell
    /// (in which case no history entry is created either).
    pub fn paste(&mut self, year: i32, anchor: Coord) -> bool {
        let payload = match self.selection.clipboard() {
            Some(p) => p.clone(),
            None => return false,
        };
        let next = match self.years.get(&year) {
            Some(entry) => paste::commit(&entry.grid, &payload, anchor, self.paste_offset),
            None => return false,
        };
        let next = match next {
            Some(g) => g,
            None => return false,
        };
        let changed = {
            let entry = self.years.get_mut(&year).expect("year checked above");
            entry.grid = next;
            entry.history.push(entry.grid.clone())
        };
        self.emit(SessionEvent::GridChanged(GridChangedEvent {
            year,
            history_changed: changed,
        }));
        true
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn can_undo(&self, year: i32) -> bool {
        self.years.get(&year).map(|e| e.history.can_undo()).unwrap_or(false)
    }

    pub fn can_redo(&self, year: i32) -> bool {
        self.years.get(&year).map(|e| e.history.can_redo()).unwrap_or(false)
    }

    pub fn undo(&mut self, year: i32) -> bool {
        let restored = match self.years.get_mut(&year) {
            Some(entry) => match entry.history.undo() {
                Some(g) => {
                    entry.grid = g;
                    true
                }
                None => false,
            },
            None => false,
        };
        if restored {
            self.emit(SessionEvent::GridChanged(GridChangedEvent {
                year,
                history_changed: true,
            }));
        }
        restored
    }

    pub fn redo(&mut self, year: i32) -> bool {
        let restored = match self.years.get_mut(&year) {
            Some(entry) => match entry.history.redo() {
                Some(g) => {
                    entry.grid = g;
                    true
                }
                None => false,
            },
            None => false,
        };
        if restored {
            self.emit(SessionEvent::GridChanged(GridChangedEvent {
                year,
                history_changed: true,
            }));
        }
        restored
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Sparse date → intensity map over all open years. Blank and
    /// Empty cells are omitted; keys are ISO `YYYY-MM-DD`.
    pub fn export_map(&self) -> BTreeMap<String, u8> {
        let mut map = BTreeMap::new();
        for (year, entry) in &self.years {
            for (at, level) in entry.grid.painted() {
                if let Some(date) = calendar::cell_to_date(*year, at) {
                    map.insert(date.format("%Y-%m-%d").to_string(), level);
                }
            }
        }
        map
    }

    /// Write imported entries onto the session, lazily opening years
    /// as needed. Entries whose target cell is Empty or out of bounds
    /// are skipped. Each touched year gets one history commit.
    /// Returns the years whose grids changed.
    ///
    /// Payload validation happens upstream; by the time a map reaches
    /// this method the import can no longer fail, so it never
    /// partially applies a rejected payload.
    pub fn apply_import(&mut self, entries: &BTreeMap<NaiveDate, u8>) -> Vec<i32> {
        let mut touched: Vec<i32> = Vec::new();
        for (date, level) in entries {
            let year = date.year();
            if !self.years.contains_key(&year) && !self.add_year(year) {
                continue;
            }
            let at = calendar::date_to_cell(*date);
            let entry = self.years.get_mut(&year).expect("year just ensured");
            if entry.grid.is_paintable(at) {
                let _ = entry.grid.set(at, (*level).min(4));
                if !touched.contains(&year) {
                    touched.push(year);
                }
            }
        }

        let mut changed_years = Vec::new();
        for year in touched {
            let changed = {
                let entry = self.years.get_mut(&year).expect("touched year exists");
                entry.history.push(entry.grid.clone())
            };
            if changed {
                changed_years.push(year);
            }
            self.emit(SessionEvent::GridChanged(GridChangedEvent {
                year,
                history_changed: changed,
            }));
        }
        changed_years
    }
}
