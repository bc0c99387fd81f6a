//! Shared browse state machine for list-backed screens.

use std::fmt::Display;

use ratatui::widgets::TableState;

/// Identifies one issued load so late responses can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Issues increasing [`RequestToken`]s.
#[derive(Debug, Default)]
pub struct RequestSeq {
    last: u64,
}

impl RequestSeq {
    /// Issues a token newer than every token issued before.
    pub const fn issue(&mut self) -> RequestToken {
        self.last = self.last.wrapping_add(1);
        RequestToken(self.last)
    }
}

/// Load phase of a [`TitleList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never loaded.
    Empty,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Populated,
    /// The last load failed; rows from before the load are kept.
    Failed,
}

/// Rows plus the load lifecycle and cursor of one list.
#[derive(Debug)]
pub struct TitleList<T> {
    /// Name used in log records.
    label: &'static str,
    rows: Vec<T>,
    phase: Phase,
    seq: RequestSeq,
    pending: Option<RequestToken>,
    /// Selection and scroll state.
    pub table_state: TableState,
}

impl<T> TitleList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            rows: Vec::new(),
            phase: Phase::Empty,
            seq: RequestSeq::default(),
            pending: None,
            table_state: TableState::default(),
        }
    }

    /// Enters `Loading` and returns the token the response must carry.
    ///
    /// Any earlier pending token becomes stale.
    pub const fn begin_load(&mut self) -> RequestToken {
        let token = self.seq.issue();
        self.pending = Some(token);
        self.phase = Phase::Loading;
        token
    }

    /// Applies a load result.
    ///
    /// Returns `false` if `token` is not the latest issued one, in which
    /// case the result is dropped and nothing changes.
    pub fn finish<E: Display>(&mut self, token: RequestToken, result: Result<Vec<T>, E>) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(list = self.label, "dropping stale response");
            return false;
        }
        self.pending = None;

        match result {
            Ok(rows) => {
                tracing::debug!(list = self.label, count = rows.len(), "list loaded");
                self.rows = rows;
                self.phase = Phase::Populated;
                self.clamp_selection();
            }
            Err(err) => {
                tracing::warn!(list = self.label, error = %err, "failed to load list");
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Displayed rows in load order.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns the selected row (if any).
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.table_state.selected()?)
    }

    /// Removes and returns the selected row.
    pub fn remove_selected(&mut self) -> Option<T> {
        let idx = self.table_state.selected()?;
        if idx >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(idx);
        self.clamp_selection();
        Some(row)
    }

    /// Moves cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        if let Some(current) = self.table_state.selected()
            && current > 0
        {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        match self.table_state.selected() {
            Some(current) if current + 1 < self.rows.len() => {
                self.table_state.select(Some(current + 1));
            }
            None if !self.rows.is_empty() => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    /// Keeps the cursor inside the rows.
    #[allow(clippy::arithmetic_side_effects)]
    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let last = self.rows.len() - 1;
        let idx = self.table_state.selected().unwrap_or(0).min(last);
        self.table_state.select(Some(idx));
    }
}
