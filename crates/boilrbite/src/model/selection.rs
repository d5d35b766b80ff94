//! Single-row selection tracking.
//!
//! [`SingleSelection`] holds the selection arithmetic: clamping a requested
//! index into the list and toggling off when the same row is chosen twice.
//! The reconciler wraps it, resolves items and emits [`SelectionChange`].
//!
//! # Toggle comparison
//!
//! The "same row" check compares the previous selection (or `-1` when there
//! was none) against the **raw, unclamped** requested index. Clamping only
//! decides which row becomes selected. Consequences:
//!
//! - `select(2)` twice on a list of at least three rows toggles off;
//! - `select(99)` twice on a three-row list selects row 2 both times;
//! - `select(-1)` with nothing selected clears, which is how a view with no
//!   position asks for "no selection".

/// Notification emitted when the selected row changes.
///
/// `new_index`/`new_item` describe the selection after the change and are
/// `None` when it was cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange<T> {
    /// Previously selected row.
    pub old_index: Option<usize>,
    /// Item at the previously selected row.
    pub old_item: Option<T>,
    /// Selected row after the change.
    pub new_index: Option<usize>,
    /// Item at the newly selected row.
    pub new_item: Option<T>,
}

impl<T> SelectionChange<T> {
    /// Returns `true` if the change left nothing selected.
    pub fn is_cleared(&self) -> bool {
        self.new_index.is_none()
    }
}

/// Clamps `index` into `[0, len)`.
///
/// Returns `None` for an empty list, where no index is valid.
pub fn clamp_index(index: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.clamp(0, (len - 1) as isize) as usize)
}

/// Outcome of a [`SingleSelection::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Selection before the call.
    pub old: Option<usize>,
    /// Selection after the call.
    pub new: Option<usize>,
    /// The clamped row the request pointed at, selected or not.
    pub target: usize,
}

impl SelectOutcome {
    /// Rows whose presentation depends on this change.
    pub fn rows_to_refresh(&self) -> impl Iterator<Item = usize> {
        let target = (self.old != Some(self.target)).then_some(self.target);
        self.old.into_iter().chain(target)
    }
}

/// The selection state of a list: at most one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleSelection {
    selected: Option<usize>,
}

impl SingleSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected row.
    pub fn index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns `true` if `row` is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected == Some(row)
    }

    /// Selects `requested` in a list of `len` rows.
    ///
    /// Returns `None` without touching the state when the list is empty.
    pub fn select(
        &mut self,
        requested: isize,
        len: usize,
        toggle_off_if_same: bool,
    ) -> Option<SelectOutcome> {
        let target = clamp_index(requested, len)?;
        let old = self.selected;
        let previous = old.map_or(-1, |row| row as isize);

        self.selected = if previous == requested && toggle_off_if_same {
            None
        } else {
            Some(target)
        };

        Some(SelectOutcome {
            old,
            new: self.selected,
            target,
        })
    }

    /// Replaces the selection, returning the previous one.
    pub fn set(&mut self, selected: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.selected, selected)
    }

    /// Clears the selection, returning the previous one.
    pub fn clear(&mut self) -> Option<usize> {
        self.selected.take()
    }
}
