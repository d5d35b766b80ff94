//! Core traits for the list layer.
//!
//! This module defines the surface a view binder consumes ([`ListSource`]),
//! the bounds list items satisfy ([`ListItem`]) and the signals a reconciler
//! emits ([`ReconcilerSignals`]).

use boilrbite_core::Signal;

use super::diff::ListDiff;
use super::selection::SelectionChange;
use super::view_type::ViewTypeId;

/// Bounds every list item satisfies.
///
/// Items are plain values: cloned out to observers, compared structurally by
/// `index_of`, and shared with signal slots. Any `Clone + PartialEq` type that
/// is `Send + Sync` qualifies through the blanket implementation.
pub trait ListItem: Clone + PartialEq + Send + Sync + 'static {}

impl<T> ListItem for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// The outbound surface a view binder uses to render rows.
///
/// # Example
///
/// ```
/// use boilrbite::model::{ItemCallback, ListReconciler, ListSource};
///
/// fn describe<S: ListSource<String>>(source: &S) -> Vec<String> {
///     (0..source.item_count())
///         .filter_map(|row| source.item_at(row))
///         .collect()
/// }
///
/// let list = ListReconciler::new(ItemCallback::new(|a: &String, b: &String| a == b));
/// list.set_items(vec!["a".into(), "b".into()]);
/// assert_eq!(describe(&list), vec!["a", "b"]);
/// ```
pub trait ListSource<T: ListItem>: Send + Sync {
    /// Returns the number of rows.
    fn item_count(&self) -> usize;

    /// Returns the item at `index`, or `None` if out of range.
    fn item_at(&self, index: usize) -> Option<T>;

    /// Returns the view type for the row at `index`, or `None` if out of range.
    fn view_type_at(&self, index: usize) -> Option<ViewTypeId>;

    /// Returns the selected row.
    fn selected_index(&self) -> Option<usize>;

    /// Returns the signals for this source.
    fn signals(&self) -> &ReconcilerSignals<T>;

    /// Returns `true` if the row at `index` is selected.
    fn is_selected(&self, index: usize) -> bool {
        self.selected_index() == Some(index)
    }
}

/// Collection of signals emitted by a reconciler.
///
/// # Signal Usage
///
/// - `list_submitted`: after every list replacement, with the computed diff
/// - `row_refresh_requested`: a row must be redrawn although its content did
///   not change (selection affects presentation)
/// - `selection_changed`: the selected row changed
pub struct ReconcilerSignals<T> {
    /// Emitted after a new list has been submitted.
    /// Args: diff between the previous and the new list
    pub list_submitted: Signal<ListDiff>,

    /// Emitted when a row needs to be redrawn.
    /// Args: row position
    pub row_refresh_requested: Signal<usize>,

    /// Emitted when the selection changes.
    pub selection_changed: Signal<SelectionChange<T>>,
}

impl<T: 'static> Default for ReconcilerSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ReconcilerSignals<T> {
    /// Creates a new set of reconciler signals.
    pub fn new() -> Self {
        Self {
            list_submitted: Signal::new(),
            row_refresh_requested: Signal::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Requests a redraw for each row in `rows`.
    pub fn emit_rows_refresh(&self, rows: impl IntoIterator<Item = usize>) {
        for row in rows {
            self.row_refresh_requested.emit(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_reconciler_signals_creation() {
        let signals = ReconcilerSignals::<String>::new();
        assert_eq!(signals.list_submitted.connection_count(), 0);
        assert_eq!(signals.selection_changed.connection_count(), 0);
    }

    #[test]
    fn test_emit_rows_refresh() {
        let signals = ReconcilerSignals::<String>::new();
        let rows = Arc::new(Mutex::new(Vec::new()));

        let recv = rows.clone();
        signals
            .row_refresh_requested
            .connect(move |row| recv.lock().push(*row));

        signals.emit_rows_refresh([4, 1]);
        assert_eq!(*rows.lock(), vec![4, 1]);
    }
}
