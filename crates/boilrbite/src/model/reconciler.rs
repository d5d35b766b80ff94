//! Diff-driven list reconciliation with single-row selection.
//!
//! `ListReconciler<T>` owns the current ordered list of items. Every mutation
//! builds a complete new list and submits it: the diff engine compares it with
//! the previous one using the caller's predicates, the list is replaced, and
//! observers receive the diff through [`ReconcilerSignals::list_submitted`].
//!
//! # Threading
//!
//! The reconciler must only be mutated from the thread that created it.
//! Internal locks make it `Send + Sync` so observers can hold it, and are
//! released before any signal fires, so observers may call back in. Debug
//! builds assert the thread on every mutation.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use boilrbite_core::logging::{span_names, targets};
use boilrbite_core::{PerfSpan, ThreadAffinity};

use super::diff::{DiffEngine, ItemCallback, MyersDiffEngine};
use super::selection::{SelectionChange, SingleSelection};
use super::traits::{ListItem, ListSource, ReconcilerSignals};
use super::view_type::{ViewTypeId, ViewTypeSelector};

/// An ordered list of items reconciled through a diff engine.
///
/// # Example
///
/// ```
/// use boilrbite::model::{ItemCallback, ListReconciler};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Task {
///     id: u32,
///     title: String,
/// }
///
/// let tasks = ListReconciler::new(ItemCallback::with_identity(
///     |a: &Task, b: &Task| a.id == b.id,
///     |a: &Task, b: &Task| a.title == b.title,
/// ));
///
/// tasks.add_or_update_items(vec![
///     Task { id: 1, title: "Buy groceries".into() },
///     Task { id: 2, title: "Walk dog".into() },
/// ]);
///
/// // Same id: updated in place
/// tasks.add_or_update(Task { id: 1, title: "Buy milk".into() });
/// assert_eq!(tasks.len(), 2);
/// assert_eq!(tasks.item_at(0).unwrap().title, "Buy milk");
///
/// // Select the second row; selecting it again toggles it off
/// assert!(tasks.set_selected(1, true));
/// assert!(!tasks.set_selected(1, true));
/// ```
pub struct ListReconciler<T> {
    items: RwLock<Vec<T>>,
    selection: Mutex<SingleSelection>,
    callback: ItemCallback<T>,
    engine: Box<dyn DiffEngine<T>>,
    view_type_selector: Option<ViewTypeSelector<T>>,
    signals: ReconcilerSignals<T>,
    affinity: ThreadAffinity,
}

impl<T: ListItem> ListReconciler<T> {
    /// Creates an empty reconciler using the default diff engine.
    pub fn new(callback: ItemCallback<T>) -> Self {
        Self::with_engine(callback, MyersDiffEngine)
    }

    /// Creates an empty reconciler with a custom diff engine.
    pub fn with_engine<E>(callback: ItemCallback<T>, engine: E) -> Self
    where
        E: DiffEngine<T> + 'static,
    {
        Self::with_boxed_engine(callback, Box::new(engine))
    }

    pub(crate) fn with_boxed_engine(callback: ItemCallback<T>, engine: Box<dyn DiffEngine<T>>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            selection: Mutex::new(SingleSelection::new()),
            callback,
            engine,
            view_type_selector: None,
            signals: ReconcilerSignals::new(),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Sets the view-type selector used for multi-layout lists.
    ///
    /// Without a selector every row has [`ViewTypeId::DEFAULT`].
    pub fn with_view_type_selector<F>(mut self, selector: F) -> Self
    where
        F: Fn(usize, &T) -> ViewTypeId + Send + Sync + 'static,
    {
        self.view_type_selector = Some(Arc::new(selector));
        self
    }

    pub(crate) fn set_view_type_selector(&mut self, selector: Option<ViewTypeSelector<T>>) {
        self.view_type_selector = selector;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a reference to the items (read-only access).
    ///
    /// Do not hold the guard across a mutation of the same reconciler.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Returns a clone of the item at `position`.
    pub fn item_at(&self, position: usize) -> Option<T> {
        self.items.read().get(position).cloned()
    }

    /// Returns the first index whose item is structurally equal to `item`.
    ///
    /// This ignores the identity and content predicates.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|current| current == item)
    }

    /// Returns the item comparison predicates.
    pub fn callback(&self) -> &ItemCallback<T> {
        &self.callback
    }

    /// Returns the signals for this reconciler.
    pub fn signals(&self) -> &ReconcilerSignals<T> {
        &self.signals
    }

    /// Returns the view type for the row at `position`.
    pub fn view_type(&self, position: usize) -> Option<ViewTypeId> {
        let items = self.items.read();
        let item = items.get(position)?;
        Some(match &self.view_type_selector {
            Some(selector) => selector(position, item),
            None => ViewTypeId::DEFAULT,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the list wholesale.
    ///
    /// The list afterwards equals `items` exactly, duplicates included.
    pub fn set_items(&self, items: Vec<T>) {
        self.submit(items);
    }

    /// Removes all items.
    pub fn clear(&self) {
        self.submit(Vec::new());
    }

    /// Adds new items and updates existing ones, matched by identity.
    ///
    /// The batch is first deduplicated by identity: the last occurrence's
    /// value wins and takes the place of the first occurrence. Each surviving
    /// item then replaces the current item with the same identity in place,
    /// or is appended in batch order. Empty batches are ignored.
    pub fn add_or_update_items(&self, batch: Vec<T>) {
        if batch.is_empty() {
            tracing::trace!(target: targets::RECONCILER, "empty add_or_update batch ignored");
            return;
        }

        let mut next = self.items.read().clone();
        let existing = next.len();
        let mut appended = Vec::new();

        for item in self.dedup_by_identity(batch) {
            match next[..existing]
                .iter()
                .position(|current| self.callback.are_items_the_same(current, &item))
            {
                Some(index) => next[index] = item,
                None => appended.push(item),
            }
        }

        tracing::trace!(
            target: targets::RECONCILER,
            existing,
            appended = appended.len(),
            "add_or_update"
        );
        next.extend(appended);
        self.submit(next);
    }

    /// Adds or updates a single item.
    pub fn add_or_update(&self, item: T) {
        self.add_or_update_items(vec![item]);
    }

    /// Removes every item whose identity matches any of `to_remove`.
    pub fn remove_items(&self, to_remove: &[T]) {
        if to_remove.is_empty() {
            tracing::trace!(target: targets::RECONCILER, "empty remove batch ignored");
            return;
        }

        let next: Vec<T> = {
            let items = self.items.read();
            let next: Vec<T> = items
                .iter()
                .filter(|current| {
                    !to_remove
                        .iter()
                        .any(|target| self.callback.are_items_the_same(current, target))
                })
                .cloned()
                .collect();
            if next.len() == items.len() {
                tracing::trace!(target: targets::RECONCILER, "remove matched no items");
                return;
            }
            next
        };

        self.submit(next);
    }

    /// Removes the first item structurally equal to `item`.
    pub fn remove(&self, item: &T) {
        match self.index_of(item) {
            Some(position) => self.remove_at(position),
            None => tracing::trace!(target: targets::RECONCILER, "remove: item not found"),
        }
    }

    /// Removes the item at `position`. Out-of-range positions are ignored.
    pub fn remove_at(&self, position: usize) {
        let next = {
            let items = self.items.read();
            if position >= items.len() {
                tracing::trace!(
                    target: targets::RECONCILER,
                    position,
                    len = items.len(),
                    "remove_at out of range ignored"
                );
                return;
            }
            let mut next = items.clone();
            next.remove(position);
            next
        };

        self.submit(next);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Returns the selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.lock().index()
    }

    /// Returns the item at the selected row.
    pub fn selected_item(&self) -> Option<T> {
        let items = self.items.read();
        let index = self.selection.lock().index()?;
        items.get(index).cloned()
    }

    /// Selects the row at `index`, clamped into the list.
    ///
    /// If `index` equals the current selection and `toggle_off_if_same` is
    /// set, the selection is cleared instead. The comparison uses the raw
    /// `index`, see [`super::selection`]. Returns `true` if a row is selected
    /// afterwards. On an empty list nothing happens and `false` is returned.
    pub fn set_selected(&self, index: isize, toggle_off_if_same: bool) -> bool {
        self.apply_selection(index, toggle_off_if_same, None::<fn(Option<&T>)>)
    }

    /// Like [`set_selected`](Self::set_selected), invoking `on_change` with
    /// the newly selected item (or `None` if cleared) before observers are
    /// notified.
    pub fn set_selected_with<F>(&self, index: isize, toggle_off_if_same: bool, on_change: F) -> bool
    where
        F: FnOnce(Option<&T>),
    {
        self.apply_selection(index, toggle_off_if_same, Some(on_change))
    }

    /// Clears the selection. Does nothing if no row is selected.
    pub fn clear_selection(&self) {
        self.affinity.debug_assert_same_thread();

        let change = {
            let items = self.items.read();
            let Some(old_index) = self.selection.lock().clear() else {
                return;
            };
            SelectionChange {
                old_index: Some(old_index),
                old_item: items.get(old_index).cloned(),
                new_index: None,
                new_item: None,
            }
        };

        if let Some(old_index) = change.old_index {
            self.signals.row_refresh_requested.emit(old_index);
        }
        self.signals.selection_changed.emit(change);
    }

    fn apply_selection<F>(&self, index: isize, toggle_off_if_same: bool, on_change: Option<F>) -> bool
    where
        F: FnOnce(Option<&T>),
    {
        self.affinity.debug_assert_same_thread();

        let (outcome, change) = {
            let items = self.items.read();
            let mut selection = self.selection.lock();
            let Some(outcome) = selection.select(index, items.len(), toggle_off_if_same) else {
                tracing::trace!(target: targets::SELECTION, index, "set_selected on empty list ignored");
                return false;
            };
            let change = SelectionChange {
                old_index: outcome.old,
                old_item: outcome.old.and_then(|row| items.get(row).cloned()),
                new_index: outcome.new,
                new_item: outcome.new.and_then(|row| items.get(row).cloned()),
            };
            (outcome, change)
        };

        tracing::debug!(
            target: targets::SELECTION,
            requested = index,
            old = ?outcome.old,
            new = ?outcome.new,
            "selection changed"
        );

        self.signals.emit_rows_refresh(outcome.rows_to_refresh());
        if let Some(on_change) = on_change {
            on_change(change.new_item.as_ref());
        }
        self.signals.selection_changed.emit(change);

        outcome.new.is_some()
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Keeps one entry per identity: last value, first position.
    fn dedup_by_identity(&self, batch: Vec<T>) -> Vec<T> {
        let mut unique: Vec<T> = Vec::with_capacity(batch.len());
        for item in batch {
            match unique
                .iter()
                .position(|kept| self.callback.are_items_the_same(kept, &item))
            {
                Some(index) => unique[index] = item,
                None => unique.push(item),
            }
        }
        unique
    }

    /// Diffs `next` against the current list, installs it and notifies.
    fn submit(&self, next: Vec<T>) {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::SUBMIT);

        let (diff, reselection) = {
            let mut items = self.items.write();
            let diff = self.engine.diff(&items, &next, &self.callback);
            let previous = std::mem::replace(&mut *items, next);
            let reselection = self.reresolve_selection(&previous, &items);
            (diff, reselection)
        };

        tracing::debug!(
            target: targets::RECONCILER,
            old_len = diff.old_len,
            new_len = diff.new_len,
            changes = diff.changes.len(),
            "list submitted"
        );

        self.signals.list_submitted.emit(diff);
        if let Some(change) = reselection {
            self.signals.selection_changed.emit(change);
        }
    }

    /// Moves the selection to the row that kept the selected item's identity,
    /// or clears it. Returns a change notification if the index moved.
    fn reresolve_selection(&self, previous: &[T], current: &[T]) -> Option<SelectionChange<T>> {
        let mut selection = self.selection.lock();
        let old_index = selection.index()?;
        let old_item = previous.get(old_index).cloned();

        let new_index = old_item.as_ref().and_then(|selected| {
            if current
                .get(old_index)
                .is_some_and(|item| self.callback.are_items_the_same(selected, item))
            {
                return Some(old_index);
            }
            current
                .iter()
                .position(|item| self.callback.are_items_the_same(selected, item))
        });

        selection.set(new_index);
        if new_index == Some(old_index) {
            return None;
        }

        tracing::debug!(
            target: targets::SELECTION,
            old = old_index,
            new = ?new_index,
            "selection re-resolved after submit"
        );

        Some(SelectionChange {
            old_index: Some(old_index),
            old_item,
            new_index,
            new_item: new_index.and_then(|row| current.get(row).cloned()),
        })
    }
}

impl<T: ListItem> ListSource<T> for ListReconciler<T> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<T> {
        ListReconciler::item_at(self, index)
    }

    fn view_type_at(&self, index: usize) -> Option<ViewTypeId> {
        self.view_type(index)
    }

    fn selected_index(&self) -> Option<usize> {
        ListReconciler::selected_index(self)
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selection.lock().is_selected(index)
    }

    fn signals(&self) -> &ReconcilerSignals<T> {
        &self.signals
    }
}

static_assertions::assert_impl_all!(ListReconciler<String>: Send, Sync);
