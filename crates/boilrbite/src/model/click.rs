//! Row click events and their ordered handler slots.
//!
//! A click on a row produces one [`ClickEvent`] carrying whatever is known
//! about it: the item, the view that was hit, and the row position. The event
//! is dispatched through [`ClickSignals`], whose slots fire in a fixed order,
//! each only when the fields it needs are present:
//!
//! | order | signal | needs |
//! |---|---|---|
//! | 1 | `clicked` | nothing |
//! | 2 | `item_clicked` | item |
//! | 3 | `view_clicked` | view |
//! | 4 | `position_clicked` | position |
//! | 5 | `item_at_clicked` | item, position |
//! | 6 | `view_item_at_clicked` | view, item, position |

use boilrbite_core::Signal;
use boilrbite_core::logging::targets;

/// Identifier of a view inside a row layout (the root or one of its children).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

/// A click on a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent<T> {
    /// The item bound to the clicked row.
    pub item: Option<T>,
    /// The view that received the click.
    pub view: Option<ViewId>,
    /// The row position, if the row is still attached to a valid position.
    pub position: Option<usize>,
}

impl<T> Default for ClickEvent<T> {
    fn default() -> Self {
        Self {
            item: None,
            view: None,
            position: None,
        }
    }
}

impl<T> ClickEvent<T> {
    /// Creates an event with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item.
    pub fn with_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    /// Sets the clicked view.
    pub fn with_view(mut self, view: ViewId) -> Self {
        self.view = Some(view);
        self
    }

    /// Sets the row position.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

/// Handler slots for row clicks, dispatched in declaration order.
pub struct ClickSignals<T> {
    /// Fires for every click.
    pub clicked: Signal<()>,
    /// Args: item.
    pub item_clicked: Signal<T>,
    /// Args: view.
    pub view_clicked: Signal<ViewId>,
    /// Args: position.
    pub position_clicked: Signal<usize>,
    /// Args: (item, position).
    pub item_at_clicked: Signal<(T, usize)>,
    /// Args: (view, item, position).
    pub view_item_at_clicked: Signal<(ViewId, T, usize)>,
}

impl<T: Clone + 'static> Default for ClickSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ClickSignals<T> {
    /// Creates a set of click slots with no handlers.
    pub fn new() -> Self {
        Self {
            clicked: Signal::new(),
            item_clicked: Signal::new(),
            view_clicked: Signal::new(),
            position_clicked: Signal::new(),
            item_at_clicked: Signal::new(),
            view_item_at_clicked: Signal::new(),
        }
    }

    /// Dispatches an event to every slot whose required fields are present.
    pub fn dispatch(&self, event: &ClickEvent<T>) {
        tracing::trace!(
            target: targets::ADAPTER,
            has_item = event.item.is_some(),
            view = ?event.view,
            position = ?event.position,
            "dispatching click"
        );

        self.clicked.emit(());
        if let Some(item) = &event.item {
            self.item_clicked.emit(item.clone());
        }
        if let Some(view) = event.view {
            self.view_clicked.emit(view);
        }
        if let Some(position) = event.position {
            self.position_clicked.emit(position);
            if let Some(item) = &event.item {
                self.item_at_clicked.emit((item.clone(), position));
                if let Some(view) = event.view {
                    self.view_item_at_clicked
                        .emit((view, item.clone(), position));
                }
            }
        }
    }

    /// Total number of connected handlers across all slots.
    pub fn connection_count(&self) -> usize {
        self.clicked.connection_count()
            + self.item_clicked.connection_count()
            + self.view_clicked.connection_count()
            + self.position_clicked.connection_count()
            + self.item_at_clicked.connection_count()
            + self.view_item_at_clicked.connection_count()
    }

    /// Disconnects every handler.
    pub fn disconnect_all(&self) {
        self.clicked.disconnect_all();
        self.item_clicked.disconnect_all();
        self.view_clicked.disconnect_all();
        self.position_clicked.disconnect_all();
        self.item_at_clicked.disconnect_all();
        self.view_item_at_clicked.disconnect_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_signals() -> (ClickSignals<&'static str>, Arc<Mutex<Vec<String>>>) {
        let signals = ClickSignals::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = log.clone();
        signals.clicked.connect(move |_| l.lock().push("clicked".to_string()));
        let l = log.clone();
        signals
            .item_clicked
            .connect(move |item| l.lock().push(format!("item:{item}")));
        let l = log.clone();
        signals
            .view_clicked
            .connect(move |view| l.lock().push(format!("view:{}", view.0)));
        let l = log.clone();
        signals
            .position_clicked
            .connect(move |position| l.lock().push(format!("position:{position}")));
        let l = log.clone();
        signals
            .item_at_clicked
            .connect(move |(item, position)| l.lock().push(format!("item_at:{item}@{position}")));
        let l = log.clone();
        signals
            .view_item_at_clicked
            .connect(move |(view, item, position)| {
                l.lock().push(format!("view_item_at:{}:{item}@{position}", view.0))
            });

        (signals, log)
    }

    #[test]
    fn test_full_event_fires_every_slot_in_order() {
        let (signals, log) = recording_signals();

        signals.dispatch(
            &ClickEvent::new()
                .with_item("alice")
                .with_view(ViewId(7))
                .with_position(3),
        );

        assert_eq!(
            *log.lock(),
            vec![
                "clicked",
                "item:alice",
                "view:7",
                "position:3",
                "item_at:alice@3",
                "view_item_at:7:alice@3",
            ]
        );
    }

    #[test]
    fn test_missing_position_skips_positional_slots() {
        let (signals, log) = recording_signals();

        signals.dispatch(&ClickEvent::new().with_item("bob").with_view(ViewId(1)));

        assert_eq!(*log.lock(), vec!["clicked", "item:bob", "view:1"]);
    }

    #[test]
    fn test_empty_event_fires_only_clicked() {
        let (signals, log) = recording_signals();
        signals.dispatch(&ClickEvent::new());
        assert_eq!(*log.lock(), vec!["clicked"]);
    }

    #[test]
    fn test_position_without_item() {
        let (signals, log) = recording_signals();
        signals.dispatch(&ClickEvent::new().with_view(ViewId(2)).with_position(0));
        assert_eq!(*log.lock(), vec!["clicked", "view:2", "position:0"]);
    }

    #[test]
    fn test_connection_count_and_disconnect() {
        let (signals, _log) = recording_signals();
        assert_eq!(signals.connection_count(), 6);
        signals.disconnect_all();
        assert_eq!(signals.connection_count(), 0);
    }
}
