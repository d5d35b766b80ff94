//! Fluent adapter configuration and row wiring.
//!
//! An [`Adapter`] bundles a [`ListReconciler`] with everything a recycling
//! list needs to render rows: the registered layouts, the bind and recycle
//! hooks, and the views that receive click wiring. It is configured through
//! [`AdapterBuilder`], which validates the configuration once at `build()`.
//!
//! The host view system stays outside this crate. It implements [`RowView`]
//! for its row type and calls [`Adapter::bind_row`], [`Adapter::row_clicked`]
//! and [`Adapter::recycle_row`] at the matching points of its lifecycle.
//!
//! # Example
//!
//! ```
//! use boilrbite::adapter::{AdapterBuilder, RowView};
//! use boilrbite::model::{LayoutId, ViewId};
//!
//! #[derive(Default)]
//! struct Row {
//!     text: String,
//! }
//!
//! impl RowView for Row {
//!     fn root_id(&self) -> ViewId {
//!         ViewId(1)
//!     }
//!
//!     fn contains_view(&self, id: ViewId) -> bool {
//!         id == ViewId(2)
//!     }
//! }
//!
//! let adapter = AdapterBuilder::<String, Row>::new()
//!     .layout(LayoutId(100))
//!     .clickable_view(ViewId(2))
//!     .same_content(|a, b| a == b)
//!     .bind(|row, item, _view_type| row.text = item.clone())
//!     .items(vec!["first".into(), "second".into()])
//!     .build()
//!     .unwrap();
//!
//! adapter.click_signals().item_at_clicked.connect(|(item, position)| {
//!     println!("clicked {item} at {position}");
//! });
//!
//! let mut row = Row::default();
//! let binding = adapter.bind_row(&mut row, 1).unwrap();
//! assert_eq!(row.text, "second");
//! assert_eq!(binding.click_targets, vec![ViewId(1), ViewId(2)]);
//!
//! adapter.row_clicked(ViewId(2), 1);
//! ```

use std::ops::Deref;
use std::sync::Arc;

use boilrbite_core::logging::targets;
use boilrbite_core::{BoilrBiteError, Result};

use crate::model::{
    ClickEvent, ClickSignals, ContentFn, DiffEngine, IdentityFn, ItemCallback, LayoutId,
    LayoutRegistry, ListItem, ListReconciler, ListSource, MyersDiffEngine, ReconcilerSignals,
    ViewId, ViewTypeId, ViewTypeSelector,
};

/// A row view supplied by the host view system.
pub trait RowView {
    /// Returns the id of the row's root view.
    fn root_id(&self) -> ViewId;

    /// Returns `true` if the row's hierarchy contains a view with this id.
    fn contains_view(&self, id: ViewId) -> bool;
}

/// Type alias for a row hook: `(view, item, view_type)`.
pub type RowHookFn<T, V> = Arc<dyn Fn(&mut V, &T, ViewTypeId) + Send + Sync>;

/// Result of binding an item to a row view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBinding {
    /// Row position that was bound.
    pub position: usize,
    /// View type of the row.
    pub view_type: ViewTypeId,
    /// Layout that renders the row.
    pub layout: LayoutId,
    /// Views that forward clicks to the adapter: the root first, then every
    /// configured clickable view present in the row.
    pub click_targets: Vec<ViewId>,
}

/// Builder for [`Adapter`].
///
/// | option | default |
/// |---|---|
/// | `items` | empty |
/// | `layout` / `layouts` | required, at least one |
/// | `clickable_view` / `clickable_views` | none |
/// | `same_identity` | structural equality |
/// | `same_content` | required |
/// | `bind` | no-op |
/// | `on_view_recycled` | no-op |
/// | `view_type_selector` | every row uses [`ViewTypeId::DEFAULT`] |
/// | `diff_engine` | [`MyersDiffEngine`] |
pub struct AdapterBuilder<T, V> {
    items: Vec<T>,
    layouts: Vec<LayoutId>,
    clickable_view_ids: Vec<ViewId>,
    same_identity: Option<IdentityFn<T>>,
    same_content: Option<ContentFn<T>>,
    bind: Option<RowHookFn<T, V>>,
    on_view_recycled: Option<RowHookFn<T, V>>,
    view_type_selector: Option<ViewTypeSelector<T>>,
    diff_engine: Option<Box<dyn DiffEngine<T>>>,
}

impl<T: ListItem, V: 'static> Default for AdapterBuilder<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ListItem, V: 'static> AdapterBuilder<T, V> {
    /// Creates a builder with every option at its default.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            layouts: Vec::new(),
            clickable_view_ids: Vec::new(),
            same_identity: None,
            same_content: None,
            bind: None,
            on_view_recycled: None,
            view_type_selector: None,
            diff_engine: None,
        }
    }

    /// Sets the initial items.
    pub fn items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Registers a row layout.
    pub fn layout(mut self, layout: LayoutId) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Registers several row layouts.
    pub fn layouts(mut self, layouts: impl IntoIterator<Item = LayoutId>) -> Self {
        self.layouts.extend(layouts);
        self
    }

    /// Adds a child view that receives click wiring.
    pub fn clickable_view(mut self, id: ViewId) -> Self {
        self.clickable_view_ids.push(id);
        self
    }

    /// Adds several child views that receive click wiring.
    pub fn clickable_views(mut self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.clickable_view_ids.extend(ids);
        self
    }

    /// Sets the identity predicate.
    pub fn same_identity<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.same_identity = Some(Arc::new(f));
        self
    }

    /// Sets the content predicate.
    pub fn same_content<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.same_content = Some(Arc::new(f));
        self
    }

    /// Sets the hook that fills a row view from its item.
    pub fn bind<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut V, &T, ViewTypeId) + Send + Sync + 'static,
    {
        self.bind = Some(Arc::new(f));
        self
    }

    /// Sets the hook called when a row view is handed back for reuse.
    pub fn on_view_recycled<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut V, &T, ViewTypeId) + Send + Sync + 'static,
    {
        self.on_view_recycled = Some(Arc::new(f));
        self
    }

    /// Sets the view-type selector for multi-layout lists.
    pub fn view_type_selector<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &T) -> ViewTypeId + Send + Sync + 'static,
    {
        self.view_type_selector = Some(Arc::new(f));
        self
    }

    /// Replaces the diff engine.
    pub fn diff_engine<E>(mut self, engine: E) -> Self
    where
        E: DiffEngine<T> + 'static,
    {
        self.diff_engine = Some(Box::new(engine));
        self
    }

    /// Validates the configuration and builds the adapter.
    ///
    /// # Errors
    ///
    /// - [`BoilrBiteError::MissingContentPredicate`] if `same_content` was not set
    /// - [`BoilrBiteError::NoLayouts`] if no layout was registered
    pub fn build(self) -> Result<Adapter<T, V>> {
        let same_content = self
            .same_content
            .ok_or(BoilrBiteError::MissingContentPredicate)?;
        let layouts = LayoutRegistry::new(self.layouts)?;

        let same_identity: IdentityFn<T> = match self.same_identity {
            Some(f) => f,
            None => Arc::new(|old: &T, new: &T| old == new),
        };
        let engine: Box<dyn DiffEngine<T>> = match self.diff_engine {
            Some(engine) => engine,
            None => Box::new(MyersDiffEngine),
        };

        let mut list = ListReconciler::with_boxed_engine(
            ItemCallback::from_parts(same_identity, same_content),
            engine,
        );
        list.set_view_type_selector(self.view_type_selector);
        if !self.items.is_empty() {
            list.set_items(self.items);
        }

        tracing::debug!(
            target: targets::ADAPTER,
            layouts = layouts.layouts().len(),
            clickable_views = self.clickable_view_ids.len(),
            items = list.len(),
            "adapter built"
        );

        Ok(Adapter {
            list,
            layouts,
            clickable_view_ids: self.clickable_view_ids,
            bind: self.bind,
            on_view_recycled: self.on_view_recycled,
            click_signals: ClickSignals::new(),
        })
    }
}

/// A configured list adapter.
///
/// Dereferences to its [`ListReconciler`] for list and selection operations.
pub struct Adapter<T, V> {
    list: ListReconciler<T>,
    layouts: LayoutRegistry,
    clickable_view_ids: Vec<ViewId>,
    bind: Option<RowHookFn<T, V>>,
    on_view_recycled: Option<RowHookFn<T, V>>,
    click_signals: ClickSignals<T>,
}

impl<T: ListItem, V: 'static> Adapter<T, V> {
    /// Returns a builder.
    pub fn builder() -> AdapterBuilder<T, V> {
        AdapterBuilder::new()
    }

    /// Returns the underlying reconciler.
    pub fn reconciler(&self) -> &ListReconciler<T> {
        &self.list
    }

    /// Returns the registered layouts.
    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    /// Returns the configured clickable child views.
    pub fn clickable_view_ids(&self) -> &[ViewId] {
        &self.clickable_view_ids
    }

    /// Returns the click handler slots.
    pub fn click_signals(&self) -> &ClickSignals<T> {
        &self.click_signals
    }

    /// Returns the layout for the row at `position`.
    pub fn layout_for(&self, position: usize) -> Option<LayoutId> {
        self.list
            .view_type(position)
            .map(|view_type| self.layouts.resolve(view_type))
    }

    /// Binds the item at `position` to `view`.
    ///
    /// Returns `None` if `position` is out of range.
    pub fn bind_row(&self, view: &mut V, position: usize) -> Option<RowBinding>
    where
        V: RowView,
    {
        let item = self.list.item_at(position)?;
        let view_type = self.list.view_type(position)?;
        let layout = self.layouts.resolve(view_type);

        if let Some(bind) = &self.bind {
            bind(&mut *view, &item, view_type);
        }

        let root = view.root_id();
        let mut click_targets = vec![root];
        for &id in &self.clickable_view_ids {
            if id != root && view.contains_view(id) && !click_targets.contains(&id) {
                click_targets.push(id);
            }
        }

        tracing::trace!(
            target: targets::ADAPTER,
            position,
            ?view_type,
            ?layout,
            click_targets = click_targets.len(),
            "row bound"
        );

        Some(RowBinding {
            position,
            view_type,
            layout,
            click_targets,
        })
    }

    /// Dispatches a click on `view` in the row at `position`.
    ///
    /// A row whose position is no longer in the list still reports the click,
    /// without item or position.
    pub fn row_clicked(&self, view: ViewId, position: usize) {
        let mut event = ClickEvent::new().with_view(view);
        match self.list.item_at(position) {
            Some(item) => event = event.with_item(item).with_position(position),
            None => tracing::trace!(
                target: targets::ADAPTER,
                position,
                "click on detached row"
            ),
        }
        self.click_signals.dispatch(&event);
    }

    /// Runs the recycle hook for the row at `position`.
    ///
    /// Returns `false` if `position` is out of range.
    pub fn recycle_row(&self, view: &mut V, position: usize) -> bool {
        let (Some(item), Some(view_type)) =
            (self.list.item_at(position), self.list.view_type(position))
        else {
            return false;
        };

        if let Some(on_view_recycled) = &self.on_view_recycled {
            on_view_recycled(view, &item, view_type);
        }
        true
    }
}

impl<T, V> Deref for Adapter<T, V> {
    type Target = ListReconciler<T>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl<T: ListItem, V: 'static> ListSource<T> for Adapter<T, V> {
    fn item_count(&self) -> usize {
        self.list.len()
    }

    fn item_at(&self, index: usize) -> Option<T> {
        self.list.item_at(index)
    }

    fn view_type_at(&self, index: usize) -> Option<ViewTypeId> {
        self.list.view_type(index)
    }

    fn selected_index(&self) -> Option<usize> {
        self.list.selected_index()
    }

    fn signals(&self) -> &ReconcilerSignals<T> {
        self.list.signals()
    }
}

static_assertions::assert_impl_all!(Adapter<String, ()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct TestRow {
        children: Vec<ViewId>,
        text: String,
        recycled: bool,
    }

    impl RowView for TestRow {
        fn root_id(&self) -> ViewId {
            ViewId(0)
        }

        fn contains_view(&self, id: ViewId) -> bool {
            self.children.contains(&id)
        }
    }

    fn builder() -> AdapterBuilder<String, TestRow> {
        AdapterBuilder::new()
            .layout(LayoutId(1))
            .same_content(|a: &String, b: &String| a == b)
    }

    #[test]
    fn test_build_requires_content_predicate() {
        let result = AdapterBuilder::<String, TestRow>::new()
            .layout(LayoutId(1))
            .build();
        assert_eq!(result.err(), Some(BoilrBiteError::MissingContentPredicate));
    }

    #[test]
    fn test_build_requires_layout() {
        let result = AdapterBuilder::<String, TestRow>::new()
            .same_content(|a, b| a == b)
            .build();
        assert_eq!(result.err(), Some(BoilrBiteError::NoLayouts));
    }

    #[test]
    fn test_build_seeds_items() {
        let adapter = builder()
            .items(vec!["a".into(), "b".into()])
            .build()
            .unwrap();
        assert_eq!(adapter.len(), 2);
        assert_eq!(adapter.item_at(1), Some("b".to_string()));
    }

    #[test]
    fn test_custom_identity_drives_add_or_update() {
        let adapter = AdapterBuilder::<(u32, String), TestRow>::new()
            .layout(LayoutId(1))
            .same_identity(|a, b| a.0 == b.0)
            .same_content(|a, b| a.1 == b.1)
            .build()
            .unwrap();

        adapter.add_or_update_items(vec![(1, "one".into()), (2, "two".into())]);
        adapter.add_or_update((1, "uno".into()));

        assert_eq!(adapter.len(), 2);
        assert_eq!(adapter.item_at(0), Some((1, "uno".to_string())));
    }

    #[test]
    fn test_bind_row_reports_click_targets() {
        let adapter = builder()
            .clickable_views([ViewId(5), ViewId(6), ViewId(0)])
            .bind(|row: &mut TestRow, item: &String, _| row.text = item.clone())
            .items(vec!["hello".into()])
            .build()
            .unwrap();

        let mut row = TestRow {
            children: vec![ViewId(6)],
            ..Default::default()
        };
        let binding = adapter.bind_row(&mut row, 0).unwrap();

        assert_eq!(row.text, "hello");
        assert_eq!(binding.layout, LayoutId(1));
        assert_eq!(binding.view_type, ViewTypeId::DEFAULT);
        assert_eq!(binding.click_targets, vec![ViewId(0), ViewId(6)]);
        assert!(adapter.bind_row(&mut row, 1).is_none());
    }

    #[test]
    fn test_layout_for_uses_view_type() {
        let adapter = builder()
            .layout(LayoutId(2))
            .view_type_selector(|_, item: &String| {
                if item.starts_with('#') {
                    LayoutId(2).into()
                } else {
                    ViewTypeId::DEFAULT
                }
            })
            .items(vec!["# header".into(), "row".into()])
            .build()
            .unwrap();

        assert_eq!(adapter.layout_for(0), Some(LayoutId(2)));
        assert_eq!(adapter.layout_for(1), Some(LayoutId(1)));
        assert_eq!(adapter.layout_for(2), None);
    }

    #[test]
    fn test_row_clicked_dispatches_item_and_position() {
        let adapter = builder()
            .items(vec!["a".into(), "b".into()])
            .build()
            .unwrap();
        let clicks = Arc::new(Mutex::new(Vec::new()));

        let recv = clicks.clone();
        adapter
            .click_signals()
            .view_item_at_clicked
            .connect(move |(view, item, position)| recv.lock().push((*view, item.clone(), *position)));

        adapter.row_clicked(ViewId(3), 1);

        assert_eq!(*clicks.lock(), vec![(ViewId(3), "b".to_string(), 1)]);
    }

    #[test]
    fn test_row_clicked_out_of_range() {
        let adapter = builder().build().unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));

        let recv = log.clone();
        adapter
            .click_signals()
            .view_clicked
            .connect(move |view| recv.lock().push(format!("view:{}", view.0)));
        let recv = log.clone();
        adapter
            .click_signals()
            .position_clicked
            .connect(move |position| recv.lock().push(format!("position:{position}")));

        adapter.row_clicked(ViewId(9), 4);

        assert_eq!(*log.lock(), vec!["view:9"]);
    }

    #[test]
    fn test_recycle_row() {
        let adapter = builder()
            .on_view_recycled(|row: &mut TestRow, _, _| row.recycled = true)
            .items(vec!["a".into()])
            .build()
            .unwrap();

        let mut row = TestRow::default();
        assert!(!adapter.recycle_row(&mut row, 3));
        assert!(!row.recycled);
        assert!(adapter.recycle_row(&mut row, 0));
        assert!(row.recycled);
    }

    #[test]
    fn test_adapter_is_a_list_source() {
        let adapter = builder()
            .items(vec!["a".into(), "b".into()])
            .build()
            .unwrap();
        adapter.set_selected(1, true);

        let source: &dyn ListSource<String> = &adapter;
        assert_eq!(source.item_count(), 2);
        assert!(source.is_selected(1));
    }
}
