//! View types and layout lookup for multi-layout lists.
//!
//! A list that renders rows with more than one layout asks a selector for the
//! view type of each row. The view type is then used as a key into the set of
//! registered layouts.

use std::sync::Arc;

use boilrbite_core::{BoilrBiteError, Result};

/// Identifier selecting which layout renders a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ViewTypeId(pub u32);

impl ViewTypeId {
    /// The view type shared by every row when no selector is configured.
    pub const DEFAULT: Self = Self(0);
}

/// Identifier of a row layout registered with an adapter.
///
/// Layout ids double as view types: a selector may return
/// `layout.into()` to pick that layout directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub u32);

impl From<LayoutId> for ViewTypeId {
    fn from(layout: LayoutId) -> Self {
        Self(layout.0)
    }
}

/// Type alias for a view-type selector: `(position, item) -> view type`.
pub type ViewTypeSelector<T> = Arc<dyn Fn(usize, &T) -> ViewTypeId + Send + Sync>;

/// The set of layouts an adapter can inflate.
///
/// Resolution picks the layout whose id matches the view type, falling back to
/// the first registered layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRegistry {
    layouts: Vec<LayoutId>,
}

impl LayoutRegistry {
    /// Creates a registry from layout ids, keeping first-seen order.
    ///
    /// Returns [`BoilrBiteError::NoLayouts`] if `layouts` is empty.
    pub fn new(layouts: impl IntoIterator<Item = LayoutId>) -> Result<Self> {
        let mut unique: Vec<LayoutId> = Vec::new();
        for layout in layouts {
            if !unique.contains(&layout) {
                unique.push(layout);
            }
        }
        if unique.is_empty() {
            return Err(BoilrBiteError::NoLayouts);
        }
        Ok(Self { layouts: unique })
    }

    /// Returns the registered layouts.
    pub fn layouts(&self) -> &[LayoutId] {
        &self.layouts
    }

    /// Returns `true` if a layout with this id is registered.
    pub fn contains(&self, layout: LayoutId) -> bool {
        self.layouts.contains(&layout)
    }

    /// Resolves a view type to the layout that renders it.
    pub fn resolve(&self, view_type: ViewTypeId) -> LayoutId {
        let layout = LayoutId(view_type.0);
        if self.contains(layout) {
            layout
        } else {
            self.layouts[0]
        }
    }
}
