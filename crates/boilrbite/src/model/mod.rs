//! List reconciliation for BoilrBite.
//!
//! This module provides the data side of a recycling list: an ordered list of
//! items that is only ever replaced wholesale, a diff between consecutive
//! lists, and single-row selection that survives those replacements.
//!
//! # Core Types
//!
//! - `ListReconciler`: Owns the list, applies batch mutations, tracks selection
//! - `ItemCallback`: Identity and content predicates used for diffing
//! - `DiffEngine`: Computes a `ListDiff` between two lists
//! - `ListSource`: The read surface a view binder consumes
//! - `ReconcilerSignals`: Change notifications
//! - `ClickSignals`: Ordered click handler slots
//!
//! # Example
//!
//! ```
//! use boilrbite::model::{ItemCallback, ListReconciler};
//!
//! let list = ListReconciler::new(ItemCallback::new(|a: &String, b: &String| a == b));
//!
//! list.signals().list_submitted.connect(|diff| {
//!     println!("{} -> {} rows, {} changes", diff.old_len, diff.new_len, diff.changes.len());
//! });
//!
//! list.add_or_update_items(vec!["Apple".to_string(), "Banana".to_string()]);
//! list.remove(&"Apple".to_string());
//! assert_eq!(list.len(), 1);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  submit   ┌─────────────┐  ListDiff   ┌─────────────┐
//! │   mutation   │──────────>│ DiffEngine  │────────────>│   Signals   │
//! │ (add/remove) │           │             │             │             │
//! └──────────────┘           └─────────────┘             └─────────────┘
//!        │                                                      │
//!        │            ┌──────────────────┐                      │
//!        └───────────>│  ListReconciler  │<─────────────────────┘
//!                     │  items+selection │       (view binder)
//!                     └──────────────────┘
//! ```
//!
//! Every mutation builds a new list, diffs it against the current one and
//! replaces it. Views listen to the signals and redraw the affected rows.

mod click;
mod diff;
mod reconciler;
pub mod selection;
mod traits;
mod view_type;

pub use click::{ClickEvent, ClickSignals, ViewId};
pub use diff::{ContentFn, DiffEngine, IdentityFn, ItemCallback, ListDiff, MyersDiffEngine, RowChange};
pub use reconciler::ListReconciler;
pub use selection::{SelectionChange, SingleSelection};
pub use traits::{ListItem, ListSource, ReconcilerSignals};
pub use view_type::{LayoutId, LayoutRegistry, ViewTypeId, ViewTypeSelector};
