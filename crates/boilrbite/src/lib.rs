//! BoilrBite - diff-driven list reconciliation for recycling list views.
//!
//! This is the main crate. It re-exports the core infrastructure from
//! `boilrbite_core` and adds the list layer on top of it.
//!
//! # Example
//!
//! ```
//! use boilrbite::prelude::*;
//!
//! let list = ListReconciler::new(ItemCallback::new(|a: &String, b: &String| a == b));
//!
//! list.signals().selection_changed.connect(|change| {
//!     println!("selection: {:?} -> {:?}", change.old_index, change.new_index);
//! });
//!
//! list.set_items(vec!["Apple".into(), "Banana".into(), "Cherry".into()]);
//! list.set_selected(1, true);
//! assert_eq!(list.selected_item().as_deref(), Some("Banana"));
//! ```

pub use boilrbite_core::*;

pub mod adapter;
pub mod model;
pub mod prelude;
