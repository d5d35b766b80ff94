//! Prelude module for BoilrBite.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use boilrbite::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionId`)
//! - List reconciliation (`ListReconciler`, `ItemCallback`, `ListSource`)
//! - Selection and click events (`SelectionChange`, `ClickEvent`)
//! - Adapter configuration (`Adapter`, `AdapterBuilder`, `RowView`)

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use crate::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Errors
// ============================================================================

pub use crate::{BoilrBiteError, Result};

// ============================================================================
// List Reconciliation
// ============================================================================

pub use crate::model::{
    DiffEngine, ItemCallback, ListDiff, ListItem, ListReconciler, ListSource, MyersDiffEngine,
    ReconcilerSignals, RowChange,
};

// ============================================================================
// Selection, View Types and Clicks
// ============================================================================

pub use crate::model::{
    ClickEvent, ClickSignals, LayoutId, SelectionChange, ViewId, ViewTypeId,
};

// ============================================================================
// Adapter
// ============================================================================

pub use crate::adapter::{Adapter, AdapterBuilder, RowBinding, RowView};
