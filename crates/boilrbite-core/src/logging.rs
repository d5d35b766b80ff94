//! Logging facilities for BoilrBite.
//!
//! BoilrBite uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("boilrbite=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! No-op calls (out-of-range positions, empty batches) are logged at `trace`,
//! list submissions and selection changes at `debug`.

/// Span names used throughout BoilrBite for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Submission of a new list through the diff engine.
    pub const SUBMIT: &str = "boilrbite::submit";
    /// Signal emission span.
    pub const SIGNAL: &str = "boilrbite::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "boilrbite_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "boilrbite_core::signal";
    /// List reconciliation (submissions, mutations).
    pub const RECONCILER: &str = "boilrbite::reconciler";
    /// Selection tracking.
    pub const SELECTION: &str = "boilrbite::selection";
    /// Row binding and click wiring.
    pub const ADAPTER: &str = "boilrbite::adapter";
}

/// RAII guard that keeps a performance span entered until dropped.
///
/// ```
/// use boilrbite_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("diff");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "boilrbite::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
