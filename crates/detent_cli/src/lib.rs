//! Headless scenario runner for the detent sheet
//!
//! Scenarios are JSON step lists that open a sheet, feed it gestures and
//! content scrolls, advance time in fixed frames, and assert on the observed
//! state. A run produces a machine-readable [`SheetReport`].

pub mod assert;
pub mod report;
pub mod runner;
pub mod runtime;
pub mod scenario;

pub use assert::{AssertionResult, SheetSnapshot};
pub use report::{ReportStatus, SheetReport};
pub use runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use runtime::RunConfig;
pub use scenario::{ScenarioStep, SheetScenario};
