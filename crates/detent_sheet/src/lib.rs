//! Detent Sheet
//!
//! A draggable bottom sheet with two resting heights (medium and large) that
//! coordinates the sheet drag with scrolling of the content inside it.
//!
//! Dragging up grows the sheet until it reaches the large detent, then the
//! rest of the same drag scrolls the content. Dragging down consumes that
//! scroll before shrinking the sheet again. On release the sheet springs to
//! a detent picked from its height and release velocity.
//!
//! # Example
//!
//! ```rust
//! use detent_sheet::{Detent, GestureSample, SheetConfig, SheetController};
//!
//! let mut sheet = SheetController::new(800.0, SheetConfig::default())?;
//! sheet.open();
//! for _ in 0..30 {
//!     sheet.tick(1.0 / 60.0);
//! }
//! assert_eq!(sheet.current_height(), 400.0);
//!
//! // Drag the grab handle up past the large detent and let go
//! sheet.handle_gesture(GestureSample::began(10.0, -200.0));
//! sheet.handle_gesture(GestureSample::changed(-320.0, -200.0));
//! sheet.handle_gesture(GestureSample::ended(-320.0, 0.0));
//! for _ in 0..10 {
//!     sheet.tick(1.0 / 60.0);
//! }
//! assert_eq!(sheet.current_detent(), Detent::Large);
//! # Ok::<(), detent_sheet::ConfigError>(())
//! ```

pub mod animator;
pub mod arbiter;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod scroll;
pub mod snap;
pub mod state;

pub use animator::{AnimationController, AnimationRequest};
pub use arbiter::{GestureArbiter, GestureOwner};
pub use config::{SheetConfig, SpringSettings};
pub use controller::{GestureDisposition, SheetController};
pub use drag::{DragPhaseResolver, DragRegime, DragStep};
pub use error::{ConfigError, Result};
pub use geometry::{HeightModel, SheetGeometry};
pub use scroll::{ScrollCoordinator, ScrollState};
pub use snap::{SnapDecisionEngine, SnapInput, SnapOutcome};
pub use state::{SheetPhase, SheetState};

pub use detent_core::{Detent, GesturePhase, GestureSample, SheetEvent, SubscriptionId};
