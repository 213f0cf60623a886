//! Detent Core Runtime
//!
//! Foundational types shared by the bottom-sheet controller and its tooling:
//!
//! - **Detents**: the two stable resting heights of a sheet
//! - **Gesture Samples**: toolkit-independent drag input
//! - **Sheet Events**: outbound notifications the host subscribes to
//! - **Phase Machines**: enum-based state machines with transition history
//!
//! # Example
//!
//! ```rust
//! use detent_core::{Detent, EventDispatcher, SheetEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let mut dispatcher = EventDispatcher::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! dispatcher.subscribe(move |event: &SheetEvent| sink.lock().unwrap().push(event.clone()));
//!
//! dispatcher.dispatch(&SheetEvent::DetentChanged {
//!     detent: Detent::Large,
//!     expanded: true,
//! });
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

pub mod detent;
pub mod events;
pub mod fsm;

pub use detent::Detent;
pub use events::{EventDispatcher, GesturePhase, GestureSample, SheetEvent, SubscriptionId};
pub use fsm::{PhaseMachine, StateTransitions};
