//! Gesture input and outbound sheet events
//!
//! Drag input arrives as [`GestureSample`]s fed by the host's touch layer.
//! State changes leave the controller as [`SheetEvent`]s delivered through an
//! [`EventDispatcher`], so the host never holds a reference into sheet state.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::detent::Detent;

/// Phase of a drag gesture
///
/// Within one gesture the phases arrive strictly ordered: `Began`, zero or
/// more `Changed`, then exactly one of `Ended` / `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// Returns true for the phases that terminate a gesture
    pub fn is_terminal(&self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

/// A single drag sample in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub phase: GesturePhase,
    /// Touch location measured from the sheet's top edge
    pub location_y: f32,
    /// Cumulative translation since `Began` (negative = dragged upward)
    pub translation_y: f32,
    /// Instantaneous velocity in units/second (negative = moving upward)
    pub velocity_y: f32,
}

impl GestureSample {
    /// A gesture start at `location_y` with its initial velocity
    pub fn began(location_y: f32, velocity_y: f32) -> Self {
        Self {
            phase: GesturePhase::Began,
            location_y,
            translation_y: 0.0,
            velocity_y,
        }
    }

    pub fn changed(translation_y: f32, velocity_y: f32) -> Self {
        Self {
            phase: GesturePhase::Changed,
            location_y: 0.0,
            translation_y,
            velocity_y,
        }
    }

    pub fn ended(translation_y: f32, velocity_y: f32) -> Self {
        Self {
            phase: GesturePhase::Ended,
            location_y: 0.0,
            translation_y,
            velocity_y,
        }
    }

    pub fn cancelled(translation_y: f32) -> Self {
        Self {
            phase: GesturePhase::Cancelled,
            location_y: 0.0,
            translation_y,
            velocity_y: 0.0,
        }
    }

    /// Returns false if any coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.location_y.is_finite() && self.translation_y.is_finite() && self.velocity_y.is_finite()
    }
}

/// Notifications published by the sheet controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetEvent {
    /// The current detent or the published `expanded` flag changed
    DetentChanged { detent: Detent, expanded: bool },
    /// A spring snap reached its detent
    AnimationFinished { detent: Detent },
    /// The entry animation completed
    Presented,
    /// The exit animation completed and the sheet can be torn down
    Dismissed,
}

new_key_type! {
    /// Handle returned by [`EventDispatcher::subscribe`]
    pub struct SubscriptionId;
}

/// Event handler function type
pub type EventHandler<E> = Box<dyn FnMut(&E) + Send>;

/// Delivers events to every registered handler
pub struct EventDispatcher<E = SheetEvent> {
    handlers: SlotMap<SubscriptionId, EventHandler<E>>,
}

impl<E> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
        }
    }

    /// Register a handler; keep the id to unsubscribe later
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        self.handlers.insert(Box::new(handler))
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.remove(id).is_some()
    }

    /// Dispatch an event to all registered handlers
    pub fn dispatch(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Get the number of live subscriptions
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_reaches_all_subscribers() {
        let mut dispatcher = EventDispatcher::new();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..3 {
            let count = count.clone();
            dispatcher.subscribe(move |_: &SheetEvent| {
                *count.lock().unwrap() += 1;
            });
        }

        dispatcher.dispatch(&SheetEvent::Presented);
        assert_eq!(*count.lock().unwrap(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let mut dispatcher = EventDispatcher::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let id = dispatcher.subscribe(move |_: &SheetEvent| {
            *count_clone.lock().unwrap() += 1;
        });
        assert_eq!(dispatcher.len(), 1);

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert!(dispatcher.is_empty());

        dispatcher.dispatch(&SheetEvent::Dismissed);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_sample_finiteness() {
        assert!(GestureSample::changed(-20.0, -100.0).is_finite());
        assert!(!GestureSample::changed(f32::NAN, 0.0).is_finite());
        assert!(!GestureSample::ended(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
    }
}
