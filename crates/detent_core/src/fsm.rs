//! State Machine Runtime
//!
//! Enum-based state machines for interaction phases. A state type describes
//! its own transitions through [`StateTransitions`]; [`PhaseMachine`] holds the
//! current state and records every transition taken.

use smallvec::SmallVec;

/// Identifier for an event type
pub type EventId = u32;

/// Trait for enum-based state types with built-in transition logic
///
/// # Example
///
/// ```
/// use detent_core::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Door {
///     #[default]
///     Closed,
///     Open,
/// }
///
/// const PUSH: u32 = 1;
///
/// impl StateTransitions for Door {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Door::Closed, PUSH) => Some(Door::Open),
///             (Door::Open, PUSH) => Some(Door::Closed),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed.on_event(PUSH), Some(Door::Open));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// Number of transitions kept before the history starts dropping old entries
const HISTORY_LIMIT: usize = 64;

/// A state machine instance over a [`StateTransitions`] state type
#[derive(Debug, Clone)]
pub struct PhaseMachine<S: StateTransitions> {
    current: S,
    /// Most recent transitions (for debugging)
    history: SmallVec<[(S, EventId, S); 8]>,
}

impl<S: StateTransitions> PhaseMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        tracing::trace!(?from, ?to, event, "phase transition");
        Some(to)
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for PhaseMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
