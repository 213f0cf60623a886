//! Sheet interaction phases
//!
//! The phase is the controller's single source of truth for which inputs it
//! accepts. It is driven by gesture phases, animation completion, and the
//! presentation one-shots; see [`phase_events`] for the event ids.

use detent_core::{Detent, StateTransitions};
use serde::{Deserialize, Serialize};

/// Phase event ids fed to the [`PhaseMachine`](detent_core::PhaseMachine)
pub mod phase_events {
    /// Entry one-shot finished
    pub const ENTRY_DONE: u32 = 1;
    /// A sheet drag began
    pub const DRAG_BEGIN: u32 = 10;
    pub const DRAG_EXPAND: u32 = 11;
    pub const DRAG_SCROLL: u32 = 12;
    pub const DRAG_COLLAPSE: u32 = 13;
    /// Drag released at Large with scrolled content
    pub const DRAG_REST_LARGE: u32 = 14;
    /// A detent spring started
    pub const ANIMATE: u32 = 20;
    pub const SETTLED_MEDIUM: u32 = 21;
    pub const SETTLED_LARGE: u32 = 22;
    pub const CLOSE: u32 = 30;
}

use phase_events::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetPhase {
    #[default]
    Entering,
    AtMedium,
    DraggingExpanding,
    DraggingScrolling,
    DraggingCollapsing,
    AtLarge,
    Animating,
    Exiting,
}

impl SheetPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            SheetPhase::DraggingExpanding | SheetPhase::DraggingScrolling | SheetPhase::DraggingCollapsing
        )
    }

    /// Resting at a detent, ready for a new gesture
    pub fn is_at_rest(&self) -> bool {
        matches!(self, SheetPhase::AtMedium | SheetPhase::AtLarge)
    }

    pub fn settled_event(detent: Detent) -> u32 {
        match detent {
            Detent::Medium => SETTLED_MEDIUM,
            Detent::Large => SETTLED_LARGE,
        }
    }
}

impl StateTransitions for SheetPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use SheetPhase::*;

        if event == CLOSE {
            return match self {
                Exiting => None,
                _ => Some(Exiting),
            };
        }

        match (self, event) {
            (Entering, ENTRY_DONE) => Some(AtMedium),

            (AtMedium | AtLarge, DRAG_BEGIN) => Some(DraggingExpanding),

            (DraggingScrolling | DraggingCollapsing, DRAG_EXPAND) => Some(DraggingExpanding),
            (DraggingExpanding | DraggingCollapsing, DRAG_SCROLL) => Some(DraggingScrolling),
            (DraggingExpanding | DraggingScrolling, DRAG_COLLAPSE) => Some(DraggingCollapsing),
            (DraggingExpanding | DraggingScrolling | DraggingCollapsing, DRAG_REST_LARGE) => Some(AtLarge),

            (
                AtMedium | AtLarge | Animating | DraggingExpanding | DraggingScrolling | DraggingCollapsing,
                ANIMATE,
            ) => Some(Animating),

            (Animating, SETTLED_MEDIUM) => Some(AtMedium),
            (Animating, SETTLED_LARGE) => Some(AtLarge),

            _ => None,
        }
    }
}

/// Observable sheet state
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SheetState {
    pub current_height: f32,
    pub current_detent: Detent,
    pub is_animating: bool,
    pub is_panning_sheet: bool,
    /// Meaningful only during a drag
    pub has_reached_large_detent: bool,
    pub expanded: bool,
}
