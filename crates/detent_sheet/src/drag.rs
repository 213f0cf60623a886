//! Drag phase resolution
//!
//! Maps the cumulative translation of a sheet drag onto a sheet height and a
//! content offset. Dragging up grows the sheet until it reaches the large
//! detent, after which the remaining drag is handed to the content as scroll.
//! Dragging back down first consumes that scroll, then shrinks the sheet.
//!
//! The resolver works on the cumulative translation of the gesture, so a
//! burst of `changed` samples or a dropped frame never accumulates error.

/// Which part of the drag the latest sample landed in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRegime {
    /// Sheet height follows the finger below the large detent
    Expanding,
    /// Sheet is pinned at the large detent and the drag scrolls the content
    Scrolling,
    /// Sheet is dropping back below the large detent after reaching it
    Collapsing,
}

/// Outcome of resolving one drag sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStep {
    pub height: f32,
    pub content_offset: f32,
    pub reached_large: bool,
    pub regime: DragRegime,
}

/// Resolve a single drag sample
///
/// `translation_y` is in screen space (negative while dragging up).
pub fn resolve_drag(
    initial_height: f32,
    reached_large: bool,
    large_height: f32,
    min_height: f32,
    translation_y: f32,
) -> DragStep {
    let drag_distance = -translation_y;

    if !reached_large {
        let candidate = initial_height + drag_distance;
        if candidate >= large_height {
            let excess = candidate - large_height;
            return DragStep {
                height: large_height,
                content_offset: excess,
                reached_large: true,
                regime: if excess > 0.0 {
                    DragRegime::Scrolling
                } else {
                    DragRegime::Expanding
                },
            };
        }

        return DragStep {
            height: candidate.max(min_height),
            content_offset: 0.0,
            reached_large: false,
            regime: DragRegime::Expanding,
        };
    }

    let drag_to_reach_large = large_height - initial_height;
    let scroll_amount = drag_distance - drag_to_reach_large;

    if scroll_amount > 0.0 {
        return DragStep {
            height: large_height,
            content_offset: scroll_amount,
            reached_large: true,
            regime: DragRegime::Scrolling,
        };
    }

    let candidate = large_height + scroll_amount;
    DragStep {
        height: candidate.max(min_height),
        content_offset: 0.0,
        reached_large: candidate >= large_height,
        regime: DragRegime::Collapsing,
    }
}

/// Per-gesture drag state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPhaseResolver {
    initial_height: f32,
    has_reached_large_detent: bool,
    large_height: f32,
    min_height: f32,
}

impl DragPhaseResolver {
    /// Start tracking a drag from the sheet's current height
    pub fn begin(initial_height: f32, large_height: f32, min_height: f32) -> Self {
        Self {
            initial_height,
            has_reached_large_detent: false,
            large_height,
            min_height: min_height.min(large_height),
        }
    }

    pub fn initial_height(&self) -> f32 {
        self.initial_height
    }

    pub fn has_reached_large_detent(&self) -> bool {
        self.has_reached_large_detent
    }

    /// The container was resized mid-drag
    pub fn set_large_height(&mut self, large_height: f32) {
        self.large_height = large_height;
        self.min_height = self.min_height.min(large_height);
        self.initial_height = self.initial_height.min(large_height);
    }

    pub fn resolve(&mut self, translation_y: f32) -> DragStep {
        let step = resolve_drag(
            self.initial_height,
            self.has_reached_large_detent,
            self.large_height,
            self.min_height,
            translation_y,
        );
        self.has_reached_large_detent = step.reached_large;

        tracing::trace!(
            translation_y,
            height = step.height,
            content_offset = step.content_offset,
            regime = ?step.regime,
            "drag step"
        );
        step
    }
}
