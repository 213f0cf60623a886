//! Gesture arbitration between the sheet drag and content scrolling
//!
//! Decides, at the start of a touch sequence, whether the sheet or the
//! scrollable content owns it. The decision is made once per gesture and is
//! a pure function of where the touch landed, its initial velocity, and the
//! sheet/content state at that moment.

use detent_core::Detent;

/// Who handles a touch sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOwner {
    /// The sheet tracks the finger
    Sheet,
    /// The touch falls through to content scrolling
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureArbiter {
    grab_band_height: f32,
}

impl GestureArbiter {
    pub fn new(grab_band_height: f32) -> Self {
        Self {
            grab_band_height: grab_band_height.max(0.0),
        }
    }

    /// `location_y` is measured from the sheet's top edge
    pub fn in_grab_band(&self, location_y: f32) -> bool {
        (0.0..self.grab_band_height).contains(&location_y)
    }

    /// Pick the owner of a touch sequence that just began
    ///
    /// `velocity_y` is in screen space, so a positive value is a downward
    /// swipe.
    pub fn owner_for(
        &self,
        location_y: f32,
        velocity_y: f32,
        detent: Detent,
        content_offset: f32,
    ) -> GestureOwner {
        if self.in_grab_band(location_y) {
            return GestureOwner::Sheet;
        }

        if content_offset > 0.0 {
            return GestureOwner::Content;
        }

        match detent {
            Detent::Medium => GestureOwner::Sheet,
            Detent::Large if velocity_y > 0.0 => GestureOwner::Sheet,
            Detent::Large => GestureOwner::Content,
        }
    }

    /// Whether the sheet drag may run alongside the content's own scroll gesture
    pub fn allows_simultaneous(&self, content_offset: f32) -> bool {
        content_offset <= 0.0
    }
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::new(40.0)
    }
}
