//! Animation presets for sheet presentation
//!
//! Entry and exit are one-shot height animations to and from zero. They are
//! deliberately separate from the spring snap path: they have a fixed
//! duration and cannot be retargeted mid-flight.

use crate::easing::Easing;
use crate::keyframe::KeyframeAnimation;

/// Pre-built presentation animations
pub struct SheetTransitions;

impl SheetTransitions {
    /// Grow the sheet from zero height to `to_height`
    pub fn entry(duration_ms: u32, to_height: f32, easing: Easing) -> KeyframeAnimation {
        KeyframeAnimation::tween(duration_ms, 0.0, to_height.max(0.0), easing)
    }

    /// Collapse the sheet from `from_height` down to zero
    pub fn exit(duration_ms: u32, from_height: f32, easing: Easing) -> KeyframeAnimation {
        KeyframeAnimation::tween(duration_ms, from_height.max(0.0), 0.0, easing)
    }
}
