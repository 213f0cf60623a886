//! Release-time detent selection

use detent_core::Detent;

use crate::geometry::SheetGeometry;

/// Sheet state at the moment the finger lifts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapInput {
    pub final_height: f32,
    /// Release velocity, positive when moving up
    pub velocity: f32,
    pub content_offset: f32,
    pub current_detent: Detent,
    /// Drag began at Large with the content scrolled away from the top
    pub started_scrolled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapOutcome {
    /// Sheet is at Large with scrolled content; leave it there
    StayLarge,
    /// Animate to this detent
    Snap(Detent),
}

impl SnapOutcome {
    pub fn detent(&self) -> Detent {
        match self {
            SnapOutcome::StayLarge => Detent::Large,
            SnapOutcome::Snap(detent) => *detent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapDecisionEngine {
    velocity_threshold: f32,
}

impl SnapDecisionEngine {
    pub fn new(velocity_threshold: f32) -> Self {
        Self { velocity_threshold }
    }

    pub fn velocity_threshold(&self) -> f32 {
        self.velocity_threshold
    }

    pub fn decide(&self, geometry: &SheetGeometry, input: SnapInput) -> SnapOutcome {
        if input.current_detent == Detent::Large && input.content_offset > 0.0 {
            return SnapOutcome::StayLarge;
        }

        let height = input.final_height;
        let target = if input.current_detent == Detent::Large
            && input.started_scrolled
            && height < geometry.large_height()
        {
            // Pulling the handle down out of scrolled content always collapses
            Detent::Medium
        } else if input.velocity > self.velocity_threshold && height < geometry.large_height() {
            Detent::Large
        } else if input.velocity < -self.velocity_threshold && height > geometry.medium_height() {
            Detent::Medium
        } else {
            geometry.nearest_detent(height)
        };

        tracing::debug!(
            height,
            velocity = input.velocity,
            content_offset = input.content_offset,
            started_scrolled = input.started_scrolled,
            ?target,
            "snap decided"
        );
        SnapOutcome::Snap(target)
    }
}

impl Default for SnapDecisionEngine {
    fn default() -> Self {
        Self::new(500.0)
    }
}
