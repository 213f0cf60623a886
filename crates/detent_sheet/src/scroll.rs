//! Content scroll coordination
//!
//! The sheet owns the content's vertical offset while it is below the large
//! detent or being panned. This module keeps the offset the host must mirror
//! into its scroll view, suppresses the content's own top-edge bounce, runs
//! the short spring that returns the offset to the top after a snap, and
//! counts down the delayed scroll re-enable.

use detent_animation::{AnimationScheduler, Spring, SpringConfig, SpringId};

/// Snappy spring used to bring content back to the top
const RESET_SPRING: SpringConfig = SpringConfig::new(400.0, 30.0, 1.0);

/// What the host mirrors into its scroll view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Vertical content offset, never negative
    pub content_offset: f32,
    pub scroll_enabled: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            content_offset: 0.0,
            scroll_enabled: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    state: ScrollState,
    /// Spring returning the offset to zero (None when idle)
    reset_spring: Option<SpringId>,
    /// Seconds until scrolling is re-enabled
    reenable_in: Option<f32>,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn content_offset(&self) -> f32 {
        self.state.content_offset
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.state.scroll_enabled
    }

    pub fn is_resetting(&self) -> bool {
        self.reset_spring.is_some()
    }

    pub fn is_reenable_pending(&self) -> bool {
        self.reenable_in.is_some()
    }

    /// Handle an offset reported by the content's own scrolling
    ///
    /// Returns the offset the content must actually apply.
    pub fn on_content_scroll(&mut self, reported: f32, sheet_at_large: bool, panning: bool) -> f32 {
        if !reported.is_finite() {
            tracing::warn!(reported, "ignoring non-finite content offset");
            return self.state.content_offset;
        }

        if panning || !sheet_at_large {
            // Sheet owns the gesture; redirect to the top
            self.state.content_offset = 0.0;
        } else if self.reset_spring.is_none() && self.state.scroll_enabled {
            self.state.content_offset = reported.max(0.0);
        }

        self.state.content_offset
    }

    /// Offset produced by a drag hand-off
    pub fn set_drag_offset(&mut self, scheduler: &mut AnimationScheduler, offset: f32) {
        self.cancel_reset(scheduler);
        self.state.content_offset = offset.max(0.0);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.scroll_enabled = enabled;
        if enabled {
            self.reenable_in = None;
        }
    }

    /// Disable scrolling now and re-enable it after `delay` seconds
    pub fn schedule_enable(&mut self, delay: f32) {
        if delay <= 0.0 {
            self.set_enabled(true);
            return;
        }
        self.state.scroll_enabled = false;
        self.reenable_in = Some(delay);
    }

    /// Animate the offset back to the top
    pub fn reset_animated(&mut self, scheduler: &mut AnimationScheduler) {
        self.cancel_reset(scheduler);

        if self.state.content_offset.abs() > 0.5 {
            let mut spring = Spring::new(RESET_SPRING, self.state.content_offset);
            spring.set_target(0.0);
            self.reset_spring = Some(scheduler.add_spring(spring));
            tracing::debug!(from = self.state.content_offset, "content offset reset started");
        } else {
            self.state.content_offset = 0.0;
        }
    }

    /// Jump to the top, dropping any reset spring
    pub fn pin_to_top(&mut self, scheduler: &mut AnimationScheduler) {
        self.cancel_reset(scheduler);
        self.state.content_offset = 0.0;
    }

    /// Cancel the reset spring and any pending re-enable
    pub fn cancel(&mut self, scheduler: &mut AnimationScheduler) {
        self.cancel_reset(scheduler);
        self.reenable_in = None;
    }

    fn cancel_reset(&mut self, scheduler: &mut AnimationScheduler) {
        if let Some(id) = self.reset_spring.take() {
            scheduler.remove_spring(id);
        }
    }

    /// Advance the re-enable countdown and read the reset spring
    ///
    /// The scheduler must already have been stepped for this frame. Returns
    /// true while anything is still in flight.
    pub fn tick(&mut self, scheduler: &mut AnimationScheduler, dt: f32) -> bool {
        if let Some(remaining) = self.reenable_in {
            let remaining = remaining - dt;
            // Sub-millisecond remainder counts as elapsed
            if remaining <= 1e-4 {
                self.reenable_in = None;
                self.state.scroll_enabled = true;
                tracing::trace!("content scrolling re-enabled");
            } else {
                self.reenable_in = Some(remaining);
            }
        }

        if let Some(id) = self.reset_spring {
            match scheduler.get_spring(id).map(|s| (s.value(), s.is_settled())) {
                Some((_, true)) | None => {
                    self.state.content_offset = 0.0;
                    self.cancel_reset(scheduler);
                }
                // The reset spring is underdamped; never show a negative offset
                Some((value, false)) => self.state.content_offset = value.max(0.0),
            }
        }

        self.reset_spring.is_some() || self.reenable_in.is_some()
    }
}
