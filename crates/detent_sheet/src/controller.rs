//! Sheet controller
//!
//! Owns every piece of sheet state and is the only thing the host talks to.
//! Input arrives through [`SheetController::handle_gesture`] and
//! [`SheetController::handle_content_scroll`]; time advances only through
//! [`SheetController::tick`]. The host reads state back through the getters
//! and observes changes through [`SheetEvent`] subscriptions.
//!
//! Per-frame order inside `tick`:
//! 1. step the spring scheduler
//! 2. advance the entry/exit one-shot
//! 3. read the height spring, completing the snap when it settles
//! 4. read the content reset spring and the scroll re-enable countdown

use detent_animation::{AnimationScheduler, KeyframeAnimation, SheetTransitions};
use detent_core::{
    Detent, EventDispatcher, GesturePhase, GestureSample, PhaseMachine, SheetEvent, SubscriptionId,
};

use crate::animator::{AnimationContext, AnimationController, AnimationPoll, AnimationRequest};
use crate::arbiter::{GestureArbiter, GestureOwner};
use crate::config::SheetConfig;
use crate::drag::{DragPhaseResolver, DragRegime};
use crate::error::Result;
use crate::geometry::{HeightModel, SheetGeometry};
use crate::scroll::{ScrollCoordinator, ScrollState};
use crate::snap::{SnapDecisionEngine, SnapInput, SnapOutcome};
use crate::state::phase_events::*;
use crate::state::{SheetPhase, SheetState};

/// What the controller did with a gesture sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureDisposition {
    /// The sheet is tracking this gesture
    Accepted,
    /// The sheet declined; the touch belongs to content scrolling
    Rejected,
    /// Malformed or out-of-sequence sample; nothing changed
    Ignored,
}

type CompletionCallback = Box<dyn FnOnce() + Send>;

enum Presentation {
    Entering(KeyframeAnimation),
    Exiting {
        animation: KeyframeAnimation,
        on_complete: Option<CompletionCallback>,
    },
}

pub struct SheetController {
    config: SheetConfig,
    model: HeightModel,
    arbiter: GestureArbiter,
    snap: SnapDecisionEngine,
    animator: AnimationController,
    scroll: ScrollCoordinator,
    scheduler: AnimationScheduler,
    phase: PhaseMachine<SheetPhase>,
    detent: Detent,
    drag: Option<DragPhaseResolver>,
    drag_started_scrolled: bool,
    panning: bool,
    presentation: Option<Presentation>,
    dispatcher: EventDispatcher<SheetEvent>,
}

impl SheetController {
    /// Build a closed sheet (height 0, phase `Entering`) for a container
    pub fn new(container_height: f32, config: SheetConfig) -> Result<Self> {
        config.validate()?;
        let geometry = SheetGeometry::new(container_height, config.medium_ratio, config.large_ratio)?;

        Ok(Self {
            model: HeightModel::new(geometry),
            arbiter: GestureArbiter::new(config.grab_band_height),
            snap: SnapDecisionEngine::new(config.velocity_threshold),
            animator: AnimationController::new(config.spring.to_spring_config()),
            scroll: ScrollCoordinator::new(),
            scheduler: AnimationScheduler::new(),
            phase: PhaseMachine::new(SheetPhase::Entering),
            detent: Detent::Medium,
            drag: None,
            drag_started_scrolled: false,
            panning: false,
            presentation: None,
            dispatcher: EventDispatcher::new(),
            config,
        })
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&SheetEvent) + Send + 'static,
    {
        self.dispatcher.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Run the entry animation up to the medium detent
    pub fn open(&mut self) {
        if !self.phase.is_in(SheetPhase::Entering) || self.presentation.is_some() {
            tracing::debug!(phase = ?self.phase.current(), "open ignored");
            return;
        }

        let to = self.model.height_for(Detent::Medium);
        let mut animation =
            SheetTransitions::entry(self.config.entry_duration_ms, to, self.config.entry_easing);
        animation.start();
        self.model.set_current_height(animation.value());
        self.presentation = Some(Presentation::Entering(animation));

        tracing::debug!(to, "sheet entering");
    }

    /// Run the exit animation, then call `on_complete` and emit `Dismissed`
    ///
    /// Any drag or snap in progress is abandoned. A second call is ignored.
    pub fn close<F>(&mut self, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.phase.is_in(SheetPhase::Exiting) {
            tracing::debug!("close ignored; sheet already exiting");
            return;
        }

        self.drag = None;
        self.drag_started_scrolled = false;
        self.panning = false;
        self.animator.cancel(&mut self.scheduler);
        self.scroll.cancel(&mut self.scheduler);
        self.scroll.pin_to_top(&mut self.scheduler);

        let from = self.model.current_height();
        let mut animation =
            SheetTransitions::exit(self.config.exit_duration_ms, from, self.config.exit_easing);
        animation.start();
        self.presentation = Some(Presentation::Exiting {
            animation,
            on_complete: Some(Box::new(on_complete)),
        });
        self.phase.send(CLOSE);

        tracing::debug!(from, "sheet exiting");
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn handle_gesture(&mut self, sample: GestureSample) -> GestureDisposition {
        if !sample.is_finite() {
            tracing::warn!(?sample, "ignoring non-finite gesture sample");
            return GestureDisposition::Ignored;
        }

        match sample.phase {
            GesturePhase::Began => self.begin_drag(sample.location_y, sample.velocity_y),
            GesturePhase::Changed => self.update_drag(sample.translation_y),
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.end_drag(sample.translation_y, sample.velocity_y)
            }
        }
    }

    /// Report the content's scroll offset; returns the offset it must apply
    pub fn handle_content_scroll(&mut self, offset: f32) -> f32 {
        let at_large = self.model.is_at_large() && !self.animator.is_animating();
        self.scroll.on_content_scroll(offset, at_large, self.panning)
    }

    fn begin_drag(&mut self, location_y: f32, velocity_y: f32) -> GestureDisposition {
        let phase = self.phase.current();
        if !phase.is_at_rest()
            || self.drag.is_some()
            || self.animator.is_animating()
            || self.scroll.is_reenable_pending()
        {
            tracing::debug!(
                ?phase,
                reenable_pending = self.scroll.is_reenable_pending(),
                "drag rejected; sheet busy"
            );
            return GestureDisposition::Rejected;
        }

        let content_offset = self.scroll.content_offset();
        let owner = self
            .arbiter
            .owner_for(location_y, velocity_y, self.detent, content_offset);
        if owner == GestureOwner::Content {
            tracing::debug!(
                location_y,
                velocity_y,
                content_offset,
                detent = %self.detent,
                "touch handed to content"
            );
            return GestureDisposition::Rejected;
        }

        let initial_height = self.model.current_height();
        self.drag = Some(DragPhaseResolver::begin(
            initial_height,
            self.model.geometry().large_height(),
            self.config.min_height,
        ));
        self.drag_started_scrolled = self.detent == Detent::Large && content_offset > 0.0;
        self.panning = true;
        self.phase.send(DRAG_BEGIN);

        tracing::debug!(initial_height, location_y, "sheet drag began");
        GestureDisposition::Accepted
    }

    fn update_drag(&mut self, translation_y: f32) -> GestureDisposition {
        let Some(drag) = self.drag.as_mut() else {
            tracing::trace!(translation_y, "changed sample without an active drag");
            return GestureDisposition::Ignored;
        };

        let was_reached = drag.has_reached_large_detent();
        let step = drag.resolve(translation_y);

        self.model.set_current_height(step.height);
        self.scroll.set_drag_offset(&mut self.scheduler, step.content_offset);
        self.panning = step.regime != DragRegime::Scrolling;
        self.phase.send(match step.regime {
            DragRegime::Expanding => DRAG_EXPAND,
            DragRegime::Scrolling => DRAG_SCROLL,
            DragRegime::Collapsing => DRAG_COLLAPSE,
        });

        if step.reached_large != was_reached {
            self.publish_detent(if step.reached_large {
                Detent::Large
            } else {
                Detent::Medium
            });
        }

        GestureDisposition::Accepted
    }

    fn end_drag(&mut self, translation_y: f32, velocity_y: f32) -> GestureDisposition {
        // The terminal sample carries the final translation
        if self.drag.is_some() {
            self.update_drag(translation_y);
        }
        let had_drag = self.drag.take().is_some();
        let started_scrolled = std::mem::take(&mut self.drag_started_scrolled);
        if !had_drag && !self.phase.current().is_at_rest() {
            tracing::trace!("terminal sample without an active drag");
            return GestureDisposition::Ignored;
        }
        if !had_drag {
            tracing::debug!("terminal sample without began; settling to nearest detent");
        }

        self.panning = false;
        let input = SnapInput {
            final_height: self.model.current_height(),
            velocity: if had_drag { -velocity_y } else { 0.0 },
            content_offset: self.scroll.content_offset(),
            current_detent: self.detent,
            started_scrolled: had_drag && started_scrolled,
        };

        match self.snap.decide(self.model.geometry(), input) {
            SnapOutcome::StayLarge => {
                self.scroll.set_enabled(true);
                self.phase.send(DRAG_REST_LARGE);
                self.publish_detent(Detent::Large);
            }
            SnapOutcome::Snap(target) => {
                if self.start_animation(target, had_drag) == AnimationRequest::Started {
                    self.scroll.reset_animated(&mut self.scheduler);
                    self.scroll
                        .schedule_enable(self.config.scroll_reenable_delay());
                }
            }
        }

        if had_drag {
            GestureDisposition::Accepted
        } else {
            GestureDisposition::Ignored
        }
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Spring to `target`
    ///
    /// Interrupts an in-flight snap toward a different detent. Requests made
    /// while the sheet is presenting, dismissing or being dragged are
    /// [`AnimationRequest::Blocked`].
    pub fn animate_to_detent(&mut self, target: Detent) -> AnimationRequest {
        let phase = self.phase.current();
        if !phase.is_at_rest() && phase != SheetPhase::Animating {
            tracing::debug!(?phase, ?target, "animation request blocked");
            return AnimationRequest::Blocked;
        }

        let request = self.start_animation(target, false);
        if request == AnimationRequest::Started && target == Detent::Medium {
            self.scroll.reset_animated(&mut self.scheduler);
        }
        request
    }

    fn start_animation(&mut self, target: Detent, mid_gesture: bool) -> AnimationRequest {
        let context = AnimationContext {
            current_height: self.model.current_height(),
            current_detent: self.detent,
            mid_gesture,
        };
        let target_height = self.model.height_for(target);
        let request =
            self.animator
                .animate_to_detent(&mut self.scheduler, target, target_height, context);

        if request == AnimationRequest::Started {
            self.phase.send(ANIMATE);
        }
        request
    }

    /// Advance time by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.scheduler.step(dt);
        self.tick_presentation(dt);
        self.tick_height_animation();
        self.scroll.tick(&mut self.scheduler, dt);
    }

    fn tick_presentation(&mut self, dt: f32) {
        let Some(presentation) = self.presentation.as_mut() else {
            return;
        };

        let animation = match presentation {
            Presentation::Entering(animation) => animation,
            Presentation::Exiting { animation, .. } => animation,
        };
        animation.tick(dt * 1000.0);
        let height = animation.value();
        let finished = animation.is_finished();
        self.model.set_current_height(height);

        if !finished {
            return;
        }

        match self.presentation.take() {
            Some(Presentation::Entering(_)) => {
                self.model
                    .set_current_height(self.model.height_for(Detent::Medium));
                self.phase.send(ENTRY_DONE);
                tracing::debug!("sheet presented");
                self.dispatcher.dispatch(&SheetEvent::Presented);
            }
            Some(Presentation::Exiting { on_complete, .. }) => {
                self.model.set_current_height(0.0);
                tracing::debug!("sheet dismissed");
                if let Some(on_complete) = on_complete {
                    on_complete();
                }
                self.dispatcher.dispatch(&SheetEvent::Dismissed);
            }
            None => {}
        }
    }

    fn tick_height_animation(&mut self) {
        match self.animator.poll(&mut self.scheduler) {
            AnimationPoll::Idle => {}
            AnimationPoll::Running { height } => self.model.set_current_height(height),
            AnimationPoll::Finished { detent, .. } => {
                self.model.set_current_height(self.model.height_for(detent));
                self.scroll.set_enabled(true);
                self.phase.send(SheetPhase::settled_event(detent));
                self.publish_detent(detent);

                tracing::debug!(%detent, "detent animation finished");
                self.dispatcher
                    .dispatch(&SheetEvent::AnimationFinished { detent });
            }
        }
    }

    fn publish_detent(&mut self, detent: Detent) {
        if self.detent == detent {
            return;
        }
        self.detent = detent;
        tracing::debug!(%detent, "detent changed");
        self.dispatcher.dispatch(&SheetEvent::DetentChanged {
            detent,
            expanded: detent.is_expanded(),
        });
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Recompute detent heights for a resized container
    ///
    /// A sheet at rest is re-pinned to its detent, an in-flight snap is
    /// retargeted, and a drag in progress picks up the new large height.
    pub fn set_container_height(&mut self, container_height: f32) -> Result<()> {
        let geometry = self.model.geometry().with_container_height(container_height)?;
        self.model.set_geometry(geometry);

        if self.phase.current().is_at_rest() {
            self.model.set_current_height(geometry.height_for(self.detent));
        }
        if let Some(target) = self.animator.target() {
            self.animator
                .retarget(&mut self.scheduler, geometry.height_for(target));
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.set_large_height(geometry.large_height());
        }

        tracing::debug!(
            container_height,
            medium = geometry.medium_height(),
            large = geometry.large_height(),
            "container resized"
        );
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn state(&self) -> SheetState {
        SheetState {
            current_height: self.model.current_height(),
            current_detent: self.detent,
            is_animating: self.animator.is_animating() || self.presentation.is_some(),
            is_panning_sheet: self.panning,
            has_reached_large_detent: self
                .drag
                .is_some_and(|d| d.has_reached_large_detent()),
            expanded: self.detent.is_expanded(),
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase.current()
    }

    /// Recent phase transitions, oldest first
    pub fn phase_history(&self) -> &[(SheetPhase, u32, SheetPhase)] {
        self.phase.history()
    }

    pub fn current_height(&self) -> f32 {
        self.model.current_height()
    }

    pub fn current_detent(&self) -> Detent {
        self.detent
    }

    pub fn is_expanded(&self) -> bool {
        self.detent.is_expanded()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn is_panning_sheet(&self) -> bool {
        self.panning
    }

    /// True once the exit animation has completed
    pub fn is_dismissed(&self) -> bool {
        self.phase.is_in(SheetPhase::Exiting) && self.presentation.is_none()
    }

    /// Whether the content's scroll gesture may run alongside a sheet drag
    pub fn allows_simultaneous_scroll(&self) -> bool {
        self.arbiter.allows_simultaneous(self.scroll.content_offset())
    }

    pub fn geometry(&self) -> &SheetGeometry {
        self.model.geometry()
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const DT: f32 = 1.0 / 60.0;

    fn presented() -> SheetController {
        let mut sheet = SheetController::new(800.0, SheetConfig::default()).unwrap();
        sheet.open();
        run(&mut sheet, 30);
        sheet
    }

    fn run(sheet: &mut SheetController, frames: usize) {
        for _ in 0..frames {
            sheet.tick(DT);
        }
    }

    #[test]
    fn test_new_sheet_is_closed() {
        let sheet = SheetController::new(800.0, SheetConfig::default()).unwrap();
        assert_eq!(sheet.phase(), SheetPhase::Entering);
        assert_eq!(sheet.current_height(), 0.0);
        assert_eq!(sheet.current_detent(), Detent::Medium);
        assert!(!sheet.is_expanded());
    }

    #[test]
    fn test_invalid_construction() {
        let config = SheetConfig {
            medium_ratio: 0.9,
            large_ratio: 0.5,
            ..SheetConfig::default()
        };
        assert!(SheetController::new(800.0, config).is_err());
        assert!(SheetController::new(-10.0, SheetConfig::default()).is_err());
    }

    #[test]
    fn test_open_presents_at_medium() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut sheet = SheetController::new(800.0, SheetConfig::default()).unwrap();
        let sink = events.clone();
        sheet.subscribe(move |e| sink.lock().unwrap().push(e.clone()));

        sheet.open();
        assert!(sheet.state().is_animating);
        run(&mut sheet, 9);
        let midway = sheet.current_height();
        assert!(midway > 0.0 && midway < 400.0);

        run(&mut sheet, 21);
        assert_eq!(sheet.phase(), SheetPhase::AtMedium);
        assert_eq!(sheet.current_height(), 400.0);
        assert_eq!(*events.lock().unwrap(), vec![SheetEvent::Presented]);
    }

    #[test]
    fn test_gestures_ignored_until_presented() {
        let mut sheet = SheetController::new(800.0, SheetConfig::default()).unwrap();
        assert_eq!(
            sheet.handle_gesture(GestureSample::began(10.0, 0.0)),
            GestureDisposition::Rejected
        );
        sheet.open();
        assert_eq!(
            sheet.handle_gesture(GestureSample::began(10.0, 0.0)),
            GestureDisposition::Rejected
        );
    }

    #[test]
    fn test_nan_sample_is_ignored() {
        let mut sheet = presented();
        assert_eq!(
            sheet.handle_gesture(GestureSample::began(f32::NAN, 0.0)),
            GestureDisposition::Ignored
        );
        assert_eq!(sheet.phase(), SheetPhase::AtMedium);
    }

    #[test]
    fn test_changed_without_began_is_ignored() {
        let mut sheet = presented();
        assert_eq!(
            sheet.handle_gesture(GestureSample::changed(-100.0, 0.0)),
            GestureDisposition::Ignored
        );
        assert_eq!(sheet.current_height(), 400.0);
    }

    #[test]
    fn test_stray_end_settles_in_place() {
        let mut sheet = presented();
        assert_eq!(
            sheet.handle_gesture(GestureSample::ended(-300.0, -2000.0)),
            GestureDisposition::Ignored
        );
        assert!(!sheet.is_animating());
        assert_eq!(sheet.phase(), SheetPhase::AtMedium);
    }

    #[test]
    fn test_animate_to_detent_blocked_while_dragging() {
        let mut sheet = presented();
        sheet.handle_gesture(GestureSample::began(10.0, 0.0));
        assert_eq!(
            sheet.animate_to_detent(Detent::Large),
            AnimationRequest::Blocked
        );
    }

    #[test]
    fn test_programmatic_round_trip() {
        let mut sheet = presented();
        assert_eq!(
            sheet.animate_to_detent(Detent::Large),
            AnimationRequest::Started
        );
        assert_eq!(
            sheet.animate_to_detent(Detent::Large),
            AnimationRequest::AlreadyRunning
        );
        run(&mut sheet, 120);
        assert_eq!(sheet.phase(), SheetPhase::AtLarge);
        assert_eq!(sheet.current_height(), 720.0);
        assert_eq!(
            sheet.animate_to_detent(Detent::Large),
            AnimationRequest::AlreadySettled
        );
    }

    #[test]
    fn test_resize_repins_rest_height() {
        let mut sheet = presented();
        sheet.set_container_height(600.0).unwrap();
        assert_eq!(sheet.current_height(), 300.0);
        assert!(sheet.set_container_height(0.0).is_err());
        assert_eq!(sheet.geometry().container_height(), 600.0);
    }

    #[test]
    fn test_close_runs_callback_once() {
        let calls = Arc::new(Mutex::new(0));
        let mut sheet = presented();

        let counter = calls.clone();
        sheet.close(move || *counter.lock().unwrap() += 1);
        let ignored = calls.clone();
        sheet.close(move || *ignored.lock().unwrap() += 100);

        run(&mut sheet, 30);
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(sheet.current_height(), 0.0);
        assert!(sheet.is_dismissed());
    }
}
