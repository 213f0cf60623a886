//! Spring-driven detent transitions
//!
//! At most one height animation is in flight. Starting a new one removes the
//! previous spring from the scheduler, so the interrupted animation never
//! reports completion; its velocity carries over into the replacement.

use detent_animation::{AnimationScheduler, Spring, SpringConfig, SpringId};
use detent_core::Detent;

/// Result of asking for a detent transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationRequest {
    /// A new spring is running
    Started,
    /// Already animating toward this detent
    AlreadyRunning,
    /// Already resting at this detent
    AlreadySettled,
    /// The sheet is presenting, dismissing or being dragged
    Blocked,
}

/// Sheet state an animation request is judged against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationContext {
    pub current_height: f32,
    pub current_detent: Detent,
    /// Requests that follow a drag release always run, even to the current detent
    pub mid_gesture: bool,
}

/// What a height animation did during the last frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationPoll {
    Idle,
    Running { height: f32 },
    Finished { detent: Detent, height: f32 },
}

#[derive(Clone, Copy, Debug)]
struct HeightAnimation {
    target: Detent,
    spring: SpringId,
}

#[derive(Debug)]
pub struct AnimationController {
    spring_config: SpringConfig,
    active: Option<HeightAnimation>,
}

impl AnimationController {
    pub fn new(spring_config: SpringConfig) -> Self {
        Self {
            spring_config,
            active: None,
        }
    }

    pub fn spring_config(&self) -> SpringConfig {
        self.spring_config
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Detent the in-flight animation is heading to
    pub fn target(&self) -> Option<Detent> {
        self.active.map(|a| a.target)
    }

    pub fn animate_to_detent(
        &mut self,
        scheduler: &mut AnimationScheduler,
        target: Detent,
        target_height: f32,
        context: AnimationContext,
    ) -> AnimationRequest {
        if self.target() == Some(target) {
            return AnimationRequest::AlreadyRunning;
        }

        if !self.is_animating()
            && !context.mid_gesture
            && context.current_detent == target
            && (context.current_height - target_height).abs() < 0.5
        {
            return AnimationRequest::AlreadySettled;
        }

        let (from, velocity) = match self.cancel(scheduler) {
            Some(interrupted) => (interrupted.value(), interrupted.velocity()),
            None => (context.current_height, 0.0),
        };

        let mut spring = Spring::new(self.spring_config, from).with_velocity(velocity);
        spring.set_target(target_height);
        let id = scheduler.add_spring(spring);
        self.active = Some(HeightAnimation { target, spring: id });

        tracing::debug!(from, to = target_height, velocity, ?target, "detent animation started");
        AnimationRequest::Started
    }

    /// Move the in-flight animation to a new height (container resized)
    pub fn retarget(&mut self, scheduler: &mut AnimationScheduler, target_height: f32) {
        if let Some(active) = self.active {
            scheduler.with_spring_mut(active.spring, |s| s.set_target(target_height));
        }
    }

    /// Drop the in-flight animation without completing it
    pub fn cancel(&mut self, scheduler: &mut AnimationScheduler) -> Option<Spring> {
        let active = self.active.take()?;
        tracing::debug!(target = ?active.target, "detent animation cancelled");
        scheduler.remove_spring(active.spring)
    }

    /// Read the spring after the scheduler has stepped
    pub fn poll(&mut self, scheduler: &mut AnimationScheduler) -> AnimationPoll {
        let Some(active) = self.active else {
            return AnimationPoll::Idle;
        };

        let Some((value, settled)) = scheduler
            .get_spring(active.spring)
            .map(|s| (s.value(), s.is_settled()))
        else {
            // Removed behind our back; nothing left to complete
            self.active = None;
            return AnimationPoll::Idle;
        };

        if !settled {
            return AnimationPoll::Running { height: value };
        }

        self.active = None;
        scheduler.remove_spring(active.spring);
        AnimationPoll::Finished {
            detent: active.target,
            height: value,
        }
    }
}
