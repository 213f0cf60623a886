//! Animation scheduler
//!
//! Owns all live springs and steps them each frame. Owners keep the
//! [`SpringId`] and read values back after a tick; removing a spring is how an
//! in-flight animation is cancelled.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SpringId;
}

/// The animation scheduler that ticks all active springs
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    /// Run a closure against a spring if it is still alive
    pub fn with_spring_mut<R>(&mut self, id: SpringId, f: impl FnOnce(&mut Spring) -> R) -> Option<R> {
        self.springs.get_mut(id).map(f)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        let removed = self.springs.remove(id);
        if let Some(spring) = &removed {
            tracing::trace!(
                value = spring.value(),
                target = spring.target(),
                settled = spring.is_settled(),
                "spring removed"
            );
        }
        removed
    }

    /// Advance every spring by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any springs are still moving
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Iterate over all springs (immutable)
    pub fn springs_iter(&self) -> impl Iterator<Item = (SpringId, &Spring)> {
        self.springs.iter()
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
