//! Detent Animation System
//!
//! Spring physics and keyframe one-shots for sheet height transitions.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs parameterized by stiffness,
//!   damping and mass, or by damping ratio and response time
//! - **Keyframe Animations**: Timed single-value sequences with easing
//! - **Scheduler**: Owns live springs and steps them every frame
//! - **Interruptible**: Retargeted springs keep their velocity

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod scheduler;
pub mod spring;

pub use easing::Easing;
pub use keyframe::{Keyframe, KeyframeAnimation};
pub use presets::SheetTransitions;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
