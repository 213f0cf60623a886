//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Large frame deltas are
//! split into fixed sub-steps so a dropped frame cannot destabilize a stiff
//! spring.

use std::f32::consts::PI;

/// Largest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Displacement below which the spring may be considered at rest
const REST_DISPLACEMENT: f32 = 0.01;

/// Speed (units/second) below which the spring may be considered at rest
const REST_VELOCITY: f32 = 0.05;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Build a unit-mass spring from a damping ratio and a response time
    ///
    /// `response` is the period (seconds) of the undamped oscillation. A
    /// damping ratio below 1.0 settles with a slight overshoot, 1.0 is
    /// critically damped.
    pub fn from_damping_ratio(damping_ratio: f32, response: f32) -> Self {
        let omega = 2.0 * PI / response;
        Self {
            stiffness: omega * omega,
            damping: 2.0 * damping_ratio * omega,
            mass: 1.0,
        }
    }

    /// Damping ratio ζ = c / (2·√(k·m))
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped period in seconds
    pub fn response(&self) -> f32 {
        2.0 * PI / (self.stiffness / self.mass).sqrt()
    }
}

/// A single animated value driven toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start with an initial velocity (e.g. inherited from an interrupted spring)
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring. Velocity is preserved.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Whether the spring has come to rest at its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() || self.is_settled() {
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
            }
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    /// One RK4 step of size `h`
    fn integrate(&mut self, h: f32) {
        let x0 = self.value;
        let v0 = self.velocity;

        let k1x = v0;
        let k1v = self.acceleration(x0, v0);

        let k2x = v0 + k1v * h * 0.5;
        let k2v = self.acceleration(x0 + k1x * h * 0.5, k2x);

        let k3x = v0 + k2v * h * 0.5;
        let k3v = self.acceleration(x0 + k2x * h * 0.5, k3x);

        let k4x = v0 + k3v * h;
        let k4v = self.acceleration(x0 + k3x * h, k4x);

        self.value = x0 + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v0 + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}
