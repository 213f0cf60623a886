//! Keyframe animations
//!
//! Single-value, time-based animations. Unlike springs they have a fixed
//! duration, which is what the sheet's entry and exit one-shots need.

use smallvec::SmallVec;

use crate::easing::Easing;

/// A single keyframe in a single-value animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Target value at this keyframe
    pub value: f32,
    /// Easing function to use when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
            easing,
        }
    }
}

/// A keyframe-based animation (single value)
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    duration_ms: u32,
    keyframes: SmallVec<[Keyframe; 4]>,
    current_time: f32,
    playing: bool,
}

impl KeyframeAnimation {
    /// Keyframes are sorted by time on construction
    pub fn new(duration_ms: u32, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keyframes: SmallVec<[Keyframe; 4]> = keyframes.into_iter().collect();
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            duration_ms,
            keyframes,
            current_time: 0.0,
            playing: false,
        }
    }

    /// Two-keyframe animation from `from` to `to`
    pub fn tween(duration_ms: u32, from: f32, to: f32, easing: Easing) -> Self {
        Self::new(
            duration_ms,
            [
                Keyframe::new(0.0, from, Easing::Linear),
                Keyframe::new(1.0, to, easing),
            ],
        )
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the animation has played through to its last keyframe
    pub fn is_finished(&self) -> bool {
        !self.playing && self.progress() >= 1.0
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.current_time / self.duration_ms as f32
    }

    /// Get the current interpolated value
    pub fn value(&self) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };

        let progress = self.progress().clamp(0.0, 1.0);

        let mut prev_kf = first;
        let mut next_kf = first;
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev_kf = kf;
            }
            if kf.time >= progress {
                next_kf = kf;
                break;
            }
        }

        if (prev_kf.time - next_kf.time).abs() < f32::EPSILON {
            return prev_kf.value;
        }

        let local_progress = (progress - prev_kf.time) / (next_kf.time - prev_kf.time);
        let eased = next_kf.easing.apply(local_progress);

        prev_kf.value + (next_kf.value - prev_kf.value) * eased
    }

    /// Advance the animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt_ms.max(0.0);

        if self.current_time >= self.duration_ms as f32 {
            self.current_time = self.duration_ms as f32;
            self.playing = false;
        }
    }

    /// Get the keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_endpoints() {
        let mut anim = KeyframeAnimation::tween(300, 0.0, 400.0, Easing::EaseOutCubic);
        anim.start();
        assert_eq!(anim.value(), 0.0);
        assert!(anim.is_playing());

        anim.tick(150.0);
        let mid = anim.value();
        assert!(mid > 200.0, "ease-out should be past halfway at 50%, got {mid}");

        anim.tick(200.0);
        assert_eq!(anim.value(), 400.0);
        assert!(!anim.is_playing());
        assert!(anim.is_finished());
    }

    #[test]
    fn test_not_started_does_not_advance() {
        let mut anim = KeyframeAnimation::tween(100, 10.0, 20.0, Easing::Linear);
        anim.tick(50.0);
        assert_eq!(anim.value(), 10.0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_keyframes_are_sorted() {
        let anim = KeyframeAnimation::new(
            200,
            [
                Keyframe::new(1.0, 3.0, Easing::Linear),
                Keyframe::new(0.0, 1.0, Easing::Linear),
                Keyframe::new(0.5, 2.0, Easing::Linear),
            ],
        );
        let times: Vec<f32> = anim.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut anim = KeyframeAnimation::tween(0, 5.0, 0.0, Easing::EaseInCubic);
        anim.start();
        anim.tick(0.0);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn test_stop_freezes_value() {
        let mut anim = KeyframeAnimation::tween(100, 0.0, 100.0, Easing::Linear);
        anim.start();
        anim.tick(40.0);
        anim.stop();
        anim.tick(40.0);
        assert!((anim.value() - 40.0).abs() < 1e-3);
        assert!(!anim.is_finished());
    }
}
