//! Fixed-step frame loop for headless runs.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Upper bound on frames a single step may run.
    pub max_frames_per_step: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_frames_per_step: 10_000,
        }
    }
}

impl RunConfig {
    /// Frame delta in seconds
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be > 0");
        }
        if self.max_frames_per_step == 0 {
            bail!("max_frames_per_step must be > 0");
        }
        Ok(())
    }

    /// Frames needed to cover `ms`, rounded up
    pub fn wait_frames(&self, ms: u64) -> u32 {
        if ms == 0 {
            return 0;
        }
        let tick = self.tick_ms.max(1);
        let frames = ms.saturating_add(tick - 1) / tick;
        frames.min(u32::MAX as u64) as u32
    }
}

/// Run `frames` frames, handing each frame's delta in seconds to `on_frame`
pub fn run_frames<F>(cfg: &RunConfig, frames: u32, mut on_frame: F) -> Result<()>
where
    F: FnMut(f32),
{
    if frames > cfg.max_frames_per_step {
        bail!(
            "step requests {frames} frames, limit is {}",
            cfg.max_frames_per_step
        );
    }

    let dt = cfg.dt();
    for _ in 0..frames {
        on_frame(dt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_frames_rounds_up() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.wait_frames(0), 0);
        assert_eq!(cfg.wait_frames(1), 1);
        assert_eq!(cfg.wait_frames(16), 1);
        assert_eq!(cfg.wait_frames(17), 2);
        assert_eq!(cfg.wait_frames(300), 19);
    }

    #[test]
    fn test_run_frames_respects_limit() {
        let cfg = RunConfig {
            tick_ms: 10,
            max_frames_per_step: 5,
        };
        let mut total = 0.0;
        run_frames(&cfg, 5, |dt| total += dt).unwrap();
        assert!((total - 0.05).abs() < 1e-6);
        assert!(run_frames(&cfg, 6, |_| {}).is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let cfg = RunConfig {
            tick_ms: 0,
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
