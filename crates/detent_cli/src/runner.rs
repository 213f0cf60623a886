//! Scenario runner that drives a sheet controller headlessly.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use detent_core::{GesturePhase, GestureSample, SheetEvent};
use detent_sheet::SheetController;

use crate::assert::{
    evaluate_assert_content_offset, evaluate_assert_detent, evaluate_assert_expanded,
    evaluate_assert_height, evaluate_assert_phase, AssertionResult, SheetSnapshot,
};
use crate::report::{Failure, RunProgress, SheetReport};
use crate::runtime::{run_frames, RunConfig};
use crate::scenario::{ScenarioStep, SheetScenario};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: SheetReport },
    Failed { report: SheetReport },
}

impl RunOutcome {
    pub fn report(&self) -> &SheetReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON with the default frame configuration.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    let scenario = SheetScenario::from_json(input)?;
    run_loaded_scenario(&scenario, RunConfig::default())
}

struct Run {
    sheet: SheetController,
    events: Arc<Mutex<Vec<SheetEvent>>>,
    cfg: RunConfig,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

impl Run {
    fn advance(&mut self, frames: u32) -> Result<()> {
        let sheet = &mut self.sheet;
        run_frames(&self.cfg, frames, |dt| sheet.tick(dt))?;
        self.elapsed_frames = self.elapsed_frames.saturating_add(frames as u64);
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(self.cfg.tick_ms.saturating_mul(frames as u64));
        Ok(())
    }

    fn drag(
        &mut self,
        location_y: f32,
        translation_y: f32,
        velocity_y: f32,
        initial_velocity_y: Option<f32>,
        samples: u32,
    ) {
        let initial = initial_velocity_y.unwrap_or(if translation_y > 0.0 { 1.0 } else { -1.0 });
        let disposition = self
            .sheet
            .handle_gesture(GestureSample::began(location_y, initial));
        tracing::debug!(?disposition, location_y, translation_y, "drag began");

        let samples = samples.max(1);
        for i in 1..=samples {
            let t = translation_y * i as f32 / samples as f32;
            self.sheet
                .handle_gesture(GestureSample::changed(t, velocity_y));
        }
        self.sheet
            .handle_gesture(GestureSample::ended(translation_y, velocity_y));
    }

    fn gesture(&mut self, phase: GesturePhase, location_y: f32, translation_y: f32, velocity_y: f32) {
        let disposition = self.sheet.handle_gesture(GestureSample {
            phase,
            location_y,
            translation_y,
            velocity_y,
        });
        tracing::debug!(?phase, ?disposition, "raw gesture sample");
    }

    fn progress(&self) -> RunProgress {
        let events = match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        RunProgress {
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_ms,
            final_state: SheetSnapshot::capture(&self.sheet),
            events,
        }
    }
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(scenario: &SheetScenario, cfg: RunConfig) -> Result<RunOutcome> {
    cfg.validate()?;

    let mut sheet = SheetController::new(scenario.container_height, scenario.config.clone())
        .context("invalid sheet setup")?;
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    sheet.subscribe(move |event| {
        if let Ok(mut events) = sink.lock() {
            events.push(event.clone());
        }
    });

    let mut run = Run {
        sheet,
        events,
        cfg,
        elapsed_frames: 0,
        elapsed_ms: 0,
    };

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::trace!(step_index, ?step, "scenario step");

        let (assertion, result) = match step {
            ScenarioStep::Open => {
                run.sheet.open();
                continue;
            }
            ScenarioStep::Close => {
                run.sheet.close(|| tracing::debug!("close completion fired"));
                continue;
            }
            ScenarioStep::Drag {
                location_y,
                translation_y,
                velocity_y,
                initial_velocity_y,
                samples,
            } => {
                run.drag(*location_y, *translation_y, *velocity_y, *initial_velocity_y, *samples);
                continue;
            }
            ScenarioStep::Gesture {
                phase,
                location_y,
                translation_y,
                velocity_y,
            } => {
                run.gesture(*phase, *location_y, *translation_y, *velocity_y);
                continue;
            }
            ScenarioStep::Scroll { offset } => {
                let applied = run.sheet.handle_content_scroll(*offset);
                tracing::debug!(reported = offset, applied, "content scroll");
                continue;
            }
            ScenarioStep::Tick { frames } => {
                run.advance(*frames)
                    .with_context(|| format!("step {step_index}"))?;
                continue;
            }
            ScenarioStep::Wait { ms } => {
                let frames = run.cfg.wait_frames(*ms);
                run.advance(frames)
                    .with_context(|| format!("step {step_index}"))?;
                continue;
            }
            ScenarioStep::AnimateTo { detent } => {
                let request = run.sheet.animate_to_detent(*detent);
                tracing::debug!(?request, %detent, "animate_to");
                continue;
            }
            ScenarioStep::Resize { container_height } => {
                run.sheet
                    .set_container_height(*container_height)
                    .with_context(|| format!("step {step_index}: resize"))?;
                continue;
            }
            ScenarioStep::AssertDetent { detent } => {
                let snapshot = SheetSnapshot::capture(&run.sheet);
                ("assert_detent", evaluate_assert_detent(*detent, &snapshot))
            }
            ScenarioStep::AssertHeight { value, tolerance } => {
                let snapshot = SheetSnapshot::capture(&run.sheet);
                ("assert_height", evaluate_assert_height(*value, *tolerance, &snapshot))
            }
            ScenarioStep::AssertExpanded { value } => {
                let snapshot = SheetSnapshot::capture(&run.sheet);
                ("assert_expanded", evaluate_assert_expanded(*value, &snapshot))
            }
            ScenarioStep::AssertContentOffset { value, tolerance } => {
                let snapshot = SheetSnapshot::capture(&run.sheet);
                (
                    "assert_content_offset",
                    evaluate_assert_content_offset(*value, *tolerance, &snapshot),
                )
            }
            ScenarioStep::AssertPhase { phase } => {
                let snapshot = SheetSnapshot::capture(&run.sheet);
                ("assert_phase", evaluate_assert_phase(*phase, &snapshot))
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::debug!(step_index, assertion, %message, "assertion failed");
            let failure = Failure {
                step_index,
                assertion,
                code,
                message,
            };
            return Ok(RunOutcome::Failed {
                report: SheetReport::failed(failure, run.progress()),
            });
        }
    }

    Ok(RunOutcome::Passed {
        report: SheetReport::passed(run.progress()),
    })
}
