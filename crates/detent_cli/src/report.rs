//! Report output model for headless sheet runs.

use anyhow::{bail, Result};
use detent_core::SheetEvent;
use serde::Serialize;
use std::io::Write;
use std::path::{Component, Path};

use crate::assert::SheetSnapshot;

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// State after the last executed step
    pub final_state: SheetSnapshot,
    /// Everything the sheet published, in order
    pub events: Vec<SheetEvent>,
}

/// Position and state of a run when its report is built
#[derive(Debug, Clone)]
pub struct RunProgress {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub final_state: SheetSnapshot,
    pub events: Vec<SheetEvent>,
}

/// Which assertion failed and why
#[derive(Debug, Clone)]
pub struct Failure {
    pub step_index: usize,
    pub assertion: &'static str,
    pub code: String,
    pub message: String,
}

impl SheetReport {
    pub fn passed(progress: RunProgress) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            elapsed_frames: progress.elapsed_frames,
            elapsed_ms: progress.elapsed_ms,
            final_state: progress.final_state,
            events: progress.events,
        }
    }

    pub fn failed(failure: Failure, progress: RunProgress) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failure.step_index),
            assertion: Some(failure.assertion.to_string()),
            code: Some(failure.code),
            message: Some(failure.message),
            elapsed_frames: progress.elapsed_frames,
            elapsed_ms: progress.elapsed_ms,
            final_state: progress.final_state,
            events: progress.events,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detent_core::Detent;
    use detent_sheet::SheetPhase;

    fn progress() -> RunProgress {
        RunProgress {
            elapsed_frames: 19,
            elapsed_ms: 304,
            final_state: SheetSnapshot {
                height: 400.0,
                detent: Detent::Medium,
                expanded: false,
                content_offset: 0.0,
                scroll_enabled: true,
                phase: SheetPhase::AtMedium,
            },
            events: vec![SheetEvent::Presented],
        }
    }

    #[test]
    fn test_report_json_shape() {
        let report = SheetReport::passed(progress());
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["status"], "passed");
        assert_eq!(value["elapsed_frames"], 19);
        assert_eq!(value["final_state"]["detent"], "medium");
        assert_eq!(value["final_state"]["phase"], "at_medium");
        assert_eq!(value["events"][0]["type"], "presented");
        assert!(value["failed_step_index"].is_null());
    }

    #[test]
    fn test_failed_report_fields() {
        let report = SheetReport::failed(
            Failure {
                step_index: 3,
                assertion: "assert_detent",
                code: "detent_mismatch".to_string(),
                message: "expected detent large, got medium".to_string(),
            },
            progress(),
        );
        assert!(!report.is_passed());
        assert_eq!(report.failed_step_index, Some(3));
        assert_eq!(report.assertion.as_deref(), Some("assert_detent"));
    }

    #[test]
    fn test_report_path_must_be_relative() {
        let report = SheetReport::passed(progress());
        assert!(report.write_to_path(Path::new("/tmp/report.json")).is_err());
        assert!(report.write_to_path(Path::new("../report.json")).is_err());
    }
}
