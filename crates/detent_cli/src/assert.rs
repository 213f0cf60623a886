//! Assertion helpers for headless sheet runs.

use detent_core::Detent;
use detent_sheet::{SheetController, SheetPhase};
use serde::Serialize;

/// Observable sheet state at one point of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SheetSnapshot {
    pub height: f32,
    pub detent: Detent,
    pub expanded: bool,
    pub content_offset: f32,
    pub scroll_enabled: bool,
    pub phase: SheetPhase,
}

impl SheetSnapshot {
    pub fn capture(sheet: &SheetController) -> Self {
        let state = sheet.state();
        let scroll = sheet.scroll_state();
        Self {
            height: state.current_height,
            detent: state.current_detent,
            expanded: state.expanded,
            content_offset: scroll.content_offset,
            scroll_enabled: scroll.scroll_enabled,
            phase: sheet.phase(),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_detent(expected: Detent, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.detent == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "detent_mismatch",
            format!("expected detent {expected}, got {}", snapshot.detent),
        )
    }
}

pub fn evaluate_assert_height(expected: f32, tolerance: f32, snapshot: &SheetSnapshot) -> AssertionResult {
    if (snapshot.height - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "height_mismatch",
            format!("expected height {expected} ± {tolerance}, got {}", snapshot.height),
        )
    }
}

pub fn evaluate_assert_expanded(expected: bool, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.expanded == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "expanded_mismatch",
            format!("expected expanded = {expected}, got {}", snapshot.expanded),
        )
    }
}

pub fn evaluate_assert_content_offset(
    expected: f32,
    tolerance: f32,
    snapshot: &SheetSnapshot,
) -> AssertionResult {
    if (snapshot.content_offset - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "content_offset_mismatch",
            format!(
                "expected content offset {expected} ± {tolerance}, got {}",
                snapshot.content_offset
            ),
        )
    }
}

pub fn evaluate_assert_phase(expected: SheetPhase, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.phase == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "phase_mismatch",
            format!("expected phase {expected:?}, got {:?}", snapshot.phase),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SheetSnapshot {
        SheetSnapshot {
            height: 720.0,
            detent: Detent::Large,
            expanded: true,
            content_offset: 40.0,
            scroll_enabled: true,
            phase: SheetPhase::AtLarge,
        }
    }

    #[test]
    fn test_passing_assertions() {
        let snap = snapshot();
        assert_eq!(evaluate_assert_detent(Detent::Large, &snap), AssertionResult::Passed);
        assert_eq!(evaluate_assert_height(720.3, 0.5, &snap), AssertionResult::Passed);
        assert_eq!(evaluate_assert_expanded(true, &snap), AssertionResult::Passed);
        assert_eq!(evaluate_assert_content_offset(40.0, 0.0, &snap), AssertionResult::Passed);
        assert_eq!(evaluate_assert_phase(SheetPhase::AtLarge, &snap), AssertionResult::Passed);
    }

    #[test]
    fn test_failure_codes() {
        let snap = snapshot();
        let code = |r: AssertionResult| match r {
            AssertionResult::Failed { code, .. } => code,
            AssertionResult::Passed => "passed".to_string(),
        };
        assert_eq!(code(evaluate_assert_detent(Detent::Medium, &snap)), "detent_mismatch");
        assert_eq!(code(evaluate_assert_height(400.0, 0.5, &snap)), "height_mismatch");
        assert_eq!(code(evaluate_assert_expanded(false, &snap)), "expanded_mismatch");
        assert_eq!(
            code(evaluate_assert_content_offset(0.0, 0.5, &snap)),
            "content_offset_mismatch"
        );
        assert_eq!(code(evaluate_assert_phase(SheetPhase::AtMedium, &snap)), "phase_mismatch");
    }

    #[test]
    fn test_failure_message_names_values() {
        match evaluate_assert_detent(Detent::Medium, &snapshot()) {
            AssertionResult::Failed { message, .. } => {
                assert_eq!(message, "expected detent medium, got large");
            }
            AssertionResult::Passed => panic!("expected failure"),
        }
    }
}
