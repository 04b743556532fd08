// src/score.rs
// Win evaluation over the fixed lines of a card and one-time milestone tracking.

use crate::board::MarkState;
use crate::defs::{LineKind, WIN_PATTERNS};
use serde::{Deserialize, Serialize};

/// Completed lines on a card at one moment.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WinResult {
    pub h: u8,
    pub v: u8,
    pub d: u8,
    pub total: u8,
    pub full: bool,
}

impl WinResult {
    /// e.g. "Row x1, Diagonal x1"; empty when nothing is complete.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = [
            (LineKind::Row, self.h),
            (LineKind::Column, self.v),
            (LineKind::Diagonal, self.d),
        ]
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| format!("{} x{}", kind.as_str(), count))
        .collect();
        parts.join(", ")
    }
}

pub fn evaluate(marks: &MarkState) -> WinResult {
    let mut result = WinResult::default();

    for pattern in WIN_PATTERNS.iter() {
        if !pattern.cells.iter().all(|&cell| marks.is_marked(cell)) {
            continue;
        }
        match pattern.kind {
            LineKind::Row => result.h += 1,
            LineKind::Column => result.v += 1,
            LineKind::Diagonal => result.d += 1,
        }
    }

    result.total = result.h + result.v + result.d;
    result.full = marks.is_full();
    result
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    #[serde(rename = "1-line")]
    OneLine,
    #[serde(rename = "2-lines")]
    TwoLines,
    #[serde(rename = "full-card")]
    FullCard,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [Milestone::OneLine, Milestone::TwoLines, Milestone::FullCard];

    pub fn label(&self) -> &'static str {
        match self {
            Milestone::OneLine => "1-line",
            Milestone::TwoLines => "2-lines",
            Milestone::FullCard => "full-card",
        }
    }

    pub fn is_reached(&self, result: &WinResult) -> bool {
        match self {
            Milestone::OneLine => result.total >= 1,
            Milestone::TwoLines => result.total >= 2,
            Milestone::FullCard => result.full,
        }
    }

    fn slot(&self) -> usize {
        match self {
            Milestone::OneLine => 0,
            Milestone::TwoLines => 1,
            Milestone::FullCard => 2,
        }
    }
}

/// Remembers which milestones a card has already celebrated.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct MilestoneTracker {
    fired: [bool; 3],
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milestones reached for the first time by `result`, in `Milestone::ALL` order.
    /// Each threshold is checked on its own, so one call may return several.
    pub fn observe(&mut self, result: &WinResult) -> Vec<Milestone> {
        let mut reached = Vec::new();
        for milestone in Milestone::ALL {
            if !self.fired[milestone.slot()] && milestone.is_reached(result) {
                self.fired[milestone.slot()] = true;
                reached.push(milestone);
            }
        }
        reached
    }

    pub fn has_fired(&self, milestone: Milestone) -> bool {
        self.fired[milestone.slot()]
    }

    pub fn reset(&mut self) {
        self.fired = [false; 3];
    }
}
