// src/simulation.rs
// Replays a story against many cards at once and records, step by step,
// how many cards have lines and when each card first reaches a milestone.

use std::collections::HashSet;

use serde::Serialize;

use crate::board::CardSession;
use crate::card::Card;
use crate::error::Result;
use crate::score::{Milestone, WinResult};
use crate::story::RevealStep;

/// First time a card reached a milestone. `step` and `card` count from 1.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SimulationEvent {
    pub step: usize,
    pub step_label: String,
    pub card: usize,
    pub milestone: Milestone,
    pub result: WinResult,
}

impl SimulationEvent {
    pub fn describe(&self) -> String {
        let details = self.result.describe();
        let mut line = format!(
            "Step {} ({}) - Card {}: {}",
            self.step,
            self.step_label,
            self.card,
            self.milestone.label()
        );
        if !details.is_empty() {
            line.push_str(&format!(" ({details})"));
        }
        line
    }
}

/// Card counts after one step.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    pub step: usize,
    pub label: String,
    pub rows: usize,
    pub columns: usize,
    pub diagonals: usize,
    pub one_line: usize,
    pub two_lines: usize,
    pub full: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FirstBingo {
    pub step: usize,
    pub label: String,
    pub winners: usize,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub steps: Vec<StepResult>,
    pub events: Vec<SimulationEvent>,
    pub first_bingo: Option<FirstBingo>,
}

impl SimulationReport {
    pub fn first_event(&self, milestone: Milestone) -> Option<&SimulationEvent> {
        self.events.iter().find(|event| event.milestone == milestone)
    }

    pub fn events_for_card(&self, card: usize) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter().filter(move |event| event.card == card)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reveal `steps` in order on every card. Marks accumulate and are never removed.
pub fn simulate(steps: &[RevealStep], cards: &[Card]) -> SimulationReport {
    let mut sessions: Vec<CardSession> = cards.iter().cloned().map(CardSession::new).collect();
    let mut report = SimulationReport::default();

    for (step_index, step) in steps.iter().enumerate() {
        let step_number = step_index + 1;
        let revealed: HashSet<&str> = step.entries.iter().map(String::as_str).collect();
        let mut summary = StepResult {
            step: step_number,
            label: step.label.clone(),
            ..StepResult::default()
        };

        for (card_index, session) in sessions.iter_mut().enumerate() {
            session.mark_revealed(&revealed);
            let (result, reached) = session.observe();

            for milestone in reached {
                report.events.push(SimulationEvent {
                    step: step_number,
                    step_label: step.label.clone(),
                    card: card_index + 1,
                    milestone,
                    result,
                });
            }

            summary.rows += usize::from(result.h >= 1);
            summary.columns += usize::from(result.v >= 1);
            summary.diagonals += usize::from(result.d >= 1);
            summary.one_line += usize::from(result.total >= 1);
            summary.two_lines += usize::from(result.total >= 2);
            summary.full += usize::from(result.full);
        }

        if report.first_bingo.is_none() && summary.one_line > 0 {
            report.first_bingo = Some(FirstBingo {
                step: step_number,
                label: step.label.clone(),
                winners: summary.one_line,
            });
        }

        report.steps.push(summary);
    }

    report
}
