// src/board.rs
// Per-player card state: which cells are marked and which milestones have fired.

use std::collections::HashSet;

use crate::card::Card;
use crate::defs::CARD_CELLS;
use crate::error::{BingoError, Result};
use crate::score::{evaluate, Milestone, MilestoneTracker, WinResult};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkState([bool; CARD_CELLS]);

impl MarkState {
    pub fn new() -> Self {
        MarkState([false; CARD_CELLS])
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Flip one cell and return its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let cell = self.0.get_mut(index).ok_or(BingoError::CellOutOfRange(index))?;
        *cell = !*cell;
        Ok(*cell)
    }

    pub fn mark(&mut self, index: usize) -> Result<()> {
        let cell = self.0.get_mut(index).ok_or(BingoError::CellOutOfRange(index))?;
        *cell = true;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&m| m)
    }

    pub fn reset(&mut self) {
        self.0 = [false; CARD_CELLS];
    }
}

/// Functional form of [`MarkState::toggle`].
pub fn toggle(state: MarkState, index: usize) -> Result<MarkState> {
    let mut next = state;
    next.toggle(index)?;
    Ok(next)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub marked: bool,
    pub result: WinResult,
    pub milestones: Vec<Milestone>,
}

/// One player's card together with its marks and celebrated milestones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardSession {
    card: Card,
    marks: MarkState,
    milestones: MilestoneTracker,
}

impl CardSession {
    pub fn new(card: Card) -> Self {
        CardSession {
            card,
            marks: MarkState::new(),
            milestones: MilestoneTracker::new(),
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn marks(&self) -> &MarkState {
        &self.marks
    }

    pub fn milestones(&self) -> &MilestoneTracker {
        &self.milestones
    }

    pub fn result(&self) -> WinResult {
        evaluate(&self.marks)
    }

    pub fn toggle(&mut self, index: usize) -> Result<ToggleOutcome> {
        let marked = self.marks.toggle(index)?;
        let result = self.result();
        let milestones = self.milestones.observe(&result);
        Ok(ToggleOutcome { marked, result, milestones })
    }

    /// Mark every cell whose photo is in `revealed`; returns how many cells changed.
    pub fn mark_revealed(&mut self, revealed: &HashSet<&str>) -> usize {
        let mut newly_marked = 0;
        for (index, photo) in self.card.cells().iter().enumerate() {
            if !self.marks.is_marked(index) && revealed.contains(photo.as_str()) {
                self.marks.0[index] = true;
                newly_marked += 1;
            }
        }
        newly_marked
    }

    /// Evaluate the card and report milestones not seen before.
    pub fn observe(&mut self) -> (WinResult, Vec<Milestone>) {
        let result = self.result();
        let milestones = self.milestones.observe(&result);
        (result, milestones)
    }

    /// Swap in a new card; marks and milestones start over.
    pub fn replace_card(&mut self, card: Card) {
        self.card = card;
        self.marks.reset();
        self.milestones.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::new((0..9).map(|i| format!("trip/{i}.jpg")).collect()).unwrap()
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let start = MarkState::new();
        for index in 0..CARD_CELLS {
            let once = toggle(start, index).unwrap();
            assert!(once.is_marked(index));
            assert_eq!(once.count(), 1);
            assert_eq!(toggle(once, index).unwrap(), start);
        }
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut marks = MarkState::new();
        assert!(matches!(marks.toggle(9), Err(BingoError::CellOutOfRange(9))));
        assert!(matches!(marks.mark(42), Err(BingoError::CellOutOfRange(42))));
        assert_eq!(marks, MarkState::new());
        assert!(!marks.is_marked(9));
    }

    #[test]
    fn test_session_toggle_reports_milestones_once() {
        let mut session = CardSession::new(sample_card());
        assert!(session.toggle(0).unwrap().milestones.is_empty());
        assert!(session.toggle(1).unwrap().milestones.is_empty());

        let outcome = session.toggle(2).unwrap();
        assert!(outcome.marked);
        assert_eq!(outcome.result.total, 1);
        assert_eq!(outcome.milestones, vec![Milestone::OneLine]);

        // unmarking and re-marking the same line does not celebrate again
        let outcome = session.toggle(2).unwrap();
        assert!(!outcome.marked);
        assert_eq!(outcome.result.total, 0);
        assert!(session.toggle(2).unwrap().milestones.is_empty());
    }

    #[test]
    fn test_session_full_card() {
        let mut session = CardSession::new(sample_card());
        let mut fired = Vec::new();
        for index in [4, 0, 8, 2, 6, 1, 3, 5, 7] {
            fired.extend(session.toggle(index).unwrap().milestones);
        }
        assert_eq!(fired, Milestone::ALL.to_vec());
        assert_eq!(session.result(), WinResult { h: 3, v: 3, d: 2, total: 8, full: true });
    }

    #[test]
    fn test_mark_revealed_and_replace_card() {
        let mut session = CardSession::new(sample_card());
        let revealed: HashSet<&str> = ["trip/0.jpg", "trip/1.jpg", "trip/2.jpg", "elsewhere.jpg"].into_iter().collect();
        assert_eq!(session.mark_revealed(&revealed), 3);
        assert_eq!(session.mark_revealed(&revealed), 0);

        let (result, milestones) = session.observe();
        assert_eq!(result.h, 1);
        assert_eq!(milestones, vec![Milestone::OneLine]);
        assert!(session.observe().1.is_empty());

        session.replace_card(sample_card());
        assert_eq!(session.marks().count(), 0);
        assert!(!session.milestones().has_fired(Milestone::OneLine));
    }
}
