// src/terminal.rs
// This module handles terminal input/output for the photo bingo player.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::board::{CardSession, MarkState};
use crate::card::Card;
use crate::defs::{CARD_CELLS, GRID_SIDE};
use crate::score::Milestone;

const CELL_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Toggle(usize),
    NewCard,
    Quit,
    Ignore,
}

// Keys 1-9 map to cells 0-8, row by row
pub fn key_action(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('n') => KeyAction::NewCard,
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(d) if (1..=CARD_CELLS as u32).contains(&d) => KeyAction::Toggle(d as usize - 1),
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}

fn cell_label(photo: &str) -> String {
    let name = photo.rsplit('/').next().unwrap_or(photo);
    let max = CELL_WIDTH - 4;
    if name.chars().count() > max {
        let truncated: String = name.chars().take(max - 1).collect();
        format!("{truncated}~")
    } else {
        name.to_string()
    }
}

pub fn render_grid(card: &Card, marks: &MarkState) -> String {
    let mut out = String::new();

    for (row_index, row) in card.rows().enumerate() {
        for (col_index, photo) in row.iter().enumerate() {
            let index = row_index * GRID_SIDE + col_index;
            let tag = if marks.is_marked(index) { "X".to_string() } else { (index + 1).to_string() };
            let cell = format!("[{tag}] {:<width$}", cell_label(photo), width = CELL_WIDTH - 4);
            if marks.is_marked(index) {
                out.push_str(&format!("\x1b[1;33m{cell}\x1b[0m")); // Bold yellow for spotted photos
            } else {
                out.push_str(&cell);
            }
            out.push(' ');
        }
        out.push('\n');
    }

    out
}

pub fn milestone_message(milestone: Milestone) -> &'static str {
    match milestone {
        Milestone::OneLine => "BINGO! One line complete!",
        Milestone::TwoLines => "BINGO! Two lines complete!",
        Milestone::FullCard => "FULL CARD!!! Every photo spotted!",
    }
}

pub fn show_on_terminal(session: &CardSession, reached: &[Milestone]) {
    println!("Card ID: {:016X}\n", session.card().id());
    print!("{}", render_grid(session.card(), session.marks()));

    let result = session.result();
    println!("\nSpotted {}/{} - lines: {}", session.marks().count(), CARD_CELLS, result.total);
    if !result.describe().is_empty() {
        println!("{}", result.describe());
    }

    for &milestone in reached {
        println!("\n\x1b[1;32m{}\x1b[0m", milestone_message(milestone));
    }
    println!();
}

// Leaves raw mode when dropped, including on early error returns
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub fn wait_for_user_action() -> io::Result<KeyAction> {
    println!("Press 1-9 to mark or unmark a photo, n for a new card, ESC to exit");

    // Enable raw mode to capture individual key presses
    let raw_mode = RawModeGuard::enable()?;

    // Clear any pending events in the buffer
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }

    let action = loop {
        if let Event::Key(key_event) = event::read()? {
            // Only process key press events, not key release events
            if key_event.kind == KeyEventKind::Press {
                match key_action(key_event.code) {
                    KeyAction::Ignore => continue,
                    action => break action,
                }
            }
        }
    };

    drop(raw_mode);
    print!("\x1Bc"); // Clear the screen

    Ok(action)
}
