//! Terminal host — all crossterm I/O lives here.
//!
//! `TerminalHost` implements the three host capabilities the frame loop
//! needs. World pixels are scaled onto the terminal grid between the HUD
//! row (row 0) and the controls hint (last row); rectangles are painted as
//! background-coloured blank cells.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::driver::{Canvas, FrameScheduler, ScoreSink};
use crate::entities::{score_text, Rect, Rgb};
use crate::input::{InputEvent, Key};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved outside the play area: HUD on top, hint at the bottom.
const RESERVED_ROWS: u16 = 2;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

pub struct TerminalHost<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
    score: u32,
    frame_budget: Duration,
    frame_start: Instant,
    /// Re-read the terminal size at the start of every frame.
    follow_terminal: bool,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(
        out: W,
        (cols, rows): (u16, u16),
        (world_width, world_height): (f32, f32),
        frame_budget: Duration,
    ) -> Self {
        Self {
            out,
            cols,
            rows,
            world_width,
            world_height,
            score: 0,
            frame_budget,
            frame_start: Instant::now(),
            follow_terminal: false,
        }
    }

    /// Track terminal resizes by querying the size on every `clear`.
    pub fn follow_terminal_size(mut self) -> Self {
        self.follow_terminal = true;
        self
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(RESERVED_ROWS)
    }

    /// Map a world rectangle to `(col, row, width, height)` in cells,
    /// clipped to the play area. `None` if nothing is left after clipping.
    pub fn to_cells(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let cols = self.cols as f32;
        let rows = self.play_rows() as f32;
        let sx = |v: f32| v * cols / self.world_width;
        let sy = |v: f32| v * rows / self.world_height;

        let left = sx(rect.x).floor().max(0.0);
        let right = sx(rect.x + rect.width).ceil().min(cols);
        let top = sy(rect.y).floor().max(0.0);
        let bottom = sy(rect.y + rect.height).ceil().min(rows);

        if right <= left || bottom <= top {
            return None;
        }
        Some((
            left as u16,
            top as u16 + 1, // below the HUD row
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    fn draw_hud(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::ResetColor)?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(score_text(self.score)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalHost<W> {
    fn clear(&mut self, _area: Rect) -> io::Result<()> {
        // The world always fills the whole play area, so clear everything
        // and repaint the chrome around it.
        self.frame_start = Instant::now();
        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            self.resize(cols, rows);
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_hud()?;
        self.draw_controls_hint()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()> {
        let Some((col, row, width, height)) = self.to_cells(rect) else {
            return Ok(());
        };
        let blank = " ".repeat(width as usize);
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        for r in row..row + height {
            self.out.queue(cursor::MoveTo(col, r))?;
            self.out.queue(Print(&blank))?;
        }
        self.out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl<W: Write> ScoreSink for TerminalHost<W> {
    fn set_score_text(&mut self, score: u32) -> io::Result<()> {
        self.score = score;
        self.draw_hud()
    }
}

impl<W: Write> FrameScheduler for TerminalHost<W> {
    /// Flush the frame and sleep out the rest of the frame budget.
    fn schedule_next_frame(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }
        Ok(())
    }
}

// ── Key translation ───────────────────────────────────────────────────────────

/// Logical key for a terminal key code, if it is bound.
pub fn bound_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

/// Q, Esc and Ctrl-C end the program.
pub fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// When a key with no release report counts as let go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expiry {
    /// Silence allowed after the first press, before auto-repeat kicks in.
    /// Must exceed the OS initial repeat delay.
    pub repeat_delay: Duration,
    /// Silence allowed once the key is auto-repeating.
    pub repeat_window: Duration,
}

#[derive(Clone, Copy, Debug)]
struct HeldKey {
    last_seen: Instant,
    repeating: bool,
}

/// Turns raw terminal key events into `InputEvent`s.
///
/// Terminals with keyboard enhancement report real releases and never need
/// expiry. Classic terminals only send presses (auto-repeat shows up as more
/// presses), so a key that stays silent past its `Expiry` is treated as
/// released.
#[derive(Debug)]
pub struct KeyTracker {
    expiry: Option<Expiry>,
    held: HashMap<Key, HeldKey>,
}

impl KeyTracker {
    /// For terminals that report key releases.
    pub fn with_releases() -> Self {
        Self {
            expiry: None,
            held: HashMap::new(),
        }
    }

    /// For terminals without release events.
    pub fn with_expiry(expiry: Expiry) -> Self {
        Self {
            expiry: Some(expiry),
            held: HashMap::new(),
        }
    }

    pub fn translate(&mut self, event: &KeyEvent, now: Instant) -> Option<InputEvent> {
        let key = bound_key(event.code)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let repeat = event.kind == KeyEventKind::Repeat;
                self.held
                    .entry(key)
                    .and_modify(|h| {
                        h.last_seen = now;
                        h.repeating = true;
                    })
                    .or_insert(HeldKey {
                        last_seen: now,
                        repeating: repeat,
                    });
                Some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                Some(InputEvent::KeyUp(key))
            }
        }
    }

    /// Synthesised key-ups for keys silent longer than their expiry.
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let Some(expiry) = self.expiry else {
            return Vec::new();
        };
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, h)| {
                let window = if h.repeating {
                    expiry.repeat_window
                } else {
                    expiry.repeat_delay
                };
                now.saturating_duration_since(h.last_seen) > window
            })
            .map(|(&key, _)| key)
            .collect();
        stale
            .into_iter()
            .map(|key| {
                self.held.remove(&key);
                InputEvent::KeyUp(key)
            })
            .collect()
    }
}
