//! Player input: logical keys, key events, and the queue between the
//! input thread and the frame loop.
//!
//! Events may arrive at any time. They are queued and applied to the
//! session at the start of a frame, one whole event at a time, so the
//! simulation never observes a half-applied key.

use std::sync::mpsc;

use crate::entities::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Apply one key event to the session.
///
/// Fire is edge-triggered: the first key-down latches, and later
/// key-downs (auto-repeat) are ignored until a key-up clears the latch.
pub fn apply_input(session: &mut Session, event: InputEvent) {
    match event {
        InputEvent::KeyDown(Key::Left) => session.player.dx = -session.player.speed,
        InputEvent::KeyDown(Key::Right) => session.player.dx = session.player.speed,
        InputEvent::KeyDown(Key::Fire) => {
            if !session.fire_latched {
                session.fire_latched = true;
                session.fire();
            }
        }
        // Either direction key stops the ship.
        InputEvent::KeyUp(Key::Left) | InputEvent::KeyUp(Key::Right) => session.player.dx = 0.0,
        InputEvent::KeyUp(Key::Fire) => session.fire_latched = false,
    }
}

// ── Queue ─────────────────────────────────────────────────────────────────────

/// Producer half, handed to whichever thread reads the keyboard.
#[derive(Clone, Debug)]
pub struct InputSender(mpsc::Sender<InputEvent>);

impl InputSender {
    /// Returns `false` once the receiving loop is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Consumer half, owned by the frame loop.
#[derive(Debug)]
pub struct InputQueue(mpsc::Receiver<InputEvent>);

impl InputQueue {
    /// Apply every pending event in arrival order without blocking.
    /// Returns how many were applied.
    pub fn drain_into(&self, session: &mut Session) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.0.try_recv() {
            apply_input(session, event);
            applied += 1;
        }
        applied
    }
}

pub fn input_channel() -> (InputSender, InputQueue) {
    let (tx, rx) = mpsc::channel();
    (InputSender(tx), InputQueue(rx))
}
