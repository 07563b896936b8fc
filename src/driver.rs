//! Frame loop: update → collide → render → reschedule.
//!
//! The host supplies three capabilities — a canvas, a score display and a
//! frame scheduler. Their failures are passed straight back to the caller.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::{integrate, overlaps, resolve_collisions, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{Rect, Rgb, Session, BULLET_COLOR, ENEMY_COLOR, PLAYER_COLOR};
use crate::input::{input_channel, InputQueue, InputSender};

// ── Host capabilities ─────────────────────────────────────────────────────────

pub trait Canvas {
    /// Erase `area`. Called once at the start of every frame.
    fn clear(&mut self, area: Rect) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()>;
}

pub trait ScoreSink {
    fn set_score_text(&mut self, score: u32) -> io::Result<()>;
}

pub trait FrameScheduler {
    /// Wait for (or arrange) the next frame slot. Called once per
    /// completed frame.
    fn schedule_next_frame(&mut self) -> io::Result<()>;
}

// ── Cancellation ──────────────────────────────────────────────────────────────

/// Shared flag that stops the loop before its next frame is scheduled.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Loop ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

pub struct GameLoop<R: Rng = StdRng> {
    session: Session,
    rng: R,
    state: LoopState,
    inputs: InputQueue,
    sender: InputSender,
    cancel: CancelHandle,
}

impl GameLoop<StdRng> {
    /// Seeded from `config.seed` when present, otherwise from entropy.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameLoop<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let (sender, inputs) = input_channel();
        Self {
            session: Session::new(config),
            rng,
            state: LoopState::Idle,
            inputs,
            sender,
            cancel: CancelHandle::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// A new producer for the input queue; clone freely across threads.
    pub fn input_sender(&self) -> InputSender {
        self.sender.clone()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Idle → Running. Starts a fresh session and shows the zero score.
    /// Ignored once the loop is already running.
    pub fn start(&mut self, scores: &mut impl ScoreSink) -> io::Result<()> {
        if self.state == LoopState::Running {
            log::warn!("start() called on a running loop; ignored");
            return Ok(());
        }
        self.session.start_session();
        scores.set_score_text(self.session.score)?;
        self.state = LoopState::Running;
        Ok(())
    }

    /// Run one frame. Does nothing while idle.
    pub fn step<H: Canvas + ScoreSink>(&mut self, host: &mut H) -> io::Result<CollisionReport> {
        if self.state == LoopState::Idle {
            return Ok(CollisionReport::default());
        }
        let config = &self.session.config;
        host.clear(Rect::new(0.0, 0.0, config.screen_width, config.screen_height))?;

        self.inputs.drain_into(&mut self.session);
        integrate(&mut self.session);
        if let Some(enemy) = self
            .session
            .spawner
            .tick(&mut self.rng, &self.session.config)
        {
            log::debug!("Enemy spawned at x={:.1}", enemy.x);
            self.session.enemies.push(enemy);
        }

        let before = self.session.score;
        let report = resolve_collisions(&mut self.session);
        // One display update per destroyed pair.
        let per_hit = self.session.config.score_per_hit;
        for i in 1..=report.hits {
            host.set_score_text(before.saturating_add(i * per_hit))?;
        }

        render(&self.session, host)?;
        self.session.frame += 1;
        Ok(report)
    }

    /// Start the session and keep stepping until cancelled.
    pub fn run<H>(&mut self, host: &mut H) -> io::Result<()>
    where
        H: Canvas + ScoreSink + FrameScheduler,
    {
        self.start(host)?;
        log::info!("Frame loop running");
        while !self.cancel.is_cancelled() {
            self.step(host)?;
            if self.cancel.is_cancelled() {
                break;
            }
            host.schedule_next_frame()?;
        }
        log::info!(
            "Frame loop stopped after {} frames, score {}",
            self.session.frame,
            self.session.score
        );
        Ok(())
    }
}

/// Draw every on-screen entity: player, then bullets, then enemies.
pub fn render(session: &Session, canvas: &mut impl Canvas) -> io::Result<()> {
    let screen = Rect::new(
        0.0,
        0.0,
        session.config.screen_width,
        session.config.screen_height,
    );

    canvas.fill_rect(session.player.rect(), PLAYER_COLOR)?;
    for bullet in &session.bullets {
        let rect = bullet.rect();
        if overlaps(&rect, &screen) {
            canvas.fill_rect(rect, BULLET_COLOR)?;
        }
    }
    for enemy in &session.enemies {
        let rect = enemy.rect();
        if overlaps(&rect, &screen) {
            canvas.fill_rect(rect, ENEMY_COLOR)?;
        }
    }
    Ok(())
}
