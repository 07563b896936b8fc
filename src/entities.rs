//! Game entity types and the session that owns them.
//!
//! Records are plain data; the only behaviour here is session lifecycle
//! (`start_session`, `reset_on_hit`). Motion and collisions live in
//! `compute`, spawning in `spawner`.

use crate::config::GameConfig;
use crate::spawner::Spawner;

// ── Geometry & colour ─────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

pub const PLAYER_COLOR: Rgb = Rgb::from_hex(0x0074d9); // blue
pub const BULLET_COLOR: Rgb = Rgb::from_hex(0xffdc00); // yellow
pub const ENEMY_COLOR: Rgb = Rgb::from_hex(0xff4136); // red

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity applied every frame.
    pub dx: f32,
    /// Magnitude `dx` is set to while a direction key is down.
    pub speed: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One independent game world: entities, score and spawn timer.
///
/// Nothing is global, so any number of sessions can coexist (the tests
/// rely on this).
#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub spawner: Spawner,
    /// Set while the fire key is down; a fire press is ignored while set.
    pub fire_latched: bool,
    /// Frames simulated since the session was created.
    pub frame: u64,
}

impl Session {
    /// Build a session with the player centred and an empty field.
    pub fn new(config: GameConfig) -> Self {
        let player = Player {
            x: config.player_center_x(),
            y: config.player_y(),
            width: config.player_width,
            height: config.player_height,
            dx: 0.0,
            speed: config.player_speed,
        };
        let spawner = Spawner::new(config.spawn_period);
        Self {
            config,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            spawner,
            fire_latched: false,
            frame: 0,
        }
    }

    /// Zero the score and put the field in its opening layout.
    pub fn start_session(&mut self) {
        self.score = 0;
        self.reset_on_hit();
        log::info!("Session started");
    }

    /// Re-centre and stop the player and wipe every bullet and enemy.
    /// The score is left alone.
    pub fn reset_on_hit(&mut self) {
        self.player.x = self.config.player_center_x();
        self.player.dx = 0.0;
        self.bullets.clear();
        self.enemies.clear();
    }

    /// Spawn a bullet centred on the player's current position.
    pub fn fire(&mut self) {
        let c = &self.config;
        self.bullets.push(Bullet {
            x: self.player.x + self.player.width / 2.0 - c.bullet_width / 2.0,
            y: self.player.y,
            width: c.bullet_width,
            height: c.bullet_height,
        });
    }
}

/// Text shown by the score display.
pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}
