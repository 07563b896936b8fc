//! Frame-counted enemy generator.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Emits one enemy every `period` ticks.
///
/// The counter only ever grows; spawning is keyed off `counter % period`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    counter: u64,
    period: u64,
}

impl Spawner {
    pub fn new(period: u64) -> Self {
        Self {
            counter: 0,
            period: period.max(1),
        }
    }

    /// Ticks seen so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Advance one frame. On every `period`-th call, returns a new enemy
    /// placed uniformly in `[0, screen_width - enemy_size]`, just above
    /// the visible area.
    pub fn tick(&mut self, rng: &mut impl Rng, config: &GameConfig) -> Option<Enemy> {
        self.counter = self.counter.wrapping_add(1);
        if self.counter % self.period != 0 {
            return None;
        }
        let size = config.enemy_size;
        let max_x = (config.screen_width - size).max(0.0);
        let x = if max_x > 0.0 {
            rng.gen_range(0.0..=max_x)
        } else {
            0.0
        };
        Some(Enemy {
            x,
            y: -size,
            width: size,
            height: size,
        })
    }
}
