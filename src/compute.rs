//! Pure game-logic functions: motion integration and collision resolution.
//!
//! Both passes iterate the entity collections read-only, mark what has to
//! go, and compact afterwards, so no entry is skipped or visited twice
//! when several are removed in the same frame.

use crate::entities::{Bullet, Enemy, Rect, Session};

// ── Motion ────────────────────────────────────────────────────────────────────

/// Advance every entity by one frame.
///
/// * Player: apply `dx`, clamp into `[0, screen_width - width]`.
/// * Bullets: move up; drop any whose bottom edge is above the screen.
/// * Enemies: move down; drop any whose top edge is below the screen.
pub fn integrate(session: &mut Session) {
    let config = &session.config;

    let player = &mut session.player;
    let max_x = (config.screen_width - player.width).max(0.0);
    player.x = (player.x + player.dx).clamp(0.0, max_x);

    for bullet in &mut session.bullets {
        bullet.y -= config.bullet_speed;
    }
    session.bullets.retain(|b| b.y + b.height >= 0.0);

    for enemy in &mut session.enemies {
        enemy.y += config.enemy_speed;
    }
    let screen_height = config.screen_height;
    session.enemies.retain(|e| e.y <= screen_height);
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// Standard AABB overlap; touching edges do not count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// What one collision pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Bullet–enemy pairs destroyed this frame.
    pub hits: u32,
    /// Points added to the score this frame.
    pub points: u32,
    /// Whether an enemy touched the player and the field was reset.
    pub player_hit: bool,
}

/// Resolve this frame's collisions.
///
/// Both checks run against the field as it stood at the start of the pass.
///
/// 1. Bullet ↔ enemy: each bullet claims at most one enemy (the first it
///    overlaps that no earlier bullet has claimed). Every claimed pair is
///    removed and scores `score_per_hit`.
/// 2. Enemy ↔ player: any enemy overlapping the player, shot this frame or
///    not, triggers a single `reset_on_hit` after scoring.
pub fn resolve_collisions(session: &mut Session) -> CollisionReport {
    let mut report = CollisionReport::default();

    let (spent_bullets, killed_enemies) = match_bullets(&session.bullets, &session.enemies);
    let player_rect = session.player.rect();
    report.player_hit = session
        .enemies
        .iter()
        .any(|e| overlaps(&e.rect(), &player_rect));
    report.hits = killed_enemies.iter().filter(|&&k| k).count() as u32;

    if report.hits > 0 {
        compact(&mut session.bullets, &spent_bullets);
        compact(&mut session.enemies, &killed_enemies);
        report.points = report.hits * session.config.score_per_hit;
        session.score = session.score.saturating_add(report.points);
        log::debug!(
            "{} hit(s) for {} points, score {}",
            report.hits,
            report.points,
            session.score
        );
    }

    if report.player_hit {
        session.reset_on_hit();
        log::debug!("Player hit on frame {}, field reset", session.frame);
    }

    report
}

/// Pair bullets with enemies. Returns removal masks for both collections.
fn match_bullets(bullets: &[Bullet], enemies: &[Enemy]) -> (Vec<bool>, Vec<bool>) {
    let mut spent = vec![false; bullets.len()];
    let mut killed = vec![false; enemies.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        let rect = bullet.rect();
        let target = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !killed[*ei] && overlaps(&rect, &enemy.rect()));
        if let Some((ei, _)) = target {
            spent[bi] = true;
            killed[ei] = true;
        }
    }

    (spent, killed)
}

/// Drop every element whose mask entry is set.
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut flags = remove.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
