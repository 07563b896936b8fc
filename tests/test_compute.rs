use sky_shooter::compute::*;
use sky_shooter::entities::*;
use sky_shooter::GameConfig;

fn make_session() -> Session {
    Session::new(GameConfig::default())
}

fn bullet(x: f32, y: f32) -> Bullet {
    Bullet { x, y, width: 5.0, height: 10.0 }
}

fn enemy(x: f32, y: f32) -> Enemy {
    Enemy { x, y, width: 30.0, height: 30.0 }
}

// ── integrate — player ────────────────────────────────────────────────────────

#[test]
fn player_moves_by_dx() {
    let mut s = make_session();
    s.player.dx = 5.0;
    integrate(&mut s);
    assert_eq!(s.player.x, 220.0);
}

#[test]
fn player_clamps_at_left_edge() {
    let mut s = make_session();
    s.player.x = 2.0;
    s.player.dx = -5.0;
    integrate(&mut s);
    assert_eq!(s.player.x, 0.0);
}

#[test]
fn player_clamps_at_right_edge() {
    let mut s = make_session();
    s.player.x = 428.0;
    s.player.dx = 5.0;
    integrate(&mut s);
    assert_eq!(s.player.x, 430.0); // 480 - 50
}

// ── integrate — bullets ───────────────────────────────────────────────────────

#[test]
fn bullet_moves_up() {
    let mut s = make_session();
    s.bullets.push(bullet(100.0, 300.0));
    integrate(&mut s);
    assert_eq!(s.bullets[0].y, 293.0);
}

#[test]
fn bullet_kept_while_bottom_edge_on_screen() {
    // y=-3 → -10, bottom edge exactly at 0 → kept
    let mut s = make_session();
    s.bullets.push(bullet(100.0, -3.0));
    integrate(&mut s);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn bullet_removed_once_fully_above_screen() {
    // y=-4 → -11, bottom edge at -1 → removed
    let mut s = make_session();
    s.bullets.push(bullet(100.0, -4.0));
    integrate(&mut s);
    assert!(s.bullets.is_empty());
}

#[test]
fn adjacent_bullets_removed_in_same_pass() {
    let mut s = make_session();
    s.bullets.push(bullet(1.0, 200.0));
    s.bullets.push(bullet(2.0, -5.0));
    s.bullets.push(bullet(3.0, -6.0));
    s.bullets.push(bullet(4.0, 100.0));
    integrate(&mut s);
    let xs: Vec<f32> = s.bullets.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![1.0, 4.0]);
}

// ── integrate — enemies ───────────────────────────────────────────────────────

#[test]
fn enemy_moves_down() {
    let mut s = make_session();
    s.enemies.push(enemy(10.0, -30.0));
    integrate(&mut s);
    assert_eq!(s.enemies[0].y, -28.0);
}

#[test]
fn enemy_kept_at_bottom_edge_and_removed_past_it() {
    let mut s = make_session();
    s.enemies.push(enemy(10.0, 638.0)); // → 640, kept
    s.enemies.push(enemy(50.0, 639.0)); // → 641, removed
    integrate(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].y, 640.0);
}

#[test]
fn adjacent_enemies_removed_in_same_pass() {
    let mut s = make_session();
    s.enemies.push(enemy(0.0, 700.0));
    s.enemies.push(enemy(1.0, 700.0));
    s.enemies.push(enemy(2.0, 10.0));
    s.enemies.push(enemy(3.0, 700.0));
    integrate(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].x, 2.0);
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects() {
    let a = Rect::new(100.0, 50.0, 5.0, 10.0);
    let b = Rect::new(98.0, 55.0, 30.0, 30.0);
    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
}

#[test]
fn separated_rects_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!overlaps(&a, &Rect::new(50.0, 50.0, 10.0, 10.0)));
}

// ── resolve_collisions — bullet ↔ enemy ──────────────────────────────────────

#[test]
fn bullet_hits_enemy() {
    let mut s = make_session();
    s.bullets.push(bullet(100.0, 50.0));
    s.enemies.push(enemy(98.0, 55.0));
    let report = resolve_collisions(&mut s);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 10);
    assert_eq!(report.hits, 1);
    assert_eq!(report.points, 10);
    assert!(!report.player_hit);
}

#[test]
fn miss_changes_nothing() {
    let mut s = make_session();
    s.bullets.push(bullet(10.0, 50.0));
    s.enemies.push(enemy(200.0, 55.0));
    let report = resolve_collisions(&mut s);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.score, 0);
    assert_eq!(report, CollisionReport::default());
}

#[test]
fn bullet_over_two_enemies_destroys_only_the_first() {
    let mut s = make_session();
    s.bullets.push(bullet(100.0, 50.0));
    s.enemies.push(enemy(90.0, 40.0));
    s.enemies.push(enemy(95.0, 45.0));
    let report = resolve_collisions(&mut s);
    assert_eq!(report.hits, 1);
    assert_eq!(s.score, 10);
    assert!(s.bullets.is_empty());
    assert_eq!(s.enemies, vec![enemy(95.0, 45.0)]);
}

#[test]
fn two_bullets_on_one_enemy_score_once() {
    let mut s = make_session();
    s.bullets.push(bullet(100.0, 50.0));
    s.bullets.push(bullet(105.0, 52.0));
    s.enemies.push(enemy(98.0, 45.0));
    let report = resolve_collisions(&mut s);
    assert_eq!(report.hits, 1);
    assert_eq!(s.score, 10);
    assert_eq!(s.bullets, vec![bullet(105.0, 52.0)]);
    assert!(s.enemies.is_empty());
}

#[test]
fn several_independent_hits_in_one_frame() {
    let mut s = make_session();
    s.score = 30;
    s.bullets.push(bullet(10.0, 100.0));
    s.bullets.push(bullet(300.0, 200.0));
    s.bullets.push(bullet(450.0, 10.0)); // misses
    s.enemies.push(enemy(295.0, 190.0));
    s.enemies.push(enemy(5.0, 95.0));
    let report = resolve_collisions(&mut s);
    assert_eq!(report.hits, 2);
    assert_eq!(report.points, 20);
    assert_eq!(s.score, 50);
    assert_eq!(s.bullets, vec![bullet(450.0, 10.0)]);
    assert!(s.enemies.is_empty());
}

// ── resolve_collisions — enemy ↔ player ──────────────────────────────────────

#[test]
fn enemy_touching_player_resets_field() {
    let mut s = make_session();
    s.score = 40;
    s.player.x = 100.0;
    s.player.dx = 5.0;
    s.bullets.push(bullet(10.0, 10.0));
    s.enemies.push(enemy(110.0, 560.0));
    s.enemies.push(enemy(300.0, 100.0));

    let report = resolve_collisions(&mut s);

    assert!(report.player_hit);
    assert_eq!(s.player.x, 215.0);
    assert_eq!(s.player.dx, 0.0);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 40); // no penalty
}

#[test]
fn several_enemies_on_player_reset_once() {
    let mut s = make_session();
    s.enemies.push(enemy(210.0, 570.0));
    s.enemies.push(enemy(240.0, 575.0));
    let report = resolve_collisions(&mut s);
    assert!(report.player_hit);
    assert!(s.enemies.is_empty());
    assert_eq!(s.player.x, 215.0);
}

#[test]
fn enemy_shot_while_touching_player_scores_and_resets() {
    let mut s = make_session();
    s.enemies.push(enemy(220.0, 560.0)); // overlaps player at 215..265, 580..630
    s.enemies.push(enemy(10.0, 10.0));
    s.bullets.push(bullet(230.0, 565.0));
    s.bullets.push(bullet(400.0, 300.0));
    s.player.dx = 5.0;

    let report = resolve_collisions(&mut s);

    assert_eq!(report.hits, 1);
    assert!(report.player_hit);
    assert_eq!(s.score, 10);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.player.x, 215.0);
    assert_eq!(s.player.dx, 0.0);
}

#[test]
fn enemy_beside_player_is_harmless() {
    let mut s = make_session();
    s.enemies.push(enemy(185.0, 580.0)); // right edge touches player's left edge
    let report = resolve_collisions(&mut s);
    assert!(!report.player_hit);
    assert_eq!(s.enemies.len(), 1);
}
