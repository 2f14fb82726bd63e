//! Boss projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::{BossShot, Hand};
use crate::consts::{BULLET_RADIUS, PLAYER_RADIUS};

/// Grace period before an off-screen bullet may be culled
const OFFSCREEN_GRACE: f32 = 0.5;

/// A live boss bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub hand: Hand,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds since it was fired
    pub age: f32,
}

impl Bullet {
    pub fn from_shot(id: u32, shot: &BossShot) -> Self {
        Self {
            id,
            hand: shot.hand,
            pos: shot.origin,
            vel: shot.direction.normalize_or_zero() * shot.speed,
            age: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.age += dt;
    }

    /// Circle overlap with the player
    pub fn hits(&self, player: Vec2) -> bool {
        self.pos.distance(player) < BULLET_RADIUS + PLAYER_RADIUS
    }
}

/// Outcome of advancing all bullets for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulletReport {
    pub hit_player: bool,
    pub expired: usize,
}

/// Move every bullet, then drop the ones that hit the player, outlived
/// `lifetime`, or left the view around the player.
pub fn update_bullets(
    bullets: &mut Vec<Bullet>,
    player: Vec2,
    dt: f32,
    lifetime: f32,
    view_distance: f32,
) -> BulletReport {
    let mut report = BulletReport::default();
    bullets.retain_mut(|bullet| {
        bullet.advance(dt);
        if bullet.hits(player) {
            report.hit_player = true;
            return false;
        }
        let offscreen = bullet.age > OFFSCREEN_GRACE && bullet.pos.distance(player) > view_distance;
        if bullet.age >= lifetime || offscreen {
            report.expired += 1;
            return false;
        }
        true
    });
    report
}
