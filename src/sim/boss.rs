//! Boss state machine and spawner
//!
//! The boss enters, then patrols between the edges of its activity area,
//! pausing at each edge. It fires on a fixed interval while patrolling and
//! while waiting. Its height eases toward a fixed offset above the player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::BOSS_EDGE_EPSILON;
use crate::lerp;
use crate::tuning::{BossTuning, HandTuning};

/// Clamp without panicking on inverted bounds (lower bound wins below, upper above)
#[inline]
fn clamp_lenient(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        left: f32::MIN,
        right: f32::MAX,
        top: f32::MAX,
        bottom: f32::MIN,
    };

    /// Shift every edge by `by`
    pub fn offset(&self, by: Vec2) -> Bounds {
        Bounds {
            left: self.left + by.x,
            right: self.right + by.x,
            top: self.top + by.y,
            bottom: self.bottom + by.y,
        }
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        clamp_lenient(x, self.left, self.right)
    }

    pub fn clamp_y(&self, y: f32) -> f32 {
        clamp_lenient(y, self.bottom, self.top)
    }

    /// Log a warning for each inverted axis. Returns true if the bounds are sane.
    pub fn validate(&self) -> bool {
        let mut ok = true;
        if self.left >= self.right {
            log::warn!(
                "Activity area: left ({}) should be less than right ({})",
                self.left,
                self.right
            );
            ok = false;
        }
        if self.bottom >= self.top {
            log::warn!(
                "Activity area: bottom ({}) should be less than top ({})",
                self.bottom,
                self.top
            );
            ok = false;
        }
        ok
    }
}

/// Region the boss is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivityArea {
    Unbounded,
    /// Fixed world-space bounds
    Fixed(Bounds),
    /// Bounds expressed as offsets from the player, recomputed every tick
    PlayerRelative(Bounds),
}

impl ActivityArea {
    /// Capture world bounds as offsets from the current player position
    pub fn relative_to(bounds: Bounds, player: Vec2) -> Self {
        ActivityArea::PlayerRelative(bounds.offset(-player))
    }

    /// Effective world bounds for the given player position
    pub fn bounds_at(&self, player: Vec2) -> Bounds {
        match self {
            ActivityArea::Unbounded => Bounds::UNBOUNDED,
            ActivityArea::Fixed(bounds) => *bounds,
            ActivityArea::PlayerRelative(offsets) => offsets.offset(player),
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, ActivityArea::Unbounded)
    }
}

/// How the two hands share the attack interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FirePolicy {
    /// Left, right, left, ...
    #[default]
    Alternating,
    /// Both hands every interval
    Simultaneous,
    /// One uniformly random hand every interval
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

/// Boss behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Entry animation: follows the player's height only
    Entry,
    MovingAndAttacking,
    WaitingAtLeft,
    WaitingAtRight,
}

/// A projectile the boss just fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossShot {
    pub hand: Hand,
    pub origin: Vec2,
    /// Unit direction
    pub direction: Vec2,
    pub speed: f32,
}

/// What happened during one boss update
#[derive(Debug, Clone, Default)]
pub struct BossUpdate {
    pub shots: Vec<BossShot>,
    pub phase_change: Option<BossPhase>,
}

/// The boss actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub phase: BossPhase,
    /// Time spent in the current phase
    phase_timer: f32,
    moving_right: bool,
    /// Seconds until the next shot (fires when <= 0)
    attack_cooldown: f32,
    use_left_hand: bool,
    area: ActivityArea,
    /// Times the boss has left the Entry phase (0 or 1)
    entries_completed: u32,
}

impl Boss {
    pub fn new(pos: Vec2, area: ActivityArea) -> Self {
        if let ActivityArea::Fixed(bounds) | ActivityArea::PlayerRelative(bounds) = area {
            bounds.validate();
        }
        Self {
            pos,
            phase: BossPhase::Entry,
            phase_timer: 0.0,
            moving_right: true,
            attack_cooldown: 0.0,
            use_left_hand: true,
            area,
            entries_completed: 0,
        }
    }

    pub fn area(&self) -> &ActivityArea {
        &self.area
    }

    pub fn phase_timer(&self) -> f32 {
        self.phase_timer
    }

    pub fn moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn entries_completed(&self) -> u32 {
        self.entries_completed
    }

    /// Hand fire point in world space
    pub fn fire_point(&self, hand: &HandTuning) -> Vec2 {
        self.pos + Vec2::new(hand.offset.0, hand.offset.1)
    }

    fn change_phase(&mut self, phase: BossPhase, update: &mut BossUpdate) {
        log::info!("Boss changed state to: {:?}", phase);
        self.phase = phase;
        self.phase_timer = 0.0;
        update.phase_change = Some(phase);
    }

    /// Advance the boss by `dt`
    pub fn update<R: Rng>(
        &mut self,
        player: Vec2,
        dt: f32,
        tuning: &BossTuning,
        rng: &mut R,
    ) -> BossUpdate {
        let mut update = BossUpdate::default();
        let bounds = self.area.bounds_at(player);

        // Ease toward the height above the player
        let target_y = if self.area.is_bounded() {
            bounds.clamp_y(player.y + tuning.y_offset)
        } else {
            player.y + tuning.y_offset
        };
        self.pos.y = lerp(self.pos.y, target_y, tuning.follow_smoothness * dt);

        self.phase_timer += dt;

        match self.phase {
            BossPhase::Entry => {
                if self.phase_timer >= tuning.entry_duration {
                    self.entries_completed += 1;
                    self.change_phase(BossPhase::MovingAndAttacking, &mut update);
                }
                // No horizontal movement or attacks while entering
                return update;
            }
            BossPhase::MovingAndAttacking => {
                if self.moving_right {
                    self.pos.x += tuning.move_speed * dt;
                    if self.pos.x >= bounds.right - BOSS_EDGE_EPSILON {
                        self.change_phase(BossPhase::WaitingAtRight, &mut update);
                    }
                } else {
                    self.pos.x -= tuning.move_speed * dt;
                    if self.pos.x <= bounds.left + BOSS_EDGE_EPSILON {
                        self.change_phase(BossPhase::WaitingAtLeft, &mut update);
                    }
                }
            }
            BossPhase::WaitingAtLeft => {
                if self.phase_timer >= tuning.edge_wait {
                    self.moving_right = true;
                    self.change_phase(BossPhase::MovingAndAttacking, &mut update);
                }
            }
            BossPhase::WaitingAtRight => {
                if self.phase_timer >= tuning.edge_wait {
                    self.moving_right = false;
                    self.change_phase(BossPhase::MovingAndAttacking, &mut update);
                }
            }
        }

        // Attack on the same interval whether moving or waiting
        self.attack_cooldown -= dt;
        if self.attack_cooldown <= 0.0 {
            self.fire(player, tuning, rng, &mut update.shots);
            self.attack_cooldown = tuning.attack_interval;
        }

        if self.area.is_bounded() {
            self.pos.x = bounds.clamp_x(self.pos.x);
        }

        update
    }

    fn fire<R: Rng>(
        &mut self,
        player: Vec2,
        tuning: &BossTuning,
        rng: &mut R,
        shots: &mut Vec<BossShot>,
    ) {
        match tuning.fire_policy {
            FirePolicy::Simultaneous => {
                shots.push(self.shot(Hand::Left, player, tuning, rng));
                shots.push(self.shot(Hand::Right, player, tuning, rng));
            }
            FirePolicy::Alternating => {
                let hand = if self.use_left_hand {
                    Hand::Left
                } else {
                    Hand::Right
                };
                shots.push(self.shot(hand, player, tuning, rng));
                self.use_left_hand = !self.use_left_hand;
            }
            FirePolicy::Random => {
                let hand = if rng.random_bool(0.5) {
                    Hand::Left
                } else {
                    Hand::Right
                };
                shots.push(self.shot(hand, player, tuning, rng));
            }
        }
    }

    fn shot<R: Rng>(&self, hand: Hand, player: Vec2, tuning: &BossTuning, rng: &mut R) -> BossShot {
        let hand_tuning = match hand {
            Hand::Left => &tuning.left_hand,
            Hand::Right => &tuning.right_hand,
        };
        let origin = self.fire_point(hand_tuning);

        let direction = if hand_tuning.vertical {
            Vec2::NEG_Y
        } else {
            let to_player = (player - origin).normalize_or(Vec2::NEG_Y);
            let spread = tuning.diagonal_angle_offset.abs();
            let angle = rng.random_range(-spread..=spread).to_radians();
            Vec2::from_angle(angle).rotate(to_player).normalize_or(Vec2::NEG_Y)
        };

        log::debug!(
            "Boss {:?} hand fired {} shot, direction {:?}",
            hand,
            if hand_tuning.vertical { "vertical" } else { "aimed" },
            direction
        );

        BossShot {
            hand,
            origin,
            direction,
            speed: hand_tuning.bullet_speed,
        }
    }
}

/// Spawner events
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnerEvent {
    Spawned { pos: Vec2, respawn: bool },
    /// Respawn limit reached; spawning stopped for the run
    Retired,
}

/// Owns at most one boss and keeps it alive while active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossSpawner {
    active: bool,
    boss: Option<Boss>,
    spawned_once: bool,
    respawns: u32,
}

impl Default for BossSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl BossSpawner {
    /// A spawner that will spawn on its first update
    pub fn new() -> Self {
        Self {
            active: true,
            boss: None,
            spawned_once: false,
            respawns: 0,
        }
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Spawn position: above the player, clamped into the activity area
    fn spawn(&mut self, player: Vec2, tuning: &BossTuning) -> Vec2 {
        let mut pos = Vec2::new(player.x + tuning.spawn_x, player.y + tuning.y_offset);

        let area = match tuning.area {
            Some(offsets) => {
                let bounds = offsets.offset(player);
                pos.x = bounds.clamp_x(pos.x);
                pos.y = bounds.clamp_y(pos.y);
                if tuning.area_relative {
                    ActivityArea::relative_to(bounds, player)
                } else {
                    ActivityArea::Fixed(bounds)
                }
            }
            None => ActivityArea::Unbounded,
        };

        self.boss = Some(Boss::new(pos, area));
        self.spawned_once = true;
        log::info!("Boss spawned at {:?} (player at {:?})", pos, player);
        pos
    }

    /// Keep the boss alive and advance it. Spawner events are appended to `events`.
    pub fn update<R: Rng>(
        &mut self,
        player: Vec2,
        dt: f32,
        tuning: &BossTuning,
        rng: &mut R,
        events: &mut Vec<SpawnerEvent>,
    ) -> BossUpdate {
        if self.active && self.boss.is_none() {
            let respawn = self.spawned_once;
            if respawn {
                if tuning.respawn_limit.is_some_and(|limit| self.respawns >= limit) {
                    log::error!(
                        "Boss respawn limit ({}) reached, stopping boss spawning",
                        self.respawns
                    );
                    self.active = false;
                    events.push(SpawnerEvent::Retired);
                    return BossUpdate::default();
                }
                self.respawns += 1;
                log::warn!("Boss was destroyed unexpectedly, respawning...");
            }
            let pos = self.spawn(player, tuning);
            events.push(SpawnerEvent::Spawned { pos, respawn });
        }

        match self.boss.as_mut() {
            Some(boss) => boss.update(player, dt, tuning, rng),
            None => BossUpdate::default(),
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Remove the current boss. While active, it is respawned on the next update.
    pub fn destroy_current(&mut self) {
        if self.boss.take().is_some() {
            log::info!("Current boss destroyed");
        }
    }

    /// Player died: stop spawning and remove the boss
    pub fn on_player_death(&mut self) {
        self.stop();
        self.destroy_current();
    }

    /// Re-enable spawning; a fresh boss appears on the next update if none exists
    pub fn restart(&mut self) {
        self.active = true;
        self.respawns = 0;
        self.spawned_once = self.boss.is_some();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fixed_tuning() -> BossTuning {
        BossTuning {
            area: Some(Bounds {
                left: -4.0,
                right: 4.0,
                top: 15.0,
                bottom: 5.0,
            }),
            area_relative: false,
            ..Default::default()
        }
    }

    /// Tick until the entry phase is over
    fn skip_entry(boss: &mut Boss, tuning: &BossTuning, rng: &mut Pcg32) {
        while boss.phase == BossPhase::Entry {
            let update = boss.update(Vec2::ZERO, SIM_DT, tuning, rng);
            assert!(update.shots.is_empty());
        }
    }

    fn run(boss: &mut Boss, seconds: f32, tuning: &BossTuning, rng: &mut Pcg32) -> Vec<BossUpdate> {
        let steps = (seconds / SIM_DT).round() as usize;
        (0..steps)
            .map(|_| boss.update(Vec2::ZERO, SIM_DT, tuning, rng))
            .collect()
    }

    #[test]
    fn test_entry_is_silent_and_still() {
        let tuning = fixed_tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));

        let updates = run(&mut boss, 2.4, &tuning, &mut rng);
        assert_eq!(boss.phase, BossPhase::Entry);
        assert_eq!(boss.pos.x, 0.0);
        assert!(updates.iter().all(|u| u.shots.is_empty()));

        run(&mut boss, 0.2, &tuning, &mut rng);
        assert_eq!(boss.phase, BossPhase::MovingAndAttacking);
        assert_eq!(boss.entries_completed(), 1);
    }

    #[test]
    fn test_patrol_cycle_flips_direction() {
        let tuning = fixed_tuning();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));

        let mut phases = Vec::new();
        for _ in 0..(30.0 / SIM_DT) as usize {
            let update = boss.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng);
            if let Some(phase) = update.phase_change {
                phases.push(phase);
            }
            assert!(boss.pos.x >= -4.0 && boss.pos.x <= 4.0);
        }

        assert_eq!(phases[0], BossPhase::MovingAndAttacking);
        assert_eq!(phases.iter().filter(|p| **p == BossPhase::Entry).count(), 0);
        assert_eq!(boss.entries_completed(), 1);
        // Moving and waiting alternate, waits alternate right/left
        let waits: Vec<_> = phases
            .iter()
            .filter(|p| matches!(p, BossPhase::WaitingAtLeft | BossPhase::WaitingAtRight))
            .collect();
        assert!(waits.len() >= 3);
        for pair in waits.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(*waits[0], BossPhase::WaitingAtRight);
        for pair in phases.windows(2) {
            let moving = |p: &BossPhase| *p == BossPhase::MovingAndAttacking;
            assert_ne!(moving(&pair[0]), moving(&pair[1]));
        }
    }

    #[test]
    fn test_fires_on_interval_while_moving_and_waiting() {
        let tuning = fixed_tuning();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));
        skip_entry(&mut boss, &tuning, &mut rng);

        // First moving tick fires immediately
        let first = boss.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng);
        assert_eq!(first.shots.len(), 1);
        assert_eq!(first.shots[0].hand, Hand::Left);

        let shots: usize = run(&mut boss, 10.0, &tuning, &mut rng)
            .iter()
            .map(|u| u.shots.len())
            .sum();
        assert!((9..=11).contains(&shots), "shots {shots}");
    }

    #[test]
    fn test_alternating_hands_and_shot_directions() {
        let tuning = fixed_tuning();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));
        skip_entry(&mut boss, &tuning, &mut rng);

        let shots: Vec<BossShot> = run(&mut boss, 4.1, &tuning, &mut rng)
            .into_iter()
            .flat_map(|u| u.shots)
            .collect();
        let hands: Vec<Hand> = shots.iter().map(|s| s.hand).collect();
        for pair in hands.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        for shot in &shots {
            assert!((shot.direction.length() - 1.0).abs() < 1e-4);
            match shot.hand {
                Hand::Left => assert_eq!(shot.direction, Vec2::NEG_Y),
                Hand::Right => {
                    // Aimed at the player (below) within the spread
                    let to_player = (Vec2::ZERO - shot.origin).normalize();
                    let angle = to_player.angle_to(shot.direction).to_degrees().abs();
                    assert!(angle <= 15.0 + 1e-3, "angle {angle}");
                }
            }
        }
    }

    #[test]
    fn test_simultaneous_fires_both_hands() {
        let tuning = BossTuning {
            fire_policy: FirePolicy::Simultaneous,
            ..fixed_tuning()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));
        skip_entry(&mut boss, &tuning, &mut rng);
        let update = boss.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng);
        let hands: Vec<Hand> = update.shots.iter().map(|s| s.hand).collect();
        assert_eq!(hands, vec![Hand::Left, Hand::Right]);
    }

    #[test]
    fn test_random_policy_fires_one_hand_at_a_time() {
        let tuning = BossTuning {
            fire_policy: FirePolicy::Random,
            ..fixed_tuning()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));
        skip_entry(&mut boss, &tuning, &mut rng);

        let updates = run(&mut boss, 30.0, &tuning, &mut rng);
        let volleys: Vec<&BossUpdate> = updates.iter().filter(|u| !u.shots.is_empty()).collect();
        assert!((29..=31).contains(&volleys.len()), "volleys {}", volleys.len());
        assert!(volleys.iter().all(|u| u.shots.len() == 1));
        let lefts = volleys.iter().filter(|u| u.shots[0].hand == Hand::Left).count();
        assert!(lefts > 0 && lefts < volleys.len(), "lefts {lefts}");
    }

    #[test]
    fn test_player_relative_area_tracks_player() {
        let offsets = Bounds {
            left: -2.0,
            right: 2.0,
            top: 10.0,
            bottom: 5.0,
        };
        let area = ActivityArea::relative_to(offsets.offset(Vec2::new(1.0, 0.0)), Vec2::new(1.0, 0.0));
        assert_eq!(area, ActivityArea::PlayerRelative(offsets));

        let moved = area.bounds_at(Vec2::new(10.0, -20.0));
        assert_eq!(moved.left, 8.0);
        assert_eq!(moved.right, 12.0);
        assert_eq!(moved.top, -10.0);
        assert_eq!(moved.bottom, -15.0);
    }

    #[test]
    fn test_player_relative_area_moves_patrol_with_player() {
        let offsets = Bounds {
            left: -2.0,
            right: 2.0,
            top: 10.0,
            bottom: 5.0,
        };
        let tuning = BossTuning {
            area: Some(offsets),
            area_relative: true,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(12);
        let mut boss = Boss::new(Vec2::new(10.0, 8.0), ActivityArea::PlayerRelative(offsets));

        let mut player = Vec2::new(10.0, 0.0);
        for _ in 0..(5.0 / SIM_DT) as usize {
            boss.update(player, SIM_DT, &tuning, &mut rng);
            if boss.phase == BossPhase::WaitingAtRight {
                break;
            }
        }
        assert_eq!(boss.phase, BossPhase::WaitingAtRight);
        assert!(boss.pos.x >= 11.89 && boss.pos.x <= 12.0, "x {}", boss.pos.x);

        // The area follows the player; the boss is pulled into it
        player = Vec2::new(30.0, 0.0);
        boss.update(player, SIM_DT, &tuning, &mut rng);
        assert_eq!(boss.pos.x, 28.0);

        let mut reached_left = false;
        for _ in 0..(4.0 / SIM_DT) as usize {
            boss.update(player, SIM_DT, &tuning, &mut rng);
            assert!(boss.pos.x >= 28.0 && boss.pos.x <= 32.0, "x {}", boss.pos.x);
            reached_left |= boss.phase == BossPhase::WaitingAtLeft;
        }
        assert!(reached_left);
    }

    #[test]
    fn test_y_follows_player_within_bounds() {
        let tuning = fixed_tuning();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut boss = Boss::new(Vec2::new(0.0, 8.0), ActivityArea::Fixed(tuning.area.unwrap()));
        // Player far below: target y clamps to the area bottom (5)
        for _ in 0..600 {
            boss.update(Vec2::new(0.0, -100.0), SIM_DT, &tuning, &mut rng);
        }
        assert!((boss.pos.y - 5.0).abs() < 0.01, "y {}", boss.pos.y);
    }

    #[test]
    fn test_unbounded_boss_never_waits() {
        let tuning = BossTuning {
            area: None,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut boss = Boss::new(Vec2::ZERO, ActivityArea::Unbounded);
        run(&mut boss, 20.0, &tuning, &mut rng);
        assert_eq!(boss.phase, BossPhase::MovingAndAttacking);
        assert!(boss.pos.x > 50.0);
    }

    #[test]
    fn test_spawner_spawns_clamped_and_respawns() {
        let tuning = BossTuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut spawner = BossSpawner::new();
        let mut events = Vec::new();

        spawner.update(Vec2::new(2.0, -3.0), SIM_DT, &tuning, &mut rng, &mut events);
        // y offset 8 fits inside [bottom 5, top 15] above the player
        assert_eq!(
            events,
            vec![SpawnerEvent::Spawned {
                pos: Vec2::new(2.0, 5.0),
                respawn: false
            }]
        );

        events.clear();
        spawner.destroy_current();
        spawner.update(Vec2::new(2.0, -3.0), SIM_DT, &tuning, &mut rng, &mut events);
        assert!(matches!(events[0], SpawnerEvent::Spawned { respawn: true, .. }));
        assert_eq!(spawner.respawns(), 1);
    }

    #[test]
    fn test_spawner_respawn_limit() {
        let tuning = BossTuning {
            respawn_limit: Some(2),
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let mut spawner = BossSpawner::new();
        let mut events = Vec::new();
        for _ in 0..5 {
            spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
            spawner.destroy_current();
        }
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(!spawner.is_active());
        assert!(spawner.boss().is_none());
        assert_eq!(events.iter().filter(|e| **e == SpawnerEvent::Retired).count(), 1);
        assert_eq!(spawner.respawns(), 2);
    }

    #[test]
    fn test_stopped_spawner_waits_for_resume() {
        let tuning = BossTuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut spawner = BossSpawner::new();
        let mut events = Vec::new();
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(spawner.boss().is_some());

        spawner.stop();
        spawner.destroy_current();
        events.clear();
        let update = spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(!spawner.is_active());
        assert!(spawner.boss().is_none());
        assert!(update.shots.is_empty());
        assert!(events.is_empty());

        spawner.resume();
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(matches!(events[..], [SpawnerEvent::Spawned { respawn: true, .. }]));
        assert!(spawner.boss().is_some());
        assert_eq!(spawner.respawns(), 1);
    }

    #[test]
    fn test_player_death_stops_spawning() {
        let tuning = BossTuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut spawner = BossSpawner::new();
        let mut events = Vec::new();
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        spawner.on_player_death();
        events.clear();
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(spawner.boss().is_none());
        assert!(events.is_empty());

        spawner.restart();
        spawner.update(Vec2::ZERO, SIM_DT, &tuning, &mut rng, &mut events);
        assert!(spawner.boss().is_some());
    }
}
