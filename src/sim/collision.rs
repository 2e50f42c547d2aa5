//! Per-tick combat resolution
//!
//! Bullets move and hit enemies first, then enemies home in on the player and
//! hurt it on contact. Both passes walk their lists in reverse so entities can
//! be despawned in place. Distances are measured on the ground plane with
//! squared lengths.

use glam::Vec3;

use super::geometry::{planar, planar_direction, within_radius};
use super::meter::Meter;
use super::registry::{Registry, Visit};
use super::state::ArenaBounds;
use crate::settings::SimConfig;

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Bullets consumed by an enemy
    pub bullet_hits: u32,
    /// Enemies whose health ran out
    pub enemies_killed: u32,
    /// Bullets despawned for leaving the arena
    pub bullets_exited: u32,
    /// Enemies that reached the player
    pub contacts: u32,
}

impl CombatReport {
    fn merge(&mut self, other: CombatReport) {
        self.bullet_hits += other.bullet_hits;
        self.enemies_killed += other.enemies_killed;
        self.bullets_exited += other.bullets_exited;
        self.contacts += other.contacts;
    }
}

/// Run both combat passes for one tick
pub fn resolve_combat(
    registry: &mut Registry,
    player_pos: Vec3,
    player_health: &mut Meter,
    bounds: &ArenaBounds,
    config: &SimConfig,
) -> CombatReport {
    let mut report = resolve_bullets(registry, bounds, config);
    report.merge(resolve_enemies(registry, player_pos, player_health, config));
    report
}

/// Move every bullet, apply hits against enemies, and despawn bullets that
/// left the arena.
///
/// A bullet hits the first enemy (in list order) within the hit radius, not
/// the nearest. A bullet that hits is consumed before the boundary check, so
/// it is resolved at most once.
pub fn resolve_bullets(
    registry: &mut Registry,
    bounds: &ArenaBounds,
    config: &SimConfig,
) -> CombatReport {
    let mut report = CombatReport::default();
    let Registry {
        bullets,
        enemies,
        bullet_pool,
        enemy_pool,
    } = registry;

    for b in (0..bullets.len()).rev() {
        let bullet = &mut bullets[b];
        bullet.position += bullet.direction * config.bullet_speed;
        let pos = planar(bullet.position);

        let Some(e) = enemies
            .iter()
            .position(|enemy| within_radius(pos, planar(enemy.position), config.hit_radius))
        else {
            continue;
        };

        report.bullet_hits += 1;
        let killed = enemies[e].take_damage(config.bullet_damage);
        bullet_pool.release(bullets.swap_remove(b));
        if killed {
            report.enemies_killed += 1;
            log::debug!("Enemy destroyed, {} remaining", enemies.len() - 1);
            enemy_pool.release(enemies.swap_remove(e));
        }
    }

    registry.for_each_bullet_reverse(|bullet| {
        if bounds.contains(planar(bullet.position)) {
            Visit::Keep
        } else {
            report.bullets_exited += 1;
            Visit::Remove
        }
    });

    report
}

/// Move enemies toward the player and resolve contacts.
///
/// Each enemy re-aims at `player_pos` every tick. An enemy standing exactly on
/// the player holds position instead of normalizing a zero vector.
pub fn resolve_enemies(
    registry: &mut Registry,
    player_pos: Vec3,
    player_health: &mut Meter,
    config: &SimConfig,
) -> CombatReport {
    let mut report = CombatReport::default();
    let target = planar(player_pos);

    registry.for_each_enemy_reverse(|enemy| {
        if let Some(dir) = planar_direction(enemy.position, target) {
            enemy.position += dir * config.enemy_speed;
        }

        if within_radius(planar(enemy.position), target, config.contact_radius) {
            player_health.damage(config.enemy_damage);
            report.contacts += 1;
            log::debug!(
                "Enemy reached player, health {}/{}",
                player_health.current(),
                player_health.max()
            );
            Visit::Remove
        } else {
            Visit::Keep
        }
    });

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::ColorTier;

    fn setup() -> (Registry, ArenaBounds, SimConfig) {
        (
            Registry::new(16),
            ArenaBounds::new(10.0, 10.0),
            SimConfig::default(),
        )
    }

    #[test]
    fn test_bullet_moves_by_speed() {
        let (mut registry, bounds, config) = setup();
        registry.spawn_bullet(Vec3::new(0.0, 0.5, 0.0), Vec3::X);
        resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(registry.bullets()[0].position.x, config.bullet_speed);
    }

    #[test]
    fn test_three_hits_kill_and_free_pool_slot() {
        let (mut registry, bounds, config) = setup();
        let at = Vec3::new(2.0, 0.5, 0.0);
        registry.spawn_enemy_at(at, 3);

        for hit in 1..=3 {
            let origin = at - Vec3::X * config.bullet_speed;
            registry.spawn_bullet(origin, Vec3::X);
            let report = resolve_bullets(&mut registry, &bounds, &config);
            assert_eq!(report.bullet_hits, 1);
            assert!(registry.bullets().is_empty());
            if hit < 3 {
                assert_eq!(registry.enemies()[0].health, 3 - hit);
                assert_eq!(report.enemies_killed, 0);
            } else {
                assert_eq!(report.enemies_killed, 1);
            }
        }

        assert!(registry.enemies().is_empty());
        assert_eq!(registry.enemy_pool().available(), 1);
        let idx = registry.spawn_enemy_at(Vec3::new(-3.0, 0.5, 0.0), 3);
        assert_eq!(registry.enemies()[idx].health, 3);
        assert_eq!(registry.enemy_pool().stats().recycled, 1);
    }

    #[test]
    fn test_several_kills_in_one_pass() {
        let (mut registry, bounds, config) = setup();
        // Killing an enemy swaps the last one into its slot while later
        // bullets are still being resolved
        let targets = [
            Vec3::new(3.0, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 3.0),
            Vec3::new(-3.0, 0.5, 0.0),
        ];
        for at in targets {
            registry.spawn_enemy_at(at, 1);
        }
        for at in targets {
            let dir = planar_direction(Vec3::ZERO, at).unwrap();
            registry.spawn_bullet(at - dir * config.bullet_speed, dir);
        }

        let report = resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(report.bullet_hits, 3);
        assert_eq!(report.enemies_killed, 3);
        assert_eq!(report.bullets_exited, 0);
        assert!(registry.enemies().is_empty());
        assert!(registry.bullets().is_empty());
        assert_eq!(registry.enemy_pool().available(), 3);
        assert_eq!(registry.bullet_pool().available(), 3);
    }

    #[test]
    fn test_tier_updates_on_hit() {
        let (mut registry, bounds, config) = setup();
        registry.spawn_enemy_at(Vec3::new(1.0, 0.5, 0.0), 10);
        for _ in 0..5 {
            registry.spawn_bullet(Vec3::new(0.5, 0.5, 0.0), Vec3::X);
        }
        resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(registry.enemies()[0].health, 5);
        assert_eq!(registry.enemies()[0].tier, ColorTier::Purple);
    }

    #[test]
    fn test_first_match_not_nearest() {
        let (mut registry, bounds, config) = setup();
        // Both overlap the bullet's landing point; the farther one is first in the list
        registry.spawn_enemy_at(Vec3::new(0.5, 0.5, 0.4), 3);
        registry.spawn_enemy_at(Vec3::new(0.5, 0.5, 0.0), 3);
        registry.spawn_bullet(Vec3::new(0.0, 0.5, 0.0), Vec3::X);

        resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(registry.enemies()[0].health, 2);
        assert_eq!(registry.enemies()[1].health, 3);
    }

    #[test]
    fn test_first_match_is_repeatable() {
        let run = || {
            let (mut registry, bounds, config) = setup();
            registry.spawn_enemy_at(Vec3::new(0.9, 0.5, 0.2), 3);
            registry.spawn_enemy_at(Vec3::new(0.6, 0.5, -0.2), 3);
            registry.spawn_enemy_at(Vec3::new(0.4, 0.5, 0.0), 3);
            registry.spawn_bullet(Vec3::new(0.0, 0.5, 0.0), Vec3::X);
            resolve_bullets(&mut registry, &bounds, &config);
            registry.enemies().iter().map(|e| e.health).collect::<Vec<_>>()
        };
        let first = run();
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
        assert_eq!(first, vec![2, 3, 3]);
    }

    #[test]
    fn test_bullet_consumed_once() {
        let (mut registry, bounds, config) = setup();
        // Bullet lands past the boundary and on an enemy in the same tick
        registry.spawn_enemy_at(Vec3::new(10.2, 0.5, 0.0), 3);
        registry.spawn_bullet(Vec3::new(9.8, 0.5, 0.0), Vec3::X);
        let report = resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(report.bullet_hits, 1);
        assert_eq!(report.bullets_exited, 0);
        assert_eq!(registry.bullet_pool().available(), 1);
    }

    #[test]
    fn test_bullet_exits_arena() {
        let (mut registry, bounds, config) = setup();
        registry.spawn_bullet(Vec3::new(9.9, 0.5, 0.0), Vec3::X);
        registry.spawn_bullet(Vec3::new(0.0, 0.5, 0.0), Vec3::Z);
        let report = resolve_bullets(&mut registry, &bounds, &config);
        assert_eq!(report.bullets_exited, 1);
        assert_eq!(registry.bullets().len(), 1);
        assert_eq!(registry.bullets()[0].direction, Vec3::Z);
    }

    #[test]
    fn test_enemy_homes_on_player() {
        let (mut registry, _, config) = setup();
        registry.spawn_enemy_at(Vec3::new(5.0, 0.5, 0.0), 3);
        let mut health = Meter::full(10);
        let player = Vec3::new(0.0, 0.5, 0.0);
        resolve_enemies(&mut registry, player, &mut health, &config);
        let pos = registry.enemies()[0].position;
        assert!((pos.x - (5.0 - config.enemy_speed)).abs() < 1e-6);
        assert_eq!(pos.y, 0.5);
        assert_eq!(health.current(), 10);
    }

    #[test]
    fn test_enemy_contact_damages_and_despawns() {
        let (mut registry, _, config) = setup();
        registry.spawn_enemy_at(Vec3::new(1.0, 0.5, 0.0), 3);
        registry.spawn_enemy_at(Vec3::new(6.0, 0.5, 0.0), 3);
        let mut health = Meter::full(10);
        let report = resolve_enemies(&mut registry, Vec3::new(0.0, 0.5, 0.0), &mut health, &config);
        assert_eq!(report.contacts, 1);
        assert_eq!(health.current(), 10 - config.enemy_damage);
        assert_eq!(registry.enemies().len(), 1);
        assert_eq!(registry.enemy_pool().available(), 1);
    }

    #[test]
    fn test_enemy_on_player_holds_position() {
        let (mut registry, _, config) = setup();
        let player = Vec3::new(2.0, 0.5, 2.0);
        registry.spawn_enemy_at(player, 3);
        let mut health = Meter::full(10);
        let report = resolve_enemies(&mut registry, player, &mut health, &config);
        // Coincident enemy does not move and still counts as a contact
        assert_eq!(report.contacts, 1);
        assert_eq!(health.current(), 9);
        assert!(registry.enemies().is_empty());
    }
}
