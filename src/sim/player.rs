//! Player weapon, knockback and arena-boundary physics

use glam::Vec3;
use rand::Rng;

use super::geometry::{planar, planar_direction};
use super::meter::Meter;
use super::registry::Registry;
use super::state::ArenaBounds;
use crate::consts::{REBOUND_MAX, REBOUND_MIN};
use crate::settings::SimConfig;

#[derive(Debug, Clone)]
pub struct Player {
    /// Y is pinned to the ground height
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit ground-plane direction toward the aim point
    pub facing: Vec3,
    pub health: Meter,
    pub ammo: Meter,
    /// Ticks since the last shot (saturating)
    ticks_since_shot: u32,
    /// Idle ticks accumulated toward the next ammo unit
    regen_ticks: u32,
}

impl Player {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.ground_height, 0.0),
            velocity: Vec3::ZERO,
            facing: Vec3::X,
            health: Meter::full(config.player_max_health),
            ammo: Meter::full(config.ammo_max),
            // Ready to fire on the first tick
            ticks_since_shot: config.fire_interval_ticks,
            regen_ticks: 0,
        }
    }

    /// Turn toward `target`. Keeps the old facing if the target is on top of us.
    pub fn face(&mut self, target: Vec3) {
        if let Some(dir) = planar_direction(self.position, target) {
            self.facing = dir;
        }
    }

    /// Fire at `target` if the weapon is ready.
    ///
    /// Spends one ammo, spawns a bullet from the player's position and kicks
    /// the player backwards. Returns the shot direction, or `None` when out
    /// of ammo, still cooling down, or aiming at the player's own position.
    pub fn try_fire(
        &mut self,
        target: Vec3,
        registry: &mut Registry,
        config: &SimConfig,
    ) -> Option<Vec3> {
        if self.ticks_since_shot < config.fire_interval_ticks || self.ammo.is_empty() {
            return None;
        }
        let dir = planar_direction(self.position, target)?;
        if !self.ammo.consume(1) {
            return None;
        }

        registry.spawn_bullet(self.position, dir);
        self.velocity -= dir * config.knockback_force;
        self.ticks_since_shot = 0;
        Some(dir)
    }

    /// Per-tick weapon update: fire while the trigger is down, otherwise
    /// regenerate ammo. The two never happen in the same tick.
    pub fn update_weapon(
        &mut self,
        firing: bool,
        target: Vec3,
        registry: &mut Registry,
        config: &SimConfig,
    ) -> Option<Vec3> {
        self.ticks_since_shot = self.ticks_since_shot.saturating_add(1);

        if firing {
            self.regen_ticks = 0;
            return self.try_fire(target, registry, config);
        }

        if self.ammo.is_full() {
            self.regen_ticks = 0;
        } else {
            self.regen_ticks += 1;
            if self.regen_ticks >= config.ammo_regen_interval_ticks {
                self.ammo.regenerate(1);
                self.regen_ticks = 0;
            }
        }
        None
    }

    /// Apply velocity, then friction. Velocity decays geometrically with no floor.
    pub fn integrate(&mut self, friction: f32) {
        self.position += planar(self.velocity);
        self.velocity *= friction;
    }

    /// Clamp the player back inside the arena.
    ///
    /// On each violated axis the position snaps to the edge and velocity on
    /// that axis becomes a random rebound pointing back inward. Contact
    /// damage is applied once per tick, even in a corner. Returns whether
    /// the edge was touched.
    pub fn resolve_boundary<R: Rng + ?Sized>(
        &mut self,
        bounds: &ArenaBounds,
        rng: &mut R,
        config: &SimConfig,
    ) -> bool {
        let mut touched = false;

        if self.position.x > bounds.half_x {
            self.position.x = bounds.half_x;
            self.velocity.x = -rebound_speed(rng, config);
            touched = true;
        } else if self.position.x < -bounds.half_x {
            self.position.x = -bounds.half_x;
            self.velocity.x = rebound_speed(rng, config);
            touched = true;
        }

        if self.position.z > bounds.half_z {
            self.position.z = bounds.half_z;
            self.velocity.z = -rebound_speed(rng, config);
            touched = true;
        } else if self.position.z < -bounds.half_z {
            self.position.z = -bounds.half_z;
            self.velocity.z = rebound_speed(rng, config);
            touched = true;
        }

        self.position.y = config.ground_height;

        if touched {
            self.health.damage(config.boundary_damage);
            log::debug!(
                "Player hit arena edge, health {}/{}",
                self.health.current(),
                self.health.max()
            );
        }
        touched
    }
}

/// Random rebound magnitude off the arena edge.
///
/// Configs built in code skip validation, so the range is ordered here and a
/// non-finite bound falls back to the default range.
fn rebound_speed<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig) -> f32 {
    let (a, b) = (config.rebound_min, config.rebound_max);
    let (lo, hi) = if a.is_finite() && b.is_finite() {
        (a.min(b), a.max(b))
    } else {
        (REBOUND_MIN, REBOUND_MAX)
    };
    rng.random_range(lo..=hi)
}
