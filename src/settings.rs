//! Simulation tuning
//!
//! Every gameplay constant lives in [`SimConfig`] so hosts can load balance
//! changes from JSON. Missing fields fall back to `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for spawn positions and rebounds
    pub seed: u64,
    /// Camera frustum height the arena bounds derive from
    pub frustum_size: f32,

    // === Player ===
    pub ground_height: f32,
    pub player_max_health: u32,
    pub ammo_max: u32,
    pub fire_interval_ticks: u32,
    pub ammo_regen_interval_ticks: u32,
    pub knockback_force: f32,
    /// Velocity multiplier per tick, in (0, 1]
    pub friction: f32,
    pub boundary_damage: u32,
    pub rebound_min: f32,
    pub rebound_max: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub hit_radius: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_max_health: i32,
    pub enemy_damage: u32,
    pub contact_radius: f32,
    pub enemy_spawn_height: f32,
    pub spawn_interval_ticks: u32,
    pub enemies_per_spawn: u32,
    pub max_live_enemies: usize,

    /// Dead instances retained per pool
    pub pool_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frustum_size: FRUSTUM_SIZE,

            ground_height: GROUND_HEIGHT,
            player_max_health: PLAYER_MAX_HEALTH,
            ammo_max: AMMO_MAX,
            fire_interval_ticks: FIRE_INTERVAL_TICKS,
            ammo_regen_interval_ticks: AMMO_REGEN_INTERVAL_TICKS,
            knockback_force: KNOCKBACK_FORCE,
            friction: FRICTION,
            boundary_damage: BOUNDARY_DAMAGE,
            rebound_min: REBOUND_MIN,
            rebound_max: REBOUND_MAX,

            bullet_speed: BULLET_SPEED,
            bullet_damage: 1,
            hit_radius: HIT_RADIUS,

            enemy_speed: ENEMY_SPEED,
            enemy_max_health: ENEMY_MAX_HEALTH,
            enemy_damage: ENEMY_DAMAGE,
            contact_radius: CONTACT_RADIUS,
            enemy_spawn_height: ENEMY_SPAWN_HEIGHT,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            enemies_per_spawn: ENEMIES_PER_SPAWN,
            max_live_enemies: MAX_LIVE_ENEMIES,

            pool_capacity: POOL_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
            if value > 0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                })
            }
        }

        positive("frustum_size", self.frustum_size)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("hit_radius", self.hit_radius)?;
        positive("contact_radius", self.contact_radius)?;
        positive("rebound_min", self.rebound_min)?;

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "friction",
                reason: "must be in (0, 1]",
            });
        }
        if self.rebound_max.is_nan() || self.rebound_max < self.rebound_min {
            return Err(ConfigError::Invalid {
                field: "rebound_max",
                reason: "must not be below rebound_min",
            });
        }
        if self.knockback_force < 0.0 {
            return Err(ConfigError::Invalid {
                field: "knockback_force",
                reason: "must not be negative",
            });
        }

        nonzero("player_max_health", self.player_max_health as u64)?;
        nonzero("ammo_max", self.ammo_max as u64)?;
        nonzero("enemy_max_health", self.enemy_max_health.max(0) as u64)?;
        nonzero("bullet_damage", self.bullet_damage.max(0) as u64)?;
        nonzero("fire_interval_ticks", self.fire_interval_ticks as u64)?;
        nonzero("ammo_regen_interval_ticks", self.ammo_regen_interval_ticks as u64)?;
        nonzero("spawn_interval_ticks", self.spawn_interval_ticks as u64)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SimConfig::from_json(r#"{ "ammo_max": 5, "seed": 42 }"#).unwrap();
        assert_eq!(config.ammo_max, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.hit_radius, HIT_RADIUS);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = SimConfig::default();
        config.enemies_per_spawn = 7;
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = SimConfig::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "friction", .. }));
    }

    #[test]
    fn test_rejects_inverted_rebound() {
        let err = SimConfig::from_json(r#"{ "rebound_min": 0.8, "rebound_max": 0.2 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rebound_max", .. }));
    }

    #[test]
    fn test_rejects_zero_ammo() {
        let err = SimConfig::from_json(r#"{ "ammo_max": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ammo_max", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SimConfig::from_json("{ ammo_max: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load("/nonexistent/arena-shooter.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
