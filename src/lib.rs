//! Arena Shooter - top-down single-player arena shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pooling, combat, player physics, game state)
//! - `input`: Host-side collection of discrete input events into per-tick intents
//! - `settings`: Data-driven tuning loaded from JSON
//! - `web`: Browser host bindings (wasm32 only)

pub mod input;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputCollector, InputEvent};
pub use settings::{ConfigError, SimConfig};

/// Game configuration constants
///
/// Speeds are world units per tick. Intervals are in ticks (one tick per
/// rendered frame).
pub mod consts {
    /// Visible height of the orthographic top-down camera
    pub const FRUSTUM_SIZE: f32 = 20.0;
    /// Frame rate the headless driver simulates
    pub const HOST_FRAME_RATE: f64 = 60.0;

    /// Player rests on this height (centre of a unit cube on the ground)
    pub const GROUND_HEIGHT: f32 = 0.5;
    pub const PLAYER_MAX_HEALTH: u32 = 10;
    pub const AMMO_MAX: u32 = 20;
    /// Minimum ticks between two shots
    pub const FIRE_INTERVAL_TICKS: u32 = 6;
    /// One ammo unit comes back every this many idle ticks
    pub const AMMO_REGEN_INTERVAL_TICKS: u32 = 30;
    /// Impulse applied opposite to the shot direction
    pub const KNOCKBACK_FORCE: f32 = 0.3;
    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.9;
    /// Damage taken when touching the arena edge
    pub const BOUNDARY_DAMAGE: u32 = 1;
    /// Rebound speed range off the arena edge (uniform)
    pub const REBOUND_MIN: f32 = 0.3;
    pub const REBOUND_MAX: f32 = 0.6;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 0.5;
    pub const HIT_RADIUS: f32 = 0.6;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 0.03;
    pub const ENEMY_MAX_HEALTH: i32 = 3;
    pub const ENEMY_DAMAGE: u32 = 1;
    pub const CONTACT_RADIUS: f32 = 1.2;
    pub const ENEMY_SPAWN_HEIGHT: f32 = 0.5;
    pub const SPAWN_INTERVAL_TICKS: u32 = 120;
    pub const ENEMIES_PER_SPAWN: u32 = 3;
    pub const MAX_LIVE_ENEMIES: usize = 40;

    /// Maximum dead instances retained per pool
    pub const POOL_CAPACITY: usize = 50;

    /// Frames averaged for the FPS readout
    pub const FPS_WINDOW: usize = 60;

    pub const DEFAULT_SEED: u64 = 0x5eed_a12e;
}
