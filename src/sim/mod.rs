//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, per-tick speeds
//! - Seeded RNG only
//! - Stable iteration order (insertion order, reverse traversal on removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod meter;
pub mod player;
pub mod pool;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{CombatReport, resolve_bullets, resolve_combat, resolve_enemies};
pub use meter::Meter;
pub use player::Player;
pub use pool::{EntityKind, Pool, PoolStats, Poolable};
pub use registry::{Bullet, ColorTier, Enemy, Registry, SpawnSide, Visit};
pub use state::{
    ArenaBounds, EntityTransform, FrameClock, GameState, SimPhase, Snapshot, TransformKind,
};
pub use tick::{TickInput, spawn_enemies, tick};
