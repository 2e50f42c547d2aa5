//! Game state and published views
//!
//! `GameState` is the single owner of everything that changes during play.
//! Hosts drive it through [`super::tick`] and read it back through
//! [`GameState::snapshot`] and [`GameState::write_transforms`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::heading;
use super::player::Player;
use super::registry::{ColorTier, Registry};
use crate::consts::FPS_WINDOW;
use crate::settings::SimConfig;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Active gameplay
    Running,
    /// Frozen until the next pause toggle
    Paused,
    /// Player health ran out; permanent
    GameOver,
}

/// Static half-extents of the playable area on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub half_x: f32,
    pub half_z: f32,
}

impl ArenaBounds {
    pub fn new(half_x: f32, half_z: f32) -> Self {
        Self {
            half_x: half_x.abs(),
            half_z: half_z.abs(),
        }
    }

    /// Bounds visible through a top-down orthographic camera
    /// `frustum_size` units tall at the given aspect ratio
    pub fn from_viewport(frustum_size: f32, aspect: f32) -> Self {
        Self::new(frustum_size * aspect / 2.0, frustum_size / 2.0)
    }

    /// Whether a ground-plane point is inside (edges count as inside)
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_x && point.z.abs() <= self.half_z
    }
}

/// Frame counter and FPS estimate. Runs every frame, whatever the phase.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }
}

impl FrameClock {
    /// Record a frame at host time `now_ms`
    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames += 1;

        let samples = (self.frames as usize).min(FPS_WINDOW);
        if samples < 2 {
            return;
        }
        // Oldest sample still in the window
        let oldest = if self.frames as usize >= FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let span = now_ms - oldest;
        if span > 0.0 {
            self.fps = ((samples - 1) as f64 * 1000.0 / span).round() as u32;
        }
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Read-only per-frame view for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub health_current: u32,
    pub health_max: u32,
    pub ammo_current: u32,
    pub ammo_max: u32,
    pub bullet_count: usize,
    pub enemy_count: usize,
    pub fps: u32,
    pub frame: u64,
    pub paused: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransformKind {
    Player,
    Bullet,
    Enemy,
}

/// One drawable entity for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityTransform {
    pub kind: TransformKind,
    pub position: Vec3,
    /// Heading in radians (player only, 0 otherwise)
    pub heading: f32,
    /// Enemy tint
    pub tier: Option<ColorTier>,
}

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    pub config: SimConfig,
    pub bounds: ArenaBounds,
    pub phase: SimPhase,
    pub player: Player,
    pub registry: Registry,
    pub clock: FrameClock,
    /// Latest aim point from the host
    pub aim: Vec3,
    /// Gameplay ticks (only advance while running)
    pub time_ticks: u64,
    /// Ticks since the last enemy spawn
    pub spawn_ticks: u32,
    /// Enemies destroyed by bullets
    pub kills: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with explicit arena bounds
    pub fn new(config: SimConfig, bounds: ArenaBounds) -> Self {
        let player = Player::new(&config);
        let aim = player.position + Vec3::X;
        Self {
            bounds,
            phase: SimPhase::Running,
            registry: Registry::new(config.pool_capacity),
            clock: FrameClock::default(),
            aim,
            time_ticks: 0,
            spawn_ticks: 0,
            kills: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            player,
            config,
        }
    }

    /// Create a new game whose bounds match a viewport of the given aspect ratio
    pub fn with_viewport(config: SimConfig, aspect: f32) -> Self {
        let bounds = ArenaBounds::from_viewport(config.frustum_size, aspect);
        log::info!(
            "Arena half-extents: {:.2} x {:.2}",
            bounds.half_x,
            bounds.half_z
        );
        Self::new(config, bounds)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == SimPhase::Paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == SimPhase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            health_current: self.player.health.current(),
            health_max: self.player.health.max(),
            ammo_current: self.player.ammo.current(),
            ammo_max: self.player.ammo.max(),
            bullet_count: self.registry.bullets().len(),
            enemy_count: self.registry.enemies().len(),
            fps: self.clock.fps(),
            frame: self.clock.frames(),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }

    /// Refill `out` with the player, every bullet and every enemy, in that order
    pub fn write_transforms(&self, out: &mut Vec<EntityTransform>) {
        out.clear();
        out.push(EntityTransform {
            kind: TransformKind::Player,
            position: self.player.position,
            heading: heading(self.player.facing),
            tier: None,
        });
        out.extend(self.registry.bullets().iter().map(|b| EntityTransform {
            kind: TransformKind::Bullet,
            position: b.position,
            heading: 0.0,
            tier: None,
        }));
        out.extend(self.registry.enemies().iter().map(|e| EntityTransform {
            kind: TransformKind::Enemy,
            position: e.position,
            heading: 0.0,
            tier: Some(e.tier),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_viewport() {
        let bounds = ArenaBounds::from_viewport(20.0, 1.5);
        assert_eq!(bounds.half_x, 15.0);
        assert_eq!(bounds.half_z, 10.0);
        assert!(bounds.contains(Vec3::new(15.0, 3.0, -10.0)));
        assert!(!bounds.contains(Vec3::new(15.1, 0.0, 0.0)));
    }

    #[test]
    fn test_frame_clock_fps() {
        let mut clock = FrameClock::default();
        for i in 0..120 {
            clock.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(clock.frames(), 120);
        assert_eq!(clock.fps(), 60);
    }

    #[test]
    fn test_frame_clock_partial_window() {
        let mut clock = FrameClock::default();
        clock.record(0.0);
        assert_eq!(clock.fps(), 0);
        for i in 1..10 {
            clock.record(i as f64 * 20.0);
        }
        assert_eq!(clock.fps(), 50);
    }

    #[test]
    fn test_new_state_snapshot() {
        let state = GameState::new(SimConfig::default(), ArenaBounds::new(10.0, 10.0));
        let snap = state.snapshot();
        assert_eq!(snap.health_current, snap.health_max);
        assert_eq!(snap.ammo_current, 20);
        assert_eq!(snap.bullet_count, 0);
        assert_eq!(snap.enemy_count, 0);
        assert!(!snap.paused && !snap.game_over);
        assert_eq!(state.player.position.y, state.config.ground_height);
    }

    #[test]
    fn test_snapshot_encodes_to_json() {
        let state = GameState::new(SimConfig::default(), ArenaBounds::new(10.0, 10.0));
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["ammo_current"], 20);
        assert_eq!(json["paused"], false);
        assert_eq!(json["game_over"], false);
    }

    #[test]
    fn test_transforms_reuse_buffer() {
        let mut state = GameState::new(SimConfig::default(), ArenaBounds::new(10.0, 10.0));
        state.registry.spawn_bullet(Vec3::ZERO, Vec3::Z);
        state.registry.spawn_enemy_at(Vec3::new(3.0, 0.5, 3.0), 3);

        let mut out = Vec::new();
        state.write_transforms(&mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].kind, TransformKind::Player);
        assert_eq!(out[1].kind, TransformKind::Bullet);
        assert_eq!(out[2].tier, Some(ColorTier::Blue));

        state.registry.remove_bullet(0);
        state.write_transforms(&mut out);
        assert_eq!(out.len(), 2);
    }
}
