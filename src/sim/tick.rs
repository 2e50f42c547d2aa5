//! Per-frame simulation step
//!
//! Order within a running tick is fixed: weapon, enemy spawns, bullets vs
//! enemies, enemies vs player, then player physics. Enemy contact therefore
//! sees the player where it stood before this tick's movement.

use glam::Vec3;

use super::collision::{CombatReport, resolve_combat};
use super::registry::SpawnSide;
use super::state::{GameState, SimPhase};

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest aim point on the ground plane
    pub aim: Option<Vec3>,
    /// Trigger held down (continuous fire)
    pub fire_held: bool,
    /// Single-shot trigger since the last tick
    pub fire: bool,
    /// Pause toggle events since the last tick (each flips once)
    pub pause_toggles: u32,
}

/// Advance the game by one frame. `now_ms` is the host's frame timestamp.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> CombatReport {
    // Telemetry runs in every phase
    state.clock.record(now_ms);

    if let Some(aim) = input.aim {
        state.aim = aim;
    }

    for _ in 0..input.pause_toggles {
        toggle_pause(state);
    }

    // Checked ahead of the pause gate so a paused game can still end
    if state.phase != SimPhase::GameOver && state.player.health.is_empty() {
        enter_game_over(state);
    }

    if state.phase != SimPhase::Running {
        return CombatReport::default();
    }

    state.time_ticks += 1;

    let aim = state.aim;
    state.player.face(aim);
    state.player.update_weapon(
        input.fire_held || input.fire,
        aim,
        &mut state.registry,
        &state.config,
    );

    spawn_enemies(state);

    let report = resolve_combat(
        &mut state.registry,
        state.player.position,
        &mut state.player.health,
        &state.bounds,
        &state.config,
    );
    state.kills += report.enemies_killed as u64;

    state.player.integrate(state.config.friction);
    state
        .player
        .resolve_boundary(&state.bounds, &mut state.rng, &state.config);

    if state.player.health.is_empty() {
        enter_game_over(state);
    }

    log::trace!(
        "tick {}: {} bullets, {} enemies",
        state.time_ticks,
        state.registry.bullets().len(),
        state.registry.enemies().len()
    );

    report
}

fn toggle_pause(state: &mut GameState) {
    match state.phase {
        SimPhase::Running => {
            state.phase = SimPhase::Paused;
            log::info!("Paused");
        }
        SimPhase::Paused => {
            state.phase = SimPhase::Running;
            log::info!("Resumed");
        }
        SimPhase::GameOver => {}
    }
}

fn enter_game_over(state: &mut GameState) {
    state.phase = SimPhase::GameOver;
    log::info!(
        "Game over after {} ticks, {} enemies destroyed",
        state.time_ticks,
        state.kills
    );
}

/// Spawn a batch of enemies on random arena edges every spawn interval,
/// up to the live enemy cap
pub fn spawn_enemies(state: &mut GameState) {
    state.spawn_ticks += 1;
    if state.spawn_ticks < state.config.spawn_interval_ticks {
        return;
    }
    state.spawn_ticks = 0;

    for _ in 0..state.config.enemies_per_spawn {
        if state.registry.enemies().len() >= state.config.max_live_enemies {
            break;
        }
        let side = SpawnSide::random(&mut state.rng);
        state.registry.spawn_enemy(
            side,
            &mut state.rng,
            &state.bounds,
            state.config.enemy_spawn_height,
            state.config.enemy_max_health,
        );
    }
}
