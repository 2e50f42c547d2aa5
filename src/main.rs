//! Arena Shooter native entry point
//!
//! Runs a headless autoplay session: the bot aims at the nearest enemy and
//! holds the trigger while any are alive. Once the magazine runs dry it lets
//! go until half of it has regenerated. Pass a JSON config path as the first
//! argument to override tuning.

#[cfg(not(target_arch = "wasm32"))]
use arena_shooter::sim::GameState;
#[cfg(not(target_arch = "wasm32"))]
use arena_shooter::{InputCollector, InputEvent};

/// Trigger discipline for the headless bot
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct Autopilot {
    reloading: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Autopilot {
    /// Push this frame's aim and trigger events
    fn steer(&mut self, state: &GameState, input: &mut InputCollector) {
        let ammo = &state.player.ammo;
        if !self.reloading && ammo.is_empty() {
            self.reloading = true;
            log::info!("Out of ammo, holding fire");
        } else if self.reloading && ammo.current() * 2 >= ammo.max() {
            self.reloading = false;
            log::info!("Reloaded to {}/{}", ammo.current(), ammo.max());
        }

        let player = state.player.position;
        let nearest = state
            .registry
            .enemies()
            .iter()
            .map(|e| e.position)
            .min_by(|a, b| {
                a.distance_squared(player)
                    .partial_cmp(&b.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(target) = nearest {
            input.push(InputEvent::AimAt(target));
        }
        match nearest {
            Some(_) if !self.reloading => input.push(InputEvent::FirePressed),
            _ => input.push(InputEvent::FireReleased),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_shooter::SimConfig;
    use arena_shooter::consts::HOST_FRAME_RATE;
    use arena_shooter::sim::tick;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arena Shooter (native, headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    const FRAMES: u64 = 60 * 120;
    let frame_ms = 1000.0 / HOST_FRAME_RATE;
    let mut state = GameState::with_viewport(config, 16.0 / 9.0);
    let mut input = InputCollector::new();
    let mut bot = Autopilot::default();

    for frame in 0..FRAMES {
        bot.steer(&state, &mut input);

        let tick_input = input.take_tick_input();
        tick(&mut state, &tick_input, frame as f64 * frame_ms);

        if frame % HOST_FRAME_RATE as u64 == 0 {
            match serde_json::to_string(&state.snapshot()) {
                Ok(json) => log::info!("{}", json),
                Err(e) => log::warn!("Snapshot encode failed: {}", e),
            }
        }

        if state.is_game_over() {
            break;
        }
    }

    let (bullets, enemies) = state.registry.pool_stats();
    log::info!(
        "Session ended: {} ticks, {} kills, health {}/{}, game over: {}",
        state.time_ticks,
        state.kills,
        state.player.health.current(),
        state.player.health.max(),
        state.is_game_over()
    );
    log::info!("Bullet pool: {:?}", bullets);
    log::info!("Enemy pool: {:?}", enemies);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
