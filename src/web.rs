//! Browser host bindings
//!
//! The page owns the canvas, camera and `requestAnimationFrame` loop. It
//! forwards pointer/keyboard events here and calls `update` once per frame,
//! then draws from `transforms` and `snapshot_json`.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::input::{InputCollector, InputEvent};
use crate::settings::SimConfig;
use crate::sim::{EntityTransform, GameState, TransformKind, tick};

/// Floats per entity in [`WebSimulation::transforms`]:
/// kind, x, y, z, heading, tint RGB (-1 when untinted)
pub const TRANSFORM_STRIDE: usize = 6;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Arena Shooter starting...");
}

#[wasm_bindgen]
pub struct WebSimulation {
    state: GameState,
    input: InputCollector,
    transforms: Vec<EntityTransform>,
}

#[wasm_bindgen]
impl WebSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, aspect: f32) -> WebSimulation {
        let config = SimConfig {
            seed,
            ..SimConfig::default()
        };
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::with_viewport(config, aspect),
            input: InputCollector::new(),
            transforms: Vec::new(),
        }
    }

    /// Build from a JSON config; errors surface as JS exceptions
    pub fn from_config(json: &str, aspect: f32) -> Result<WebSimulation, JsValue> {
        let config = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            state: GameState::with_viewport(config, aspect),
            input: InputCollector::new(),
            transforms: Vec::new(),
        })
    }

    pub fn set_aim(&mut self, x: f32, z: f32) {
        self.input.push(InputEvent::AimAt(Vec3::new(x, 0.0, z)));
    }

    pub fn fire_down(&mut self) {
        self.input.push(InputEvent::FirePressed);
    }

    pub fn fire_up(&mut self) {
        self.input.push(InputEvent::FireReleased);
    }

    /// Single shot without holding the trigger
    pub fn fire_once(&mut self) {
        self.input.push(InputEvent::FirePressed);
        self.input.push(InputEvent::FireReleased);
    }

    pub fn toggle_pause(&mut self) {
        self.input.push(InputEvent::TogglePause);
    }

    /// Advance one frame at host time `now_ms`
    pub fn update(&mut self, now_ms: f64) {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input, now_ms);
    }

    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.state.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Snapshot encode failed: {}", e);
                String::new()
            }
        }
    }

    pub fn half_extents(&self) -> Vec<f32> {
        vec![self.state.bounds.half_x, self.state.bounds.half_z]
    }

    /// Flattened transforms, [`TRANSFORM_STRIDE`] floats per entity
    pub fn transforms(&mut self) -> Vec<f32> {
        self.state.write_transforms(&mut self.transforms);
        let mut flat = Vec::with_capacity(self.transforms.len() * TRANSFORM_STRIDE);
        for t in &self.transforms {
            let kind = match t.kind {
                TransformKind::Player => 0.0,
                TransformKind::Bullet => 1.0,
                TransformKind::Enemy => 2.0,
            };
            let tier = t.tier.map(|tier| tier.rgb() as f32).unwrap_or(-1.0);
            flat.extend_from_slice(&[
                kind,
                t.position.x,
                t.position.y,
                t.position.z,
                t.heading,
                tier,
            ]);
        }
        flat
    }
}
