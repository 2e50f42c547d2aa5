//! Host-side input collection
//!
//! Platform event handlers push [`InputEvent`]s as they arrive; once per
//! frame the host takes a [`TickInput`]. One-shot events (single fire, pause
//! toggles) are cleared when taken, the aim point and held trigger persist.

use glam::Vec3;

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved; world-space point on the ground plane
    AimAt(Vec3),
    FirePressed,
    FireReleased,
    TogglePause,
}

#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    aim: Option<Vec3>,
    fire_held: bool,
    fire_edge: bool,
    pause_toggles: u32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::AimAt(point) => self.aim = Some(point),
            InputEvent::FirePressed => {
                // A press and release between two frames still fires once
                self.fire_held = true;
                self.fire_edge = true;
            }
            InputEvent::FireReleased => self.fire_held = false,
            InputEvent::TogglePause => self.pause_toggles += 1,
        }
    }

    /// Build this frame's input and clear one-shot events
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            aim: self.aim,
            fire_held: self.fire_held,
            fire: self.fire_edge,
            pause_toggles: self.pause_toggles,
        };
        self.fire_edge = false;
        self.pause_toggles = 0;
        input
    }

    pub fn aim(&self) -> Option<Vec3> {
        self.aim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shots_clear_after_take() {
        let mut input = InputCollector::new();
        input.push(InputEvent::TogglePause);
        input.push(InputEvent::FirePressed);
        input.push(InputEvent::FireReleased);

        let first = input.take_tick_input();
        assert_eq!(first.pause_toggles, 1);
        assert!(first.fire);
        assert!(!first.fire_held);

        let second = input.take_tick_input();
        assert_eq!(second.pause_toggles, 0);
        assert!(!second.fire);
    }

    #[test]
    fn test_aim_and_hold_persist() {
        let mut input = InputCollector::new();
        input.push(InputEvent::AimAt(Vec3::new(1.0, 0.0, 2.0)));
        input.push(InputEvent::FirePressed);
        input.take_tick_input();

        let next = input.take_tick_input();
        assert_eq!(next.aim, Some(Vec3::new(1.0, 0.0, 2.0)));
        assert!(next.fire_held);
        assert!(!next.fire);

        input.push(InputEvent::AimAt(Vec3::new(-3.0, 0.0, 0.0)));
        assert_eq!(input.aim(), Some(Vec3::new(-3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_each_toggle_counted_once() {
        let mut input = InputCollector::new();
        input.push(InputEvent::TogglePause);
        input.push(InputEvent::TogglePause);
        input.push(InputEvent::TogglePause);
        assert_eq!(input.take_tick_input().pause_toggles, 3);
    }
}
