//! Pointer and touch interaction state machine
//!
//! Decides which controller a drag feeds:
//!
//! | Gesture                         | Mode             | Effect                    |
//! |---------------------------------|------------------|---------------------------|
//! | primary button / one finger     | `DraggingObject` | rotates the object        |
//! | secondary button / two fingers  | `DraggingCamera` | orbits (and pinch-zooms)  |
//! | wheel                           | unchanged        | zooms the camera          |
//!
//! Only one gesture is active at a time. Presses that arrive while a gesture
//! is running are ignored, with one exception: a second finger landing during
//! a one-finger object drag turns the gesture into a camera drag, since touch
//! contacts never arrive simultaneously.

use cgmath::{InnerSpace, Vector2};

use super::{InputEvent, PointerButton};
use crate::config::InteractionConfig;
use crate::gfx::camera::OrbitCamera;
use crate::gfx::scene::orientation::ObjectOrientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    DraggingObject,
    DraggingCamera,
}

/// What started the current gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureSource {
    Mouse(PointerButton),
    Touch,
}

/// State of one gesture, dropped when the gesture ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSession {
    pub mode: InteractionMode,
    source: GestureSource,
    /// Pointer position, or two-finger midpoint, at the last processed event
    pub last_pointer: Vector2<f32>,
    /// Finger separation at the last processed event
    pub pinch_baseline: Option<f32>,
}

impl InteractionSession {
    fn mouse(mode: InteractionMode, button: PointerButton, position: Vector2<f32>) -> Self {
        Self {
            mode,
            source: GestureSource::Mouse(button),
            last_pointer: position,
            pinch_baseline: None,
        }
    }

    fn one_finger(touch: Vector2<f32>) -> Self {
        Self {
            mode: InteractionMode::DraggingObject,
            source: GestureSource::Touch,
            last_pointer: touch,
            pinch_baseline: None,
        }
    }

    fn two_fingers(a: Vector2<f32>, b: Vector2<f32>) -> Self {
        Self {
            mode: InteractionMode::DraggingCamera,
            source: GestureSource::Touch,
            last_pointer: midpoint(a, b),
            pinch_baseline: Some((a - b).magnitude()),
        }
    }

    fn is_touch(&self) -> bool {
        self.source == GestureSource::Touch
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionStateMachine {
    config: InteractionConfig,
    session: Option<InteractionSession>,
}

impl InteractionStateMachine {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.session.map_or(InteractionMode::Idle, |s| s.mode)
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Feeds one event, mutating the camera or object as the gesture dictates.
    /// Returns the mode after the event.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        camera: &mut OrbitCamera,
        orientation: &mut ObjectOrientation,
    ) -> InteractionMode {
        let before = self.mode();
        match event {
            InputEvent::PointerDown { button, position } => self.pointer_down(*button, *position),
            InputEvent::PointerMove { position } => self.pointer_move(*position, camera, orientation),
            InputEvent::PointerUp { button } => self.pointer_up(*button),
            InputEvent::Wheel { delta_y } => {
                if self.config.camera_orbit {
                    camera.set_zoom_delta(delta_y * self.config.zoom_sensitivity);
                }
            }
            InputEvent::TouchStart { touches } => self.touch_start(touches),
            InputEvent::TouchMove { touches } => self.touch_move(touches, camera, orientation),
            InputEvent::TouchEnd { touches } => self.touch_end(touches),
            InputEvent::Resize { .. } => {}
        }
        let after = self.mode();
        if before != after {
            log::trace!("interaction {before:?} -> {after:?}");
        }
        after
    }

    /// Drops the current gesture, e.g. when the window loses focus.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn pointer_down(&mut self, button: PointerButton, position: Vector2<f32>) {
        if self.session.is_some() {
            return;
        }
        let mode = match button {
            PointerButton::Primary => InteractionMode::DraggingObject,
            PointerButton::Secondary if self.config.camera_orbit => InteractionMode::DraggingCamera,
            _ => return,
        };
        self.session = Some(InteractionSession::mouse(mode, button, position));
    }

    fn pointer_move(
        &mut self,
        position: Vector2<f32>,
        camera: &mut OrbitCamera,
        orientation: &mut ObjectOrientation,
    ) {
        let Some(session) = self.session.as_mut().filter(|s| !s.is_touch()) else {
            return;
        };
        let delta = position - session.last_pointer;
        session.last_pointer = position;
        match session.mode {
            InteractionMode::DraggingObject => orientation.apply_drag(delta.x, delta.y),
            InteractionMode::DraggingCamera => camera.set_delta(
                delta.x * self.config.orbit_sensitivity,
                delta.y * self.config.orbit_sensitivity,
            ),
            InteractionMode::Idle => {}
        }
    }

    fn pointer_up(&mut self, button: PointerButton) {
        if self
            .session
            .is_some_and(|s| s.source == GestureSource::Mouse(button))
        {
            self.session = None;
        }
    }

    fn touch_start(&mut self, touches: &[Vector2<f32>]) {
        let two_fingers = self.config.camera_orbit && touches.len() >= 2;
        match self.session {
            None if two_fingers => {
                self.session = Some(InteractionSession::two_fingers(touches[0], touches[1]));
            }
            None => {
                if let Some(first) = touches.first() {
                    self.session = Some(InteractionSession::one_finger(*first));
                }
            }
            Some(session)
                if two_fingers && session.is_touch() && session.mode == InteractionMode::DraggingObject =>
            {
                self.session = Some(InteractionSession::two_fingers(touches[0], touches[1]));
            }
            Some(_) => {}
        }
    }

    fn touch_move(
        &mut self,
        touches: &[Vector2<f32>],
        camera: &mut OrbitCamera,
        orientation: &mut ObjectOrientation,
    ) {
        let Some(session) = self.session.as_mut().filter(|s| s.is_touch()) else {
            return;
        };
        match (session.mode, touches) {
            (InteractionMode::DraggingObject, [touch]) => {
                let delta = *touch - session.last_pointer;
                session.last_pointer = *touch;
                orientation.apply_drag(delta.x, delta.y);
            }
            (InteractionMode::DraggingCamera, [a, b, ..]) => {
                let center = midpoint(*a, *b);
                let delta = center - session.last_pointer;
                session.last_pointer = center;
                camera.set_delta(
                    delta.x * self.config.orbit_sensitivity,
                    delta.y * self.config.orbit_sensitivity,
                );

                // Fingers moving apart shrink the distance
                let separation = (*a - *b).magnitude();
                if let Some(baseline) = session.pinch_baseline.replace(separation) {
                    camera.set_zoom_delta((baseline - separation) * self.config.zoom_sensitivity);
                }
            }
            _ => {}
        }
    }

    fn touch_end(&mut self, remaining: &[Vector2<f32>]) {
        let Some(session) = self.session.filter(|s| s.is_touch()) else {
            return;
        };
        self.session = match (session.mode, remaining) {
            // Rebase on the remaining contacts so the next move has no jump
            (InteractionMode::DraggingObject, [first, ..]) => Some(InteractionSession {
                last_pointer: *first,
                ..session
            }),
            (InteractionMode::DraggingCamera, [a, b, ..]) => Some(InteractionSession::two_fingers(*a, *b)),
            _ => None,
        };
    }
}

fn midpoint(a: Vector2<f32>, b: Vector2<f32>) -> Vector2<f32> {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_2, PI};

    struct Rig {
        machine: InteractionStateMachine,
        camera: OrbitCamera,
        orientation: ObjectOrientation,
    }

    impl Rig {
        fn new(config: InteractionConfig) -> Self {
            Self {
                machine: InteractionStateMachine::new(config),
                camera: OrbitCamera::new(5.0, 0.0, FRAC_PI_2, 1.5),
                orientation: ObjectOrientation::default(),
            }
        }

        fn send(&mut self, event: InputEvent) -> InteractionMode {
            self.machine
                .handle(&event, &mut self.camera, &mut self.orientation)
        }
    }

    fn v(x: f32, y: f32) -> Vector2<f32> {
        Vector2::new(x, y)
    }

    fn down(button: PointerButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button,
            position: v(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { position: v(x, y) }
    }

    #[test]
    fn test_primary_drag_rotates_object() {
        let mut rig = Rig::new(InteractionConfig::default());
        assert_eq!(rig.send(down(PointerButton::Primary, 10.0, 10.0)), InteractionMode::DraggingObject);
        rig.send(moved(110.0, 10.0));
        assert!((rig.orientation.yaw - 1.0).abs() < 1e-6);
        assert_eq!(rig.orientation.pitch, 0.0);
        assert_eq!(rig.camera.azimuth, 0.0);

        assert_eq!(
            rig.send(InputEvent::PointerUp { button: PointerButton::Primary }),
            InteractionMode::Idle
        );
        assert!(rig.machine.session().is_none());
    }

    #[test]
    fn test_secondary_press_during_object_drag_is_ignored() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(down(PointerButton::Primary, 0.0, 0.0));
        assert_eq!(rig.send(down(PointerButton::Secondary, 0.0, 0.0)), InteractionMode::DraggingObject);

        // Releasing the other button does not end the gesture
        assert_eq!(
            rig.send(InputEvent::PointerUp { button: PointerButton::Secondary }),
            InteractionMode::DraggingObject
        );
        rig.send(moved(0.0, 50.0));
        assert!((rig.orientation.pitch - 0.5).abs() < 1e-6);
        assert_eq!(rig.camera.polar, FRAC_PI_2);
    }

    #[test]
    fn test_secondary_drag_orbits_camera() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(down(PointerButton::Secondary, 100.0, 100.0));
        rig.send(moved(100.0 + FRAC_PI_2 * 100.0, 100.0));
        assert!((rig.camera.azimuth + FRAC_PI_2).abs() < 1e-4);
        let eye = rig.camera.position_vector();
        assert!(eye.x.abs() < 1e-3);
        assert!((eye.z + 5.0).abs() < 1e-3);
        assert_eq!(rig.orientation.yaw, 0.0);
    }

    #[test]
    fn test_wheel_zooms_without_touching_mode() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(down(PointerButton::Primary, 0.0, 0.0));
        assert_eq!(rig.send(InputEvent::Wheel { delta_y: 100.0 }), InteractionMode::DraggingObject);
        assert!((rig.camera.distance - 6.0).abs() < 1e-6);

        rig.send(InputEvent::Wheel { delta_y: -10_000.0 });
        assert_eq!(rig.camera.distance, 2.0);
    }

    #[test]
    fn test_pinch_tracks_baseline_continuously() {
        let mut rig = Rig::new(InteractionConfig::default());
        let start = InputEvent::TouchStart {
            touches: vec![v(100.0, 200.0), v(200.0, 200.0)],
        };
        assert_eq!(rig.send(start), InteractionMode::DraggingCamera);
        assert_eq!(rig.machine.session().and_then(|s| s.pinch_baseline), Some(100.0));

        // Symmetric pinch: midpoint stays put, separation 100 -> 60
        rig.send(InputEvent::TouchMove {
            touches: vec![v(120.0, 200.0), v(180.0, 200.0)],
        });
        assert!((rig.camera.distance - 5.4).abs() < 1e-5);
        assert_eq!(rig.camera.azimuth, 0.0);
        assert_eq!(rig.machine.session().and_then(|s| s.pinch_baseline), Some(60.0));

        // Same separation again: no further zoom
        rig.send(InputEvent::TouchMove {
            touches: vec![v(120.0, 200.0), v(180.0, 200.0)],
        });
        assert!((rig.camera.distance - 5.4).abs() < 1e-5);
    }

    #[test]
    fn test_second_finger_promotes_object_drag() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(InputEvent::TouchStart { touches: vec![v(0.0, 0.0)] });
        assert_eq!(rig.machine.mode(), InteractionMode::DraggingObject);
        rig.send(InputEvent::TouchMove { touches: vec![v(10.0, 0.0)] });
        assert!((rig.orientation.yaw - 0.1).abs() < 1e-6);

        let mode = rig.send(InputEvent::TouchStart {
            touches: vec![v(10.0, 0.0), v(110.0, 0.0)],
        });
        assert_eq!(mode, InteractionMode::DraggingCamera);

        // Lifting one finger ends the camera gesture
        assert_eq!(
            rig.send(InputEvent::TouchEnd { touches: vec![v(10.0, 0.0)] }),
            InteractionMode::Idle
        );
    }

    #[test]
    fn test_third_finger_lift_rebases_camera_gesture() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(InputEvent::TouchStart {
            touches: vec![v(0.0, 0.0), v(100.0, 0.0)],
        });
        // A third finger does not restart the gesture
        assert_eq!(
            rig.send(InputEvent::TouchStart {
                touches: vec![v(0.0, 0.0), v(100.0, 0.0), v(300.0, 0.0)],
            }),
            InteractionMode::DraggingCamera
        );

        let mode = rig.send(InputEvent::TouchEnd {
            touches: vec![v(100.0, 0.0), v(300.0, 0.0)],
        });
        assert_eq!(mode, InteractionMode::DraggingCamera);
        assert_eq!(rig.machine.session().and_then(|s| s.pinch_baseline), Some(200.0));

        // Holding still on the remaining pair neither orbits nor zooms
        rig.send(InputEvent::TouchMove {
            touches: vec![v(100.0, 0.0), v(300.0, 0.0)],
        });
        assert_eq!(rig.camera.azimuth, 0.0);
        assert_eq!(rig.camera.polar, FRAC_PI_2);
        assert_eq!(rig.camera.distance, 5.0);
    }

    #[test]
    fn test_fixed_camera_lift_rebases_object_drag() {
        let config = InteractionConfig {
            camera_orbit: false,
            ..Default::default()
        };
        let mut rig = Rig::new(config);
        rig.send(InputEvent::TouchStart {
            touches: vec![v(0.0, 0.0), v(100.0, 0.0)],
        });

        let mode = rig.send(InputEvent::TouchEnd {
            touches: vec![v(100.0, 0.0)],
        });
        assert_eq!(mode, InteractionMode::DraggingObject);

        rig.send(InputEvent::TouchMove { touches: vec![v(110.0, 0.0)] });
        assert!((rig.orientation.yaw - 0.1).abs() < 1e-6);
        assert_eq!(rig.orientation.pitch, 0.0);
    }

    #[test]
    fn test_touch_end_with_no_contacts_returns_to_idle() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(InputEvent::TouchStart { touches: vec![v(5.0, 5.0)] });
        assert_eq!(rig.send(InputEvent::TouchEnd { touches: vec![] }), InteractionMode::Idle);
    }

    #[test]
    fn test_touch_and_mouse_streams_do_not_mix() {
        let mut rig = Rig::new(InteractionConfig::default());
        rig.send(InputEvent::TouchStart { touches: vec![v(0.0, 0.0)] });
        rig.send(moved(300.0, 300.0));
        assert_eq!(rig.orientation.yaw, 0.0);
        rig.send(InputEvent::PointerUp { button: PointerButton::Primary });
        assert_eq!(rig.machine.mode(), InteractionMode::DraggingObject);
    }

    #[test]
    fn test_fixed_camera_ignores_orbit_gestures() {
        let config = InteractionConfig {
            camera_orbit: false,
            ..Default::default()
        };
        let mut rig = Rig::new(config);
        assert_eq!(rig.send(down(PointerButton::Secondary, 0.0, 0.0)), InteractionMode::Idle);
        rig.send(InputEvent::Wheel { delta_y: 500.0 });
        assert_eq!(rig.camera.distance, 5.0);
        assert_eq!(
            rig.send(InputEvent::TouchStart {
                touches: vec![v(0.0, 0.0), v(10.0, 0.0)]
            }),
            InteractionMode::DraggingObject
        );
    }

    #[test]
    fn test_random_streams_respect_camera_bounds() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut rig = Rig::new(InteractionConfig::default());
        for _ in 0..2_000 {
            let x = rng.random_range(-2_000.0..2_000.0);
            let y = rng.random_range(-2_000.0..2_000.0);
            let event = match rng.random_range(0..8) {
                0 => down(PointerButton::Primary, x, y),
                1 => down(PointerButton::Secondary, x, y),
                2 => InputEvent::PointerUp { button: PointerButton::Primary },
                3 => InputEvent::PointerUp { button: PointerButton::Secondary },
                4 => InputEvent::Wheel { delta_y: rng.random_range(-500.0..500.0) },
                5 => InputEvent::TouchStart {
                    touches: vec![v(x, y), v(y, x)],
                },
                6 => InputEvent::TouchMove {
                    touches: vec![v(x, y), v(x * 0.5, y)],
                },
                _ => moved(x, y),
            };
            rig.send(event);
            assert!((2.0..=20.0).contains(&rig.camera.distance));
            assert!((0.1..=PI - 0.1).contains(&rig.camera.polar));
        }
    }
}
