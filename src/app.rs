//! Window and event-loop wiring
//!
//! Translates winit events into [`InputEvent`] records, drains control panel
//! edits and drives one [`RenderLoop::tick`] per redraw.

use std::{sync::Arc, time::Instant};

use cgmath::Vector2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gfx::rendering::RenderEngine;
use crate::input::{wheel_delta_pixels, InputEvent, InteractionMode, PointerButton};
use crate::viewer::{RenderLoop, ViewerState};

/// The viewer application
pub struct SpindleApp {
    config: ViewerConfig,
}

impl SpindleApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        log::info!(
            "starting {:?} viewer, {}x{}",
            self.config.variant,
            self.config.window.width,
            self.config.window.height
        );
        let mut state = AppState::new(self.config);
        event_loop.run_app(&mut state)?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    engine: RenderEngine,
    viewer: ViewerState,
    render_loop: RenderLoop,
}

struct AppState {
    config: ViewerConfig,
    running: Option<Running>,
    cursor: Vector2<f32>,
    fatal: Option<ViewerError>,
}

impl AppState {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            running: None,
            cursor: Vector2::new(0.0, 0.0),
            fatal: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, ViewerError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let mut engine = pollster::block_on(RenderEngine::new(window.clone(), &self.config))?;

        let now = Instant::now();
        let mut viewer = ViewerState::new(&self.config, now);
        let PhysicalSize { width, height } = window.inner_size();
        viewer.resize(width, height, &mut engine);
        viewer.install(&mut engine);

        Ok(Running {
            window,
            engine,
            viewer,
            render_loop: RenderLoop::new(self.config.auto_rotate_timing, now),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let Running {
            engine,
            viewer,
            render_loop,
            ..
        } = running;

        // The overlay sees every event first
        let captured = engine.handle_ui_event(window_id, &event);
        let mut input = None;

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !captured => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                input = Some(InputEvent::Resize { width, height });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vector2::new(position.x as f32, position.y as f32);
                // A drag that started in the viewport keeps tracking over the panel
                if !captured || viewer.interaction_mode() != InteractionMode::Idle {
                    input = Some(InputEvent::PointerMove {
                        position: self.cursor,
                    });
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = PointerButton::from(button);
                input = match state {
                    ElementState::Pressed if !captured => Some(InputEvent::PointerDown {
                        button,
                        position: self.cursor,
                    }),
                    ElementState::Pressed => None,
                    // Releases always go through so no drag is left dangling
                    ElementState::Released => Some(InputEvent::PointerUp { button }),
                };
            }
            WindowEvent::MouseWheel { delta, .. } if !captured => {
                input = Some(InputEvent::Wheel {
                    delta_y: wheel_delta_pixels(delta, self.config.interaction.wheel_line_height),
                });
            }
            WindowEvent::Touch(touch) => {
                let position = Vector2::new(touch.location.x as f32, touch.location.y as f32);
                viewer.handle_touch(touch.id, touch.phase, position, engine);
            }
            WindowEvent::Focused(false) => viewer.cancel_interaction(),
            WindowEvent::RedrawRequested => {
                for change in engine.take_config_changes() {
                    viewer.apply_change(change, engine);
                }
                if let Err(err) = render_loop.tick(viewer, engine, Instant::now()) {
                    viewer.teardown(engine);
                    self.fail(event_loop, err);
                }
                return;
            }
            _ => (),
        }

        if let Some(input) = input {
            viewer.handle_input(&input, engine);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_ref() {
            running.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_mut() {
            running.viewer.teardown(&mut running.engine);
        }
    }
}
