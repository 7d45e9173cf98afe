//! Viewer state and the per-frame update cycle
//!
//! [`ViewerState`] owns everything the viewer mutates. Input handlers and
//! configuration changes borrow it one at a time on the event-loop thread;
//! [`RenderLoop::tick`] reads it once per frame.

use std::time::Instant;

use cgmath::Vector2;
use winit::event::TouchPhase;

use crate::config::{AutoRotateTiming, ViewerConfig};
use crate::error::ViewerError;
use crate::gfx::camera::OrbitCamera;
use crate::gfx::lights::LightRig;
use crate::gfx::rendering::{FrameOutcome, FrameView, Readout, RenderBackend};
use crate::gfx::scene::config::ConfigChange;
use crate::gfx::scene::orientation::ObjectOrientation;
use crate::gfx::scene::store::SceneStore;
use crate::input::{InputEvent, InteractionMode, InteractionStateMachine, TouchTracker};
use crate::performance::FrameStats;

pub struct ViewerState {
    pub camera: OrbitCamera,
    pub orientation: ObjectOrientation,
    pub scene: SceneStore,
    pub frame_stats: FrameStats,
    pub lights: LightRig,
    interaction: InteractionStateMachine,
    touches: TouchTracker,
    size: (u32, u32),
}

impl ViewerState {
    /// Builds the initial state. The scene has no drawable until
    /// [`Self::install`] is called with a backend.
    pub fn new(config: &ViewerConfig, now: Instant) -> Self {
        let size = (config.window.width.max(1), config.window.height.max(1));
        let aspect = size.0 as f32 / size.1 as f32;
        Self {
            camera: OrbitCamera::from_config(&config.camera, aspect),
            orientation: ObjectOrientation::new(config.interaction.object_sensitivity),
            scene: SceneStore::new(config.scene),
            frame_stats: FrameStats::new(now),
            lights: LightRig::default(),
            interaction: InteractionStateMachine::new(config.interaction),
            touches: TouchTracker::new(),
            size,
        }
    }

    pub fn install(&mut self, backend: &mut dyn RenderBackend) {
        self.scene.install(backend);
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Routes one input record. Resizes go to [`Self::resize`], everything
    /// else to the interaction state machine.
    pub fn handle_input(&mut self, event: &InputEvent, backend: &mut dyn RenderBackend) -> InteractionMode {
        if let InputEvent::Resize { width, height } = *event {
            self.resize(width, height, backend);
            return self.interaction.mode();
        }
        self.interaction
            .handle(event, &mut self.camera, &mut self.orientation)
    }

    /// Feeds one winit finger update through the touch tracker. Fingers the
    /// tracker never saw going down are dropped.
    pub fn handle_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Vector2<f32>,
        backend: &mut dyn RenderBackend,
    ) -> InteractionMode {
        match self.touches.update(id, phase, position) {
            Some(event) => self.handle_input(&event, backend),
            None => self.interaction.mode(),
        }
    }

    /// Ends any gesture in progress and forgets tracked fingers, whose lifts
    /// may be delivered elsewhere once focus is gone.
    pub fn cancel_interaction(&mut self) {
        self.interaction.cancel();
        self.touches.clear();
    }

    /// Updates projection and surface for a new size. Zero sizes (minimized
    /// windows) and repeats of the current size are ignored; returns whether
    /// anything was reconfigured.
    pub fn resize(&mut self, width: u32, height: u32, backend: &mut dyn RenderBackend) -> bool {
        if width == 0 || height == 0 || (width, height) == self.size {
            return false;
        }
        log::debug!("resize {width}x{height}");
        self.size = (width, height);
        self.camera.resize_projection(width, height);
        backend.on_resize(width, height);
        true
    }

    pub fn apply_change(&mut self, change: ConfigChange, backend: &mut dyn RenderBackend) -> bool {
        self.scene.apply(change, backend)
    }

    pub fn readout(&self) -> Readout {
        Readout {
            fps: self.frame_stats.last_fps(),
            vertex_count: self.scene.vertex_count(),
        }
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            camera_position: self.camera.uniform.eye(),
            look_at: self.camera.look_at_target(),
            view_proj: self.camera.uniform.view_proj_matrix(),
            model: self.orientation.model_matrix(),
            drawable: self.scene.drawable(),
            lights: &self.lights,
            scene: self.scene.config(),
            readout: self.readout(),
        }
    }

    pub fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.scene.teardown(backend);
    }
}

/// Drives one update/draw cycle per call
#[derive(Debug, Clone)]
pub struct RenderLoop {
    timing: AutoRotateTiming,
    started: Instant,
    last_tick: Option<Instant>,
}

impl RenderLoop {
    pub fn new(timing: AutoRotateTiming, now: Instant) -> Self {
        Self {
            timing,
            started: now,
            last_tick: None,
        }
    }

    /// Runs one frame: autorotation, light animation, draw, FPS bookkeeping.
    ///
    /// Returns the frame rate when this frame closed a measurement window.
    /// Skipped frames still advance autorotation but are not counted.
    pub fn tick(
        &mut self,
        state: &mut ViewerState,
        backend: &mut dyn RenderBackend,
        now: Instant,
    ) -> Result<Option<u32>, ViewerError> {
        let frame_units = self.frame_units(now);
        self.last_tick = Some(now);

        let scene = state.scene.config();
        if scene.auto_rotate {
            state
                .orientation
                .apply_auto_rotate(scene.rotation_speed, frame_units);
        }

        let t = now.saturating_duration_since(self.started).as_secs_f32();
        state.lights.animate(t);

        state.camera.update_view_proj();
        match backend.draw(&state.frame_view())? {
            FrameOutcome::Presented => Ok(state.frame_stats.record_frame(now)),
            FrameOutcome::Skipped => Ok(None),
        }
    }

    /// Autorotation steps owed for this frame
    fn frame_units(&self, now: Instant) -> f32 {
        match (self.timing, self.last_tick) {
            (AutoRotateTiming::PerFrame, _) | (_, None) => 1.0,
            (AutoRotateTiming::FrameRateIndependent { reference_fps }, Some(last)) => {
                now.saturating_duration_since(last).as_secs_f32() * reference_fps
            }
        }
    }
}
