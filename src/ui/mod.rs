//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the scene: a control panel that edits
//! the [`SceneConfig`] and a small stats readout.
//!
//! ## Architecture
//!
//! - [`UiManager`] handles ImGui integration with winit and wgpu
//! - [`panel`] holds the control panel and the stats overlay
//! - [`UiLayer`] ties both to a window and queues the edits made each frame
//!
//! The panel never touches the scene itself. Edits are collected as
//! [`ConfigChange`]s and drained by the app with [`UiLayer::take_changes`],
//! which keeps every mutation on the event-loop thread and in one place.
//!
//! ## Input Handling
//!
//! Pointer events the overlay claims (a drag on a slider, a click on the
//! panel) are reported as captured and must not reach the camera or object
//! controls.

pub mod manager;
pub mod panel;

use std::sync::Arc;

use winit::{
    event::{Event, WindowEvent},
    window::{Window, WindowId},
};

use crate::gfx::rendering::Readout;
use crate::gfx::scene::config::{ConfigChange, SceneConfig};

// Re-export main types
pub use manager::UiManager;
pub use panel::{stats_overlay, ControlPanel};

/// UI manager, panel state and pending edits for one window
pub struct UiLayer {
    manager: UiManager,
    panel: ControlPanel,
    window: Arc<Window>,
    pending: Vec<ConfigChange>,
}

impl UiLayer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        window: Arc<Window>,
    ) -> Self {
        Self {
            manager: UiManager::new(device, queue, format, &window),
            panel: ControlPanel::new(),
            window,
            pending: Vec::new(),
        }
    }

    /// Returns true when the overlay captured the event.
    pub fn handle_event(&mut self, window_id: WindowId, event: &WindowEvent) -> bool {
        let event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        self.manager.handle_input(&self.window, &event)
    }

    /// Lays out this frame's widgets.
    pub fn build(&mut self, scene: &SceneConfig, readout: &Readout) {
        let Self {
            manager,
            panel,
            window,
            pending,
        } = self;
        manager.update_logic(window, |ui| {
            panel.draw(ui, scene, pending);
            stats_overlay(ui, readout);
        });
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        self.manager.render(device, queue, encoder, view);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.manager.update_display_size(width, height);
    }

    /// Drains the edits made since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<ConfigChange> {
        std::mem::take(&mut self.pending)
    }
}
