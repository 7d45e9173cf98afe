// src/ui/manager.rs
//! ImGui UI manager
//!
//! Handles ImGui integration with wgpu and winit: frame preparation, input
//! capture and drawing the overlay on top of the rendered scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

/// ImGui context, platform glue and renderer
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Sets up ImGui with locked DPI so the overlay scales with physical pixels.
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: 18.0,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Passes pointer and keyboard events to ImGui. Returns true when the
    /// overlay wants the event for itself: pointer events while the cursor is
    /// over a widget, key presses while a text field has focus.
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        let Event::WindowEvent { event: window_event, .. } = event else {
            return false;
        };
        let class = CaptureClass::of(window_event);
        if class == CaptureClass::Ignored {
            return false;
        }

        self.platform
            .handle_event(self.context.io_mut(), window, event);
        let io = self.context.io();
        class.claimed(io.want_capture_mouse, io.want_capture_keyboard)
    }

    /// Builds this frame's UI with `run_ui`.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F)
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(err) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("imgui prepare_frame failed: {err}");
        }

        let ui = self.context.frame();
        run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }
    }

    /// Draws the UI built by the last [`Self::update_logic`] over
    /// `color_attachment`, keeping the scene underneath.
    pub fn render(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();
        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(err) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("imgui render failed: {err:?}");
        }
    }
}

/// Which ImGui capture flag decides whether an event belongs to the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureClass {
    Pointer,
    Keyboard,
    /// Forwarded to ImGui but never claimed
    Passive,
    /// Not forwarded at all
    Ignored,
}

impl CaptureClass {
    fn of(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => CaptureClass::Pointer,
            WindowEvent::KeyboardInput { .. } => CaptureClass::Keyboard,
            WindowEvent::Focused(_) => CaptureClass::Passive,
            _ => CaptureClass::Ignored,
        }
    }

    fn claimed(self, want_mouse: bool, want_keyboard: bool) -> bool {
        match self {
            CaptureClass::Pointer => want_mouse,
            CaptureClass::Keyboard => want_keyboard,
            CaptureClass::Passive | CaptureClass::Ignored => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::{
        dpi::{PhysicalPosition, PhysicalSize},
        event::{DeviceId, MouseScrollDelta, TouchPhase},
    };

    #[test]
    fn test_event_classes() {
        let device_id = DeviceId::dummy();
        let cursor = WindowEvent::CursorMoved {
            device_id,
            position: PhysicalPosition::new(1.0, 2.0),
        };
        let wheel = WindowEvent::MouseWheel {
            device_id,
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: TouchPhase::Moved,
        };
        assert_eq!(CaptureClass::of(&cursor), CaptureClass::Pointer);
        assert_eq!(CaptureClass::of(&wheel), CaptureClass::Pointer);
        assert_eq!(CaptureClass::of(&WindowEvent::Focused(false)), CaptureClass::Passive);
        assert_eq!(
            CaptureClass::of(&WindowEvent::Resized(PhysicalSize::new(10, 10))),
            CaptureClass::Ignored
        );
    }

    #[test]
    fn test_text_focus_does_not_swallow_pointer_events() {
        assert!(!CaptureClass::Pointer.claimed(false, true));
        assert!(CaptureClass::Pointer.claimed(true, false));
    }

    #[test]
    fn test_hovering_panel_does_not_swallow_keys() {
        assert!(!CaptureClass::Keyboard.claimed(true, false));
        assert!(CaptureClass::Keyboard.claimed(false, true));
    }

    #[test]
    fn test_focus_is_never_claimed() {
        assert!(!CaptureClass::Passive.claimed(true, true));
        assert!(!CaptureClass::Ignored.claimed(true, true));
    }
}
