// src/ui/panel.rs
//! Control panel and stats overlay
//!
//! The panel never mutates the scene directly. Every widget edit becomes a
//! [`ConfigChange`] that the app applies through the scene store.

use imgui::{Condition, Ui};

use crate::gfx::rendering::Readout;
use crate::gfx::scene::config::{
    format_count, format_exponent, format_rotation_speed, ConfigChange, GeometryKind, MaterialKind,
    Rgb, SceneConfig,
};

pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 5.0);
pub const SKY_EXPONENT_RANGE: (f32, f32) = (0.1, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkyStop {
    Top,
    Horizon,
    Bottom,
}

impl SkyStop {
    const ALL: [SkyStop; 3] = [SkyStop::Top, SkyStop::Horizon, SkyStop::Bottom];

    fn label(self) -> &'static str {
        match self {
            SkyStop::Top => "Top Color",
            SkyStop::Horizon => "Horizon Color",
            SkyStop::Bottom => "Bottom Color",
        }
    }

    fn change(self, color: Rgb) -> ConfigChange {
        match self {
            SkyStop::Top => ConfigChange::SkyTopColor(color),
            SkyStop::Horizon => ConfigChange::SkyHorizonColor(color),
            SkyStop::Bottom => ConfigChange::SkyBottomColor(color),
        }
    }
}

/// Reads a `#rrggbb` field, logging and discarding anything else.
fn parse_color_input(text: &str) -> Option<Rgb> {
    match Rgb::parse_hex(text) {
        Ok(color) => Some(color),
        Err(err) => {
            log::warn!("ignoring color input: {err}");
            None
        }
    }
}

fn combo_index<T: PartialEq>(all: &[T], current: &T) -> usize {
    all.iter().position(|item| item == current).unwrap_or(0)
}

/// Widget state that outlives a single frame
#[derive(Debug, Default)]
pub struct ControlPanel {
    /// Hex text fields for the sky stops, refreshed from the scene when not
    /// being edited
    hex_inputs: [String; 3],
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the panel and pushes one change per edited widget.
    pub fn draw(&mut self, ui: &Ui, scene: &SceneConfig, changes: &mut Vec<ConfigChange>) {
        ui.window("Controls")
            .size([320.0, 0.0], Condition::FirstUseEver)
            .position([16.0, 16.0], Condition::FirstUseEver)
            .collapsible(true)
            .build(|| {
                self.draw_object_section(ui, scene, changes);
                if scene.skybox().is_some() {
                    ui.separator();
                    self.draw_sky_section(ui, scene, changes);
                }
            });
    }

    fn draw_object_section(&self, ui: &Ui, scene: &SceneConfig, changes: &mut Vec<ConfigChange>) {
        let mut speed = scene.rotation_speed;
        if ui
            .slider_config("Rotation Speed", ROTATION_SPEED_RANGE.0, ROTATION_SPEED_RANGE.1)
            .display_format(format_rotation_speed(speed))
            .build(&mut speed)
        {
            changes.push(ConfigChange::RotationSpeed(speed));
        }

        let geometry_labels = GeometryKind::ALL.map(GeometryKind::label);
        let mut geometry = combo_index(&GeometryKind::ALL, &scene.geometry);
        if ui.combo_simple_string("Geometry", &mut geometry, &geometry_labels) {
            changes.push(ConfigChange::Geometry(GeometryKind::ALL[geometry]));
        }

        let material_labels = MaterialKind::ALL.map(MaterialKind::label);
        let mut material = combo_index(&MaterialKind::ALL, &scene.material);
        if ui.combo_simple_string("Material", &mut material, &material_labels) {
            changes.push(ConfigChange::Material(MaterialKind::ALL[material]));
        }

        let mut wireframe = scene.wireframe;
        if ui.checkbox("Wireframe", &mut wireframe) {
            changes.push(ConfigChange::Wireframe(wireframe));
        }

        let mut auto_rotate = scene.auto_rotate;
        if ui.checkbox("Auto Rotate", &mut auto_rotate) {
            changes.push(ConfigChange::AutoRotate(auto_rotate));
        }
    }

    fn draw_sky_section(&mut self, ui: &Ui, scene: &SceneConfig, changes: &mut Vec<ConfigChange>) {
        let Some(sky) = scene.skybox() else {
            return;
        };
        if !ui.collapsing_header("Skybox", imgui::TreeNodeFlags::DEFAULT_OPEN) {
            return;
        }

        for (stop, hex_input) in SkyStop::ALL.into_iter().zip(self.hex_inputs.iter_mut()) {
            let current = match stop {
                SkyStop::Top => sky.top,
                SkyStop::Horizon => sky.horizon,
                SkyStop::Bottom => sky.bottom,
            };

            let mut rgb = current.to_array();
            if ui.color_edit3(stop.label(), &mut rgb) {
                changes.push(stop.change(Rgb::from(rgb)));
            }

            let _id = ui.push_id(stop.label());
            let editing = ui
                .input_text("##hex", hex_input)
                .enter_returns_true(true)
                .build();
            if editing {
                if let Some(color) = parse_color_input(hex_input) {
                    changes.push(stop.change(color));
                }
            } else if !ui.is_item_active() {
                *hex_input = current.to_string();
            }
        }

        let mut exponent = sky.exponent;
        if ui
            .slider_config("Gradient Exponent", SKY_EXPONENT_RANGE.0, SKY_EXPONENT_RANGE.1)
            .display_format(format_exponent(exponent))
            .build(&mut exponent)
        {
            changes.push(ConfigChange::SkyExponent(exponent));
        }
    }
}

/// Frame rate and vertex count in the top-right corner
pub fn stats_overlay(ui: &Ui, readout: &Readout) {
    let [display_width, _] = ui.io().display_size;
    ui.window("Stats")
        .position([display_width - 16.0, 16.0], Condition::Always)
        .position_pivot([1.0, 0.0])
        .always_auto_resize(true)
        .no_decoration()
        .no_inputs()
        .bg_alpha(0.3)
        .build(|| {
            ui.text(stats_lines(readout));
        });
}

fn stats_lines(readout: &Readout) -> String {
    let fps = readout
        .fps
        .map_or_else(|| "--".to_string(), |fps| fps.to_string());
    format!(
        "FPS: {fps}\nVertices: {}",
        format_count(readout.vertex_count)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_lines() {
        let readout = Readout {
            fps: Some(60),
            vertex_count: 4257,
        };
        assert_eq!(stats_lines(&readout), "FPS: 60\nVertices: 4,257");
        assert_eq!(
            stats_lines(&Readout::default()),
            "FPS: --\nVertices: 0"
        );
    }

    #[test]
    fn test_parse_color_input() {
        assert_eq!(parse_color_input("#ff0000"), Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(parse_color_input("red"), None);
    }

    #[test]
    fn test_combo_index_tracks_scene() {
        assert_eq!(combo_index(&GeometryKind::ALL, &GeometryKind::TorusKnot), 0);
        assert_eq!(combo_index(&MaterialKind::ALL, &MaterialKind::Glass), 3);
    }

    #[test]
    fn test_sky_stop_changes() {
        let color = Rgb::new(0.5, 0.5, 0.5);
        assert_eq!(SkyStop::Horizon.change(color), ConfigChange::SkyHorizonColor(color));
        assert_eq!(SkyStop::ALL.len(), 3);
    }
}
