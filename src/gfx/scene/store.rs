//! Scene configuration store
//!
//! Owns the live [`SceneConfig`] and the single drawable built from it. Changes
//! that alter the shape or material swap the drawable; everything else is a
//! plain field update read by the renderer on the next frame.

use crate::gfx::rendering::RenderBackend;
use crate::gfx::scene::config::{Backdrop, ConfigChange, SceneConfig};
use crate::gfx::scene::drawable::Drawable;

#[derive(Debug)]
pub struct SceneStore {
    config: SceneConfig,
    drawable: Option<Drawable>,
}

impl SceneStore {
    /// Creates a store with no drawable; call [`Self::install`] once a backend
    /// is available.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            drawable: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    /// Vertex count of the live drawable, 0 before installation
    pub fn vertex_count(&self) -> usize {
        self.drawable.as_ref().map_or(0, Drawable::vertex_count)
    }

    /// Builds the drawable for the current configuration, replacing any
    /// existing one.
    pub fn install(&mut self, backend: &mut dyn RenderBackend) {
        self.rebuild(backend);
    }

    /// Applies one edit from the control surface.
    ///
    /// Returns `true` when the configuration actually changed.
    pub fn apply(&mut self, change: ConfigChange, backend: &mut dyn RenderBackend) -> bool {
        log::debug!("config change: {change:?}");
        match change {
            ConfigChange::Geometry(kind) => {
                if self.config.geometry == kind {
                    return false;
                }
                self.config.geometry = kind;
                self.rebuild(backend);
            }
            ConfigChange::Material(kind) => {
                if self.config.material == kind {
                    return false;
                }
                self.config.material = kind;
                self.rebuild(backend);
            }
            ConfigChange::Wireframe(enabled) => {
                if self.config.wireframe == enabled {
                    return false;
                }
                self.config.wireframe = enabled;
                if let Some(drawable) = self.drawable.as_mut() {
                    drawable.set_wireframe(enabled);
                }
            }
            ConfigChange::AutoRotate(enabled) => {
                if self.config.auto_rotate == enabled {
                    return false;
                }
                self.config.auto_rotate = enabled;
            }
            ConfigChange::RotationSpeed(speed) => {
                let speed = clamp_non_negative(speed);
                if self.config.rotation_speed == speed {
                    return false;
                }
                self.config.rotation_speed = speed;
            }
            ConfigChange::SkyTopColor(_)
            | ConfigChange::SkyHorizonColor(_)
            | ConfigChange::SkyBottomColor(_)
            | ConfigChange::SkyExponent(_) => return self.apply_sky(change),
        }
        true
    }

    fn apply_sky(&mut self, change: ConfigChange) -> bool {
        let Backdrop::Skybox(gradient) = &mut self.config.backdrop else {
            log::debug!("ignoring {change:?}: no skybox in this variant");
            return false;
        };
        let before = *gradient;
        match change {
            ConfigChange::SkyTopColor(color) => gradient.top = color,
            ConfigChange::SkyHorizonColor(color) => gradient.horizon = color,
            ConfigChange::SkyBottomColor(color) => gradient.bottom = color,
            ConfigChange::SkyExponent(exponent) => gradient.exponent = clamp_non_negative(exponent),
            _ => {}
        }
        *gradient != before
    }

    /// Releases the live drawable before creating its replacement, so at most
    /// one set of GPU buffers exists at any time.
    fn rebuild(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(old) = self.drawable.take() {
            log::debug!("releasing drawable {:?}", old.id());
            backend.release_drawable(old);
        }
        let mut drawable = backend.create_drawable(self.config.geometry, self.config.material);
        drawable.set_wireframe(self.config.wireframe);
        log::debug!(
            "installed {} / {} ({} vertices)",
            self.config.geometry.tag(),
            self.config.material.tag(),
            drawable.vertex_count()
        );
        self.drawable = Some(drawable);
    }

    /// Releases the drawable; the store is empty afterwards.
    pub fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(drawable) = self.drawable.take() {
            backend.release_drawable(drawable);
        }
    }
}

/// Negative and NaN inputs become 0.
fn clamp_non_negative(value: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::recording::{BackendCall, RecordingBackend};
    use crate::gfx::scene::config::{FogSettings, GeometryKind, MaterialKind, Rgb};

    fn installed(config: SceneConfig) -> (SceneStore, RecordingBackend) {
        let mut backend = RecordingBackend::new();
        let mut store = SceneStore::new(config);
        store.install(&mut backend);
        (store, backend)
    }

    #[test]
    fn test_install_creates_default_drawable() {
        let (store, backend) = installed(SceneConfig::default());
        assert_eq!(backend.creates(), 1);
        assert_eq!(store.vertex_count(), 4257);
        assert_eq!(store.drawable().map(Drawable::geometry), Some(GeometryKind::TorusKnot));
    }

    #[test]
    fn test_geometry_change_releases_before_creating() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        let old = store.drawable().map(Drawable::id);

        assert!(store.apply(ConfigChange::Geometry(GeometryKind::Octahedron), &mut backend));

        let tail = &backend.calls[backend.calls.len() - 2..];
        assert_eq!(tail[0], BackendCall::Release(old.unwrap()));
        assert!(matches!(
            tail[1],
            BackendCall::Create(_, GeometryKind::Octahedron, MaterialKind::Standard)
        ));
        assert_eq!(backend.live.len(), 1);
        assert_eq!(store.vertex_count(), 216);
    }

    #[test]
    fn test_exactly_one_drawable_live_across_changes() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        for kind in GeometryKind::ALL {
            store.apply(ConfigChange::Geometry(kind), &mut backend);
            for material in MaterialKind::ALL {
                store.apply(ConfigChange::Material(material), &mut backend);
                assert_eq!(backend.live.len(), 1);
            }
        }
        assert_eq!(backend.creates(), backend.releases() + 1);

        store.teardown(&mut backend);
        assert!(backend.live.is_empty());
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn test_unchanged_kind_keeps_drawable() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        assert!(!store.apply(ConfigChange::Geometry(GeometryKind::TorusKnot), &mut backend));
        assert_eq!(backend.creates(), 1);
    }

    #[test]
    fn test_wireframe_toggles_in_place() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        let id = store.drawable().map(Drawable::id);

        store.apply(ConfigChange::Wireframe(true), &mut backend);
        assert_eq!(backend.creates(), 1);
        assert_eq!(store.drawable().map(Drawable::id), id);
        assert_eq!(store.drawable().map(Drawable::wireframe), Some(true));

        // A later rebuild keeps the flag
        store.apply(ConfigChange::Material(MaterialKind::Glass), &mut backend);
        assert_eq!(store.drawable().map(Drawable::wireframe), Some(true));
    }

    #[test]
    fn test_numeric_inputs_are_clamped() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        store.apply(ConfigChange::RotationSpeed(-3.0), &mut backend);
        assert_eq!(store.config().rotation_speed, 0.0);
        store.apply(ConfigChange::SkyExponent(f32::NAN), &mut backend);
        assert_eq!(store.config().skybox().map(|g| g.exponent), Some(0.0));
    }

    #[test]
    fn test_sky_changes_update_gradient() {
        let (mut store, mut backend) = installed(SceneConfig::default());
        let red = Rgb::from_hex(0xff0000);
        assert!(store.apply(ConfigChange::SkyTopColor(red), &mut backend));
        assert!(store.apply(ConfigChange::SkyExponent(3.5), &mut backend));
        let gradient = store.config().skybox().copied().unwrap();
        assert_eq!(gradient.top, red);
        assert_eq!(gradient.exponent, 3.5);
    }

    #[test]
    fn test_sky_changes_ignored_under_fog() {
        let config = SceneConfig {
            backdrop: Backdrop::Fog(FogSettings::default()),
            ..Default::default()
        };
        let (mut store, mut backend) = installed(config);
        assert!(!store.apply(ConfigChange::SkyHorizonColor(Rgb::WHITE), &mut backend));
        assert_eq!(store.config().backdrop, Backdrop::Fog(FogSettings::default()));
    }
}
