//! Viewer configuration
//!
//! Defaults reproduce the reference viewer. A few settings can be overridden
//! from the environment:
//!
//! - `SPINDLE_VARIANT`: `orbit` / `skybox` (default) or `fixed` / `fog`
//! - `SPINDLE_VSYNC`: `0` or `false` disables vsync

use std::f32::consts::{FRAC_PI_2, PI};

use crate::gfx::scene::config::{Backdrop, FogSettings, SceneConfig, SkyboxGradient};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spindle".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Which flavour of the viewer to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerVariant {
    /// Orbiting camera in front of a gradient skybox
    #[default]
    OrbitSkybox,
    /// Camera parked on the +Z axis, object fading into fog
    FixedFog,
}

impl ViewerVariant {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "orbit" | "skybox" => Some(ViewerVariant::OrbitSkybox),
            "fixed" | "fog" => Some(ViewerVariant::FixedFog),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Closest the polar angle may get to either pole
    pub polar_margin: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            azimuth: 0.0,
            polar: FRAC_PI_2,
            min_distance: 2.0,
            max_distance: 20.0,
            polar_margin: 0.1,
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Largest polar angle the camera may reach
    pub fn max_polar(&self) -> f32 {
        PI - self.polar_margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Object radians per dragged pixel
    pub object_sensitivity: f32,
    /// Camera radians per dragged pixel
    pub orbit_sensitivity: f32,
    /// Distance units per wheel pixel or pinch pixel
    pub zoom_sensitivity: f32,
    /// Pixels per wheel line for line-based scroll devices
    pub wheel_line_height: f32,
    /// When false, secondary drags, two-finger gestures and the wheel are
    /// ignored.
    pub camera_orbit: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            object_sensitivity: 0.01,
            orbit_sensitivity: 0.01,
            zoom_sensitivity: 0.01,
            wheel_line_height: 100.0,
            camera_orbit: true,
        }
    }
}

/// How autorotation advances
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoRotateTiming {
    /// One step per rendered frame, so the spin speed follows the frame rate
    #[default]
    PerFrame,
    /// Steps scaled by elapsed time so the speed matches `reference_fps`
    FrameRateIndependent { reference_fps: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub variant: ViewerVariant,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub auto_rotate_timing: AutoRotateTiming,
    /// FIFO presentation; the frame rate follows the display refresh
    pub vsync: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::for_variant(ViewerVariant::default())
    }
}

impl ViewerConfig {
    /// Reference settings for a variant
    pub fn for_variant(variant: ViewerVariant) -> Self {
        let mut config = Self {
            window: WindowConfig::default(),
            variant,
            scene: SceneConfig::default(),
            camera: CameraConfig::default(),
            interaction: InteractionConfig::default(),
            auto_rotate_timing: AutoRotateTiming::default(),
            vsync: true,
        };
        match variant {
            ViewerVariant::OrbitSkybox => {
                config.scene.backdrop = Backdrop::Skybox(SkyboxGradient::default());
            }
            ViewerVariant::FixedFog => {
                config.scene.backdrop = Backdrop::Fog(FogSettings::default());
                // Looking down -Z from (0, 0, 5)
                config.camera.azimuth = FRAC_PI_2;
                config.interaction.camera_orbit = false;
            }
        }
        config
    }

    /// Defaults adjusted by `SPINDLE_VARIANT` and `SPINDLE_VSYNC`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let variant = match lookup("SPINDLE_VARIANT") {
            Some(value) => ViewerVariant::parse(&value).unwrap_or_else(|| {
                log::warn!("unknown SPINDLE_VARIANT {value:?}, using orbit");
                ViewerVariant::default()
            }),
            None => ViewerVariant::default(),
        };
        let mut config = Self::for_variant(variant);
        if let Some(value) = lookup("SPINDLE_VSYNC") {
            config.vsync = !matches!(value.trim(), "0" | "false" | "off");
        }
        config
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_auto_rotate_timing(mut self, timing: AutoRotateTiming) -> Self {
        self.auto_rotate_timing = timing;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}
