//! Scene configuration: what is displayed and how
//!
//! Geometry and material kinds are closed enums. Tags coming from the control
//! surface are resolved with an explicit fallback arm rather than an error, so a
//! bad tag never leaves the viewer without a drawable.

use std::fmt;

use crate::error::ColorParseError;

/// Shape of the displayed solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryKind {
    #[default]
    TorusKnot,
    Sphere,
    Dodecahedron,
    Octahedron,
    Icosahedron,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::TorusKnot,
        GeometryKind::Sphere,
        GeometryKind::Dodecahedron,
        GeometryKind::Octahedron,
        GeometryKind::Icosahedron,
    ];

    /// Resolves a control-surface tag, falling back to the torus knot.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "torusKnot" => GeometryKind::TorusKnot,
            "sphere" => GeometryKind::Sphere,
            "dodecahedron" => GeometryKind::Dodecahedron,
            "octahedron" => GeometryKind::Octahedron,
            "icosahedron" => GeometryKind::Icosahedron,
            other => {
                log::warn!("unknown geometry tag {other:?}, using torusKnot");
                GeometryKind::default()
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            GeometryKind::TorusKnot => "torusKnot",
            GeometryKind::Sphere => "sphere",
            GeometryKind::Dodecahedron => "dodecahedron",
            GeometryKind::Octahedron => "octahedron",
            GeometryKind::Icosahedron => "icosahedron",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeometryKind::TorusKnot => "Torus Knot",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Dodecahedron => "Dodecahedron",
            GeometryKind::Octahedron => "Octahedron",
            GeometryKind::Icosahedron => "Icosahedron",
        }
    }
}

/// Surface material preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialKind {
    #[default]
    Standard,
    Physical,
    Metallic,
    Glass,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Standard,
        MaterialKind::Physical,
        MaterialKind::Metallic,
        MaterialKind::Glass,
    ];

    /// Resolves a control-surface tag, falling back to the standard material.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "standard" => MaterialKind::Standard,
            "physical" => MaterialKind::Physical,
            "metallic" => MaterialKind::Metallic,
            "glass" => MaterialKind::Glass,
            other => {
                log::warn!("unknown material tag {other:?}, using standard");
                MaterialKind::default()
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            MaterialKind::Standard => "standard",
            MaterialKind::Physical => "physical",
            MaterialKind::Metallic => "metallic",
            MaterialKind::Glass => "glass",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Standard => "Standard",
            MaterialKind::Physical => "Physical",
            MaterialKind::Metallic => "Metallic",
            MaterialKind::Glass => "Glass",
        }
    }
}

/// sRGB color with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb`, `rrggbb` or `0xrrggbb`.
    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);
        if digits.len() != 6 {
            return Err(ColorParseError::Length(digits.len(), text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorParseError::Digits(text.to_string()))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// sRGB-encoded components converted to linear light
    pub fn to_linear(self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// Vertical three-stop gradient painted on the skybox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyboxGradient {
    pub top: Rgb,
    pub horizon: Rgb,
    pub bottom: Rgb,
    pub exponent: f32,
}

impl Default for SkyboxGradient {
    fn default() -> Self {
        Self {
            top: Rgb::from_hex(0x1e3c72),
            horizon: Rgb::from_hex(0x7e22ce),
            bottom: Rgb::from_hex(0x2a5298),
            exponent: 2.0,
        }
    }
}

impl SkyboxGradient {
    /// Color seen along a view direction with normalized height `h` in -1..=1
    pub fn sample(&self, h: f32) -> Rgb {
        let (far, t) = if h > 0.0 {
            (self.top, h.powf(self.exponent))
        } else {
            (self.bottom, (-h).powf(self.exponent))
        };
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rgb::new(
            mix(self.horizon.r, far.r),
            mix(self.horizon.g, far.g),
            mix(self.horizon.b, far.b),
        )
    }
}

/// Linear distance fog used by the fixed-camera variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogSettings {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            color: Rgb::from_hex(0x1a1a2e),
            near: 4.0,
            far: 12.0,
        }
    }
}

/// What is drawn behind the object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    Skybox(SkyboxGradient),
    Fog(FogSettings),
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::Skybox(SkyboxGradient::default())
    }
}

/// Everything the control surface can change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub geometry: GeometryKind,
    pub material: MaterialKind,
    pub wireframe: bool,
    pub auto_rotate: bool,
    pub rotation_speed: f32,
    pub backdrop: Backdrop,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryKind::TorusKnot,
            material: MaterialKind::Standard,
            wireframe: false,
            auto_rotate: true,
            rotation_speed: 1.0,
            backdrop: Backdrop::default(),
        }
    }
}

impl SceneConfig {
    pub fn skybox(&self) -> Option<&SkyboxGradient> {
        match &self.backdrop {
            Backdrop::Skybox(gradient) => Some(gradient),
            Backdrop::Fog(_) => None,
        }
    }
}

/// A single edit emitted by the control surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigChange {
    RotationSpeed(f32),
    Geometry(GeometryKind),
    Material(MaterialKind),
    Wireframe(bool),
    AutoRotate(bool),
    SkyTopColor(Rgb),
    SkyHorizonColor(Rgb),
    SkyBottomColor(Rgb),
    SkyExponent(f32),
}

/// Formats a count with comma thousands separators ("4,257").
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rotation speed label, e.g. "1.5x"
pub fn format_rotation_speed(speed: f32) -> String {
    format!("{speed:.1}x")
}

/// Gradient exponent label, e.g. "2.0"
pub fn format_exponent(exponent: f32) -> String {
    format!("{exponent:.1}")
}
