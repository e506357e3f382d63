//! Core body types and constants shared by the registry, generators and focus logic.

use std::fmt;

use bevy::color::Srgba;

/// Orbital angle advanced per unit of angular speed per real second.
///
/// A body with speed 0.01 sweeps 0.005 rad/s, one lap in roughly 21 minutes.
pub const ORBIT_TIME_SCALE: f32 = 0.5;

/// Own-axis rotation added to every body each frame.
pub const AXIS_SPIN_PER_FRAME: f32 = 0.005;

/// Extra own-axis rotation for the focused body each frame.
pub const FOCUSED_SPIN_BONUS: f32 = 0.01;

/// Fallback tint for gas giants whose texture failed to load.
pub const GAS_GIANT_FALLBACK: Srgba = Srgba::rgb(1.0, 0.666_666_7, 0.2);

/// Fallback tint for rocky bodies whose texture failed to load.
pub const ROCKY_FALLBACK: Srgba = Srgba::rgb(0.2, 0.6, 1.0);

/// Stable identity of a body within one registry's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification flags that only influence how a body is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BodyKind {
    pub is_gas_giant: bool,
    pub has_rings: bool,
}

impl BodyKind {
    pub const ROCKY: BodyKind = BodyKind {
        is_gas_giant: false,
        has_rings: false,
    };

    pub const GAS_GIANT: BodyKind = BodyKind {
        is_gas_giant: true,
        has_rings: false,
    };

    pub const RINGED_GAS_GIANT: BodyKind = BodyKind {
        is_gas_giant: true,
        has_rings: true,
    };

    /// Flat color used when a curated or random body's texture cannot be loaded.
    pub fn fallback_color(&self) -> Srgba {
        if self.is_gas_giant {
            GAS_GIANT_FALLBACK
        } else {
            ROCKY_FALLBACK
        }
    }
}

/// Which color replaces a texture that failed to load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFallback {
    /// Derive the color from the body kind (curated and random systems).
    ByKind,
    /// Use the body's own color (user-authored systems).
    OwnColor,
}

/// Everything needed to create one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub radius: f32,
    pub orbital_distance: f32,
    pub angular_speed: f32,
    /// Starting orbital angle in radians.
    pub initial_angle: f32,
    pub kind: BodyKind,
    pub color: Srgba,
    pub texture: Option<String>,
}

impl BodySpec {
    /// A rocky body at angle zero with no texture.
    pub fn new(
        name: impl Into<String>,
        radius: f32,
        orbital_distance: f32,
        angular_speed: f32,
    ) -> Self {
        Self {
            name: name.into(),
            radius,
            orbital_distance,
            angular_speed,
            initial_angle: 0.0,
            kind: BodyKind::default(),
            color: Srgba::WHITE,
            texture: None,
        }
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_color(mut self, color: Srgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.initial_angle = angle;
        self
    }
}

/// Position on a circular orbit in the XZ plane.
pub fn orbit_position(angle: f32, orbital_distance: f32) -> bevy::math::Vec3 {
    bevy::math::Vec3::new(angle.cos() * orbital_distance, 0.0, angle.sin() * orbital_distance)
}

/// Parse a `#rrggbb` color as written by the system editor and the saved-system store.
pub fn parse_hex_color(text: &str) -> Option<Srgba> {
    Srgba::hex(text.trim()).ok()
}

/// Format a color as lowercase `#rrggbb`, dropping alpha.
pub fn to_hex_color(color: Srgba) -> String {
    Srgba { alpha: 1.0, ..color }.to_hex().to_lowercase()
}
