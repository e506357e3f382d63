//! System generators: recipes that replace the registry's contents.
//!
//! Three kinds of recipe:
//! - Random: 3 to 8 procedurally drawn bodies in non-overlapping distance bands
//! - Curated: a fixed table (see [`presets`])
//! - Custom: user-authored entries, also used to restore saved systems
//!
//! Every recipe clears the registry before populating it, inside one call.

pub mod presets;

use std::f32::consts::TAU;
use std::ops::{Range, RangeInclusive};

use bevy::color::Srgba;
use bevy::log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};
use crate::registry::BodyRegistry;
use crate::scene::SceneRenderer;
use crate::types::{BodyKind, BodySpec, TextureFallback, parse_hex_color, to_hex_color};

pub use presets::{PRESETS, REAL_SOLAR_SYSTEM, STAR_WARS};

/// Number of bodies a random system draws, inclusive.
pub const RANDOM_BODY_COUNT: RangeInclusive<usize> = 3..=8;

/// Radius range for random bodies.
pub const RANDOM_RADIUS: Range<f32> = 1.0..3.0;

/// Angular speed range for random bodies.
pub const RANDOM_SPEED: Range<f32> = 0.01..0.03;

/// Distance of the innermost band's lower edge.
pub const FIRST_BAND: f32 = 14.0;

/// Gap between the lower edges of consecutive bands.
pub const BAND_SPACING: f32 = 9.0;

/// Jitter added inside a band; kept below [`BAND_SPACING`] so bands never overlap.
pub const BAND_JITTER: f32 = 3.0;

/// Chance that a random body is a gas giant.
pub const GAS_GIANT_PROBABILITY: f64 = 0.3;

/// Chance that a random gas giant carries rings.
pub const RING_PROBABILITY: f64 = 0.5;

/// One row of a curated table.
#[derive(Clone, Copy, Debug)]
pub struct PresetBody {
    pub name: &'static str,
    pub radius: f32,
    pub distance: f32,
    pub speed: f32,
    pub kind: BodyKind,
    /// 0xRRGGBB
    pub color: u32,
    /// Empty for none.
    pub texture: &'static str,
}

impl PresetBody {
    pub fn to_spec(&self) -> BodySpec {
        let [_, r, g, b] = self.color.to_be_bytes();
        let spec = BodySpec::new(self.name, self.radius, self.distance, self.speed)
            .with_kind(self.kind)
            .with_color(Srgba::rgb_u8(r, g, b));
        if self.texture.is_empty() {
            spec
        } else {
            spec.with_texture(self.texture)
        }
    }
}

/// A curated system.
#[derive(Debug)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub star: PresetBody,
    pub bodies: &'static [PresetBody],
}

/// Get a preset by id.
pub fn get_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().copied().find(|preset| preset.id == id)
}

/// One user-authored body, as entered in the system editor and as persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBody {
    pub name: String,
    pub size: f32,
    pub distance: f32,
    pub speed: f32,
    /// `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub is_gas_giant: bool,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

impl CustomBody {
    fn validate(&self) -> Result<BodySpec> {
        let invalid = |reason| OrreryError::InvalidBody {
            name: self.name.clone(),
            reason,
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(invalid("size must be positive"));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(invalid("distance must not be negative"));
        }
        if !self.speed.is_finite() {
            return Err(invalid("speed must be finite"));
        }
        let color = parse_hex_color(&self.color)
            .ok_or_else(|| OrreryError::InvalidColor(self.color.clone()))?;

        let spec = BodySpec::new(self.name.trim(), self.size, self.distance, self.speed)
            .with_kind(BodyKind {
                is_gas_giant: self.is_gas_giant,
                has_rings: self.has_rings,
            })
            .with_color(color);
        Ok(match self.texture.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => spec.with_texture(url),
            _ => spec,
        })
    }
}

impl<H> From<&crate::registry::Body<H>> for CustomBody {
    fn from(body: &crate::registry::Body<H>) -> Self {
        Self {
            name: body.name.clone(),
            size: body.radius,
            distance: body.orbital_distance,
            speed: body.angular_speed,
            color: to_hex_color(body.color),
            is_gas_giant: body.kind.is_gas_giant,
            has_rings: body.kind.has_rings,
            texture: body.texture.clone(),
        }
    }
}

/// A user-authored system.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomSystem {
    pub name: String,
    pub bodies: Vec<CustomBody>,
}

/// What to build on the next regeneration.
#[derive(Clone, Debug)]
pub enum SystemRecipe {
    Random,
    Curated(&'static Preset),
    Custom(CustomSystem),
}

impl SystemRecipe {
    /// Short name for logs and the status line.
    pub fn label(&self) -> &str {
        match self {
            SystemRecipe::Random => "Random system",
            SystemRecipe::Curated(preset) => preset.name,
            SystemRecipe::Custom(system) => &system.name,
        }
    }
}

/// Star used by random and custom systems.
pub fn default_star() -> BodySpec {
    BodySpec::new("Sun", 5.0, 0.0, 0.0).with_color(Srgba::rgb_u8(0xff, 0xcc, 0x00))
}

/// Check a recipe without touching any registry.
pub fn validate_recipe(recipe: &SystemRecipe) -> Result<()> {
    if let SystemRecipe::Custom(system) = recipe {
        for body in &system.bodies {
            body.validate()?;
        }
    }
    Ok(())
}

/// Replace the registry's contents according to `recipe`.
///
/// Custom input is validated before anything is cleared, so a bad entry
/// leaves the current system in place. Returns the number of orbiting bodies.
pub fn generate<H, S, R>(
    recipe: &SystemRecipe,
    registry: &mut BodyRegistry<H>,
    scene: &mut S,
    rng: &mut R,
) -> Result<usize>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
    R: Rng + ?Sized,
{
    let (star, bodies, fallback) = match recipe {
        SystemRecipe::Random => (default_star(), random_specs(rng), TextureFallback::ByKind),
        SystemRecipe::Curated(preset) => (
            preset.star.to_spec(),
            preset.bodies.iter().map(PresetBody::to_spec).collect(),
            TextureFallback::ByKind,
        ),
        SystemRecipe::Custom(system) => (
            default_star(),
            system.bodies.iter().map(CustomBody::validate).collect::<Result<Vec<_>>>()?,
            TextureFallback::OwnColor,
        ),
    };

    registry.clear(scene);
    registry.set_star(&star, scene);
    for spec in &bodies {
        registry.add_body(spec, fallback, scene);
    }

    info!("Generated {}: {} bodies around {}", recipe.label(), bodies.len(), star.name);
    Ok(bodies.len())
}

/// Draw the body list of a random system.
pub fn random_specs<R: Rng + ?Sized>(rng: &mut R) -> Vec<BodySpec> {
    let count = rng.gen_range(RANDOM_BODY_COUNT);
    (0..count)
        .map(|i| {
            let radius = rng.gen_range(RANDOM_RADIUS);
            let color = Srgba::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen());
            let speed = rng.gen_range(RANDOM_SPEED);
            let distance = FIRST_BAND + i as f32 * BAND_SPACING + rng.gen_range(0.0..BAND_JITTER);
            let is_gas_giant = rng.gen_bool(GAS_GIANT_PROBABILITY);
            let has_rings = is_gas_giant && rng.gen_bool(RING_PROBABILITY);

            BodySpec::new(format!("Planet {}", i + 1), radius, distance, speed)
                .with_kind(BodyKind { is_gas_giant, has_rings })
                .with_color(color)
                .with_angle(rng.gen_range(0.0..TAU))
        })
        .collect()
}
