//! Curated system tables.
//!
//! Each preset is a fixed, ordered list iterated without randomness.
//! Texture paths are relative to the asset folder; missing files fall back
//! to the gas giant / rocky tint.

use crate::types::BodyKind;

use super::{Preset, PresetBody};

/// All curated presets, in menu order.
pub static PRESETS: &[&Preset] = &[&REAL_SOLAR_SYSTEM, &STAR_WARS];

/// The eight planets, compressed to fit on screen.
pub static REAL_SOLAR_SYSTEM: Preset = Preset {
    id: "real",
    name: "Solar System",
    description: "Mercury to Neptune around the Sun.",
    star: PresetBody {
        name: "Sun",
        radius: 5.0,
        distance: 0.0,
        speed: 0.0,
        kind: BodyKind::ROCKY,
        color: 0xffcc00,
        texture: "",
    },
    bodies: &[
        PresetBody {
            name: "Mercury",
            radius: 0.8,
            distance: 20.0,
            speed: 0.02,
            kind: BodyKind::ROCKY,
            color: 0xaaaaaa,
            texture: "textures/2k_mercury.jpg",
        },
        PresetBody {
            name: "Venus",
            radius: 1.2,
            distance: 30.0,
            speed: 0.015,
            kind: BodyKind::ROCKY,
            color: 0xe6c229,
            texture: "textures/2k_venus_surface.jpg",
        },
        PresetBody {
            name: "Earth",
            radius: 1.3,
            distance: 40.0,
            speed: 0.01,
            kind: BodyKind::ROCKY,
            color: 0x3498db,
            texture: "textures/2k_earth_daymap.jpg",
        },
        PresetBody {
            name: "Mars",
            radius: 1.1,
            distance: 50.0,
            speed: 0.008,
            kind: BodyKind::ROCKY,
            color: 0xe67e22,
            texture: "textures/2k_mars.jpg",
        },
        PresetBody {
            name: "Jupiter",
            radius: 2.8,
            distance: 70.0,
            speed: 0.004,
            kind: BodyKind::GAS_GIANT,
            color: 0xf1c40f,
            texture: "textures/2k_jupiter.jpg",
        },
        PresetBody {
            name: "Saturn",
            radius: 2.3,
            distance: 90.0,
            speed: 0.003,
            kind: BodyKind::RINGED_GAS_GIANT,
            color: 0xf39c12,
            texture: "textures/2k_saturn.jpg",
        },
        PresetBody {
            name: "Uranus",
            radius: 1.8,
            distance: 110.0,
            speed: 0.002,
            kind: BodyKind::GAS_GIANT,
            color: 0x1abc9c,
            texture: "textures/2k_uranus.jpg",
        },
        PresetBody {
            name: "Neptune",
            radius: 1.7,
            distance: 130.0,
            speed: 0.0018,
            kind: BodyKind::GAS_GIANT,
            color: 0x3498db,
            texture: "textures/2k_neptune.jpg",
        },
    ],
};

/// Themed system orbiting a battle station.
pub static STAR_WARS: Preset = Preset {
    id: "star_wars",
    name: "Star Wars",
    description: "Eight familiar worlds around the Death Star.",
    star: PresetBody {
        name: "Death Star",
        radius: 15.0,
        distance: 0.0,
        speed: 0.0,
        kind: BodyKind::ROCKY,
        color: 0x9a9a9a,
        texture: "textures/deathStar.png",
    },
    bodies: &[
        PresetBody {
            name: "Naboo",
            radius: 3.86,
            distance: 80.0,
            speed: 0.02,
            kind: BodyKind::GAS_GIANT,
            color: 0x4f8f4a,
            texture: "textures/naboo.png",
        },
        PresetBody {
            name: "Tatooine",
            radius: 3.33,
            distance: 100.0,
            speed: 0.015,
            kind: BodyKind::GAS_GIANT,
            color: 0xd9b36c,
            texture: "textures/tatooine.png",
        },
        PresetBody {
            name: "Coruscant",
            radius: 3.9,
            distance: 40.0,
            speed: 0.01,
            kind: BodyKind::GAS_GIANT,
            color: 0xc7a86a,
            texture: "textures/coruscant.png",
        },
        PresetBody {
            name: "Kashyyyk",
            radius: 3.94,
            distance: 90.0,
            speed: 0.008,
            kind: BodyKind::GAS_GIANT,
            color: 0x2f6b2f,
            texture: "textures/kashyyyk.png",
        },
        PresetBody {
            name: "Dagobah",
            radius: 2.84,
            distance: 120.0,
            speed: 0.004,
            kind: BodyKind::GAS_GIANT,
            color: 0x556b2f,
            texture: "textures/dagobah.png",
        },
        PresetBody {
            name: "Mustafar",
            radius: 1.34,
            distance: 130.0,
            speed: 0.003,
            kind: BodyKind::GAS_GIANT,
            color: 0xb33a1a,
            texture: "textures/mustafar.png",
        },
        PresetBody {
            name: "Alderaan",
            radius: 3.98,
            distance: 60.0,
            speed: 0.002,
            kind: BodyKind::ROCKY,
            color: 0x4a7bd1,
            texture: "textures/alderaan.png",
        },
        PresetBody {
            name: "Hoth",
            radius: 2.29,
            distance: 150.0,
            speed: 0.0018,
            kind: BodyKind::GAS_GIANT,
            color: 0xe8f1f5,
            texture: "textures/hoth.png",
        },
    ],
};
