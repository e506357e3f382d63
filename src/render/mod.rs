//! Rendering for the orrery.
//!
//! Body visuals are created and updated through [`BevyScene`], the Bevy
//! implementation of the scene contract. The background plugin adds the
//! starfield and the lighting.

mod background;
pub mod bodies;

use bevy::prelude::*;

use self::background::BackgroundPlugin;

pub use self::bodies::{BevyScene, BodyVisual, VisualIndex, ray_sphere_hit};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualIndex>().add_plugins(BackgroundPlugin);
    }
}
