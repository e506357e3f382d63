//! Orrery - Solar System Visualizer
//!
//! A library crate providing the body registry, system generators, orbit
//! integration and camera focus logic, plus the Bevy plugins that render
//! and drive them.

pub mod camera;
pub mod config;
pub mod control;
pub mod error;
pub mod focus;
pub mod generators;
pub mod input;
pub mod integrator;
pub mod orrery;
pub mod persistence;
pub mod picking;
pub mod registry;
pub mod render;
pub mod scene;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

pub use error::{OrreryError, Result};
pub use orrery::{GenerateOutcome, Orrery};
