//! Reading world assets back
//!
//! Mirrors the engine-side schema so a rendered document can be checked the
//! same way the game loads it. Struct names must match the document's record
//! names, which RON checks when they are present.

use std::fs;
use std::path::Path;
use glam::{Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;
use crate::compression;

/// Validation limits for loaded documents
pub mod world_limits {
    /// Maximum string length for names and texts
    pub const MAX_STRING_LEN: usize = 4096;
}

/// Error type for world asset loading
#[derive(Debug, Error)]
pub enum WorldLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldAsset")]
pub struct LoadedWorld {
    pub colliders: Vec<LoadedCollider>,
    pub interactables: Vec<LoadedInteractable>,
    pub props: Vec<LoadedProp>,
    pub lights: Vec<LoadedLight>,
    pub sounds: Vec<LoadedSound>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldCollider")]
pub struct LoadedCollider {
    pub shape: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldInteractable")]
pub struct LoadedInteractable {
    pub shape: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub interaction: Option<LoadedInteraction>,
}

/// Actions and blockers are `(target, state)` pairs on the engine side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldInteraction")]
pub struct LoadedInteraction {
    pub interaction: String,
    pub interaction_text: String,
    pub actions: Vec<(String, String)>,
    pub blockers: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldProp")]
pub struct LoadedProp {
    pub prop: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub animatable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldLight")]
pub struct LoadedLight {
    pub light_type: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub watts: f32,
    pub animatable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "WorldSound")]
pub struct LoadedSound {
    pub sound: String,
    pub translation: Vec3,
    pub paused: bool,
    pub animatable: Option<String>,
}

impl LoadedWorld {
    /// Total number of entities
    pub fn len(&self) -> usize {
        self.colliders.len() + self.interactables.len() + self.props.len() + self.lights.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_name(name: &str, context: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{}: empty name", context));
    }
    if name.len() > world_limits::MAX_STRING_LEN {
        return Err(format!("{}: name too long ({} > {})",
            context, name.len(), world_limits::MAX_STRING_LEN));
    }
    Ok(())
}

/// NaN is let through here; only a sign check is made
fn validate_scale(scale: Vec3, context: &str) -> Result<(), String> {
    if scale.x < 0.0 || scale.y < 0.0 || scale.z < 0.0 {
        return Err(format!("{}: negative scale ({}, {}, {})",
            context, scale.x, scale.y, scale.z));
    }
    Ok(())
}

/// Validate a loaded world
pub fn validate_world(world: &LoadedWorld) -> Result<(), WorldLoadError> {
    let check = || -> Result<(), String> {
        for (i, c) in world.colliders.iter().enumerate() {
            let context = format!("colliders[{}]", i);
            validate_name(&c.shape, &context)?;
            validate_scale(c.scale, &context)?;
        }
        for (i, it) in world.interactables.iter().enumerate() {
            let context = format!("interactables[{}]", i);
            validate_name(&it.shape, &context)?;
            validate_scale(it.scale, &context)?;
            if let Some(interaction) = &it.interaction {
                validate_name(&interaction.interaction, &format!("{} interaction", context))?;
            }
        }
        for (i, p) in world.props.iter().enumerate() {
            let context = format!("props[{}]", i);
            validate_name(&p.prop, &context)?;
            validate_scale(p.scale, &context)?;
        }
        for (i, l) in world.lights.iter().enumerate() {
            let context = format!("lights[{}]", i);
            if l.light_type != "point" && l.light_type != "directional" {
                return Err(format!("{}: unknown light_type '{}'", context, l.light_type));
            }
            validate_scale(l.scale, &context)?;
        }
        for (i, s) in world.sounds.iter().enumerate() {
            validate_name(&s.sound, &format!("sounds[{}]", i))?;
        }
        Ok(())
    };
    check().map_err(WorldLoadError::Validation)
}

/// Load a world from a RON string
pub fn load_world_from_str(s: &str) -> Result<LoadedWorld, WorldLoadError> {
    let world: LoadedWorld = ron::from_str(s)?;
    validate_world(&world)?;
    Ok(world)
}

/// Load a world file (plain or brotli-compressed)
pub fn load_world<P: AsRef<Path>>(path: P) -> Result<LoadedWorld, WorldLoadError> {
    let bytes = fs::read(path)?;
    let contents = compression::decode_text(&bytes)?;
    load_world_from_str(&contents)
}
