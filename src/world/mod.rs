//! World asset - the output side of an export
//!
//! Entity records in the target (Z-up) space, grouped per category:
//! - `WorldCollider`: convex collision shape
//! - `WorldInteractable`: interaction target, optionally with an interaction
//! - `WorldProp`: placed prop scene
//! - `WorldLight`: point or directional light
//! - `WorldSound`: positioned sound, always starting paused
//!
//! A `WorldAsset` is built once per export and never edited afterwards.

mod loader;
mod writer;

pub use loader::*;
pub use writer::{format_f32, save_world, write_world_asset};

use std::fmt;
use glam::{Quat, Vec3};

/// The five kinds of entity a world asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Collider,
    Interactable,
    Prop,
    Light,
    Sound,
}

impl EntityCategory {
    /// All categories, in document order
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::Collider,
        EntityCategory::Interactable,
        EntityCategory::Prop,
        EntityCategory::Light,
        EntityCategory::Sound,
    ];

    /// Category for a name prefix (first name segment)
    ///
    /// Lights are typed by node kind, not by prefix, so they never match here.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "Collider" => Some(EntityCategory::Collider),
            "Interactable" => Some(EntityCategory::Interactable),
            "Prop" => Some(EntityCategory::Prop),
            "Sound" => Some(EntityCategory::Sound),
            _ => None,
        }
    }

    /// Field name of this category's list in the document
    pub fn field_name(self) -> &'static str {
        match self {
            EntityCategory::Collider => "colliders",
            EntityCategory::Interactable => "interactables",
            EntityCategory::Prop => "props",
            EntityCategory::Light => "lights",
            EntityCategory::Sound => "sounds",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityCategory::Collider => "Collider",
            EntityCategory::Interactable => "Interactable",
            EntityCategory::Prop => "Prop",
            EntityCategory::Light => "Light",
            EntityCategory::Sound => "Sound",
        };
        f.write_str(name)
    }
}

/// Convex collider
#[derive(Debug, Clone, PartialEq)]
pub struct WorldCollider {
    pub shape: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Interaction target collider
#[derive(Debug, Clone, PartialEq)]
pub struct WorldInteractable {
    pub shape: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub interaction: Option<WorldInteraction>,
}

/// Interaction attached to an interactable
#[derive(Debug, Clone, PartialEq)]
pub struct WorldInteraction {
    pub interaction: String,
    pub interaction_text: String,
    pub actions: RawSequence,
    pub blockers: RawSequence,
}

/// Body of a list, copied verbatim from authored metadata
///
/// Authors write e.g. `("door_1","open"),("light_2","on")`; the text is
/// emitted between `[` and `]` without being parsed or escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSequence(String);

impl RawSequence {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Placed prop
#[derive(Debug, Clone, PartialEq)]
pub struct WorldProp {
    pub prop: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub animatable: Option<String>,
}

/// Light type as the engine names it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Point,
    /// Emitted for spot lights
    Directional,
}

impl LightType {
    pub fn as_str(self) -> &'static str {
        match self {
            LightType::Point => "point",
            LightType::Directional => "directional",
        }
    }
}

/// Light
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLight {
    pub light_type: LightType,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub watts: f32,
    pub animatable: Option<String>,
}

/// Positioned sound
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSound {
    pub sound: String,
    pub translation: Vec3,
    pub paused: bool,
    pub animatable: Option<String>,
}

/// Any entity record
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEntity {
    Collider(WorldCollider),
    Interactable(WorldInteractable),
    Prop(WorldProp),
    Light(WorldLight),
    Sound(WorldSound),
}

impl WorldEntity {
    pub fn category(&self) -> EntityCategory {
        match self {
            WorldEntity::Collider(_) => EntityCategory::Collider,
            WorldEntity::Interactable(_) => EntityCategory::Interactable,
            WorldEntity::Prop(_) => EntityCategory::Prop,
            WorldEntity::Light(_) => EntityCategory::Light,
            WorldEntity::Sound(_) => EntityCategory::Sound,
        }
    }

    /// Translation in target space
    pub fn translation(&self) -> Vec3 {
        match self {
            WorldEntity::Collider(e) => e.translation,
            WorldEntity::Interactable(e) => e.translation,
            WorldEntity::Prop(e) => e.translation,
            WorldEntity::Light(e) => e.translation,
            WorldEntity::Sound(e) => e.translation,
        }
    }
}

/// A complete world: one ordered list per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldAsset {
    colliders: Vec<WorldCollider>,
    interactables: Vec<WorldInteractable>,
    props: Vec<WorldProp>,
    lights: Vec<WorldLight>,
    sounds: Vec<WorldSound>,
}

impl WorldAsset {
    /// Build an asset from entities, keeping their order within each category
    pub fn from_entities<I: IntoIterator<Item = WorldEntity>>(entities: I) -> Self {
        let mut builder = WorldAssetBuilder::new();
        for entity in entities {
            builder.push(entity);
        }
        builder.build()
    }

    pub fn colliders(&self) -> &[WorldCollider] {
        &self.colliders
    }

    pub fn interactables(&self) -> &[WorldInteractable] {
        &self.interactables
    }

    pub fn props(&self) -> &[WorldProp] {
        &self.props
    }

    pub fn lights(&self) -> &[WorldLight] {
        &self.lights
    }

    pub fn sounds(&self) -> &[WorldSound] {
        &self.sounds
    }

    /// Number of entities in one category
    pub fn count(&self, category: EntityCategory) -> usize {
        match category {
            EntityCategory::Collider => self.colliders.len(),
            EntityCategory::Interactable => self.interactables.len(),
            EntityCategory::Prop => self.props.len(),
            EntityCategory::Light => self.lights.len(),
            EntityCategory::Sound => self.sounds.len(),
        }
    }

    /// Total number of entities
    pub fn len(&self) -> usize {
        EntityCategory::ALL.iter().map(|&c| self.count(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the complete RON document
    pub fn to_ron_string(&self) -> String {
        self.to_string()
    }
}

/// Collects entities for a [`WorldAsset`]
#[derive(Debug, Default)]
pub struct WorldAssetBuilder {
    asset: WorldAsset,
}

impl WorldAssetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to the end of its category's list
    pub fn push(&mut self, entity: WorldEntity) {
        match entity {
            WorldEntity::Collider(e) => self.asset.colliders.push(e),
            WorldEntity::Interactable(e) => self.asset.interactables.push(e),
            WorldEntity::Prop(e) => self.asset.props.push(e),
            WorldEntity::Light(e) => self.asset.lights.push(e),
            WorldEntity::Sound(e) => self.asset.sounds.push(e),
        }
    }

    pub fn build(self) -> WorldAsset {
        self.asset
    }
}
