//! Entity extraction
//!
//! Builds a typed record from a classified node. Optional metadata keys:
//!
//! | Category     | Keys                                                            |
//! |--------------|-----------------------------------------------------------------|
//! | Interactable | `interaction`, `interaction_text`, `interaction_actions`, `interaction_blockers` |
//! | Prop         | `animatable`                                                    |
//! | Light        | `animatable`                                                    |
//! | Sound        | `animatable`                                                    |
//!
//! A missing key gives the default (`None`, `""` or an empty list). A key
//! holding a non-string value is ignored with a warning.

use log::warn;
use super::classify::{Classification, ClassifyError};
use super::convert::{
    convert_transform, convert_translation, COLLIDER_SCALE_AXES, INTERACTABLE_SCALE_AXES,
    LIGHT_SCALE_AXES, PROP_SCALE_AXES,
};
use super::error::ExportError;
use crate::config::{ExportConfig, NonFinitePolicy};
use crate::scene::{LightKind, NodeKind, SceneNode};
use crate::world::{
    EntityCategory, LightType, RawSequence, WorldCollider, WorldEntity, WorldInteractable,
    WorldInteraction, WorldLight, WorldProp, WorldSound,
};

const KEY_ANIMATABLE: &str = "animatable";
const KEY_INTERACTION: &str = "interaction";
const KEY_INTERACTION_TEXT: &str = "interaction_text";
const KEY_INTERACTION_ACTIONS: &str = "interaction_actions";
const KEY_INTERACTION_BLOCKERS: &str = "interaction_blockers";

/// Build the entity record for a classified node
pub fn extract(
    node: &SceneNode,
    classification: &Classification,
    config: &ExportConfig,
) -> Result<WorldEntity, ExportError> {
    let entity = match classification.category {
        EntityCategory::Collider => {
            check_transform(node, config, true)?;
            let t = convert_transform(&node.transform, COLLIDER_SCALE_AXES);
            WorldEntity::Collider(WorldCollider {
                shape: subtype(node, classification)?,
                translation: t.translation,
                rotation: t.rotation,
                scale: t.scale,
            })
        }
        EntityCategory::Interactable => {
            check_transform(node, config, true)?;
            let t = convert_transform(&node.transform, INTERACTABLE_SCALE_AXES);
            WorldEntity::Interactable(WorldInteractable {
                shape: subtype(node, classification)?,
                translation: t.translation,
                rotation: t.rotation,
                scale: t.scale,
                interaction: interaction(node),
            })
        }
        EntityCategory::Prop => {
            check_transform(node, config, true)?;
            let t = convert_transform(&node.transform, PROP_SCALE_AXES);
            WorldEntity::Prop(WorldProp {
                prop: subtype(node, classification)?,
                translation: t.translation,
                rotation: t.rotation,
                scale: t.scale,
                animatable: meta_str(node, KEY_ANIMATABLE),
            })
        }
        EntityCategory::Light => {
            let NodeKind::Light { light_kind, energy } = node.kind else {
                return Err(ExportError::KindMismatch {
                    name: node.name.clone(),
                    category: EntityCategory::Light,
                });
            };
            check_transform(node, config, true)?;
            if config.non_finite == NonFinitePolicy::Reject && !energy.is_finite() {
                return Err(invalid(node, "light energy"));
            }
            let t = convert_transform(&node.transform, LIGHT_SCALE_AXES);
            WorldEntity::Light(WorldLight {
                light_type: light_type(light_kind),
                translation: t.translation,
                rotation: t.rotation,
                scale: t.scale,
                watts: energy,
                animatable: meta_str(node, KEY_ANIMATABLE),
            })
        }
        EntityCategory::Sound => {
            // Only the position is emitted for sounds
            check_transform(node, config, false)?;
            WorldEntity::Sound(WorldSound {
                sound: subtype(node, classification)?,
                translation: convert_translation(node.transform.translation),
                paused: true,
                animatable: meta_str(node, KEY_ANIMATABLE),
            })
        }
    };
    Ok(entity)
}

/// Engine light type; spot lights are emitted as directional
fn light_type(kind: LightKind) -> LightType {
    match kind {
        LightKind::Spot => LightType::Directional,
        LightKind::Point | LightKind::Sun | LightKind::Area => LightType::Point,
    }
}

fn subtype(node: &SceneNode, classification: &Classification) -> Result<String, ExportError> {
    classification.subtype.clone().ok_or_else(|| {
        ClassifyError::MalformedNodeName {
            name: node.name.clone(),
            category: classification.category,
        }
        .into()
    })
}

fn invalid(node: &SceneNode, field: &'static str) -> ExportError {
    ExportError::InvalidTransform {
        name: node.name.clone(),
        field,
    }
}

/// Reject non-finite transform parts when the config asks for it
fn check_transform(node: &SceneNode, config: &ExportConfig, full: bool) -> Result<(), ExportError> {
    if config.non_finite == NonFinitePolicy::PassThrough {
        return Ok(());
    }
    let t = &node.transform;
    if !t.translation.is_finite() {
        return Err(invalid(node, "translation"));
    }
    if full && !t.rotation.is_finite() {
        return Err(invalid(node, "rotation"));
    }
    if full && !t.scale.is_finite() {
        return Err(invalid(node, "scale"));
    }
    Ok(())
}

/// String property lookup; wrong-typed values count as absent
fn meta_str(node: &SceneNode, key: &str) -> Option<String> {
    let value = node.metadata.get_optional::<String>(key);
    if value.is_none() && node.metadata.contains_key(key) {
        warn!("node '{}': property '{}' is not a string, ignoring it", node.name, key);
    }
    value
}

/// Interaction of an interactable, present iff `interaction` is set
fn interaction(node: &SceneNode) -> Option<WorldInteraction> {
    let interaction = meta_str(node, KEY_INTERACTION)?;
    Some(WorldInteraction {
        interaction,
        interaction_text: meta_str(node, KEY_INTERACTION_TEXT).unwrap_or_default(),
        actions: RawSequence::new(meta_str(node, KEY_INTERACTION_ACTIONS).unwrap_or_default()),
        blockers: RawSequence::new(meta_str(node, KEY_INTERACTION_BLOCKERS).unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::classify;
    use crate::scene::NodeTransform;
    use glam::{Quat, Vec3};

    fn run(node: &SceneNode) -> Result<WorldEntity, ExportError> {
        let config = ExportConfig::default();
        let classification = classify(node, config.delimiter).unwrap().unwrap();
        extract(node, &classification, &config)
    }

    fn at(x: f32, y: f32, z: f32) -> NodeTransform {
        NodeTransform::from_translation(Vec3::new(x, y, z))
    }

    #[test]
    fn test_collider_box() {
        let node = SceneNode::mesh("Collider.Box", at(1.0, 2.0, 3.0));
        let WorldEntity::Collider(c) = run(&node).unwrap() else {
            panic!("expected collider");
        };
        assert_eq!(c.shape, "Box");
        assert_eq!(c.translation, Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(c.rotation, Quat::IDENTITY);
        assert_eq!(c.scale, Vec3::ONE);
    }

    #[test]
    fn test_scale_axes_per_category() {
        let t = at(0.0, 0.0, 0.0).with_scale(Vec3::new(-1.0, 2.0, -3.0));

        let WorldEntity::Collider(c) = run(&SceneNode::mesh("Collider.Box", t)).unwrap() else { panic!() };
        assert_eq!(c.scale, Vec3::new(1.0, 3.0, 2.0));

        let WorldEntity::Interactable(i) = run(&SceneNode::mesh("Interactable.Box", t)).unwrap() else { panic!() };
        assert_eq!(i.scale, Vec3::new(1.0, 3.0, 2.0));

        let WorldEntity::Prop(p) = run(&SceneNode::mesh("Prop.Crate", t)).unwrap() else { panic!() };
        assert_eq!(p.scale, Vec3::new(1.0, 2.0, 3.0));

        let light = SceneNode::light("Point.Lamp", LightKind::Point, 60.0, t);
        let WorldEntity::Light(l) = run(&light).unwrap() else { panic!() };
        assert_eq!(l.scale, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_interactable_without_interaction() {
        let node = SceneNode::mesh("Interactable.Panel", at(1.0, 2.0, 3.0))
            .with_meta("interaction_text", "ignored without interaction");
        let WorldEntity::Interactable(i) = run(&node).unwrap() else { panic!() };
        assert_eq!(i.interaction, None);
        assert_eq!(i.translation, Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_interaction_defaults() {
        let node = SceneNode::mesh("Interactable.Lever", NodeTransform::IDENTITY).with_meta("interaction", "pull");
        let WorldEntity::Interactable(i) = run(&node).unwrap() else { panic!() };
        let interaction = i.interaction.unwrap();
        assert_eq!(interaction.interaction, "pull");
        assert_eq!(interaction.interaction_text, "");
        assert!(interaction.actions.is_empty());
        assert!(interaction.blockers.is_empty());
    }

    #[test]
    fn test_interaction_full() {
        let node = SceneNode::mesh("Interactable.Lever", NodeTransform::IDENTITY)
            .with_meta("interaction", "pull")
            .with_meta("interaction_text", "Pull the lever")
            .with_meta("interaction_actions", "(\"gate\",\"open\")")
            .with_meta("interaction_blockers", "(\"power\",\"off\"),");
        let WorldEntity::Interactable(i) = run(&node).unwrap() else { panic!() };
        let interaction = i.interaction.unwrap();
        assert_eq!(interaction.interaction_text, "Pull the lever");
        assert_eq!(interaction.actions.as_str(), "(\"gate\",\"open\")");
        assert_eq!(interaction.blockers.as_str(), "(\"power\",\"off\"),");
    }

    #[test]
    fn test_wrong_typed_interaction_is_absent() {
        let node = SceneNode::mesh("Interactable.Lever", NodeTransform::IDENTITY).with_meta("interaction", 1i64);
        let WorldEntity::Interactable(i) = run(&node).unwrap() else { panic!() };
        assert_eq!(i.interaction, None);
    }

    #[test]
    fn test_animatable() {
        let plain = SceneNode::mesh("Prop.Fan", NodeTransform::IDENTITY);
        let WorldEntity::Prop(p) = run(&plain).unwrap() else { panic!() };
        assert_eq!(p.prop, "Fan");
        assert_eq!(p.animatable, None);

        let animated = plain.with_meta("animatable", "fan_spin");
        let WorldEntity::Prop(p) = run(&animated).unwrap() else { panic!() };
        assert_eq!(p.animatable.as_deref(), Some("fan_spin"));
    }

    #[test]
    fn test_spot_light() {
        let node = SceneNode::light("Spot.Hall", LightKind::Spot, 800.0, NodeTransform::IDENTITY);
        let WorldEntity::Light(l) = run(&node).unwrap() else { panic!() };
        assert_eq!(l.light_type, LightType::Directional);
        assert_eq!(l.watts, 800.0);
        assert_eq!(l.animatable, None);
    }

    #[test]
    fn test_point_light() {
        let node = SceneNode::light("Point.Lamp", LightKind::Point, 40.0, at(0.0, 5.0, 0.0))
            .with_meta("animatable", "flicker");
        let WorldEntity::Light(l) = run(&node).unwrap() else { panic!() };
        assert_eq!(l.light_type, LightType::Point);
        assert_eq!(l.translation, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(l.animatable.as_deref(), Some("flicker"));
    }

    #[test]
    fn test_sound() {
        let node = SceneNode::mesh("Sound.Wind", at(1.0, 2.0, 3.0))
            .with_meta("animatable", "gust");
        let WorldEntity::Sound(s) = run(&node).unwrap() else { panic!() };
        assert_eq!(s.sound, "Wind");
        assert_eq!(s.translation, Vec3::new(1.0, 3.0, -2.0));
        assert!(s.paused);
        assert_eq!(s.animatable.as_deref(), Some("gust"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let node = SceneNode::mesh("Collider.Box", at(f32::NAN, 0.0, 0.0));
        assert_eq!(run(&node), Err(ExportError::InvalidTransform {
            name: "Collider.Box".to_string(),
            field: "translation",
        }));

        let node = SceneNode::light("Point.Sun", LightKind::Point, f32::INFINITY, NodeTransform::IDENTITY);
        assert!(matches!(run(&node), Err(ExportError::InvalidTransform { field: "light energy", .. })));
    }

    #[test]
    fn test_sound_ignores_unused_rotation() {
        let t = NodeTransform::IDENTITY.with_rotation(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0));
        assert!(run(&SceneNode::mesh("Sound.Wind", t)).is_ok());
        assert!(run(&SceneNode::mesh("Prop.Crate", t)).is_err());
    }

    #[test]
    fn test_non_finite_pass_through() {
        let config = ExportConfig {
            non_finite: NonFinitePolicy::PassThrough,
            ..ExportConfig::default()
        };
        let node = SceneNode::mesh("Collider.Box", at(f32::INFINITY, 0.0, 0.0));
        let classification = classify(&node, '.').unwrap().unwrap();
        let WorldEntity::Collider(c) = extract(&node, &classification, &config).unwrap() else { panic!() };
        assert_eq!(c.translation.x, f32::INFINITY);
    }

    #[test]
    fn test_light_category_on_mesh() {
        let node = SceneNode::mesh("Spot.Hall", NodeTransform::IDENTITY);
        let classification = Classification {
            category: EntityCategory::Light,
            subtype: None,
        };
        let result = extract(&node, &classification, &ExportConfig::default());
        assert!(matches!(result, Err(ExportError::KindMismatch { .. })));
    }
}
