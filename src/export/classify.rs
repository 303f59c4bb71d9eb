//! Node classification by naming convention
//!
//! `Collider.Box`, `Interactable.Lever`, `Prop.Barrel.001` and `Sound.Wind`
//! are typed by their first name segment and carry the second as subtype.
//! Lights are typed by node kind plus a `Point`/`Spot` name prefix.

use thiserror::Error;
use crate::scene::SceneNode;
use crate::world::EntityCategory;

/// Result of classifying a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: EntityCategory,
    /// Shape, prop or sound name; `None` for lights
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("malformed node name '{name}': {category} needs a subtype segment")]
    MalformedNodeName { name: String, category: EntityCategory },
}

/// Name prefixes that mark light nodes
const LIGHT_PREFIXES: [&str; 2] = ["Point", "Spot"];

/// Classify a node
///
/// `Ok(None)` means the node is not part of the world and is skipped.
pub fn classify(node: &SceneNode, delimiter: char) -> Result<Option<Classification>, ClassifyError> {
    if node.is_light() {
        if LIGHT_PREFIXES.iter().any(|p| node.name.starts_with(p)) {
            return Ok(Some(Classification {
                category: EntityCategory::Light,
                subtype: None,
            }));
        }
        return Ok(None);
    }

    if !node.is_mesh() {
        return Ok(None);
    }

    let mut segments = node.name.split(delimiter);
    let Some(category) = segments.next().and_then(EntityCategory::from_prefix) else {
        return Ok(None);
    };

    match segments.next() {
        Some(subtype) if !subtype.is_empty() => Ok(Some(Classification {
            category,
            subtype: Some(subtype.to_string()),
        })),
        _ => Err(ClassifyError::MalformedNodeName {
            name: node.name.clone(),
            category,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LightKind, NodeKind, NodeTransform};

    fn mesh(name: &str) -> SceneNode {
        SceneNode::mesh(name, NodeTransform::IDENTITY)
    }

    fn classified(node: &SceneNode) -> Option<Classification> {
        classify(node, '.').unwrap()
    }

    #[test]
    fn test_prefix_categories() {
        let c = classified(&mesh("Collider.Box")).unwrap();
        assert_eq!(c.category, EntityCategory::Collider);
        assert_eq!(c.subtype.as_deref(), Some("Box"));

        let c = classified(&mesh("Interactable.Lever")).unwrap();
        assert_eq!(c.category, EntityCategory::Interactable);

        let c = classified(&mesh("Prop.Barrel.001")).unwrap();
        assert_eq!(c.category, EntityCategory::Prop);
        assert_eq!(c.subtype.as_deref(), Some("Barrel"));

        let c = classified(&mesh("Sound.Wind")).unwrap();
        assert_eq!(c.category, EntityCategory::Sound);
        assert_eq!(c.subtype.as_deref(), Some("Wind"));
    }

    #[test]
    fn test_unmatched_names_are_skipped() {
        assert_eq!(classified(&mesh("Cube")), None);
        assert_eq!(classified(&mesh("Cube.001")), None);
        assert_eq!(classified(&mesh("ColliderBox.001")), None);
        assert_eq!(classified(&mesh("collider.Box")), None);
        assert_eq!(classified(&mesh("")), None);
    }

    #[test]
    fn test_prefix_requires_mesh() {
        let empty = SceneNode::new("Collider.Box", NodeKind::Empty, NodeTransform::IDENTITY);
        assert_eq!(classified(&empty), None);

        let light = SceneNode::light("Prop.Lamp", LightKind::Point, 10.0, NodeTransform::IDENTITY);
        assert_eq!(classified(&light), None);
    }

    #[test]
    fn test_lights() {
        let spot = SceneNode::light("Spot.Hall", LightKind::Spot, 800.0, NodeTransform::IDENTITY);
        let c = classified(&spot).unwrap();
        assert_eq!(c.category, EntityCategory::Light);
        assert_eq!(c.subtype, None);

        // Prefix match, no delimiter needed
        let point = SceneNode::light("Point", LightKind::Point, 10.0, NodeTransform::IDENTITY);
        assert_eq!(classified(&point).unwrap().category, EntityCategory::Light);
        let point = SceneNode::light("PointLamp.002", LightKind::Point, 10.0, NodeTransform::IDENTITY);
        assert_eq!(classified(&point).unwrap().category, EntityCategory::Light);

        let sun = SceneNode::light("Sun", LightKind::Sun, 3.0, NodeTransform::IDENTITY);
        assert_eq!(classified(&sun), None);

        // Named like a light but not one
        assert_eq!(classified(&mesh("Point.Lamp")), None);
    }

    #[test]
    fn test_missing_subtype() {
        for name in ["Collider", "Prop.", "Sound..Wind"] {
            let err = classify(&mesh(name), '.').unwrap_err();
            let ClassifyError::MalformedNodeName { name: err_name, .. } = &err;
            assert_eq!(err_name, name);
        }

        let err = classify(&mesh("Interactable"), '.').unwrap_err();
        assert_eq!(err, ClassifyError::MalformedNodeName {
            name: "Interactable".to_string(),
            category: EntityCategory::Interactable,
        });
    }

    #[test]
    fn test_custom_delimiter() {
        let c = classify(&mesh("Prop_Crate"), '_').unwrap().unwrap();
        assert_eq!(c.subtype.as_deref(), Some("Crate"));
        assert_eq!(classify(&mesh("Prop.Crate"), '_').unwrap(), None);
    }
}
