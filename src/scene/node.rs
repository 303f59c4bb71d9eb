//! Scene nodes and their world transforms

use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;
use super::metadata::{MetaValue, Metadata};

/// Light type as reported by the authoring tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LightKind {
    Point,
    Spot,
    Sun,
    Area,
}

/// What kind of object a node is in the authoring tool
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum NodeKind {
    Mesh,
    /// Light object with its energy in watts
    Light { light_kind: LightKind, energy: f32 },
    Empty,
    Other,
}

/// World transform in the authoring tool's space (Y-up)
///
/// Rotation is a quaternion stored in glam order `(x, y, z, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "TransformSource")]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Dump form of a [`NodeTransform`]
///
/// Dumps may carry either the decomposed parts or the raw world matrix
/// (column-major, as `matrix_world` is exposed by most hosts).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum TransformSource {
    Decomposed {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
    Matrix { columns: [[f32; 4]; 4] },
}

impl From<TransformSource> for NodeTransform {
    fn from(source: TransformSource) -> Self {
        match source {
            TransformSource::Decomposed { translation, rotation, scale } => Self {
                translation,
                rotation,
                scale,
            },
            TransformSource::Matrix { columns } => Self::from_matrix(Mat4::from_cols_array_2d(&columns)),
        }
    }
}

impl NodeTransform {
    /// Identity transform (origin, no rotation, scale 1)
    pub const IDENTITY: NodeTransform = NodeTransform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { translation, rotation, scale }
    }

    /// Create transform at a position
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Decompose a world matrix into scale, rotation and translation
    ///
    /// A mirrored matrix (negative determinant) yields a negative X scale.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self { translation, rotation, scale }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One object of the authored scene
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneNode {
    /// Object name, e.g. `Collider.Box` or `Prop.Barrel.001`
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub transform: NodeTransform,
    #[serde(default)]
    pub metadata: Metadata,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind, transform: NodeTransform) -> Self {
        Self {
            name: name.into(),
            kind,
            transform,
            metadata: Metadata::new(),
        }
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, transform: NodeTransform) -> Self {
        Self::new(name, NodeKind::Mesh, transform)
    }

    /// Create a light node
    pub fn light(name: impl Into<String>, light_kind: LightKind, energy: f32, transform: NodeTransform) -> Self {
        Self::new(name, NodeKind::Light { light_kind, energy }, transform)
    }

    /// Attach a custom property (builder style)
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh)
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, NodeKind::Light { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_decomposition() {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 4.0),
            Quat::from_rotation_y(0.5),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let t = NodeTransform::from_matrix(matrix);

        assert!((t.translation - Vec3::new(1.0, 2.0, 3.0)).length() < 0.0001);
        assert!((t.scale - Vec3::new(2.0, 3.0, 4.0)).length() < 0.0001);
        assert!(t.rotation.angle_between(Quat::from_rotation_y(0.5)) < 0.0001);
    }

    #[test]
    fn test_mirrored_matrix_has_negative_scale() {
        let matrix = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
        let t = NodeTransform::from_matrix(matrix);
        assert!(t.scale.x < 0.0);
    }

    #[test]
    fn test_node_from_ron() {
        let node: SceneNode = ron::from_str(
            r#"(
                name: "Prop.Barrel",
                kind: Mesh,
                transform: Decomposed(translation: (1, 2, 3), rotation: (0, 0, 0, 1), scale: (1, 1, 1)),
                metadata: {"animatable": "barrel_roll"},
            )"#,
        )
        .unwrap();

        assert_eq!(node.name, "Prop.Barrel");
        assert!(node.is_mesh());
        assert_eq!(node.transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.transform.rotation, Quat::IDENTITY);
        assert_eq!(node.metadata.get_optional::<String>("animatable"), Some("barrel_roll".to_string()));
    }

    #[test]
    fn test_light_node_from_json_matrix() {
        let node: SceneNode = serde_json::from_str(
            r#"{
                "name": "Spot.Hall",
                "kind": {"Light": {"light_kind": "Spot", "energy": 800}},
                "transform": {"Matrix": {"columns": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[4,5,6,1]]}}
            }"#,
        )
        .unwrap();

        assert!(node.is_light());
        assert_eq!(node.kind, NodeKind::Light { light_kind: LightKind::Spot, energy: 800.0 });
        assert!((node.transform.translation - Vec3::new(4.0, 5.0, 6.0)).length() < 0.0001);
        assert!(node.metadata.is_empty());
    }

    #[test]
    fn test_missing_transform_defaults_to_identity() {
        let node: SceneNode = ron::from_str(r#"(name: "Sound.Wind", kind: Empty)"#).unwrap();
        assert_eq!(node.transform, NodeTransform::IDENTITY);
    }
}
