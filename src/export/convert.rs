//! Y-up (authoring) → Z-up (engine) conversion
//!
//! Translation `(x, y, z)` becomes `(x, z, -y)`; the quaternion's vector part
//! is permuted the same way. Scale loses its sign.
//!
//! Scale axes are NOT handled uniformly: colliders and interactables swap Y
//! and Z like translation, props and lights keep the authoring order. This is
//! the layout the engine currently loads; change a category's constant only
//! together with its loader.

use glam::{Quat, Vec3};
use crate::scene::NodeTransform;

/// Axis order for emitted scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxes {
    /// `(x, y, z)` as authored
    Source,
    /// `(x, z, y)`, matching the translation swap
    SwapYZ,
}

pub const COLLIDER_SCALE_AXES: ScaleAxes = ScaleAxes::SwapYZ;
pub const INTERACTABLE_SCALE_AXES: ScaleAxes = ScaleAxes::SwapYZ;
pub const PROP_SCALE_AXES: ScaleAxes = ScaleAxes::Source;
pub const LIGHT_SCALE_AXES: ScaleAxes = ScaleAxes::Source;

/// Transform in engine space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

pub fn convert_translation(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Permute the vector part like a translation; `w` is unchanged
///
/// Components are copied as-is, no renormalization.
pub fn convert_rotation(q: Quat) -> Quat {
    Quat::from_xyzw(q.x, q.z, -q.y, q.w)
}

/// Absolute scale in the given axis order
pub fn convert_scale(s: Vec3, axes: ScaleAxes) -> Vec3 {
    let s = s.abs();
    match axes {
        ScaleAxes::Source => s,
        ScaleAxes::SwapYZ => Vec3::new(s.x, s.z, s.y),
    }
}

pub fn convert_transform(t: &NodeTransform, axes: ScaleAxes) -> TargetTransform {
    TargetTransform {
        translation: convert_translation(t.translation),
        rotation: convert_rotation(t.rotation),
        scale: convert_scale(t.scale, axes),
    }
}
