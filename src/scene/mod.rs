//! Scene snapshot - the input side of an export
//!
//! A flat list of nodes as the authoring tool sees them, in its own (Y-up)
//! coordinate space. Nothing here knows about world assets; the exporter
//! only ever reads these types.

mod dump;
mod metadata;
mod node;

pub use dump::*;
pub use metadata::{FromMetaValue, MetaValue, Metadata};
pub use node::{LightKind, NodeKind, NodeTransform, SceneNode, TransformSource};
