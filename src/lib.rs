//! WORLD-EXPORTER: authored scenes to RON world assets
//!
//! Turns a snapshot of an authored 3D scene (named nodes with world
//! transforms and custom metadata) into the `WorldAsset` document the game's
//! world loader reads:
//! - Nodes are typed by name (`Collider.Box`, `Prop.Barrel`, `Spot.Hall`, ...)
//! - Transforms are converted from the Y-up authoring space to Z-up
//! - Output is deterministic RON text, built in one pass
//!
//! ```text
//! SceneNode* ──classify──▶ Classification ──extract──▶ WorldEntity ──▶ WorldAsset ──▶ text
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compression;
pub mod config;
pub mod export;
pub mod scene;
pub mod world;

pub use config::{ConfigError, ExportConfig, NonFinitePolicy};
pub use export::{export_node, export_scene, export_to_writer, ExportError, ExportReport, SkippedNode};
pub use scene::{SceneDump, SceneNode};
pub use world::{EntityCategory, WorldAsset, WorldEntity};
