//! Export pass over a whole scene

use std::io::{self, Write};
use log::{debug, info, warn};
use super::classify::classify;
use super::error::ExportError;
use super::extract::extract;
use crate::config::ExportConfig;
use crate::scene::SceneNode;
use crate::world::{write_world_asset, WorldAsset, WorldAssetBuilder, WorldEntity};

/// A node that matched a category but could not be exported
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedNode {
    pub name: String,
    pub error: ExportError,
}

/// Outcome of an export pass
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub asset: WorldAsset,
    /// Nodes left out because of an error, in scene order
    pub skipped: Vec<SkippedNode>,
    /// Nodes that matched no category
    pub unclassified: usize,
}

impl ExportReport {
    /// True when every classified node made it into the asset
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Classify and extract a single node
///
/// `Ok(None)` for nodes that are not part of the world.
pub fn export_node(node: &SceneNode, config: &ExportConfig) -> Result<Option<WorldEntity>, ExportError> {
    let Some(classification) = classify(node, config.delimiter)? else {
        return Ok(None);
    };
    extract(node, &classification, config).map(Some)
}

/// Export every node, in iteration order
///
/// Failing nodes are skipped and reported; siblings are unaffected.
pub fn export_scene<'a, I>(nodes: I, config: &ExportConfig) -> ExportReport
where
    I: IntoIterator<Item = &'a SceneNode>,
{
    let mut builder = WorldAssetBuilder::new();
    let mut skipped = Vec::new();
    let mut unclassified = 0;

    for node in nodes {
        match export_node(node, config) {
            Ok(Some(entity)) => {
                debug!("{} '{}' at {:?}", entity.category(), node.name, entity.translation());
                builder.push(entity);
            }
            Ok(None) => unclassified += 1,
            Err(error) => {
                warn!("skipping node '{}': {}", node.name, error);
                skipped.push(SkippedNode {
                    name: node.name.clone(),
                    error,
                });
            }
        }
    }

    let asset = builder.build();
    info!(
        "exported {} colliders, {} interactables, {} props, {} lights, {} sounds ({} skipped, {} unclassified)",
        asset.colliders().len(),
        asset.interactables().len(),
        asset.props().len(),
        asset.lights().len(),
        asset.sounds().len(),
        skipped.len(),
        unclassified,
    );

    ExportReport {
        asset,
        skipped,
        unclassified,
    }
}

/// Export a scene and write the rendered document to `sink`
pub fn export_to_writer<'a, I, W>(nodes: I, config: &ExportConfig, sink: &mut W) -> io::Result<ExportReport>
where
    I: IntoIterator<Item = &'a SceneNode>,
    W: Write,
{
    let report = export_scene(nodes, config);
    write_world_asset(&report.asset, sink)?;
    Ok(report)
}
