//! Scene dump loading
//!
//! The host tool writes a snapshot of its scene as RON or JSON, optionally
//! brotli-compressed. Reading auto-detects all three.

use std::fs;
use std::path::Path;
use serde::Deserialize;
use thiserror::Error;
use super::node::SceneNode;
use crate::compression;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of nodes in a dump
    pub const MAX_NODES: usize = 65_536;
    /// Maximum length of a node name
    pub const MAX_NAME_LEN: usize = 256;
    /// Maximum custom properties per node
    pub const MAX_METADATA_ENTRIES: usize = 64;
    /// Maximum length of a string property value
    pub const MAX_STRING_LEN: usize = 4096;
}

/// Error type for scene dump loading
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    Validation(String),
}

/// A snapshot of the authored scene, in host traversal order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SceneDump {
    /// Scene name in the host tool (informational)
    #[serde(default)]
    pub scene: String,
    pub nodes: Vec<SceneNode>,
}

impl SceneDump {
    pub fn new(nodes: Vec<SceneNode>) -> Self {
        Self {
            scene: String::new(),
            nodes,
        }
    }
}

/// Validate one node
fn validate_node(node: &SceneNode, index: usize) -> Result<(), String> {
    let context = format!("node[{}]", index);

    if node.name.len() > limits::MAX_NAME_LEN {
        return Err(format!("{}: name too long ({} > {})",
            context, node.name.len(), limits::MAX_NAME_LEN));
    }
    if node.metadata.len() > limits::MAX_METADATA_ENTRIES {
        return Err(format!("{} '{}': too many properties ({} > {})",
            context, node.name, node.metadata.len(), limits::MAX_METADATA_ENTRIES));
    }
    for (key, value) in node.metadata.iter() {
        if key.len() > limits::MAX_NAME_LEN {
            return Err(format!("{} '{}': property key too long ({} > {})",
                context, node.name, key.len(), limits::MAX_NAME_LEN));
        }
        if let super::MetaValue::Str(s) = value {
            if s.len() > limits::MAX_STRING_LEN {
                return Err(format!("{} '{}': property '{}' too long ({} > {})",
                    context, node.name, key, s.len(), limits::MAX_STRING_LEN));
            }
        }
    }

    Ok(())
}

/// Validate an entire dump
pub fn validate_dump(dump: &SceneDump) -> Result<(), DumpError> {
    if dump.nodes.len() > limits::MAX_NODES {
        return Err(DumpError::Validation(format!(
            "too many nodes ({} > {})", dump.nodes.len(), limits::MAX_NODES
        )));
    }

    for (i, node) in dump.nodes.iter().enumerate() {
        validate_node(node, i).map_err(DumpError::Validation)?;
    }

    Ok(())
}

/// Parse a dump from text, choosing JSON or RON by the first non-blank character
pub fn load_scene_from_str(s: &str) -> Result<SceneDump, DumpError> {
    let is_json = matches!(s.trim_start().as_bytes().first(), Some(b'{' | b'['));

    let dump: SceneDump = if is_json {
        serde_json::from_str(s)?
    } else {
        match ron::from_str(s) {
            Ok(dump) => dump,
            Err(e) => {
                // Show the offending line, RON positions are 1-based
                if let Some(line) = s.lines().nth(e.position.line.saturating_sub(1)) {
                    log::error!("RON parse error at {}:{}: {}", e.position.line, e.position.col, line.trim());
                }
                return Err(e.into());
            }
        }
    };

    validate_dump(&dump)?;
    Ok(dump)
}

/// Parse a dump from bytes (plain or brotli-compressed)
pub fn parse_scene_data(bytes: &[u8]) -> Result<SceneDump, DumpError> {
    let contents = compression::decode_text(bytes)?;
    load_scene_from_str(&contents)
}

/// Load a dump file (plain or brotli-compressed)
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDump, DumpError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let dump = parse_scene_data(&bytes)?;
    log::info!("loaded {} nodes from {}", dump.nodes.len(), path.display());
    Ok(dump)
}
