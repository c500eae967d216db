//! Graph construction settings.

use crate::graph::DuplicateEdgePolicy;
use crate::pool::{StorageKind, DEFAULT_SLAB_BYTES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Vertex slots allocated up front
    pub initial_vertex_capacity: usize,
    /// Edge slots allocated up front
    pub initial_edge_capacity: usize,
    /// Slot backing for both pools
    pub storage: StorageKind,
    /// Slab size in bytes when `storage` is `multi_array`
    pub slab_bytes: usize,
    /// Whether `add_edge` accepts a second edge between the same vertices
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_vertex_capacity: 1024,
            initial_edge_capacity: 1024,
            storage: StorageKind::SingleArray,
            slab_bytes: DEFAULT_SLAB_BYTES,
            duplicate_edges: DuplicateEdgePolicy::Allow,
        }
    }
}

impl GraphConfig {
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            initial_vertex_capacity: vertices,
            initial_edge_capacity: edges,
            ..Self::default()
        }
    }

    pub fn storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    pub fn duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
