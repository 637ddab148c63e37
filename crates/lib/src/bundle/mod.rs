//! The bundling pass.
//!
//! Compiling the application is the external bundler's job. This module is
//! the seam between it and the pipeline: a [`Bundler`] hands back the generic
//! entry document plus the module graph, with every module run through the
//! [`ChunkPartitioner`] as it is discovered.

mod prebuilt;

use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkAssignment, ChunkPartitioner};
use crate::config::BuildConfig;
use crate::error::BuildError;

pub use prebuilt::PrebuiltBundle;

/// One module of the bundle graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
  /// Resolved module path
  pub id: String,
  /// Rendered size in bytes
  #[serde(default)]
  pub size: u64,
}

/// Module graph with chunk assignments, frozen once the pass finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleGraph {
  pub modules: Vec<ModuleRecord>,
  pub chunks: ChunkAssignment,
}

impl BundleGraph {
  /// Assign chunks to `modules` in discovery order.
  pub fn partition(modules: Vec<ModuleRecord>, partitioner: &ChunkPartitioner) -> Self {
    let mut chunks = ChunkAssignment::new();
    for module in &modules {
      chunks.record(partitioner, &module.id, module.size);
    }
    Self { modules, chunks }
  }

  /// Bytes of modules that stay in their importer's chunk.
  pub fn first_party_bytes(&self) -> u64 {
    self
      .modules
      .iter()
      .filter(|m| self.chunks.chunk_of(&m.id).is_none())
      .map(|m| m.size)
      .sum()
  }
}

/// Result of a bundling pass.
#[derive(Debug, Clone)]
pub struct BundleOutput {
  /// Entry document with the bundler's script and link tags injected
  pub generic_html: String,
  pub graph: BundleGraph,
}

pub trait Bundler {
  fn bundle(&self, config: &BuildConfig, partitioner: &ChunkPartitioner) -> Result<BundleOutput, BuildError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn module(id: &str, size: u64) -> ModuleRecord {
    ModuleRecord {
      id: id.to_string(),
      size,
    }
  }

  #[test]
  fn partition_assigns_third_party_modules() {
    let graph = BundleGraph::partition(
      vec![
        module("/app/src/main.tsx", 100),
        module("/app/node_modules/core-js/es.promise.js", 40),
        module("/app/node_modules/react/index.js", 60),
      ],
      &ChunkPartitioner::default(),
    );

    assert_eq!(graph.chunks.len(), 2);
    assert_eq!(graph.first_party_bytes(), 100);
    assert_eq!(graph.chunks.chunk_of("/app/node_modules/react/index.js"), Some("vendor"));
  }

  #[test]
  fn module_size_defaults_to_zero() {
    let record: ModuleRecord = serde_json::from_str(r#"{"id": "/app/src/a.ts"}"#).unwrap();
    assert_eq!(record.size, 0);
  }
}
