use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{BundleGraph, BundleOutput, Bundler, ModuleRecord};
use crate::chunk::ChunkPartitioner;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::stash;

/// Bundle pass over artifacts an external bundler already wrote.
///
/// Reads the generic entry document from `config.generic_html` (see
/// [`stash::read_generic`]) and, when configured, the module list from
/// `config.module_list` (a JSON array of `{ "id": ..., "size": ... }` objects).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrebuiltBundle;

impl Bundler for PrebuiltBundle {
  fn bundle(&self, config: &BuildConfig, partitioner: &ChunkPartitioner) -> Result<BundleOutput, BuildError> {
    let generic_html = stash::read_generic(config)?;

    let modules = match &config.module_list {
      Some(path) => read_module_list(path)?,
      None => {
        debug!("no module list configured, bundle graph is empty");
        Vec::new()
      }
    };

    let graph = BundleGraph::partition(modules, partitioner);
    info!(
      platform = %config.platform,
      modules = graph.modules.len(),
      vendor_modules = graph.chunks.len(),
      "bundle pass complete"
    );

    Ok(BundleOutput { generic_html, graph })
  }
}

fn read_module_list(path: &Path) -> Result<Vec<ModuleRecord>, BuildError> {
  let content = fs::read_to_string(path).map_err(|e| BuildError::ModuleList {
    path: path.to_path_buf(),
    message: e.to_string(),
  })?;
  serde_json::from_str(&content).map_err(|e| BuildError::ModuleList {
    path: path.to_path_buf(),
    message: e.to_string(),
  })
}
