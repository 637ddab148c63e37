//! Shared helpers for assembly tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tvbuild_lib::bundle::{BundleGraph, BundleOutput, Bundler, ModuleRecord};
use tvbuild_lib::chunk::ChunkPartitioner;
use tvbuild_lib::config::{BuildConfig, BuildMode, BuildOverrides};
use tvbuild_lib::env::EnvMap;
use tvbuild_lib::error::BuildError;
use tvbuild_lib::platform::PlatformId;

pub const GENERIC_HTML: &str = "<!DOCTYPE html><html><head><title>generic</title>\
  <script type=\"module\" src=\"./assets/main-1.js\"></script>\
  <script nomodule src=\"./assets/polyfills-legacy-2.js\"></script>\
  <link rel=\"stylesheet\" href=\"./assets/main-3.css\"></head>\
  <body><div id=\"root\"></div></body></html>";

/// Bundler stand-in that hands back fixed output without touching disk.
pub struct InMemoryBundler {
  pub html: String,
  pub modules: Vec<ModuleRecord>,
}

impl InMemoryBundler {
  pub fn new() -> Self {
    Self {
      html: GENERIC_HTML.to_string(),
      modules: vec![
        ModuleRecord {
          id: "/src/main.tsx".to_string(),
          size: 10,
        },
        ModuleRecord {
          id: "/node_modules/core-js/internals/export.js".to_string(),
          size: 20,
        },
      ],
    }
  }
}

impl Bundler for InMemoryBundler {
  fn bundle(&self, _config: &BuildConfig, partitioner: &ChunkPartitioner) -> Result<BundleOutput, BuildError> {
    Ok(BundleOutput {
      generic_html: self.html.clone(),
      graph: BundleGraph::partition(self.modules.clone(), partitioner),
    })
  }
}

/// Shell whose head and body are tagged with the platform id.
pub fn shell_for(platform: PlatformId) -> String {
  format!(
    "<!DOCTYPE html><html><head><meta name=\"platform\" content=\"{id}\"></head>\
     <body><div id=\"root\" data-platform=\"{id}\"></div></body></html>",
    id = platform.as_str()
  )
}

/// Write a shell and a manifest for every platform.
pub fn project() -> TempDir {
  let temp = TempDir::new().unwrap();
  for platform in PlatformId::ALL {
    write(&platform.template_path(temp.path()), &shell_for(platform));
    write(
      &platform.manifest_entry().source_path(temp.path()),
      &format!("manifest for {}", platform),
    );
  }
  temp
}

pub fn config(root: &Path, platform: PlatformId, mode: BuildMode) -> BuildConfig {
  BuildConfig::resolve(
    root,
    mode,
    EnvMap::new(),
    BuildOverrides {
      platform: Some(platform.as_str().to_string()),
      out_dir: Some(root.join("out").join(platform.as_str())),
      ..Default::default()
    },
  )
  .unwrap()
}

pub fn write(path: &Path, content: &str) {
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
}
