//! Configuration handed to the external bundler.
//!
//! The bundler compiles the application; this crate decides what it compiles
//! against. [`BundlerConfig`] is that decision as one serializable value.

use std::path::PathBuf;

use serde::Serialize;

use crate::chunk::{ChunkPartitioner, ChunkRule, FALLBACK_CHUNK, THIRD_PARTY_MARKER};
use crate::config::{BuildConfig, BuildMode};
use crate::consts::{BASE_PATH, ENTRY_HTML};
use crate::env::DefineTable;
use crate::legacy::LegacyTargets;
use crate::platform::PlatformId;

#[derive(Debug, Clone, Serialize)]
pub struct ChunkConfig {
  /// Path segment marking third-party modules
  pub third_party_marker: &'static str,
  /// Evaluated in order, first match wins
  pub rules: Vec<ChunkRule>,
  pub fallback: &'static str,
}

impl From<&ChunkPartitioner> for ChunkConfig {
  fn from(partitioner: &ChunkPartitioner) -> Self {
    Self {
      third_party_marker: THIRD_PARTY_MARKER,
      rules: partitioner.rules().to_vec(),
      fallback: FALLBACK_CHUNK,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct BundlerConfig {
  pub platform: PlatformId,
  pub mode: BuildMode,
  /// Value of the bundler's `mode` option
  pub env_mode: &'static str,
  pub root: PathBuf,
  pub out_dir: PathBuf,
  /// Asset URLs are relative so the package can be loaded from `file://`
  pub base: &'static str,
  pub entry: PathBuf,
  pub legacy: LegacyTargets,
  pub chunks: ChunkConfig,
  pub define: DefineTable,
}

impl BundlerConfig {
  pub fn from_build(config: &BuildConfig, partitioner: &ChunkPartitioner) -> Self {
    Self {
      platform: config.platform,
      mode: config.mode,
      env_mode: config.mode.env_name(),
      root: config.root.clone(),
      out_dir: config.out_dir.clone(),
      base: BASE_PATH,
      entry: config.root.join(ENTRY_HTML),
      legacy: LegacyTargets::default(),
      chunks: partitioner.into(),
      define: config.define_table(),
    }
  }
}
