//! End-to-end deliverable assembly for one platform.
//!
//! [`run`] dispatches once on [`BuildMode`]:
//! - release: bundle, extract asset tags, load the platform shell, merge,
//!   write the entry document, stage the manifest, emit the size report.
//! - development: read the generic document, attach devtools, write the
//!   entry document, stage the manifest.
//!
//! Template problems abort before anything is written. Conditions the build
//! survives are collected as [`BuildWarning`]s on the outcome. Running again
//! over the same output directory is safe: see [`crate::stash`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::bundle::Bundler;
use crate::chunk::{ChunkPartitioner, ChunkSummary};
use crate::config::{BuildConfig, BuildMode};
use crate::error::{BuildError, BuildWarning};
use crate::html::{self, HtmlError};
use crate::platform::PlatformId;
use crate::report::emit_report;
use crate::stage::{StageOutcome, stage_manifest};
use crate::stash;
use crate::template::load_template;

/// What a successful build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
  pub platform: PlatformId,
  pub mode: BuildMode,
  /// The written `<out>/index.html`
  pub entry: PathBuf,
  pub manifest: StageOutcome,
  /// Size report, release builds only
  pub report: Option<PathBuf>,
  /// Vendor chunk totals, empty for development builds
  pub chunks: BTreeMap<String, ChunkSummary>,
  pub warnings: Vec<BuildWarning>,
}

/// Assemble the deliverable described by `config`.
pub fn run(
  config: &BuildConfig,
  bundler: &dyn Bundler,
  partitioner: &ChunkPartitioner,
) -> Result<BuildOutcome, BuildError> {
  info!(
    platform = %config.platform,
    mode = %config.mode,
    out_dir = %config.out_dir.display(),
    "starting build"
  );

  let outcome = match config.mode {
    BuildMode::Release => run_release(config, bundler, partitioner)?,
    BuildMode::Development => run_development(config)?,
  };

  info!(
    platform = %outcome.platform,
    entry = %outcome.entry.display(),
    warnings = outcome.warnings.len(),
    "build complete"
  );
  Ok(outcome)
}

fn run_release(
  config: &BuildConfig,
  bundler: &dyn Bundler,
  partitioner: &ChunkPartitioner,
) -> Result<BuildOutcome, BuildError> {
  let output = bundler.bundle(config, partitioner)?;

  let tags = html::extract_asset_tags(&output.generic_html)
    .map_err(|e| malformed_document(config, &config.generic_html, e))?;
  let template = load_template(&config.root, config.platform)?;
  let document = html::merge(&template.shell, &tags);

  let html = document.to_html();
  let entry = write_entry(config, &html)?;
  stash::record_entry(config, &output.generic_html, &html)?;

  let mut warnings = Vec::new();
  let manifest = stage(config, &mut warnings)?;

  let report = if config.emit_report {
    match emit_report(&config.out_dir, config.platform, &config.app.name, &output.graph) {
      Ok(path) => Some(path),
      Err(e) => {
        warn!(platform = %config.platform, error = %e, "failed to write bundle report");
        warnings.push(BuildWarning::ReportEmission {
          platform: config.platform,
          message: e.to_string(),
        });
        None
      }
    }
  } else {
    None
  };

  Ok(BuildOutcome {
    platform: config.platform,
    mode: config.mode,
    entry,
    manifest,
    report,
    chunks: output.graph.chunks.summary().clone(),
    warnings,
  })
}

fn run_development(config: &BuildConfig) -> Result<BuildOutcome, BuildError> {
  let generic_html = stash::read_generic(config)?;

  let html = html::passthrough(&generic_html).map_err(|e| malformed_document(config, &config.generic_html, e))?;
  let entry = write_entry(config, &html)?;
  stash::record_entry(config, &generic_html, &html)?;

  let mut warnings = Vec::new();
  let manifest = stage(config, &mut warnings)?;

  Ok(BuildOutcome {
    platform: config.platform,
    mode: config.mode,
    entry,
    manifest,
    report: None,
    chunks: BTreeMap::new(),
    warnings,
  })
}

fn write_entry(config: &BuildConfig, html: &str) -> Result<PathBuf, BuildError> {
  fs::create_dir_all(&config.out_dir).map_err(BuildError::io("failed to create output directory", &config.out_dir))?;
  let entry = config.entry_path();
  fs::write(&entry, html).map_err(BuildError::io("failed to write", &entry))?;
  info!(platform = %config.platform, path = %entry.display(), bytes = html.len(), "wrote entry document");
  Ok(entry)
}

fn stage(config: &BuildConfig, warnings: &mut Vec<BuildWarning>) -> Result<StageOutcome, BuildError> {
  let outcome = stage_manifest(&config.root, &config.out_dir, config.platform)?;
  if let StageOutcome::Skipped { source } = &outcome {
    warnings.push(BuildWarning::MissingManifest {
      platform: config.platform,
      path: source.clone(),
    });
  }
  Ok(outcome)
}

fn malformed_document(config: &BuildConfig, path: &Path, error: HtmlError) -> BuildError {
  BuildError::MalformedDocument {
    platform: config.platform,
    path: path.to_path_buf(),
    reason: error.to_string(),
  }
}
