//! Manifest staging.
//!
//! Copies the selected platform's descriptor into the output directory. The
//! descriptor is an opaque blob; its format is the runtime's business.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::BuildError;
use crate::platform::PlatformId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
  Staged { source: PathBuf, destination: PathBuf },
  /// The platform has no descriptor at its expected path
  Skipped { source: PathBuf },
}

/// Copy the platform's manifest from `root` into `out_dir`.
///
/// A missing source is not an error and leaves `out_dir` untouched. Otherwise
/// `out_dir` is created if needed and the file copied byte for byte; repeating
/// the call yields the same destination content.
pub fn stage_manifest(root: &Path, out_dir: &Path, platform: PlatformId) -> Result<StageOutcome, BuildError> {
  let entry = platform.manifest_entry();
  let source = entry.source_path(root);

  if !source.is_file() {
    warn!(platform = %platform, path = %source.display(), "manifest not found, skipping");
    return Ok(StageOutcome::Skipped { source });
  }

  fs::create_dir_all(out_dir).map_err(BuildError::io("failed to create output directory", out_dir))?;

  let destination = entry.destination_path(out_dir);
  fs::copy(&source, &destination).map_err(BuildError::io("failed to copy manifest to", &destination))?;

  info!(
    platform = %platform,
    source = %source.display(),
    destination = %destination.display(),
    "staged manifest"
  );

  Ok(StageOutcome::Staged { source, destination })
}
