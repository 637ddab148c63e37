//! Platform shell loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BuildError;
use crate::html::{DocumentShell, parse_shell};
use crate::platform::PlatformId;

/// A platform's HTML shell, parsed and ready to receive assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTemplate {
  pub platform: PlatformId,
  pub path: PathBuf,
  pub shell: DocumentShell,
}

/// Load `<root>/platform/<id>.html`.
///
/// Both a missing file and a shell without exactly one head and one body are
/// fatal: there is no sensible deliverable without a shell.
pub fn load_template(root: &Path, platform: PlatformId) -> Result<PlatformTemplate, BuildError> {
  let path = platform.template_path(root);

  let source = match fs::read_to_string(&path) {
    Ok(source) => source,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(BuildError::MissingTemplate { platform, path });
    }
    Err(e) => return Err(BuildError::io("failed to read template", &path)(e)),
  };

  let shell = parse_shell(&source).map_err(|e| BuildError::MalformedTemplate {
    platform,
    path: path.clone(),
    reason: e.to_string(),
  })?;

  debug!(
    platform = %platform,
    path = %path.display(),
    head_nodes = shell.head.len(),
    body_nodes = shell.body.len(),
    "loaded platform template"
  );

  Ok(PlatformTemplate { platform, path, shell })
}
