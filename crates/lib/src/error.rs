//! Build errors and non-fatal warnings.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::platform::PlatformId;

/// Fatal errors. Any of these aborts the invocation.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("unsupported platform '{name}' (supported: {supported})")]
  UnsupportedPlatform { name: String, supported: String },

  #[error("[{platform}] template not found: {}", path.display())]
  MissingTemplate { platform: PlatformId, path: PathBuf },

  #[error("[{platform}] malformed template {}: {reason}", path.display())]
  MalformedTemplate {
    platform: PlatformId,
    path: PathBuf,
    reason: String,
  },

  #[error("[{platform}] malformed document {}: {reason}", path.display())]
  MalformedDocument {
    platform: PlatformId,
    path: PathBuf,
    reason: String,
  },

  #[error("[{platform}] generic bundler output not found: {}", path.display())]
  MissingGenericHtml { platform: PlatformId, path: PathBuf },

  #[error("invalid module list {}: {message}", path.display())]
  ModuleList { path: PathBuf, message: String },

  #[error("unreadable build state {}: {message}", path.display())]
  State { path: PathBuf, message: String },

  #[error("invalid line {line} in env file {}", path.display())]
  EnvFile { path: PathBuf, line: usize },

  #[error("{action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl BuildError {
  pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { action, path, source }
  }
}

/// Non-fatal conditions recorded while the pipeline keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
  /// The platform ships no descriptor at the expected path
  MissingManifest { platform: PlatformId, path: PathBuf },
  /// The size report could not be written
  ReportEmission { platform: PlatformId, message: String },
}

impl std::fmt::Display for BuildWarning {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingManifest { platform, path } => {
        write!(f, "[{}] manifest not found, skipped: {}", platform, path.display())
      }
      Self::ReportEmission { platform, message } => {
        write!(f, "[{}] bundle report not written: {}", platform, message)
      }
    }
  }
}
