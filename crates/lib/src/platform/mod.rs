//! Supported TV runtimes and selector resolution.

pub mod manifest;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::PLATFORM_DIR;
use crate::error::BuildError;

pub use manifest::PlatformManifestEntry;

/// TV runtime a deliverable is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
  /// LG webOS
  #[serde(rename = "webos")]
  WebOs,
  /// Samsung Tizen
  Tizen,
  /// Hisense VIDAA
  #[serde(rename = "vida")]
  Vidaa,
  /// Xbox (UWP hosted web app)
  Xbox,
}

impl PlatformId {
  /// Every supported platform, in declaration order. The first entry is the default.
  pub const ALL: [PlatformId; 4] = [Self::WebOs, Self::Tizen, Self::Vidaa, Self::Xbox];

  /// Returns the identifier used in selectors and file layouts
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WebOs => "webos",
      Self::Tizen => "tizen",
      Self::Vidaa => "vida",
      Self::Xbox => "xbox",
    }
  }

  /// Parse an identifier, ignoring ASCII case and surrounding whitespace.
  pub fn from_id(id: &str) -> Option<Self> {
    let id = id.trim();
    Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(id))
  }

  /// Path of this platform's HTML shell under the project root.
  pub fn template_path(&self, root: &Path) -> PathBuf {
    root.join(PLATFORM_DIR).join(format!("{}.html", self.as_str()))
  }

  /// Static manifest staging entry for this platform.
  pub fn manifest_entry(&self) -> &'static PlatformManifestEntry {
    manifest::entry_for(*self)
  }
}

impl Default for PlatformId {
  fn default() -> Self {
    Self::ALL[0]
  }
}

impl fmt::Display for PlatformId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Comma separated list of supported identifiers, for diagnostics.
pub fn supported_ids() -> String {
  PlatformId::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
}

/// Resolve the platform selector.
///
/// An absent or blank selector resolves to the default platform so a bare
/// invocation always produces a deliverable. Anything else must name a
/// supported platform.
pub fn resolve_platform(selector: Option<&str>) -> Result<PlatformId, BuildError> {
  match selector.map(str::trim) {
    None | Some("") => Ok(PlatformId::default()),
    Some(name) => PlatformId::from_id(name).ok_or_else(|| BuildError::UnsupportedPlatform {
      name: name.to_string(),
      supported: supported_ids(),
    }),
  }
}
