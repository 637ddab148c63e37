//! Static table of platform manifests/descriptors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::PlatformId;

/// Where a platform's descriptor lives in the project and what it is called in the deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformManifestEntry {
  pub platform: PlatformId,
  /// Source path, relative to the project root
  pub source: &'static str,
  /// Filename inside the output directory
  pub destination: &'static str,
}

impl PlatformManifestEntry {
  pub fn source_path(&self, root: &Path) -> PathBuf {
    self.source.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
  }

  pub fn destination_path(&self, out_dir: &Path) -> PathBuf {
    out_dir.join(self.destination)
  }
}

static MANIFESTS: [PlatformManifestEntry; 4] = [
  PlatformManifestEntry {
    platform: PlatformId::WebOs,
    source: "platform/webos/appinfo.json",
    destination: "appinfo.json",
  },
  PlatformManifestEntry {
    platform: PlatformId::Tizen,
    source: "platform/tizen/tizen.xml",
    destination: "tizen.xml",
  },
  PlatformManifestEntry {
    platform: PlatformId::Vidaa,
    source: "platform/vida/vida.manifest",
    destination: "vida.manifest",
  },
  PlatformManifestEntry {
    platform: PlatformId::Xbox,
    source: "platform/xbox/appxmanifest.xml",
    destination: "appxmanifest.xml",
  },
];

pub(crate) fn entry_for(platform: PlatformId) -> &'static PlatformManifestEntry {
  match platform {
    PlatformId::WebOs => &MANIFESTS[0],
    PlatformId::Tizen => &MANIFESTS[1],
    PlatformId::Vidaa => &MANIFESTS[2],
    PlatformId::Xbox => &MANIFESTS[3],
  }
}
