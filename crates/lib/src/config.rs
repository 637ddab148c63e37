//! Build configuration, constructed once per invocation.
//!
//! Everything the pipeline needs is captured here up front; no component reads
//! the process environment or guesses paths on its own.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_OUT_DIR, ENTRY_HTML, PLATFORM_ENV_KEY};
use crate::env::{DefineTable, EnvMap};
use crate::error::BuildError;
use crate::platform::{PlatformId, resolve_platform};

/// Fallback when `package.json` carries no version.
const UNKNOWN_VERSION: &str = "0.0.0";

/// How the entry document is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  /// Assets are served live; the generic document passes through with devtools attached.
  Development,
  /// Bundler output is merged into the platform shell.
  #[default]
  Release,
}

impl BuildMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Release => "release",
    }
  }

  /// Mode name used to select `.env.<mode>` files.
  pub fn env_name(&self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Release => "production",
    }
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Name and version read from the project's `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
  pub name: String,
  pub version: String,
}

#[derive(Deserialize)]
struct PackageJson {
  name: Option<String>,
  version: Option<String>,
}

impl AppMetadata {
  /// Read `<root>/package.json`.
  ///
  /// A missing or unparseable file is not fatal: the name falls back to the
  /// root directory name and the version to `0.0.0`.
  pub fn load(root: &Path) -> Result<Self, BuildError> {
    let fallback_name = root
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "app".to_string());
    let path = root.join("package.json");

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        warn!(path = %path.display(), "package.json not found, using default app version");
        return Ok(Self {
          name: fallback_name,
          version: UNKNOWN_VERSION.to_string(),
        });
      }
      Err(e) => return Err(BuildError::io("failed to read", &path)(e)),
    };

    let package: PackageJson = match serde_json::from_str(&content) {
      Ok(package) => package,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "failed to parse package.json, using default app version");
        PackageJson {
          name: None,
          version: None,
        }
      }
    };

    Ok(Self {
      name: package.name.unwrap_or(fallback_name),
      version: package.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
    })
  }
}

/// Everything one build invocation needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
  /// Project root containing `platform/`, env files and `package.json`
  pub root: PathBuf,
  /// Directory the deliverable is written to
  pub out_dir: PathBuf,
  pub platform: PlatformId,
  pub mode: BuildMode,
  pub env: EnvMap,
  pub app: AppMetadata,
  /// Generic document to transform. See [`BuildConfig::default_generic_html`].
  pub generic_html: PathBuf,
  /// Optional module list describing the bundle graph
  pub module_list: Option<PathBuf>,
  /// Whether release builds emit the size report
  pub emit_report: bool,
  /// Clock reading used for the build stamp
  pub built_at: DateTime<Utc>,
}

/// Caller-supplied overrides for [`BuildConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
  /// Explicit platform selector; beats the environment key
  pub platform: Option<String>,
  pub out_dir: Option<PathBuf>,
  pub generic_html: Option<PathBuf>,
  pub module_list: Option<PathBuf>,
  pub no_report: bool,
}

impl BuildConfig {
  /// Resolve the configuration from an already loaded environment.
  pub fn resolve(root: &Path, mode: BuildMode, env: EnvMap, overrides: BuildOverrides) -> Result<Self, BuildError> {
    let root = dunce::canonicalize(root).map_err(BuildError::io("failed to resolve project root", root))?;

    let selector = overrides.platform.as_deref().or_else(|| env.get(PLATFORM_ENV_KEY));
    let platform = resolve_platform(selector)?;

    let out_dir = overrides
      .out_dir
      .map(|dir| absolutize(&root, dir))
      .unwrap_or_else(|| root.join(DEFAULT_OUT_DIR));
    let generic_html = overrides
      .generic_html
      .map(|path| absolutize(&root, path))
      .unwrap_or_else(|| Self::default_generic_html(mode, &root, &out_dir));
    let module_list = overrides.module_list.map(|path| absolutize(&root, path));

    let app = AppMetadata::load(&root)?;

    Ok(Self {
      root,
      out_dir,
      platform,
      mode,
      env,
      app,
      generic_html,
      module_list,
      emit_report: !overrides.no_report,
      built_at: Utc::now(),
    })
  }

  /// Release builds transform the bundler's emitted entry document; development
  /// builds transform the project's source entry document.
  pub fn default_generic_html(mode: BuildMode, root: &Path, out_dir: &Path) -> PathBuf {
    match mode {
      BuildMode::Release => out_dir.join(ENTRY_HTML),
      BuildMode::Development => root.join(ENTRY_HTML),
    }
  }

  /// Path of the deliverable's entry document.
  pub fn entry_path(&self) -> PathBuf {
    self.out_dir.join(ENTRY_HTML)
  }

  pub fn template_path(&self) -> PathBuf {
    self.platform.template_path(&self.root)
  }

  /// Values the bundler substitutes for `process.env`.
  pub fn define_table(&self) -> DefineTable {
    DefineTable::build(&self.env, &self.app.version, self.built_at)
  }
}

fn absolutize(root: &Path, path: PathBuf) -> PathBuf {
  if path.is_absolute() { path } else { root.join(path) }
}
