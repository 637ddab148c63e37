//! Generic documents kept aside when the deliverable overwrites them.
//!
//! By default a release build reads the bundler's `<out>/index.html` and writes
//! the assembled entry document to the same path. Once that has happened the
//! file on disk is no longer bundler output, so a second run (or a run for the
//! next platform) would merge the previous deliverable into the shell again.
//! Every entry document written over its own input is therefore recorded
//! together with the generic document it replaced, and a later read of an
//! unchanged deliverable yields the recorded generic document instead.
//!
//! # Storage Layout
//!
//! ```text
//! {root}/.tvbuild/
//! └── entries.json        # entry path -> { generic, entry }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::consts::STATE_DIR;
use crate::error::BuildError;

/// Index file name.
const INDEX_FILENAME: &str = "entries.json";

/// Current index format version.
const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StashIndex {
  version: u32,
  entries: BTreeMap<String, StashedEntry>,
}

impl Default for StashIndex {
  fn default() -> Self {
    Self {
      version: INDEX_VERSION,
      entries: BTreeMap::new(),
    }
  }
}

/// A written entry document and the generic document it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashedEntry {
  pub generic: String,
  pub entry: String,
}

/// On-disk index of stashed generic documents for one project.
#[derive(Debug, Clone)]
pub struct GenericStash {
  path: PathBuf,
}

impl GenericStash {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }

  /// The stash under `<root>/.tvbuild`.
  pub fn for_project(root: &Path) -> Self {
    Self::new(root.join(STATE_DIR).join(INDEX_FILENAME))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Stashed documents for the entry written to `entry_path`.
  pub fn get(&self, entry_path: &Path) -> Result<Option<StashedEntry>, BuildError> {
    let mut index = self.load()?;
    Ok(index.entries.remove(&key(entry_path)))
  }

  /// Record `entry` as written to `entry_path` in place of `generic`.
  pub fn insert(&self, entry_path: &Path, generic: &str, entry: &str) -> Result<(), BuildError> {
    let mut index = self.load()?;
    index.entries.insert(
      key(entry_path),
      StashedEntry {
        generic: generic.to_string(),
        entry: entry.to_string(),
      },
    );
    self.save(&index)
  }

  /// Returns an empty index if the file doesn't exist.
  fn load(&self) -> Result<StashIndex, BuildError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StashIndex::default()),
      Err(e) => return Err(BuildError::io("failed to read", &self.path)(e)),
    };

    let index: StashIndex = serde_json::from_str(&content).map_err(|e| self.state_error(e.to_string()))?;
    if index.version != INDEX_VERSION {
      return Err(self.state_error(format!("unsupported version {}", index.version)));
    }
    Ok(index)
  }

  /// Write to a temp file, then rename over the index.
  fn save(&self, index: &StashIndex) -> Result<(), BuildError> {
    if let Some(dir) = self.path.parent() {
      fs::create_dir_all(dir).map_err(BuildError::io("failed to create state directory", dir))?;
    }

    let temp_path = self.path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(index).map_err(|e| self.state_error(e.to_string()))?;
    fs::write(&temp_path, content).map_err(BuildError::io("failed to write", &temp_path))?;
    fs::rename(&temp_path, &self.path).map_err(BuildError::io("failed to write", &self.path))?;
    Ok(())
  }

  fn state_error(&self, message: String) -> BuildError {
    BuildError::State {
      path: self.path.clone(),
      message,
    }
  }
}

fn key(entry_path: &Path) -> String {
  entry_path.to_string_lossy().into_owned()
}

/// Whether the build writes its entry document over its own input.
fn overwrites_input(config: &BuildConfig) -> bool {
  config.generic_html == config.entry_path()
}

/// Read the generic document `config` transforms.
///
/// When the input is also the output and still holds the entry document a
/// previous run wrote, the generic document stashed by that run is returned.
/// Anything else on disk is taken as fresh bundler output.
pub fn read_generic(config: &BuildConfig) -> Result<String, BuildError> {
  let current = match fs::read_to_string(&config.generic_html) {
    Ok(html) => html,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(BuildError::MissingGenericHtml {
        platform: config.platform,
        path: config.generic_html.clone(),
      });
    }
    Err(e) => return Err(BuildError::io("failed to read", &config.generic_html)(e)),
  };

  if !overwrites_input(config) {
    return Ok(current);
  }

  match GenericStash::for_project(&config.root).get(&config.generic_html)? {
    Some(stashed) if stashed.entry == current => {
      info!(
        platform = %config.platform,
        path = %config.generic_html.display(),
        "input is a previous deliverable, using stashed generic document"
      );
      Ok(stashed.generic)
    }
    _ => Ok(current),
  }
}

/// Remember the generic document behind a freshly written entry document.
///
/// A no-op unless the entry document replaced the build's own input.
pub fn record_entry(config: &BuildConfig, generic: &str, entry: &str) -> Result<(), BuildError> {
  if !overwrites_input(config) {
    return Ok(());
  }

  let stash = GenericStash::for_project(&config.root);
  stash.insert(&config.entry_path(), generic, entry)?;
  debug!(path = %stash.path().display(), entry = %config.entry_path().display(), "stashed generic document");
  Ok(())
}
