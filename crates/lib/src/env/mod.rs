//! Layered build environment.
//!
//! Values come from dotenv-style files in the project root and from the
//! process environment, highest precedence last:
//!
//! ```text
//! .env
//! .env.local
//! .env.<mode>
//! .env.<mode>.local
//! <process environment>
//! ```
//!
//! File values may reference other variables (see [`expand`]). Only the
//! caller reads the process environment; everything downstream works from the
//! resulting [`EnvMap`].

pub mod define;
pub mod expand;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::BuildMode;
use crate::error::BuildError;

pub use define::DefineTable;
pub use expand::RawValue;

/// Resolved environment values for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
  vars: BTreeMap<String, String>,
}

impl EnvMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load env files for `mode` from `root`, then overlay `process_vars`.
  pub fn load<I, K, V>(root: &Path, mode: BuildMode, process_vars: I) -> Result<Self, BuildError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut file_vars = BTreeMap::new();

    for path in env_file_paths(root, mode) {
      let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
        Err(e) => return Err(BuildError::io("failed to read env file", &path)(e)),
      };
      let parsed = parse_env_file(&content).map_err(|line| BuildError::EnvFile {
        path: path.clone(),
        line,
      })?;
      debug!(path = %path.display(), count = parsed.len(), "loaded env file");
      file_vars.extend(parsed);
    }

    let process: BTreeMap<String, String> = process_vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    let mut env = Self {
      vars: expand::expand_all(&file_vars, &process),
    };
    env.vars.extend(process);
    Ok(env)
  }

  /// [`EnvMap::load`] with the current process environment.
  pub fn load_from_process(root: &Path, mode: BuildMode) -> Result<Self, BuildError> {
    Self::load(root, mode, std::env::vars())
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.vars.get(key).map(String::as_str)
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.vars.insert(key.into(), value.into());
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for EnvMap {
  fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
    for (k, v) in iter {
      self.set(k, v);
    }
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut env = Self::new();
    env.extend(iter);
    env
  }
}

/// Env files consulted for `mode`, lowest precedence first.
pub fn env_file_paths(root: &Path, mode: BuildMode) -> Vec<PathBuf> {
  let mode = mode.env_name();
  vec![
    root.join(".env"),
    root.join(".env.local"),
    root.join(format!(".env.{}", mode)),
    root.join(format!(".env.{}.local", mode)),
  ]
}

/// Parse dotenv content. On failure returns the 1-based offending line number.
pub fn parse_env_file(content: &str) -> Result<Vec<(String, RawValue)>, usize> {
  let mut vars = Vec::new();

  for (idx, raw) in content.lines().enumerate() {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

    let (key, value) = line.split_once('=').ok_or(idx + 1)?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
      return Err(idx + 1);
    }

    let value = unquote(value.trim()).ok_or(idx + 1)?;
    vars.push((key.to_string(), value));
  }

  Ok(vars)
}

/// Strip quotes and trailing comments from a value.
fn unquote(value: &str) -> Option<RawValue> {
  if let Some(rest) = value.strip_prefix('"') {
    let end = closing_quote(rest, '"')?;
    let inner = trailing_comment_only(rest, end)?;
    return Some(RawValue::Template(inner.replace("\\n", "\n").replace("\\\"", "\"")));
  }
  if let Some(rest) = value.strip_prefix('\'') {
    let end = closing_quote(rest, '\'')?;
    let inner = trailing_comment_only(rest, end)?;
    return Some(RawValue::Literal(inner.to_string()));
  }
  let value = match value.find(" #") {
    Some(pos) => value[..pos].trim_end(),
    None => value,
  };
  Some(RawValue::Template(value.to_string()))
}

/// Offset of the closing `quote` in `s`. Double quotes may be escaped.
fn closing_quote(s: &str, quote: char) -> Option<usize> {
  let mut escaped = false;
  for (i, c) in s.char_indices() {
    if escaped {
      escaped = false;
    } else if c == '\\' && quote == '"' {
      escaped = true;
    } else if c == quote {
      return Some(i);
    }
  }
  None
}

/// The quoted text before `end`, provided nothing but a comment follows the quote.
fn trailing_comment_only(quoted: &str, end: usize) -> Option<&str> {
  let after = quoted[end + 1..].trim_start();
  (after.is_empty() || after.starts_with('#')).then_some(&quoted[..end])
}
