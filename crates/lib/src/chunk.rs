//! Vendor chunk partitioning.
//!
//! Third-party modules are split out of the main bundle into named vendor
//! chunks. Rules are evaluated in order and the first match wins; anything
//! third-party that no named rule claims lands in [`FALLBACK_CHUNK`].

use std::collections::BTreeMap;

use serde::Serialize;

/// Path segment identifying third-party code.
pub const THIRD_PARTY_MARKER: &str = "node_modules";

/// Chunk that catches every third-party module no named rule claims.
pub const FALLBACK_CHUNK: &str = "vendor";

/// A named rule: modules whose path contains `marker` go to `chunk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRule {
  pub marker: String,
  pub chunk: String,
}

impl ChunkRule {
  pub fn new(marker: impl Into<String>, chunk: impl Into<String>) -> Self {
    Self {
      marker: marker.into(),
      chunk: chunk.into(),
    }
  }
}

/// Maps module paths to chunk names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkPartitioner {
  rules: Vec<ChunkRule>,
}

impl Default for ChunkPartitioner {
  fn default() -> Self {
    Self {
      rules: vec![
        ChunkRule::new("core-js", "vendor_corejs"),
        ChunkRule::new("styled-components", "vendor_styled"),
      ],
    }
  }
}

impl ChunkPartitioner {
  /// Append a named rule. It is evaluated after the existing named rules and
  /// always before the fallback.
  pub fn with_rule(mut self, marker: impl Into<String>, chunk: impl Into<String>) -> Self {
    self.rules.push(ChunkRule::new(marker, chunk));
    self
  }

  pub fn rules(&self) -> &[ChunkRule] {
    &self.rules
  }

  /// Chunk for a resolved module path, or `None` for first-party modules
  /// which stay in whatever chunk imports them.
  pub fn assign(&self, module_path: &str) -> Option<&str> {
    let path = module_path.replace('\\', "/");
    if !path.contains(THIRD_PARTY_MARKER) {
      return None;
    }
    let chunk = self
      .rules
      .iter()
      .find(|rule| path.contains(rule.marker.as_str()))
      .map(|rule| rule.chunk.as_str())
      .unwrap_or(FALLBACK_CHUNK);
    Some(chunk)
  }
}

/// Per-chunk totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
  pub modules: usize,
  pub bytes: u64,
}

/// Third-party module assignments, recorded as modules are discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkAssignment {
  modules: BTreeMap<String, String>,
  summary: BTreeMap<String, ChunkSummary>,
}

impl ChunkAssignment {
  pub fn new() -> Self {
    Self::default()
  }

  /// Classify a module and remember the result. Re-recording a module is a no-op.
  pub fn record(&mut self, partitioner: &ChunkPartitioner, module_id: &str, size: u64) -> Option<String> {
    if let Some(chunk) = self.modules.get(module_id) {
      return Some(chunk.clone());
    }
    let chunk = partitioner.assign(module_id)?.to_string();
    self.modules.insert(module_id.to_string(), chunk.clone());
    let entry = self.summary.entry(chunk.clone()).or_default();
    entry.modules += 1;
    entry.bytes += size;
    Some(chunk)
  }

  pub fn chunk_of(&self, module_id: &str) -> Option<&str> {
    self.modules.get(module_id).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  /// Totals per chunk name, sorted by name.
  pub fn summary(&self) -> &BTreeMap<String, ChunkSummary> {
    &self.summary
  }
}
