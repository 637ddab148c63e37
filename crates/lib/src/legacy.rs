//! Legacy browser targets for the transpilation stage.
//!
//! The transpiler itself is an external bundler plugin; this is the
//! declarative input it is configured with. The oldest runtime we ship to
//! embeds Chrome 47, so everything past ES5 needs a polyfill.

use serde::Serialize;

/// core-js modules injected into the legacy bundle.
pub const LEGACY_POLYFILLS: &[&str] = &[
  "es.promise",
  "es.array.iterator",
  "es.symbol",
  "es.symbol.iterator",
  "es.object.assign",
  "es.array.from",
  "es.promise.finally",
  "es.array.includes",
  "es.array.find",
  "es.array.find-index",
  "es.string.includes",
  "es.string.starts-with",
  "es.string.ends-with",
  "es.number.is-nan",
  "es.number.is-finite",
  "es.weak-map",
  "es.map",
  "es.set",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyTargets {
  /// Browserslist queries
  pub targets: Vec<String>,
  /// Whole packages bundled ahead of the legacy entry
  pub additional_legacy_polyfills: Vec<String>,
  pub render_legacy_chunks: bool,
  pub polyfills: Vec<String>,
}

impl Default for LegacyTargets {
  fn default() -> Self {
    Self {
      targets: vec!["chrome 47".to_string()],
      additional_legacy_polyfills: vec!["core-js/stable".to_string(), "whatwg-fetch".to_string()],
      render_legacy_chunks: true,
      polyfills: LEGACY_POLYFILLS.iter().map(|s| s.to_string()).collect(),
    }
  }
}
