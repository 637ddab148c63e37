//! tvbuild-lib: deliverable assembly for TV web runtimes
//!
//! One codebase ships to several TV platforms. Each platform wants its own
//! HTML shell and its own descriptor file; this crate turns the output of a
//! generic bundler run into a per-platform package:
//! - `platform`: the closed set of supported platforms and their file layout
//! - `config` / `env`: the explicit per-build configuration
//! - `bundle` / `chunk`: the bundler seam and vendor chunk partitioning
//! - `html` / `template`: asset tag extraction and entry document assembly
//! - `stage` / `report`: manifest staging and the bundle size report
//! - `stash`: keeps bundler output readable after the deliverable overwrites it
//! - `pipeline`: the whole thing, end to end

pub mod bundle;
pub mod chunk;
pub mod config;
pub mod consts;
pub mod env;
pub mod error;
pub mod export;
pub mod html;
pub mod legacy;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod stage;
pub mod stash;
pub mod template;

pub use error::{BuildError, BuildWarning};
pub use pipeline::{BuildOutcome, run};
