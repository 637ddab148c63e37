mod build;
mod chunk;
mod config;
mod platforms;

use anyhow::{Context, Result};
use tracing::debug;

use tvbuild_lib::config::{BuildConfig, BuildMode, BuildOverrides};
use tvbuild_lib::env::EnvMap;

use crate::TargetArgs;

pub use build::{BuildInputs, cmd_build};
pub use chunk::cmd_chunk;
pub use config::cmd_config;
pub use platforms::cmd_platforms;

/// Load the layered environment and resolve the configuration for `target`.
///
/// This is the only place the process environment is read.
fn resolve_config(target: TargetArgs, mut overrides: BuildOverrides) -> Result<BuildConfig> {
  let mode = BuildMode::from(target.mode);
  let env = EnvMap::load_from_process(&target.root, mode)
    .with_context(|| format!("Failed to load environment from {}", target.root.display()))?;

  overrides.platform = target.platform;
  overrides.out_dir = target.out;

  let config = BuildConfig::resolve(&target.root, mode, env, overrides).context("Failed to resolve build configuration")?;
  debug!(
    platform = %config.platform,
    mode = %config.mode,
    root = %config.root.display(),
    env_vars = config.env.len(),
    "resolved build configuration"
  );
  Ok(config)
}
