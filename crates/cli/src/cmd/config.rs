use anyhow::Result;

use tvbuild_lib::chunk::ChunkPartitioner;
use tvbuild_lib::config::BuildOverrides;
use tvbuild_lib::export::BundlerConfig;

use crate::TargetArgs;
use crate::output::print_json;

pub fn cmd_config(target: TargetArgs) -> Result<()> {
  let config = super::resolve_config(target, BuildOverrides::default())?;
  print_json(&BundlerConfig::from_build(&config, &ChunkPartitioner::default()))
}
