//! `tvb build`: assemble one platform's deliverable.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use tvbuild_lib::bundle::PrebuiltBundle;
use tvbuild_lib::chunk::ChunkPartitioner;
use tvbuild_lib::config::BuildOverrides;
use tvbuild_lib::stage::StageOutcome;

use crate::TargetArgs;
use crate::output::{
  OutputFormat, chunk_line, format_duration, print_info, print_json, print_stat, print_success, print_warning,
};

/// Build-only inputs on top of the shared target options.
pub struct BuildInputs {
  pub generic: Option<PathBuf>,
  pub modules: Option<PathBuf>,
  pub no_report: bool,
}

pub fn cmd_build(target: TargetArgs, inputs: BuildInputs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let config = super::resolve_config(
    target,
    BuildOverrides {
      generic_html: inputs.generic,
      module_list: inputs.modules,
      no_report: inputs.no_report,
      ..Default::default()
    },
  )?;

  let outcome = tvbuild_lib::run(&config, &PrebuiltBundle, &ChunkPartitioner::default())
    .with_context(|| format!("Failed to build {} ({})", config.platform, config.mode))?;

  for warning in &outcome.warnings {
    print_warning(&warning.to_string());
  }

  if output.is_json() {
    return print_json(&outcome);
  }

  print_success(&format!("Built {} ({})", outcome.platform, outcome.mode));
  print_stat("Entry", &outcome.entry.display().to_string());
  match &outcome.manifest {
    StageOutcome::Staged { destination, .. } => print_stat("Manifest", &destination.display().to_string()),
    StageOutcome::Skipped { .. } => print_stat("Manifest", "none"),
  }
  if let Some(report) = &outcome.report {
    print_stat("Report", &report.display().to_string());
  }

  if !outcome.chunks.is_empty() {
    println!();
    print_info("Vendor chunks:");
    for (chunk, summary) in &outcome.chunks {
      println!("{}", chunk_line(chunk, summary.modules, summary.bytes));
    }
  }

  println!();
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
