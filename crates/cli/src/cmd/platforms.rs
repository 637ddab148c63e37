//! `tvb platforms`: the supported platforms and where their files live.

use anyhow::Result;
use serde::Serialize;

use tvbuild_lib::consts::PLATFORM_DIR;
use tvbuild_lib::platform::PlatformId;

use crate::output::{OutputFormat, print_info, print_json, symbols};

#[derive(Serialize)]
struct PlatformRow {
  id: PlatformId,
  default: bool,
  template: String,
  manifest: &'static str,
  staged_as: &'static str,
}

pub fn cmd_platforms(output: OutputFormat) -> Result<()> {
  let rows: Vec<PlatformRow> = PlatformId::ALL
    .into_iter()
    .map(|platform| {
      let entry = platform.manifest_entry();
      PlatformRow {
        id: platform,
        default: platform == PlatformId::default(),
        template: format!("{}/{}.html", PLATFORM_DIR, platform.as_str()),
        manifest: entry.source,
        staged_as: entry.destination,
      }
    })
    .collect();

  if output.is_json() {
    return print_json(&rows);
  }

  print_info("Supported platforms:");
  for row in &rows {
    let marker = if row.default { " (default)" } else { "" };
    println!("  {}{}", row.id, marker);
    println!("    template: {}", row.template);
    println!("    manifest: {} {} {}", row.manifest, symbols::ARROW, row.staged_as);
  }

  Ok(())
}
