//! Release and development assembly across every supported platform.

use std::fs;

use tvbuild_lib::chunk::ChunkPartitioner;
use tvbuild_lib::config::BuildMode;
use tvbuild_lib::consts::DEV_TOOLS_SCRIPT;
use tvbuild_lib::html::{self, extract_asset_tags};
use tvbuild_lib::platform::PlatformId;
use tvbuild_lib::run;
use tvbuild_lib::stage::StageOutcome;

use super::common::{GENERIC_HTML, InMemoryBundler, config, project, write};

#[test]
fn release_uses_each_platform_shell() {
  let temp = project();

  for platform in PlatformId::ALL {
    let config = config(temp.path(), platform, BuildMode::Release);
    let outcome = run(&config, &InMemoryBundler::new(), &ChunkPartitioner::default()).unwrap();

    let html = fs::read_to_string(&outcome.entry).unwrap();
    assert!(html.contains(&format!("content=\"{}\"", platform)), "{}: {}", platform, html);
    assert!(html.contains(&format!("data-platform=\"{}\"", platform)));
    assert!(!html.contains("<title>generic</title>"));

    // Every generated tag survives, in order, and nothing else is added.
    let tags = extract_asset_tags(&html).unwrap();
    assert_eq!(tags, extract_asset_tags(GENERIC_HTML).unwrap());

    let destination = config.out_dir.join(platform.manifest_entry().destination);
    assert_eq!(
      outcome.manifest,
      StageOutcome::Staged {
        source: platform.manifest_entry().source_path(&config.root),
        destination: destination.clone(),
      }
    );
    assert_eq!(fs::read_to_string(destination).unwrap(), format!("manifest for {}", platform));
    assert!(outcome.report.is_some());
  }
}

#[test]
fn release_output_reparses_as_single_head_and_body() {
  let temp = project();
  let config = config(temp.path(), PlatformId::Tizen, BuildMode::Release);

  let outcome = run(&config, &InMemoryBundler::new(), &ChunkPartitioner::default()).unwrap();

  let shell = html::parse_shell(&fs::read_to_string(outcome.entry).unwrap()).unwrap();
  assert!(shell.head_html().contains("main-1.js"));
  assert!(shell.body_html().contains("data-platform=\"tizen\""));
}

#[test]
fn release_with_no_generated_tags_keeps_shell_head() {
  let temp = project();
  let config = config(temp.path(), PlatformId::Xbox, BuildMode::Release);
  let bundler = InMemoryBundler {
    html: "<html><head></head><body></body></html>".to_string(),
    modules: Vec::new(),
  };

  let outcome = run(&config, &bundler, &ChunkPartitioner::default()).unwrap();

  let shell = html::parse_shell(&fs::read_to_string(outcome.entry).unwrap()).unwrap();
  assert_eq!(shell.head_html(), "<meta name=\"platform\" content=\"xbox\">");
  assert!(outcome.chunks.is_empty());
}

#[test]
fn custom_chunk_rules_reach_the_outcome() {
  let temp = project();
  let config = config(temp.path(), PlatformId::WebOs, BuildMode::Release);
  let mut bundler = InMemoryBundler::new();
  bundler.modules.push(tvbuild_lib::bundle::ModuleRecord {
    id: "/node_modules/lodash/map.js".to_string(),
    size: 7,
  });

  let partitioner = ChunkPartitioner::default().with_rule("lodash", "vendor_lodash");
  let outcome = run(&config, &bundler, &partitioner).unwrap();

  assert_eq!(outcome.chunks["vendor_lodash"].bytes, 7);
  assert_eq!(outcome.chunks["vendor_corejs"].modules, 1);
}

#[test]
fn development_ignores_platform_shell() {
  let temp = project();
  write(&temp.path().join("index.html"), GENERIC_HTML);

  for platform in PlatformId::ALL {
    let config = config(temp.path(), platform, BuildMode::Development);
    let outcome = run(&config, &InMemoryBundler::new(), &ChunkPartitioner::default()).unwrap();

    let html = fs::read_to_string(&outcome.entry).unwrap();
    assert_eq!(html.replacen(DEV_TOOLS_SCRIPT, "", 1), GENERIC_HTML);
    assert!(!html.contains("data-platform"));
    assert!(matches!(outcome.manifest, StageOutcome::Staged { .. }));
  }
}
