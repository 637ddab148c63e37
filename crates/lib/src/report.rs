//! Bundle size report.
//!
//! Release builds drop a static HTML page next to the deliverable summarising
//! vendor chunks and the size of every emitted script and stylesheet. The
//! filename carries the platform so multi-platform CI runs sharing an
//! artifact directory do not overwrite each other.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

use crate::bundle::BundleGraph;
use crate::platform::PlatformId;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("failed to scan {}: {source}", path.display())]
  Scan { path: PathBuf, source: walkdir::Error },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// Size of one emitted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSize {
  /// Path relative to the output directory, `/` separated
  pub path: String,
  pub bytes: u64,
  pub gzip_bytes: u64,
}

pub fn report_filename(platform: PlatformId) -> String {
  format!("bundle-analysis-{}.html", platform.as_str())
}

/// Write the report for `platform` into `out_dir` and return its path.
pub fn emit_report(
  out_dir: &Path,
  platform: PlatformId,
  app_name: &str,
  graph: &BundleGraph,
) -> Result<PathBuf, ReportError> {
  let assets = measure_assets(out_dir)?;
  let title = format!("{} - {} Bundle Analysis", app_name, platform.as_str().to_uppercase());
  let html = render(&title, graph, &assets);

  let path = out_dir.join(report_filename(platform));
  fs::write(&path, html).map_err(|source| ReportError::Write {
    path: path.clone(),
    source,
  })?;

  info!(platform = %platform, path = %path.display(), assets = assets.len(), "wrote bundle report");
  Ok(path)
}

/// Every `.js` / `.css` file under `out_dir`, sorted by path.
pub fn measure_assets(out_dir: &Path) -> Result<Vec<AssetSize>, ReportError> {
  let mut assets = Vec::new();

  for entry in WalkDir::new(out_dir).sort_by_file_name() {
    let entry = entry.map_err(|source| ReportError::Scan {
      path: out_dir.to_path_buf(),
      source,
    })?;
    if !entry.file_type().is_file() {
      continue;
    }
    let is_asset = matches!(
      entry.path().extension().and_then(|e| e.to_str()),
      Some("js") | Some("css")
    );
    if !is_asset {
      continue;
    }

    let content = fs::read(entry.path()).map_err(|source| ReportError::Read {
      path: entry.path().to_path_buf(),
      source,
    })?;
    let relative = entry.path().strip_prefix(out_dir).unwrap_or(entry.path());
    assets.push(AssetSize {
      path: relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"),
      bytes: content.len() as u64,
      gzip_bytes: gzip_size(&content).map_err(|source| ReportError::Read {
        path: entry.path().to_path_buf(),
        source,
      })?,
    });
  }

  Ok(assets)
}

fn gzip_size(content: &[u8]) -> io::Result<u64> {
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(content)?;
  Ok(encoder.finish()?.len() as u64)
}

fn render(title: &str, graph: &BundleGraph, assets: &[AssetSize]) -> String {
  let mut html = String::new();
  let title = escape(title);

  // Infallible: writing into a String.
  let _ = write!(
    html,
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
     <style>body{{font-family:sans-serif;margin:2em}}table{{border-collapse:collapse;margin-bottom:2em}}\
     th,td{{border:1px solid #ccc;padding:4px 10px;text-align:left}}td.n{{text-align:right}}</style>\
     </head><body><h1>{title}</h1>\n"
  );

  html.push_str("<h2>Vendor chunks</h2>\n<table><tr><th>Chunk</th><th>Modules</th><th>Bytes</th></tr>\n");
  for (chunk, summary) in graph.chunks.summary() {
    let _ = writeln!(
      html,
      "<tr><td>{}</td><td class=\"n\">{}</td><td class=\"n\">{}</td></tr>",
      escape(chunk),
      summary.modules,
      summary.bytes
    );
  }
  let first_party = graph.modules.len().saturating_sub(graph.chunks.len());
  let _ = writeln!(
    html,
    "<tr><td><em>application</em></td><td class=\"n\">{}</td><td class=\"n\">{}</td></tr>\n</table>",
    first_party,
    graph.first_party_bytes()
  );

  html.push_str("<h2>Emitted assets</h2>\n<table><tr><th>File</th><th>Bytes</th><th>Gzip</th></tr>\n");
  for asset in assets {
    let _ = writeln!(
      html,
      "<tr><td>{}</td><td class=\"n\">{}</td><td class=\"n\">{}</td></tr>",
      escape(&asset.path),
      asset.bytes,
      asset.gzip_bytes
    );
  }
  html.push_str("</table>\n</body></html>\n");
  html
}

fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      _ => out.push(c),
    }
  }
  out
}
