//! Pulls the bundler-injected asset tags out of its generic entry document.

use serde::Serialize;

use super::{HtmlError, Masked, collect_tags, parse_dom, split_prologue, tag_name};

/// Script and stylesheet markup emitted by the bundler, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedAssetTags {
  pub scripts: Vec<String>,
  pub links: Vec<String>,
}

impl GeneratedAssetTags {
  pub fn is_empty(&self) -> bool {
    self.scripts.is_empty() && self.links.is_empty()
  }
}

/// Extract every `<script>` element (content included) and every `<link>` element.
///
/// Order within each sequence follows the source document since script
/// execution order is observable. A document without any yields empty sequences.
pub fn extract_asset_tags(html: &str) -> Result<GeneratedAssetTags, HtmlError> {
  let (_, markup) = split_prologue(html);
  let masked = Masked::new(markup)?;
  let dom = parse_dom(masked.text())?;

  let mut tags = Vec::new();
  collect_tags(dom.children(), dom.parser(), &["script", "link"], &mut tags);

  let mut assets = GeneratedAssetTags::default();
  for tag in tags {
    let markup = masked.restore(&tag.raw().as_utf8_str());
    if tag_name(tag) == "script" {
      assets.scripts.push(markup);
    } else {
      assets.links.push(markup);
    }
  }
  Ok(assets)
}
