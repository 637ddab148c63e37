//! Structural HTML handling for entry documents.
//!
//! Documents are parsed with `tl` and rebuilt from their parts so the output
//! always carries exactly one head and one body, whatever shape the inputs
//! have. Fragments are reproduced from their source markup, not re-serialized.
//! Script and style content is masked before parsing, see `scan.rs`.

pub mod assemble;
pub mod extract;
mod scan;
pub mod shell;

use thiserror::Error;
use tl::{HTMLTag, Node, NodeHandle, Parser, ParserOptions, VDom};

pub(crate) use scan::{Masked, find_end_tag};

pub use assemble::{AssembledDocument, merge, passthrough};
pub use extract::{GeneratedAssetTags, extract_asset_tags};
pub use shell::{DocumentShell, parse_shell};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HtmlError {
  #[error("failed to parse HTML: {0}")]
  Parse(String),

  #[error("expected exactly one <{element}> element, found {count}")]
  ElementCount { element: &'static str, count: usize },

  #[error("<{element}> element is never closed")]
  Unterminated { element: &'static str },
}

/// Leading markup declarations (doctype, comments) that precede the root element.
///
/// `tl` drops doctypes, so they are split off before parsing and re-emitted verbatim.
pub(crate) fn split_prologue(html: &str) -> (&str, &str) {
  let mut pos = 0;
  loop {
    let rest = &html[pos..];
    let trimmed = rest.trim_start();
    let skipped = rest.len() - trimmed.len();

    let consumed = if trimmed.starts_with("<!--") {
      trimmed.find("-->").map(|end| end + 3)
    } else if trimmed.starts_with("<!") || trimmed.starts_with("<?") {
      trimmed.find('>').map(|end| end + 1)
    } else {
      None
    };

    match consumed {
      Some(len) => pos += skipped + len,
      None => break,
    }
  }
  html.split_at(pos)
}

pub(crate) fn parse_dom(html: &str) -> Result<VDom<'_>, HtmlError> {
  tl::parse(html, ParserOptions::new()).map_err(|e| HtmlError::Parse(format!("{:?}", e)))
}

pub(crate) fn tag_name(tag: &HTMLTag<'_>) -> String {
  tag.name().as_utf8_str().to_ascii_lowercase()
}

/// Source markup of a node parsed from `masked`.
pub(crate) fn node_markup(node: &Node<'_>, masked: &Masked) -> String {
  match node {
    Node::Tag(tag) => masked.restore(&tag.raw().as_utf8_str()),
    Node::Raw(text) => masked.restore(&text.as_utf8_str()),
    Node::Comment(text) => text.as_utf8_str().into_owned(),
  }
}

/// Markup of each direct child of `tag`, in order.
pub(crate) fn child_markup(tag: &HTMLTag<'_>, parser: &Parser<'_>, masked: &Masked) -> Vec<String> {
  let handles: Vec<NodeHandle> = tag.children().top().to_vec();
  handles
    .iter()
    .filter_map(|handle| handle.get(parser))
    .map(|node| node_markup(node, masked))
    .collect()
}

/// Collect, in document order, every element whose name is in `names`.
///
/// Matched elements are not descended into.
pub(crate) fn collect_tags<'p, 'buf>(
  handles: &[NodeHandle],
  parser: &'p Parser<'buf>,
  names: &[&str],
  out: &mut Vec<&'p HTMLTag<'buf>>,
) {
  for handle in handles {
    let Some(Node::Tag(tag)) = handle.get(parser) else {
      continue;
    };
    if names.contains(&tag_name(tag).as_str()) {
      out.push(tag);
      continue;
    }
    let children: Vec<NodeHandle> = tag.children().top().to_vec();
    collect_tags(&children, parser, names, out);
  }
}
