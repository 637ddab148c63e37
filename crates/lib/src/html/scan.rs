//! Lexical pre-pass over raw markup.
//!
//! `tl` parses `<script>` and `<style>` content as markup, so a `<` inside an
//! inline script ends the element early and swallows its siblings. Before a
//! document reaches the parser, that content is swapped for short placeholders
//! and put back into every fragment handed out afterwards.

use super::HtmlError;

/// Elements whose content is text, not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanKind {
  /// `<!-- ... -->`, delimiters included
  Comment,
  /// Content of a script or style element, tags excluded
  RawText,
}

/// Byte range of `html` that contains no markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpaqueSpan {
  pub start: usize,
  pub end: usize,
  pub kind: SpanKind,
}

impl OpaqueSpan {
  fn contains(&self, offset: usize) -> bool {
    self.start <= offset && offset < self.end
  }
}

/// Comments and script/style content, in source order.
///
/// A raw-text element without its end tag is an error: everything after it
/// would otherwise be read as script.
pub(crate) fn opaque_spans(html: &str) -> Result<Vec<OpaqueSpan>, HtmlError> {
  // ASCII lowercasing keeps byte offsets stable.
  let lower = html.to_ascii_lowercase();
  let mut spans = Vec::new();
  let mut pos = 0;

  while let Some(offset) = lower[pos..].find('<') {
    let start = pos + offset;
    let rest = &lower[start..];

    if rest.starts_with("<!--") {
      let end = rest[4..].find("-->").map_or(lower.len(), |e| start + 4 + e + 3);
      spans.push(OpaqueSpan {
        start,
        end,
        kind: SpanKind::Comment,
      });
      pos = end;
    } else if let Some(element) = RAW_TEXT_ELEMENTS.iter().copied().find(|name| opens(rest, name)) {
      let content_start = tag_end(&lower, start).ok_or(HtmlError::Unterminated { element })?;
      let content_end = find_close(&lower, content_start, element).ok_or(HtmlError::Unterminated { element })?;
      spans.push(OpaqueSpan {
        start: content_start,
        end: content_end,
        kind: SpanKind::RawText,
      });
      pos = content_end + 2 + element.len();
    } else {
      pos = start + 1;
    }
  }

  Ok(spans)
}

/// Offset of the first `</name` end tag that is real markup, i.e. not inside
/// a comment or script/style content and not a prefix of a longer name.
pub(crate) fn find_end_tag(html: &str, name: &str) -> Result<Option<usize>, HtmlError> {
  let spans = opaque_spans(html)?;
  let lower = html.to_ascii_lowercase();
  let needle = format!("</{}", name);

  let mut pos = 0;
  while let Some(offset) = lower[pos..].find(&needle) {
    let at = pos + offset;
    if ends_name(&lower, at + needle.len()) && !spans.iter().any(|s| s.contains(at)) {
      return Ok(Some(at));
    }
    pos = at + needle.len();
  }
  Ok(None)
}

/// A document with script/style content replaced by placeholders.
#[derive(Debug, Clone)]
pub(crate) struct Masked {
  text: String,
  raw: Vec<String>,
}

impl Masked {
  pub(crate) fn new(html: &str) -> Result<Self, HtmlError> {
    if html.contains(MASK_OPEN) {
      return Err(HtmlError::Parse("document contains reserved character U+E000".to_string()));
    }

    let mut text = String::with_capacity(html.len());
    let mut raw = Vec::new();
    let mut last = 0;

    let spans = opaque_spans(html)?;
    for span in spans.iter().filter(|s| s.kind == SpanKind::RawText && s.start < s.end) {
      text.push_str(&html[last..span.start]);
      text.push(MASK_OPEN);
      text.push_str(&raw.len().to_string());
      text.push(MASK_CLOSE);
      raw.push(html[span.start..span.end].to_string());
      last = span.end;
    }
    text.push_str(&html[last..]);

    Ok(Self { text, raw })
  }

  /// The text handed to the parser.
  pub(crate) fn text(&self) -> &str {
    &self.text
  }

  /// Put the original content back into a fragment of [`Masked::text`].
  pub(crate) fn restore(&self, fragment: &str) -> String {
    if self.raw.is_empty() {
      return fragment.to_string();
    }

    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(start) = rest.find(MASK_OPEN) {
      out.push_str(&rest[..start]);
      let after = &rest[start + MASK_OPEN.len_utf8()..];
      let placeholder = after
        .find(MASK_CLOSE)
        .and_then(|end| after[..end].parse::<usize>().ok().map(|index| (end, index)));
      match placeholder {
        Some((end, index)) if index < self.raw.len() => {
          out.push_str(&self.raw[index]);
          rest = &after[end + MASK_CLOSE.len_utf8()..];
        }
        _ => {
          out.push(MASK_OPEN);
          rest = after;
        }
      }
    }
    out.push_str(rest);
    out
  }
}

fn is_tag_boundary(b: u8) -> bool {
  matches!(b, b'>' | b'/') || b.is_ascii_whitespace()
}

/// Whether the tag name that ends at `offset` is complete.
fn ends_name(lower: &str, offset: usize) -> bool {
  lower.as_bytes().get(offset).is_none_or(|b| is_tag_boundary(*b))
}

/// `rest` starts with the start tag of `name`.
fn opens(rest: &str, name: &str) -> bool {
  let bytes = rest.as_bytes();
  bytes.get(1..1 + name.len()) == Some(name.as_bytes())
    && bytes.get(1 + name.len()).is_some_and(|b| is_tag_boundary(*b))
}

/// Offset just past the `>` closing the tag that starts at `start`.
fn tag_end(lower: &str, start: usize) -> Option<usize> {
  let mut quote = None;
  for (i, b) in lower.bytes().enumerate().skip(start) {
    match quote {
      Some(q) if b == q => quote = None,
      Some(_) => {}
      None if b == b'"' || b == b'\'' => quote = Some(b),
      None if b == b'>' => return Some(i + 1),
      None => {}
    }
  }
  None
}

/// Offset of the `</name` end tag closing raw-text content that starts at `from`.
fn find_close(lower: &str, from: usize, name: &str) -> Option<usize> {
  let needle = format!("</{}", name);
  let mut pos = from;
  while let Some(offset) = lower[pos..].find(&needle) {
    let at = pos + offset;
    if ends_name(lower, at + needle.len()) {
      return Some(at);
    }
    pos = at + needle.len();
  }
  None
}
