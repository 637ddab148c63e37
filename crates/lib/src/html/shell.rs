//! Decomposition of a full HTML document into wrapper, head and body.

use tl::{HTMLTag, Parser};

use super::{HtmlError, Masked, child_markup, collect_tags, parse_dom, split_prologue, tag_name};

/// A document split into the parts the assembler recombines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
  /// Declarations before the root element, verbatim (usually the doctype)
  pub prologue: String,
  /// Attributes of the `<html>` element, or `None` when the document has no root element
  pub html_attributes: Option<Vec<(String, Option<String>)>>,
  /// Direct children of `<head>`, in order
  pub head: Vec<String>,
  /// Direct children of `<body>`, in order
  pub body: Vec<String>,
}

impl DocumentShell {
  pub fn head_html(&self) -> String {
    self.head.concat()
  }

  pub fn body_html(&self) -> String {
    self.body.concat()
  }
}

/// Parse `html` and require exactly one head and one body (and at most one root).
pub fn parse_shell(html: &str) -> Result<DocumentShell, HtmlError> {
  let (prologue, markup) = split_prologue(html);
  let masked = Masked::new(markup)?;
  let dom = parse_dom(masked.text())?;
  let parser = dom.parser();

  let mut tags = Vec::new();
  collect_structure(dom.children(), parser, &mut tags);

  let html_tag = at_most_one(&tags, "html")?;
  let head = exactly_one(&tags, "head")?;
  let body = exactly_one(&tags, "body")?;

  Ok(DocumentShell {
    prologue: prologue.to_string(),
    html_attributes: html_tag.map(attributes),
    head: child_markup(head, parser, &masked),
    body: child_markup(body, parser, &masked),
  })
}

/// Count `<head>` elements anywhere in a document.
pub fn count_heads(html: &str) -> Result<usize, HtmlError> {
  let (_, markup) = split_prologue(html);
  let masked = Masked::new(markup)?;
  let dom = parse_dom(masked.text())?;
  let mut tags = Vec::new();
  collect_structure(dom.children(), dom.parser(), &mut tags);
  Ok(tags.iter().filter(|t| tag_name(t) == "head").count())
}

/// Structural elements, found at any depth. Nested duplicates count too.
fn collect_structure<'p, 'buf>(
  handles: &[tl::NodeHandle],
  parser: &'p Parser<'buf>,
  out: &mut Vec<&'p HTMLTag<'buf>>,
) {
  let mut matched = Vec::new();
  collect_tags(handles, parser, &["html", "head", "body"], &mut matched);
  for tag in matched {
    out.push(tag);
    let children: Vec<tl::NodeHandle> = tag.children().top().to_vec();
    collect_structure(&children, parser, out);
  }
}

fn matching<'a, 'buf>(tags: &[&'a HTMLTag<'buf>], element: &str) -> Vec<&'a HTMLTag<'buf>> {
  tags.iter().copied().filter(|t| tag_name(t) == element).collect()
}

fn exactly_one<'a, 'buf>(tags: &[&'a HTMLTag<'buf>], element: &'static str) -> Result<&'a HTMLTag<'buf>, HtmlError> {
  let found = matching(tags, element);
  match found.as_slice() {
    [only] => Ok(*only),
    _ => Err(HtmlError::ElementCount {
      element,
      count: found.len(),
    }),
  }
}

fn at_most_one<'a, 'buf>(
  tags: &[&'a HTMLTag<'buf>],
  element: &'static str,
) -> Result<Option<&'a HTMLTag<'buf>>, HtmlError> {
  let found = matching(tags, element);
  match found.as_slice() {
    [] => Ok(None),
    [only] => Ok(Some(*only)),
    _ => Err(HtmlError::ElementCount {
      element,
      count: found.len(),
    }),
  }
}

fn attributes(tag: &HTMLTag<'_>) -> Vec<(String, Option<String>)> {
  tag
    .attributes()
    .iter()
    .map(|(k, v)| (k.to_string(), v.map(|v| v.to_string())))
    .collect()
}
