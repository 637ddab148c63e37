//! Entry document assembly.
//!
//! There are two strategies and they share nothing:
//!
//! - [`merge`] (release): the platform shell's head and body are rebuilt
//!   around the bundler's asset tags.
//! - [`passthrough`] (development): the generic document is kept as is and
//!   gets the devtools script before `</head>`.

use std::fmt;

use super::shell::count_heads;
use super::{DocumentShell, GeneratedAssetTags, HtmlError, find_end_tag};
use crate::consts::DEV_TOOLS_SCRIPT;

/// Final entry document. Holds exactly one head and one body by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
  prologue: String,
  html_attributes: Option<Vec<(String, Option<String>)>>,
  head: String,
  body: String,
}

impl AssembledDocument {
  /// Inner markup of `<head>`.
  pub fn head(&self) -> &str {
    &self.head
  }

  /// Inner markup of `<body>`.
  pub fn body(&self) -> &str {
    &self.body
  }

  pub fn to_html(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for AssembledDocument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.prologue)?;
    if let Some(attributes) = &self.html_attributes {
      f.write_str("<html")?;
      for (name, value) in attributes {
        match value {
          Some(value) => write!(f, " {}=\"{}\"", name, value.replace('"', "&quot;"))?,
          None => write!(f, " {}", name)?,
        }
      }
      f.write_str(">")?;
    }
    write!(f, "<head>{}</head><body>{}</body>", self.head, self.body)?;
    if self.html_attributes.is_some() {
      f.write_str("</html>")?;
    }
    Ok(())
  }
}

/// Release strategy: platform head first, then scripts, then links; platform body untouched.
pub fn merge(shell: &DocumentShell, tags: &GeneratedAssetTags) -> AssembledDocument {
  let mut head = shell.head_html();
  head.push_str(&tags.scripts.join("\n"));
  head.push_str(&tags.links.join("\n"));

  AssembledDocument {
    prologue: shell.prologue.clone(),
    html_attributes: shell.html_attributes.clone(),
    head,
    body: shell.body_html(),
  }
}

/// Development strategy: insert the devtools script before the head's end tag.
///
/// The document must contain exactly one head element; nothing else is altered.
/// End-tag lookalikes in comments, scripts and longer names such as
/// `</header>` are skipped.
pub fn passthrough(generic_html: &str) -> Result<String, HtmlError> {
  let heads = count_heads(generic_html)?;
  if heads != 1 {
    return Err(HtmlError::ElementCount {
      element: "head",
      count: heads,
    });
  }

  let pos = find_end_tag(generic_html, "head")?.ok_or(HtmlError::ElementCount {
    element: "head",
    count: 0,
  })?;

  let mut html = String::with_capacity(generic_html.len() + DEV_TOOLS_SCRIPT.len());
  html.push_str(&generic_html[..pos]);
  html.push_str(DEV_TOOLS_SCRIPT);
  html.push_str(&generic_html[pos..]);
  Ok(html)
}
