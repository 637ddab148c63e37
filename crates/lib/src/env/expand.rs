//! Variable references inside env file values.
//!
//! `$NAME` and `${NAME}` are replaced by the process value of `NAME`, falling
//! back to its (expanded) env file value, then to the empty string.
//! `${NAME:-default}` substitutes `default` when the result would be empty.
//! `\$` is a literal dollar sign. Single-quoted values are never expanded, and
//! cyclic references expand to the empty string.

use std::collections::BTreeMap;

/// A value as written in an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
  /// Single-quoted, taken as is
  Literal(String),
  /// May reference other variables
  Template(String),
}

/// Expand every file value against `process` and the file values themselves.
pub(crate) fn expand_all(
  file_vars: &BTreeMap<String, RawValue>,
  process: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
  let mut resolver = Resolver {
    file_vars,
    process,
    done: BTreeMap::new(),
    active: Vec::new(),
  };
  for key in file_vars.keys() {
    resolver.resolve(key);
  }
  resolver.done
}

struct Resolver<'a> {
  file_vars: &'a BTreeMap<String, RawValue>,
  process: &'a BTreeMap<String, String>,
  done: BTreeMap<String, String>,
  /// Keys being expanded, innermost last
  active: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
  fn resolve(&mut self, key: &'a str) -> String {
    if let Some(value) = self.done.get(key) {
      return value.clone();
    }
    if self.active.contains(&key) {
      return String::new();
    }

    let file_vars = self.file_vars;
    let value = match file_vars.get(key) {
      Some(RawValue::Literal(value)) => value.clone(),
      Some(RawValue::Template(template)) => {
        self.active.push(key);
        let value = self.expand(template);
        self.active.pop();
        value
      }
      None => String::new(),
    };
    self.done.insert(key.to_string(), value.clone());
    value
  }

  fn lookup(&mut self, name: &str) -> String {
    if let Some(value) = self.process.get(name) {
      return value.clone();
    }
    let file_vars = self.file_vars;
    match file_vars.get_key_value(name) {
      Some((key, _)) => self.resolve(key),
      None => String::new(),
    }
  }

  fn expand(&mut self, template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['$', '\\']) {
      out.push_str(&rest[..pos]);
      let tail = &rest[pos..];

      if let Some(after) = tail.strip_prefix("\\$") {
        out.push('$');
        rest = after;
      } else if let Some(after) = tail.strip_prefix('\\') {
        out.push('\\');
        rest = after;
      } else {
        let after_dollar = &tail[1..];
        match parse_reference(after_dollar) {
          Some((reference, consumed)) => {
            let value = self.lookup(reference.name);
            let value = match reference.default {
              Some(default) if value.is_empty() => self.expand(default),
              _ => value,
            };
            out.push_str(&value);
            rest = &after_dollar[consumed..];
          }
          None => {
            out.push('$');
            rest = after_dollar;
          }
        }
      }
    }

    out.push_str(rest);
    out
  }
}

struct Reference<'t> {
  name: &'t str,
  default: Option<&'t str>,
}

/// Parse the reference following a `$`, returning it and the bytes it spans.
fn parse_reference(s: &str) -> Option<(Reference<'_>, usize)> {
  if let Some(braced) = s.strip_prefix('{') {
    let end = braced.find('}')?;
    let body = &braced[..end];
    let (name, default) = match body.split_once(":-") {
      Some((name, default)) => (name, Some(default)),
      None => (body, None),
    };
    return is_name(name).then_some((Reference { name, default }, end + 2));
  }

  let len = s
    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
    .unwrap_or(s.len());
  let name = &s[..len];
  is_name(name).then_some((Reference { name, default: None }, len))
}

fn is_name(name: &str) -> bool {
  name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
