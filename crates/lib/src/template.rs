//! Path template parsing and substitution.
//!
//! Templates are plain strings with named placeholders that are filled in
//! from a table of already-known values. They are used for every path in a
//! manifest: variables, clean/create directories and resource endpoints.
//!
//! # Placeholder Format
//!
//! - `{name}` - the value of variable `name`
//!
//! Names are non-empty and may not contain braces. Whitespace is significant.
//!
//! # Escaping
//!
//! Use `{{` for a literal `{` and `}}` for a literal `}`.
//!
//! # Example
//!
//! ```
//! use shipkit_lib::template::{parse, Segment};
//!
//! let segments = parse("{root}/assets").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Variable("root".to_string()),
//!     Segment::Literal("/assets".to_string()),
//! ]);
//! ```

use thiserror::Error;

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A variable reference to be substituted
  Variable(String),
}

/// Errors that can occur during template parsing or substitution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("empty placeholder at position {0}")]
  Empty(usize),

  #[error("unmatched '}}' at position {0}")]
  StrayClose(usize),

  #[error("nested '{{' inside placeholder at position {0}")]
  Nested(usize),

  #[error("undefined variable '{0}'")]
  Undefined(String),
}

/// Source of values for placeholder substitution.
pub trait Lookup {
  /// Look up the value bound to `name`, if any.
  fn lookup(&self, name: &str) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> Lookup for std::collections::HashMap<String, String, S> {
  fn lookup(&self, name: &str) -> Option<&str> {
    self.get(name).map(String::as_str)
  }
}

/// Parse a template into segments.
///
/// # Errors
///
/// Returns an error for an unclosed `{`, an empty `{}`, a `{` nested inside a
/// placeholder, or a lone `}` that is not part of a `}}` escape.
pub fn parse(input: &str) -> Result<Vec<Segment>, TemplateError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    match ch {
      '{' => {
        if let Some((_, '{')) = chars.peek() {
          chars.next();
          literal.push('{');
          continue;
        }

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }

        let mut name = String::new();
        let mut found_close = false;

        for (inner_pos, c) in chars.by_ref() {
          match c {
            '}' => {
              found_close = true;
              break;
            }
            '{' => return Err(TemplateError::Nested(inner_pos)),
            _ => name.push(c),
          }
        }

        if !found_close {
          return Err(TemplateError::Unclosed(pos));
        }
        if name.is_empty() {
          return Err(TemplateError::Empty(pos));
        }

        segments.push(Segment::Variable(name));
      }
      '}' => match chars.peek() {
        Some((_, '}')) => {
          chars.next();
          literal.push('}');
        }
        _ => return Err(TemplateError::StrayClose(pos)),
      },
      _ => literal.push(ch),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Parse and substitute a template in one step.
///
/// # Errors
///
/// Returns an error if parsing fails or if a placeholder names a variable the
/// lookup does not know.
pub fn substitute(input: &str, values: &impl Lookup) -> Result<String, TemplateError> {
  let segments = parse(input)?;
  substitute_segments(&segments, values)
}

/// Substitute placeholders in pre-parsed segments.
pub fn substitute_segments(segments: &[Segment], values: &impl Lookup) -> Result<String, TemplateError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Variable(name) => {
        let value = values
          .lookup(name)
          .ok_or_else(|| TemplateError::Undefined(name.clone()))?;
        result.push_str(value);
      }
    }
  }

  Ok(result)
}
