//! Ordered variable resolution.
//!
//! A variable table is an ordered list of `(name, template)` pairs. Each
//! template is expanded against the values known so far: caller arguments,
//! built-ins, and every variable declared before it. The result is a
//! [`Variables`] map that is never modified afterwards.
//!
//! Substitution is strictly single pass in declaration order, so a forward
//! reference fails exactly like a reference to a name that does not exist.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::template::{self, Lookup, TemplateError};

/// A `(name, template)` declaration as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDecl {
  pub name: String,
  pub value: String,
}

impl VariableDecl {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
  #[error("{context}: undefined variable '{missing}'")]
  Undefined { context: String, missing: String },

  #[error("{context}: {source}")]
  Template {
    context: String,
    #[source]
    source: TemplateError,
  },

  #[error("expected {} argument(s) ({}), got {got}", .expected.len(), .expected.join(", "))]
  ArgumentCount { expected: Vec<String>, got: usize },
}

impl VarError {
  fn from_template(context: impl Into<String>, err: TemplateError) -> Self {
    let context = context.into();
    match err {
      TemplateError::Undefined(missing) => VarError::Undefined { context, missing },
      source => VarError::Template { context, source },
    }
  }
}

/// Resolved variable values, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Variables(IndexMap<String, String>);

impl Variables {
  pub fn new() -> Self {
    Self::default()
  }

  /// Bind positional values to argument names.
  ///
  /// The number of values must match the number of names exactly.
  pub fn from_arguments(names: &[String], values: &[String]) -> Result<Self, VarError> {
    if names.len() != values.len() {
      return Err(VarError::ArgumentCount {
        expected: names.to_vec(),
        got: values.len(),
      });
    }

    let mut vars = Self::new();
    for (name, value) in names.iter().zip(values) {
      vars.insert(name.clone(), value.clone());
    }
    Ok(vars)
  }

  /// Bind `name` to `value`, replacing any earlier binding.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.get(name).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Expand a template against these values.
  ///
  /// `context` names what is being expanded and appears in error messages.
  pub fn expand(&self, context: &str, input: &str) -> Result<String, VarError> {
    template::substitute(input, self).map_err(|e| VarError::from_template(context, e))
  }

  /// Expand a template into a path.
  pub fn expand_path(&self, context: &str, input: &str) -> Result<PathBuf, VarError> {
    self.expand(context, input).map(PathBuf::from)
  }

  /// Resolve a table of declarations on top of these values.
  ///
  /// Declarations are processed in order; each one sees the values produced
  /// by everything before it. Returns a new map and leaves `self` untouched.
  pub fn resolve(&self, table: &[VariableDecl]) -> Result<Variables, VarError> {
    let mut resolved = self.clone();

    for decl in table {
      let context = format!("variable '{}'", decl.name);
      let value = resolved.expand(&context, &decl.value)?;
      debug!(name = %decl.name, value = %value, "resolved variable");
      resolved.insert(decl.name.clone(), value);
    }

    Ok(resolved)
  }
}

impl Lookup for Variables {
  fn lookup(&self, name: &str) -> Option<&str> {
    self.get(name)
  }
}
