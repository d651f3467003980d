//! Package namespaces.
//!
//! A [`Namespace`] prefixes every identifier a package emits: scoreboard
//! objectives, entity tags, storage locations and function paths. It is
//! validated once against the host's resource-location rules and never
//! changes afterwards.

use std::fmt;

/// Errors produced when validating a namespace string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    /// The namespace was the empty string.
    #[error("namespace must not be empty")]
    Empty,
    /// The namespace contained a character the host does not accept.
    #[error("invalid character {ch:?} in namespace '{namespace}'")]
    InvalidChar { namespace: String, ch: char },
}

/// A validated package namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Validate and wrap a namespace. Only `[a-z0-9_.-]` is accepted.
    pub fn new(name: &str) -> Result<Self, NamespaceError> {
        if name.is_empty() {
            return Err(NamespaceError::Empty);
        }
        if let Some(ch) = name.chars().find(|c| !is_namespace_char(*c)) {
            return Err(NamespaceError::InvalidChar {
                namespace: name.to_string(),
                ch,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<ns>_<suffix>`, the naming scheme for objectives and tags.
    pub fn prefixed(&self, suffix: impl fmt::Display) -> String {
        format!("{}_{suffix}", self.0)
    }

    /// `<ns>:<name>`, a resource location inside this namespace.
    pub fn resource(&self, name: &str) -> String {
        format!("{}:{name}", self.0)
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
