//! Stringified NBT: the host's literal syntax for structured data.
//!
//! [`Snbt`] is a small value model covering what generated instructions
//! embed (entity data, item components, storage values and function macro
//! arguments). Its `Display` impl is the encoder.

use std::fmt::{self, Write};

/// A structured value encodable as SNBT.
#[derive(Debug, Clone, PartialEq)]
pub enum Snbt {
    Byte(i8),
    Int(i32),
    Bool(bool),
    String(String),
    List(Vec<Snbt>),
    /// Entries keep insertion order.
    Compound(Vec<(String, Snbt)>),
}

impl Snbt {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Snbt>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn compound<K: Into<String>>(entries: impl IntoIterator<Item = (K, Snbt)>) -> Self {
        Self::Compound(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// A list of strings, the shape of entity `Tags`.
    pub fn tags<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self::list(tags.into_iter().map(Self::string))
    }
}

impl From<&str> for Snbt {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

// ===========================================================================
// Encoding
// ===========================================================================

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if !key.is_empty() && key.chars().all(is_bare_key_char) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

impl fmt::Display for Snbt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}b"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(s) => write_quoted(f, s),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Compound(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_key(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}
