//! On-disk layout of a package and the JSON documents the host reads.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::namespace::Namespace;

/// Format version written to `pack.mcmeta`.
pub const PACK_FORMAT: u32 = 81;

/// Extension of function (instruction script) files.
pub const FUNCTION_EXT: &str = "mcfunction";

// ===========================================================================
// Layout
// ===========================================================================

/// Paths inside one namespace's output directory.
#[derive(Debug, Clone)]
pub struct PackLayout {
    pack_dir: PathBuf,
    namespace: Namespace,
}

impl PackLayout {
    /// Layout for `namespace` under `output_root` (the pack directory is
    /// `<output_root>/<namespace>`).
    pub fn new(output_root: &Path, namespace: &Namespace) -> Self {
        Self {
            pack_dir: output_root.join(namespace.as_str()),
            namespace: namespace.clone(),
        }
    }

    pub fn pack_dir(&self) -> &Path {
        &self.pack_dir
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.pack_dir.join("pack.mcmeta")
    }

    /// `data/minecraft/tags/function`, where auto-run tags live.
    pub fn host_tag_dir(&self) -> PathBuf {
        self.pack_dir
            .join("data")
            .join("minecraft")
            .join("tags")
            .join("function")
    }

    /// `data/<ns>/function`, where every script of this package lives.
    pub fn function_dir(&self) -> PathBuf {
        self.pack_dir
            .join("data")
            .join(self.namespace.as_str())
            .join("function")
    }

    pub fn function_path(&self, name: &str) -> PathBuf {
        self.function_dir().join(format!("{name}.{FUNCTION_EXT}"))
    }

    pub fn tag_path(&self, name: &str) -> PathBuf {
        self.host_tag_dir().join(format!("{name}.json"))
    }
}

// ===========================================================================
// JSON documents
// ===========================================================================

/// Root of `pack.mcmeta`.
#[derive(Debug, Clone, Serialize)]
pub struct PackMeta {
    pub pack: PackInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackInfo {
    pub description: String,
    pub pack_format: u32,
}

impl PackMeta {
    pub fn new(display_name: &str) -> Self {
        Self {
            pack: PackInfo {
                description: display_name.to_string(),
                pack_format: PACK_FORMAT,
            },
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A function tag file: the list of functions the host runs for a tag.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTag {
    pub values: Vec<String>,
}

impl FunctionTag {
    pub fn single(function: String) -> Self {
        Self {
            values: vec![function],
        }
    }

    /// Compact, single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
