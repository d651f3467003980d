//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so other crates
//! can pull them in through the `test-utils` feature.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::namespace::Namespace;
use crate::plugin::{BuildContext, Plugin, PluginError};

// ===========================================================================
// Filesystem helpers
// ===========================================================================

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "bedwars_test_{label}_{}_{}",
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Read a file to a string, panicking with the path on failure.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

/// Every file under `dir`, relative to it, with its contents. Sorted by path.
pub fn snapshot_tree(dir: &Path) -> Vec<(PathBuf, String)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.push((rel, read(&path)));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

pub fn fixture_namespace() -> Namespace {
    Namespace::new("bw").unwrap()
}

// ===========================================================================
// Test plugins
// ===========================================================================

/// A plugin whose hook output and build-time files are set directly.
#[derive(Debug, Clone)]
pub struct ScriptedPlugin {
    name: String,
    namespace: Namespace,
    pub load: Vec<String>,
    pub unload: Vec<String>,
    pub tick: Vec<String>,
    /// Functions written in `on_build`.
    pub writes: Vec<String>,
    /// Functions that must already exist when `on_build` runs.
    pub requires: Vec<String>,
}

impl ScriptedPlugin {
    pub fn new(name: &str, namespace: &Namespace) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.clone(),
            load: Vec::new(),
            unload: Vec::new(),
            tick: Vec::new(),
            writes: Vec::new(),
            requires: Vec::new(),
        }
    }

    /// One `say <label> <event>` line per lifecycle hook.
    pub fn with_lines(name: &str, namespace: &Namespace, label: &str) -> Self {
        let mut plugin = Self::new(name, namespace);
        plugin.load = vec![format!("say {label} load")];
        plugin.unload = vec![format!("say {label} unload")];
        plugin.tick = vec![format!("say {label} tick")];
        plugin
    }

    pub fn writing(mut self, function: &str) -> Self {
        self.writes.push(function.to_string());
        self
    }

    pub fn requiring(mut self, function: &str) -> Self {
        self.requires.push(function.to_string());
        self
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

impl Plugin for ScriptedPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_build(&self, ctx: &mut BuildContext<'_>) -> Result<(), PluginError> {
        for function in &self.requires {
            if !ctx.layout().function_path(function).exists() {
                return Err(PluginError::Rejected {
                    reason: format!("missing function {function}"),
                });
            }
        }
        for function in &self.writes {
            ctx.write_function(function, &[format!("say {} wrote {function}", self.name)])?;
        }
        Ok(())
    }

    fn on_load(&self) -> Vec<String> {
        self.load.clone()
    }

    fn on_unload(&self) -> Vec<String> {
        self.unload.clone()
    }

    fn on_tick(&self) -> Vec<String> {
        self.tick.clone()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// A plugin whose `on_build` always fails.
#[derive(Debug, Clone)]
pub struct FailingPlugin {
    name: String,
}

impl FailingPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Plugin for FailingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_build(&self, _ctx: &mut BuildContext<'_>) -> Result<(), PluginError> {
        Err(PluginError::Rejected {
            reason: format!("{} always fails", self.name),
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
