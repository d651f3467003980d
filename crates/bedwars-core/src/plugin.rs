//! Plugin system for composing packages out of independent instruction sources.
//!
//! Plugins contribute to a package via the [`Plugin`] trait. The three
//! lifecycle hooks (`on_load`, `on_unload`, `on_tick`) return instruction
//! lines and must be pure functions of the plugin's configured state.
//! `on_build` is the only hook allowed to touch the filesystem, and it is
//! handed a [`BuildContext`] scoped to the package being written.

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::pack::PackLayout;

// ---------------------------------------------------------------------------
// Plugin trait
// ---------------------------------------------------------------------------

/// A source of lifecycle instructions and auxiliary package files.
///
/// Plugins are constructed with only the package
/// [`Namespace`](crate::Namespace); any further state comes from a
/// plugin-specific configure call before the package is built. The default hooks emit nothing, so a plugin overrides only the
/// ones it needs.
pub trait Plugin: std::fmt::Debug {
    /// Human-readable name, used in logs and build reports.
    fn name(&self) -> &str;

    /// Write any extra files this plugin needs. Returning `Err` fails the
    /// whole package build and rolls it back.
    fn on_build(&self, ctx: &mut BuildContext<'_>) -> Result<(), PluginError> {
        let _ = ctx;
        Ok(())
    }

    /// Instructions appended to the package's load script.
    fn on_load(&self) -> Vec<String> {
        Vec::new()
    }

    /// Instructions appended to the package's unload script.
    fn on_unload(&self) -> Vec<String> {
        Vec::new()
    }

    /// Instructions appended to the package's tick script.
    fn on_tick(&self) -> Vec<String> {
        Vec::new()
    }

    /// Downcast to `&dyn Any` for type-safe access to concrete plugin types.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Downcast to `&mut dyn Any` for type-safe mutable access to concrete plugin types.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

// ---------------------------------------------------------------------------
// BuildContext
// ---------------------------------------------------------------------------

/// Context handed to [`Plugin::on_build`].
///
/// Files written through the context are recorded in the build report.
/// Plugins later in registration order see everything written before them.
pub struct BuildContext<'a> {
    layout: &'a PackLayout,
    written: &'a mut Vec<PathBuf>,
}

impl<'a> BuildContext<'a> {
    pub fn new(layout: &'a PackLayout, written: &'a mut Vec<PathBuf>) -> Self {
        Self { layout, written }
    }

    /// The package directory (`<output_root>/<namespace>`).
    pub fn pack_dir(&self) -> &Path {
        self.layout.pack_dir()
    }

    pub fn layout(&self) -> &PackLayout {
        self.layout
    }

    /// Write `data/<ns>/function/<name>.mcfunction` with `lines` joined by
    /// newlines.
    pub fn write_function(&mut self, name: &str, lines: &[String]) -> Result<PathBuf, PluginError> {
        let path = self.layout.function_path(name);
        self.write_file(&path, &lines.join("\n"))?;
        Ok(path)
    }

    /// Write a file inside the package directory, creating parent
    /// directories as needed. Paths outside the package are refused so that
    /// a rollback can remove everything the build wrote.
    pub fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), PluginError> {
        let escapes = path.components().any(|c| c == Component::ParentDir);
        if escapes || !path.starts_with(self.pack_dir()) {
            return Err(PluginError::OutsidePackage {
                path: path.to_path_buf(),
            });
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PluginError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(file = %path.display(), "wrote file");
        self.written.push(path.to_path_buf());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PluginError
// ---------------------------------------------------------------------------

/// Errors a plugin reports from `on_build`.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Writing one of the plugin's files failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file was addressed outside the package directory.
    #[error("refusing to write {path}: outside the package directory")]
    OutsidePackage { path: PathBuf },
    /// The plugin refused to build, e.g. because it was never configured.
    #[error("plugin rejected build: {reason}")]
    Rejected { reason: String },
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TempDir, fixture_namespace};

    // -----------------------------------------------------------------------
    // Test plugin: EchoPlugin -- one line per hook
    // -----------------------------------------------------------------------

    #[derive(Debug)]
    struct EchoPlugin;

    impl Plugin for EchoPlugin {
        fn name(&self) -> &str {
            "echo"
        }

        fn on_tick(&self) -> Vec<String> {
            vec!["say tick".into()]
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    #[test]
    fn default_hooks_are_empty() {
        let plugin = EchoPlugin;
        assert!(plugin.on_load().is_empty());
        assert!(plugin.on_unload().is_empty());
        assert_eq!(plugin.on_tick(), vec!["say tick".to_string()]);
    }

    #[test]
    fn default_on_build_succeeds_without_writing() {
        let tmp = TempDir::new("plugin_default_build");
        let layout = PackLayout::new(tmp.path(), &fixture_namespace());
        let mut written = Vec::new();
        let mut ctx = BuildContext::new(&layout, &mut written);
        assert!(EchoPlugin.on_build(&mut ctx).is_ok());
        assert!(written.is_empty());
    }

    #[test]
    fn write_function_creates_dirs_and_records_path() {
        let tmp = TempDir::new("plugin_write_function");
        let layout = PackLayout::new(tmp.path(), &fixture_namespace());
        let mut written = Vec::new();
        let mut ctx = BuildContext::new(&layout, &mut written);

        let path = ctx
            .write_function("hello", &["say a".to_string(), "say b".to_string()])
            .unwrap();

        assert_eq!(path, layout.function_path("hello"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "say a\nsay b");
        assert_eq!(written, vec![path]);
    }

    #[test]
    fn write_file_stays_inside_the_package() {
        let tmp = TempDir::new("plugin_write_outside");
        let layout = PackLayout::new(tmp.path(), &fixture_namespace());
        let mut written = Vec::new();
        let mut ctx = BuildContext::new(&layout, &mut written);

        let sibling = tmp.path().join("elsewhere.txt");
        let climbing = layout.pack_dir().join("..").join("climb.txt");
        for path in [&sibling, &climbing] {
            assert!(matches!(
                ctx.write_file(path, "x"),
                Err(PluginError::OutsidePackage { .. })
            ));
        }

        let inside = layout.pack_dir().join("data/bw/notes.txt");
        ctx.write_file(&inside, "x").unwrap();

        assert!(!sibling.exists());
        assert!(!tmp.path().join("climb.txt").exists());
        assert_eq!(written, vec![inside]);
    }

    #[test]
    fn plugin_error_display_messages() {
        let err = PluginError::Rejected {
            reason: "not configured".into(),
        };
        assert!(format!("{err}").contains("not configured"));

        let err = PluginError::Io {
            path: PathBuf::from("/x/y.mcfunction"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("/x/y.mcfunction"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}
