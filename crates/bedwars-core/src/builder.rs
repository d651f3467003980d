//! Package assembly: plugin registry, lifecycle script aggregation, and the
//! all-or-nothing build.
//!
//! A [`PackageBuilder`] owns a [`Namespace`] and an ordered list of plugins.
//! [`PackageBuilder::build`] writes the package metadata, the host tag files
//! for load and tick, one script per lifecycle event (each the concatenation
//! of every plugin's hook output in registration order), and a `reload`
//! script, then runs every plugin's `on_build`. If anything fails the whole
//! package directory is removed.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::lifecycle::{LifecycleEvent, LifecycleScripts};
use crate::namespace::{Namespace, NamespaceError};
use crate::pack::{FunctionTag, PackLayout, PackMeta};
use crate::plugin::{BuildContext, Plugin};

/// Name of the derived script that runs unload then load.
pub const RELOAD_FUNCTION: &str = "reload";

// ===========================================================================
// Errors and report
// ===========================================================================

/// Errors returned by [`PackageBuilder`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The namespace given to the builder is not a valid host identifier.
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    /// Writing one of the package's own files failed. The package was rolled back.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A JSON document could not be encoded. The package was rolled back.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// One or more plugins failed in `on_build`. The package was rolled back.
    #[error("plugins failed to build: {}", failed.join(", "))]
    PluginsFailed { failed: Vec<String> },
}

/// Summary of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// `<output_root>/<namespace>`.
    pub pack_dir: PathBuf,
    /// Every file written, in write order (package files first, then plugin files).
    pub files_written: Vec<PathBuf>,
    /// Names of the plugins that were built, in registration order.
    pub plugins: Vec<String>,
}

// ===========================================================================
// PackageBuilder
// ===========================================================================

/// Builds one namespaced package from an ordered set of plugins.
#[derive(Debug)]
pub struct PackageBuilder {
    display_name: String,
    namespace: Namespace,
    plugins: Vec<Box<dyn Plugin>>,
}

impl PackageBuilder {
    /// Create a builder for `namespace`. The display name ends up in the
    /// package metadata.
    pub fn new(display_name: &str, namespace: &str) -> Result<Self, BuildError> {
        Ok(Self {
            display_name: display_name.to_string(),
            namespace: Namespace::new(namespace)?,
            plugins: Vec::new(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    // -----------------------------------------------------------------------
    // Plugin registry
    // -----------------------------------------------------------------------

    /// Construct a plugin bound to this builder's namespace, register it, and
    /// return it for plugin-specific configuration. Plugins run in
    /// registration order.
    ///
    /// The returned handle is the plugin just registered, read back from the
    /// end of the registry.
    pub fn use_plugin<P, F>(&mut self, factory: F) -> Option<&mut P>
    where
        P: Plugin + 'static,
        F: FnOnce(&Namespace) -> P,
    {
        let plugin: Box<P> = Box::new(factory(&self.namespace));
        self.plugins.push(plugin);
        self.plugins
            .last_mut()
            .and_then(|p| p.as_any_mut().downcast_mut::<P>())
    }

    /// Register an already-constructed plugin.
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Number of registered plugins.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Plugin names in registration order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// The first registered plugin of concrete type `P`.
    pub fn plugin<P: Plugin + 'static>(&self) -> Option<&P> {
        self.plugins
            .iter()
            .find_map(|p| p.as_any().downcast_ref::<P>())
    }

    /// Mutable access to the first registered plugin of concrete type `P`.
    pub fn plugin_mut<P: Plugin + 'static>(&mut self) -> Option<&mut P> {
        self.plugins
            .iter_mut()
            .find_map(|p| p.as_any_mut().downcast_mut::<P>())
    }

    // -----------------------------------------------------------------------
    // Aggregation
    // -----------------------------------------------------------------------

    /// Collect every plugin's hook output, concatenated in registration order.
    pub fn lifecycle_scripts(&self) -> LifecycleScripts {
        let mut scripts = LifecycleScripts::default();
        for plugin in &self.plugins {
            for event in LifecycleEvent::ALL {
                let lines = hook_output(&**plugin, event);
                debug!(plugin = plugin.name(), %event, lines = lines.len(), "collected plugin hook");
                scripts.get_mut(event).extend(lines);
            }
        }
        scripts
    }

    /// The two-line `reload` script: unload, then load.
    pub fn reload_script(&self) -> Vec<String> {
        vec![
            format!("function {}", self.namespace.resource("unload")),
            format!("function {}", self.namespace.resource("load")),
        ]
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    /// Write the package into `<output_root>/<namespace>`.
    ///
    /// Either every file is written and every plugin's `on_build` succeeds,
    /// or the package directory is removed and an error is returned.
    pub fn build(&self, output_root: &Path) -> Result<BuildReport, BuildError> {
        let layout = PackLayout::new(output_root, &self.namespace);
        info!(namespace = %self.namespace, dir = %layout.pack_dir().display(), "building package");

        let mut written = Vec::new();
        if let Err(err) = self.write_package_files(&layout, &mut written) {
            error!(namespace = %self.namespace, %err, "failed to write package files");
            rollback(&layout);
            return Err(err);
        }

        let failed = self.build_plugins(&layout, &mut written);
        if !failed.is_empty() {
            error!(
                namespace = %self.namespace,
                failed = ?failed,
                "some plugins failed to build, aborting package build"
            );
            rollback(&layout);
            return Err(BuildError::PluginsFailed { failed });
        }

        info!(namespace = %self.namespace, files = written.len(), "package built successfully");
        Ok(BuildReport {
            pack_dir: layout.pack_dir().to_path_buf(),
            files_written: written,
            plugins: self.plugin_names().into_iter().map(String::from).collect(),
        })
    }

    fn write_package_files(
        &self,
        layout: &PackLayout,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), BuildError> {
        for dir in [layout.host_tag_dir(), layout.function_dir()] {
            std::fs::create_dir_all(&dir).map_err(|source| BuildError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        let meta_path = layout.metadata_path();
        let meta = PackMeta::new(&self.display_name)
            .to_json()
            .map_err(|source| BuildError::Encode {
                path: meta_path.clone(),
                source,
            })?;
        write_file(&meta_path, &meta, written)?;

        let scripts = self.lifecycle_scripts();
        for event in LifecycleEvent::ALL {
            let name = event.function_name();
            if event.is_auto_registered() {
                let tag_path = layout.tag_path(name);
                let tag = FunctionTag::single(self.namespace.resource(name))
                    .to_json()
                    .map_err(|source| BuildError::Encode {
                        path: tag_path.clone(),
                        source,
                    })?;
                write_file(&tag_path, &tag, written)?;
            }
            write_file(&layout.function_path(name), &scripts.render(event), written)?;
        }

        write_file(
            &layout.function_path(RELOAD_FUNCTION),
            &self.reload_script().join("\n"),
            written,
        )
    }

    /// Run every plugin's `on_build` in order and return the names of those
    /// that failed. Later plugins still run after an earlier failure.
    fn build_plugins(&self, layout: &PackLayout, written: &mut Vec<PathBuf>) -> Vec<String> {
        let mut failed = Vec::new();
        for plugin in &self.plugins {
            info!(plugin = plugin.name(), "building plugin");
            let mut ctx = BuildContext::new(layout, written);
            match plugin.on_build(&mut ctx) {
                Ok(()) => info!(plugin = plugin.name(), "plugin built successfully"),
                Err(err) => {
                    error!(plugin = plugin.name(), %err, "plugin failed to build");
                    failed.push(plugin.name().to_string());
                }
            }
        }
        failed
    }
}

fn hook_output(plugin: &dyn Plugin, event: LifecycleEvent) -> Vec<String> {
    match event {
        LifecycleEvent::Load => plugin.on_load(),
        LifecycleEvent::Unload => plugin.on_unload(),
        LifecycleEvent::Tick => plugin.on_tick(),
    }
}

fn write_file(path: &Path, contents: &str, written: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    std::fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), "wrote file");
    written.push(path.to_path_buf());
    Ok(())
}

fn rollback(layout: &PackLayout) {
    let dir = layout.pack_dir();
    if !dir.exists() {
        return;
    }
    match std::fs::remove_dir_all(dir) {
        Ok(()) => warn!(dir = %dir.display(), "rolled back package directory"),
        Err(err) => error!(dir = %dir.display(), %err, "failed to roll back package directory"),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn builder() -> PackageBuilder {
        PackageBuilder::new("Test Pack", "bw").unwrap()
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    #[test]
    fn new_rejects_invalid_namespace() {
        let result = PackageBuilder::new("Test", "Bad Name");
        assert!(matches!(result, Err(BuildError::Namespace(_))));
    }

    #[test]
    fn use_plugin_binds_namespace_and_returns_instance() {
        let mut b = builder();
        let plugin = b.use_plugin(|ns| ScriptedPlugin::new("a", ns)).unwrap();
        assert_eq!(plugin.namespace().as_str(), "bw");
        plugin.tick.push("say configured".into());

        assert_eq!(b.plugin_count(), 1);
        let found = b.plugin::<ScriptedPlugin>().unwrap();
        assert_eq!(found.tick, vec!["say configured".to_string()]);
    }

    #[test]
    fn plugin_lookup_by_type() {
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::new("a", ns));
        b.use_plugin(|_| FailingPlugin::new("broken"));

        assert_eq!(b.plugin_names(), vec!["a", "broken"]);
        assert!(b.plugin::<FailingPlugin>().is_some());
        assert!(b.plugin_mut::<ScriptedPlugin>().is_some());
    }

    // -----------------------------------------------------------------------
    // Aggregation
    // -----------------------------------------------------------------------

    #[test]
    fn scripts_concatenate_in_registration_order() {
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::with_lines("first", ns, "A"));
        b.use_plugin(|ns| ScriptedPlugin::with_lines("second", ns, "B"));

        let scripts = b.lifecycle_scripts();
        assert_eq!(scripts.load, vec!["say A load", "say B load"]);
        assert_eq!(scripts.unload, vec!["say A unload", "say B unload"]);
        assert_eq!(scripts.tick, vec!["say A tick", "say B tick"]);
    }

    #[test]
    fn reload_is_unload_then_load() {
        assert_eq!(
            builder().reload_script(),
            vec!["function bw:unload", "function bw:load"]
        );
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    #[test]
    fn build_writes_full_layout() {
        let tmp = TempDir::new("builder_full_layout");
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::with_lines("a", ns, "A"));

        let report = b.build(tmp.path()).unwrap();
        let pack = tmp.path().join("bw");
        assert_eq!(report.pack_dir, pack);
        assert_eq!(report.plugins, vec!["a"]);

        let fun = pack.join("data/bw/function");
        assert_eq!(read(&fun.join("load.mcfunction")), "say A load");
        assert_eq!(read(&fun.join("unload.mcfunction")), "say A unload");
        assert_eq!(read(&fun.join("tick.mcfunction")), "say A tick");
        assert_eq!(
            read(&fun.join("reload.mcfunction")),
            "function bw:unload\nfunction bw:load"
        );

        let tags = pack.join("data/minecraft/tags/function");
        assert_eq!(read(&tags.join("load.json")), r#"{"values":["bw:load"]}"#);
        assert_eq!(read(&tags.join("tick.json")), r#"{"values":["bw:tick"]}"#);
        assert!(!tags.join("unload.json").exists());

        let meta: serde_json::Value =
            serde_json::from_str(&read(&pack.join("pack.mcmeta"))).unwrap();
        assert_eq!(meta["pack"]["pack_format"], 81);
        assert_eq!(meta["pack"]["description"], "Test Pack");
    }

    #[test]
    fn build_with_no_plugins_writes_empty_scripts() {
        let tmp = TempDir::new("builder_no_plugins");
        builder().build(tmp.path()).unwrap();
        let tick = tmp.path().join("bw/data/bw/function/tick.mcfunction");
        assert_eq!(read(&tick), "");
    }

    #[test]
    fn failing_plugin_rolls_back_everything() {
        let tmp = TempDir::new("builder_rollback");
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::with_lines("a", ns, "A").writing("extra"));
        b.use_plugin(|_| FailingPlugin::new("broken"));

        let result = b.build(tmp.path());
        match result {
            Err(BuildError::PluginsFailed { failed }) => assert_eq!(failed, vec!["broken"]),
            other => panic!("expected PluginsFailed, got {other:?}"),
        }
        assert!(!tmp.path().join("bw").exists());
        // The output root itself is left alone.
        assert!(tmp.path().exists());
    }

    #[test]
    fn every_plugin_builds_even_after_a_failure() {
        let tmp = TempDir::new("builder_all_run");
        let mut b = builder();
        b.use_plugin(|_| FailingPlugin::new("first"));
        b.use_plugin(|_| FailingPlugin::new("second"));

        match b.build(tmp.path()) {
            Err(BuildError::PluginsFailed { failed }) => {
                assert_eq!(failed, vec!["first", "second"]);
            }
            other => panic!("expected PluginsFailed, got {other:?}"),
        }
    }

    #[test]
    fn later_plugins_see_earlier_files() {
        let tmp = TempDir::new("builder_visibility");
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::with_lines("writer", ns, "W").writing("shared"));
        b.use_plugin(|ns| ScriptedPlugin::with_lines("reader", ns, "R").requiring("shared"));

        let report = b.build(tmp.path()).unwrap();
        assert!(
            report
                .files_written
                .iter()
                .any(|p| p.ends_with("shared.mcfunction"))
        );
    }

    #[test]
    fn plugin_requiring_missing_file_fails() {
        let tmp = TempDir::new("builder_visibility_missing");
        let mut b = builder();
        b.use_plugin(|ns| ScriptedPlugin::with_lines("reader", ns, "R").requiring("shared"));
        b.use_plugin(|ns| ScriptedPlugin::with_lines("writer", ns, "W").writing("shared"));

        assert!(b.build(tmp.path()).is_err());
        assert!(!tmp.path().join("bw").exists());
    }

    #[test]
    fn unwritable_output_root_is_reported() {
        let tmp = TempDir::new("builder_unwritable");
        // A regular file where the package directory should go.
        std::fs::write(tmp.path().join("bw"), "not a directory").unwrap();

        let result = builder().build(tmp.path());
        assert!(matches!(result, Err(BuildError::Io { .. })));
    }

    #[test]
    fn write_failure_after_partial_output_rolls_back() {
        let tmp = TempDir::new("builder_partial_io");
        // A directory where the unload script goes: metadata, the load tag
        // and load.mcfunction are written before this fails.
        let blocker = tmp.path().join("bw/data/bw/function/unload.mcfunction");
        std::fs::create_dir_all(&blocker).unwrap();

        match builder().build(tmp.path()) {
            Err(BuildError::Io { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(!tmp.path().join("bw").exists());
    }

    #[test]
    fn build_error_display_lists_failed_plugins() {
        let err = BuildError::PluginsFailed {
            failed: vec!["economy".into(), "teams".into()],
        };
        assert_eq!(format!("{err}"), "plugins failed to build: economy, teams");
    }
}
