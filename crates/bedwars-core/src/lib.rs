//! Bedwars Core -- package assembly for tick-driven host scripts.
//!
//! This crate turns a set of independently written plugins into one
//! namespaced package: a metadata file, tag files that make the host run the
//! load and tick scripts automatically, one script per lifecycle event, a
//! derived reload script, and whatever auxiliary scripts the plugins write.
//!
//! # Build Pipeline
//!
//! [`builder::PackageBuilder::build`] runs these steps in order:
//!
//! 1. **Directories** -- Create the namespace's output tree.
//! 2. **Metadata** -- Write `pack.mcmeta` with the display name and format version.
//! 3. **Tags** -- Register the load and tick scripts with the host (unload is
//!    never auto-registered).
//! 4. **Scripts** -- Write load, unload and tick, each the concatenation of
//!    every plugin's hook output in registration order.
//! 5. **Reload** -- Write a script that runs unload, then load.
//! 6. **Plugins** -- Run every plugin's `on_build` in registration order.
//! 7. **Commit or roll back** -- Any failure deletes the whole namespace
//!    directory.
//!
//! # Key Types
//!
//! - [`builder::PackageBuilder`] -- Plugin registry and build orchestrator.
//! - [`plugin::Plugin`] -- The capability interface every plugin implements.
//! - [`namespace::Namespace`] -- Validated identifier prefixed onto every
//!   generated name.
//! - [`snbt::Snbt`] -- Structured-data literal encoder.
//! - [`ticks::seconds_to_ticks`] -- Deterministic seconds-to-ticks conversion.

pub mod builder;
pub mod lifecycle;
pub mod namespace;
pub mod pack;
pub mod plugin;
pub mod position;
pub mod snbt;
pub mod ticks;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use builder::{BuildError, BuildReport, PackageBuilder};
pub use lifecycle::{LifecycleEvent, LifecycleScripts};
pub use namespace::{Namespace, NamespaceError};
pub use plugin::{BuildContext, Plugin, PluginError};
pub use position::{Vector3, format_position};
pub use snbt::Snbt;
pub use ticks::{TICKS_PER_SECOND, Ticks, seconds_to_ticks};
