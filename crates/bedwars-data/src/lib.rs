//! Bedwars Data -- loads a pack definition from a directory of RON, TOML or
//! JSON files and turns it into a ready-to-build [`PackageBuilder`].
//!
//! A pack directory holds:
//!
//! - `pack.*` (required): display name and namespace;
//! - `economy.*` (optional): generators, currencies and shops.

pub mod loader;
pub mod schema;

use std::path::{Path, PathBuf};

use bedwars_core::PackageBuilder;
use bedwars_economy::{EconomyConfig, EconomyPlugin};
use tracing::{debug, info};

pub use loader::{DataLoadError, Format, deserialize_file, detect_format, find_data_file};
pub use schema::PackData;

/// Base name of the required manifest file.
pub const PACK_FILE: &str = "pack";

/// Base name of the optional economy file.
pub const ECONOMY_FILE: &str = "economy";

/// Everything read from a pack directory.
#[derive(Debug, Clone)]
pub struct PackDefinition {
    pub manifest: PackData,
    /// The economy configuration and the file it came from.
    pub economy: Option<(PathBuf, EconomyConfig)>,
}

/// Read the manifest and, if present, the economy file from `dir`.
pub fn load_pack(dir: &Path) -> Result<PackDefinition, DataLoadError> {
    let manifest_path = loader::require_data_file(dir, PACK_FILE)?;
    let manifest: PackData = deserialize_file(&manifest_path)?;
    debug!(file = %manifest_path.display(), namespace = %manifest.namespace, "loaded manifest");

    let economy = match find_data_file(dir, ECONOMY_FILE)? {
        Some(path) => {
            let config: EconomyConfig = deserialize_file(&path)?;
            debug!(
                file = %path.display(),
                generators = config.generators.len(),
                currencies = config.currencies.len(),
                shops = config.shops.len(),
                "loaded economy"
            );
            Some((path, config))
        }
        None => None,
    };

    info!(dir = %dir.display(), namespace = %manifest.namespace, "loaded pack");
    Ok(PackDefinition { manifest, economy })
}

impl PackDefinition {
    /// Create the builder and register every plugin the definition calls
    /// for, configured.
    pub fn into_builder(self) -> Result<PackageBuilder, DataLoadError> {
        let mut builder =
            PackageBuilder::new(&self.manifest.display_name, &self.manifest.namespace)?;
        if let Some((file, config)) = self.economy {
            let mut economy = EconomyPlugin::new(builder.namespace());
            economy
                .configure(config)
                .map_err(|source| DataLoadError::Economy { file, source })?;
            builder.register_plugin(Box::new(economy));
        }
        Ok(builder)
    }
}
