//! On-disk shape of the pack manifest.
//!
//! The economy file deserializes straight into
//! [`bedwars_economy::EconomyConfig`]; only the manifest needs its own type.

use serde::Deserialize;

/// `pack.{ron,toml,json}`: what the package is called and which namespace
/// every generated identifier lives under.
#[derive(Debug, Clone, Deserialize)]
pub struct PackData {
    #[serde(alias = "displayName")]
    pub display_name: String,
    pub namespace: String,
}
