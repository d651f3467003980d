//! Bedwars Economy -- generators, currencies and shops compiled to host
//! instructions.
//!
//! The host keeps no memory for this plugin beyond two scoreboard
//! objectives, a storage compound, and tagged entities. Everything else is
//! decided at compile time:
//!
//! - **Load** declares the objectives, seeds one counter per generator,
//!   spawns each shopkeeper with its display container, and writes every
//!   shop's offers to storage.
//! - **Tick** steps the generator counters, turns shopkeepers toward the
//!   nearest player, refreshes every container from storage, detects
//!   purchases, and clears leftover offer stacks.
//! - **Unload** removes the objectives and every tagged entity.
//! - **Build** writes the `purchase` macro function the tick script calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bedwars_core::PackageBuilder;
//! use bedwars_economy::{EconomyConfig, EconomyPlugin};
//!
//! let mut builder = PackageBuilder::new("Bed Wars", "bedwars")?;
//! let mut economy = EconomyPlugin::new(builder.namespace());
//! economy.configure(config)?;
//! builder.register_plugin(Box::new(economy));
//! builder.build(Path::new("build"))?;
//! ```

pub mod config;
pub mod id;
pub mod layout;
pub mod load;
pub mod names;
pub mod plugin;
pub mod purchase;
pub mod tick;

pub use config::{Currency, EconomyConfig, Generator, Item, Shop, ShopItem, Shopkeeper};
pub use id::{GeneratorId, ShopId, ShopkeeperId};
pub use layout::{EconomyConfigError, EconomyLayout};
pub use plugin::EconomyPlugin;
