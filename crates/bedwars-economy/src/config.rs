//! Declarative economy configuration.
//!
//! These structs are the on-disk and in-memory input to
//! [`EconomyPlugin::configure`](crate::EconomyPlugin::configure). They are
//! deserialized from RON, JSON or TOML and resolved into an
//! [`EconomyLayout`](crate::layout::EconomyLayout) once.

use bedwars_core::Vector3;
use serde::{Deserialize, Serialize};

/// Everything the economy plugin compiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    #[serde(default)]
    pub generators: Vec<Generator>,
    #[serde(default)]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub shops: Vec<Shop>,
}

/// A spawner that drops one item at a fixed position every `delay_seconds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub item: String,
    pub position: Vector3,
    #[serde(alias = "delaySeconds")]
    pub delay_seconds: f64,
}

/// A currency: the item players pay with, plus how its name is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Item id of the currency stack, also the key prices refer to.
    pub id: String,
    pub name: String,
    pub color: String,
}

/// An item id and a stack count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub count: u32,
}

/// An offer in a shop: the reward stack, its slot, and its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub count: u32,
    pub name: String,
    #[serde(default, alias = "Slot")]
    pub slot: u8,
    pub price: Item,
}

/// A shop: its offers and every location it is sold from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default = "default_shop_name")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShopItem>,
    #[serde(default)]
    pub shopkeepers: Vec<Shopkeeper>,
}

fn default_shop_name() -> String {
    "Shop".to_string()
}

/// Where one shopkeeper stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shopkeeper {
    pub position: Vector3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_with_camel_case_aliases() {
        let input = r#"{
            "generators": [
                {"item": "minecraft:iron_ingot", "position": {"x": 0, "y": 64, "z": 0}, "delaySeconds": 1}
            ],
            "currencies": [{"id": "minecraft:gold_ingot", "name": "Gold", "color": "yellow"}],
            "shops": [{
                "name": "Blocks",
                "items": [{
                    "id": "minecraft:white_wool", "count": 16, "name": "Wool", "Slot": 3,
                    "price": {"id": "minecraft:gold_ingot", "count": 4}
                }],
                "shopkeepers": [{"position": {"x": 5, "y": 64, "z": 5}}]
            }]
        }"#;

        let config: EconomyConfig = serde_json::from_str(input).unwrap();
        assert_eq!(config.generators[0].delay_seconds, 1.0);
        assert_eq!(config.shops[0].items[0].slot, 3);
        assert_eq!(config.shops[0].items[0].price.count, 4);
        assert_eq!(config.shops[0].shopkeepers[0].position, Vector3::new(5.0, 64.0, 5.0));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: EconomyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EconomyConfig::default());
    }

    #[test]
    fn shop_name_defaults() {
        let shop: Shop = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(shop.name, "Shop");
        assert!(shop.shopkeepers.is_empty());
    }
}
