//! Load-time and unload-time instructions.
//!
//! The load script is safe to run repeatedly (the reload script does so):
//! objectives are re-added, counters are set rather than incremented, and
//! every shop store is overwritten.

use bedwars_core::{Namespace, Snbt, format_position};

use crate::id::ShopId;
use crate::layout::{EconomyLayout, Offer, PlacedShopkeeper};
use crate::names::*;

/// Entity type of the decorative shopkeeper.
pub const SHOPKEEPER_ENTITY: &str = "villager";

/// Entity type of the container that displays a shop's offers.
pub const SHOP_CONTAINER_ENTITY: &str = "minecraft:chest_minecart";

/// Name shown on a shop container whose name is blank.
pub const DEFAULT_SHOP_NAME: &str = "Shop";

pub fn load_lines(ns: &Namespace, layout: &EconomyLayout) -> Vec<String> {
    let mut lines = vec![
        format!("scoreboard objectives add {} dummy", generators_objective(ns)),
        format!("scoreboard objectives add {} dummy", currency_objective(ns)),
    ];

    lines.extend(layout.generators.iter().map(|g| {
        format!(
            "scoreboard players set {} {} 0",
            generator_holder(g.id),
            generators_objective(ns)
        )
    }));

    for keeper in &layout.shopkeepers {
        let shop_name = layout
            .shop(keeper.shop)
            .map(|s| s.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_SHOP_NAME);
        lines.push(summon_shopkeeper(ns, keeper));
        lines.push(summon_shop_display(ns, keeper, shop_name));
    }

    lines.extend(layout.shops.iter().map(|shop| {
        format!(
            "data modify storage {} {} set value {}",
            shop_storage(ns),
            shop_storage_path(shop.id),
            shop_contents(ns, layout, shop.id)
        )
    }));

    lines
}

pub fn unload_lines(ns: &Namespace) -> Vec<String> {
    vec![
        format!("scoreboard objectives remove {}", generators_objective(ns)),
        format!("scoreboard objectives remove {}", currency_objective(ns)),
        format!("kill @e[tag={ns}]"),
    ]
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

fn summon_shopkeeper(ns: &Namespace, keeper: &PlacedShopkeeper) -> String {
    let data = Snbt::compound([
        ("Tags", Snbt::tags([ns.to_string(), shopkeeper_tag(ns)])),
        ("NoAI", Snbt::Byte(1)),
        ("Silent", Snbt::Byte(1)),
        ("Invulnerable", Snbt::Byte(1)),
    ]);
    format!(
        "summon {SHOPKEEPER_ENTITY} {} {data}",
        format_position(&keeper.position)
    )
}

/// An item display one block above the shopkeeper, carrying the shop's
/// container, which in turn carries an inert marker.
fn summon_shop_display(ns: &Namespace, keeper: &PlacedShopkeeper, shop_name: &str) -> String {
    let marker = Snbt::compound([
        ("id", Snbt::from("minecraft:marker")),
        ("Tags", Snbt::tags([ns.to_string()])),
    ]);
    let container = Snbt::compound([
        ("id", Snbt::from(SHOP_CONTAINER_ENTITY)),
        (
            "Tags",
            Snbt::tags([
                ns.to_string(),
                shop_tag(ns),
                shop_container_tag(ns, keeper.id),
            ]),
        ),
        ("Passengers", Snbt::list([marker])),
        ("Silent", Snbt::Byte(1)),
        ("Invulnerable", Snbt::Byte(1)),
        ("CustomName", Snbt::string(shop_name)),
        (
            "DisplayState",
            Snbt::compound([("Name", Snbt::from("minecraft:barrier"))]),
        ),
    ]);
    let display = Snbt::compound([
        ("Tags", Snbt::tags([ns.to_string()])),
        ("Passengers", Snbt::list([container])),
    ]);
    format!(
        "summon item_display {} {display}",
        format_position(&keeper.position.above(1.0))
    )
}

// ---------------------------------------------------------------------------
// Shop stores
// ---------------------------------------------------------------------------

/// The list written to a shop's store and copied into its containers.
pub fn shop_contents(ns: &Namespace, layout: &EconomyLayout, shop: ShopId) -> Snbt {
    Snbt::list(layout.offers_of(shop).map(|offer| offer_stack(ns, offer)))
}

fn offer_stack(ns: &Namespace, offer: &Offer) -> Snbt {
    let custom_data = Snbt::compound([
        (shop_item_marker(ns), Snbt::Byte(1)),
        ("Tags".to_string(), Snbt::tags([ns.to_string()])),
    ]);
    let item_name = Snbt::compound([
        ("bold", Snbt::Bool(true)),
        ("text", Snbt::string(offer.name.as_str())),
    ]);
    let lore = Snbt::compound([
        (
            "text",
            Snbt::string(format!("{} {}", offer.price_count, offer.currency_name)),
        ),
        ("italic", Snbt::Bool(false)),
        ("color", Snbt::string(offer.currency_color.as_str())),
    ]);
    Snbt::compound([
        ("id", Snbt::string(offer.item_id.as_str())),
        ("count", Snbt::Int(offer.count)),
        ("Slot", Snbt::Byte(offer.slot as i8)),
        (
            "components",
            Snbt::compound([
                ("custom_data", custom_data),
                ("item_name", item_name),
                ("lore", Snbt::list([lore])),
            ]),
        ),
    ])
}
