//! Per-tick instructions.
//!
//! Sections run in a fixed order: generators, shopkeeper orientation, shop
//! refresh, purchase detection, cleanup.

use bedwars_core::{Namespace, Snbt, format_position};

use crate::layout::{EconomyLayout, Offer, PlacedGenerator};
use crate::names::*;
use crate::purchase::purchase_call;

/// Inventory slot holding the stack a player has picked up.
pub const CURSOR_SLOT: &str = "player.cursor";

/// Every general inventory slot.
pub const CONTAINER_SLOTS: &str = "container.*";

pub fn tick_lines(ns: &Namespace, layout: &EconomyLayout) -> Vec<String> {
    let mut lines = vec!["# Generators".to_string()];
    for generator in &layout.generators {
        lines.extend(generator_step(ns, generator));
    }

    lines.push("# Shopkeepers".to_string());
    lines.push(format!(
        "execute as @e[tag={}] at @s run tp @s ~ ~ ~ facing entity @p",
        shopkeeper_tag(ns)
    ));

    lines.push("# Shops".to_string());
    lines.extend(layout.shopkeepers.iter().map(|keeper| {
        format!(
            "execute as @e[tag={}] run data modify entity @s Items set from storage {} {}",
            shop_container_tag(ns, keeper.id),
            shop_storage(ns),
            shop_storage_path(keeper.shop)
        )
    }));

    lines.push("# Purchases".to_string());
    for offer in &layout.purchasable {
        lines.extend(purchase_checks(ns, offer));
    }

    lines.push("# Cleanup".to_string());
    lines.push(format!(
        "execute as @a run clear @s *[custom_data={}]",
        marker_predicate(ns)
    ));

    lines
}

/// Advance one generator: count up, spawn and reset once the threshold is
/// reached. The reset is to exactly zero, so a late check never carries
/// progress over into the next cycle.
fn generator_step(ns: &Namespace, generator: &PlacedGenerator) -> [String; 3] {
    let holder = generator_holder(generator.id);
    let objective = generators_objective(ns);
    let ready = format!(
        "execute if score {holder} {objective} matches {}..",
        generator.threshold
    );
    let item = Snbt::compound([
        ("Tags", Snbt::tags([ns.to_string()])),
        (
            "Item",
            Snbt::compound([
                ("id", Snbt::string(generator.item.as_str())),
                ("count", Snbt::Int(1)),
            ]),
        ),
    ]);
    [
        format!("scoreboard players add {holder} {objective} 1"),
        format!(
            "{ready} run summon item {} {item}",
            format_position(&generator.position)
        ),
        format!("{ready} run scoreboard players set {holder} {objective} 0"),
    ]
}

/// `{<ns>_shop_item:1b}`, matched against an item's custom data.
fn marker_predicate(ns: &Namespace) -> Snbt {
    Snbt::compound([(shop_item_marker(ns), Snbt::Byte(1))])
}

/// Check the held stack and every inventory slot for this offer's marked
/// stack, calling the purchase procedure on a match.
fn purchase_checks(ns: &Namespace, offer: &Offer) -> [String; 2] {
    let predicate = format!(
        "{}[count={},custom_data={}]",
        offer.item_id,
        offer.count,
        marker_predicate(ns)
    );
    let call = purchase_call(ns, offer);
    [CURSOR_SLOT, CONTAINER_SLOTS].map(|slot| {
        format!("execute as @a if items entity @s {slot} {predicate} run {call}")
    })
}
