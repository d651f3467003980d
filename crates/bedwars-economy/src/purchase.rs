//! The purchase procedure and the calls that invoke it.
//!
//! The procedure is a macro function: every `$(...)` placeholder is filled
//! from the argument compound passed by the caller. It counts the caller's
//! price items, and either grants the reward, reports success and removes
//! the price, or reports failure and removes nothing.

use bedwars_core::{Namespace, Snbt};

use crate::layout::Offer;
use crate::names::currency_objective;

/// Function name of the purchase procedure.
pub const PURCHASE_FUNCTION: &str = "purchase";

/// Body of the purchase procedure: exactly five macro lines.
pub fn purchase_function(ns: &Namespace) -> Vec<String> {
    let score = format!("@s {}", currency_objective(ns));
    let can_afford = format!("if score {score} matches $(price_count)..");
    vec![
        format!("$execute store result score {score} if items entity @s container.* $(price_id)"),
        format!("$execute {can_afford} run give @s $(reward_id) $(reward_count)"),
        format!(
            r#"$execute {can_afford} run tellraw @s {{"text":"Purchased $(reward_count) $(reward_name)!","color":"green"}}"#
        ),
        format!(
            r#"$execute unless score {score} matches $(price_count).. run tellraw @s {{"text":"Not enough $(price_name)!","color":"red"}}"#
        ),
        format!("$execute {can_afford} run clear @s $(price_id) $(price_count)"),
    ]
}

/// Macro arguments for one offer.
pub fn purchase_args(offer: &Offer) -> Snbt {
    Snbt::compound([
        ("reward_id", Snbt::string(offer.item_id.as_str())),
        ("reward_count", Snbt::Int(offer.count)),
        ("reward_name", Snbt::string(offer.name.as_str())),
        ("price_id", Snbt::string(offer.price_id.as_str())),
        ("price_count", Snbt::Int(offer.price_count)),
        ("price_name", Snbt::string(offer.currency_name.as_str())),
    ])
}

/// `function <ns>:purchase {...}` for one offer.
pub fn purchase_call(ns: &Namespace, offer: &Offer) -> String {
    format!(
        "function {} {}",
        ns.resource(PURCHASE_FUNCTION),
        purchase_args(offer)
    )
}
