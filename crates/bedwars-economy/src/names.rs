//! Every host identifier the economy emits, derived from the namespace and
//! a component id. Load-time and tick-time code both go through here.

use bedwars_core::Namespace;

use crate::id::{GeneratorId, ShopId, ShopkeeperId};

/// Objective holding one progress counter per generator.
pub fn generators_objective(ns: &Namespace) -> String {
    ns.prefixed("generators")
}

/// Objective used as scratch space for a player's currency count.
pub fn currency_objective(ns: &Namespace) -> String {
    ns.prefixed("currency")
}

/// Fake-player name holding a generator's progress.
pub fn generator_holder(id: GeneratorId) -> String {
    id.to_string()
}

/// Tag on every shopkeeper villager.
pub fn shopkeeper_tag(ns: &Namespace) -> String {
    ns.prefixed("shopkeeper")
}

/// Tag on every shop display container.
pub fn shop_tag(ns: &Namespace) -> String {
    ns.prefixed("shop")
}

/// Tag addressing one shopkeeper's display container.
pub fn shop_container_tag(ns: &Namespace, id: ShopkeeperId) -> String {
    ns.prefixed(format!("shop_{id}"))
}

/// Custom-data key marking an item stack as a shop offer of this package.
pub fn shop_item_marker(ns: &Namespace) -> String {
    ns.prefixed("shop_item")
}

/// Storage resource holding every shop's offer list.
pub fn shop_storage(ns: &Namespace) -> String {
    ns.resource("shops")
}

/// Path inside [`shop_storage`] for one shop.
pub fn shop_storage_path(id: ShopId) -> String {
    id.to_string()
}
