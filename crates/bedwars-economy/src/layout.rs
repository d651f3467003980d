//! Resolved economy state shared by load-time and tick-time generation.
//!
//! [`EconomyLayout::resolve`] runs once per configuration. It assigns the
//! stable ids every generated identifier is derived from, converts generator
//! delays to ticks, resolves prices against the currency table, and flattens
//! every shop's offers into the purchasable list. Both generation passes
//! read this structure and never recompute positions on their own.

use std::collections::HashMap;

use bedwars_core::{Ticks, Vector3, seconds_to_ticks};

use crate::config::{Currency, EconomyConfig, Shop};
use crate::id::{GeneratorId, ShopId, ShopkeeperId};

/// Colour used for prices in an unknown currency.
pub const FALLBACK_COLOR: &str = "white";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors produced while configuring the economy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconomyConfigError {
    /// `configure` was called a second time.
    #[error("economy plugin is already configured")]
    AlreadyConfigured,

    /// A generator delay is negative, not finite, or too large.
    #[error("generator {generator} has invalid delay {delay_seconds}s")]
    InvalidDelay {
        generator: GeneratorId,
        delay_seconds: f64,
    },

    /// A reward or price count does not fit the host's 32-bit scores.
    #[error("item '{item}' in shop {shop} has count {count} (largest is {max})", max = i32::MAX)]
    CountOverflow { shop: ShopId, item: String, count: u32 },
}

// ===========================================================================
// Currency lookup
// ===========================================================================

/// Currencies keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CurrencyBook {
    by_id: HashMap<String, Currency>,
}

/// How a price's currency is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyLabel<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

impl CurrencyBook {
    /// Later entries with a repeated id replace earlier ones.
    pub fn new(currencies: &[Currency]) -> Self {
        let by_id = currencies
            .iter()
            .fold(HashMap::new(), |mut acc, currency| {
                acc.insert(currency.id.clone(), currency.clone());
                acc
            });
        Self { by_id }
    }

    /// Display name and colour for `id`. Unknown ids, and blank names or
    /// colours, fall back to the raw id and [`FALLBACK_COLOR`].
    pub fn label<'a>(&'a self, id: &'a str) -> CurrencyLabel<'a> {
        let currency = self.by_id.get(id);
        let name = currency
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(id);
        let color = currency
            .map(|c| c.color.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(FALLBACK_COLOR);
        CurrencyLabel { name, color }
    }
}

// ===========================================================================
// Resolved entries
// ===========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGenerator {
    pub id: GeneratorId,
    pub item: String,
    pub position: Vector3,
    /// Ticks between spawns.
    pub threshold: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShop {
    pub id: ShopId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedShopkeeper {
    pub id: ShopkeeperId,
    pub shop: ShopId,
    pub position: Vector3,
}

/// One purchasable offer with its price already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub shop: ShopId,
    pub slot: u8,
    pub item_id: String,
    pub count: i32,
    pub name: String,
    pub price_id: String,
    pub price_count: i32,
    pub currency_name: String,
    pub currency_color: String,
}

// ===========================================================================
// Layout
// ===========================================================================

/// The configured economy, with stable ids assigned.
#[derive(Debug, Clone, Default)]
pub struct EconomyLayout {
    pub generators: Vec<PlacedGenerator>,
    pub currencies: CurrencyBook,
    pub shops: Vec<PlacedShop>,
    /// Every shopkeeper of every shop, numbered across shops.
    pub shopkeepers: Vec<PlacedShopkeeper>,
    /// Every shop's offers in shop order. Offers repeated across shops stay
    /// repeated.
    pub purchasable: Vec<Offer>,
}

impl EconomyLayout {
    pub fn resolve(config: &EconomyConfig) -> Result<Self, EconomyConfigError> {
        let currencies = CurrencyBook::new(&config.currencies);

        let generators = config
            .generators
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let id = GeneratorId(i as u32);
                seconds_to_ticks(g.delay_seconds)
                    .map(|threshold| PlacedGenerator {
                        id,
                        item: g.item.clone(),
                        position: g.position,
                        threshold,
                    })
                    .ok_or(EconomyConfigError::InvalidDelay {
                        generator: id,
                        delay_seconds: g.delay_seconds,
                    })
            })
            .collect::<Result<Vec<_>, EconomyConfigError>>()?;

        let shops = config
            .shops
            .iter()
            .enumerate()
            .map(|(i, shop)| PlacedShop {
                id: ShopId(i as u32),
                name: shop.name.clone(),
            })
            .collect();

        let shopkeepers = place_shopkeepers(&config.shops);

        let purchasable = config
            .shops
            .iter()
            .enumerate()
            .map(|(i, shop)| resolve_offers(ShopId(i as u32), shop, &currencies))
            .collect::<Result<Vec<_>, EconomyConfigError>>()?
            .into_iter()
            .flatten()
            .collect();

        Ok(Self {
            generators,
            currencies,
            shops,
            shopkeepers,
            purchasable,
        })
    }

    /// Offers of one shop, in slot-list order.
    pub fn offers_of(&self, shop: ShopId) -> impl Iterator<Item = &Offer> {
        self.purchasable.iter().filter(move |o| o.shop == shop)
    }

    pub fn shop(&self, id: ShopId) -> Option<&PlacedShop> {
        self.shops.iter().find(|s| s.id == id)
    }
}

/// Number every shopkeeper across all shops, folding the running index
/// through the nested sequence.
fn place_shopkeepers(shops: &[Shop]) -> Vec<PlacedShopkeeper> {
    shops
        .iter()
        .enumerate()
        .fold(Vec::new(), |mut placed, (shop_index, shop)| {
            for keeper in &shop.shopkeepers {
                let id = ShopkeeperId(placed.len() as u32);
                placed.push(PlacedShopkeeper {
                    id,
                    shop: ShopId(shop_index as u32),
                    position: keeper.position,
                });
            }
            placed
        })
}

fn resolve_offers(
    shop_id: ShopId,
    shop: &Shop,
    currencies: &CurrencyBook,
) -> Result<Vec<Offer>, EconomyConfigError> {
    shop.items
        .iter()
        .map(|item| -> Result<Offer, EconomyConfigError> {
            let host_int = |count: u32| {
                i32::try_from(count).map_err(|_| EconomyConfigError::CountOverflow {
                    shop: shop_id,
                    item: item.id.clone(),
                    count,
                })
            };
            let count = host_int(item.count)?;
            let price_count = host_int(item.price.count)?;
            let label = currencies.label(&item.price.id);
            Ok(Offer {
                shop: shop_id,
                slot: item.slot,
                item_id: item.id.clone(),
                count,
                name: item.name.clone(),
                price_id: item.price.id.clone(),
                price_count,
                currency_name: label.name.to_string(),
                currency_color: label.color.to_string(),
            })
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
