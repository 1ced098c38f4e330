//! Prices and stock for every catalog good at one system.
//!
//! A market is a pure function of the system's economy and a volatility
//! byte drawn on arrival. It is rebuilt from scratch on every system change.

use serde::Serialize;

use crate::commodities::{find_commodity, Commodity, ALIEN_ITEMS, COMMODITIES};
use crate::planet::System;

/// Fraction of the price withheld when selling.
pub const SELLING_FEE: f64 = 0.035;

/// Most units a market will hold of any good.
pub const MAX_QUANTITY: u32 = 63;

/// Price and stock of one good.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketGood {
    pub commodity: &'static Commodity,
    /// Buying price in credits, a multiple of 0.4.
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    goods: Vec<MarketGood>,
    fluctuation: i8,
    selling_fee: f64,
}

impl Market {
    /// Build the market for `system` under volatility `fluctuation`.
    pub fn new(system: &System, fluctuation: i8) -> Self {
        let goods = COMMODITIES
            .iter()
            .map(|c| {
                let (price, quantity) = price_and_quantity(c, system.economy, fluctuation);
                MarketGood {
                    commodity: c,
                    price,
                    quantity,
                }
            })
            .collect();
        log::debug!(
            "Market generated for {} (fluctuation {})",
            system.name,
            fluctuation
        );
        Self {
            goods,
            fluctuation,
            selling_fee: SELLING_FEE,
        }
    }

    /// Goods in catalog order.
    pub fn goods(&self) -> &[MarketGood] {
        &self.goods
    }

    pub fn good(&self, commodity: &Commodity) -> &MarketGood {
        &self.goods[commodity.id]
    }

    pub fn good_mut(&mut self, commodity: &Commodity) -> &mut MarketGood {
        &mut self.goods[commodity.id]
    }

    /// Look up a good by case-insensitive name prefix.
    pub fn lookup(&self, prefix: &str) -> Option<&MarketGood> {
        find_commodity(prefix).map(|c| self.good(c))
    }

    pub fn fluctuation(&self) -> i8 {
        self.fluctuation
    }

    pub fn selling_fee(&self) -> f64 {
        self.selling_fee
    }

    /// What the market pays per unit for a good it sells at `price`.
    pub fn selling_price(&self, price: f64) -> f64 {
        price * (1.0 - self.selling_fee)
    }
}

/// Price and stock of one commodity, with 8-bit wraparound throughout.
pub fn price_and_quantity(commodity: &Commodity, economy: u8, fluctuation: i8) -> (f64, u32) {
    let product = economy as i32 * commodity.gradient as i32;
    let variation = (fluctuation as u8 & commodity.mask) as i32;

    let raw_quantity = (commodity.base_quantity as i32 + variation - product) & 0xFF;
    let quantity = if raw_quantity & 0x80 != 0 || commodity.id == ALIEN_ITEMS {
        0
    } else {
        (raw_quantity & 0x3F) as u32
    };

    let raw_price = (commodity.base_price as i32 + variation + product) & 0xFF;
    let price = (raw_price * 4) as f64 / 10.0;

    (price, quantity)
}
