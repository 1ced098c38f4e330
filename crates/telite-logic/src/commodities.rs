//! The static trade-goods catalog.

use serde::Serialize;

/// Trade unit of a commodity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Tonne,
    Kilogram,
    Gram,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Tonne => "t",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
        }
    }

    /// Tons of hold space taken by one unit. Precious goods travel in the
    /// safe and take none.
    pub fn hold_space(self) -> u32 {
        match self {
            Unit::Tonne => 1,
            Unit::Kilogram | Unit::Gram => 0,
        }
    }
}

/// One catalog entry.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Commodity {
    /// Position in [`COMMODITIES`].
    pub id: usize,
    pub base_price: u8,
    /// Price change per economy step (negative for agricultural goods).
    pub gradient: i8,
    pub base_quantity: u8,
    /// Bits of the volatility byte that perturb this good.
    pub mask: u8,
    pub unit: Unit,
    pub legal: bool,
    pub name: &'static str,
}

pub const COMMODITY_COUNT: usize = 17;

/// Index of "Alien Items", which markets never stock.
pub const ALIEN_ITEMS: usize = 16;

/// Index of "Minerals", the product of mining.
pub const MINERALS: usize = 12;

#[allow(clippy::too_many_arguments)]
const fn good(
    id: usize,
    base_price: u8,
    gradient: i8,
    base_quantity: u8,
    mask: u8,
    unit: Unit,
    legal: bool,
    name: &'static str,
) -> Commodity {
    Commodity {
        id,
        base_price,
        gradient,
        base_quantity,
        mask,
        unit,
        legal,
        name,
    }
}

pub static COMMODITIES: [Commodity; COMMODITY_COUNT] = [
    good(0, 0x13, -0x02, 0x06, 0x01, Unit::Tonne, true, "Food"),
    good(1, 0x14, -0x01, 0x0A, 0x03, Unit::Tonne, true, "Textiles"),
    good(2, 0x41, -0x03, 0x02, 0x07, Unit::Tonne, true, "Radioactives"),
    good(3, 0x28, -0x05, 0xE2, 0x1F, Unit::Tonne, false, "Slaves"),
    good(4, 0x53, -0x05, 0xFB, 0x0F, Unit::Tonne, true, "Liquor/Wines"),
    good(5, 0xC4, 0x08, 0x36, 0x03, Unit::Tonne, true, "Luxuries"),
    good(6, 0xEB, 0x1D, 0x08, 0x78, Unit::Tonne, false, "Narcotics"),
    good(7, 0x9A, 0x0E, 0x38, 0x03, Unit::Tonne, true, "Computers"),
    good(8, 0x75, 0x06, 0x28, 0x07, Unit::Tonne, true, "Machinery"),
    good(9, 0x4E, 0x01, 0x11, 0x1F, Unit::Tonne, true, "Alloys"),
    good(10, 0x7C, 0x0D, 0x1D, 0x07, Unit::Tonne, false, "Firearms"),
    good(11, 0xB0, -0x09, 0xDC, 0x3F, Unit::Tonne, true, "Furs"),
    good(12, 0x20, -0x01, 0x35, 0x03, Unit::Tonne, true, "Minerals"),
    good(13, 0x61, -0x01, 0x42, 0x07, Unit::Kilogram, true, "Gold"),
    good(14, 0xAB, -0x02, 0x37, 0x1F, Unit::Kilogram, true, "Platinum"),
    good(15, 0x2D, -0x01, 0xFA, 0x0F, Unit::Gram, true, "Gem-Stones"),
    good(16, 0x35, 0x0F, 0xC0, 0x07, Unit::Tonne, true, "Alien Items"),
];

/// First catalog entry whose name starts with `prefix` (case-insensitive).
pub fn find_commodity(prefix: &str) -> Option<&'static Commodity> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return None;
    }
    COMMODITIES
        .iter()
        .find(|c| c.name.to_lowercase().starts_with(&prefix))
}
