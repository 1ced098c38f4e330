//! Ship equipment for sale at sufficiently advanced systems.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    LargeCargoBay,
    FuelScoops,
    MiningLasers,
    GalacticHyperdrive,
}

/// Catalog entry.
#[derive(Debug, PartialEq, Serialize)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub name: &'static str,
    /// Lowest displayed tech level that sells it.
    pub min_tech: u8,
    pub price: f64,
    /// Unique upgrades can be installed once; others stack.
    pub unique: bool,
}

pub static UPGRADES: [Upgrade; 4] = [
    Upgrade {
        kind: UpgradeKind::LargeCargoBay,
        name: "Large Cargo Bay",
        min_tech: 1,
        price: 400.0,
        unique: true,
    },
    Upgrade {
        kind: UpgradeKind::FuelScoops,
        name: "Fuel Scoops",
        min_tech: 5,
        price: 525.0,
        unique: true,
    },
    Upgrade {
        kind: UpgradeKind::MiningLasers,
        name: "Mining Lasers",
        min_tech: 10,
        price: 800.0,
        unique: true,
    },
    Upgrade {
        kind: UpgradeKind::GalacticHyperdrive,
        name: "Galactic Hyperdrive",
        min_tech: 10,
        price: 5000.0,
        unique: false,
    },
];

/// Extra hold space from a large cargo bay.
pub const CARGO_BAY_BONUS: u32 = 15;

impl UpgradeKind {
    pub fn info(self) -> &'static Upgrade {
        match self {
            UpgradeKind::LargeCargoBay => &UPGRADES[0],
            UpgradeKind::FuelScoops => &UPGRADES[1],
            UpgradeKind::MiningLasers => &UPGRADES[2],
            UpgradeKind::GalacticHyperdrive => &UPGRADES[3],
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn hold_bonus(self) -> u32 {
        match self {
            UpgradeKind::LargeCargoBay => CARGO_BAY_BONUS,
            _ => 0,
        }
    }

    /// Whether the upgrade is operated from the commander screen.
    pub fn is_usable(self) -> bool {
        !matches!(self, UpgradeKind::LargeCargoBay)
    }
}

/// First upgrade whose name starts with `prefix` (case-insensitive).
pub fn find_upgrade(prefix: &str) -> Option<&'static Upgrade> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return None;
    }
    UPGRADES
        .iter()
        .find(|u| u.name.to_lowercase().starts_with(&prefix))
}
