//! The player's ship: cash, fuel, cargo, equipment and criminal record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::commodities::{Commodity, COMMODITIES, COMMODITY_COUNT};
use crate::config::GameConfig;
use crate::upgrades::UpgradeKind;

/// Criminal record, escalating with each detected smuggling sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LegalStatus {
    #[default]
    Clean,
    Offender,
    Fugitive,
}

impl LegalStatus {
    /// One step worse, saturating at `Fugitive`.
    pub fn escalate(self) -> Self {
        match self {
            LegalStatus::Clean => LegalStatus::Offender,
            LegalStatus::Offender | LegalStatus::Fugitive => LegalStatus::Fugitive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LegalStatus::Clean => "Clean",
            LegalStatus::Offender => "Offender",
            LegalStatus::Fugitive => "Fugitive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub cash: f64,
    /// Fuel in tenths of a light year.
    pub fuel: u32,
    pub max_fuel: u32,
    /// Hold size before upgrades.
    pub hold_base: u32,
    /// Units carried, indexed by commodity id.
    pub cargo: [u32; COMMODITY_COUNT],
    /// Installed upgrades and how many of each.
    pub upgrades: BTreeMap<UpgradeKind, u32>,
    pub legal_status: LegalStatus,
    /// Systems (by index) where legal trade is refused.
    pub banned: BTreeSet<usize>,
    /// Index of the system the ship is docked at.
    pub system: usize,
}

impl Ship {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            name: config.commander_name.trim().to_string(),
            cash: config.cash,
            fuel: config.fuel.min(config.max_fuel),
            max_fuel: config.max_fuel,
            hold_base: config.hold_size,
            cargo: [0; COMMODITY_COUNT],
            upgrades: BTreeMap::new(),
            legal_status: LegalStatus::Clean,
            banned: BTreeSet::new(),
            system: config.start_system,
        }
    }

    /// Extra hold space from installed upgrades.
    pub fn hold_bonus(&self) -> u32 {
        self.upgrades
            .keys()
            .map(|kind| kind.hold_bonus())
            .fold(0, u32::saturating_add)
    }

    /// Total hold size including upgrade bonuses, saturating at `u32::MAX`.
    pub fn hold_size(&self) -> u32 {
        self.hold_base.saturating_add(self.hold_bonus())
    }

    /// Hold space taken by the current cargo, in tons.
    pub fn cargo_size(&self) -> u32 {
        COMMODITIES
            .iter()
            .map(|c| self.cargo[c.id] * c.unit.hold_space())
            .sum()
    }

    pub fn hold_remaining(&self) -> u32 {
        self.hold_size().saturating_sub(self.cargo_size())
    }

    pub fn cargo_of(&self, commodity: &Commodity) -> u32 {
        self.cargo[commodity.id]
    }

    /// Free tank capacity.
    pub fn fuel_room(&self) -> u32 {
        self.max_fuel.saturating_sub(self.fuel)
    }

    pub fn has(&self, kind: UpgradeKind) -> bool {
        self.upgrades.get(&kind).is_some_and(|&n| n > 0)
    }

    pub fn install(&mut self, kind: UpgradeKind) {
        *self.upgrades.entry(kind).or_insert(0) += 1;
    }

    /// Remove one unit of an upgrade. Returns false if none was installed.
    pub fn consume(&mut self, kind: UpgradeKind) -> bool {
        match self.upgrades.get_mut(&kind) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                self.upgrades.remove(&kind);
                true
            }
            None => false,
        }
    }

    pub fn is_banned(&self, system: usize) -> bool {
        self.banned.contains(&system)
    }

    /// Clear the criminal record and every ban.
    pub fn pardon(&mut self) {
        self.legal_status = LegalStatus::Clean;
        self.banned.clear();
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commodities::find_commodity;

    #[test]
    fn test_default_ship() {
        let ship = Ship::default();
        assert_eq!(ship.name, "Jameson");
        assert_eq!(ship.cash, 100.0);
        assert_eq!(ship.fuel, 70);
        assert_eq!(ship.hold_size(), 20);
        assert_eq!(ship.cargo_size(), 0);
        assert_eq!(ship.system, 7);
        assert_eq!(ship.legal_status, LegalStatus::Clean);
    }

    #[test]
    fn test_precious_goods_take_no_space() {
        let mut ship = Ship::default();
        ship.cargo[find_commodity("food").unwrap().id] = 5;
        ship.cargo[find_commodity("gold").unwrap().id] = 50;
        ship.cargo[find_commodity("gem").unwrap().id] = 9;
        assert_eq!(ship.cargo_size(), 5);
        assert_eq!(ship.hold_remaining(), 15);
    }

    #[test]
    fn test_cargo_bay_extends_hold() {
        let mut ship = Ship::default();
        ship.install(UpgradeKind::LargeCargoBay);
        assert_eq!(ship.hold_size(), 35);
    }

    #[test]
    fn test_hold_size_saturates() {
        let mut ship = Ship::default();
        ship.hold_base = u32::MAX - 1;
        ship.install(UpgradeKind::LargeCargoBay);
        assert_eq!(ship.hold_bonus(), crate::upgrades::CARGO_BAY_BONUS);
        assert_eq!(ship.hold_size(), u32::MAX);
        assert_eq!(ship.hold_remaining(), u32::MAX);
    }

    #[test]
    fn test_install_and_consume_stack() {
        let mut ship = Ship::default();
        ship.install(UpgradeKind::GalacticHyperdrive);
        ship.install(UpgradeKind::GalacticHyperdrive);
        assert!(ship.consume(UpgradeKind::GalacticHyperdrive));
        assert!(ship.has(UpgradeKind::GalacticHyperdrive));
        assert!(ship.consume(UpgradeKind::GalacticHyperdrive));
        assert!(!ship.has(UpgradeKind::GalacticHyperdrive));
        assert!(!ship.consume(UpgradeKind::GalacticHyperdrive));
    }

    #[test]
    fn test_legal_status_escalates() {
        assert_eq!(LegalStatus::Clean.escalate(), LegalStatus::Offender);
        assert_eq!(LegalStatus::Offender.escalate(), LegalStatus::Fugitive);
        assert_eq!(LegalStatus::Fugitive.escalate(), LegalStatus::Fugitive);
    }

    #[test]
    fn test_pardon_clears_bans() {
        let mut ship = Ship::default();
        ship.banned.insert(7);
        ship.legal_status = LegalStatus::Fugitive;
        ship.pardon();
        assert!(!ship.is_banned(7));
        assert_eq!(ship.legal_status, LegalStatus::Clean);
    }

    #[test]
    fn test_fuel_room() {
        let mut ship = Ship::default();
        assert_eq!(ship.fuel_room(), 0);
        ship.fuel = 25;
        assert_eq!(ship.fuel_room(), 45);
    }
}
