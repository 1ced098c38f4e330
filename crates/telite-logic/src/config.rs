//! Starting state of a new game.
//!
//! ```
//! use telite_logic::config::{validate_config, GameConfig};
//!
//! let config = GameConfig::from_json(r#"{ "commander_name": "Hoopy", "cash": 1000.0 }"#).unwrap();
//! assert_eq!(config.fuel, 70);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::galaxy::{GALAXY_COUNT, SYSTEM_COUNT};
use crate::randomizer::Algorithm;

/// Credits per fuel unit (a tenth of a light year) at every system.
pub const FUEL_COST: f64 = 0.2;

/// Index of Lave in galaxy one.
pub const LAVE: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub commander_name: String,
    /// Starting galaxy, 1–8.
    pub galaxy: u32,
    /// Starting system index.
    pub start_system: usize,
    pub cash: f64,
    /// Tank capacity in tenths of a light year.
    pub max_fuel: u32,
    pub fuel: u32,
    /// Base hold size in tons, before upgrades.
    pub hold_size: u32,
    pub fuel_cost: f64,
    pub randomizer: Algorithm,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            commander_name: "Jameson".to_string(),
            galaxy: 1,
            start_system: LAVE,
            cash: 100.0,
            max_fuel: 70,
            fuel: 70,
            hold_size: 20,
            fuel_cost: FUEL_COST,
            randomizer: Algorithm::Sas,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("commander name is empty")]
    EmptyName,
    #[error("galaxy {0} is outside 1-8")]
    InvalidGalaxy(u32),
    #[error("start system {0} is outside the galaxy")]
    InvalidSystem(usize),
    #[error("starting cash {0} is negative")]
    NegativeCash(f64),
    #[error("fuel {fuel} exceeds tank capacity {max_fuel}")]
    FuelOverCapacity { fuel: u32, max_fuel: u32 },
    #[error("hold size must be positive")]
    ZeroHold,
    #[error("fuel cost {0} must be positive")]
    InvalidFuelCost(f64),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.commander_name.trim().is_empty() {
        errors.push(ConfigError::EmptyName);
    }
    if !(1..=GALAXY_COUNT).contains(&config.galaxy) {
        errors.push(ConfigError::InvalidGalaxy(config.galaxy));
    }
    if config.start_system >= SYSTEM_COUNT {
        errors.push(ConfigError::InvalidSystem(config.start_system));
    }
    if config.cash < 0.0 {
        errors.push(ConfigError::NegativeCash(config.cash));
    }
    if config.fuel > config.max_fuel {
        errors.push(ConfigError::FuelOverCapacity {
            fuel: config.fuel,
            max_fuel: config.max_fuel,
        });
    }
    if config.hold_size == 0 {
        errors.push(ConfigError::ZeroHold);
    }
    if config.fuel_cost <= 0.0 {
        errors.push(ConfigError::InvalidFuelCost(config.fuel_cost));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&GameConfig::default()).is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "galaxy": 3, "randomizer": "lcc" }"#).unwrap();
        assert_eq!(config.galaxy, 3);
        assert_eq!(config.randomizer, Algorithm::Lcc);
        assert_eq!(config.commander_name, "Jameson");
        assert_eq!(config.start_system, LAVE);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ galaxy: ").is_err());
        assert!(GameConfig::from_json(r#"{ "randomizer": "mersenne" }"#).is_err());
    }

    #[test]
    fn test_collects_every_error() {
        let config = GameConfig {
            commander_name: "  ".into(),
            galaxy: 9,
            start_system: 256,
            cash: -1.0,
            fuel: 80,
            hold_size: 0,
            fuel_cost: 0.0,
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ConfigError::FuelOverCapacity {
            fuel: 80,
            max_fuel: 70
        }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::InvalidGalaxy(0).to_string(),
            "galaxy 0 is outside 1-8"
        );
    }
}
