//! Planetary systems and their static attributes, derived bit-exactly from the seed.

use serde::{Deserialize, Serialize};

use crate::names::{capitalize, make_name, PairTable};
use crate::seed::SeedState;

/// Economy labels, indexed by economy type (0–7).
pub const ECONOMY_NAMES: [&str; 8] = [
    "Rich Ind",
    "Average Ind",
    "Poor Ind",
    "Mainly Ind",
    "Mainly Agri",
    "Rich Agri",
    "Average Agri",
    "Poor Agri",
];

/// Government labels, indexed by government type (0–7).
pub const GOVERNMENT_NAMES: [&str; 8] = [
    "Anarchy",
    "Feudal",
    "Multi-gov",
    "Dictatorship",
    "Communist",
    "Confederacy",
    "Democracy",
    "Corporate State",
];

/// One planetary system. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    /// Position in the galaxy's system list (0–255).
    pub index: usize,
    pub x: u8,
    pub y: u8,
    /// Economy type, 0 (Rich Ind) to 7 (Poor Agri).
    pub economy: u8,
    /// Government type, 0 (Anarchy) to 7 (Corporate State).
    pub government: u8,
    /// Zero-based tech level; see [`System::tech_level_display`].
    pub tech_level: u8,
    /// Population in hundreds of millions.
    pub population: u16,
    /// Turnover in MCR.
    pub productivity: u32,
    /// Planet radius in km.
    pub radius: u16,
    pub name: String,
    goatsoup_seed: [u8; 4],
}

impl System {
    /// Seed bytes for this system's goat-soup generator.
    pub fn goatsoup_seed(&self) -> [u8; 4] {
        self.goatsoup_seed
    }

    pub fn economy_name(&self) -> &'static str {
        ECONOMY_NAMES[self.economy as usize & 7]
    }

    pub fn government_name(&self) -> &'static str {
        GOVERNMENT_NAMES[self.government as usize & 7]
    }

    /// Tech level as shown to the player (one-based).
    pub fn tech_level_display(&self) -> u8 {
        self.tech_level + 1
    }

    /// Case-insensitive prefix match against the system name.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name
            .to_lowercase()
            .starts_with(&prefix.trim().to_lowercase())
    }

    /// One-line summary: name, tech level, economy, government.
    pub fn short_description(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.tech_level_display(),
            self.economy_name(),
            self.government_name()
        )
    }
}

/// Generate one system from the current seed, advancing the seed by four
/// shuffles. `index` is recorded on the system and does not affect its data.
pub fn generate_system(seed: &mut SeedState, index: usize) -> System {
    let x = SeedState::hi(seed.w1);
    let y = SeedState::hi(seed.w0);
    let long_name = seed.w0 & 0x40 != 0;

    let government = ((seed.w1 >> 3) & 7) as u8; // bits 3..5 of w1
    let mut economy = ((seed.w0 >> 8) & 7) as u8; // bits 8..10 of w0
    if government <= 1 {
        economy |= 2;
    }

    let tech_level =
        ((seed.w1 >> 8) & 3) as u8 + (economy ^ 7) + (government >> 1) + (government & 1);
    let population = 4 * tech_level as u16 + economy as u16 + government as u16 + 1;
    let productivity =
        ((economy as u32 & 7) + 3) * (government as u32 + 4) * population as u32 * 8;
    let radius = 256 * ((SeedState::hi(seed.w2) as u16 & 15) + 11) + x as u16;

    let goatsoup_seed = [
        SeedState::lo(seed.w1),
        SeedState::hi(seed.w1),
        SeedState::lo(seed.w2),
        SeedState::hi(seed.w2),
    ];

    let mut samples = [0u8; 4];
    for sample in samples.iter_mut() {
        *sample = 2 * (SeedState::hi(seed.w2) & 31);
        seed.shuffle();
    }
    let len = if long_name { 4 } else { 3 };
    let name = capitalize(&make_name(samples[..len].iter().copied(), PairTable::Planet));

    System {
        index,
        x,
        y,
        economy,
        government,
        tech_level,
        population,
        productivity,
        radius,
        name,
        goatsoup_seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_system_of_galaxy_one() {
        let mut seed = SeedState::default();
        let sys = generate_system(&mut seed, 0);
        assert_eq!(sys.name, "Tibedied");
        assert_eq!((sys.x, sys.y), (2, 90));
        assert_eq!(sys.economy, 2);
        assert_eq!(sys.government, 1);
        assert_eq!(sys.tech_level, 8);
        assert_eq!(sys.population, 36);
        assert_eq!(sys.productivity, 7200);
        assert_eq!(sys.radius, 4610);
    }

    #[test]
    fn test_generation_advances_seed_four_shuffles() {
        let mut seed = SeedState::default();
        let mut expected = seed;
        for _ in 0..4 {
            expected.shuffle();
        }
        generate_system(&mut seed, 0);
        assert_eq!(seed, expected);
    }

    #[test]
    fn test_goatsoup_seed_taken_before_shuffle() {
        let mut seed = SeedState::default();
        let sys = generate_system(&mut seed, 0);
        assert_eq!(sys.goatsoup_seed(), [0x48, 0x02, 0x53, 0xB7]);
    }

    #[test]
    fn test_anarchy_and_feudal_force_economy_bit() {
        let mut seed = SeedState::new(0x0000, 0x0008, 0x0000); // government 1, economy 0
        let sys = generate_system(&mut seed, 0);
        assert_eq!(sys.government, 1);
        assert_eq!(sys.economy, 2);
    }

    #[test]
    fn test_descriptions() {
        let mut seed = SeedState::default();
        let sys = generate_system(&mut seed, 0);
        assert_eq!(sys.economy_name(), "Poor Ind");
        assert_eq!(sys.government_name(), "Feudal");
        assert_eq!(sys.tech_level_display(), 9);
        assert_eq!(sys.short_description(), "Tibedied 9 Poor Ind Feudal");
    }

    #[test]
    fn test_name_prefix_is_case_insensitive() {
        let mut seed = SeedState::default();
        let sys = generate_system(&mut seed, 0);
        assert!(sys.name_starts_with("tib"));
        assert!(sys.name_starts_with(" TIBEDIED "));
        assert!(sys.name_starts_with(""));
        assert!(!sys.name_starts_with("lave"));
    }
}
