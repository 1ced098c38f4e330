//! The 256 systems of a galaxy, generated from the base seed, plus distance queries.
//!
//! Galaxy `n` is reached by twisting the default seed `n - 1` times. Since a
//! twist is an 8-bit rotate, eight twists are the identity and galaxy numbers
//! repeat with period 8.

use crate::planet::{generate_system, System};
use crate::seed::SeedState;

/// Systems per galaxy.
pub const SYSTEM_COUNT: usize = 256;

/// Number of distinct galaxies.
pub const GALAXY_COUNT: u32 = 8;

#[derive(Debug, Clone)]
pub struct Galaxy {
    number: u32,
    seed: SeedState,
    systems: Vec<System>,
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Galaxy {
    /// Generate galaxy `number` (any value; taken modulo 8, 0 meaning 8).
    pub fn new(number: u32) -> Self {
        let mut galaxy = Self {
            number: 1,
            seed: SeedState::default(),
            systems: Vec::new(),
        };
        galaxy.set_galaxy(number);
        galaxy
    }

    /// Regenerate all systems for galaxy `number`.
    ///
    /// The new systems are built in full before they replace the old ones.
    pub fn set_galaxy(&mut self, number: u32) {
        let twists = (number % GALAXY_COUNT + GALAXY_COUNT - 1) % GALAXY_COUNT;
        let mut seed = SeedState::default();
        for _ in 0..twists {
            seed.twist_all();
        }
        let base = seed;

        let systems: Vec<System> = (0..SYSTEM_COUNT)
            .map(|index| generate_system(&mut seed, index))
            .collect();

        self.number = twists + 1;
        self.seed = base;
        self.systems = systems;
        log::info!("Galaxy {} generated (seed {})", self.number, base);
    }

    /// Advance to the next galaxy, wrapping from 8 back to 1.
    pub fn next_galaxy(&mut self) {
        self.set_galaxy(self.number + 1);
    }

    /// Galaxy number, 1–8.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Seed this galaxy was generated from.
    pub fn base_seed(&self) -> SeedState {
        self.seed
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn system(&self, index: usize) -> Option<&System> {
        self.systems.get(index)
    }

    /// Nearest system whose name starts with `name` (case-insensitive).
    ///
    /// Ties go to the lowest index. An empty name matches every system, so it
    /// resolves to `current` itself at distance 0.
    pub fn closest_system_like(&self, current: &System, name: &str) -> Option<(&System, u32)> {
        let mut best: Option<(&System, u32)> = None;
        for candidate in self.systems.iter().filter(|s| s.name_starts_with(name)) {
            let d = distance(current, candidate);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
        best
    }

    /// All systems within `max_distance` of `current`, nearest first.
    pub fn systems_within(&self, current: &System, max_distance: u32) -> Vec<(&System, u32)> {
        let mut found: Vec<(&System, u32)> = self
            .systems
            .iter()
            .map(|s| (s, distance(current, s)))
            .filter(|&(_, d)| d <= max_distance)
            .collect();
        found.sort_by_key(|&(_, d)| d);
        found
    }
}

/// Distance in tenths of a light year: `floor(4·sqrt(dx² + dy²/4))`.
pub fn distance(a: &System, b: &System) -> u32 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (4.0 * (dx * dx + dy * dy / 4.0).sqrt()) as u32
}
