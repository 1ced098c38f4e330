//! Game logic for Telite, a trading game across eight procedurally
//! generated galaxies.
//!
//! The crate has no I/O beyond logging. Every world detail is derived from
//! a three-word seed, so the same galaxy number always yields the same 256
//! systems, the same descriptions and the same opening market. Chance
//! events draw from an injectable [`rand::RngCore`], which keeps whole
//! sessions reproducible under test.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`seed`] | Three-word seed state, twist and Fibonacci-style shuffle |
//! | [`names`] | Syllable-pair table lookup for system and adjective names |
//! | [`planet`] | Bit-exact system generation (position, economy, government, ...) |
//! | [`galaxy`] | The 256 systems of one galaxy, distances and name lookup |
//! | [`goatsoup`] | Recursive phrase-table expansion into system descriptions |
//! | [`commodities`] | The 17 trade goods and their pricing parameters |
//! | [`market`] | Local prices and stock from economy and fluctuation |
//! | [`randomizer`] | Trade randomizer (LCC or SAS) implementing `RngCore` |
//! | [`upgrades`] | Ship equipment catalog |
//! | [`ship`] | Cash, fuel, hold, equipment and criminal record |
//! | [`report`] | Display-ready info query results |
//! | [`error`] | Action failures |
//! | [`config`] | Starting conditions and their validation |
//! | [`order`] | Parsing of `<good> [amount]` trade orders |
//! | [`game`] | The game state machine: actions and info queries |

pub mod commodities;
pub mod config;
pub mod error;
pub mod galaxy;
pub mod game;
pub mod goatsoup;
pub mod market;
pub mod names;
pub mod order;
pub mod planet;
pub mod randomizer;
pub mod report;
pub mod seed;
pub mod ship;
pub mod upgrades;

pub use error::GameError;
pub use game::Game;
