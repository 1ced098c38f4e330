//! The trading game: ship, galaxy and local market behind player actions.
//!
//! Actions return [`ActionResult`], info queries return [`ReportResult`].
//! Every action runs all of its checks before the first write, so a failed
//! action leaves the game exactly as it was.
//!
//! ```
//! use telite_logic::game::Game;
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_system().name, "Lave");
//! assert!(game.jump("lave").is_err());
//! assert!(game.jump("diso").is_ok());
//! assert_eq!(game.ship().fuel, 34);
//! ```

use rand::RngCore;

use crate::commodities::{find_commodity, Commodity, COMMODITIES, MINERALS};
use crate::config::{validate_config, GameConfig};
use crate::error::{ActionResult, GameError};
use crate::galaxy::{distance, Galaxy, SYSTEM_COUNT};
use crate::goatsoup::goatsoup;
use crate::market::{Market, MAX_QUANTITY};
use crate::planet::System;
use crate::randomizer::{volatility, TradeRng};
use crate::report::{Report, ReportResult};
use crate::ship::Ship;
use crate::upgrades::{find_upgrade, UpgradeKind, UPGRADES};

/// Fuel burned by one mining run.
pub const MINING_FUEL_COST: u32 = 30;

/// Slack for float division when working out how many units cash covers.
const CASH_EPSILON: f64 = 1e-9;

/// Glyphs of the galaxy map, in increasing priority.
const MAP_GLYPHS: [char; 4] = [' ', '.', '*', '@'];

pub struct Game<R = TradeRng> {
    ship: Ship,
    galaxy: Galaxy,
    market: Market,
    fuel_cost: f64,
    rng: R,
}

impl Game<TradeRng> {
    /// A fresh game: galaxy one, docked at Lave, default ship.
    pub fn new() -> Self {
        Self::from_config(GameConfig::default())
    }

    /// A game using the trade randomizer algorithm named in `config`.
    pub fn from_config(config: GameConfig) -> Self {
        let rng = TradeRng::new(config.randomizer);
        Self::with_config(config, rng)
    }
}

impl Default for Game<TradeRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Game<R> {
    /// A game drawing its chance events from `rng`.
    pub fn with_config(config: GameConfig, rng: R) -> Self {
        for error in validate_config(&config) {
            log::warn!("Game config: {}", error);
        }
        let galaxy = Galaxy::new(config.galaxy);
        let mut ship = Ship::from_config(&config);
        ship.system = ship.system.min(SYSTEM_COUNT - 1);
        // The opening market is unperturbed.
        let market = Market::new(&galaxy.systems()[ship.system], 0);
        Self {
            ship,
            galaxy,
            market,
            fuel_cost: config.fuel_cost,
            rng,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Direct access to the ship, for setting up scenarios.
    #[cfg(any(test, feature = "test-support"))]
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Direct access to the local market, for setting up scenarios.
    #[cfg(any(test, feature = "test-support"))]
    pub fn market_mut(&mut self) -> &mut Market {
        &mut self.market
    }

    pub fn current_system(&self) -> &System {
        &self.galaxy.systems()[self.ship.system]
    }

    /// Credits per fuel unit.
    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    // ── Travel ─────────────────────────────────────────────────────────

    /// Jump to the nearest system whose name starts with `name`.
    pub fn jump(&mut self, name: &str) -> ActionResult {
        self.travel(name, true)
    }

    /// Jump without burning fuel.
    pub fn sneak(&mut self, name: &str) -> ActionResult {
        self.travel(name, false)
    }

    fn travel(&mut self, name: &str, burn_fuel: bool) -> ActionResult {
        let here = self.current_system();
        let (dest, d) = self
            .galaxy
            .closest_system_like(here, name)
            .ok_or_else(|| GameError::not_found("System", name))?;
        if dest.index == here.index {
            return Err(GameError::BadJump(here.name.clone()));
        }
        if burn_fuel && d > self.ship.fuel {
            return Err(GameError::InsufficientFuel {
                needed: d,
                available: self.ship.fuel,
            });
        }
        let (index, dest_name) = (dest.index, dest.name.clone());

        if burn_fuel {
            self.ship.fuel -= d;
        }
        self.ship.system = index;
        self.regenerate_market();
        log::info!("Jumped to {} ({} fuel units)", dest_name, d);
        Ok(format!(
            "Jumped to {} ({:.1} LY)",
            dest_name,
            d as f64 / 10.0
        ))
    }

    /// Galactic hyperjump: consumes a hyperdrive, clears the criminal
    /// record and moves to the same system index in the next galaxy.
    pub fn hyperjump(&mut self) -> ActionResult {
        let hyperdrive = UpgradeKind::GalacticHyperdrive;
        if !self.ship.has(hyperdrive) {
            return Err(GameError::NotInstalled(hyperdrive.name().to_string()));
        }
        self.ship.consume(hyperdrive);
        self.ship.pardon();
        self.galaxy.next_galaxy();
        self.regenerate_market();
        let here = self.current_system();
        log::info!("Hyperjump to galaxy {}", self.galaxy.number());
        Ok(format!(
            "You appear in galaxy {} at {}",
            self.galaxy.number(),
            here.name
        ))
    }

    fn regenerate_market(&mut self) {
        let fluctuation = volatility(self.draw());
        self.market = Market::new(&self.galaxy.systems()[self.ship.system], fluctuation);
    }

    fn draw(&mut self) -> u32 {
        let value = self.rng.next_u32();
        log::debug!("Trade randomizer drew {}", value);
        value
    }

    // ── Trading ────────────────────────────────────────────────────────

    /// Buy up to `amount` units, clamped by stock, cash and hold space.
    pub fn buy(&mut self, name: &str, amount: i64) -> ActionResult {
        let commodity = resolve_good(name)?;
        let mut amount = check_amount(amount)?;
        self.check_trade_allowed(commodity)?;

        let good = self.market.good(commodity);
        if good.quantity == 0 {
            return Err(GameError::InsufficientStock(commodity.name.to_string()));
        }
        amount = amount.min(good.quantity);

        let price = good.price;
        if price > 0.0 {
            let affordable = (self.ship.cash / price + CASH_EPSILON).floor() as u32;
            if affordable == 0 {
                return Err(GameError::Unaffordable(commodity.name.to_string()));
            }
            amount = amount.min(affordable);
        }

        let space = commodity.unit.hold_space();
        if space > 0 {
            let room = self.ship.hold_remaining() / space;
            if room == 0 {
                return Err(GameError::InsufficientHoldSpace(commodity.name.to_string()));
            }
            amount = amount.min(room);
        }

        let cost = amount as f64 * price;
        self.ship.cash = (self.ship.cash - cost).max(0.0);
        self.ship.cargo[commodity.id] += amount;
        self.market.good_mut(commodity).quantity -= amount;
        Ok(format!(
            "Bought {}{} of {} for {:.1} cr",
            amount,
            commodity.unit.symbol(),
            commodity.name,
            cost
        ))
    }

    /// Sell up to `amount` units from the hold at the selling price.
    ///
    /// Selling contraband risks detection by the local police, who then
    /// refuse all legal trade at this system.
    pub fn sell(&mut self, name: &str, amount: i64) -> ActionResult {
        let commodity = resolve_good(name)?;
        let amount = check_amount(amount)?;
        self.check_trade_allowed(commodity)?;

        let held = self.ship.cargo_of(commodity);
        if held == 0 {
            return Err(GameError::InsufficientCargo(commodity.name.to_string()));
        }
        let amount = amount.min(held);
        let revenue = amount as f64 * self.market.selling_price(self.market.good(commodity).price);
        let caught = !commodity.legal && self.smuggling_detected();

        self.ship.cash += revenue;
        self.ship.cargo[commodity.id] -= amount;
        let good = self.market.good_mut(commodity);
        good.quantity = (good.quantity + amount).min(MAX_QUANTITY);

        let mut message = format!(
            "Sold {}{} of {} for {:.1} cr",
            amount,
            commodity.unit.symbol(),
            commodity.name,
            revenue
        );
        if caught {
            let here = self.ship.system;
            self.ship.banned.insert(here);
            self.ship.legal_status = self.ship.legal_status.escalate();
            let system = &self.current_system().name;
            log::info!(
                "Smuggling detected at {}, status now {}",
                system,
                self.ship.legal_status.name()
            );
            message.push_str(&format!(
                ". The police noticed: banned from legal trade at {}, status {}",
                system,
                self.ship.legal_status.name()
            ));
        }
        Ok(message)
    }

    fn smuggling_detected(&mut self) -> bool {
        let government = self.current_system().government as u32;
        (self.draw() & 0x0F) < government
    }

    fn trade_allowed(&self, commodity: &Commodity) -> bool {
        !commodity.legal || !self.ship.is_banned(self.ship.system)
    }

    fn check_trade_allowed(&self, commodity: &Commodity) -> Result<(), GameError> {
        if self.trade_allowed(commodity) {
            Ok(())
        } else {
            Err(GameError::BannedFromTrading(
                self.current_system().name.clone(),
            ))
        }
    }

    /// Throw cargo out of the airlock.
    pub fn dump(&mut self, name: &str, amount: i64) -> ActionResult {
        let commodity = resolve_good(name)?;
        let amount = check_amount(amount)?;
        let held = self.ship.cargo_of(commodity);
        if held == 0 {
            return Err(GameError::InsufficientCargo(commodity.name.to_string()));
        }
        let amount = amount.min(held);
        self.ship.cargo[commodity.id] -= amount;
        Ok(format!(
            "Dumped {}{} of {}",
            amount,
            commodity.unit.symbol(),
            commodity.name
        ))
    }

    // ── Fuel & equipment ───────────────────────────────────────────────

    /// Fill the tank, or as much of it as cash allows.
    pub fn buy_fuel(&mut self) -> ActionResult {
        self.purchase_fuel(None)
    }

    /// Buy up to `units` tenths of a light year of fuel.
    pub fn buy_fuel_units(&mut self, units: u32) -> ActionResult {
        self.purchase_fuel(Some(units))
    }

    fn purchase_fuel(&mut self, wanted: Option<u32>) -> ActionResult {
        if self.ship.is_banned(self.ship.system) {
            return Err(GameError::BannedFromTrading(
                self.current_system().name.clone(),
            ));
        }
        let room = self.ship.fuel_room();
        if room == 0 {
            return Err(GameError::TankFull);
        }
        let mut units = match wanted {
            Some(0) => return Err(GameError::InvalidQuantity("0 fuel units".to_string())),
            Some(units) => units.min(room),
            None => room,
        };
        if self.ship.cash <= 0.0 {
            return Err(GameError::Unaffordable("fuel".to_string()));
        }
        let affordable = (self.ship.cash / self.fuel_cost + CASH_EPSILON).floor() as u32;
        if affordable == 0 {
            return Err(GameError::Unaffordable("fuel".to_string()));
        }
        units = units.min(affordable);

        let cost = units as f64 * self.fuel_cost;
        self.ship.fuel += units;
        self.ship.cash = (self.ship.cash - cost).max(0.0);
        Ok(format!(
            "Bought {:.1} LY of fuel for {:.1} cr",
            units as f64 / 10.0,
            cost
        ))
    }

    /// Buy and fit an upgrade sold at this system.
    pub fn install_upgrade(&mut self, name: &str) -> ActionResult {
        let upgrade = find_upgrade(name).ok_or_else(|| GameError::not_found("Upgrade", name))?;
        if upgrade.unique && self.ship.has(upgrade.kind) {
            return Err(GameError::AlreadyInstalled(upgrade.name.to_string()));
        }
        let tech = self.current_system().tech_level_display();
        if tech < upgrade.min_tech {
            return Err(GameError::TechLevelTooLow {
                name: upgrade.name.to_string(),
                required: upgrade.min_tech,
                available: tech,
            });
        }
        if self.ship.cash < upgrade.price {
            return Err(GameError::Unaffordable(upgrade.name.to_string()));
        }

        self.ship.cash -= upgrade.price;
        self.ship.install(upgrade.kind);
        log::info!("Installed {} at {}", upgrade.name, self.current_system().name);
        Ok(format!(
            "{} installed for {:.1} cr",
            upgrade.name, upgrade.price
        ))
    }

    /// Operate an installed upgrade.
    pub fn use_equipment(&mut self, name: &str) -> ActionResult {
        let upgrade = find_upgrade(name).ok_or_else(|| GameError::not_found("Upgrade", name))?;
        if !self.ship.has(upgrade.kind) {
            return Err(GameError::NotInstalled(upgrade.name.to_string()));
        }
        match upgrade.kind {
            UpgradeKind::MiningLasers => self.mining(),
            UpgradeKind::FuelScoops => self.refuelling(),
            UpgradeKind::GalacticHyperdrive => self.hyperjump(),
            UpgradeKind::LargeCargoBay => Err(GameError::NotUsable(upgrade.name.to_string())),
        }
    }

    /// Mine the local asteroid belt for minerals.
    ///
    /// Yield is `(tech + economy) mod 4` plus a random 0–3, clamped to free
    /// hold space. The fuel is spent whatever the yield.
    pub fn mining(&mut self) -> ActionResult {
        let lasers = UpgradeKind::MiningLasers;
        if !self.ship.has(lasers) {
            return Err(GameError::NotInstalled(lasers.name().to_string()));
        }
        if self.ship.fuel < MINING_FUEL_COST {
            return Err(GameError::InsufficientFuel {
                needed: MINING_FUEL_COST,
                available: self.ship.fuel,
            });
        }
        let minerals = &COMMODITIES[MINERALS];
        let room = self.ship.hold_remaining() / minerals.unit.hold_space();
        if room == 0 {
            return Err(GameError::InsufficientHoldSpace(minerals.name.to_string()));
        }

        let here = self.current_system();
        let base = (here.tech_level as u32 + here.economy as u32) % 4;
        let mined = (base + (self.draw() & 3)).min(room);

        self.ship.fuel -= MINING_FUEL_COST;
        self.ship.cargo[MINERALS] += mined;
        Ok(format!(
            "Mined {}{} of {}",
            mined,
            minerals.unit.symbol(),
            minerals.name
        ))
    }

    /// Skim fuel from the local star.
    pub fn refuelling(&mut self) -> ActionResult {
        let scoops = UpgradeKind::FuelScoops;
        if !self.ship.has(scoops) {
            return Err(GameError::NotInstalled(scoops.name().to_string()));
        }
        let room = self.ship.fuel_room();
        if room == 0 {
            return Err(GameError::TankFull);
        }
        let gained = ((self.draw() & 7) + 1).min(room);
        self.ship.fuel += gained;
        Ok(format!("Scooped {:.1} LY of fuel", gained as f64 / 10.0))
    }

    // ── Commander ──────────────────────────────────────────────────────

    pub fn change_name(&mut self, name: &str) -> ActionResult {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        self.ship.name = name.to_string();
        Ok(format!("Welcome aboard, commander {}", name))
    }

    /// Change the base hold size, if the cargo still fits.
    pub fn set_hold(&mut self, size: u32) -> ActionResult {
        let total = size.checked_add(self.ship.hold_bonus()).ok_or_else(|| {
            GameError::InvalidQuantity(format!("hold size {} is too large", size))
        })?;
        if self.ship.cargo_size() > total {
            return Err(GameError::HoldTooFull(size));
        }
        self.ship.hold_base = size;
        Ok(format!("Hold size is now {}t", self.ship.hold_size()))
    }

    // ── Info queries ───────────────────────────────────────────────────

    /// Systems within tank range, nearest first; `*` marks those reachable
    /// with the fuel on board.
    pub fn info_local_systems(&self) -> ReportResult {
        let here = self.current_system();
        let mut report = Report::new(format!(
            "Galaxy {} - systems within {:.1} LY of {}",
            self.galaxy.number(),
            self.ship.max_fuel as f64 / 10.0,
            here.name
        ));
        for (system, d) in self.galaxy.systems_within(here, self.ship.max_fuel) {
            if system.index == here.index {
                continue;
            }
            let mark = if d <= self.ship.fuel { '*' } else { '-' };
            report.item(
                system.name.clone(),
                format!(
                    "{} {:>4.1} {}",
                    mark,
                    d as f64 / 10.0,
                    system.short_description()
                ),
            );
        }
        if !report.has_items() {
            report.text("No systems in range");
        }
        Ok(report)
    }

    pub fn info_commander(&self) -> ReportResult {
        let ship = &self.ship;
        let mut report = Report::new(format!("Commander {}", ship.name));
        report
            .text(format!("Galaxy: {}", self.galaxy.number()))
            .text(format!("System: {}", self.current_system().name))
            .text(format!("Cash: {:.1} cr", ship.cash))
            .text(format!("Fuel: {:.1} LY", ship.fuel as f64 / 10.0))
            .text(format!("Hold: {}/{}t", ship.cargo_size(), ship.hold_size()))
            .text(format!("Legal status: {}", ship.legal_status.name()));
        if !ship.banned.is_empty() {
            let names: Vec<&str> = ship
                .banned
                .iter()
                .filter_map(|&i| self.galaxy.system(i))
                .map(|s| s.name.as_str())
                .collect();
            report.text(format!("Banned at: {}", names.join(", ")));
        }

        if ship.upgrades.is_empty() {
            report.text("Equipment: none");
            return Ok(report);
        }
        report.text("Equipment:");
        for (&kind, &count) in &ship.upgrades {
            let label = if count > 1 {
                format!("{} x{}", kind.name(), count)
            } else {
                kind.name().to_string()
            };
            if kind.is_usable() {
                report.item(kind.name(), format!("Use {}", label));
            } else {
                report.text(label);
            }
        }
        Ok(report)
    }

    /// Fuel and upgrades on sale; upgrades beyond the local tech level are
    /// listed but not selectable.
    pub fn info_equip(&self) -> ReportResult {
        let here = self.current_system();
        let tech = here.tech_level_display();
        let mut report = Report::new(format!(
            "Equipment at {} (tech level {})",
            here.name, tech
        ));
        report.item(
            "fuel",
            format!(
                "{:<20} {:>7.1} cr/LY, {:.1} LY to fill",
                "Fuel",
                self.fuel_cost * 10.0,
                self.ship.fuel_room() as f64 / 10.0
            ),
        );
        for upgrade in UPGRADES.iter() {
            let installed = if self.ship.has(upgrade.kind) {
                " (installed)"
            } else {
                ""
            };
            if tech >= upgrade.min_tech {
                report.item(
                    upgrade.name,
                    format!("{:<20} {:>7.1} cr{}", upgrade.name, upgrade.price, installed),
                );
            } else {
                report.text(format!(
                    "{:<20} needs tech level {}{}",
                    upgrade.name, upgrade.min_tech, installed
                ));
            }
        }
        Ok(report)
    }

    /// Full data sheet of the nearest system matching `name`; an empty name
    /// describes the current system.
    pub fn info_selected_system(&self, name: &str) -> ReportResult {
        let here = self.current_system();
        let (system, d) = self
            .galaxy
            .closest_system_like(here, name)
            .ok_or_else(|| GameError::not_found("System", name))?;
        let mut report = Report::new(format!("System: {}", system.name));
        report
            .text(format!("Position: {}:{}", system.x, system.y))
            .text(format!("Distance: {:.1} LY", d as f64 / 10.0))
            .text(format!("Economy: {}", system.economy_name()))
            .text(format!("Government: {}", system.government_name()))
            .text(format!("Tech level: {}", system.tech_level_display()))
            .text(format!("Turnover: {} MCR", system.productivity))
            .text(format!("Radius: {} km", system.radius))
            .text(format!(
                "Population: {:.1} billion",
                system.population as f64 / 10.0
            ))
            .text(format!("\"{}\"", goatsoup(system)));
        Ok(report)
    }

    /// Character map of the galaxy: `.` a system, `*` reachable with the
    /// fuel on board, `@` the current system. `scale` (1–4) multiplies the
    /// base 32×16 grid.
    pub fn info_galaxy(&self, scale: u32) -> ReportResult {
        let scale = scale.clamp(1, 4) as usize;
        let (cols, rows) = (32 * scale, 16 * scale);
        let mut grid = vec![vec![0usize; cols]; rows];
        let here = self.current_system();
        for system in self.galaxy.systems() {
            let priority = if system.index == here.index {
                3
            } else if distance(here, system) <= self.ship.fuel {
                2
            } else {
                1
            };
            let cell = &mut grid[system.y as usize * rows / 256][system.x as usize * cols / 256];
            *cell = (*cell).max(priority);
        }

        let mut report = Report::new(format!(
            "Galaxy {} (@ {}, * within {:.1} LY)",
            self.galaxy.number(),
            here.name,
            self.ship.fuel as f64 / 10.0
        ));
        for line in grid {
            let text: String = line.into_iter().map(|p| MAP_GLYPHS[p]).collect();
            report.text(text.trim_end());
        }
        Ok(report)
    }

    pub fn info_cargo(&self) -> ReportResult {
        let mut report = Report::new(format!(
            "Cargo {}/{}t",
            self.ship.cargo_size(),
            self.ship.hold_size()
        ));
        for commodity in COMMODITIES.iter() {
            let held = self.ship.cargo_of(commodity);
            if held > 0 {
                report.item(
                    commodity.name,
                    format!("{:<12} {:>4}{}", commodity.name, held, commodity.unit.symbol()),
                );
            }
        }
        if !report.has_items() {
            report.text("Hold is empty");
        }
        Ok(report)
    }

    /// Goods the player may buy here right now.
    pub fn info_buy(&self) -> ReportResult {
        let mut report = Report::new(format!(
            "Buy at {} - cash {:.1} cr, {}t free",
            self.current_system().name,
            self.ship.cash,
            self.ship.hold_remaining()
        ));
        for good in self.market.goods() {
            if good.quantity > 0 && self.trade_allowed(good.commodity) {
                report.item(
                    good.commodity.name,
                    format!(
                        "{:<12} {:>6.1} cr {:>3}{}",
                        good.commodity.name,
                        good.price,
                        good.quantity,
                        good.commodity.unit.symbol()
                    ),
                );
            }
        }
        if !report.has_items() {
            report.text("Nothing for sale");
        }
        Ok(report)
    }

    /// Cargo the player may sell here, at selling prices.
    pub fn info_sell(&self) -> ReportResult {
        let mut report = Report::new(format!(
            "Sell at {} - cash {:.1} cr",
            self.current_system().name,
            self.ship.cash
        ));
        for good in self.market.goods() {
            let held = self.ship.cargo_of(good.commodity);
            if held > 0 && self.trade_allowed(good.commodity) {
                report.item(
                    good.commodity.name,
                    format!(
                        "{:<12} {:>6.1} cr {:>4}{} held",
                        good.commodity.name,
                        self.market.selling_price(good.price),
                        held,
                        good.commodity.unit.symbol()
                    ),
                );
            }
        }
        if !report.has_items() {
            report.text("Nothing to sell");
        }
        Ok(report)
    }

    /// The whole local market alongside the hold.
    pub fn info_trade(&self) -> ReportResult {
        let mut report = Report::new(format!("Market at {}", self.current_system().name));
        for good in self.market.goods() {
            report.text(format!(
                "{:<12} {:>6.1} cr {:>3}{:<2} Hold: {}",
                good.commodity.name,
                good.price,
                good.quantity,
                good.commodity.unit.symbol(),
                self.ship.cargo_of(good.commodity)
            ));
        }
        report.text(format!(
            "Fuel: {:.1} LY   Holdspace: {}t",
            self.ship.fuel as f64 / 10.0,
            self.ship.hold_remaining()
        ));
        Ok(report)
    }
}

fn resolve_good(name: &str) -> Result<&'static Commodity, GameError> {
    find_commodity(name).ok_or_else(|| GameError::not_found("Trade good", name))
}

fn check_amount(amount: i64) -> Result<u32, GameError> {
    if amount <= 0 {
        return Err(GameError::InvalidQuantity(format!(
            "{} is not positive",
            amount
        )));
    }
    Ok(amount.min(u32::MAX as i64) as u32)
}
