//! Integration tests for whole trading sessions.
//!
//! Exercises: Galaxy → System → Market → Game actions → Reports
//!
//! All tests are pure logic, with chance events drawn from fixed or seeded
//! generators.

use rand::rngs::mock::StepRng;
use rand::RngCore;

use telite_logic::commodities::{find_commodity, COMMODITIES};
use telite_logic::config::GameConfig;
use telite_logic::galaxy::{distance, Galaxy, GALAXY_COUNT, SYSTEM_COUNT};
use telite_logic::game::Game;
use telite_logic::goatsoup::goatsoup;
use telite_logic::market::{Market, MAX_QUANTITY};
use telite_logic::order::parse_order;
use telite_logic::randomizer::{Algorithm, TradeRng};
use telite_logic::upgrades::UpgradeKind;
use telite_logic::GameError;

// ── Helpers ────────────────────────────────────────────────────────────

fn fixed_game(value: u64) -> Game<StepRng> {
    Game::with_config(GameConfig::default(), StepRng::new(value, 0))
}

/// Play `steps` pseudo-random actions, checking ship invariants after each.
fn random_walk(game: &mut Game<TradeRng>, chooser: &mut TradeRng, steps: usize) {
    for _ in 0..steps {
        let pick = chooser.next_u32();
        let good = COMMODITIES[(pick >> 8) as usize % COMMODITIES.len()].name;
        let amount = ((pick >> 16) % 12) as i64 + 1;
        let _ = match pick % 9 {
            0 => {
                let local = game.info_local_systems().unwrap();
                let keys = local.keys();
                if keys.is_empty() {
                    continue;
                }
                let target = keys[(pick >> 4) as usize % keys.len()].to_string();
                game.jump(&target)
            }
            1 | 2 => game.buy(good, amount),
            3 | 4 => game.sell(good, amount),
            5 => game.buy_fuel(),
            6 => game.dump(good, 1),
            7 => game.install_upgrade("large"),
            _ => game.use_equipment("fuel"),
        };

        let ship = game.ship();
        assert!(ship.cargo_size() <= ship.hold_size());
        assert!(ship.fuel <= ship.max_fuel);
        assert!(ship.cash >= 0.0);
        for good in game.market().goods() {
            assert!(good.quantity <= MAX_QUANTITY);
        }
    }
}

// ── Galaxy generation ──────────────────────────────────────────────────

#[test]
fn galaxies_repeat_every_eight() {
    for n in 1..=GALAXY_COUNT {
        let a = Galaxy::new(n);
        let b = Galaxy::new(n + GALAXY_COUNT);
        assert_eq!(a.systems(), b.systems(), "galaxy {}", n);
        assert_eq!(a.number(), b.number());
    }
}

#[test]
fn every_galaxy_is_well_formed() {
    for n in 1..=GALAXY_COUNT {
        let galaxy = Galaxy::new(n);
        assert_eq!(galaxy.systems().len(), SYSTEM_COUNT);
        for (i, system) in galaxy.systems().iter().enumerate() {
            assert_eq!(system.index, i);
            assert!(system.economy < 8);
            assert!(system.government < 8);
            assert!(system.tech_level < 16);
            assert!((1..=75).contains(&system.population));
            assert!(!system.name.is_empty());
            assert!(system.name.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }
}

#[test]
fn distance_is_symmetric_and_zero_on_self() {
    let galaxy = Galaxy::default();
    let systems = galaxy.systems();
    for a in systems.iter().step_by(17) {
        assert_eq!(distance(a, a), 0);
        for b in systems.iter().step_by(23) {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }
}

#[test]
fn descriptions_are_fully_expanded() {
    for n in 1..=GALAXY_COUNT {
        for system in Galaxy::new(n).systems() {
            let text = goatsoup(system);
            assert!(!text.is_empty());
            assert!(
                text.chars().all(|c| (c as u32) < 0x80 && !c.is_control()),
                "{}: {:?}",
                system.name,
                text
            );
        }
    }
}

// ── Markets ────────────────────────────────────────────────────────────

#[test]
fn markets_stay_in_range_for_every_fluctuation() {
    let galaxy = Galaxy::default();
    for system in galaxy.systems().iter().step_by(5) {
        for fluctuation in [i8::MIN, -1, 0, 1, 77, i8::MAX] {
            let market = Market::new(system, fluctuation);
            assert_eq!(market.goods().len(), COMMODITIES.len());
            for good in market.goods() {
                assert!(good.price >= 0.0);
                let steps = good.price / 0.4;
                assert!((steps - steps.round()).abs() < 1e-6, "{}", good.price);
                assert!(good.quantity <= MAX_QUANTITY);
            }
            let alien = find_commodity("alien").unwrap();
            assert_eq!(market.good(alien).quantity, 0);
        }
    }
}

#[test]
fn round_trip_never_makes_money() {
    let mut game = fixed_game(0);
    game.ship_mut().cash = 10_000.0;
    for commodity in COMMODITIES.iter().filter(|c| c.legal) {
        let before = game.ship().cash;
        if game.buy(commodity.name, 3).is_err() {
            continue;
        }
        let held = game.ship().cargo_of(commodity) as i64;
        game.sell(commodity.name, held).unwrap();
        assert!(game.ship().cash <= before, "{}", commodity.name);
    }
}

// ── Actions ────────────────────────────────────────────────────────────

#[test]
fn failed_jump_changes_nothing() {
    let mut game = fixed_game(0);
    let ship = game.ship().clone();
    let market = game.market().clone();

    assert!(matches!(game.jump("lave"), Err(GameError::BadJump(_))));
    assert!(matches!(game.jump("nowhere"), Err(GameError::NotFound { .. })));
    game.ship_mut().fuel = 0;
    assert!(matches!(
        game.jump("diso"),
        Err(GameError::InsufficientFuel { .. })
    ));
    game.ship_mut().fuel = ship.fuel;

    assert_eq!(game.ship(), &ship);
    assert_eq!(game.market(), &market);
}

#[test]
fn purchase_clamped_to_what_cash_covers() {
    let mut game = fixed_game(0);
    let food = find_commodity("food").unwrap();
    game.market_mut().good_mut(food).price = 5.0;
    game.market_mut().good_mut(food).quantity = 30;
    game.ship_mut().cash = 20.0;

    game.buy("food", 10).unwrap();
    assert_eq!(game.ship().cargo_of(food), 4);
    assert_eq!(game.ship().cash, 0.0);
}

#[test]
fn dumping_missing_cargo_fails() {
    let mut game = fixed_game(0);
    let before = game.ship().clone();
    assert!(matches!(
        game.dump("alloys", 5),
        Err(GameError::InsufficientCargo(_))
    ));
    assert_eq!(game.ship(), &before);
}

#[test]
fn upgrade_beyond_tech_level_fails() {
    let mut game = fixed_game(0);
    game.ship_mut().cash = 100_000.0;
    let err = game.install_upgrade("galactic").unwrap_err();
    assert!(matches!(err, GameError::TechLevelTooLow { .. }));
    assert_eq!(game.ship().cash, 100_000.0);
    assert!(!game.ship().has(UpgradeKind::GalacticHyperdrive));
}

#[test]
fn typed_orders_drive_trades() {
    let mut game = fixed_game(0);
    let order = parse_order("Food 3").unwrap();
    game.buy(&order.good, order.amount).unwrap();
    assert_eq!(game.ship().cargo[0], 3);

    let order = parse_order("food").unwrap();
    game.sell(&order.good, order.amount).unwrap();
    assert_eq!(game.ship().cargo[0], 0);

    assert!(parse_order("food -2").is_err());
}

#[test]
fn hyperjump_cycles_through_all_galaxies() {
    let mut game = fixed_game(0);
    for _ in 0..GALAXY_COUNT {
        game.ship_mut().install(UpgradeKind::GalacticHyperdrive);
    }
    let mut seen = Vec::new();
    for _ in 0..GALAXY_COUNT {
        game.hyperjump().unwrap();
        seen.push(game.galaxy().number());
    }
    assert_eq!(seen, [2, 3, 4, 5, 6, 7, 8, 1]);
    assert_eq!(game.galaxy().systems(), Galaxy::default().systems());
}

// ── Sessions ───────────────────────────────────────────────────────────

#[test]
fn random_sessions_keep_ship_invariants() {
    for algorithm in [Algorithm::Lcc, Algorithm::Sas] {
        let config = GameConfig {
            cash: 2_000.0,
            randomizer: algorithm,
            ..GameConfig::default()
        };
        let mut game = Game::from_config(config);
        game.ship_mut().install(UpgradeKind::FuelScoops);
        let mut chooser = TradeRng::new(Algorithm::Lcc);
        random_walk(&mut game, &mut chooser, 2_000);
    }
}

#[test]
fn sessions_are_deterministic() {
    let play = || {
        let mut game = Game::new();
        let mut chooser = TradeRng::new(Algorithm::Lcc);
        random_walk(&mut game, &mut chooser, 500);
        (game.ship().clone(), game.market().clone())
    };
    assert_eq!(play(), play());
}

#[test]
fn reports_render_for_every_system() {
    let mut game = fixed_game(0);
    for index in 0..SYSTEM_COUNT {
        game.ship_mut().system = index;
        let name = game.current_system().name.clone();
        let sheet = game.info_selected_system(&name).unwrap();
        assert_eq!(sheet.heading, format!("System: {}", name));
        assert!(game.info_local_systems().is_ok());
        assert!(game.info_galaxy(1).is_ok());
    }
}
