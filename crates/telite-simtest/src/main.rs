//! Telite Headless Validation Harness
//!
//! Sweeps every galaxy and replays scripted trading sessions against the
//! pure game logic. Runs entirely in-process, no terminal UI.
//!
//! Usage:
//!   cargo run -p telite-simtest
//!   cargo run -p telite-simtest -- --verbose
//!   cargo run -p telite-simtest -- --script scenarios/smuggler.json --json

use serde::Deserialize;
use telite_logic::commodities::find_commodity;
use telite_logic::config::{validate_config, GameConfig};
use telite_logic::galaxy::{distance, Galaxy, GALAXY_COUNT, SYSTEM_COUNT};
use telite_logic::game::Game;
use telite_logic::goatsoup::goatsoup;
use telite_logic::market::{Market, MAX_QUANTITY};
use telite_logic::order::parse_order;
use telite_logic::randomizer::{Algorithm, TradeRng};
use telite_logic::report::Report;
use telite_logic::GameError;

// ── Built-in scenarios ──────────────────────────────────────────────────
const ROUND_TRIP_JSON: &str = include_str!("../scenarios/lave_round_trip.json");
const SMUGGLER_JSON: &str = include_str!("../scenarios/smuggler.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Action {
    Jump,
    Sneak,
    Hyperjump,
    Buy,
    Sell,
    Dump,
    BuyFuel,
    Install,
    Use,
    ChangeName,
    SetHold,
    InfoLocal,
    InfoCommander,
    InfoEquip,
    InfoSystem,
    InfoGalaxy,
    InfoCargo,
    InfoBuy,
    InfoSell,
    InfoTrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Expect {
    Ok,
    Err,
}

/// One scripted step. Trade steps without an amount parse `arg` as a typed
/// order ("food 10").
#[derive(Debug, Deserialize)]
struct Step {
    action: Action,
    #[serde(default)]
    arg: String,
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    expect: Option<Expect>,
}

enum StepOutput {
    Message(String),
    Report(Report),
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    script: Option<String>,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let script = args
        .iter()
        .position(|a| a == "--script")
        .and_then(|i| args.get(i + 1))
        .cloned();
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        json: args.iter().any(|a| a == "--json"),
        script,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let options = parse_args();
    println!("=== Telite Validation Harness ===\n");

    let mut results = Vec::new();

    if let Some(path) = &options.script {
        // Replay only the requested script
        results.extend(replay_file(path, &options));
    } else {
        // 1. Galaxy generation sweep
        results.extend(validate_galaxies(options.verbose));

        // 2. System descriptions
        results.extend(validate_descriptions(options.verbose));

        // 3. Markets
        results.extend(validate_markets(options.verbose));

        // 4. Trade randomizer
        results.extend(validate_randomizer(options.verbose));

        // 5. Configuration
        results.extend(validate_configuration(options.verbose));

        // 6. Scripted sessions
        results.extend(replay_script("round_trip", ROUND_TRIP_JSON, &options));
        results.extend(replay_script("smuggler", SMUGGLER_JSON, &options));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Galaxies ─────────────────────────────────────────────────────────

fn validate_galaxies(verbose: bool) -> Vec<TestResult> {
    println!("--- Galaxies ---");
    let mut results = Vec::new();

    let galaxy = Galaxy::default();
    let lave = &galaxy.systems()[7];
    results.push(TestResult {
        name: "galaxy_lave_known_answer".into(),
        passed: lave.name == "Lave"
            && (lave.x, lave.y) == (20, 173)
            && lave.economy == 5
            && lave.government == 3
            && lave.tech_level == 4
            && lave.population == 25
            && lave.productivity == 11200
            && lave.radius == 4116,
        detail: lave.short_description(),
    });

    let tibedied = &galaxy.systems()[0];
    results.push(TestResult {
        name: "galaxy_tibedied_known_answer".into(),
        passed: tibedied.name == "Tibedied" && (tibedied.x, tibedied.y) == (2, 90),
        detail: tibedied.short_description(),
    });

    let diso = distance(lave, &galaxy.systems()[147]);
    results.push(TestResult {
        name: "galaxy_lave_diso_distance".into(),
        passed: diso == 36,
        detail: format!("Lave → Diso = {} units", diso),
    });

    let firsts: Vec<String> = (1..=GALAXY_COUNT)
        .map(|n| Galaxy::new(n).systems()[0].name.clone())
        .collect();
    results.push(TestResult {
        name: "galaxy_first_systems".into(),
        passed: firsts[1] == "Ausis" && firsts[7] == "Anesbi",
        detail: firsts.join(", "),
    });

    for n in 1..=GALAXY_COUNT {
        let a = Galaxy::new(n);
        let b = Galaxy::new(n + GALAXY_COUNT);
        let well_formed = a.systems().len() == SYSTEM_COUNT
            && a.systems()
                .iter()
                .all(|s| !s.name.is_empty() && s.economy < 8 && s.government < 8);
        if verbose {
            println!(
                "  galaxy {}: {} systems, first {}",
                n,
                a.systems().len(),
                a.systems()[0].name
            );
        }
        results.push(TestResult {
            name: format!("galaxy_{}_wraps", n),
            passed: well_formed && a.systems() == b.systems(),
            detail: format!("galaxy {} equals galaxy {}", n, n + GALAXY_COUNT),
        });
    }

    results
}

// ── 2. Descriptions ─────────────────────────────────────────────────────

fn validate_descriptions(verbose: bool) -> Vec<TestResult> {
    println!("--- Descriptions ---");
    let mut results = Vec::new();
    let galaxy = Galaxy::default();

    let known = [
        (
            7,
            "The planet Lave is reasonably fabled for Lavian Disole juice and Lavian Xeen water.",
        ),
        (
            0,
            "Tibedied is reasonably notable for its funny mountains but ravaged by frequent earthquakes.",
        ),
        (147, "This planet is a dull world."),
    ];
    for (index, expected) in known {
        let system = &galaxy.systems()[index];
        let text = goatsoup(system);
        results.push(TestResult {
            name: format!("goatsoup_{}", system.name.to_lowercase()),
            passed: text == expected,
            detail: text,
        });
    }

    let mut unexpanded = Vec::new();
    for n in 1..=GALAXY_COUNT {
        for system in Galaxy::new(n).systems() {
            let text = goatsoup(system);
            if verbose && system.index == 0 {
                println!("  {}: {}", system.name, text);
            }
            if text.is_empty() || text.chars().any(|c| !c.is_ascii() || c.is_control()) {
                unexpanded.push(format!("{}/{}", n, system.name));
            }
        }
    }
    results.push(TestResult {
        name: "goatsoup_fully_expanded".into(),
        passed: unexpanded.is_empty(),
        detail: if unexpanded.is_empty() {
            "all 2048 descriptions are plain text".into()
        } else {
            format!("unexpanded: {}", unexpanded.join(", "))
        },
    });

    results
}

// ── 3. Markets ──────────────────────────────────────────────────────────

fn validate_markets(verbose: bool) -> Vec<TestResult> {
    println!("--- Markets ---");
    let mut results = Vec::new();
    let galaxy = Galaxy::default();
    let lave = Market::new(&galaxy.systems()[7], 0);

    let expected = [
        ("Food", 3.6, 16),
        ("Textiles", 6.0, 15),
        ("Radioactives", 20.0, 17),
        ("Liquor", 23.2, 20),
        ("Luxuries", 94.4, 14),
        ("Narcotics", 49.6, 55),
        ("Computers", 89.6, 0),
        ("Minerals", 10.8, 58),
        ("Alien Items", 51.2, 0),
    ];
    for (name, price, quantity) in expected {
        let good = find_commodity(name).map(|c| lave.good(c));
        let (passed, detail) = match good {
            Some(good) => (
                (good.price - price).abs() < 1e-9 && good.quantity == quantity,
                format!("{} {:.1} cr x{}", name, good.price, good.quantity),
            ),
            None => (false, format!("{} missing", name)),
        };
        results.push(TestResult {
            name: format!("market_lave_{}", name.to_lowercase().replace(' ', "_")),
            passed,
            detail,
        });
    }

    let mut out_of_range = 0;
    for n in 1..=GALAXY_COUNT {
        for system in Galaxy::new(n).systems() {
            for fluctuation in [i8::MIN, 0, 0x55, i8::MAX] {
                let market = Market::new(system, fluctuation);
                out_of_range += market
                    .goods()
                    .iter()
                    .filter(|g| g.price < 0.0 || g.quantity > MAX_QUANTITY)
                    .count();
            }
        }
    }
    if verbose {
        println!("  swept {} markets", GALAXY_COUNT as usize * SYSTEM_COUNT * 4);
    }
    results.push(TestResult {
        name: "market_sweep_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} goods out of range", out_of_range),
    });

    results
}

// ── 4. Trade randomizer ─────────────────────────────────────────────────

fn validate_randomizer(_verbose: bool) -> Vec<TestResult> {
    println!("--- Trade Randomizer ---");
    let mut results = Vec::new();

    for (algorithm, expected) in [
        (Algorithm::Sas, [45392568, 45388891, 45385214]),
        (Algorithm::Lcc, [7584, 19164, 25795]),
    ] {
        let mut rng = TradeRng::new(algorithm);
        let draws = [rng.value(), rng.value(), rng.value()];
        results.push(TestResult {
            name: format!("randomizer_{:?}", algorithm).to_lowercase(),
            passed: draws == expected,
            detail: format!("{:?}", draws),
        });
    }

    results
}

// ── 5. Configuration ────────────────────────────────────────────────────

fn validate_configuration(_verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = validate_config(&GameConfig::default());
    results.push(TestResult {
        name: "config_default_valid".into(),
        passed: errors.is_empty(),
        detail: format!("{} errors", errors.len()),
    });

    let bad = GameConfig::from_json(r#"{ "commander_name": "", "galaxy": 9, "fuel": 99 }"#);
    let (passed, detail) = match bad {
        Ok(config) => {
            let errors = validate_config(&config);
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            (errors.len() == 3, messages.join("; "))
        }
        Err(e) => (false, format!("JSON parse error: {}", e)),
    };
    results.push(TestResult {
        name: "config_reports_all_problems".into(),
        passed,
        detail,
    });

    results
}

// ── 6. Scripted sessions ────────────────────────────────────────────────

fn replay_file(path: &str, options: &Options) -> Vec<TestResult> {
    log::info!("Replaying script {}", path);
    match std::fs::read_to_string(path) {
        Ok(json) => replay_script(path, &json, options),
        Err(e) => vec![TestResult {
            name: "script_read".into(),
            passed: false,
            detail: format!("{}: {}", path, e),
        }],
    }
}

fn replay_script(name: &str, json: &str, options: &Options) -> Vec<TestResult> {
    println!("--- Script: {} ---", name);
    let mut results = Vec::new();

    let steps: Vec<Step> = match serde_json::from_str(json) {
        Ok(steps) => steps,
        Err(e) => {
            results.push(TestResult {
                name: format!("{}_parse", name),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let mut game = Game::new();
    for (i, step) in steps.iter().enumerate() {
        let outcome = run_step(&mut game, step);
        print_outcome(i, step, &outcome, options);

        if let Some(expect) = step.expect {
            let got = if outcome.is_ok() { Expect::Ok } else { Expect::Err };
            results.push(TestResult {
                name: format!("{}_step_{}_{:?}", name, i + 1, step.action).to_lowercase(),
                passed: got == expect,
                detail: match &outcome {
                    Ok(_) => "succeeded".into(),
                    Err(e) => e.to_string(),
                },
            });
        }

        let ship = game.ship();
        let sane = ship.cargo_size() <= ship.hold_size()
            && ship.fuel <= ship.max_fuel
            && ship.cash >= 0.0;
        if !sane {
            results.push(TestResult {
                name: format!("{}_step_{}_ship_state", name, i + 1),
                passed: false,
                detail: format!(
                    "hold {}/{}, fuel {}/{}, cash {:.1}",
                    ship.cargo_size(),
                    ship.hold_size(),
                    ship.fuel,
                    ship.max_fuel,
                    ship.cash
                ),
            });
        }
    }

    results.push(TestResult {
        name: format!("{}_completed", name),
        passed: true,
        detail: format!(
            "{} steps, ends at {} with {:.1} cr",
            steps.len(),
            game.current_system().name,
            game.ship().cash
        ),
    });
    results
}

/// The good and amount of a trade step.
fn trade_order(step: &Step) -> Result<(String, i64), GameError> {
    match step.amount {
        Some(amount) => Ok((step.arg.clone(), amount)),
        None => parse_order(&step.arg).map(|order| (order.good, order.amount)),
    }
}

fn run_step(game: &mut Game, step: &Step) -> Result<StepOutput, GameError> {
    let arg = step.arg.as_str();
    let count = step.amount.unwrap_or(0).max(0) as u32;
    let message = match step.action {
        Action::Jump => game.jump(arg),
        Action::Sneak => game.sneak(arg),
        Action::Hyperjump => game.hyperjump(),
        Action::Buy => {
            let (good, amount) = trade_order(step)?;
            game.buy(&good, amount)
        }
        Action::Sell => {
            let (good, amount) = trade_order(step)?;
            game.sell(&good, amount)
        }
        Action::Dump => {
            let (good, amount) = trade_order(step)?;
            game.dump(&good, amount)
        }
        Action::BuyFuel => match step.amount {
            Some(_) => game.buy_fuel_units(count),
            None => game.buy_fuel(),
        },
        Action::Install => game.install_upgrade(arg),
        Action::Use => game.use_equipment(arg),
        Action::ChangeName => game.change_name(arg),
        Action::SetHold => game.set_hold(count),
        Action::InfoLocal => return game.info_local_systems().map(StepOutput::Report),
        Action::InfoCommander => return game.info_commander().map(StepOutput::Report),
        Action::InfoEquip => return game.info_equip().map(StepOutput::Report),
        Action::InfoSystem => return game.info_selected_system(arg).map(StepOutput::Report),
        Action::InfoGalaxy => return game.info_galaxy(count).map(StepOutput::Report),
        Action::InfoCargo => return game.info_cargo().map(StepOutput::Report),
        Action::InfoBuy => return game.info_buy().map(StepOutput::Report),
        Action::InfoSell => return game.info_sell().map(StepOutput::Report),
        Action::InfoTrade => return game.info_trade().map(StepOutput::Report),
    };
    message.map(StepOutput::Message)
}

fn print_outcome(
    i: usize,
    step: &Step,
    outcome: &Result<StepOutput, GameError>,
    options: &Options,
) {
    match outcome {
        Ok(StepOutput::Message(message)) => {
            println!("  {:>2}. {:?} {} → {}", i + 1, step.action, step.arg, message)
        }
        Ok(StepOutput::Report(report)) if options.json => {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("  {:>2}. report not serializable: {}", i + 1, e),
            }
        }
        Ok(StepOutput::Report(report)) => {
            if options.verbose {
                print!("{}", report);
            } else {
                println!(
                    "  {:>2}. {} ({} rows)",
                    i + 1,
                    report.heading,
                    report.rows.len()
                );
            }
        }
        Err(e) => println!("  {:>2}. {:?} {} ✗ {}", i + 1, step.action, step.arg, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scripts_parse() {
        for json in [ROUND_TRIP_JSON, SMUGGLER_JSON] {
            let steps: Vec<Step> = serde_json::from_str(json).unwrap();
            assert!(!steps.is_empty());
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        let parsed: Result<Vec<Step>, _> =
            serde_json::from_str(r#"[{ "action": "teleport", "arg": "lave" }]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_trade_order_from_arg() {
        let step: Step = serde_json::from_str(r#"{ "action": "buy", "arg": "food 3" }"#).unwrap();
        assert_eq!(trade_order(&step).unwrap(), ("food".to_string(), 3));

        let step: Step =
            serde_json::from_str(r#"{ "action": "buy", "arg": "Food", "amount": 5 }"#).unwrap();
        assert_eq!(trade_order(&step).unwrap(), ("Food".to_string(), 5));
    }

    #[test]
    fn test_builtin_scripts_meet_expectations() {
        let options = Options {
            verbose: false,
            json: false,
            script: None,
        };
        for (name, json) in [("round_trip", ROUND_TRIP_JSON), ("smuggler", SMUGGLER_JSON)] {
            let results = replay_script(name, json, &options);
            let failed: Vec<_> = results.iter().filter(|r| !r.passed).map(|r| &r.name).collect();
            assert!(failed.is_empty(), "{:?}", failed);
        }
    }

    #[test]
    fn test_harness_sweeps_pass() {
        for results in [
            validate_galaxies(false),
            validate_descriptions(false),
            validate_markets(false),
            validate_randomizer(false),
            validate_configuration(false),
        ] {
            for r in results {
                assert!(r.passed, "{}: {}", r.name, r.detail);
            }
        }
    }
}
