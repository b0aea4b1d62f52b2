//! battle-runner: headless MECHABATTLE driver.
//!
//! Usage:
//!   battle-runner run --seed 7 --team-size 3
//!   battle-runner run --config battle.json --data parts.json --json
//!   battle-runner data --data parts.json

use std::path::PathBuf;
use std::process;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mechabattle_core::constants::MAX_TEAM_SIZE;
use mechabattle_core::enums::{BattleOutcome, PartSlot, StrategyKind, Team};
use mechabattle_data::loadout::random_team;
use mechabattle_data::GameData;
use mechabattle_sim::{BattleConfig, BattleEngine};

const DEFAULT_DT: f64 = 1.0 / 30.0;
const DEFAULT_MAX_TICKS: u64 = 200_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("mechabattle_sim=info,mechabattle_data=warn,battle_runner=info")
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "data" => cmd_data(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "battle-runner: MECHABATTLE headless battle driver\n\
         \n\
         Commands:\n\
         \n\
         run       Play one computer-vs-computer battle\n\
         \n\
           --config <path>    Battle config JSON (optional)\n\
           --data <path>      Part/medal data JSON (default: built-in set)\n\
           --seed <N>         RNG seed (overrides the config)\n\
           --team-size <N>    Machines per team, 1-{MAX_TEAM_SIZE} (default: 3)\n\
           --max-ticks <N>    Give up after N updates (default: {DEFAULT_MAX_TICKS})\n\
           --json             Print the final snapshot as JSON\n\
         \n\
         data      Load a data file and summarize it\n\
         \n\
           --data <path>      Part/medal data JSON\n\
         \n\
         Examples:\n\
         \n\
           battle-runner run --seed 7 --team-size 2\n\
           battle-runner data --data assets/parts.json\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse::<T>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got '{raw}'");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn load_data(args: &[String]) -> GameData {
    match parse_value(args, "--data") {
        Some(path) => GameData::load_or_empty(&PathBuf::from(path)),
        None => GameData::builtin(),
    }
}

fn load_config(args: &[String]) -> BattleConfig {
    let mut config = match parse_value(args, "--config") {
        Some(path) => {
            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: cannot read {path}: {e}");
                    process::exit(1);
                }
            };
            match serde_json::from_str::<BattleConfig>(&content) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: invalid config {path}: {e}");
                    process::exit(1);
                }
            }
        }
        None => BattleConfig::headless(42),
    };
    // Nobody is at the controls here.
    config.player_controlled = false;
    config.auto_advance_log = true;
    config.seed = parse_number(args, "--seed", config.seed);
    config
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let config = load_config(args);
    let data = load_data(args);
    let team_size = parse_number(args, "--team-size", MAX_TEAM_SIZE).clamp(1, MAX_TEAM_SIZE);
    let max_ticks = parse_number(args, "--max-ticks", DEFAULT_MAX_TICKS);
    let as_json = args.iter().any(|a| a == "--json");

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let team_one = random_team(&data, team_size, StrategyKind::Random, &mut rng);
    let team_two = random_team(&data, team_size, StrategyKind::Strongest, &mut rng);
    if team_one.members.is_empty() || team_two.members.is_empty() {
        eprintln!("Error: the data set cannot assemble a machine");
        eprintln!("       (it needs a medal and a part for every slot)");
        process::exit(1);
    }

    for (label, team) in [("Team one", &team_one), ("Team two", &team_two)] {
        println!("{label}:");
        for (i, machine) in team.members.iter().enumerate() {
            let marker = if i == team.leader { " (leader)" } else { "" };
            println!(
                "  {}{marker}: {} / {} / {} / {}",
                machine.name,
                machine.head.name,
                machine.right_arm.name,
                machine.left_arm.name,
                machine.legs.name
            );
        }
    }
    println!();

    tracing::info!("Running battle with seed {}", config.seed);
    let mut engine = BattleEngine::new(config);
    engine.start_battle(&team_one, &team_two);

    let mut shown: Vec<String> = Vec::new();
    for _ in 0..max_ticks {
        engine.update(DEFAULT_DT);
        let log = &engine.context().battle_log;
        if *log != shown {
            for line in log.iter().filter(|line| !shown.contains(line)) {
                println!("{line}");
            }
            shown = log.clone();
        }
        if engine.is_over() {
            break;
        }
    }

    let snapshot = engine.snapshot();
    println!();
    match engine.outcome() {
        Some(BattleOutcome::Victory(Team::One)) => println!("Result: team one wins"),
        Some(BattleOutcome::Victory(Team::Two)) => println!("Result: team two wins"),
        Some(BattleOutcome::Draw) => println!("Result: draw"),
        None => println!("Result: no winner after {} ticks", snapshot.time.tick),
    }
    println!("Elapsed: {:.2} time units over {} ticks", snapshot.time.elapsed, snapshot.time.tick);
    for machine in &snapshot.machines {
        let parts: Vec<String> = machine
            .parts
            .iter()
            .map(|p| format!("{} {}/{}", p.slot.label(), p.hp, p.max_hp))
            .collect();
        let state = if machine.defeated { "down" } else { "up" };
        println!("  {} [{:?}, {state}] {}", machine.name, machine.team, parts.join(", "));
    }

    if as_json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize snapshot: {e}");
                process::exit(1);
            }
        }
    }
}

// --- Data command ---

fn cmd_data(args: &[String]) {
    let Some(path) = parse_value(args, "--data") else {
        eprintln!("Error: --data <path> is required");
        process::exit(1);
    };
    let data = match GameData::load(&PathBuf::from(path)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    println!("{path}:");
    for slot in PartSlot::ALL {
        let ids: Vec<&str> = data.parts.slot(slot).iter().map(|p| p.id.as_str()).collect();
        println!("  {:<10} {:>2}  {}", slot.label(), ids.len(), ids.join(", "));
    }
    let medals: Vec<&str> = data.medals.iter().map(|m| m.id.as_str()).collect();
    println!("  {:<10} {:>2}  {}", "medals", medals.len(), medals.join(", "));
}
