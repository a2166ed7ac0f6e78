// Scenario Runner - Load and execute sweep YAML files
//
// Usage:
//   cargo run --release --bin scenario_runner scenarios/reference.yaml
//   cargo run --release --bin scenario_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --release --bin scenario_runner scenarios/reference.yaml --seed 0x1234...

mod junta;

use junta::{SweepConfig, SweepRunner};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::Path;

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Sweep configuration (missing keys take defaults)
    #[serde(default)]
    sweep: SweepConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
    hypothesis: Option<String>,
}

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/reference.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/reference.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    // Parse optional seed
    let seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        match parse_seed_hex(&args[3]) {
            Ok(seed) => Some(seed),
            Err(e) => {
                eprintln!("Invalid hex seed: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let ok = if path.is_file() {
        run_scenario_file(path, seed)
    } else if path.is_dir() {
        run_scenario_directory(path, seed)
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        false
    };

    if !ok {
        std::process::exit(1);
    }
}

fn run_scenario_directory(dir: &Path, seed: Option<[u8; 32]>) -> bool {
    let mut scenarios = Vec::new();

    // Find all .yaml files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        return false;
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  SCENARIO RUNNER - Multiple Scenarios                 ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    println!("Found {} scenario(s) to run\n", scenarios.len());

    let mut all_ok = true;
    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, scenarios.len(), scenario_path.display());
        all_ok &= run_scenario_file(scenario_path, seed);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  All scenarios complete!                               ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    all_ok
}

fn run_scenario_file(path: &Path, seed: Option<[u8; 32]>) -> bool {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            return false;
        }
    };

    let scenario: ScenarioFile = match serde_yaml::from_str(&yaml_content) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Failed to parse {}: {}", path.display(), e);
            return false;
        }
    };

    // Print scenario header
    println!("\n╔════════════════════════════════════════════════════════╗");
    match scenario.meta.name {
        Some(ref name) => println!("║  {}", name),
        None => println!("║  Scenario: {}", path.display()),
    }
    println!("╚════════════════════════════════════════════════════════╝\n");

    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }

    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    let mut config = scenario.sweep;
    if seed.is_some() {
        config.seed = seed;
    }

    println!("Configuration:");
    println!(
        "  Populations: {}..={}{}",
        config.start_population,
        config.max_population,
        if config.jitter_population { " (jittered)" } else { "" }
    );
    println!("  Trials per size: {}", config.trials);
    println!("  c = {}, r = {}", config.base_width, config.growth_ratio);
    println!("  Interaction budget: {:?}", config.max_interactions);
    println!("\nStarting sweep...\n");

    match SweepRunner::new(config).and_then(|runner| runner.run()) {
        Ok(result) => {
            result.print_summary();
            println!("\n✓ Scenario complete!\n");
            true
        }
        Err(e) => {
            error!("Scenario {} failed: {}", path.display(), e);
            false
        }
    }
}

fn parse_seed_hex(hex: &str) -> Result<[u8; 32], String> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
        seed[i] = u8::from_str_radix(byte_str, 16).map_err(|e| e.to_string())?;
    }

    Ok(seed)
}
