//! Junta Election Sweep
//!
//! Run with: cargo run --release --bin junta_sweep

mod junta;

use junta::{SweepConfig, SweepRunner};
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    println!("╔════════════════════════════════════════════════════════╗");
    println!("║        Junta Election Simulator                        ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    let config = SweepConfig {
        start_population: 100,
        max_population: 12_800,
        trials: 10,
        ..Default::default()
    };

    info!("Configuration:");
    info!(
        "  Populations: {}..={} (doubling)",
        config.start_population, config.max_population
    );
    info!("  Trials per size: {}", config.trials);
    info!("  c = {}, r = {}", config.base_width, config.growth_ratio);
    info!("  Interaction budget: {:?}", config.max_interactions);

    let result = SweepRunner::new(config).and_then(|runner| runner.run());

    match result {
        Ok(result) => {
            result.print_summary();
            info!("✓ Sweep complete!");
        }
        Err(e) => {
            error!("Sweep failed: {}", e);
            std::process::exit(1);
        }
    }
}
