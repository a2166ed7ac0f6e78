use junta_rust::{run_protocol, NoOpSink, ProtocolConfig, RunOutcome};
use std::time::Instant;

/// Benchmark wall time of a full protocol run per population size
fn main() {
    std::env::set_var("RUST_LOG", "error");
    let _ = simple_logger::init_with_env();

    println!("\n=== Junta Election Convergence Benchmark ===\n");

    let populations = [100usize, 1_000, 10_000, 100_000];
    let samples = 5;

    println!(
        "{:<12} {:>12} {:>18} {:>16} {:>12}",
        "Population", "Time (ms)", "Interactions", "Steps/s", "n log n"
    );
    println!("{}", "-".repeat(74));

    for population in populations {
        let mut total_time = 0.0;
        let mut total_interactions = 0u64;
        let mut failed = 0;

        for sample in 0..samples {
            let config = ProtocolConfig {
                population,
                seed: Some([sample as u8; 32]),
                ..Default::default()
            };

            let start = Instant::now();
            let report = match run_protocol(&config, &mut NoOpSink) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("n={}: {}", population, e);
                    return;
                }
            };
            total_time += start.elapsed().as_secs_f64();
            total_interactions += report.interactions;
            if report.outcome != RunOutcome::Converged {
                failed += 1;
            }
        }

        let avg_time_ms = total_time / samples as f64 * 1000.0;
        let avg_interactions = total_interactions as f64 / samples as f64;
        let steps_per_sec = total_interactions as f64 / total_time;
        let n = population as f64;

        println!(
            "{:<12} {:>12.2} {:>18.0} {:>16.0} {:>12.2}{}",
            population,
            avg_time_ms,
            avg_interactions,
            steps_per_sec,
            avg_interactions / (n * n.log2()),
            if failed > 0 { " (budget hit)" } else { "" }
        );
    }

    println!("\n{}", "=".repeat(74));
}
