//! Vineyard simulator - batch report
//!
//! Generates the configured weather series once, estimates production and
//! prints the resulting report as JSON on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vineyard_simulator::random::random_seed;
use vineyard_simulator::{seeded_rng, Config, EnvironmentalSimulator, ReportingService};

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing; stdout is reserved for the report
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vineyard_sim=info,vineyard_simulator=info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    tracing::info!("Starting vineyard simulation");
    tracing::info!("Environment: {}", config.environment);

    let range = config.date_range()?;
    let settings = config.report_settings()?;
    let seed = config.simulation.seed.unwrap_or_else(random_seed);
    tracing::info!(
        "Simulating {} to {} with seed {}",
        range.start,
        range.end,
        seed
    );

    let mut rng = seeded_rng(seed);
    let series = EnvironmentalSimulator::new(config.generator_options()).generate(
        range.start,
        range.end,
        &mut rng,
    )?;
    let report = ReportingService::build_report(&series, &settings, &mut rng)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
