use dv_simulation::{DistanceVectorEngine, DriverError, SimulationDriver, TracingSink};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Default to info, still overridable via RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run() -> Result<(), DriverError> {
    let mut engine = DistanceVectorEngine::new(["A", "B", "C", "D", "E", "F", "G", "H"])?;
    for (a, b, cost) in [
        ("A", "B", 2),
        ("A", "D", 6),
        ("A", "E", 3),
        ("B", "E", 1),
        ("B", "C", 2),
        ("C", "E", 3),
        ("C", "H", 1),
        ("D", "E", 2),
        ("E", "F", 3),
        ("E", "H", 4),
        ("F", "G", 2),
        ("G", "H", 2),
    ] {
        engine.add_link(a, b, cost)?;
    }

    let report = SimulationDriver::new().run(&mut engine, &mut TracingSink)?;
    tracing::info!(rounds = report.rounds, "converged");
    print!("{}", engine.snapshot());
    Ok(())
}

fn main() {
    init_logging();
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
