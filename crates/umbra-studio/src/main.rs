use anyhow::Context;
use umbra_engine::logging::{init_logging, LoggingConfig};
use umbra_swarm::Application;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("umbra: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut app = Application::new()
        .title("umbra")
        .size(1024.0, 768.0);

    // UMBRA_SEED=<u64> replays the same population and jitter.
    if let Ok(raw) = std::env::var("UMBRA_SEED") {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("UMBRA_SEED must be an unsigned integer, got {raw:?}"))?;
        app = app.seed(seed);
    }

    app.run()
}
