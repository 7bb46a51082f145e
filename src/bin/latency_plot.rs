use anyhow::Context;
use log::info;
use ssid_latency::plot::parse_cli;
use ssid_latency::TimeLatency;

fn main() -> anyhow::Result<()> {
    let config = parse_cli();
    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    info!(
        "read data from {} and plot to {}",
        config.input.display(),
        config.output.display()
    );
    let tl = TimeLatency::from_logfile(&config.input)
        .with_context(|| format!("could not parse {}", config.input.display()))?;
    if let Some(summary) = tl.summary() {
        info!("{}: {}", tl.label, summary);
    }
    tl.plot_latency(&config.output)
        .with_context(|| format!("could not save {}", config.output.display()))?;
    info!("saved {}", config.output.display());
    Ok(())
}
