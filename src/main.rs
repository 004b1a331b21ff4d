use docs_launcher::config::LauncherConfig;
use docs_launcher::core::Dispatcher;
use docs_launcher::delivery::{ServedDelivery, StaticDelivery};
use docs_launcher::platform::HostPlatform;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = LauncherConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        LauncherConfig::default()
    });

    let dispatcher = Dispatcher::new(
        HostPlatform,
        ServedDelivery::from_config(&config),
        StaticDelivery::from_config(&config),
    );
    dispatcher.run()?;
    Ok(())
}
