use epic_freebies::config::Settings;
use epic_freebies::global::Global;
use epic_freebies::relay;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// Every failure is logged and the process still exits 0.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Settings::new();

    let level = config
        .as_ref()
        .map(|c| c.log_level.as_str())
        .unwrap_or("info");

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(level),
        )
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load settings: {:#}", e);
            return;
        }
    };

    let global = match Global::init(config) {
        Ok(global) => global,
        Err(e) => {
            tracing::error!("failed to initialize: {:#}", e);
            return;
        }
    };

    relay::run(&global).await;
}
