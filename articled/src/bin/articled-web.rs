use articled::{Config, shutdown_signal, telemetry, web::WebApplication};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Same config file as the API; only the `web` section and telemetry flag are used
    let args = articled::config::Args::parse();
    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry("articled-web", config.enable_otel_export)?;

    tracing::debug!("{:?}", args);

    WebApplication::new(config.web)?.serve(shutdown_signal()).await
}
