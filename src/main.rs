use anyhow::Result;
use caption_generator::app::App;
use caption_generator::models::Config;
use caption_generator::web;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "caption-generator")]
#[command(about = "Generate AI captions for uploaded images")]
struct CliArgs {
    /// Address to bind the web server to.
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caption_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting caption-generator");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::new(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    // An unreachable store degrades the service but does not stop it; the
    // health endpoint keeps reporting the state.
    match app.ping_store().await {
        Ok(()) => info!("Document store reachable"),
        Err(e) => warn!("Document store unreachable at startup: {}", e),
    }

    let router = web::router(Arc::new(app));
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("Listening on http://{}", args.bind);

    axum::serve(listener, router).await?;
    Ok(())
}
