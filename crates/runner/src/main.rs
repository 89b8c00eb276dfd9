//! Team Pulse weekly metrics job

use std::process::ExitCode;

use tracing::info;

mod discord;
mod handler;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runner=debug".parse()?)
                .add_directive("processor=debug".parse()?),
        )
        .init();

    info!("📊 Starting Team Pulse weekly metrics run");

    let config = common::Config::from_env();
    let outcome = handler::run(&config).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.status_code == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
