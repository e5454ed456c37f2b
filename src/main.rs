use anyhow::Context;
use tokio::net::TcpListener;

use herd_form::configuration::get_configuration;
use herd_form::startup::{cors_layer, get_app_state, router, run};
use herd_form::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("herd-form".into(), "info".into(), std::io::stdout);
    initialize_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let app_state = get_app_state(&configuration)
        .await
        .context("Failed to set up the submission store")?;
    let cors = cors_layer(&configuration.application.cors)?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(
        database = %configuration.database.database_name,
        collection = %configuration.database.collection,
        "Listening on {}",
        address
    );

    run(listener, router(app_state, cors)).await?;

    Ok(())
}
