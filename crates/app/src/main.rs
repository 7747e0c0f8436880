mod contact;
mod page;
mod problem;
mod router;
mod telemetry;

use std::net::SocketAddr;

use tracing::info;

use forsale_core::{generate_starfield, InquiryRouting};
use forsale_relay::RelayClient;
use forsale_util::{load_env_file, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let relay = RelayClient::new(config.relay_url.clone(), reqwest::Client::builder().build()?);
    let routing = InquiryRouting::new(config.support_email.clone(), config.site_domain.clone());
    let stars = generate_starfield();

    info!(
        stage = "app",
        relay = %relay.endpoint(),
        stars = stars.len(),
        "landing page prepared"
    );

    let state = router::AppState::new(metrics, relay, routing, stars);

    let addr: SocketAddr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
