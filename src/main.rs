use dotenv::dotenv;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer::app;
use wayfarer::modules::Modules;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "wayfarer=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let modules = Modules::load_from_settings().await?;

    info!("Starting server");
    info!("Listening on {}", modules.app.addr);
    axum::Server::bind(&modules.app.addr)
        .serve(app(&modules).into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
