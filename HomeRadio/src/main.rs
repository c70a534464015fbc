use hrconfig::get_config;
use hritunes::ItunesServerExt;
use hrnavidrome::NavidromeServerExt;
use hrserver::{LoggingOptions, Server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========== PHASE 1 : Infrastructure ==========
    let config = get_config();

    let mut server = Server::new_configured();
    server
        .init_logging(LoggingOptions::from_config(&config))
        .await;
    info!("Using configuration from {}", config.directory());

    server
        .add_route("/info", || async {
            serde_json::json!({
                "name": "HomeRadio",
                "version": env!("CARGO_PKG_VERSION"),
            })
        })
        .await;

    // ========== PHASE 2 : Sources ==========

    // Sans identifiants Navidrome le serveur ne démarre pas
    info!("Initializing Navidrome API...");
    let navidrome = server.init_navidrome().await?;
    info!("Navidrome user: {}", navidrome.client().username());

    info!("Initializing iTunes podcast search...");
    server.init_itunes().await?;

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("Starting HTTP server...");
    server.start().await?;

    info!("HomeRadio is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
