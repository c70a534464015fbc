//! # hrserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit le serveur HTTP de HomeRadio :
//!
//! - [`server`] : le serveur, son builder, l'enregistrement des routes et des API OpenAPI
//! - [`logs`] : buffer de logs, flux SSE et réglage du niveau à chaud
//!
//! Les crates de sources (`hrnavidrome`, `hritunes`) ajoutent leurs routes
//! via des traits d'extension implémentés pour [`Server`].
//!
//! ## Exemple
//!
//! ```rust,no_run
//! use hrserver::{ServerBuilder, logs::LoggingOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = ServerBuilder::new("HomeRadio", "localhost", 8080).build();
//!     server.init_logging(LoggingOptions::default()).await;
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{LogState, LoggingOptions, SseLayer, log_dump, log_sse};
pub use server::{Server, ServerBuilder, ServerInfo};
