//! Navidrome client library for HomeRadio
//!
//! This crate talks to a Subsonic-compatible media server (Navidrome) and
//! exposes a small read-only proxy over HTTP, so that the web front end
//! never sees the server credentials.
//!
//! # Features
//!
//! - **Playlists**: list the playlists of the configured user
//! - **Cover art**: fetch playlist artwork, optionally resized
//! - **Token authentication**: `md5(password + salt)` with a fresh salt per request
//! - **Configuration Extension**: credentials under `sources.navidrome` or
//!   `NAVIDROME_*` environment variables
//! - **Server Extension**: `/api/navidrome/*` routes for hrserver
//!
//! # Example
//!
//! ```no_run
//! use hrconfig::get_config;
//! use hrnavidrome::NavidromeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NavidromeClient::from_config(&get_config())?;
//!
//!     let playlists = client.get_playlists().await?;
//!     if let Some(first) = playlists.first() {
//!         let info = first.to_playlist_info();
//!         let cover = client.get_cover_art(&info.cover_art, Some(300)).await?;
//!         println!("{}: {} bytes of artwork", info.name, cover.bytes.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api_rest;
pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod server_ext;
pub mod signing;

// Re-exports
pub use client::{ClientBuilder, NavidromeClient};
pub use config_ext::{NavidromeConfigExt, NavidromeCredentials};
pub use error::{NavidromeError, Result};
pub use models::{CoverArt, Playlist};
pub use server_ext::{NavidromeServerExt, NavidromeState};
