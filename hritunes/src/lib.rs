//! iTunes podcast search for HomeRadio
//!
//! A thin client over the public iTunes Search API, restricted to podcasts,
//! and the `/api/itunes/search-podcasts` route used by the podcast block form.

pub mod api_rest;
pub mod client;
pub mod error;
pub mod models;
pub mod server_ext;

// Re-exports
pub use client::{ClientBuilder, ItunesClient};
pub use error::{ItunesError, Result};
pub use models::Podcast;
pub use server_ext::{ItunesServerExt, ItunesState};
