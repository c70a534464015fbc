//! Extension hrserver pour Navidrome
//!
//! Ce module fournit un trait d'extension pour ajouter l'API Navidrome à un
//! serveur hrserver.

use crate::api_rest::{create_router, NavidromeApiDoc};
use crate::NavidromeClient;
use hrconfig::get_config;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

/// État partagé pour l'API Navidrome
#[derive(Clone)]
pub struct NavidromeState {
    pub(crate) client: Arc<NavidromeClient>,
}

impl NavidromeState {
    pub fn new(client: NavidromeClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// État construit depuis la configuration globale
    ///
    /// Échoue si l'URL, l'utilisateur ou le mot de passe manque.
    pub fn from_config() -> anyhow::Result<Self> {
        let client = NavidromeClient::from_config(&get_config())?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> Arc<NavidromeClient> {
        self.client.clone()
    }
}

/// Trait d'extension pour hrserver::Server
pub trait NavidromeServerExt {
    /// Initialise l'API Navidrome depuis la configuration
    ///
    /// # Routes créées
    ///
    /// - API: `/api/navidrome/*`
    ///   - `/fetch-playlists`
    ///   - `/get-cover-art?id=..&size=..`
    /// - Swagger: `/swagger-ui/navidrome`
    async fn init_navidrome(&mut self) -> anyhow::Result<NavidromeState>;

    /// Initialise l'API Navidrome avec un client déjà construit
    async fn init_navidrome_with_client(&mut self, client: NavidromeClient) -> NavidromeState;
}

impl NavidromeServerExt for hrserver::Server {
    async fn init_navidrome(&mut self) -> anyhow::Result<NavidromeState> {
        let client = NavidromeClient::from_config(&get_config())?;
        Ok(self.init_navidrome_with_client(client).await)
    }

    async fn init_navidrome_with_client(&mut self, client: NavidromeClient) -> NavidromeState {
        info!("Navidrome API using {}", client.base_url());
        let state = NavidromeState::new(client);

        let api_router = create_router(state.clone());
        self.add_openapi(api_router, NavidromeApiDoc::openapi(), "navidrome")
            .await;

        state
    }
}
