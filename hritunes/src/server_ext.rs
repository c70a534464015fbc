//! Extension hrserver pour la recherche iTunes

use crate::api_rest::{create_router, ItunesApiDoc};
use crate::ItunesClient;
use std::sync::Arc;
use utoipa::OpenApi;

/// État partagé pour l'API iTunes
#[derive(Clone)]
pub struct ItunesState {
    pub(crate) client: Arc<ItunesClient>,
}

impl ItunesState {
    pub fn new(client: ItunesClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Trait d'extension pour hrserver::Server
pub trait ItunesServerExt {
    /// Initialise l'API iTunes
    ///
    /// # Routes créées
    ///
    /// - API: `/api/itunes/search-podcasts?q=..`
    /// - Swagger: `/swagger-ui/itunes`
    async fn init_itunes(&mut self) -> anyhow::Result<ItunesState>;

    /// Initialise l'API iTunes avec un client déjà construit
    async fn init_itunes_with_client(&mut self, client: ItunesClient) -> ItunesState;
}

impl ItunesServerExt for hrserver::Server {
    async fn init_itunes(&mut self) -> anyhow::Result<ItunesState> {
        let client = ItunesClient::new()?;
        Ok(self.init_itunes_with_client(client).await)
    }

    async fn init_itunes_with_client(&mut self, client: ItunesClient) -> ItunesState {
        let state = ItunesState::new(client);

        let api_router = create_router(state.clone());
        self.add_openapi(api_router, ItunesApiDoc::openapi(), "itunes")
            .await;

        state
    }
}
