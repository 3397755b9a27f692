//! Application state shared by the console's commands.

use std::sync::Arc;

use stockdesk_inventory::{recent_movements, Category, Product, StockMovement, Summary, Supplier};

use crate::backend::HttpBackend;
use crate::config::ClientConfig;
use crate::navigation::Navigator;
use crate::resources::{ApiError, ResourceClient};
use crate::session::SessionManager;
use crate::store::TokenStore;

/// Everything the dashboard panel shows.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub summary: Summary,
    pub recent: Vec<StockMovement>,
}

/// Session plus one client per resource, all sharing one HTTP backend.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub products: ResourceClient<Product>,
    pub categories: ResourceClient<Category>,
    pub suppliers: ResourceClient<Supplier>,
    pub movements: ResourceClient<StockMovement>,
}

impl AppState {
    /// Number of movements shown on the dashboard.
    pub const RECENT_MOVEMENTS: usize = 5;

    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let backend = Arc::new(HttpBackend::new(config.api_url.clone()));
        let session = Arc::new(
            SessionManager::new(store, backend.clone(), navigator)
                .with_login_timeout(config.login_timeout),
        );
        Self::with_parts(backend, session)
    }

    pub fn with_parts(backend: Arc<HttpBackend>, session: Arc<SessionManager>) -> Self {
        Self {
            products: ResourceClient::new(backend.clone(), session.clone()),
            categories: ResourceClient::new(backend.clone(), session.clone()),
            suppliers: ResourceClient::new(backend.clone(), session.clone()),
            movements: ResourceClient::new(backend, session.clone()),
            session,
        }
    }

    /// Fetch products and movements and summarize them.
    pub async fn dashboard(&self) -> Result<DashboardView, ApiError> {
        let (products, movements) =
            tokio::try_join!(self.products.list(), self.movements.list())?;

        Ok(DashboardView {
            summary: Summary::compute(&products, &movements),
            recent: recent_movements(&movements, Self::RECENT_MOVEMENTS)
                .into_iter()
                .cloned()
                .collect(),
        })
    }
}
