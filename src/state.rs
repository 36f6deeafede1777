use std::sync::Arc;

use crate::config::Config;
use crate::engine::scoring::{QuizScorer, RemoteScorer};
use crate::store::{CatalogProvider, InMemoryStore, ProfileStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub catalog: Arc<dyn CatalogProvider>,
    /// Delegated scoring collaborator; `None` scores locally.
    pub scorer: Option<Arc<dyn QuizScorer>>,
    pub config: Config,
}

impl AppState {
    /// Wires one in-memory store behind both contracts.
    pub fn in_memory(store: InMemoryStore, config: Config) -> Self {
        let store = Arc::new(store);
        let scorer = config
            .scoring_service_url
            .as_deref()
            .map(|url| Arc::new(RemoteScorer::new(url)) as Arc<dyn QuizScorer>);

        Self {
            profiles: store.clone(),
            catalog: store,
            scorer,
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
