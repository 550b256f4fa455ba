use civicmap_core::config::SearchSettings;
use civicmap_core::error::{CivicmapError, Result};
use civicmap_search::ProximitySearchEngine;
use civicmap_store::ports::ReportStore;
use std::sync::Arc;

use crate::access::{AccessPolicy, Actor, Resource};

pub type SharedStore = Arc<dyn ReportStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub engine: Arc<ProximitySearchEngine<SharedStore>>,
    pub access: Arc<dyn AccessPolicy>,
}

impl AppState {
    pub fn new(store: SharedStore, settings: SearchSettings, access: Arc<dyn AccessPolicy>) -> Self {
        let engine = Arc::new(ProximitySearchEngine::new(store.clone(), settings));
        Self { store, engine, access }
    }

    /// Reject the request unless the policy allows it
    pub fn authorize(&self, actor: &Actor, resource: &Resource) -> Result<()> {
        if self.access.can_access(actor, resource) {
            Ok(())
        } else {
            tracing::info!(?actor, ?resource, "Access denied");
            Err(CivicmapError::AccessDenied)
        }
    }
}
