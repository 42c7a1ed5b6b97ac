// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::domain::message::models::Document;
use crate::domain::message::repos::DocumentStore;
use crate::infra::message::MessageStore;

use super::{AppConfig, IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};

pub type DynAppConfig = Arc<AppConfig>;
pub type DynDocumentStore = Arc<dyn DocumentStore>;
pub type DynIDProvider = Arc<dyn IDProvider>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;

/// Everything the app services are built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub config: DynAppConfig,
    pub document_store: DynDocumentStore,
    pub id_provider: DynIDProvider,
    pub time_provider: DynTimeProvider,
}

impl AppDependencies {
    /// Wires up an in-memory store seeded with the example document.
    pub fn new(config: AppConfig) -> Self {
        Self::with_providers(
            config,
            Arc::new(SystemTimeProvider::default()),
            Arc::new(UUIDProvider::new()),
        )
    }

    pub fn with_providers(
        config: AppConfig,
        time_provider: DynTimeProvider,
        id_provider: DynIDProvider,
    ) -> Self {
        let document_store = Arc::new(MessageStore::new(
            Document::seed(time_provider.now()),
        ));
        Self {
            config: Arc::new(config),
            document_store,
            id_provider,
            time_provider,
        }
    }
}
