use crate::models::{Resource, ResourceCategory};
use crate::sources::ResourceSource;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ResourcesState {
    pub resources: Vec<Resource>,
    pub categories: Vec<ResourceCategory>,
    /// Article opened by `fetch_resource_by_id`
    pub current_resource: Option<Resource>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Library of guides for newcomers
pub struct ResourcesStore {
    source: Arc<dyn ResourceSource>,
    state: watch::Sender<ResourcesState>,
}

impl ResourcesStore {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        let (state, _) = watch::channel(ResourcesState::default());
        Self { source, state }
    }

    pub fn state(&self) -> watch::Ref<'_, ResourcesState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourcesState> {
        self.state.subscribe()
    }

    pub async fn fetch_resources(&self) {
        self.begin_loading();

        match self.source.fetch_resources().await {
            Ok(resources) => {
                info!("Loaded {} resources", resources.len());
                self.state.send_modify(|state| {
                    state.resources = resources;
                    state.is_loading = false;
                });
            }
            Err(err) => self.fail_loading(err),
        }
    }

    pub async fn fetch_categories(&self) {
        self.begin_loading();

        match self.source.fetch_categories().await {
            Ok(categories) => {
                info!("Loaded {} resource categories", categories.len());
                self.state.send_modify(|state| {
                    state.categories = categories;
                    state.is_loading = false;
                });
            }
            Err(err) => self.fail_loading(err),
        }
    }

    /// Open one article; an unknown id clears the current article
    pub async fn fetch_resource_by_id(&self, id: &str) {
        debug!("Fetching resource {}", id);
        self.begin_loading();

        match self.source.fetch_resource(id).await {
            Ok(resource) => {
                if resource.is_none() {
                    debug!("No resource with id {}", id);
                }
                self.state.send_modify(|state| {
                    state.current_resource = resource;
                    state.is_loading = false;
                });
            }
            Err(err) => self.fail_loading(err),
        }
    }

    pub fn resources_by_category(&self, category_id: &str) -> Vec<Resource> {
        self.state
            .borrow()
            .resources
            .iter()
            .filter(|resource| resource.category_id == category_id)
            .cloned()
            .collect()
    }

    /// Case-insensitive search over title, description and content
    pub fn search_resources(&self, query: &str) -> Vec<Resource> {
        let query = query.to_lowercase();
        self.state
            .borrow()
            .resources
            .iter()
            .filter(|resource| resource.matches_query(&query))
            .cloned()
            .collect()
    }

    fn begin_loading(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn fail_loading(&self, err: anyhow::Error) {
        warn!("Failed to load resources: {}", err);
        self.state.send_modify(|state| {
            state.error = Some(err.to_string());
            state.is_loading = false;
        });
    }
}
