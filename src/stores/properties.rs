use crate::models::Property;
use crate::sources::{FilterPatch, PropertyFilters, PropertySource};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct PropertiesState {
    /// Every loaded listing
    pub properties: Vec<Property>,
    /// Listings passing the search query and filters
    pub filtered_properties: Vec<Property>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filters: PropertyFilters,
    pub search_query: String,
}

/// Listing catalog with free-text search, facet filters and favorites
pub struct PropertiesStore {
    source: Arc<dyn PropertySource>,
    state: watch::Sender<PropertiesState>,
}

impl PropertiesStore {
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        let (state, _) = watch::channel(PropertiesState::default());
        Self { source, state }
    }

    /// Current snapshot. Do not hold it across an await.
    pub fn state(&self) -> watch::Ref<'_, PropertiesState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PropertiesState> {
        self.state.subscribe()
    }

    /// Load the catalog. The filtered view is reset to the full set.
    pub async fn fetch(&self) {
        debug!("Fetching properties from {}", self.source.source_name());
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.source.fetch_properties().await {
            Ok(properties) => {
                info!("Loaded {} properties", properties.len());
                self.state.send_modify(|state| {
                    state.filtered_properties = properties.clone();
                    state.properties = properties;
                    state.is_loading = false;
                });
            }
            Err(err) => {
                warn!("Failed to fetch properties: {}", err);
                self.state.send_modify(|state| {
                    state.error = Some(err.to_string());
                    state.is_loading = false;
                });
            }
        }
    }

    /// Flip the favorite flag of a listing in both views
    pub fn toggle_favorite(&self, property_id: &str) {
        self.state.send_modify(|state| {
            for property in state
                .properties
                .iter_mut()
                .chain(state.filtered_properties.iter_mut())
                .filter(|property| property.id == property_id)
            {
                property.is_favorite = !property.is_favorite;
            }
        });
    }

    /// Merge facet values into the filters without recomputing the view
    pub fn set_filters(&self, patch: FilterPatch) {
        self.state.send_modify(|state| state.filters.merge(patch));
    }

    /// Recompute the filtered view from the full set
    pub fn apply_filters(&self) {
        self.state.send_modify(|state| {
            state.filtered_properties =
                filter_properties(&state.properties, &state.filters, &state.search_query);
        });
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.search_query = query);
        self.apply_filters();
    }

    pub fn clear_filters(&self) {
        self.state.send_modify(|state| {
            state.filters = PropertyFilters::default();
            state.search_query.clear();
        });
        self.apply_filters();
    }

    pub fn favorites(&self) -> Vec<Property> {
        self.state
            .borrow()
            .properties
            .iter()
            .filter(|property| property.is_favorite)
            .cloned()
            .collect()
    }

    pub fn property(&self, property_id: &str) -> Option<Property> {
        self.state
            .borrow()
            .properties
            .iter()
            .find(|property| property.id == property_id)
            .cloned()
    }
}

/// Listings matching `query` (case-insensitive, empty matches all) and every
/// set facet, in catalog order
pub fn filter_properties(
    properties: &[Property],
    filters: &PropertyFilters,
    query: &str,
) -> Vec<Property> {
    let query = query.to_lowercase();

    properties
        .iter()
        .filter(|property| query.is_empty() || property.matches_query(&query))
        .filter(|property| filters.matches(property))
        .cloned()
        .collect()
}
