use crate::models::Property;
use serde::{Deserialize, Serialize};

/// Facet filters for the listing catalog
/// `None` leaves the facet unconstrained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    /// Minimum monthly rent
    pub min_price: Option<i64>,
    /// Maximum monthly rent
    pub max_price: Option<i64>,
    /// Minimum number of rooms
    pub min_rooms: Option<u32>,
    /// Required furnished state
    pub furnished: Option<bool>,
    /// Maximum distance in kilometers
    pub max_distance: Option<f64>,
}

impl PropertyFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a listing satisfies every set facet.
    /// A listing without a known distance never satisfies a distance bound.
    pub fn matches(&self, property: &Property) -> bool {
        self.min_price.map_or(true, |min| property.price >= min)
            && self.max_price.map_or(true, |max| property.price <= max)
            && self.min_rooms.map_or(true, |min| property.rooms >= min)
            && self
                .furnished
                .map_or(true, |furnished| property.furnished == furnished)
            && self.max_distance.map_or(true, |max| {
                property.distance.is_some_and(|distance| distance <= max)
            })
    }

    /// Overwrite the facets the patch touches, keep the rest
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(min_price) = patch.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = max_price;
        }
        if let Some(min_rooms) = patch.min_rooms {
            self.min_rooms = min_rooms;
        }
        if let Some(furnished) = patch.furnished {
            self.furnished = furnished;
        }
        if let Some(max_distance) = patch.max_distance {
            self.max_distance = max_distance;
        }
    }
}

/// Partial update of [`PropertyFilters`].
/// The outer `Option` says whether the facet is touched, the inner one is its
/// new value, so `Some(None)` clears a facet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub min_price: Option<Option<i64>>,
    pub max_price: Option<Option<i64>>,
    pub min_rooms: Option<Option<u32>>,
    pub furnished: Option<Option<bool>>,
    pub max_distance: Option<Option<f64>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_price(mut self, value: impl Into<Option<i64>>) -> Self {
        self.min_price = Some(value.into());
        self
    }

    pub fn max_price(mut self, value: impl Into<Option<i64>>) -> Self {
        self.max_price = Some(value.into());
        self
    }

    pub fn min_rooms(mut self, value: impl Into<Option<u32>>) -> Self {
        self.min_rooms = Some(value.into());
        self
    }

    pub fn furnished(mut self, value: impl Into<Option<bool>>) -> Self {
        self.furnished = Some(value.into());
        self
    }

    pub fn max_distance(mut self, value: impl Into<Option<f64>>) -> Self {
        self.max_distance = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fixtures;

    #[test]
    fn empty_filters_match_everything() {
        let filters = PropertyFilters::default();
        assert!(filters.is_empty());
        assert!(fixtures::properties().iter().all(|p| filters.matches(p)));
    }

    #[test]
    fn merge_touches_only_patched_facets() {
        let mut filters = PropertyFilters {
            min_price: Some(4000),
            furnished: Some(true),
            ..Default::default()
        };

        filters.merge(FilterPatch::new().max_price(9000).furnished(None));

        assert_eq!(filters.min_price, Some(4000));
        assert_eq!(filters.max_price, Some(9000));
        assert_eq!(filters.furnished, None);
    }

    #[test]
    fn distance_bound_rejects_listings_without_distance() {
        let filters = PropertyFilters {
            max_distance: Some(1000.0),
            ..Default::default()
        };

        let mut property = fixtures::properties().remove(0);
        property.distance = None;
        assert!(!filters.matches(&property));

        property.distance = Some(2.5);
        assert!(filters.matches(&property));
    }
}
