//! View-models consumed by the renderers and the map adapter.

use crate::join::{
    communities_for_city, derive_count, find_city, group_by_builder, page_cities, BuilderGroup, Count,
};
use plat_core::{Builder, City, Collections, Community, Error, Result};

/// Everything the city-detail page shows
#[derive(Debug, Clone)]
pub struct CityView<'a> {
    pub city: &'a City,
    pub communities: Vec<&'a Community>,
    pub groups: Vec<BuilderGroup<'a>>,
    pub builders_count: Count,
    pub communities_count: Count,
}

impl<'a> CityView<'a> {
    /// Join `city` against the builder and community collections
    pub fn build(city: &'a City, collections: &'a Collections) -> Self {
        let communities = communities_for_city(&collections.communities, city);
        let groups = group_by_builder(&communities, &collections.builders);
        let builders_count = derive_count(city.builders_count, groups.len());
        let communities_count = derive_count(city.communities_count, communities.len());

        Self {
            city,
            communities,
            groups,
            builders_count,
            communities_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }
}

/// Resolve `slug` and join its communities
pub fn city_view<'a>(collections: &'a Collections, slug: &str) -> Result<CityView<'a>> {
    let city = find_city(&collections.cities, slug).ok_or_else(|| Error::NotFound(slug.to_string()))?;
    let view = CityView::build(city, collections);
    tracing::debug!(
        "City {} joined: {} communities in {} builder groups",
        slug,
        view.communities.len(),
        view.groups.len()
    );
    Ok(view)
}

/// Home page strips and map markers
#[derive(Debug, Clone)]
pub struct HomeView<'a> {
    /// Only cities with a detail page, so every card links somewhere
    pub cities: Vec<&'a City>,
    pub builders: &'a [Builder],
    pub markers: &'a [Community],
}

/// Truncate the city and builder strips to `strip_limit`, keep every
/// community for the map.
pub fn home_view(collections: &Collections, strip_limit: usize) -> HomeView<'_> {
    let (mut cities, _) = page_cities(&collections.cities);
    cities.truncate(strip_limit);
    HomeView {
        cities,
        builders: prefix(&collections.builders, strip_limit),
        markers: &collections.communities,
    }
}

/// City index page
#[derive(Debug, Clone)]
pub struct CityIndexView<'a> {
    pub cities: Vec<&'a City>,
}

/// Every city that has a detail page, in collection order
pub fn city_index_view(collections: &Collections) -> CityIndexView<'_> {
    CityIndexView {
        cities: page_cities(&collections.cities).0,
    }
}

fn prefix<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collections(value: serde_json::Value) -> Collections {
        Collections {
            cities: serde_json::from_value(value["cities"].clone()).unwrap_or_default(),
            builders: serde_json::from_value(value["builders"].clone()).unwrap_or_default(),
            communities: serde_json::from_value(value["communities"].clone()).unwrap_or_default(),
        }
    }

    #[test]
    fn test_end_to_end_orphan_builder() {
        let data = collections(json!({
            "cities": [{ "id": 1, "slug": "visalia", "name": "Visalia" }],
            "communities": [{ "id": 10, "cityId": 1, "builderId": 5, "name": "Oakview" }],
            "builders": []
        }));

        let view = city_view(&data, "visalia").unwrap();
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].name(), "Builder");
        assert_eq!(view.groups[0].communities[0].name, "Oakview");
        assert_eq!(view.builders_count, Count::Computed(1));
        assert_eq!(view.communities_count, Count::Computed(1));
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        let data = collections(json!({ "cities": [{ "id": 1, "slug": "visalia", "name": "Visalia" }] }));
        assert!(matches!(city_view(&data, "fresno"), Err(Error::NotFound(s)) if s == "fresno"));
    }

    #[test]
    fn test_city_without_communities() {
        let data = collections(json!({
            "cities": [{ "id": 1, "slug": "visalia", "name": "Visalia" }],
            "communities": [{ "id": 10, "cityId": 2, "builderId": 5, "name": "Elsewhere" }]
        }));
        let view = city_view(&data, "visalia").unwrap();
        assert!(view.is_empty());
        assert!(view.groups.is_empty());
        assert_eq!(view.builders_count, Count::Placeholder);
        assert_eq!(view.communities_count, Count::Placeholder);
    }

    #[test]
    fn test_explicit_counts_win() {
        let data = collections(json!({
            "cities": [{ "id": 1, "slug": "visalia", "name": "Visalia", "communitiesCount": 10, "buildersCount": 4 }],
            "communities": [
                { "id": 10, "cityId": 1, "builderId": 5, "name": "A" },
                { "id": 11, "cityId": 1, "builderId": 5, "name": "B" },
                { "id": 12, "cityId": 1, "builderId": 6, "name": "C" }
            ]
        }));
        let view = city_view(&data, "visalia").unwrap();
        assert_eq!(view.communities_count.to_string(), "10");
        assert_eq!(view.builders_count.to_string(), "4");
        assert_eq!(view.communities.len(), 3);
    }

    #[test]
    fn test_home_view_truncates_strips_only() {
        let cities: Vec<_> = (1..=8)
            .map(|i| json!({ "id": i, "slug": format!("c{}", i), "name": format!("City {}", i) }))
            .collect();
        let builders: Vec<_> = (1..=3).map(|i| json!({ "id": i, "name": format!("B{}", i) })).collect();
        let communities: Vec<_> = (1..=9).map(|i| json!({ "id": i, "name": format!("Com {}", i) })).collect();
        let data = collections(json!({ "cities": cities, "builders": builders, "communities": communities }));

        let view = home_view(&data, 6);
        assert_eq!(view.cities.len(), 6);
        assert_eq!(view.cities[5].slug, "c6");
        assert_eq!(view.builders.len(), 3);
        assert_eq!(view.markers.len(), 9);
    }

    #[test]
    fn test_city_index_keeps_everything() {
        let data = collections(json!({ "cities": [
            { "id": 2, "slug": "tulare", "name": "Tulare" },
            { "id": 1, "slug": "visalia", "name": "Visalia" }
        ]}));
        let view = city_index_view(&data);
        assert_eq!(view.cities[0].slug, "tulare");
        assert_eq!(view.cities.len(), 2);
    }

    #[test]
    fn test_strips_leave_out_cities_without_pages() {
        let data = collections(json!({ "cities": [
            { "id": 1, "slug": "San Jose", "name": "San Jose" },
            { "id": 2, "slug": "tulare", "name": "Tulare" },
            { "id": 3, "slug": "tulare", "name": "Tulare Again" },
            { "id": 4, "slug": "visalia", "name": "Visalia" }
        ]}));

        let index: Vec<_> = city_index_view(&data).cities.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(index, vec!["2", "4"]);

        let home = home_view(&data, 1);
        assert_eq!(home.cities.len(), 1);
        assert_eq!(home.cities[0].slug, "tulare");
    }
}
