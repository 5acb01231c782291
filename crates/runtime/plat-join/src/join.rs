//! Foreign-key resolution and derived aggregates.

use crate::diagnose::is_url_safe_slug;
use plat_core::{Builder, City, Community, EntityId};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Label used when a community's builder is unknown
pub const UNKNOWN_BUILDER: &str = "Builder";

/// Shown when neither an explicit nor a computed count exists
pub const COUNT_PLACEHOLDER: &str = "-";

/// Linear search by slug
pub fn find_city<'a>(cities: &'a [City], slug: &str) -> Option<&'a City> {
    cities.iter().find(|c| c.slug == slug)
}

/// Split `cities` into those that get a detail page and those that do not.
///
/// A city gets a page when its slug is URL-safe and no earlier city uses
/// the same slug. Both halves keep collection order.
pub fn page_cities(cities: &[City]) -> (Vec<&City>, Vec<&City>) {
    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for city in cities {
        if is_url_safe_slug(&city.slug) && seen.insert(city.slug.as_str()) {
            pages.push(city);
        } else {
            skipped.push(city);
        }
    }
    (pages, skipped)
}

/// Communities located in `city`, in collection order
pub fn communities_for_city<'a>(communities: &'a [Community], city: &City) -> Vec<&'a Community> {
    communities
        .iter()
        .filter(|c| c.city_id.as_ref() == Some(&city.id))
        .collect()
}

/// Display name of a builder, or [`UNKNOWN_BUILDER`]
pub fn builder_name<'a>(builders: &'a [Builder], id: Option<&EntityId>) -> &'a str {
    id.and_then(|id| builders.iter().find(|b| &b.id == id))
        .map(|b| b.name.as_str())
        .unwrap_or(UNKNOWN_BUILDER)
}

/// Communities of one builder within a city
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderGroup<'a> {
    pub builder_id: Option<&'a EntityId>,
    pub builder: Option<&'a Builder>,
    pub communities: Vec<&'a Community>,
}

impl<'a> BuilderGroup<'a> {
    pub fn name(&self) -> &'a str {
        self.builder
            .map(|b| b.name.as_str())
            .unwrap_or(UNKNOWN_BUILDER)
    }

    pub fn is_orphaned(&self) -> bool {
        self.builder.is_none()
    }
}

/// Partition communities by `builderId`.
///
/// Groups are ordered by builder id (numeric ids ascending, then text ids
/// lexically); communities without a builder id form the last group.
/// Members keep their input order.
pub fn group_by_builder<'a>(
    communities: &[&'a Community],
    builders: &'a [Builder],
) -> Vec<BuilderGroup<'a>> {
    // First builder wins on a repeated id, same as builder_name
    let mut by_id: HashMap<&EntityId, &Builder> = HashMap::new();
    for builder in builders {
        by_id.entry(&builder.id).or_insert(builder);
    }

    let mut groups: Vec<BuilderGroup<'a>> = Vec::new();
    for &community in communities {
        let key = community.builder_id.as_ref();
        match groups.iter_mut().find(|g| g.builder_id == key) {
            Some(group) => group.communities.push(community),
            None => groups.push(BuilderGroup {
                builder_id: key,
                builder: key.and_then(|id| by_id.get(id).copied()),
                communities: vec![community],
            }),
        }
    }

    groups.sort_by(|a, b| {
        (a.builder_id.is_none(), a.builder_id).cmp(&(b.builder_id.is_none(), b.builder_id))
    });
    groups
}

/// A statistic with explicit → computed → placeholder precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Taken from the City record
    Explicit(u64),
    /// Derived from the filtered communities
    Computed(u64),
    /// Neither available
    Placeholder,
}

impl Count {
    pub fn value(&self) -> Option<u64> {
        match self {
            Count::Explicit(n) | Count::Computed(n) => Some(*n),
            Count::Placeholder => None,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(n) => write!(f, "{}", n),
            None => f.write_str(COUNT_PLACEHOLDER),
        }
    }
}

/// Explicit value wins; the computed value is used only for a non-empty set.
pub fn derive_count(explicit: Option<u64>, computed: usize) -> Count {
    match explicit {
        Some(n) => Count::Explicit(n),
        None if computed > 0 => Count::Computed(computed as u64),
        None => Count::Placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builders() -> Vec<Builder> {
        vec![Builder::new(5, "Lennar"), Builder::new(2, "KB Home")]
    }

    #[test]
    fn test_find_city_by_slug() {
        let cities = vec![City::new(1, "visalia", "Visalia"), City::new(2, "tulare", "Tulare")];
        assert_eq!(find_city(&cities, "tulare").map(|c| c.name.as_str()), Some("Tulare"));
        assert!(find_city(&cities, "fresno").is_none());
    }

    #[test]
    fn test_filter_preserves_order() {
        let city = City::new(1, "visalia", "Visalia");
        let communities = vec![
            Community::new(3, "C").in_city(1),
            Community::new(1, "A").in_city(2),
            Community::new(2, "B").in_city(1),
            Community::new(4, "D"),
        ];
        let names: Vec<_> = communities_for_city(&communities, &city)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn test_filter_is_type_strict() {
        let city = City::new(1, "visalia", "Visalia");
        let communities = vec![Community::new(1, "Text id").in_city("1")];
        assert!(communities_for_city(&communities, &city).is_empty());
    }

    #[test]
    fn test_builder_name_fallback() {
        let builders = builders();
        assert_eq!(builder_name(&builders, Some(&EntityId::Num(5))), "Lennar");
        assert_eq!(builder_name(&builders, Some(&EntityId::Num(99))), "Builder");
        assert_eq!(builder_name(&builders, None), "Builder");
        assert_eq!(builder_name(&[], Some(&EntityId::Num(5))), "Builder");
    }

    #[test]
    fn test_group_order_is_by_builder_id() {
        let builders = builders();
        let communities = vec![
            Community::new(1, "Oakview").by_builder(5),
            Community::new(2, "Loose"),
            Community::new(3, "Orchard").by_builder("z-builder"),
            Community::new(4, "Willow").by_builder(2),
            Community::new(5, "Cedar").by_builder(5),
            Community::new(6, "Aspen").by_builder(10),
        ];
        let refs: Vec<&Community> = communities.iter().collect();
        let groups = group_by_builder(&refs, &builders);

        let keys: Vec<String> = groups
            .iter()
            .map(|g| g.builder_id.map(|id| id.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(keys, vec!["2", "5", "10", "z-builder", ""]);

        let lennar: Vec<_> = groups[1].communities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(lennar, vec!["Oakview", "Cedar"]);
        assert_eq!(groups[1].name(), "Lennar");
        assert_eq!(groups[2].name(), "Builder");
        assert!(groups[2].is_orphaned());
        assert!(groups[4].is_orphaned());
    }

    #[test]
    fn test_repeated_builder_id_uses_first() {
        let builders = vec![Builder::new(5, "First"), Builder::new(5, "Second")];
        let communities = vec![Community::new(1, "Oakview").by_builder(5)];
        let refs: Vec<&Community> = communities.iter().collect();
        let groups = group_by_builder(&refs, &builders);

        assert_eq!(groups[0].name(), "First");
        assert_eq!(groups[0].name(), builder_name(&builders, Some(&EntityId::Num(5))));
    }

    #[test]
    fn test_page_cities_split() {
        let cities = vec![
            City::new(1, "visalia", "Visalia"),
            City::new(2, "San Jose", "San Jose"),
            City::new(3, "visalia", "Visalia Again"),
            City::new(4, "tulare", "Tulare"),
        ];
        let (pages, skipped) = page_cities(&cities);
        let pages: Vec<_> = pages.iter().map(|c| c.name.as_str()).collect();
        let skipped: Vec<_> = skipped.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(pages, vec!["Visalia", "Tulare"]);
        assert_eq!(skipped, vec!["San Jose", "Visalia Again"]);
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_by_builder(&[], &builders()).is_empty());
    }

    #[test]
    fn test_count_precedence() {
        assert_eq!(derive_count(None, 3), Count::Computed(3));
        assert_eq!(derive_count(Some(10), 3), Count::Explicit(10));
        assert_eq!(derive_count(Some(0), 3), Count::Explicit(0));
        assert_eq!(derive_count(None, 0), Count::Placeholder);
        assert_eq!(derive_count(None, 0).to_string(), "-");
        assert_eq!(derive_count(Some(10), 0).to_string(), "10");
    }
}
