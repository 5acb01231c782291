//! Cities, builders and communities as they appear in the JSON collections.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a record: a JSON number or a JSON string.
///
/// Matching is strict, so `1` and `"1"` never refer to the same record.
/// Ordering puts numeric ids first (ascending), then text ids (lexical).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Num(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        EntityId::Num(n.into())
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<u64>,
}

/// A city landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: EntityId,
    /// URL path segment, unique across the collection
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub builders_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub communities_count: Option<u64>,
    #[serde(default)]
    pub stats: Option<CityStats>,
    #[serde(default)]
    pub center: Option<GeoPoint>,
}

impl City {
    /// Minimal city, used by fixtures and tests.
    pub fn new(id: impl Into<EntityId>, slug: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            slug: slug.to_string(),
            name: name.to_string(),
            tagline: None,
            hero_image: None,
            thumb: None,
            tags: Vec::new(),
            price_range: None,
            builders_count: None,
            communities_count: None,
            stats: None,
            center: None,
        }
    }

    pub fn tagline(&self) -> Option<&str> {
        non_empty(&self.tagline)
    }

    pub fn hero_image(&self) -> Option<&str> {
        non_empty(&self.hero_image)
    }

    pub fn thumb(&self) -> Option<&str> {
        non_empty(&self.thumb)
    }

    pub fn price_range(&self) -> Option<&str> {
        non_empty(&self.price_range)
    }

    pub fn population(&self) -> Option<u64> {
        self.stats.as_ref().and_then(|s| s.population)
    }

    /// Tags with blank entries removed, original order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}

/// A home builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Builder {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Builder {
    pub fn new(id: impl Into<EntityId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            logo: None,
        }
    }

    pub fn logo(&self) -> Option<&str> {
        non_empty(&self.logo)
    }
}

/// A community (subdivision) built by one builder in one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub city_id: Option<EntityId>,
    #[serde(default)]
    pub builder_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lng: Option<f64>,
}

impl Community {
    pub fn new(id: impl Into<EntityId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            city_id: None,
            builder_id: None,
            status: None,
            lat: None,
            lng: None,
        }
    }

    pub fn in_city(mut self, city_id: impl Into<EntityId>) -> Self {
        self.city_id = Some(city_id.into());
        self
    }

    pub fn by_builder(mut self, builder_id: impl Into<EntityId>) -> Self {
        self.builder_id = Some(builder_id.into());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn status(&self) -> Option<&str> {
        non_empty(&self.status)
    }

    /// Both coordinates, when present and finite.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint { lat, lng })
            }
            _ => None,
        }
    }
}

/// The three collections loaded for one controller run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub cities: Vec<City>,
    pub builders: Vec<Builder>,
    pub communities: Vec<Community>,
}

/// Which collection a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Cities,
    Builders,
    Communities,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Cities,
        CollectionKind::Builders,
        CollectionKind::Communities,
    ];

    /// Top-level key of the JSON envelope
    pub fn key(&self) -> &'static str {
        match self {
            CollectionKind::Cities => "cities",
            CollectionKind::Builders => "builders",
            CollectionKind::Communities => "communities",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            CollectionKind::Cities => "/data/cities.json",
            CollectionKind::Builders => "/data/builders.json",
            CollectionKind::Communities => "/data/communities.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `null` reads as an empty list
fn nullable_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Non-negative integers, also when written as a string. Anything else is
/// treated as absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        other => other.as_u64(),
    }))
}

/// Accepts any JSON value; only numbers become coordinates.
fn lenient_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}
