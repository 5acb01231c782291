//! Data-quality checks over the loaded collections.
//!
//! None of these stop a build. Orphaned communities still count and still
//! plot; they only lose their builder's display name.

use plat_core::{Collections, EntityId};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    DuplicateSlug { slug: String, count: usize },
    UnsafeSlug { slug: String },
    DuplicateBuilderId { id: EntityId, count: usize },
    UnknownCity { community: EntityId, city: EntityId },
    UnknownBuilder { community: EntityId, builder: EntityId },
    MissingCoordinates { community: EntityId },
}

impl Diagnostic {
    /// Broken invariants, as opposed to expected variation
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::DuplicateSlug { .. }
                | Diagnostic::UnsafeSlug { .. }
                | Diagnostic::DuplicateBuilderId { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateSlug { slug, count } => {
                write!(f, "city slug '{}' used {} times", slug, count)
            }
            Diagnostic::UnsafeSlug { slug } => write!(f, "city slug '{}' is not URL-safe", slug),
            Diagnostic::DuplicateBuilderId { id, count } => {
                write!(f, "builder id {} used {} times", id, count)
            }
            Diagnostic::UnknownCity { community, city } => {
                write!(f, "community {} references unknown city {}", community, city)
            }
            Diagnostic::UnknownBuilder { community, builder } => {
                write!(f, "community {} references unknown builder {}", community, builder)
            }
            Diagnostic::MissingCoordinates { community } => {
                write!(f, "community {} has no usable coordinates", community)
            }
        }
    }
}

/// Lowercase ASCII letters, digits and single inner hyphens
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn diagnose(collections: &Collections) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let mut slugs: Vec<(&str, usize)> = Vec::new();
    for city in &collections.cities {
        match slugs.iter_mut().find(|(s, _)| *s == city.slug) {
            Some((_, n)) => *n += 1,
            None => slugs.push((city.slug.as_str(), 1)),
        }
        if !is_url_safe_slug(&city.slug) {
            out.push(Diagnostic::UnsafeSlug {
                slug: city.slug.clone(),
            });
        }
    }
    for (slug, count) in slugs.into_iter().filter(|(_, n)| *n > 1) {
        out.push(Diagnostic::DuplicateSlug {
            slug: slug.to_string(),
            count,
        });
    }

    let mut builder_counts: HashMap<&EntityId, usize> = HashMap::new();
    for builder in &collections.builders {
        *builder_counts.entry(&builder.id).or_default() += 1;
    }
    let mut duplicates: Vec<_> = builder_counts.iter().filter(|(_, n)| **n > 1).collect();
    duplicates.sort();
    for (id, count) in duplicates {
        out.push(Diagnostic::DuplicateBuilderId {
            id: (*id).clone(),
            count: *count,
        });
    }

    let city_ids: HashSet<&EntityId> = collections.cities.iter().map(|c| &c.id).collect();
    for community in &collections.communities {
        if let Some(city) = &community.city_id {
            if !city_ids.contains(city) {
                out.push(Diagnostic::UnknownCity {
                    community: community.id.clone(),
                    city: city.clone(),
                });
            }
        }
        if let Some(builder) = &community.builder_id {
            if !builder_counts.contains_key(builder) {
                out.push(Diagnostic::UnknownBuilder {
                    community: community.id.clone(),
                    builder: builder.clone(),
                });
            }
        }
        if community.position().is_none() {
            out.push(Diagnostic::MissingCoordinates {
                community: community.id.clone(),
            });
        }
    }

    for d in out.iter().filter(|d| d.is_error()) {
        tracing::warn!("{}", d);
    }
    out
}
