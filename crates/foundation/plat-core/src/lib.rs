//! # plat-core
//!
//! Read-only data model shared by every plat crate.
//!
//! ```text
//! City 1──N Community N──1 Builder
//!   id  ◄── cityId  builderId ──► id
//! ```
//!
//! Entities are deserialized straight from the three JSON collections and
//! never mutated afterwards.

pub mod model;

pub use model::{
    Builder, City, CityStats, CollectionKind, Collections, Community, EntityId, GeoPoint,
};

/// Result type for plat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading and rendering the site
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Fetch failed for {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Parse failed for {kind} collection: {reason}")]
    Parse { kind: CollectionKind, reason: String },

    #[error("Skipped {kind} record {index}: {reason}")]
    Record {
        kind: CollectionKind,
        index: usize,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures the loader absorbs instead of returning: an empty
    /// collection, or a single dropped record.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. } | Error::Parse { .. } | Error::Record { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_and_parse_are_degradable() {
        let fetch = Error::Fetch {
            path: "/data/cities.json".into(),
            reason: "HTTP 404".into(),
        };
        let parse = Error::Parse {
            kind: CollectionKind::Builders,
            reason: "expected value".into(),
        };
        assert!(fetch.is_degradable());
        assert!(parse.is_degradable());
        assert!(!Error::NotFound("visalia".into()).is_degradable());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::Parse {
            kind: CollectionKind::Communities,
            reason: "eof".into(),
        };
        assert_eq!(err.to_string(), "Parse failed for communities collection: eof");

        let err = Error::Record {
            kind: CollectionKind::Cities,
            index: 1,
            reason: "missing field `name`".into(),
        };
        assert!(err.is_degradable());
        assert_eq!(err.to_string(), "Skipped cities record 1: missing field `name`");
    }
}
