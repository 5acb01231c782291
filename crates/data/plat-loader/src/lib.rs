//! Data Loader
//!
//! Fetches the three collections concurrently. Each collection is isolated:
//! a fetch or parse failure turns that collection into an empty sequence and
//! the other two still load. Inside a collection each record is isolated
//! too: a record that does not deserialize is dropped on its own.

pub mod source;

pub use source::{DataSource, DirSource, HttpSource, MemorySource};

use plat_config::{DataConfig, DataLocation};
use plat_core::{Builder, City, CollectionKind, Collections, Community, Error, Result};
use serde::de::DeserializeOwned;

/// Outcome of [`load_collections`]: the data plus everything that was
/// dropped on the way
#[derive(Debug, Default)]
pub struct LoadReport {
    pub collections: Collections,
    /// One entry per collection that loaded empty
    pub failures: Vec<Error>,
    /// Collections behind `failures`
    pub degraded: Vec<CollectionKind>,
    /// Individual records skipped inside otherwise loaded collections
    pub rejected: Vec<Error>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.rejected.is_empty()
    }

    /// True when `kind` could not be fetched or parsed at all, as opposed
    /// to loading legitimately empty.
    pub fn is_degraded(&self, kind: CollectionKind) -> bool {
        self.degraded.contains(&kind)
    }

    fn absorb<T>(&mut self, kind: CollectionKind, loaded: Result<ParsedCollection<T>>) -> Vec<T> {
        match loaded {
            Ok(parsed) => {
                tracing::debug!("Loaded {} {}", parsed.items.len(), kind);
                self.rejected.extend(parsed.rejected);
                parsed.items
            }
            Err(e) => {
                tracing::warn!("Using empty {} collection: {}", kind, e);
                self.failures.push(e);
                self.degraded.push(kind);
                Vec::new()
            }
        }
    }
}

/// Records of one collection, plus the ones that were skipped
#[derive(Debug)]
pub struct ParsedCollection<T> {
    pub items: Vec<T>,
    pub rejected: Vec<Error>,
}

impl<T> ParsedCollection<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Build the configured data source
pub fn source_for(config: &DataConfig) -> Result<Box<dyn DataSource>> {
    Ok(match config.source() {
        DataLocation::Dir(root) => Box::new(DirSource::new(root)),
        DataLocation::Http(url) => Box::new(HttpSource::new(&url)?),
    })
}

/// Parse one collection envelope. A missing or `null` top-level key yields
/// an empty sequence. Records are deserialized one at a time and a bad one
/// is skipped without affecting its siblings.
pub fn parse_collection<T: DeserializeOwned>(
    kind: CollectionKind,
    bytes: &[u8],
) -> Result<ParsedCollection<T>> {
    let mut envelope: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| Error::Parse {
            kind,
            reason: e.to_string(),
        })?;

    let records = match envelope.get_mut(kind.key()) {
        None | Some(serde_json::Value::Null) => return Ok(ParsedCollection::empty()),
        Some(serde_json::Value::Array(records)) => std::mem::take(records),
        Some(_) => {
            return Err(Error::Parse {
                kind,
                reason: format!("\"{}\" is not an array", kind.key()),
            })
        }
    };

    let mut parsed = ParsedCollection::empty();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value(record) {
            Ok(item) => parsed.items.push(item),
            Err(e) => {
                let err = Error::Record {
                    kind,
                    index,
                    reason: e.to_string(),
                };
                tracing::warn!("{}", err);
                parsed.rejected.push(err);
            }
        }
    }
    Ok(parsed)
}

async fn load_one<T: DeserializeOwned>(
    source: &dyn DataSource,
    kind: CollectionKind,
    path: &str,
) -> Result<ParsedCollection<T>> {
    let bytes = source.fetch(path).await?;
    parse_collection(kind, &bytes)
}

/// Fetch and parse cities, builders and communities concurrently.
///
/// Never fails; degraded collections are listed in [`LoadReport::failures`].
pub async fn load_collections(source: &dyn DataSource, paths: &DataConfig) -> LoadReport {
    tracing::info!("Loading collections from {}", source.describe());

    let (cities, builders, communities) = futures::future::join3(
        load_one::<City>(source, CollectionKind::Cities, paths.path(CollectionKind::Cities)),
        load_one::<Builder>(source, CollectionKind::Builders, paths.path(CollectionKind::Builders)),
        load_one::<Community>(
            source,
            CollectionKind::Communities,
            paths.path(CollectionKind::Communities),
        ),
    )
    .await;

    let mut report = LoadReport::default();
    report.collections.cities = report.absorb(CollectionKind::Cities, cities);
    report.collections.builders = report.absorb(CollectionKind::Builders, builders);
    report.collections.communities = report.absorb(CollectionKind::Communities, communities);
    report
}
