//! Holder for the current collection

use crate::error::{Result, TidyError};
use crate::model::ParsedCatalog;
use std::sync::{Arc, RwLock};

/// The single "current" collection, swapped wholesale on each successful parse
///
/// Readers get an `Arc` snapshot, so they always see either the old or the
/// new collection in full.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<ParsedCatalog>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current collection
    pub fn current(&self) -> Result<Arc<ParsedCatalog>> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone().ok_or(TidyError::NoCollectionLoaded)
    }

    /// Make `catalog` the current collection and return it
    pub fn replace(&self, catalog: ParsedCatalog) -> Arc<ParsedCatalog> {
        let catalog = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Arc::clone(&catalog));
        catalog
    }
}
