//! Active catalog snapshot with atomic replacement.
//!
//! Readers take an `Arc<CatalogIndex>` and keep using it for as long as they
//! like; a reload builds the new index outside the lock and swaps the pointer
//! in one write. A failed build never touches the active snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::catalog::index::CatalogIndex;
use crate::catalog::item::CatalogItem;
use crate::error::Result;

#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogIndex>>,
    generation: AtomicU64,
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(CatalogIndex::default())
    }
}

impl CatalogHandle {
    pub fn new(index: CatalogIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
            generation: AtomicU64::new(0),
        }
    }

    /// Build an index from `items` and make it the active snapshot.
    pub fn from_items<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogItem>,
    {
        Ok(Self::new(CatalogIndex::build(items)?))
    }

    /// The active snapshot.
    pub fn snapshot(&self) -> Arc<CatalogIndex> {
        let guard = self.current.read();
        Arc::clone(&*guard)
    }

    /// Number of successful swaps since creation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Rebuild from a new item set and swap it in.
    ///
    /// On a construction error the previous index stays active and the
    /// generation is unchanged.
    pub fn reload<I>(&self, items: I) -> Result<Arc<CatalogIndex>>
    where
        I: IntoIterator<Item = CatalogItem>,
    {
        let index = match CatalogIndex::build(items) {
            Ok(index) => index,
            Err(err) => {
                tracing::warn!(error = %err, "catalog reload rejected; keeping previous index");
                return Err(err);
            }
        };
        Ok(self.replace(index))
    }

    /// Swap in an already-built index, returning it.
    pub fn replace(&self, index: CatalogIndex) -> Arc<CatalogIndex> {
        let fresh = Arc::new(index);
        let previous = {
            let mut guard = self.current.write();
            std::mem::replace(&mut *guard, Arc::clone(&fresh))
        };
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::info!(
            generation,
            items = fresh.len(),
            previous_items = previous.len(),
            fingerprint = %fresh.fingerprint(),
            "catalog index swapped"
        );
        fresh
    }
}
