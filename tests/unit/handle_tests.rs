//! Snapshot swapping under concurrent readers.

use std::sync::Arc;

use calcfind::test_utils::{item, sample_catalog, two_item_catalog};
use calcfind::{CatalogHandle, ResolverConfig, resolve};

#[test]
fn readers_keep_their_snapshot_across_reload() {
    let handle = CatalogHandle::from_items(two_item_catalog()).unwrap();
    let old = handle.snapshot();

    handle.reload(sample_catalog()).unwrap();

    assert_eq!(old.len(), 2);
    assert_eq!(handle.snapshot().len(), sample_catalog().len());
    assert!(!Arc::ptr_eq(&old, &handle.snapshot()));
    let result = resolve("gratuity", &old, &ResolverConfig::default());
    assert!(result.identifier.is_none());
}

#[test]
fn rejected_reload_leaves_active_index_serving() {
    let handle = CatalogHandle::from_items(sample_catalog()).unwrap();
    let mut items = sample_catalog();
    items.push(item("bmi-calculator", "BMI Again", "Duplicate entry", "health"));

    assert!(handle.reload(items).is_err());
    let result = resolve("mortgage", &handle.snapshot(), &ResolverConfig::default());
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
    assert_eq!(handle.generation(), 0);
}

#[test]
fn concurrent_resolution_during_swaps() {
    let handle = CatalogHandle::from_items(sample_catalog()).unwrap();
    let config = ResolverConfig::default();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = handle.snapshot();
                    let result = resolve("mortgage payments", &snapshot, &config);
                    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
                }
            });
        }
        scope.spawn(|| {
            for round in 0..10 {
                let items = if round % 2 == 0 {
                    two_item_catalog()
                } else {
                    sample_catalog()
                };
                handle.reload(items).unwrap();
            }
        });
    });

    assert_eq!(handle.generation(), 10);
}
