//! Calculator catalog
//!
//! Holds the fixed set of discoverable calculators and the derived,
//! read-only index the resolver scores against.
//!
//! ## Layout
//!
//! - [`CatalogItem`]: one calculator (identifier, name, description,
//!   category, keywords)
//! - [`tokenize`]: the normalization rule shared by items and queries
//! - [`CatalogIndex`]: per-item token sets plus an inverted token map
//! - [`CatalogHandle`]: the active index, swapped atomically on reload
//! - [`source`]: reads catalog snapshots from JSON, YAML or TOML files

pub mod handle;
pub mod index;
pub mod item;
pub mod source;
pub mod tokenize;

pub use handle::CatalogHandle;
pub use index::{CatalogIndex, IndexedItem};
pub use item::CatalogItem;
pub use source::{CatalogFormat, load_catalog, parse_catalog};
pub use tokenize::{STOP_WORDS, is_stop_word, normalize, tokenize};
