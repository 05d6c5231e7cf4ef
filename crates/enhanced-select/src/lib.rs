//! State engine for an enhanced multi/single selection control.
//!
//! Models the full lifecycle of a searchable, groupable, checkbox-driven
//! select: a flattened option catalog, a case-insensitive text filter with
//! debounce support, per-item and bulk selection operations, derived
//! select-all and group aggregates, and a human-readable selection summary.
//! Rendering and input handling are the host's job; this crate owns only
//! the state and keeps every derived piece consistent through a single
//! reconciliation path.
//!
//! # Example
//!
//! ```
//! use enhanced_select::prelude::*;
//!
//! let mut select = EnhancedSelect::new(
//!     &[
//!         SourceEntry::option("r", "Red"),
//!         SourceEntry::group(
//!             "Cool",
//!             vec![
//!                 SourceEntry::option("b", "Blue"),
//!                 SourceEntry::option("g", "Green"),
//!             ],
//!         ),
//!     ],
//!     SelectConfig::multiple(),
//! );
//!
//! select.filter("e");
//! select.select_all(false);
//! println!("{}", select.placeholder().text);
//! ```

pub mod catalog;
pub mod config;
pub mod filter;
pub mod select;
pub mod summary;

pub use catalog::{
    Catalog, CatalogEntry, Group, GroupId, Item, ItemId, OptionDescriptor, SourceEntry,
};
pub use config::{SelectConfig, COUNT_TOKEN, TOTAL_TOKEN};
pub use filter::{FilterState, SearchDebouncer};
pub use select::{
    EnhancedSelect, GroupAggregate, GroupView, ItemView, SelectAllView, SelectSignals,
    SelectValue,
};
pub use summary::{placeholder_text, selection_summary, PlaceholderText, SelectionSummary};

/// Convenience re-exports for the common case.
pub mod prelude {
    pub use crate::catalog::{GroupId, ItemId, OptionDescriptor, SourceEntry};
    pub use crate::config::SelectConfig;
    pub use crate::filter::SearchDebouncer;
    pub use crate::select::{EnhancedSelect, SelectValue};
    pub use crate::summary::{PlaceholderText, SelectionSummary};
}
