//! The selection engine: state mutation and reconciliation.
//!
//! [`EnhancedSelect`] owns one control instance's catalog, filter state,
//! and configuration. Every mutating operation funnels through the
//! reconciler, which recomputes the select-all and per-group helper
//! checkboxes, the selection summary, and the authoritative value, then
//! emits a `change` notification. That single choke point is what keeps
//! checked state, aggregates, and the externally observable value from
//! ever diverging.
//!
//! # Example
//!
//! ```
//! use enhanced_select::{EnhancedSelect, SelectConfig, SourceEntry};
//!
//! let mut select = EnhancedSelect::new(
//!     &[
//!         SourceEntry::option("r", "Red"),
//!         SourceEntry::option("b", "Blue"),
//!     ],
//!     SelectConfig::multiple(),
//! );
//!
//! select.signals.change.connect(|value| {
//!     println!("value is now {:?}", value);
//! });
//!
//! select.select_all(false);
//! assert_eq!(select.placeholder().text, "All selected");
//! ```

use slotmap::SecondaryMap;

use enhanced_select_core::Signal;

use crate::catalog::{Catalog, CatalogEntry, GroupId, ItemId, SourceEntry};
use crate::config::SelectConfig;
use crate::filter::FilterState;
use crate::summary::{placeholder_text, selection_summary, PlaceholderText, SelectionSummary};

/// The authoritative underlying value of the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectValue {
    /// Every item is selected and a sentinel is configured; the sentinel
    /// stands in for the explicit list.
    Sentinel(String),
    /// The checked item values, in display order.
    Values(Vec<String>),
}

impl SelectValue {
    /// The explicit value list, if this is not the sentinel form.
    pub fn as_values(&self) -> Option<&[String]> {
        match self {
            Self::Values(values) => Some(values),
            Self::Sentinel(_) => None,
        }
    }
}

/// Notifications emitted by the engine.
///
/// The bulk-action signals (`select_all`, `unselect_all`, `select_group`,
/// `unselect_group`) fire *before* the corresponding mutation is applied;
/// `change` fires after reconciliation with the new authoritative value.
pub struct SelectSignals {
    /// The authoritative value changed.
    pub change: Signal<SelectValue>,
    /// A select-all is about to be applied.
    pub select_all: Signal<()>,
    /// An unselect-all is about to be applied.
    pub unselect_all: Signal<()>,
    /// A group is about to be selected.
    pub select_group: Signal<GroupId>,
    /// A group is about to be unselected.
    pub unselect_group: Signal<GroupId>,
}

impl SelectSignals {
    fn new() -> Self {
        Self {
            change: Signal::new(),
            select_all: Signal::new(),
            unselect_all: Signal::new(),
            select_group: Signal::new(),
            unselect_group: Signal::new(),
        }
    }
}

/// Derived checked-state aggregate of a group, over its currently visible
/// and enabled children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAggregate {
    /// Every relevant child is checked.
    pub all_checked: bool,
    /// No relevant child is checked.
    pub none_checked: bool,
    /// Some but not all relevant children are checked.
    pub some_checked: bool,
}

/// Render-facing snapshot of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// The item id.
    pub id: ItemId,
    /// The underlying value.
    pub value: String,
    /// The display label.
    pub label: String,
    /// The owning group, if any.
    pub group: Option<GroupId>,
    /// Whether the item can be toggled.
    pub enabled: bool,
    /// Whether the item is checked.
    pub checked: bool,
    /// Whether the item is visible under the active filter.
    pub visible: bool,
}

/// Render-facing snapshot of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    /// The group id.
    pub id: GroupId,
    /// The group label.
    pub label: String,
    /// Whether the group toggle is enabled.
    pub enabled: bool,
    /// The group checkbox state (maintained by the reconciler).
    pub checked: bool,
    /// Whether the group is visible under the active filter.
    pub visible: bool,
    /// Whether the group carries a toggle at all. In single-selection mode
    /// groups are inert headers.
    pub selectable: bool,
    /// Aggregate over the group's visible enabled children.
    pub aggregate: GroupAggregate,
}

/// Render-facing snapshot of the select-all control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAllView {
    /// Whether the control should be shown at all.
    pub visible: bool,
    /// The select-all checkbox state (maintained by the reconciler).
    pub checked: bool,
    /// The configured label.
    pub text: String,
}

/// An enhanced multi/single selection control's state engine.
///
/// Owns the catalog, filter state, and selection state of one control
/// instance, exclusively. Single-threaded and synchronous: every operation
/// runs to completion before the next, and no locking is involved.
pub struct EnhancedSelect {
    config: SelectConfig,
    catalog: Catalog,
    filter: FilterState,
    /// Whether the dropdown is open; flips aggregate scoping between
    /// filter-scoped (open) and unscoped (closed).
    open: bool,
    /// Whether any enabled item is visible under the active filter.
    has_matches: bool,
    select_all_checked: bool,
    group_checked: SecondaryMap<GroupId, bool>,
    summary: SelectionSummary,
    placeholder: PlaceholderText,
    value: SelectValue,
    /// Notification signals.
    pub signals: SelectSignals,
}

impl EnhancedSelect {
    /// Builds the engine from a source option list.
    ///
    /// No `change` is emitted for the initial reconciliation.
    pub fn new(source: &[SourceEntry], config: SelectConfig) -> Self {
        let mut select = Self {
            config,
            catalog: Catalog::default(),
            filter: FilterState::default(),
            open: false,
            has_matches: false,
            select_all_checked: false,
            group_checked: SecondaryMap::new(),
            summary: SelectionSummary::default(),
            placeholder: PlaceholderText::default(),
            value: SelectValue::Values(Vec::new()),
            signals: SelectSignals::new(),
        };
        select.refresh(source);
        select
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The configuration supplied at construction.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Whether the dropdown is open (see [`set_open`](Self::set_open)).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current authoritative value.
    pub fn value(&self) -> &SelectValue {
        &self.value
    }

    /// The current selection summary.
    pub fn summary(&self) -> &SelectionSummary {
        &self.summary
    }

    /// The current placeholder text.
    pub fn placeholder(&self) -> &PlaceholderText {
        &self.placeholder
    }

    /// Whether an item is checked. Unknown ids read as unchecked.
    pub fn is_checked(&self, id: ItemId) -> bool {
        self.catalog.item(id).is_some_and(|item| item.checked)
    }

    /// The select-all checkbox state.
    pub fn is_select_all_checked(&self) -> bool {
        self.select_all_checked
    }

    /// A group's checkbox state. Unknown ids read as unchecked.
    pub fn is_group_checked(&self, id: GroupId) -> bool {
        self.group_checked.get(id).copied().unwrap_or(false)
    }

    /// Whether the no-matches indicator should be shown. True for an empty
    /// catalog regardless of filter text.
    pub fn no_matches_visible(&self) -> bool {
        !self.has_matches
    }

    /// The checked item values, in display order.
    pub fn checked_values(&self) -> Vec<String> {
        self.catalog
            .iter_items()
            .filter(|(_, item)| item.checked)
            .map(|(_, item)| item.value.clone())
            .collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Rebuilds the catalog from a possibly-changed source list.
    ///
    /// All prior catalog state is discarded, checked flags included, and
    /// the active filter is cleared. No `change` is emitted; use
    /// [`checked_values`](Self::checked_values) /
    /// [`restore_checked`](Self::restore_checked) to carry selection across
    /// a rebuild.
    pub fn refresh(&mut self, source: &[SourceEntry]) {
        self.catalog = Catalog::build(source);
        self.group_checked.clear();
        self.has_matches = self.filter.clear(&self.catalog);
        self.reconcile(false);
    }

    /// Sets one item's checked state.
    ///
    /// A disabled or unknown item is a silent no-op. In single-selection
    /// mode, checking an item unchecks every other enabled item; unchecking
    /// the sole checked item is allowed and leaves none checked.
    pub fn set_item_checked(&mut self, id: ItemId, checked: bool) {
        match self.catalog.item(id) {
            None => return,
            Some(item) if !item.enabled => {
                tracing::trace!(target: "enhanced_select::select", ?id, "ignoring toggle of disabled item");
                return;
            }
            Some(_) => {}
        }

        if checked && !self.config.multiple {
            for other in self.catalog.item_ids() {
                if other == id {
                    continue;
                }
                if let Some(item) = self.catalog.item_mut(other) {
                    if item.enabled {
                        item.checked = false;
                    }
                }
            }
        }

        if let Some(item) = self.catalog.item_mut(id) {
            item.checked = checked;
        }
        self.reconcile(true);
    }

    /// Checks every enabled item.
    ///
    /// With `ignore_filter` false (the behavior of the visible select-all
    /// control), only currently visible items are affected.
    pub fn select_all(&mut self, ignore_filter: bool) {
        self.signals.select_all.emit(());
        self.update_checks(true, ignore_filter, None);
    }

    /// Unchecks every enabled item, with the same filter scoping as
    /// [`select_all`](Self::select_all).
    pub fn unselect_all(&mut self, ignore_filter: bool) {
        self.signals.unselect_all.emit(());
        self.update_checks(false, ignore_filter, None);
    }

    /// Checks a group's enabled items.
    ///
    /// With `ignore_filter` false, items hidden by the active filter are
    /// left untouched: toggling a group during a search never affects what
    /// the user cannot see. A silent no-op in single-selection mode.
    pub fn select_group(&mut self, id: GroupId, ignore_filter: bool) {
        if !self.config.multiple {
            tracing::trace!(target: "enhanced_select::select", ?id, "ignoring group select in single mode");
            return;
        }
        if self.catalog.group(id).is_none() {
            return;
        }
        self.signals.select_group.emit(id);
        self.update_checks(true, ignore_filter, Some(id));
    }

    /// Unchecks a group's enabled items, with the same scoping as
    /// [`select_group`](Self::select_group).
    pub fn unselect_group(&mut self, id: GroupId, ignore_filter: bool) {
        if !self.config.multiple {
            tracing::trace!(target: "enhanced_select::select", ?id, "ignoring group unselect in single mode");
            return;
        }
        if self.catalog.group(id).is_none() {
            return;
        }
        self.signals.unselect_group.emit(id);
        self.update_checks(false, ignore_filter, Some(id));
    }

    /// Applies a text filter and recomputes the helper checkboxes.
    ///
    /// Checked state is untouched, so no `change` is emitted. Returns
    /// whether any enabled item remains visible (false means the host
    /// should show the no-matches indicator).
    pub fn filter(&mut self, query: &str) -> bool {
        self.has_matches = self.filter.apply(&self.catalog, query);
        self.update_helper_checks();
        self.has_matches
    }

    /// Sets the dropdown-open flag.
    ///
    /// Opening clears the filter, mirroring a dropdown resetting its search
    /// box. Both directions recompute the helper checkboxes, since their
    /// scoping flips between filter-scoped (open) and unscoped (closed).
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.has_matches = self.filter.clear(&self.catalog);
        }
        self.open = open;
        self.update_helper_checks();
    }

    /// Programmatically restores a previously captured selection.
    ///
    /// Every item whose value appears in `values` becomes checked, all
    /// others unchecked. Unlike user actions this applies to disabled items
    /// too. Reconciles silently.
    pub fn restore_checked<S: AsRef<str>>(&mut self, values: &[S]) {
        let wanted: std::collections::HashSet<&str> =
            values.iter().map(AsRef::as_ref).collect();
        for id in self.catalog.item_ids() {
            if let Some(item) = self.catalog.item_mut(id) {
                item.checked = wanted.contains(item.value.as_str());
            }
        }
        self.reconcile(false);
    }

    // =========================================================================
    // Render snapshots
    // =========================================================================

    /// Snapshot of one item.
    pub fn item_view(&self, id: ItemId) -> Option<ItemView> {
        let item = self.catalog.item(id)?;
        Some(ItemView {
            id,
            value: item.value.clone(),
            label: item.label.clone(),
            group: item.group,
            enabled: item.enabled,
            checked: item.checked,
            visible: self.filter.is_item_visible(id),
        })
    }

    /// Snapshots of every item, in display order.
    pub fn item_views(&self) -> Vec<ItemView> {
        self.catalog
            .item_ids()
            .into_iter()
            .filter_map(|id| self.item_view(id))
            .collect()
    }

    /// Snapshots of every group, in display order.
    pub fn group_views(&self) -> Vec<GroupView> {
        self.catalog
            .group_ids()
            .into_iter()
            .filter_map(|id| {
                let group = self.catalog.group(id)?;
                Some(GroupView {
                    id,
                    label: group.label.clone(),
                    enabled: group.enabled,
                    checked: self.is_group_checked(id),
                    visible: self.filter.is_group_visible(id),
                    selectable: self.config.multiple,
                    aggregate: self.group_aggregate(id),
                })
            })
            .collect()
    }

    /// Snapshot of the select-all control.
    ///
    /// Hidden in single mode, when disabled by configuration, for an empty
    /// catalog, and when the filter leaves no enabled item visible.
    pub fn select_all_view(&self) -> SelectAllView {
        SelectAllView {
            visible: self.config.select_all
                && self.config.multiple
                && !self.catalog.is_empty()
                && self.has_matches,
            checked: self.select_all_checked,
            text: self.config.select_all_text.clone(),
        }
    }

    /// A group's checked-state aggregate over its visible enabled children.
    pub fn group_aggregate(&self, id: GroupId) -> GroupAggregate {
        let mut total = 0usize;
        let mut checked = 0usize;
        if let Some(group) = self.catalog.group(id) {
            for &item_id in group.items() {
                let Some(item) = self.catalog.item(item_id) else {
                    continue;
                };
                if !item.enabled || !self.filter.is_item_visible(item_id) {
                    continue;
                }
                total += 1;
                if item.checked {
                    checked += 1;
                }
            }
        }
        GroupAggregate {
            all_checked: checked == total,
            none_checked: checked == 0,
            some_checked: checked > 0 && checked < total,
        }
    }

    // =========================================================================
    // Internal: the reconciler
    // =========================================================================

    /// Bulk checked-flag update shared by the select-all and group
    /// operations. Skips disabled items always, and hidden items unless
    /// `ignore_filter`.
    fn update_checks(&mut self, check: bool, ignore_filter: bool, group: Option<GroupId>) {
        let ids: Vec<ItemId> = match group {
            Some(group_id) => self
                .catalog
                .group(group_id)
                .map(|g| g.items().to_vec())
                .unwrap_or_default(),
            None => self.catalog.item_ids(),
        };

        for id in ids {
            if !ignore_filter && !self.filter.is_item_visible(id) {
                continue;
            }
            if let Some(item) = self.catalog.item_mut(id) {
                if item.enabled {
                    item.checked = check;
                }
            }
        }
        self.reconcile(true);
    }

    /// Recomputes the select-all and per-group checkbox states.
    ///
    /// The relevant set is the enabled items, restricted to the visible
    /// ones while the dropdown is open. A checkbox is checked iff every
    /// relevant item under it is checked.
    fn update_helper_checks(&mut self) {
        let mut relevant = 0usize;
        let mut relevant_checked = 0usize;
        for (id, item) in self.catalog.iter_items() {
            if !item.enabled {
                continue;
            }
            if self.open && !self.filter.is_item_visible(id) {
                continue;
            }
            relevant += 1;
            if item.checked {
                relevant_checked += 1;
            }
        }
        self.select_all_checked = relevant == relevant_checked;

        let mut group_checked = SecondaryMap::new();
        for group_id in self.catalog.group_ids() {
            let Some(group) = self.catalog.group(group_id) else {
                continue;
            };
            let mut total = 0usize;
            let mut checked = 0usize;
            for &id in group.items() {
                let Some(item) = self.catalog.item(id) else {
                    continue;
                };
                if !item.enabled {
                    continue;
                }
                if self.open && !self.filter.is_item_visible(id) {
                    continue;
                }
                total += 1;
                if item.checked {
                    checked += 1;
                }
            }
            group_checked.insert(group_id, total == checked);
        }
        self.group_checked = group_checked;
    }

    /// Restores consistency after a mutation: helper checkboxes, summary,
    /// placeholder text, authoritative value, then (unless suppressed) the
    /// `change` notification.
    fn reconcile(&mut self, notify: bool) {
        self.update_helper_checks();
        self.summary = selection_summary(&self.catalog, &self.config);
        self.placeholder = placeholder_text(&self.summary, &self.catalog, &self.config);
        self.value = match (&self.config.select_all_value, self.summary.all_selected) {
            (Some(sentinel), true) => SelectValue::Sentinel(sentinel.clone()),
            _ => SelectValue::Values(self.summary.values.clone()),
        };
        tracing::debug!(
            target: "enhanced_select::select",
            count = self.summary.count,
            all_selected = self.summary.all_selected,
            notify,
            "reconciled"
        );
        if notify {
            self.signals.change.emit(self.value.clone());
        }
    }
}

// Keep CatalogEntry referenced from the public API surface so hosts can walk
// the display order without reaching into the catalog internals.
impl EnhancedSelect {
    /// Top-level display order: groupless items and groups interleaved.
    pub fn entries(&self) -> &[CatalogEntry] {
        self.catalog.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OptionDescriptor;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn colors() -> Vec<SourceEntry> {
        vec![
            SourceEntry::option("r", "Red"),
            SourceEntry::option("b", "Blue"),
        ]
    }

    fn grouped() -> Vec<SourceEntry> {
        vec![
            SourceEntry::option("x", "Loose"),
            SourceEntry::group(
                "Colors",
                vec![
                    SourceEntry::option("r", "Red"),
                    SourceEntry::option("b", "Blue"),
                    SourceEntry::option("g", "Green"),
                ],
            ),
        ]
    }

    fn item_id(select: &EnhancedSelect, value: &str) -> ItemId {
        select
            .catalog()
            .iter_items()
            .find(|(_, item)| item.value == value)
            .map(|(id, _)| id)
            .unwrap()
    }

    fn group_id(select: &EnhancedSelect) -> GroupId {
        select.catalog().group_ids()[0]
    }

    #[test]
    fn test_item_toggle_updates_value_and_summary() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());
        let red = item_id(&select, "r");

        select.set_item_checked(red, true);
        assert_eq!(
            select.value(),
            &SelectValue::Values(vec!["r".to_string()])
        );
        assert_eq!(select.placeholder().text, "Red");

        select.set_item_checked(red, false);
        assert_eq!(select.value(), &SelectValue::Values(Vec::new()));
        assert!(select.placeholder().is_hint);
    }

    #[test]
    fn test_disabled_item_toggle_is_noop() {
        let source = vec![
            SourceEntry::option("a", "A"),
            SourceEntry::Option(OptionDescriptor::new("d", "D").disabled(true)),
        ];
        let mut select = EnhancedSelect::new(&source, SelectConfig::multiple());
        let disabled = item_id(&select, "d");

        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = changes.clone();
        select.signals.change.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        select.set_item_checked(disabled, true);
        assert!(!select.is_checked(disabled));
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_single_mode_mutual_exclusion() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::single());
        let red = item_id(&select, "r");
        let blue = item_id(&select, "b");

        select.set_item_checked(red, true);
        select.set_item_checked(blue, true);
        assert!(!select.is_checked(red));
        assert!(select.is_checked(blue));
        assert_eq!(select.summary().count, 1);

        // Unchecking the sole checked item leaves none checked.
        select.set_item_checked(blue, false);
        assert_eq!(select.summary().count, 0);
    }

    #[test]
    fn test_filter_does_not_emit_change() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());
        select.set_item_checked(item_id(&select, "r"), true);

        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = changes.clone();
        select.signals.change.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Filtering only alters visibility; checked state and the value
        // are untouched, so nothing is notified.
        select.filter("re");
        select.filter("");
        assert_eq!(changes.load(Ordering::SeqCst), 0);
        assert!(select.is_checked(item_id(&select, "r")));
    }

    #[test]
    fn test_single_mode_disabled_item_stays_unselected() {
        let source = vec![
            SourceEntry::option("a", "A"),
            SourceEntry::Option(OptionDescriptor::new("d", "D").disabled(true)),
        ];
        let mut select = EnhancedSelect::new(&source, SelectConfig::single());
        let disabled = item_id(&select, "d");

        select.set_item_checked(disabled, true);
        assert!(!select.is_checked(disabled));
        assert!(select.checked_values().is_empty());
        assert_eq!(select.summary().count, 0);
    }

    #[test]
    fn test_single_mode_group_toggle_is_noop() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::single());
        let group = group_id(&select);

        select.select_group(group, false);
        assert_eq!(select.summary().count, 0);
        assert!(!select.group_views()[0].selectable);
    }

    #[test]
    fn test_select_all_and_aggregate_consistency() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());

        select.select_all(false);
        assert!(select.is_select_all_checked());
        assert!(select.is_group_checked(group_id(&select)));
        assert_eq!(select.summary().count, 4);
        assert!(select.summary().all_selected);
        assert_eq!(select.placeholder().text, "All selected");

        let blue = item_id(&select, "b");
        select.set_item_checked(blue, false);
        assert!(!select.is_select_all_checked());
        assert!(!select.is_group_checked(group_id(&select)));
    }

    #[test]
    fn test_select_all_sentinel_value() {
        let config = SelectConfig::multiple().with_select_all_value("*");
        let mut select = EnhancedSelect::new(&colors(), config);

        select.select_all(false);
        assert_eq!(select.value(), &SelectValue::Sentinel("*".to_string()));
        assert!(select.value().as_values().is_none());

        select.unselect_all(false);
        assert_eq!(select.value(), &SelectValue::Values(Vec::new()));
    }

    #[test]
    fn test_filter_scoped_select_all() {
        // Filter "re" leaves only Red visible; select-all checks only Red.
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());

        assert!(select.filter("re"));
        let red = item_id(&select, "r");
        let blue = item_id(&select, "b");
        assert!(select.filter_state().is_item_visible(red));
        assert!(!select.filter_state().is_item_visible(blue));

        select.select_all(false);
        assert!(select.is_checked(red));
        assert!(!select.is_checked(blue));
    }

    #[test]
    fn test_select_all_ignore_filter_checks_hidden_items() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());

        select.filter("re");
        select.select_all(true);
        assert!(select.is_checked(item_id(&select, "r")));
        assert!(select.is_checked(item_id(&select, "b")));
    }

    #[test]
    fn test_group_toggle_is_filter_scoped() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        let group = group_id(&select);
        let red = item_id(&select, "r");
        let blue = item_id(&select, "b");
        let green = item_id(&select, "g");

        select.filter("r"); // matches Red and Green, hides Blue and Loose
        assert!(!select.filter_state().is_item_visible(blue));

        select.select_group(group, false);
        assert!(select.is_checked(red));
        assert!(select.is_checked(green));
        assert!(!select.is_checked(blue));

        // Unselect with the same scoping leaves hidden state untouched.
        select.set_item_checked(red, true);
        select.unselect_group(group, false);
        assert!(!select.is_checked(red));
        assert!(!select.is_checked(green));
        assert!(!select.is_checked(blue));
    }

    #[test]
    fn test_open_scoping_of_helper_checks() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());
        let red = item_id(&select, "r");

        // Open the dropdown and search: only Red is relevant.
        select.set_open(true);
        select.filter("re");
        select.set_item_checked(red, true);
        assert!(select.is_select_all_checked());

        // Closed, the aggregate is unscoped and Blue is unchecked.
        select.set_open(false);
        assert!(!select.is_select_all_checked());
    }

    #[test]
    fn test_opening_clears_filter() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());

        select.filter("zzz");
        assert!(select.no_matches_visible());

        select.set_open(true);
        assert!(!select.no_matches_visible());
        assert_eq!(select.filter_state().query(), "");
    }

    #[test]
    fn test_bulk_signals_fire_before_mutation() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        let group = group_id(&select);

        let log = Arc::new(Mutex::new(Vec::new()));
        let log_select = log.clone();
        select.signals.select_group.connect(move |id| {
            log_select.lock().push(format!("selectGroup {:?}", id));
        });
        let log_change = log.clone();
        select.signals.change.connect(move |_| {
            log_change.lock().push("change".to_string());
        });

        select.select_group(group, false);
        let log = log.lock();
        assert_eq!(log.len(), 2);
        assert!(log[0].starts_with("selectGroup"));
        assert_eq!(log[1], "change");
    }

    #[test]
    fn test_refresh_is_silent_and_discards_state() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());
        select.set_item_checked(item_id(&select, "r"), true);

        let changes = Arc::new(AtomicUsize::new(0));
        let changes_clone = changes.clone();
        select.signals.change.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        select.refresh(&colors());
        assert_eq!(changes.load(Ordering::SeqCst), 0);
        assert_eq!(select.summary().count, 0);
    }

    #[test]
    fn test_refresh_restore_round_trip() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        select.set_item_checked(item_id(&select, "r"), true);
        select.set_item_checked(item_id(&select, "x"), true);

        let before = select.summary().clone();
        let captured = select.checked_values();

        select.refresh(&grouped());
        assert_eq!(select.summary().count, 0);

        select.restore_checked(&captured);
        let after = select.summary();
        assert_eq!(after.values, before.values);
        assert_eq!(after.texts, before.texts);
        assert_eq!(after.count, before.count);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        select.set_item_checked(item_id(&select, "r"), true);

        let value = select.value().clone();
        let summary = select.summary().clone();
        let placeholder = select.placeholder().clone();

        // Re-running the aggregate recomputation with no state change must
        // not alter anything observable.
        select.set_open(true);
        select.set_open(false);
        assert_eq!(select.value(), &value);
        assert_eq!(select.summary(), &summary);
        assert_eq!(select.placeholder(), &placeholder);
    }

    #[test]
    fn test_empty_catalog_state() {
        let select = EnhancedSelect::new(&[], SelectConfig::multiple());

        assert!(select.no_matches_visible());
        assert!(!select.select_all_view().visible);
        assert!(select.placeholder().is_hint);
        assert_eq!(select.value(), &SelectValue::Values(Vec::new()));
    }

    #[test]
    fn test_select_all_view_hidden_when_filter_matches_nothing() {
        let mut select = EnhancedSelect::new(&colors(), SelectConfig::multiple());

        assert!(select.select_all_view().visible);
        select.filter("zzz");
        assert!(!select.select_all_view().visible);
    }

    #[test]
    fn test_group_aggregate_over_visible_children() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        let group = group_id(&select);
        let red = item_id(&select, "r");

        select.set_item_checked(red, true);
        let aggregate = select.group_aggregate(group);
        assert!(aggregate.some_checked);
        assert!(!aggregate.all_checked);

        // With the filter hiding everything but Red, Red alone decides.
        select.filter("red");
        let aggregate = select.group_aggregate(group);
        assert!(aggregate.all_checked);
        assert!(!aggregate.some_checked);
    }

    #[test]
    fn test_item_views_reflect_state() {
        let mut select = EnhancedSelect::new(&grouped(), SelectConfig::multiple());
        let red = item_id(&select, "r");
        select.set_item_checked(red, true);
        select.filter("red");

        let views = select.item_views();
        assert_eq!(views.len(), 4);
        let red_view = views.iter().find(|v| v.value == "r").unwrap();
        assert!(red_view.checked);
        assert!(red_view.visible);
        let loose_view = views.iter().find(|v| v.value == "x").unwrap();
        assert!(!loose_view.visible);
    }
}
