//! The filter engine: text search over the catalog, plus debounced input.
//!
//! [`FilterState`] computes which items and groups are visible under the
//! active query. Visibility gates every aggregate computation in the engine:
//! bulk toggles and helper checkboxes only ever consider what the user can
//! currently see.
//!
//! [`SearchDebouncer`] implements the "latest write wins" input policy:
//! rapid submissions cancel and replace each other, and only the last one
//! is applied once the delay elapses.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use enhanced_select_core::{ScheduledTaskId, TaskScheduler};

use crate::catalog::{Catalog, GroupId, ItemId};
use crate::config::SelectConfig;

/// The visible subset of a catalog under a text query.
///
/// With no active query every item is visible, disabled ones included. The
/// instant a query is typed, disabled items are filtered out along with
/// non-matching labels. This asymmetry is deliberate: a cleared filter lets
/// the user see disabled entries, a search never surfaces them.
#[derive(Debug, Default)]
pub struct FilterState {
    query: String,
    visible_items: HashSet<ItemId>,
    visible_groups: HashSet<GroupId>,
}

impl FilterState {
    /// The normalized (trimmed) active query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-empty query is active.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether an item is visible under the active query.
    pub fn is_item_visible(&self, id: ItemId) -> bool {
        self.visible_items.contains(&id)
    }

    /// Whether a group is visible under the active query.
    ///
    /// A group is visible iff at least one of its items is.
    pub fn is_group_visible(&self, id: GroupId) -> bool {
        self.visible_groups.contains(&id)
    }

    /// Number of currently visible items.
    pub fn visible_count(&self) -> usize {
        self.visible_items.len()
    }

    /// Recomputes visibility for `query`.
    ///
    /// The query is trimmed and matched case-insensitively against item
    /// labels. Returns whether any visible *enabled* item remains, which
    /// drives the no-matches indicator and select-all visibility.
    pub fn apply(&mut self, catalog: &Catalog, query: &str) -> bool {
        self.query = query.trim().to_string();
        self.visible_items.clear();
        self.visible_groups.clear();

        let needle = self.query.to_lowercase();
        let mut any_enabled_visible = false;
        for (id, item) in catalog.iter_items() {
            let visible = if needle.is_empty() {
                true
            } else {
                item.enabled && item.label.to_lowercase().contains(&needle)
            };
            if visible {
                self.visible_items.insert(id);
                any_enabled_visible |= item.enabled;
            }
        }

        for group_id in catalog.group_ids() {
            let Some(group) = catalog.group(group_id) else {
                continue;
            };
            if group.items().iter().any(|id| self.visible_items.contains(id)) {
                self.visible_groups.insert(group_id);
            }
        }

        tracing::trace!(
            target: "enhanced_select::filter",
            query = %self.query,
            visible = self.visible_items.len(),
            any_enabled_visible,
            "filter applied"
        );
        any_enabled_visible
    }

    /// Clears the query; equivalent to `apply(catalog, "")`.
    pub fn clear(&mut self, catalog: &Catalog) -> bool {
        self.apply(catalog, "")
    }
}

/// Debounced filter input with latest-submission-wins semantics.
///
/// Each [`submit`](Self::submit) cancels any pending application and
/// schedules a fresh one after the configured delay. The host drives the
/// debouncer by calling [`poll`](Self::poll); when a submission's delay has
/// elapsed, `poll` hands the query back exactly once for the host to pass
/// to the engine's `filter` operation.
///
/// ```
/// use std::time::Duration;
/// use enhanced_select::SearchDebouncer;
///
/// let mut debouncer = SearchDebouncer::new(Duration::from_millis(1));
/// debouncer.submit("re");
/// debouncer.submit("red"); // replaces the pending "re"
/// std::thread::sleep(Duration::from_millis(5));
/// assert_eq!(debouncer.poll().as_deref(), Some("red"));
/// ```
pub struct SearchDebouncer {
    scheduler: TaskScheduler,
    delay: Duration,
    pending: Option<ScheduledTaskId>,
    /// The query whose delay has elapsed, waiting to be taken by `poll`.
    due: Arc<Mutex<Option<String>>>,
}

impl SearchDebouncer {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            scheduler: TaskScheduler::new(),
            delay,
            pending: None,
            due: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a debouncer using the configured
    /// [`search_delay`](SelectConfig::search_delay).
    pub fn from_config(config: &SelectConfig) -> Self {
        Self::new(config.search_delay)
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submits a query, replacing any pending submission.
    pub fn submit(&mut self, query: impl Into<String>) {
        if let Some(id) = self.pending.take() {
            let _ = self.scheduler.cancel(id);
        }
        // An earlier submission that became due but was never polled is
        // superseded as well.
        self.due.lock().take();

        let due = Arc::clone(&self.due);
        let mut query = Some(query.into());
        let id = self.scheduler.schedule_once(self.delay, move || {
            *due.lock() = query.take();
        });
        self.pending = Some(id);
    }

    /// Whether a submission is pending.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending submission, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.scheduler.cancel(id);
        }
        self.due.lock().take();
    }

    /// Time until the pending submission becomes due, if any.
    pub fn time_until_ready(&mut self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    /// Returns the query to apply, if its delay has elapsed.
    pub fn poll(&mut self) -> Option<String> {
        self.scheduler.process_ready();
        let ready = self.due.lock().take();
        if ready.is_some() {
            self.pending = None;
        }
        ready
    }
}
