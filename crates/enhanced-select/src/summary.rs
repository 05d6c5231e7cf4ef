//! The summary formatter: selection state rendered as placeholder text.
//!
//! [`selection_summary`] collects the checked items; [`placeholder_text`]
//! turns the summary into the human-readable text shown in the closed
//! control, applying a priority-ordered formatting policy (first matching
//! rule wins):
//!
//! 1. nothing checked → configured placeholder
//! 2. every enabled item checked → the all-selected text, if configured
//! 3. below the count threshold → display strings joined by the delimiter
//! 4. at/above the threshold → the count template, if configured
//! 5. otherwise → the same join as rule 3

use crate::catalog::{Catalog, ItemId};
use crate::config::{SelectConfig, COUNT_TOKEN, TOTAL_TOKEN};

/// Derived snapshot of the current selection. Not persisted; recomputed by
/// the reconciler after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Checked item ids, in display order.
    pub checked: Vec<ItemId>,
    /// Checked item values, in display order.
    pub values: Vec<String>,
    /// Display strings for the checked selection.
    ///
    /// Flat checked labels, except in multiple mode with at least one group
    /// in the catalog, where the group-aware form replaces them (see
    /// [`selection_summary`]).
    pub texts: Vec<String>,
    /// Number of checked items.
    pub count: usize,
    /// Whether every enabled item is checked.
    pub all_selected: bool,
}

/// Placeholder text plus whether it is the empty-selection hint (hosts
/// typically style the hint differently).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderText {
    /// The text to display.
    pub text: String,
    /// True when showing the configured placeholder for an empty selection.
    pub is_hint: bool,
}

/// Computes the selection summary for the current checked state.
///
/// In multiple mode, when the catalog contains any group, `texts` uses the
/// group-aware form: for each group with at least one checked child, in
/// display order, `[Label]` when every child (disabled included) is
/// checked, else `[Label: a, b]` listing the checked children's labels.
/// Groupless checked items are absent from this form; that matches the
/// legacy widget and is kept as-is.
pub fn selection_summary(catalog: &Catalog, config: &SelectConfig) -> SelectionSummary {
    let mut checked = Vec::new();
    let mut values = Vec::new();
    let mut texts = Vec::new();
    let mut any_enabled_unchecked = false;

    for (id, item) in catalog.iter_items() {
        if item.checked {
            checked.push(id);
            values.push(item.value.clone());
            texts.push(item.label.clone());
        } else if item.enabled {
            any_enabled_unchecked = true;
        }
    }

    if config.multiple && catalog.has_groups() {
        texts = group_texts(catalog, &config.delimiter);
    }

    SelectionSummary {
        count: values.len(),
        checked,
        values,
        texts,
        all_selected: !any_enabled_unchecked,
    }
}

/// The group-aware display strings, in catalog order.
fn group_texts(catalog: &Catalog, delimiter: &str) -> Vec<String> {
    let mut texts = Vec::new();
    for group_id in catalog.group_ids() {
        let Some(group) = catalog.group(group_id) else {
            continue;
        };
        let checked_labels: Vec<&str> = group
            .items()
            .iter()
            .filter_map(|&id| catalog.item(id))
            .filter(|item| item.checked)
            .map(|item| item.label.as_str())
            .collect();
        if checked_labels.is_empty() {
            continue;
        }
        if checked_labels.len() == group.items().len() {
            texts.push(format!("[{}]", group.label));
        } else {
            texts.push(format!(
                "[{}: {}]",
                group.label,
                checked_labels.join(delimiter)
            ));
        }
    }
    texts
}

/// Formats the placeholder text for a summary.
pub fn placeholder_text(
    summary: &SelectionSummary,
    catalog: &Catalog,
    config: &SelectConfig,
) -> PlaceholderText {
    if summary.count == 0 {
        return PlaceholderText {
            text: config.placeholder.clone(),
            is_hint: true,
        };
    }

    if summary.all_selected {
        if let Some(text) = &config.all_selected_text {
            return PlaceholderText {
                text: text.clone(),
                is_hint: false,
            };
        }
    }

    if summary.count >= config.minimum_count_selected {
        if let Some(template) = &config.count_selected_text {
            let text = template
                .replacen(COUNT_TOKEN, &summary.count.to_string(), 1)
                .replacen(TOTAL_TOKEN, &catalog.enabled_count().to_string(), 1);
            return PlaceholderText {
                text,
                is_hint: false,
            };
        }
    }

    let display = if config.display_values {
        &summary.values
    } else {
        &summary.texts
    };
    PlaceholderText {
        text: display.join(&config.delimiter),
        is_hint: false,
    }
}
