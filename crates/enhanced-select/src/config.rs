//! Configuration for a select control instance.
//!
//! A [`SelectConfig`] is supplied at construction and read-only afterwards.
//! Configuration is consumed as given: a count template without its tokens,
//! or an empty delimiter, is a caller contract violation and is not
//! validated here.

use std::time::Duration;

/// The token in [`SelectConfig::count_selected_text`] replaced by the
/// checked count. Only the first occurrence is substituted.
pub const COUNT_TOKEN: char = '#';

/// The token in [`SelectConfig::count_selected_text`] replaced by the total
/// enabled item count. Only the first occurrence is substituted.
pub const TOTAL_TOKEN: char = '%';

/// Configuration for a select control.
///
/// Defaults match the classic enhanced-select widget. Use the `with_*`
/// builder methods to customize:
///
/// ```
/// use enhanced_select::SelectConfig;
///
/// let config = SelectConfig::multiple()
///     .with_placeholder("Pick some colors")
///     .with_delimiter("; ")
///     .with_minimum_count_selected(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// Text shown when nothing is checked.
    pub placeholder: String,
    /// Whether the select-all control is enabled (multiple mode only).
    pub select_all: bool,
    /// Label for the select-all control.
    pub select_all_text: String,
    /// Sentinel emitted as the authoritative value when every item is
    /// selected, instead of the explicit value list.
    pub select_all_value: Option<String>,
    /// Text shown when every enabled item is checked.
    pub all_selected_text: Option<String>,
    /// Separator used when joining selected display strings.
    pub delimiter: String,
    /// Display raw values instead of labels in the summary.
    pub display_values: bool,
    /// Checked counts at or above this threshold summarize to
    /// [`count_selected_text`](Self::count_selected_text) rather than a join.
    pub minimum_count_selected: usize,
    /// Count summary template; see [`COUNT_TOKEN`] and [`TOTAL_TOKEN`].
    pub count_selected_text: Option<String>,
    /// Text shown when the filter matches nothing.
    pub no_matches_text: String,
    /// Multi-selection mode. Single mode enforces mutual exclusion and turns
    /// groups into inert headers.
    pub multiple: bool,
    /// Debounce delay for filter input.
    pub search_delay: Duration,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            select_all: true,
            select_all_text: "[Select All]".to_string(),
            select_all_value: None,
            all_selected_text: Some("All selected".to_string()),
            delimiter: ", ".to_string(),
            display_values: false,
            minimum_count_selected: 3,
            count_selected_text: Some("# of % selected".to_string()),
            no_matches_text: "No matches found".to_string(),
            multiple: true,
            search_delay: Duration::from_millis(350),
        }
    }
}

impl SelectConfig {
    /// Default configuration in multi-selection mode.
    pub fn multiple() -> Self {
        Self::default()
    }

    /// Default configuration in single-selection mode.
    pub fn single() -> Self {
        Self {
            multiple: false,
            ..Self::default()
        }
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enables or disables the select-all control.
    pub fn with_select_all(mut self, select_all: bool) -> Self {
        self.select_all = select_all;
        self
    }

    /// Sets the select-all label.
    pub fn with_select_all_text(mut self, text: impl Into<String>) -> Self {
        self.select_all_text = text.into();
        self
    }

    /// Sets the all-selected sentinel value.
    pub fn with_select_all_value(mut self, value: impl Into<String>) -> Self {
        self.select_all_value = Some(value.into());
        self
    }

    /// Sets the all-selected summary text. `None` disables the rule.
    pub fn with_all_selected_text(mut self, text: Option<String>) -> Self {
        self.all_selected_text = text;
        self
    }

    /// Sets the summary delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Summarize with raw values instead of labels.
    pub fn with_display_values(mut self, display_values: bool) -> Self {
        self.display_values = display_values;
        self
    }

    /// Sets the count-summary threshold.
    pub fn with_minimum_count_selected(mut self, count: usize) -> Self {
        self.minimum_count_selected = count;
        self
    }

    /// Sets the count summary template. `None` disables the rule.
    pub fn with_count_selected_text(mut self, template: Option<String>) -> Self {
        self.count_selected_text = template;
        self
    }

    /// Sets the no-matches indicator text.
    pub fn with_no_matches_text(mut self, text: impl Into<String>) -> Self {
        self.no_matches_text = text.into();
        self
    }

    /// Sets the filter debounce delay.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_widget() {
        let config = SelectConfig::default();
        assert!(config.multiple);
        assert!(config.select_all);
        assert_eq!(config.select_all_text, "[Select All]");
        assert_eq!(config.all_selected_text.as_deref(), Some("All selected"));
        assert_eq!(config.delimiter, ", ");
        assert_eq!(config.minimum_count_selected, 3);
        assert_eq!(config.count_selected_text.as_deref(), Some("# of % selected"));
        assert_eq!(config.no_matches_text, "No matches found");
        assert_eq!(config.search_delay, Duration::from_millis(350));
        assert!(config.select_all_value.is_none());
        assert!(!config.display_values);
    }

    #[test]
    fn test_builder_chain() {
        let config = SelectConfig::single()
            .with_placeholder("Pick one")
            .with_delimiter("; ")
            .with_select_all_value("*");
        assert!(!config.multiple);
        assert_eq!(config.placeholder, "Pick one");
        assert_eq!(config.delimiter, "; ");
        assert_eq!(config.select_all_value.as_deref(), Some("*"));
    }
}
