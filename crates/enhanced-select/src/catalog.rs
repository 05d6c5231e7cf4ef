//! The catalog of selectable items and groups.
//!
//! A [`Catalog`] is built from an ordered list of [`SourceEntry`] descriptors
//! (the analogue of `<option>`/`<optgroup>` elements) and owns every
//! [`Item`] and [`Group`] of one control instance. Items and groups are
//! addressed by stable [`ItemId`]/[`GroupId`] keys assigned at build time;
//! nothing is ever looked up by position.
//!
//! Rebuilding a catalog discards all prior state, checked flags included.
//! Callers that need selection to survive a rebuild capture and restore it
//! through the engine (`checked_values`/`restore_checked`).

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique, stable identifier for an [`Item`] within its catalog.
    pub struct ItemId;

    /// A unique, stable identifier for a [`Group`] within its catalog.
    pub struct GroupId;
}

/// A source option descriptor: one selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// The underlying value submitted for this option.
    pub value: String,
    /// The display label.
    pub label: String,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Whether the option starts out selected.
    pub selected: bool,
}

impl OptionDescriptor {
    /// Creates an enabled, unselected option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            selected: false,
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the initial selected state.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// One entry of the source option list: a plain option or a labeled group.
///
/// Grouping is one level deep. A `Group` nested inside another group is
/// flattened into the enclosing group; its options inherit the enclosing
/// group's disabled state as their default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// A top-level or grouped option.
    Option(OptionDescriptor),
    /// A labeled group of options.
    Group {
        /// The group label.
        label: String,
        /// Disables every child by default (individual options can only
        /// further disable themselves, never re-enable).
        disabled: bool,
        /// The group's children, in display order.
        children: Vec<SourceEntry>,
    },
}

impl SourceEntry {
    /// Shorthand for a plain enabled option.
    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Option(OptionDescriptor::new(value, label))
    }

    /// Shorthand for an enabled group of options.
    pub fn group(label: impl Into<String>, children: Vec<SourceEntry>) -> Self {
        Self::Group {
            label: label.into(),
            disabled: false,
            children,
        }
    }
}

/// A leaf selectable entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The underlying value.
    pub value: String,
    /// The display label.
    pub label: String,
    /// Whether the item can be toggled by user action.
    pub enabled: bool,
    /// Whether the item is currently checked.
    pub checked: bool,
    /// The owning group, if any.
    pub group: Option<GroupId>,
}

/// An aggregation of items, togglable as a unit in multiple mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The group label.
    pub label: String,
    /// Whether the group's own toggle is enabled.
    pub enabled: bool,
    /// Child items, in display order.
    items: Vec<ItemId>,
}

impl Group {
    /// The group's child item ids, in display order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}

/// A top-level catalog entry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    /// A groupless item.
    Item(ItemId),
    /// A group; its items follow it in display order.
    Group(GroupId),
}

/// The ordered collection of all items and groups of one control instance.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Top-level entries in display order.
    entries: Vec<CatalogEntry>,
    items: SlotMap<ItemId, Item>,
    groups: SlotMap<GroupId, Group>,
}

impl Catalog {
    /// Builds a catalog from an ordered source option list.
    pub fn build(source: &[SourceEntry]) -> Self {
        let mut catalog = Self::default();
        for entry in source {
            match entry {
                SourceEntry::Option(opt) => {
                    let id = catalog.insert_item(opt, None, false);
                    catalog.entries.push(CatalogEntry::Item(id));
                }
                SourceEntry::Group {
                    label,
                    disabled,
                    children,
                } => {
                    let group_id = catalog.groups.insert(Group {
                        label: label.clone(),
                        enabled: !disabled,
                        items: Vec::new(),
                    });
                    catalog.entries.push(CatalogEntry::Group(group_id));
                    catalog.insert_group_children(group_id, *disabled, children);
                }
            }
        }
        tracing::debug!(
            target: "enhanced_select::select",
            items = catalog.items.len(),
            groups = catalog.groups.len(),
            "catalog built"
        );
        catalog
    }

    fn insert_group_children(
        &mut self,
        group_id: GroupId,
        group_disabled: bool,
        children: &[SourceEntry],
    ) {
        for child in children {
            match child {
                SourceEntry::Option(opt) => {
                    let id = self.insert_item(opt, Some(group_id), group_disabled);
                    self.groups[group_id].items.push(id);
                }
                // Nested groups are flattened into the enclosing group.
                SourceEntry::Group {
                    disabled, children, ..
                } => {
                    self.insert_group_children(group_id, group_disabled || *disabled, children);
                }
            }
        }
    }

    fn insert_item(
        &mut self,
        opt: &OptionDescriptor,
        group: Option<GroupId>,
        group_disabled: bool,
    ) -> ItemId {
        self.items.insert(Item {
            value: opt.value.clone(),
            label: opt.label.clone(),
            enabled: !(group_disabled || opt.disabled),
            checked: opt.selected,
            group,
        })
    }

    /// Top-level entries in display order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// Looks up a group by id.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// Whether the catalog contains no items at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items, disabled included.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of enabled items.
    pub fn enabled_count(&self) -> usize {
        self.items.values().filter(|item| item.enabled).count()
    }

    /// Whether any group exists.
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    /// All item ids in display order, group children inline.
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::with_capacity(self.items.len());
        for entry in &self.entries {
            match entry {
                CatalogEntry::Item(id) => ids.push(*id),
                CatalogEntry::Group(group_id) => {
                    if let Some(group) = self.groups.get(*group_id) {
                        ids.extend_from_slice(&group.items);
                    }
                }
            }
        }
        ids
    }

    /// All group ids in display order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Group(id) => Some(*id),
                CatalogEntry::Item(_) => None,
            })
            .collect()
    }

    /// Iterates items in display order.
    pub fn iter_items(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.item_ids().into_iter().map(move |id| (id, &self.items[id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_source() -> Vec<SourceEntry> {
        vec![
            SourceEntry::option("r", "Red"),
            SourceEntry::group(
                "Cold",
                vec![
                    SourceEntry::option("b", "Blue"),
                    SourceEntry::option("g", "Green"),
                ],
            ),
        ]
    }

    #[test]
    fn test_build_flat_and_grouped() {
        let catalog = Catalog::build(&colors_source());

        assert_eq!(catalog.item_count(), 3);
        assert!(catalog.has_groups());
        assert_eq!(catalog.entries().len(), 2);

        let labels: Vec<_> = catalog.iter_items().map(|(_, i)| i.label.clone()).collect();
        assert_eq!(labels, vec!["Red", "Blue", "Green"]);

        // Groupless item has no group; grouped items point at their group.
        let (_, red) = catalog.iter_items().next().unwrap();
        assert!(red.group.is_none());
        let group_id = catalog.group_ids()[0];
        for &id in catalog.group(group_id).unwrap().items() {
            assert_eq!(catalog.item(id).unwrap().group, Some(group_id));
        }
    }

    #[test]
    fn test_group_disabled_propagates_to_children() {
        let source = vec![SourceEntry::Group {
            label: "Locked".to_string(),
            disabled: true,
            children: vec![
                SourceEntry::option("a", "A"),
                SourceEntry::Option(OptionDescriptor::new("b", "B").disabled(false)),
            ],
        }];
        let catalog = Catalog::build(&source);

        // A child cannot re-enable itself under a disabled group.
        assert!(catalog.iter_items().all(|(_, item)| !item.enabled));
        let group_id = catalog.group_ids()[0];
        assert!(!catalog.group(group_id).unwrap().enabled);
    }

    #[test]
    fn test_nested_group_flattened_into_enclosing() {
        let source = vec![SourceEntry::Group {
            label: "Outer".to_string(),
            disabled: false,
            children: vec![
                SourceEntry::option("a", "A"),
                SourceEntry::Group {
                    label: "Inner".to_string(),
                    disabled: true,
                    children: vec![SourceEntry::option("b", "B")],
                },
            ],
        }];
        let catalog = Catalog::build(&source);

        // Only the outer group survives; the inner one's option joins it.
        assert_eq!(catalog.group_ids().len(), 1);
        let group_id = catalog.group_ids()[0];
        let group = catalog.group(group_id).unwrap();
        assert_eq!(group.items().len(), 2);

        let b = catalog
            .iter_items()
            .find(|(_, item)| item.value == "b")
            .unwrap()
            .1;
        assert_eq!(b.group, Some(group_id));
        // The nested group's disabled flag still applies to its options.
        assert!(!b.enabled);
    }

    #[test]
    fn test_initial_selection_from_descriptors() {
        let source = vec![
            SourceEntry::Option(OptionDescriptor::new("a", "A").selected(true)),
            SourceEntry::option("b", "B"),
            SourceEntry::Option(
                OptionDescriptor::new("c", "C").disabled(true).selected(true),
            ),
        ];
        let catalog = Catalog::build(&source);

        let checked: Vec<_> = catalog
            .iter_items()
            .filter(|(_, item)| item.checked)
            .map(|(_, item)| item.value.clone())
            .collect();
        // Programmatic selection stands even on a disabled option.
        assert_eq!(checked, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::build(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.enabled_count(), 0);
        assert!(!catalog.has_groups());
        assert!(catalog.item_ids().is_empty());
    }
}
