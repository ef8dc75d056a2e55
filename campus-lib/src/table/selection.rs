//! Row selection.

use std::collections::BTreeSet;

/// State of the header checkbox for the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    /// No visible row is selected (or the page is empty).
    Unchecked,
    /// Some, but not all, visible rows are selected.
    Indeterminate,
    /// Every visible row is selected.
    Checked,
}

/// The set of selected row ids.
///
/// Keyed by id rather than position, so it survives reordering of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    ids: BTreeSet<String>,
}

impl SelectionModel {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Header checkbox click for the visible page.
    ///
    /// If every id in `page_ids` is selected they are all deselected,
    /// otherwise all of them are selected. Ids from other pages are kept.
    pub fn toggle_all<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a str> + Clone) {
        let mut ids = page_ids.clone().into_iter().peekable();
        if ids.peek().is_none() {
            return;
        }
        if self.all_selected(page_ids.clone()) {
            for id in page_ids {
                self.ids.remove(id);
            }
        } else {
            for id in page_ids {
                self.ids.insert(id.to_string());
            }
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keeps only the ids for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    /// Returns the number of selected ids.
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Iterates the selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns the selected ids as owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Computes the header checkbox state for the visible page.
    pub fn header_state<'a>(&self, page_ids: impl IntoIterator<Item = &'a str>) -> HeaderCheckbox {
        let mut total = 0;
        let mut selected = 0;
        for id in page_ids {
            total += 1;
            if self.ids.contains(id) {
                selected += 1;
            }
        }
        match (selected, total) {
            (0, _) => HeaderCheckbox::Unchecked,
            (s, t) if s == t => HeaderCheckbox::Checked,
            _ => HeaderCheckbox::Indeterminate,
        }
    }

    fn all_selected<'a>(&self, page_ids: impl IntoIterator<Item = &'a str>) -> bool {
        page_ids.into_iter().all(|id| self.ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionModel::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        assert_eq!(selection.count(), 1);
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_selects_then_clears() {
        let page = ["a", "b", "c"];
        let mut selection = SelectionModel::new();
        selection.toggle("b");
        assert_eq!(selection.header_state(page), HeaderCheckbox::Indeterminate);

        selection.toggle_all(page);
        assert_eq!(selection.count(), 3);
        assert_eq!(selection.header_state(page), HeaderCheckbox::Checked);

        selection.toggle_all(page);
        assert!(selection.is_empty());
        assert_eq!(selection.header_state(page), HeaderCheckbox::Unchecked);
    }

    #[test]
    fn test_toggle_all_keeps_other_pages() {
        let mut selection = SelectionModel::new();
        selection.toggle("page1-row");
        selection.toggle_all(["x", "y"]);
        selection.toggle_all(["x", "y"]);
        assert_eq!(selection.to_vec(), vec!["page1-row".to_string()]);
    }

    #[test]
    fn test_toggle_all_on_empty_page_is_noop() {
        let mut selection = SelectionModel::new();
        selection.toggle("a");
        selection.toggle_all(std::iter::empty::<&str>());
        assert_eq!(selection.count(), 1);
        assert_eq!(
            selection.header_state(std::iter::empty::<&str>()),
            HeaderCheckbox::Unchecked
        );
    }

    #[test]
    fn test_retain() {
        let mut selection = SelectionModel::new();
        selection.toggle_all(["a", "b", "c"]);
        selection.retain(|id| id != "b");
        assert_eq!(selection.to_vec(), vec!["a".to_string(), "c".to_string()]);
    }
}
