use crate::domain::{Searchable, Status};

/// Full list plus a derived, filtered view.
///
/// The view is recomputed with a linear scan whenever the items, the query or
/// the status facet change. Matching is a case-insensitive substring test on
/// [`Searchable::search_text`]; a blank query matches everything.
#[derive(Debug, Clone)]
pub struct ListFilter<T> {
    items: Vec<T>,
    query: String,
    status: Option<Status>,
    visible: Vec<T>,
}

impl<T> Default for ListFilter<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            status: None,
            visible: Vec::new(),
        }
    }
}

impl<T: Searchable + Clone> ListFilter<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut filter = Self::default();
        filter.set_items(items);
        filter
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    /// `None` shows every status.
    pub fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
        self.recompute();
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
        self.recompute();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    fn recompute(&mut self) {
        let needle = self.query.trim().to_lowercase();
        let status = self.status;
        self.visible = self
            .items
            .iter()
            .filter(|item| status.map_or(true, |wanted| item.status() == Some(wanted)))
            .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let mut filter = ListFilter::new(vec!["John Smith 1", "John Smith 2", "Ana Ruiz"]);
        filter.set_query("smith");
        assert_eq!(filter.visible(), ["John Smith 1", "John Smith 2"]);

        filter.set_query("RUIZ");
        assert_eq!(filter.visible(), ["Ana Ruiz"]);
    }

    #[test]
    fn test_empty_query_returns_list_unchanged() {
        let names = vec!["John Smith 1".to_string(), "John Smith 2".to_string(), "Ana Ruiz".to_string()];
        let mut filter = ListFilter::new(names.clone());
        filter.set_query("smith");
        filter.set_query("");
        assert_eq!(filter.visible(), names.as_slice());

        filter.set_query("   ");
        assert_eq!(filter.visible(), names.as_slice());
    }

    #[test]
    fn test_view_follows_item_changes() {
        let mut filter = ListFilter::new(vec!["Ana Ruiz"]);
        filter.set_query("john");
        assert!(filter.visible().is_empty());

        filter.set_items(vec!["Ana Ruiz", "john doe"]);
        assert_eq!(filter.visible(), ["john doe"]);

        filter.retain(|name| !name.starts_with("john"));
        assert!(filter.visible().is_empty());
        assert_eq!(filter.items(), ["Ana Ruiz"]);
    }
}
