use serde::Deserialize;

/// One page of results together with the page count the service reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    page_count: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_count: u32) -> Self {
        Self { items, page_count }
    }

    /// Total number of pages available for the query.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Response body of a collection endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct PageDocument<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> From<PageDocument<T>> for Page<T> {
    fn from(document: PageDocument<T>) -> Self {
        Page::new(document.data, document.meta.pagination.total_pages)
    }
}
