use super::ObjectType;

use std::collections::BTreeMap;

use url::Url;

/// Page size used when a query has not been given one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Mutable request descriptor for one collection query.
///
/// The paginator reuses a single `Query` across pages and only ever touches
/// the page number, page size and include list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    object_type: ObjectType,
    page_number: u32,
    page_size: u32,
    include: Option<Vec<String>>,
    filters: BTreeMap<String, String>,
}

impl Query {
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            include: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn set_page_number(&mut self, page_number: u32) -> &mut Self {
        self.page_number = page_number;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: u32) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Related resources requested alongside each item, if any.
    pub fn include(&self) -> Option<&[String]> {
        self.include.as_deref()
    }

    pub fn set_include<I, S>(&mut self, relations: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(relations.into_iter().map(Into::into).collect());
        self
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Adds `filter[name]=value` to every request made with this query.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Append this query's parameters to `url`.
    pub fn apply_to(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page[number]", &self.page_number.to_string());
        pairs.append_pair("page[size]", &self.page_size.to_string());

        if let Some(include) = self.include.as_ref().filter(|include| !include.is_empty()) {
            pairs.append_pair("include", &include.join(","));
        }

        for (name, value) in &self.filters {
            pairs.append_pair(&format!("filter[{name}]"), value);
        }
    }
}
