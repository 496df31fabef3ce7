use serde::Serialize;

use crate::catalog::product::ProductSummary;
use crate::error::NormalizeError;
use crate::record::{FromRecord, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page: i64,
    nb_pages: i64,
    nb_results: i64,
    results_per_page: i64,
}

impl Pagination {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub fn nb_pages(&self) -> i64 {
        self.nb_pages
    }

    #[must_use]
    pub fn nb_results(&self) -> i64 {
        self.nb_results
    }

    #[must_use]
    pub fn results_per_page(&self) -> i64 {
        self.results_per_page
    }

    /// Whether this is the final page. An empty listing (`nbPages == 0`)
    /// is also last.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.page >= self.nb_pages
    }
}

impl FromRecord for Pagination {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            page: record.int("page")?,
            nb_pages: record.int("nbPages")?,
            nb_results: record.int_or("nbResults", 0)?,
            results_per_page: record.int_or("resultsPerPage", 0)?,
        })
    }
}

/// One page of `catalog/search/products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    results: Vec<ProductSummary>,
    pagination: Pagination,
}

impl SearchResult {
    #[must_use]
    pub fn results(&self) -> &[ProductSummary] {
        &self.results
    }

    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }
}

impl FromRecord for SearchResult {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            results: record.list("results")?,
            pagination: record.nested("pagination")?,
        })
    }
}

/// Parameters for a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub results_per_page: u32,
    pub page: u32,
    /// Extra `filters[name]=value` pairs.
    pub filters: Vec<(String, String)>,
    /// `sorting[field]=asc|desc` pairs.
    pub sorting: Vec<(String, String)>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Flattens the query into URL query pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("query".to_owned(), self.query.clone()),
            ("resultsPerPage".to_owned(), self.results_per_page.to_string()),
            ("page".to_owned(), self.page.to_string()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .map(|(name, value)| (format!("filters[{name}]"), value.clone())),
        );
        pairs.extend(
            self.sorting
                .iter()
                .map(|(field, order)| (format!("sorting[{field}]"), order.clone())),
        );
        pairs
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            results_per_page: 12,
            page: 1,
            filters: Vec::new(),
            sorting: Vec::new(),
        }
    }
}
