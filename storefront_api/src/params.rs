//! Query parameters for collection endpoints.

use url::Url;

/// Pagination and search parameters appended to list requests.
#[derive(Clone, Debug)]
pub struct ListParams {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Results per page. `None` uses the API default.
    pub limit: Option<i64>,
    /// Free-text search filter.
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> ListParams {
        ListParams {
            page: 1,
            limit: None,
            search: None,
        }
    }
}

impl ListParams {
    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of results per page.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the free-text search filter.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Appends the parameters to the URL as query pairs.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        url
    }
}
