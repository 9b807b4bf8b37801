//! Paginated list envelope

use axum::http::Uri;
use serde::Serialize;

use crate::domain::pagination::Page;

/// `{count, next, previous, results}` envelope for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedResponse<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Build the envelope for a page served at `uri`.
    ///
    /// Links are relative and keep every other query parameter. The link
    /// back to the first page drops `page` entirely.
    pub fn from_page<U>(page: Page<U>, uri: &Uri, render: impl FnMut(U) -> T) -> Self {
        let next = page
            .has_next()
            .then(|| page_link(uri, Some(page.number() + 1)));
        let previous = page.has_previous().then(|| {
            let number = page.number() - 1;
            page_link(uri, (number > 1).then_some(number))
        });
        let count = page.total();

        Self {
            count,
            next,
            previous,
            results: page.into_items().into_iter().map(render).collect(),
        }
    }
}

/// Relative link to `uri` with `page` replaced, or removed when `None`
fn page_link(uri: &Uri, page: Option<usize>) -> String {
    let mut params: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some("page"))
        .map(str::to_string)
        .collect();

    if let Some(page) = page {
        params.push(format!("page={}", page));
    }

    if params.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), params.join("&"))
    }
}
