//! Page-number pagination over ordered collections

use crate::domain::DomainError;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size limits applied to list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationSettings {
    pub fn new(page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);

        Self {
            page_size: page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Resolve raw `page` / `page_size` query values into a request.
    ///
    /// A missing or non-positive `page_size` falls back to the default and
    /// larger values are clamped to the maximum. A `page` that is not a
    /// positive integer (or `last`) is rejected.
    pub fn resolve(
        &self,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<PageRequest, DomainError> {
        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(self.max_page_size))
            .unwrap_or(self.page_size);

        let number = match page.map(str::trim) {
            None | Some("") => PageNumber::Number(1),
            Some("last") => PageNumber::Last,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => PageNumber::Number(n),
                _ => return Err(invalid_page()),
            },
        };

        Ok(PageRequest { number, page_size })
    }
}

/// Which page was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(usize),
    Last,
}

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: PageNumber,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            number: PageNumber::Number(page.max(1)),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn number(&self) -> PageNumber {
        self.number
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of an ordered collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    page_size: usize,
    total: usize,
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based page number
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items across all pages
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn num_pages(&self) -> usize {
        num_pages(self.total, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Transform the items while keeping page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            page_size: self.page_size,
            total: self.total,
        }
    }
}

/// Slice an already filtered and ordered collection into the requested page.
///
/// The first page always exists, even for an empty collection; any other
/// page past the end is rejected with `NotFound`.
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Result<Page<T>, DomainError> {
    let total = items.len();
    let page_size = request.page_size;
    let last = num_pages(total, page_size);

    let number = match request.number {
        PageNumber::Number(n) if n <= last => n,
        PageNumber::Number(_) => return Err(invalid_page()),
        PageNumber::Last => last,
    };

    let items = items
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Page {
        items,
        number,
        page_size,
        total,
    })
}

fn num_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

fn invalid_page() -> DomainError {
    DomainError::not_found("Invalid page.")
}
