//! Offset pagination primitives shared by the backend ports and services.
//!
//! A [`PageRequest`] names a zero-based page number and a page size. Stores
//! answer with a [`Page`] envelope carrying the window of items plus the total
//! number of matches so callers can render page controls without a second
//! query.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(1, 2).expect("valid request");
//! let page = Page::from_ordered(vec!["a", "b", "c", "d", "e"], request);
//! assert_eq!(page.content(), &["c", "d"]);
//! assert_eq!(page.total_elements(), 5);
//! assert_eq!(page.total_pages(), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page size must be at least one item.
    #[error("page size must be greater than zero")]
    ZeroSize,
}

/// Zero-based page number and page size requested by a caller.
///
/// ## Invariants
/// - `size` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageRequestDto", into = "PageRequestDto")]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroSize`] when `size` is zero.
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        Ok(Self { page, size })
    }

    /// Request the first page with the given size, treating zero as one.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self {
            page: 0,
            size: if size == 0 { 1 } else { size },
        }
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64) * (self.size as u64)
    }

    /// Return a copy whose size does not exceed `max_size`.
    ///
    /// A `max_size` of zero leaves the request untouched.
    #[must_use]
    pub const fn clamp_size(self, max_size: u32) -> Self {
        if max_size == 0 || self.size <= max_size {
            return self;
        }
        Self {
            page: self.page,
            size: max_size,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PageRequestDto {
    page: u32,
    size: u32,
}

impl From<PageRequest> for PageRequestDto {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            size: value.size,
        }
    }
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(value.page, value.size)
    }
}

/// A window of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Wrap an already-windowed set of items.
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Cut the requested window out of the complete, ordered result set.
    #[must_use]
    pub fn from_ordered(items: Vec<T>, request: PageRequest) -> Self {
        let total_elements = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size).unwrap_or(usize::MAX);
        let content = items.into_iter().skip(skip).take(take).collect();
        Self::new(content, request, total_elements)
    }

    /// An empty page for the given request.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of matches across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to show every match.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.size as u64)
    }

    /// Whether the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        (self.number as u64) + 1 >= self.total_pages()
    }

    /// Convert every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page requests and envelopes.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_size_is_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroSize));
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(3, 10, 30)]
    #[case(2, 7, 14)]
    fn offset_multiplies_page_by_size(#[case] page: u32, #[case] size: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, size).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(50, 20, 20)]
    #[case(10, 20, 10)]
    #[case(10, 0, 10)]
    fn clamp_size_caps_large_requests(#[case] size: u32, #[case] max: u32, #[case] expected: u32) {
        let request = PageRequest::new(4, size).expect("valid request");
        let clamped = request.clamp_size(max);
        assert_eq!(clamped.size(), expected);
        assert_eq!(clamped.page(), 4);
    }

    #[rstest]
    fn first_never_yields_zero_size() {
        assert_eq!(PageRequest::first(0).size(), 1);
    }

    #[rstest]
    fn window_past_the_end_is_empty_but_keeps_totals() {
        let request = PageRequest::new(5, 2).expect("valid request");
        let page = Page::from_ordered(vec![1, 2, 3], request);
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[rstest]
    fn last_page_is_detected() {
        let request = PageRequest::new(1, 2).expect("valid request");
        let page = Page::from_ordered(vec![1, 2, 3], request);
        assert_eq!(page.content(), &[3]);
        assert!(page.is_last());
    }

    #[rstest]
    fn map_preserves_metadata() {
        let request = PageRequest::new(0, 2).expect("valid request");
        let page = Page::from_ordered(vec![1, 2, 3], request).map(|n| n * 10);
        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.size(), 2);
    }

    #[rstest]
    fn page_serialises_in_camel_case() {
        let request = PageRequest::first(1);
        let page = Page::from_ordered(vec!["x"], request);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["totalElements"], 1);
        assert_eq!(value["content"][0], "x");
    }

    #[rstest]
    fn page_request_deserialisation_validates_size() {
        let result: Result<PageRequest, _> = serde_json::from_str(r#"{"page":0,"size":0}"#);
        assert!(result.is_err());
    }
}
