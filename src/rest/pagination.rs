//! Paged list responses.

use serde::{Deserialize, Serialize};

/// One page of a Trendyol list endpoint.
///
/// Trendyol pages are zero-based. `total_pages` and `total_elements` are
/// `None` for endpoints that do not report totals (e.g. brands).
///
/// # Example
///
/// ```rust
/// use trendyol_api::rest::Page;
///
/// let page: Page<u32> = serde_json::from_str(
///     r#"{"content":[1,2],"page":0,"size":2,"totalPages":3,"totalElements":5}"#,
/// ).unwrap();
/// assert_eq!(page.len(), 2);
/// assert!(page.has_next_page());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Zero-based page number.
    #[serde(default)]
    pub page: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Number of pages, when reported.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Number of items across all pages, when reported.
    #[serde(default)]
    pub total_elements: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a page with no totals.
    #[must_use]
    pub fn unpaged(content: Vec<T>, page: u32) -> Self {
        let size = u32::try_from(content.len()).unwrap_or(u32::MAX);
        Self {
            content,
            page,
            size,
            total_pages: None,
            total_elements: None,
        }
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns `true` if the reported totals show a later page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.page.saturating_add(1) < total)
    }

    /// Returns the items, discarding paging information.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_page() {
        let page: Page<String> = serde_json::from_str(
            r#"{"content":["a"],"page":2,"size":50,"totalPages":3,"totalElements":101}"#,
        )
        .unwrap();

        assert_eq!(page.content, vec!["a".to_string()]);
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 50);
        assert_eq!(page.total_pages, Some(3));
        assert_eq!(page.total_elements, Some(101));
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let page: Page<String> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, None);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_unpaged_has_no_totals() {
        let page = Page::unpaged(vec![1, 2, 3], 4);
        assert_eq!(page.page, 4);
        assert_eq!(page.size, 3);
        assert_eq!(page.total_elements, None);
        assert_eq!(page.into_iter().sum::<i32>(), 6);
    }
}
