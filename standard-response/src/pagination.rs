//! Page-based list payloads
//!
//! [`paginate`] cuts one page out of an item sequence and computes the page
//! metadata. A page number of zero (or below) means "everything": the result
//! is a single page holding every item.
//!
//! # Example
//!
//! ```rust
//! use standard_response::pagination::paginate;
//!
//! let items: Vec<u32> = (0..100).collect();
//!
//! let (page, batch) = paginate(&items, 100, 10, 3);
//! assert_eq!(page.current, 3);
//! assert_eq!(page.total, 10);
//! assert_eq!(batch.list, (20..30).collect::<Vec<_>>());
//!
//! let (page, batch) = paginate(&items, 100, 10, 0);
//! assert_eq!(page.total, 1);
//! assert_eq!(batch.current, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::alias::OwnerType;
use crate::order::OrderInfo;
use crate::value::{Model, Record, StructuredValue};

/// Page metadata
///
/// `current` echoes the requested page and is not capped at `total`: a page
/// past the end reports, for example, `current = 11` with `total = 10` and
/// comes with an empty batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Current page number (1-indexed)
    pub current: u64,
    /// Number of items per page
    pub size: u64,
    /// Total number of pages (0 when there are no items)
    pub total: u64,
    /// Total number of items across all pages
    pub total_items: u64,
}

impl PageInfo {
    /// Compute page metadata
    ///
    /// `current_page <= 0` describes the single page holding all
    /// `total_items`. A zero `page_size` is treated as 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::pagination::PageInfo;
    ///
    /// let page = PageInfo::build(45, 20, 1);
    /// assert_eq!(page.total, 3);
    /// assert!(page.has_next());
    /// assert!(!page.has_prev());
    /// ```
    #[must_use]
    pub fn build(total_items: u64, page_size: u64, current_page: i64) -> Self {
        let (current, size) = effective_page(current_page, page_size, total_items, 0);
        Self::with_effective(current, size, total_items)
    }

    fn with_effective(current: u64, size: u64, total_items: u64) -> Self {
        Self {
            current,
            size,
            total: calculate_total_pages(total_items, size),
            total_items,
        }
    }

    /// Whether a page follows this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Whether a page precedes this one
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Index of the first item of this page
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.current.saturating_sub(1).saturating_mul(self.size)
    }
}

impl Model for PageInfo {
    fn owner_type() -> OwnerType {
        OwnerType::new("PageInfo")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("current", &self.current)
            .field("size", &self.size)
            .field("total", &self.total)
            .field("total_items", &self.total_items)
            .into()
    }
}

/// One batch of items out of a larger sequence
///
/// `current` always equals `list.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items<T> {
    /// Number of items in the whole sequence
    pub total: u64,
    /// Number of items in this batch
    pub current: u64,
    /// The batch, in sequence order
    pub list: Vec<T>,
}

impl<T> Items<T> {
    /// Wrap a batch taken from a sequence of `total` items
    pub fn build(total: u64, list: Vec<T>) -> Self {
        Self {
            total,
            current: list.len() as u64,
            list,
        }
    }

    /// An empty batch
    pub fn empty(total: u64) -> Self {
        Self::build(total, Vec::new())
    }

    /// Map every item to a new type
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::pagination::Items;
    ///
    /// let items = Items::build(10, vec![1, 2, 3]);
    /// let mapped = items.map(|n| n.to_string());
    /// assert_eq!(mapped.list, vec!["1", "2", "3"]);
    /// assert_eq!(mapped.total, 10);
    /// ```
    pub fn map<U, F>(self, f: F) -> Items<U>
    where
        F: FnMut(T) -> U,
    {
        Items::build(self.total, self.list.into_iter().map(f).collect())
    }

    /// Number of items in this batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether this batch is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T: Model> Model for Items<T> {
    fn owner_type() -> OwnerType {
        OwnerType::generic("Items", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("total", &self.total)
            .field("current", &self.current)
            .field("list", &self.list)
            .into()
    }
}

/// A page of items with page and ordering metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageableList<T> {
    /// Page metadata
    pub page: PageInfo,
    /// Ordering of the whole sequence
    pub order: OrderInfo,
    /// Items of this page
    pub items: Items<T>,
}

impl<T: Clone> PageableList<T> {
    /// Cut page `current_page` out of `items` and describe it
    ///
    /// See [`paginate`] for the paging policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::order::{OrderBy, OrderInfo};
    /// use standard_response::pagination::PageableList;
    ///
    /// let keys: Vec<String> = (0..25).map(|i| format!("key_{i}")).collect();
    /// let order = OrderInfo::sorted_by(vec![OrderBy::asc("key")]);
    ///
    /// let list = PageableList::build(&keys, 25, 10, 3, order);
    /// assert_eq!(list.page.total, 3);
    /// assert_eq!(list.items.current, 5);
    /// assert_eq!(list.items.list[0], "key_20");
    /// ```
    #[must_use]
    pub fn build(
        items: &[T],
        total_items: u64,
        page_size: u64,
        current_page: i64,
        order_info: OrderInfo,
    ) -> Self {
        let (page, items) = paginate(items, total_items, page_size, current_page);
        Self {
            page,
            order: order_info,
            items,
        }
    }
}

impl<T> PageableList<T> {
    /// Assemble a list from already computed parts
    pub fn new(page: PageInfo, order: OrderInfo, items: Items<T>) -> Self {
        Self { page, order, items }
    }
}

impl<T: Model> Model for PageableList<T> {
    fn owner_type() -> OwnerType {
        OwnerType::generic("PageableList", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("page", &self.page)
            .field("order", &self.order)
            .field("items", &self.items)
            .into()
    }
}

/// Cut one page out of `items` and compute its metadata
///
/// - `current_page <= 0`: a single page with every item; the page size
///   becomes `total_items` (or `items.len()` when `total_items` is 0).
/// - Otherwise the page is `items[(page-1)*size .. page*size]`, clamped to the
///   sequence. A page past the end is empty, not an error.
/// - `total` pages is `ceil(total_items / size)`, 0 when `total_items` is 0.
/// - A zero `page_size` is treated as 1.
#[must_use]
pub fn paginate<T: Clone>(
    items: &[T],
    total_items: u64,
    page_size: u64,
    current_page: i64,
) -> (PageInfo, Items<T>) {
    let (current, size) = effective_page(current_page, page_size, total_items, items.len());
    let page = PageInfo::with_effective(current, size, total_items);

    let start = clamp_index(page.offset(), items.len());
    let end = clamp_index(page.offset().saturating_add(size), items.len());
    let batch = Items::build(total_items, items[start..end].to_vec());

    tracing::debug!(
        page = page.current,
        size = page.size,
        total_pages = page.total,
        total_items,
        returned = batch.current,
        "Built page"
    );

    (page, batch)
}

/// Effective (page, size) after applying the "page 0 means all" policy
fn effective_page(
    current_page: i64,
    page_size: u64,
    total_items: u64,
    available: usize,
) -> (u64, u64) {
    if current_page <= 0 {
        let size = if total_items > 0 {
            total_items
        } else {
            available as u64
        };
        (1, size.max(1))
    } else {
        (current_page.unsigned_abs(), page_size.max(1))
    }
}

fn clamp_index(index: u64, len: usize) -> usize {
    usize::try_from(index).map_or(len, |index| index.min(len))
}

/// Calculate total pages, rounding up
fn calculate_total_pages(total_items: u64, page_size: u64) -> u64 {
    // Ceiling division: (total + size - 1) / size
    total_items.saturating_add(page_size).saturating_sub(1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderBy;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct SampleItem {
        key: String,
        value: u64,
    }

    impl Model for SampleItem {
        fn owner_type() -> OwnerType {
            OwnerType::new("SampleItem")
        }

        fn to_structured(&self) -> StructuredValue {
            Record::of::<Self>()
                .field("key", &self.key)
                .field("value", &self.value)
                .into()
        }
    }

    fn sample_items() -> Vec<SampleItem> {
        (0..100)
            .map(|i| SampleItem {
                key: format!("key_{i}"),
                value: i,
            })
            .collect()
    }

    #[test]
    fn test_every_full_page() {
        let items = sample_items();
        for page in 1..=10 {
            let (info, batch) = paginate(&items, 100, 10, page);
            assert_eq!(info.total, 10);
            assert_eq!(info.current, page as u64);
            assert_eq!(batch.current, 10);
            assert_eq!(batch.total, 100);
        }
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let items = sample_items();
        let (info, batch) = paginate(&items, 100, 10, 11);
        assert_eq!(info.current, 11);
        assert_eq!(info.total, 10);
        assert!(info.current > info.total);
        assert_eq!(batch.current, 0);
        assert!(batch.is_empty());
        assert!(!info.has_next());
        assert!(info.has_prev());
    }

    #[test]
    fn test_page_zero_returns_everything() {
        let items = sample_items();
        let (info, batch) = paginate(&items, 100, 10, 0);
        assert_eq!(info.current, 1);
        assert_eq!(info.size, 100);
        assert_eq!(info.total, 1);
        assert_eq!(batch.current, 100);
        assert_eq!(batch.list, items);

        let (info, _) = paginate(&items, 100, 10, -4);
        assert_eq!(info.current, 1);
        assert_eq!(info.size, 100);
    }

    #[test]
    fn test_page_zero_without_total_uses_sequence_length() {
        let items = sample_items();
        let (info, batch) = paginate(&items[..7], 0, 10, 0);
        assert_eq!(info.size, 7);
        assert_eq!(info.total, 0);
        assert_eq!(batch.current, 7);
    }

    #[test]
    fn test_third_page_of_sample_items() {
        let items = sample_items();
        let (info, batch) = paginate(&items, 100, 10, 3);
        assert_eq!(
            info,
            PageInfo {
                current: 3,
                size: 10,
                total: 10,
                total_items: 100
            }
        );
        assert_eq!(batch.list, items[20..30].to_vec());
        assert_eq!(batch.list[0].key, "key_20");
    }

    #[test]
    fn test_partial_last_page() {
        let items = sample_items();
        let (info, batch) = paginate(&items[..45], 45, 20, 3);
        assert_eq!(info.total, 3);
        assert_eq!(batch.current, 5);
        assert!(info.has_prev());
    }

    #[test]
    fn test_no_items() {
        let (info, batch) = paginate::<SampleItem>(&[], 0, 10, 1);
        assert_eq!(info.total, 0);
        assert_eq!(info.total_items, 0);
        assert_eq!(batch.current, 0);
    }

    #[test]
    fn test_zero_page_size_protected() {
        let info = PageInfo::build(100, 0, 1);
        assert_eq!(info.size, 1);
        assert_eq!(info.total, 100);
    }

    #[test]
    fn test_calculate_total_pages() {
        assert_eq!(calculate_total_pages(0, 20), 0);
        assert_eq!(calculate_total_pages(1, 20), 1);
        assert_eq!(calculate_total_pages(20, 20), 1);
        assert_eq!(calculate_total_pages(21, 20), 2);
        assert_eq!(calculate_total_pages(100, 20), 5);
        assert_eq!(calculate_total_pages(101, 20), 6);
    }

    #[test]
    fn test_page_info_offset() {
        assert_eq!(PageInfo::build(100, 20, 1).offset(), 0);
        assert_eq!(PageInfo::build(100, 20, 3).offset(), 40);
    }

    #[test]
    fn test_items_current_matches_list() {
        let items = Items::build(10, vec!["a", "b"]);
        assert_eq!(items.current, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(Items::<u8>::empty(5).current, 0);
    }

    #[test]
    fn test_pageable_list_structured_shape() {
        let items = sample_items();
        let order = OrderInfo::sorted_by(vec![OrderBy::asc("key")]);
        let list = PageableList::build(&items, 100, 2, 1, order);

        let structured = list.to_structured();
        assert!(matches!(structured, StructuredValue::GenericContainer(_)));
        assert_eq!(
            structured.into_json(),
            json!({
                "page": {"current": 1, "size": 2, "total": 50, "total_items": 100},
                "order": {"sorted": true, "by": [{"field": "key", "direction": "asc"}]},
                "items": {
                    "total": 100,
                    "current": 2,
                    "list": [{"key": "key_0", "value": 0}, {"key": "key_1", "value": 1}]
                }
            })
        );
    }

    #[test]
    fn test_owner_types_carry_element() {
        assert_eq!(Items::<SampleItem>::owner_type().to_string(), "Items<SampleItem>");
        assert_eq!(
            PageableList::<SampleItem>::owner_type().to_string(),
            "PageableList<SampleItem>"
        );
    }
}
