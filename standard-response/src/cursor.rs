//! Incremental ("load more") list payloads
//!
//! A cursor window starts at a position in a sequence and covers up to
//! `how_many` items. The window reports where it ends and whether more items
//! follow, so a client can ask for the next window starting after `end`.
//!
//! Starting past the end of the sequence, or at a key that does not exist,
//! is not an error: the result is an empty, non-expandable window.
//!
//! # Example
//!
//! ```rust
//! use standard_response::cursor::{CursorInfo, CursorPosition};
//!
//! let cursor = CursorInfo::build_from_total(95, 10, 100, "sequence");
//! assert_eq!(cursor.end, Some(CursorPosition::Index(99)));
//! assert!(!cursor.expandable);
//!
//! let cursor = CursorInfo::build_from_total(0, 10, 100, "sequence");
//! assert_eq!(cursor.end, Some(CursorPosition::Index(9)));
//! assert!(cursor.expandable);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::OwnerType;
use crate::order::OrderInfo;
use crate::pagination::Items;
use crate::value::{Model, Record, StructuredValue};

/// A position in a sequence: a numeric offset or a domain key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorPosition {
    /// Zero-based offset
    Index(u64),
    /// Natural key of the item at the position
    Key(String),
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<u64> for CursorPosition {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<String> for CursorPosition {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for CursorPosition {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl Model for CursorPosition {
    fn owner_type() -> OwnerType {
        OwnerType::new("CursorPosition")
    }

    fn to_structured(&self) -> StructuredValue {
        match self {
            Self::Index(index) => StructuredValue::Scalar(Value::from(*index)),
            Self::Key(key) => StructuredValue::Scalar(Value::from(key.as_str())),
        }
    }
}

/// Cursor metadata of one window
///
/// `expandable` is true exactly when items exist beyond `end`; an absent
/// `end` means the window is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorInfo {
    /// Name of the field the cursor positions refer to
    pub field: String,
    /// Requested start position
    pub start: CursorPosition,
    /// Position of the last item in the window
    pub end: Option<CursorPosition>,
    /// Whether items follow the window
    pub expandable: bool,
}

impl CursorInfo {
    /// Describe the window of up to `how_many` items from `start_index`
    ///
    /// Positions are reported as numeric offsets. A zero `how_many` is
    /// treated as 1.
    #[must_use]
    pub fn build_from_total(
        start_index: u64,
        how_many: u64,
        total_items: u64,
        field: impl Into<String>,
    ) -> Self {
        Self::build(start_index, how_many, total_items, field, |_, index| {
            CursorPosition::Index(index)
        })
    }

    /// Describe a window, reporting positions through `convert_index`
    ///
    /// `convert_index(field, index)` is only called for indices inside the
    /// sequence. When `start_index` is past the end the start is reported as
    /// the raw offset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::cursor::{CursorInfo, CursorPosition};
    ///
    /// let keys = ["a", "b", "c", "d"];
    /// let cursor = CursorInfo::build(1, 2, 4, "key", |_, index| {
    ///     CursorPosition::from(keys[index as usize])
    /// });
    /// assert_eq!(cursor.start, CursorPosition::from("b"));
    /// assert_eq!(cursor.end, Some(CursorPosition::from("c")));
    /// assert!(cursor.expandable);
    /// ```
    #[must_use]
    pub fn build<F>(
        start_index: u64,
        how_many: u64,
        total_items: u64,
        field: impl Into<String>,
        convert_index: F,
    ) -> Self
    where
        F: Fn(&str, u64) -> CursorPosition,
    {
        let fetched = window(start_index, how_many, total_items).unwrap_or(0);
        Self::spanning(start_index, fetched, total_items, field, convert_index)
    }

    /// Describe a window holding exactly `fetched` items from `start_index`
    fn spanning<F>(
        start_index: u64,
        fetched: u64,
        total_items: u64,
        field: impl Into<String>,
        convert_index: F,
    ) -> Self
    where
        F: Fn(&str, u64) -> CursorPosition,
    {
        let field = field.into();
        if fetched == 0 {
            return Self::exhausted(field, CursorPosition::Index(start_index));
        }

        let last = start_index + fetched - 1;
        Self {
            start: convert_index(&field, start_index),
            end: Some(convert_index(&field, last)),
            expandable: start_index + fetched < total_items,
            field,
        }
    }

    /// An empty, non-expandable window that started at `start`
    pub fn exhausted(field: impl Into<String>, start: CursorPosition) -> Self {
        Self {
            field: field.into(),
            start,
            end: None,
            expandable: false,
        }
    }
}

impl Model for CursorInfo {
    fn owner_type() -> OwnerType {
        OwnerType::new("CursorInfo")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("field", &self.field)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("expandable", &self.expandable)
            .into()
    }
}

/// A window of items with cursor and ordering metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalList<T> {
    /// Cursor metadata
    pub cursor: CursorInfo,
    /// Ordering of the whole sequence
    pub order: OrderInfo,
    /// Items of this window
    pub items: Items<T>,
}

impl<T> IncrementalList<T> {
    /// Assemble a list from already computed parts
    pub fn new(cursor: CursorInfo, order: OrderInfo, items: Items<T>) -> Self {
        Self {
            cursor,
            order,
            items,
        }
    }
}

impl<T: Clone> IncrementalList<T> {
    /// Window of `items` starting at a numeric offset
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::cursor::IncrementalList;
    /// use standard_response::order::OrderInfo;
    ///
    /// let items: Vec<u32> = (0..100).collect();
    /// let list = IncrementalList::from_index(&items, 95, 10, "sequence", OrderInfo::unsorted());
    /// assert_eq!(list.items.current, 5);
    /// assert!(!list.cursor.expandable);
    /// ```
    #[must_use]
    pub fn from_index(
        items: &[T],
        start_index: u64,
        how_many: u64,
        cursor_field: impl Into<String>,
        order_info: OrderInfo,
    ) -> Self {
        Self::build(
            sequence_window(items, start_index, how_many),
            start_index,
            how_many,
            items.len() as u64,
            cursor_field,
            order_info,
            |_, index| CursorPosition::Index(index),
        )
    }

    /// Cursor metadata for an already fetched window
    ///
    /// `items` holds the items fetched from `start_index` on, for example
    /// one page read from a store. At most
    /// `min(how_many, total_items - start_index)` of them are kept, and
    /// `end` and `expandable` describe the items actually kept: a short
    /// window ends early, an empty one is exhausted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::cursor::{CursorPosition, IncrementalList};
    /// use standard_response::order::OrderInfo;
    ///
    /// let all: Vec<u32> = (0..100).collect();
    /// let order = OrderInfo::unsorted();
    /// let by_index = |_: &str, i: u64| CursorPosition::Index(i);
    ///
    /// let list = IncrementalList::build(&all[20..25], 20, 5, 100, "sequence", order, by_index);
    /// assert_eq!(list.items.list, vec![20, 21, 22, 23, 24]);
    /// assert_eq!(list.cursor.end, Some(CursorPosition::Index(24)));
    /// assert!(list.cursor.expandable);
    /// ```
    #[must_use]
    pub fn build<F>(
        items: &[T],
        start_index: u64,
        how_many: u64,
        total_items: u64,
        cursor_field: impl Into<String>,
        order_info: OrderInfo,
        convert_index: F,
    ) -> Self
    where
        F: Fn(&str, u64) -> CursorPosition,
    {
        let wanted = window(start_index, how_many, total_items).unwrap_or(0);
        let batch = &items[..clamp_index(wanted, items.len())];
        let fetched = batch.len() as u64;

        let cursor =
            CursorInfo::spanning(start_index, fetched, total_items, cursor_field, convert_index);
        let items = Items::build(total_items, batch.to_vec());

        tracing::debug!(
            field = %cursor.field,
            start = %cursor.start,
            returned = items.current,
            expandable = cursor.expandable,
            "Built cursor window"
        );

        Self::new(cursor, order_info, items)
    }

    /// Window of `items` starting at the item whose key is `start_key`
    ///
    /// The start item is found with a linear scan, O(n) per call. An unknown
    /// key yields an empty, non-expandable window whose start is the
    /// requested key. Start and end are reported as keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::cursor::{CursorPosition, IncrementalList};
    /// use standard_response::order::OrderInfo;
    ///
    /// let keys: Vec<String> = (0..100).map(|i| format!("key_{i}")).collect();
    ///
    /// let list = IncrementalList::by_key(&keys, "key_95", 10, "key", OrderInfo::unsorted(), |k| {
    ///     k.as_str()
    /// });
    /// assert_eq!(list.cursor.end, Some(CursorPosition::from("key_99")));
    /// assert_eq!(list.items.current, 5);
    ///
    /// let missing = IncrementalList::by_key(&keys, "nope", 10, "key", OrderInfo::unsorted(), |k| {
    ///     k.as_str()
    /// });
    /// assert_eq!(missing.items.current, 0);
    /// assert_eq!(missing.cursor.end, None);
    /// ```
    #[must_use]
    pub fn by_key<K>(
        items: &[T],
        start_key: &str,
        how_many: u64,
        cursor_field: impl Into<String>,
        order_info: OrderInfo,
        key_of: K,
    ) -> Self
    where
        K: Fn(&T) -> &str,
    {
        let total_items = items.len() as u64;
        let Some(start_index) = items.iter().position(|item| key_of(item) == start_key) else {
            tracing::debug!(start_key, "Cursor key not found");
            return Self::new(
                CursorInfo::exhausted(cursor_field, CursorPosition::from(start_key)),
                order_info,
                Items::empty(total_items),
            );
        };

        let start_index = start_index as u64;
        Self::build(
            sequence_window(items, start_index, how_many),
            start_index,
            how_many,
            total_items,
            cursor_field,
            order_info,
            |_, index| {
                // `index` lies inside the window, so inside `items`
                CursorPosition::from(key_of(&items[index as usize]))
            },
        )
    }
}

impl<T: Model> Model for IncrementalList<T> {
    fn owner_type() -> OwnerType {
        OwnerType::generic("IncrementalList", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("cursor", &self.cursor)
            .field("order", &self.order)
            .field("items", &self.items)
            .into()
    }
}

/// Number of items in the window, or `None` when it starts past the end
fn window(start_index: u64, how_many: u64, total_items: u64) -> Option<u64> {
    if start_index >= total_items {
        return None;
    }
    Some(how_many.max(1).min(total_items - start_index))
}

/// The items of `items[start_index ..]` a window of `how_many` covers
fn sequence_window<T>(items: &[T], start_index: u64, how_many: u64) -> &[T] {
    let fetched = window(start_index, how_many, items.len() as u64).unwrap_or(0);
    let start = clamp_index(start_index, items.len());
    let end = clamp_index(start_index.saturating_add(fetched), items.len());
    &items[start..end]
}

fn clamp_index(index: u64, len: usize) -> usize {
    usize::try_from(index).map_or(len, |index| index.min(len))
}
