//! Ordering descriptors attached to list payloads
//!
//! # Example
//!
//! ```rust
//! use standard_response::order::{OrderBy, OrderDirection, OrderInfo};
//!
//! let order = OrderInfo::sorted_by(vec![
//!     OrderBy::asc("key"),
//!     OrderBy::new("value", OrderDirection::Desc),
//! ]);
//!
//! assert!(order.sorted);
//! assert_eq!(order.by.len(), 2);
//! assert_eq!(format!("{}", order.by[1].direction), "desc");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::OwnerType;
use crate::value::{Model, Record, StructuredValue};

/// Sort direction of one ordering field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Ascending order (A-Z, 0-9)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0)
    Desc,
}

impl OrderDirection {
    /// Lowercase name used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Model for OrderDirection {
    fn owner_type() -> OwnerType {
        OwnerType::new("OrderDirection")
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::Scalar(Value::from(self.as_str()))
    }
}

/// One ordering field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Field the list is ordered by
    pub field: String,
    /// Direction of the ordering
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Create an ordering field
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending ordering on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Asc)
    }

    /// Descending ordering on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, OrderDirection::Desc)
    }
}

impl Model for OrderBy {
    fn owner_type() -> OwnerType {
        OwnerType::new("OrderBy")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("field", &self.field)
            .field("direction", &self.direction)
            .into()
    }
}

/// How the items of a list are ordered
///
/// When `sorted` is false consumers ignore `by`; it is still serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderInfo {
    /// Whether the list is ordered at all
    pub sorted: bool,
    /// Ordering fields, most significant first
    #[serde(default)]
    pub by: Vec<OrderBy>,
}

impl OrderInfo {
    /// Create an ordering descriptor
    #[must_use]
    pub fn new(sorted: bool, by: Vec<OrderBy>) -> Self {
        Self { sorted, by }
    }

    /// A list sorted by the given fields
    #[must_use]
    pub fn sorted_by(by: Vec<OrderBy>) -> Self {
        Self::new(true, by)
    }

    /// An unsorted list
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }
}

impl Model for OrderInfo {
    fn owner_type() -> OwnerType {
        OwnerType::new("OrderInfo")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("sorted", &self.sorted)
            .field("by", &self.by)
            .into()
    }
}
