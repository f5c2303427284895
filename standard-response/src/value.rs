//! Structured values and the [`Model`] trait
//!
//! Key conversion works on a small closed tree: scalars, records, lists and
//! generic containers. Typed values enter the tree through [`Model`], which
//! reports the owner identity used for alias lookups and builds the record.
//!
//! # Example
//!
//! ```rust
//! use standard_response::alias::OwnerType;
//! use standard_response::value::{Model, Record, StructuredValue};
//!
//! struct SampleItem {
//!     key: String,
//!     value: i64,
//! }
//!
//! impl Model for SampleItem {
//!     fn owner_type() -> OwnerType {
//!         OwnerType::new("SampleItem")
//!     }
//!
//!     fn to_structured(&self) -> StructuredValue {
//!         Record::of::<Self>()
//!             .field("key", &self.key)
//!             .field("value", &self.value)
//!             .into()
//!     }
//! }
//!
//! let item = SampleItem { key: "key_0".to_string(), value: 0 };
//! let json = item.to_structured().into_json();
//! assert_eq!(json["key"], "key_0");
//! assert_eq!(json["value"], 0);
//! ```

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::alias::OwnerType;
use crate::case::CaseConvention;
use crate::error::Result;

/// A value whose record keys can be converted
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    /// Leaf value, passed through conversion untouched
    ///
    /// Objects nested inside a scalar are opaque: their keys are not converted.
    Scalar(Value),
    /// Record of a plain type
    Record(Record),
    /// Ordered sequence
    List(Vec<StructuredValue>),
    /// Record of a generic container instantiated with an element type
    GenericContainer(Record),
}

impl StructuredValue {
    /// A JSON `null` scalar
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Value::Null)
    }

    /// Wrap any serializable value as an opaque scalar
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::value::StructuredValue;
    ///
    /// let tags = StructuredValue::from_serialize(&vec!["a", "b"]).unwrap();
    /// assert!(tags.is_scalar());
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Scalar(serde_json::to_value(value)?))
    }

    /// Whether this is a scalar
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// The record behind a `Record` or `GenericContainer`
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) | Self::GenericContainer(record) => Some(record),
            _ => None,
        }
    }

    /// The elements of a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[StructuredValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The scalar value, if this is a scalar
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Field `key` of a record or generic container
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Field keys of a record or generic container, in order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.as_record()
            .map(|record| record.keys().collect())
            .unwrap_or_default()
    }

    /// Render as JSON, keeping field order
    ///
    /// When two fields share a key the later value wins and the key keeps
    /// the position of its first occurrence.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Scalar(value) => value,
            Self::List(items) => Value::Array(items.into_iter().map(Self::into_json).collect()),
            Self::Record(record) | Self::GenericContainer(record) => record.into_json(),
        }
    }
}

// Serialized through `into_json` so duplicate keys collapse the same way
impl Serialize for StructuredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.clone().into_json().serialize(serializer)
    }
}

impl From<Record> for StructuredValue {
    fn from(record: Record) -> Self {
        if record.owner().is_generic() {
            Self::GenericContainer(record)
        } else {
            Self::Record(record)
        }
    }
}

impl From<Value> for StructuredValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

/// Ordered fields of one typed value
///
/// Besides its fields a record may carry its own naming convention and its
/// own alias map; both apply to this record's keys only, never to nested
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    owner: OwnerType,
    fields: Vec<(String, StructuredValue)>,
    convention: Option<CaseConvention>,
    aliases: HashMap<String, String>,
    resolved: bool,
}

impl Record {
    /// Empty record owned by `owner`
    #[must_use]
    pub fn new(owner: OwnerType) -> Self {
        Self {
            owner,
            fields: Vec::new(),
            convention: None,
            aliases: HashMap::new(),
            resolved: false,
        }
    }

    /// Empty record owned by the [`Model`] type `M`
    #[must_use]
    pub fn of<M: Model + ?Sized>() -> Self {
        Self::new(M::owner_type())
    }

    /// Record produced by key conversion; its keys are final
    pub(crate) fn resolved(owner: OwnerType, fields: Vec<(String, StructuredValue)>) -> Self {
        Self {
            owner,
            fields,
            convention: None,
            aliases: HashMap::new(),
            resolved: true,
        }
    }

    /// Append a field from any [`Model`] value
    #[must_use]
    pub fn field<T: Model + ?Sized>(self, name: impl Into<String>, value: &T) -> Self {
        self.field_value(name, value.to_structured())
    }

    /// Append a field holding an already structured value
    #[must_use]
    pub fn field_value(mut self, name: impl Into<String>, value: StructuredValue) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field in place
    pub fn push(&mut self, name: impl Into<String>, value: StructuredValue) {
        self.fields.push((name.into(), value));
    }

    /// Set this record's own naming convention
    #[must_use]
    pub fn with_case_convention(mut self, convention: CaseConvention) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Alias one of this record's fields for this instance only
    #[must_use]
    pub fn with_alias(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), name.into());
        self
    }

    /// Alias several fields for this instance only
    #[must_use]
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The owning type
    #[must_use]
    pub fn owner(&self) -> &OwnerType {
        &self.owner
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[(String, StructuredValue)] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Value of the last field named `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// This record's own convention, if set
    #[must_use]
    pub fn case_convention(&self) -> Option<CaseConvention> {
        self.convention
    }

    /// This record's own alias for `field`, if set
    #[must_use]
    pub fn instance_alias(&self, field: &str) -> Option<&str> {
        self.aliases.get(field).map(String::as_str)
    }

    /// Whether the keys are already converted
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON object, keeping field order
    #[must_use]
    pub fn into_json(self) -> Value {
        let mut object = Map::with_capacity(self.fields.len());
        for (name, value) in self.fields {
            object.insert(name, value.into_json());
        }
        Value::Object(object)
    }
}

/// A type that can take part in key conversion
pub trait Model {
    /// Identity used as the alias owner for this type's fields
    fn owner_type() -> OwnerType;

    /// Build the structured form of this value
    fn to_structured(&self) -> StructuredValue;
}

macro_rules! scalar_model {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Model for $ty {
                fn owner_type() -> OwnerType {
                    OwnerType::new($name)
                }

                fn to_structured(&self) -> StructuredValue {
                    StructuredValue::Scalar(Value::from(self.clone()))
                }
            }
        )*
    };
}

scalar_model! {
    String => "String",
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

impl Model for str {
    fn owner_type() -> OwnerType {
        OwnerType::new("String")
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::Scalar(Value::from(self))
    }
}

impl Model for Value {
    fn owner_type() -> OwnerType {
        OwnerType::new("Value")
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::Scalar(self.clone())
    }
}

impl Model for StructuredValue {
    fn owner_type() -> OwnerType {
        OwnerType::new("StructuredValue")
    }

    fn to_structured(&self) -> StructuredValue {
        self.clone()
    }
}

impl<T: Model> Model for Option<T> {
    fn owner_type() -> OwnerType {
        OwnerType::generic("Option", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        match self {
            Some(value) => value.to_structured(),
            None => StructuredValue::null(),
        }
    }
}

impl<T: Model> Model for Vec<T> {
    fn owner_type() -> OwnerType {
        OwnerType::generic("Vec", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::List(self.iter().map(Model::to_structured).collect())
    }
}

impl<T: Model> Model for [T] {
    fn owner_type() -> OwnerType {
        OwnerType::generic("Vec", &T::owner_type())
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::List(self.iter().map(Model::to_structured).collect())
    }
}
