//! # standard-response
//!
//! A uniform response envelope for service APIs, with output-key conversion
//! and list metadata for page-based and incremental ("load more") lists.
//!
//! ## Features
//!
//! - **Key conversion**: rename the keys of nested results per field alias
//!   and naming convention ([`convert`], [`alias`], [`case`])
//! - **Pagination**: page metadata and page slicing ([`pagination`])
//! - **Cursors**: index- and key-based incremental windows ([`cursor`])
//! - **Envelope**: status, version, timing and error detail around a
//!   producer closure ([`response`])
//! - **Configuration**: layered TOML/env config with alias entries ([`config`])
//!
//! ## Example
//!
//! ```rust
//! use standard_response::prelude::*;
//!
//! #[derive(Clone)]
//! struct SampleItem {
//!     key: String,
//!     value: u64,
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
//! let items: Vec<SampleItem> = (0..100)
//!     .map(|i| SampleItem { key: format!("key_{i}"), value: i })
//!     .collect();
//!
//! let aliases = AliasContext::new()
//!     .with_alias(PageInfo::owner_type(), "current", "current_page")
//!     .with_default_case_convention(CaseConvention::Camel);
//!
//! let response = StandardResponse::build(|| {
//!     let order = OrderInfo::sorted_by(vec![OrderBy::asc("key")]);
//!     let list = PageableList::build(&items, 100, 10, 2, order);
//!     Ok::<_, Error>(Produced::ok(&list))
//! });
//!
//! let json = response.to_json_with(&aliases);
//! assert_eq!(json["status"], "SUCCESS");
//! assert_eq!(json["payload"]["page"]["current_page"], 2);
//! assert_eq!(json["payload"]["page"]["totalItems"], 100);
//! assert_eq!(json["payload"]["items"]["list"][0]["key"], "key_10");
//! ```

pub mod alias;
pub mod case;
pub mod config;
pub mod convert;
pub mod cursor;
pub mod error;
pub mod observability;
pub mod order;
pub mod pagination;
pub mod response;
pub mod value;

pub use error::{Error, KeyConflict, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::alias::{AliasContext, AliasRegistry, CanonicalField, OwnerType};
    pub use crate::case::CaseConvention;
    pub use crate::config::{AliasConfig, AliasEntryConfig, Config, ResponseConfig};
    pub use crate::convert::{convert_key, convert_key_with_report, ConvertKey};
    pub use crate::cursor::{CursorInfo, CursorPosition, IncrementalList};
    pub use crate::error::{Error, KeyConflict, Result};
    pub use crate::observability::init_tracing;
    pub use crate::order::{OrderBy, OrderDirection, OrderInfo};
    pub use crate::pagination::{paginate, Items, PageInfo, PageableList};
    pub use crate::response::{ErrorPayload, PayloadStatus, Produced, StandardResponse};
    pub use crate::value::{Model, Record, StructuredValue};
}
