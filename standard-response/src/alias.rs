//! Field aliases and default naming convention
//!
//! Output key names are resolved per *canonical field*: the pair of the
//! owning type and the field name as declared. Owners of generic containers
//! include their element type, so `Items<SampleItem>` and `Items<Order>` are
//! aliased independently.
//!
//! Resolution state lives in an [`AliasContext`] value that a request builds,
//! hands to [`convert_key`](crate::convert::convert_key) and drops. The
//! process-wide [`AliasRegistry`] wraps one context behind a lock for callers
//! that prefer a global registry.
//!
//! # Example
//!
//! ```rust
//! use standard_response::alias::{AliasContext, OwnerType};
//! use standard_response::case::CaseConvention;
//!
//! let mut aliases = AliasContext::new();
//! aliases.add_alias(OwnerType::new("PageInfo"), "current", "current_page");
//! aliases.set_default_case_convention(CaseConvention::Camel);
//!
//! let page_info = OwnerType::new("PageInfo");
//! assert_eq!(aliases.resolve(&page_info, "current", None), "current_page");
//! assert_eq!(aliases.resolve(&page_info, "total_items", None), "totalItems");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::case::{convert, CaseConvention};
use crate::config::AliasConfig;
use crate::error::{Error, Result};
use crate::value::Model;

/// Identity of a type that owns fields
///
/// A plain type is identified by its kind (`"PageInfo"`); a generic
/// container additionally carries the identity of its element type
/// (`"Items<SampleItem>"`).
///
/// # Example
///
/// ```rust
/// use standard_response::alias::OwnerType;
///
/// let item = OwnerType::new("SampleItem");
/// let items = OwnerType::generic("Items", &item);
/// assert_eq!(items.to_string(), "Items<SampleItem>");
/// assert_eq!("Items<SampleItem>".parse::<OwnerType>().unwrap(), items);
/// assert_ne!(items, OwnerType::generic("Items", &OwnerType::new("Other")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerType {
    kind: String,
    element: Option<String>,
}

impl OwnerType {
    /// Identity of a non-generic type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            element: None,
        }
    }

    /// Identity of a generic container instantiated with `element`
    pub fn generic(kind: impl Into<String>, element: &OwnerType) -> Self {
        Self {
            kind: kind.into(),
            element: Some(element.to_string()),
        }
    }

    /// Identity of a [`Model`] type
    #[must_use]
    pub fn of<M: Model>() -> Self {
        M::owner_type()
    }

    /// The container or type name
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The element type identity, for generic containers
    #[must_use]
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Whether this identity belongs to a generic instantiation
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.element.is_some()
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}<{}>", self.kind, element),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for OwnerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = || Error::InvalidOwnerType(s.to_string());

        match text.find('<') {
            None => {
                if text.is_empty() || text.contains('>') {
                    return Err(invalid());
                }
                Ok(Self::new(text))
            }
            Some(open) => {
                let inner = text
                    .strip_suffix('>')
                    .map(|rest| &rest[open + 1..])
                    .ok_or_else(invalid)?;
                let kind = text[..open].trim();
                if kind.is_empty() || kind.contains('>') {
                    return Err(invalid());
                }
                // Normalizes whitespace inside nested generics
                let element: OwnerType = inner.parse().map_err(|_| invalid())?;
                Ok(Self::generic(kind, &element))
            }
        }
    }
}

impl TryFrom<String> for OwnerType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<OwnerType> for String {
    fn from(owner: OwnerType) -> Self {
        owner.to_string()
    }
}

/// A field as declared on its owning type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalField {
    /// The owning type
    pub owner: OwnerType,
    /// Field name before any alias or convention is applied
    pub field: String,
}

impl CanonicalField {
    /// Create a canonical field identity
    pub fn new(owner: OwnerType, field: impl Into<String>) -> Self {
        Self {
            owner,
            field: field.into(),
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.field)
    }
}

/// Alias entries plus a default naming convention
///
/// Build one per conversion episode (typically per request) and pass it to
/// [`convert_key`](crate::convert::convert_key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasContext {
    aliases: HashMap<CanonicalField, String>,
    default_convention: Option<CaseConvention>,
}

impl AliasContext {
    /// Create an empty context (no aliases, no default convention)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from the `aliases` configuration section
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::alias::{AliasContext, OwnerType};
    /// use standard_response::case::CaseConvention;
    /// use standard_response::config::{AliasConfig, AliasEntryConfig};
    ///
    /// let config = AliasConfig {
    ///     default_case_convention: Some(CaseConvention::Camel),
    ///     entries: vec![AliasEntryConfig {
    ///         owner: "Items<SampleItem>".parse().unwrap(),
    ///         field: "current".to_string(),
    ///         name: "current_page".to_string(),
    ///     }],
    /// };
    ///
    /// let aliases = AliasContext::from_config(&config);
    /// let owner: OwnerType = "Items<SampleItem>".parse().unwrap();
    /// assert_eq!(aliases.alias_for(&owner, "current"), Some("current_page"));
    /// ```
    #[must_use]
    pub fn from_config(config: &AliasConfig) -> Self {
        let mut context = Self::new();
        if let Some(convention) = config.default_case_convention {
            context.set_default_case_convention(convention);
        }
        for entry in &config.entries {
            context.add_alias(entry.owner.clone(), entry.field.clone(), entry.name.clone());
        }
        context
    }

    /// Remove every alias and reset the default convention to unset
    pub fn clear(&mut self) {
        self.aliases.clear();
        self.default_convention = None;
    }

    /// Register (or overwrite) the output name of one canonical field
    ///
    /// Returns the previously registered output name, if any.
    pub fn add_alias(
        &mut self,
        owner: OwnerType,
        field: impl Into<String>,
        name: impl Into<String>,
    ) -> Option<String> {
        let key = CanonicalField::new(owner, field);
        let name = name.into();
        let previous = self.aliases.insert(key.clone(), name.clone());
        if let Some(ref old) = previous {
            tracing::debug!(field = %key, old = %old, new = %name, "Alias overwritten");
        }
        previous
    }

    /// Register an alias for a field of the [`Model`] type `M`
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::alias::AliasContext;
    /// use standard_response::pagination::{Items, PageInfo};
    ///
    /// let mut aliases = AliasContext::new();
    /// aliases.add_alias_for::<PageInfo>("size", "page_size");
    /// aliases.add_alias_for::<Items<String>>("current", "current_page");
    /// assert_eq!(aliases.len(), 2);
    /// ```
    pub fn add_alias_for<M: Model>(
        &mut self,
        field: impl Into<String>,
        name: impl Into<String>,
    ) -> Option<String> {
        self.add_alias(M::owner_type(), field, name)
    }

    /// Builder form of [`add_alias`](Self::add_alias)
    #[must_use]
    pub fn with_alias(
        mut self,
        owner: OwnerType,
        field: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.add_alias(owner, field, name);
        self
    }

    /// Set the convention used when a record has none of its own
    pub fn set_default_case_convention(&mut self, convention: CaseConvention) {
        self.default_convention = Some(convention);
    }

    /// Builder form of [`set_default_case_convention`](Self::set_default_case_convention)
    #[must_use]
    pub fn with_default_case_convention(mut self, convention: CaseConvention) -> Self {
        self.set_default_case_convention(convention);
        self
    }

    /// The default convention, if one is set
    #[must_use]
    pub fn default_case_convention(&self) -> Option<CaseConvention> {
        self.default_convention
    }

    /// The registered output name for `owner.field`
    #[must_use]
    pub fn alias_for(&self, owner: &OwnerType, field: &str) -> Option<&str> {
        // Borrowed lookups would need a second key type; the key is small.
        self.aliases
            .get(&CanonicalField::new(owner.clone(), field))
            .map(String::as_str)
    }

    /// Resolve the output name of `owner.field`
    ///
    /// Order: registered alias, then `instance_convention`, then the default
    /// convention, then the field name unchanged.
    #[must_use]
    pub fn resolve(
        &self,
        owner: &OwnerType,
        field: &str,
        instance_convention: Option<CaseConvention>,
    ) -> String {
        if let Some(alias) = self.alias_for(owner, field) {
            return alias.to_string();
        }
        match instance_convention.or(self.default_convention) {
            Some(convention) => convert(field, convention),
            None => field.to_string(),
        }
    }

    /// Number of registered aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no alias is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

static GLOBAL_ALIASES: Lazy<Mutex<AliasContext>> = Lazy::new(|| Mutex::new(AliasContext::new()));

/// Process-wide alias registry
///
/// Every operation locks the shared context. Mutating the registry from
/// concurrent requests interleaves their aliases unless the whole
/// clear → populate → convert → clear sequence runs inside
/// [`episode`](Self::episode), which holds the lock throughout.
///
/// # Example
///
/// ```rust
/// use standard_response::alias::AliasRegistry;
/// use standard_response::case::CaseConvention;
/// use standard_response::convert::convert_key;
/// use standard_response::pagination::PageInfo;
/// use standard_response::value::Model;
///
/// let page = PageInfo::build(100, 10, 3);
/// let converted = AliasRegistry::episode(|aliases| {
///     aliases.add_alias_for::<PageInfo>("current", "current_page");
///     aliases.set_default_case_convention(CaseConvention::Camel);
///     convert_key(&page.to_structured(), aliases)
/// });
///
/// let json = converted.into_json();
/// assert_eq!(json["current_page"], 3);
/// assert_eq!(json["totalItems"], 100);
/// ```
pub struct AliasRegistry;

impl AliasRegistry {
    /// Lock and return the shared context
    ///
    /// A poisoned lock is recovered: the context holds plain data. The lock
    /// is not reentrant: calling any `AliasRegistry` function while the
    /// guard is alive, including from inside [`episode`](Self::episode),
    /// deadlocks the calling thread.
    pub fn global() -> MutexGuard<'static, AliasContext> {
        GLOBAL_ALIASES.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove all aliases and the default convention
    pub fn clear() {
        Self::global().clear();
    }

    /// Register (or overwrite) one alias
    pub fn add_alias(owner: OwnerType, field: impl Into<String>, name: impl Into<String>) {
        Self::global().add_alias(owner, field, name);
    }

    /// Set the process-wide default convention
    pub fn set_default_case_convention(convention: CaseConvention) {
        Self::global().set_default_case_convention(convention);
    }

    /// Copy of the current registry state
    #[must_use]
    pub fn snapshot() -> AliasContext {
        Self::global().clone()
    }

    /// Run one conversion episode with exclusive access to the registry
    ///
    /// The registry is cleared before `f` runs and again after it returns.
    /// Concurrent episodes run one after another. Inside `f`, modify the
    /// registry through the `&mut AliasContext` argument only; the static
    /// helpers (`add_alias`, `clear`, ...) would wait on the lock `f`
    /// already holds.
    pub fn episode<R>(f: impl FnOnce(&mut AliasContext) -> R) -> R {
        let mut guard = Self::global();
        guard.clear();
        let result = f(&mut *guard);
        guard.clear();
        result
    }
}
