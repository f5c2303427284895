//! Recursive key conversion
//!
//! [`convert_key`] walks a [`StructuredValue`] and rebuilds it with every
//! record key replaced by its output name. Values, list order and list
//! lengths are untouched.
//!
//! The output name of a field is, in order of precedence:
//!
//! 1. the record's own alias for the field ([`Record::with_alias`]),
//! 2. the alias registered for `owner.field` in the [`AliasContext`],
//! 3. the field name in the record's own convention,
//! 4. the field name in the context's default convention,
//! 5. the field name unchanged.
//!
//! A record's own alias map and convention never apply to nested records.
//!
//! # Example
//!
//! ```rust
//! use standard_response::alias::{AliasContext, OwnerType};
//! use standard_response::case::CaseConvention;
//! use standard_response::convert::convert_key;
//! use standard_response::value::{Record, StructuredValue};
//!
//! let profile = Record::new(OwnerType::new("Profile")).field("age", &30_u32);
//! let user: StructuredValue = Record::new(OwnerType::new("User"))
//!     .field("user_name", "Alice")
//!     .field_value("profile", profile.into())
//!     .into();
//!
//! let aliases = AliasContext::new()
//!     .with_alias(OwnerType::new("Profile"), "age", "user_age")
//!     .with_default_case_convention(CaseConvention::Camel);
//!
//! let json = convert_key(&user, &aliases).into_json();
//! assert_eq!(json["userName"], "Alice");
//! assert_eq!(json["profile"]["user_age"], 30);
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::alias::AliasContext;
use crate::error::KeyConflict;
use crate::value::{Model, Record, StructuredValue};

/// Convert every record key of `value`
///
/// Conflicting output keys are logged and resolved last-writer-wins; use
/// [`convert_key_with_report`] to receive them.
#[must_use]
pub fn convert_key(value: &StructuredValue, aliases: &AliasContext) -> StructuredValue {
    let mut conflicts = Vec::new();
    transform(value, aliases, &mut conflicts)
}

/// Convert every record key of `value` and report output key conflicts
///
/// # Example
///
/// ```rust
/// use standard_response::alias::{AliasContext, OwnerType};
/// use standard_response::convert::convert_key_with_report;
/// use standard_response::value::{Record, StructuredValue};
///
/// let value: StructuredValue = Record::new(OwnerType::new("Pair"))
///     .field("first", &1_i32)
///     .field("second", &2_i32)
///     .with_alias("second", "first")
///     .into();
///
/// let (converted, conflicts) = convert_key_with_report(&value, &AliasContext::new());
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(converted.into_json()["first"], 2);
/// ```
#[must_use]
pub fn convert_key_with_report(
    value: &StructuredValue,
    aliases: &AliasContext,
) -> (StructuredValue, Vec<KeyConflict>) {
    let mut conflicts = Vec::new();
    let converted = transform(value, aliases, &mut conflicts);
    (converted, conflicts)
}

/// Key conversion for any [`Model`] value
pub trait ConvertKey: Model {
    /// Structured form of `self` with converted keys
    fn convert_key(&self, aliases: &AliasContext) -> StructuredValue {
        convert_key(&self.to_structured(), aliases)
    }

    /// JSON form of `self` with converted keys
    fn to_json_with(&self, aliases: &AliasContext) -> Value {
        self.convert_key(aliases).into_json()
    }
}

impl<T: Model + ?Sized> ConvertKey for T {}

fn transform(
    value: &StructuredValue,
    aliases: &AliasContext,
    conflicts: &mut Vec<KeyConflict>,
) -> StructuredValue {
    match value {
        StructuredValue::Scalar(scalar) => StructuredValue::Scalar(scalar.clone()),
        StructuredValue::List(items) => StructuredValue::List(
            items
                .iter()
                .map(|item| transform(item, aliases, conflicts))
                .collect(),
        ),
        StructuredValue::Record(record) => {
            StructuredValue::Record(transform_record(record, aliases, conflicts))
        }
        StructuredValue::GenericContainer(record) => {
            StructuredValue::GenericContainer(transform_record(record, aliases, conflicts))
        }
    }
}

fn transform_record(
    record: &Record,
    aliases: &AliasContext,
    conflicts: &mut Vec<KeyConflict>,
) -> Record {
    let mut fields: Vec<(String, StructuredValue)> = Vec::with_capacity(record.len());
    // output key -> (position in `fields`, canonical field that wrote it)
    let mut written: HashMap<String, (usize, &str)> = HashMap::with_capacity(record.len());

    for (name, value) in record.fields() {
        let output = output_name(record, name, aliases);
        let converted = transform(value, aliases, conflicts);

        if let Some((index, previous)) = written.get(&output).copied() {
            let conflict = KeyConflict {
                owner: record.owner().clone(),
                output: output.clone(),
                overwritten: previous.to_string(),
                kept: name.clone(),
            };
            tracing::warn!(
                owner = %conflict.owner,
                key = %conflict.output,
                overwritten = %conflict.overwritten,
                kept = %conflict.kept,
                "Two fields resolve to the same output key"
            );
            fields[index].1 = converted;
            written.insert(output, (index, name.as_str()));
            conflicts.push(conflict);
        } else {
            written.insert(output.clone(), (fields.len(), name.as_str()));
            fields.push((output, converted));
        }
    }

    Record::resolved(record.owner().clone(), fields)
}

fn output_name(record: &Record, field: &str, aliases: &AliasContext) -> String {
    if record.is_resolved() {
        return field.to_string();
    }
    if let Some(alias) = record.instance_alias(field) {
        return alias.to_string();
    }
    aliases.resolve(record.owner(), field, record.case_convention())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::OwnerType;
    use crate::case::CaseConvention;
    use serde_json::json;

    fn profile(age: u32) -> Record {
        Record::new(OwnerType::new("Profile")).field("age", &age)
    }

    fn user() -> Record {
        Record::new(OwnerType::new("User"))
            .field("id", &1_u64)
            .field("name", "Alice")
            .field("email", "alice@example.com")
            .field_value("profile", profile(30).into())
    }

    fn object_keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_scalar_unchanged() {
        let value = StructuredValue::Scalar(json!({"snake_key": 1}));
        let aliases = AliasContext::new().with_default_case_convention(CaseConvention::Camel);
        let converted = convert_key(&value, &aliases);
        assert_eq!(converted, value);
    }

    #[test]
    fn test_no_aliases_no_convention_is_identity_on_keys() {
        let value: StructuredValue = user().into();
        let json = convert_key(&value, &AliasContext::new()).into_json();
        assert_eq!(object_keys(&json), vec!["id", "name", "email", "profile"]);
        assert_eq!(json["profile"]["age"], 30);
    }

    #[test]
    fn test_instance_aliases_and_convention() {
        let value: StructuredValue = Record::new(OwnerType::new("User"))
            .field("id", &1_u64)
            .field("name", "Alice")
            .field("email_address", "alice@example.com")
            .field_value(
                "profile",
                profile(30)
                    .with_alias("age", "user_age")
                    .with_case_convention(CaseConvention::Camel)
                    .into(),
            )
            .with_aliases([("id", "user_id"), ("age", "user_age"), ("name", "full_name")])
            .with_case_convention(CaseConvention::Camel)
            .into();

        let json = convert_key(&value, &AliasContext::new()).into_json();
        assert_eq!(
            object_keys(&json),
            vec!["user_id", "full_name", "emailAddress", "profile"]
        );
        assert_eq!(json["profile"]["user_age"], 30);
    }

    #[test]
    fn test_registry_alias_beats_instance_convention() {
        let value: StructuredValue =
            profile(30).with_case_convention(CaseConvention::Pascal).into();
        let aliases = AliasContext::new().with_alias(OwnerType::new("Profile"), "age", "years_old");
        let json = convert_key(&value, &aliases).into_json();
        assert_eq!(object_keys(&json), vec!["years_old"]);
    }

    #[test]
    fn test_instance_alias_beats_registry_alias() {
        let value: StructuredValue = profile(30).with_alias("age", "mine").into();
        let aliases = AliasContext::new().with_alias(OwnerType::new("Profile"), "age", "theirs");
        let json = convert_key(&value, &aliases).into_json();
        assert_eq!(object_keys(&json), vec!["mine"]);
    }

    #[test]
    fn test_instance_convention_does_not_propagate() {
        let child = Record::new(OwnerType::new("Child")).field("total_items", &5_u32);
        let parent: StructuredValue = Record::new(OwnerType::new("Parent"))
            .field_value("child_value", child.into())
            .with_case_convention(CaseConvention::Camel)
            .into();

        let json = convert_key(&parent, &AliasContext::new()).into_json();
        assert_eq!(object_keys(&json), vec!["childValue"]);
        assert_eq!(object_keys(&json["childValue"]), vec!["total_items"]);

        let with_default = AliasContext::new().with_default_case_convention(CaseConvention::Kebab);
        let json = convert_key(&parent, &with_default).into_json();
        assert_eq!(object_keys(&json), vec!["childValue"]);
        assert_eq!(object_keys(&json["childValue"]), vec!["total-items"]);
    }

    #[test]
    fn test_lists_keep_order_and_length() {
        let list = StructuredValue::List(vec![
            profile(1).into(),
            StructuredValue::Scalar(json!("plain")),
            profile(3).into(),
        ]);
        let aliases = AliasContext::new().with_alias(OwnerType::new("Profile"), "age", "user_age");
        let json = convert_key(&list, &aliases).into_json();
        assert_eq!(json, json!([{"user_age": 1}, "plain", {"user_age": 3}]));
    }

    #[test]
    fn test_generic_container_aliases_by_element_type() {
        let owner_a = OwnerType::generic("Items", &OwnerType::new("A"));
        let owner_b = OwnerType::generic("Items", &OwnerType::new("B"));
        let value = StructuredValue::List(vec![
            Record::new(owner_a.clone()).field("current", &1_u32).into(),
            Record::new(owner_b).field("current", &2_u32).into(),
        ]);
        let aliases = AliasContext::new().with_alias(owner_a, "current", "current_page");
        let json = convert_key(&value, &aliases).into_json();
        assert_eq!(json, json!([{"current_page": 1}, {"current": 2}]));
    }

    #[test]
    fn test_conflict_last_writer_wins_and_is_reported() {
        let value: StructuredValue = Record::new(OwnerType::new("PageInfo"))
            .field("current", &1_u32)
            .field("size", &10_u32)
            .field("total", &5_u32)
            .into();
        let aliases = AliasContext::new()
            .with_alias(OwnerType::new("PageInfo"), "current", "page")
            .with_alias(OwnerType::new("PageInfo"), "total", "page");

        let (converted, conflicts) = convert_key_with_report(&value, &aliases);
        let json = converted.into_json();
        assert_eq!(object_keys(&json), vec!["page", "size"]);
        assert_eq!(json["page"], 5);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].output, "page");
        assert_eq!(conflicts[0].overwritten, "current");
        assert_eq!(conflicts[0].kept, "total");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let value: StructuredValue = user().into();
        let aliases = AliasContext::new()
            .with_alias(OwnerType::new("User"), "id", "user_id")
            .with_alias(OwnerType::new("Profile"), "age", "user_age")
            .with_default_case_convention(CaseConvention::Pascal);

        let once = convert_key(&value, &aliases);
        let twice = convert_key(&once, &aliases);
        assert_eq!(once, twice);
        assert_eq!(
            object_keys(&once.into_json()),
            vec!["user_id", "Name", "Email", "Profile"]
        );
    }

    #[test]
    fn test_input_is_not_modified() {
        let value: StructuredValue = user().into();
        let before = value.clone();
        let aliases = AliasContext::new().with_default_case_convention(CaseConvention::Kebab);
        let _ = convert_key(&value, &aliases);
        assert_eq!(value, before);
    }

    #[test]
    fn test_convert_key_trait_on_models() {
        let aliases = AliasContext::new().with_default_case_convention(CaseConvention::Camel);
        let json = vec![5_u8, 6].to_json_with(&aliases);
        assert_eq!(json, json!([5, 6]));
    }
}
