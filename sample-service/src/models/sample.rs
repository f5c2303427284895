use standard_response::prelude::*;

/// One demo item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleItem {
    pub key: String,
    pub value: u64,
}

impl SampleItem {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
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

/// Single-item payload, rendered in camelCase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePayload {
    pub value_1: String,
    pub value_2: i64,
}

impl Model for SamplePayload {
    fn owner_type() -> OwnerType {
        OwnerType::new("SamplePayload")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("value_1", &self.value_1)
            .field("value_2", &self.value_2)
            .with_case_convention(CaseConvention::Camel)
            .into()
    }
}

/// Payload embedding a page of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePageListPayload {
    pub value_1: String,
    pub value_2: i64,
    pub pageable: PageableList<SampleItem>,
}

impl Model for SamplePageListPayload {
    fn owner_type() -> OwnerType {
        OwnerType::new("SamplePageListPayload")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("value_1", &self.value_1)
            .field("value_2", &self.value_2)
            .field("pageable", &self.pageable)
            .into()
    }
}

/// Payload embedding an incremental window of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIncrementalListPayload {
    pub value_1: String,
    pub value_2: i64,
    pub incremental: IncrementalList<SampleItem>,
}

impl Model for SampleIncrementalListPayload {
    fn owner_type() -> OwnerType {
        OwnerType::new("SampleIncrementalListPayload")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("value_1", &self.value_1)
            .field("value_2", &self.value_2)
            .field("incremental", &self.incremental)
            .into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub age: u32,
}

impl Model for Profile {
    fn owner_type() -> OwnerType {
        OwnerType::new("Profile")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("age", &self.age)
            .with_alias("age", "user_age")
            .with_case_convention(CaseConvention::Camel)
            .into()
    }
}

/// User record with its own output names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub profile: Profile,
}

impl Model for User {
    fn owner_type() -> OwnerType {
        OwnerType::new("User")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("profile", &self.profile)
            .with_aliases([("id", "user_id"), ("age", "user_age"), ("name", "full_name")])
            .with_case_convention(CaseConvention::Camel)
            .into()
    }
}
