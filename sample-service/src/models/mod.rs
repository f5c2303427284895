pub mod sample;

pub use sample::{
    Profile, SampleIncrementalListPayload, SampleItem, SamplePageListPayload, SamplePayload, User,
};
