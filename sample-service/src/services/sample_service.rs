//! Demo data and the payloads built from it

use standard_response::prelude::*;

use crate::models::{
    SampleIncrementalListPayload, SampleItem, SamplePageListPayload, SamplePayload,
};

const ITEM_COUNT: u64 = 100;

/// In-memory item store: `key_0 .. key_99` with values `0 .. 99`
#[derive(Debug, Clone)]
pub struct SampleService {
    items: Vec<SampleItem>,
}

impl Default for SampleService {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleService {
    pub fn new() -> Self {
        let items = (0..ITEM_COUNT)
            .map(|i| SampleItem::new(format!("key_{i}"), i))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[SampleItem] {
        &self.items
    }

    fn total(&self) -> u64 {
        self.items.len() as u64
    }

    /// Echo the inputs back, rejecting negative `value_2`
    pub fn get_item(
        &self,
        value_1: &str,
        value_2: i64,
    ) -> std::result::Result<SamplePayload, ErrorPayload> {
        if value_2 < 0 {
            return Err(ErrorPayload::new("INVALID_VALUE", "value_2 must not be negative")
                .with_detail(format!("value_2 = {value_2}")));
        }

        Ok(SamplePayload {
            value_1: value_1.to_string(),
            value_2,
        })
    }

    /// Page of items; a page of 0 returns everything
    pub fn get_pageable_only(&self, page: i64, page_size: u64) -> PageableList<SampleItem> {
        PageableList::build(&self.items, self.total(), page_size, page, key_order())
    }

    pub fn get_pageable_list(&self, page: i64, page_size: u64) -> SamplePageListPayload {
        SamplePageListPayload {
            value_1: "page_list_sample".to_string(),
            value_2: 0,
            pageable: self.get_pageable_only(page, page_size),
        }
    }

    /// Window of items starting at a numeric offset
    pub fn get_incremental_list(
        &self,
        start_index: u64,
        how_many: u64,
    ) -> SampleIncrementalListPayload {
        if start_index >= self.total() {
            return no_more_item(IncrementalList::from_index(
                &self.items,
                start_index,
                how_many,
                "sequence",
                key_order(),
            ));
        }

        let order = OrderInfo::sorted_by(vec![OrderBy::asc("key"), OrderBy::asc("value")]);
        SampleIncrementalListPayload {
            value_1: "expandable_list_sample".to_string(),
            value_2: 0,
            incremental: IncrementalList::from_index(
                &self.items,
                start_index,
                how_many,
                "sequence",
                order,
            ),
        }
    }

    /// Window of items starting at the item with key `start_key`
    pub fn get_incremental_list_by_key(
        &self,
        start_key: &str,
        how_many: u64,
    ) -> SampleIncrementalListPayload {
        let incremental = IncrementalList::by_key(
            &self.items,
            start_key,
            how_many,
            "key",
            key_order(),
            |item| item.key.as_str(),
        );

        if incremental.items.is_empty() {
            return no_more_item(incremental);
        }

        SampleIncrementalListPayload {
            value_1: "expandable_list_sample".to_string(),
            value_2: 0,
            incremental,
        }
    }
}

fn key_order() -> OrderInfo {
    OrderInfo::sorted_by(vec![OrderBy::asc("key")])
}

fn no_more_item(incremental: IncrementalList<SampleItem>) -> SampleIncrementalListPayload {
    SampleIncrementalListPayload {
        value_1: "no more item".to_string(),
        value_2: 0,
        incremental,
    }
}
