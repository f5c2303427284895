use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use standard_response::prelude::{
    AliasContext, CaseConvention, ConvertKey, Error, Items, Model, OrderInfo, PageInfo,
    PageableList, Produced, StandardResponse,
};

use crate::error::ApiError;
use crate::models::SampleItem;
use crate::AppState;

fn default_fetch_size() -> u64 {
    10
}

/// Query parameters for page-based lists
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Items per page (at least 1)
    #[serde(default = "default_fetch_size")]
    pub page_size: u64,
}

/// Query parameters for incremental lists
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    /// Items per window (at least 1)
    #[serde(default = "default_fetch_size")]
    pub how_many: u64,
}

fn validate_page(page: i64) -> Result<i64, ApiError> {
    if page < 0 {
        return Err(ApiError::invalid("page", "must be 0 or greater"));
    }
    Ok(page)
}

fn validate_count(name: &'static str, count: u64) -> Result<u64, ApiError> {
    if count == 0 {
        return Err(ApiError::invalid(name, "must be 1 or greater"));
    }
    Ok(count)
}

/// Output names used by the page list route
pub fn page_list_aliases() -> AliasContext {
    AliasContext::new()
        .with_alias(StandardResponse::owner_type(), "duration", "duration_time")
        .with_alias(PageInfo::owner_type(), "current", "current_page")
        .with_alias(PageInfo::owner_type(), "size", "page_size")
        .with_alias(PageInfo::owner_type(), "total", "total_pages")
        .with_alias(OrderInfo::owner_type(), "by", "order_by")
        .with_alias(Items::<SampleItem>::owner_type(), "current", "current_page")
        .with_alias(PageableList::<SampleItem>::owner_type(), "page", "page_info")
        .with_default_case_convention(CaseConvention::Camel)
}

/// Page of items inside a payload, with route-specific output names
pub async fn page_list(
    State(state): State<AppState>,
    Path(page): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = validate_page(page)?;
    let page_size = validate_count("page_size", query.page_size)?;

    let response = StandardResponse::build_with(&state.config.response, || {
        Ok::<_, Error>(Produced::ok(&state.service.get_pageable_list(page, page_size)))
    });

    Ok(Json(response.to_json_with(&page_list_aliases())))
}

/// Page of items as the whole payload
pub async fn page_only(
    State(state): State<AppState>,
    Path(page): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = validate_page(page)?;
    let page_size = validate_count("page_size", query.page_size)?;

    let response = StandardResponse::build_with(&state.config.response, || {
        Ok::<_, Error>(Produced::ok(&state.service.get_pageable_only(page, page_size)))
    });

    Ok(Json(response.to_json_with(&state.aliases)))
}

/// Incremental window starting at an offset
pub async fn more_list(
    State(state): State<AppState>,
    Path(start_index): Path<u64>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<Value>, ApiError> {
    let how_many = validate_count("how_many", query.how_many)?;

    let response = StandardResponse::build_with(&state.config.response, || {
        Ok::<_, Error>(Produced::ok(&state.service.get_incremental_list(start_index, how_many)))
    });

    Ok(Json(response.to_json_with(&state.aliases)))
}

/// Incremental window starting at a key
pub async fn more_list_by_key(
    State(state): State<AppState>,
    Path(start_key): Path<String>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<Value>, ApiError> {
    let how_many = validate_count("how_many", query.how_many)?;

    let response = StandardResponse::build_with(&state.config.response, || {
        Ok::<_, Error>(Produced::ok(
            &state.service.get_incremental_list_by_key(&start_key, how_many),
        ))
    });

    Ok(Json(response.to_json_with(&state.aliases)))
}
