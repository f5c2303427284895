pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use standard_response::prelude::{AliasContext, Config};

use crate::services::SampleService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Output names for routes without their own alias set
    pub aliases: Arc<AliasContext>,
    pub service: Arc<SampleService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let aliases = config.alias_context();
        Self {
            config: Arc::new(config),
            aliases: Arc::new(aliases),
            service: Arc::new(SampleService::new()),
        }
    }
}

/// All routes of the service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/key_convert", get(handlers::key_convert))
        .route("/item/{value1}/{value2}", get(handlers::item))
        .route("/page_list/{page}", get(handlers::page_list))
        .route("/page_only/{page}", get(handlers::page_only))
        .route("/more_list/{start_index}", get(handlers::more_list))
        .route("/more_list_by_key/{start_key}", get(handlers::more_list_by_key))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = router(AppState::new(Config::default()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_envelope() {
        let (status, json) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["status", "version", "datetime", "duration", "payload", "error"]);
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["payload"], "ok");
        assert_eq!(json["error"], Value::Null);
    }

    #[tokio::test]
    async fn test_key_convert() {
        let (status, json) = get_json("/key_convert").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "user_id": 1,
                "full_name": "Hong Gildong",
                "email": "gildong@example.com",
                "profile": {"user_age": 30}
            })
        );
    }

    #[tokio::test]
    async fn test_item_success() {
        let (status, json) = get_json("/item/sample/7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["payload"], json!({"value1": "sample", "value2": 7}));
        assert_eq!(json["error"], Value::Null);
        assert!(json["duration"].is_f64());
        assert!(json["datetime"].is_string());
    }

    #[tokio::test]
    async fn test_item_domain_failure() {
        let (status, json) = get_json("/item/sample/-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "FAIL");
        assert_eq!(json["payload"]["code"], "INVALID_VALUE");
    }

    #[tokio::test]
    async fn test_page_list_aliases() {
        let (status, json) = get_json("/page_list/2?page_size=10").await;
        assert_eq!(status, StatusCode::OK);

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["status", "version", "datetime", "duration_time", "payload", "error"]
        );

        let payload = &json["payload"];
        assert_eq!(payload["value1"], "page_list_sample");
        assert_eq!(
            payload["pageable"]["page_info"],
            json!({"current_page": 2, "page_size": 10, "total_pages": 10, "totalItems": 100})
        );
        assert_eq!(
            payload["pageable"]["order"],
            json!({"sorted": true, "order_by": [{"field": "key", "direction": "asc"}]})
        );

        let items = &payload["pageable"]["items"];
        assert_eq!(items["total"], 100);
        assert_eq!(items["current_page"], 10);
        assert_eq!(items["list"][0], json!({"key": "key_10", "value": 10}));
    }

    #[tokio::test]
    async fn test_page_only_everything() {
        let (status, json) = get_json("/page_only/0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["payload"]["page"]["current"], 1);
        assert_eq!(json["payload"]["page"]["total"], 1);
        assert_eq!(json["payload"]["items"]["current"], 100);
    }

    #[tokio::test]
    async fn test_page_out_of_range_is_empty() {
        let (_, json) = get_json("/page_only/11").await;
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["payload"]["items"]["current"], 0);
        assert_eq!(json["payload"]["items"]["list"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let (status, json) = get_json("/page_list/1?page_size=0").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_PARAMETER");

        let (status, _) = get_json("/page_only/-1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = get_json("/more_list/0?how_many=0").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_more_list() {
        let (_, json) = get_json("/more_list/95").await;
        let incremental = &json["payload"]["incremental"];
        assert_eq!(json["payload"]["value_1"], "expandable_list_sample");
        assert_eq!(
            incremental["cursor"],
            json!({"field": "sequence", "start": 95, "end": 99, "expandable": false})
        );
        assert_eq!(incremental["items"]["current"], 5);

        let (_, json) = get_json("/more_list/100").await;
        assert_eq!(json["payload"]["value_1"], "no more item");
        assert_eq!(json["payload"]["incremental"]["cursor"]["end"], Value::Null);
        assert_eq!(json["payload"]["incremental"]["items"]["total"], 100);
    }

    #[tokio::test]
    async fn test_more_list_by_key() {
        let (_, json) = get_json("/more_list_by_key/key_20?how_many=5").await;
        assert_eq!(
            json["payload"]["incremental"]["cursor"],
            json!({"field": "key", "start": "key_20", "end": "key_24", "expandable": true})
        );

        let (_, json) = get_json("/more_list_by_key/unknown").await;
        assert_eq!(json["payload"]["value_1"], "no more item");
        assert_eq!(
            json["payload"]["incremental"]["cursor"],
            json!({"field": "key", "start": "unknown", "end": null, "expandable": false})
        );
    }
}
