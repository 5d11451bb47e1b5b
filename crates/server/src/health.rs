use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use jobtally_store::CounterStore;
use serde::Serialize;

use crate::routes::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub counter_store: HealthCheck,
    pub checked_at: String,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let counter_store = store_check(&state).await;
    let ready = counter_store.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "jobtally-server runtime initialized".to_string(),
        },
        counter_store,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn store_check(state: &AppState) -> HealthCheck {
    match state.store.read().await {
        Ok(count) => {
            HealthCheck { status: "ready", detail: format!("counter readable at {count}") }
        }
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("counter read failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use jobtally_store::{FileCounterStore, InMemoryCounterStore};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::routes::{router, AppState};

    fn state_with_store(store: Arc<dyn jobtally_store::CounterStore>) -> AppState {
        AppState {
            alerts_channel: "C-ALERTS".to_string(),
            report_channel: "C-REPORTS".to_string(),
            daily_target: 60,
            store,
            gateway: Arc::new(NoopGateway),
        }
    }

    struct NoopGateway;

    #[async_trait::async_trait]
    impl jobtally_slack::MessagingGateway for NoopGateway {
        async fn post_message(
            &self,
            channel: &str,
            _message: &jobtally_slack::MessageTemplate,
        ) -> Result<jobtally_slack::MessageRef, jobtally_slack::GatewayError> {
            Ok(jobtally_slack::MessageRef { channel: channel.to_string(), ts: "0".to_string() })
        }

        async fn update_message(
            &self,
            target: &jobtally_slack::MessageRef,
            _message: &jobtally_slack::MessageTemplate,
        ) -> Result<jobtally_slack::MessageRef, jobtally_slack::GatewayError> {
            Ok(target.clone())
        }
    }

    #[tokio::test]
    async fn health_returns_ready_when_counter_is_readable() {
        let app = router(state_with_store(Arc::new(InMemoryCounterStore::new())));

        let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("route");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_degrades_when_counter_state_is_corrupt() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("applied_count.txt");
        std::fs::write(&path, "garbage").expect("seed corrupt file");

        let app = router(state_with_store(Arc::new(FileCounterStore::new(path))));

        let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("route");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
