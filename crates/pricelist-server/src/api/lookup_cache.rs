use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct InvalidateData {
    status: &'static str,
}

/// `POST /api/v1/lookup-cache/invalidate`: drops the cached catalog tables so
/// the next upload refetches them.
pub(super) async fn invalidate_lookup_cache(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<InvalidateData>> {
    state.pipeline.invalidate_lookup_cache().await;
    Json(ApiResponse::new(
        req_id.0,
        InvalidateData {
            status: "invalidated",
        },
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::tests::{json_body, offline_app};

    #[tokio::test]
    async fn invalidate_reports_status() {
        let response = offline_app(1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/lookup-cache/invalidate")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "invalidated");
    }

    #[tokio::test]
    async fn invalidate_rejects_get() {
        let response = offline_app(1024)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/lookup-cache/invalidate")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
