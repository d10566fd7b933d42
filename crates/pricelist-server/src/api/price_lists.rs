use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use pricelist_core::EnrichedVariant;
use pricelist_parser::{decode_workbook, is_supported_workbook_name};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub(super) struct PriceListData {
    filename: String,
    products_count: usize,
    products: Vec<EnrichedVariant>,
}

fn multipart_error(request_id: &str, error: &MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(request_id, "payload_too_large", error.body_text())
    } else {
        ApiError::new(request_id, "bad_request", error.body_text())
    }
}

/// `POST /api/v1/price-lists`: decodes the uploaded workbook in the `file`
/// field and returns its priced catalog variants.
pub(super) async fn upload_price_list(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PriceListData>>, ApiError> {
    let (filename, bytes) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&req_id.0, &e))?
            .ok_or_else(|| {
                ApiError::new(
                    req_id.0.as_str(),
                    "validation_error",
                    format!("missing multipart field `{FILE_FIELD}`"),
                )
            })?;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_supported_workbook_name(&filename) {
            return Err(ApiError::new(
                req_id.0.as_str(),
                "bad_request",
                "file must be an Excel workbook (.xlsx or .xls)",
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&req_id.0, &e))?;
        break (filename, bytes);
    };

    let decoded = tokio::task::spawn_blocking(move || decode_workbook(bytes.to_vec()))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "workbook decode task failed");
            ApiError::new(req_id.0.as_str(), "internal_error", "workbook decoding failed")
        })?;

    let workbook = decoded.map_err(|e| {
        tracing::warn!(error = %e, filename = %filename, "uploaded workbook rejected");
        ApiError::new(
            req_id.0.as_str(),
            "unprocessable",
            format!("could not read workbook: {e}"),
        )
    })?;

    let products = state.pipeline.process(&workbook).await;
    tracing::info!(
        filename = %filename,
        products = products.len(),
        "price list upload processed"
    );

    Ok(Json(ApiResponse::new(
        req_id.0,
        PriceListData {
            filename,
            products_count: products.len(),
            products,
        },
    )))
}
