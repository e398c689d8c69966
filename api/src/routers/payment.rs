use std::path::Path;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use utoipa::ToSchema;

use app::error::TeamError;
use app::persistence::teams::{ensure_utr_available, get_team, record_payment_proof};
use app::state::AppState;
use models::schemas::team::TeamSchema;

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::Json;

const MAX_PROOF_BYTES: usize = 10 * 1024 * 1024;
const PROOF_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "pdf"];

/// Multipart form accepted by the upload endpoint.
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUploadForm {
    team_id: String,
    utr_number: Option<String>,
    #[schema(value_type = String, format = Binary)]
    payment_proof: Vec<u8>,
}

/// Lowercased extension of an uploaded file name, with its leading dot.
fn proof_extension(file_name: Option<&str>) -> Result<String, TeamError> {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| PROOF_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            TeamError::Validation("Payment proof must be an image or PDF.".to_string())
        })?;
    Ok(format!(".{ext}"))
}

#[utoipa::path(
    post,
    path = "/api/payment/upload",
    tag = "payment",
    request_body(content = PaymentUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Proof stored", body = ApiResponse<TeamSchema>),
        (status = 400, description = "Missing team id or file"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "UTR already used by another team"),
    )
)]
pub async fn payment_upload_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut team_id = None;
    let mut utr = None;
    let mut proof = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "teamId" => team_id = Some(field.text().await?.trim().to_string()),
            "utrNumber" => {
                utr = Some(field.text().await?.trim().to_string()).filter(|u| !u.is_empty())
            }
            "paymentProof" => {
                let ext = proof_extension(field.file_name())?;
                let bytes = field.bytes().await?;
                proof = Some((ext, bytes));
            }
            other => tracing::debug!(field = %other, "Ignoring unknown upload field"),
        }
    }

    let team_id = team_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| TeamError::Validation("Team ID is required.".to_string()))?;
    let (ext, bytes) = proof
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| TeamError::Validation("Payment proof file is required.".to_string()))?;

    let team = get_team(&state.conn, &team_id).await?;
    if let Some(utr) = utr.as_deref() {
        ensure_utr_available(&state.conn, utr, Some(team.id)).await?;
    }

    let file_name = format!("{}{}", team.team_id, ext);
    tokio::fs::create_dir_all(&state.config.uploads_dir).await?;
    tokio::fs::write(state.config.uploads_dir.join(&file_name), &bytes).await?;
    tracing::info!(team_id = %team.team_id, %file_name, size = bytes.len(), "Payment proof saved");

    let team = record_payment_proof(&state.conn, team, utr, format!("/uploads/{file_name}")).await?;

    Ok(Json(ApiResponse::success(
        "Payment proof and UTR uploaded successfully",
        Some(TeamSchema::from(team)),
    )))
}

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(payment_upload_post))
        .layer(DefaultBodyLimit::max(MAX_PROOF_BYTES))
}
