use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppError;
use crate::pipeline;
use crate::state::AppState;
use crate::types::metrics::MetricsRecord;

pub fn router() -> Router<AppState> {
    Router::new().route("/upload-gpx", post(upload_gpx))
}

async fn upload_gpx(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MetricsRecord>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file bytes: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename =
        filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    if !has_gpx_extension(&filename) {
        return Err(AppError::BadRequest(
            "Unsupported file format, expected .gpx".to_string(),
        ));
    }

    tracing::info!("Parsing GPX file: {}", filename);

    let record = pipeline::extract_metrics(&bytes, &state.config().moving)?;

    tracing::info!(
        "Extracted metrics from {}: {:.3} km in {:.2} min",
        filename,
        record.distance_km,
        record.duration_min
    );

    Ok(Json(record))
}

fn has_gpx_extension(filename: &str) -> bool {
    filename
        .rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("gpx"))
        .unwrap_or(false)
}
