use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::auth::require_session;
use crate::errors::AppError;
use crate::importer::service::{
    import_from_sheet, import_text, ImportError, ImportGuard, ImportOutcome,
};
use crate::importer::template::{template_csv, TEMPLATE_FILENAME};
use crate::state::AppState;

/// GET /api/v1/hotels/import/template
/// Downloadable 44-column template with one sample row.
pub async fn handle_template_download() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILENAME}\""),
            ),
        ],
        template_csv(),
    )
}

/// POST /api/v1/hotels/import
/// Multipart upload of a CSV file exported from the template.
pub async fn handle_import_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ImportOutcome>, AppError> {
    require_session(&state.db, &headers).await?;
    let _guard = acquire_import_slot(&state)?;

    let mut parts: Vec<(Option<String>, String)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ImportError::Read)?
    {
        let name = field.name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|_| ImportError::Read)?;
        // Spreadsheet exports are UTF-8; decode lossily like a file reader would.
        parts.push((name, String::from_utf8_lossy(&bytes).into_owned()));
    }

    let csv_text = choose_csv_part(&parts).ok_or(ImportError::Read)?;
    let outcome = import_text(&state.db, &csv_text).await?;
    Ok(Json(outcome))
}

/// Picks the part named `file`; an upload without one falls back to the
/// first part so older clients keep working.
fn choose_csv_part(parts: &[(Option<String>, String)]) -> Option<String> {
    parts
        .iter()
        .find(|(name, _)| name.as_deref() == Some("file"))
        .or_else(|| parts.first())
        .map(|(_, text)| text.clone())
}

#[derive(Debug, Deserialize)]
pub struct SheetImportRequest {
    pub url: String,
}

/// POST /api/v1/hotels/import/sheet
/// Imports directly from a (public) Google Sheets link or raw CSV URL.
pub async fn handle_import_sheet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SheetImportRequest>,
) -> Result<Json<ImportOutcome>, AppError> {
    require_session(&state.db, &headers).await?;
    if req.url.trim().is_empty() {
        return Err(AppError::Validation("Falta el enlace de la hoja".into()));
    }
    let _guard = acquire_import_slot(&state)?;

    let outcome = import_from_sheet(&state.db, &state.http, req.url.trim()).await?;
    Ok(Json(outcome))
}

fn acquire_import_slot(state: &AppState) -> Result<ImportGuard, AppError> {
    ImportGuard::acquire(&state.import_in_flight).ok_or_else(|| {
        AppError::Conflict("Ya hay una importación en curso. Espere a que termine.".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_csv_part_prefers_named_file_field() {
        let parts = vec![
            (Some("notes".to_string()), "not a csv".to_string()),
            (Some("file".to_string()), "ID,Nombre".to_string()),
        ];
        assert_eq!(choose_csv_part(&parts).as_deref(), Some("ID,Nombre"));
    }

    #[test]
    fn test_choose_csv_part_falls_back_to_first_part() {
        let parts = vec![
            (None, "ID,Nombre".to_string()),
            (Some("extra".to_string()), "ignored".to_string()),
        ];
        assert_eq!(choose_csv_part(&parts).as_deref(), Some("ID,Nombre"));
        assert_eq!(choose_csv_part(&[]), None);
    }
}
