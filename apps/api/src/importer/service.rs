//! Import orchestrator — fetches or receives a CSV blob, parses it, and
//! upserts each record against the store one at a time. The batch is
//! deliberately non-atomic: a failure partway through leaves the rows already
//! saved in place, and the reported error carries only the last failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::repo::upsert_hotel;
use crate::importer::parser::parse_hotels;

/// Timeout for downloading a remote sheet. The fetch has no cancellation, so
/// this bound is what returns the UI to a retryable state on a dead link.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Everything that can interrupt an import. Display strings are the exact
/// status messages surfaced to the admin panel, one per failure.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Error de lectura del archivo.")]
    Read,

    #[error("Error de conexión. Asegúrate de que el enlace sea público ('Cualquiera con el enlace').")]
    Connection(#[source] reqwest::Error),

    #[error("Error {status}: No se pudo descargar la hoja. Verifique permisos.")]
    Download { status: u16 },

    #[error("El archivo descargado no parece un CSV válido.")]
    NotTabular,

    #[error("No se encontraron registros válidos. Verifique que el archivo no esté vacío y siga la plantilla.")]
    NoValidRows,

    #[error("Error al guardar: {last_error} ({saved} hoteles guardados, sin reversión)")]
    Save { saved: usize, last_error: String },
}

impl ImportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ImportError::Read => StatusCode::BAD_REQUEST,
            ImportError::Connection(_) | ImportError::Download { .. } => StatusCode::BAD_GATEWAY,
            ImportError::NotTabular | ImportError::NoValidRows => StatusCode::UNPROCESSABLE_ENTITY,
            ImportError::Save { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Successful import summary, returned as the single status message.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub message: String,
}

/// Serializes imports: at most one runs at a time, matching the single
/// disabled-while-pending trigger of the admin UI. Released on drop.
pub struct ImportGuard {
    flag: Arc<AtomicBool>,
}

impl ImportGuard {
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ImportGuard { flag: flag.clone() })
    }
}

impl Drop for ImportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Rewrites a Google Sheets edit link into its direct CSV export endpoint.
/// Anything unrecognized passes through untouched.
pub fn rewrite_sheet_url(url: &str) -> String {
    if !url.contains("docs.google.com/spreadsheets") {
        return url.to_string();
    }
    let Some(pos) = url.find("/d/") else {
        return url.to_string();
    };
    let id: String = url[pos + 3..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id.is_empty() {
        return url.to_string();
    }
    format!("https://docs.google.com/spreadsheets/d/{id}/export?format=csv")
}

/// Downloads a sheet and imports it. A body without a single comma is
/// rejected as non-tabular before parsing.
pub async fn import_from_sheet(
    pool: &PgPool,
    http: &reqwest::Client,
    url: &str,
) -> Result<ImportOutcome, ImportError> {
    let fetch_url = rewrite_sheet_url(url);
    info!("Fetching CSV from: {fetch_url}");

    let response = http
        .get(&fetch_url)
        .send()
        .await
        .map_err(ImportError::Connection)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImportError::Download {
            status: status.as_u16(),
        });
    }

    let text = response.text().await.map_err(ImportError::Connection)?;
    if text.trim().is_empty() || !text.contains(',') {
        return Err(ImportError::NotTabular);
    }

    import_text(pool, &text).await
}

/// Parses a CSV blob and upserts every record, one at a time. Per-record
/// failures are logged and the loop continues; only the last error surfaces.
pub async fn import_text(pool: &PgPool, text: &str) -> Result<ImportOutcome, ImportError> {
    let hotels = parse_hotels(text);
    if hotels.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    let total = hotels.len();
    let mut saved = 0usize;
    let mut last_error: Option<String> = None;

    for hotel in &hotels {
        match upsert_hotel(pool, hotel).await {
            Ok(_) => saved += 1,
            Err(e) => {
                warn!("Failed to save imported hotel '{}': {e}", hotel.id);
                last_error = Some(e.to_string());
            }
        }
    }

    if let Some(last_error) = last_error {
        return Err(ImportError::Save { saved, last_error });
    }

    info!("Imported {saved}/{total} hotels");
    Ok(ImportOutcome {
        imported: saved,
        message: format!("¡Proceso exitoso! Se han importado {saved} hoteles correctamente."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_extracts_sheet_id() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC-d_9/edit#gid=0";
        assert_eq!(
            rewrite_sheet_url(url),
            "https://docs.google.com/spreadsheets/d/1AbC-d_9/export?format=csv"
        );
    }

    #[test]
    fn test_rewrite_passes_through_other_urls() {
        let url = "https://example.com/export.csv";
        assert_eq!(rewrite_sheet_url(url), url);
    }

    #[test]
    fn test_rewrite_leaves_malformed_sheet_links_alone() {
        let url = "https://docs.google.com/spreadsheets/u/0/";
        assert_eq!(rewrite_sheet_url(url), url);
    }

    #[test]
    fn test_import_guard_serializes_acquisition() {
        let flag = Arc::new(AtomicBool::new(false));
        let first = ImportGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(ImportGuard::acquire(&flag).is_none());
        drop(first);
        assert!(ImportGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_error_messages_are_distinct_per_failure_class() {
        let no_rows = ImportError::NoValidRows.to_string();
        let download = ImportError::Download { status: 403 }.to_string();
        assert!(no_rows.contains("registros válidos"));
        assert!(download.contains("403"));
        assert_ne!(no_rows, download);
    }

    #[test]
    fn test_save_error_reports_partial_progress() {
        let err = ImportError::Save {
            saved: 3,
            last_error: "duplicate key".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("duplicate key"));
        assert!(msg.contains('3'));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes_by_class() {
        assert_eq!(ImportError::Read.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ImportError::Download { status: 500 }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ImportError::NotTabular.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ImportError::NoValidRows.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
