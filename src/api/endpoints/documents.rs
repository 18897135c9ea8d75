//! Patient document endpoints.
//!
//! - `POST /documents`: multipart upload (`patientUUID`, `filename`,
//!   `dateUploaded`, `file`)
//! - `GET /documents/documentuuid/:id`: download the stored bytes
//! - `GET /documents/patientuuid/:id`: metadata for a patient's documents

use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parse_uuid;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Document;

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentCreated {
    #[serde(rename = "documentUUID")]
    pub id: Uuid,
}

/// `POST /documents`
pub async fn upload(
    State(ctx): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<DocumentCreated>), ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut patient_id: Option<String> = None;
    let mut filename: Option<String> = None;
    let mut date_uploaded: Option<String> = None;
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "patientUUID" => patient_id = Some(field.text().await?),
            "filename" => filename = Some(field.text().await?),
            "dateUploaded" => date_uploaded = Some(field.text().await?),
            "file" => {
                let original = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((original, bytes.to_vec()));
            }
            other => tracing::debug!(field = other, "ignoring unknown upload field"),
        }
    }

    let patient_id = patient_id
        .ok_or_else(|| ApiError::BadRequest("Missing patientUUID field".into()))
        .and_then(|raw| parse_uuid(&raw, "patient"))?;
    let (original_name, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Missing file field".into()))?;
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .or(original_name)
        .unwrap_or_else(|| "document".to_string());
    let date_uploaded = match date_uploaded {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| ApiError::BadRequest(format!("Invalid dateUploaded: {e}")))?,
        None => chrono::Utc::now().timestamp(),
    };

    let document = Document {
        id: Uuid::new_v4(),
        patient_id,
        filename,
        date_uploaded,
    };

    let conn = ctx.open_db()?;
    repository::insert_document(&conn, &document, &bytes)?;
    tracing::info!(document_id = %document.id, %patient_id, size = bytes.len(), "document stored");

    Ok((StatusCode::CREATED, Json(DocumentCreated { id: document.id })))
}

/// `GET /documents/documentuuid/:id`
pub async fn download(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&document_id, "document")?;
    let conn = ctx.open_db()?;

    let content = repository::get_document_content(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Document not found".into()))?;

    let mime = mime_guess::from_path(&content.filename)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", disposition_name(&content.filename)),
        )
        .header(header::CONTENT_LENGTH, content.bytes.len().to_string())
        .body(Body::from(content.bytes))
        .map_err(|e| ApiError::Internal(format!("Failed to build download response: {e}")))
}

/// `GET /documents/patientuuid/:id`
pub async fn by_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let id = parse_uuid(&patient_id, "patient")?;
    let conn = ctx.open_db()?;
    Ok(Json(repository::get_documents_by_patient(&conn, &id)?))
}

/// Filename safe to quote inside a Content-Disposition header.
fn disposition_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect()
}
