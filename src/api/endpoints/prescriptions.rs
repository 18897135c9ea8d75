//! Prescription endpoints.
//!
//! - `POST /prescriptions`: record a batch of prescriptions
//! - `GET /prescriptions/patientuuid/:id`: a patient's prescriptions, latest ending first

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, require_text};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Prescription;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest {
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    #[serde(rename = "doctorUUID")]
    pub doctor_id: Uuid,
    pub doctor_name: Option<String>,
    pub drug: String,
    pub start_date: i64,
    pub end_date: i64,
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrescriptionsCreated {
    #[serde(rename = "prescriptionUUIDs")]
    pub ids: Vec<Uuid>,
}

/// `POST /prescriptions`: all or nothing.
pub async fn create_batch(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Vec<PrescriptionRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<PrescriptionsCreated>), ApiError> {
    let Json(requests) = payload?;
    if requests.is_empty() {
        return Err(ApiError::BadRequest("No prescriptions in request".into()));
    }

    let mut batch = Vec::with_capacity(requests.len());
    for request in requests {
        require_text(&request.drug, "drug")?;
        batch.push(Prescription {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            doctor_name: request.doctor_name,
            drug: request.drug,
            start_date: request.start_date,
            end_date: request.end_date,
            instructions: request.instructions,
        });
    }

    let conn = ctx.open_db()?;
    repository::insert_prescriptions(&conn, &batch)?;
    tracing::info!(count = batch.len(), "prescriptions recorded");

    Ok((
        StatusCode::CREATED,
        Json(PrescriptionsCreated {
            ids: batch.iter().map(|p| p.id).collect(),
        }),
    ))
}

/// `GET /prescriptions/patientuuid/:id`
pub async fn by_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let id = parse_uuid(&patient_id, "patient")?;
    let conn = ctx.open_db()?;

    let prescriptions = repository::get_prescriptions_by_patient(&conn, &id)?;
    tracing::debug!(patient_id = %id, count = prescriptions.len(), "prescriptions listed");

    Ok(Json(prescriptions))
}
