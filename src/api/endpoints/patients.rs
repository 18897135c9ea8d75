//! Patient endpoints.
//!
//! - `POST /patients`: register a patient
//! - `PUT /patients`: replace a patient's record
//! - `GET /patients/patientuuid/:id`: single patient
//! - `GET /patients/doctoruuid/:id`: distinct patients a doctor has seen

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, require_text};
use crate::aggregation::{patients_seen_by, SqliteAppointmentStore};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Patient;

/// Demographic fields shared by create and update.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFields {
    pub name: String,
    pub gender: String,
    pub date_of_birth: i64,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_number: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl PatientFields {
    fn into_patient(self, id: Uuid) -> Result<Patient, ApiError> {
        require_text(&self.name, "name")?;
        require_text(&self.gender, "gender")?;
        Ok(Patient {
            id,
            name: self.name.trim().to_string(),
            address: self.address,
            blood_type: self.blood_type,
            date_of_birth: self.date_of_birth,
            emergency_contact: self.emergency_contact,
            gender: self.gender,
            medical_number: self.medical_number,
            phone: self.phone,
            notes: self.notes,
        })
    }
}

#[derive(Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(rename = "patientUUID")]
    pub id: String,
    #[serde(flatten)]
    pub fields: PatientFields,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatientCreated {
    #[serde(rename = "patientUUID")]
    pub id: Uuid,
}

/// `POST /patients`
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<PatientFields>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientCreated>), ApiError> {
    let Json(fields) = payload?;
    let patient = fields.into_patient(Uuid::new_v4())?;

    let conn = ctx.open_db()?;
    repository::insert_patient(&conn, &patient)?;
    tracing::info!(patient_id = %patient.id, "patient registered");

    Ok((StatusCode::CREATED, Json(PatientCreated { id: patient.id })))
}

/// `PUT /patients`
pub async fn update(
    State(ctx): State<ApiContext>,
    payload: Result<Json<UpdatePatientRequest>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Json(request) = payload?;
    let id = parse_uuid(&request.id, "patient")?;
    let patient = request.fields.into_patient(id)?;

    let conn = ctx.open_db()?;
    repository::update_patient(&conn, &patient)?;
    tracing::info!(patient_id = %id, "patient updated");

    Ok(Json(patient))
}

/// `GET /patients/patientuuid/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_uuid(&patient_id, "patient")?;
    let conn = ctx.open_db()?;

    let patient = repository::get_patient(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    Ok(Json(patient))
}

/// `GET /patients/doctoruuid/:id`
pub async fn seen_by_doctor(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let doctor_id = parse_uuid(&doctor_id, "doctor")?;
    let conn = ctx.open_db()?;
    let store = SqliteAppointmentStore::new(&conn);

    let patients = patients_seen_by(&store, doctor_id)?;
    tracing::debug!(%doctor_id, count = patients.len(), "patients seen by doctor");

    Ok(Json(patients))
}
