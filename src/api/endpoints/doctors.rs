//! Doctor endpoints.
//!
//! - `POST /doctors`: register a doctor
//! - `GET /doctors`: every doctor, by name
//! - `GET /doctors/doctoruuid/:id`: single doctor

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
use crate::models::Doctor;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub name: String,
    pub gender: String,
    #[serde(rename = "phoneNumber")]
    pub phone: String,
    pub primary_facility: Option<String>,
    pub primary_specialty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DoctorCreated {
    #[serde(rename = "doctorUUID")]
    pub id: Uuid,
}

/// `POST /doctors`
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<CreateDoctorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DoctorCreated>), ApiError> {
    let Json(request) = payload?;
    require_text(&request.name, "name")?;
    require_text(&request.gender, "gender")?;
    require_text(&request.phone, "phoneNumber")?;

    let doctor = Doctor {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        phone: request.phone,
        primary_facility: request.primary_facility,
        primary_specialty: request.primary_specialty,
        gender: request.gender,
    };

    let conn = ctx.open_db()?;
    repository::insert_doctor(&conn, &doctor)?;
    tracing::info!(doctor_id = %doctor.id, "doctor registered");

    Ok((StatusCode::CREATED, Json(DoctorCreated { id: doctor.id })))
}

/// `GET /doctors`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(repository::get_all_doctors(&conn)?))
}

/// `GET /doctors/doctoruuid/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_uuid(&doctor_id, "doctor")?;
    let conn = ctx.open_db()?;

    let doctor = repository::get_doctor(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Doctor not found".into()))?;

    Ok(Json(doctor))
}
