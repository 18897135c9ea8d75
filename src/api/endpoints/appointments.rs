//! Appointment endpoints.
//!
//! - `POST /scheduledappointments`: book a visit
//! - `GET|DELETE /scheduledappointments/appointmentuuid/:id`
//! - `POST /completedappointments`: record a visit, retiring the booking
//! - `GET /completedappointments/appointmentuuid/:id`
//! - `GET /appointments/patientuuid/:id`: merged view for a patient
//! - `GET /appointments/doctoruuid/:id`: merged view for a doctor

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, require_date};
use crate::aggregation::{appointment_view, SqliteAppointmentStore};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{self, CompletionOutcome};
use crate::models::{CompletedAppointment, GenericAppointment, PartitionKey, ScheduledAppointment};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    #[serde(rename = "doctorUUID")]
    pub doctor_id: Uuid,
    pub date_scheduled: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreated {
    #[serde(rename = "appointmentUUID")]
    pub id: Uuid,
    /// Set on completion: whether a scheduled booking was retired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_scheduled: Option<bool>,
}

/// `POST /scheduledappointments`
pub async fn schedule(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentCreated>), ApiError> {
    let Json(request) = payload?;
    require_date(request.date_scheduled, "dateScheduled")?;
    let appointment = ScheduledAppointment {
        id: Uuid::new_v4(),
        patient_id: request.patient_id,
        doctor_id: request.doctor_id,
        date_scheduled: request.date_scheduled,
        notes: request.notes,
    };

    let conn = ctx.open_db()?;
    repository::insert_scheduled_appointment(&conn, &appointment)?;
    tracing::info!(appointment_id = %appointment.id, "appointment scheduled");

    Ok((
        StatusCode::CREATED,
        Json(AppointmentCreated {
            id: appointment.id,
            replaced_scheduled: None,
        }),
    ))
}

/// `GET /scheduledappointments/appointmentuuid/:id`
pub async fn scheduled_detail(
    State(ctx): State<ApiContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<ScheduledAppointment>, ApiError> {
    let id = parse_uuid(&appointment_id, "appointment")?;
    let conn = ctx.open_db()?;

    let appointment = repository::get_scheduled_appointment(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Scheduled appointment not found".into()))?;

    Ok(Json(appointment))
}

/// `DELETE /scheduledappointments/appointmentuuid/:id`
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Path(appointment_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&appointment_id, "appointment")?;
    let conn = ctx.open_db()?;

    repository::delete_scheduled_appointment(&conn, &id)?;
    tracing::info!(appointment_id = %id, "scheduled appointment cancelled");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    #[serde(rename = "appointmentUUID")]
    pub id: Uuid,
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    #[serde(rename = "doctorUUID")]
    pub doctor_id: Uuid,
    pub date_visited: i64,
    pub breathing_rate: i32,
    pub heart_rate: i32,
    pub blood_oxygen_level: i32,
    pub blood_pressure: i32,
    #[serde(default)]
    pub notes: String,
}

/// `POST /completedappointments`
pub async fn complete(
    State(ctx): State<ApiContext>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentCreated>), ApiError> {
    let Json(request) = payload?;
    require_date(request.date_visited, "dateVisited")?;
    let visit = CompletedAppointment {
        id: request.id,
        patient_id: request.patient_id,
        doctor_id: request.doctor_id,
        date_visited: request.date_visited,
        breathing_rate: request.breathing_rate,
        heart_rate: request.heart_rate,
        blood_oxygen_level: request.blood_oxygen_level,
        blood_pressure: request.blood_pressure,
        notes: request.notes,
    };

    let conn = ctx.open_db()?;
    let outcome = repository::complete_appointment(&conn, &visit)?;
    let replaced = outcome == CompletionOutcome::Transitioned;
    tracing::info!(appointment_id = %visit.id, replaced, "appointment completed");

    Ok((
        StatusCode::CREATED,
        Json(AppointmentCreated {
            id: visit.id,
            replaced_scheduled: Some(replaced),
        }),
    ))
}

/// `GET /completedappointments/appointmentuuid/:id`
pub async fn completed_detail(
    State(ctx): State<ApiContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<CompletedAppointment>, ApiError> {
    let id = parse_uuid(&appointment_id, "appointment")?;
    let conn = ctx.open_db()?;

    let appointment = repository::get_completed_appointment(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Completed appointment not found".into()))?;

    Ok(Json(appointment))
}

/// `GET /appointments/patientuuid/:id`
pub async fn by_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<GenericAppointment>>, ApiError> {
    let key = PartitionKey::Patient(parse_uuid(&patient_id, "patient")?);
    merged_view(&ctx, key)
}

/// `GET /appointments/doctoruuid/:id`
pub async fn by_doctor(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<GenericAppointment>>, ApiError> {
    let key = PartitionKey::Doctor(parse_uuid(&doctor_id, "doctor")?);
    merged_view(&ctx, key)
}

fn merged_view(ctx: &ApiContext, key: PartitionKey) -> Result<Json<Vec<GenericAppointment>>, ApiError> {
    let conn = ctx.open_db()?;
    let store = SqliteAppointmentStore::new(&conn);

    let view = appointment_view(&store, &key)?;
    tracing::debug!(%key, count = view.len(), "appointment view");

    Ok(Json(view))
}
