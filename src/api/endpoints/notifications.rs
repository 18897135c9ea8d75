//! Notification endpoints.
//!
//! - `POST /notifications`: send a message to a doctor
//! - `GET /notifications/doctoruuid/:id`: most recent messages for a doctor

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
use crate::models::Notification;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(rename = "senderUUID")]
    pub sender_id: Uuid,
    #[serde(default)]
    pub sender_name: String,
    #[serde(rename = "receiverUUID")]
    pub receiver_id: Uuid,
    pub message: String,
    pub date: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationCreated {
    #[serde(rename = "notificationUUID")]
    pub id: Uuid,
}

/// `POST /notifications`
pub async fn send(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotificationCreated>), ApiError> {
    let Json(request) = payload?;
    require_text(&request.message, "message")?;

    let notification = Notification {
        id: Uuid::new_v4(),
        sender_id: request.sender_id,
        sender_name: request.sender_name,
        receiver_id: request.receiver_id,
        message: request.message,
        date: request.date,
    };

    let conn = ctx.open_db()?;
    repository::insert_notification(&conn, &notification)?;
    tracing::info!(notification_id = %notification.id, receiver_id = %notification.receiver_id, "notification sent");

    Ok((
        StatusCode::CREATED,
        Json(NotificationCreated { id: notification.id }),
    ))
}

/// `GET /notifications/doctoruuid/:id`: newest first, capped at the
/// configured notification limit.
pub async fn inbox(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let id = parse_uuid(&doctor_id, "doctor")?;
    let conn = ctx.open_db()?;

    let notifications =
        repository::get_recent_notifications(&conn, &id, ctx.config.notification_limit)?;

    Ok(Json(notifications))
}
