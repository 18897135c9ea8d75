//! Endpoint handlers, one module per resource.

pub mod appointments;
pub mod doctors;
pub mod documents;
pub mod health;
pub mod notifications;
pub mod patients;
pub mod prescriptions;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a path or body identifier, naming the entity in the error.
pub(crate) fn parse_uuid(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid {entity} ID: {e}")))
}

/// Reject required text fields that are present but blank.
pub(crate) fn require_text(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject an appointment date of zero, which marks the other appointment kind.
pub(crate) fn require_date(value: i64, field: &str) -> Result<(), ApiError> {
    if value == 0 {
        return Err(ApiError::BadRequest(format!("{field} must be non-zero")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "patient").unwrap(), id);
    }

    #[test]
    fn parse_uuid_names_entity_on_error() {
        match parse_uuid("nope", "doctor") {
            Err(ApiError::BadRequest(msg)) => assert!(msg.starts_with("Invalid doctor ID")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("Ada", "name").is_ok());
        assert!(require_text("   ", "name").is_err());
    }

    #[test]
    fn require_date_rejects_zero() {
        assert!(require_date(1_700_000_000, "dateScheduled").is_ok());
        match require_date(0, "dateVisited") {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "dateVisited must be non-zero"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
