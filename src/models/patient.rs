use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used in appointment views when the referenced patient row is gone.
pub const UNDEFINED_PATIENT: &str = "Undefined Patient";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "patientUUID")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub date_of_birth: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    pub gender: String,
    /// Medical or insurance number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_number: Option<String>,
    #[serde(rename = "phoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
