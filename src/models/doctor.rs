use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "doctorUUID")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_facility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_specialty: Option<String>,
    pub gender: String,
}
