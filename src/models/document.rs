use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document metadata. The blob itself travels separately as [`DocumentContent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "documentUUID")]
    pub id: Uuid,
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    pub filename: String,
    pub date_uploaded: i64,
}

#[derive(Debug, Clone)]
pub struct DocumentContent {
    pub filename: String,
    pub bytes: Vec<u8>,
}
