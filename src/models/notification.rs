use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "notificationUUID")]
    pub id: Uuid,
    #[serde(rename = "senderUUID")]
    pub sender_id: Uuid,
    pub sender_name: String,
    #[serde(rename = "receiverUUID")]
    pub receiver_id: Uuid,
    pub message: String,
    pub date: i64,
}
