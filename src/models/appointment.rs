use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An upcoming visit. Lives until the visit is recorded, then is replaced
/// by a [`CompletedAppointment`] carrying the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAppointment {
    #[serde(rename = "appointmentUUID")]
    pub id: Uuid,
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    #[serde(rename = "doctorUUID")]
    pub doctor_id: Uuid,
    pub date_scheduled: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedAppointment {
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

/// Read-only union of both appointment kinds with the patient name resolved.
///
/// Exactly one of `date_scheduled` / `date_visited` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAppointment {
    #[serde(rename = "appointmentUUID")]
    pub id: Uuid,
    #[serde(rename = "patientUUID")]
    pub patient_id: Uuid,
    #[serde(rename = "doctorUUID")]
    pub doctor_id: Uuid,
    pub date_scheduled: i64,
    pub date_visited: i64,
    pub notes: String,
    pub patient_name: String,
}

impl GenericAppointment {
    pub fn from_scheduled(appt: ScheduledAppointment, patient_name: String) -> Self {
        Self {
            id: appt.id,
            patient_id: appt.patient_id,
            doctor_id: appt.doctor_id,
            date_scheduled: appt.date_scheduled,
            date_visited: 0,
            notes: appt.notes,
            patient_name,
        }
    }

    pub fn from_completed(appt: CompletedAppointment, patient_name: String) -> Self {
        Self {
            id: appt.id,
            patient_id: appt.patient_id,
            doctor_id: appt.doctor_id,
            date_scheduled: 0,
            date_visited: appt.date_visited,
            notes: appt.notes,
            patient_name,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.date_visited != 0
    }
}

/// Partition key for appointment range scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKey {
    Patient(Uuid),
    Doctor(Uuid),
}

impl PartitionKey {
    /// Column holding this key in both appointment tables.
    pub fn column(&self) -> &'static str {
        match self {
            PartitionKey::Patient(_) => "patient_id",
            PartitionKey::Doctor(_) => "doctor_id",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            PartitionKey::Patient(id) | PartitionKey::Doctor(id) => *id,
        }
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionKey::Patient(id) => write!(f, "patient {id}"),
            PartitionKey::Doctor(id) => write!(f, "doctor {id}"),
        }
    }
}
