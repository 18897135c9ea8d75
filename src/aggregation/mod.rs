//! Appointment aggregation: merged appointment views and patient
//! de-duplication over the appointment store.
//!
//! Every pass runs against an [`AppointmentStore`] and owns its
//! [`IdentityCache`] for the duration of the call. Nothing here keeps state
//! between calls.

mod dedup;
mod identity;
mod merge;
mod store;

pub use dedup::*;
pub use identity::*;
pub use merge::*;
pub use store::*;

use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::PartitionKey;

#[derive(Error, Debug)]
pub enum AggregationError<T> {
    /// Every stream for the partition was empty.
    #[error("No appointments found for {0}")]
    NotFound(PartitionKey),

    /// The store failed mid-pass. `partial` holds whatever was produced
    /// before the failure.
    #[error("Storage failure after {} rows: {source}", .partial.len())]
    Storage {
        source: DatabaseError,
        partial: Vec<T>,
    },
}

impl<T> AggregationError<T> {
    pub fn storage(source: DatabaseError, partial: Vec<T>) -> Self {
        AggregationError::Storage { source, partial }
    }

    /// Rows produced before a storage failure. Empty for `NotFound`.
    pub fn partial(&self) -> &[T] {
        match self {
            AggregationError::NotFound(_) => &[],
            AggregationError::Storage { partial, .. } => partial,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory store with lookup counting and failure injection.

    use std::cell::Cell;
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::AppointmentStore;
    use crate::db::{DatabaseError, Lookup};
    use crate::models::{CompletedAppointment, PartitionKey, Patient, ScheduledAppointment};

    #[derive(Default)]
    pub struct MemoryStore {
        pub patients: HashMap<Uuid, Patient>,
        pub scheduled: Vec<ScheduledAppointment>,
        pub completed: Vec<CompletedAppointment>,
        /// Fail once this many rows have been handed out across both scans.
        pub fail_after: Option<usize>,
        /// Fail every point lookup.
        pub fail_lookups: bool,
        pub lookups: Cell<usize>,
        emitted: Cell<usize>,
    }

    pub fn storage_failure() -> DatabaseError {
        DatabaseError::Sqlite(rusqlite::Error::InvalidQuery)
    }

    pub fn patient(name: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: name.into(),
            address: None,
            blood_type: None,
            date_of_birth: 631_152_000,
            emergency_contact: None,
            gender: "F".into(),
            medical_number: None,
            phone: None,
            notes: None,
        }
    }

    pub fn scheduled(patient_id: Uuid, doctor_id: Uuid, date: i64) -> ScheduledAppointment {
        ScheduledAppointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date_scheduled: date,
            notes: String::new(),
        }
    }

    pub fn completed(patient_id: Uuid, doctor_id: Uuid, date: i64) -> CompletedAppointment {
        CompletedAppointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date_visited: date,
            breathing_rate: 16,
            heart_rate: 70,
            blood_oxygen_level: 98,
            blood_pressure: 120,
            notes: "Routine".into(),
        }
    }

    impl MemoryStore {
        pub fn with_patients(patients: &[&Patient]) -> Self {
            Self {
                patients: patients.iter().map(|p| (p.id, (*p).clone())).collect(),
                ..Default::default()
            }
        }

        fn emit(&self) -> Result<(), DatabaseError> {
            let n = self.emitted.get();
            if self.fail_after.is_some_and(|limit| n >= limit) {
                return Err(storage_failure());
            }
            self.emitted.set(n + 1);
            Ok(())
        }

        fn matches(key: &PartitionKey, patient_id: Uuid, doctor_id: Uuid) -> bool {
            match key {
                PartitionKey::Patient(id) => *id == patient_id,
                PartitionKey::Doctor(id) => *id == doctor_id,
            }
        }
    }

    impl AppointmentStore for MemoryStore {
        fn lookup_patient(&self, id: &Uuid) -> Result<Lookup<Patient>, DatabaseError> {
            self.lookups.set(self.lookups.get() + 1);
            if self.fail_lookups {
                return Err(storage_failure());
            }
            Ok(self.patients.get(id).cloned().into())
        }

        fn lookup_patient_name(&self, id: &Uuid) -> Result<Lookup<String>, DatabaseError> {
            Ok(self.lookup_patient(id)?.map(|p| p.name))
        }

        fn scan_scheduled(
            &self,
            key: &PartitionKey,
            visit: &mut dyn FnMut(ScheduledAppointment) -> Result<(), DatabaseError>,
        ) -> Result<(), DatabaseError> {
            for appt in &self.scheduled {
                if Self::matches(key, appt.patient_id, appt.doctor_id) {
                    self.emit()?;
                    visit(appt.clone())?;
                }
            }
            Ok(())
        }

        fn scan_completed(
            &self,
            key: &PartitionKey,
            visit: &mut dyn FnMut(CompletedAppointment) -> Result<(), DatabaseError>,
        ) -> Result<(), DatabaseError> {
            for appt in &self.completed {
                if Self::matches(key, appt.patient_id, appt.doctor_id) {
                    self.emit()?;
                    visit(appt.clone())?;
                }
            }
            Ok(())
        }
    }
}
