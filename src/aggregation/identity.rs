use std::collections::HashMap;

use uuid::Uuid;

use super::AppointmentStore;
use crate::db::{DatabaseError, Lookup};
use crate::models::UNDEFINED_PATIENT;

/// Patient display names resolved during one aggregation pass.
///
/// The first request for an identifier costs one point lookup; later
/// requests are served from memory. Misses are cached as
/// [`UNDEFINED_PATIENT`]. Storage errors are returned and leave the cache
/// untouched, so a retry within the same pass would hit the store again.
#[derive(Debug, Default)]
pub struct IdentityCache {
    names: HashMap<Uuid, String>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        store: &dyn AppointmentStore,
        patient_id: &Uuid,
    ) -> Result<String, DatabaseError> {
        if let Some(name) = self.names.get(patient_id) {
            return Ok(name.clone());
        }

        let name = match store.lookup_patient_name(patient_id)? {
            Lookup::Found(name) => name,
            Lookup::NotFound => {
                tracing::debug!(%patient_id, "patient missing, using placeholder name");
                UNDEFINED_PATIENT.to_string()
            }
        };
        self.names.insert(*patient_id, name.clone());
        Ok(name)
    }

    /// Number of distinct identifiers resolved so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
