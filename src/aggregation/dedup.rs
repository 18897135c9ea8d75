use std::collections::HashSet;

use uuid::Uuid;

use super::{AggregationError, AppointmentStore};
use crate::db::{DatabaseError, Lookup};
use crate::models::{PartitionKey, Patient};

/// Membership set of patient identifiers gathered from appointment streams.
///
/// Identifiers are only resolved once every stream has been absorbed, so
/// each unique patient costs exactly one lookup.
#[derive(Debug, Default)]
pub struct PatientSet {
    ids: HashSet<Uuid>,
    appointments: usize,
}

impl PatientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, patient_id: Uuid) {
        self.appointments += 1;
        self.ids.insert(patient_id);
    }

    /// Absorb every appointment the store holds under `key`, both kinds.
    pub fn absorb(
        &mut self,
        store: &dyn AppointmentStore,
        key: &PartitionKey,
    ) -> Result<(), DatabaseError> {
        store.scan_scheduled(key, &mut |appt| {
            self.insert(appt.patient_id);
            Ok(())
        })?;
        store.scan_completed(key, &mut |appt| {
            self.insert(appt.patient_id);
            Ok(())
        })
    }

    /// Distinct identifiers seen.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Appointments absorbed, duplicates included.
    pub fn appointment_count(&self) -> usize {
        self.appointments
    }

    /// One lookup per identifier. Identifiers that no longer resolve are
    /// dropped. Output order is unspecified.
    pub fn resolve(
        self,
        store: &dyn AppointmentStore,
    ) -> Result<Vec<Patient>, AggregationError<Patient>> {
        let mut patients = Vec::with_capacity(self.ids.len());
        for id in self.ids {
            match store.lookup_patient(&id) {
                Ok(Lookup::Found(patient)) => patients.push(patient),
                Ok(Lookup::NotFound) => {
                    tracing::debug!(patient_id = %id, "skipping dangling patient reference");
                }
                Err(source) => {
                    tracing::warn!(rows = patients.len(), "patient lookup failed");
                    return Err(AggregationError::storage(source, patients));
                }
            }
        }
        Ok(patients)
    }
}

/// Distinct patients with at least one appointment, scheduled or
/// completed, with the given doctor.
pub fn patients_seen_by(
    store: &dyn AppointmentStore,
    doctor_id: Uuid,
) -> Result<Vec<Patient>, AggregationError<Patient>> {
    let key = PartitionKey::Doctor(doctor_id);
    let mut set = PatientSet::new();
    if let Err(source) = set.absorb(store, &key) {
        tracing::warn!(%key, "appointment scan failed during de-duplication");
        return Err(AggregationError::storage(source, Vec::new()));
    }

    if set.appointment_count() == 0 {
        return Err(AggregationError::NotFound(key));
    }

    tracing::debug!(%key, appointments = set.appointment_count(), unique = set.len(), "de-duplicated patients");
    set.resolve(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::testing::{completed, patient, scheduled, MemoryStore};

    fn ids(patients: &[Patient]) -> HashSet<Uuid> {
        patients.iter().map(|p| p.id).collect()
    }

    #[test]
    fn duplicates_across_streams_collapse() {
        let alice = patient("Alice");
        let bob = patient("Bob");
        let doctor = Uuid::new_v4();
        let mut store = MemoryStore::with_patients(&[&alice, &bob]);
        store.scheduled = vec![
            scheduled(alice.id, doctor, 1),
            scheduled(alice.id, doctor, 2),
            scheduled(bob.id, doctor, 3),
        ];
        store.completed = vec![completed(alice.id, doctor, 4), completed(bob.id, doctor, 5)];

        let seen = patients_seen_by(&store, doctor).unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(ids(&seen), HashSet::from([alice.id, bob.id]));
        assert_eq!(store.lookups.get(), 2);
    }

    #[test]
    fn cardinality_is_unique_ids_minus_misses() {
        let alice = patient("Alice");
        let doctor = Uuid::new_v4();
        let ghost_a = Uuid::new_v4();
        let ghost_b = Uuid::new_v4();
        let mut store = MemoryStore::with_patients(&[&alice]);
        store.scheduled = vec![scheduled(alice.id, doctor, 1), scheduled(ghost_a, doctor, 2)];
        store.completed = vec![completed(ghost_b, doctor, 3), completed(ghost_a, doctor, 4)];

        let seen = patients_seen_by(&store, doctor).unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, alice.id);
        assert_eq!(store.lookups.get(), 3);
    }

    #[test]
    fn only_dangling_references_yield_empty_list() {
        let doctor = Uuid::new_v4();
        let mut store = MemoryStore::default();
        store.completed = vec![completed(Uuid::new_v4(), doctor, 1)];

        let seen = patients_seen_by(&store, doctor).unwrap();

        assert!(seen.is_empty());
    }

    #[test]
    fn doctor_without_appointments_is_not_found() {
        let store = MemoryStore::default();
        let doctor = Uuid::new_v4();

        let err = patients_seen_by(&store, doctor).unwrap_err();

        assert!(matches!(err, AggregationError::NotFound(PartitionKey::Doctor(id)) if id == doctor));
    }

    #[test]
    fn repeated_runs_return_the_same_set() {
        let patients: Vec<Patient> = (0..6).map(|i| patient(&format!("P{i}"))).collect();
        let doctor = Uuid::new_v4();
        let refs: Vec<&Patient> = patients.iter().collect();
        let mut store = MemoryStore::with_patients(&refs);
        store.scheduled = patients.iter().map(|p| scheduled(p.id, doctor, 1)).collect();
        store.completed = patients.iter().rev().map(|p| completed(p.id, doctor, 2)).collect();

        let first = ids(&patients_seen_by(&store, doctor).unwrap());
        let second = ids(&patients_seen_by(&store, doctor).unwrap());

        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn scan_failure_is_propagated() {
        let alice = patient("Alice");
        let doctor = Uuid::new_v4();
        let mut store = MemoryStore::with_patients(&[&alice]);
        store.scheduled = vec![scheduled(alice.id, doctor, 1), scheduled(alice.id, doctor, 2)];
        store.fail_after = Some(1);

        let err = patients_seen_by(&store, doctor).unwrap_err();

        assert!(matches!(err, AggregationError::Storage { .. }));
        assert_eq!(store.lookups.get(), 0);
    }

    #[test]
    fn lookup_failure_keeps_resolved_patients() {
        let alice = patient("Alice");
        let mut set = PatientSet::new();
        set.insert(alice.id);
        set.insert(alice.id);
        let mut store = MemoryStore::with_patients(&[&alice]);
        store.fail_lookups = true;

        assert_eq!(set.len(), 1);
        assert_eq!(set.appointment_count(), 2);
        let err = set.resolve(&store).unwrap_err();
        assert!(err.partial().is_empty());
    }
}
