use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{
    for_each_completed_appointment, for_each_scheduled_appointment, get_patient,
    get_patient_name,
};
use crate::db::{DatabaseError, Lookup};
use crate::models::{CompletedAppointment, PartitionKey, Patient, ScheduledAppointment};

/// Read access the aggregation passes need from the record store.
///
/// Scans are visitor-driven so a pass sees each row as it is produced and
/// keeps what it has already built if the store fails part way through.
pub trait AppointmentStore {
    fn lookup_patient(&self, id: &Uuid) -> Result<Lookup<Patient>, DatabaseError>;

    fn lookup_patient_name(&self, id: &Uuid) -> Result<Lookup<String>, DatabaseError>;

    fn scan_scheduled(
        &self,
        key: &PartitionKey,
        visit: &mut dyn FnMut(ScheduledAppointment) -> Result<(), DatabaseError>,
    ) -> Result<(), DatabaseError>;

    fn scan_completed(
        &self,
        key: &PartitionKey,
        visit: &mut dyn FnMut(CompletedAppointment) -> Result<(), DatabaseError>,
    ) -> Result<(), DatabaseError>;
}

/// [`AppointmentStore`] over a borrowed SQLite connection.
pub struct SqliteAppointmentStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteAppointmentStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl AppointmentStore for SqliteAppointmentStore<'_> {
    fn lookup_patient(&self, id: &Uuid) -> Result<Lookup<Patient>, DatabaseError> {
        get_patient(self.conn, id).map(Lookup::from)
    }

    fn lookup_patient_name(&self, id: &Uuid) -> Result<Lookup<String>, DatabaseError> {
        get_patient_name(self.conn, id).map(Lookup::from)
    }

    fn scan_scheduled(
        &self,
        key: &PartitionKey,
        visit: &mut dyn FnMut(ScheduledAppointment) -> Result<(), DatabaseError>,
    ) -> Result<(), DatabaseError> {
        for_each_scheduled_appointment(self.conn, key, visit)
    }

    fn scan_completed(
        &self,
        key: &PartitionKey,
        visit: &mut dyn FnMut(CompletedAppointment) -> Result<(), DatabaseError>,
    ) -> Result<(), DatabaseError> {
        for_each_completed_appointment(self.conn, key, visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::testing::{completed, patient, scheduled};
    use crate::db::open_memory_database;
    use crate::db::repository::{complete_appointment, insert_patient, insert_scheduled_appointment};

    #[test]
    fn sqlite_lookup_distinguishes_missing_rows() {
        let conn = open_memory_database().unwrap();
        let alice = patient("Alice");
        insert_patient(&conn, &alice).unwrap();
        let store = SqliteAppointmentStore::new(&conn);

        assert_eq!(
            store.lookup_patient_name(&alice.id).unwrap(),
            Lookup::Found("Alice".to_string())
        );
        assert_eq!(store.lookup_patient(&Uuid::new_v4()).unwrap(), Lookup::NotFound);
    }

    #[test]
    fn sqlite_scans_follow_partition_key() {
        let conn = open_memory_database().unwrap();
        let doctor = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        insert_scheduled_appointment(&conn, &scheduled(p1, doctor, 10)).unwrap();
        insert_scheduled_appointment(&conn, &scheduled(p2, doctor, 20)).unwrap();
        insert_scheduled_appointment(&conn, &scheduled(p1, Uuid::new_v4(), 30)).unwrap();
        complete_appointment(&conn, &completed(p1, doctor, 40)).unwrap();

        let store = SqliteAppointmentStore::new(&conn);

        let mut by_doctor = Vec::new();
        store
            .scan_scheduled(&PartitionKey::Doctor(doctor), &mut |a| {
                by_doctor.push(a.date_scheduled);
                Ok(())
            })
            .unwrap();
        assert_eq!(by_doctor, vec![10, 20]);

        let mut by_patient = Vec::new();
        store
            .scan_scheduled(&PartitionKey::Patient(p1), &mut |a| {
                by_patient.push(a.date_scheduled);
                Ok(())
            })
            .unwrap();
        assert_eq!(by_patient, vec![10, 30]);

        let mut visits = 0;
        store
            .scan_completed(&PartitionKey::Doctor(doctor), &mut |_| {
                visits += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(visits, 1);
    }

    #[test]
    fn visitor_error_stops_the_scan() {
        let conn = open_memory_database().unwrap();
        let doctor = Uuid::new_v4();
        for date in [1, 2, 3] {
            insert_scheduled_appointment(&conn, &scheduled(Uuid::new_v4(), doctor, date)).unwrap();
        }
        let store = SqliteAppointmentStore::new(&conn);

        let mut seen = 0;
        let result = store.scan_scheduled(&PartitionKey::Doctor(doctor), &mut |_| {
            seen += 1;
            if seen == 2 {
                Err(DatabaseError::ConstraintViolation("stop".into()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
        assert_eq!(seen, 2);
    }
}
