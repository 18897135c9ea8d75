use super::{AggregationError, AppointmentStore, IdentityCache};
use crate::models::{GenericAppointment, PartitionKey};

/// Unified appointment view for one patient or one doctor.
///
/// All scheduled appointments come first, then all completed ones, each
/// group in store order. Patient names are resolved through `names`, which
/// the pass owns and drops on return.
pub fn merge_appointments(
    store: &dyn AppointmentStore,
    key: &PartitionKey,
    mut names: IdentityCache,
) -> Result<Vec<GenericAppointment>, AggregationError<GenericAppointment>> {
    let mut merged: Vec<GenericAppointment> = Vec::new();

    let scheduled = store.scan_scheduled(key, &mut |appt| {
        let name = names.resolve(store, &appt.patient_id)?;
        merged.push(GenericAppointment::from_scheduled(appt, name));
        Ok(())
    });
    if let Err(source) = scheduled {
        tracing::warn!(%key, rows = merged.len(), "scheduled scan failed");
        return Err(AggregationError::storage(source, merged));
    }

    let completed = store.scan_completed(key, &mut |appt| {
        let name = names.resolve(store, &appt.patient_id)?;
        merged.push(GenericAppointment::from_completed(appt, name));
        Ok(())
    });
    if let Err(source) = completed {
        tracing::warn!(%key, rows = merged.len(), "completed scan failed");
        return Err(AggregationError::storage(source, merged));
    }

    if merged.is_empty() {
        return Err(AggregationError::NotFound(*key));
    }

    tracing::debug!(%key, count = merged.len(), lookups = names.len(), "merged appointments");
    Ok(merged)
}

/// [`merge_appointments`] with a fresh name cache.
pub fn appointment_view(
    store: &dyn AppointmentStore,
    key: &PartitionKey,
) -> Result<Vec<GenericAppointment>, AggregationError<GenericAppointment>> {
    merge_appointments(store, key, IdentityCache::new())
}
