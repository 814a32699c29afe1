//! Backend-agnostic persistence for barbers, services, time slots and
//! appointments.
//!
//! Single-entity reads return `Ok(None)` for unknown ids. Creation never
//! checks that referenced barbers or services exist.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{Config, StorageBackend},
    error::StorageResult,
    models::{
        Appointment, Barber, NewAppointment, NewBarber, NewService, NewTimeSlot, Service,
        TimeSlot,
    },
};

pub use memory::MemStorage;
pub use sqlite::SqliteStorage;

#[async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn get_barbers(&self) -> StorageResult<Vec<Barber>>;
    async fn get_barber(&self, id: i64) -> StorageResult<Option<Barber>>;
    async fn create_barber(&self, barber: NewBarber) -> StorageResult<Barber>;

    async fn get_services(&self) -> StorageResult<Vec<Service>>;
    async fn get_service(&self, id: i64) -> StorageResult<Option<Service>>;
    async fn create_service(&self, service: NewService) -> StorageResult<Service>;

    /// Slots whose barber and date both match exactly, in insertion order.
    async fn get_time_slots(&self, barber_id: i64, date: &str) -> StorageResult<Vec<TimeSlot>>;
    async fn get_time_slot(&self, id: i64) -> StorageResult<Option<TimeSlot>>;
    async fn create_time_slot(&self, slot: NewTimeSlot) -> StorageResult<TimeSlot>;
    async fn update_time_slot_availability(
        &self,
        id: i64,
        available: bool,
    ) -> StorageResult<Option<TimeSlot>>;

    async fn get_appointments(&self) -> StorageResult<Vec<Appointment>>;
    async fn get_appointment(&self, id: i64) -> StorageResult<Option<Appointment>>;

    /// Persists the appointment, then marks the slot with the same barber,
    /// date and time as unavailable if one exists.
    async fn create_appointment(&self, appointment: NewAppointment) -> StorageResult<Appointment>;
}

/// Flags the first slot matching the appointment's barber/date/time as
/// taken. A missing slot is not an error. Not atomic with the insert that
/// precedes it, so two bookings for one slot both succeed.
pub(crate) async fn claim_matching_slot<S>(store: &S, appointment: &Appointment) -> StorageResult<()>
where
    S: Storage + ?Sized,
{
    let slots = store
        .get_time_slots(appointment.barber_id, &appointment.date)
        .await?;

    if let Some(slot) = slots.iter().find(|slot| slot.time == appointment.time) {
        store.update_time_slot_availability(slot.id, false).await?;
    }
    Ok(())
}

/// Builds the backend selected in configuration.
pub async fn open(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage {
        StorageBackend::Memory => {
            log::info!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemStorage::new()))
        }
        StorageBackend::Sqlite => {
            let store = SqliteStorage::connect(&config.database_url).await?;
            Ok(Arc::new(store))
        }
    }
}
