use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{claim_matching_slot, Storage};
use crate::{
    error::StorageResult,
    models::{
        Appointment, Barber, NewAppointment, NewBarber, NewService, NewTimeSlot, Service,
        TimeSlot,
    },
};

/// Process-local store. Each table is an id-ordered map with its own
/// counter; nothing survives a restart.
#[derive(Default)]
pub struct MemStorage {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    barbers: Table<Barber>,
    services: Table<Service>,
    time_slots: Table<TimeSlot>,
    appointments: Table<Appointment>,
}

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: i64, row: T) -> T {
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_barbers(&self) -> StorageResult<Vec<Barber>> {
        Ok(self.inner.lock().await.barbers.all())
    }

    async fn get_barber(&self, id: i64) -> StorageResult<Option<Barber>> {
        Ok(self.inner.lock().await.barbers.get(id))
    }

    async fn create_barber(&self, barber: NewBarber) -> StorageResult<Barber> {
        let mut tables = self.inner.lock().await;
        let id = tables.barbers.allocate_id();
        Ok(tables.barbers.insert(id, barber.into_barber(id)))
    }

    async fn get_services(&self) -> StorageResult<Vec<Service>> {
        Ok(self.inner.lock().await.services.all())
    }

    async fn get_service(&self, id: i64) -> StorageResult<Option<Service>> {
        Ok(self.inner.lock().await.services.get(id))
    }

    async fn create_service(&self, service: NewService) -> StorageResult<Service> {
        let mut tables = self.inner.lock().await;
        let id = tables.services.allocate_id();
        Ok(tables.services.insert(id, service.into_service(id)))
    }

    async fn get_time_slots(&self, barber_id: i64, date: &str) -> StorageResult<Vec<TimeSlot>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .time_slots
            .rows
            .values()
            .filter(|slot| slot.barber_id == barber_id && slot.date == date)
            .cloned()
            .collect())
    }

    async fn get_time_slot(&self, id: i64) -> StorageResult<Option<TimeSlot>> {
        Ok(self.inner.lock().await.time_slots.get(id))
    }

    async fn create_time_slot(&self, slot: NewTimeSlot) -> StorageResult<TimeSlot> {
        let mut tables = self.inner.lock().await;
        let id = tables.time_slots.allocate_id();
        Ok(tables.time_slots.insert(id, slot.into_time_slot(id)))
    }

    async fn update_time_slot_availability(
        &self,
        id: i64,
        available: bool,
    ) -> StorageResult<Option<TimeSlot>> {
        let mut tables = self.inner.lock().await;
        Ok(tables.time_slots.rows.get_mut(&id).map(|slot| {
            slot.available = available;
            slot.clone()
        }))
    }

    async fn get_appointments(&self) -> StorageResult<Vec<Appointment>> {
        Ok(self.inner.lock().await.appointments.all())
    }

    async fn get_appointment(&self, id: i64) -> StorageResult<Option<Appointment>> {
        Ok(self.inner.lock().await.appointments.get(id))
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StorageResult<Appointment> {
        let created = {
            let mut tables = self.inner.lock().await;
            let id = tables.appointments.allocate_id();
            tables
                .appointments
                .insert(id, appointment.into_appointment(id, Utc::now()))
        };

        claim_matching_slot(self, &created).await?;
        Ok(created)
    }
}
