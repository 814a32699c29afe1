use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{claim_matching_slot, Storage};
use crate::{
    db,
    error::StorageResult,
    models::{
        Appointment, Barber, NewAppointment, NewBarber, NewService, NewTimeSlot, Service,
        TimeSlot,
    },
};

const BARBER_COLUMNS: &str =
    "id, name, title, experience, rating, review_count, image_url, available";
const SERVICE_COLUMNS: &str = "id, name, description, price, duration, icon";
const TIME_SLOT_COLUMNS: &str = "id, barber_id, time, date, available";
const APPOINTMENT_COLUMNS: &str = "id, barber_id, service_id, date, time, customer_name, \
     customer_phone, customer_email, notes, created_at";

/// Relational store backed by SQLite. Survives restarts.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn connect(db_url: &str) -> StorageResult<Self> {
        let pool = db::connect(db_url).await?;
        Ok(Self { pool })
    }

    /// Waits for open connections to finish and shuts the pool down.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get_barbers(&self) -> StorageResult<Vec<Barber>> {
        let rows = sqlx::query_as::<_, Barber>(&format!(
            "SELECT {BARBER_COLUMNS} FROM barbers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_barber(&self, id: i64) -> StorageResult<Option<Barber>> {
        let row = sqlx::query_as::<_, Barber>(&format!(
            "SELECT {BARBER_COLUMNS} FROM barbers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_barber(&self, barber: NewBarber) -> StorageResult<Barber> {
        let row = sqlx::query_as::<_, Barber>(&format!(
            r#"INSERT INTO barbers (name, title, experience, rating, review_count, image_url, available)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING {BARBER_COLUMNS}"#
        ))
        .bind(barber.name)
        .bind(barber.title)
        .bind(barber.experience)
        .bind(barber.rating)
        .bind(barber.review_count)
        .bind(barber.image_url)
        .bind(barber.available)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_services(&self) -> StorageResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_service(&self, id: i64) -> StorageResult<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_service(&self, service: NewService) -> StorageResult<Service> {
        let row = sqlx::query_as::<_, Service>(&format!(
            r#"INSERT INTO services (name, description, price, duration, icon)
               VALUES (?, ?, ?, ?, ?)
               RETURNING {SERVICE_COLUMNS}"#
        ))
        .bind(service.name)
        .bind(service.description)
        .bind(service.price)
        .bind(service.duration)
        .bind(service.icon)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_time_slots(&self, barber_id: i64, date: &str) -> StorageResult<Vec<TimeSlot>> {
        let rows = sqlx::query_as::<_, TimeSlot>(&format!(
            "SELECT {TIME_SLOT_COLUMNS} FROM time_slots WHERE barber_id = ? AND date = ? ORDER BY id"
        ))
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_time_slot(&self, id: i64) -> StorageResult<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, TimeSlot>(&format!(
            "SELECT {TIME_SLOT_COLUMNS} FROM time_slots WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_time_slot(&self, slot: NewTimeSlot) -> StorageResult<TimeSlot> {
        let row = sqlx::query_as::<_, TimeSlot>(&format!(
            r#"INSERT INTO time_slots (barber_id, time, date, available)
               VALUES (?, ?, ?, ?)
               RETURNING {TIME_SLOT_COLUMNS}"#
        ))
        .bind(slot.barber_id)
        .bind(slot.time)
        .bind(slot.date)
        .bind(slot.available)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_time_slot_availability(
        &self,
        id: i64,
        available: bool,
    ) -> StorageResult<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, TimeSlot>(&format!(
            "UPDATE time_slots SET available = ? WHERE id = ? RETURNING {TIME_SLOT_COLUMNS}"
        ))
        .bind(available)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_appointments(&self) -> StorageResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_appointment(&self, id: i64) -> StorageResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StorageResult<Appointment> {
        let created = sqlx::query_as::<_, Appointment>(&format!(
            r#"INSERT INTO appointments
               (barber_id, service_id, date, time, customer_name, customer_phone, customer_email, notes, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {APPOINTMENT_COLUMNS}"#
        ))
        .bind(appointment.barber_id)
        .bind(appointment.service_id)
        .bind(appointment.date)
        .bind(appointment.time)
        .bind(appointment.customer_name)
        .bind(appointment.customer_phone)
        .bind(appointment.customer_email)
        .bind(appointment.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        claim_matching_slot(self, &created).await?;
        Ok(created)
    }
}
