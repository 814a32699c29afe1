#![allow(dead_code)]

use std::sync::Arc;

use barbearia::{
    models::{NewAppointment, NewBarber, NewService, NewTimeSlot},
    storage::{MemStorage, SqliteStorage, Storage},
};

/// One fresh instance of every backend, labelled for assertion messages.
pub async fn backends() -> Vec<(&'static str, Arc<dyn Storage>)> {
    let sqlite = SqliteStorage::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");
    vec![
        ("memory", Arc::new(MemStorage::new())),
        ("sqlite", Arc::new(sqlite)),
    ]
}

pub fn barber(name: &str) -> NewBarber {
    NewBarber {
        name: name.to_string(),
        title: "Barber".to_string(),
        experience: "2 anos de experiência".to_string(),
        rating: "4.5".to_string(),
        review_count: 10,
        image_url: "https://example.com/barber.jpg".to_string(),
        available: true,
    }
}

pub fn service(name: &str, price: i64) -> NewService {
    NewService {
        name: name.to_string(),
        description: "Descrição".to_string(),
        price,
        duration: 30,
        icon: "ri-scissors-line".to_string(),
    }
}

pub fn slot(barber_id: i64, date: &str, time: &str) -> NewTimeSlot {
    NewTimeSlot {
        barber_id,
        time: time.to_string(),
        date: date.to_string(),
        available: true,
    }
}

pub fn booking(barber_id: i64, date: &str, time: &str) -> NewAppointment {
    NewAppointment {
        barber_id,
        service_id: 1,
        date: date.to_string(),
        time: time.to_string(),
        customer_name: "Carlos Pereira".to_string(),
        customer_phone: "11987654321".to_string(),
        customer_email: "carlos@example.com".to_string(),
        notes: Some("Primeira visita".to_string()),
    }
}
