//! Sample catalog: three barbers, four services and a two-day grid of
//! slots. Runs only against a store with no barbers.

use chrono::{Days, Local, NaiveDate};

use crate::{
    error::StorageResult,
    models::{NewBarber, NewService, NewTimeSlot},
    storage::Storage,
};

pub const SLOT_TIMES: [&str; 16] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "13:00", "13:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Skipped,
    Seeded {
        barbers: usize,
        services: usize,
        time_slots: usize,
    },
}

/// `DD/MM/YYYY`, the format slot and appointment dates are stored in.
pub fn format_slot_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn seed_sample_data<S>(store: &S) -> StorageResult<SeedOutcome>
where
    S: Storage + ?Sized,
{
    seed_sample_data_on(store, today()).await
}

/// Seeds with slots for `today` and the following day.
pub async fn seed_sample_data_on<S>(store: &S, today: NaiveDate) -> StorageResult<SeedOutcome>
where
    S: Storage + ?Sized,
{
    if !store.get_barbers().await?.is_empty() {
        log::info!("Sample data already exists, skipping initialization");
        return Ok(SeedOutcome::Skipped);
    }

    log::info!("Initializing sample data...");

    let mut barber_ids = Vec::new();
    for barber in sample_barbers() {
        barber_ids.push(store.create_barber(barber).await?.id);
    }

    let services = sample_services();
    let service_count = services.len();
    for service in services {
        store.create_service(service).await?;
    }

    let tomorrow = today + Days::new(1);
    let dates = [format_slot_date(today), format_slot_date(tomorrow)];

    let mut slot_count = 0;
    for time in SLOT_TIMES {
        for barber_id in &barber_ids {
            for date in &dates {
                store
                    .create_time_slot(NewTimeSlot {
                        barber_id: *barber_id,
                        time: time.to_string(),
                        date: date.clone(),
                        available: true,
                    })
                    .await?;
                slot_count += 1;
            }
        }
    }

    log::info!(
        "Sample data initialized: {} barbers, {} services, {} time slots",
        barber_ids.len(),
        service_count,
        slot_count
    );

    Ok(SeedOutcome::Seeded {
        barbers: barber_ids.len(),
        services: service_count,
        time_slots: slot_count,
    })
}

fn sample_barbers() -> Vec<NewBarber> {
    vec![
        NewBarber {
            name: "Miguel Silva".to_string(),
            title: "Master Barber".to_string(),
            experience: "8 anos de experiência".to_string(),
            rating: "4.8".to_string(),
            review_count: 124,
            image_url: "https://images.unsplash.com/photo-1581481615985-ba4775734a9b?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300&q=80".to_string(),
            available: true,
        },
        NewBarber {
            name: "André Oliveira".to_string(),
            title: "Style Specialist".to_string(),
            experience: "5 anos de experiência".to_string(),
            rating: "4.2".to_string(),
            review_count: 98,
            image_url: "https://pixabay.com/get/g3b9b13414780061f51af95a80629e0a86820b4d6b56d29eb6be7d134e1e8e145dea662ea122c2adee7be0f44853c74035e85f9e054a8c9ebf00d09391ead557e_1280.jpg".to_string(),
            available: true,
        },
        NewBarber {
            name: "Lucas Mendes".to_string(),
            title: "Beard Specialist".to_string(),
            experience: "3 anos de experiência".to_string(),
            rating: "5.0".to_string(),
            review_count: 57,
            image_url: "https://images.unsplash.com/photo-1596728325488-58c87691e9af?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300&q=80".to_string(),
            available: true,
        },
    ]
}

fn sample_services() -> Vec<NewService> {
    let service = |name: &str, description: &str, price: i64, duration: i64, icon: &str| NewService {
        name: name.to_string(),
        description: description.to_string(),
        price,
        duration,
        icon: icon.to_string(),
    };

    vec![
        service("Corte Clássico", "Inclui lavagem e finalização", 4500, 30, "ri-scissors-line"),
        service("Barba Completa", "Com toalha quente e produtos premium", 3500, 20, "ri-scissors-2-line"),
        service("Combo Corte e Barba", "Nosso serviço mais popular", 7000, 50, "ri-brush-line"),
        service("Degradê e Design", "Fade com detalhes personalizados", 6000, 40, "ri-magic-line"),
    ]
}
