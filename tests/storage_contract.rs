mod common;

use barbearia::{
    seed::{self, SeedOutcome, SLOT_TIMES},
    storage::{SqliteStorage, Storage},
};
use chrono::NaiveDate;
use common::*;

const DAY: &str = "01/01/2030";

#[actix_web::test]
async fn ids_start_at_one_and_increase_per_entity() {
    for (name, store) in backends().await {
        let first = store.create_barber(barber("Ana")).await.unwrap();
        let second = store.create_barber(barber("Bruno")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2), "{name}");

        let service = store.create_service(service("Corte", 4500)).await.unwrap();
        assert_eq!(service.id, 1, "{name}");

        let a = store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();
        let b = store.create_time_slot(slot(1, DAY, "09:30")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2), "{name}");

        let x = store.create_appointment(booking(1, DAY, "10:00")).await.unwrap();
        let y = store.create_appointment(booking(1, DAY, "10:30")).await.unwrap();
        assert_eq!((x.id, y.id), (1, 2), "{name}");
    }
}

#[actix_web::test]
async fn created_records_round_trip_through_reads() {
    for (name, store) in backends().await {
        let created = store.create_barber(barber("Ana")).await.unwrap();
        assert_eq!(store.get_barber(created.id).await.unwrap(), Some(created.clone()), "{name}");
        assert_eq!(store.get_barbers().await.unwrap(), vec![created], "{name}");

        let corte = store.create_service(service("Corte", 4500)).await.unwrap();
        assert_eq!(corte.price, 4500, "{name}");
        assert_eq!(store.get_service(corte.id).await.unwrap(), Some(corte), "{name}");

        let appointment = store.create_appointment(booking(1, DAY, "09:00")).await.unwrap();
        let fetched = store.get_appointment(appointment.id).await.unwrap().unwrap();
        assert_eq!(fetched.customer_email, "carlos@example.com", "{name}");
        assert_eq!(fetched.notes.as_deref(), Some("Primeira visita"), "{name}");
        assert_eq!(
            fetched.created_at.timestamp(),
            appointment.created_at.timestamp(),
            "{name}"
        );
    }
}

#[actix_web::test]
async fn time_slots_filter_on_barber_and_date_exactly() {
    for (name, store) in backends().await {
        store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();
        store.create_time_slot(slot(2, DAY, "09:00")).await.unwrap();
        store.create_time_slot(slot(1, "02/01/2030", "09:00")).await.unwrap();
        store.create_time_slot(slot(1, DAY, "09:30")).await.unwrap();

        let slots = store.get_time_slots(1, DAY).await.unwrap();
        let times: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, ["09:00", "09:30"], "{name}");
        assert!(slots.iter().all(|s| s.barber_id == 1 && s.date == DAY), "{name}");

        assert!(store.get_time_slots(3, DAY).await.unwrap().is_empty(), "{name}");
        assert!(store.get_time_slots(1, "1/1/2030").await.unwrap().is_empty(), "{name}");
    }
}

#[actix_web::test]
async fn booking_marks_the_matching_slot_unavailable() {
    for (name, store) in backends().await {
        let target = store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();
        let other_time = store.create_time_slot(slot(1, DAY, "09:30")).await.unwrap();
        let other_barber = store.create_time_slot(slot(2, DAY, "09:00")).await.unwrap();

        store.create_appointment(booking(1, DAY, "09:00")).await.unwrap();

        let slot_available = |id: i64| {
            let store = store.clone();
            async move { store.get_time_slot(id).await.unwrap().unwrap().available }
        };
        assert!(!slot_available(target.id).await, "{name}");
        assert!(slot_available(other_time.id).await, "{name}");
        assert!(slot_available(other_barber.id).await, "{name}");
    }
}

#[actix_web::test]
async fn booking_without_a_slot_still_succeeds() {
    for (name, store) in backends().await {
        store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();

        let appointment = store.create_appointment(booking(1, DAY, "12:00")).await.unwrap();
        assert_eq!(appointment.id, 1, "{name}");
        assert!(store.get_time_slot(1).await.unwrap().unwrap().available, "{name}");

        // Unknown barber and service ids are accepted as-is.
        let mut orphan = booking(99, DAY, "09:00");
        orphan.service_id = 42;
        assert!(store.create_appointment(orphan).await.is_ok(), "{name}");
    }
}

#[actix_web::test]
async fn double_booking_is_not_prevented() {
    for (name, store) in backends().await {
        store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();

        store.create_appointment(booking(1, DAY, "09:00")).await.unwrap();
        store.create_appointment(booking(1, DAY, "09:00")).await.unwrap();

        assert_eq!(store.get_appointments().await.unwrap().len(), 2, "{name}");
        assert!(!store.get_time_slot(1).await.unwrap().unwrap().available, "{name}");
    }
}

#[actix_web::test]
async fn only_the_first_duplicate_slot_is_claimed() {
    for (name, store) in backends().await {
        let first = store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();
        let duplicate = store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();

        store.create_appointment(booking(1, DAY, "09:00")).await.unwrap();

        assert!(!store.get_time_slot(first.id).await.unwrap().unwrap().available, "{name}");
        assert!(store.get_time_slot(duplicate.id).await.unwrap().unwrap().available, "{name}");
    }
}

#[actix_web::test]
async fn unknown_ids_are_absent_not_errors() {
    for (name, store) in backends().await {
        assert!(store.get_barber(999).await.unwrap().is_none(), "{name}");
        assert!(store.get_service(999).await.unwrap().is_none(), "{name}");
        assert!(store.get_time_slot(999).await.unwrap().is_none(), "{name}");
        assert!(store.get_appointment(999).await.unwrap().is_none(), "{name}");
        assert!(
            store.update_time_slot_availability(999, false).await.unwrap().is_none(),
            "{name}"
        );
    }
}

#[actix_web::test]
async fn availability_can_be_toggled_back() {
    for (name, store) in backends().await {
        let created = store.create_time_slot(slot(1, DAY, "09:00")).await.unwrap();

        let closed = store.update_time_slot_availability(created.id, false).await.unwrap();
        assert_eq!(closed.map(|s| s.available), Some(false), "{name}");

        let reopened = store.update_time_slot_availability(created.id, true).await.unwrap();
        assert_eq!(reopened.map(|s| s.available), Some(true), "{name}");
    }
}

#[actix_web::test]
async fn seeding_is_idempotent() {
    let today = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();

    for (name, store) in backends().await {
        let outcome = seed::seed_sample_data_on(store.as_ref(), today).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                barbers: 3,
                services: 4,
                time_slots: 3 * 2 * SLOT_TIMES.len(),
            },
            "{name}"
        );

        let again = seed::seed_sample_data_on(store.as_ref(), today).await.unwrap();
        assert_eq!(again, SeedOutcome::Skipped, "{name}");

        assert_eq!(store.get_barbers().await.unwrap().len(), 3, "{name}");
        assert_eq!(store.get_services().await.unwrap().len(), 4, "{name}");
        for barber_id in 1..=3 {
            let today_slots = store.get_time_slots(barber_id, "31/12/2030").await.unwrap();
            let tomorrow_slots = store.get_time_slots(barber_id, "01/01/2031").await.unwrap();
            assert_eq!(today_slots.len(), SLOT_TIMES.len(), "{name}");
            assert_eq!(tomorrow_slots.len(), SLOT_TIMES.len(), "{name}");
            assert!(today_slots.iter().all(|s| s.available), "{name}");
        }
    }
}

#[actix_web::test]
async fn seeding_skips_when_any_barber_exists() {
    for (name, store) in backends().await {
        store.create_barber(barber("Ana")).await.unwrap();

        let outcome = seed::seed_sample_data(store.as_ref()).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Skipped, "{name}");
        assert!(store.get_services().await.unwrap().is_empty(), "{name}");
    }
}

#[actix_web::test]
async fn sqlite_file_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("barbearia.db");
    let url = format!("sqlite://{}", db_path.display());
    let today = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();

    let store = SqliteStorage::connect(&url).await.unwrap();
    seed::seed_sample_data_on(&store, today).await.unwrap();
    let first = store.create_appointment(booking(1, "01/06/2030", "09:00")).await.unwrap();
    assert_eq!(first.id, 1);
    store.close().await;
    drop(store);
    assert!(db_path.exists());

    let reopened = SqliteStorage::connect(&url).await.unwrap();
    assert_eq!(reopened.get_barbers().await.unwrap().len(), 3);
    assert_eq!(reopened.get_services().await.unwrap().len(), 4);

    let kept = reopened.get_appointment(1).await.unwrap().unwrap();
    assert_eq!(kept.customer_email, first.customer_email);
    assert_eq!(kept.created_at.timestamp(), first.created_at.timestamp());

    let slots = reopened.get_time_slots(1, "01/06/2030").await.unwrap();
    let nine = slots.iter().find(|s| s.time == "09:00").unwrap();
    assert!(!nine.available);

    let outcome = seed::seed_sample_data_on(&reopened, today).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Skipped);
    assert_eq!(reopened.get_barbers().await.unwrap().len(), 3);

    let second = reopened.create_appointment(booking(2, "02/06/2030", "10:00")).await.unwrap();
    assert_eq!(second.id, 2);
    reopened.close().await;
}
