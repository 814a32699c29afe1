use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{error::ApiError, models::NewAppointment, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotQuery {
    barber_id: Option<String>,
    date: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(
            web::scope("/api")
                .service(web::resource("/barbers").route(web::get().to(list_barbers)))
                .service(web::resource("/barbers/{id}").route(web::get().to(get_barber)))
                .service(web::resource("/services").route(web::get().to(list_services)))
                .service(web::resource("/timeslots").route(web::get().to(list_time_slots)))
                .service(
                    web::resource("/appointments").route(web::post().to(create_appointment)),
                )
                .service(
                    web::resource("/appointments/{id}").route(web::get().to(get_appointment)),
                ),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn list_barbers(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let barbers = state
        .storage
        .get_barbers()
        .await
        .map_err(|err| ApiError::internal("Failed to fetch barbers", err))?;
    Ok(HttpResponse::Ok().json(barbers))
}

async fn get_barber(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let not_found = ApiError::NotFound("Barber not found");
    let Some(id) = parse_id(&path) else {
        return Err(not_found);
    };

    let barber = state
        .storage
        .get_barber(id)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch barber", err))?
        .ok_or(not_found)?;
    Ok(HttpResponse::Ok().json(barber))
}

async fn list_services(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let services = state
        .storage
        .get_services()
        .await
        .map_err(|err| ApiError::internal("Failed to fetch services", err))?;
    Ok(HttpResponse::Ok().json(services))
}

async fn list_time_slots(
    state: web::Data<AppState>,
    query: web::Query<TimeSlotQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let barber_id = query.barber_id.as_deref().and_then(parse_id);
    let date = query.date.filter(|date| !date.is_empty());

    let (Some(barber_id), Some(date)) = (barber_id, date) else {
        return Err(ApiError::Validation(
            "barberId and date are required".to_string(),
        ));
    };

    let slots = state
        .storage
        .get_time_slots(barber_id, &date)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch time slots", err))?;
    Ok(HttpResponse::Ok().json(slots))
}

async fn create_appointment(
    state: web::Data<AppState>,
    body: web::Json<NewAppointment>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.check().map_err(ApiError::Validation)?;

    let appointment = state
        .storage
        .create_appointment(input)
        .await
        .map_err(|err| ApiError::internal("Failed to create appointment", err))?;

    log::info!(
        "Appointment {} booked with barber {} on {} at {}",
        appointment.id,
        appointment.barber_id,
        appointment.date,
        appointment.time
    );
    Ok(HttpResponse::Created().json(appointment))
}

async fn get_appointment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let not_found = ApiError::NotFound("Appointment not found");
    let Some(id) = parse_id(&path) else {
        return Err(not_found);
    };

    let appointment = state
        .storage
        .get_appointment(id)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch appointment", err))?
        .ok_or(not_found)?;
    Ok(HttpResponse::Ok().json(appointment))
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
