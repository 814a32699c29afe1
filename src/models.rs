use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub experience: String,
    pub rating: String,
    pub review_count: i64,
    pub image_url: String,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBarber {
    pub name: String,
    pub title: String,
    pub experience: String,
    pub rating: String,
    pub review_count: i64,
    pub image_url: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl NewBarber {
    pub fn into_barber(self, id: i64) -> Barber {
        Barber {
            id,
            name: self.name,
            title: self.title,
            experience: self.experience,
            rating: self.rating,
            review_count: self.review_count,
            image_url: self.image_url,
            available: self.available,
        }
    }
}

/// A bookable offering. `price` is in cents.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i64,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i64,
    pub icon: String,
}

impl NewService {
    pub fn into_service(self, id: i64) -> Service {
        Service {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            icon: self.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: i64,
    pub barber_id: i64,
    pub time: String,
    pub date: String,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeSlot {
    pub barber_id: i64,
    pub time: String,
    pub date: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl NewTimeSlot {
    pub fn into_time_slot(self, id: i64) -> TimeSlot {
        TimeSlot {
            id,
            barber_id: self.barber_id,
            time: self.time,
            date: self.date,
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub barber_id: i64,
    pub service_id: i64,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Booking request as submitted by a customer. `id` and `createdAt` are
/// assigned by the store and never accepted from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub barber_id: i64,
    pub service_id: i64,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(length(min = 3, message = "customerName must contain at least 3 characters"))]
    pub customer_name: String,
    #[validate(length(min = 10, message = "customerPhone must contain at least 10 characters"))]
    pub customer_phone: String,
    #[validate(
        email(message = "customerEmail must be a valid email address"),
        custom(function = "email_domain_has_tld")
    )]
    pub customer_email: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn into_appointment(self, id: i64, created_at: DateTime<Utc>) -> Appointment {
        Appointment {
            id,
            barber_id: self.barber_id,
            service_id: self.service_id,
            date: self.date,
            time: self.time,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            notes: self.notes,
            created_at,
        }
    }

    /// Runs every field rule and folds all violations into one message.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| describe_violations(&errors))
    }
}

fn default_available() -> bool {
    true
}

/// The domain after `@` must be dotted labels ending in an alphabetic TLD
/// of at least two letters, so `user@localhost` and `x@y.z` are refused.
fn email_domain_has_tld(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("");
    let labels: Vec<&str> = domain.split('.').collect();

    let labels_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    if labels_ok && tld_ok {
        return Ok(());
    }

    let mut err = ValidationError::new("email_domain");
    err.message = Some(Cow::Borrowed(
        "customerEmail must end in a domain such as example.com",
    ));
    Err(err)
}

fn describe_violations(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    format!("Validation error: {}", messages.join("; "))
}
