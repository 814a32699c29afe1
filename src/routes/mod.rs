pub mod api;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::ApiError;

/// Reports unreadable or incomplete JSON bodies as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        ApiError::Validation(format!("Validation error: {err}")).into()
    })
}
