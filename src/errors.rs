use actix_web::HttpResponse;
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    DieselError,
    EnvironmentError,
    R2D2Error,
    Unauthorized,
    Forbidden(&'static str),
    NotFound(String),
}

impl From<r2d2::Error> for ServerError {
    fn from(_: r2d2::Error) -> ServerError {
        ServerError::R2D2Error
    }
}

impl From<std::env::VarError> for ServerError {
    fn from(_: std::env::VarError) -> ServerError {
        ServerError::EnvironmentError
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(_: diesel::result::Error) -> ServerError {
        ServerError::DieselError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::DieselError => HttpResponse::InternalServerError()
                .json(json!({ "error": "Server Error: storage unavailable." })),
            ServerError::EnvironmentError => HttpResponse::InternalServerError().json(
                json!({ "error": "Server Error: use of an uninitialized environment variable." }),
            ),
            ServerError::R2D2Error => HttpResponse::InternalServerError()
                .json(json!({ "error": "Server Error: pooling error." })),
            ServerError::Unauthorized => HttpResponse::Unauthorized()
                .json(json!({ "error": "Missing or invalid authorization header" })),
            ServerError::Forbidden(detail) => {
                HttpResponse::Forbidden().json(json!({ "error": detail }))
            }
            ServerError::NotFound(id) => HttpResponse::NotFound()
                .json(json!({ "error": format!("note id: {} was not found", id) })),
        }
    }
}
