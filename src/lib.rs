use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
pub mod schema;
pub mod utils;

pub use errors::ServerError;
pub use handlers::Pool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Process-wide configuration, injected into handlers via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Bearer token required by `POST /create/`.
    pub secret: String,
    /// Prefix for the retrieval URLs handed back on create.
    pub base_url: String,
}
