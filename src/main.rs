use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;

use ephemera::{handlers, AppState, MIGRATIONS};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let secret = std::env::var("SECRET_KEY").expect("env SECRET_KEY");
    let port = std::env::var("PORT").expect("env PORT");
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "notes.db".to_string());
    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("failed to create a sqlite pool");
    pool.get()
        .expect("failed to check out a connection")
        .run_pending_migrations(MIGRATIONS)
        .expect("failed to run migrations");

    let state = AppState { secret, base_url };

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(60)
        .finish()
        .expect("governor configuration is valid");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(state.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::index))
            .route("/create/", web::post().to(handlers::note::create))
            .route("/read/{id}", web::get().to(handlers::note::read))
            .route("/cleanup/", web::delete().to(handlers::note::cleanup))
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
