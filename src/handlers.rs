use diesel::{r2d2::ConnectionManager, SqliteConnection};

pub mod note;
pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub async fn index() -> impl actix_web::Responder {
    actix_web::HttpResponse::Ok().finish()
}
