use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use serde_derive::Deserialize;
use serde_json::json;

use super::Pool;
use crate::{
    errors::ServerError,
    models::note::{NewNote, Note},
    render,
    schema::notes::dsl::{created_at, notes},
    utils, AppState,
};

/// Notes older than this rolling window are removed by `DELETE /cleanup/`.
const CLEANUP_WINDOW_HOURS: i64 = 168;

pub async fn create(
    req: HttpRequest,
    input: web::Json<NewNote>,
    pool: web::Data<Pool>,
    env: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let token = utils::bearer_token(&req).ok_or(ServerError::Unauthorized)?;
    if !utils::secrets_match(&token, &env.secret) {
        return Err(ServerError::Forbidden("Invalid API password"));
    }

    let mut connection = pool.get()?;
    let record = input.into_inner().into_insertable();
    diesel::insert_into(notes)
        .values(&record)
        .execute(&mut connection)?;

    Ok(HttpResponse::Ok().json(json!({
        "url": format!("{}/read/{}", env.base_url, record.id),
    })))
}

#[derive(Deserialize)]
pub struct PasswordField {
    pub password: Option<String>,
}

pub async fn read(
    note_id: web::Path<String>,
    query: web::Query<PasswordField>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let nid = note_id.into_inner();

    // Fetch and self-expire in one transaction so two concurrent readers
    // cannot both consume a read-once note. A failed password check must
    // not consume it either.
    let fetched = connection.transaction::<Option<(Note, bool)>, diesel::result::Error, _>(
        |conn| {
            let note = notes.find(nid.as_str()).get_result::<Note>(conn).optional()?;
            let Some(note) = note else {
                return Ok(None);
            };
            let authorized = note.password_matches(query.password.as_deref());
            if authorized && note.expire_after_read {
                diesel::delete(notes.find(nid.as_str())).execute(conn)?;
            }
            Ok(Some((note, authorized)))
        },
    )?;

    let (note, authorized) = fetched.ok_or_else(|| ServerError::NotFound(nid.clone()))?;
    if !authorized {
        return Err(ServerError::Forbidden("Invalid password"));
    }

    let (metadata_html, body_html) = render::render(&note.content);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render::page(&metadata_html, &body_html)))
}

pub async fn cleanup(pool: web::Data<Pool>) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let threshold = Utc::now().naive_utc() - Duration::hours(CLEANUP_WINDOW_HOURS);
    let removed =
        diesel::delete(notes.filter(created_at.lt(threshold))).execute(&mut connection)?;
    log::info!("cleanup removed {} old notes", removed);

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Old notes cleaned up, {} removed", removed),
    })))
}
