use actix_web::{get, post, web, HttpResponse, Responder, Result as WebResult};
use tracing::error;

use crate::api::models::{CreateMessageRequest, DbDebugResponse, ErrorResponse};
use crate::config::{ApiConfig, AppConfig};
use crate::db::{service::DbService, DbPool};

#[get("/health")]
pub async fn health() -> impl Responder {
    // Fixed response, never touches the pool
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

#[post("/messages")]
pub async fn create_message(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    req: web::Json<CreateMessageRequest>,
) -> WebResult<HttpResponse> {
    let req = req.into_inner();

    if config.api.validate_fields && !req.is_valid() {
        return Ok(HttpResponse::BadRequest()
            .json(ErrorResponse::new("username and message are required")));
    }

    match DbService::insert_message(&pool, req.username.as_deref(), req.message.as_deref()).await {
        Ok(()) => Ok(HttpResponse::Created().json(serde_json::json!({"success": true}))),
        Err(e) => {
            error!("Error inserting message: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new("db error")))
        }
    }
}

#[get("/messages")]
pub async fn list_messages(pool: web::Data<DbPool>) -> WebResult<HttpResponse> {
    match DbService::list_messages(&pool).await {
        Ok(messages) => Ok(HttpResponse::Ok().json(messages)),
        Err(e) => {
            error!("Error fetching messages: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new("db error")))
        }
    }
}

#[get("/db-debug")]
pub async fn db_debug(pool: web::Data<DbPool>) -> WebResult<HttpResponse> {
    let info = DbService::db_info(&pool).await;
    let count = DbService::count_messages(&pool).await;

    match (info, count) {
        (Ok(db_info), Ok(messages_count)) => Ok(HttpResponse::Ok().json(DbDebugResponse {
            db_info,
            messages_count,
        })),
        (Err(e), _) | (_, Err(e)) => {
            error!("Error collecting db debug info: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new("db debug failed")))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, api: &ApiConfig) {
    let mut scope = web::scope("/api")
        .service(health)
        .service(create_message)
        .service(list_messages);

    if api.expose_debug_endpoint {
        scope = scope.service(db_debug);
    }

    cfg.service(scope);
}
