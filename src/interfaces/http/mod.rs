pub mod admin;
pub mod auth;
pub mod leads;

use crate::adapters::{BackendClient, BackendResponse};
use crate::config::ServerSettings;
use crate::core::id_gen::UuidIdGenerator;
use crate::core::{IdGenerator, Lead};
use crate::utils::error::{AppError, Result};
use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use serde_json::json;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Upper bound for request bodies (CSV uploads).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// The current lead list. Uploads swap the whole list; readers get a snapshot.
#[derive(Debug, Default)]
pub struct LeadStore {
    current: RwLock<Arc<Vec<Lead>>>,
}

impl LeadStore {
    pub fn snapshot(&self) -> Arc<Vec<Lead>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, leads: Vec<Lead>) -> usize {
        let count = leads.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(leads);
        count
    }
}

pub struct AppState {
    pub backend: BackendClient,
    pub leads: LeadStore,
    pub ids: Arc<dyn IdGenerator>,
    pub settings: ServerSettings,
}

impl AppState {
    pub fn new(backend: BackendClient, settings: ServerSettings) -> Self {
        Self {
            backend,
            leads: LeadStore::default(),
            ids: Arc::new(UuidIdGenerator),
            settings,
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn from_settings(settings: ServerSettings) -> Result<Self> {
        let backend = BackendClient::new(
            &settings.backend_url,
            Duration::from_secs(settings.request_timeout_seconds),
        )?;
        Ok(Self::new(backend, settings))
    }
}

/// Registers every route. The session gate is applied by the caller with
/// `wrap(from_fn(auth::require_session))`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api/auth")
                .route("/login", web::post().to(auth::login))
                .route("/register", web::post().to(auth::register))
                .route("/logout", web::post().to(auth::logout)),
        )
        .service(
            web::scope("/api/admin")
                .route("/companies", web::get().to(admin::list_companies))
                .route("/users", web::get().to(admin::list_users))
                .route("/users", web::post().to(admin::create_user))
                .route("/users/{id}", web::patch().to(admin::update_user))
                .route("/users/{id}", web::delete().to(admin::delete_user))
                .route("/upload-csv", web::post().to(admin::upload_csv)),
        )
        .service(
            web::scope("/api/leads")
                .route("", web::get().to(leads::list_leads))
                .route("/upload", web::post().to(leads::upload_leads))
                .route("/export", web::get().to(leads::export_leads))
                .route("/sync", web::post().to(leads::sync_leads)),
        );
}

pub async fn run_server(settings: ServerSettings) -> Result<()> {
    let bind = (settings.bind_address.clone(), settings.port);
    let state = web::Data::new(AppState::from_settings(settings)?);

    tracing::info!(
        "🚀 Listening on http://{}:{} (backend: {})",
        bind.0,
        bind.1,
        state.backend.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(auth::require_session))
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub(crate) fn error_body(message: &str) -> serde_json::Value {
    json!({ "status": "error", "message": message })
}

/// Passes the backend status and JSON through; a missing or non-JSON body
/// becomes an error envelope, a transport failure a 502.
pub(crate) fn relay(result: Result<BackendResponse>, fallback_message: &str) -> HttpResponse {
    match result {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let payload = response
                .payload
                .unwrap_or_else(|| error_body(fallback_message));
            HttpResponse::build(status).json(payload)
        }
        Err(e) => {
            tracing::error!("❌ Backend call failed: {}", e);
            HttpResponse::BadGateway().json(json!({
                "status": "error",
                "message": fallback_message,
                "error": e.to_string(),
            }))
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. }
            | AppError::UnsupportedFile { .. }
            | AppError::InvalidFileContent => StatusCode::BAD_REQUEST,
            AppError::BackendError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::ApiError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(error_body(&self.user_friendly_message()))
    }
}
