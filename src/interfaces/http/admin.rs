use crate::adapters::{BackendBody, BackendMethod};
use crate::core::users::{filter_users, split_by_role};
use crate::domain::model::{AdminUser, ApiEnvelope, CreateUserRequest, UpdateUserRequest};
use crate::interfaces::http::auth::forwarded_authorization;
use crate::interfaces::http::{error_body, relay, AppState};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_companies(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let path = format!(
        "/admin/companies?per_page={}",
        state.settings.companies_per_page
    );
    let result = state
        .backend
        .call(
            BackendMethod::Get,
            &path,
            BackendBody::Empty,
            forwarded_authorization(&req).as_deref(),
        )
        .await;
    relay(result, "failed to fetch admin companies")
}

/// Without `q` the backend answer is relayed as-is; with `q` the user list
/// is filtered here and role counts are added.
pub async fn list_users(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UserQuery>,
) -> HttpResponse {
    let result = state
        .backend
        .call(
            BackendMethod::Get,
            "/admin/users",
            BackendBody::Empty,
            forwarded_authorization(&req).as_deref(),
        )
        .await;

    let envelope = match &result {
        Ok(response) if response.is_success() && !query.q.trim().is_empty() => response
            .payload
            .clone()
            .and_then(|payload| serde_json::from_value::<ApiEnvelope<Vec<AdminUser>>>(payload).ok()),
        _ => None,
    };
    let Some(envelope) = envelope else {
        return relay(result, "failed to fetch users");
    };

    let matched = filter_users(&envelope.data, &query.q);
    let (admins, users) = split_by_role(&matched);
    HttpResponse::Ok().json(json!({
        "status": envelope.status,
        "data": matched,
        "counts": { "admin": admins.len(), "user": users.len() },
    }))
}

pub async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let payload = match serde_json::from_slice::<CreateUserRequest>(&body) {
        Ok(payload) if !payload.email.trim().is_empty() && !payload.password.is_empty() => payload,
        _ => {
            return HttpResponse::BadRequest()
                .json(error_body("email and password are required"))
        }
    };

    let body = match serde_json::to_value(&payload) {
        Ok(value) => value,
        Err(e) => return HttpResponse::InternalServerError().json(error_body(&e.to_string())),
    };

    let result = state
        .backend
        .call(
            BackendMethod::Post,
            "/admin/users",
            BackendBody::Json(body),
            forwarded_authorization(&req).as_deref(),
        )
        .await;
    relay(result, "failed to create user")
}

pub async fn update_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let Ok(payload) = serde_json::from_slice::<UpdateUserRequest>(&body) else {
        return HttpResponse::BadRequest().json(error_body("role must be admin or user"));
    };

    let result = state
        .backend
        .call(
            BackendMethod::Patch,
            &format!("/admin/users/{}", id.trim()),
            BackendBody::Json(json!({ "role": payload.role })),
            forwarded_authorization(&req).as_deref(),
        )
        .await;
    relay(result, "failed to update user")
}

pub async fn delete_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    let id = id.trim();
    if id.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "User id is required" }));
    }

    let result = state
        .backend
        .call(
            BackendMethod::Delete,
            &format!("/admin/users/{}", id),
            BackendBody::Empty,
            forwarded_authorization(&req).as_deref(),
        )
        .await;

    match result {
        // 後端常回空 body，補一個 success 旗標
        Ok(response) if response.payload.is_none() => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(json!({ "success": response.is_success() }))
        }
        other => relay(other, "Failed to delete user"),
    }
}

/// Forwards the multipart body untouched so the boundary stays valid.
pub async fn upload_csv(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    tracing::info!("📤 Forwarding CSV upload ({} bytes) to backend", body.len());

    let result = state
        .backend
        .call(
            BackendMethod::Post,
            "/admin/upload-csv",
            BackendBody::Raw {
                content_type,
                bytes: body.to_vec(),
            },
            forwarded_authorization(&req).as_deref(),
        )
        .await;
    relay(result, "failed to upload csv")
}
