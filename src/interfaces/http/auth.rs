use crate::adapters::{BackendBody, BackendMethod};
use crate::config::ServerSettings;
use crate::interfaces::http::{error_body, relay, AppState};
use crate::utils::validation::validate_non_empty_string;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use serde_json::{json, Value};

pub const AUTH_COOKIE: &str = "auth_token";

/// Reachable without a session cookie.
pub const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/register",
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
    "/_next",
    "/api/auth",
    "/health",
];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn has_session(req: &HttpRequest) -> bool {
    req.cookie(AUTH_COOKIE)
        .is_some_and(|cookie| !cookie.value().is_empty())
}

/// Lets public paths and requests carrying a session cookie through. API
/// calls without one get a 401, page requests a redirect to the login page.
pub async fn require_session<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if is_public_path(req.path()) || has_session(req.request()) {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }

    let path = req.path().to_string();
    let response = if path.starts_with("/api/") {
        tracing::debug!("🔒 Rejecting anonymous API call to {}", path);
        HttpResponse::Unauthorized().json(error_body("unauthorized"))
    } else {
        tracing::debug!("🔒 Redirecting anonymous visitor from {}", path);
        HttpResponse::Found()
            .insert_header((header::LOCATION, login_redirect(&path)))
            .finish()
    };

    Ok(req.into_response(response).map_into_right_body())
}

pub fn login_redirect(from: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .finish();
    format!("/login?{}", query)
}

/// Authorization value forwarded to the backend: the incoming header, else
/// a bearer token from the session cookie.
pub fn forwarded_authorization(req: &HttpRequest) -> Option<String> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty());

    if let Some(value) = header_value {
        return Some(value.to_string());
    }

    req.cookie(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {}", token))
}

pub fn session_cookie(token: String, settings: &ServerSettings) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .max_age(time::Duration::seconds(settings.cookie_max_age_seconds))
        .finish()
}

/// Returns the parsed body when it has non-empty `email` and `password` strings.
fn parse_credentials(body: &[u8]) -> Option<Value> {
    let value: Value = serde_json::from_slice(body).ok()?;
    for field in ["email", "password"] {
        let text = value.get(field)?.as_str()?;
        validate_non_empty_string(field, text).ok()?;
    }
    Some(value)
}

fn missing_credentials() -> HttpResponse {
    HttpResponse::BadRequest().json(error_body("email and password are required"))
}

pub async fn login(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let Some(credentials) = parse_credentials(&body) else {
        return missing_credentials();
    };

    let forwarded = json!({
        "email": credentials["email"],
        "password": credentials["password"],
    });

    let response = match state
        .backend
        .call(BackendMethod::Post, "/auth/login", BackendBody::Json(forwarded), None)
        .await
    {
        Ok(response) => response,
        Err(e) => return relay(Err(e), "failed to login"),
    };

    if !response.is_success() {
        tracing::warn!("⚠️ Login rejected by backend with status {}", response.status);
        return relay(Ok(response), "failed to login");
    }

    let token = response
        .payload
        .as_ref()
        .and_then(|payload| payload.pointer("/data/access_token"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut builder = HttpResponse::Ok();
    match token {
        Some(token) => {
            builder.cookie(session_cookie(token, &state.settings));
        }
        None => tracing::warn!("⚠️ Login succeeded but backend returned no access_token"),
    }
    builder.json(response.payload.unwrap_or(Value::Null))
}

pub async fn register(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let Some(payload) = parse_credentials(&body) else {
        return missing_credentials();
    };

    let result = state
        .backend
        .call(BackendMethod::Post, "/auth/register", BackendBody::Json(payload), None)
        .await;

    match result {
        Ok(response) if response.is_success() => {
            HttpResponse::Ok().json(response.payload.unwrap_or(Value::Null))
        }
        other => relay(other, "failed to register"),
    }
}

pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "status": "success" }))
}
