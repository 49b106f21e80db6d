use crate::domain::model::{AdminCompany, ApiEnvelope};
use crate::utils::error::{AppError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<BackendMethod> for Method {
    fn from(method: BackendMethod) -> Self {
        match method {
            BackendMethod::Get => Method::GET,
            BackendMethod::Post => Method::POST,
            BackendMethod::Patch => Method::PATCH,
            BackendMethod::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone)]
pub enum BackendBody {
    Empty,
    Json(Value),
    /// Forwarded as-is, e.g. a multipart upload with its boundary.
    Raw {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    /// `None` when the body is empty or not JSON.
    pub payload: Option<Value>,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn message(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|payload| payload.get("message"))
            .and_then(Value::as_str)
    }
}

/// Thin JSON client for the external backend service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request. Non-2xx statuses are returned, not raised; only
    /// transport failures are errors.
    pub async fn call(
        &self,
        method: BackendMethod,
        path: &str,
        body: BackendBody,
        authorization: Option<&str>,
    ) -> Result<BackendResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Backend request: {:?} {}", method, url);

        let mut request = self
            .client
            .request(method.into(), &url)
            .header(ACCEPT, "application/json");

        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        request = match body {
            BackendBody::Empty => request,
            BackendBody::Json(value) => request.json(&value),
            BackendBody::Raw {
                content_type,
                bytes,
            } => {
                if let Some(content_type) = content_type {
                    request = request.header(CONTENT_TYPE, content_type);
                }
                request.body(bytes)
            }
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let payload = serde_json::from_slice::<Value>(&bytes).ok();

        tracing::debug!("Backend response status: {}", status);
        Ok(BackendResponse { status, payload })
    }

    pub async fn list_companies(
        &self,
        per_page: usize,
        authorization: Option<&str>,
    ) -> Result<Vec<AdminCompany>> {
        let response = self
            .call(
                BackendMethod::Get,
                &format!("/admin/companies?per_page={}", per_page),
                BackendBody::Empty,
                authorization,
            )
            .await?;

        if !response.is_success() {
            return Err(AppError::BackendError {
                status: response.status,
                message: response
                    .message()
                    .unwrap_or("failed to fetch admin companies")
                    .to_string(),
            });
        }

        let payload = response.payload.ok_or_else(|| AppError::BackendError {
            status: response.status,
            message: "backend returned no JSON body".to_string(),
        })?;
        let envelope: ApiEnvelope<Vec<AdminCompany>> = serde_json::from_value(payload)?;
        Ok(envelope.data)
    }
}
