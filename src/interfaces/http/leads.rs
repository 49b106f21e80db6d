use crate::core::companies::lead_from_company;
use crate::core::export::{export_csv, EXPORT_FILENAME};
use crate::core::listing::{filter_leads, page_sequence, paginate, MAX_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::core::upload::{import_upload, UploadOutcome, LABEL_RESET_AFTER};
use crate::core::Lead;
use crate::interfaces::http::auth::forwarded_authorization;
use crate::interfaces::http::{error_body, AppState};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_range;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Lead as served over HTTP. Older table code reads the business type under
/// two misspelled keys, so they are emitted alongside `type_business`.
#[derive(Debug, Serialize)]
pub struct LeadView<'a> {
    #[serde(flatten)]
    lead: &'a Lead,
    type_bussiness: &'a str,
    #[serde(rename = "typeBussiness")]
    type_bussiness_camel: &'a str,
}

impl<'a> From<&'a Lead> for LeadView<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            lead,
            type_bussiness: &lead.type_business,
            type_bussiness_camel: &lead.type_business,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn upload_leads(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> HttpResponse {
    let result = import_upload(&query.filename, &body, state.ids.as_ref());
    let outcome = UploadOutcome::from_result(&result);
    let reset_after_ms = LABEL_RESET_AFTER.as_millis() as u64;

    match result {
        Ok(leads) => {
            let count = state.leads.replace(leads);
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": outcome.label(),
                "reset_after_ms": reset_after_ms,
                "data": { "count": count },
            }))
        }
        Err(e) => {
            tracing::warn!("⚠️ Upload of '{}' rejected: {}", query.filename, e);
            HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": outcome.label(),
                "reset_after_ms": reset_after_ms,
            }))
        }
    }
}

pub async fn list_leads(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page_size = query
        .page_size
        .unwrap_or(state.settings.default_page_size);
    validate_range("page_size", page_size, 1, MAX_PAGE_SIZE).map_err(|_| {
        AppError::ValidationError {
            message: format!("page_size must be between 1 and {}", MAX_PAGE_SIZE),
        }
    })?;

    let leads = state.leads.snapshot();
    let filtered = filter_leads(&leads, &query.q);
    let window = paginate(filtered.len(), query.page.unwrap_or(1), page_size);
    let data: Vec<LeadView> = window
        .slice(&filtered)
        .iter()
        .map(|lead| LeadView::from(*lead))
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": data,
        "pagination": window,
        "pages": page_sequence(window.current_page, window.total_pages),
        "page_size_options": PAGE_SIZE_OPTIONS,
    })))
}

pub async fn export_leads(
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse> {
    let leads = state.leads.snapshot();
    let filtered = filter_leads(&leads, &query.q);

    let Some(csv) = export_csv(filtered.iter().copied())? else {
        return Ok(HttpResponse::NoContent().finish());
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILENAME.to_string())],
        })
        .body(csv))
}

pub async fn sync_leads(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let authorization = forwarded_authorization(&req);
    let companies = match state
        .backend
        .list_companies(state.settings.companies_per_page, authorization.as_deref())
        .await
    {
        Ok(companies) => companies,
        Err(AppError::BackendError { status, message }) => {
            let status = actix_web::http::StatusCode::from_u16(status)
                .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
            return HttpResponse::build(status).json(error_body(&message));
        }
        Err(e) => {
            tracing::error!("❌ Company sync failed: {}", e);
            return HttpResponse::BadGateway().json(error_body("failed to fetch admin companies"));
        }
    };

    let count = state
        .leads
        .replace(companies.iter().map(lead_from_company).collect());
    tracing::info!("🔄 Synced {} leads from backend companies", count);

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": format!("Synced {} leads", count),
        "data": { "count": count },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::csv_parser::parse_csv;
    use crate::core::id_gen::SequentialIdGenerator;

    #[test]
    fn test_lead_view_emits_legacy_business_type_keys() {
        let ids = SequentialIdGenerator::default();
        let leads = parse_csv("name,type business\nKopi,Cafe\n", &ids);
        let value = serde_json::to_value(LeadView::from(&leads[0])).unwrap();
        assert_eq!(value["type_business"], "Cafe");
        assert_eq!(value["type_bussiness"], "Cafe");
        assert_eq!(value["typeBussiness"], "Cafe");
        assert_eq!(value["name"], "Kopi");
    }
}
