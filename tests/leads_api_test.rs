use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::middleware::from_fn;
use actix_web::{test, web, App};
use httpmock::prelude::*;
use lead_admin::core::id_gen::SequentialIdGenerator;
use lead_admin::interfaces::http::{auth, configure, AppState};
use lead_admin::ServerSettings;
use serde_json::{json, Value};
use std::sync::Arc;

const SAMPLE_CSV: &str = "name;email;company;website;type business\n\
                          Andi;andi@kopi.id;Kopi Kita;kopikita.id;Cafe\n\
                          Sari;sari@roti.id;\"Roti, Bakery\";null;Bakery\n\
                          Budi;budi@kopi.id;Kopi Kita;https://kopikita.id;Cafe\n";

fn state_for(base_url: String) -> web::Data<AppState> {
    let settings = ServerSettings {
        backend_url: base_url,
        ..Default::default()
    };
    web::Data::new(
        AppState::from_settings(settings)
            .unwrap()
            .with_id_generator(Arc::new(SequentialIdGenerator::new("t"))),
    )
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(from_fn(auth::require_session))
                .configure(configure),
        )
        .await
    };
}

fn session() -> Cookie<'static> {
    Cookie::new(auth::AUTH_COOKIE, "tok-123")
}

fn upload_request(filename: &str, body: &'static str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/api/leads/upload?filename={}", filename))
        .cookie(session())
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .set_payload(body)
}

#[actix_web::test]
async fn test_upload_then_list_with_search_and_pages() {
    let state = state_for("http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let resp = test::call_service(&app, upload_request("leads.csv", SAMPLE_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Uploaded 3 leads");
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["reset_after_ms"], 1800);

    let req = test::TestRequest::get()
        .uri("/api/leads?page_size=2")
        .cookie(session())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["id"], "andikopiid-t1");
    assert_eq!(body["data"][0]["links"]["website"], "https://kopikita.id");
    assert_eq!(body["data"][0]["typeBussiness"], "Cafe");
    assert_eq!(body["data"][1]["company"], "Roti, Bakery");
    assert!(body["data"][1]["links"]["website"].is_null());
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["start_entry"], 1);
    assert_eq!(body["pagination"]["end_entry"], 2);
    assert_eq!(body["pages"], json!([1, 2]));

    let req = test::TestRequest::get()
        .uri("/api/leads?q=KOPI&page=9")
        .cookie(session())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["total_items"], 2);
    assert_eq!(body["pagination"]["current_page"], 1);
}

#[actix_web::test]
async fn test_upload_rejects_wrong_extension_and_keeps_leads() {
    let state = state_for("http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    test::call_service(&app, upload_request("leads.csv", SAMPLE_CSV).to_request()).await;

    let resp = test::call_service(&app, upload_request("leads.txt", "name\nX\n").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please select a .csv file");

    assert_eq!(state.leads.snapshot().len(), 3);
}

#[actix_web::test]
async fn test_list_rejects_zero_page_size() {
    let state = state_for("http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/leads?page_size=0")
        .cookie(session())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_rejects_oversized_page_size() {
    let state = state_for("http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    test::call_service(&app, upload_request("leads.csv", "name\nA\nB\n").to_request()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/leads?page_size={}", usize::MAX))
        .cookie(session())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/leads?page_size=1000")
        .cookie(session())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["start_entry"], 1);
    assert_eq!(body["pagination"]["end_entry"], 2);
}

#[actix_web::test]
async fn test_export_filtered_csv() {
    let state = state_for("http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/leads/export")
        .cookie(session())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    test::call_service(&app, upload_request("leads.csv", SAMPLE_CSV).to_request()).await;

    let req = test::TestRequest::get()
        .uri("/api/leads/export?q=bakery")
        .cookie(session())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("leads.csv"));

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Name,"));
    assert!(lines[1].contains("\"Roti, Bakery\""));
}

#[actix_web::test]
async fn test_sync_replaces_leads_with_backend_companies() {
    let server = MockServer::start_async().await;
    let backend_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/companies")
                .query_param("per_page", "200")
                .header("authorization", "Bearer tok-123");
            then.status(200).json_body(json!({
                "status": "success",
                "data": [
                    {
                        "id": "c_1",
                        "company": "Warung Sejahtera",
                        "industry": "Food",
                        "city": "Bandung",
                        "country": "Indonesia",
                        "website": "warung.id"
                    }
                ]
            }));
        })
        .await;

    let state = state_for(server.base_url());
    let app = init_app!(state);

    test::call_service(&app, upload_request("leads.csv", SAMPLE_CSV).to_request()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/sync")
        .cookie(session())
        .to_request();
    let resp = test::call_service(&app, req).await;

    backend_mock.assert_async().await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["count"], 1);

    let leads = state.leads.snapshot();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].company, "Warung Sejahtera");
    assert_eq!(leads[0].location, "Bandung, Indonesia");
    assert_eq!(leads[0].links.website.as_deref(), Some("https://warung.id"));
}

#[actix_web::test]
async fn test_sync_passes_backend_failure_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/companies");
            then.status(403)
                .json_body(json!({"status": "error", "message": "forbidden"}));
        })
        .await;

    let state = state_for(server.base_url());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/leads/sync")
        .cookie(session())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "forbidden");
}
