mod common;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{entry, loan, store_with};
use http_body_util::BodyExt;
use hwcontrol::config::Config;
use hwcontrol::db::{JsonFileStore, RecordStore};
use hwcontrol::web::{AppState, build_app_router};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(records: Vec<hwcontrol::models::Record>) -> (TempDir, Arc<JsonFileStore>, Router) {
    let (dir, store) = store_with(records);
    let store = Arc::new(store);
    let config = Config::with_data_file(store.path());
    let router = build_app_router(AppState::new(store.clone(), config));
    (dir, store, router)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn form_page_lists_responsibles_and_overdue_loans() {
    let (_dir, _store, router) = app(vec![loan(1, "01/01/2020 10:00")]);

    let resp = router.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let html = body_text(resp).await;
    assert!(html.contains(r#"action="/register""#));
    assert!(html.contains("Fulano"));
    assert!(html.contains("Overdue loans"));
}

#[tokio::test]
async fn overdue_fragment_is_empty_without_overdue_loans() {
    let (_dir, _store, router) = app(vec![loan(1, "01/01/2999 10:00")]);

    let resp = router.oneshot(get("/overdue")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.is_empty());
}

#[tokio::test]
async fn records_page_omits_hidden_and_escapes_text() {
    let mut visible = entry(1, "01/10/2025 10:00");
    visible.brand = "<b>Acme</b>".into();
    let mut hidden = entry(2, "02/10/2025 10:00");
    hidden.hidden = true;
    hidden.asset_tag = "9999999".into();
    let (_dir, _store, router) = app(vec![visible, hidden]);

    let resp = router.oneshot(get("/records")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;

    assert!(html.contains(r#"data-id="1""#));
    assert!(!html.contains(r#"data-id="2""#));
    assert!(html.contains("&lt;b&gt;Acme&lt;/b&gt;"));
    assert!(!html.contains("9999999"));
}

#[tokio::test]
async fn records_page_text_filter() {
    let mut a = entry(1, "01/10/2025 10:00");
    a.brand = "Dell".into();
    let mut b = entry(2, "02/10/2025 10:00");
    b.brand = "Lenovo".into();
    let (_dir, _store, router) = app(vec![a, b]);

    let html = body_text(router.oneshot(get("/records?q=lenovo")).await.unwrap()).await;
    assert!(html.contains(r#"data-id="2""#));
    assert!(!html.contains(r#"data-id="1""#));
}

#[tokio::test]
async fn register_redirects_and_persists_client_metadata() {
    let (_dir, store, router) = app(vec![]);

    let body = "kind=entry&responsible=Fulano&asset_tag=1234567&started_at=01%2F10%2F2025+09%3A00\
                &reason=repair&hardware=notebook&note=with+charger";
    let resp = router.oneshot(post("/register", body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/records");

    let r = store.get(1).unwrap();
    assert_eq!(r.started_at, "01/10/2025 09:00");
    assert_eq!(r.source(), "web");
    assert_eq!(r.notes[0].text, "with charger");
}

#[tokio::test]
async fn invalid_registration_answers_400_page() {
    let (_dir, store, router) = app(vec![]);

    let body = "kind=entry&responsible=Fulano&asset_tag=12AB&reason=repair&hardware=notebook";
    let resp = router.oneshot(post("/register", body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Asset tag must contain only digits"));
    assert!(store.list().unwrap().is_empty());
}

#[tokio::test]
async fn actions_redirect_and_update_the_store() {
    let (_dir, store, router) = app(vec![loan(1, "01/10/2025 10:00"), entry(2, "01/10/2025 10:00")]);

    let resp = router
        .clone()
        .oneshot(post("/extend", "id=1&due_at=31%2F12%2F2025+18%3A00"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.get(1).unwrap().due_at(), Some("31/12/2025 18:00"));

    router.clone().oneshot(post("/return", "id=1")).await.unwrap();
    assert!(store.get(1).unwrap().returned);

    router.clone().oneshot(post("/stock", "id=2")).await.unwrap();
    assert!(store.get(2).unwrap().in_stock());

    router.clone().oneshot(post("/hide", "id=2")).await.unwrap();
    assert!(store.get(2).unwrap().hidden);
}

#[tokio::test]
async fn note_redirects_to_referer() {
    let (_dir, store, router) = app(vec![entry(1, "01/10/2025 10:00")]);

    let mut req = post("/notes", "id=1&text=called+the+vendor");
    req.headers_mut()
        .insert(header::REFERER, "/records?q=dell".parse().unwrap());
    let resp = router.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/records?q=dell");
    assert_eq!(store.get(1).unwrap().notes[0].text, "called the vendor");
}

#[tokio::test]
async fn unknown_id_is_404_and_bad_id_is_400() {
    let (_dir, _store, router) = app(vec![]);

    let resp = router.clone().oneshot(post("/return", "id=77")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = router.oneshot(post("/hide", "id=seven")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn returning_twice_is_rejected() {
    let (_dir, _store, router) = app(vec![loan(1, "01/10/2025 10:00")]);

    router.clone().oneshot(post("/return", "id=1")).await.unwrap();
    let resp = router.oneshot(post("/return", "id=1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_csv_download_with_filters() {
    let (_dir, _store, router) = app(vec![loan(1, "01/01/2020 10:00"), entry(2, "01/10/2025 10:00")]);

    let resp = router
        .oneshot(get("/export.csv?kind=loan&status=overdue"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=hardware_records.csv"
    );

    let csv = body_text(resp).await;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Overdue (01/01/2020 10:00)"));
}

#[tokio::test]
async fn health_reports_record_count() {
    let (_dir, _store, router) = app(vec![entry(1, ""), entry(2, "")]);

    let resp = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["records"], 2);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (_dir, _store, router) = app(vec![]);
    let resp = router.oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn note_ignores_foreign_referer() {
    let (_dir, store, router) = app(vec![entry(1, "01/10/2025 10:00")]);

    let mut req = post("/notes", "id=1&text=checked");
    req.headers_mut()
        .insert(header::REFERER, "https://evil.example/phish".parse().unwrap());
    let resp = router.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/records");
    assert_eq!(store.get(1).unwrap().notes.len(), 1);
}
