use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use meal_groups::draw::run_draw;
use meal_groups::export::to_csv_string;
use meal_groups::seed::{ResolvedSeed, SeedSource};
use meal_groups::web::{configure, AppState, DrawResponse};
use serde_json::json;

const MESSAGE: &str = "TODO:\n- Ana\n- Bea\n- Carl\n- Dani\n\n- Cena 9\n- Eva\n- Comida 10\n- Eva\n";

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(8)))
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), Key::generate()))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_index_page() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Meal Groups Draw"));
}

#[actix_web::test]
async fn test_draw_then_export_csv() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/draw")
        .set_json(json!({ "text": MESSAGE, "seed": "42", "max_attempts": 500 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "id")
        .expect("session cookie")
        .into_owned();
    let body: DrawResponse = test::read_body_json(resp).await;

    assert!(body.success);
    assert_eq!(body.summary.seed, 42);
    assert_eq!(body.summary.seed_source, SeedSource::Manual);
    assert_eq!(body.summary.people.len(), 5);
    assert!(body.report.contains("Seed: 42 (manual)"));

    let req = test::TestRequest::get()
        .uri("/api/draw/last.csv")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let csv = test::read_body(resp).await;

    let expected = run_draw(MESSAGE, ResolvedSeed::manual(42), 500).unwrap();
    assert_eq!(String::from_utf8_lossy(&csv), to_csv_string(&expected).unwrap());

    let req = test::TestRequest::get()
        .uri("/api/draw/last.txt")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&text).contains("ASSIGNMENTS:"));
}

#[actix_web::test]
async fn test_export_without_draw() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/draw/last.csv").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_draw_rejects_bad_input() {
    let app = test_app!();

    let cases = [
        json!({ "text": "   " }),
        json!({ "text": "hello there\n" }),
        json!({ "text": MESSAGE, "max_attempts": 10 }),
    ];
    for case in cases {
        let req = test::TestRequest::post().uri("/api/draw").set_json(&case).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case {}", case);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn test_automatic_seed_is_reported() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/draw")
        .set_json(json!({ "text": MESSAGE }))
        .to_request();
    let body: DrawResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.summary.seed_source, SeedSource::Automatic);
    assert!(body.summary.seed < 1_000_000);
    assert!(body.report.contains("automatic"));
}
