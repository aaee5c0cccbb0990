mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["storage"]["status"], "ok");
}

#[actix_rt::test]
#[serial]
async fn test_master_catalog_served_on_first_read() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/catalog/tours").to_request();
    let tours: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tours.len(), 17);
    assert_eq!(tours[0]["id"], "th-bkk-1");

    let req = test::TestRequest::get().uri("/api/catalog/transfers").to_request();
    let transfers: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(transfers.len(), 7);

    let req = test::TestRequest::get().uri("/api/catalog/templates").to_request();
    let templates: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(templates.len(), 2);
}

#[actix_rt::test]
#[serial]
async fn test_tour_create_edit_delete() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/catalog/tours")
        .set_json(json!({
            "name": "Ha Long Bay Day Cruise",
            "city": "Ha Long",
            "country": "Vietnam",
            "adult_price_inr": "4200",
            "child_price_inr": 3100,
            "sharing_transfer_price_inr": 900,
            "private_transfer_price_inr": 5200,
            "category": "Cruise",
            "duration": "Full Day",
            "description": "Limestone karsts by boat."
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("cms-"));
    assert_eq!(created["adult_price_inr"], 4200.0);

    let mut edited = created.clone();
    edited["adult_price_inr"] = json!(4500);
    let req = test::TestRequest::post()
        .uri("/api/catalog/tours")
        .set_json(&edited)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/catalog/tours").to_request();
    let tours: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tours.len(), 18);
    assert_eq!(tours[0]["id"], id.as_str());
    assert_eq!(tours[0]["adult_price_inr"], 4500.0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/catalog/tours/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/catalog/tours").to_request();
    let tours: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tours.len(), 17);
}

#[actix_rt::test]
#[serial]
async fn test_tour_without_name_rejected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/catalog/tours")
        .set_json(json!({
            "name": " ",
            "city": "Bangkok",
            "country": "Thailand",
            "category": "City Tour"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[actix_rt::test]
#[serial]
async fn test_malformed_json_is_bad_request() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/catalog/transfers")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"route\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
#[serial]
async fn test_countries_and_destinations() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/catalog/countries")
        .set_json(json!({"name": "Bali"}))
        .to_request();
    let countries: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(countries, vec!["Thailand", "UAE", "India Goa", "Vietnam", "Bali"]);

    let req = test::TestRequest::delete()
        .uri("/api/catalog/countries/Vietnam")
        .to_request();
    let countries: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(!countries.contains(&"Vietnam".to_string()));

    let req = test::TestRequest::get()
        .uri("/api/catalog/destinations")
        .to_request();
    let destinations: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        destinations["countries"],
        json!(["Bali", "India Goa", "Thailand", "UAE"])
    );
    assert_eq!(
        destinations["cities_by_country"]["Thailand"],
        json!(["Bangkok", "Pattaya", "Phuket", "Krabi"])
    );
    assert_eq!(destinations["cities_by_country"]["UAE"], json!(["Dubai"]));
}
