mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use serial_test::serial;

use common::TestApp;

fn bangkok_pattaya_quotation() -> Value {
    json!({
        "reference_no": "THA-20250314-AB12",
        "client_name": "Sharma Family",
        "country": "Thailand",
        "city_stays": [
            {"city": "Bangkok", "nights": 2, "hotel_name": "Amari Watergate", "hotel_cost_inr": 14500},
            {"city": "Pattaya", "nights": 2, "hotel_name": "Cape Dara Resort", "hotel_cost_inr": 16000}
        ],
        "travel_start_date": "2025-03-14",
        "number_of_days": 5,
        "adults": 2,
        "children": 1,
        "hotel_name": "",
        "hotel_cost_inr": 0,
        "selected_tour_ids": [],
        "selected_transfer_ids": [],
        "itinerary": [],
        "margin_percent": 10
    })
}

#[actix_rt::test]
#[serial]
async fn test_new_quotation_uses_defaults() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/new")
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;

    assert!(quotation["reference_no"].as_str().unwrap().starts_with("THA-"));
    assert_eq!(quotation["city_stays"][0]["city"], "Bangkok");
    assert_eq!(quotation["number_of_days"], 5);
    assert_eq!(quotation["margin_percent"], 12.0);

    let itinerary = quotation["itinerary"].as_array().unwrap();
    assert_eq!(itinerary.len(), 5);
    assert_eq!(itinerary[0]["title"], "Arrival");
    assert_eq!(itinerary[4]["title"], "Departure");
}

#[actix_rt::test]
#[serial]
async fn test_new_quotation_for_country() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/new")
        .set_json(json!({"country": "UAE"}))
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;

    assert!(quotation["reference_no"].as_str().unwrap().starts_with("UAE-"));
    assert_eq!(quotation["city_stays"][0]["city"], "Dubai");
}

#[actix_rt::test]
#[serial]
async fn test_apply_template_prices_the_package() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/new")
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/edit")
        .set_json(json!({
            "quotation": quotation,
            "edit": {"type": "apply_template", "template_id": "tmpl-dxb-5d"}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["quotation"]["country"], "UAE");
    assert_eq!(body["quotation"]["itinerary"].as_array().unwrap().len(), 5);

    // t1 4500 + t2 3200 + t3 5200 + DXB transfer 2350, hotel 15500, 12% margin
    let summary = &body["summary"];
    assert_eq!(summary["tour_cost_inr"], 15250);
    assert_eq!(summary["hotel_cost_inr"], 15500);
    assert_eq!(summary["subtotal_inr"], 30750);
    assert_eq!(summary["margin_amount_inr"], 3690);
    assert_eq!(summary["final_total_inr"], 34440);
    assert_eq!(summary["per_person_inr"], 17220);
}

#[actix_rt::test]
#[serial]
async fn test_edit_on_missing_day_is_bad_request() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut quotation = bangkok_pattaya_quotation();
    quotation["itinerary"] = json!([]);
    quotation["number_of_days"] = json!(0);

    let req = test::TestRequest::post()
        .uri("/api/quotations/edit")
        .set_json(json!({
            "quotation": quotation,
            "edit": {"type": "toggle_meal", "day_number": 9, "meal": "dinner"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
#[serial]
async fn test_breakdown_honours_private_assignment() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut quotation = bangkok_pattaya_quotation();
    quotation["selected_tour_ids"] = json!(["th-bkk-1", "deleted-tour"]);
    quotation["itinerary"] = json!([{
        "day_number": 2,
        "title": "Temples",
        "description": "",
        "assigned_tours": [{"tour_id": "th-bkk-1", "transfer_type": "Private"}],
        "meals": {"breakfast": true, "lunch": false, "dinner": false},
        "overnight_city": "Bangkok",
        "inclusions": [],
        "exclusions": []
    }]);

    let req = test::TestRequest::post()
        .uri("/api/quotations/breakdown")
        .set_json(&quotation)
        .to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;

    // Grand Palace: 2850 x 2 + 2100 x 1 entrance, 3500 private vehicle
    assert_eq!(summary["breakdown"]["tour_cost_inr"], 11300.0);
    assert_eq!(summary["breakdown"]["hotel_cost_inr"], 30500.0);
    assert_eq!(summary["breakdown"]["subtotal_inr"], 41800.0);
    assert_eq!(summary["breakdown"]["margin_amount_inr"], 4180.0);
    assert_eq!(summary["final_total_inr"], 45980);
    assert_eq!(summary["per_person_inr"], 15327);
}

#[actix_rt::test]
#[serial]
async fn test_itinerary_generation_endpoint() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/itinerary")
        .set_json(bangkok_pattaya_quotation())
        .to_request();
    let days: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<&str> = days.iter().map(|d| d["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "Arrival",
            "Leisure & Exploration",
            "Transfer: Bangkok to Pattaya",
            "Leisure & Exploration",
            "Departure"
        ]
    );
    let cities: Vec<&str> = days
        .iter()
        .map(|d| d["overnight_city"].as_str().unwrap())
        .collect();
    assert_eq!(cities, vec!["Bangkok", "Bangkok", "Pattaya", "Pattaya", "Pattaya"]);
}

#[actix_rt::test]
#[serial]
async fn test_itinerary_endpoint_treats_zero_nights_as_one() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut quotation = bangkok_pattaya_quotation();
    quotation["city_stays"][0]["nights"] = json!(0);

    let req = test::TestRequest::post()
        .uri("/api/quotations/itinerary")
        .set_json(&quotation)
        .to_request();
    let days: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    let cities: Vec<&str> = days
        .iter()
        .map(|d| d["overnight_city"].as_str().unwrap())
        .collect();
    assert_eq!(cities, vec!["Bangkok", "Pattaya", "Pattaya", "Pattaya"]);
    assert_eq!(days[1]["title"], "Transfer: Bangkok to Pattaya");
}

#[actix_rt::test]
#[serial]
async fn test_inventory_pool_for_city() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/inventory")
        .set_json(json!({"quotation": bangkok_pattaya_quotation(), "city": "Pattaya"}))
        .to_request();
    let pool: Value = test::call_and_read_body_json(&app, req).await;

    let tours = pool["tours"].as_array().unwrap();
    assert_eq!(tours.len(), 4);
    assert!(tours.iter().all(|t| t["city"] == "Pattaya"));
    assert_eq!(pool["transfers"].as_array().unwrap().len(), 6);

    let req = test::TestRequest::post()
        .uri("/api/quotations/inventory")
        .set_json(json!({"quotation": bangkok_pattaya_quotation(), "search": "island"}))
        .to_request();
    let pool: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pool["tours"].as_array().unwrap().len(), 5);
}

#[actix_rt::test]
#[serial]
async fn test_saved_quotation_lifecycle() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations/saved")
        .set_json(bangkok_pattaya_quotation())
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    // hotels 30500 plus 10% margin
    assert_eq!(saved["total_inr"], 33550.0);
    assert!(saved["saved_at"].as_str().unwrap().ends_with('Z'));

    let req = test::TestRequest::get().uri("/api/quotations/saved").to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["reference_no"], "THA-20250314-AB12");

    let req = test::TestRequest::get()
        .uri("/api/quotations/saved/THA-20250314-AB12")
        .to_request();
    let loaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["client_name"], "Sharma Family");
    assert!(loaded.get("saved_at").is_none());
    assert!(loaded.get("total_inr").is_none());

    let req = test::TestRequest::delete()
        .uri("/api/quotations/saved/THA-20250314-AB12")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/quotations/saved/THA-20250314-AB12")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
