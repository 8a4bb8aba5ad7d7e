//! HTTP-level tests against the in-memory store.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use software_order_service::configure;
use software_order_service::domain::catalog::SoftwareCatalog;
use software_order_service::domain::purchased_software::{PurchaseState, PurchasedSoftware};
use software_order_service::handlers::AppState;
use software_order_service::infrastructure::MemoryStore;

fn state(store: &MemoryStore) -> web::Data<AppState<MemoryStore>> {
    web::Data::new(AppState::new(
        store.clone(),
        SoftwareCatalog::standard(),
        Duration::days(365),
    ))
}

fn seeded() -> (MemoryStore, i64, i64) {
    let store = MemoryStore::new();
    let customer_id = store.insert_customer("Contoso");
    let account_id = store.insert_account(customer_id, "Contoso EMEA");
    (store, customer_id, account_id)
}

fn active_purchase(store: &MemoryStore, account_id: i64, name: &str) -> i64 {
    let valid_to = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    store.insert_purchase(PurchasedSoftware::new(account_id, name, 3, valid_to).unwrap())
}

#[actix_web::test]
async fn software_catalog_is_listed() {
    let store = MemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::get().uri("/software").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), SoftwareCatalog::standard().offerings().len());
    assert!(body.iter().any(|o| o["name"] == "Microsoft Office 365"));
    assert!(store.reads().is_empty());
    assert_eq!(store.commits(), 0);
}

#[actix_web::test]
async fn customer_is_returned_with_accounts() {
    let (store, customer_id, account_id) = seeded();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{customer_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["name"], "Contoso");
    assert_eq!(body["accounts"][0]["id"], account_id);
}

#[actix_web::test]
async fn unknown_customer_is_404() {
    let store = MemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::get().uri("/customers/77").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Customer with id 77 not found.");
}

#[actix_web::test]
async fn ordering_twice_is_a_conflict() {
    let (store, _, account_id) = seeded();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;
    let order = json!({ "service_name": "Zoom", "quantity": 2 });

    let req = test::TestRequest::post()
        .uri(&format!("/accounts/{account_id}/orders"))
        .set_json(&order)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&format!("/accounts/{account_id}/orders"))
        .set_json(&order)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        format!("Account with id {account_id} already purchased license for Zoom")
    );

    let req = test::TestRequest::get()
        .uri(&format!("/accounts/{account_id}"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;
    let purchases = account["purchased_softwares"].as_array().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["name"], "Zoom");
    assert_eq!(purchases[0]["quantity"], 2);
    assert_eq!(purchases[0]["state"], "Active");
}

#[actix_web::test]
async fn ordering_for_unknown_account_is_bad_request() {
    let store = MemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/accounts/99/orders")
        .set_json(json!({ "service_name": "Zoom", "quantity": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Account with id 99 not found.");
    assert_eq!(store.commits(), 0);
}

#[actix_web::test]
async fn quantity_changes_are_validated() {
    let (store, _, account_id) = seeded();
    let id = active_purchase(&store, account_id, "Slack");
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/purchased-softwares/{id}/quantity"))
        .set_json(json!({ "quantity": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/purchased-softwares/{id}/quantity"))
        .set_json(json!({ "quantity": 5 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["quantity"], 5);
    assert_eq!(store.purchase(id).unwrap().quantity, 5);
}

#[actix_web::test]
async fn cancelled_purchase_cannot_be_changed() {
    let (store, _, account_id) = seeded();
    let id = active_purchase(&store, account_id, "Slack");
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/purchased-softwares/{id}/cancel"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["state"], "Cancelled");
    }
    assert_eq!(store.purchase(id).unwrap().state, PurchaseState::Cancelled);

    let req = test::TestRequest::put()
        .uri(&format!("/purchased-softwares/{id}/valid-to"))
        .set_json(json!({ "valid_to": "2031-01-01T00:00:00Z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn expiry_date_is_replaced() {
    let (store, _, account_id) = seeded();
    let id = active_purchase(&store, account_id, "Jira Software");
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/purchased-softwares/{id}/valid-to"))
        .set_json(json!({ "valid_to": "2031-06-30T00:00:00Z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        store.purchase(id).unwrap().valid_to,
        Utc.with_ymd_and_hms(2031, 6, 30, 0, 0, 0).unwrap()
    );
}

#[actix_web::test]
async fn mutating_unknown_purchase_is_404() {
    let store = MemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .configure(configure::<MemoryStore>),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/purchased-softwares/12/cancel")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PurchasedSoftware with id 12 not found.");
}
