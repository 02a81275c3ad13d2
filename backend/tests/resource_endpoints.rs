//! Endpoint behaviour over the in-memory document store.
//!
//! Requests run through the full handler stack (trace middleware, bearer
//! extraction, services, store) with tokens resolved by
//! [`StaticIdentityVerifier`].

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use plateshare::Trace;
use plateshare::domain::ports::{DocumentStore, FindOptions};
use plateshare::domain::{
    Collection, Document, FoodListingService, FoodRequestService, QueryFilter, TRACE_ID_HEADER,
    UserDirectoryService,
};
use plateshare::inbound::http;
use plateshare::inbound::http::health::root;
use plateshare::inbound::http::state::HttpState;
use plateshare::outbound::memory::InMemoryDocumentStore;
use plateshare::test_support::StaticIdentityVerifier;

const ANN: &str = "ann@x.com";
const BOB: &str = "bob@x.com";

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[fixture]
fn store() -> Arc<InMemoryDocumentStore> {
    InMemoryDocumentStore::new_shared()
}

fn verifier() -> StaticIdentityVerifier {
    StaticIdentityVerifier::new()
        .with_token("t-ann", ANN)
        .with_token("t-bob", BOB)
}

fn test_app(
    store: Arc<InMemoryDocumentStore>,
    verifier: StaticIdentityVerifier,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(verifier),
        Arc::new(UserDirectoryService::new(store.clone())),
        Arc::new(FoodListingService::new(store.clone())),
        Arc::new(FoodRequestService::new(store)),
    );
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(http::configure)
        .service(root)
}

async fn seed(store: &InMemoryDocumentStore, collection: Collection, body: Value) -> String {
    store
        .insert(collection, object(body))
        .await
        .expect("seed insert")
        .to_string()
}

async fn stored(store: &InMemoryDocumentStore, collection: Collection) -> Vec<Value> {
    store
        .find(collection, &QueryFilter::default(), FindOptions::default())
        .await
        .expect("find")
        .iter()
        .map(|doc| serde_json::to_value(doc).expect("serialise"))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn root_reports_server_running(store: Arc<InMemoryDocumentStore>) {
    let app = actix_test::init_service(test_app(store, verifier())).await;
    let request = actix_test::TestRequest::get().uri("/").to_request();
    let body = actix_test::call_and_read_body(&app, request).await;
    assert_eq!(body, "Server is running");
}

#[rstest]
#[actix_web::test]
async fn featured_foods_returns_six_largest_available(store: Arc<InMemoryDocumentStore>) {
    for (quantity, status) in [
        (5, "Available"),
        (9, "Available"),
        (9, "Available"),
        (1, "Available"),
        (7, "Reserved"),
        (3, "Available"),
        (2, "Available"),
        (8, "Delivered"),
        (4, "Available"),
    ] {
        seed(
            &store,
            Collection::FoodListings,
            json!({ "food_quantity": quantity, "food_status": status }),
        )
        .await;
    }
    let app = actix_test::init_service(test_app(store, verifier())).await;

    let request = actix_test::TestRequest::get()
        .uri("/featured-foods")
        .to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
    let quantities: Vec<i64> = body
        .iter()
        .map(|doc| doc["food_quantity"].as_i64().expect("quantity"))
        .collect();
    assert_eq!(quantities, vec![9, 9, 5, 4, 3, 2]);
    assert!(body.iter().all(|doc| doc["food_status"] == json!("Available")));
}

#[rstest]
#[actix_web::test]
async fn foods_filters_combine_with_and(store: Arc<InMemoryDocumentStore>) {
    for (user_id, donor, status) in [
        ("u1", ANN, "Available"),
        ("u1", ANN, "Delivered"),
        ("u2", BOB, "Available"),
    ] {
        let listing = json!({ "user_id": user_id, "donator_email": donor, "food_status": status });
        seed(&store, Collection::FoodListings, listing).await;
    }
    let app = actix_test::init_service(test_app(store, verifier())).await;

    let cases = [
        ("", 3),
        ("?status=Available", 2),
        ("?id=u1&status=Available", 1),
        ("?user_id=u2", 1),
        ("?donator_email=", 3),
        ("?unknown=x", 3),
    ];
    for (query, expected) in cases {
        let request = actix_test::TestRequest::get()
            .uri(&format!("/foods{query}"))
            .to_request();
        let body: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.len(), expected, "query {query:?}");
    }
}

#[rstest]
#[actix_web::test]
async fn requested_foods_enforces_email_ownership(store: Arc<InMemoryDocumentStore>) {
    seed(&store, Collection::FoodRequests, json!({ "user_email": ANN, "food_id": "f1" })).await;
    seed(&store, Collection::FoodRequests, json!({ "user_email": BOB, "food_id": "f1" })).await;
    let app = actix_test::init_service(test_app(store, verifier())).await;

    let unfiltered = actix_test::TestRequest::get()
        .uri("/requested-foods")
        .insert_header(bearer("t-ann"))
        .to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, unfiltered).await;
    assert_eq!(body.len(), 2);

    let own = actix_test::TestRequest::get()
        .uri("/requested-foods?email=ann@x.com")
        .insert_header(bearer("t-ann"))
        .to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, own).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["user_email"], json!(ANN));

    let by_food = actix_test::TestRequest::get()
        .uri("/requested-foods?food_id=f1")
        .insert_header(bearer("t-bob"))
        .to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, by_food).await;
    assert_eq!(body.len(), 2);

    let foreign = actix_test::TestRequest::get()
        .uri("/requested-foods?email=bob@x.com")
        .insert_header(bearer("t-ann"))
        .to_request();
    let response = actix_test::call_service(&app, foreign).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("forbidden"));
    assert_eq!(body["message"], json!("forbidden access"));
}

#[rstest]
#[actix_web::test]
async fn request_for_another_user_is_not_inserted(store: Arc<InMemoryDocumentStore>) {
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;

    let request = actix_test::TestRequest::post()
        .uri("/requested-food")
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "user_email": BOB, "food_id": "f1" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.len(Collection::FoodRequests).await, 0);

    let request = actix_test::TestRequest::post()
        .uri("/requested-food")
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "user_email": ANN, "food_id": "f1", "status": "pending" }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["acknowledged"], json!(true));
    assert_eq!(store.len(Collection::FoodRequests).await, 1);
}

#[rstest]
#[actix_web::test]
async fn status_patch_on_unknown_request_is_not_found(store: Arc<InMemoryDocumentStore>) {
    let request = json!({ "user_email": ANN, "status": "pending" });
    let existing = seed(&store, Collection::FoodRequests, request).await;
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;

    let request = actix_test::TestRequest::patch()
        .uri("/requested-food/3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Request not found"));
    assert_eq!(
        stored(&store, Collection::FoodRequests).await,
        vec![json!({ "_id": existing, "user_email": ANN, "status": "pending" })]
    );
}

#[rstest]
#[actix_web::test]
async fn status_patch_sets_only_status(store: Arc<InMemoryDocumentStore>) {
    let request = json!({ "user_email": ANN, "status": "pending" });
    let id = seed(&store, Collection::FoodRequests, request).await;
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/requested-food/{id}"))
        .insert_header(bearer("t-bob"))
        .set_json(json!({ "status": "accepted", "user_email": BOB }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        body,
        json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 })
    );
    assert_eq!(
        stored(&store, Collection::FoodRequests).await,
        vec![json!({ "_id": id, "user_email": ANN, "status": "accepted" })]
    );

    let missing = actix_test::TestRequest::patch()
        .uri(&format!("/requested-food/{id}"))
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "note": "no status" }))
        .to_request();
    let response = actix_test::call_service(&app, missing).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn food_updates_follow_narrow_or_full_rule(store: Arc<InMemoryDocumentStore>) {
    let listing = json!({ "food_name": "Rice", "food_status": "Available" });
    let id = seed(&store, Collection::FoodListings, listing).await;
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;
    let patch = |payload: Value| {
        actix_test::TestRequest::patch()
            .uri(&format!("/food/{id}"))
            .insert_header(bearer("t-ann"))
            .set_json(payload)
            .to_request()
    };

    let body: Value =
        actix_test::call_and_read_body_json(&app, patch(json!({ "status": "Delivered" }))).await;
    assert_eq!(body["modifiedCount"], json!(1));
    assert_eq!(
        stored(&store, Collection::FoodListings).await,
        vec![json!({ "_id": id, "food_name": "Rice", "food_status": "Delivered" })]
    );

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        patch(json!({ "status": "Reserved", "food_name": "Dal" })),
    )
    .await;
    assert_eq!(body["modifiedCount"], json!(1));
    assert_eq!(
        stored(&store, Collection::FoodListings).await,
        vec![json!({
            "_id": id,
            "food_name": "Dal",
            "food_status": "Delivered",
            "status": "Reserved",
        })]
    );

    let body: Value = actix_test::call_and_read_body_json(&app, patch(json!({}))).await;
    assert_eq!(
        body,
        json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 0 })
    );
}

#[rstest]
#[actix_web::test]
async fn food_lookup_and_delete(store: Arc<InMemoryDocumentStore>) {
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;

    let create = actix_test::TestRequest::post()
        .uri("/food")
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "_id": "client-chosen", "food_name": "Bread", "donator_email": ANN }))
        .to_request();
    let created: Value = actix_test::call_and_read_body_json(&app, create).await;
    let id = created["insertedId"].as_str().expect("inserted id").to_owned();
    assert_ne!(id, "client-chosen");

    let get = |token: &str| {
        actix_test::TestRequest::get()
            .uri(&format!("/food/{id}"))
            .insert_header(bearer(token))
            .to_request()
    };
    let body: Value = actix_test::call_and_read_body_json(&app, get("t-bob")).await;
    assert_eq!(body, json!({ "_id": id, "food_name": "Bread", "donator_email": ANN }));

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/food/{id}"))
        .insert_header(bearer("t-ann"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, delete).await;
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));

    let response = actix_test::call_service(&app, get("t-ann")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn any_signed_in_caller_may_mutate_any_listing(store: Arc<InMemoryDocumentStore>) {
    let listing = json!({ "food_name": "Soup", "donator_email": ANN, "food_status": "Available" });
    let id = seed(&store, Collection::FoodListings, listing).await;
    let app = actix_test::init_service(test_app(store.clone(), verifier())).await;

    let patch = actix_test::TestRequest::patch()
        .uri(&format!("/food/{id}"))
        .insert_header(bearer("t-bob"))
        .set_json(json!({ "_id": id, "status": "Requested" }))
        .to_request();
    let response = actix_test::call_service(&app, patch).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["modifiedCount"], json!(1));
    assert_eq!(
        stored(&store, Collection::FoodListings).await,
        vec![json!({
            "_id": id,
            "food_name": "Soup",
            "donator_email": ANN,
            "food_status": "Available",
            "status": "Requested",
        })]
    );

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/food/{id}"))
        .insert_header(bearer("t-bob"))
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));
    assert!(stored(&store, Collection::FoodListings).await.is_empty());
}

#[rstest]
#[case("/food/not-a-uuid", Some("t-ann"), StatusCode::BAD_REQUEST)]
#[case("/food/3fa85f64-5717-4562-b3fc-2c963f66afa6", None, StatusCode::UNAUTHORIZED)]
#[case("/food/3fa85f64-5717-4562-b3fc-2c963f66afa6", Some("t-nobody"), StatusCode::UNAUTHORIZED)]
#[case("/users", None, StatusCode::UNAUTHORIZED)]
#[case("/user/not-a-uuid", None, StatusCode::BAD_REQUEST)]
#[case("/user/email/nobody@x.com", None, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn rejected_requests_map_to_status(
    store: Arc<InMemoryDocumentStore>,
    #[case] uri: &str,
    #[case] token: Option<&str>,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(store, verifier())).await;
    let mut request = actix_test::TestRequest::get().uri(uri);
    if let Some(token) = token {
        request = request.insert_header(bearer(token));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn provider_outage_is_internal_error(store: Arc<InMemoryDocumentStore>) {
    let app = actix_test::init_service(test_app(
        store,
        verifier().with_outage("connection refused"),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer("t-ann"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("internal_error"));
}

#[rstest]
#[actix_web::test]
async fn users_round_trip(store: Arc<InMemoryDocumentStore>) {
    let app = actix_test::init_service(test_app(store, verifier())).await;

    let create = actix_test::TestRequest::post()
        .uri("/user")
        .insert_header(bearer("t-ann"))
        .set_json(json!({ "email": ANN, "name": "Ann", "image": "https://img.test/ann.png" }))
        .to_request();
    let created: Value = actix_test::call_and_read_body_json(&app, create).await;
    let id = created["insertedId"].as_str().expect("inserted id").to_owned();

    let by_email = actix_test::TestRequest::get()
        .uri("/user/email/ann@x.com")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, by_email).await;
    assert_eq!(body["_id"], json!(id));
    assert_eq!(body["name"], json!("Ann"));

    let by_id = actix_test::TestRequest::get()
        .uri(&format!("/user/{id}"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, by_id).await;
    assert_eq!(body["email"], json!(ANN));

    let all = actix_test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer("t-bob"))
        .to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, all).await;
    assert_eq!(body.len(), 1);
}
