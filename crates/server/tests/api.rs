//! End-to-end API tests.
//!
//! Each test builds the full router over an isolated in-memory database
//! and drives it with `tower::ServiceExt::oneshot`, exercising the same
//! code paths as a live server without binding a socket.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use shoplane_core::{Product, ProductRef, TenantId};
use shoplane_server::config::ServerConfig;
use shoplane_server::db::create_in_memory_pool;
use shoplane_server::db::tenants::TenantRepository;
use shoplane_server::models::screen::{ScreenConfig, ScreenField};
use shoplane_server::models::tenant::Tenant;
use shoplane_server::routes;
use shoplane_server::state::AppState;

const TENANT: &str = "demo-store";

fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from("kJ8mN2pQ9rS4tV6wX1yZ3aB5cD7eF0gH"),
        token_ttl_days: 30,
        catalog_cache_ttl_secs: 60,
    }
}

fn product(product_ref: &str, name: &str, description: &str, price: &str) -> Product {
    Product {
        product_ref: ProductRef::new(product_ref),
        name: name.to_owned(),
        description: description.to_owned(),
        price: price.parse().unwrap(),
        discount_price: None,
        image_url: None,
    }
}

fn demo_tenant() -> Tenant {
    let now = Utc::now();
    let mut screens = ScreenConfig::new();
    screens.insert(
        "signin".to_owned(),
        vec![
            ScreenField::Email {
                key: "email".to_owned(),
                label: "Email".to_owned(),
                required: true,
            },
            ScreenField::Password {
                key: "password".to_owned(),
                label: "Password".to_owned(),
                required: true,
            },
            ScreenField::Button {
                key: "submit".to_owned(),
                label: "Sign in".to_owned(),
                action: "login".to_owned(),
            },
        ],
    );

    Tenant {
        id: TenantId::new(TENANT),
        store_name: "Shoplane Demo".to_owned(),
        tagline: Some("Everything demo".to_owned()),
        currency_code: "USD".to_owned(),
        free_shipping_threshold: "50".parse().unwrap(),
        flat_shipping_fee: "4.95".parse().unwrap(),
        products: vec![
            product("mug-red", "Red Mug", "A bright red ceramic mug", "10"),
            product("lamp-desk", "Desk Lamp", "Warm LED desk lamp", "39"),
            product("mug-travel", "Travel Mug", "Insulated steel mug", "5"),
        ],
        screens,
        created_at: now,
        updated_at: now,
    }
}

async fn test_app() -> Router {
    let pool = create_in_memory_pool().await.unwrap();
    TenantRepository::new(&pool)
        .upsert(&demo_tenant())
        .await
        .unwrap();
    routes::app(AppState::new(&test_config(), pool))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json_auth(uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Register a fresh account and return its bearer token.
async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/api/users/register",
            &json!({
                "adminObjectId": TENANT,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": email,
                "password": "hunter2hunter2",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn health_endpoints() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ready");
}

#[tokio::test]
async fn register_login_and_check() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;
    assert!(!token.is_empty());

    // Duplicate registration conflicts
    let (status, body) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({
                "adminObjectId": TENANT,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "hunter2hunter2",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // Login with the right password succeeds
    let (status, body) = send(
        &app,
        post_json(
            "/api/users/login",
            &json!({
                "adminObjectId": TENANT,
                "email": "ada@example.com",
                "password": "hunter2hunter2",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    // Wrong password is a 401
    let (status, _) = send(
        &app,
        post_json(
            "/api/users/login",
            &json!({
                "adminObjectId": TENANT,
                "email": "ada@example.com",
                "password": "wrong-password",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Check endpoint reports existence
    let (status, body) = send(
        &app,
        post_json(
            "/api/users/check",
            &json!({"adminObjectId": TENANT, "email": "ada@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["exists"], true);

    let (_, body) = send(
        &app,
        post_json(
            "/api/users/check",
            &json!({"adminObjectId": TENANT, "email": "ghost@example.com"}),
        ),
    )
    .await;
    assert_eq!(body["data"]["exists"], false);
}

#[tokio::test]
async fn register_under_unknown_tenant_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({
                "adminObjectId": "no-such-store",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "hunter2hunter2",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown store");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/api/users/profile")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_auth("/api/users/cart", "not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_reflects_registration() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = send(&app, get_auth("/api/users/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["firstName"], "Ada");
}

#[tokio::test]
async fn catalog_and_search() {
    let app = test_app().await;

    let (status, body) = send(&app, get(&format!("/api/products/{TENANT}"))).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["productRef"], "mug-red");

    // Case-insensitive, order-preserving search
    let (status, body) =
        send(&app, get(&format!("/api/products/search/{TENANT}/MUG"))).await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["productRef"], "mug-red");
    assert_eq!(hits[1]["productRef"], "mug-travel");

    // Unknown tenant
    let (status, _) = send(&app, get("/api/products/no-such-store")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn screen_and_app_config() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        get(&format!(
            "/api/get-screen-config?adminObjectId={TENANT}&screen=signin"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fields = body["data"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["kind"], "email");

    let (status, _) = send(
        &app,
        get(&format!(
            "/api/get-screen-config?adminObjectId={TENANT}&screen=missing"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get(&format!("/api/app-config/{TENANT}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["storeName"], "Shoplane Demo");
    assert_eq!(body["data"]["currencyCode"], "USD");
    assert_eq!(body["data"]["userCount"], 0);
}

#[tokio::test]
async fn cart_mutations_and_subtotal() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    // Add twice, quantities merge
    let add = json!({
        "action": "add",
        "productRef": "mug-red",
        "name": "Red Mug",
        "price": "10",
        "quantity": 1,
    });
    send(&app, post_json_auth("/api/users/cart", &token, &add)).await;
    let (status, body) = send(&app, post_json_auth("/api/users/cart", &token, &add)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
    assert_eq!(body["data"]["subtotal"], "20");

    // Add without quantity defaults to 1
    let (_, body) = send(
        &app,
        post_json_auth(
            "/api/users/cart",
            &token,
            &json!({
                "action": "add",
                "productRef": "mug-travel",
                "name": "Travel Mug",
                "price": "5",
            }),
        ),
    )
    .await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["subtotal"], "25");

    // Update quantity
    let (_, body) = send(
        &app,
        post_json_auth(
            "/api/users/cart",
            &token,
            &json!({"action": "update", "productRef": "mug-red", "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(body["data"]["subtotal"], "15");

    // Updating a line that is not in the cart is a 404
    let (status, _) = send(
        &app,
        post_json_auth(
            "/api/users/cart",
            &token,
            &json!({"action": "update", "productRef": "ghost", "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Remove
    let (_, body) = send(
        &app,
        post_json_auth(
            "/api/users/cart",
            &token,
            &json!({"action": "remove", "productRef": "mug-travel"}),
        ),
    )
    .await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn wishlist_is_idempotent() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let add = json!({
        "action": "add",
        "productRef": "lamp-desk",
        "name": "Desk Lamp",
        "price": "39",
    });
    send(&app, post_json_auth("/api/users/wishlist", &token, &add)).await;
    let (status, body) =
        send(&app, post_json_auth("/api/users/wishlist", &token, &add)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        post_json_auth(
            "/api/users/wishlist",
            &token,
            &json!({"action": "remove", "productRef": "lamp-desk"}),
        ),
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn checkout_drains_cart_into_history() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    // Empty cart cannot check out
    let (status, body) = send(
        &app,
        post_json_auth("/api/users/orders", &token, &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");

    for (product_ref, price, quantity) in
        [("mug-red", "10", 2), ("mug-travel", "5", 1)]
    {
        send(
            &app,
            post_json_auth(
                "/api/users/cart",
                &token,
                &json!({
                    "action": "add",
                    "productRef": product_ref,
                    "name": product_ref,
                    "price": price,
                    "quantity": quantity,
                }),
            ),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        post_json_auth("/api/users/orders", &token, &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], "25");
    assert!(
        body["data"]["orderId"]
            .as_str()
            .unwrap()
            .starts_with("ORDER_")
    );

    // Cart is empty, history has both lines
    let (_, body) = send(&app, get_auth("/api/users/cart", &token)).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, get_auth("/api/users/orders", &token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // App config now reports one registered user
    let (_, body) = send(&app, get(&format!("/api/app-config/{TENANT}"))).await;
    assert_eq!(body["data"]["userCount"], 1);
}

#[tokio::test]
async fn accounts_are_scoped_per_tenant() {
    let pool = create_in_memory_pool().await.unwrap();
    let tenants = TenantRepository::new(&pool);
    tenants.upsert(&demo_tenant()).await.unwrap();

    let mut other = demo_tenant();
    other.id = TenantId::new("other-store");
    tenants.upsert(&other).await.unwrap();

    let app = routes::app(AppState::new(&test_config(), pool));
    register(&app, "ada@example.com").await;

    // The other tenant does not see the account
    let (_, body) = send(
        &app,
        post_json(
            "/api/users/check",
            &json!({"adminObjectId": "other-store", "email": "ada@example.com"}),
        ),
    )
    .await;
    assert_eq!(body["data"]["exists"], false);

    // Same email registers cleanly under a different tenant
    let (status, _) = send(
        &app,
        post_json(
            "/api/users/register",
            &json!({
                "adminObjectId": "other-store",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "hunter2hunter2",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Now both scopes see their own copy
    let (_, body) = send(
        &app,
        post_json(
            "/api/users/check",
            &json!({"adminObjectId": "other-store", "email": "ada@example.com"}),
        ),
    )
    .await;
    assert_eq!(body["data"]["exists"], true);
}
