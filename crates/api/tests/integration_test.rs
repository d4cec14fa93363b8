//! Integration tests for the BurgerFy API

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use burgerfy_api::{create_router, seed::default_catalog, AppState, Storage};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

/// Router over a seeded in-memory store
async fn create_test_app() -> Router {
    let mut storage = Storage::memory();
    storage.seed_catalog(default_catalog()).await.unwrap();

    create_router(AppState::new(storage, false))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// `name=value` part of the session cookie
fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("No session cookie set")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

fn classic_burger() -> Value {
    json!({
        "name": "Classic",
        "ingredients": [
            { "id": 1, "name": "Brioche Bun", "category": "buns" },
            { "id": 5, "name": "Beef Patty", "category": "meats" },
            { "id": 9, "name": "Cheddar", "category": "cheese" }
        ]
    })
}

async fn register(app: &Router, email: &str) -> (StatusCode, String, Value) {
    let response = app
        .clone()
        .oneshot(post(
            "/api/register",
            json!({
                "fullName": "Sam Cook",
                "email": email,
                "password": "secret1",
                "age": 30
            }),
            None,
        ))
        .await
        .unwrap();

    let status = response.status();
    let cookie = if status == StatusCode::CREATED {
        session_cookie(&response)
    } else {
        String::new()
    };

    (status, cookie, json_body(response).await)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "burgerfy-api");
}

#[tokio::test]
async fn test_list_ingredients() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/api/ingredients", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let ingredients = json.as_array().unwrap();
    assert_eq!(ingredients.len(), 24);
    assert_eq!(ingredients[0]["id"], 1);
    assert_eq!(ingredients[0]["name"], "Brioche Bun");
    assert_eq!(ingredients[0]["category"], "buns");
}

#[tokio::test]
async fn test_ingredients_by_category() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/ingredients/category/cheese", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let cheeses = json.as_array().unwrap();
    assert_eq!(cheeses.len(), 4);
    assert!(cheeses.iter().all(|c| c["category"] == "cheese"));

    let response = app
        .oneshot(get("/api/ingredients/category/desserts", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_ingredient() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/ingredients/5", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Beef Patty");

    let response = app
        .oneshot(get("/api/ingredients/999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Ingredient not found");
}

#[tokio::test]
async fn test_create_and_get_burger() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post("/api/burgers", classic_burger(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    assert_eq!(created["name"], "Classic");
    assert_eq!(created["ingredients"].as_array().unwrap().len(), 3);
    assert!(created.get("userId").is_none());

    let id = created["id"].as_u64().unwrap();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/burgers/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);

    let response = app.oneshot(get("/api/burgers", None)).await.unwrap();
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_name_gets_placeholder() {
    let app = create_test_app().await;

    let mut burger = classic_burger();
    burger["name"] = json!("   ");

    let response = app
        .oneshot(post("/api/burgers", burger, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["name"], "My Custom Burger");
}

#[tokio::test]
async fn test_unknown_ingredient_rejected() {
    let app = create_test_app().await;

    let burger = json!({
        "name": "Mystery",
        "ingredients": [{ "id": 404, "name": "Unicorn", "category": "extras" }]
    });

    let response = app
        .clone()
        .oneshot(post("/api/burgers", burger, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Unknown ingredient: 404");

    let response = app.oneshot(get("/api/burgers", None)).await.unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_burger() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/burgers/42", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get("/api/burgers/42/receipt", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_burger_receipt() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post("/api/burgers", classic_burger(), None))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_u64().unwrap();

    let response = app
        .oneshot(get(&format!("/api/burgers/{}/receipt", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let receipt = json_body(response).await;
    assert_eq!(receipt["burger"]["name"], "Classic");
    assert_eq!(receipt["formattedPrice"], "$4.50");

    // Base bun, two fillings, cap bun; compact size scales everything
    let layers = receipt["plan"]["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 4);
    assert_eq!(layers[0]["role"], "base_bun");
    assert_eq!(layers[0]["height"], 15.0);
    assert_eq!(layers[1]["name"], "Beef Patty");
    assert_eq!(layers[3]["role"], "cap_bun");
    assert_eq!(layers[3]["height"], 18.0);

    assert_eq!(receipt["counts"].as_array().unwrap().len(), 3);

    let headings: Vec<_> = receipt["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["heading"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(headings, vec!["Buns", "Meats", "Cheese"]);
}

#[tokio::test]
async fn test_register_login_logout_flow() {
    let app = create_test_app().await;

    let (status, cookie, user) = register(&app, "Sam@Example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "sam@example.com");
    assert!(user.get("passwordHash").is_none());

    // Registration logs the user in
    let response = app
        .clone()
        .oneshot(get("/api/user", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["fullName"], "Sam Cook");

    let response = app
        .clone()
        .oneshot(post("/api/logout", json!({}), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/user", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Not authenticated");

    // Username is accepted in place of email
    let response = app
        .clone()
        .oneshot(post(
            "/api/login",
            json!({ "username": "sam@example.com", "password": "secret1" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(get("/api/user", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = create_test_app().await;
    register(&app, "sam@example.com").await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/login",
            json!({ "email": "sam@example.com", "password": "wrong-password" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Invalid credentials");

    let response = app
        .oneshot(post(
            "/api/login",
            json!({ "email": "nobody@example.com", "password": "secret1" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = create_test_app().await;

    let (status, _, _) = register(&app, "sam@example.com").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = register(&app, "SAM@example.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already in use");

    let response = app
        .oneshot(post(
            "/api/register",
            json!({ "fullName": "Short", "email": "short@example.com", "password": "123" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_burgers() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/my/burgers", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Unauthorized");

    let (_, cookie, user) = register(&app, "sam@example.com").await;

    // One burger saved while logged in, one anonymously
    let response = app
        .clone()
        .oneshot(post("/api/burgers", classic_burger(), Some(&cookie)))
        .await
        .unwrap();
    let owned = json_body(response).await;
    assert_eq!(owned["userId"], user["id"]);

    app.clone()
        .oneshot(post("/api/burgers", classic_burger(), None))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/my/burgers", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mine = json_body(response).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["id"], owned["id"]);
}
