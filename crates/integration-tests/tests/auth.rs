//! Login, logout and the admin gate.

use axum::http::StatusCode;

use shopkeep_integration_tests::{ADMIN_PASS, ADMIN_USER, TestApp};
use shopkeep_web::db::ShopRepository;
use shopkeep_web::models::ShopInput;

/// Every admin route reachable with GET.
const ADMIN_GETS: &[&str] = &[
    "/admin",
    "/admin/add",
    "/admin/edit/1",
    "/admin/delete/1",
    "/admin/shop/1/add_product",
    "/admin/product/edit/1",
    "/admin/product/delete/1",
];

/// Every admin route that accepts a form POST.
const ADMIN_POSTS: &[&str] = &[
    "/admin/add",
    "/admin/edit/1",
    "/admin/shop/1/add_product",
    "/admin/product/edit/1",
];

async fn seed_shop_with_product(app: &TestApp) {
    let shop = ShopRepository::new(&app.pool)
        .create(&ShopInput {
            name: "Acme".to_string(),
            ..ShopInput::default()
        })
        .await
        .expect("Failed to create shop");
    let response = app
        .post_form(
            &format!("/admin/shop/{}/add_product", shop.id),
            Some(&app.login().await),
            &[
                ("name", "Anvil"),
                ("sell_price", "10"),
                ("buy_price", "5"),
                ("nr_in_stock", "3"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_page_renders() {
    let app = TestApp::spawn().await;

    let response = app.get("/login", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"name="username""#));
    assert!(response.body.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_valid_login_authenticates_session() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/login",
            None,
            &[("username", ADMIN_USER), ("password", ADMIN_PASS)],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin"));
    let cookie = response.session_cookie().expect("session cookie");

    let admin = app.get("/admin", Some(&cookie)).await;
    assert_eq!(admin.status, StatusCode::OK);
    assert!(admin.body.contains("Manage shops"));
    assert!(admin.body.contains("Log out"));
}

#[tokio::test]
async fn test_invalid_login_stays_anonymous() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/login",
            None,
            &[("username", ADMIN_USER), ("password", "wrong")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid credentials"));

    let admin = app
        .get("/admin", response.session_cookie().as_deref())
        .await;
    assert_eq!(admin.status, StatusCode::SEE_OTHER);
    assert_eq!(admin.location(), Some("/login"));
}

#[tokio::test]
async fn test_login_with_missing_fields_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/login", None, &[("username", ADMIN_USER)])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid credentials"));
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_username_must_match_exactly() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/login",
            None,
            &[("username", "Admin"), ("password", ADMIN_PASS)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let admin = app.get("/admin", Some(&cookie)).await;
    assert_eq!(admin.status, StatusCode::SEE_OTHER);
    assert_eq!(admin.location(), Some("/login"));
}

#[tokio::test]
async fn test_logout_while_anonymous_redirects_home() {
    let app = TestApp::spawn().await;

    let response = app.get("/logout", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let tampered = format!("{cookie}x");

    let response = app.get("/admin", Some(&tampered)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_anonymous_admin_gets_redirect_to_login() {
    let app = TestApp::spawn().await;
    seed_shop_with_product(&app).await;

    for path in ADMIN_GETS {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "GET {path}");
        assert_eq!(response.location(), Some("/login"), "GET {path}");
    }

    assert_eq!(app.count("shop").await, 1);
    assert_eq!(app.count("product").await, 1);
}

#[tokio::test]
async fn test_anonymous_admin_posts_change_nothing() {
    let app = TestApp::spawn().await;
    seed_shop_with_product(&app).await;

    let fields = [
        ("name", "Changed"),
        ("sell_price", "1"),
        ("buy_price", "1"),
        ("nr_in_stock", "1"),
    ];
    for path in ADMIN_POSTS {
        let response = app.post_form(path, None, &fields).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "POST {path}");
        assert_eq!(response.location(), Some("/login"), "POST {path}");
    }

    assert_eq!(app.count("shop").await, 1);
    assert_eq!(app.count("product").await, 1);
    let shop = app.get("/shop/1", None).await;
    assert!(shop.body.contains("Acme"));
    assert!(shop.body.contains("Anvil"));
    assert!(!shop.body.contains("Changed"));
}

#[tokio::test]
async fn test_public_pages_hide_admin_links_when_anonymous() {
    let app = TestApp::spawn().await;
    seed_shop_with_product(&app).await;

    let response = app.get("/shop/1", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Admin login"));
    assert!(!response.body.contains("/admin/product/edit/"));
}
