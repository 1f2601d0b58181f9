//! Product management through the router.

use axum::http::StatusCode;

use shopkeep_core::ProductId;
use shopkeep_integration_tests::TestApp;
use shopkeep_web::db::{ProductRepository, ShopRepository};
use shopkeep_web::models::{ProductInput, ShopInput};

async fn shop_with_product(app: &TestApp) -> (i64, i64) {
    let shop = ShopRepository::new(&app.pool)
        .create(&ShopInput {
            name: "Acme".to_string(),
            ..ShopInput::default()
        })
        .await
        .expect("Failed to create shop");
    let product = ProductRepository::new(&app.pool)
        .create(
            shop.id,
            &ProductInput {
                name: "Anvil".to_string(),
                sell_price: 10.0,
                buy_price: 6.0,
                nr_in_stock: 4,
            },
        )
        .await
        .expect("Failed to create product");
    (shop.id.as_i64(), product.id.as_i64())
}

#[tokio::test]
async fn test_add_product_redirects_to_shop() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, _) = shop_with_product(&app).await;
    let path = format!("/admin/shop/{shop_id}/add_product");

    let form = app.get(&path, Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Acme"));

    let response = app
        .post_form(
            &path,
            Some(&cookie),
            &[
                ("name", "Hammer"),
                ("sell_price", "19.99"),
                ("buy_price", "8.5"),
                ("nr_in_stock", "12"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(format!("/shop/{shop_id}").as_str()));

    let page = app.get(&format!("/shop/{shop_id}"), None).await;
    assert!(page.body.contains("Hammer"));
    assert!(page.body.contains("19.99"));
    assert!(page.body.contains("8.50"));
}

#[tokio::test]
async fn test_add_product_to_missing_shop_persists_nothing() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let form = app.get("/admin/shop/77/add_product", Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::NOT_FOUND);

    let response = app
        .post_form(
            "/admin/shop/77/add_product",
            Some(&cookie),
            &[
                ("name", "Orphan"),
                ("sell_price", "1"),
                ("buy_price", "1"),
                ("nr_in_stock", "1"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.count("product").await, 0);
}

#[tokio::test]
async fn test_non_numeric_price_is_400() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, _) = shop_with_product(&app).await;

    let response = app
        .post_form(
            &format!("/admin/shop/{shop_id}/add_product"),
            Some(&cookie),
            &[
                ("name", "Bad"),
                ("sell_price", "ten"),
                ("buy_price", "1"),
                ("nr_in_stock", "1"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("sell_price must be a number"));
    assert!(response.body.contains(r#"value="ten""#));
    assert_eq!(app.count("product").await, 1);
}

#[tokio::test]
async fn test_fractional_stock_is_400() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, _) = shop_with_product(&app).await;

    let response = app
        .post_form(
            &format!("/admin/shop/{shop_id}/add_product"),
            Some(&cookie),
            &[
                ("name", "Half"),
                ("sell_price", "1"),
                ("buy_price", "1"),
                ("nr_in_stock", "2.5"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("nr_in_stock must be a whole number"));
    assert_eq!(app.count("product").await, 1);
}

#[tokio::test]
async fn test_missing_product_field_is_400() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, _) = shop_with_product(&app).await;

    let response = app
        .post_form(
            &format!("/admin/shop/{shop_id}/add_product"),
            Some(&cookie),
            &[("name", "Partial"), ("sell_price", "1")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("buy_price is required"));
    assert_eq!(app.count("product").await, 1);
}

#[tokio::test]
async fn test_edit_sell_price_keeps_other_fields() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, product_id) = shop_with_product(&app).await;
    let path = format!("/admin/product/edit/{product_id}");

    let form = app.get(&path, Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(r#"value="Anvil""#));
    assert!(form.body.contains(r#"value="10""#));

    let response = app
        .post_form(
            &path,
            Some(&cookie),
            &[
                ("name", "Anvil"),
                ("sell_price", "12.5"),
                ("buy_price", "6"),
                ("nr_in_stock", "4"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(format!("/shop/{shop_id}").as_str()));

    let product = ProductRepository::new(&app.pool)
        .get(ProductId::new(product_id))
        .await
        .expect("product still exists");
    assert!((product.sell_price - 12.5).abs() < f64::EPSILON);
    assert!((product.buy_price - 6.0).abs() < f64::EPSILON);
    assert_eq!(product.nr_in_stock, 4);
    assert_eq!(product.name, "Anvil");
    assert_eq!(product.shop_id.as_i64(), shop_id);

    let page = app.get(&format!("/shop/{shop_id}"), None).await;
    assert!(page.body.contains("12.50"));
}

#[tokio::test]
async fn test_invalid_edit_leaves_product_unchanged() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (_, product_id) = shop_with_product(&app).await;

    let response = app
        .post_form(
            &format!("/admin/product/edit/{product_id}"),
            Some(&cookie),
            &[
                ("name", "Renamed"),
                ("sell_price", "1"),
                ("buy_price", "oops"),
                ("nr_in_stock", "4"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let product = ProductRepository::new(&app.pool)
        .get(ProductId::new(product_id))
        .await
        .expect("product still exists");
    assert_eq!(product.name, "Anvil");
}

#[tokio::test]
async fn test_edit_missing_product_is_404() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/admin/product/edit/3",
            Some(&cookie),
            &[
                ("name", "Ghost"),
                ("sell_price", "1"),
                ("buy_price", "1"),
                ("nr_in_stock", "1"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_product_id_is_404() {
    let app = TestApp::spawn().await;
    shop_with_product(&app).await;
    let cookie = app.login().await;

    for path in ["/admin/product/edit/abc", "/admin/product/delete/1e3"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }
    assert_eq!(app.count("product").await, 1);
}

#[tokio::test]
async fn test_delete_product_redirects_to_its_shop() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;
    let (shop_id, product_id) = shop_with_product(&app).await;

    let response = app
        .get(&format!("/admin/product/delete/{product_id}"), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(format!("/shop/{shop_id}").as_str()));
    assert_eq!(app.count("product").await, 0);

    let again = app
        .get(&format!("/admin/product/delete/{product_id}"), Some(&cookie))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
