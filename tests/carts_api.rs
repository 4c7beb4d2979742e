mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn empty_cart_when_none_is_open() {
    let app = app().await;
    let alice = logged_in(&app, "alice", "Customer").await;

    let res = get(&app, "/ezelectronics/carts", Some(&alice)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"customer": "alice", "paid": false, "paymentDate": null, "total": 0.0, "products": []}));
}

#[tokio::test]
async fn cart_routes_are_for_customers() {
    let app = app().await;
    let manager = logged_in(&app, "mark", "Manager").await;

    let res = get(&app, "/ezelectronics/carts", Some(&manager)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "User is not a customer");
    assert_eq!(post(&app, "/ezelectronics/carts", None, json!({"model": "x"})).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adding_and_removing_products() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "iPhone13", "Smartphone", 5, 200.0).await;
    register_product(&app, &admin, "XPS13", "Laptop", 1, 1000.0).await;

    assert_eq!(post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await.status, StatusCode::OK);
    assert_eq!(post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await.status, StatusCode::OK);
    assert_eq!(post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "XPS13"})).await.status, StatusCode::OK);
    assert_eq!(post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "Nope"})).await.status, StatusCode::NOT_FOUND);
    assert_eq!(post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": ""})).await.status, StatusCode::UNPROCESSABLE_ENTITY);

    let res = get(&app, "/ezelectronics/carts", Some(&alice)).await;
    assert_eq!(res.body["total"], 1400.0);
    assert_eq!(res.body["products"], json!([
        {"model": "iPhone13", "quantity": 2, "category": "Smartphone", "price": 200.0},
        {"model": "XPS13", "quantity": 1, "category": "Laptop", "price": 1000.0},
    ]));

    assert_eq!(delete(&app, "/ezelectronics/carts/products/iPhone13", Some(&alice)).await.status, StatusCode::OK);
    assert_eq!(delete(&app, "/ezelectronics/carts/products/XPS13", Some(&alice)).await.status, StatusCode::OK);
    let res = delete(&app, "/ezelectronics/carts/products/XPS13", Some(&alice)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Product not in cart");
    let res = delete(&app, "/ezelectronics/carts/products/Nope", Some(&alice)).await;
    assert_eq!(res.body["error"], "Product not found");

    let res = get(&app, "/ezelectronics/carts", Some(&alice)).await;
    assert_eq!(res.body["total"], 200.0);
    assert_eq!(res.body["products"][0]["quantity"], 1);
}

#[tokio::test]
async fn cannot_add_out_of_stock_products() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "XPS13", "Laptop", 1, 1000.0).await;
    patch(&app, "/ezelectronics/products/XPS13/sell", Some(&admin), Some(json!({"quantity": 1}))).await;

    let res = post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "XPS13"})).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Product stock is empty");
}

#[tokio::test]
async fn removing_without_open_cart() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "XPS13", "Laptop", 1, 1000.0).await;

    let res = delete(&app, "/ezelectronics/carts/products/XPS13", Some(&alice)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Cart not found");
    assert_eq!(delete(&app, "/ezelectronics/carts/current", Some(&alice)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(patch(&app, "/ezelectronics/carts", Some(&alice), None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_moves_cart_to_history_and_takes_stock() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "iPhone13", "Smartphone", 3, 200.0).await;

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    assert_eq!(patch(&app, "/ezelectronics/carts", Some(&alice), None).await.status, StatusCode::OK);

    let res = get(&app, "/ezelectronics/products?grouping=model&model=iPhone13", Some(&admin)).await;
    assert_eq!(res.body[0]["quantity"], 1);

    let res = get(&app, "/ezelectronics/carts/history", Some(&alice)).await;
    let history = res.body.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["paid"], true);
    assert_eq!(history[0]["paymentDate"], today().to_string());
    assert_eq!(history[0]["total"], 400.0);

    // no open cart is left behind
    let res = get(&app, "/ezelectronics/carts", Some(&alice)).await;
    assert_eq!(res.body["products"], json!([]));
}

#[tokio::test]
async fn checkout_failures() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "iPhone13", "Smartphone", 2, 200.0).await;

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    delete(&app, "/ezelectronics/carts/products/iPhone13", Some(&alice)).await;
    let res = patch(&app, "/ezelectronics/carts", Some(&alice), None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Cart is empty");

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    patch(&app, "/ezelectronics/products/iPhone13/sell", Some(&admin), Some(json!({"quantity": 1}))).await;
    let res = patch(&app, "/ezelectronics/carts", Some(&alice), None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Product stock cannot satisfy the requested quantity");

    patch(&app, "/ezelectronics/products/iPhone13/sell", Some(&admin), Some(json!({"quantity": 1}))).await;
    let res = patch(&app, "/ezelectronics/carts", Some(&alice), None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Product stock is empty");

    // nothing was paid or taken from stock
    assert_eq!(get(&app, "/ezelectronics/carts/history", Some(&alice)).await.body, json!([]));
    assert_eq!(get(&app, "/ezelectronics/carts", Some(&alice)).await.body["products"][0]["quantity"], 2);
}

#[tokio::test]
async fn clearing_and_admin_views() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    let bob = logged_in(&app, "bob", "Customer").await;
    register_product(&app, &admin, "iPhone13", "Smartphone", 5, 200.0).await;

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    post(&app, "/ezelectronics/carts", Some(&bob), json!({"model": "iPhone13"})).await;
    patch(&app, "/ezelectronics/carts", Some(&bob), None).await;
    post(&app, "/ezelectronics/carts", Some(&bob), json!({"model": "iPhone13"})).await;

    assert_eq!(delete(&app, "/ezelectronics/carts/current", Some(&alice)).await.status, StatusCode::OK);
    let res = get(&app, "/ezelectronics/carts", Some(&alice)).await;
    assert_eq!(res.body["total"], 0.0);

    assert_eq!(get(&app, "/ezelectronics/carts/all", Some(&alice)).await.status, StatusCode::UNAUTHORIZED);
    let res = get(&app, "/ezelectronics/carts/all", Some(&admin)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 3);

    assert_eq!(delete(&app, "/ezelectronics/carts", Some(&admin)).await.status, StatusCode::OK);
    assert_eq!(get(&app, "/ezelectronics/carts/all", Some(&admin)).await.body, json!([]));
}

#[tokio::test]
async fn deleted_products_in_carts() {
    let app = app().await;
    let admin = logged_in(&app, "root", "Admin").await;
    let alice = logged_in(&app, "alice", "Customer").await;
    register_product(&app, &admin, "iPhone13", "Smartphone", 5, 200.0).await;
    register_product(&app, &admin, "XPS13", "Laptop", 5, 900.0).await;

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "XPS13"})).await;
    assert_eq!(patch(&app, "/ezelectronics/carts", Some(&alice), None).await.status, StatusCode::OK);

    post(&app, "/ezelectronics/carts", Some(&alice), json!({"model": "iPhone13"})).await;
    assert_eq!(delete(&app, "/ezelectronics/products/iPhone13", Some(&admin)).await.status, StatusCode::OK);
    let res = patch(&app, "/ezelectronics/carts", Some(&alice), None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Product stock is empty");
    assert_eq!(get(&app, "/ezelectronics/carts", Some(&alice)).await.body["products"][0]["model"], "iPhone13");

    // paid carts keep the line snapshot once the product is gone
    assert_eq!(delete(&app, "/ezelectronics/products/XPS13", Some(&admin)).await.status, StatusCode::OK);
    let res = get(&app, "/ezelectronics/carts/history", Some(&alice)).await;
    assert_eq!(res.body[0]["total"], 900.0);
    assert_eq!(res.body[0]["products"], json!([
        {"model": "XPS13", "quantity": 1, "category": "Laptop", "price": 900.0}
    ]));
}
