//! Checkout flow: the single public write path.

use quickbite_integration_tests::{TestContext, customer_json};
use serde_json::json;

async fn count(ctx: &TestContext, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(ctx.pool())
        .await
        .expect("count query")
}

#[tokio::test]
async fn test_checkout_persists_order_with_computed_total() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "creditCard",
                "items": [
                    { "itemId": "item-donut", "quantity": 1 },
                    { "itemId": "item-burger", "quantity": 2, "selectedOption": "Large" },
                ],
            }),
        )
        .await;

    assert_eq!(status, 201, "body: {body}");
    // subtotal 29.97 + 10% service fee + $5 delivery
    assert_eq!(body["total"], "37.967");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["paymentMethod"], "creditCard");
    assert_eq!(body["lines"].as_array().expect("lines").len(), 2);
    assert_eq!(body["lines"][1]["selectedOption"], "Large");
    // unit price captured at order time
    assert_eq!(body["lines"][1]["unitPrice"], "12.99");
    assert_eq!(body["customer"]["email"], "jordan@example.com");
}

#[tokio::test]
async fn test_checkout_defaults_option_to_first_declared() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-burger", "quantity": 1 }],
            }),
        )
        .await;

    assert_eq!(status, 201, "body: {body}");
    assert_eq!(body["lines"][0]["selectedOption"], "Regular");
}

#[tokio::test]
async fn test_checkout_unknown_item_leaves_nothing_behind() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [
                    { "itemId": "item-donut", "quantity": 1 },
                    { "itemId": "no-such-item", "quantity": 1 },
                ],
            }),
        )
        .await;

    assert_eq!(status, 400);
    // The whole transaction rolled back: no order, no lines, and no
    // customer upsert either.
    assert_eq!(count(&ctx, "food_order").await, 0);
    assert_eq!(count(&ctx, "order_line").await, 0);
    assert_eq!(count(&ctx, "customer").await, 0);
}

#[tokio::test]
async fn test_checkout_storage_failure_rolls_back_customer_upsert() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    // Force a failure after the customer upsert and order insert have run:
    // with order_line gone, the line insert is the first statement to fail.
    sqlx::query("DROP TABLE order_line")
        .execute(ctx.pool())
        .await
        .expect("drop order_line");

    let (status, body) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-donut", "quantity": 1 }],
            }),
        )
        .await;

    assert_eq!(status, 500, "body: {body}");
    // The upsert and the order insert both ran inside the transaction and
    // must have been rolled back with it.
    assert_eq!(count(&ctx, "customer").await, 0);
    assert_eq!(count(&ctx, "food_order").await, 0);
}

#[tokio::test]
async fn test_checkout_undeclared_option_rejected() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-donut", "quantity": 1, "selectedOption": "Jumbo" }],
            }),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(count(&ctx, "customer").await, 0);
}

#[tokio::test]
async fn test_checkout_missing_field_names_it() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let mut customer = customer_json("jordan@example.com");
    customer["phone"] = serde_json::Value::String(String::new());

    let (status, body) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer,
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-donut", "quantity": 1 }],
            }),
        )
        .await;

    assert_eq!(status, 400);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("phone"),
        "body: {body}"
    );
}

#[tokio::test]
async fn test_checkout_empty_items_rejected() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [],
            }),
        )
        .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_checkout_zero_quantity_rejected() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-donut", "quantity": 0 }],
            }),
        )
        .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_repeat_checkout_overwrites_customer_contact() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let order = |address: &str| {
        let mut customer = customer_json("jordan@example.com");
        customer["address"] = serde_json::Value::String(address.to_owned());
        json!({
            "customer": customer,
            "paymentMethod": "cash",
            "items": [{ "itemId": "item-donut", "quantity": 1 }],
        })
    };

    let (status, _) = ctx.post_json("/orders", &order("12 Elm Street")).await;
    assert_eq!(status, 201);
    let (status, body) = ctx.post_json("/orders", &order("9 Oak Avenue")).await;
    assert_eq!(status, 201);

    // Same customer row, newest contact details.
    assert_eq!(count(&ctx, "customer").await, 1);
    assert_eq!(body["customer"]["address"], "9 Oak Avenue");
}
