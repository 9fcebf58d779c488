//! Catalog administration and the public menu payload.

use quickbite_integration_tests::{TestContext, customer_json};
use serde_json::json;

#[tokio::test]
async fn test_menu_payload_shape() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx.get("/menu").await;

    assert_eq!(status, 200);
    assert_eq!(body["items"].as_array().expect("items").len(), 2);
    assert_eq!(body["categories"].as_array().expect("categories").len(), 5);
    assert_eq!(body["settings"]["currency"], "USD");
    assert_eq!(body["settings"]["deliveryFee"], "5");
    assert_eq!(body["settings"]["itemsPerRow"], 3);
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_menu() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/menu").await;

    assert_eq!(status, 200);
    assert_eq!(body["items"].as_array().expect("items").len(), 0);
    // Default settings are served even before seeding.
    assert_eq!(body["settings"]["currency"], "USD");
}

#[tokio::test]
async fn test_disabled_category_drops_from_menu_but_keeps_items() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx
        .put_json_admin("/categories/donuts", &json!({ "enabled": false }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["enabled"], false);

    // The public menu hides the donut...
    let (_, menu) = ctx.get("/menu").await;
    let names: Vec<&str> = menu["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|i| i["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["Classic Cheeseburger"]);

    // ...but the admin view still sees it, data intact.
    let (_, all) = ctx.get_admin("/menu-items").await;
    assert_eq!(all.as_array().expect("items").len(), 2);

    // Re-enabling restores visibility.
    let (status, _) = ctx
        .put_json_admin("/categories/donuts", &json!({ "enabled": true }))
        .await;
    assert_eq!(status, 200);
    let (_, menu) = ctx.get("/menu").await;
    assert_eq!(menu["items"].as_array().expect("items").len(), 2);
}

#[tokio::test]
async fn test_toggle_unknown_category_is_404() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .put_json_admin("/categories/sushi", &json!({ "enabled": false }))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_item_crud_roundtrip() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    // Create: no options declared, garbage price.
    let (status, created) = ctx
        .post_json_admin(
            "/menu-items",
            &json!({
                "name": "Mystery Pizza",
                "price": "not-a-number",
                "categoryId": "pizza",
            }),
        )
        .await;
    assert_eq!(status, 201, "body: {created}");
    // Coerced, not rejected.
    assert_eq!(created["price"], "0");
    assert_eq!(created["options"], json!(["Regular"]));
    assert_eq!(created["mealIncludes"], json!(["Meal"]));

    let id = created["id"].as_str().expect("id").to_owned();

    // Update with a real price.
    let (status, updated) = ctx
        .put_json_admin(
            &format!("/menu-items/{id}"),
            &json!({
                "name": "Margherita Pizza",
                "price": 14.5,
                "categoryId": "pizza",
                "options": ["Small", "Large"],
            }),
        )
        .await;
    assert_eq!(status, 200, "body: {updated}");
    assert_eq!(updated["name"], "Margherita Pizza");
    assert_eq!(updated["price"], "14.5");

    // Delete.
    let (status, _) = ctx.delete_admin(&format!("/menu-items/{id}")).await;
    assert_eq!(status, 204);

    let (_, all) = ctx.get_admin("/menu-items").await;
    assert_eq!(all.as_array().expect("items").len(), 2);
}

#[tokio::test]
async fn test_item_create_unknown_category_rejected() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, _) = ctx
        .post_json_admin(
            "/menu-items",
            &json!({ "name": "Ghost Roll", "price": 8, "categoryId": "sushi" }),
        )
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_delete_item_preserves_historical_orders() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, order) = ctx
        .post_json(
            "/orders",
            &json!({
                "customer": customer_json("jordan@example.com"),
                "paymentMethod": "cash",
                "items": [{ "itemId": "item-donut", "quantity": 2 }],
            }),
        )
        .await;
    assert_eq!(status, 201);
    let order_id = order["id"].as_str().expect("id").to_owned();

    let (status, _) = ctx.delete_admin("/menu-items/item-donut").await;
    assert_eq!(status, 204);

    // The ledger still carries the captured name and price.
    let (status, orders) = ctx.get_admin("/orders").await;
    assert_eq!(status, 200);
    let line = &orders[0]["lines"][0];
    assert_eq!(line["itemName"], "Chocolate Glazed Donut");
    assert_eq!(line["unitPrice"], "3.99");

    // And the invoice still renders.
    let (status, invoice) = ctx.get_admin(&format!("/orders/{order_id}/invoice")).await;
    assert_eq!(status, 200);
    assert_eq!(invoice["lines"][0]["extension"], "7.98");
}

#[tokio::test]
async fn test_settings_partial_merge_over_http() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx
        .put_json_admin(
            "/menu-settings",
            &json!({ "deliveryFee": "7.5", "itemsPerRow": 9, "showPopular": false }),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["deliveryFee"], "7.5");
    // Clamped to the nearest allowed width.
    assert_eq!(body["itemsPerRow"], 4);
    assert_eq!(body["showPopular"], false);
    // Untouched fields keep their values.
    assert_eq!(body["serviceFeeRate"], "10");
    assert_eq!(body["currency"], "USD");

    // Persisted: the public read agrees.
    let (_, read) = ctx.get("/menu-settings").await;
    assert_eq!(read["deliveryFee"], "7.5");
    assert_eq!(read["itemsPerRow"], 4);
}

#[tokio::test]
async fn test_settings_garbage_fee_coerces_to_zero() {
    let ctx = TestContext::new().await;
    ctx.seed_catalog().await;

    let (status, body) = ctx
        .put_json_admin("/menu-settings", &json!({ "deliveryFee": "oops" }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["deliveryFee"], "0");
}
